use crate::core::pipeline::OptimizationOutcome;
use crate::models::site::ScoreSource;
use crate::scoring::criteria::Criterion;

pub fn print_sunlight_summary(outcome: &OptimizationOutcome) {
    let stats = &outcome.sunlight_statistics;
    println!("\nSunlight Analysis ({})", outcome.reference_date);
    println!("----------------------------------------");
    println!("  Mean: {:.2} h/year", stats.mean);
    println!("  Max: {:.2} h/year", stats.max);
    println!("  Min: {:.2} h/year", stats.min);
    println!("  Std Dev: {:.2} h/year", stats.std);
    println!("  Optimal Area: {:.2}%", stats.optimal_area_percentage);
}

pub fn print_optimization_summary(outcome: &OptimizationOutcome) {
    let metrics = &outcome.metrics;
    println!("\nSite Optimization Summary");
    println!("----------------------------------------");
    println!("Candidates Evaluated: {}", metrics.total_candidates_evaluated);
    println!("Generations Run: {}", metrics.generations_run);
    println!("Top Sites Selected: {}", metrics.top_candidates_selected);
    println!("Score: mean {:.4}, min {:.4}, max {:.4}",
        metrics.average_score, metrics.min_score, metrics.max_score);

    println!("\nTop Sites:");
    println!("----------------------------------------");
    for (rank, site) in outcome.candidate_sites.iter().enumerate() {
        let center = site.center();
        println!("#{} site {} at ({}, {}): {}x{} px, {:.0} m², score {:.4}",
            rank + 1, site.id(), center.x, center.y, site.width(), site.height(), site.area(), site.score());

        if let Some(components) = site.score_components() {
            let breakdown: Vec<String> = Criterion::ALL
                .iter()
                .map(|criterion| format!("{} {:.2}", criterion, components.get(*criterion)))
                .collect();
            let marker = if site.score_source() == ScoreSource::Inherited { " (inherited)" } else { "" };
            println!("    {}{}", breakdown.join(", "), marker);
        }
    }
    println!("----------------------------------------");
}
