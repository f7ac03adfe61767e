use rand::Rng;
use tracing::debug;

use crate::config::optimizer_config::{OffspringScoring, OptimizationConfig};
use crate::models::site::{sort_by_score_desc, Site};
use crate::scoring::scorer::SiteEvaluator;
use crate::utils::logging::{self, OperationCategory, SiteSearchType};

/// Survivor/offspring local search over a scored population.
///
/// Each generation keeps the better half unchanged and refills the other half with
/// averaged children of random survivor pairs. With `OffspringScoring::ParentDecay`
/// children are never evaluated: they take `parent1.score * offspring_decay`.
#[derive(Debug, Clone)]
pub struct PopulationRefiner {
    generations: usize,
    mutation_rate: f64,
    mutation_offset: i32,
    offspring_decay: f64,
    offspring_scoring: OffspringScoring,
    next_id: usize,
    evaluated: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationStats {
    pub survivors: usize,
    pub offspring: usize,
    pub mutated: usize,
}

impl PopulationRefiner {
    /// `initial` is the scored starting population; ids for offspring continue after it.
    pub fn new(config: &OptimizationConfig, initial: &[Site]) -> Self {
        Self {
            generations: config.effective_generations(),
            mutation_rate: config.mutation_rate,
            mutation_offset: config.mutation_offset,
            offspring_decay: config.offspring_decay,
            offspring_scoring: config.offspring_scoring,
            next_id: initial.iter().map(|site| site.id() + 1).max().unwrap_or(0),
            evaluated: initial.len(),
        }
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn evaluated_count(&self) -> usize {
        self.evaluated
    }

    /// One selection/crossover/mutation pass. The population size is unchanged.
    pub fn run_generation<R: Rng + ?Sized>(
        &mut self,
        mut population: Vec<Site>,
        rng: &mut R,
        evaluator: &dyn SiteEvaluator,
    ) -> (Vec<Site>, GenerationStats) {
        let _timing = logging::start_timing(
            "run_generation",
            OperationCategory::SiteSearch { subcategory: SiteSearchType::Refinement },
        );

        let size = population.len();
        sort_by_score_desc(&mut population);
        // No parents to draw from
        if size < 2 {
            return (population, GenerationStats::default());
        }

        population.truncate(size / 2);
        let survivors = population;

        let offspring_count = size - survivors.len();
        let mut stats = GenerationStats {
            survivors: survivors.len(),
            offspring: offspring_count,
            mutated: 0,
        };

        let mut offspring = Vec::with_capacity(offspring_count);
        for _ in 0..offspring_count {
            let parent1 = &survivors[rng.gen_range(0..survivors.len())];
            let parent2 = &survivors[rng.gen_range(0..survivors.len())];

            let mut child = Site::offspring(self.next_id, parent1, parent2);
            self.next_id += 1;

            if rng.gen::<f64>() < self.mutation_rate {
                let dx = rng.gen_range(-self.mutation_offset..=self.mutation_offset);
                let dy = rng.gen_range(-self.mutation_offset..=self.mutation_offset);
                let center = child.center().offset(dx, dy);
                child = child.with_center(center);
                stats.mutated += 1;
            }

            offspring.push(child.with_inherited_score(parent1, self.offspring_decay));
        }

        if self.offspring_scoring == OffspringScoring::Rescore {
            offspring = offspring.into_iter().map(|child| evaluator.evaluate(child)).collect();
            self.evaluated += offspring.len();
        }

        let mut next = survivors;
        next.extend(offspring);

        debug!(
            "generation: {} survivors, {} offspring ({} mutated)",
            stats.survivors, stats.offspring, stats.mutated
        );

        (next, stats)
    }

    pub fn refine<R: Rng + ?Sized>(
        &mut self,
        mut population: Vec<Site>,
        rng: &mut R,
        evaluator: &dyn SiteEvaluator,
    ) -> Vec<Site> {
        for _ in 0..self.generations {
            population = self.run_generation(population, rng, evaluator).0;
        }
        sort_by_score_desc(&mut population);
        population
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::poi::PixelPoint;
    use crate::models::site::ScoreSource;
    use crate::scoring::criteria::ScoreComponents;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    struct ByPosition;

    impl SiteEvaluator for ByPosition {
        fn evaluate(&self, site: Site) -> Site {
            let value = (site.center().x as f64 / 1000.0).clamp(0.0, 1.0);
            site.with_components(ScoreComponents::new(value, value, value, value, value))
        }
    }

    fn population(size: usize) -> Vec<Site> {
        (0..size)
            .map(|id| {
                let site = Site::candidate(id, PixelPoint::new(100 + id as i32 * 7, 200), 60, 50, 3000.0, 45.0);
                ByPosition.evaluate(site)
            })
            .collect()
    }

    #[test]
    fn population_size_is_conserved() {
        let config = OptimizationConfig::default();
        for size in [2, 3, 10, 51] {
            let initial = population(size);
            let mut refiner = PopulationRefiner::new(&config, &initial);
            let mut rng = StdRng::seed_from_u64(5);
            let mut current = initial;
            for _ in 0..4 {
                current = refiner.run_generation(current, &mut rng, &ByPosition).0;
                assert_eq!(current.len(), size);
            }
        }
    }

    #[test]
    fn survivors_are_the_better_half() {
        let config = OptimizationConfig::default();
        let initial = population(10);
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let (next, stats) = refiner.run_generation(initial.clone(), &mut StdRng::seed_from_u64(1), &ByPosition);

        assert_eq!(stats.survivors, 5);
        assert_eq!(stats.offspring, 5);
        let survivor_ids: Vec<_> = next[..5].iter().map(Site::id).collect();
        assert_eq!(survivor_ids, vec![9, 8, 7, 6, 5]);
        assert_eq!(&next[0], initial.iter().find(|s| s.id() == 9).unwrap());
    }

    #[test]
    fn offspring_scores_decay_from_first_parent() {
        let config = OptimizationConfig::default();
        let initial = population(20);
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let (next, _) = refiner.run_generation(initial, &mut StdRng::seed_from_u64(77), &ByPosition);

        // Replay the same draws to recover each child's first parent
        let survivors = &next[..10];
        let mut rng = StdRng::seed_from_u64(77);
        for child in &next[10..] {
            let parent1 = &survivors[rng.gen_range(0..survivors.len())];
            let _parent2 = rng.gen_range(0..survivors.len());
            if rng.gen::<f64>() < config.mutation_rate {
                let _dx = rng.gen_range(-20..=20);
                let _dy = rng.gen_range(-20..=20);
            }
            assert_eq!(child.score(), parent1.score() * 0.95);
        }
    }

    #[test]
    fn offspring_ids_are_fresh() {
        let config = OptimizationConfig::default();
        let initial = population(12);
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let refined = refiner.refine(initial, &mut StdRng::seed_from_u64(2), &ByPosition);

        let ids: HashSet<_> = refined.iter().map(Site::id).collect();
        assert_eq!(ids.len(), refined.len());
        assert_eq!(refiner.evaluated_count(), 12);
    }

    #[test]
    fn mutation_moves_centers_within_offset() {
        let mut config = OptimizationConfig::default();
        config.mutation_rate = 1.0;
        // Identical parents so the unmutated child center is known
        let initial: Vec<Site> = (0..8)
            .map(|id| ByPosition.evaluate(Site::candidate(id, PixelPoint::new(300, 300), 50, 50, 2500.0, 0.0)))
            .collect();
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let (next, stats) = refiner.run_generation(initial, &mut StdRng::seed_from_u64(4), &ByPosition);

        assert_eq!(stats.mutated, 4);
        for child in &next[4..] {
            let c = child.center();
            assert!((280..=320).contains(&c.x) && (280..=320).contains(&c.y));
        }
        assert!(next[4..].iter().any(|child| child.center() != PixelPoint::new(300, 300)));
    }

    #[test]
    fn offspring_record_how_they_were_scored() {
        let initial = population(10);

        let decay = OptimizationConfig::default();
        let mut refiner = PopulationRefiner::new(&decay, &initial);
        let (next, _) = refiner.run_generation(initial.clone(), &mut StdRng::seed_from_u64(6), &ByPosition);
        assert!(next[..5].iter().all(|site| site.score_source() == ScoreSource::Evaluated));
        assert!(next[5..].iter().all(|site| site.score_source() == ScoreSource::Inherited));

        let mut rescore = OptimizationConfig::default();
        rescore.offspring_scoring = OffspringScoring::Rescore;
        let mut refiner = PopulationRefiner::new(&rescore, &initial);
        let (next, _) = refiner.run_generation(initial, &mut StdRng::seed_from_u64(6), &ByPosition);
        assert!(next.iter().all(|site| site.score_source() == ScoreSource::Evaluated));
    }

    #[test]
    fn rescoring_evaluates_offspring() {
        let mut config = OptimizationConfig::default();
        config.offspring_scoring = OffspringScoring::Rescore;
        config.max_generations = 3;
        let initial = population(10);
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let refined = refiner.refine(initial, &mut StdRng::seed_from_u64(8), &ByPosition);

        assert_eq!(refiner.evaluated_count(), 10 + 3 * 5);
        for site in &refined {
            let expected = ByPosition.evaluate(site.clone()).score();
            assert!((site.score() - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn refine_returns_sorted_population() {
        let mut config = OptimizationConfig::default();
        config.max_generations = 2;
        let initial = population(16);
        let mut refiner = PopulationRefiner::new(&config, &initial);
        let refined = refiner.refine(initial, &mut StdRng::seed_from_u64(13), &ByPosition);
        assert_eq!(refined.len(), 16);
        assert!(refined.windows(2).all(|pair| pair[0].score() >= pair[1].score()));
    }
}
