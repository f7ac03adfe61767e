use rand::Rng;
use tracing::info;

use crate::config::constants::MAX_ROTATION_DEG;
use crate::config::optimizer_config::OptimizationConfig;
use crate::data::poi::PixelPoint;
use crate::error::{Result, SitingError};
use crate::models::site::Site;
use crate::utils::logging::{self, OperationCategory, SiteSearchType};

#[derive(Debug, Clone)]
pub struct CandidateSiteGenerator {
    edge_margin: u32,
    area_range: (f64, f64),
    aspect_range: (f64, f64),
}

impl CandidateSiteGenerator {
    pub fn new(config: &OptimizationConfig) -> Self {
        Self {
            edge_margin: config.edge_margin,
            area_range: (config.min_site_area, config.max_site_area),
            aspect_range: (config.min_aspect_ratio, config.max_aspect_ratio),
        }
    }

    pub fn check_geometry(&self, height: usize, width: usize) -> Result<()> {
        let limit = 2 * self.edge_margin as usize;
        if width <= limit || height <= limit {
            return Err(SitingError::InvalidGeometry { width, height });
        }
        Ok(())
    }

    /// Candidates with ids `0..count`. Centers fall in `[margin, w - margin) x [margin, h - margin)`.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        height: usize,
        width: usize,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Site>> {
        let _timing = logging::start_timing(
            "generate_candidates",
            OperationCategory::SiteSearch { subcategory: SiteSearchType::Generation },
        );

        self.check_geometry(height, width)?;

        let margin = self.edge_margin as i32;
        let (x_max, y_max) = (width as i32 - margin, height as i32 - margin);
        let (min_area, max_area) = self.area_range;
        let (min_aspect, max_aspect) = self.aspect_range;

        let sites: Vec<Site> = (0..count)
            .map(|id| {
                let center = PixelPoint::new(rng.gen_range(margin..x_max), rng.gen_range(margin..y_max));
                let area = rng.gen_range(min_area..max_area);
                let aspect = rng.gen_range(min_aspect..max_aspect);
                let site_width = ((area * aspect).sqrt().floor() as u32).max(1);
                let site_height = (area / site_width as f64).floor() as u32;
                let rotation = rng.gen_range(0.0..MAX_ROTATION_DEG);

                Site::candidate(id, center, site_width, site_height, area, rotation)
            })
            .collect();

        info!("Generated {} candidate sites in a {}x{} image", sites.len(), width, height);
        Ok(sites)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generator() -> CandidateSiteGenerator {
        CandidateSiteGenerator::new(&OptimizationConfig::default())
    }

    #[test]
    fn centers_stay_inside_margins() {
        let mut rng = StdRng::seed_from_u64(42);
        let sites = generator().generate(240, 320, 500, &mut rng).unwrap();
        assert_eq!(sites.len(), 500);
        for site in &sites {
            let c = site.center();
            assert!((50..270).contains(&c.x), "x {} out of range", c.x);
            assert!((50..190).contains(&c.y), "y {} out of range", c.y);
            assert!((0.0..360.0).contains(&site.rotation()));
        }
    }

    #[test]
    fn dimensions_follow_area_and_aspect() {
        let mut rng = StdRng::seed_from_u64(3);
        for site in generator().generate(400, 400, 300, &mut rng).unwrap() {
            assert!((1000.0..10_000.0).contains(&site.area()));
            let w = site.width() as f64;
            let h = site.height() as f64;
            // floor() on both dimensions loses at most one unit on each side
            assert!(w * h <= site.area());
            assert!(w * (h + 1.0) > site.area());
            let aspect = w * w / site.area();
            assert!(aspect < 2.0 && aspect > 0.8 * (w / (w + 1.0)).powi(2));
        }
    }

    #[test]
    fn ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(0);
        let ids: Vec<_> = generator()
            .generate(200, 200, 5, &mut rng)
            .unwrap()
            .iter()
            .map(Site::id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn small_images_are_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generator().generate(100, 500, 10, &mut rng).unwrap_err();
        assert!(matches!(err, SitingError::InvalidGeometry { width: 500, height: 100 }));
        assert!(generator().generate(500, 80, 10, &mut rng).is_err());
        assert!(generator().generate(101, 101, 10, &mut rng).is_ok());
    }

    #[test]
    fn same_seed_same_population() {
        let a = generator().generate(300, 300, 20, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generator().generate(300, 300, 20, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }
}
