use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::core::pipeline::OptimizationOutcome;
use crate::error::Result;
use crate::models::site::{ScoreSource, Site};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Serialize)]
struct SiteRecord {
    rank: usize,
    id: usize,
    center_x: i32,
    center_y: i32,
    width: u32,
    height: u32,
    area: f64,
    rotation: f64,
    score: f64,
    sunlight: f64,
    terrain: f64,
    obstacles: f64,
    accessibility: f64,
    cost: f64,
    score_source: ScoreSource,
}

impl SiteRecord {
    fn new(rank: usize, site: &Site) -> Self {
        let components = site.score_components().copied().unwrap_or_default();
        let center = site.center();
        Self {
            rank,
            id: site.id(),
            center_x: center.x,
            center_y: center.y,
            width: site.width(),
            height: site.height(),
            area: site.area(),
            rotation: site.rotation(),
            score: site.score(),
            sunlight: components.sunlight,
            terrain: components.terrain,
            obstacles: components.obstacles,
            accessibility: components.accessibility,
            cost: components.cost,
            score_source: site.score_source(),
        }
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn export_sites_csv<P: AsRef<Path>>(sites: &[Site], path: P) -> Result<()> {
    let _timing = logging::start_timing("export_sites_csv",
        OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut writer = Writer::from_path(path)?;
    for (rank, site) in sites.iter().enumerate() {
        writer.serialize(SiteRecord::new(rank + 1, site))?;
    }
    writer.flush()?;

    info!("Wrote {} sites to {}", sites.len(), path.display());
    Ok(())
}

pub fn export_outcome_json<P: AsRef<Path>>(outcome: &OptimizationOutcome, path: P) -> Result<()> {
    let _timing = logging::start_timing("export_outcome_json",
        OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, outcome)?;

    info!("Wrote optimization outcome to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::poi::PixelPoint;
    use crate::scoring::criteria::ScoreComponents;

    #[test]
    fn writes_header_and_ranked_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sites.csv");
        let sites = vec![
            Site::candidate(4, PixelPoint::new(120, 80), 70, 60, 4200.0, 12.5)
                .with_components(ScoreComponents::new(0.9, 0.7, 1.0, 1.0, 0.6)),
            Site::candidate(9, PixelPoint::new(60, 150), 50, 40, 2000.0, 200.0),
        ];

        export_sites_csv(&sites, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "rank");
        assert_eq!(&headers[13], "cost");
        assert_eq!(&headers[14], "score_source");
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "4");
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[1][9], "0.0");
        assert_eq!(&rows[0][14], "evaluated");
        assert_eq!(&rows[1][14], "unscored");
    }
}
