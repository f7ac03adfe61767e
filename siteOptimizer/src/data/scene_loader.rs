use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::models::geospatial::GeospatialContext;
use crate::models::obstacle::Obstacle;
use crate::models::terrain::{TerrainClass, TerrainRegionSet};
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    pub height: usize,
    pub width: usize,
}

/// Everything the vision and geospatial collaborators hand to the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub image: ImageDimensions,
    #[serde(default)]
    pub terrain: TerrainRegionSet,
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,
    #[serde(default)]
    pub geospatial: Option<GeospatialContext>,
}

impl Scene {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            image: ImageDimensions { height, width },
            terrain: TerrainRegionSet::new(),
            obstacles: Vec::new(),
            geospatial: None,
        }
    }

    pub fn with_terrain(self, terrain: TerrainRegionSet) -> Self {
        Self { terrain, ..self }
    }

    pub fn with_obstacles(self, obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles, ..self }
    }

    pub fn with_geospatial(self, geospatial: GeospatialContext) -> Self {
        Self { geospatial: Some(geospatial), ..self }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.image.height, self.image.width)
    }
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene> {
    let _timing = logging::start_timing("load_scene",
        OperationCategory::FileIO { subcategory: FileIOType::SceneLoad });

    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let scene: Scene = serde_json::from_reader(reader)?;

    let region_counts: Vec<String> = TerrainClass::ALL
        .iter()
        .map(|class| format!("{}={}", class, scene.terrain.count(*class)))
        .collect();
    info!(
        "Loaded scene {} ({}x{}): {}, {} obstacles",
        path.display(),
        scene.image.width,
        scene.image.height,
        region_counts.join(" "),
        scene.obstacles.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_minimal_scene() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "image": {{ "height": 200, "width": 300 }} }}"#).unwrap();

        let scene = load_scene(file.path()).unwrap();
        assert_eq!(scene.shape(), (200, 300));
        assert!(scene.obstacles.is_empty());
        assert!(scene.geospatial.is_none());
        assert_eq!(scene.terrain.count(TerrainClass::Building), 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_scene("/nonexistent/scene.json").unwrap_err();
        assert!(matches!(err, crate::error::SitingError::Io(_)));
    }
}
