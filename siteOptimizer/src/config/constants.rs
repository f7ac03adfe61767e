// Scoring Weights (sum to 1.0)
pub const SUNLIGHT_WEIGHT: f64 = 0.40;
pub const TERRAIN_WEIGHT: f64 = 0.25;
pub const OBSTACLE_WEIGHT: f64 = 0.20;
pub const ACCESSIBILITY_WEIGHT: f64 = 0.10;
pub const COST_WEIGHT: f64 = 0.05;

// Terrain Scores
pub const NEUTRAL_TERRAIN_SCORE: f64 = 0.7;
pub const BARE_LAND_SCORE: f64 = 0.9;
pub const WATER_SCORE: f64 = 0.1;
pub const BUILDING_SCORE: f64 = 0.2;

// Sunlight Scoring
pub const DEGENERATE_SUNLIGHT_SCORE: f64 = 0.5;    // Empty or clipped-away site box

// Obstacle Scoring
pub const OBSTACLE_CLEARANCE_DISTANCE: f64 = 100.0; // Pixels for a full obstacle score
pub const NO_OBSTACLE_SCORE: f64 = 1.0;

// Accessibility Slope Bands (degrees -> score)
pub const FLAT_SLOPE_LIMIT: f64 = 5.0;
pub const GENTLE_SLOPE_LIMIT: f64 = 10.0;
pub const MODERATE_SLOPE_LIMIT: f64 = 15.0;
pub const FLAT_SLOPE_SCORE: f64 = 1.0;
pub const GENTLE_SLOPE_SCORE: f64 = 0.7;
pub const MODERATE_SLOPE_SCORE: f64 = 0.4;
pub const STEEP_SLOPE_SCORE: f64 = 0.2;

// Cost Area Bands (square meters -> score)
pub const LARGE_SITE_AREA: f64 = 8000.0;
pub const MEDIUM_SITE_AREA: f64 = 5000.0;
pub const SMALL_SITE_AREA: f64 = 3000.0;
pub const LARGE_SITE_SCORE: f64 = 1.0;
pub const MEDIUM_SITE_SCORE: f64 = 0.8;
pub const SMALL_SITE_SCORE: f64 = 0.6;
pub const TINY_SITE_SCORE: f64 = 0.4;

// Solar Geometry
pub const AXIAL_TILT_DEG: f64 = 23.45;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const SPRING_EQUINOX_OFFSET: f64 = 81.0;        // Day-of-year offset for declination
pub const DEGREES_PER_HOUR: f64 = 15.0;
pub const SOLAR_NOON_HOUR: f64 = 12.0;

// Shadow Model
pub const SHADOW_FIRST_HOUR: u32 = 6;
pub const SHADOW_LAST_HOUR: u32 = 19;               // Inclusive
pub const MIN_ELEVATION_TANGENT: f64 = 0.1;         // Caps shadow length at low sun
pub const SHADOW_PROJECTION_SCALE: f64 = 50.0;      // Pixels per unit shadow length
pub const SHADOW_SEMI_AXIS_X: f64 = 30.0;
pub const SHADOW_SEMI_AXIS_Y: f64 = 20.0;
pub const BUILDING_SHADOW_INCREMENT: f64 = 0.1;
pub const CLASSIFIED_SHADOW_INCREMENT: f64 = 0.3;

// Sunlight Hours
pub const AVERAGE_DAYLIGHT_HOURS: f64 = 12.0;
pub const MAX_ANNUAL_SUNLIGHT_HOURS: f64 = AVERAGE_DAYLIGHT_HOURS * DAYS_PER_YEAR;
pub const OPTIMAL_SUNLIGHT_FRACTION: f64 = 0.8;     // Of the grid maximum

// Candidate Generation Defaults
pub const DEFAULT_EDGE_MARGIN: u32 = 50;
pub const DEFAULT_MIN_SITE_AREA: f64 = 1000.0;
pub const DEFAULT_MAX_SITE_AREA: f64 = 10_000.0;
pub const DEFAULT_MIN_ASPECT_RATIO: f64 = 0.8;
pub const DEFAULT_MAX_ASPECT_RATIO: f64 = 2.0;
pub const MAX_ROTATION_DEG: f64 = 360.0;

// Refinement Defaults
pub const DEFAULT_POPULATION_SIZE: usize = 1000;
pub const DEFAULT_MAX_GENERATIONS: usize = 50;
pub const GENERATION_CAP: usize = 10;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_MUTATION_RATE: f64 = 0.1;
pub const DEFAULT_MUTATION_OFFSET: i32 = 20;        // Pixels, inclusive on both sides
pub const DEFAULT_OFFSPRING_DECAY: f64 = 0.95;

// Geospatial Defaults (New York City)
pub const DEFAULT_LATITUDE: f64 = 40.7128;
pub const DEFAULT_LONGITUDE: f64 = -74.0060;
pub const DEFAULT_GEO_BBOX: [f64; 4] = [40.7028, -74.0160, 40.7228, -73.9960];
pub const DEFAULT_SLOPE_DEG: f64 = 5.0;

// Caller Budget
pub const DEFAULT_PROCESSING_TIMEOUT_SECS: u64 = 300;

// Spatial Index
pub const OBSTACLE_CELL_SIZE: f64 = 64.0;           // Pixels per bucket side
