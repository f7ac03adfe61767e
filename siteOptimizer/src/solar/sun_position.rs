use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::constants::{
    AXIAL_TILT_DEG, DAYS_PER_YEAR, DEGREES_PER_HOUR, SOLAR_NOON_HOUR, SPRING_EQUINOX_OFFSET,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunPosition {
    pub azimuth: f64,   // degrees
    pub elevation: f64, // degrees
}

impl SunPosition {
    pub fn is_above_horizon(&self) -> bool {
        self.elevation >= 0.0
    }
}

/// Simple declination/hour-angle sun model for a fixed location.
#[derive(Debug, Clone, Copy)]
pub struct SunPositionModel {
    latitude: f64,
    longitude: f64,
}

impl SunPositionModel {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn declination(day_of_year: u32) -> f64 {
        let angle = (360.0 / DAYS_PER_YEAR) * (day_of_year as f64 - SPRING_EQUINOX_OFFSET);
        AXIAL_TILT_DEG * angle.to_radians().sin()
    }

    /// Sun angles on `date` at the given whole `hour` (0-23).
    pub fn position(&self, date: NaiveDate, hour: u32) -> SunPosition {
        let declination = Self::declination(date.ordinal());
        let hour_angle = DEGREES_PER_HOUR * (hour as f64 - SOLAR_NOON_HOUR);

        let lat_rad = self.latitude.to_radians();
        let dec_rad = declination.to_radians();
        let hour_rad = hour_angle.to_radians();

        let elevation = clamped_asin(
            lat_rad.sin() * dec_rad.sin() + lat_rad.cos() * dec_rad.cos() * hour_rad.cos(),
        );

        let azimuth = hour_rad
            .sin()
            .atan2(hour_rad.cos() * lat_rad.sin() - dec_rad.tan() * lat_rad.cos());

        SunPosition {
            azimuth: azimuth.to_degrees(),
            elevation: elevation.to_degrees(),
        }
    }
}

// Rounding can push the sine a hair past +-1
fn clamped_asin(sine: f64) -> f64 {
    sine.clamp(-1.0, 1.0).asin()
}
