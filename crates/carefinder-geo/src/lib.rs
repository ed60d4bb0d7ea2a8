//! carefinder-geo
//!
//! Great-circle distance (haversine) and rough travel-time estimates.

use carefinder_core::config::{EngineSettings, DEFAULT_AVERAGE_SPEED_KMH};
use carefinder_core::error::{Error, Result};
use carefinder_core::types::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in decimal degrees.
pub fn distance_km(a: Coordinates, b: Coordinates) -> Result<f64> {
    a.validate()?;
    b.validate()?;
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can push h a hair above 1 for antipodal points
    Ok(2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin())
}

/// Converts distance to minutes at a constant average speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    average_speed_kmh: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self { average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH }
    }
}

impl TravelModel {
    pub fn new(average_speed_kmh: f64) -> Result<Self> {
        if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "average speed must be a positive number, got {average_speed_kmh}"
            )));
        }
        Ok(Self { average_speed_kmh })
    }

    pub fn from_settings(settings: &EngineSettings) -> Result<Self> {
        Self::new(settings.average_speed_kmh)
    }

    pub fn average_speed_kmh(&self) -> f64 {
        self.average_speed_kmh
    }

    /// `round(distance_km / speed * 60)`. A result that does not fit in a
    /// `u32` is reported as `InvalidDistance` rather than saturated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn travel_minutes(&self, distance_km: f64) -> Result<u32> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(Error::InvalidDistance(distance_km));
        }
        let minutes = (distance_km / self.average_speed_kmh * 60.0).round();
        if minutes > f64::from(u32::MAX) {
            return Err(Error::InvalidDistance(distance_km));
        }
        Ok(minutes as u32)
    }
}

/// Travel minutes at the default 30 km/h.
pub fn travel_minutes(distance_km: f64) -> Result<u32> {
    TravelModel::default().travel_minutes(distance_km)
}
