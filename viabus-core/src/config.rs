//! Planner configuration

use std::sync::Arc;
use std::time::Duration;

use crate::model::{BusSystem, StreetMap};
use crate::Error;

/// Immutable value-object binding a street map and a bus system to the
/// numeric tunables of the planner.
///
/// The maps are shared read-only; the planner never mutates them.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub street_map: Arc<StreetMap>,
    pub bus_system: Arc<BusSystem>,
    /// Walking speed in miles per hour.
    pub walk_speed_mph: f64,
    /// Biking speed in miles per hour.
    pub bike_speed_mph: f64,
    /// Speed assumed for buses and unsigned roads, in miles per hour.
    pub default_speed_limit_mph: f64,
    /// Dwell time paid on every bus hop, in seconds.
    pub bus_stop_time_s: f64,
    /// Optional budget handed to the router's precomputation hook.
    pub precompute_time: Option<Duration>,
}

impl PlannerConfig {
    pub const DEFAULT_WALK_SPEED_MPH: f64 = 3.0;
    pub const DEFAULT_BIKE_SPEED_MPH: f64 = 8.0;
    pub const DEFAULT_SPEED_LIMIT_MPH: f64 = 25.0;
    pub const DEFAULT_BUS_STOP_TIME_S: f64 = 30.0;

    pub fn new(street_map: Arc<StreetMap>, bus_system: Arc<BusSystem>) -> Self {
        Self {
            street_map,
            bus_system,
            walk_speed_mph: Self::DEFAULT_WALK_SPEED_MPH,
            bike_speed_mph: Self::DEFAULT_BIKE_SPEED_MPH,
            default_speed_limit_mph: Self::DEFAULT_SPEED_LIMIT_MPH,
            bus_stop_time_s: Self::DEFAULT_BUS_STOP_TIME_S,
            precompute_time: None,
        }
    }

    /// Checks that every tunable is usable for graph construction.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` on a non-positive or non-finite speed
    /// or dwell time.
    pub fn validate(&self) -> Result<(), Error> {
        let speeds = [
            ("walk speed", self.walk_speed_mph),
            ("bike speed", self.bike_speed_mph),
            ("default speed limit", self.default_speed_limit_mph),
        ];
        for (name, value) in speeds {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be strictly positive, got {value}"
                )));
            }
        }
        if !(self.bus_stop_time_s.is_finite() && self.bus_stop_time_s >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "bus stop time must be non-negative, got {}",
                self.bus_stop_time_s
            )));
        }
        Ok(())
    }
}
