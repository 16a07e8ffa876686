use std::path::PathBuf;

use crate::config::PlannerConfig;

/// Input file locations for planner assembly.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    /// OSM XML extract of the street network.
    pub osm_path: PathBuf,
    /// CSV of `StopID,NodeID` rows.
    pub stops_path: PathBuf,
    /// CSV of `RouteName,StopID` rows.
    pub routes_path: PathBuf,
}

/// Optional overrides of the planner's default tunables.
#[derive(Debug, Clone, Default)]
pub struct PlannerTunables {
    /// Walking speed in miles per hour.
    pub walk_speed_mph: Option<f64>,
    /// Biking speed in miles per hour.
    pub bike_speed_mph: Option<f64>,
    /// Speed assumed for buses and unsigned roads, in miles per hour.
    pub default_speed_limit_mph: Option<f64>,
    /// Bus dwell time per hop, in seconds.
    pub bus_stop_time_s: Option<f64>,
}

impl PlannerTunables {
    pub(crate) fn apply(&self, config: &mut PlannerConfig) {
        if let Some(speed) = self.walk_speed_mph {
            config.walk_speed_mph = speed;
        }
        if let Some(speed) = self.bike_speed_mph {
            config.bike_speed_mph = speed;
        }
        if let Some(speed) = self.default_speed_limit_mph {
            config.default_speed_limit_mph = speed;
        }
        if let Some(dwell) = self.bus_stop_time_s {
            config.bus_stop_time_s = dwell;
        }
    }
}
