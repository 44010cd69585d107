use crate::page::Container;
use serde::{Deserialize, Serialize};

/// Which page the client keeps in sync.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Counters, vehicle table and unauthorized-exit table
    #[default]
    Dashboard,
    /// Live plate detection, activity feed and the headline counters
    Main,
}

impl View {
    pub fn containers(self) -> &'static [Container] {
        match self {
            View::Dashboard => &[
                Container::TotalVehicles,
                Container::CurrentVehicles,
                Container::TotalRevenue,
                Container::UnauthorizedExits,
                Container::VehiclesTable,
                Container::UnauthorizedExitsTable,
            ],
            View::Main => &[
                Container::CurrentVehicles,
                Container::TotalRevenue,
                Container::ActivityFeed,
                Container::DetectedPlate,
            ],
        }
    }
}
