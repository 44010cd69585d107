use crate::counter::Counter;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatisticsSnapshot {
    pub total_vehicles: Counter,
    pub current_vehicles: Counter,
    pub total_revenue: Counter,
    pub unauthorized_exits: Counter,
}
