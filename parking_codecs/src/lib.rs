pub mod counter;
pub mod envelope;
pub mod exit;
pub mod push;
pub mod statistics;
pub mod timestamp;
pub mod vehicle;

pub use envelope::PayloadError;

/// Endpoint paths served by the parking backend.
pub const STATISTICS_PATH: &str = "/api/statistics";
pub const VEHICLES_PATH: &str = "/api/vehicles";
pub const UNAUTHORIZED_EXITS_PATH: &str = "/api/unauthorized_exits";
pub const PUSH_PATH: &str = "/ws";

#[cfg(test)]
mod test {
    use crate::{
        counter::Counter,
        envelope::{decode, ExitsEnvelope, StatisticsEnvelope, VehiclesEnvelope},
        vehicle::PaymentStatus,
        PayloadError,
    };

    #[test]
    fn flask_responses() {
        let stats = r#"{"statistics":{"current_vehicles":3,"total_revenue":"5000.00","total_vehicles":10,"unauthorized_exits":1},"success":true}"#;
        let stats = decode::<StatisticsEnvelope>(stats).unwrap();
        assert_eq!(stats.total_vehicles, Counter::from(10));
        assert_eq!(stats.total_revenue.to_string(), "5000.00");

        let vehicles = r#"{"success":true,"vehicles":[
            {"entry_time":"Mon, 01 Jan 2024 10:00:00 GMT","payment_amount":null,"payment_status":0,"payment_time":null,"plate_number":"RAB123"},
            {"entry_time":"Mon, 01 Jan 2024 09:00:00 GMT","payment_amount":"500.00","payment_status":1,"payment_time":"Mon, 01 Jan 2024 09:30:00 GMT","plate_number":"RAC777"}
        ]}"#;
        let vehicles = decode::<VehiclesEnvelope>(vehicles).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].payment_status, PaymentStatus::Unpaid);
        assert_eq!(vehicles[0].payment_amount, None);
        assert_eq!(vehicles[1].payment_status, PaymentStatus::Paid);

        let exits = r#"{"exits":[{"exit_time":"Mon, 01 Jan 2024 11:00:00 GMT","gate_location":"ExitGate1","plate_number":"RAB123"}],"success":true}"#;
        let exits = decode::<ExitsEnvelope>(exits).unwrap();
        assert_eq!(exits[0].gate_location.as_deref(), Some("ExitGate1"));

        let failed = r#"{"error":"connection refused","success":false}"#;
        assert!(matches!(
            decode::<ExitsEnvelope>(failed),
            Err(PayloadError::Rejected(e)) if e == "connection refused"
        ));
    }
}
