use crate::counter::Counter;
use serde::Deserialize;
use serde_json::Number;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<Number>")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
}

/// Only an exact `1` counts as paid.
impl From<Option<Number>> for PaymentStatus {
    fn from(value: Option<Number>) -> Self {
        match value.and_then(|n| n.as_f64()) {
            Some(v) if v == 1.0 => PaymentStatus::Paid,
            _ => PaymentStatus::Unpaid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VehicleRecord {
    pub plate_number: String,
    pub entry_time: String,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// `None` when the backend sent `null` or left the field out.
    #[serde(default)]
    pub payment_amount: Option<Counter>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn payment_status() {
        let paid = |s: &str| serde_json::from_str::<PaymentStatus>(s).unwrap();
        assert_eq!(paid("1"), PaymentStatus::Paid);
        assert_eq!(paid("1.0"), PaymentStatus::Paid);
        assert_eq!(paid("0"), PaymentStatus::Unpaid);
        assert_eq!(paid("2"), PaymentStatus::Unpaid);
        assert_eq!(paid("null"), PaymentStatus::Unpaid);
    }

    #[test]
    fn amount_zero_is_not_absent() {
        let zero: VehicleRecord = serde_json::from_str(
            r#"{"plate_number":"RAB123","entry_time":"2024-01-01T10:00:00Z","payment_status":1,"payment_amount":0}"#,
        )
        .unwrap();
        assert_eq!(zero.payment_amount, Some(Counter::from(0)));

        let absent: VehicleRecord = serde_json::from_str(
            r#"{"plate_number":"RAB123","entry_time":"2024-01-01T10:00:00Z","payment_status":0}"#,
        )
        .unwrap();
        assert_eq!(absent.payment_amount, None);
        assert_eq!(absent.payment_status, PaymentStatus::Unpaid);
    }
}
