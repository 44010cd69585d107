use serde::Deserialize;
use serde_json::Number;
use std::fmt;

/// A count or amount owned by the backend, displayed exactly as it was sent.
///
/// Sums of `NUMERIC` columns arrive as strings (`"5000.00"`), counts as
/// plain numbers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Counter {
    Number(Number),
    Text(String),
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counter::Number(n) => write!(f, "{n}"),
            Counter::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for Counter {
    fn from(value: u64) -> Self {
        Counter::Number(value.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn displays_as_sent() {
        let c: Counter = serde_json::from_str("5000").unwrap();
        assert_eq!(c.to_string(), "5000");
        let c: Counter = serde_json::from_str("12.5").unwrap();
        assert_eq!(c.to_string(), "12.5");
        let c: Counter = serde_json::from_str(r#""1500.00""#).unwrap();
        assert_eq!(c.to_string(), "1500.00");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(serde_json::from_str::<Counter>("[1]").is_err());
        assert!(serde_json::from_str::<Counter>("true").is_err());
    }
}
