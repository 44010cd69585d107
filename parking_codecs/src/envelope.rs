use crate::{exit::UnauthorizedExitRecord, statistics::StatisticsSnapshot, vehicle::VehicleRecord};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("backend reported failure: {0}")]
    Rejected(String),

    #[error("payload is missing `{0}`")]
    Missing(&'static str),

    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The `{ success, <payload>, error }` wrapper every API response uses.
pub trait Envelope: DeserializeOwned {
    type Payload;

    /// Name of the payload field, for diagnostics.
    const FIELD: &'static str;

    fn into_parts(self) -> (bool, Option<String>, Option<Self::Payload>);

    fn into_payload(self) -> Result<Self::Payload, PayloadError> {
        match self.into_parts() {
            (true, _, Some(payload)) => Ok(payload),
            (true, _, None) => Err(PayloadError::Missing(Self::FIELD)),
            (false, error, _) => Err(PayloadError::Rejected(
                error.unwrap_or_else(|| "no reason given".to_string()),
            )),
        }
    }
}

/// Parses a response body and unwraps its payload.
pub fn decode<E: Envelope>(body: &str) -> Result<E::Payload, PayloadError> {
    serde_json::from_str::<E>(body)?.into_payload()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatisticsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub statistics: Option<StatisticsSnapshot>,
}

impl Envelope for StatisticsEnvelope {
    type Payload = StatisticsSnapshot;
    const FIELD: &'static str = "statistics";

    fn into_parts(self) -> (bool, Option<String>, Option<Self::Payload>) {
        (self.success, self.error, self.statistics)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehiclesEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub vehicles: Option<Vec<VehicleRecord>>,
}

impl Envelope for VehiclesEnvelope {
    type Payload = Vec<VehicleRecord>;
    const FIELD: &'static str = "vehicles";

    fn into_parts(self) -> (bool, Option<String>, Option<Self::Payload>) {
        (self.success, self.error, self.vehicles)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExitsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub exits: Option<Vec<UnauthorizedExitRecord>>,
}

impl Envelope for ExitsEnvelope {
    type Payload = Vec<UnauthorizedExitRecord>;
    const FIELD: &'static str = "exits";

    fn into_parts(self) -> (bool, Option<String>, Option<Self::Payload>) {
        (self.success, self.error, self.exits)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejected_without_reason() {
        let err = decode::<StatisticsEnvelope>(r#"{"success":false}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Rejected(ref r) if r == "no reason given"));
    }

    #[test]
    fn success_without_payload() {
        let err = decode::<VehiclesEnvelope>(r#"{"success":true}"#).unwrap_err();
        assert!(matches!(err, PayloadError::Missing("vehicles")));
    }

    #[test]
    fn not_json() {
        let err = decode::<ExitsEnvelope>("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, PayloadError::Malformed(_)));
    }

    #[test]
    fn empty_list() {
        let exits = decode::<ExitsEnvelope>(r#"{"success":true,"exits":[]}"#).unwrap();
        assert!(exits.is_empty());
    }
}
