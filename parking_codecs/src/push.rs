use crate::envelope::PayloadError;
use serde::Deserialize;
use serde_json::Value;

/// A message pushed by the server over the live-update socket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PushMessage {
    VehicleUpdate,
    UnauthorizedExit,
    PlateDetected { plate_number: String },
}

#[derive(Debug, Deserialize)]
struct RawPush {
    #[serde(rename = "type")]
    kind: Option<String>,
    /// Only `plate_detected` reads this, so its shape is checked there.
    #[serde(default)]
    plate_number: Option<Value>,
}

impl PushMessage {
    /// Parses one text frame. Unknown `type` values yield `Ok(None)`.
    pub fn parse(frame: &str) -> Result<Option<Self>, PayloadError> {
        let raw: RawPush = serde_json::from_str(frame)?;
        let kind = raw.kind.ok_or(PayloadError::Missing("type"))?;
        let message = match kind.as_str() {
            "vehicle_update" => PushMessage::VehicleUpdate,
            "unauthorized_exit" => PushMessage::UnauthorizedExit,
            "plate_detected" => match raw.plate_number {
                Some(Value::String(plate_number)) => PushMessage::PlateDetected { plate_number },
                _ => return Err(PayloadError::Missing("plate_number")),
            },
            _ => return Ok(None),
        };
        Ok(Some(message))
    }
}
