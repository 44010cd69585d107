use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnauthorizedExitRecord {
    pub plate_number: String,
    pub exit_time: String,
    #[serde(default)]
    pub gate_location: Option<String>,
}
