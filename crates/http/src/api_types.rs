use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}
