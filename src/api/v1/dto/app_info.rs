use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AppInfoResponse {
    pub service_name: String,
    pub version: String,
    pub environment: &'static str,
}
