use super::RequestsLoggingLevel;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    /// The single browser origin allowed to call the API.
    pub cors_origin: String,
    /// If false, 500 responses carry a generic message instead of the error text.
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            host: "127.0.0.1".to_string(),
            port: 8000,
            metrics_port: 9091,
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
            expose_error_details: true,
        }
    }
}
