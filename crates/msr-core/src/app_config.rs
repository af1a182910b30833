#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration, passed explicitly into every component that
/// needs it. Nothing in the workspace reads ambient process state after this
/// struct is built.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// YouTube channel whose uploads and analytics are aggregated.
    pub channel_id: String,
    pub spreadsheet_id: String,
    /// Worksheet (tab) holding the monthly grid.
    pub sheet_name: String,
    /// OAuth bearer token with YouTube Data + Analytics read scopes. Token
    /// acquisition and refresh live outside this process.
    pub youtube_token: String,
    /// OAuth bearer token with the spreadsheets scope.
    pub sheets_token: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("channel_id", &self.channel_id)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("sheet_name", &self.sheet_name)
            .field("youtube_token", &"[redacted]")
            .field("sheets_token", &"[redacted]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}
