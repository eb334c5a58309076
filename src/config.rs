use crate::error::{BadEnvVarSnafu, EditorResult, ParseStaleTimeSnafu};
use dotenvy::var;
use snafu::ResultExt;
use std::{sync::Arc, time::Duration};

const DEFAULT_STALE_SECS: u64 = 10;
const DEFAULT_SERVER_IP: &str = "127.0.0.1:8080";

#[derive(Clone, Debug)]
pub struct RuntimeConfiguration {
    api_config: Arc<ApiConfig>,
    server_ip: Arc<str>,
}

impl RuntimeConfiguration {
    pub fn new() -> EditorResult<Self> {
        let server_ip = var("EDITOR_SERVER_IP").unwrap_or_else(|_| DEFAULT_SERVER_IP.to_string());

        Ok(Self {
            api_config: Arc::new(ApiConfig::new()?),
            server_ip: server_ip.into(),
        })
    }

    pub fn api_config(&self) -> Arc<ApiConfig> {
        self.api_config.clone()
    }

    pub fn server_ip(&self) -> &str {
        &self.server_ip
    }
}

#[derive(Debug)]
pub struct ApiConfig {
    base_url: String,
    stale_time: Duration,
}

impl ApiConfig {
    pub fn new() -> EditorResult<Self> {
        let get_env_var = |name| var(name).context(BadEnvVarSnafu { name });

        let stale_secs = match var("STUDENT_STALE_SECS") {
            Ok(secs) => secs.trim().parse().context(ParseStaleTimeSnafu)?,
            Err(_) => DEFAULT_STALE_SECS,
        };

        Ok(Self {
            base_url: get_env_var("STUDENTS_API_URL")?,
            stale_time: Duration::from_secs(stale_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub const fn stale_time(&self) -> Duration {
        self.stale_time
    }
}
