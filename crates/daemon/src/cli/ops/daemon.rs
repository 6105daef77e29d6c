use std::net::SocketAddr;

use clap::Args;
use url::Url;

use formcore_daemon::service_config::DEBUG_AUTHZ_ENV;
use formcore_daemon::{spawn_service, ServiceConfig};

#[derive(Args, Debug, Clone)]
pub struct Daemon {
    /// Address for the API server to listen on
    #[arg(long, default_value = "0.0.0.0:5080")]
    pub listen_addr: SocketAddr,

    /// Base URL of the host application's auth proxy
    #[arg(long, default_value = "http://localhost:3000")]
    pub auth_url: Url,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: tracing::Level,
}

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("daemon failed: {0}")]
    Failed(String),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Daemon {
    type Error = DaemonError;
    type Output = String;

    async fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        // The debug-authz env var is read here, once, at the process
        // boundary. Everything past this point sees an explicit flag.
        let debug_authz = std::env::var(DEBUG_AUTHZ_ENV)
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let config = ServiceConfig {
            listen_addr: self.listen_addr,
            auth_base_url: self.auth_url.clone(),
            debug_authz,
            log_level: self.log_level,
        };

        spawn_service(&config).await;
        Ok("daemon ended".to_string())
    }
}
