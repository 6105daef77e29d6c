use std::net::SocketAddr;

use url::Url;

/// Environment variable that opts the whole process into verbose
/// logging of every action check. Read once at the entry point; inside
/// the service the flag is an explicit config value.
pub const DEBUG_AUTHZ_ENV: &str = "DEBUG_FORM_CORE_AUTHZ";

#[derive(Debug, Clone)]
pub struct Config {
    // http server configuration
    /// Address for the API HTTP server to listen on.
    pub listen_addr: SocketAddr,

    // authorization configuration
    /// Base URL of the host application's auth proxy. Action checks go
    /// to `<base>/api/proxy/auth/permissions/actions/check/<key>`.
    pub auth_base_url: Url,
    /// When true, log every action check and its result. Error-path
    /// checks are logged regardless.
    pub debug_authz: bool,

    // logging
    pub log_level: tracing::Level,
}
