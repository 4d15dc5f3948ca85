use clap::Args;
use dssapi::ConnectionConfig;
use std::time::Duration;

/// Connection arguments, read from the command line or the environment
/// (`DSS_URL`, `DSS_TOKEN`, `DSS_USER`, `DSS_PASSWORD`, a `.env` file works too).
#[derive(Debug, Args)]
pub struct EnvConfig {
    #[clap(long, env = "DSS_URL", help = "base url of the dSS, e.g. https://dss.local:8080")]
    pub url: String,
    #[clap(long, env = "DSS_TOKEN", help = "approved application token")]
    pub token: Option<String>,
    #[clap(long, env = "DSS_USER")]
    pub user: Option<String>,
    #[clap(long, env = "DSS_PASSWORD")]
    pub password: Option<String>,
    #[clap(long, action, help = "accept the self-signed certificate of the dSS")]
    pub insecure: bool,
    #[clap(long, help = "request timeout in seconds")]
    pub timeout: Option<u64>,
}

impl EnvConfig {
    pub fn connection(&self) -> ConnectionConfig {
        let mut config = ConnectionConfig::new(&self.url).accept_invalid_certs(self.insecure);
        if let Some(token) = &self.token {
            config = config.with_app_token(token);
        }
        if let Some(user) = &self.user {
            config = config.with_user(user);
        }
        if let Some(password) = &self.password {
            config = config.with_password(password);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}
