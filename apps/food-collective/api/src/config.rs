use core_config::{app_info, env_optional, server::ServerConfig, AppInfo, FromEnv};
use domain_orders::NotifierConfig;
use email::SendGridConfig;
use tracing::warn;

pub use core_config::Environment;

/// Application configuration, composed from the shared config pieces
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub sendgrid: SendGridConfig,
    pub notifier: NotifierConfig,
    /// Comma-separated origins for CORS; unset allows any origin
    pub cors_origins: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3000 by default
        let sendgrid = SendGridConfig::from_env()?;
        let notifier = NotifierConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            sendgrid,
            notifier,
            cors_origins: env_optional("CORS_ALLOWED_ORIGIN"),
        })
    }

    /// Settings that let the server start but make every order fail
    pub fn startup_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if !self.sendgrid.has_api_key() {
            warnings.push("SENDGRID_API_KEY is not set; every email send will fail");
        }
        warnings.extend(self.notifier.problems());
        warnings
    }

    /// Log [`startup_warnings`](Self::startup_warnings); call once tracing is initialised
    pub fn log_startup_warnings(&self) {
        for warning in self.startup_warnings() {
            warn!("{}", warning);
        }
    }
}
