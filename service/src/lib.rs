use config::Config;
use jobs::JobQueue;
use log::*;
use std::sync::Arc;
use webhook_auth::webhook::{HmacWebhookValidator, WebhookSecret, WebhookValidator};

use crate::error::{config_error, ConfigErrorKind, Error};

pub mod config;
pub mod error;
pub mod jobs;
pub mod logging;
pub mod ticket;

/// Resolves the webhook signature validator from configuration.
///
/// Returns `Ok(None)` only when validation was explicitly disabled outside of
/// production. A missing or empty secret is a startup error, never a silent
/// fallback to unauthenticated intake.
pub fn init_signature_validator(
    config: &Config,
) -> Result<Option<Arc<dyn WebhookValidator>>, Error> {
    if config.signature_validation_disabled() {
        if config.is_production() {
            return Err(config_error(
                ConfigErrorKind::ValidationDisabledInProduction,
                "Webhook signature validation cannot be disabled in production",
            ));
        }
        warn!(
            "Webhook signature validation is DISABLED ({} environment); all ticket webhooks will be accepted",
            config.runtime_env()
        );
        return Ok(None);
    }

    let header = config.signature_header();
    if header.is_empty()
        || !header
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
    {
        return Err(config_error(
            ConfigErrorKind::InvalidSignatureHeader,
            "Signature header name must be a non-empty HTTP token",
        ));
    }

    let secret = WebhookSecret::from_config(config.webhook_secret()?)?;
    info!("Webhook signature validation enabled (header: {header})");

    Ok(Some(Arc::new(HmacWebhookValidator::new(
        secret,
        header.to_string(),
    ))))
}

// Service-level state containing only infrastructure concerns
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub signature_validator: Option<Arc<dyn WebhookValidator>>,
    pub job_queue: Arc<dyn JobQueue>,
}

impl AppState {
    /// Binds configuration into request-handling state. Fails fast on any
    /// signature configuration problem.
    pub fn new(app_config: Config, job_queue: Arc<dyn JobQueue>) -> Result<Self, Error> {
        let signature_validator = init_signature_validator(&app_config)?;
        Ok(Self {
            config: app_config,
            signature_validator,
            job_queue,
        })
    }

    pub fn job_queue_ref(&self) -> &dyn JobQueue {
        self.job_queue.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RustEnv;
    use crate::error::ErrorKind;
    use crate::jobs::ChannelJobQueue;

    fn base_config() -> Config {
        Config::from_args(["service"]).unwrap()
    }

    fn queue() -> Arc<dyn JobQueue> {
        let (queue, _receiver) = ChannelJobQueue::new(1);
        Arc::new(queue)
    }

    #[test]
    fn test_missing_secret_fails_startup() {
        let err = AppState::new(base_config(), queue()).err().unwrap();
        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::InvalidSecret)
        );
    }

    #[test]
    fn test_empty_secret_fails_startup() {
        let config = base_config().set_webhook_secret("");
        let err = AppState::new(config, queue()).err().unwrap();
        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::InvalidSecret)
        );
    }

    #[test]
    fn test_configured_secret_enables_validation() {
        let config = base_config().set_webhook_secret("a1b2c3d4e5f6");
        let state = AppState::new(config, queue()).unwrap();

        let validator = state.signature_validator.unwrap();
        assert_eq!(validator.signature_header(), "x-webhook-signature");
    }

    #[test]
    fn test_unusable_header_name_fails_startup() {
        let config = Config::from_args(["service", "--signature-header", "x signature"])
            .unwrap()
            .set_webhook_secret("a1b2c3d4e5f6");
        let err = AppState::new(config, queue()).err().unwrap();
        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::InvalidSignatureHeader)
        );
    }

    #[test]
    fn test_explicit_disable_outside_production() {
        let config = base_config()
            .set_signature_validation_disabled(true)
            .set_runtime_env(RustEnv::Development);
        let state = AppState::new(config, queue()).unwrap();

        assert!(state.signature_validator.is_none());
    }

    #[test]
    fn test_disable_is_refused_in_production() {
        let config = base_config()
            .set_webhook_secret("a1b2c3d4e5f6")
            .set_signature_validation_disabled(true)
            .set_runtime_env(RustEnv::Production);
        let err = AppState::new(config, queue()).err().unwrap();

        assert_eq!(
            err.error_kind,
            ErrorKind::Config(ConfigErrorKind::ValidationDisabledInProduction)
        );
    }
}
