use clap::builder::TypedValueParser as _;
use clap::{CommandFactory, FromArgMatches, Parser};
use dotenvy::dotenv;
use log::LevelFilter;
use secrecy::SecretString;
use std::convert::Infallible;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{config_error, ConfigErrorKind, Error, ErrorKind};

/// Header the ticketing system sends its HMAC signature in.
pub const DEFAULT_SIGNATURE_HEADER: &str = "x-webhook-signature";

/// Default transport-level cap on webhook bodies (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::new(value.to_string()))
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,

    /// Shared secret the ticketing system signs webhook bodies with.
    #[arg(long, env, hide_env_values = true, value_parser = parse_secret)]
    webhook_secret: Option<SecretString>,

    /// Path to a mounted file holding the webhook secret. Mutually exclusive with
    /// `--webhook-secret`.
    #[arg(long, env)]
    webhook_secret_file: Option<PathBuf>,

    /// Name of the request header carrying the webhook signature
    #[arg(long, env, default_value = DEFAULT_SIGNATURE_HEADER)]
    signature_header: String,

    /// Accept webhooks without checking signatures. Refused in production.
    #[arg(long, env, default_value_t = false)]
    disable_signature_validation: bool,

    /// Largest webhook body accepted, in bytes
    #[arg(long, env, default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Number of enhancement jobs that may wait for the pipeline before webhooks are turned away
    #[arg(long, env, default_value_t = 1024)]
    pub job_queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Builds a config from `args` alone. Neither `.env` nor the process
    /// environment is consulted; unset flags take their defaults.
    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Config::command()
            .mut_args(|arg| arg.env(None::<&'static str>))
            .try_get_matches_from(args)?;
        Config::from_arg_matches(&matches)
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn signature_header(&self) -> &str {
        &self.signature_header
    }

    pub fn signature_validation_disabled(&self) -> bool {
        self.disable_signature_validation
    }

    pub fn set_webhook_secret(mut self, secret: &str) -> Self {
        self.webhook_secret = Some(SecretString::new(secret.to_string()));
        self
    }

    pub fn set_webhook_secret_file(mut self, path: PathBuf) -> Self {
        self.webhook_secret_file = Some(path);
        self
    }

    pub fn set_signature_validation_disabled(mut self, disabled: bool) -> Self {
        self.disable_signature_validation = disabled;
        self
    }

    pub fn set_runtime_env(mut self, runtime_env: RustEnv) -> Self {
        self.runtime_env = runtime_env;
        self
    }

    /// Resolves the webhook secret from either the environment value or the
    /// mounted secret file. Returns `Ok(None)` when neither is configured.
    pub fn webhook_secret(&self) -> Result<Option<SecretString>, Error> {
        match (&self.webhook_secret, &self.webhook_secret_file) {
            (Some(_), Some(_)) => Err(config_error(
                ConfigErrorKind::ConflictingSecretSources,
                "Both WEBHOOK_SECRET and WEBHOOK_SECRET_FILE are set",
            )),
            (Some(secret), None) => Ok(Some(secret.clone())),
            (None, Some(path)) => {
                let contents = fs::read_to_string(path).map_err(|err| Error {
                    source: Some(Box::new(err)),
                    error_kind: ErrorKind::Config(
                        ConfigErrorKind::SecretFileUnreadable,
                    ),
                })?;
                let secret = contents
                    .strip_suffix("\r\n")
                    .or_else(|| contents.strip_suffix('\n'))
                    .unwrap_or(&contents);
                Ok(Some(SecretString::new(secret.to_string())))
            }
            (None, None) => Ok(None),
        }
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}
