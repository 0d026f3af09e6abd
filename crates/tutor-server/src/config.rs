//! Process configuration read from the environment at startup.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::num::NonZeroU64;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tutor_core::{ModelConfig, PersonaTemplate, PromptStrategy, TutorError, DEFAULT_MODEL};
use tutor_llm::{HuggingFaceConfig, DEFAULT_HUB_URL, DEFAULT_INFERENCE_URL, DEFAULT_ROUTER_URL};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8000);
const DEFAULT_TIMEOUT_MS: NonZeroU64 = match NonZeroU64::new(60_000) {
    Some(ms) => ms,
    None => panic!("default timeout must be non-zero"),
};
const DEFAULT_MAX_NEW_TOKENS: u32 = 1024;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set. Please set it in the environment or the .env file.")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("Failed to read persona file {path}: {source}")]
    PersonaFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Persona(#[from] TutorError),
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    Any,
    Origins(Vec<HeaderValue>),
}

impl CorsPolicy {
    /// Parses `*` or a comma-separated list of origins.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw == "*" {
            return Ok(CorsPolicy::Any);
        }

        let origins = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                HeaderValue::from_str(o).map_err(|_| ConfigError::Invalid {
                    name: "TUTOR_CORS_ORIGINS",
                    value: o.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match origins.is_empty() {
            true => Err(ConfigError::Invalid {
                name: "TUTOR_CORS_ORIGINS",
                value: raw.to_string(),
            }),
            false => Ok(CorsPolicy::Origins(origins)),
        }
    }

    /// Builds the tower-http layer for this policy.
    ///
    /// Credentials are only allowed with an explicit origin list.
    pub fn layer(&self) -> CorsLayer {
        match self {
            CorsPolicy::Any => CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
            CorsPolicy::Origins(origins) => CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins.clone()))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE])
                .allow_credentials(true),
        }
    }
}

/// Everything `main` needs, resolved once.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub hugging_face: HuggingFaceConfig,
    pub strategy: PromptStrategy,
    pub persona: PersonaTemplate,
    pub timeout: Duration,
    pub bind_addr: SocketAddr,
    pub cors: CorsPolicy,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; blank values count as unset.
    ///
    /// Values are trimmed, except the prompt template, which is used verbatim.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let token = get("HUGGING_FACE_TOKEN").ok_or(ConfigError::Missing("HUGGING_FACE_TOKEN"))?;

        let model = ModelConfig {
            model: get_or("TUTOR_MODEL", DEFAULT_MODEL),
            max_new_tokens: parse_or(
                "TUTOR_MAX_NEW_TOKENS",
                get("TUTOR_MAX_NEW_TOKENS"),
                DEFAULT_MAX_NEW_TOKENS,
            )?,
            ..ModelConfig::default()
        };

        let strategy = parse_or(
            "TUTOR_PROMPT_STRATEGY",
            get("TUTOR_PROMPT_STRATEGY"),
            PromptStrategy::default(),
        )?;

        let system = match get("TUTOR_PERSONA_FILE") {
            Some(path) => {
                let path = PathBuf::from(path);
                fs::read_to_string(&path)
                    .map_err(|source| ConfigError::PersonaFile { path, source })?
            }
            None => tutor_core::DEFAULT_PERSONA.to_string(),
        };
        let template = lookup("TUTOR_PROMPT_TEMPLATE").filter(|t| !t.trim().is_empty());
        let persona = match template {
            Some(template) => PersonaTemplate::new(system, template)?,
            None => PersonaTemplate::with_system(system),
        };

        let timeout_ms: NonZeroU64 = parse_or(
            "TUTOR_TIMEOUT_MS",
            get("TUTOR_TIMEOUT_MS"),
            DEFAULT_TIMEOUT_MS,
        )?;
        let timeout = Duration::from_millis(timeout_ms.get());

        let bind_addr = parse_or(
            "TUTOR_BIND_ADDR",
            get("TUTOR_BIND_ADDR"),
            SocketAddr::from(DEFAULT_BIND_ADDR),
        )?;

        let cors = CorsPolicy::parse(&get_or("TUTOR_CORS_ORIGINS", "*"))?;

        let hugging_face = HuggingFaceConfig {
            router_url: get_or("TUTOR_ROUTER_URL", DEFAULT_ROUTER_URL),
            inference_url: get_or("TUTOR_INFERENCE_URL", DEFAULT_INFERENCE_URL),
            hub_url: get_or("TUTOR_HUB_URL", DEFAULT_HUB_URL),
            request_timeout: timeout,
            startup_probe: parse_or("TUTOR_STARTUP_PROBE", get("TUTOR_STARTUP_PROBE"), true)?,
            ..HuggingFaceConfig::new(token, model)
        };

        Ok(Self {
            hugging_face,
            strategy,
            persona,
            timeout,
            bind_addr,
            cors,
        })
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}
