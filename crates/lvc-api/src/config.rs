use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use lvc_bedrock::prompt::DEFAULT_MAX_PROMPT_CHARS;

const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

/// Where the inspection PDFs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Local {
        root: PathBuf,
    },
    /// A missing bucket is allowed; the provider then reports itself
    /// unavailable on every request.
    S3 {
        bucket: Option<String>,
        prefix: String,
    },
}

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: Backend,
    pub region: String,
    pub model_id: String,
    pub max_prompt_chars: usize,
    pub max_output_tokens: i32,
    pub presign_ttl: Duration,
    pub scratch_dir: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend = match var("LVC_BACKEND").as_deref().unwrap_or("local") {
            "local" => Backend::Local {
                root: var("LVC_DOCUMENT_ROOT")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".")),
            },
            "s3" => Backend::S3 {
                bucket: var("LVC_BUCKET"),
                prefix: var("LVC_PREFIX").unwrap_or_default(),
            },
            other => {
                return Err(eyre::eyre!(
                    "LVC_BACKEND must be \"local\" or \"s3\", got {other:?}"
                ));
            }
        };

        let max_prompt_chars = parse(
            var("LVC_MAX_PROMPT_CHARS"),
            "LVC_MAX_PROMPT_CHARS",
            DEFAULT_MAX_PROMPT_CHARS,
        )?;
        if max_prompt_chars == 0 {
            return Err(eyre::eyre!("LVC_MAX_PROMPT_CHARS must be greater than zero"));
        }

        Ok(Self {
            backend,
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            model_id: var("LVC_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            max_prompt_chars,
            max_output_tokens: parse(var("LVC_MAX_OUTPUT_TOKENS"), "LVC_MAX_OUTPUT_TOKENS", 4096)?,
            presign_ttl: Duration::from_secs(parse(
                var("LVC_PRESIGN_TTL_SECS"),
                "LVC_PRESIGN_TTL_SECS",
                900,
            )?),
            scratch_dir: var("LVC_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            bind_addr: parse(var("LVC_BIND_ADDR"), "LVC_BIND_ADDR", default_bind_addr())?,
        })
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

fn parse<T>(value: Option<String>, key: &str, default: T) -> eyre::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|e| eyre::eyre!("invalid {key}={raw:?}: {e}")),
        None => Ok(default),
    }
}
