use crate::llm::{LlmSettings, Provider};
use crate::widget::SubmitPolicy;
use clap::{Parser, Subcommand};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;

/// Endpoint the terminal client posts to unless configured otherwise.
pub const DEFAULT_ENDPOINT: &str = "https://chatbot-xz9t.onrender.com/chat";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the reply service (default)
    Serve,
    /// Chat with the reply service from the terminal
    Chat {
        /// URL messages are posted to
        #[arg(long, env = "MINDBUDDY_ENDPOINT")]
        endpoint: Option<String>,

        /// Refuse new messages while a reply is pending
        #[arg(long)]
        one_pending: bool,
    },
}

impl Cli {
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub widget: WidgetConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    pub endpoint: String,
    pub one_pending: bool,
}

impl WidgetConfig {
    #[must_use]
    pub fn submit_policy(&self) -> SubmitPolicy {
        if self.one_pending {
            SubmitPolicy::OnePending
        } else {
            SubmitPolicy::Overlapping
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl LlmConfig {
    /// Connection settings, or `None` when no API key is configured.
    #[must_use]
    pub fn settings(&self) -> Option<LlmSettings> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())?;

        Some(LlmSettings {
            base_url: self.base_url.clone(),
            api_key: api_key.to_string(),
            model: self.model.clone(),
            provider: Provider::detect_from_url(&self.base_url, &self.model),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        })
    }
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Build the configuration.
    ///
    /// Priority: CLI flag > CLI env var > `MINDBUDDY_` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 5000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("widget.endpoint", DEFAULT_ENDPOINT)?
            .set_default("widget.one_pending", false)?
            .set_default("llm.base_url", "https://api.openai.com")?
            .set_default("llm.model", "gpt-3.5-turbo")?
            .set_default("llm.max_tokens", 300)?
            .set_default("llm.temperature", 0.7)?;

        // 2. Config file: explicit path must exist, ./config.yaml is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::new("config.yaml", FileFormat::Yaml).required(false)),
        };

        // 3. Environment variables, e.g. MINDBUDDY_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("MINDBUDDY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI overrides
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }
        if let Some(Command::Chat {
            endpoint,
            one_pending,
        }) = &cli.command
        {
            if let Some(endpoint) = endpoint {
                builder = builder.set_override("widget.endpoint", endpoint.as_str())?;
            }
            if *one_pending {
                builder = builder.set_override("widget.one_pending", true)?;
            }
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;

        // The conventional OpenAI variable fills in a missing key.
        if cfg.llm.api_key.is_none() {
            cfg.llm.api_key = env::var("OPENAI_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty());
        }

        Ok(cfg)
    }
}
