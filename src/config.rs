use crate::error::AgentError;
use std::fmt;
use std::time::Duration;

pub const FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com";

/// Chat models offered to the user. `Gpt4` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GenerationModel {
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[default]
    #[value(name = "gpt-4")]
    Gpt4,
    #[value(name = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl GenerationModel {
    pub fn id(self) -> &'static str {
        match self {
            GenerationModel::Gpt35Turbo => "gpt-3.5-turbo",
            GenerationModel::Gpt4 => "gpt-4",
            GenerationModel::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}

impl fmt::Display for GenerationModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone)]
pub struct ExtractionConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl ExtractionConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FIRECRAWL_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
            poll_interval: Duration::from_secs(2),
            max_polls: 90,
        }
    }
}

#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: GenerationModel,
    pub timeout: Duration,
}

impl GenerationConfig {
    pub fn new(api_key: impl Into<String>, model: GenerationModel) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            model,
            timeout: Duration::from_secs(60),
        }
    }
}

/// Everything the agent needs from its environment, handed over explicitly.
#[derive(Clone)]
pub struct AgentConfig {
    pub firecrawl: ExtractionConfig,
    pub openai: GenerationConfig,
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), AgentError> {
        if self.firecrawl.api_key.trim().is_empty() || self.openai.api_key.trim().is_empty() {
            return Err(AgentError::Config(
                "Please provide both the Firecrawl and OpenAI API keys".into(),
            ));
        }
        if self.firecrawl.max_polls == 0 {
            return Err(AgentError::Config("max_polls must be at least 1".into()));
        }
        Ok(())
    }
}

// Keys must never end up in logs.
impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .field("max_polls", &self.max_polls)
            .finish()
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentConfig")
            .field("firecrawl", &self.firecrawl)
            .field("openai", &self.openai)
            .finish()
    }
}
