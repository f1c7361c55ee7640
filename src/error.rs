use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("API Error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Client Initialization Failed: {0}")]
    ClientInit(String),

    #[error("Extraction Failed: {0}")]
    ExtractionFailed(String),

    #[error("Generation Failed: {0}")]
    GenerationFailed(String),
}
