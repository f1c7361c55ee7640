use crate::ai::client::{Generator, OpenAiClient};
use crate::ai::extract::{ExtractionEnvelope, Extractor, FirecrawlExtractor};
use crate::ai::prompts;
use crate::ai::schema_utils;
use crate::config::AgentConfig;
use crate::core::schema::{LocationTrendCollection, PropertyCollection, SearchParams};
use crate::core::sources;
use crate::error::AgentError;
use serde_json::Value;
use uuid::Uuid;

pub const ERROR_PREFIX: &str = "Error: ";
pub const NO_TRENDS_MESSAGE: &str = "No price trends data available";

/// Where the orchestrator reports failures it has turned into text.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: &str, error: &AgentError);
}

pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, operation: &str, error: &AgentError) {
        log::error!("Error in {operation}: {error}");
    }
}

/// Pulls the array stored under `key` out of a success envelope. Anything
/// else (failure, missing key, wrong type) yields an empty list.
pub fn coalesce_to_empty(envelope: ExtractionEnvelope, key: &str) -> Vec<Value> {
    match envelope {
        ExtractionEnvelope::Success(mut data) => match data.get_mut(key).map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        ExtractionEnvelope::Failure => Vec::new(),
    }
}

pub struct Orchestrator {
    extractor: Box<dyn Extractor>,
    generator: Box<dyn Generator>,
    reporter: Box<dyn ErrorReporter>,
}

impl Orchestrator {
    pub fn new(extractor: Box<dyn Extractor>, generator: Box<dyn Generator>) -> Self {
        Self {
            extractor,
            generator,
            reporter: Box::new(LogReporter),
        }
    }

    /// Builds the Firecrawl and OpenAI clients. Fails before any search runs
    /// if either cannot be constructed.
    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        config.validate()?;
        let extractor = FirecrawlExtractor::new(config.firecrawl.clone())?;
        let generator = OpenAiClient::new(config.openai.clone())?;
        Ok(Self::new(Box::new(extractor), Box::new(generator)))
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Finds listings matching `params` and returns the model's comparative
    /// analysis. Never fails: errors come back as `Error: ...` text.
    pub async fn find_properties(&self, params: &SearchParams) -> String {
        self.at_boundary("find_properties", self.try_find_properties(params)).await
    }

    /// Locality price-trend report for `city`, or [`NO_TRENDS_MESSAGE`] when
    /// nothing could be extracted.
    pub async fn get_location_trends(&self, city: &str) -> String {
        self.at_boundary("get_location_trends", self.try_location_trends(city)).await
    }

    async fn at_boundary(
        &self,
        operation: &str,
        run: impl Future<Output = Result<String, AgentError>>,
    ) -> String {
        match run.await {
            Ok(text) => text,
            Err(e) => {
                self.reporter.report(operation, &e);
                format!("{ERROR_PREFIX}{e}")
            }
        }
    }

    async fn try_find_properties(&self, params: &SearchParams) -> Result<String, AgentError> {
        let run_id = Uuid::new_v4();
        let urls = sources::listing_sources(&params.city);
        let schema = schema_utils::extraction_schema::<PropertyCollection>()?;

        log::info!(
            "[{run_id}] 🔍 Extracting {} listings in {} from {} sources",
            params.property_type,
            params.city,
            urls.len()
        );
        let envelope = self
            .extractor
            .extract(&urls, &prompts::listings_directive(params), &schema)
            .await?;
        let failed = envelope == ExtractionEnvelope::Failure;

        let listings = coalesce_to_empty(envelope, PropertyCollection::KEY);
        if listings.is_empty() {
            let cause = if failed { "extraction failed" } else { "no listings returned" };
            log::warn!("[{run_id}] {cause}, analysing an empty listing set");
        } else {
            log::info!("[{run_id}]    -> {} listings extracted", listings.len());
        }

        let listings_text = serde_json::to_string_pretty(&listings)?;
        log::info!("[{run_id}] 🧠 Generating property analysis");
        let analysis = self
            .generator
            .generate(&prompts::listings_analysis(params, &listings_text))
            .await?;

        Ok(analysis.content)
    }

    async fn try_location_trends(&self, city: &str) -> Result<String, AgentError> {
        let run_id = Uuid::new_v4();
        let urls = sources::trend_sources(city);
        let schema = schema_utils::extraction_schema::<LocationTrendCollection>()?;

        log::info!("[{run_id}] 📊 Extracting price trends for {city}");
        let envelope = self
            .extractor
            .extract(&urls, prompts::TRENDS_DIRECTIVE, &schema)
            .await?;

        let locations = coalesce_to_empty(envelope, LocationTrendCollection::KEY);
        if locations.is_empty() {
            log::warn!("[{run_id}] No trend data extracted for {city}");
            return Ok(NO_TRENDS_MESSAGE.to_string());
        }
        log::info!("[{run_id}]    -> {} localities extracted", locations.len());

        let locations_text = serde_json::to_string_pretty(&locations)?;
        log::info!("[{run_id}] 🧠 Generating trends analysis");
        let analysis = self
            .generator
            .generate(&prompts::trends_analysis(city, &locations_text))
            .await?;

        Ok(analysis.content)
    }
}
