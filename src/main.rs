mod config;
mod error;
mod core {
    pub mod schema;
    pub mod sources;
}
mod ai {
    #[cfg(test)]
    pub mod canned_http;
    pub mod client;
    pub mod extract;
    pub mod prompts;
    pub mod schema_utils;
}
mod orchestrator;

use crate::config::{AgentConfig, ExtractionConfig, GenerationConfig, GenerationModel};
use crate::core::schema::{PropertyCategory, PropertyType, SearchParams};
use crate::error::AgentError;
use crate::orchestrator::{ErrorReporter, Orchestrator};
use clap::Parser;
use dotenv::dotenv;

/// Find properties in a city and analyse local price trends.
#[derive(Parser, Debug)]
#[command(name = "estate-agent", version)]
struct Cli {
    /// City to search, e.g. Bangalore
    #[arg(long)]
    city: String,

    /// Maximum price in crores
    #[arg(long, default_value_t = 5.0)]
    max_price: f64,

    #[arg(long, value_enum, default_value_t = PropertyCategory::Residential)]
    category: PropertyCategory,

    #[arg(long, value_enum, default_value_t = PropertyType::Flat)]
    property_type: PropertyType,

    /// OpenAI model used for the analysis
    #[arg(long, value_enum, default_value_t = GenerationModel::Gpt4)]
    model: GenerationModel,

    #[arg(long, env = "FIRECRAWL_API_KEY", hide_env_values = true)]
    firecrawl_api_key: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    openai_api_key: String,

    /// Only run the property search
    #[arg(long)]
    skip_trends: bool,
}

struct ConsoleReporter;

impl ErrorReporter for ConsoleReporter {
    fn report(&self, operation: &str, error: &AgentError) {
        eprintln!("❌ Error in {operation}: {error}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.city.trim().is_empty() {
        return Err(AgentError::Config("Please enter a city name".into()).into());
    }

    let config = AgentConfig {
        firecrawl: ExtractionConfig::new(cli.firecrawl_api_key),
        openai: GenerationConfig::new(cli.openai_api_key, cli.model),
    };
    log::debug!("Using {config:?}");

    let agent = Orchestrator::from_config(&config)?.with_reporter(Box::new(ConsoleReporter));

    let params = SearchParams::new(cli.city, cli.max_price)
        .with_category(cli.category)
        .with_property_type(cli.property_type);

    println!("🏠 AI REAL ESTATE AGENT");
    println!("🔍 Searching for properties in {}...\n", params.city);

    let listings_report = agent.find_properties(&params).await;
    println!("🏘️  PROPERTY RECOMMENDATIONS");
    println!("--------------------------------------------------");
    println!("{listings_report}\n");

    if !cli.skip_trends {
        println!("📊 Analyzing location trends...\n");
        let trends_report = agent.get_location_trends(&params.city).await;
        println!("📈 LOCATION TRENDS ANALYSIS");
        println!("--------------------------------------------------");
        println!("{trends_report}");
    }

    Ok(())
}
