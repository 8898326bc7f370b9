//! civic-planner - Analyze one planning brief and print the comparison as JSON.
//!
//! Usage: `civic-planner [BRIEF.json]`. Without a path the brief is read from
//! stdin. Configuration comes from `CIVIC_PLANNER__*` environment variables.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use civic_planner::adapters::baseline::{
    FallbackBaselineProvider, HttpBaselineConfig, HttpBaselineProvider, StaticBaselineProvider,
};
use civic_planner::application::{AnalyzeScenarioCommand, AnalyzeScenarioHandler};
use civic_planner::config::{AppConfig, BaselineConfig, ConfigError};
use civic_planner::domain::foundation::DomainError;
use civic_planner::domain::planning::PlanningBrief;
use civic_planner::domain::tables::PlanningTables;
use civic_planner::ports::{BaselineError, BaselineProvider};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot read brief {source_name}: {source}")]
    BriefUnreadable {
        source_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid brief: {0}")]
    BriefInvalid(#[source] serde_json::Error),

    #[error("Baseline provider setup failed: {0}")]
    Baseline(#[from] BaselineError),

    #[error(transparent)]
    Analysis(#[from] DomainError),

    #[error("Cannot encode analysis: {0}")]
    Output(#[source] serde_json::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match configure() {
        Ok(config) => config,
        Err(err) => {
            // No subscriber is installed yet.
            eprintln!("civic-planner: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Analysis failed");
            eprintln!("civic-planner: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Loads and validates configuration, then installs the tracing subscriber.
fn configure() -> Result<AppConfig, RunError> {
    let config = AppConfig::load()?;
    config.validate().map_err(ConfigError::from)?;
    config.telemetry.init()?;
    Ok(config)
}

async fn run(config: AppConfig) -> Result<(), RunError> {
    let brief = read_brief(std::env::args_os().nth(1).map(PathBuf::from))?;
    let profile = config.scoring.load_profile()?;
    let tables = Arc::new(PlanningTables::with_scoring(profile));
    let provider = baseline_provider(&config.baseline)?;

    info!(
        area = %brief.area.key,
        intent = ?brief.intent,
        provider = provider.name(),
        "Starting scenario analysis"
    );

    let handler = AnalyzeScenarioHandler::new(tables, provider);
    let analysis = handler.handle(AnalyzeScenarioCommand { brief }).await?;

    let output = serde_json::to_string_pretty(&analysis).map_err(RunError::Output)?;
    println!("{}", output);
    Ok(())
}

fn read_brief(path: Option<PathBuf>) -> Result<PlanningBrief, RunError> {
    let (source_name, raw) = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).map_err(|source| RunError::BriefUnreadable {
                source_name: path.display().to_string(),
                source,
            })?;
            (path.display().to_string(), raw)
        }
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .map_err(|source| RunError::BriefUnreadable {
                    source_name: "stdin".to_string(),
                    source,
                })?;
            ("stdin".to_string(), raw)
        }
    };

    tracing::debug!(source = %source_name, bytes = raw.len(), "Read planning brief");
    serde_json::from_str(&raw).map_err(RunError::BriefInvalid)
}

fn baseline_provider(config: &BaselineConfig) -> Result<Arc<dyn BaselineProvider>, RunError> {
    let fallback = StaticBaselineProvider::default();
    let Some(base_url) = config.api_base_url.as_deref().filter(|url| !url.is_empty()) else {
        return Ok(Arc::new(fallback));
    };

    let mut http_config = HttpBaselineConfig::new(base_url).with_timeout(config.timeout());
    if let Some(key) = &config.api_key {
        http_config = http_config.with_api_key(key.clone());
    }
    let primary = HttpBaselineProvider::new(http_config)?;

    Ok(Arc::new(
        FallbackBaselineProvider::new(Arc::new(primary), fallback).with_timeout(config.timeout()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn brief_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_brief_from_path() {
        let file = brief_file(
            r#"{"area": {"key": "mission", "display_name": "Mission District"}, "intent": "anti_displacement"}"#,
        );
        let brief = read_brief(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(brief.area.key, "mission");
    }

    #[test]
    fn malformed_brief_is_invalid() {
        let file = brief_file("{\"area\": 3}");
        assert!(matches!(
            read_brief(Some(file.path().to_path_buf())),
            Err(RunError::BriefInvalid(_))
        ));
    }

    #[test]
    fn missing_brief_names_its_source() {
        let err = read_brief(Some(PathBuf::from("/nonexistent/brief.json"))).unwrap_err();
        assert!(err.to_string().starts_with("Cannot read brief /nonexistent/brief.json"));
    }

    #[test]
    fn provider_is_static_without_base_url() {
        let provider = baseline_provider(&BaselineConfig::default()).unwrap();
        assert_eq!(provider.name(), "static");
    }

    #[test]
    fn provider_is_http_with_base_url() {
        let config = BaselineConfig {
            api_base_url: Some("http://localhost:9".to_string()),
            ..BaselineConfig::default()
        };
        assert_eq!(baseline_provider(&config).unwrap().name(), "http");
    }

    #[test]
    fn config_errors_render_without_telemetry() {
        let err = RunError::from(ConfigError::TelemetryInit("subscriber already set".to_string()));
        assert!(err.to_string().contains("subscriber already set"));
    }
}
