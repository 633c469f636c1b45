//! Shared components for CLI commands
//!
//! Logging setup, layered configuration loading and dashboard construction
//! used by every command implementation.

use crate::app::services::dashboard::Dashboard;
use crate::cli::args::SourceArgs;
use crate::config::InsightsConfig;
use crate::Result;
use std::time::Instant;
use tracing::{debug, info};

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. A second call in the
/// same process keeps the subscriber installed by the first.
pub fn setup_logging(source: &SourceArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = source.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ride_insights={}", log_level)));

    let installed = if source.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    match installed {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(_) => debug!("Logging already initialized"),
    }
    Ok(())
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(source: &SourceArgs) -> Result<InsightsConfig> {
    source.validate()?;

    if let Some(config_path) = &source.config_file {
        info!("Using config file: {}", config_path.display());
    }

    let mut config = InsightsConfig::load(source.config_file.as_deref())?;
    apply_cli_overrides(&mut config, source);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Apply CLI argument overrides to configuration
pub fn apply_cli_overrides(config: &mut InsightsConfig, source: &SourceArgs) {
    if let Some(data_path) = &source.data_path {
        config.data_path = data_path.clone();
    }
    if let Some(image) = &source.dashboard_image {
        config.dashboard_image = image.clone();
    }
}

/// Build a dashboard and load its dataset up front
///
/// A missing or malformed dataset fails here, before any output is produced.
pub fn open_dashboard(source: &SourceArgs) -> Result<Dashboard> {
    let config = load_configuration(source)?;
    let dashboard = Dashboard::from_config(config);

    let start_time = Instant::now();
    let rides = dashboard.warm_up()?;
    info!(
        "Dataset ready: {} rides from {} in {:.2}s",
        rides,
        dashboard.repository().source().display(),
        start_time.elapsed().as_secs_f64()
    );

    Ok(dashboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::ride_loader::tests::{SCENARIO_CSV, write_csv};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_cli_flags_override_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("insights.toml");
        fs::write(
            &config_path,
            "data_path = \"from_file.csv\"\ndashboard_image = \"file.png\"\ncurrency_symbol = \"Rs \"\n",
        )
        .unwrap();

        let source = SourceArgs {
            data_path: Some(PathBuf::from("from_flag.csv")),
            config_file: Some(config_path),
            ..SourceArgs::default()
        };

        let config = load_configuration(&source).unwrap();
        assert_eq!(config.data_path, PathBuf::from("from_flag.csv"));
        assert_eq!(config.dashboard_image, PathBuf::from("file.png"));
        assert_eq!(config.currency_symbol, "Rs ");
    }

    #[test]
    fn test_open_dashboard_loads_eagerly() {
        let (_dir, path) = write_csv(SCENARIO_CSV);
        let source = SourceArgs {
            data_path: Some(path),
            ..SourceArgs::default()
        };

        let dashboard = open_dashboard(&source).unwrap();
        assert!(dashboard.repository().is_loaded());
    }

    #[test]
    fn test_open_dashboard_reports_missing_data() {
        let source = SourceArgs {
            data_path: Some(PathBuf::from("/nonexistent/ola_rides.csv")),
            ..SourceArgs::default()
        };

        let error = open_dashboard(&source).unwrap_err();
        assert!(error.is_load_failure());
    }

    #[test]
    fn test_setup_logging_twice_is_harmless() {
        let source = SourceArgs::default();
        assert!(setup_logging(&source).is_ok());
        assert!(setup_logging(&source).is_ok());
    }
}
