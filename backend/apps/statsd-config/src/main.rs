//! Statsd Config Generator Entry Point
//!
//! Reads descriptor definitions, generates the exporter mapping
//! configuration and writes it to stdout. Uses `anyhow` at the top level,
//! but generator errors travel as `kernel::error::AppError` so their kind
//! decides the exit status.

use std::io::Write;
use std::process::ExitCode;

use kernel::error::{
    app_error::{AppError, ResultExt},
    kind::ErrorKind,
};
use statsd_mapping::application::config::ENV_DESCRIPTORS_PATH;
use statsd_mapping::{
    DocumentFormat, GenerateMappingsUseCase, GeneratorConfig, OutputFormat, StatsdConfigBuilder,
    parse_descriptors, render_artifact, render_mappings,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the generated document
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statsd_config=info,statsd_mapping=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => ExitCode::from(report(&e)),
    }
}

/// Log a failed run and pick its exit status
///
/// Input and configuration mistakes are logged at warn, everything else at
/// error. Errors that are not an [`AppError`] exit with 1.
fn report(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<AppError>() {
        Some(app_err) if app_err.is_caller_error() => {
            tracing::warn!(error = %err, kind = %app_err.kind(), "Statsd config generation rejected");
            app_err.exit_code()
        }
        Some(app_err) => {
            tracing::error!(error = %err, kind = %app_err.kind(), "Statsd config generation failed");
            app_err.exit_code()
        }
        None => {
            tracing::error!(error = %err, "Statsd config generation failed");
            1
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = GeneratorConfig::from_env()?;

    tracing::info!(
        service = %config.service.name,
        namespace = %config.service.namespace,
        domain = %config.domain,
        path = %config.descriptors_path.display(),
        "Loading descriptor definitions"
    );

    let raw = std::fs::read_to_string(&config.descriptors_path).map_err(|e| {
        AppError::from(e).with_action(format!("check {ENV_DESCRIPTORS_PATH}"))
    })?;
    let descriptors = parse_descriptors(&raw, DocumentFormat::from_path(&config.descriptors_path))
        .map_err(AppError::from)?;

    let mappings = GenerateMappingsUseCase::new(&config.service.name, &config.domain)
        .execute(&descriptors)
        .map_err(AppError::from)?;
    let mapping_conf = render_mappings(&mappings).map_err(AppError::from)?;

    let output = match config.output {
        OutputFormat::Mappings => mapping_conf,
        OutputFormat::Artifact => {
            let artifact = StatsdConfigBuilder::new(config.service.clone())
                .managed_by(config.managed_by.as_str())
                .mapping_conf(mapping_conf)
                .build()
                .map_err(AppError::from)?;
            tracing::info!(artifact = %artifact.name, "Built statsd config artifact");
            render_artifact(&artifact).map_err(AppError::from)?
        }
    };

    std::io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .map_app_err(ErrorKind::Io, "Failed to write generated document")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use statsd_mapping::MappingError;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_caller_error_is_logged_as_warning() {
        let err = AppError::from(MappingError::MissingField {
            descriptor: "checkout".to_string(),
            field: "route",
        });
        assert_eq!(report(&anyhow::Error::from(err)), 65);
        assert!(logs_contain("WARN"));
        assert!(logs_contain("generation rejected"));
        assert!(!logs_contain("ERROR"));
    }

    #[test]
    #[traced_test]
    fn test_io_failure_is_logged_as_error() {
        let err = AppError::new(ErrorKind::Io, "Failed to write generated document");
        assert_eq!(report(&anyhow::Error::from(err)), 74);
        assert!(logs_contain("ERROR"));
        assert!(logs_contain("generation failed"));
    }

    #[test]
    #[traced_test]
    fn test_foreign_error_exits_with_one() {
        assert_eq!(report(&anyhow::anyhow!("boom")), 1);
        assert!(logs_contain("boom"));
    }
}
