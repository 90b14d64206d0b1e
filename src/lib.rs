pub mod config;
pub mod models;
pub mod pipeline;
pub mod reference;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use pipeline::processor::{build_processor, IntakeError, IntakeProcessor};

/// Exit status when the report layout is not recognized.
const EXIT_COULD_NOT_PARSE: u8 = 2;

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error("Failed to read report from {0}: {1}")]
    Input(String, std::io::Error),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error("Failed to serialize intake outcome: {0}")]
    Output(#[from] serde_json::Error),
}

/// Report text from a file path, or stdin when the path is absent or `-`.
fn read_report(source: Option<&str>) -> Result<String, RunError> {
    match source {
        Some(path) if path != "-" => std::fs::read_to_string(Path::new(path))
            .map_err(|e| RunError::Input(path.to_string(), e)),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| RunError::Input("stdin".into(), e))?;
            Ok(text)
        }
    }
}

fn intake_to_json(processor: &IntakeProcessor, raw_text: &str) -> Result<String, RunError> {
    let outcome = processor.process_text(raw_text)?;
    if !outcome.imputation.warning_text.is_empty() {
        tracing::warn!("{}", outcome.imputation.warning_text);
    }
    Ok(serde_json::to_string_pretty(&outcome)?)
}

fn run_intake(source: Option<&str>) -> Result<String, RunError> {
    let processor = build_processor()?;
    let raw_text = read_report(source)?;
    intake_to_json(&processor, &raw_text)
}

/// `rhizome [report.txt]`: read a decoded lab report and print the intake
/// outcome as JSON on stdout. Logs go to stderr.
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let source = std::env::args().nth(1);
    match run_intake(source.as_deref()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(RunError::Intake(IntakeError::CouldNotParse)) => {
            eprintln!("{}", IntakeError::CouldNotParse);
            ExitCode::from(EXIT_COULD_NOT_PARSE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Intake failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::pipeline::extraction::fixtures;
    use crate::reference::ReferenceTables;

    fn processor() -> IntakeProcessor {
        IntakeProcessor::new(Arc::new(ReferenceTables::default()))
    }

    #[test]
    fn reads_report_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        std::fs::write(&path, fixtures::TRADITIONAL_LAB).unwrap();
        let text = read_report(path.to_str()).unwrap();
        assert_eq!(text, fixtures::TRADITIONAL_LAB);
    }

    #[test]
    fn missing_report_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = read_report(path.to_str()).unwrap_err();
        assert!(matches!(err, RunError::Input(_, _)));
    }

    #[test]
    fn outcome_is_pretty_json() {
        let json = intake_to_json(&processor(), fixtures::QUEBEC_BOOKLET).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["imputation"]["imputed_count"], 1);
        assert!(json.contains('\n'));
    }

    #[test]
    fn unrecognized_report_maps_to_could_not_parse() {
        let err = intake_to_json(&processor(), "hello").unwrap_err();
        assert!(matches!(err, RunError::Intake(IntakeError::CouldNotParse)));
    }
}
