use metrics_exporter_prometheus::PrometheusHandle;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use uae_payments::config::AppConfig;
use uae_payments::error::AppError;
use uae_payments::telemetry;
use uae_payments::validation::{
    PurposeCodeRegistry, RequestRejection, TransactionRequest, TransactionType, ValidationService,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registry from the configured CSV overrides, falling back to the embedded tables.
pub(crate) fn load_registry(config: &AppConfig) -> Result<Arc<PurposeCodeRegistry>, AppError> {
    let registry = PurposeCodeRegistry::from_paths(
        config.catalog.purpose_codes_path.as_deref(),
        config.catalog.categories_path.as_deref(),
    )?;

    info!(
        codes = registry.len(),
        categories = registry.categories().len(),
        custom_codes = config.catalog.purpose_codes_path.is_some(),
        "purpose code catalog loaded"
    );

    Ok(Arc::new(registry))
}

pub(crate) fn build_service(config: &AppConfig) -> Result<Arc<ValidationService>, AppError> {
    let registry = load_registry(config)?;
    Ok(Arc::new(ValidationService::new(
        registry,
        config.rulebook.clone(),
    )))
}

/// Logging plus service for one-shot CLI commands.
pub(crate) fn prepare_cli(config: &AppConfig) -> Result<Arc<ValidationService>, AppError> {
    telemetry::init_cli(&config.telemetry)?;
    build_service(config)
}

/// Read a JSON transaction request from `path`, or stdin when no path is given.
pub(crate) fn read_request(path: Option<&Path>) -> Result<TransactionRequest, AppError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    parse_request(&raw)
}

pub(crate) fn parse_request(raw: &str) -> Result<TransactionRequest, AppError> {
    serde_json::from_str(raw)
        .map_err(|err| AppError::from(RequestRejection::Malformed(err.to_string())))
}

pub(crate) fn parse_transaction_type(raw: &str) -> Result<TransactionType, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "domestic" => Ok(TransactionType::Domestic),
        "offshore" => Ok(TransactionType::Offshore),
        other => Err(format!(
            "unknown transaction type '{other}' (expected domestic or offshore)"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_request_applies_defaults() {
        let request = parse_request(
            r#"{"transaction_type":"offshore","transaction_direction":"outbound","amount":"42.5"}"#,
        )
        .expect("valid request");

        assert_eq!(request.transaction_type, TransactionType::Offshore);
        assert_eq!(request.currency, "AED");
        assert!(request.purpose_code.is_none());
    }

    #[test]
    fn parse_request_rejects_malformed_json() {
        match parse_request(r#"{"transaction_type":"offshore"}"#) {
            Err(AppError::Rejected(_)) => {}
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn cli_session_installs_logging_before_building_service() {
        let config = AppConfig::load().expect("config loads with defaults");

        let service = prepare_cli(&config).expect("cli session starts");

        assert!(tracing::dispatcher::has_been_set());
        assert_eq!(service.registry().len(), 117);
    }

    #[test]
    fn transaction_types_parse_case_insensitively() {
        assert_eq!(
            parse_transaction_type(" Domestic "),
            Ok(TransactionType::Domestic)
        );
        assert!(parse_transaction_type("wire").is_err());
    }
}
