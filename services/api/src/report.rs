use crate::infra::{parse_transaction_type, prepare_cli, read_request};
use clap::Args;
use std::path::PathBuf;
use uae_payments::config::AppConfig;
use uae_payments::error::AppError;
use uae_payments::validation::{
    validate_iban, CatalogPage, CatalogQuery, IbanValidationView, TransactionType,
    ValidationResponse, ValidationStatus,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ValidateArgs {
    /// JSON transaction request; reads stdin when omitted
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Print the full JSON verdict instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct IbanArgs {
    /// IBAN to check (spaces and lower case are accepted)
    pub(crate) iban: String,
    /// Print the JSON view instead of the summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CodesArgs {
    /// Restrict to one category code (e.g. SAL)
    #[arg(long)]
    pub(crate) category: Option<String>,
    /// Restrict to codes applicable to domestic or offshore payments
    #[arg(long, value_parser = parse_transaction_type)]
    pub(crate) transaction_type: Option<TransactionType>,
    /// Case-insensitive match on code or name
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Maximum number of codes to list (1-200)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = prepare_cli(&config)?;
    let request = read_request(args.file.as_deref())?;

    let response = service.validate(request)?;
    if args.json {
        println!("{}", to_pretty_json(&response)?);
    } else {
        for line in render_verdict(&response) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_iban(args: IbanArgs) -> Result<(), AppError> {
    let view = IbanValidationView::from_outcome(&args.iban, validate_iban(&args.iban));
    if args.json {
        println!("{}", to_pretty_json(&view)?);
    } else {
        for line in render_iban(&view) {
            println!("{line}");
        }
    }
    Ok(())
}

pub(crate) fn run_codes(args: CodesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = prepare_cli(&config)?;
    let query = CatalogQuery {
        category: args.category,
        transaction_type: args.transaction_type,
        search: args.search,
        limit: args.limit,
        ..CatalogQuery::default()
    };

    let page = service.list_codes(&query)?;
    for line in render_codes(&page) {
        println!("{line}");
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))
}

pub(crate) fn render_verdict(response: &ValidationResponse) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Session {} | {} {} | {} {}",
            response.session_id,
            response.transaction_type.label(),
            response.transaction_direction.label(),
            response.currency,
            response
                .summary
                .amount
                .map(|amount| amount.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        format!(
            "Status: {:?} | STP score {} ({})",
            response.validation_status, response.stp_score, response.stp_rating
        ),
        format!(
            "Violations: {} | Penalty risk: AED {}",
            response.violation_count, response.total_penalty_risk
        ),
    ];

    if let Some(code) = &response.purpose_code {
        let description = response
            .purpose_code_description
            .as_deref()
            .unwrap_or("not in catalog");
        lines.push(format!("Purpose code: {code} ({description})"));
    }

    lines.push(String::new());
    lines.push("Rules".to_string());
    for result in &response.results {
        let marker = match result.validation_status {
            ValidationStatus::Pass => "PASS",
            ValidationStatus::Fail => "FAIL",
            ValidationStatus::Warning => "WARN",
            ValidationStatus::Skipped => "SKIP",
        };
        match &result.error_message {
            Some(message) => lines.push(format!(
                "- [{marker}] {} {}: {message}",
                result.rule_code, result.rule_name
            )),
            None => lines.push(format!(
                "- [{marker}] {} {}",
                result.rule_code, result.rule_name
            )),
        }
    }

    if response.recommendations.is_empty() {
        lines.push(String::new());
        lines.push("Recommendations: none".to_string());
    } else {
        lines.push(String::new());
        lines.push("Recommendations".to_string());
        for recommendation in &response.recommendations {
            let mut line = format!(
                "- {} ({:?}): {} [+{} STP, AED {} avoided]",
                recommendation.field_code.label(),
                recommendation.priority,
                recommendation.reason,
                recommendation.stp_improvement,
                recommendation.penalty_avoided
            );
            if let Some(suggested) = recommendation.suggested_value {
                line.push_str(&format!(" Suggested: {suggested}"));
            }
            lines.push(line);
        }
    }

    lines
}

pub(crate) fn render_iban(view: &IbanValidationView) -> Vec<String> {
    let mut lines = Vec::new();
    if view.is_valid {
        lines.push(format!(
            "{} is valid",
            view.formatted_iban.as_deref().unwrap_or(&view.iban)
        ));
    } else {
        lines.push(format!(
            "{} is invalid: {}",
            view.iban,
            view.error_message.as_deref().unwrap_or("unknown reason")
        ));
    }

    if let (Some(code), Some(name)) = (&view.bank_code, view.bank_name) {
        lines.push(format!("Bank: {name} ({code})"));
    }
    if let Some(account) = &view.account_number {
        lines.push(format!("Account number: {account}"));
    }
    lines
}

pub(crate) fn render_codes(page: &CatalogPage<'_>) -> Vec<String> {
    let mut lines = vec![format!(
        "{} matching codes (showing {} from offset {})",
        page.total,
        page.codes.len(),
        page.offset
    )];
    for code in &page.codes {
        let mut scopes = Vec::new();
        if code.applies_to_domestic {
            scopes.push("domestic");
        }
        if code.applies_to_offshore {
            scopes.push("offshore");
        }
        let lei = if code.requires_lei { " | LEI" } else { "" };
        lines.push(format!(
            "- {} {} [{}] {}{}",
            code.code,
            code.name,
            code.category_code,
            scopes.join("/"),
            lei
        ));
    }
    lines
}
