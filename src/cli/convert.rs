use super::ui::{self, StyleType};
use crate::core::{ConversionRequest, ConversionResult, ExchangeCalculator};
use anyhow::{Context, Result};

/// Renders a result for the terminal, either as JSON or as a styled line.
pub fn render(result: &ConversionResult, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string(result).context("Failed to serialize conversion result");
    }

    let status = ui::style_text(&format!("[{}]", result.status.as_u16()), StyleType::Subtle);
    let body = if result.is_success() {
        ui::style_text(&result.body, StyleType::Success)
    } else {
        ui::style_text(&result.body, StyleType::Error)
    };
    Ok(format!("{status} {body}"))
}

pub async fn run_convert(
    calculator: &ExchangeCalculator,
    request: &ConversionRequest,
    json: bool,
) -> Result<ConversionResult> {
    let spinner = ui::new_spinner(&format!("Fetching {} rate...", request.currency_code));
    let result = calculator.convert(request).await;
    spinner.finish_and_clear();

    println!("{}", render(&result, json)?);
    Ok(result)
}
