use reqwest::StatusCode;
use std::time::Duration;
use tracing::info;

use mxc::core::ExchangeCalculator;

// Adds automatic logging to test
mod test_utils {
    use std::time::Duration;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Rate provider answering USD normally, GBP with garbage and RON too slowly.
    pub async fn create_rates_server(slow_delay: Duration) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currencies/GBP"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("Wrong response, definitely not a number!"),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/currencies/RON"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("0.2")
                    .set_delay(slow_delay),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/currencies/USD"))
            .respond_with(ResponseTemplate::new(200).set_body_string("0.92"))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path_regex(r"^/currencies/.*$"))
            .respond_with(ResponseTemplate::new(404))
            .with_priority(10)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(dir: &tempfile::TempDir, base_url: &str, timeout_ms: u64) -> String {
        let config_path = dir.path().join("config.yaml");
        let config_content = format!(
            r#"
        provider:
          base_url: {base_url}
          timeout_ms: {timeout_ms}
    "#
        );
        std::fs::write(&config_path, config_content).expect("Failed to write config file");
        config_path.to_string_lossy().to_string()
    }
}

#[test_log::test(tokio::test)]
async fn test_exchange_calculator_outcomes() {
    let mock_server = test_utils::create_rates_server(Duration::from_secs(3)).await;
    let exchange = ExchangeCalculator::new(&mock_server.uri(), Duration::from_millis(500))
        .expect("Failed to build calculator");

    let ok_response = exchange.to_euro(100.00, "USD").await;
    info!(?ok_response, "Received conversion");
    assert_eq!(ok_response.status, StatusCode::OK);
    assert_eq!(
        ok_response.body,
        "Exchanging 100.0 USD at a rate of 0.92 will give you 92.0 EUR"
    );

    let nok_response = exchange.to_euro(100.00, "GBP").await;
    assert_eq!(nok_response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(nok_response.body, "Ooops! There was an error on our side!");

    let slow_response = exchange.to_euro(100.00, "RON").await;
    assert_eq!(slow_response.status, StatusCode::GATEWAY_TIMEOUT);

    let unknown_response = exchange.to_euro(100.00, "ZZZ").await;
    assert_eq!(unknown_response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_provider_is_gateway_timeout() {
    // Listener is dropped right away, leaving a closed port
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .unwrap()
        .port();
    let uri = format!("http://127.0.0.1:{port}");
    let exchange = ExchangeCalculator::new(&uri, Duration::from_millis(500)).unwrap();

    let response = exchange.to_euro(10.0, "USD").await;
    assert_eq!(response.status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(
        response.body,
        "The exchange rate provider did not respond in time"
    );
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = test_utils::create_rates_server(Duration::from_secs(2)).await;
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri(), 300);

    let result = mxc::run_command(
        mxc::AppCommand::Convert {
            amount: 100.0,
            currency: "usd".to_string(),
            json: false,
        },
        Some(config_path.as_str()),
    )
    .await;
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );

    let result = mxc::run_command(
        mxc::AppCommand::Convert {
            amount: 100.0,
            currency: "GBP".to_string(),
            json: true,
        },
        Some(config_path.as_str()),
    )
    .await;
    let err = result.expect_err("Malformed rate should fail the command");
    assert!(err.to_string().contains("500"), "Unexpected error: {err}");

    let result = mxc::run_command(
        mxc::AppCommand::Convert {
            amount: 100.0,
            currency: "RON".to_string(),
            json: false,
        },
        Some(config_path.as_str()),
    )
    .await;
    let err = result.expect_err("Slow provider should fail the command");
    assert!(err.to_string().contains("504"), "Unexpected error: {err}");
}

#[test_log::test(tokio::test)]
async fn test_invalid_request_is_rejected_before_fetch() {
    let mock_server = wiremock::MockServer::start().await;
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = test_utils::write_config(&temp_dir, &mock_server.uri(), 300);

    let result = mxc::run_command(
        mxc::AppCommand::Convert {
            amount: -1.0,
            currency: "USD".to_string(),
            json: false,
        },
        Some(config_path.as_str()),
    )
    .await;
    assert!(result.is_err());

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let result = mxc::run_command(
        mxc::AppCommand::Convert {
            amount: 1.0,
            currency: "USD".to_string(),
            json: false,
        },
        missing.to_str(),
    )
    .await;
    assert!(result.is_err());
}
