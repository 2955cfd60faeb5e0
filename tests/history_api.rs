use tempcal::{
    data::history::HistoryClient,
    domain::{Location, calendar::build_days, dates::DateRange},
    error::HistoryError,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, query_param},
};

fn test_range() -> DateRange {
    DateRange {
        start: chrono::NaiveDate::from_ymd_opt(2024, 6, 8).unwrap(),
        end: chrono::NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
    }
}

fn daily_payload() -> serde_json::Value {
    serde_json::json!({
        "daily": {
            "time": ["2024-06-08", "2024-06-09", "2024-06-10"],
            "temperature_2m_max": [14.6, 16.2, null],
            "temperature_2m_min": [7.4, 8.9, 6.1]
        }
    })
}

#[tokio::test]
async fn fetch_daily_sends_the_expected_query_and_parses_arrays() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("start_date", "2024-06-08"))
        .and(query_param("end_date", "2024-06-14"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min",
        ))
        .and(query_param("timezone", "Europe/London"))
        .respond_with(ResponseTemplate::new(200).set_body_json(daily_payload()))
        .mount(&server)
        .await;

    let client = HistoryClient::with_base_url(server.uri());
    let daily = client
        .fetch_daily(&Location::default(), &test_range())
        .await
        .unwrap();

    assert_eq!(daily.time.len(), 3);
    assert_eq!(daily.temperature_2m_max[2], None);

    let days = build_days(&daily).unwrap();
    assert_eq!(days[0].max_c, Some(15));
    assert_eq!(days[2].max_c, None);
}

#[tokio::test]
async fn non_success_status_is_a_network_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HistoryClient::with_base_url(server.uri());
    let err = client
        .fetch_daily(&Location::default(), &test_range())
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_daily_block_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = HistoryClient::with_base_url(server.uri());
    let err = client
        .fetch_daily(&Location::default(), &test_range())
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_temperature_array_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2024-06-08"],
                "temperature_2m_max": [14.6]
            }
        })))
        .mount(&server)
        .await;

    let client = HistoryClient::with_base_url(server.uri());
    let err = client
        .fetch_daily(&Location::default(), &test_range())
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = HistoryClient::with_base_url(server.uri());
    let err = client
        .fetch_daily(&Location::default(), &test_range())
        .await
        .unwrap_err();

    assert!(matches!(err, HistoryError::MalformedResponse(_)));
}
