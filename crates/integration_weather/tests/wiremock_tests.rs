//! Integration tests for the OpenWeatherMap client using wiremock
//!
//! These tests verify request shape and error mapping against a mock HTTP
//! server.

use integration_weather::{OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_current_response() -> serde_json::Value {
    serde_json::json!({
        "coord": {"lon": -0.1257, "lat": 51.5085},
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "base": "stations",
        "main": {"temp": 12.4, "feels_like": 11.8, "humidity": 81, "pressure": 1012},
        "wind": {"speed": 4.6, "deg": 240},
        "dt": 1714996800,
        "sys": {"country": "GB", "sunrise": 1714969260, "sunset": 1715024160},
        "timezone": 3600,
        "name": "London",
        "cod": 200
    })
}

fn sample_forecast_response() -> serde_json::Value {
    let list: Vec<serde_json::Value> = (0..40)
        .map(|i| {
            serde_json::json!({
                "dt": 1714996800 + i * 10800,
                "main": {"temp": 10.0 + f64::from(i % 8), "humidity": 70},
                "weather": [{"id": 802, "main": "Clouds", "description": "scattered clouds", "icon": "03d"}],
                "dt_txt": "ignored"
            })
        })
        .collect();
    serde_json::json!({
        "cod": "200",
        "cnt": 40,
        "list": list,
        "city": {"name": "London", "timezone": 3600, "sunrise": 1714969260, "sunset": 1715024160}
    })
}

fn sample_one_call_response() -> serde_json::Value {
    let hourly: Vec<serde_json::Value> = (0..48)
        .map(|i| {
            serde_json::json!({
                "dt": 1714996800 + i * 3600,
                "temp": 9.5,
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}]
            })
        })
        .collect();
    serde_json::json!({
        "lat": 51.5085,
        "lon": -0.1257,
        "timezone": "Europe/London",
        "timezone_offset": 3600,
        "hourly": hourly
    })
}

/// Create a test client configured to use the mock server
fn create_test_client(mock_server: &MockServer) -> OpenWeatherMapClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    OpenWeatherMapClient::new(config).expect("Failed to create client")
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_current_by_city_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.5/weather"))
        .and(query_param("q", "London"))
        .and(query_param("units", "metric"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current_by_city("London").await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
    let current = result.unwrap();
    assert_eq!(current.name, "London");
    assert!((current.main.temp - 12.4).abs() < 0.01);
    assert_eq!(current.timezone, Some(3600));
    assert_eq!(current.weather[0].group(), Some("Rain"));
}

#[tokio::test]
async fn test_current_by_coordinates_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.5/weather"))
        .and(query_param("lat", "51.5085"))
        .and(query_param("lon", "-0.1257"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let current = client
        .current_by_coordinates(51.5085, -0.1257)
        .await
        .unwrap();
    assert_eq!(current.sys.unwrap().sunrise, Some(1_714_969_260));
}

#[tokio::test]
async fn test_forecast_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.5/forecast"))
        .and(query_param("lat", "51.5085"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let forecast = client.forecast(51.5085, -0.1257).await.unwrap();

    assert_eq!(forecast.list.len(), 40);
    assert_eq!(forecast.city.unwrap().timezone, Some(3600));
}

#[tokio::test]
async fn test_one_call_excludes_unused_blocks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/onecall"))
        .and(query_param("exclude", "minutely,alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_one_call_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let feed = client.one_call(51.5085, -0.1257).await.unwrap();

    assert_eq!(feed.timezone_offset, Some(3600));
    assert_eq!(feed.hourly.len(), 48);
}

// ============================================================================
// Error handling scenarios
// ============================================================================

#[tokio::test]
async fn test_unknown_city_returns_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current_by_city("Atlantis").await;

    assert!(
        matches!(result, Err(WeatherError::NotFound)),
        "Expected NotFound, got: {result:?}"
    );
}

#[tokio::test]
async fn test_invalid_key_returns_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/3.0/onecall"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "cod": 401,
            "message": "Please note that using One Call 3.0 requires a separate subscription"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.one_call(51.5, -0.12).await;

    match result {
        Err(WeatherError::Unauthorized(message)) => assert!(message.contains("subscription")),
        other => panic!("Expected Unauthorized, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_returns_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/2.5/forecast"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.forecast(51.5, -0.12).await;

    assert!(
        matches!(result, Err(WeatherError::ServiceUnavailable(_))),
        "Expected ServiceUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn test_rate_limit_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current_by_city("London").await;

    assert!(matches!(result, Err(WeatherError::RateLimitExceeded)));
}

#[tokio::test]
async fn test_malformed_body_returns_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"name\": 42}"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.current_by_city("London").await;

    assert!(matches!(result, Err(WeatherError::ParseError(_))));
}

#[tokio::test]
async fn test_missing_key_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_current_response()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = OpenWeatherMapClient::new(WeatherConfig {
        base_url: mock_server.uri(),
        ..Default::default()
    })
    .unwrap();
    let result = client.current_by_city("London").await;

    assert!(matches!(result, Err(WeatherError::MissingApiKey)));
}

#[tokio::test]
async fn test_invalid_coordinates_rejected_locally() {
    let mock_server = MockServer::start().await;
    let client = create_test_client(&mock_server);

    let result = client.forecast(120.0, 0.0).await;
    assert!(matches!(result, Err(WeatherError::InvalidCoordinates)));
}
