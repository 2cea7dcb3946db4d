//! Weather client against a local mock provider

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sunsafe::config::WeatherConfig;
use sunsafe::core::WeatherError;
use sunsafe::weather::{WeatherClient, FORECAST_DAYS};

fn payload() -> serde_json::Value {
    // 2024-06-03 (Monday) 12:00 UTC, one entry per day
    let daily: Vec<_> = (0..7)
        .map(|i| {
            json!({
                "dt": 1_717_416_000 + i * 86_400,
                "temp": { "day": 20.0, "min": 12.0, "max": 20.5 + i as f64 },
                "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
                "uvi": 6.5
            })
        })
        .collect();

    json!({
        "lat": 43.7,
        "lon": -79.42,
        "timezone": "America/Toronto",
        "timezone_offset": -14400,
        "current": {
            "dt": 1_717_416_000,
            "temp": 21.4,
            "humidity": 40,
            "uvi": 7.2,
            "weather": [{ "id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d" }]
        },
        "daily": daily
    })
}

fn client_for(server: &MockServer) -> WeatherClient {
    let config = WeatherConfig {
        base_url: format!("{}/data/3.0/onecall", server.uri()),
        api_key: Some("test-key".to_string()),
        ..Default::default()
    };
    WeatherClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_single_request_with_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/3.0/onecall"))
        .and(query_param("lat", "43.7"))
        .and(query_param("lon", "-79.42"))
        .and(query_param("units", "metric"))
        .and(query_param("exclude", "minutely,hourly"))
        .and(query_param("appid", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload()))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = client_for(&server)
        .fetch_weather_data(43.7, -79.42)
        .await
        .unwrap();

    assert_eq!(snapshot.current_temp(), 21);
    assert_eq!(snapshot.current_description(), "Few clouds");
    assert_eq!(snapshot.current_uv_index(), Some(7.2));
    assert_eq!(snapshot.daily.len(), 7);

    let forecast = snapshot.weekly_forecast();
    assert_eq!(forecast.len(), FORECAST_DAYS);
    // 12:00 UTC is 08:00 at UTC-4, still Monday
    assert_eq!(forecast[0].weekday, "MON");
    assert_eq!(forecast[0].max_temp, 21);
    assert_eq!(forecast[1].max_temp, 22);
    assert_eq!(forecast[0].uvi, 7);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"current\": 12}"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_weather_data(43.7, -79.42)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Decode(_)), "{:?}", err);
}

#[tokio::test]
async fn test_server_error_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_weather_data(43.7, -79.42)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)), "{:?}", err);
}

#[tokio::test]
async fn test_missing_api_key_still_sends_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("appid", ""))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "cod": 401,
            "message": "Invalid API key."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = WeatherConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let err = WeatherClient::new(&config)
        .unwrap()
        .fetch_weather_data(1.0, 2.0)
        .await
        .unwrap_err();

    assert!(matches!(err, WeatherError::Network(_)));
}
