//! Client for the JMA forecast endpoint.

use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

use crate::domain::ForecastDay;
use crate::error::AppError;

/// Base of `<base>/{officeCode}.json`.
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://www.jma.go.jp/bosai/forecast/data/forecast";

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Builds a client. Without a timeout reqwest's default (none) applies.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::FetchFailed(format!("could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn forecast_url(&self, office_code: &str) -> String {
        format!("{}/{office_code}.json", self.base_url)
    }

    /// Fetches and parses the forecast for one office.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, office_code: &str) -> Result<Vec<ForecastDay>, AppError> {
        let url = self.forecast_url(office_code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::FetchFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, %url, "forecast endpoint returned an error status");
            return Err(AppError::FetchFailed(format!("HTTP {status} from {url}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::FetchFailed(e.to_string()))?;

        let days = parse_forecast(&body)?;
        tracing::info!(days = days.len(), "forecast received");
        Ok(days)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastReport {
    #[serde(default)]
    time_series: Vec<TimeSeries>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeSeries {
    time_defines: Option<Vec<String>>,
    #[serde(default)]
    areas: Vec<AreaForecast>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AreaForecast {
    weather_codes: Option<Vec<String>>,
}

/// Extracts `[0].timeSeries[0]` date / weather code pairs from a response body.
///
/// `timeDefines[i]` pairs with `areas[0].weatherCodes[i]`; the arrays must
/// be the same length.
pub fn parse_forecast(body: &str) -> Result<Vec<ForecastDay>, AppError> {
    let reports: Vec<ForecastReport> = serde_json::from_str(body)
        .map_err(|e| AppError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let series = reports
        .first()
        .and_then(|report| report.time_series.first())
        .ok_or_else(|| AppError::MalformedResponse("missing [0].timeSeries[0]".to_string()))?;

    let time_defines = series.time_defines.as_ref().ok_or_else(|| {
        AppError::MalformedResponse("missing [0].timeSeries[0].timeDefines".to_string())
    })?;

    let weather_codes = series
        .areas
        .first()
        .and_then(|area| area.weather_codes.as_ref())
        .ok_or_else(|| {
            AppError::MalformedResponse(
                "missing [0].timeSeries[0].areas[0].weatherCodes".to_string(),
            )
        })?;

    if time_defines.len() != weather_codes.len() {
        return Err(AppError::MalformedResponse(format!(
            "{} timeDefines but {} weatherCodes",
            time_defines.len(),
            weather_codes.len()
        )));
    }

    time_defines
        .iter()
        .zip(weather_codes)
        .map(|(time, code)| calendar_date(time).map(|date| ForecastDay::new(date, code.as_str())))
        .collect()
}

/// Calendar date of an ISO-8601 timestamp, taken in the timestamp's own offset.
pub fn calendar_date(timestamp: &str) -> Result<NaiveDate, AppError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.date_naive())
        .map_err(|e| AppError::MalformedResponse(format!("bad timestamp {timestamp:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn payload(time_defines: &[&str], weather_codes: &[&str]) -> serde_json::Value {
        json!([{
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-04-30T17:00:00+09:00",
            "timeSeries": [
                {
                    "timeDefines": time_defines,
                    "areas": [{
                        "area": {"name": "東京地方", "code": "130010"},
                        "weatherCodes": weather_codes,
                        "weathers": ["晴れ", "雨"]
                    }]
                },
                {
                    "timeDefines": ["2024-05-01T00:00:00+09:00"],
                    "areas": [{"area": {"name": "東京地方", "code": "130010"}, "pops": ["10"]}]
                }
            ]
        }])
    }

    fn date(y: i32, m: u32, d: u32) -> Result<NaiveDate, Box<dyn std::error::Error>> {
        Ok(NaiveDate::from_ymd_opt(y, m, d).ok_or("invalid date")?)
    }

    #[test]
    fn test_parse_pairs_dates_with_codes() -> Result<(), Box<dyn std::error::Error>> {
        let body = payload(
            &["2024-05-01T00:00:00+09:00", "2024-05-02T00:00:00+09:00"],
            &["100", "300"],
        )
        .to_string();

        let days = parse_forecast(&body)?;
        assert_eq!(
            days,
            vec![
                ForecastDay::new(date(2024, 5, 1)?, "100"),
                ForecastDay::new(date(2024, 5, 2)?, "300"),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_length_mismatch() {
        let body = payload(
            &["2024-05-01T00:00:00+09:00", "2024-05-02T00:00:00+09:00"],
            &["100"],
        )
        .to_string();

        assert!(matches!(
            parse_forecast(&body),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_missing_paths() {
        let cases = [
            json!([]),
            json!([{"timeSeries": []}]),
            json!([{"timeSeries": [{"areas": [{"weatherCodes": ["100"]}]}]}]),
            json!([{"timeSeries": [{"timeDefines": ["2024-05-01T00:00:00Z"], "areas": []}]}]),
            json!([{"timeSeries": [{"timeDefines": ["2024-05-01T00:00:00Z"], "areas": [{"pops": ["10"]}]}]}]),
        ];

        for case in cases {
            let result = parse_forecast(&case.to_string());
            assert!(
                matches!(result, Err(AppError::MalformedResponse(_))),
                "expected MalformedResponse for {case}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_forecast("<html>maintenance</html>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_calendar_date_keeps_source_offset() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(calendar_date("2024-05-01T00:00:00+09:00")?, date(2024, 5, 1)?);
        assert_eq!(calendar_date("2024-05-01T23:30:00Z")?, date(2024, 5, 1)?);
        assert!(calendar_date("2024-05-01").is_err());
        Ok(())
    }

    #[test]
    fn test_forecast_url() -> Result<(), AppError> {
        let client = ForecastClient::new("https://example.test/forecast/", None)?;
        assert_eq!(
            client.forecast_url("130000"),
            "https://example.test/forecast/130000.json"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_success() -> Result<(), Box<dyn std::error::Error>> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/130000.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload(
                &["2024-05-01T00:00:00+09:00", "2024-05-02T00:00:00+09:00"],
                &["100", "300"],
            )))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::new(&mock_server.uri(), Some(Duration::from_secs(5)))?;
        let days = client.fetch("130000").await?;

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].weather_code, "100");
        assert_eq!(days[1].date, date(2024, 5, 2)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_error_status() -> Result<(), AppError> {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/999999.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = ForecastClient::new(&mock_server.uri(), None)?;
        let result = client.fetch("999999").await;

        match result {
            Err(AppError::FetchFailed(cause)) => assert!(cause.contains("404")),
            other => panic!("expected FetchFailed, got {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() -> Result<(), AppError> {
        let client = ForecastClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2)))?;
        let result = client.fetch("130000").await;
        assert!(matches!(result, Err(AppError::FetchFailed(_))));
        Ok(())
    }
}
