use crate::core::WeatherProvider;
use crate::domain::model::{LocationQuery, WeatherReading};
use crate::utils::error::{Result, StylistError};
use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_WEATHER_BASE_URL: &str = "http://api.openweathermap.org/data/2.5";

const DATE_LABEL_FORMAT: &str = "%A, %B %d";

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt_txt: String,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct ForecastCity {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Forecast {
    #[serde(default)]
    list: Vec<ForecastEntry>,
    city: Option<ForecastCity>,
}

/// OpenWeatherMap 客戶端。第 0 天查即時天氣，之後查預報中當天中午的時段
pub struct OpenWeatherMapClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherMapClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn fetch(&self, endpoint: &str, query: &LocationQuery) -> Result<serde_json::Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!("Making weather request to: {} (q={})", url, query.query_string());

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.query_string().as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Weather response status: {}", status);

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| StylistError::WeatherUnavailable {
                message: format!("status {}: {}", status, e),
            })?;

        check_status_code(&value, &query.city)?;
        Ok(value)
    }

    async fn current(&self, query: &LocationQuery) -> Result<WeatherReading> {
        let value = self.fetch("weather", query).await?;
        let current: CurrentWeather =
            serde_json::from_value(value).map_err(|e| StylistError::WeatherUnavailable {
                message: e.to_string(),
            })?;

        let location = current.name.unwrap_or_else(|| query.city.clone());
        let date_label = Local::now().date_naive().format(DATE_LABEL_FORMAT).to_string();
        Ok(WeatherReading::from_celsius(
            round_celsius(current.main.temp),
            &location,
            &date_label,
        ))
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<WeatherReading> {
        let value = self.fetch("forecast", query).await?;
        let forecast: Forecast =
            serde_json::from_value(value).map_err(|e| StylistError::WeatherUnavailable {
                message: e.to_string(),
            })?;

        let (slot, date_label) = forecast_slot(Local::now().date_naive(), query.forecast_day)?;
        let entry = forecast
            .list
            .iter()
            .find(|entry| entry.dt_txt == slot)
            .ok_or_else(|| StylistError::WeatherUnavailable {
                message: format!("no forecast entry for {}", slot),
            })?;

        let location = forecast
            .city
            .and_then(|c| c.name)
            .unwrap_or_else(|| query.city.clone());
        Ok(WeatherReading::from_celsius(
            round_celsius(entry.main.temp),
            &location,
            &date_label,
        ))
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMapClient {
    async fn lookup(&self, query: &LocationQuery) -> Result<WeatherReading> {
        if query.forecast_day == 0 {
            self.current(query).await
        } else {
            self.forecast(query).await
        }
    }
}

/// `cod` 可能是數字或字串，200 以外都代表查無此地
fn check_status_code(value: &serde_json::Value, city: &str) -> Result<()> {
    let code = match value.get("cod") {
        Some(serde_json::Value::Number(n)) => n.as_u64(),
        Some(serde_json::Value::String(s)) => s.parse::<u64>().ok(),
        _ => return Ok(()),
    };

    if code == Some(200) {
        return Ok(());
    }

    let message = value
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_string();
    Err(StylistError::LocationNotFound {
        location: city.to_string(),
        message,
    })
}

/// 回傳 (預報時段 `dt_txt`, 日期標籤)
pub fn forecast_slot(today: NaiveDate, days_ahead: u32) -> Result<(String, String)> {
    let target = today
        .checked_add_days(Days::new(u64::from(days_ahead)))
        .ok_or_else(|| StylistError::WeatherUnavailable {
            message: format!("forecast day {} is out of range", days_ahead),
        })?;

    Ok((
        target.format("%Y-%m-%d 12:00:00").to_string(),
        target.format(DATE_LABEL_FORMAT).to_string(),
    ))
}

/// 四捨六入五成雙，14.5 會落在 14 而不是 15
fn round_celsius(temp: f64) -> i32 {
    temp.round_ties_even() as i32
}
