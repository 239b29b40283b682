//! Weather API client for fetching forecast and air quality data
//!
//! Integrates with WeatherAPI.com's `forecast.json` endpoint

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::{LocationQuery, WeatherSample};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Resolved location of a forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl ForecastLocation {
    /// "Name, Region, Country"
    pub fn display_name(&self) -> String {
        [&self.name, &self.region, &self.country]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Pollutant concentrations reported for the current hour (μg/m³)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pollutants {
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub co: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    /// 1-6 US-EPA band as reported by the API
    pub us_epa_index: Option<u8>,
}

/// Current conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub temperature_celsius: f64,
    pub humidity_percent: Option<f64>,
    pub wind_kph: Option<f64>,
    pub condition: String,
    pub icon: String,
    pub pollutants: Pollutants,
}

/// One forecast day with its scoring inputs already aggregated
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_celsius: f64,
    pub min_temp_celsius: f64,
    pub condition: String,
    pub icon: String,
    /// Raw indicators; cloud cover and pressure are hourly averages
    pub sample: WeatherSample,
}

/// Multi-day forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherForecast {
    pub location: ForecastLocation,
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}

/// WeatherAPI.com forecast response
#[derive(Debug, Deserialize)]
struct WapiForecastResponse {
    location: WapiLocation,
    current: WapiCurrent,
    forecast: WapiForecast,
}

#[derive(Debug, Deserialize)]
struct WapiLocation {
    name: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    country: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct WapiCondition {
    #[serde(default)]
    text: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WapiCurrent {
    temp_c: f64,
    humidity: Option<f64>,
    wind_kph: Option<f64>,
    condition: WapiCondition,
    air_quality: Option<WapiAirQuality>,
}

#[derive(Debug, Deserialize)]
struct WapiAirQuality {
    co: Option<f64>,
    no2: Option<f64>,
    o3: Option<f64>,
    so2: Option<f64>,
    pm2_5: Option<f64>,
    pm10: Option<f64>,
    #[serde(rename = "us-epa-index")]
    us_epa_index: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct WapiForecast {
    forecastday: Vec<WapiForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WapiForecastDay {
    date: NaiveDate,
    day: WapiDay,
    #[serde(default)]
    hour: Vec<WapiHour>,
}

#[derive(Debug, Deserialize)]
struct WapiDay {
    maxtemp_c: f64,
    mintemp_c: f64,
    avghumidity: Option<f64>,
    totalprecip_mm: Option<f64>,
    daily_chance_of_rain: Option<f64>,
    condition: WapiCondition,
}

#[derive(Debug, Deserialize)]
struct WapiHour {
    pressure_mb: Option<f64>,
    cloud: Option<f64>,
}

fn average(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

impl WeatherClient {
    /// Create a new WeatherClient with a fixed request timeout
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &WeatherConfig) -> AppResult<Self> {
        Self::new(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Fetch a forecast with current air quality
    pub async fn get_forecast(
        &self,
        location: &LocationQuery,
        days: u8,
    ) -> AppResult<WeatherForecast> {
        if self.api_key.trim().is_empty() {
            return Err(AppError::Configuration(
                "Weather API key not configured".to_string(),
            ));
        }

        let url = format!("{}/forecast.json", self.base_url);
        let days = days.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", location.as_query_param().as_str()),
                ("days", days.as_str()),
                ("aqi", "yes"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::UpstreamTimeout
                } else {
                    AppError::ExternalService(format!("Weather API request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Weather API error for {}: {} - {}", location, status, body);
            return Err(AppError::UpstreamStatus(status.as_u16()));
        }

        let data: WapiForecastResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AppError::UpstreamTimeout
            } else {
                AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
            }
        })?;

        Ok(convert_forecast_response(data))
    }
}

/// Convert a WeatherAPI.com forecast response to our format
fn convert_forecast_response(data: WapiForecastResponse) -> WeatherForecast {
    let air_quality = data.current.air_quality;
    let pollutants = air_quality
        .map(|aq| Pollutants {
            pm2_5: aq.pm2_5,
            pm10: aq.pm10,
            co: aq.co,
            no2: aq.no2,
            o3: aq.o3,
            so2: aq.so2,
            us_epa_index: aq.us_epa_index,
        })
        .unwrap_or_default();

    let days = data
        .forecast
        .forecastday
        .into_iter()
        .map(|item| ForecastDay {
            date: item.date,
            max_temp_celsius: item.day.maxtemp_c,
            min_temp_celsius: item.day.mintemp_c,
            condition: item.day.condition.text,
            icon: item.day.condition.icon,
            sample: WeatherSample {
                chance_of_rain: item.day.daily_chance_of_rain,
                humidity: item.day.avghumidity,
                precipitation_mm: item.day.totalprecip_mm,
                cloud_cover: average(item.hour.iter().filter_map(|h| h.cloud)),
                pressure_mb: average(item.hour.iter().filter_map(|h| h.pressure_mb)),
            },
        })
        .collect();

    WeatherForecast {
        location: ForecastLocation {
            name: data.location.name,
            region: data.location.region,
            country: data.location.country,
            latitude: data.location.lat,
            longitude: data.location.lon,
        },
        current: CurrentConditions {
            temperature_celsius: data.current.temp_c,
            humidity_percent: data.current.humidity,
            wind_kph: data.current.wind_kph,
            condition: data.current.condition.text,
            icon: data.current.condition.icon,
            pollutants,
        },
        days,
    }
}
