//! Forecast service: runs the rain model and air quality conversion over
//! fetched weather data

use serde::Serialize;
use shared::{
    convert_air_quality, health_comparisons, round_to_tenth, validate_weather_sample,
    AirQualityReport, DailyConditions, DailyPrediction, ForecastSummary, LocationQuery,
    ModelInfo, RainIntensity, RainScorer,
};

use crate::error::AppResult;
use crate::external::weather::{CurrentConditions, Pollutants, WeatherClient, WeatherForecast};

/// Forecast service combining the weather client with the scoring core
#[derive(Clone)]
pub struct ForecastService {
    client: WeatherClient,
    scorer: RainScorer,
}

/// Condensed model description embedded in every rain report
#[derive(Debug, Clone, Serialize)]
pub struct ReportModelInfo {
    #[serde(rename = "type")]
    pub model_type: &'static str,
    pub parameters_used: Vec<String>,
    pub prediction_threshold: f64,
}

/// Rain prediction response
#[derive(Debug, Clone, Serialize)]
pub struct RainReport {
    pub location: String,
    pub prediction_summary: ForecastSummary,
    pub daily_predictions: Vec<DailyPrediction>,
    pub model_info: ReportModelInfo,
}

/// Air quality response
#[derive(Debug, Clone, Serialize)]
pub struct AirQualityResponse {
    pub location: String,
    pub air_quality: AirQualityReport,
    pub health_comparisons: Vec<String>,
    pub pollutants: Pollutants,
    pub current: CurrentConditions,
}

impl ForecastService {
    pub fn new(client: WeatherClient, scorer: RainScorer) -> Self {
        Self { client, scorer }
    }

    /// Fetch the forecast and predict rain for each day
    pub async fn predict_rain(&self, location: &LocationQuery, days: u8) -> AppResult<RainReport> {
        tracing::info!("Fetching forecast data for {}", location);
        let forecast = self.client.get_forecast(location, days).await?;

        let report = build_rain_report(&forecast, &self.scorer);
        tracing::info!(
            "Prediction complete for {}: {} of {} days with rain",
            report.location,
            report.prediction_summary.days_with_rain,
            report.prediction_summary.total_days
        );
        Ok(report)
    }

    /// Fetch current air quality and convert it
    pub async fn air_quality(&self, location: &LocationQuery) -> AppResult<AirQualityResponse> {
        tracing::info!("Fetching air quality for {}", location);
        let forecast = self.client.get_forecast(location, 1).await?;
        Ok(build_air_quality_response(forecast))
    }
}

/// Score every forecast day
pub fn build_rain_report(forecast: &WeatherForecast, scorer: &RainScorer) -> RainReport {
    let daily_predictions: Vec<DailyPrediction> = forecast
        .days
        .iter()
        .map(|day| {
            let sample = day.sample.with_forecast_defaults();
            if let Err(reason) = validate_weather_sample(&sample) {
                tracing::warn!("Out-of-range weather data for {}: {}", day.date, reason);
            }

            let precipitation_mm = sample.precipitation_mm.unwrap_or_default();
            let conditions = DailyConditions {
                max_temp_c: day.max_temp_celsius,
                min_temp_c: day.min_temp_celsius,
                condition: day.condition.clone(),
                humidity: sample.humidity.unwrap_or_default(),
                precipitation_mm,
                rain_intensity: RainIntensity::from_precipitation(precipitation_mm),
                cloud_cover: round_to_tenth(sample.cloud_cover.unwrap_or_default()),
                pressure_mb: round_to_tenth(sample.pressure_mb.unwrap_or_default()),
            };

            DailyPrediction::new(day.date, scorer.score(&sample), conditions)
        })
        .collect();

    let info = ModelInfo::from_weights(scorer.weights());

    RainReport {
        location: forecast.location.display_name(),
        prediction_summary: ForecastSummary::from_predictions(&daily_predictions),
        daily_predictions,
        model_info: ReportModelInfo {
            model_type: info.model_type,
            parameters_used: info.parameters_used(),
            prediction_threshold: info.prediction_threshold,
        },
    }
}

/// Calculated AQI and cigarette equivalent for the current hour
pub fn build_air_quality_response(forecast: WeatherForecast) -> AirQualityResponse {
    let pollutants = forecast.current.pollutants.clone();
    let air_quality =
        convert_air_quality(pollutants.pm2_5).with_us_epa_index(pollutants.us_epa_index);

    AirQualityResponse {
        location: forecast.location.display_name(),
        health_comparisons: health_comparisons(pollutants.pm2_5),
        air_quality,
        pollutants,
        current: forecast.current,
    }
}
