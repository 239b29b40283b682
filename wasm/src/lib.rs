//! WebAssembly module for Raincast
//!
//! Provides client-side computation for:
//! - Rain probability scoring
//! - PM2.5 to AQI conversion and back
//! - Cigarette equivalents of air pollution
//! - Offline input validation

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn score_sample_json(sample_json: &str) -> Result<String, String> {
    let sample: WeatherSample =
        serde_json::from_str(sample_json).map_err(|e| format!("Invalid sample JSON: {}", e))?;
    validate_weather_sample(&sample)?;

    let prediction = predict_rain(&sample);
    serde_json::to_string(&prediction).map_err(|e| e.to_string())
}

fn air_quality_report_json(pm25: f64) -> Result<String, String> {
    validate_pm25(pm25)?;
    serde_json::to_string(&convert_air_quality(Some(pm25))).map_err(|e| e.to_string())
}

/// Score a JSON weather sample, returning the prediction as JSON
#[wasm_bindgen]
pub fn predict_rain_json(sample_json: &str) -> Result<String, JsValue> {
    score_sample_json(sample_json).map_err(|e| JsValue::from_str(&e))
}

/// Rain probability (0-100) for the given indicators; NaN marks a missing one
#[wasm_bindgen]
pub fn rain_probability(
    chance_of_rain: f64,
    humidity: f64,
    precipitation_mm: f64,
    cloud_cover: f64,
    pressure_mb: f64,
) -> f64 {
    let present = |value: f64| (!value.is_nan()).then_some(value);
    let sample = WeatherSample {
        chance_of_rain: present(chance_of_rain),
        humidity: present(humidity),
        precipitation_mm: present(precipitation_mm),
        cloud_cover: present(cloud_cover),
        pressure_mb: present(pressure_mb),
    };
    predict_rain(&sample).probability
}

/// Calculate AQI from a PM2.5 concentration
#[wasm_bindgen]
pub fn calculate_aqi(pm25: f64) -> i32 {
    pm25_to_aqi(Some(pm25))
}

/// Cigarettes per day equivalent to a PM2.5 concentration
#[wasm_bindgen]
pub fn calculate_cigarettes(pm25: f64) -> f64 {
    pm25_to_cigarettes(Some(pm25))
}

/// AQI category label
#[wasm_bindgen]
pub fn classify_aqi(aqi: i32) -> String {
    aqi_to_category(aqi).label
}

/// Estimate PM2.5 from an AQI; undefined outside 0-500
#[wasm_bindgen]
pub fn estimate_pm25(aqi: i32) -> Option<f64> {
    aqi_to_pm25(Some(aqi))
}

/// Full air quality report as JSON
#[wasm_bindgen]
pub fn air_quality_json(pm25: f64) -> Result<String, JsValue> {
    air_quality_report_json(pm25).map_err(|e| JsValue::from_str(&e))
}

/// Health comparison sentences joined by newlines
#[wasm_bindgen]
pub fn describe_exposure(pm25: f64) -> String {
    health_comparisons(Some(pm25)).join("\n")
}

/// Validate a city name before sending it to the server
#[wasm_bindgen]
pub fn is_valid_city(city: &str) -> bool {
    validate_city(city).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_sample_json() {
        let json = score_sample_json(r#"{"humidity": 85}"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["rain_probability"], 20.0);
        assert_eq!(value["confidence"], "High");
        assert_eq!(value["will_rain"], false);
    }

    #[test]
    fn test_score_sample_json_rejects_bad_input() {
        assert!(score_sample_json("not json").is_err());
        assert!(score_sample_json(r#"{"humidity": 140}"#).is_err());
    }

    #[test]
    fn test_rain_probability_skips_nan() {
        assert_eq!(rain_probability(f64::NAN, 85.0, f64::NAN, f64::NAN, f64::NAN), 20.0);
        assert_eq!(rain_probability(100.0, f64::NAN, 3.0, f64::NAN, f64::NAN), 50.0);
    }

    #[test]
    fn test_air_quality_helpers() {
        assert_eq!(calculate_aqi(44.0), 122);
        assert_eq!(calculate_cigarettes(44.0), 2.0);
        assert_eq!(classify_aqi(42), "Good");
        assert_eq!(estimate_pm25(50), Some(12.0));
        assert_eq!(estimate_pm25(600), None);
    }

    #[test]
    fn test_air_quality_report_json() {
        let json = air_quality_report_json(22.0).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["aqi"], 72);
        assert!(air_quality_report_json(-1.0).is_err());
    }

    #[test]
    fn test_describe_exposure() {
        let text = describe_exposure(22.0);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_is_valid_city() {
        assert!(is_valid_city("Chennai"));
        assert!(!is_valid_city("   "));
    }
}
