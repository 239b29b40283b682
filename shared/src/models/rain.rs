//! Rain prediction models and the weighted meteorological scoring model

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::round_to_tenth;

/// Probability at or above which rain is predicted
pub const RAIN_THRESHOLD: f64 = 50.0;

/// Values the forecast layer substitutes for missing daily fields
pub const DEFAULT_CHANCE_OF_RAIN: f64 = 0.0;
pub const DEFAULT_HUMIDITY: f64 = 50.0;
pub const DEFAULT_PRECIPITATION_MM: f64 = 0.0;
pub const DEFAULT_CLOUD_COVER: f64 = 50.0;
pub const DEFAULT_PRESSURE_MB: f64 = 1013.0;

/// Weather indicators for one forecast day
///
/// Every field is optional. Absent (or non-finite) fields are left out of the
/// weighted sum rather than counted as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// The upstream API's own chance of rain (0-100)
    pub chance_of_rain: Option<f64>,
    /// Relative humidity percentage
    pub humidity: Option<f64>,
    /// Total precipitation in millimetres
    pub precipitation_mm: Option<f64>,
    /// Cloud cover percentage
    pub cloud_cover: Option<f64>,
    /// Atmospheric pressure in millibars
    pub pressure_mb: Option<f64>,
}

impl WeatherSample {
    /// Fill missing fields with the forecast layer's neutral defaults
    pub fn with_forecast_defaults(self) -> Self {
        Self {
            chance_of_rain: Some(self.chance_of_rain.unwrap_or(DEFAULT_CHANCE_OF_RAIN)),
            humidity: Some(self.humidity.unwrap_or(DEFAULT_HUMIDITY)),
            precipitation_mm: Some(self.precipitation_mm.unwrap_or(DEFAULT_PRECIPITATION_MM)),
            cloud_cover: Some(self.cloud_cover.unwrap_or(DEFAULT_CLOUD_COVER)),
            pressure_mb: Some(self.pressure_mb.unwrap_or(DEFAULT_PRESSURE_MB)),
        }
    }

    /// True when no indicator is present
    pub fn is_empty(&self) -> bool {
        self.chance_of_rain.is_none()
            && self.humidity.is_none()
            && self.precipitation_mm.is_none()
            && self.cloud_cover.is_none()
            && self.pressure_mb.is_none()
    }
}

/// Scoring indicators, in the order they are summed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    ChanceOfRain,
    Humidity,
    Precipitation,
    CloudCover,
    Pressure,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::ChanceOfRain,
        Indicator::Humidity,
        Indicator::Precipitation,
        Indicator::CloudCover,
        Indicator::Pressure,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Indicator::ChanceOfRain => "chance_of_rain",
            Indicator::Humidity => "humidity",
            Indicator::Precipitation => "precipitation",
            Indicator::CloudCover => "cloud_cover",
            Indicator::Pressure => "pressure",
        }
    }
}

impl std::fmt::Display for Indicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Indicator::ChanceOfRain => write!(f, "Chance of Rain"),
            Indicator::Humidity => write!(f, "Humidity"),
            Indicator::Precipitation => write!(f, "Precipitation"),
            Indicator::CloudCover => write!(f, "Cloud Cover"),
            Indicator::Pressure => write!(f, "Atmospheric Pressure"),
        }
    }
}

/// Errors raised when building a custom weight vector
#[derive(Debug, Clone, Error, PartialEq)]
pub enum WeightsError {
    #[error("weight for {0} must be a finite, non-negative number")]
    InvalidWeight(&'static str),

    #[error("weights must sum to 1.0, got {0}")]
    InvalidSum(f64),
}

/// Immutable weight vector for the scoring model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoringWeights {
    pub chance_of_rain: f64,
    pub humidity: f64,
    pub precipitation: f64,
    pub cloud_cover: f64,
    pub pressure: f64,
}

impl ScoringWeights {
    /// Weights of the meteorological scoring model
    pub const DEFAULT: ScoringWeights = ScoringWeights {
        chance_of_rain: 0.35,
        humidity: 0.20,
        precipitation: 0.25,
        cloud_cover: 0.10,
        pressure: 0.10,
    };

    const SUM_TOLERANCE: f64 = 1e-6;

    /// Build a weight vector, rejecting negative weights and sums other than 1.0
    pub fn new(
        chance_of_rain: f64,
        humidity: f64,
        precipitation: f64,
        cloud_cover: f64,
        pressure: f64,
    ) -> Result<Self, WeightsError> {
        let weights = Self {
            chance_of_rain,
            humidity,
            precipitation,
            cloud_cover,
            pressure,
        };

        for indicator in Indicator::ALL {
            let weight = weights.weight(indicator);
            if !weight.is_finite() || weight < 0.0 {
                return Err(WeightsError::InvalidWeight(indicator.key()));
            }
        }

        let sum = weights.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(WeightsError::InvalidSum(sum));
        }

        Ok(weights)
    }

    pub fn weight(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::ChanceOfRain => self.chance_of_rain,
            Indicator::Humidity => self.humidity,
            Indicator::Precipitation => self.precipitation,
            Indicator::CloudCover => self.cloud_cover,
            Indicator::Pressure => self.pressure,
        }
    }

    pub fn sum(&self) -> f64 {
        Indicator::ALL.iter().map(|i| self.weight(*i)).sum()
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Qualitative certainty of a prediction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Tier a clamped probability by its distance from the decision boundary
    ///
    /// High claims >= 80 and <= 20 first, so Medium only covers 65-80 and 20-35.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 80.0 || probability <= 20.0 {
            ConfidenceLevel::High
        } else if probability >= 65.0 || probability <= 35.0 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    pub fn percent(&self) -> u8 {
        match self {
            ConfidenceLevel::Low => 50,
            ConfidenceLevel::Medium => 70,
            ConfidenceLevel::High => 90,
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "Low"),
            ConfidenceLevel::Medium => write!(f, "Medium"),
            ConfidenceLevel::High => write!(f, "High"),
        }
    }
}

/// Outcome of scoring one sample
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RainPrediction {
    pub will_rain: bool,
    /// 0-100, one decimal place
    #[serde(rename = "rain_probability")]
    pub probability: f64,
    pub confidence: ConfidenceLevel,
    pub confidence_percent: u8,
}

impl RainPrediction {
    /// Prediction for a sample that carries no indicators at all
    pub fn no_signal() -> Self {
        Self {
            will_rain: false,
            probability: 0.0,
            confidence: ConfidenceLevel::Low,
            confidence_percent: ConfidenceLevel::Low.percent(),
        }
    }
}

// ============================================================================
// Indicator sub-scores (0-100)
// ============================================================================

pub fn humidity_score(humidity: f64) -> f64 {
    if humidity > 80.0 {
        100.0
    } else if humidity > 70.0 {
        75.0
    } else if humidity > 60.0 {
        50.0
    } else {
        25.0
    }
}

/// 5mm or more saturates the score
pub fn precipitation_score(precipitation_mm: f64) -> f64 {
    (precipitation_mm * 20.0).min(100.0)
}

pub fn cloud_cover_score(cloud_cover: f64) -> f64 {
    if cloud_cover > 75.0 {
        100.0
    } else if cloud_cover > 50.0 {
        60.0
    } else {
        20.0
    }
}

/// Low pressure scores high
pub fn pressure_score(pressure_mb: f64) -> f64 {
    if pressure_mb < 1000.0 {
        100.0
    } else if pressure_mb < 1010.0 {
        70.0
    } else if pressure_mb < 1015.0 {
        40.0
    } else {
        10.0
    }
}

// ============================================================================
// Scorer
// ============================================================================

/// Weighted meteorological scoring model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RainScorer {
    weights: ScoringWeights,
}

impl RainScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Unclamped weighted sum of the present indicators, or `None` when none are present
    pub fn weighted_sum(&self, sample: &WeatherSample) -> Option<f64> {
        let w = &self.weights;
        let present = |value: Option<f64>| value.filter(|v| v.is_finite());

        let terms = [
            present(sample.chance_of_rain).map(|v| v * w.chance_of_rain),
            present(sample.humidity).map(|v| humidity_score(v) * w.humidity),
            present(sample.precipitation_mm).map(|v| precipitation_score(v) * w.precipitation),
            present(sample.cloud_cover).map(|v| cloud_cover_score(v) * w.cloud_cover),
            present(sample.pressure_mb).map(|v| pressure_score(v) * w.pressure),
        ];

        let present_terms: Vec<f64> = terms.into_iter().flatten().collect();
        if present_terms.is_empty() {
            return None;
        }
        Some(present_terms.iter().sum())
    }

    /// Score a sample into a rain prediction
    pub fn score(&self, sample: &WeatherSample) -> RainPrediction {
        let Some(total) = self.weighted_sum(sample) else {
            return RainPrediction::no_signal();
        };

        let clamped = total.clamp(0.0, 100.0);
        let probability = round_to_tenth(clamped);
        let confidence = ConfidenceLevel::from_probability(clamped);

        RainPrediction {
            will_rain: probability >= RAIN_THRESHOLD,
            probability,
            confidence,
            confidence_percent: confidence.percent(),
        }
    }
}

/// Score a sample with the default weights
pub fn predict_rain(sample: &WeatherSample) -> RainPrediction {
    RainScorer::default().score(sample)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeatherSample {
        WeatherSample::default()
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoringWeights::DEFAULT.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_custom_weights_rejected() {
        assert_eq!(
            ScoringWeights::new(0.5, 0.5, 0.5, 0.0, 0.0),
            Err(WeightsError::InvalidSum(1.5))
        );
        assert_eq!(
            ScoringWeights::new(1.2, -0.2, 0.0, 0.0, 0.0),
            Err(WeightsError::InvalidWeight("humidity"))
        );
        assert!(ScoringWeights::new(1.0, 0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_humidity_bins() {
        assert_eq!(humidity_score(81.0), 100.0);
        assert_eq!(humidity_score(80.0), 75.0);
        assert_eq!(humidity_score(70.0), 50.0);
        assert_eq!(humidity_score(60.0), 25.0);
    }

    #[test]
    fn test_precipitation_saturates() {
        assert_eq!(precipitation_score(0.0), 0.0);
        assert_eq!(precipitation_score(2.5), 50.0);
        assert_eq!(precipitation_score(5.0), 100.0);
        assert_eq!(precipitation_score(40.0), 100.0);
    }

    #[test]
    fn test_cloud_and_pressure_bins() {
        assert_eq!(cloud_cover_score(76.0), 100.0);
        assert_eq!(cloud_cover_score(75.0), 60.0);
        assert_eq!(cloud_cover_score(50.0), 20.0);

        assert_eq!(pressure_score(999.0), 100.0);
        assert_eq!(pressure_score(1000.0), 70.0);
        assert_eq!(pressure_score(1010.0), 40.0);
        assert_eq!(pressure_score(1015.0), 10.0);
    }

    #[test]
    fn test_empty_sample_is_low_confidence_no_rain() {
        let prediction = predict_rain(&sample());
        assert!(!prediction.will_rain);
        assert_eq!(prediction.probability, 0.0);
        assert_eq!(prediction.confidence, ConfidenceLevel::Low);
        assert_eq!(prediction.confidence_percent, 50);
    }

    #[test]
    fn test_confidence_band_edges() {
        let cases = [
            (20.0, ConfidenceLevel::High),
            (20.1, ConfidenceLevel::Medium),
            (35.0, ConfidenceLevel::Medium),
            (35.1, ConfidenceLevel::Low),
            (64.9, ConfidenceLevel::Low),
            (65.0, ConfidenceLevel::Medium),
            (79.9, ConfidenceLevel::Medium),
            (80.0, ConfidenceLevel::High),
        ];
        for (probability, expected) in cases {
            assert_eq!(
                ConfidenceLevel::from_probability(probability),
                expected,
                "probability {}",
                probability
            );
        }
    }

    #[test]
    fn test_humidity_only_hits_high_boundary() {
        let prediction = predict_rain(&WeatherSample {
            humidity: Some(85.0),
            ..sample()
        });
        assert_eq!(prediction.probability, 20.0);
        assert_eq!(prediction.confidence, ConfidenceLevel::High);
        assert_eq!(prediction.confidence_percent, 90);
    }

    #[test]
    fn test_precipitation_only_is_medium() {
        let prediction = predict_rain(&WeatherSample {
            precipitation_mm: Some(5.0),
            ..sample()
        });
        assert_eq!(prediction.probability, 25.0);
        assert!(!prediction.will_rain);
        assert_eq!(prediction.confidence, ConfidenceLevel::Medium);
        assert_eq!(prediction.confidence_percent, 70);
    }

    #[test]
    fn test_fifty_is_rain() {
        // 100 * 0.35 + (3mm -> 60) * 0.25 = 50.0
        let prediction = predict_rain(&WeatherSample {
            chance_of_rain: Some(100.0),
            precipitation_mm: Some(3.0),
            ..sample()
        });
        assert_eq!(prediction.probability, 50.0);
        assert!(prediction.will_rain);
        assert_eq!(prediction.confidence, ConfidenceLevel::Low);
    }

    #[test]
    fn test_stormy_day_is_high_confidence_rain() {
        let prediction = predict_rain(&WeatherSample {
            chance_of_rain: Some(94.0),
            humidity: Some(90.0),
            precipitation_mm: Some(12.0),
            cloud_cover: Some(88.0),
            pressure_mb: Some(998.0),
        });
        // 32.9 + 20 + 25 + 10 + 10
        assert_eq!(prediction.probability, 97.9);
        assert!(prediction.will_rain);
        assert_eq!(prediction.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn test_forecast_defaults_only_fill_missing() {
        let filled = WeatherSample {
            humidity: Some(90.0),
            ..sample()
        }
        .with_forecast_defaults();

        assert_eq!(filled.chance_of_rain, Some(DEFAULT_CHANCE_OF_RAIN));
        assert_eq!(filled.humidity, Some(90.0));
        assert_eq!(filled.pressure_mb, Some(DEFAULT_PRESSURE_MB));
        assert!(!filled.is_empty());
    }

    #[test]
    fn test_non_finite_fields_are_skipped() {
        let prediction = predict_rain(&WeatherSample {
            chance_of_rain: Some(f64::NAN),
            precipitation_mm: Some(5.0),
            ..sample()
        });
        assert_eq!(prediction.probability, 25.0);
    }

    #[test]
    fn test_prediction_json_shape() {
        let prediction = predict_rain(&WeatherSample {
            precipitation_mm: Some(5.0),
            ..sample()
        });
        let json = serde_json::to_value(prediction).unwrap();
        assert_eq!(json["rain_probability"], 25.0);
        assert_eq!(json["confidence"], "Medium");
        assert_eq!(json["confidence_percent"], 70);
        assert_eq!(json["will_rain"], false);
    }

    #[test]
    fn test_sample_accepts_partial_json() {
        let sample: WeatherSample = serde_json::from_str(r#"{"humidity": 85}"#).unwrap();
        assert_eq!(sample.humidity, Some(85.0));
        assert!(sample.pressure_mb.is_none());
    }

    #[test]
    fn test_custom_weights_change_score() {
        let weights = ScoringWeights::new(1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        let scorer = RainScorer::new(weights);
        let prediction = scorer.score(&WeatherSample {
            chance_of_rain: Some(72.0),
            humidity: Some(95.0),
            ..sample()
        });
        assert_eq!(prediction.probability, 72.0);
        assert_eq!(prediction.confidence, ConfidenceLevel::Medium);
    }
}
