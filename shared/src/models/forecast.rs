//! Daily forecast predictions and multi-day summaries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::rain::{RainPrediction, RAIN_THRESHOLD};

/// Rain intensity from daily total precipitation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RainIntensity {
    None,
    Light,
    Moderate,
    Heavy,
}

impl RainIntensity {
    pub fn from_precipitation(precipitation_mm: f64) -> Self {
        if precipitation_mm > 10.0 {
            RainIntensity::Heavy
        } else if precipitation_mm > 2.5 {
            RainIntensity::Moderate
        } else if precipitation_mm > 0.0 {
            RainIntensity::Light
        } else {
            RainIntensity::None
        }
    }
}

impl std::fmt::Display for RainIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RainIntensity::None => write!(f, "None"),
            RainIntensity::Light => write!(f, "Light"),
            RainIntensity::Moderate => write!(f, "Moderate"),
            RainIntensity::Heavy => write!(f, "Heavy"),
        }
    }
}

/// Observed conditions reported alongside a daily prediction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyConditions {
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: String,
    pub humidity: f64,
    pub precipitation_mm: f64,
    pub rain_intensity: RainIntensity,
    /// Average of the hourly cloud cover readings
    pub cloud_cover: f64,
    /// Average of the hourly pressure readings
    pub pressure_mb: f64,
}

/// Rain prediction for one forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub day_name: String,
    pub prediction: RainPrediction,
    pub conditions: DailyConditions,
}

impl DailyPrediction {
    pub fn new(date: NaiveDate, prediction: RainPrediction, conditions: DailyConditions) -> Self {
        Self {
            date,
            day_name: date.format("%A").to_string(),
            prediction,
            conditions,
        }
    }
}

/// Advice derived from the highest daily probability
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    CarryUmbrella,
    KeepUmbrellaHandy,
    OutdoorsFine,
}

impl Recommendation {
    pub fn from_max_probability(max_probability: f64) -> Self {
        if max_probability >= 70.0 {
            Recommendation::CarryUmbrella
        } else if max_probability >= RAIN_THRESHOLD {
            Recommendation::KeepUmbrellaHandy
        } else {
            Recommendation::OutdoorsFine
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::CarryUmbrella => {
                "High chance of rain - carry umbrella and plan indoor activities"
            }
            Recommendation::KeepUmbrellaHandy => "Moderate chance of rain - keep umbrella handy",
            Recommendation::OutdoorsFine => {
                "Low chance of rain - outdoor activities should be fine"
            }
        }
    }
}

/// Summary across every forecast day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastSummary {
    pub will_rain_any_day: bool,
    pub max_rain_probability: f64,
    pub days_with_rain: usize,
    pub total_days: usize,
    pub recommendation: Recommendation,
    pub recommendation_text: String,
}

impl ForecastSummary {
    pub fn from_predictions(days: &[DailyPrediction]) -> Self {
        let days_with_rain = days.iter().filter(|d| d.prediction.will_rain).count();
        let max_rain_probability = days
            .iter()
            .map(|d| d.prediction.probability)
            .fold(0.0_f64, f64::max);
        let recommendation = Recommendation::from_max_probability(max_rain_probability);

        Self {
            will_rain_any_day: days_with_rain > 0,
            max_rain_probability,
            days_with_rain,
            total_days: days.len(),
            recommendation,
            recommendation_text: recommendation.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rain::{predict_rain, WeatherSample};

    fn day(date: &str, chance_of_rain: f64) -> DailyPrediction {
        let sample = WeatherSample {
            chance_of_rain: Some(chance_of_rain),
            ..Default::default()
        };
        DailyPrediction::new(
            date.parse().unwrap(),
            predict_rain(&sample),
            DailyConditions {
                max_temp_c: 31.0,
                min_temp_c: 24.0,
                condition: "Patchy rain nearby".to_string(),
                humidity: 70.0,
                precipitation_mm: 0.0,
                rain_intensity: RainIntensity::None,
                cloud_cover: 40.0,
                pressure_mb: 1012.0,
            },
        )
    }

    #[test]
    fn test_rain_intensity_bands() {
        assert_eq!(RainIntensity::from_precipitation(0.0), RainIntensity::None);
        assert_eq!(RainIntensity::from_precipitation(0.1), RainIntensity::Light);
        assert_eq!(RainIntensity::from_precipitation(2.5), RainIntensity::Light);
        assert_eq!(RainIntensity::from_precipitation(2.6), RainIntensity::Moderate);
        assert_eq!(RainIntensity::from_precipitation(10.0), RainIntensity::Moderate);
        assert_eq!(RainIntensity::from_precipitation(10.1), RainIntensity::Heavy);
    }

    #[test]
    fn test_day_name_from_date() {
        let prediction = day("2024-07-01", 10.0);
        assert_eq!(prediction.day_name, "Monday");
    }

    #[test]
    fn test_recommendation_thresholds() {
        assert_eq!(Recommendation::from_max_probability(70.0), Recommendation::CarryUmbrella);
        assert_eq!(Recommendation::from_max_probability(69.9), Recommendation::KeepUmbrellaHandy);
        assert_eq!(Recommendation::from_max_probability(50.0), Recommendation::KeepUmbrellaHandy);
        assert_eq!(Recommendation::from_max_probability(49.9), Recommendation::OutdoorsFine);
    }

    #[test]
    fn test_summary_counts_rainy_days() {
        // chance_of_rain alone contributes at most 35, so no day crosses 50
        let days = vec![day("2024-07-01", 100.0), day("2024-07-02", 20.0)];
        let summary = ForecastSummary::from_predictions(&days);

        assert!(!summary.will_rain_any_day);
        assert_eq!(summary.days_with_rain, 0);
        assert_eq!(summary.total_days, 2);
        assert_eq!(summary.max_rain_probability, 35.0);
        assert_eq!(summary.recommendation, Recommendation::OutdoorsFine);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ForecastSummary::from_predictions(&[]);
        assert_eq!(summary.total_days, 0);
        assert_eq!(summary.max_rain_probability, 0.0);
        assert!(!summary.will_rain_any_day);
    }
}
