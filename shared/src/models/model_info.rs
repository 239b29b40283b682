//! Self-description of the scoring model

use serde::Serialize;

use super::rain::{ConfidenceLevel, Indicator, ScoringWeights, RAIN_THRESHOLD};

pub const MODEL_NAME: &str = "Rain Prediction Model v1.0";
pub const MODEL_TYPE: &str = "Weighted Meteorological Scoring System";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ParameterInfo {
    pub key: &'static str,
    pub name: String,
    pub weight_percent: f64,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConfidenceBand {
    pub level: ConfidenceLevel,
    pub confidence_percent: u8,
    pub probability_range: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelInfo {
    pub model_name: &'static str,
    pub model_type: &'static str,
    pub description: &'static str,
    pub input_parameters: Vec<ParameterInfo>,
    pub prediction_threshold: f64,
    pub confidence_bands: Vec<ConfidenceBand>,
}

fn describe(indicator: Indicator) -> (&'static str, Option<&'static str>) {
    match indicator {
        Indicator::ChanceOfRain => ("Weather API's forecast probability", None),
        Indicator::Humidity => ("Average humidity percentage", Some(">80% = high rain probability")),
        Indicator::Precipitation => ("Total precipitation in mm", Some("5mm or more = 100% score")),
        Indicator::CloudCover => ("Cloud coverage percentage", Some(">75% = high rain probability")),
        Indicator::Pressure => (
            "Atmospheric pressure in mb",
            Some("<1000mb = high rain probability"),
        ),
    }
}

impl ModelInfo {
    pub fn from_weights(weights: &ScoringWeights) -> Self {
        let input_parameters = Indicator::ALL
            .iter()
            .map(|indicator| {
                let (description, thresholds) = describe(*indicator);
                ParameterInfo {
                    key: indicator.key(),
                    name: indicator.to_string(),
                    weight_percent: (weights.weight(*indicator) * 100.0).round(),
                    description,
                    thresholds,
                }
            })
            .collect();

        Self {
            model_name: MODEL_NAME,
            model_type: MODEL_TYPE,
            description: "Predicts rain probability based on multiple weather parameters",
            input_parameters,
            prediction_threshold: RAIN_THRESHOLD,
            confidence_bands: vec![
                ConfidenceBand {
                    level: ConfidenceLevel::High,
                    confidence_percent: ConfidenceLevel::High.percent(),
                    probability_range: ">=80% or <=20%",
                },
                ConfidenceBand {
                    level: ConfidenceLevel::Medium,
                    confidence_percent: ConfidenceLevel::Medium.percent(),
                    probability_range: "65-80% or 20-35%",
                },
                ConfidenceBand {
                    level: ConfidenceLevel::Low,
                    confidence_percent: ConfidenceLevel::Low.percent(),
                    probability_range: "35-65% (uncertain zone)",
                },
            ],
        }
    }

    /// Short labels such as "Humidity (20% weight)"
    pub fn parameters_used(&self) -> Vec<String> {
        self.input_parameters
            .iter()
            .map(|p| format!("{} ({}% weight)", p.name, p.weight_percent))
            .collect()
    }
}
