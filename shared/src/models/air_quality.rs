//! Air quality models: PM2.5 to AQI conversion and cigarette equivalents
//!
//! The cigarette equivalent follows Berkeley Earth: breathing 22 μg/m³ of
//! PM2.5 for 24 hours is roughly one cigarette.

use serde::{Deserialize, Serialize};

use crate::types::round_to_tenth;

/// μg/m³ of PM2.5 over 24h equivalent to one cigarette
pub const PM25_PER_CIGARETTE: f64 = 22.0;

pub const CIGARETTES_PER_PACK: u32 = 20;

/// Upper end of the calculated AQI scale
pub const AQI_MAX: i32 = 500;

/// One row of the EPA PM2.5 (24-hour) breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pm25Breakpoint {
    pub pm_low: f64,
    pub pm_high: f64,
    pub aqi_low: i32,
    pub aqi_high: i32,
}

impl Pm25Breakpoint {
    const fn new(pm_low: f64, pm_high: f64, aqi_low: i32, aqi_high: i32) -> Self {
        Self {
            pm_low,
            pm_high,
            aqi_low,
            aqi_high,
        }
    }

    /// Closed on both ends
    pub fn contains_pm25(&self, pm25: f64) -> bool {
        self.pm_low <= pm25 && pm25 <= self.pm_high
    }

    pub fn contains_aqi(&self, aqi: i32) -> bool {
        (self.aqi_low..=self.aqi_high).contains(&aqi)
    }

    fn pm25_to_aqi(&self, pm25: f64) -> i32 {
        let aqi_span = f64::from(self.aqi_high - self.aqi_low);
        let aqi = aqi_span / (self.pm_high - self.pm_low) * (pm25 - self.pm_low)
            + f64::from(self.aqi_low);
        aqi.round_ties_even() as i32
    }

    fn aqi_to_pm25(&self, aqi: i32) -> f64 {
        let aqi_span = f64::from(self.aqi_high - self.aqi_low);
        (self.pm_high - self.pm_low) / aqi_span * f64::from(aqi - self.aqi_low) + self.pm_low
    }
}

/// EPA PM2.5 breakpoints, in ascending order.
///
/// The PM2.5 ranges leave small gaps (12.0 -> 12.1, 35.4 -> 35.5, ...). A
/// concentration strictly inside a gap matches no bracket and is reported as
/// `AQI_MAX`, the same as a concentration above the table.
pub const PM25_BREAKPOINTS: [Pm25Breakpoint; 6] = [
    Pm25Breakpoint::new(0.0, 12.0, 0, 50),
    Pm25Breakpoint::new(12.1, 35.4, 51, 100),
    Pm25Breakpoint::new(35.5, 55.4, 101, 150),
    Pm25Breakpoint::new(55.5, 150.4, 151, 200),
    Pm25Breakpoint::new(150.5, 250.4, 201, 300),
    Pm25Breakpoint::new(250.5, 500.4, 301, 500),
];

/// AQI severity level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AqiLevel {
    /// 0-50
    Good,
    /// 51-100
    Moderate,
    /// 101-150
    UnhealthyForSensitive,
    /// 151-200
    Unhealthy,
    /// 201-300
    VeryUnhealthy,
    /// 301+
    Hazardous,
}

impl AqiLevel {
    /// Level for a calculated 0-500 AQI
    pub fn from_aqi(aqi: i32) -> Self {
        match aqi {
            i32::MIN..=50 => AqiLevel::Good,
            51..=100 => AqiLevel::Moderate,
            101..=150 => AqiLevel::UnhealthyForSensitive,
            151..=200 => AqiLevel::Unhealthy,
            201..=300 => AqiLevel::VeryUnhealthy,
            _ => AqiLevel::Hazardous,
        }
    }

    /// Level for the weather API's 1-6 US-EPA band number
    pub fn from_us_epa_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(AqiLevel::Good),
            2 => Some(AqiLevel::Moderate),
            3 => Some(AqiLevel::UnhealthyForSensitive),
            4 => Some(AqiLevel::Unhealthy),
            5 => Some(AqiLevel::VeryUnhealthy),
            6 => Some(AqiLevel::Hazardous),
            _ => None,
        }
    }

    pub fn us_epa_index(&self) -> u8 {
        match self {
            AqiLevel::Good => 1,
            AqiLevel::Moderate => 2,
            AqiLevel::UnhealthyForSensitive => 3,
            AqiLevel::Unhealthy => 4,
            AqiLevel::VeryUnhealthy => 5,
            AqiLevel::Hazardous => 6,
        }
    }

    pub fn category(&self) -> AqiCategory {
        let (color, background_color, text_color, advice) = match self {
            AqiLevel::Good => (
                "#00e400",
                "rgba(0, 228, 0, 0.1)",
                "#00a000",
                "Air quality is satisfactory",
            ),
            AqiLevel::Moderate => (
                "#ffff00",
                "rgba(255, 255, 0, 0.15)",
                "#808000",
                "Acceptable for most people",
            ),
            AqiLevel::UnhealthyForSensitive => (
                "#ff7e00",
                "rgba(255, 126, 0, 0.15)",
                "#cc6400",
                "Sensitive groups should limit outdoor exposure",
            ),
            AqiLevel::Unhealthy => (
                "#ff0000",
                "rgba(255, 0, 0, 0.15)",
                "#cc0000",
                "Everyone should limit prolonged outdoor exposure",
            ),
            AqiLevel::VeryUnhealthy => (
                "#8f3f97",
                "rgba(143, 63, 151, 0.15)",
                "#722c79",
                "Everyone should avoid outdoor activities",
            ),
            AqiLevel::Hazardous => (
                "#7e0023",
                "rgba(126, 0, 35, 0.15)",
                "#650000",
                "Everyone should remain indoors",
            ),
        };

        AqiCategory {
            level: *self,
            label: self.to_string(),
            color: color.to_string(),
            background_color: background_color.to_string(),
            text_color: text_color.to_string(),
            advice: advice.to_string(),
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AqiLevel::Good => write!(f, "Good"),
            AqiLevel::Moderate => write!(f, "Moderate"),
            AqiLevel::UnhealthyForSensitive => write!(f, "Unhealthy for Sensitive Groups"),
            AqiLevel::Unhealthy => write!(f, "Unhealthy"),
            AqiLevel::VeryUnhealthy => write!(f, "Very Unhealthy"),
            AqiLevel::Hazardous => write!(f, "Hazardous"),
        }
    }
}

/// Display data for an AQI band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AqiCategory {
    pub level: AqiLevel,
    pub label: String,
    pub color: String,
    pub background_color: String,
    pub text_color: String,
    pub advice: String,
}

/// Cigarette-equivalent exposure for a PM2.5 concentration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CigaretteEquivalent {
    pub per_day: f64,
    pub per_week: f64,
    pub per_year: u32,
}

/// Calculated AQI alongside the upstream US-EPA band
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirQualityReport {
    pub pm25: f64,
    /// Calculated 0-500 AQI
    pub aqi: i32,
    pub category: AqiCategory,
    pub cigarettes: CigaretteEquivalent,
    /// 1-6 band reported by the weather API, passed through unchanged
    pub us_epa_index: Option<u8>,
    pub us_epa_level: Option<AqiLevel>,
}

impl AirQualityReport {
    pub fn with_us_epa_index(mut self, index: Option<u8>) -> Self {
        self.us_epa_level = index.and_then(AqiLevel::from_us_epa_index);
        self.us_epa_index = index;
        self
    }
}

// ============================================================================
// Conversions
// ============================================================================

fn usable_pm25(pm25: Option<f64>) -> Option<f64> {
    pm25.filter(|v| v.is_finite() && *v >= 0.0)
}

/// Cigarettes per day; 0 for absent, zero or negative concentrations
pub fn pm25_to_cigarettes(pm25: Option<f64>) -> f64 {
    match usable_pm25(pm25) {
        Some(value) if value > 0.0 => round_to_tenth(value / PM25_PER_CIGARETTE),
        _ => 0.0,
    }
}

/// Calculated 0-500 AQI; 0 for absent or negative concentrations
pub fn pm25_to_aqi(pm25: Option<f64>) -> i32 {
    let Some(pm25) = usable_pm25(pm25) else {
        return 0;
    };

    PM25_BREAKPOINTS
        .iter()
        .find(|bp| bp.contains_pm25(pm25))
        .map(|bp| bp.pm25_to_aqi(pm25))
        .unwrap_or(AQI_MAX)
}

pub fn aqi_to_category(aqi: i32) -> AqiCategory {
    AqiLevel::from_aqi(aqi).category()
}

/// Inverse of [`pm25_to_aqi`]; `None` outside 0-500
pub fn aqi_to_pm25(aqi: Option<i32>) -> Option<f64> {
    let aqi = aqi?;
    if !(0..=AQI_MAX).contains(&aqi) {
        return None;
    }

    PM25_BREAKPOINTS
        .iter()
        .find(|bp| bp.contains_aqi(aqi))
        .map(|bp| round_to_tenth(bp.aqi_to_pm25(aqi)))
}

pub fn cigarette_equivalent(pm25: Option<f64>) -> CigaretteEquivalent {
    let per_day = pm25_to_cigarettes(pm25);
    CigaretteEquivalent {
        per_day,
        per_week: round_to_tenth(per_day * 7.0),
        per_year: (per_day * 365.0).round_ties_even() as u32,
    }
}

fn pluralize(count: f64, noun: &str) -> String {
    if count == 1.0 {
        noun.to_string()
    } else {
        format!("{}s", noun)
    }
}

/// Human-readable exposure comparisons, daily first
pub fn health_comparisons(pm25: Option<f64>) -> Vec<String> {
    let cigarettes = cigarette_equivalent(pm25);
    let per_year = f64::from(cigarettes.per_year);

    let mut comparisons = vec![
        format!(
            "Breathing this air for a day is like smoking {} {}",
            cigarettes.per_day,
            pluralize(cigarettes.per_day, "cigarette")
        ),
        format!(
            "Over a year that adds up to {} {}",
            cigarettes.per_year,
            pluralize(per_year, "cigarette")
        ),
    ];

    if cigarettes.per_year >= CIGARETTES_PER_PACK {
        let packs = round_to_tenth(per_year / f64::from(CIGARETTES_PER_PACK));
        comparisons.push(format!(
            "That is about {} {} of cigarettes a year",
            packs,
            pluralize(packs, "pack")
        ));
    }

    comparisons
}

/// AQI, category and cigarette equivalent for a PM2.5 reading
pub fn convert_air_quality(pm25: Option<f64>) -> AirQualityReport {
    let aqi = pm25_to_aqi(pm25);
    AirQualityReport {
        pm25: usable_pm25(pm25).unwrap_or(0.0),
        aqi,
        category: aqi_to_category(aqi),
        cigarettes: cigarette_equivalent(pm25),
        us_epa_index: None,
        us_epa_level: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cigarettes_reference_point() {
        assert_eq!(pm25_to_cigarettes(Some(22.0)), 1.0);
        assert_eq!(pm25_to_cigarettes(Some(0.0)), 0.0);
        assert_eq!(pm25_to_cigarettes(None), 0.0);
        assert_eq!(pm25_to_cigarettes(Some(-4.0)), 0.0);
        assert_eq!(pm25_to_cigarettes(Some(55.0)), 2.5);
    }

    #[test]
    fn test_aqi_bracket_edges() {
        assert_eq!(pm25_to_aqi(Some(0.0)), 0);
        assert_eq!(pm25_to_aqi(Some(12.0)), 50);
        assert_eq!(pm25_to_aqi(Some(12.1)), 51);
        assert_eq!(pm25_to_aqi(Some(35.4)), 100);
        assert_eq!(pm25_to_aqi(Some(35.5)), 101);
        assert_eq!(pm25_to_aqi(Some(500.4)), 500);
    }

    #[test]
    fn test_aqi_sentinels_and_clamp() {
        assert_eq!(pm25_to_aqi(None), 0);
        assert_eq!(pm25_to_aqi(Some(-1.0)), 0);
        assert_eq!(pm25_to_aqi(Some(600.0)), 500);
    }

    #[test]
    fn test_aqi_gap_falls_through_to_max() {
        assert_eq!(pm25_to_aqi(Some(12.05)), AQI_MAX);
    }

    #[test]
    fn test_category_bands() {
        assert_eq!(aqi_to_category(50).level, AqiLevel::Good);
        assert_eq!(aqi_to_category(51).level, AqiLevel::Moderate);
        assert_eq!(aqi_to_category(150).label, "Unhealthy for Sensitive Groups");
        assert_eq!(aqi_to_category(200).level, AqiLevel::Unhealthy);
        assert_eq!(aqi_to_category(300).level, AqiLevel::VeryUnhealthy);
        assert_eq!(aqi_to_category(500).level, AqiLevel::Hazardous);
        assert_eq!(aqi_to_category(500).color, "#7e0023");
    }

    #[test]
    fn test_us_epa_index_passthrough() {
        assert_eq!(AqiLevel::from_us_epa_index(0), None);
        assert_eq!(AqiLevel::from_us_epa_index(1), Some(AqiLevel::Good));
        assert_eq!(AqiLevel::from_us_epa_index(6), Some(AqiLevel::Hazardous));
        assert_eq!(AqiLevel::from_us_epa_index(7), None);
        assert_eq!(AqiLevel::VeryUnhealthy.us_epa_index(), 5);
    }

    #[test]
    fn test_aqi_to_pm25() {
        assert_eq!(aqi_to_pm25(None), None);
        assert_eq!(aqi_to_pm25(Some(-1)), None);
        assert_eq!(aqi_to_pm25(Some(501)), None);
        assert_eq!(aqi_to_pm25(Some(0)), Some(0.0));
        assert_eq!(aqi_to_pm25(Some(50)), Some(12.0));
        assert_eq!(aqi_to_pm25(Some(51)), Some(12.1));
        assert_eq!(aqi_to_pm25(Some(100)), Some(35.4));
        assert_eq!(aqi_to_pm25(Some(500)), Some(500.4));
    }

    #[test]
    fn test_cigarette_equivalent_totals() {
        let cigarettes = cigarette_equivalent(Some(44.0));
        assert_eq!(cigarettes.per_day, 2.0);
        assert_eq!(cigarettes.per_week, 14.0);
        assert_eq!(cigarettes.per_year, 730);
    }

    #[test]
    fn test_health_comparisons_singular() {
        let comparisons = health_comparisons(Some(22.0));
        assert_eq!(comparisons.len(), 3);
        assert_eq!(
            comparisons[0],
            "Breathing this air for a day is like smoking 1 cigarette"
        );
        assert_eq!(comparisons[1], "Over a year that adds up to 365 cigarettes");
        assert_eq!(comparisons[2], "That is about 18.2 packs of cigarettes a year");
    }

    #[test]
    fn test_health_comparisons_without_packs() {
        // 0.05 cigarettes a day rounds to 0.0 per day -> nothing a year
        let comparisons = health_comparisons(Some(1.0));
        assert_eq!(comparisons.len(), 2);
        assert!(comparisons[0].ends_with("0 cigarettes"));
    }

    #[test]
    fn test_convert_air_quality() {
        let report = convert_air_quality(Some(22.0)).with_us_epa_index(Some(2));
        assert_eq!(report.aqi, 72);
        assert_eq!(report.category.level, AqiLevel::Moderate);
        assert_eq!(report.cigarettes.per_day, 1.0);
        assert_eq!(report.us_epa_level, Some(AqiLevel::Moderate));
    }
}
