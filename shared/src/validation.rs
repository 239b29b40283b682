//! Validation utilities for the Raincast platform
//!
//! The scoring core never rejects input; callers run these checks first.

use crate::models::{WeatherSample, AQI_MAX};

/// Longest city name accepted for a forecast lookup
pub const MAX_CITY_LENGTH: usize = 100;

/// Forecast days the weather API can return
pub const MAX_FORECAST_DAYS: u8 = 14;

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate a 0-100 percentage
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate every present field of a weather sample
pub fn validate_weather_sample(sample: &WeatherSample) -> Result<(), &'static str> {
    if let Some(chance) = sample.chance_of_rain {
        validate_percentage(chance).map_err(|_| "Chance of rain must be between 0 and 100")?;
    }
    if let Some(humidity) = sample.humidity {
        validate_percentage(humidity).map_err(|_| "Humidity must be between 0 and 100")?;
    }
    if let Some(cloud) = sample.cloud_cover {
        validate_percentage(cloud).map_err(|_| "Cloud cover must be between 0 and 100")?;
    }
    if let Some(precipitation) = sample.precipitation_mm {
        if !precipitation.is_finite() || precipitation < 0.0 {
            return Err("Precipitation cannot be negative");
        }
    }
    if let Some(pressure) = sample.pressure_mb {
        if !pressure.is_finite() || pressure <= 0.0 {
            return Err("Pressure must be a positive number");
        }
    }
    Ok(())
}

// ============================================================================
// Air Quality Validations
// ============================================================================

/// Validate a PM2.5 concentration in μg/m³
pub fn validate_pm25(pm25: f64) -> Result<(), &'static str> {
    if !pm25.is_finite() || pm25 < 0.0 {
        return Err("PM2.5 concentration cannot be negative");
    }
    Ok(())
}

/// Validate a calculated AQI value
pub fn validate_aqi(aqi: i32) -> Result<(), &'static str> {
    if !(0..=AQI_MAX).contains(&aqi) {
        return Err("AQI must be between 0 and 500");
    }
    Ok(())
}

// ============================================================================
// Location Validations
// ============================================================================

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), &'static str> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&longitude) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

pub fn validate_city(city: &str) -> Result<(), &'static str> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err("City name cannot be empty");
    }
    if trimmed.chars().count() > MAX_CITY_LENGTH {
        return Err("City name is too long");
    }
    Ok(())
}

pub fn validate_forecast_days(days: u8) -> Result<(), &'static str> {
    if days == 0 || days > MAX_FORECAST_DAYS {
        return Err("Forecast days must be between 1 and 14");
    }
    Ok(())
}
