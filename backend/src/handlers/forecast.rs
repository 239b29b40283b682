//! HTTP handlers for rain prediction and air quality endpoints

use axum::{
    async_trait,
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use shared::{
    validate_city, validate_coordinates, validate_forecast_days, GpsCoordinates, LocationQuery,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::forecast::{AirQualityResponse, RainReport};
use crate::AppState;

/// `Query` whose rejection is reported through `AppError`
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Query parameters selecting a location; coordinates win over a city name.
///
/// The city is checked in [`LocationParams::location`] only when it is used,
/// so a blank `city` next to coordinates is ignored.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct LocationParams {
    pub city: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: Option<f64>,
    #[validate(range(min = 1, max = 14))]
    pub days: Option<u8>,
}

impl LocationParams {
    pub fn location(&self) -> AppResult<LocationQuery> {
        match (self.lat, self.lon, self.city.as_deref()) {
            (Some(latitude), Some(longitude), _) => {
                validate_coordinates(latitude, longitude).map_err(|message| {
                    AppError::Validation {
                        field: "lat".to_string(),
                        message: message.to_string(),
                    }
                })?;
                Ok(LocationQuery::Coordinates(GpsCoordinates::new(
                    latitude, longitude,
                )))
            }
            (_, _, Some(city)) => {
                validate_city(city).map_err(|message| AppError::Validation {
                    field: "city".to_string(),
                    message: message.to_string(),
                })?;
                Ok(LocationQuery::City(city.trim().to_string()))
            }
            _ => Err(AppError::MissingLocation),
        }
    }
}

/// Predict rain for each forecast day
pub async fn predict_rain(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LocationParams>,
) -> AppResult<Json<RainReport>> {
    params.validate()?;
    let location = params.location()?;

    let days = params.days.unwrap_or(state.config.weather.forecast_days);
    validate_forecast_days(days).map_err(|message| AppError::Validation {
        field: "days".to_string(),
        message: message.to_string(),
    })?;

    let report = state.forecast.predict_rain(&location, days).await?;
    Ok(Json(report))
}

/// Current air quality as calculated AQI and cigarette equivalents
pub async fn air_quality(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<LocationParams>,
) -> AppResult<Json<AirQualityResponse>> {
    params.validate()?;
    let location = params.location()?;

    let response = state.forecast.air_quality(&location).await?;
    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_take_precedence() {
        let params = LocationParams {
            city: Some("Chennai".to_string()),
            lat: Some(13.08),
            lon: Some(80.27),
            days: None,
        };
        assert_eq!(
            params.location().unwrap(),
            LocationQuery::Coordinates(GpsCoordinates::new(13.08, 80.27))
        );
    }

    #[test]
    fn test_city_is_trimmed() {
        let params = LocationParams {
            city: Some(" Chennai ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            params.location().unwrap(),
            LocationQuery::City("Chennai".to_string())
        );
    }

    #[test]
    fn test_blank_city_ignored_next_to_coordinates() {
        let params = LocationParams {
            city: Some(String::new()),
            lat: Some(13.0),
            lon: Some(80.0),
            days: None,
        };
        assert!(params.validate().is_ok());
        assert_eq!(
            params.location().unwrap(),
            LocationQuery::Coordinates(GpsCoordinates::new(13.0, 80.0))
        );
    }

    #[test]
    fn test_missing_location() {
        let params = LocationParams {
            lat: Some(13.08),
            ..Default::default()
        };
        assert!(matches!(params.location(), Err(AppError::MissingLocation)));
    }

    #[test]
    fn test_blank_city_rejected() {
        let params = LocationParams {
            city: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            params.location(),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_out_of_range_params_fail_validation() {
        let params = LocationParams {
            lat: Some(120.0),
            lon: Some(0.0),
            days: Some(30),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
