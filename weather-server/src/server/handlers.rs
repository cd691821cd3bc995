//! HTTP handlers: parameter validation and error mapping around the facade.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use weather_core::{Coordinate, FacadeError, Operation, Shaped};

use super::AppState;

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    StatusCode::OK
}

const COORDINATES_REQUIRED: &str = "lat/lng required";

/// Query params for `/cities`. Kept as strings so bad numbers become a 400
/// instead of the extractor's own rejection.
#[derive(Debug, Deserialize)]
pub struct CoordinateParams {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl CoordinateParams {
    fn coordinate(&self) -> Result<Coordinate, FacadeError> {
        let parsed = self
            .lat
            .as_deref()
            .and_then(parse_number)
            .zip(self.lng.as_deref().and_then(parse_number))
            .map(|(lat, lng)| Coordinate::new(lat, lng))
            .filter(Coordinate::is_valid);

        parsed.ok_or_else(|| FacadeError::Validation(COORDINATES_REQUIRED.to_string()))
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Any id that is not a plain unsigned integer, including one axum could not
/// decode from the path, is a city that doesn't exist.
fn parse_id(path: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    let Path(raw) = path.map_err(|rejection| {
        debug!("rejected city id: {rejection}");
        ApiError::NotFound
    })?;

    raw.parse().map_err(|_| ApiError::NotFound)
}

/// GET /cities?lat=..&lng=..
pub async fn cities_around(
    State(state): State<AppState>,
    query: Result<Query<CoordinateParams>, QueryRejection>,
) -> Result<Json<Shaped>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        debug!("rejected query string: {rejection}");
        FacadeError::Validation(COORDINATES_REQUIRED.to_string())
    })?;
    let origin = params.coordinate()?;

    let shaped = state
        .facade
        .fetch_and_shape(&Operation::CitiesAround { origin }, Some(origin))
        .await?;
    Ok(Json(shaped))
}

/// GET /cities/:id
pub async fn city_detail(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Shaped>, ApiError> {
    let id = parse_id(id)?;

    let shaped = state.facade.fetch_and_shape(&Operation::CityDetail { id }, None).await?;
    Ok(Json(shaped))
}

/// GET /cities/:id/weather
pub async fn city_weather(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Shaped>, ApiError> {
    let id = parse_id(id)?;

    let shaped = state.facade.fetch_and_shape(&Operation::CityWeather { id }, None).await?;
    Ok(Json(shaped))
}

/// What a client gets to see when a request fails.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
}

impl From<FacadeError> for ApiError {
    fn from(err: FacadeError) -> Self {
        match err {
            FacadeError::Validation(message) => ApiError::BadRequest(message),
            _ => ApiError::NotFound,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "BadRequest", message),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NotFound", "not found".to_string()),
        };

        (status, Json(json!({ "code": code, "message": message }))).into_response()
    }
}
