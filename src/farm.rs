use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::{JsonBody, require};
use crate::{ApiError, DataStore, FarmId};

//////////////////////////////////////////////// Farm ////////////////////////////////////////////////

/// A farm: the top-level physical unit being monitored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Farm {
    /// Server-generated identifier.
    pub farm_id: FarmId,
    /// Display name of the farm.
    pub name: String,
    /// Free-text location.
    pub location: String,
    /// Area of the farm; the unit is up to the caller.
    pub size: f64,
    /// When the farm was registered.
    pub created_at: DateTime<Utc>,
}

impl Farm {
    /// Creates a new farm with a fresh identifier and the current time.
    pub fn new(name: String, location: String, size: f64) -> Self {
        Farm {
            farm_id: FarmId::generate(),
            name,
            location,
            size,
            created_at: Utc::now(),
        }
    }
}

////////////////////////////////////////////// Requests //////////////////////////////////////////////

/// Request body for creating a farm. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmRequest {
    /// Display name of the farm.
    pub name: Option<String>,
    /// Free-text location.
    pub location: Option<String>,
    /// Area of the farm.
    pub size: Option<f64>,
}

/// Response body for a created farm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFarmResponse {
    /// Confirmation message.
    pub message: String,
    /// Identifier of the new farm.
    pub farm_id: FarmId,
}

///////////////////////////////////////////// Operations /////////////////////////////////////////////

/// Validates a create request and stores the resulting farm.
///
/// The size is not range-checked: zero and negative sizes are stored as given.
pub fn create_farm(store: &dyn DataStore, request: CreateFarmRequest) -> Result<Farm, ApiError> {
    let name = require(request.name, "name")?;
    let location = require(request.location, "location")?;
    let size = require(request.size, "size")?;

    let farm = Farm::new(name, location, size);
    store.put_farm(&farm)?;
    tracing::info!(farm_id = %farm.farm_id, name = %farm.name, "farm created");
    Ok(farm)
}

/// Looks up a farm, failing with not-found for unknown identifiers.
pub fn get_farm(store: &dyn DataStore, farm_id: &FarmId) -> Result<Farm, ApiError> {
    store
        .get_farm(farm_id)?
        .ok_or_else(|| ApiError::NotFound("Farm not found".to_string()))
}

/// Lists every farm.
pub fn list_farms(store: &dyn DataStore) -> Result<Vec<Farm>, ApiError> {
    Ok(store.list_farms()?)
}

////////////////////////////////////////////// Routes //////////////////////////////////////////////

async fn post_farm(
    State(store): State<Arc<dyn DataStore>>,
    JsonBody(request): JsonBody<CreateFarmRequest>,
) -> Result<(StatusCode, Json<CreateFarmResponse>), ApiError> {
    let farm = create_farm(store.as_ref(), request)?;
    let response = CreateFarmResponse {
        message: "Farm created successfully".to_string(),
        farm_id: farm.farm_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_farm_by_id(
    State(store): State<Arc<dyn DataStore>>,
    Path(farm_id): Path<String>,
) -> Result<Json<Farm>, ApiError> {
    tracing::debug!(farm_id = %farm_id, "get farm");
    let farm = get_farm(store.as_ref(), &FarmId::from(farm_id))?;
    Ok(Json(farm))
}

async fn get_farms(State(store): State<Arc<dyn DataStore>>) -> Result<Json<Vec<Farm>>, ApiError> {
    Ok(Json(list_farms(store.as_ref())?))
}

////////////////////////////////////////////// Router //////////////////////////////////////////////

/// Creates an Axum router with the farm endpoints.
///
/// Listing a farm's sensors lives in the sensor router.
pub fn create_farm_router(store: Arc<dyn DataStore>) -> Router {
    Router::new()
        .route("/farms", get(get_farms).post(post_farm))
        .route("/farms/:farm_id", get(get_farm_by_id))
        .with_state(store)
}
