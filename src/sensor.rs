use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::{JsonBody, require};
use crate::{ApiError, DataStore, FarmId, SensorId};

/////////////////////////////////////////////// Sensor ///////////////////////////////////////////////

/// A device attached to exactly one farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    /// Server-generated identifier.
    pub sensor_id: SensorId,
    /// The farm this sensor was registered against.
    pub farm_id: FarmId,
    /// Free-text kind of sensor, e.g. "soil-moisture".
    pub sensor_type: String,
    /// Free-text position of the sensor on the farm.
    pub location: String,
    /// When the sensor was registered.
    pub registered_at: DateTime<Utc>,
}

impl Sensor {
    /// Creates a new sensor with a fresh identifier and the current time.
    pub fn new(farm_id: FarmId, sensor_type: String, location: String) -> Self {
        Sensor {
            sensor_id: SensorId::generate(),
            farm_id,
            sensor_type,
            location,
            registered_at: Utc::now(),
        }
    }
}

////////////////////////////////////////////// Requests //////////////////////////////////////////////

/// Request body for registering a sensor. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSensorRequest {
    /// Farm to attach the sensor to; must already exist.
    pub farm_id: Option<String>,
    /// Free-text kind of sensor.
    pub sensor_type: Option<String>,
    /// Free-text position of the sensor.
    pub location: Option<String>,
}

/// Response body for a registered sensor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSensorResponse {
    /// Confirmation message.
    pub message: String,
    /// Identifier of the new sensor.
    pub sensor_id: SensorId,
}

///////////////////////////////////////////// Operations /////////////////////////////////////////////

/// Validates a registration request and stores the resulting sensor.
///
/// Presence of every field is checked before the farm reference is looked up.
pub fn register_sensor(
    store: &dyn DataStore,
    request: RegisterSensorRequest,
) -> Result<Sensor, ApiError> {
    let farm_id = FarmId::from(require(request.farm_id, "farmId")?);
    let sensor_type = require(request.sensor_type, "sensorType")?;
    let location = require(request.location, "location")?;

    if store.get_farm(&farm_id)?.is_none() {
        return Err(ApiError::NotFound("Farm not found".to_string()));
    }

    let sensor = Sensor::new(farm_id, sensor_type, location);
    store.put_sensor(&sensor)?;
    tracing::info!(
        sensor_id = %sensor.sensor_id,
        farm_id = %sensor.farm_id,
        sensor_type = %sensor.sensor_type,
        "sensor registered"
    );
    Ok(sensor)
}

/// Looks up a sensor, failing with not-found for unknown identifiers.
pub fn get_sensor(store: &dyn DataStore, sensor_id: &SensorId) -> Result<Sensor, ApiError> {
    store
        .get_sensor(sensor_id)?
        .ok_or_else(|| ApiError::NotFound("Sensor not found".to_string()))
}

/// Lists the sensors registered against a farm.
///
/// An unknown farm is not an error here; it simply has no sensors.
pub fn list_farm_sensors(store: &dyn DataStore, farm_id: &FarmId) -> Result<Vec<Sensor>, ApiError> {
    Ok(store.list_sensors_by_farm(farm_id)?)
}

////////////////////////////////////////////// Routes //////////////////////////////////////////////

async fn post_sensor(
    State(store): State<Arc<dyn DataStore>>,
    JsonBody(request): JsonBody<RegisterSensorRequest>,
) -> Result<(StatusCode, Json<RegisterSensorResponse>), ApiError> {
    let sensor = register_sensor(store.as_ref(), request)?;
    let response = RegisterSensorResponse {
        message: "Sensor registered successfully".to_string(),
        sensor_id: sensor.sensor_id,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_sensor_by_id(
    State(store): State<Arc<dyn DataStore>>,
    Path(sensor_id): Path<String>,
) -> Result<Json<Sensor>, ApiError> {
    tracing::debug!(sensor_id = %sensor_id, "get sensor");
    let sensor = get_sensor(store.as_ref(), &SensorId::from(sensor_id))?;
    Ok(Json(sensor))
}

async fn get_farm_sensors(
    State(store): State<Arc<dyn DataStore>>,
    Path(farm_id): Path<String>,
) -> Result<Json<Vec<Sensor>>, ApiError> {
    let sensors = list_farm_sensors(store.as_ref(), &FarmId::from(farm_id))?;
    Ok(Json(sensors))
}

////////////////////////////////////////////// Router //////////////////////////////////////////////

/// Creates an Axum router with the sensor endpoints, including a farm's sensor list.
pub fn create_sensor_router(store: Arc<dyn DataStore>) -> Router {
    Router::new()
        .route("/sensors", post(post_sensor))
        .route("/sensors/:sensor_id", get(get_sensor_by_id))
        .route("/farms/:farm_id/sensors", get(get_farm_sensors))
        .with_state(store)
}
