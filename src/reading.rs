use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::extract::{JsonBody, require};
use crate::{ApiError, DataStore, SensorId};

/// Message returned for timestamps that are not offset-aware ISO-8601 date-times.
pub const INVALID_TIMESTAMP: &str =
    "Invalid timestamp format. Use ISO 8601 format (e.g., 2023-10-27T10:00:00+00:00)";

/////////////////////////////////////////////// Reading //////////////////////////////////////////////

/// A single timestamped observation from a sensor.
///
/// Readings carry no identifier and are never deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    /// The sensor that produced this reading.
    pub sensor_id: SensorId,
    /// When the observation was made, with the caller's UTC offset preserved.
    pub timestamp: DateTime<FixedOffset>,
    /// Observed value.
    pub value: f64,
    /// Unit of `value`, e.g. "%".
    pub unit: String,
    /// When the server accepted the reading.
    pub received_at: DateTime<Utc>,
}

impl Reading {
    /// Creates a reading stamped with the current receipt time.
    pub fn new(
        sensor_id: SensorId,
        timestamp: DateTime<FixedOffset>,
        value: f64,
        unit: String,
    ) -> Self {
        Reading {
            sensor_id,
            timestamp,
            value,
            unit,
            received_at: Utc::now(),
        }
    }
}

/// Parses an ISO-8601 offset date-time: `YYYY-MM-DDTHH:MM[:SS[.fraction]]` followed by `Z`
/// or `+HH:MM[:SS]`.
///
/// The `T` and `Z` may be lower case. A space separator, a missing offset, second 60, or an
/// offset beyond 18 hours is rejected.
pub fn parse_timestamp(input: &str) -> Option<DateTime<FixedOffset>> {
    if !input.is_ascii() || input.len() < 11 || !matches!(input.as_bytes()[10], b'T' | b't') {
        return None;
    }
    let date = parse_date(&input[..10])?;
    let rest = &input[11..];
    let split = rest.find(|c: char| matches!(c, 'Z' | 'z' | '+' | '-'))?;
    let time = parse_time(&rest[..split])?;
    let offset = parse_offset(&rest[split..])?;
    date.and_time(time).and_local_timezone(offset).single()
}

fn two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let bytes = s.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' || !s[..4].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = s[..4].parse().ok()?;
    NaiveDate::from_ymd_opt(year, two_digits(&s[5..7])?, two_digits(&s[8..10])?)
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    let (hms, fraction) = match s.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (s, None),
    };
    let mut fields = hms.split(':');
    let hour = two_digits(fields.next()?)?;
    let minute = two_digits(fields.next()?)?;
    let second = match fields.next() {
        Some(field) => two_digits(field)?,
        None if fraction.is_none() => 0,
        None => return None,
    };
    if fields.next().is_some() {
        return None;
    }
    let nanos = match fraction {
        Some(digits) if (1..=9).contains(&digits.len())
            && digits.bytes().all(|b| b.is_ascii_digit()) =>
        {
            digits.parse::<u32>().ok()? * 10u32.pow(9 - digits.len() as u32)
        }
        Some(_) => return None,
        None => 0,
    };
    // from_hms_nano_opt rejects second 60; leap seconds only exist as nanos >= 1e9.
    NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    if s.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0);
    }
    let sign = match s.as_bytes().first()? {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let mut fields = s[1..].split(':');
    let hours = two_digits(fields.next()?)?;
    let minutes = two_digits(fields.next()?)?;
    let seconds = match fields.next() {
        Some(field) => two_digits(field)?,
        None => 0,
    };
    if fields.next().is_some() || minutes > 59 || seconds > 59 {
        return None;
    }
    let total = (hours * 3600 + minutes * 60 + seconds) as i32;
    if total > 18 * 3600 {
        return None;
    }
    FixedOffset::east_opt(sign * total)
}

////////////////////////////////////////////// Requests //////////////////////////////////////////////

/// Request body for adding a reading. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddReadingRequest {
    /// Sensor that produced the reading; must already exist.
    pub sensor_id: Option<String>,
    /// Offset-aware ISO-8601 date-time of the observation.
    pub timestamp: Option<String>,
    /// Observed value.
    pub value: Option<f64>,
    /// Unit of the value.
    pub unit: Option<String>,
}

/// Response body for an accepted reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReadingResponse {
    /// Confirmation message.
    pub message: String,
}

///////////////////////////////////////////// Operations /////////////////////////////////////////////

/// Validates a reading and appends it to the store.
///
/// Checks run in order: required fields, sensor existence, then timestamp syntax. Nothing
/// is appended unless every check passes.
pub fn add_reading(store: &dyn DataStore, request: AddReadingRequest) -> Result<Reading, ApiError> {
    let sensor_id = SensorId::from(require(request.sensor_id, "sensorId")?);
    let timestamp = require(request.timestamp, "timestamp")?;
    let value = require(request.value, "value")?;
    let unit = require(request.unit, "unit")?;

    if store.get_sensor(&sensor_id)?.is_none() {
        return Err(ApiError::NotFound("Sensor not found".to_string()));
    }

    let timestamp = parse_timestamp(&timestamp)
        .ok_or_else(|| ApiError::Validation(INVALID_TIMESTAMP.to_string()))?;

    let reading = Reading::new(sensor_id, timestamp, value, unit);
    store.append_reading(&reading)?;
    tracing::info!(
        sensor_id = %reading.sensor_id,
        value = reading.value,
        unit = %reading.unit,
        "reading added"
    );
    Ok(reading)
}

/// Lists a sensor's readings in receipt order, failing with not-found for unknown sensors.
pub fn list_sensor_readings(
    store: &dyn DataStore,
    sensor_id: &SensorId,
) -> Result<Vec<Reading>, ApiError> {
    if store.get_sensor(sensor_id)?.is_none() {
        return Err(ApiError::NotFound("Sensor not found".to_string()));
    }
    Ok(store.list_readings_by_sensor(sensor_id)?)
}

////////////////////////////////////////////// Routes //////////////////////////////////////////////

async fn post_reading(
    State(store): State<Arc<dyn DataStore>>,
    JsonBody(request): JsonBody<AddReadingRequest>,
) -> Result<(StatusCode, Json<AddReadingResponse>), ApiError> {
    add_reading(store.as_ref(), request)?;
    let response = AddReadingResponse {
        message: "Reading added successfully".to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_sensor_readings(
    State(store): State<Arc<dyn DataStore>>,
    Path(sensor_id): Path<String>,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let readings = list_sensor_readings(store.as_ref(), &SensorId::from(sensor_id))?;
    Ok(Json(readings))
}

////////////////////////////////////////////// Router //////////////////////////////////////////////

/// Creates an Axum router with the reading endpoints.
pub fn create_reading_router(store: Arc<dyn DataStore>) -> Router {
    Router::new()
        .route("/readings", post(post_reading))
        .route("/sensors/:sensor_id/readings", get(get_sensor_readings))
        .with_state(store)
}
