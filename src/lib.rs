//! # digifarm: A Record Service for Farms, Sensors, and Readings
//!
//! digifarm keeps track of the farms being monitored, the sensors installed on them, and
//! the numeric readings those sensors report. Each is exposed as a JSON resource over HTTP.
//!
//! - **Farms** are registered with a name, a location, and a size.
//! - **Sensors** are registered against an existing farm.
//! - **Readings** are appended against an existing sensor, with a caller-supplied,
//!   offset-aware timestamp and a value/unit pair.
//!
//! References are checked once, when the dependent record is created. Nothing is ever
//! deleted, so a reference that was valid at creation stays valid. All state lives in
//! memory and is lost on restart.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │ HTTP API Layer (Axum routes under /api) │
//! ├─────────────────────────────────────────┤
//! │ Operations (validation, existence)      │
//! ├─────────────────────────────────────────┤
//! │ Data Store (trait + in-memory impl)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Examples
//!
//! ```rust
//! use digifarm::{
//!     AddReadingRequest, CreateFarmRequest, DataStore, InMemoryDataStore,
//!     RegisterSensorRequest, add_reading, create_farm, register_sensor,
//! };
//!
//! let store = InMemoryDataStore::new();
//!
//! let farm = create_farm(&store, CreateFarmRequest {
//!     name: Some("Acme".to_string()),
//!     location: Some("Field A".to_string()),
//!     size: Some(12.5),
//! }).unwrap();
//!
//! let sensor = register_sensor(&store, RegisterSensorRequest {
//!     farm_id: Some(farm.farm_id.to_string()),
//!     sensor_type: Some("soil-moisture".to_string()),
//!     location: Some("Row 3".to_string()),
//! }).unwrap();
//!
//! add_reading(&store, AddReadingRequest {
//!     sensor_id: Some(sensor.sensor_id.to_string()),
//!     timestamp: Some("2023-10-27T10:00:00+00:00".to_string()),
//!     value: Some(23.4),
//!     unit: Some("%".to_string()),
//! }).unwrap();
//!
//! assert_eq!(store.list_sensors_by_farm(&farm.farm_id).unwrap(), vec![sensor]);
//! assert_eq!(store.count_readings().unwrap(), 1);
//! ```

mod data_store;
mod errors;
mod extract;
mod farm;
mod ids;
mod reading;
mod router;
mod sensor;

/// Daemon configuration and defaults.
pub mod config;

/// Tracing subscriber setup for the binaries.
pub mod logging;

/// Command-line interface utilities for program termination and output formatting.
pub mod cli_utils;

/// Command handlers for the farmctl CLI application.
pub mod commands;

/// HTTP client for talking to a running daemon.
pub mod http_utils;

pub use data_store::{DataStore, InMemoryDataStore};
pub use errors::{ApiError, DataStoreError, ErrorResponse};
pub use extract::JsonBody;
pub use farm::{
    CreateFarmRequest, CreateFarmResponse, Farm, create_farm, create_farm_router, get_farm,
    list_farms,
};
pub use ids::{FarmId, SensorId};
pub use reading::{
    AddReadingRequest, AddReadingResponse, INVALID_TIMESTAMP, Reading, add_reading,
    create_reading_router, list_sensor_readings, parse_timestamp,
};
pub use router::create_router;
pub use sensor::{
    RegisterSensorRequest, RegisterSensorResponse, Sensor, create_sensor_router, get_sensor,
    list_farm_sensors, register_sensor,
};
