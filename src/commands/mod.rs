//! # Command Handlers
//!
//! This module contains the command handlers for the farmctl CLI application.
//! Each resource is implemented in a dedicated submodule.
//!
//! ## Structure
//!
//! - `farm` - Farm commands (create, get, list, sensors)
//! - `sensor` - Sensor commands (register, get, readings)
//! - `reading` - Reading commands (add)
//! - `shared` - Shared validation and dispatch helpers
//! - `errors` - User-facing error formatting

pub mod errors;
pub mod farm;
pub mod reading;
pub mod sensor;
pub mod shared;

pub use farm::handle_farm_command;
pub use reading::handle_reading_command;
pub use sensor::handle_sensor_command;
