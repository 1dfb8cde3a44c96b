//! # Sensor Command Handler
//!
//! Handles sensor registration, lookup, and listing a sensor's readings.

use crate::{
    Reading, RegisterSensorRequest, RegisterSensorResponse, Sensor, cli_utils,
    commands::shared::{dispatch_command, validate_args_count_or_exit},
    http_utils,
};

const SENSOR_USAGE: &str = "Usage: farmctl sensor <register|get|readings> [args...]";

/// Handles all sensor-related commands.
pub async fn handle_sensor_command(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("sensor", SENSOR_USAGE, args, client, output_format, {
        "register" => handle_sensor_register,
        "get" => handle_sensor_get,
        "readings" => handle_sensor_readings,
    });
}

async fn handle_sensor_register(
    args: &[String],
    client: &http_utils::FarmClient,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        4,
        4,
        "register",
        r#"Usage: farmctl sensor register <farm-id> <sensor-type> <location>
Example: farmctl sensor register 0b6f... soil-moisture "Row 3""#,
    );

    let request = RegisterSensorRequest {
        farm_id: Some(args[1].clone()),
        sensor_type: Some(args[2].clone()),
        location: Some(args[3].clone()),
    };

    let response = http_utils::execute_or_exit(
        || client.post::<RegisterSensorRequest, RegisterSensorResponse>("sensors", &request),
        "Failed to register sensor",
    )
    .await;

    println!("Registered sensor: {}", response.sensor_id);
}

async fn handle_sensor_get(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: farmctl sensor get <sensor-id>");
    let path = format!("sensors/{}", args[1]);

    let sensor =
        http_utils::execute_or_exit(|| client.get::<Sensor>(&path), "Failed to get sensor").await;

    cli_utils::print_formatted_or_exit(&sensor, output_format, "sensor");
}

async fn handle_sensor_readings(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "readings",
        "Usage: farmctl sensor readings <sensor-id>",
    );
    let path = format!("sensors/{}/readings", args[1]);

    let readings = http_utils::execute_or_exit(
        || client.get::<Vec<Reading>>(&path),
        "Failed to list readings",
    )
    .await;

    if readings.is_empty() {
        println!("No readings found for sensor {}", args[1]);
    } else {
        cli_utils::print_formatted_or_exit(&readings, output_format, "readings");
    }
}
