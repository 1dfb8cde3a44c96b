//! # Reading Command Handler

use crate::{
    AddReadingRequest, AddReadingResponse, cli_utils,
    commands::shared::{dispatch_command, parse_number_or_exit, validate_args_count_or_exit},
    http_utils,
};

const READING_USAGE: &str = "Usage: farmctl reading <add> [args...]";

/// Handles all reading-related commands.
pub async fn handle_reading_command(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("reading", READING_USAGE, args, client, output_format, {
        "add" => handle_reading_add,
    });
}

async fn handle_reading_add(
    args: &[String],
    client: &http_utils::FarmClient,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        5,
        5,
        "add",
        r#"Usage: farmctl reading add <sensor-id> <timestamp> <value> <unit>
Example: farmctl reading add 4c1e... 2023-10-27T10:00:00+00:00 23.4 %"#,
    );

    // The timestamp is sent verbatim; the server owns the format check.
    let request = AddReadingRequest {
        sensor_id: Some(args[1].clone()),
        timestamp: Some(args[2].clone()),
        value: Some(parse_number_or_exit("value", &args[3])),
        unit: Some(args[4].clone()),
    };

    let response = http_utils::execute_or_exit(
        || client.post::<AddReadingRequest, AddReadingResponse>("readings", &request),
        "Failed to add reading",
    )
    .await;

    println!("{}", response.message);
}
