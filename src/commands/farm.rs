//! # Farm Command Handler
//!
//! Handles farm creation, lookup, listing, and listing a farm's sensors.

use crate::{
    CreateFarmRequest, CreateFarmResponse, Farm, Sensor, cli_utils,
    commands::shared::{dispatch_command, parse_number_or_exit, validate_args_count_or_exit},
    http_utils,
};

const FARM_USAGE: &str = "Usage: farmctl farm <create|get|list|sensors> [args...]";

/// Handles all farm-related commands.
///
/// # Arguments
/// * `args` - Command arguments (first element is the subcommand)
/// * `client` - HTTP client for API communication
/// * `output_format` - Output format for get/list commands
pub async fn handle_farm_command(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    dispatch_command!("farm", FARM_USAGE, args, client, output_format, {
        "create" => handle_farm_create,
        "get" => handle_farm_get,
        "list" => handle_farm_list,
        "sensors" => handle_farm_sensors,
    });
}

async fn handle_farm_create(
    args: &[String],
    client: &http_utils::FarmClient,
    _output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        4,
        4,
        "create",
        r#"Usage: farmctl farm create <name> <location> <size>
Example: farmctl farm create Acme "Field A" 12.5"#,
    );

    let request = CreateFarmRequest {
        name: Some(args[1].clone()),
        location: Some(args[2].clone()),
        size: Some(parse_number_or_exit("size", &args[3])),
    };

    let response = http_utils::execute_or_exit(
        || client.post::<CreateFarmRequest, CreateFarmResponse>("farms", &request),
        "Failed to create farm",
    )
    .await;

    println!("Created farm: {}", response.farm_id);
}

async fn handle_farm_get(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(args, 2, 2, "get", "Usage: farmctl farm get <farm-id>");
    let path = format!("farms/{}", args[1]);

    let farm =
        http_utils::execute_or_exit(|| client.get::<Farm>(&path), "Failed to get farm").await;

    cli_utils::print_formatted_or_exit(&farm, output_format, "farm");
}

async fn handle_farm_list(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(args, 1, 1, "list", "Usage: farmctl farm list");

    let farms =
        http_utils::execute_or_exit(|| client.get::<Vec<Farm>>("farms"), "Failed to list farms")
            .await;

    if farms.is_empty() {
        println!("No farms found");
    } else {
        cli_utils::print_formatted_or_exit(&farms, output_format, "farms");
    }
}

async fn handle_farm_sensors(
    args: &[String],
    client: &http_utils::FarmClient,
    output_format: cli_utils::OutputFormat,
) {
    validate_args_count_or_exit(
        args,
        2,
        2,
        "sensors",
        "Usage: farmctl farm sensors <farm-id>",
    );
    let path = format!("farms/{}/sensors", args[1]);

    let sensors = http_utils::execute_or_exit(
        || client.get::<Vec<Sensor>>(&path),
        "Failed to list farm sensors",
    )
    .await;

    if sensors.is_empty() {
        println!("No sensors found for farm {}", args[1]);
    } else {
        cli_utils::print_formatted_or_exit(&sensors, output_format, "sensors");
    }
}
