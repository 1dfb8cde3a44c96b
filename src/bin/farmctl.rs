use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use digifarm::{
    cli_utils::{self, OutputFormat},
    commands::{handle_farm_command, handle_reading_command, handle_sensor_command},
    http_utils,
};

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the digifarm API server")]
    base_url: String,
    #[arrrg(
        optional,
        "Output format for get/list commands: json or yaml (default: json)"
    )]
    output: String,
}

const USAGE: &str = r#"Usage: farmctl [options] <command> [args...]

Options:
  --base-url <url>     Base URL of the digifarm API server (default: http://localhost:8080)
  --output <format>    Output format for get/list commands: json or yaml (default: json)

Commands:
  farm create <name> <location> <size>               Create a farm
  farm get <farm-id>                                 Get a farm by ID
  farm list                                          List all farms
  farm sensors <farm-id>                             List the sensors of a farm
  sensor register <farm-id> <sensor-type> <location> Register a sensor on a farm
  sensor get <sensor-id>                             Get a sensor by ID
  sensor readings <sensor-id>                        List the readings of a sensor
  reading add <sensor-id> <timestamp> <value> <unit> Add a reading"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (options, free) = Options::from_command_line_relaxed("USAGE: farmctl <command> [args...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("No command specified", USAGE);
    }

    let base_url = if options.base_url.is_empty() {
        "http://localhost:8080".to_string()
    } else {
        options.base_url
    };

    let output_format: OutputFormat = options
        .output
        .parse()
        .unwrap_or_else(|e: String| cli_utils::exit_with_usage_error(&e, USAGE));

    let client = http_utils::FarmClient::new(base_url);

    match free[0].as_str() {
        "farm" => {
            handle_farm_command(&free[1..], &client, output_format).await;
        }
        "sensor" => {
            handle_sensor_command(&free[1..], &client, output_format).await;
        }
        "reading" => {
            handle_reading_command(&free[1..], &client, output_format).await;
        }
        _ => {
            cli_utils::exit_with_error(&format!(
                "Unknown command '{}'. Available commands: farm, sensor, reading",
                free[0]
            ));
        }
    }

    Ok(())
}
