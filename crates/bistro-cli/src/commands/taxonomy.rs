use crate::commands::common::CliApp;
use crate::error::CliError;

pub async fn run_neighborhoods(app: &CliApp, as_json: bool) -> Result<(), CliError> {
    print_values(app.fetch_neighborhoods().await, as_json)
}

pub async fn run_cuisines(app: &CliApp, as_json: bool) -> Result<(), CliError> {
    print_values(app.fetch_cuisines().await, as_json)
}

fn print_values(values: Vec<String>, as_json: bool) -> Result<(), CliError> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&values)?);
    } else {
        for value in values {
            println!("{value}");
        }
    }
    Ok(())
}
