//! Estimate TDEE from a JSON form
//! Usage: cargo run --bin estimate_tdee -- [form.json|-] [client_id]
//!
//! Reads stdin when no path (or `-`) is given. Prints the calculation as JSON.

use std::io::Read;

use tracing_subscriber::EnvFilter;

use ptm::config::EstimatorDefaults;
use ptm::energy::TdeeForm;
use ptm::tools::tdee;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ptm=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let source = args.get(1).map(|s| s.as_str()).unwrap_or("-");
    let client_id = match args.get(2) {
        Some(raw) => Some(raw.parse::<i64>().map_err(|e| format!("Invalid client_id '{}': {}", raw, e))?),
        None => None,
    };

    let json = if source == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(source)?
    };

    let form: TdeeForm = serde_json::from_str(&json)?;
    let defaults = EstimatorDefaults::from_env();

    match tdee::calculate_tdee(&form, &defaults, client_id) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
