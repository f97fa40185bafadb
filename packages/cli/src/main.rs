#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line front end for the charter quote pipeline.
//!
//! ```text
//! charter_quote quote --input form.json [--format text|json] [--output doc.json]
//! charter_quote route SBSP SBKP SBRJ
//! charter_quote metar SBGR
//! charter_quote aircraft
//! ```
//!
//! Station and METAR lookups use AVWX; set `AVWX_API_TOKEN` to
//! authenticate. Logging is controlled by `RUST_LOG`.

use std::path::PathBuf;
use std::sync::Arc;

use charter_quote_form::{DEFAULT_TARIFF_STORE_PATH, FormInput, TariffStore, TariffTable};
use charter_quote_geocoder::avwx::AvwxClient;
use charter_quote_geocoder::{GeoResolver, StationLookup};
use charter_quote_models::money::format_brl;
use charter_quote_models::{AirportCode, PricingResult, QuoteState};
use charter_quote_pipeline::{QuoteOutcome, QuotePipeline};
use charter_quote_route::measure;
use charter_quote_summary::{DocumentModel, ExportOutcome, JsonFileExporter, to_plain_text};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(
    name = "charter_quote",
    about = "Build charter flight quotes from airport codes and aircraft tariffs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a quote from a form JSON file and print the summary
    Quote {
        /// Form values as JSON
        #[arg(long)]
        input: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also export the document definition to this file
        #[arg(long)]
        output: Option<PathBuf>,
        /// Select this aircraft, pre-filling its tariff
        #[arg(long)]
        aircraft: Option<String>,
        /// Saved tariffs file
        #[arg(long, default_value = DEFAULT_TARIFF_STORE_PATH)]
        tariff_store: PathBuf,
    },
    /// Measure a route through two or more airports
    Route {
        /// Airport codes in flight order
        #[arg(required = true, num_args = 2..)]
        codes: Vec<String>,
    },
    /// Print the raw METAR for an airport
    Metar {
        /// Airport code
        code: String,
    },
    /// List default and saved aircraft tariffs
    Aircraft {
        /// Saved tariffs file
        #[arg(long, default_value = DEFAULT_TARIFF_STORE_PATH)]
        tariff_store: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
enum QuoteJson<'a> {
    Advisory(&'a str),
    Quote {
        state: &'a QuoteState,
        pricing: &'a PricingResult,
        document: &'a DocumentModel,
    },
}

fn resolver() -> Result<GeoResolver, Box<dyn std::error::Error>> {
    let client = AvwxClient::from_registry()?;
    Ok(GeoResolver::new(Arc::new(client) as Arc<dyn StationLookup>))
}

/// `--aircraft` is a fresh selection and takes the saved or default rate.
/// Without it the form's own aircraft only fills a tariff left empty.
fn apply_aircraft_choice(pipeline: &mut QuotePipeline, aircraft: Option<&str>) {
    match aircraft.map(str::trim).filter(|label| !label.is_empty()) {
        Some(label) => pipeline.select_aircraft(label),
        None => pipeline.sync_tariff(),
    }
}

async fn quote(
    input: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
    aircraft: Option<String>,
    tariff_store: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = tokio::fs::read_to_string(&input).await?;
    let form: FormInput = serde_json::from_str(&data)?;

    let mut pipeline = QuotePipeline::new(resolver()?, TariffTable::embedded())
        .with_store(TariffStore::load(tariff_store))
        .with_form(form);

    apply_aircraft_choice(&mut pipeline, aircraft.as_deref());

    let outcome = pipeline.recompute_pricing().await;

    match (&outcome, format) {
        (QuoteOutcome::Advisory(message), OutputFormat::Text) => println!("{message}"),
        (QuoteOutcome::Quote { document, .. }, OutputFormat::Text) => {
            print!("{}", to_plain_text(document));
        }
        (QuoteOutcome::Advisory(message), OutputFormat::Json) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&QuoteJson::Advisory(message))?
            );
        }
        (
            QuoteOutcome::Quote {
                state,
                pricing,
                document,
            },
            OutputFormat::Json,
        ) => {
            let json = QuoteJson::Quote {
                state,
                pricing,
                document,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    if let Some(path) = output {
        let exporter = JsonFileExporter::new(path);
        let report = pipeline.export(&exporter).await;
        match report.outcome {
            ExportOutcome::Exported => {
                log::info!("Exported quote to {}", exporter.path().display());
            }
            ExportOutcome::Replaced { cause } => {
                eprintln!("Export failed ({cause}); wrote an error document instead");
            }
            ExportOutcome::Failed { cause, .. } => {
                eprintln!("Export failed: {cause}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

async fn route(codes: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = resolver()?;
    let resolved = resolver.resolve_route(codes).await;

    for (code, point) in codes.iter().zip(&resolved) {
        let code = AirportCode::parse(code).map_or_else(|| code.clone(), |c| c.to_string());
        match point {
            Some(p) => println!("{code:<6} {:>9.4}, {:>9.4}", p.lat, p.lng),
            None => println!("{code:<6} not found"),
        }
    }

    let points: Vec<_> = resolved.into_iter().flatten().collect();
    let Some(measurement) = measure(&points) else {
        eprintln!("Fewer than two airports resolved; nothing to measure");
        std::process::exit(1);
    };

    println!();
    for (i, leg) in measurement.legs_km.iter().enumerate() {
        println!(
            "Leg {}: {leg:.1} km ({:.1} NM)",
            i + 1,
            charter_quote_route::km_to_nm(*leg)
        );
    }
    println!(
        "Total: {:.1} km ({:.1} NM)",
        measurement.total_km, measurement.total_nm
    );

    Ok(())
}

async fn metar(code: &str) -> Result<(), Box<dyn std::error::Error>> {
    let resolver = resolver()?;
    let Some(body) = resolver.metar(code).await else {
        eprintln!("No METAR available for {code}");
        std::process::exit(1);
    };
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

fn aircraft(tariff_store: PathBuf) {
    let table = TariffTable::embedded();
    let store = TariffStore::load(tariff_store);

    println!("{:<16} {:>14} {:>14}", "AIRCRAFT", "DEFAULT/KM", "SAVED/KM");
    println!("{}", "-".repeat(46));
    for entry in table.iter() {
        let saved = store
            .get(&entry.label)
            .map_or_else(|| "-".to_string(), format_brl);
        println!(
            "{:<16} {:>14} {:>14}",
            entry.label,
            format_brl(entry.tariff_per_km),
            saved
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    match cli.command {
        Commands::Quote {
            input,
            format,
            output,
            aircraft,
            tariff_store,
        } => quote(input, format, output, aircraft, tariff_store).await?,
        Commands::Route { codes } => route(&codes).await?,
        Commands::Metar { code } => metar(&code).await?,
        Commands::Aircraft { tariff_store } => aircraft(tariff_store),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quote_arguments() {
        let cli = Cli::try_parse_from([
            "charter_quote",
            "quote",
            "--input",
            "form.json",
            "--format",
            "json",
        ])
        .unwrap();

        let Commands::Quote {
            input,
            format,
            output,
            tariff_store,
            ..
        } = cli.command
        else {
            panic!("expected quote command");
        };
        assert_eq!(input, PathBuf::from("form.json"));
        assert_eq!(format, OutputFormat::Json);
        assert!(output.is_none());
        assert_eq!(tariff_store, PathBuf::from(DEFAULT_TARIFF_STORE_PATH));
    }

    #[test]
    fn route_requires_two_codes() {
        assert!(Cli::try_parse_from(["charter_quote", "route", "SBSP"]).is_err());
        assert!(Cli::try_parse_from(["charter_quote", "route", "SBSP", "SBRJ"]).is_ok());
    }

    fn session(form: serde_json::Value) -> QuotePipeline {
        let mut store =
            TariffStore::empty(std::env::temp_dir().join("charter_quote_cli_unused.json"));
        store.set("Phenom 100", 39.5);
        QuotePipeline::new(resolver().unwrap(), TariffTable::embedded())
            .with_store(store)
            .with_form(serde_json::from_value(form).unwrap())
    }

    #[test]
    fn form_tariff_survives_without_aircraft_flag() {
        let mut pipeline = session(serde_json::json!({ "aeronave": "Phenom 100", "tarifa": 50 }));

        apply_aircraft_choice(&mut pipeline, None);
        assert_eq!(pipeline.form().tariff.as_deref(), Some("50"));

        apply_aircraft_choice(&mut pipeline, Some("Phenom 100"));
        assert_eq!(pipeline.form().tariff.as_deref(), Some("39.5"));
    }

    #[test]
    fn empty_form_tariff_is_filled_from_aircraft() {
        let mut pipeline = session(serde_json::json!({ "aeronave": "Phenom 100", "tarifa": "" }));

        apply_aircraft_choice(&mut pipeline, Some("  "));

        assert_eq!(pipeline.form().aircraft.as_deref(), Some("Phenom 100"));
        assert_eq!(pipeline.form().tariff.as_deref(), Some("39.5"));
    }

    #[test]
    fn advisory_json_is_tagged() {
        let value = serde_json::to_value(QuoteJson::Advisory("no tariff")).unwrap();
        assert_eq!(value, serde_json::json!({ "advisory": "no tariff" }));
    }
}
