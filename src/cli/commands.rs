//! Execution of the parsed commands

use std::{io, path::Path};

use anyhow::{bail, ensure, Context, Result};
use tracing::{debug, info};

use crate::{
    batch::{convert_csv_file, BatchOptions},
    cli::args::{Cli, Commands, HistoryFormat},
    compose_dms_to_dd, compose_dms_to_dd_strict,
    config::Settings,
    format_dd,
    history::{ConversionKind, History},
    Hemisphere, Latitude, Longitude, Point, MAX_PRECISION,
};

/// Execute the parsed command
///
/// # Errors
/// Invalid input, settings or files.
pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        command,
        config,
        history,
        ..
    } = cli;

    let settings = Settings::load(config.as_deref()).context("Failed to load settings")?;
    debug!(?settings, "Using settings");

    match command {
        Commands::ToDd {
            lat,
            lon,
            precision,
        } => {
            let precision = checked_precision(precision, settings.dd_precision)?;
            let point = Point::parse(&lat, &lon)
                .with_context(|| format!("Cannot convert {lat:?}, {lon:?} to decimal degrees"))?;

            let lat_dd = point.lat().format_dd(precision);
            let lon_dd = point.lon().format_dd(precision);
            println!("Latitude (Y): {lat_dd}");
            println!("Longitude (X): {lon_dd}");

            let input = format!("Lat: {lat}\nLon: {lon}");
            let output = format!("Lat: {lat_dd}\nLon: {lon_dd}");
            record(history.as_deref(), &settings, ConversionKind::DmsToDd, input, output, point)
        }

        Commands::ToDms {
            lat,
            lon,
            precision,
        } => {
            let precision = checked_precision(precision, settings.dms_seconds_precision)?;
            let point = Point::from_degrees(lat, lon)
                .with_context(|| format!("Cannot convert {lat}, {lon} to DMS"))?;

            let lat_dms = format!("{:.*}", precision, point.lat());
            let lon_dms = format!("{:.*}", precision, point.lon());
            println!("Latitude (Y): {lat_dms}");
            println!("Longitude (X): {lon_dms}");

            let input = format!("Lat: {lat}\nLon: {lon}");
            let output = format!("Lat: {lat_dms}\nLon: {lon_dms}");
            record(history.as_deref(), &settings, ConversionKind::DdToDms, input, output, point)
        }

        Commands::Compose {
            degrees,
            minutes,
            seconds,
            hemisphere,
            strict,
            precision,
        } => {
            let precision = checked_precision(precision, settings.dd_precision)?;
            let compose = if strict {
                compose_dms_to_dd_strict
            } else {
                compose_dms_to_dd
            };
            let dd = compose(degrees, minutes, seconds, hemisphere).with_context(|| {
                format!("Cannot compose {degrees}° {minutes}' {seconds}\" {hemisphere}")
            })?;

            let input = format!("{degrees}° {minutes}' {seconds}\" {hemisphere}");
            let dd_text = format_dd(dd, precision);
            let (label, point) = if matches!(hemisphere, Hemisphere::North | Hemisphere::South) {
                let lat = Latitude::try_from(dd)?;
                ("Latitude (Y)", Point::new(lat, Longitude::prime()))
            } else {
                let lon = Longitude::try_from(dd)?;
                ("Longitude (X)", Point::new(Latitude::equator(), lon))
            };
            println!("{label}: {dd_text}");

            record(history.as_deref(), &settings, ConversionKind::DmsToDd, input, dd_text, point)
        }

        Commands::Batch {
            input,
            output,
            direction,
            lat_column,
            lon_column,
        } => {
            let options = BatchOptions::new(direction, lat_column, lon_column)
                .with_precision(settings.dd_precision, settings.dms_seconds_precision);
            let summary = convert_csv_file(&input, &output, &options)
                .with_context(|| format!("Failed to convert {}", input.display()))?;

            println!("Rows:      {}", summary.rows);
            println!("Converted: {}", summary.converted);
            println!("Skipped:   {}", summary.skipped);
            println!("Output:    {}", output.display());
            Ok(())
        }

        Commands::History {
            kind,
            format,
            remove,
            clear,
        } => {
            let Some(path) = history else {
                bail!("The history file is not given, use the --history option");
            };
            let mut history = History::load(&path, settings.history_capacity)
                .with_context(|| format!("Failed to load history from {}", path.display()))?;

            if let Some(id) = remove {
                let _ = history
                    .remove(id)
                    .with_context(|| format!("No record with id {id} in the history"))?;
                println!("Removed record {id}");
            } else if clear {
                history.clear();
                println!("History cleared");
            }

            if remove.is_some() || clear {
                history
                    .save(&path)
                    .with_context(|| format!("Failed to save history to {}", path.display()))?;
                return Ok(());
            }

            match format {
                HistoryFormat::Json => {
                    let records: Vec<_> = match kind {
                        Some(kind) => history.filter_by_kind(kind).collect(),
                        None => history.iter().collect(),
                    };
                    println!("{}", serde_json::to_string_pretty(&records)?);
                }
                HistoryFormat::Geojson => {
                    let geojson = history.to_geojson(kind);
                    println!("{}", serde_json::to_string_pretty(&geojson)?);
                }
                HistoryFormat::Csv => {
                    history.write_csv(io::stdout().lock(), kind)?;
                }
                HistoryFormat::Kml => {
                    println!("{}", history.to_kml(kind));
                }
            }
            Ok(())
        }
    }
}

fn checked_precision(requested: Option<usize>, default: usize) -> Result<usize> {
    let precision = requested.unwrap_or(default);
    ensure!(
        precision <= MAX_PRECISION,
        "Precision {precision} is above the maximum of {MAX_PRECISION} digits"
    );
    Ok(precision)
}

/// Append the conversion to the history file, if any
fn record(
    path: Option<&Path>,
    settings: &Settings,
    kind: ConversionKind,
    input: String,
    output: String,
    point: Point,
) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let mut history = History::load(path, settings.history_capacity)
        .with_context(|| format!("Failed to load history from {}", path.display()))?;
    let id = history.push(kind, input, output, point).id;
    history
        .save(path)
        .with_context(|| format!("Failed to save history to {}", path.display()))?;

    info!(id, %kind, "Conversion recorded");
    Ok(())
}
