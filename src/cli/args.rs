//! Command line arguments

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::{batch::BatchDirection, history::ConversionKind, Hemisphere};

/// Convert coordinates between decimal degrees and degrees-minutes-seconds
#[derive(Debug, Parser)]
#[command(name = "cordify")]
#[command(version)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON file to record the conversions into
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,
}

/// The subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert DMS strings into decimal degrees
    ToDd {
        /// Latitude, e.g. 40°26'46"N
        #[arg(allow_hyphen_values = true)]
        lat: String,

        /// Longitude, e.g. 79°58'56"W
        #[arg(allow_hyphen_values = true)]
        lon: String,

        /// Fraction digits [default: from settings]
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Convert decimal degrees into DMS strings
    ToDms {
        /// Latitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,

        /// Arc seconds fraction digits [default: from settings]
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Combine separate degrees, minutes and seconds into decimal degrees
    Compose {
        /// Degrees
        #[arg(allow_hyphen_values = true)]
        degrees: f64,

        /// Arc minutes
        #[arg(default_value = "0")]
        minutes: f64,

        /// Arc seconds
        #[arg(default_value = "0")]
        seconds: f64,

        /// Hemisphere letter (N, S, E, W)
        #[arg(short = 'H', long, default_value = "N")]
        hemisphere: Hemisphere,

        /// Reject negative degrees
        #[arg(long)]
        strict: bool,

        /// Fraction digits [default: from settings]
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Convert the coordinate columns of a CSV file
    Batch {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file
        #[arg(short, long)]
        output: PathBuf,

        /// Conversion direction
        #[arg(short, long, value_enum)]
        direction: BatchDirection,

        /// Header of the latitude column
        #[arg(long, default_value = "lat")]
        lat_column: String,

        /// Header of the longitude column
        #[arg(long, default_value = "lon")]
        lon_column: String,
    },

    /// Print or edit the recorded conversions
    History {
        /// Show only the conversions of this direction
        #[arg(long, value_enum)]
        kind: Option<ConversionKind>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: HistoryFormat,

        /// Delete the record with this id instead of printing
        #[arg(long, value_name = "ID", conflicts_with = "clear")]
        remove: Option<u64>,

        /// Delete all the records instead of printing
        #[arg(long)]
        clear: bool,
    },
}

/// How to print the history
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    /// Array of records
    Json,
    /// `FeatureCollection` of points
    Geojson,
    /// Table with the number, type, input, result and date
    Csv,
    /// KML document of placemarks
    Kml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_decimal_degrees() {
        let cli = Cli::parse_from(["cordify", "to-dms", "-33.75", "-151.5", "-p", "1"]);
        match cli.command {
            Commands::ToDms {
                lat,
                lon,
                precision,
            } => {
                assert!((lat + 33.75).abs() < f64::EPSILON);
                assert!((lon + 151.5).abs() < f64::EPSILON);
                assert_eq!(precision, Some(1));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn dms_strings() {
        let cli = Cli::parse_from(["cordify", "-v", "to-dd", "40 26 46 N", "-79 58 56"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::ToDd { lat, lon, precision } => {
                assert_eq!(lat, "40 26 46 N");
                assert_eq!(lon, "-79 58 56");
                assert_eq!(precision, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn compose_with_hemisphere() {
        let cli = Cli::parse_from(["cordify", "compose", "10", "30", "0", "-H", "s"]);
        match cli.command {
            Commands::Compose {
                degrees,
                hemisphere,
                strict,
                ..
            } => {
                assert!((degrees - 10.0).abs() < f64::EPSILON);
                assert_eq!(hemisphere, Hemisphere::South);
                assert!(!strict);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn batch_direction() {
        let cli = Cli::parse_from([
            "cordify", "batch", "-i", "in.csv", "-o", "out.csv", "-d", "dms-to-dd",
        ]);
        match cli.command {
            Commands::Batch {
                direction,
                lat_column,
                ..
            } => {
                assert_eq!(direction, BatchDirection::DmsToDd);
                assert_eq!(lat_column, "lat");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn history_filter() {
        let cli = Cli::parse_from([
            "cordify",
            "--history",
            "h.json",
            "history",
            "--kind",
            "dd-to-dms",
            "-f",
            "geojson",
        ]);
        assert_eq!(cli.history, Some(PathBuf::from("h.json")));
        match cli.command {
            Commands::History {
                kind,
                format,
                remove,
                clear,
            } => {
                assert_eq!(kind, Some(ConversionKind::DdToDms));
                assert_eq!(format, HistoryFormat::Geojson);
                assert_eq!(remove, None);
                assert!(!clear);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn history_editing() {
        let cli = Cli::parse_from(["cordify", "history", "--remove", "7"]);
        match cli.command {
            Commands::History { remove, clear, .. } => {
                assert_eq!(remove, Some(7));
                assert!(!clear);
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::parse_from(["cordify", "history", "--clear", "-f", "kml"]);
        match cli.command {
            Commands::History { format, clear, .. } => {
                assert_eq!(format, HistoryFormat::Kml);
                assert!(clear);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["cordify", "history", "--remove", "1", "--clear"]).is_err());
    }

    #[test]
    fn unknown_hemisphere() {
        assert!(Cli::try_parse_from(["cordify", "compose", "10", "-H", "X"]).is_err());
    }
}
