//! Converting the coordinate columns of a CSV table

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use cordify_types::{CoordinateError, ParseDmsError};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    angle::{DEFAULT_DD_PRECISION, DEFAULT_SECONDS_PRECISION},
    coord::Point,
};

#[derive(Debug, Error)]
/// Failures of the batch conversion
pub enum BatchError {
    /// Malformed CSV or failure to write it
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The file cannot be opened or created
    #[error("File I/O error on {path:?}: {source}")]
    Io {
        /// The input or output file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// The mapped column is absent in the header
    #[error("Column {0:?} not found in the header")]
    MissingColumn(String),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
/// Which way the coordinates are converted
pub enum BatchDirection {
    /// Decimal degree columns into the `lat_dms` and `lon_dms` text columns
    DdToDms,
    /// Degree-Minute-Second text columns into the `lat_dd` and `lon_dd` columns
    DmsToDd,
}

impl BatchDirection {
    /// The names of the produced latitude and longitude columns
    pub const fn output_columns(self) -> (&'static str, &'static str) {
        match self {
            Self::DdToDms => ("lat_dms", "lon_dms"),
            Self::DmsToDd => ("lat_dd", "lon_dd"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// What to convert and how to print the result
pub struct BatchOptions {
    /// Conversion direction
    pub direction: BatchDirection,
    /// The header of the latitude column
    pub lat_column: String,
    /// The header of the longitude column
    pub lon_column: String,
    /// Fraction digits of the produced decimal degrees
    pub dd_precision: usize,
    /// Fraction digits of the produced arc seconds
    pub seconds_precision: usize,
}

impl BatchOptions {
    /// The options with the default precisions
    pub fn new(
        direction: BatchDirection,
        lat_column: impl Into<String>,
        lon_column: impl Into<String>,
    ) -> Self {
        Self {
            direction,
            lat_column: lat_column.into(),
            lon_column: lon_column.into(),
            dd_precision: DEFAULT_DD_PRECISION,
            seconds_precision: DEFAULT_SECONDS_PRECISION,
        }
    }

    /// Override the precisions
    #[must_use]
    pub fn with_precision(mut self, dd_precision: usize, seconds_precision: usize) -> Self {
        self.dd_precision = dd_precision;
        self.seconds_precision = seconds_precision;
        self
    }

    fn convert_pair(&self, lat: &str, lon: &str) -> Result<(String, String), CoordinateError> {
        match self.direction {
            BatchDirection::DdToDms => {
                let point = Point::from_degrees(parse_float(lat)?, parse_float(lon)?)?;
                let precision = self.seconds_precision;
                Ok((
                    format!("{:.*}", precision, point.lat()),
                    format!("{:.*}", precision, point.lon()),
                ))
            }
            BatchDirection::DmsToDd => {
                let point = Point::parse(lat, lon)?;
                Ok((
                    point.lat().format_dd(self.dd_precision),
                    point.lon().format_dd(self.dd_precision),
                ))
            }
        }
    }
}

fn parse_float(cell: &str) -> Result<f64, CoordinateError> {
    cell.trim()
        .parse()
        .map_err(|_| ParseDmsError::MalformedInput.into())
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
/// The outcome of the batch conversion
pub struct BatchSummary {
    /// Data rows read
    pub rows: usize,
    /// Rows with both coordinates converted
    pub converted: usize,
    /// Rows left with the blank output cells
    pub skipped: usize,
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, BatchError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| BatchError::MissingColumn(name.to_string()))
}

/// Find the existing column or register a new one at the end
fn output_index(headers: &mut Vec<String>, name: &str) -> usize {
    if let Some(i) = headers.iter().position(|h| h == name) {
        return i;
    }
    headers.push(name.to_string());
    headers.len() - 1
}

/// Convert the coordinates of every row of the CSV table.
///
/// Every input column is kept and the two output columns are added
/// (or overwritten, if the table already has them).
/// A row with any of the coordinates failed to convert
/// gets both output cells blank.
///
/// # Errors
/// - the mapped column is not found in the header;
/// - malformed CSV or write failure.
pub fn convert_csv<R: io::Read, W: io::Write>(
    reader: R,
    writer: W,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);
    let mut csv_writer = csv::Writer::from_writer(writer);

    let input_headers = csv_reader.headers()?.clone();
    let lat_index = column_index(&input_headers, &options.lat_column)?;
    let lon_index = column_index(&input_headers, &options.lon_column)?;

    let mut headers: Vec<String> = input_headers.iter().map(str::to_string).collect();
    let (lat_name, lon_name) = options.direction.output_columns();
    let lat_out = output_index(&mut headers, lat_name);
    let lon_out = output_index(&mut headers, lon_name);
    csv_writer.write_record(&headers)?;

    let mut summary = BatchSummary::default();
    for (row, record) in csv_reader.records().enumerate() {
        let record = record?;
        summary.rows += 1;

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());

        let lat = record.get(lat_index).unwrap_or_default();
        let lon = record.get(lon_index).unwrap_or_default();
        let (lat_cell, lon_cell) = match options.convert_pair(lat, lon) {
            Ok(converted) => {
                summary.converted += 1;
                converted
            }
            Err(err) => {
                debug!(row = row + 1, %err, "Skipping row");
                summary.skipped += 1;
                (String::new(), String::new())
            }
        };
        cells[lat_out] = lat_cell;
        cells[lon_out] = lon_cell;

        csv_writer.write_record(&cells)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    info!(
        rows = summary.rows,
        converted = summary.converted,
        skipped = summary.skipped,
        "Batch conversion finished"
    );
    Ok(summary)
}

/// Same as [`convert_csv`] for the files
///
/// # Errors
/// See [`convert_csv`]; also the files cannot be opened or created.
pub fn convert_csv_file(
    input: &Path,
    output: &Path,
    options: &BatchOptions,
) -> Result<BatchSummary, BatchError> {
    let reader = File::open(input).map_err(|source| BatchError::Io {
        path: input.to_owned(),
        source,
    })?;
    let writer = File::create(output).map_err(|source| BatchError::Io {
        path: output.to_owned(),
        source,
    })?;

    debug!(?input, ?output, direction = ?options.direction, "Converting CSV file");
    convert_csv(io::BufReader::new(reader), io::BufWriter::new(writer), options)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(input: &str, options: &BatchOptions) -> (String, BatchSummary) {
        let mut out = Vec::new();
        let summary = convert_csv(input.as_bytes(), &mut out, options).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn dd_to_dms() {
        let options = BatchOptions::new(BatchDirection::DdToDms, "lat", "lon");
        let (out, summary) = run("name,lat,lon\nSydney,-33.75,151.5\n", &options);

        assert_eq!(
            out,
            "name,lat,lon,lat_dms,lon_dms\n\
             Sydney,-33.75,151.5,\"33° 45' 0\"\" S\",\"151° 30' 0\"\" E\"\n"
        );
        assert_eq!(
            summary,
            BatchSummary {
                rows: 1,
                converted: 1,
                skipped: 0
            }
        );
    }

    #[test]
    fn dms_to_dd() {
        let options = BatchOptions::new(BatchDirection::DmsToDd, "Lat", "Lon");
        let input = "Lat,Lon\n\"40°26'46\"\"N\",\"79°58'56\"\"W\"\n";
        let (out, summary) = run(input, &options);

        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("Lat,Lon,lat_dd,lon_dd"));
        assert!(lines.next().unwrap().ends_with(",40.446111,-79.982222"));
        assert_eq!(summary.converted, 1);
    }

    #[test]
    fn precision() {
        let options =
            BatchOptions::new(BatchDirection::DmsToDd, "lat", "lon").with_precision(2, 0);
        let (out, _) = run("lat,lon\n10 30,20 15\n", &options);
        assert_eq!(out, "lat,lon,lat_dd,lon_dd\n10 30,20 15,10.50,20.25\n");
    }

    #[test]
    fn invalid_rows_are_blank() {
        let options = BatchOptions::new(BatchDirection::DdToDms, "lat", "lon");
        let input = "lat,lon\n91,0\nabc,10\n,\n1,2\n";
        let (out, summary) = run(input, &options);

        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[1], "91,0,,");
        assert_eq!(lines[2], "abc,10,,");
        assert_eq!(lines[3], ",,,");
        assert!(!lines[4].ends_with(",,"));
        assert_eq!(
            summary,
            BatchSummary {
                rows: 4,
                converted: 1,
                skipped: 3
            }
        );
    }

    #[test]
    fn out_of_range_longitude_skips_the_row() {
        let options = BatchOptions::new(BatchDirection::DmsToDd, "lat", "lon");
        let (out, summary) = run("lat,lon\n10 N,181 E\n", &options);
        assert_eq!(out, "lat,lon,lat_dd,lon_dd\n10 N,181 E,,\n");
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn existing_output_column_is_overwritten() {
        let options = BatchOptions::new(BatchDirection::DmsToDd, "lat", "lon");
        let (out, _) = run("lat_dd,lat,lon\nold,10,20\n", &options);
        assert_eq!(
            out,
            "lat_dd,lat,lon,lon_dd\n10.000000,10,20,20.000000\n"
        );
    }

    #[test]
    fn short_rows_are_padded() {
        let options = BatchOptions::new(BatchDirection::DdToDms, "lat", "lon");
        let (out, summary) = run("lat,lon,note\n1,2\n", &options);
        assert_eq!(
            out.lines().nth(1),
            Some("1,2,,\"1° 0' 0\"\" N\",\"2° 0' 0\"\" E\"")
        );
        assert_eq!(summary.converted, 1);
    }

    #[test]
    fn missing_column() {
        let options = BatchOptions::new(BatchDirection::DdToDms, "latitude", "lon");
        let err = convert_csv("lat,lon\n1,2\n".as_bytes(), Vec::new(), &options).unwrap_err();
        assert!(matches!(err, BatchError::MissingColumn(name) if name == "latitude"));
    }

    #[test]
    fn empty_table() {
        let options = BatchOptions::new(BatchDirection::DdToDms, "lat", "lon");
        let (out, summary) = run("lat,lon\n", &options);
        assert_eq!(out, "lat,lon,lat_dms,lon_dms\n");
        assert_eq!(summary, BatchSummary::default());
    }
}
