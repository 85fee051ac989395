//! The bounded log of performed conversions, newest first

use std::{
    collections::VecDeque,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::coord::Point;

/// How many records are kept unless configured otherwise
pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Error)]
/// Failures of reading or writing the history file
pub enum HistoryError {
    /// The file cannot be read or written
    #[error("History file {path:?}: {source}")]
    Io {
        /// The history file
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },

    /// The content is not a valid history
    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The CSV export failed
    #[error("History CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The largest stored id leaves no room for the next one
    #[error("History id {0} is the last possible one, no more records can be added")]
    IdOverflow(u64),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
/// The direction of a single conversion
pub enum ConversionKind {
    /// Degree-Minute-Second text into the decimal degrees
    #[serde(rename = "DMS→DD")]
    DmsToDd,
    /// Decimal degrees into the Degree-Minute-Second text
    #[serde(rename = "DD→DMS")]
    DdToDms,
}

impl fmt::Display for ConversionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DmsToDd => "DMS→DD",
            Self::DdToDms => "DD→DMS",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single performed conversion
pub struct ConversionRecord {
    /// Sequential number, unique within the history
    pub id: u64,
    /// When the conversion was done
    #[serde(rename = "ts")]
    pub timestamp: DateTime<Utc>,
    /// The direction
    #[serde(rename = "type")]
    pub kind: ConversionKind,
    /// What the user entered
    pub input: String,
    /// What was produced
    pub output: String,
    /// The converted location
    pub point: Point,
}

impl ConversionRecord {
    fn to_feature(&self) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": self.point.lon_lat(),
            },
            "properties": {
                "id": self.id,
                "ts": self.timestamp,
                "type": self.kind,
                "input": self.input,
                "output": self.output,
            },
        })
    }

    fn to_placemark(&self) -> String {
        let [lon, lat] = self.point.lon_lat();
        format!(
            "<Placemark><name>{}</name><description><![CDATA[{}<br/>{}]]></description>\
             <Point><coordinates>{lon},{lat},0</coordinates></Point></Placemark>",
            escape_xml(&self.input),
            self.output.replace("]]>", "]] >"),
            self.timestamp.to_rfc3339(),
        )
    }
}

fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug, Clone)]
/// The list of the conversions, newest first.
///
/// When the capacity is reached, the oldest record is dropped.
/// The ids are never reused, even after [`remove`](#method.remove)
/// or [`clear`](#method.clear).
pub struct History {
    capacity: usize,
    next_id: u64,
    records: VecDeque<ConversionRecord>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl History {
    /// Create an empty history holding at most `capacity` (but at least one) records
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            next_id: 1,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// The maximum number of the kept records
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append the conversion done right now
    pub fn push(
        &mut self,
        kind: ConversionKind,
        input: impl Into<String>,
        output: impl Into<String>,
        point: Point,
    ) -> &ConversionRecord {
        self.push_at(Utc::now(), kind, input.into(), output.into(), point)
    }

    fn push_at(
        &mut self,
        timestamp: DateTime<Utc>,
        kind: ConversionKind,
        input: String,
        output: String,
        point: Point,
    ) -> &ConversionRecord {
        let record = ConversionRecord {
            id: self.next_id,
            timestamp,
            kind,
            input,
            output,
            point,
        };
        self.next_id = self.next_id.saturating_add(1);
        debug!(id = record.id, %kind, "Recording conversion");

        self.records.push_front(record);
        if self.records.len() > self.capacity {
            let dropped = self.records.pop_back();
            if let Some(dropped) = dropped {
                debug!(id = dropped.id, "History is full, dropping the oldest record");
            }
        }

        &self.records[0]
    }

    /// Iterate the records starting from the newest one
    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.records.iter()
    }

    /// The records of the given direction, newest first
    pub fn filter_by_kind(&self, kind: ConversionKind) -> impl Iterator<Item = &ConversionRecord> {
        self.iter().filter(move |r| r.kind == kind)
    }

    /// Find the record by its id
    pub fn get(&self, id: u64) -> Option<&ConversionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Delete the record by its id, returning it if it was there
    pub fn remove(&mut self, id: u64) -> Option<ConversionRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(index);
        debug!(id, "Removed history record");
        removed
    }

    /// Delete all the records
    pub fn clear(&mut self) {
        debug!(records = self.len(), "Clearing history");
        self.records.clear();
    }

    /// The number of the kept records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was recorded yet
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize the records (newest first) as a JSON array
    ///
    /// # Errors
    /// Serialization failure.
    pub fn to_json(&self) -> Result<String, HistoryError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    /// Restore the history from the JSON array produced by [`to_json`](#method.to_json).
    /// The records above the `capacity` are dropped starting from the oldest.
    ///
    /// # Errors
    /// - the text is not a valid JSON array of records;
    /// - some record has the id `u64::MAX`, so the next one cannot be numbered.
    pub fn from_json(json: &str, capacity: usize) -> Result<Self, HistoryError> {
        let mut records: Vec<ConversionRecord> = serde_json::from_str(json)?;
        records.sort_by(|a, b| b.id.cmp(&a.id));

        let mut history = Self::new(capacity);
        history.next_id = match records.first() {
            Some(newest) => newest
                .id
                .checked_add(1)
                .ok_or(HistoryError::IdOverflow(newest.id))?,
            None => 1,
        };
        records.truncate(history.capacity);
        history.records = records.into();
        Ok(history)
    }

    /// The records as a GeoJSON `FeatureCollection` of points.
    /// The records are filtered by the `kind` if it is given.
    pub fn to_geojson(&self, kind: Option<ConversionKind>) -> Value {
        let features: Vec<_> = self
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .map(ConversionRecord::to_feature)
            .collect();

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }

    /// The records as a KML document of placemarks named by the input.
    /// The records are filtered by the `kind` if it is given.
    pub fn to_kml(&self, kind: Option<ConversionKind>) -> String {
        let mut kml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document><name>Cordify Export</name>",
        );

        let placemarks: Vec<_> = self
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind == k))
            .map(ConversionRecord::to_placemark)
            .collect();
        kml.push_str(&placemarks.join("\n"));
        kml.push_str("</Document></kml>");
        kml
    }

    /// Write the records as a CSV table with the columns
    /// `#`, `Type`, `Input`, `Result`, `Date`.
    /// The records are filtered by the `kind` if it is given.
    ///
    /// # Errors
    /// Failed to write into the `writer`.
    pub fn write_csv<W: io::Write>(
        &self,
        writer: W,
        kind: Option<ConversionKind>,
    ) -> Result<(), HistoryError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["#", "Type", "Input", "Result", "Date"])?;

        let records = self
            .iter()
            .filter(|r| kind.map_or(true, |k| r.kind == k));
        for (i, record) in records.enumerate() {
            csv_writer.write_record([
                (i + 1).to_string(),
                record.kind.to_string(),
                record.input.clone(),
                record.output.clone(),
                record.timestamp.to_rfc3339(),
            ])?;
        }

        csv_writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    /// Read the history file. The missing file gives the empty history.
    ///
    /// # Errors
    /// The file cannot be read or has invalid content.
    pub fn load(path: &Path, capacity: usize) -> Result<Self, HistoryError> {
        if !path.exists() {
            debug!(?path, "No history file yet");
            return Ok(Self::new(capacity));
        }

        let content = fs::read_to_string(path).map_err(|source| HistoryError::Io {
            path: path.to_owned(),
            source,
        })?;
        let history = Self::from_json(&content, capacity)?;
        info!(?path, records = history.len(), "Loaded history");
        Ok(history)
    }

    /// Write the history file
    ///
    /// # Errors
    /// The file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), HistoryError> {
        let content = self.to_json()?;
        fs::write(path, content).map_err(|source| HistoryError::Io {
            path: path.to_owned(),
            source,
        })?;
        debug!(?path, records = self.len(), "Saved history");
        Ok(())
    }
}
