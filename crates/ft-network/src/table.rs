//! The finalized element table and its CSV loader.
//!
//! # CSV format
//!
//! One row per network element, sorted by `(road, km)` with dense ids:
//!
//! ```csv
//! id,road,km,model_type,name,length,condition,lat,lon,intersec_to
//! 0,N1,0.0,sourcesink,N1 start,0,,23.70,90.40,
//! 1,N1,2.5,bridge,Kanchpur (R,300,C,23.70,90.42,
//! 2,N1,2.5,bridge,Kanchpur (L,300,C,23.70,90.42,
//! 3,N1,9.1,intersection,N1/N2,0,,23.71,90.48,N2
//! 4,N1,25.0,sourcesink,N1 end,0,,23.72,90.60,
//! ```
//!
//! **`condition`** is empty (or `null`) for everything except bridges.
//! **`intersec_to`** names the crossing road and is only set on
//! intersection-flagged rows.
//!
//! The loader parses and type-tags the rows; it does not sort or deduplicate.
//! The `(road, km)` ordering and id density are contractual inputs — density
//! is verified at graph/registry build, ordering is not repaired.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ft_core::{BridgeCondition, ElementId, GeoPoint};

use crate::{NetworkError, NetworkResult};

// ── Element type tag ──────────────────────────────────────────────────────────

/// The behavioral class of a table row.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ElementType {
    Source,
    Sink,
    SourceSink,
    Bridge,
    Link,
    Intersection,
}

impl ElementType {
    /// Parse the `model_type` column.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "source" => Some(ElementType::Source),
            "sink" => Some(ElementType::Sink),
            "sourcesink" => Some(ElementType::SourceSink),
            "bridge" => Some(ElementType::Bridge),
            "link" => Some(ElementType::Link),
            "intersection" => Some(ElementType::Intersection),
            _ => None,
        }
    }

    /// `true` for rows that can generate vehicles.
    #[inline]
    pub fn generates(self) -> bool {
        matches!(self, ElementType::Source | ElementType::SourceSink)
    }

    /// `true` for rows that can remove vehicles.
    #[inline]
    pub fn removes(self) -> bool {
        matches!(self, ElementType::Sink | ElementType::SourceSink)
    }
}

// ── ElementRecord ─────────────────────────────────────────────────────────────

/// One parsed row of the finalized element table.
#[derive(Clone, Debug)]
pub struct ElementRecord {
    pub id: ElementId,
    pub road: String,
    /// Chainage along the road, in kilometres.
    pub km: f64,
    pub element_type: ElementType,
    pub name: String,
    /// Physical length in metres (0 for point elements).
    pub length_m: f64,
    /// Rated condition; `None` for non-bridge rows.
    pub condition: Option<BridgeCondition>,
    pub pos: GeoPoint,
    /// Road crossed here; only set on intersection rows.
    pub intersects_road: Option<String>,
}

// ── CSV loading ───────────────────────────────────────────────────────────────

/// The raw CSV row shape; converted to [`ElementRecord`] after parsing.
#[derive(Deserialize)]
struct RawRecord {
    id: u32,
    road: String,
    km: f64,
    model_type: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    length: Option<f64>,
    #[serde(default)]
    condition: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    intersec_to: String,
}

/// Load the element table from a CSV file.
pub fn load_table_csv(path: &Path) -> NetworkResult<Vec<ElementRecord>> {
    let file = std::fs::File::open(path).map_err(NetworkError::Io)?;
    load_table_reader(file)
}

/// Like [`load_table_csv`] but accepts any `Read` source.
///
/// Useful for testing and for demo binaries that embed their table as a
/// string constant (pass a `std::io::Cursor`).
pub fn load_table_reader<R: Read>(reader: R) -> NetworkResult<Vec<ElementRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (row, result) in csv_reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.map_err(|e| NetworkError::Parse(format!("row {row}: {e}")))?;
        records.push(convert(row, raw)?);
    }

    Ok(records)
}

fn convert(row: usize, raw: RawRecord) -> NetworkResult<ElementRecord> {
    let element_type = ElementType::parse(&raw.model_type).ok_or_else(|| {
        NetworkError::Parse(format!(
            "row {row}: unknown model_type {:?}",
            raw.model_type
        ))
    })?;

    let condition = match raw.condition.trim() {
        "" | "null" | "NaN" => None,
        label => Some(BridgeCondition::parse(label).ok_or_else(|| {
            NetworkError::Parse(format!("row {row}: unknown condition {label:?}"))
        })?),
    };

    let intersects_road = match raw.intersec_to.trim() {
        "" => None,
        target => Some(target.to_owned()),
    };

    Ok(ElementRecord {
        id: ElementId(raw.id),
        road: raw.road,
        km: raw.km,
        element_type,
        name: raw.name.trim().to_owned(),
        length_m: raw.length.unwrap_or(0.0),
        condition,
        pos: GeoPoint::new(raw.lat, raw.lon),
        intersects_road,
    })
}

// ── Table helpers ─────────────────────────────────────────────────────────────

/// Verify that record ids are dense and contiguous from 0.
///
/// The graph and the registry both index by `id`, so a gap would silently
/// shift every later element — fail loudly instead.
pub fn check_contiguous_ids(records: &[ElementRecord]) -> Result<(), crate::BuildError> {
    for (row, record) in records.iter().enumerate() {
        if record.id.index() != row {
            return Err(crate::BuildError::NonContiguousIds {
                row,
                found: record.id.0,
                expected: row as u32,
            });
        }
    }
    Ok(())
}

/// Iterate over `(start, end)` index ranges of consecutive same-road runs.
///
/// The table contract (sorted by road, then chainage) means each road's rows
/// are a contiguous slice.
pub(crate) fn road_runs(records: &[ElementRecord]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=records.len() {
        if i == records.len() || records[i].road != records[start].road {
            runs.push((start, i));
            start = i;
        }
    }
    runs
}
