//! CSV cell loader.
//!
//! # CSV format
//!
//! One row per populated cell, header row first.  Only four columns are
//! read, by position; the rest are ignored.
//!
//! ```csv
//! x,y,lat,lon,population,station
//! 0,0,50.85,4.35,1204,0
//! 0,1,50.85,4.36,88,1
//! ```
//!
//! | Column | Meaning                                            |
//! |--------|----------------------------------------------------|
//! | 0      | grid `x` (u32)                                     |
//! | 1      | grid `y` (u32)                                     |
//! | 4      | raw population, stored as `ln(v + 1)` when `v > 0` |
//! | 5      | `1` marks an existing station (optional column)    |
//!
//! Station flags are honoured only when `mark_stops` is set; otherwise
//! stations are placed later by [`place_stops`](crate::place_stops).

use std::io::Read;
use std::path::Path;

use crate::{Region, RegionError, RegionResult};

const COL_X: usize = 0;
const COL_Y: usize = 1;
const COL_POPULATION: usize = 4;
const COL_STATION: usize = 5;

/// Load a region from a CSV file.  The point list comes back sorted
/// heaviest first.
pub fn load_region_csv(path: &Path, mark_stops: bool) -> RegionResult<Region> {
    let file = std::fs::File::open(path).map_err(RegionError::Io)?;
    load_region_reader(file, mark_stops)
}

/// Like [`load_region_csv`] but accepts any `Read` source.
pub fn load_region_reader<R: Read>(reader: R, mark_stops: bool) -> RegionResult<Region> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut region = Region::new();
    let mut stations = 0usize;

    for (row, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| RegionError::Parse(e.to_string()))?;

        let x = parse_coord(&record, COL_X, row)?;
        let y = parse_coord(&record, COL_Y, row)?;
        let raw = parse_population(&record, row)?;
        let weight = if raw > 0.0 { (raw + 1.0).ln() } else { raw };

        let id = region.put(x, y, weight);
        if mark_stops && record.get(COL_STATION) == Some("1") && region.mark_station(id) {
            stations += 1;
        }
    }

    region.sort_points_by_weight();
    log::info!(
        "loaded {} cells ({} stations) from csv",
        region.cell_count(),
        stations
    );
    Ok(region)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_coord(record: &csv::StringRecord, col: usize, row: usize) -> RegionResult<u32> {
    let field = record.get(col).unwrap_or("");
    field.parse::<u32>().map_err(|_| {
        RegionError::Parse(format!(
            "row {row}: column {col} must be a non-negative integer, got {field:?}"
        ))
    })
}

fn parse_population(record: &csv::StringRecord, row: usize) -> RegionResult<f64> {
    match record.get(COL_POPULATION) {
        None | Some("") => Ok(0.0),
        Some(field) => field.parse::<f64>().map_err(|_| {
            RegionError::Parse(format!("row {row}: invalid population {field:?}"))
        }),
    }
}
