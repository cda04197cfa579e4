use csv::{ReaderBuilder, Writer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io;
use tracing::{info, warn};

use super::config::ExportConfig;
use super::error::Error;
use common::{error::Error as AltPathsError, types::Route};

/// One row of a space-separated `id longitude latitude` coordinate file.
#[derive(Debug, Deserialize)]
struct CoordinateRecord {
    id: usize,
    longitude: f64,
    latitude: f64,
}

/// Geographic position of a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub long: f64,
}

/// One vertex of one exported route.
#[derive(Debug, Serialize, PartialEq)]
pub struct ExportRow {
    pub rank: usize,
    pub seq: usize,
    pub node: usize,
    pub lat: f64,
    pub long: f64,
}

pub fn load_coordinates<R: io::Read>(reader: R) -> Result<HashMap<usize, Coordinate>, Error> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b' ')
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut coordinates = HashMap::new();
    for result in rdr.deserialize() {
        let record: CoordinateRecord = result?;
        coordinates.insert(
            record.id,
            Coordinate {
                lat: record.latitude,
                long: record.longitude,
            },
        );
    }
    Ok(coordinates)
}

/// Flattens every found route into rows, shortest rank first.
///
/// Vertices without a known coordinate are skipped with a warning.
pub fn route_rows(
    ranked: &[Result<Route, AltPathsError>],
    coordinates: &HashMap<usize, Coordinate>,
) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for (i, entry) in ranked.iter().enumerate() {
        let Ok(Route::Found(path)) = entry else {
            continue;
        };

        for (seq, &node) in path.vertices.iter().enumerate() {
            match coordinates.get(&node) {
                Some(c) => rows.push(ExportRow {
                    rank: i + 1,
                    seq,
                    node,
                    lat: c.lat,
                    long: c.long,
                }),
                None => warn!(node, rank = i + 1, "no coordinate for vertex"),
            }
        }
    }

    rows
}

pub fn write_rows<W: io::Write>(writer: W, rows: &[ExportRow]) -> Result<(), Error> {
    let mut wtr = Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the coordinate export if a coordinate file is configured.
///
/// Returns the number of rows written, or `None` when export is disabled.
pub fn export_routes(
    config: &ExportConfig,
    ranked: &[Result<Route, AltPathsError>],
) -> Result<Option<usize>, Error> {
    let Some(coordinates_path) = &config.coordinates_path else {
        return Ok(None);
    };

    let coordinates = load_coordinates(File::open(coordinates_path)?)?;
    let rows = route_rows(ranked, &coordinates);
    write_rows(File::create(&config.output_path)?, &rows)?;

    info!(rows = rows.len(), path = %config.output_path, "routes exported");
    Ok(Some(rows.len()))
}
