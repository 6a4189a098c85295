use super::IoError;
use crate::core::lattice::LatticePoint;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

/// One leaderboard submission.
///
/// Rows are written without a header in the column order of the fields below. The
/// `coords` column holds a JSON array of `[x, y]` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardRecord {
    pub sequence_length: usize,
    pub player_name: String,
    pub score: u32,
    pub iterations: u64,
    pub coords: String,
    pub date: String,
}

impl LeaderboardRecord {
    /// `iterations` is the generation of the best score times the population size.
    pub fn new(
        player_name: impl Into<String>,
        score: u32,
        best_generation: usize,
        population_size: usize,
        coords: &[LatticePoint],
        date: impl Into<String>,
    ) -> Result<Self, IoError> {
        Ok(Self {
            sequence_length: coords.len(),
            player_name: player_name.into(),
            score,
            iterations: (best_generation as u64) * (population_size as u64),
            coords: encode_coords(coords)?,
            date: date.into(),
        })
    }

    pub fn decoded_coords(&self) -> Result<Vec<LatticePoint>, IoError> {
        decode_coords(&self.coords)
    }
}

pub fn encode_coords(coords: &[LatticePoint]) -> Result<String, IoError> {
    let pairs: Vec<[i32; 2]> = coords.iter().map(|p| [p.x, p.y]).collect();
    Ok(serde_json::to_string(&pairs)?)
}

pub fn decode_coords(json: &str) -> Result<Vec<LatticePoint>, IoError> {
    let pairs: Vec<[i32; 2]> = serde_json::from_str(json)?;
    Ok(pairs
        .into_iter()
        .map(|[x, y]| LatticePoint::new(x, y))
        .collect())
}

pub fn write_records<W: Write>(writer: W, records: &[LeaderboardRecord]) -> Result<(), IoError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_records<R: Read>(reader: R) -> Result<Vec<LeaderboardRecord>, IoError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(reader);
    csv_reader
        .deserialize()
        .map(|row| row.map_err(IoError::from))
        .collect()
}

/// Appends one record to the leaderboard file, creating it if needed.
pub fn append_record<P: AsRef<Path>>(path: P, record: &LeaderboardRecord) -> Result<(), IoError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    write_records(file, std::slice::from_ref(record))
}

pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<LeaderboardRecord>, IoError> {
    read_records(File::open(path)?)
}
