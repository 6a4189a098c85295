use super::IoError;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// One generation's five-number energy summary, as written to the history CSV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergyHistoryRow {
    pub generation: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub fn write_history<W: Write>(writer: W, rows: &[EnergyHistoryRow]) -> Result<(), IoError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_history_to_path<P: AsRef<Path>>(
    path: P,
    rows: &[EnergyHistoryRow],
) -> Result<(), IoError> {
    let file = File::create(path)?;
    write_history(BufWriter::new(file), rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_has_header_and_one_row_per_generation() {
        let rows = [
            EnergyHistoryRow { generation: 0, min: 0.0, q1: 1.0, median: 2.0, q3: 2.5, max: 4.0 },
            EnergyHistoryRow { generation: 1, min: 1.0, q1: 1.5, median: 2.0, q3: 3.0, max: 5.0 },
        ];
        let mut buffer = Vec::new();
        write_history(&mut buffer, &rows).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "generation,min,q1,median,q3,max");
        assert_eq!(lines[1], "0,0.0,1.0,2.0,2.5,4.0");
        assert_eq!(lines.len(), 3);
    }
}
