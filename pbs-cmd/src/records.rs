//! Dataset loading for the CLI commands.
//!
//! Loading is explicit per invocation; nothing is cached across calls.
//! A caller that wants a load-once cache owns it on its side of the
//! boundary, keyed by source file identity.

use log::info;
use pbs_core::precipitation::PrecipitationRecord;

/// Read and parse the precipitation dataset at `path`.
pub fn load_records(path: &str) -> anyhow::Result<Vec<PrecipitationRecord>> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {path}: {e}"))?;
    let records = PrecipitationRecord::parse_precipitation_csv(&data)?;
    info!("loaded {} precipitation records from {}", records.len(), path);
    Ok(records)
}

/// Load the dataset and keep only one sub-basin's records.
pub fn load_sub_basin_records(
    path: &str,
    sub_basin: &str,
) -> anyhow::Result<Vec<PrecipitationRecord>> {
    let records = load_records(path)?;
    let mut grouped = PrecipitationRecord::vector_to_hashmap(records);
    grouped.remove(sub_basin).ok_or_else(|| {
        anyhow::anyhow!("sub-basin '{sub_basin}' not found in {path}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV_FIXTURE: &str = "\
SUBCUENCA,year,month,precip_mm,HECTARES
Rio Polochic Alto,2023,1,212.4,52000
Rio Polochic Alto,2023,2,148.9,52000
Rio Cahabon,2023,1,187.3,38500
";

    #[test]
    fn test_load_sub_basin_records() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{CSV_FIXTURE}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let records = load_sub_basin_records(&path, "Rio Polochic Alto").unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.sub_basin == "Rio Polochic Alto"));
    }

    #[test]
    fn test_unknown_sub_basin_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{CSV_FIXTURE}").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let result = load_sub_basin_records(&path, "Rio Matanzas");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Rio Matanzas"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = load_records("/nonexistent/records.csv");
        assert!(result.is_err());
    }
}
