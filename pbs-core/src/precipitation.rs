use crate::error::BasinError;
use crate::month::month_start;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Expected number of columns in a precipitation dataset row.
pub const CSV_ROW_LENGTH: usize = 5;

/// One monthly precipitation observation for a sub-basin.
///
/// Rows come from the basin precipitation CSV with columns
/// `SUBCUENCA,year,month,precip_mm,HECTARES`. At most one record exists
/// per (sub_basin, year, month); records are immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationRecord {
    /// Name of the sub-basin the observation belongs to
    pub sub_basin: String,
    /// Calendar year of the observation
    pub year: i32,
    /// Calendar month of the observation (1-12)
    pub month: u32,
    /// Accumulated precipitation over the month in millimeters
    pub precipitation_mm: f64,
    /// Catchment area of the sub-basin in hectares
    pub area_hectares: f64,
}

impl PrecipitationRecord {
    /// First-of-month date for this record, `None` if the month is out of range.
    pub fn date(&self) -> Option<NaiveDate> {
        month_start(self.year, self.month)
    }

    /// Parse a precipitation dataset CSV string into records.
    ///
    /// Malformed rows and duplicate (sub_basin, year, month) pairs are an
    /// error; no row is silently dropped.
    pub fn parse_precipitation_csv(csv_object: &str) -> Result<Vec<PrecipitationRecord>, BasinError> {
        let mut records: Vec<PrecipitationRecord> = Vec::new();
        let mut seen: HashSet<(String, i32, u32)> = HashSet::new();
        let mut rdr = ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .from_reader(csv_object.as_bytes());
        for row in rdr.records() {
            let raw = row.map_err(|e| BasinError::InvalidRecord(e.to_string()))?;
            let record: PrecipitationRecord = (&raw).try_into()?;
            let key = (record.sub_basin.clone(), record.year, record.month);
            if !seen.insert(key) {
                return Err(BasinError::InvalidRecord(format!(
                    "duplicate record for {} {}-{:02}",
                    record.sub_basin, record.year, record.month
                )));
            }
            records.push(record);
        }
        Ok(records)
    }

    /// Group a vector of records by sub-basin name.
    pub fn vector_to_hashmap(
        records: Vec<PrecipitationRecord>,
    ) -> HashMap<String, Vec<PrecipitationRecord>> {
        let mut result: HashMap<String, Vec<PrecipitationRecord>> = HashMap::new();
        for record in records {
            result
                .entry(record.sub_basin.clone())
                .or_default()
                .push(record);
        }
        result
    }

    /// Distinct sub-basin names present in a record set, sorted.
    pub fn sub_basin_names(records: &[PrecipitationRecord]) -> Vec<String> {
        let mut names: Vec<String> = records
            .iter()
            .map(|record| record.sub_basin.clone())
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl TryFrom<&StringRecord> for PrecipitationRecord {
    type Error = BasinError;

    fn try_from(value: &StringRecord) -> Result<Self, Self::Error> {
        if value.len() != CSV_ROW_LENGTH {
            return Err(BasinError::InvalidRecord(format!(
                "expected {} columns, got {}",
                CSV_ROW_LENGTH,
                value.len()
            )));
        }
        let field = |idx: usize| value.get(idx).unwrap_or("").trim();
        let sub_basin = field(0).to_string();
        if sub_basin.is_empty() {
            return Err(BasinError::InvalidRecord("empty sub-basin name".to_string()));
        }
        let year = field(1)
            .parse::<i32>()
            .map_err(|_| BasinError::InvalidRecord(format!("bad year '{}'", field(1))))?;
        let month = field(2)
            .parse::<u32>()
            .map_err(|_| BasinError::InvalidRecord(format!("bad month '{}'", field(2))))?;
        if month_start(year, month).is_none() {
            return Err(BasinError::InvalidRecord(format!(
                "month {month} out of range for {sub_basin} {year}"
            )));
        }
        let precipitation_mm = field(3)
            .parse::<f64>()
            .map_err(|_| BasinError::InvalidRecord(format!("bad precipitation '{}'", field(3))))?;
        if !precipitation_mm.is_finite() || precipitation_mm < 0.0 {
            return Err(BasinError::InvalidRecord(format!(
                "negative precipitation for {sub_basin} {year}-{month:02}"
            )));
        }
        let area_hectares = field(4)
            .parse::<f64>()
            .map_err(|_| BasinError::InvalidRecord(format!("bad area '{}'", field(4))))?;
        if !area_hectares.is_finite() || area_hectares <= 0.0 {
            return Err(BasinError::InvalidRecord(format!(
                "non-positive area for {sub_basin}"
            )));
        }
        Ok(PrecipitationRecord {
            sub_basin,
            year,
            month,
            precipitation_mm,
            area_hectares,
        })
    }
}

impl Eq for PrecipitationRecord {}

impl Ord for PrecipitationRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.sub_basin, self.year, self.month).cmp(&(&other.sub_basin, other.year, other.month))
    }
}

impl PartialOrd for PrecipitationRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::PrecipitationRecord;
    use crate::error::BasinError;

    const STR_RESULT: &str = "\
SUBCUENCA,year,month,precip_mm,HECTARES
Rio Polochic Alto,2023,1,212.4,52000
Rio Polochic Alto,2023,2,148.9,52000
Rio Cahabon,2023,1,187.3,38500
";

    #[test]
    fn test_parse_precipitation_csv() {
        let records = PrecipitationRecord::parse_precipitation_csv(STR_RESULT).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].sub_basin, "Rio Polochic Alto");
        assert_eq!(records[0].year, 2023);
        assert_eq!(records[0].month, 1);
        assert!((records[0].precipitation_mm - 212.4).abs() < f64::EPSILON);
        assert!((records[0].area_hectares - 52000.0).abs() < f64::EPSILON);
        assert_eq!(records[2].sub_basin, "Rio Cahabon");
    }

    #[test]
    fn test_parse_empty_csv() {
        let records =
            PrecipitationRecord::parse_precipitation_csv("SUBCUENCA,year,month,precip_mm,HECTARES\n")
                .unwrap();
        assert_eq!(records.len(), 0);
    }

    #[test]
    fn test_duplicate_month_rejected() {
        let csv_data = "\
SUBCUENCA,year,month,precip_mm,HECTARES
Rio Cahabon,2023,1,187.3,38500
Rio Cahabon,2023,1,190.0,38500
";
        let result = PrecipitationRecord::parse_precipitation_csv(csv_data);
        assert!(matches!(result, Err(BasinError::InvalidRecord(_))));
    }

    #[test]
    fn test_month_out_of_range_rejected() {
        let csv_data = "\
SUBCUENCA,year,month,precip_mm,HECTARES
Rio Cahabon,2023,13,187.3,38500
";
        let result = PrecipitationRecord::parse_precipitation_csv(csv_data);
        assert!(matches!(result, Err(BasinError::InvalidRecord(_))));
    }

    #[test]
    fn test_negative_precipitation_rejected() {
        let csv_data = "\
SUBCUENCA,year,month,precip_mm,HECTARES
Rio Cahabon,2023,1,-5.0,38500
";
        let result = PrecipitationRecord::parse_precipitation_csv(csv_data);
        assert!(matches!(result, Err(BasinError::InvalidRecord(_))));
    }

    #[test]
    fn test_grouping_and_names() {
        let records = PrecipitationRecord::parse_precipitation_csv(STR_RESULT).unwrap();
        let names = PrecipitationRecord::sub_basin_names(&records);
        assert_eq!(names, vec!["Rio Cahabon", "Rio Polochic Alto"]);

        let grouped = PrecipitationRecord::vector_to_hashmap(records);
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["Rio Polochic Alto"].len(), 2);
        assert_eq!(grouped["Rio Cahabon"].len(), 1);
    }
}
