//! Sub-basin listing command.

use crate::records::load_records;
use pbs_core::precipitation::PrecipitationRecord;

/// Print the distinct sub-basins in a records CSV with their record counts.
pub fn run_sub_basins(records_csv: &str) -> anyhow::Result<()> {
    let records = load_records(records_csv)?;
    let names = PrecipitationRecord::sub_basin_names(&records);
    for name in &names {
        let count = records.iter().filter(|r| &r.sub_basin == name).count();
        println!("{name} ({count} months)");
    }
    println!("{} sub-basins", names.len());
    Ok(())
}
