// 📥 CSV Intake - real intake records from a file
//
// Columns: Name,Species,Breed,Age,Sex,Intake_Date
// Intake_Date is YYYY-MM-DD; blank means "admitted today".
// All shape checks happen here, so only well-formed records reach the registry.

use crate::animal::{AnimalRecord, Sex, Species};
use crate::registry::ShelterRegistry;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

const INTAKE_DATE_FORMAT: &str = "%Y-%m-%d";

/// One CSV row, as written by intake staff
#[derive(Debug, Deserialize)]
pub struct IntakeRow {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Species")]
    pub species: String,

    #[serde(rename = "Breed")]
    pub breed: String,

    #[serde(rename = "Age")]
    pub age: u32,

    #[serde(rename = "Sex")]
    pub sex: String,

    #[serde(rename = "Intake_Date", default)]
    pub intake_date: Option<String>,
}

impl IntakeRow {
    /// Convert to a record; a missing intake date becomes `today`
    pub fn into_record(self, today: NaiveDate) -> Result<AnimalRecord> {
        let species: Species = self.species.parse()?;
        let sex: Sex = self.sex.parse()?;

        let intake_date = match self.intake_date.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => NaiveDate::parse_from_str(raw, INTAKE_DATE_FORMAT)
                .with_context(|| format!("Invalid intake date {:?} (expected YYYY-MM-DD)", raw))?,
        };

        Ok(AnimalRecord::new(
            self.name.trim(),
            species,
            self.breed.trim(),
            self.age,
            sex,
            intake_date,
        ))
    }
}

/// Parse intake records from any CSV reader
pub fn read_intake<R: Read>(reader: R, today: NaiveDate) -> Result<Vec<AnimalRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();

    for (index, result) in rdr.deserialize::<IntakeRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let row = result.with_context(|| format!("Failed to deserialize intake row at line {}", line))?;
        let record = row
            .into_record(today)
            .with_context(|| format!("Invalid intake row at line {}", line))?;
        records.push(record);
    }

    Ok(records)
}

/// Load intake records from a CSV file
pub fn load_intake_csv(csv_path: &Path, today: NaiveDate) -> Result<Vec<AnimalRecord>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open intake CSV: {:?}", csv_path))?;

    read_intake(file, today)
}

/// Load a CSV and admit every row in file order, returns the number admitted
pub fn import_intake_csv(
    registry: &mut ShelterRegistry,
    csv_path: &Path,
    today: NaiveDate,
) -> Result<usize> {
    let records = load_intake_csv(csv_path, today)?;
    let admitted = registry.admit_all(records);
    info!("Imported {} animals from {:?}", admitted, csv_path);
    Ok(admitted)
}

// ============================================================================
// TESTS
// ============================================================================
