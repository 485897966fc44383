// 🐾 Animal Records - one record type for every species
//
// Species is a TAG on the record, not a type. The registry routes on the tag,
// and every human-facing word ("dog", "Cats", 🐕) comes from the label table
// below instead of being derived from type names.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// PARSE ERRORS
// ============================================================================

/// Raised when intake text cannot be mapped onto a species or sex.
/// The registry never sees these; they stop at the intake boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAnimalError {
    #[error("unknown species: {0:?} (expected Dog or Cat)")]
    UnknownSpecies(String),

    #[error("unknown sex: {0:?} (expected Male or Female)")]
    UnknownSex(String),
}

// ============================================================================
// SPECIES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    /// Both species, in the order listings present them
    pub const ALL: [Species; 2] = [Species::Dog, Species::Cat];

    /// Lower-case label used inside sentences ("a wonderful Male dog")
    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }

    /// Capitalized label used in record lines ("Male Dog")
    pub fn title(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Species::Dog => "dogs",
            Species::Cat => "cats",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Species::Dog => "🐕",
            Species::Cat => "🐈",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Species {
    type Err = ParseAnimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dog" => Ok(Species::Dog),
            "cat" => Ok(Species::Cat),
            _ => Err(ParseAnimalError::UnknownSpecies(s.to_string())),
        }
    }
}

// ============================================================================
// SEX
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ParseAnimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ParseAnimalError::UnknownSex(s.to_string())),
        }
    }
}

// ============================================================================
// ANIMAL RECORD
// ============================================================================

/// One sheltered animal.
///
/// Identity: `id` (UUID), only used to point at a record in listings.
/// Ordering: `intake_date`, and nothing else. Species and intake date are
/// fixed at construction and only readable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnimalRecord {
    id: String,
    species: Species,
    intake_date: NaiveDate,

    pub name: String,
    pub breed: String,
    /// Age in whole years
    pub age: u32,
    pub sex: Sex,
}

impl AnimalRecord {
    pub fn new(
        name: impl Into<String>,
        species: Species,
        breed: impl Into<String>,
        age: u32,
        sex: Sex,
        intake_date: NaiveDate,
    ) -> Self {
        AnimalRecord {
            id: uuid::Uuid::new_v4().to_string(),
            species,
            intake_date,
            name: name.into(),
            breed: breed.into(),
            age,
            sex,
        }
    }

    /// Shorthand for a dog record
    pub fn dog(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: u32,
        sex: Sex,
        intake_date: NaiveDate,
    ) -> Self {
        Self::new(name, Species::Dog, breed, age, sex, intake_date)
    }

    /// Shorthand for a cat record
    pub fn cat(
        name: impl Into<String>,
        breed: impl Into<String>,
        age: u32,
        sex: Sex,
        intake_date: NaiveDate,
    ) -> Self {
        Self::new(name, Species::Cat, breed, age, sex, intake_date)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn intake_date(&self) -> NaiveDate {
        self.intake_date
    }

    /// Whole days spent in the shelter as of `today` (0 for future intake dates)
    pub fn days_sheltered(&self, today: NaiveDate) -> i64 {
        (today - self.intake_date).num_days().max(0)
    }
}

impl fmt::Display for AnimalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}, Breed: {}, Age: {}, Intake Date: {})",
            self.name,
            self.sex,
            self.species.title(),
            self.breed,
            self.age,
            self.intake_date.format("%Y-%m-%d"),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
