// 🎲 Mock Roster - demo shelter population
//
// Names and sexes come from fixed rosters; breed, age and intake date are
// random. The random source is passed in, so a seeded StdRng gives the same
// shelter every run and the registry itself never touches randomness.

use crate::animal::{AnimalRecord, Sex, Species};
use crate::config::ShelterConfig;
use crate::registry::ShelterRegistry;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::info;

pub static DOG_ROSTER: [(&str, Sex); 15] = [
    ("Max", Sex::Male),
    ("Charlie", Sex::Male),
    ("Buddy", Sex::Male),
    ("Rocky", Sex::Male),
    ("Jake", Sex::Male),
    ("Bailey", Sex::Female),
    ("Milo", Sex::Male),
    ("Bentley", Sex::Male),
    ("Duke", Sex::Male),
    ("Tucker", Sex::Male),
    ("Oliver", Sex::Male),
    ("Bear", Sex::Male),
    ("Jack", Sex::Male),
    ("Cooper", Sex::Male),
    ("Toby", Sex::Male),
];

pub static CAT_ROSTER: [(&str, Sex); 15] = [
    ("Luna", Sex::Female),
    ("Bella", Sex::Female),
    ("Lucy", Sex::Female),
    ("Kitty", Sex::Female),
    ("Nala", Sex::Female),
    ("Chloe", Sex::Female),
    ("Simba", Sex::Male),
    ("Milo", Sex::Male),
    ("Leo", Sex::Male),
    ("Loki", Sex::Male),
    ("Charlie", Sex::Male),
    ("Oreo", Sex::Male),
    ("Jasper", Sex::Male),
    ("Oliver", Sex::Male),
    ("Shadow", Sex::Male),
];

pub static DOG_BREEDS: [&str; 10] = [
    "Labrador Retriever",
    "German Shepherd",
    "Golden Retriever",
    "Bulldog",
    "Beagle",
    "Poodle",
    "Rottweiler",
    "Boxer",
    "Dachshund",
    "Siberian Husky",
];

pub static CAT_BREEDS: [&str; 10] = [
    "Siamese",
    "Persian",
    "Maine Coon",
    "Ragdoll",
    "Bengal",
    "Sphynx",
    "British Shorthair",
    "Scottish Fold",
    "Abyssinian",
    "Russian Blue",
];

/// Roster and breed table for a species
pub fn roster(species: Species) -> (&'static [(&'static str, Sex)], &'static [&'static str]) {
    match species {
        Species::Dog => (&DOG_ROSTER[..], &DOG_BREEDS[..]),
        Species::Cat => (&CAT_ROSTER[..], &CAT_BREEDS[..]),
    }
}

/// Build the random source for a roster: fixed seed when given, OS entropy otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generates mock intake records relative to a reference date
pub struct RosterGenerator {
    reference_date: NaiveDate,
    intake_window_days: u32,
    min_age: u32,
    max_age: u32,
}

impl RosterGenerator {
    pub fn new(config: &ShelterConfig, reference_date: NaiveDate) -> Self {
        RosterGenerator {
            reference_date,
            intake_window_days: config.intake_window_days.max(1),
            min_age: config.min_age,
            max_age: config.max_age.max(config.min_age),
        }
    }

    /// Random intake date in (reference_date - window, reference_date]
    pub fn random_intake_date<R: Rng>(&self, rng: &mut R) -> NaiveDate {
        let days_ago = rng.random_range(0..self.intake_window_days);
        self.reference_date - Duration::days(i64::from(days_ago))
    }

    /// One record per roster entry of a species, in roster order
    pub fn generate_species<R: Rng>(
        &self,
        species: Species,
        rng: &mut R,
    ) -> Vec<AnimalRecord> {
        let (names, breeds) = roster(species);

        names
            .iter()
            .map(|(name, sex)| {
                let breed = breeds.choose(rng).copied().unwrap_or("Mixed");
                let age = rng.random_range(self.min_age..=self.max_age);
                let intake_date = self.random_intake_date(rng);
                AnimalRecord::new(*name, species, breed, age, *sex, intake_date)
            })
            .collect()
    }

    /// Full roster: all dogs, then all cats
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<AnimalRecord> {
        let mut records = self.generate_species(Species::Dog, rng);
        records.extend(self.generate_species(Species::Cat, rng));
        records
    }

    /// Generate the full roster and admit it, returns the number admitted
    pub fn populate<R: Rng>(&self, registry: &mut ShelterRegistry, rng: &mut R) -> usize {
        let admitted = registry.admit_all(self.generate(rng));
        info!(
            "Populated shelter with {} mock animals (window {} days before {})",
            admitted, self.intake_window_days, self.reference_date
        );
        admitted
    }
}

// ============================================================================
// TESTS
// ============================================================================
