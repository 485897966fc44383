// 🏠 Shelter Registry - two species queues, one release policy
//
// Queues keep ADMISSION order, which is not intake-date order (mock rosters and
// CSV imports carry historical dates). "Oldest" is therefore always a minimum
// scan over intake_date; the queue head is never assumed to be oldest.
//
// Release policy:
// - per species: minimum intake_date, first occurrence wins ties
// - overall: compare each species' oldest; the dog goes only when it is
//   STRICTLY older, so equal dates release the cat

use crate::animal::{AnimalRecord, Species};
use crate::error::ShelterError;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

// ============================================================================
// LISTING
// ============================================================================

/// One row of a listing: a sheltered record and whether it is next in line
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ListingEntry<'a> {
    pub record: &'a AnimalRecord,
    pub is_oldest: bool,
}

/// All sheltered records of one species, in admission order
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesListing<'a> {
    pub species: Species,
    pub entries: Vec<ListingEntry<'a>>,
}

impl<'a> SpeciesListing<'a> {
    /// The flagged entry, if the species has any animals
    pub fn oldest(&self) -> Option<&'a AnimalRecord> {
        self.entries.iter().find(|e| e.is_oldest).map(|e| e.record)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Owns every sheltered animal. Releasing hands the record to the caller;
/// nothing about it is kept here afterwards.
#[derive(Debug, Default, Clone)]
pub struct ShelterRegistry {
    dogs: VecDeque<AnimalRecord>,
    cats: VecDeque<AnimalRecord>,
}

impl ShelterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self, species: Species) -> &VecDeque<AnimalRecord> {
        match species {
            Species::Dog => &self.dogs,
            Species::Cat => &self.cats,
        }
    }

    fn queue_mut(&mut self, species: Species) -> &mut VecDeque<AnimalRecord> {
        match species {
            Species::Dog => &mut self.dogs,
            Species::Cat => &mut self.cats,
        }
    }

    /// Position of the oldest record of a species.
    /// `min_by_key` returns the first of several equal minima, which is the
    /// earliest admitted among same-day records.
    fn oldest_index(&self, species: Species) -> Option<usize> {
        self.queue(species)
            .iter()
            .enumerate()
            .min_by_key(|(_, record)| record.intake_date())
            .map(|(index, _)| index)
    }

    /// Append a record to its species' queue. Always succeeds.
    pub fn admit(&mut self, record: AnimalRecord) {
        let species = record.species();
        debug!(
            "Admitting {} {} (intake {})",
            species.label(),
            record.name,
            record.intake_date()
        );
        self.queue_mut(species).push_back(record);
    }

    /// Admit every record from an iterator, returns how many were admitted
    pub fn admit_all<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = AnimalRecord>,
    {
        let mut admitted = 0;
        for record in records {
            self.admit(record);
            admitted += 1;
        }
        admitted
    }

    /// Remove and return the oldest record of one species
    pub fn release_oldest_of_species(
        &mut self,
        species: Species,
    ) -> Result<AnimalRecord, ShelterError> {
        let index = self
            .oldest_index(species)
            .ok_or(ShelterError::EmptyCollection(species))?;

        let record = self
            .queue_mut(species)
            .remove(index)
            .ok_or(ShelterError::EmptyCollection(species))?;

        debug!(
            "Released {} {} (intake {})",
            species.label(),
            record.name,
            record.intake_date()
        );
        Ok(record)
    }

    /// Remove and return the oldest record across both species.
    /// Equal intake dates release the cat.
    pub fn release_oldest_overall(&mut self) -> Result<AnimalRecord, ShelterError> {
        let species = match (
            self.peek_oldest_of_species(Species::Dog),
            self.peek_oldest_of_species(Species::Cat),
        ) {
            (None, None) => return Err(ShelterError::EmptyShelter),
            (Some(_), None) => Species::Dog,
            (None, Some(_)) => Species::Cat,
            (Some(dog), Some(cat)) => {
                if dog.intake_date() < cat.intake_date() {
                    Species::Dog
                } else {
                    Species::Cat
                }
            }
        };

        self.release_oldest_of_species(species)
    }

    /// The record `release_oldest_of_species` would return, without removing it
    pub fn peek_oldest_of_species(&self, species: Species) -> Option<&AnimalRecord> {
        self.oldest_index(species)
            .and_then(|index| self.queue(species).get(index))
    }

    /// Every sheltered record of one species with the oldest one flagged
    pub fn listing_of(&self, species: Species) -> SpeciesListing<'_> {
        let oldest = self.oldest_index(species);
        let entries = self
            .queue(species)
            .iter()
            .enumerate()
            .map(|(index, record)| ListingEntry {
                record,
                is_oldest: Some(index) == oldest,
            })
            .collect();

        SpeciesListing { species, entries }
    }

    /// Listings for both species, dogs first
    pub fn listing(&self) -> [SpeciesListing<'_>; 2] {
        Species::ALL.map(|species| self.listing_of(species))
    }

    /// Sheltered records of one species, in admission order
    pub fn records(&self, species: Species) -> impl Iterator<Item = &AnimalRecord> {
        self.queue(species).iter()
    }

    pub fn count(&self, species: Species) -> usize {
        self.queue(species).len()
    }

    pub fn total(&self) -> usize {
        self.dogs.len() + self.cats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty() && self.cats.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Sex;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dog(name: &str, intake: NaiveDate) -> AnimalRecord {
        AnimalRecord::dog(name, "Beagle", 3, Sex::Male, intake)
    }

    fn cat(name: &str, intake: NaiveDate) -> AnimalRecord {
        AnimalRecord::cat(name, "Siamese", 2, Sex::Female, intake)
    }

    #[test]
    fn test_admit_routes_by_species() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2020, 1, 1)));
        registry.admit(cat("Tom", date(2020, 1, 1)));
        registry.admit(dog("Fido", date(2019, 6, 1)));

        assert_eq!(registry.count(Species::Dog), 2);
        assert_eq!(registry.count(Species::Cat), 1);
        assert_eq!(registry.total(), 3);
        assert!(registry.records(Species::Dog).all(|r| r.species() == Species::Dog));
    }

    #[test]
    fn test_admitted_records_remain_retrievable() {
        let mut registry = ShelterRegistry::new();
        let names = ["Max", "Charlie", "Buddy", "Rocky"];
        for (i, name) in names.iter().enumerate() {
            registry.admit(dog(name, date(2024, 1, 10 - i as u32)));
        }

        assert_eq!(registry.count(Species::Dog), names.len());
        let admitted: Vec<&str> = registry
            .records(Species::Dog)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(admitted, names);
    }

    #[test]
    fn test_release_oldest_dog_scans_past_queue_head() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2020, 1, 1)));
        registry.admit(dog("Fido", date(2019, 6, 1)));

        let released = registry.release_oldest_of_species(Species::Dog).unwrap();

        assert_eq!(released.name, "Fido");
        assert_eq!(registry.count(Species::Dog), 1);
        assert!(registry.records(Species::Dog).all(|r| r.name != "Fido"));
    }

    #[test]
    fn test_release_species_tie_goes_to_first_admitted() {
        let mut registry = ShelterRegistry::new();
        registry.admit(cat("Luna", date(2024, 2, 1)));
        registry.admit(cat("Bella", date(2024, 2, 1)));

        assert_eq!(
            registry.release_oldest_of_species(Species::Cat).unwrap().name,
            "Luna"
        );
        assert_eq!(
            registry.release_oldest_of_species(Species::Cat).unwrap().name,
            "Bella"
        );
    }

    #[test]
    fn test_release_never_crosses_species() {
        let mut registry = ShelterRegistry::new();
        registry.admit(cat("Old Tom", date(2010, 1, 1)));
        registry.admit(dog("Rex", date(2024, 1, 1)));

        let released = registry.release_oldest_of_species(Species::Dog).unwrap();

        assert_eq!(released.species(), Species::Dog);
        assert_eq!(released.name, "Rex");
    }

    #[test]
    fn test_release_from_empty_species_is_repeatable() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2020, 1, 1)));

        for _ in 0..3 {
            assert_eq!(
                registry.release_oldest_of_species(Species::Cat),
                Err(ShelterError::EmptyCollection(Species::Cat))
            );
        }

        // Dog queue untouched
        assert_eq!(registry.count(Species::Dog), 1);
    }

    #[test]
    fn test_release_overall_from_empty_shelter() {
        let mut registry = ShelterRegistry::new();

        assert_eq!(
            registry.release_oldest_overall(),
            Err(ShelterError::EmptyShelter)
        );
    }

    #[test]
    fn test_release_overall_tie_goes_to_cat() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2020, 1, 1)));
        registry.admit(cat("Tom", date(2020, 1, 1)));

        let released = registry.release_oldest_overall().unwrap();

        assert_eq!(released.name, "Tom");
        assert_eq!(released.species(), Species::Cat);
    }

    #[test]
    fn test_release_overall_picks_strictly_older_dog() {
        let mut registry = ShelterRegistry::new();
        registry.admit(cat("Tom", date(2020, 1, 2)));
        registry.admit(dog("Rex", date(2020, 1, 1)));

        assert_eq!(registry.release_oldest_overall().unwrap().name, "Rex");
    }

    #[test]
    fn test_release_overall_with_one_species_empty() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2021, 5, 5)));
        registry.admit(dog("Fido", date(2020, 5, 5)));

        assert_eq!(registry.release_oldest_overall().unwrap().name, "Fido");
        assert_eq!(registry.release_oldest_overall().unwrap().name, "Rex");
        assert_eq!(
            registry.release_oldest_overall(),
            Err(ShelterError::EmptyShelter)
        );
    }

    #[test]
    fn test_release_overall_is_minimum_across_both_species() {
        let mut registry = ShelterRegistry::new();
        let intake = [
            (true, "Max", date(2024, 3, 1)),
            (false, "Luna", date(2024, 1, 15)),
            (true, "Duke", date(2024, 1, 20)),
            (false, "Nala", date(2024, 4, 2)),
            (true, "Bear", date(2023, 12, 31)),
        ];
        for (is_dog, name, when) in intake {
            registry.admit(if is_dog { dog(name, when) } else { cat(name, when) });
        }

        let mut released = Vec::new();
        while let Ok(record) = registry.release_oldest_overall() {
            released.push(record.name);
        }

        assert_eq!(released, ["Bear", "Luna", "Duke", "Max", "Nala"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_peek_matches_release() {
        let mut registry = ShelterRegistry::new();
        registry.admit(cat("Luna", date(2024, 2, 1)));
        registry.admit(cat("Kitty", date(2024, 1, 1)));
        registry.admit(cat("Chloe", date(2024, 1, 1)));

        let peeked = registry
            .peek_oldest_of_species(Species::Cat)
            .map(|r| r.id().to_string())
            .unwrap();
        let released = registry.release_oldest_of_species(Species::Cat).unwrap();

        assert_eq!(peeked, released.id());
        assert_eq!(released.name, "Kitty");
        assert!(registry.peek_oldest_of_species(Species::Dog).is_none());
    }

    #[test]
    fn test_listing_flags_the_record_release_would_pick() {
        let mut registry = ShelterRegistry::new();
        registry.admit(dog("Rex", date(2020, 1, 1)));
        registry.admit(dog("Fido", date(2019, 6, 1)));
        registry.admit(dog("Spot", date(2019, 6, 1)));

        let flagged_id = {
            let [dogs, cats] = registry.listing();
            assert_eq!(dogs.entries.len(), 3);
            assert_eq!(dogs.entries.iter().filter(|e| e.is_oldest).count(), 1);
            assert!(cats.is_empty());
            assert!(cats.oldest().is_none());
            dogs.oldest().map(|r| r.id().to_string()).unwrap()
        };

        let released = registry.release_oldest_of_species(Species::Dog).unwrap();
        assert_eq!(released.id(), flagged_id);
        assert_eq!(released.name, "Fido");
    }

    #[test]
    fn test_listing_keeps_admission_order() {
        let mut registry = ShelterRegistry::new();
        registry.admit(cat("Simba", date(2024, 5, 1)));
        registry.admit(cat("Leo", date(2024, 4, 1)));

        let listing = registry.listing_of(Species::Cat);
        let names: Vec<&str> = listing.entries.iter().map(|e| e.record.name.as_str()).collect();

        assert_eq!(listing.species, Species::Cat);
        assert_eq!(names, ["Simba", "Leo"]);
        assert!(!listing.entries[0].is_oldest);
        assert!(listing.entries[1].is_oldest);
    }

    #[test]
    fn test_admit_all_counts() {
        let mut registry = ShelterRegistry::new();
        let admitted = registry.admit_all(vec![
            dog("Rex", date(2020, 1, 1)),
            cat("Tom", date(2020, 1, 1)),
        ]);

        assert_eq!(admitted, 2);
        assert!(!registry.is_empty());
    }
}
