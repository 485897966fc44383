// Shelter Queue - Core Library
// Exposes the registry core and its intake/adoption collaborators for the CLI, TUI and tests

pub mod animal;
pub mod error;
pub mod registry;     // Core: two species queues + release policy
pub mod certificate;
pub mod config;
pub mod roster;       // Seedable mock population
pub mod intake;       // CSV intake import
pub mod desk;         // Console adoption session

// Re-export commonly used types
pub use animal::{AnimalRecord, ParseAnimalError, Sex, Species};
pub use error::ShelterError;
pub use registry::{ListingEntry, ShelterRegistry, SpeciesListing};
pub use certificate::{Adopter, AdoptionCertificate};
pub use config::ShelterConfig;
pub use roster::{rng_from_seed, RosterGenerator};
pub use intake::{import_intake_csv, load_intake_csv, read_intake, IntakeRow};
pub use desk::{
    adopt_in_order, certificates_json, listing_json, render_listing, AdoptionChoice, AdoptionDesk,
    NO_ANIMALS_MESSAGE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
