// 🛎️ Adoption Desk - console front end over the registry
//
// Input and output are injected (BufRead + Write) so the same session runs
// against stdin/stdout in the binary and against in-memory buffers in tests.

use crate::animal::{AnimalRecord, Species};
use crate::certificate::{Adopter, AdoptionCertificate};
use crate::error::ShelterError;
use crate::registry::ShelterRegistry;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub const NO_ANIMALS_MESSAGE: &str =
    "Sorry, there are no animals available for adoption at the moment.";

// ============================================================================
// ADOPTION CHOICE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdoptionChoice {
    /// Oldest animal regardless of species
    OldestOverall,
    /// Oldest animal of one species
    OldestOf(Species),
}

impl AdoptionChoice {
    /// Menu number → choice ("1", "2", "3")
    pub fn from_menu(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(AdoptionChoice::OldestOverall),
            "2" => Some(AdoptionChoice::OldestOf(Species::Dog)),
            "3" => Some(AdoptionChoice::OldestOf(Species::Cat)),
            _ => None,
        }
    }

    pub fn release(&self, registry: &mut ShelterRegistry) -> Result<AnimalRecord, ShelterError> {
        match self {
            AdoptionChoice::OldestOverall => registry.release_oldest_overall(),
            AdoptionChoice::OldestOf(species) => registry.release_oldest_of_species(*species),
        }
    }
}

// ============================================================================
// LISTING DISPLAY
// ============================================================================

/// Text listing of both species; the animal next in line carries a ⭐
pub fn render_listing(registry: &ShelterRegistry) -> String {
    let mut out = String::from("🐕🐈 Animals Looking For Furever Homes 🐕🐈\n");

    for (i, listing) in registry.listing().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!(
            "{} {} in the shelter:\n",
            listing.species.emoji(),
            capitalize(listing.species.plural())
        ));

        if listing.is_empty() {
            out.push_str(&format!("  (no {} right now)\n", listing.species.plural()));
            continue;
        }

        let oldest_id = listing.oldest().map(|record| record.id());
        for entry in &listing.entries {
            if Some(entry.record.id()) == oldest_id {
                out.push_str(&format!("{} ⭐\n", entry.record));
            } else {
                out.push_str(&format!("{}\n", entry.record));
            }
        }
    }

    out
}

/// Listing as JSON: both species, each record with its `is_oldest` flag
pub fn listing_json(registry: &ShelterRegistry) -> Result<String> {
    serde_json::to_string_pretty(&registry.listing()).context("Failed to serialize listing")
}

/// Certificates as JSON, one object per adoption
pub fn certificates_json(certificates: &[AdoptionCertificate]) -> Result<String> {
    serde_json::to_string_pretty(certificates).context("Failed to serialize certificates")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// CONSOLE SESSION
// ============================================================================

/// One adopter's walk through the desk: identify, browse, choose, adopt
pub struct AdoptionDesk<R, W> {
    input: R,
    output: W,
    center_name: String,
}

impl<R: BufRead, W: Write> AdoptionDesk<R, W> {
    pub fn new(input: R, output: W, center_name: impl Into<String>) -> Self {
        AdoptionDesk {
            input,
            output,
            center_name: center_name.into(),
        }
    }

    /// Give back the output sink (tests read what was written)
    pub fn into_output(self) -> W {
        self.output
    }

    /// Read one line without its terminator; end of input reads as ""
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{}", text).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush output")?;
        self.read_line()
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write output")
    }

    /// Run the full session. Returns the certificate when an animal was
    /// adopted, None when nothing was available or the choice was invalid.
    pub fn run(
        &mut self,
        registry: &mut ShelterRegistry,
        today: NaiveDate,
    ) -> Result<Option<AdoptionCertificate>> {
        let welcome = format!("🏠 Welcome to the {}! 🏠", self.center_name);
        self.say(&welcome)?;

        let name = self.prompt("\nPlease enter your name: ")?;
        let contact = self.prompt("Please enter your contact information (email or phone): ")?;
        let adopter = Adopter::new(name.trim(), contact.trim());

        self.prompt("\nThank you! Press Enter to continue...\n")?;

        let listing = render_listing(registry);
        self.say(&listing)?;

        self.prompt("\nReady to adopt? Press Enter to continue...\n")?;

        self.say("\nPlease choose from the following options:")?;
        self.say("1. Adopt the oldest animal (doesn't matter if it's a dog or cat).")?;
        self.say("2. Adopt the oldest dog.")?;
        self.say("3. Adopt the oldest cat.")?;
        let raw_choice = self.prompt("Please enter your choice (1, 2, or 3): ")?;

        let choice = match AdoptionChoice::from_menu(&raw_choice) {
            Some(choice) => choice,
            None => {
                warn!("Invalid adoption choice: {:?}", raw_choice);
                self.say("Invalid choice. Please restart the process.")?;
                return Ok(None);
            }
        };

        match choice.release(registry) {
            Ok(record) => {
                info!("{} adopted {} {}", adopter.name, record.species().label(), record.name);
                let certificate =
                    AdoptionCertificate::new(record, adopter, today, self.center_name.clone());
                self.say(&certificate.render())?;
                let thanks = format!(
                    "\nThank you for adopting from {}! 🐾",
                    self.center_name
                );
                self.say(&thanks)?;
                Ok(Some(certificate))
            }
            Err(err) => {
                info!("Adoption not possible: {}", err);
                self.say(NO_ANIMALS_MESSAGE)?;
                Ok(None)
            }
        }
    }
}

// ============================================================================
// BATCH RUN
// ============================================================================

/// Each adopter in turn takes the oldest animal overall.
/// Stops early once the shelter is empty.
pub fn adopt_in_order(
    registry: &mut ShelterRegistry,
    adopters: &[Adopter],
    today: NaiveDate,
    center_name: &str,
) -> Vec<AdoptionCertificate> {
    let mut certificates = Vec::new();

    for adopter in adopters {
        match registry.release_oldest_overall() {
            Ok(record) => {
                info!("{} adopted {} {}", adopter.name, record.species().label(), record.name);
                certificates.push(AdoptionCertificate::new(
                    record,
                    adopter.clone(),
                    today,
                    center_name,
                ));
            }
            Err(err) => {
                warn!("Stopping batch adoption before {}: {}", adopter.name, err);
                break;
            }
        }
    }

    certificates
}

// ============================================================================
// TESTS
// ============================================================================
