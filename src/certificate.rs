// 📜 Adoption Certificate - the confirmation handed to an adopter
//
// Consumes a released record plus who adopted it and when. Nothing here reads
// the clock; the caller supplies the adoption date.

use crate::animal::AnimalRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Long date format used on certificates ("June 5, 2024")
const CERTIFICATE_DATE_FORMAT: &str = "%B %-d, %Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adopter {
    pub name: String,
    /// Email or phone, free text
    pub contact: String,
}

impl Adopter {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Adopter {
            name: name.into(),
            contact: contact.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdoptionCertificate {
    pub record: AnimalRecord,
    pub adopter: Adopter,
    pub adoption_date: NaiveDate,
    pub center_name: String,
}

impl AdoptionCertificate {
    pub fn new(
        record: AnimalRecord,
        adopter: Adopter,
        adoption_date: NaiveDate,
        center_name: impl Into<String>,
    ) -> Self {
        AdoptionCertificate {
            record,
            adopter,
            adoption_date,
            center_name: center_name.into(),
        }
    }

    /// Whole days the animal waited between intake and adoption
    pub fn days_waited(&self) -> i64 {
        self.record.days_sheltered(self.adoption_date)
    }

    pub fn render(&self) -> String {
        let r = &self.record;
        let label = r.species().label();
        let contact = if self.adopter.contact.trim().is_empty() {
            "(not provided)"
        } else {
            self.adopter.contact.as_str()
        };

        let lines = [
            format!(
                "🎉 Congratulations on your new family member, {}! 🎉",
                self.adopter.name
            ),
            String::new(),
            format!("You've adopted {}, a wonderful {} {}.", r.name, r.sex, label),
            String::new(),
            "Adoption Details:".to_string(),
            format!("- Name: {}", r.name),
            format!("- Type: {}", label),
            format!("- Breed: {}", r.breed),
            format!("- Age: {} years old", r.age),
            format!("- Sex: {}", r.sex),
            format!(
                "- Intake Date: {}",
                r.intake_date().format(CERTIFICATE_DATE_FORMAT)
            ),
            format!(
                "- Adoption Date: {}",
                self.adoption_date.format(CERTIFICATE_DATE_FORMAT)
            ),
            format!("- Contact Info: {}", contact),
            String::new(),
            format!(
                "Thank you for choosing to adopt and giving {} a forever home!",
                r.name
            ),
            String::new(),
            "Best wishes,".to_string(),
            format!("The {} Team", self.center_name),
        ];

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

impl fmt::Display for AdoptionCertificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// ============================================================================
// TESTS
// ============================================================================
