// Registry outcomes that are not a record.
// Both are ordinary business results ("nobody to adopt"), never faults.

use crate::animal::Species;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShelterError {
    /// The requested species has no sheltered animals
    #[error("no {} available for adoption", .0.plural())]
    EmptyCollection(Species),

    /// Neither species has any sheltered animals
    #[error("the shelter has no animals available for adoption")]
    EmptyShelter,
}
