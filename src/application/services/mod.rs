mod anonymization_service;
mod oracle_registry;
mod replacement_applier;
mod text_projector;

pub use anonymization_service::{
    AnonymizationError, AnonymizationService, AnonymizedDocument, AnonymizedText, SubmissionMode,
};
pub use oracle_registry::{OracleRegistry, OracleRegistryError};
pub use replacement_applier::{apply_replacements, replace_all_occurrences, sort_longest_first};
pub use text_projector::{Projection, project};
