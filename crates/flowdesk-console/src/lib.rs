/*
[INPUT]:  Public API exports for flowdesk-console crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod controller;
pub mod form;
pub mod issue;
pub mod refresh;
pub mod staging;
pub mod tui;
pub mod variant;

// Re-export main types for convenience
pub use config::ConsoleConfig;
pub use controller::{ActionModal, ModalPhase, ModalTick};
pub use issue::{IssueDialog, IssuePhase};
pub use refresh::{RefreshEvent, Refresher};
pub use staging::{FileStaging, PreStagedFile, StagedFile};
pub use variant::TaskVariant;
