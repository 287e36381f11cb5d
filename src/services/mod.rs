pub mod download_service;
pub mod event_status;
pub mod pdf_extractor;
pub mod user_tools;
pub mod warn_writer;

pub use download_service::{process_artefact, Artefact, ArtefactKind, DownloadWatcher};
pub use event_status::{EventStatusLookup, UiEventStatusLookup};
pub use pdf_extractor::{extract_nhs_numbers, extract_nhs_numbers_from_text};
pub use user_tools::UserTools;
pub use warn_writer::WarnWriter;
