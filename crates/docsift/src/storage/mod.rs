//! Storage collaborators: upload staging, JSON artifacts, classification
//! records.
//!
//! The extraction core treats all of these as opaque stores; nothing in
//! here participates in extraction decisions.

pub mod artifacts;
pub mod records;
pub mod uploads;
pub mod writer;

pub use artifacts::ArtifactStore;
pub use records::{ClassificationStore, MemoryClassificationStore};
pub use uploads::UploadStore;
pub use writer::{writer_for_mode, BufferedWriter, FileWriter, NonBlockingWriter};
