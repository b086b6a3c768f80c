//! hwprofile - lshw capture normalization and hardware profile extraction
//!
//! Two single-document transformations over `lshw -json` captures wrapped as
//! `{"hardware": {"node", "data", "error"}}`:
//! - the type normalizer canonicalizes leaf value types across machines
//! - the hardware extractor flattens the device tree into a [`HardwareProfile`]
//!
//! [`ProfilePipeline`] chains both for batches of captures.

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod normalizer;
pub mod patterns;
pub mod pipeline;

pub use error::{HwProfileError, Result};
pub use extractor::{extract_profile, HardwareInfo, HardwareProfile};
pub use normalizer::LshwNormalizer;
pub use pipeline::{BatchStats, ProcessedCapture, ProfilePipeline};
