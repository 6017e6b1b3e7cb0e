//! Error types shared by the canvas core, the in-memory storage and the
//! save/load boundary of the canvas controller.

use thiserror::Error;

/// Lookup and validation failures raised by [`crate::logic::layout_store::LayoutStore`]
/// and [`crate::storage::MemStorage`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// No garden bed with this id in the layout.
    #[error("Garden bed '{0}' not found")]
    BedNotFound(String),

    /// No placed plant with this id in the layout.
    #[error("Placed plant '{0}' not found")]
    PlantNotFound(String),

    /// No catalog plant with this id.
    #[error("Plant {0} not found")]
    CatalogPlantNotFound(u32),

    /// No persisted layout with this id.
    #[error("Garden layout {0} not found")]
    LayoutNotFound(u64),

    /// The layout payload failed validation; one entry per violation.
    #[error("Invalid garden layout: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Failure of a save or load round-trip to the layout service.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("Layout service unreachable: {0}")]
    Unreachable(String),

    /// The service answered with a non-success status.
    #[error("Layout service rejected the request ({status}): {}", .errors.join("; "))]
    Rejected { status: u16, errors: Vec<String> },
}
