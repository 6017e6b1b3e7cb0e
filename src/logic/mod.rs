pub mod companion;
pub mod drawing;
pub mod geometry;
pub mod layout_store;
