pub mod defaults;
pub mod model;

pub use model::{Listing, ListingOverlay, Section, UnknownSection};
