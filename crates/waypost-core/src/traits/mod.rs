//! Trait seams for external collaborators.

pub mod geocoder;

pub use geocoder::Geocoder;
