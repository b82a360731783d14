//! # waypost-geocode
//!
//! Google Maps geocoding client implementing the [`Geocoder`] seam from
//! `waypost-core`.
//!
//! [`Geocoder`]: waypost_core::traits::Geocoder

pub mod google;

pub use google::GoogleGeocoder;
