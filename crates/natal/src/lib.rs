//! Natal chart calculation.
//!
//! Longitudes come from an [`ephemeris::EphemerisProvider`]; this crate maps
//! them onto signs and houses and attaches each sign's element, modality and
//! ruler. Bodies that cannot be placed are skipped, never fatal.

pub mod birth;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod location;
pub mod report;
pub mod western;

pub use chart::{build, locate, ChartBuilder, ChartOutcome, ChartPosition, HouseCusps, HousePlacement};
pub use ephemeris::{Body, CelestialBody, EphemerisProvider, GeoLocation};
pub use error::ChartError;
pub use western::{classify, element_of, modality_of, ruler_of, Element, Modality, Ruler, Sign, SignPosition};
