#[cfg(feature = "swisseph")]
pub mod adapter;
pub mod provider;
pub mod snapshot;
pub mod types;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use provider::{house_system_byte, EphemerisError, EphemerisProvider, HOUSE_SYSTEMS};
pub use snapshot::{SnapshotEntry, SnapshotEphemeris, SnapshotFile};
pub use types::{
    Body, BodyReading, CelestialBody, EphemerisSettings, EphemerisSnapshot, GeoLocation,
    UnavailableBody,
};
