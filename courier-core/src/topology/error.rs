use thiserror::Error;

/// Errors from [`crate::topology::TopologyBuilder::build`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    /// The destination identifier was blank.
    #[error("destination identifier must not be empty")]
    EmptyDestination,
    /// An item was assigned to a blank center identifier.
    #[error("item {item} must name a center")]
    EmptyCenter {
        /// Item whose center was blank.
        item: String,
    },
    /// An item was assigned to the destination instead of a center.
    #[error("item {item} is assigned to the destination {destination}")]
    CenterIsDestination {
        /// Offending item.
        item: String,
        /// Destination identifier.
        destination: String,
    },
    /// An item weight was zero, negative or not finite.
    #[error("unit weight of item {item} must be positive and finite (got {weight})")]
    InvalidUnitWeight {
        /// Offending item.
        item: String,
        /// Rejected weight.
        weight: f64,
    },
    /// A distance entry was negative or not finite.
    #[error("distance {from}-{to} must be finite and non-negative (got {distance})")]
    InvalidDistance {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// Rejected distance.
        distance: f64,
    },
    /// A distance entry named a location that is neither a center nor the
    /// destination.
    #[error("distance entry references unknown location {0}")]
    UnknownLocation(String),
    /// A location was given a non-zero distance to itself.
    #[error("distance from {location} to itself must be 0 (got {distance})")]
    NonZeroSelfDistance {
        /// Offending location.
        location: String,
        /// Rejected distance.
        distance: f64,
    },
    /// The same pair of locations was given two different distances.
    #[error("conflicting distances for {from}-{to}: {first} and {second}")]
    ConflictingDistance {
        /// First endpoint.
        from: String,
        /// Second endpoint.
        to: String,
        /// Distance recorded first.
        first: f64,
        /// Distance recorded later.
        second: f64,
    },
}
