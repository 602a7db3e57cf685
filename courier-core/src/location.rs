//! Identifiers for catalog items and the places a courier can stop at.
//!
//! Locations compare by identity only. A [`Location`] serialises as its bare
//! identifier so a route renders as `["C1", "L1"]`.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the identifier text.
            #[must_use]
            pub const fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Identifier of an item in the catalog, e.g. `A`.
    ItemId
);

string_id!(
    /// Identifier of a warehouse that stocks catalog items, e.g. `C1`.
    CenterId
);

string_id!(
    /// Identifier of the delivery endpoint, e.g. `L1`.
    DestinationId
);

/// A stop on a route: either a center or the destination.
///
/// # Examples
/// ```
/// use courier_core::{CenterId, DestinationId, Location};
///
/// let center = Location::Center(CenterId::from("C1"));
/// let destination = Location::Destination(DestinationId::from("L1"));
///
/// assert!(!center.is_destination());
/// assert!(destination.is_destination());
/// assert_eq!(center.to_string(), "C1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Location {
    /// A warehouse holding ordered items.
    Center(CenterId),
    /// The single delivery endpoint.
    Destination(DestinationId),
}

impl Location {
    /// Whether this stop is the destination.
    #[must_use]
    pub const fn is_destination(&self) -> bool {
        matches!(self, Self::Destination(_))
    }

    /// The center behind this stop, if any.
    #[must_use]
    pub const fn center(&self) -> Option<&CenterId> {
        match self {
            Self::Center(id) => Some(id),
            Self::Destination(_) => None,
        }
    }

    /// Identifier text of the stop.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::Center(id) => id.as_str(),
            Self::Destination(id) => id.as_str(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CenterId> for Location {
    fn from(value: CenterId) -> Self {
        Self::Center(value)
    }
}

impl From<DestinationId> for Location {
    fn from(value: DestinationId) -> Self {
        Self::Destination(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn locations_compare_by_identity() {
        let a = Location::Center(CenterId::from("C1"));
        let b = Location::Center(CenterId::from("C1"));
        let c = Location::Center(CenterId::from("C2"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[rstest]
    fn center_and_destination_with_same_name_differ() {
        let center = Location::Center(CenterId::from("X"));
        let destination = Location::Destination(DestinationId::from("X"));
        assert_ne!(center, destination);
    }

    #[rstest]
    fn location_serialises_as_bare_identifier() {
        let stops = vec![
            Location::Center(CenterId::from("C2")),
            Location::Destination(DestinationId::from("L1")),
        ];
        let json = serde_json::to_string(&stops).expect("serialise stops");
        assert_eq!(json, r#"["C2","L1"]"#);
    }

    #[rstest]
    fn center_accessor_skips_destination() {
        let destination = Location::Destination(DestinationId::from("L1"));
        assert!(destination.center().is_none());
        let center = Location::Center(CenterId::from("C3"));
        assert_eq!(center.center(), Some(&CenterId::from("C3")));
    }
}
