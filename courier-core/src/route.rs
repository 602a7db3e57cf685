//! Delivery routes: ordered stops at centers and the destination.

use std::fmt;

use serde::Serialize;

use crate::Location;

/// An ordered sequence of stops.
///
/// A route produced by an optimiser starts at a center, visits every required
/// center once and ends at the destination. It serialises as an array of
/// location identifiers.
///
/// # Examples
/// ```
/// use courier_core::{CenterId, DestinationId, Location, Route};
///
/// let route = Route::new(vec![
///     Location::Center(CenterId::from("C1")),
///     Location::Destination(DestinationId::from("L1")),
/// ]);
/// assert_eq!(route.to_string(), "C1 → L1");
/// assert_eq!(serde_json::to_string(&route).unwrap(), r#"["C1","L1"]"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Route {
    stops: Vec<Location>,
}

impl Route {
    /// Construct a route from its stops.
    #[must_use]
    pub const fn new(stops: Vec<Location>) -> Self {
        Self { stops }
    }

    /// A route with no stops, used when nothing has to be delivered.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Stops in visiting order.
    #[must_use]
    pub const fn stops(&self) -> &[Location] {
        self.stops.as_slice()
    }

    /// Number of stops.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the route has no stops.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Identifiers of the stops, in order.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.stops.iter().map(Location::as_str).collect()
    }

    /// Consecutive pairs of stops.
    pub fn legs(&self) -> impl Iterator<Item = (&Location, &Location)> + '_ {
        self.stops.iter().zip(self.stops.iter().skip(1))
    }
}

impl From<Vec<Location>> for Route {
    fn from(stops: Vec<Location>) -> Self {
        Self::new(stops)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stops = self.stops.iter();
        if let Some(first) = stops.next() {
            write!(f, "{first}")?;
            for stop in stops {
                write!(f, " → {stop}")?;
            }
        }
        Ok(())
    }
}
