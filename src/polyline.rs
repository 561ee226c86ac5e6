//! Polyline type for street-segment geometries.
//!
//! Wraps a decoded coordinate sequence and converts to/from the compact
//! encoded string at the boundary. The encoded form is also the serde
//! representation, since consumers persist polylines as a single opaque
//! text field.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;
use crate::error::MalformedPolylineError;
use crate::haversine;

/// A polyline as a decoded sequence of coordinate points.
///
/// Each point is a (latitude, longitude) tuple in decimal degrees. Order
/// is significant, it defines the path geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    points: Vec<(f64, f64)>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<(f64, f64)>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string into a Polyline.
    pub fn decode(encoded: &str) -> Result<Self, MalformedPolylineError> {
        codec::decode(encoded).map(Self::new)
    }

    /// Encodes the points into the compact polyline string form.
    pub fn encode(&self) -> String {
        codec::encode(&self.points)
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<(f64, f64)> {
        self.points
    }

    /// Great-circle length of the path in kilometers.
    pub fn length_km(&self) -> f64 {
        haversine::path_length_km(&self.points)
    }
}

impl Serialize for Polyline {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.encode())
    }
}

impl<'de> Deserialize<'de> for Polyline {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Polyline::decode(&encoded).map_err(serde::de::Error::custom)
    }
}
