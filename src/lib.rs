//! polyline-codec
//!
//! Encoder/decoder for the Encoded Polyline Algorithm Format at 1e5 scale,
//! plus a small Polyline type for working with decoded street-segment
//! geometries.

pub mod codec;
pub mod error;
pub mod haversine;
pub mod polyline;
