//! Layer-neutrale Hilfen: Kurven-Geometrie und Konstanten.

pub mod bezier;
pub mod constants;

pub use bezier::{cubic_bezier, polyline_length, sample_cubic_bezier};
