//! Numeric helpers shared by the scorer and the drawing backends.

pub mod safe_cast;
