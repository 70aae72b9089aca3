//! Everything related to mantissa.

mod div;
mod mantissa;
mod mul;

pub use mantissa::Mantissa;
