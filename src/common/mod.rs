//! Auxiliary items.

pub mod buf;
pub mod util;
