//! Mathematical functions and constants.

mod consts;
mod log;
mod pow;
