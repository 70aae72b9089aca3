//! Fixfloat is a library that implements floating point numbers with a fixed
//! mantissa width selected at compile time.
//!
//! The mantissa of [BigFloat] occupies `M` machine words, so the precision of
//! all operations is `M * 32` bits. Basic arithmetic is correctly rounded
//! (rounding half to even), and numbers convert to and from decimal strings.
//!
//! ```
//! use fixfloat::BigFloat256;
//!
//! let d1: BigFloat256 = "1.5e10".parse().unwrap();
//! let d2 = BigFloat256::from_f64(0.5).unwrap();
//! let d3 = d1.mul(&d2).unwrap();
//!
//! assert_eq!(d3.to_string(), "7.5E9");
//! ```

#![deny(missing_docs)]
#![deny(clippy::suspicious)]
#![allow(clippy::comparison_chain)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::module_inception)]

mod common;
mod conv;
mod defs;
mod mantissa;
mod num;
mod ops;
mod parser;
mod strop;

mod for_3rd;

pub use crate::defs::Error;
pub use crate::defs::Exponent;
pub use crate::defs::Sign;
pub use crate::defs::Word;
pub use crate::num::BigFloat;
pub use crate::num::BigFloat128;
pub use crate::num::BigFloat256;
pub use crate::num::BigFloat512;

pub use crate::defs::EXPONENT_MAX;
pub use crate::defs::EXPONENT_MIN;
pub use crate::defs::WORD_BASE;
pub use crate::defs::WORD_BIT_SIZE;
pub use crate::defs::WORD_MAX;
pub use crate::defs::WORD_SIGNIFICANT_BIT;

#[cfg(test)]
mod tests {

    #[test]
    fn test_bigfloat() {
        use crate::BigFloat256;

        // compute 640320^3 + 744 used in the Chudnovsky formula
        let n = BigFloat256::from_i64(640320);
        let n = n.powi(3).unwrap();
        let n = n.add(&BigFloat256::from_i64(744)).unwrap();

        // the value is an integer and is exact
        assert_eq!(n.to_string(), "2.62537412640768744E17");
        assert_eq!(n.fract(), BigFloat256::new());

        // ln and exp agree on it
        let l = n.ln().unwrap();
        let r = l.exp().unwrap();

        let eps = n.mul_pow2(-240).unwrap();
        assert!(r.sub(&n).unwrap().abs().abs_cmp(&eps) < 0);
    }
}
