//! Exponentiation.

use crate::defs::Error;
use crate::num::BigFloat;

impl<const M: usize> BigFloat<M> {
    /// Computes `e` to the power of the number.
    ///
    /// A result too small for the exponent range becomes zero,
    /// a result too large is an error.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the result is too large.
    pub fn exp(&self) -> Result<Self, Error> {
        if self.is_zero() {
            return Ok(Self::one());
        }

        if self.is_negative() {
            return match self.neg().exp() {
                Ok(d) => d.reciprocal(),
                Err(Error::ExponentOverflow(_)) => Ok(Self::new()),
                Err(e) => Err(e),
            };
        }

        // e^x = e^n * e^f for x = n + f, 0 <= f < 1
        let n = self.int_as_usize()?;
        let f = self.fract();

        let mut ret = Self::e_num().powi(n)?;
        if !f.is_zero() {
            ret = ret.mul(&Self::exp_series(&f)?)?;
        }

        Ok(ret)
    }

    /// Computes the number to the power of `n`.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the result is too large or too small.
    pub fn powi(&self, mut n: usize) -> Result<Self, Error> {
        if n == 0 {
            return Ok(Self::one());
        }
        if self.is_zero() {
            return Ok(*self);
        }

        let mut ret = Self::one();
        let mut x = *self;

        loop {
            if n & 1 != 0 {
                ret = ret.mul(&x)?;
            }
            n >>= 1;
            if n == 0 {
                break;
            }
            x = x.mul(&x)?;
        }

        Ok(ret)
    }

    // Taylor series of e^x for 0 <= x < 1.
    fn exp_series(x: &Self) -> Result<Self, Error> {
        let mut s = Self::one().add(x)?;
        let mut t = *x;
        let mut k = 1;

        while !t.is_zero()
            && s.exponent() as isize - t.exponent() as isize <= Self::precision() as isize + 1
        {
            k += 1;
            t = t.mul(x)?.div(&Self::from_word(k))?;
            s = s.add(&t)?;
        }

        Ok(s)
    }
}
