//! Logarithm.

use crate::defs::{Error, WORD_SIGNIFICANT_BIT};
use crate::num::BigFloat;

impl<const M: usize> BigFloat<M> {
    /// Computes the natural logarithm of the number.
    ///
    /// ## Errors
    ///
    ///  - OutOfDomain: the argument is zero or negative.
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn ln(&self) -> Result<Self, Error> {
        // factoring: ln(a * 2^n) = ln(a) + n*ln(2), 0.75 <= a < 1.5
        // replacement: ln(a) = 2*atanh((a-1)/(a+1))
        // atanh(x) = x + x^3/3 + x^5/5 + ...

        if self.is_zero() || self.is_negative() {
            return Err(Error::OutOfDomain);
        }

        // if the second mantissa bit is not set, the fraction is in [0.5, 0.75)
        // and doubling it keeps the reduced argument away from 0 and 2
        let mut a = *self;
        let n = if self.m.digits()[M - 1] & (WORD_SIGNIFICANT_BIT >> 1) == 0 {
            a.e = 1;
            self.e as isize - 1
        } else {
            a.e = 0;
            self.e as isize
        };

        let one = Self::one();
        let x = a.sub(&one)?.div(&a.add(&one)?)?;

        let p1 = Self::atanh_series(&x)?.mul_pow2(1)?;

        if n == 0 {
            Ok(p1)
        } else {
            let p2 = Self::from_i64(n as i64).mul(&Self::ln_2())?;
            p1.add(&p2)
        }
    }

    pub(crate) fn atanh_series(x: &Self) -> Result<Self, Error> {
        let two = Self::from_word(2);
        let xx = x.mul(x)?;

        let mut s = *x;
        let mut t = *x;
        let mut d = Self::one();

        loop {
            t = t.mul(&xx)?;
            d = d.add(&two)?;
            let q = t.div(&d)?;
            s = s.add(&q)?;

            if q.is_zero()
                || s.exponent() as isize - q.exponent() as isize
                    > Self::precision() as isize + 1
            {
                break;
            }
        }

        Ok(s)
    }
}
