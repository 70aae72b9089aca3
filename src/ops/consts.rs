//! Cached constants.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;

use crate::defs::{Error, Exponent, Sign, Word};
use crate::num::BigFloat;

lazy_static! {
    static ref LN_2_CACHE: Mutex<HashMap<usize, (Vec<Word>, Exponent)>> =
        Mutex::new(HashMap::new());
    static ref E_CACHE: Mutex<HashMap<usize, (Vec<Word>, Exponent)>> = Mutex::new(HashMap::new());
}

impl<const M: usize> BigFloat<M> {
    /// Returns the natural logarithm of 2. The value is computed once
    /// for a given mantissa width and then taken from a cache.
    pub fn ln_2() -> Self {
        let mut cache = LN_2_CACHE.lock().expect("ln(2) cache is not poisoned");
        let (w, e) = cache.entry(M).or_insert_with(|| {
            let val = Self::calc_ln_2().expect("ln(2) constant computation");
            (val.m.digits().to_vec(), val.e)
        });
        Self::from_raw_parts(w, *e, Sign::Pos)
    }

    /// Returns Euler's number. The value is computed once for a given
    /// mantissa width and then taken from a cache.
    pub fn e_num() -> Self {
        let mut cache = E_CACHE.lock().expect("e cache is not poisoned");
        let (w, e) = cache.entry(M).or_insert_with(|| {
            let val = Self::calc_e().expect("e constant computation");
            (val.m.digits().to_vec(), val.e)
        });
        Self::from_raw_parts(w, *e, Sign::Pos)
    }

    fn calc_ln_2() -> Result<Self, Error> {
        // ln(2) = 2*atanh(1/3)
        let third = Self::one().div(&Self::from_word(3))?;
        Self::atanh_series(&third)?.mul_pow2(1)
    }

    fn calc_e() -> Result<Self, Error> {
        // e = 2 + 1/2! + 1/3! + ...
        let mut s = Self::from_word(2);
        let mut t = Self::one();
        let mut k: Word = 1;

        loop {
            k += 1;
            t = t.div(&Self::from_word(k))?;
            s = s.add(&t)?;

            if s.exponent() as isize - t.exponent() as isize > Self::precision() as isize + 1 {
                break;
            }
        }

        Ok(s)
    }
}
