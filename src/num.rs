//! BigFloat number.

use crate::common::buf::WordBuf;
use crate::defs::{
    Error, Exponent, Sign, SignedWord, Word, EXPONENT_MAX, EXPONENT_MIN, WORD_BIT_SIZE,
    WORD_SIGNIFICANT_BIT,
};
use crate::mantissa::Mantissa;

/// A floating point number with a fixed-width mantissa of `M` words,
/// a sign, and a one-word binary exponent.
///
/// A nonzero value is `(+/-) m * 2^e` with the mantissa fraction `m` in the
/// range [0.5, 1). Representations are unique, so structural equality is
/// value equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BigFloat<const M: usize> {
    pub(crate) m: Mantissa<M>,
    pub(crate) e: Exponent,
    pub(crate) s: Sign,
}

/// 128 bit mantissa, ~38 decimal digits.
pub type BigFloat128 = BigFloat<4>;

/// 256 bit mantissa, ~77 decimal digits.
pub type BigFloat256 = BigFloat<8>;

/// 512 bit mantissa, ~154 decimal digits.
pub type BigFloat512 = BigFloat<16>;

impl<const M: usize> BigFloat<M> {
    /// Returns a new number with value of 0.
    pub fn new() -> Self {
        BigFloat {
            m: Mantissa::new(),
            e: 0,
            s: Sign::Pos,
        }
    }

    /// Returns a new number with value of 1.
    pub fn one() -> Self {
        Self::from_word(1)
    }

    /// Mantissa precision in bits.
    pub const fn precision() -> usize {
        Mantissa::<M>::bit_len()
    }

    /// Constructs a number from a word value.
    pub fn from_word(d: Word) -> Self {
        Self::from_u64(d as u64)
    }

    /// Constructs a number from a signed integer value.
    pub fn from_i64(i: i64) -> Self {
        let mut ret = Self::from_u64(i.unsigned_abs());
        if i < 0 {
            ret.s = Sign::Neg;
        }
        ret
    }

    fn from_u64(u: u64) -> Self {
        if u == 0 {
            return Self::new();
        }

        let l = if M > 2 { M } else { 2 };
        let mut buf = WordBuf::new(l);
        buf[l - 2] = u as Word;
        buf[l - 1] = (u >> WORD_BIT_SIZE) as Word;

        // the buffer fraction is u/2^64, hence u = f*2^64
        match Mantissa::from_buf_round(&mut buf, false) {
            Some((e_adj, m)) => BigFloat {
                m,
                e: (64 + e_adj) as Exponent,
                s: Sign::Pos,
            },
            None => Self::new(),
        }
    }

    pub(crate) fn from_raw_parts(w: &[Word], e: Exponent, s: Sign) -> Self {
        let m = Mantissa::from_words(w);
        debug_assert!(m.is_normal() || m.is_zero());
        if m.is_zero() {
            Self::new()
        } else {
            BigFloat { m, e, s }
        }
    }

    /// Returns the sign of the number.
    pub fn sign(&self) -> Sign {
        self.s
    }

    /// Returns the binary exponent of the number.
    pub fn exponent(&self) -> Exponent {
        self.e
    }

    /// Returns true if the number is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.m.is_zero()
    }

    /// Returns true if the sign of the number is positive.
    pub fn is_positive(&self) -> bool {
        self.s.is_positive()
    }

    /// Returns true if the sign of the number is negative.
    pub fn is_negative(&self) -> bool {
        self.s.is_negative()
    }

    /// Returns the number with the opposite sign.
    pub fn neg(&self) -> Self {
        if self.is_zero() {
            *self
        } else {
            let mut ret = *self;
            ret.s = ret.s.invert();
            ret
        }
    }

    /// Returns the absolute value of the number.
    pub fn abs(&self) -> Self {
        let mut ret = *self;
        ret.s = Sign::Pos;
        ret
    }

    pub(crate) fn set_sign(&mut self, s: Sign) {
        if !self.is_zero() {
            self.s = s;
        }
    }

    // Build a number from the rounded mantissa and an unbounded exponent.
    fn compose(m: Mantissa<M>, e: isize, s: Sign) -> Result<Self, Error> {
        if e > EXPONENT_MAX as isize || e < EXPONENT_MIN as isize {
            Err(Error::ExponentOverflow(s))
        } else {
            Ok(BigFloat {
                m,
                e: e as Exponent,
                s,
            })
        }
    }

    /// Multiplies the number by 2^n.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn mul_pow2(&self, n: isize) -> Result<Self, Error> {
        if self.is_zero() {
            Ok(*self)
        } else {
            Self::compose(self.m, self.e as isize + n, self.s)
        }
    }

    /// Compares the absolute values of `self` and `d2`.
    /// Returns a positive value if `|self| > |d2|`, a negative value
    /// if `|self| < |d2|`, and 0 otherwise.
    pub fn abs_cmp(&self, d2: &Self) -> SignedWord {
        if self.is_zero() {
            return if d2.is_zero() { 0 } else { -1 };
        }
        if d2.is_zero() {
            return 1;
        }
        if self.e != d2.e {
            return self.e as SignedWord - d2.e as SignedWord;
        }
        self.m.abs_cmp(&d2.m)
    }

    /// Compares `self` to `d2`. Returns a positive value if `self` > `d2`,
    /// a negative value if `self` < `d2`, and 0 otherwise.
    pub fn cmp(&self, d2: &Self) -> SignedWord {
        if self.s != d2.s {
            return self.s.to_int() as SignedWord;
        }
        let cmp = self.abs_cmp(d2);
        if self.s.is_negative() {
            -cmp
        } else {
            cmp
        }
    }

    /// Adds `d2` to `self` and returns the correctly rounded result.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn add(&self, d2: &Self) -> Result<Self, Error> {
        self.add_sub(d2, 1)
    }

    /// Subtracts `d2` from `self` and returns the correctly rounded result.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn sub(&self, d2: &Self) -> Result<Self, Error> {
        self.add_sub(d2, -1)
    }

    fn add_sub(&self, d2: &Self, op: i8) -> Result<Self, Error> {
        let mut s2 = d2.s;
        if op < 0 {
            s2 = s2.invert();
        }

        if self.is_zero() {
            let mut ret = *d2;
            ret.set_sign(s2);
            return Ok(ret);
        }
        if d2.is_zero() {
            return Ok(*self);
        }

        if self.s == s2 {
            // magnitudes are added
            let (big, small) = if self.abs_cmp(d2) >= 0 { (self, d2) } else { (d2, self) };
            let d = big.e as isize - small.e as isize;
            debug_assert!(d >= 0);

            if d > Self::precision() as isize + 2 {
                // the small operand is beyond the rounding position
                let mut ret = *big;
                ret.s = self.s;
                return Ok(ret);
            }

            match big.m.abs_add(&small.m, d as usize) {
                Some((e_adj, m)) => {
                    Self::compose(m, big.e as isize + WORD_BIT_SIZE as isize + e_adj, self.s)
                }
                None => Ok(Self::new()),
            }
        } else {
            // magnitudes are subtracted
            let cmp = self.abs_cmp(d2);
            if cmp == 0 {
                return Ok(Self::new());
            }

            let (big, small, s) = if cmp > 0 { (self, d2, self.s) } else { (d2, self, s2) };
            let d = big.e as isize - small.e as isize;

            if d > Self::precision() as isize + 2 {
                let mut ret = *big;
                ret.s = s;
                return Ok(ret);
            }

            match big.m.abs_sub(&small.m, d as usize) {
                Some((e_adj, m)) => {
                    Self::compose(m, big.e as isize + WORD_BIT_SIZE as isize + e_adj, s)
                }
                None => Ok(Self::new()),
            }
        }
    }

    /// Multiplies `self` by `d2` and returns the correctly rounded result.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn mul(&self, d2: &Self) -> Result<Self, Error> {
        if self.is_zero() || d2.is_zero() {
            return Ok(Self::new());
        }

        let s = if self.s == d2.s { Sign::Pos } else { Sign::Neg };

        match self.m.mul(&d2.m) {
            Some((e_adj, m)) => Self::compose(m, self.e as isize + d2.e as isize + e_adj, s),
            None => Ok(Self::new()),
        }
    }

    /// Divides `self` by `d2` and returns the correctly rounded result.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `d2` is zero (`self` may also be zero).
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn div(&self, d2: &Self) -> Result<Self, Error> {
        if d2.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.is_zero() {
            return Ok(Self::new());
        }

        let s = if self.s == d2.s { Sign::Pos } else { Sign::Neg };

        match self.m.div(&d2.m) {
            Some((e_adj, m)) => Self::compose(
                m,
                self.e as isize - d2.e as isize + WORD_BIT_SIZE as isize + e_adj,
                s,
            ),
            None => Ok(Self::new()),
        }
    }

    /// Returns 1 divided by `self`.
    ///
    /// ## Errors
    ///
    ///  - DivisionByZero: `self` is zero.
    ///  - ExponentOverflow: the resulting exponent goes out of range.
    pub fn reciprocal(&self) -> Result<Self, Error> {
        Self::one().div(self)
    }

    /// Constructs a number from an f64 value. The conversion is exact.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: `f` is infinite.
    ///  - OutOfDomain: `f` is NaN.
    pub fn from_f64(f: f64) -> Result<Self, Error> {
        debug_assert!(M >= 2);

        if f == 0.0 {
            return Ok(Self::new());
        }

        let u = f.to_bits();
        let s = if u >> 63 != 0 { Sign::Neg } else { Sign::Pos };
        let exponent = (u >> 52 & 0x7ff) as isize;
        let mantissa = u << 12 >> 12;

        if exponent == 0x7ff {
            return if mantissa == 0 {
                Err(Error::ExponentOverflow(s))
            } else {
                Err(Error::OutOfDomain)
            };
        }

        // the value is m64 * 2^t; subnormal values have no implicit leading bit
        let (m64, t) = if exponent == 0 {
            (mantissa, 1 - 1075)
        } else {
            (mantissa | 1 << 52, exponent - 1075)
        };

        let lz = m64.leading_zeros() as usize;
        let m64 = m64 << lz;

        let mut m = [0; M];
        m[M - 1] = (m64 >> WORD_BIT_SIZE) as Word;
        m[M - 2] = m64 as Word;

        Self::compose(Mantissa::from_words(&m), t + 64 - lz as isize, s)
    }

    /// Converts the number to the nearest f64 value (rounding half to even).
    /// Returns None if the magnitude does not fit the range of f64, including
    /// when it falls below the smallest subnormal.
    pub fn to_f64(&self) -> Option<f64> {
        debug_assert!(M >= 2);

        if self.is_zero() {
            return Some(0.0);
        }

        let e = self.e as isize;
        let digits = self.m.digits();
        let m64 = ((digits[M - 1] as u64) << WORD_BIT_SIZE) | digits[M - 2] as u64;
        let sticky = digits[..M - 2].iter().any(|&w| w != 0);

        if e - 1 > 1023 {
            return None;
        }

        // number of low bits of m64 that do not fit the f64 mantissa
        let drop = if e >= -1021 { 11 } else { 11 + (-1021 - e) as usize };

        let (mut q, g, r) = if drop >= 64 {
            if drop > 64 {
                return None;
            }
            (0u64, m64 >> 63 & 1, m64 << 1 != 0 || sticky)
        } else {
            (
                m64 >> drop,
                m64 >> (drop - 1) & 1,
                m64 & ((1u64 << (drop - 1)) - 1) != 0 || sticky,
            )
        };

        if g == 1 && (r || q & 1 == 1) {
            q += 1;
        }
        if q == 0 {
            // rounded away below the smallest subnormal
            return None;
        }

        let sign_bit = if self.s.is_negative() { 1u64 << 63 } else { 0 };

        let u = if e >= -1021 {
            let mut e = e;
            if q == 1 << 53 {
                q >>= 1;
                e += 1;
                if e - 1 > 1023 {
                    return None;
                }
            }
            let ebits = (e + 1022) as u64;
            sign_bit | ebits << 52 | (q & ((1 << 52) - 1))
        } else if q >> 52 != 0 {
            // rounding pushed the value up to the smallest normal
            sign_bit | 1 << 52
        } else {
            sign_bit | q
        };

        Some(f64::from_bits(u))
    }

    /// Returns the fractional part of the number.
    pub fn fract(&self) -> Self {
        if self.e <= 0 {
            return *self;
        }

        let e = self.e as usize;
        if e >= Self::precision() {
            return Self::new();
        }

        match self.m.fract(e) {
            Some((e_adj, m)) => BigFloat {
                m,
                e: (self.e as isize + e_adj) as Exponent,
                s: self.s,
            },
            None => Self::new(),
        }
    }

    /// Returns the integer part of the number as usize.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the integer part does not fit usize.
    pub fn int_as_usize(&self) -> Result<usize, Error> {
        debug_assert!(M >= 2);

        if self.is_zero() || self.e <= 0 {
            return Ok(0);
        }

        let e = self.e as usize;
        if e > usize::BITS as usize {
            return Err(Error::ExponentOverflow(self.s));
        }

        let digits = self.m.digits();
        let m64 = ((digits[M - 1] as u64) << WORD_BIT_SIZE) | digits[M - 2] as u64;

        Ok((m64 >> (64 - e)) as usize)
    }

    /// Generates a random normalized number with the exponent in the range
    /// [exp_from, exp_to] and a random sign.
    #[cfg(feature = "random")]
    pub fn random_normal(exp_from: Exponent, exp_to: Exponent) -> Self {
        let mut m = [0; M];
        for v in m.iter_mut() {
            *v = rand::random::<Word>();
        }
        m[M - 1] |= WORD_SIGNIFICANT_BIT;

        let e = if exp_to > exp_from {
            let diff = exp_to as i64 - exp_from as i64 + 1;
            (rand::random::<u64>() % diff as u64) as Exponent + exp_from
        } else {
            exp_from
        };

        let s = if rand::random::<u8>() & 1 == 0 { Sign::Pos } else { Sign::Neg };

        BigFloat {
            m: Mantissa::from_words(&m),
            e,
            s,
        }
    }
}

impl<const M: usize> Default for BigFloat<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const M: usize> core::ops::Neg for BigFloat<M> {
    type Output = BigFloat<M>;

    fn neg(self) -> Self::Output {
        BigFloat::neg(&self)
    }
}

impl<const M: usize> PartialOrd for BigFloat<M> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(Ord::cmp(self, other))
    }
}

impl<const M: usize> Ord for BigFloat<M> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        let r = BigFloat::cmp(self, other);
        r.cmp(&0)
    }
}
