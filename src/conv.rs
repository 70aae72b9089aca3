//! Conversion between binary and decimal representation.

use crate::common::buf::WordBuf;
use crate::common::util::shift_slice_left;
use crate::defs::{DoubleWord, Error, Exponent, Sign, Word, WORD_BIT_SIZE};
use crate::mantissa::Mantissa;
use crate::num::BigFloat;

// ten_pow(78) has 260 bits, slightly more than the mantissa of BigFloat256.
// The integer ratio below is log10(2) with 9 digits of precision.
const LOG10_2_NOM: i128 = 301029995;
const LOG10_2_DENOM: i128 = 1_000_000_000;

// buf = buf*f + a, returns the carry word.
fn mul_add_word(buf: &mut [Word], f: Word, a: Word) -> Word {
    let mut c = a as DoubleWord;
    for v in buf.iter_mut() {
        let d = *v as DoubleWord * f as DoubleWord + c;
        *v = d as Word;
        c = d >> WORD_BIT_SIZE;
    }
    c as Word
}

// Rounds the digit string to `sig` significant decimal digits,
// half away from zero. Returns true if the carry went past
// the most significant digit.
fn round_digits(digits: &mut Vec<u8>, sig: usize) -> bool {
    if digits.len() <= sig {
        return false;
    }

    let round_up = digits[sig] >= 5;
    digits.truncate(sig);

    if round_up {
        for d in digits.iter_mut().rev() {
            if *d == 9 {
                *d = 0;
            } else {
                *d += 1;
                return false;
            }
        }

        // all nines become 1 followed by zeroes
        digits[0] = 1;
        return true;
    }

    false
}

impl<const M: usize> BigFloat<M> {
    /// Returns 10^n.
    pub(crate) fn ten_pow(n: usize) -> Result<Self, Error> {
        Self::from_word(10).powi(n)
    }

    // Multiplies `self` by 10^t. The factor is split in two parts so that
    // its exponent stays in range even when the exponent of `self` is
    // near the boundary.
    fn scale_by_ten_pow(&self, t: isize) -> Result<Self, Error> {
        let mut ret = *self;
        for part in [t / 2, t - t / 2] {
            if part != 0 {
                let f = Self::ten_pow(part.unsigned_abs())?;
                ret = if part > 0 { ret.mul(&f)? } else { ret.div(&f)? };
            }
        }
        Ok(ret)
    }

    /// Converts decimal digits to a number. The digits represent
    /// the value 0.digits * 10^e.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: the value is too large or too small.
    pub(crate) fn conv_from_dec(sign: Sign, digits: &[u8], e: isize) -> Result<Self, Error> {
        let lz = digits.iter().take_while(|&&d| d == 0).count();
        let digits = &digits[lz..];
        if digits.is_empty() {
            return Ok(Self::new());
        }
        let e = e.saturating_sub(lz as isize);

        // an integer made of the digits, two digits for the rounding tail
        let used = digits.len().min(Mantissa::<M>::max_digits() + 2);

        let l = M + 2;
        let mut buf = WordBuf::new(l);
        for &d in digits[..used].iter() {
            let c = mul_add_word(&mut buf, 10, d as Word);
            debug_assert_eq!(c, 0);
        }

        // the buffer fraction is i/2^(32*l), hence i = f*2^(32*l)
        let mut val = match Mantissa::from_buf_round(&mut buf, false) {
            Some((e_adj, m)) => BigFloat {
                m,
                e: ((l * WORD_BIT_SIZE) as isize + e_adj) as Exponent,
                s: Sign::Pos,
            },
            None => return Ok(Self::new()),
        };

        let t = e.saturating_sub(used as isize);
        if t != 0 {
            val = val.scale_by_ten_pow(t)?;
        }

        val.set_sign(sign);

        Ok(val)
    }

    /// Converts the number to decimal digits `d1 d2 d3 ...` and a decimal
    /// exponent `k` such that the value is `(+/-) d1.d2 d3 ... * 10^k`
    /// with `d1` nonzero. Zero gives an empty digit string.
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: on rare occasions scaling by a power of ten
    ///    can overflow near the exponent boundary.
    pub(crate) fn conv_to_dec(&self) -> Result<(Sign, Vec<u8>, isize), Error> {
        if self.is_zero() {
            return Ok((Sign::Pos, Vec::new(), 0));
        }

        // estimate of the decimal exponent, possibly off by 1
        let mut k =
            ((self.exponent() as i128 - 1) * LOG10_2_NOM).div_euclid(LOG10_2_DENOM) as isize;

        let mut v = self.abs();
        if k != 0 {
            v = v.scale_by_ten_pow(-k)?;
        }

        let one = Self::one();
        let ten = Self::from_word(10);

        while v.abs_cmp(&ten) >= 0 {
            v = v.div(&ten)?;
            k += 1;
        }
        while v.abs_cmp(&one) < 0 {
            v = v.mul(&ten)?;
            k -= 1;
        }

        // v is in [1, 10), the first digit is the integer part
        let n_int = v.exponent() as usize;
        debug_assert!(n_int >= 1 && n_int <= 4);

        let digits_cnt = Mantissa::<M>::max_digits() + 1;
        let mut digits = Vec::with_capacity(digits_cnt);

        let mut buf = WordBuf::new(M);
        buf.copy_from_slice(v.m.digits());

        digits.push((buf[M - 1] >> (WORD_BIT_SIZE - n_int)) as u8);
        shift_slice_left(&mut buf, n_int);

        // the buffer holds the fraction of v, take digits by multiplying by 10
        for _ in 1..digits_cnt {
            let d = mul_add_word(&mut buf, 10, 0);
            debug_assert!(d < 10);
            digits.push(d as u8);
        }

        // the two last digits absorb the scaling error
        let sig = Mantissa::<M>::max_digits() - 2;
        if round_digits(&mut digits, sig.max(1)) {
            k += 1;
        }

        while digits.len() > 1 && *digits.last().unwrap() == 0 {
            digits.pop();
        }

        Ok((self.sign(), digits, k))
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::num::BigFloat256;

    #[test]
    fn test_mul_add_word() {
        let mut buf = [0, 0, 0];
        for &d in [1, 2, 3].iter() {
            assert_eq!(mul_add_word(&mut buf, 10, d), 0);
        }
        assert_eq!(buf, [123, 0, 0]);

        // 2^32 * 10 + 5
        let mut buf = [0, 1];
        assert_eq!(mul_add_word(&mut buf, 10, 5), 0);
        assert_eq!(buf, [5, 10]);

        // carry out of the buffer
        let mut buf = [Word::MAX];
        assert_eq!(mul_add_word(&mut buf, 10, 0), 9);
        assert_eq!(buf, [Word::MAX - 9]);
    }

    #[test]
    fn test_round_digits() {
        let mut d = vec![1, 2, 5, 4, 9];
        assert!(!round_digits(&mut d, 3));
        assert_eq!(d, [1, 2, 5]);

        let mut d = vec![1, 2, 5, 5, 0];
        assert!(!round_digits(&mut d, 3));
        assert_eq!(d, [1, 2, 6]);

        let mut d = vec![1, 9, 9, 5];
        assert!(!round_digits(&mut d, 3));
        assert_eq!(d, [2, 0, 0]);

        let mut d = vec![9, 9, 9, 5];
        assert!(round_digits(&mut d, 3));
        assert_eq!(d, [1, 0, 0]);

        let mut d = vec![1, 2, 3];
        assert!(!round_digits(&mut d, 5));
        assert_eq!(d, [1, 2, 3]);
    }

    #[test]
    fn test_conv_from_dec() {
        // 0.125 * 10^1 = 1.25
        let d = BigFloat256::conv_from_dec(Sign::Pos, &[1, 2, 5], 1).unwrap();
        let f = BigFloat256::from_f64(1.25).unwrap();
        assert_eq!(d, f);

        // 0.5 * 10^0
        let d = BigFloat256::conv_from_dec(Sign::Neg, &[5], 0).unwrap();
        let f = BigFloat256::from_f64(-0.5).unwrap();
        assert_eq!(d, f);

        // leading zeroes do not change the value
        let d1 = BigFloat256::conv_from_dec(Sign::Pos, &[0, 0, 1, 2, 5], 3).unwrap();
        let d2 = BigFloat256::conv_from_dec(Sign::Pos, &[1, 2, 5], 1).unwrap();
        assert_eq!(d1, d2);

        // all zero digits give zero
        let d = BigFloat256::conv_from_dec(Sign::Neg, &[0, 0, 0], 5).unwrap();
        assert!(d.is_zero());
        assert!(d.sign().is_positive());

        // an integer value
        let d = BigFloat256::conv_from_dec(Sign::Pos, &[1, 2, 3, 4, 5], 5).unwrap();
        let f = BigFloat256::from_i64(12345);
        assert_eq!(d, f);

        // a long tail beyond the mantissa precision still rounds correctly:
        // 1 followed by many zeroes and a trailing 1 is rounded to 1
        let mut digits = vec![0u8; 100];
        digits[0] = 1;
        digits[99] = 1;
        let d = BigFloat256::conv_from_dec(Sign::Pos, &digits, 1).unwrap();
        assert_eq!(d, BigFloat256::one());

        // out of range
        assert!(matches!(
            BigFloat256::conv_from_dec(Sign::Pos, &[1], isize::MAX / 2),
            Err(Error::ExponentOverflow(Sign::Pos))
        ));
    }

    #[test]
    fn test_conv_to_dec() {
        // 1.25
        let d = BigFloat256::from_f64(1.25).unwrap();
        let (s, digits, k) = d.conv_to_dec().unwrap();
        assert!(s.is_positive());
        assert_eq!(digits, [1, 2, 5]);
        assert_eq!(k, 0);

        // -100
        let d = BigFloat256::from_i64(-100);
        let (s, digits, k) = d.conv_to_dec().unwrap();
        assert!(s.is_negative());
        assert_eq!(digits, [1]);
        assert_eq!(k, 2);

        // 1.5 * 10^10
        let d = BigFloat256::from_f64(1.5e10).unwrap();
        let (s, digits, k) = d.conv_to_dec().unwrap();
        assert!(s.is_positive());
        assert_eq!(digits, [1, 5]);
        assert_eq!(k, 10);

        // zero
        let d = BigFloat256::new();
        let (s, digits, k) = d.conv_to_dec().unwrap();
        assert!(s.is_positive());
        assert!(digits.is_empty());
        assert_eq!(k, 0);

        // 1/8 = 0.125
        let d = BigFloat256::from_f64(0.125).unwrap();
        let (_, digits, k) = d.conv_to_dec().unwrap();
        assert_eq!(digits, [1, 2, 5]);
        assert_eq!(k, -1);

        // conversion is the inverse of parsing for a value
        // that is not representable exactly in binary
        let digits_in: Vec<u8> = vec![3, 3, 3, 3, 3, 3, 3];
        let d = BigFloat256::conv_from_dec(Sign::Pos, &digits_in, 1).unwrap();
        let (_, digits, k) = d.conv_to_dec().unwrap();
        assert_eq!(digits, digits_in);
        assert_eq!(k, 0);
    }

    #[test]
    fn test_conv_roundtrip_random() {
        for _ in 0..100 {
            let d = BigFloat256::random_normal(-300, 300);
            if d.is_zero() {
                continue;
            }
            let (s, digits, k) = d.conv_to_dec().unwrap();
            let d2 = BigFloat256::conv_from_dec(s, &digits, k + 1).unwrap();

            // the round trip keeps all but the last couple of digits
            let eps = d.mul_pow2(-(BigFloat256::precision() as isize) + 16).unwrap();
            assert!(d.sub(&d2).unwrap().abs().abs_cmp(&eps.abs()) <= 0);
        }
    }
}
