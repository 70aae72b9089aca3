//! Fixed-width mantissa of a number.

use itertools::izip;

use crate::common::buf::WordBuf;
use crate::common::util::{add_carry, bit_len, shift_slice_left, shift_slice_right, sub_borrow};
use crate::defs::{SignedWord, Word, WORD_BIT_SIZE, WORD_MAX, WORD_SIGNIFICANT_BIT};

use super::div::div_rem;
use super::mul::mul_slices;

/// Mantissa of a number: `M` words, least significant word first.
/// A nonzero mantissa always has the most significant bit set and represents
/// a binary fraction in the range [0.5, 1). Zero has all words set to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mantissa<const M: usize> {
    m: [Word; M],
}

impl<const M: usize> Mantissa<M> {
    /// New mantissa with all words set to zero.
    pub fn new() -> Self {
        Mantissa { m: [0; M] }
    }

    /// Mantissa length in bits.
    pub const fn bit_len() -> usize {
        M * WORD_BIT_SIZE
    }

    /// Number of decimal digits representable at this width: floor(M*32*log10(2)).
    pub fn max_digits() -> usize {
        (Self::bit_len() as u64 * 301029995 / 1000000000) as usize
    }

    /// Returns true if the mantissa is zero.
    /// A nonzero mantissa is normalized, so the top word alone decides.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.m[M - 1] == 0
    }

    /// Returns true if the most significant bit is set.
    pub fn is_normal(&self) -> bool {
        self.m[M - 1] & WORD_SIGNIFICANT_BIT != 0
    }

    /// Words of the mantissa.
    pub fn digits(&self) -> &[Word] {
        &self.m
    }

    pub(crate) fn from_words(w: &[Word]) -> Self {
        debug_assert_eq!(w.len(), M);
        let mut m = [0; M];
        m.copy_from_slice(w);
        Mantissa { m }
    }

    /// Interprets `buf` as a fixed-point fraction with the binary point at the top
    /// of the buffer, normalizes it, and rounds half-to-even to `M` words.
    /// `sticky` accounts for nonzero bits already discarded below `buf`.
    /// Returns the exponent adjustment relative to the input fraction,
    /// or None if `buf` is zero.
    pub(crate) fn from_buf_round(buf: &mut [Word], sticky: bool) -> Option<(isize, Self)> {
        debug_assert!(buf.len() >= M);

        let l = bit_len(buf);
        if l == 0 {
            return None;
        }

        let lz = buf.len() * WORD_BIT_SIZE - l;
        shift_slice_left(buf, lz);

        let cut = buf.len() - M;
        let mut round_up = false;
        if cut > 0 {
            let g = buf[cut - 1] & WORD_SIGNIFICANT_BIT != 0;
            let mut rest = buf[cut - 1] & !WORD_SIGNIFICANT_BIT != 0 || sticky;
            if !rest {
                rest = buf[..cut - 1].iter().any(|&w| w != 0);
            }
            let lsb = buf[cut] & 1 != 0;
            round_up = g && (rest || lsb);
        }

        let mut m = [0; M];
        m.copy_from_slice(&buf[cut..]);

        let mut e_adj = -(lz as isize);

        if round_up {
            let mut c = 1;
            for w in m.iter_mut() {
                c = add_carry(*w, 0, c, w);
                if c == 0 {
                    break;
                }
            }
            if c > 0 {
                m[M - 1] = WORD_SIGNIFICANT_BIT;
                e_adj += 1;
            }
        }

        Some((e_adj, Mantissa { m }))
    }

    /// Magnitude comparison of two mantissas.
    pub fn abs_cmp(&self, d2: &Self) -> SignedWord {
        for (a, b) in izip!(self.m.iter().rev(), d2.m.iter().rev()) {
            let diff = *a as SignedWord - *b as SignedWord;
            if diff != 0 {
                return diff;
            }
        }
        0
    }

    // Scratch buffer with self placed below one reserved carry word,
    // and m2 moved `shift` bits to the right of self.
    fn aligned_bufs(&self, m2: &Self, shift: usize) -> (WordBuf, WordBuf) {
        let l = M + shift / WORD_BIT_SIZE + 2;

        let mut b1 = WordBuf::new(l);
        b1[l - 1 - M..l - 1].copy_from_slice(&self.m);

        let mut b2 = WordBuf::new(l);
        b2[l - M..].copy_from_slice(&m2.m);
        shift_slice_right(&mut b2, WORD_BIT_SIZE + shift);

        (b1, b2)
    }

    /// Adds `m2`, shifted `shift` bits to the right, to `self`. The sum is computed
    /// exactly and then rounded. The returned exponent adjustment is relative to
    /// the exponent of `self` plus the word size (the reserved carry word).
    pub fn abs_add(&self, m2: &Self, shift: usize) -> Option<(isize, Self)> {
        let (mut b1, b2) = self.aligned_bufs(m2, shift);

        let mut c = 0;
        for (a, b) in izip!(b1.iter_mut(), b2.iter()) {
            c = add_carry(*a, *b, c, a);
        }
        debug_assert_eq!(c, 0);

        Self::from_buf_round(&mut b1, false)
    }

    /// Subtracts `m2`, shifted `shift` bits to the right, from `self`.
    /// `self` must not be smaller than the shifted `m2`. The difference is exact
    /// before rounding, so cancellation loses no bits. The returned exponent
    /// adjustment follows the same convention as in [Self::abs_add].
    pub fn abs_sub(&self, m2: &Self, shift: usize) -> Option<(isize, Self)> {
        let (mut b1, b2) = self.aligned_bufs(m2, shift);

        let mut c = 0;
        for (a, b) in izip!(b1.iter_mut(), b2.iter()) {
            c = sub_borrow(*a, *b, c, a);
        }
        debug_assert_eq!(c, 0);

        Self::from_buf_round(&mut b1, false)
    }

    /// Multiplies `self` by `m2` with a single half-to-even rounding of the
    /// exact double-width product. The exponent adjustment is relative to the
    /// sum of the operand exponents.
    pub fn mul(&self, m2: &Self) -> Option<(isize, Self)> {
        let mut b = WordBuf::new(2 * M);
        mul_slices(&self.m, &m2.m, &mut b);
        Self::from_buf_round(&mut b, false)
    }

    /// Divides `self` by `m2`. The quotient carries two extra words below the
    /// result, and a nonzero remainder contributes sticky, so the rounding is
    /// correct. The exponent adjustment is relative to the difference of the
    /// operand exponents plus the word size.
    pub fn div(&self, m2: &Self) -> Option<(isize, Self)> {
        let mut n = WordBuf::new(2 * M + 1);
        n[M + 1..].copy_from_slice(&self.m);

        let (mut q, r) = div_rem(&n, &m2.m);
        let sticky = r.iter().any(|&w| w != 0);

        Self::from_buf_round(&mut q, sticky)
    }

    /// Clears the top `n` bits and renormalizes what remains.
    /// The exponent adjustment is relative to the exponent of `self`.
    pub fn fract(&self, n: usize) -> Option<(isize, Self)> {
        let mut b = WordBuf::new(M);
        b.copy_from_slice(&self.m);

        let mut rem = n;
        for w in b.iter_mut().rev() {
            if rem == 0 {
                break;
            }
            if rem >= WORD_BIT_SIZE {
                *w = 0;
                rem -= WORD_BIT_SIZE;
            } else {
                *w &= WORD_MAX >> rem;
                rem = 0;
            }
        }

        Self::from_buf_round(&mut b, false)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn from_top_words(w2: Word, w1: Word) -> Mantissa<4> {
        let mut m = [0; 4];
        m[3] = w2;
        m[2] = w1;
        Mantissa::from_words(&m)
    }

    #[test]
    fn test_from_buf_round() {
        // exact value, no rounding
        let mut buf = [0, 0, 0, 0, 1, 0];
        let (e_adj, m) = Mantissa::<4>::from_buf_round(&mut buf, false).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize * 2 - 1));
        assert!(m.is_normal());
        assert_eq!(m.digits(), &[0, 0, 0, WORD_SIGNIFICANT_BIT]);

        // tie rounds to even (down)
        let mut buf = [0, WORD_SIGNIFICANT_BIT, 0, 0, 0, WORD_SIGNIFICANT_BIT];
        let (e_adj, m) = Mantissa::<4>::from_buf_round(&mut buf, false).unwrap();
        assert_eq!(e_adj, 0);
        assert_eq!(m.digits(), &[0, 0, 0, WORD_SIGNIFICANT_BIT]);

        // lsb set: the tie rounds up
        let mut buf = [0, WORD_SIGNIFICANT_BIT, 1, 0, 0, WORD_SIGNIFICANT_BIT];
        let (e_adj, m) = Mantissa::<4>::from_buf_round(&mut buf, false).unwrap();
        assert_eq!(e_adj, 0);
        assert_eq!(m.digits(), &[2, 0, 0, WORD_SIGNIFICANT_BIT]);

        // sticky breaks the tie upward
        let mut buf = [0, WORD_SIGNIFICANT_BIT, 0, 0, 0, WORD_SIGNIFICANT_BIT];
        let (e_adj, m) = Mantissa::<4>::from_buf_round(&mut buf, true).unwrap();
        assert_eq!(e_adj, 0);
        assert_eq!(m.digits(), &[1, 0, 0, WORD_SIGNIFICANT_BIT]);

        // rounding up overflows into a new binary position
        let mut buf = [0, WORD_MAX, WORD_MAX, WORD_MAX, WORD_MAX, WORD_MAX];
        let (e_adj, m) = Mantissa::<4>::from_buf_round(&mut buf, false).unwrap();
        assert_eq!(e_adj, 1);
        assert_eq!(m.digits(), &[0, 0, 0, WORD_SIGNIFICANT_BIT]);

        // zero
        let mut buf = [0, 0, 0, 0, 0];
        assert!(Mantissa::<4>::from_buf_round(&mut buf, false).is_none());
    }

    #[test]
    fn test_abs_add_sub() {
        let one = from_top_words(WORD_SIGNIFICANT_BIT, 0);

        // 0.5 + 0.5 = 1.0: mantissa unchanged, exponent grows by one
        let (e_adj, m) = one.abs_add(&one, 0).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize) + 1);
        assert_eq!(m, one);

        // 0.5 + 0.25 = 0.75
        let (e_adj, m) = one.abs_add(&one, 1).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize));
        assert_eq!(m, from_top_words(0xC0000000, 0));

        // 0.75 - 0.5 = 0.25, normalized back
        let m34 = from_top_words(0xC0000000, 0);
        let (e_adj, m) = m34.abs_sub(&one, 0).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize) - 1);
        assert_eq!(m, one);

        // full cancellation
        assert!(one.abs_sub(&one, 0).is_none());

        // cancellation of all but the lowest bit is still exact
        let mut w = [WORD_MAX; 4];
        let a = Mantissa::<4>::from_words(&w);
        w[0] = WORD_MAX - 1;
        let b = Mantissa::from_words(&w);
        let (e_adj, m) = a.abs_sub(&b, 0).unwrap();
        assert_eq!(
            e_adj,
            -(WORD_BIT_SIZE as isize) - (Mantissa::<4>::bit_len() as isize - 1)
        );
        assert_eq!(m, one);
    }

    #[test]
    fn test_mul_div() {
        let half = from_top_words(WORD_SIGNIFICANT_BIT, 0);

        // 0.5 * 0.5 = 0.25, renormalized with adjustment -1
        let (e_adj, m) = half.mul(&half).unwrap();
        assert_eq!(e_adj, -1);
        assert_eq!(m, half);

        // 0.75 * 0.75 = 0.5625 in [0.5, 1): no adjustment
        let m34 = from_top_words(0xC0000000, 0);
        let (e_adj, m) = m34.mul(&m34).unwrap();
        assert_eq!(e_adj, 0);
        assert_eq!(m, from_top_words(0x90000000, 0));

        // 0.5625 / 0.75 = 0.75
        let (e_adj, m) = m.div(&m34).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize));
        assert_eq!(m, m34);

        // 0.5 / 0.75 = 2/3: non-terminating fraction, rounded
        let (e_adj, m) = half.div(&m34).unwrap();
        assert_eq!(e_adj, -(WORD_BIT_SIZE as isize));
        assert_eq!(m.digits(), &[0xAAAAAAAB, 0xAAAAAAAA, 0xAAAAAAAA, 0xAAAAAAAA]);
    }

    #[test]
    fn test_fract() {
        // value 1.5: mantissa 0.75 with exponent 1; the fractional part is 0.5
        let m34 = from_top_words(0xC0000000, 0);
        let (e_adj, m) = m34.fract(1).unwrap();
        assert_eq!(e_adj, -1);
        assert_eq!(m, from_top_words(WORD_SIGNIFICANT_BIT, 0));

        // no fractional part
        assert!(from_top_words(WORD_SIGNIFICANT_BIT, 0).fract(1).is_none());
    }

    #[test]
    fn test_abs_cmp() {
        let a = from_top_words(WORD_SIGNIFICANT_BIT, 1);
        let b = from_top_words(WORD_SIGNIFICANT_BIT, 2);
        assert!(a.abs_cmp(&b) < 0);
        assert!(b.abs_cmp(&a) > 0);
        assert_eq!(a.abs_cmp(&a), 0);
    }
}
