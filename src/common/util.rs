//! Auxiliary functions.

use crate::defs::{DoubleWord, Word, WORD_BASE, WORD_BIT_SIZE};

#[inline(always)]
pub fn add_carry(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let mut s = c as DoubleWord + a as DoubleWord + b as DoubleWord;
    if s >= WORD_BASE {
        s -= WORD_BASE;
        *r = s as Word;
        1
    } else {
        *r = s as Word;
        0
    }
}

#[inline(always)]
pub fn sub_borrow(a: Word, b: Word, c: Word, r: &mut Word) -> Word {
    let v1 = a as DoubleWord;
    let v2 = b as DoubleWord + c as DoubleWord;

    if v1 < v2 {
        *r = (v1 + WORD_BASE - v2) as Word;
        1
    } else {
        *r = (v1 - v2) as Word;
        0
    }
}

// Shift m left by n bits.
pub fn shift_slice_left(m: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    if idx >= m.len() {
        m.fill(0);
    } else if shift > 0 {
        for i in (idx..m.len()).rev() {
            let mut d = m[i - idx] << shift;
            if i > idx {
                d |= m[i - idx - 1] >> (WORD_BIT_SIZE - shift);
            }
            m[i] = d;
        }
        m[..idx].fill(0);
    } else if idx > 0 {
        let r = m.len() - idx;
        m.copy_within(0..r, idx);
        m[..idx].fill(0);
    }
}

// Shift m right by n bits.
pub fn shift_slice_right(m: &mut [Word], n: usize) {
    let idx = n / WORD_BIT_SIZE;
    let shift = n % WORD_BIT_SIZE;
    if idx >= m.len() {
        m.fill(0);
    } else if shift > 0 {
        let l = m.len();
        for i in 0..l - idx {
            let mut d = m[i + idx] >> shift;
            if i + idx + 1 < l {
                d |= m[i + idx + 1] << (WORD_BIT_SIZE - shift);
            }
            m[i] = d;
        }
        m[l - idx..].fill(0);
    } else if idx > 0 {
        let r = m.len() - idx;
        m.copy_within(idx.., 0);
        m[r..].fill(0);
    }
}

/// Number of significant bits in the slice.
pub fn bit_len(m: &[Word]) -> usize {
    for (i, &w) in m.iter().enumerate().rev() {
        if w != 0 {
            return (i + 1) * WORD_BIT_SIZE - w.leading_zeros() as usize;
        }
    }
    0
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_carry_chains() {
        let mut r = 0;
        assert_eq!(add_carry(Word::MAX, 1, 0, &mut r), 1);
        assert_eq!(r, 0);
        assert_eq!(add_carry(Word::MAX, Word::MAX, 1, &mut r), 1);
        assert_eq!(r, Word::MAX);
        assert_eq!(add_carry(1, 2, 1, &mut r), 0);
        assert_eq!(r, 4);

        assert_eq!(sub_borrow(0, 1, 0, &mut r), 1);
        assert_eq!(r, Word::MAX);
        assert_eq!(sub_borrow(0, Word::MAX, 1, &mut r), 1);
        assert_eq!(r, 0);
        assert_eq!(sub_borrow(5, 2, 1, &mut r), 0);
        assert_eq!(r, 2);
    }

    #[test]
    fn test_shift_slice() {
        let mut m = [0x80000001, 1, 0x80000000];
        shift_slice_left(&mut m, 1);
        assert_eq!(m, [2, 3, 0]);

        let mut m = [1, 2, 3];
        shift_slice_left(&mut m, WORD_BIT_SIZE);
        assert_eq!(m, [0, 1, 2]);

        let mut m = [1, 2, 3];
        shift_slice_left(&mut m, 3 * WORD_BIT_SIZE);
        assert_eq!(m, [0, 0, 0]);

        let mut m = [2, 3, 0];
        shift_slice_right(&mut m, 1);
        assert_eq!(m, [0x80000001, 1, 0]);

        let mut m = [1, 2, 3];
        shift_slice_right(&mut m, WORD_BIT_SIZE);
        assert_eq!(m, [2, 3, 0]);
    }

    #[test]
    fn test_bit_len() {
        assert_eq!(bit_len(&[0, 0, 0]), 0);
        assert_eq!(bit_len(&[1, 0, 0]), 1);
        assert_eq!(bit_len(&[0, 0x80000000, 0]), 2 * WORD_BIT_SIZE);
        assert_eq!(bit_len(&[123, 0, 1]), 2 * WORD_BIT_SIZE + 1);
    }
}
