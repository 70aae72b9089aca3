//! Multiplication of word slices.

use crate::defs::{DoubleWord, Word, WORD_BIT_SIZE};

// Schoolbook multiplication: m3 = m1 * m2.
// m3 must be at least m1.len() + m2.len() words long.
pub(super) fn mul_slices(m1: &[Word], m2: &[Word], m3: &mut [Word]) {
    m3.fill(0);

    for (i, d1mi) in m1.iter().enumerate() {
        let d1mi = *d1mi as DoubleWord;
        if d1mi == 0 {
            continue;
        }

        let mut k = 0;
        for (m2j, m3ij) in m2.iter().zip(m3[i..].iter_mut()) {
            let m = d1mi * (*m2j as DoubleWord) + *m3ij as DoubleWord + k;
            *m3ij = m as Word;
            k = m >> WORD_BIT_SIZE;
        }

        m3[i + m2.len()] += k as Word;
    }
}

// m3 = m1 * d. m3 must be m1.len() + 1 words long.
pub(super) fn mul_by_word(m1: &[Word], d: DoubleWord, m3: &mut [Word]) {
    let mut m: DoubleWord = 0;
    for (v1, v2) in m1.iter().zip(m3.iter_mut()) {
        m = *v1 as DoubleWord * d + (m >> WORD_BIT_SIZE);
        *v2 = m as Word;
    }
    m3[m1.len()] = (m >> WORD_BIT_SIZE) as Word;
}
