//! Long division of word slices.

use crate::common::buf::WordBuf;
use crate::defs::{DoubleWord, Word, WORD_BASE, WORD_BIT_SIZE};

use super::mul::mul_by_word;

// Integer division with remainder: m1 = q * m2 + r.
// Returns (q, r), where q is m1.len() - m2.len() + 1 words long,
// and r is m2.len() words long. m2 must not be zero.
pub(super) fn div_rem(m1: &[Word], m2: &[Word]) -> (WordBuf, WordBuf) {
    let l1 = m1.len();
    let l2 = m2.len();
    debug_assert!(l1 >= l2);

    let mut c: DoubleWord;
    let mut j: usize;
    let mut qh: DoubleWord;
    let mut k: DoubleWord;
    let mut rh: DoubleWord;

    let mut buf = WordBuf::new(l1 + l2 + 2);
    let (buf1, buf2) = buf.split_at_mut(l1 + 1);

    let n = l2 - 1;
    let m = l1 - 1;

    let mut m3 = WordBuf::new(m - n + 1);
    let mut rem = WordBuf::new(l2);

    if n == 0 {
        // division by a single word
        let d = m2[0] as DoubleWord;
        rh = 0;
        let mut j = l1;
        let mut iter = m1.iter().rev();
        let mut val = *iter.next().unwrap_or(&0) as DoubleWord;
        let mut m3iter = m3.iter_mut().rev();

        if val < d {
            rh = val;
            val = *iter.next().unwrap_or(&0) as DoubleWord;
            if let Some(v) = m3iter.next() {
                *v = 0;
            }
            rem[0] = rh as Word;
            j -= 1;
        }

        if j > 0 {
            loop {
                qh = rh * WORD_BASE + val;
                rh = qh % d;

                if let Some(v) = m3iter.next() {
                    *v = (qh / d) as Word;
                    rem[0] = rh as Word;
                } else {
                    break;
                }
                val = *iter.next().unwrap_or(&0) as DoubleWord;
            }
        } else {
            for v in m3iter {
                *v = 0;
            }
        }
    } else {
        // normalize: buf1 = m1 * d, buf2 = m2 * d,
        // so that d * m2[n] gets close to the word maximum
        let d = WORD_BASE / (m2[n] as DoubleWord + 1);

        if d == 1 {
            buf1[..l1].copy_from_slice(m1);
            buf2[..l2].copy_from_slice(m2);
            buf1[l1] = 0;
            buf2[l2] = 0;
        } else {
            mul_by_word(m1, d, buf1);
            mul_by_word(m2, d, buf2);
        }

        let v1 = buf2[n] as DoubleWord;
        let v2 = buf2[n - 1] as DoubleWord;

        j = m - n;
        let mut m3iter = m3.iter_mut().rev();
        let mut in_loop = false;
        let mut buf12;
        let mut buf11;
        let mut buf10;

        loop {
            buf12 = buf1[j + n + 1] as DoubleWord;
            buf11 = buf1[j + n] as DoubleWord;
            buf10 = buf1[j + n - 1] as DoubleWord;

            qh = buf12 * WORD_BASE + buf11;
            rh = qh % v1;
            qh /= v1;

            if qh >= WORD_BASE || (qh * v2 > WORD_BASE * rh + buf10) {
                qh -= 1;
                rh += v1;
                if rh < WORD_BASE && (qh >= WORD_BASE || (qh * v2 > WORD_BASE * rh + buf10)) {
                    qh -= 1;
                }
            }

            // buf1[j..] = buf1[j..] - buf2 * qh
            c = 0;
            k = 0;
            for (a, b) in buf2[..n + 2].iter().zip(buf1[j..j + n + 2].iter_mut()) {
                k = *a as DoubleWord * qh + (k >> WORD_BIT_SIZE);
                let val = (k & (WORD_BASE - 1)) + c;
                if (*b as DoubleWord) < val {
                    *b = (*b as DoubleWord + WORD_BASE - val) as Word;
                    c = 1;
                } else {
                    *b -= val as Word;
                    c = 0;
                }
            }

            if c > 0 {
                // the estimate was too large, compensate
                qh -= 1;
                c = 0;
                for (a, b) in buf2[..n + 2].iter().zip(buf1[j..j + n + 2].iter_mut()) {
                    let mut val = *b as DoubleWord;
                    val += *a as DoubleWord + c;
                    if val >= WORD_BASE {
                        val -= WORD_BASE;
                        c = 1;
                    } else {
                        c = 0;
                    }
                    *b = val as Word;
                }
                debug_assert!(c > 0);
            }

            if let Some(v) = m3iter.next() {
                if in_loop || qh > 0 {
                    *v = qh as Word;
                } else {
                    *v = 0;
                }
            } else {
                break;
            }

            if j == 0 {
                break;
            }
            j -= 1;
            in_loop = true;
        }

        for v in m3iter {
            *v = 0;
        }

        if d > 1 {
            // denormalize the remainder
            rh = 0;
            let mut j = l2;
            let mut iter = buf1[..l2].iter().rev();
            let mut val = *iter.next().unwrap_or(&0) as DoubleWord;
            let mut remiter = rem.iter_mut().rev();

            if val < d {
                rh = val;
                val = *iter.next().unwrap_or(&0) as DoubleWord;
                if let Some(v) = remiter.next() {
                    *v = 0;
                }
                j -= 1;
            }

            if j > 0 {
                loop {
                    qh = rh * WORD_BASE + val;
                    rh = qh % d;

                    if let Some(v) = remiter.next() {
                        *v = (qh / d) as Word;
                    } else {
                        break;
                    }
                    val = *iter.next().unwrap_or(&0) as DoubleWord;
                }
            } else {
                for v in remiter {
                    *v = 0;
                }
            }
        } else {
            rem.copy_from_slice(&buf1[..l2]);
        }
    }

    (m3, rem)
}
