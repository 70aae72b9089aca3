//! Buffer for holding mantissa words.

use crate::defs::Word;
use core::ops::Deref;
use core::ops::DerefMut;
use core::ops::Index;
use core::ops::IndexMut;
use core::slice::SliceIndex;

use smallvec::SmallVec;

// Scratch buffers of the common mantissa widths stay on the stack.
const INLINE_WORDS: usize = 24;

/// Zero-initialized buffer for intermediate mantissa computations.
#[derive(Debug)]
pub struct WordBuf {
    inner: SmallVec<[Word; INLINE_WORDS]>,
}

impl WordBuf {
    #[inline]
    pub fn new(sz: usize) -> Self {
        WordBuf {
            inner: SmallVec::from_elem(0, sz),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

impl Deref for WordBuf {
    type Target = [Word];

    #[inline]
    fn deref(&self) -> &[Word] {
        &self.inner
    }
}

impl DerefMut for WordBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Word] {
        &mut self.inner
    }
}

impl<I: SliceIndex<[Word]>> Index<I> for WordBuf {
    type Output = I::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        self.inner.index(index)
    }
}

impl<I: SliceIndex<[Word]>> IndexMut<I> for WordBuf {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        self.inner.index_mut(index)
    }
}
