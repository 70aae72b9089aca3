//! Serialization of BigFloat.
//! Serialization to a string uses decimal radix.

use crate::num::BigFloat;
use serde::ser::Error;
use serde::{Serialize, Serializer};

impl<const M: usize> Serialize for BigFloat<M> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self.format().map_err(|e| S::Error::custom(format!("{e:?}")))?;
        serializer.serialize_str(&s)
    }
}
