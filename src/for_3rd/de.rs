//! Deserialization of BigFloat.

use core::fmt::Formatter;
use core::marker::PhantomData;
use core::str::FromStr;

use crate::num::BigFloat;
use serde::de::Error;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer};

struct BigFloatVisitor<const M: usize> {
    phantom: PhantomData<[(); M]>,
}

impl<'de, const M: usize> Deserialize<'de> for BigFloat<M> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BigFloatVisitor::<M> {
            phantom: PhantomData,
        })
    }
}

impl<'de, const M: usize> Visitor<'de> for BigFloatVisitor<M> {
    type Value = BigFloat<M>;

    fn expecting(&self, formatter: &mut Formatter) -> core::fmt::Result {
        write!(formatter, "expect `String` or `Number`")
    }

    fn visit_u64<E: Error>(self, v: u64) -> Result<Self::Value, E> {
        if v > i64::MAX as u64 {
            return Err(Error::custom("the value does not fit i64"));
        }
        Ok(BigFloat::from_i64(v as i64))
    }

    fn visit_i64<E: Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(BigFloat::from_i64(v))
    }

    fn visit_f64<E: Error>(self, v: f64) -> Result<Self::Value, E> {
        match BigFloat::from_f64(v) {
            Ok(o) => Ok(o),
            Err(e) => Err(Error::custom(format!("{e:?}"))),
        }
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<Self::Value, E> {
        match BigFloat::from_str(v) {
            Ok(o) => Ok(o),
            Err(e) => Err(Error::custom(format!("{e:?}"))),
        }
    }

    fn visit_string<E: Error>(self, v: String) -> Result<Self::Value, E> {
        self.visit_str(&v)
    }
}
