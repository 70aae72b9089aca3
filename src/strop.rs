//! Parsing from a string and formatting into a string.

use core::fmt::Write;
use core::str::FromStr;

use crate::defs::Error;
use crate::num::BigFloat;
use crate::parser;

impl<const M: usize> BigFloat<M> {
    /// Parses a number from a string in decimal scientific notation,
    /// e.g. "12.5", "-0.25", "1.5e10". The input must contain a number
    /// and nothing else.
    ///
    /// ## Errors
    ///
    ///  - InvalidFormat: the input is not a valid number.
    ///  - ExponentOverflow: the value is too large or too small.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let ps = parser::parse(s)?;
        let (digits, sign, e) = ps.raw_parts();
        Self::conv_from_dec(sign, digits, e)
    }

    /// Formats the number in decimal scientific notation. The output
    /// has no trailing zeroes, and the exponent part is present only
    /// when the exponent is nonzero, e.g. "1.25", "-2.5E-10", "0".
    ///
    /// ## Errors
    ///
    ///  - ExponentOverflow: on rare occasions formatting a number
    ///    with an exponent near the boundary can overflow.
    pub fn format(&self) -> Result<String, Error> {
        let (sign, digits, k) = self.conv_to_dec()?;

        let mut ret = String::new();

        if digits.is_empty() {
            ret.push('0');
            return Ok(ret);
        }

        if sign.is_negative() {
            ret.push('-');
        }

        ret.push((digits[0] + b'0') as char);

        if digits.len() > 1 {
            ret.push('.');
            for &d in digits[1..].iter() {
                ret.push((d + b'0') as char);
            }
        }

        if k != 0 {
            write!(ret, "E{}", k).map_err(|_| Error::InvalidFormat)?;
        }

        Ok(ret)
    }
}

impl<const M: usize> core::fmt::Display for BigFloat<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = self.format().map_err(|_| core::fmt::Error)?;
        f.write_str(&s)
    }
}

impl<const M: usize> FromStr for BigFloat<M> {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self, Error> {
        Self::parse(src)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::num::BigFloat256;

    #[test]
    fn test_format() {
        for (inp, out) in [
            ("1.250000", "1.25"),
            ("100.000", "1E2"),
            ("1.50000e10", "1.5E10"),
            ("0.0000", "0"),
            ("1.", "1"),
            ("-12.5", "-1.25E1"),
            ("-0.25", "-2.5E-1"),
            ("0.003", "3E-3"),
            ("987654321", "9.87654321E8"),
            ("-1e-100", "-1E-100"),
        ] {
            let d = BigFloat256::parse(inp).unwrap();
            assert_eq!(d.format().unwrap(), out, "{}", inp);
            assert_eq!(format!("{}", d), out, "{}", inp);
        }
    }

    #[test]
    fn test_parse() {
        let d1 = BigFloat256::parse("1e2").unwrap();
        let d2 = BigFloat256::parse("100.000").unwrap();
        assert_eq!(d1, d2);

        // -0.0125 is not a dyadic rational: the full precision parse differs
        // from the f64 value, but rounds back to exactly it
        let d1 = BigFloat256::parse("-12.5e-3").unwrap();
        let d2 = BigFloat256::from_f64(-0.0125).unwrap();
        assert!(d1 != d2);
        assert_eq!(d1.to_f64(), Some(-0.0125));

        // a dyadic value parses to exactly the f64 value
        let d1 = BigFloat256::parse("-3.125e-2").unwrap();
        let d2 = BigFloat256::from_f64(-0.03125).unwrap();
        assert_eq!(d1, d2);

        let d1: BigFloat256 = "0.5".parse().unwrap();
        let d2 = BigFloat256::from_f64(0.5).unwrap();
        assert_eq!(d1, d2);

        assert!(matches!(BigFloat256::parse("12x"), Err(Error::InvalidFormat)));
        assert!(matches!(BigFloat256::parse(""), Err(Error::InvalidFormat)));

        // a huge exponent saturates the parser and then overflows conversion
        assert!(matches!(
            BigFloat256::parse("1e99999999999999999999999"),
            Err(Error::ExponentOverflow(_))
        ));
        let d = BigFloat256::parse("1e-99999999999999999999999");
        assert!(matches!(d, Err(Error::ExponentOverflow(_))));
    }

    #[test]
    fn test_string_roundtrip() {
        for s in [
            "1.2345678E-50",
            "3.333333333333333333333333333333333E33",
            "-7.77E-123",
            "1E500",
            "1E-500",
            "5",
        ] {
            let d = BigFloat256::parse(s).unwrap();
            assert_eq!(d.format().unwrap(), s, "{}", s);
        }
    }
}
