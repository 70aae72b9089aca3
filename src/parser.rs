//! Parser parses numbers represented in scientific format.

use crate::defs::Error;
use crate::defs::Sign;
use core::str::Chars;

#[derive(Debug)]
pub struct ParserState<'a> {
    chars: Chars<'a>,
    cur_ch: Option<char>,
    sign: Sign,
    mantissa_bytes: Vec<u8>,
    e: isize,
}

impl<'a> ParserState<'a> {
    fn new(s: &'a str) -> Self {
        ParserState {
            chars: s.chars(),
            cur_ch: None,
            sign: Sign::Pos,
            mantissa_bytes: Vec::new(),
            e: 0,
        }
    }

    // Returns next character of a string in lower case,
    // or None if string end reached.
    fn next_char(&mut self) -> Option<char> {
        self.cur_ch = self.chars.next().map(|c| c.to_ascii_lowercase());
        self.cur_ch
    }

    fn cur_char(&self) -> Option<char> {
        self.cur_ch
    }

    /// Returns mantissa digits, sign, and the decimal exponent.
    /// The parsed value is `0.digits * 10^e`.
    pub fn raw_parts(&self) -> (&[u8], Sign, isize) {
        (&self.mantissa_bytes, self.sign, self.e)
    }
}

/// Parses a decimal number in scientific format:
/// `[+|-] digits [ . digits ] [ (e|E) [+|-] digits ]`.
///
/// ## Errors
///
///  - InvalidFormat: the string is not a number in the format above.
pub fn parse(s: &str) -> Result<ParserState, Error> {
    let mut parser_state = ParserState::new(s);
    let mut ch = parser_state.next_char();

    // sign
    if let Some(c) = ch {
        match c {
            '+' => {
                ch = parser_state.next_char();
            }
            '-' => {
                parser_state.sign = Sign::Neg;
                ch = parser_state.next_char();
            }
            _ => {}
        };
    }
    let _ = ch;

    parse_num(&mut parser_state)?;

    Ok(parser_state)
}

fn parse_num(parser_state: &mut ParserState) -> Result<(), Error> {
    let (int_len, int_seen) = parse_digits(parser_state, true);

    let mut frac_seen = false;
    if Some('.') == parser_state.cur_char() {
        parser_state.next_char();
        let (_, seen) = parse_digits(parser_state, false);
        frac_seen = seen;
    }

    // at least one mantissa digit on either side of the point
    if !int_seen && !frac_seen {
        return Err(Error::InvalidFormat);
    }

    if Some('e') == parser_state.cur_char() {
        parser_state.next_char();
        parse_exp(parser_state)?;
    }

    if parser_state.cur_char().is_some() {
        return Err(Error::InvalidFormat);
    }

    parser_state.e = parser_state.e.saturating_add(int_len as isize);

    Ok(())
}

// Reads a run of digits. With `skip_zeroes` leading zeroes are skipped
// and not counted in the returned length. The second returned value tells
// whether any digit, including a skipped zero, was present.
fn parse_digits(parser_state: &mut ParserState, skip_zeroes: bool) -> (usize, bool) {
    let mut ch = parser_state.cur_char();
    let mut len = 0;
    let mut seen = false;

    if skip_zeroes {
        while let Some('0') = ch {
            seen = true;
            ch = parser_state.next_char();
        }
    }

    while let Some(c) = ch {
        if let Some(d) = c.to_digit(10) {
            parser_state.mantissa_bytes.push(d as u8);
            len += 1;
            seen = true;
        } else {
            break;
        }
        ch = parser_state.next_char();
    }

    (len, seen)
}

fn parse_exp(parser_state: &mut ParserState) -> Result<(), Error> {
    let mut neg = false;
    let mut ch = parser_state.cur_char();

    if let Some(c) = ch {
        match c {
            '+' => {
                ch = parser_state.next_char();
            }
            '-' => {
                neg = true;
                ch = parser_state.next_char();
            }
            _ => {}
        };
    }

    let mut seen = false;
    while let Some(c) = ch {
        if let Some(d) = c.to_digit(10) {
            parser_state.e = parser_state.e.saturating_mul(10).saturating_add(d as isize);
            seen = true;
        } else {
            break;
        }
        ch = parser_state.next_char();
    }

    // the exponent marker requires at least one digit
    if !seen {
        return Err(Error::InvalidFormat);
    }

    if neg {
        parser_state.e = -parser_state.e;
    }

    Ok(())
}
