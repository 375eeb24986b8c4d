use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

#[cfg(feature = "num-bigint")]
use num_bigint::BigInt;
#[cfg(feature = "num-bigint")]
use num_traits::cast::ToPrimitive;

use lexical_parse_float::{format as lexical_format, FromLexicalWithOptions, Options as ParseFloatOptions};

use crate::errors::{json_err, JsonResult};

/// A JSON number held as its original text.
///
/// The literal is validated against the RFC 8259 number grammar when decoded, but never
/// converted, so `1.10`, `-0` and integers beyond `i64` all survive a round-trip unchanged.
/// Use [RawNumber::as_int] or [RawNumber::as_float] for a typed interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawNumber<'j> {
    raw: Cow<'j, str>,
    is_int: bool,
}

impl<'j> RawNumber<'j> {
    pub(crate) fn decode(data: &'j [u8], index: usize, first: u8) -> JsonResult<(Self, usize)> {
        let (range, is_int) = consume_number(data, index, first)?;
        let end = range.end;
        // SAFETY: the validated range contains only ascii digits, signs, dots and exponent
        // markers, so it is always valid UTF-8
        let raw = unsafe { std::str::from_utf8_unchecked(&data[range]) };
        Ok((
            Self {
                raw: Cow::Borrowed(raw),
                is_int,
            },
            end,
        ))
    }

    /// The number exactly as it appeared in the input.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the literal has no fraction or exponent part.
    pub fn is_int(&self) -> bool {
        self.is_int
    }

    /// Interpret the literal as an integer. `None` if the literal has a fraction or exponent
    /// part, or exceeds `i64` with the `num-bigint` feature disabled.
    pub fn as_int(&self) -> Option<NumberInt> {
        if self.is_int {
            NumberInt::from_decimal(self.raw.as_bytes())
        } else {
            None
        }
    }

    /// Interpret the literal as an `f64`, possibly losing precision.
    pub fn as_float(&self) -> Option<f64> {
        const JSON: u128 = lexical_format::JSON;
        let options = ParseFloatOptions::new();
        f64::from_lexical_with_options::<JSON>(self.raw.as_bytes(), &options).ok()
    }

    /// Build a number from an `f64`. `None` for NaN and infinities, which JSON cannot
    /// represent.
    pub fn from_f64(f: f64) -> Option<RawNumber<'static>> {
        serde_json::Number::from_f64(f).map(|n| RawNumber {
            raw: Cow::Owned(n.to_string()),
            is_int: false,
        })
    }

    pub(crate) fn to_static(&self) -> RawNumber<'static> {
        RawNumber {
            raw: Cow::Owned(self.raw.clone().into_owned()),
            is_int: self.is_int,
        }
    }

    pub(crate) fn into_static(self) -> RawNumber<'static> {
        RawNumber {
            raw: Cow::Owned(self.raw.into_owned()),
            is_int: self.is_int,
        }
    }
}

impl From<i64> for RawNumber<'static> {
    fn from(int: i64) -> Self {
        Self {
            raw: Cow::Owned(serde_json::Number::from(int).to_string()),
            is_int: true,
        }
    }
}

impl fmt::Display for RawNumber<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// An integer interpreted from a JSON number, either an [i64] or a
/// [BigInt](num_bigint::BigInt).
#[derive(Debug, Clone, PartialEq)]
pub enum NumberInt {
    Int(i64),
    #[cfg(feature = "num-bigint")]
    BigInt(BigInt),
}

impl From<NumberInt> for f64 {
    fn from(num: NumberInt) -> Self {
        match num {
            NumberInt::Int(int) => int as f64,
            #[cfg(feature = "num-bigint")]
            NumberInt::BigInt(big_int) => big_int.to_f64().unwrap_or(f64::NAN),
        }
    }
}

impl NumberInt {
    /// `bytes` must already be a validated integer literal.
    fn from_decimal(bytes: &[u8]) -> Option<Self> {
        let s = std::str::from_utf8(bytes).ok()?;
        if let Ok(int) = s.parse::<i64>() {
            return Some(Self::Int(int));
        }
        #[cfg(feature = "num-bigint")]
        {
            BigInt::parse_bytes(bytes, 10).map(Self::BigInt)
        }
        #[cfg(not(feature = "num-bigint"))]
        {
            None
        }
    }
}

/// Validate one number literal starting at `index` (`first` must equal `data[index]`),
/// returning its range and whether it is an integer.
fn consume_number(data: &[u8], mut index: usize, first: u8) -> JsonResult<(Range<usize>, bool)> {
    let start = index;
    if first == b'-' {
        // we started with a minus sign, so the first digit is at index + 1
        index += 1;
    }

    match data.get(index) {
        Some(b'0') => {
            // numbers cannot have leading zeros, the next char must end the number
            // or start a fraction or exponent
            index += 1;
            match data.get(index) {
                Some(b'.') => {
                    index += 1;
                    let end = consume_decimal(data, index)?;
                    Ok((start..end, false))
                }
                Some(b'e' | b'E') => {
                    index += 1;
                    let end = consume_exponential(data, index)?;
                    Ok((start..end, false))
                }
                Some(digit) if digit.is_ascii_digit() => json_err!(InvalidNumber, index),
                _ => Ok((start..index, true)),
            }
        }
        Some(digit) if (b'1'..=b'9').contains(digit) => {
            index += 1;
            while let Some(next) = data.get(index) {
                match next {
                    b'0'..=b'9' => index += 1,
                    b'.' => {
                        index += 1;
                        let end = consume_decimal(data, index)?;
                        return Ok((start..end, false));
                    }
                    b'e' | b'E' => {
                        index += 1;
                        let end = consume_exponential(data, index)?;
                        return Ok((start..end, false));
                    }
                    _ => break,
                }
            }
            Ok((start..index, true))
        }
        Some(_) => json_err!(InvalidNumber, index),
        None => json_err!(EofWhileParsingValue, index),
    }
}

fn consume_exponential(data: &[u8], mut index: usize) -> JsonResult<usize> {
    match data.get(index) {
        Some(b'-' | b'+') => {
            index += 1;
        }
        Some(v) if v.is_ascii_digit() => (),
        Some(_) => return json_err!(InvalidNumber, index),
        None => return json_err!(EofWhileParsingValue, index),
    }

    match data.get(index) {
        Some(v) if v.is_ascii_digit() => (),
        Some(_) => return json_err!(InvalidNumber, index),
        None => return json_err!(EofWhileParsingValue, index),
    }
    index += 1;

    while let Some(next) = data.get(index) {
        match next {
            b'0'..=b'9' => (),
            _ => break,
        }
        index += 1;
    }

    Ok(index)
}

fn consume_decimal(data: &[u8], mut index: usize) -> JsonResult<usize> {
    match data.get(index) {
        Some(v) if v.is_ascii_digit() => (),
        Some(_) => return json_err!(InvalidNumber, index),
        None => return json_err!(EofWhileParsingValue, index),
    }
    index += 1;

    while let Some(next) = data.get(index) {
        match next {
            b'0'..=b'9' => (),
            b'e' | b'E' => {
                index += 1;
                return consume_exponential(data, index);
            }
            _ => break,
        }
        index += 1;
    }

    Ok(index)
}
