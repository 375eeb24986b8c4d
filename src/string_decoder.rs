use std::borrow::Cow;
use std::str::from_utf8;

use crate::errors::{json_err, json_error, JsonResult};

/// Reusable scratch buffer strings are unescaped onto.
pub type Tape = Vec<u8>;

/// A decoded JSON string.
///
/// `'t` is the lifetime of the tape (reusable buffer), `'j` is the lifetime of the JSON data
/// itself. Strings without escape sequences are borrowed straight from the data; strings with
/// escapes are unescaped onto the tape.
#[derive(Debug)]
pub enum StringOutput<'t, 'j>
where
    'j: 't,
{
    Tape(&'t str),
    Data(&'j str),
}

impl<'t, 'j> From<StringOutput<'t, 'j>> for Cow<'j, str> {
    fn from(val: StringOutput<'t, 'j>) -> Self {
        match val {
            StringOutput::Tape(s) => Cow::Owned(s.to_owned()),
            StringOutput::Data(s) => Cow::Borrowed(s),
        }
    }
}

enum StringChunk {
    Quote,
    Backslash,
}

/// Scan forward to the next quote or backslash, rejecting raw control characters on the way.
fn scan_chunk(data: &[u8], mut index: usize) -> JsonResult<(StringChunk, usize)> {
    while let Some(next) = data.get(index) {
        match next {
            b'"' => return Ok((StringChunk::Quote, index)),
            b'\\' => return Ok((StringChunk::Backslash, index)),
            0x00..=0x1f => return json_err!(ControlCharacterWhileParsingString, index),
            _ => index += 1,
        }
    }
    json_err!(EofWhileParsingString, index)
}

/// Decode the string starting at `index` (which must point at the opening quote), returning
/// the output and the index just after the closing quote.
pub(crate) fn decode_string<'t, 'j>(
    data: &'j [u8],
    index: usize,
    tape: &'t mut Tape,
) -> JsonResult<(StringOutput<'t, 'j>, usize)>
where
    'j: 't,
{
    let start = index + 1;

    match scan_chunk(data, start)? {
        (StringChunk::Quote, index) => {
            let s = to_str(&data[start..index], start)?;
            Ok((StringOutput::Data(s), index + 1))
        }
        (StringChunk::Backslash, index) => decode_to_tape(data, index, tape, start),
    }
}

fn decode_to_tape<'t, 'j>(
    data: &'j [u8],
    mut index: usize,
    tape: &'t mut Tape,
    start: usize,
) -> JsonResult<(StringOutput<'t, 'j>, usize)> {
    tape.clear();
    let mut chunk_start = start;
    loop {
        // on_backslash
        tape.extend_from_slice(&data[chunk_start..index]);
        index += 1;
        if let Some(next_inner) = data.get(index) {
            match next_inner {
                b'"' | b'\\' | b'/' => tape.push(*next_inner),
                b'b' => tape.push(b'\x08'),
                b'f' => tape.push(b'\x0C'),
                b'n' => tape.push(b'\n'),
                b'r' => tape.push(b'\r'),
                b't' => tape.push(b'\t'),
                b'u' => {
                    let (c, new_index) = parse_escape(data, index)?;
                    index = new_index;
                    tape.extend_from_slice(c.encode_utf8(&mut [0_u8; 4]).as_bytes());
                }
                _ => return json_err!(InvalidEscape, index),
            }
            index += 1;
        } else {
            return json_err!(EofWhileParsingString, index);
        }

        match scan_chunk(data, index)? {
            (StringChunk::Quote, new_index) => {
                tape.extend_from_slice(&data[index..new_index]);
                index = new_index + 1;
                let s = to_str(tape, start)?;
                return Ok((StringOutput::Tape(s), index));
            }
            (StringChunk::Backslash, index_new) => {
                chunk_start = index;
                index = index_new;
            }
        }
    }
}

fn to_str(bytes: &[u8], start: usize) -> JsonResult<&str> {
    from_utf8(bytes).map_err(|e| json_error!(InvalidUnicodeCodePoint, start + e.valid_up_to() + 1))
}

/// Taken approximately from https://github.com/serde-rs/json/blob/v1.0.107/src/read.rs#L872-L945
fn parse_escape(data: &[u8], index: usize) -> JsonResult<(char, usize)> {
    let (n, index) = parse_u4(data, index)?;
    match n {
        0xDC00..=0xDFFF => json_err!(LoneLeadingSurrogateInHexEscape, index),
        0xD800..=0xDBFF => match data.get(index + 1..index + 3) {
            Some(slice) if slice == b"\\u" => {
                let (n2, index) = parse_u4(data, index + 2)?;
                if !(0xDC00..=0xDFFF).contains(&n2) {
                    return json_err!(LoneLeadingSurrogateInHexEscape, index);
                }
                let n2 = (((n - 0xD800) as u32) << 10 | (n2 - 0xDC00) as u32) + 0x1_0000;

                match char::from_u32(n2) {
                    Some(c) => Ok((c, index)),
                    None => json_err!(EofWhileParsingString, index),
                }
            }
            Some(slice) if slice.starts_with(b"\\") => json_err!(UnexpectedEndOfHexEscape, index + 2),
            Some(_) => json_err!(UnexpectedEndOfHexEscape, index + 1),
            None => match data.get(index + 1) {
                Some(b'\\') | None => json_err!(EofWhileParsingString, data.len()),
                Some(_) => json_err!(UnexpectedEndOfHexEscape, index + 1),
            },
        },
        _ => match char::from_u32(n as u32) {
            Some(c) => Ok((c, index)),
            None => json_err!(InvalidEscape, index),
        },
    }
}

fn parse_u4(data: &[u8], mut index: usize) -> JsonResult<(u16, usize)> {
    let mut n = 0;
    let u4 = data
        .get(index + 1..index + 5)
        .ok_or_else(|| json_error!(EofWhileParsingString, data.len()))?;

    for c in u4 {
        index += 1;
        let hex = match c {
            b'0'..=b'9' => (c & 0x0f) as u16,
            b'a'..=b'f' => (c - b'a' + 10) as u16,
            b'A'..=b'F' => (c - b'A' + 10) as u16,
            _ => return json_err!(InvalidEscape, index),
        };
        n = (n << 4) + hex;
    }
    Ok((n, index))
}
