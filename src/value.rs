use std::borrow::Cow;

use smallvec::SmallVec;

use crate::errors::{json_err, JsonError, JsonResult, WriteResult, DEFAULT_RECURSION_LIMIT};
use crate::number_decoder::RawNumber;
use crate::object::OrderedObject;
use crate::parse::{Parser, Peek};
use crate::string_decoder::Tape;
use crate::write::JsonWriter;

/// Enum representing a JSON value, with object key order preserved.
///
/// Any JSON value is a legal document: scalars, arrays and objects are all accepted at the
/// top level and tagged with their shape.
#[derive(Clone, Debug, PartialEq)]
pub enum OrderedValue<'j> {
    Null,
    Bool(bool),
    Number(RawNumber<'j>),
    Str(Cow<'j, str>),
    Array(Box<OrderedArray<'j>>),
    Object(OrderedObject<'j>),
}

pub type OrderedArray<'j> = SmallVec<[OrderedValue<'j>; 8]>;

impl<'j> OrderedValue<'j> {
    /// Decode a JSON value from a byte slice, returning a borrowed version of the value -
    /// e.g. strings can be references into the original byte slice.
    ///
    /// Object entries are recorded in the order the keys appear in the document; duplicate
    /// keys are kept as separate entries.
    pub fn parse(data: &'j [u8]) -> Result<Self, JsonError> {
        let mut parser = Parser::new(data);

        let mut tape = Tape::default();
        let peek = parser.peek()?;
        let v = take_value(peek, &mut parser, &mut tape, DEFAULT_RECURSION_LIMIT)?;
        parser.finish()?;
        Ok(v)
    }

    /// Encode to compact JSON bytes, emitting object entries in stored order.
    pub fn to_json(&self) -> WriteResult<Vec<u8>> {
        let mut writer = JsonWriter::new();
        writer.write_value(self)?;
        Ok(writer.into())
    }

    /// Encode to a compact JSON string.
    pub fn to_json_string(&self) -> WriteResult<String> {
        let bytes = self.to_json()?;
        // SAFETY: the writer only emits valid UTF-8
        Ok(unsafe { String::from_utf8_unchecked(bytes) })
    }

    /// Convert a borrowed value into an owned value, detached from the input buffer.
    pub fn into_static(self) -> OrderedValue<'static> {
        match self {
            Self::Null => OrderedValue::Null,
            Self::Bool(b) => OrderedValue::Bool(b),
            Self::Number(n) => OrderedValue::Number(n.into_static()),
            Self::Str(s) => OrderedValue::Str(Cow::Owned(s.into_owned())),
            Self::Array(v) => OrderedValue::Array(Box::new((*v).into_iter().map(OrderedValue::into_static).collect())),
            Self::Object(o) => OrderedValue::Object(o.into_static()),
        }
    }

    /// Copy a borrowed value into an owned value, detached from the input buffer.
    pub fn to_static(&self) -> OrderedValue<'static> {
        match self {
            Self::Null => OrderedValue::Null,
            Self::Bool(b) => OrderedValue::Bool(*b),
            Self::Number(n) => OrderedValue::Number(n.to_static()),
            Self::Str(s) => OrderedValue::Str(Cow::Owned(s.to_string())),
            Self::Array(v) => OrderedValue::Array(Box::new(v.iter().map(OrderedValue::to_static).collect())),
            Self::Object(o) => OrderedValue::Object(o.to_static()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&RawNumber<'j>> {
        match self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&OrderedArray<'j>> {
        match self {
            Self::Array(a) => Some(&**a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut OrderedArray<'j>> {
        match self {
            Self::Array(a) => Some(&mut **a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&OrderedObject<'j>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut OrderedObject<'j>> {
        match self {
            Self::Object(o) => Some(o),
            _ => None,
        }
    }
}

impl From<bool> for OrderedValue<'_> {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for OrderedValue<'_> {
    fn from(int: i64) -> Self {
        Self::Number(RawNumber::from(int))
    }
}

impl<'j> From<RawNumber<'j>> for OrderedValue<'j> {
    fn from(n: RawNumber<'j>) -> Self {
        Self::Number(n)
    }
}

impl<'j> From<&'j str> for OrderedValue<'j> {
    fn from(s: &'j str) -> Self {
        Self::Str(Cow::Borrowed(s))
    }
}

impl From<String> for OrderedValue<'_> {
    fn from(s: String) -> Self {
        Self::Str(Cow::Owned(s))
    }
}

impl<'j> From<Vec<OrderedValue<'j>>> for OrderedValue<'j> {
    fn from(v: Vec<OrderedValue<'j>>) -> Self {
        Self::Array(Box::new(OrderedArray::from_vec(v)))
    }
}

impl<'j> From<OrderedArray<'j>> for OrderedValue<'j> {
    fn from(a: OrderedArray<'j>) -> Self {
        Self::Array(Box::new(a))
    }
}

impl<'j> From<OrderedObject<'j>> for OrderedValue<'j> {
    fn from(o: OrderedObject<'j>) -> Self {
        Self::Object(o)
    }
}

macro_rules! check_recursion {
    ($recursion_limit:ident, $index:expr, $($body:tt)*) => {
        $recursion_limit = match $recursion_limit.checked_sub(1) {
            Some(limit) => limit,
            None => return crate::errors::json_err!(RecursionLimitExceeded, $index),
        };

        $($body)*

        $recursion_limit += 1;
    };
}

fn take_value<'j>(
    peek: Peek,
    parser: &mut Parser<'j>,
    tape: &mut Tape,
    mut recursion_limit: u8,
) -> JsonResult<OrderedValue<'j>> {
    match peek {
        Peek::True => {
            parser.consume_true()?;
            Ok(OrderedValue::Bool(true))
        }
        Peek::False => {
            parser.consume_false()?;
            Ok(OrderedValue::Bool(false))
        }
        Peek::Null => {
            parser.consume_null()?;
            Ok(OrderedValue::Null)
        }
        Peek::String => {
            let s = parser.consume_string(tape)?;
            Ok(OrderedValue::Str(s.into()))
        }
        Peek::Array => {
            let mut array: OrderedArray<'j> = SmallVec::new();
            if let Some(peek_first) = parser.array_first()? {
                check_recursion!(recursion_limit, parser.index,
                    let v = take_value(peek_first, parser, tape, recursion_limit)?;
                );
                array.push(v);
                while let Some(peek) = parser.array_step()? {
                    check_recursion!(recursion_limit, parser.index,
                        let v = take_value(peek, parser, tape, recursion_limit)?;
                    );
                    array.push(v);
                }
            }
            Ok(OrderedValue::Array(Box::new(array)))
        }
        Peek::Object => {
            let mut object = OrderedObject::new();
            if let Some(first_key) = parser.object_first(tape)? {
                let first_key: Cow<'j, str> = first_key.into();
                let peek = parser.peek()?;
                check_recursion!(recursion_limit, parser.index,
                    let v = take_value(peek, parser, tape, recursion_limit)?;
                );
                object.append(first_key, v);
                while let Some(key) = parser.object_step(tape)? {
                    let key: Cow<'j, str> = key.into();
                    let peek = parser.peek()?;
                    check_recursion!(recursion_limit, parser.index,
                        let v = take_value(peek, parser, tape, recursion_limit)?;
                    );
                    object.append(key, v);
                }
            }
            Ok(OrderedValue::Object(object))
        }
        _ => {
            if peek.is_num() {
                let n = parser.consume_number(peek.into_inner())?;
                Ok(OrderedValue::Number(n))
            } else {
                json_err!(ExpectedSomeValue, parser.index)
            }
        }
    }
}
