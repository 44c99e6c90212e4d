use alloc::vec::Vec;
use core::fmt;

use crate::error::ReadError;

// -----------------------------------------------------------------------------
// CborState

/// The kind of the next token of a [`CborReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CborState {
    UnsignedInteger,
    NegativeInteger,
    ByteString,
    TextString,
    StartArray,
    EndArray,
    StartMap,
    EndMap,
    Tag,
    Null,
    Undefined,
    Boolean,
    /// Any other simple value.
    SimpleValue,
    HalfFloat,
    SingleFloat,
    DoubleFloat,
    /// The root data item has been read.
    Finished,
}

impl CborState {
    /// Returns `true` for the three float widths.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::HalfFloat | Self::SingleFloat | Self::DoubleFloat)
    }

    /// Returns `true` for both integer major types.
    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::UnsignedInteger | Self::NegativeInteger)
    }
}

impl fmt::Display for CborState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CborState::UnsignedInteger => "unsigned integer",
            CborState::NegativeInteger => "negative integer",
            CborState::ByteString => "byte string",
            CborState::TextString => "text string",
            CborState::StartArray => "array",
            CborState::EndArray => "end of array",
            CborState::StartMap => "map",
            CborState::EndMap => "end of map",
            CborState::Tag => "tag",
            CborState::Null => "null",
            CborState::Undefined => "undefined",
            CborState::Boolean => "boolean",
            CborState::SimpleValue => "simple value",
            CborState::HalfFloat => "half precision float",
            CborState::SingleFloat => "single precision float",
            CborState::DoubleFloat => "double precision float",
            CborState::Finished => "end of document",
        })
    }
}

// -----------------------------------------------------------------------------
// CborReader

struct Frame {
    is_map: bool,
    // Data items left, a map entry counts twice.
    remaining: usize,
}

/// A definite length CBOR reader over a byte slice.
///
/// Containers report their end through [`CborState::EndArray`] and
/// [`CborState::EndMap`] once all items are read, which must then be
/// consumed with [`read_end_array`](CborReader::read_end_array) or
/// [`read_end_map`](CborReader::read_end_map).
///
/// # Examples
///
/// ```
/// use ac_cbor::{CborReader, CborState};
///
/// let mut reader = CborReader::new(&[0x82, 0x0A, 0x63, b'a', b'b', b'c']);
///
/// assert_eq!(reader.read_start_array().unwrap(), 2);
/// assert_eq!(reader.read_i32().unwrap(), 10);
/// assert_eq!(reader.read_text().unwrap(), "abc");
/// assert_eq!(reader.peek_state().unwrap(), CborState::EndArray);
/// reader.read_end_array().unwrap();
///
/// assert_eq!(reader.peek_state().unwrap(), CborState::Finished);
/// reader.finish().unwrap();
/// ```
pub struct CborReader<'a> {
    data: &'a [u8],
    offset: usize,
    frames: Vec<Frame>,
    has_root: bool,
}

impl<'a> CborReader<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            frames: Vec::new(),
            has_root: false,
        }
    }

    /// The offset of the next token.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Checks that the root item is complete and no bytes follow it.
    pub fn finish(&self) -> Result<(), ReadError> {
        match self.peek_state()? {
            CborState::Finished => match self.data.len() - self.offset {
                0 => Ok(()),
                count => Err(ReadError::TrailingBytes { count }),
            },
            found => Err(ReadError::UnexpectedState {
                expected: CborState::Finished,
                found,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Peeking

    /// Returns the kind of the next token without consuming it.
    pub fn peek_state(&self) -> Result<CborState, ReadError> {
        match self.frames.last() {
            Some(frame) if frame.remaining == 0 => {
                return Ok(if frame.is_map {
                    CborState::EndMap
                } else {
                    CborState::EndArray
                });
            }
            None if self.has_root => return Ok(CborState::Finished),
            _ => {}
        }

        let initial = *self.data.get(self.offset).ok_or(ReadError::UnexpectedEof)?;
        let info = initial & 0x1F;
        let indefinite = ReadError::IndefiniteLength {
            offset: self.offset,
        };

        Ok(match initial >> 5 {
            0 => CborState::UnsignedInteger,
            1 => CborState::NegativeInteger,
            2 | 3 | 4 | 5 if info == 31 => return Err(indefinite),
            2 => CborState::ByteString,
            3 => CborState::TextString,
            4 => CborState::StartArray,
            5 => CborState::StartMap,
            6 => CborState::Tag,
            _ => match info {
                20 | 21 => CborState::Boolean,
                22 => CborState::Null,
                23 => CborState::Undefined,
                0..=19 | 24 => CborState::SimpleValue,
                25 => CborState::HalfFloat,
                26 => CborState::SingleFloat,
                27 => CborState::DoubleFloat,
                31 => return Err(indefinite),
                _ => return Err(self.malformed()),
            },
        })
    }

    /// Returns the value of the next tag without consuming it.
    pub fn peek_tag(&self) -> Result<u64, ReadError> {
        self.expect(CborState::Tag)?;
        let mut probe = CborReader::new(self.data);
        probe.offset = self.offset;
        probe.read_head().map(|(_, value)| value)
    }

    // -------------------------------------------------------------------------
    // Internal

    #[inline]
    fn malformed(&self) -> ReadError {
        ReadError::Malformed {
            offset: self.offset,
        }
    }

    fn expect(&self, expected: CborState) -> Result<(), ReadError> {
        let found = self.peek_state()?;
        if found == expected {
            Ok(())
        } else {
            Err(ReadError::UnexpectedState { expected, found })
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], ReadError> {
        let end = self.offset.checked_add(len).ok_or(ReadError::UnexpectedEof)?;
        let bytes = self.data.get(self.offset..end).ok_or(ReadError::UnexpectedEof)?;
        self.offset = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], ReadError> {
        let bytes = self.take(N)?;
        let mut array = [0; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    /// Reads an initial byte and its argument, returns `(major, argument)`.
    fn read_head(&mut self) -> Result<(u8, u64), ReadError> {
        let start = self.offset;
        let [initial] = self.take_array::<1>()?;
        let value = match initial & 0x1F {
            info @ 0..=23 => u64::from(info),
            24 => u64::from(u8::from_be_bytes(self.take_array()?)),
            25 => u64::from(u16::from_be_bytes(self.take_array()?)),
            26 => u64::from(u32::from_be_bytes(self.take_array()?)),
            27 => u64::from_be_bytes(self.take_array()?),
            _ => return Err(ReadError::Malformed { offset: start }),
        };
        Ok((initial >> 5, value))
    }

    /// Accounts for a data item in the enclosing container.
    fn begin_item(&mut self) {
        match self.frames.last_mut() {
            Some(frame) => frame.remaining -= 1,
            None => self.has_root = true,
        }
    }

    fn read_length(&mut self) -> Result<usize, ReadError> {
        let (_, len) = self.read_head()?;
        usize::try_from(len).map_err(|_| ReadError::Overflow { target: "usize" })
    }

    // -------------------------------------------------------------------------
    // Simple values

    pub fn read_null(&mut self) -> Result<(), ReadError> {
        self.expect(CborState::Null)?;
        self.begin_item();
        self.offset += 1;
        Ok(())
    }

    pub fn read_undefined(&mut self) -> Result<(), ReadError> {
        self.expect(CborState::Undefined)?;
        self.begin_item();
        self.offset += 1;
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool, ReadError> {
        self.expect(CborState::Boolean)?;
        self.begin_item();
        let value = self.data[self.offset] == crate::writer::TRUE;
        self.offset += 1;
        Ok(value)
    }

    /// Reads a simple value that is not null, undefined or a boolean.
    pub fn read_simple_value(&mut self) -> Result<u8, ReadError> {
        self.expect(CborState::SimpleValue)?;
        self.begin_item();
        let start = self.offset;
        let (_, value) = self.read_head()?;
        u8::try_from(value).map_err(|_| ReadError::Malformed { offset: start })
    }

    // -------------------------------------------------------------------------
    // Integers

    /// Reads an integer of either major type, without bignums.
    pub fn read_integer(&mut self) -> Result<i128, ReadError> {
        let found = self.peek_state()?;
        if !found.is_integer() {
            return Err(ReadError::UnexpectedState {
                expected: CborState::UnsignedInteger,
                found,
            });
        }
        self.begin_item();
        let (major, value) = self.read_head()?;
        Ok(if major == 0 {
            i128::from(value)
        } else {
            -1 - i128::from(value)
        })
    }

    fn read_narrow<T: TryFrom<i128>>(&mut self, target: &'static str) -> Result<T, ReadError> {
        let value = self.read_integer()?;
        T::try_from(value).map_err(|_| ReadError::Overflow { target })
    }

    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, ReadError> {
        self.read_narrow("i32")
    }

    #[inline]
    pub fn read_i64(&mut self) -> Result<i64, ReadError> {
        self.read_narrow("i64")
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32, ReadError> {
        self.read_narrow("u32")
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64, ReadError> {
        self.read_narrow("u64")
    }

    /// Reads an integer or a bignum (tags 2 and 3) that fits in `i128`.
    pub fn read_big_integer(&mut self) -> Result<i128, ReadError> {
        if self.peek_state()? != CborState::Tag {
            return self.read_integer();
        }

        let negative = match self.read_tag()? {
            2 => false,
            3 => true,
            tag => {
                return Err(ReadError::InvalidValue {
                    kind: "bignum",
                    reason: alloc::format!("unexpected tag {tag}"),
                });
            }
        };
        let bytes = self.read_bytes()?;
        let overflow = ReadError::Overflow { target: "i128" };
        let digits = bytes.iter().skip_while(|byte| **byte == 0);
        if digits.clone().count() > 16 {
            return Err(overflow);
        }
        let magnitude = digits.fold(0_u128, |acc, byte| (acc << 8) | u128::from(*byte));
        let magnitude = i128::try_from(magnitude).map_err(|_| overflow)?;
        Ok(if negative { -1 - magnitude } else { magnitude })
    }

    // -------------------------------------------------------------------------
    // Floats

    /// Reads a float of any width.
    pub fn read_f64(&mut self) -> Result<f64, ReadError> {
        let found = self.peek_state()?;
        self.begin_float(found)?;
        Ok(match found {
            CborState::HalfFloat => {
                half::f16::from_bits(u16::from_be_bytes(self.take_array()?)).to_f64()
            }
            CborState::SingleFloat => f64::from(f32::from_bits(u32::from_be_bytes(self.take_array()?))),
            _ => f64::from_bits(u64::from_be_bytes(self.take_array()?)),
        })
    }

    /// Reads a float of any width that converts to `f32` without loss.
    pub fn read_f32(&mut self) -> Result<f32, ReadError> {
        let found = self.peek_state()?;
        if found != CborState::DoubleFloat {
            return self.read_f64().map(|value| value as f32);
        }

        let value = self.read_f64()?;
        let narrow = value as f32;
        if value.is_nan() || f64::from(narrow) == value {
            Ok(narrow)
        } else {
            Err(ReadError::Overflow { target: "f32" })
        }
    }

    fn begin_float(&mut self, found: CborState) -> Result<(), ReadError> {
        if !found.is_float() {
            return Err(ReadError::UnexpectedState {
                expected: CborState::DoubleFloat,
                found,
            });
        }
        self.begin_item();
        self.offset += 1;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Strings

    pub fn read_bytes(&mut self) -> Result<&'a [u8], ReadError> {
        self.expect(CborState::ByteString)?;
        self.begin_item();
        let len = self.read_length()?;
        self.take(len)
    }

    pub fn read_text(&mut self) -> Result<&'a str, ReadError> {
        self.expect(CborState::TextString)?;
        self.begin_item();
        let len = self.read_length()?;
        let offset = self.offset;
        let bytes = self.take(len)?;
        core::str::from_utf8(bytes).map_err(|_| ReadError::InvalidUtf8 { offset })
    }

    // -------------------------------------------------------------------------
    // Tags

    /// Reads a tag. The next data item is the tagged one.
    pub fn read_tag(&mut self) -> Result<u64, ReadError> {
        self.expect(CborState::Tag)?;
        self.read_head().map(|(_, value)| value)
    }

    /// Reads a tag that must be `expected`.
    pub fn read_expected_tag(&mut self, expected: u64, kind: &'static str) -> Result<(), ReadError> {
        match self.read_tag()? {
            tag if tag == expected => Ok(()),
            tag => Err(ReadError::InvalidValue {
                kind,
                reason: alloc::format!("expected tag {expected}, found tag {tag}"),
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Containers

    fn read_start(&mut self, is_map: bool) -> Result<usize, ReadError> {
        self.expect(if is_map {
            CborState::StartMap
        } else {
            CborState::StartArray
        })?;
        self.begin_item();
        let len = self.read_length()?;
        let remaining = if is_map {
            len.checked_mul(2).ok_or(ReadError::Overflow { target: "usize" })?
        } else {
            len
        };
        // Every item takes at least one byte.
        if remaining > self.data.len() - self.offset {
            return Err(ReadError::UnexpectedEof);
        }
        self.frames.push(Frame { is_map, remaining });
        Ok(len)
    }

    /// Reads an array head, returns the number of items.
    #[inline]
    pub fn read_start_array(&mut self) -> Result<usize, ReadError> {
        self.read_start(false)
    }

    pub fn read_end_array(&mut self) -> Result<(), ReadError> {
        self.expect(CborState::EndArray)?;
        self.frames.pop();
        Ok(())
    }

    /// Reads a map head, returns the number of entries.
    #[inline]
    pub fn read_start_map(&mut self) -> Result<usize, ReadError> {
        self.read_start(true)
    }

    pub fn read_end_map(&mut self) -> Result<(), ReadError> {
        self.expect(CborState::EndMap)?;
        self.frames.pop();
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Skipping

    /// Skips the next data item with its tags and content.
    pub fn skip_value(&mut self) -> Result<(), ReadError> {
        match self.peek_state()? {
            CborState::Tag => {
                self.read_tag()?;
                self.skip_value()
            }
            CborState::StartArray => {
                let len = self.read_start_array()?;
                for _ in 0..len {
                    self.skip_value()?;
                }
                self.read_end_array()
            }
            CborState::StartMap => {
                let len = self.read_start_map()?;
                for _ in 0..len * 2 {
                    self.skip_value()?;
                }
                self.read_end_map()
            }
            CborState::ByteString => self.read_bytes().map(drop),
            CborState::TextString => self.read_text().map(drop),
            CborState::UnsignedInteger | CborState::NegativeInteger => {
                self.read_integer().map(drop)
            }
            CborState::HalfFloat | CborState::SingleFloat | CborState::DoubleFloat => {
                self.read_f64().map(drop)
            }
            CborState::Null => self.read_null(),
            CborState::Undefined => self.read_undefined(),
            CborState::Boolean => self.read_bool().map(drop),
            CborState::SimpleValue => self.read_simple_value().map(drop),
            found @ (CborState::EndArray | CborState::EndMap | CborState::Finished) => {
                Err(ReadError::UnexpectedState {
                    expected: CborState::SimpleValue,
                    found,
                })
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn integers_and_narrowing() {
        let mut reader = CborReader::new(&[0x39, 0x01, 0xF3]);
        assert_eq!(reader.read_i32().unwrap(), -500);
        reader.finish().unwrap();

        let mut reader = CborReader::new(&[0x1B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_i64(), Err(ReadError::Overflow { target: "i64" }));

        let mut reader = CborReader::new(&[0x20]);
        assert_eq!(reader.read_u32(), Err(ReadError::Overflow { target: "u32" }));
    }

    #[test]
    fn floats_of_every_width() {
        // 1.5 as half precision.
        let mut reader = CborReader::new(&[0xF9, 0x3E, 0x00]);
        assert_eq!(reader.read_f64().unwrap(), 1.5);

        let mut reader = CborReader::new(&[0xFB, 0x3F, 0xF8, 0, 0, 0, 0, 0, 0]);
        assert_eq!(reader.read_f32().unwrap(), 1.5);

        // 0.1 has no exact f32 form.
        let mut bytes = vec![0xFB];
        bytes.extend_from_slice(&0.1_f64.to_bits().to_be_bytes());
        let mut reader = CborReader::new(&bytes);
        assert_eq!(reader.read_f32(), Err(ReadError::Overflow { target: "f32" }));
    }

    #[test]
    fn container_states() {
        let mut reader = CborReader::new(&[0xA1, 0x61, b'k', 0x80]);
        assert_eq!(reader.read_start_map().unwrap(), 1);
        assert_eq!(reader.read_text().unwrap(), "k");
        assert_eq!(reader.read_start_array().unwrap(), 0);
        assert_eq!(reader.peek_state().unwrap(), CborState::EndArray);
        assert!(reader.read_end_map().is_err());
        reader.read_end_array().unwrap();
        reader.read_end_map().unwrap();
        reader.finish().unwrap();
    }

    #[test]
    fn skip_nested() {
        let mut reader = CborReader::new(&[0x82, 0xC1, 0xA1, 0x01, 0x82, 0xF5, 0xF6, 0x07]);
        assert_eq!(reader.read_start_array().unwrap(), 2);
        reader.skip_value().unwrap();
        assert_eq!(reader.read_u32().unwrap(), 7);
        reader.read_end_array().unwrap();
        reader.finish().unwrap();
    }

    #[test]
    fn malformed_input() {
        assert_eq!(
            CborReader::new(&[0x9F]).peek_state(),
            Err(ReadError::IndefiniteLength { offset: 0 })
        );
        assert_eq!(CborReader::new(&[0x19, 0x01]).read_u32(), Err(ReadError::UnexpectedEof));
        assert_eq!(CborReader::new(&[0x85, 0x01]).read_start_array(), Err(ReadError::UnexpectedEof));

        let mut reader = CborReader::new(&[0x01, 0x02]);
        reader.read_u32().unwrap();
        assert_eq!(reader.finish(), Err(ReadError::TrailingBytes { count: 1 }));
    }

    #[test]
    fn bignums() {
        let mut reader = CborReader::new(&[0xC3, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(reader.read_big_integer().unwrap(), -(1 << 64) - 1);

        let mut reader = CborReader::new(&[0x3B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_big_integer().unwrap(), -(1 << 64));
    }
}
