use alloc::vec::Vec;

use crate::CborBytes;
use crate::error::WriteError;

// -----------------------------------------------------------------------------
// Constants

const MAJOR_UNSIGNED: u8 = 0;
const MAJOR_NEGATIVE: u8 = 1;
const MAJOR_BYTES: u8 = 2;
const MAJOR_TEXT: u8 = 3;
const MAJOR_ARRAY: u8 = 4;
const MAJOR_MAP: u8 = 5;
const MAJOR_TAG: u8 = 6;

pub(crate) const FALSE: u8 = 0xF4;
pub(crate) const TRUE: u8 = 0xF5;
pub(crate) const NULL: u8 = 0xF6;
pub(crate) const UNDEFINED: u8 = 0xF7;
pub(crate) const FLOAT32: u8 = 0xFA;
pub(crate) const FLOAT64: u8 = 0xFB;

// -----------------------------------------------------------------------------
// CborWriter

#[derive(Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Array,
    Map,
}

impl ContainerKind {
    const fn name(self) -> &'static str {
        match self {
            ContainerKind::Array => "array",
            ContainerKind::Map => "map",
        }
    }
}

struct Frame {
    kind: ContainerKind,
    // Data items, a map entry counts twice.
    expected: usize,
    written: usize,
}

/// A definite length CBOR writer.
///
/// Tracks open containers, so an unbalanced document is reported by
/// [`finish`](CborWriter::finish) instead of being returned.
///
/// # Examples
///
/// ```
/// use ac_cbor::CborWriter;
///
/// let mut writer = CborWriter::new();
/// writer.start_map(1).unwrap();
/// writer.write_text("Tags").unwrap();
/// writer.start_array(2).unwrap();
/// writer.write_u32(1).unwrap();
/// writer.write_i64(-2).unwrap();
/// writer.end_array().unwrap();
/// writer.end_map().unwrap();
///
/// let bytes = writer.finish().unwrap();
/// assert_eq!(bytes, [0xA1, 0x64, b'T', b'a', b'g', b's', 0x82, 0x01, 0x21]);
/// ```
pub struct CborWriter {
    buffer: Vec<u8>,
    frames: Vec<Frame>,
    has_root: bool,
    pending_tag: bool,
}

impl CborWriter {
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            frames: Vec::new(),
            has_root: false,
            pending_tag: false,
        }
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the document, which must hold exactly one complete root item.
    pub fn finish(self) -> Result<CborBytes, WriteError> {
        if self.pending_tag {
            return Err(WriteError::DanglingTag);
        }
        if !self.has_root || !self.frames.is_empty() {
            return Err(WriteError::Incomplete);
        }
        Ok(CborBytes::from(self.buffer))
    }

    fn begin_item(&mut self) -> Result<(), WriteError> {
        self.pending_tag = false;
        match self.frames.last_mut() {
            Some(frame) => {
                if frame.written == frame.expected {
                    return Err(WriteError::ContainerFull {
                        expected: frame.expected,
                    });
                }
                frame.written += 1;
            }
            None => {
                if self.has_root {
                    return Err(WriteError::MultipleRoots);
                }
                self.has_root = true;
            }
        }
        Ok(())
    }

    fn write_head(&mut self, major: u8, value: u64) {
        let major = major << 5;
        if value < 24 {
            self.buffer.push(major | value as u8);
        } else if let Ok(value) = u8::try_from(value) {
            self.buffer.extend_from_slice(&[major | 24, value]);
        } else if let Ok(value) = u16::try_from(value) {
            self.buffer.push(major | 25);
            self.buffer.extend_from_slice(&value.to_be_bytes());
        } else if let Ok(value) = u32::try_from(value) {
            self.buffer.push(major | 26);
            self.buffer.extend_from_slice(&value.to_be_bytes());
        } else {
            self.buffer.push(major | 27);
            self.buffer.extend_from_slice(&value.to_be_bytes());
        }
    }

    fn write_simple(&mut self, byte: u8) -> Result<(), WriteError> {
        self.begin_item()?;
        self.buffer.push(byte);
        Ok(())
    }

    pub fn write_null(&mut self) -> Result<(), WriteError> {
        self.write_simple(NULL)
    }

    /// Writes the undefined simple value, `0xF7`.
    pub fn write_undefined(&mut self) -> Result<(), WriteError> {
        self.write_simple(UNDEFINED)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<(), WriteError> {
        self.write_simple(if value { TRUE } else { FALSE })
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), WriteError> {
        self.begin_item()?;
        self.write_head(MAJOR_UNSIGNED, value);
        Ok(())
    }

    #[inline]
    pub fn write_u32(&mut self, value: u32) -> Result<(), WriteError> {
        self.write_u64(u64::from(value))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<(), WriteError> {
        self.begin_item()?;
        if value < 0 {
            // -1 - value
            self.write_head(MAJOR_NEGATIVE, !value as u64);
        } else {
            self.write_head(MAJOR_UNSIGNED, value as u64);
        }
        Ok(())
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) -> Result<(), WriteError> {
        self.write_i64(i64::from(value))
    }

    /// Writes an integer, as a bignum (tags 2 and 3) when it exceeds 64 bits.
    pub fn write_i128(&mut self, value: i128) -> Result<(), WriteError> {
        if let Ok(value) = u64::try_from(value) {
            return self.write_u64(value);
        }
        if value < 0 && value >= -(1_i128 << 64) {
            self.begin_item()?;
            self.write_head(MAJOR_NEGATIVE, (-1 - value) as u64);
            return Ok(());
        }

        let (tag, magnitude) = if value < 0 {
            (3, (-1 - value) as u128)
        } else {
            (2, value as u128)
        };
        let bytes = magnitude.to_be_bytes();
        let skip = bytes.iter().take_while(|byte| **byte == 0).count();
        self.write_tag(tag)?;
        self.write_bytes(&bytes[skip..])
    }

    /// Writes an IEEE 754 single precision float, `0xFA`.
    pub fn write_f32(&mut self, value: f32) -> Result<(), WriteError> {
        self.begin_item()?;
        self.buffer.push(FLOAT32);
        self.buffer.extend_from_slice(&value.to_bits().to_be_bytes());
        Ok(())
    }

    /// Writes an IEEE 754 double precision float, `0xFB`.
    pub fn write_f64(&mut self, value: f64) -> Result<(), WriteError> {
        self.begin_item()?;
        self.buffer.push(FLOAT64);
        self.buffer.extend_from_slice(&value.to_bits().to_be_bytes());
        Ok(())
    }

    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), WriteError> {
        self.begin_item()?;
        self.write_head(MAJOR_BYTES, value.len() as u64);
        self.buffer.extend_from_slice(value);
        Ok(())
    }

    pub fn write_text(&mut self, value: &str) -> Result<(), WriteError> {
        self.begin_item()?;
        self.write_head(MAJOR_TEXT, value.len() as u64);
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes a tag. The next data item is the tagged one.
    pub fn write_tag(&mut self, tag: u64) -> Result<(), WriteError> {
        if let Some(frame) = self.frames.last()
            && frame.written == frame.expected
        {
            return Err(WriteError::ContainerFull {
                expected: frame.expected,
            });
        }
        if self.frames.is_empty() && self.has_root {
            return Err(WriteError::MultipleRoots);
        }
        self.write_head(MAJOR_TAG, tag);
        self.pending_tag = true;
        Ok(())
    }

    fn start_container(&mut self, kind: ContainerKind, len: usize) -> Result<(), WriteError> {
        self.begin_item()?;
        let major = match kind {
            ContainerKind::Array => MAJOR_ARRAY,
            ContainerKind::Map => MAJOR_MAP,
        };
        self.write_head(major, len as u64);
        let expected = match kind {
            ContainerKind::Array => len,
            ContainerKind::Map => len * 2,
        };
        self.frames.push(Frame {
            kind,
            expected,
            written: 0,
        });
        Ok(())
    }

    fn end_container(&mut self, kind: ContainerKind) -> Result<(), WriteError> {
        if self.pending_tag {
            return Err(WriteError::DanglingTag);
        }
        match self.frames.last() {
            Some(frame) if frame.kind == kind => {
                if frame.written != frame.expected {
                    return Err(WriteError::CountMismatch {
                        expected: frame.expected,
                        written: frame.written,
                    });
                }
                self.frames.pop();
                Ok(())
            }
            _ => Err(WriteError::NotOpen(kind.name())),
        }
    }

    /// Starts an array of `len` items.
    #[inline]
    pub fn start_array(&mut self, len: usize) -> Result<(), WriteError> {
        self.start_container(ContainerKind::Array, len)
    }

    #[inline]
    pub fn end_array(&mut self) -> Result<(), WriteError> {
        self.end_container(ContainerKind::Array)
    }

    /// Starts a map of `len` key/value pairs.
    #[inline]
    pub fn start_map(&mut self, len: usize) -> Result<(), WriteError> {
        self.start_container(ContainerKind::Map, len)
    }

    #[inline]
    pub fn end_map(&mut self) -> Result<(), WriteError> {
        self.end_container(ContainerKind::Map)
    }
}

impl Default for CborWriter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut CborWriter) -> Result<(), WriteError>) -> Vec<u8> {
        let mut writer = CborWriter::new();
        f(&mut writer).unwrap();
        writer.finish().unwrap().into_vec()
    }

    #[test]
    fn integer_heads() {
        assert_eq!(written(|w| w.write_i32(10)), [0x0A]);
        assert_eq!(written(|w| w.write_i32(24)), [0x18, 0x18]);
        assert_eq!(written(|w| w.write_i32(-1)), [0x20]);
        assert_eq!(written(|w| w.write_i32(-500)), [0x39, 0x01, 0xF3]);
        assert_eq!(written(|w| w.write_i32(i32::MAX)), [0x1A, 0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(
            written(|w| w.write_u64(u64::MAX)),
            [0x1B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
        assert_eq!(
            written(|w| w.write_i64(i64::MIN)),
            [0x3B, 0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn big_integers() {
        assert_eq!(
            written(|w| w.write_i128(1 << 64)),
            [0xC2, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            written(|w| w.write_i128(-(1 << 64) - 1)),
            [0xC3, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            written(|w| w.write_i128(-(1 << 64))),
            [0x3B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }

    #[test]
    fn floats_and_simple() {
        assert_eq!(written(|w| w.write_f32(1.0)), [0xFA, 0x3F, 0x80, 0, 0]);
        assert_eq!(written(|w| w.write_f64(1.0)), [0xFB, 0x3F, 0xF0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(written(|w| w.write_bool(true)), [0xF5]);
        assert_eq!(written(|w| w.write_undefined()), [0xF7]);
    }

    #[test]
    fn long_array_head() {
        let bytes = written(|w| {
            w.start_array(60)?;
            for _ in 0..60 {
                w.write_u32(0)?;
            }
            w.end_array()
        });
        assert_eq!(&bytes[..2], [0x98, 0x3C]);
        assert_eq!(bytes.len(), 62);
    }

    #[test]
    fn tag_head() {
        let bytes = written(|w| {
            w.write_tag(55794)?;
            w.write_i32(10)
        });
        assert_eq!(bytes, [0xD9, 0xD9, 0xF2, 0x0A]);
    }

    #[test]
    fn misuse() {
        let mut writer = CborWriter::new();
        writer.start_array(1).unwrap();
        assert_eq!(
            writer.end_array(),
            Err(WriteError::CountMismatch { expected: 1, written: 0 })
        );
        writer.write_null().unwrap();
        assert_eq!(writer.write_null(), Err(WriteError::ContainerFull { expected: 1 }));
        assert_eq!(writer.end_map(), Err(WriteError::NotOpen("map")));
        writer.end_array().unwrap();
        assert_eq!(writer.write_null(), Err(WriteError::MultipleRoots));

        let mut writer = CborWriter::new();
        writer.write_tag(1).unwrap();
        assert_eq!(writer.finish().unwrap_err(), WriteError::DanglingTag);

        assert_eq!(CborWriter::new().finish().unwrap_err(), WriteError::Incomplete);
    }
}
