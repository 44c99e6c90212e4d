//! The type tag registry.
//!
//! Values stored behind an [`AnyValue`](ac_reflect::AnyValue) are wrapped
//! as `tag, map(1) { key: payload }`. Scalars, their `Option` and their
//! `Box<[_]>` each own a tag of a contiguous block just below
//! [`SELF_DESCRIBE_TAG`], and use [`PAYLOAD_KEY_PLACEHOLDER`] as key.
//! Every other type uses [`SELF_DESCRIBE_TAG`] and its type key,
//! `"{type_path}|{crate_name}"`.
//!
//! Tags are assigned downwards from `55797`, in [`ScalarKind`] order, each
//! kind taking its scalar, nullable and array tag. `String` has no
//! nullable tag, `IpAddr` has none at all.
//!
//! | tag | type |
//! |---|---|
//! | 55797 ..= 55795 | `i16`, `Option<i16>`, `Box<[i16]>` |
//! | 55794 ..= 55792 | `i32`, `Option<i32>`, `Box<[i32]>` |
//! | ... | ... |
//! | 55770, 55769 | `String`, `Box<[String]>` |
//! | ... | ... |
//! | 55747 ..= 55745 | `DateTime<FixedOffset>`, its `Option` and `Box<[_]>` |

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use core::net::IpAddr;

use ac_reflect::Reflect;
use ac_reflect::info::{ScalarKind, TypeInfo, Typed};
use ac_reflect::ops::{ReflectRef, ScalarRef, ScalarValue};
use ac_reflect::scalar_types::{DateTime, Decimal, FixedOffset, NaiveDateTime, TimeDelta, Uuid};
use chrono::SecondsFormat;

use crate::error::{ReadError, WriteError};
use crate::{CborReader, CborWriter};

// -----------------------------------------------------------------------------
// Constants

/// The self-describe CBOR tag, used as the fallback tag.
pub const SELF_DESCRIBE_TAG: u64 = 55799;

/// Reserved, never written.
pub const RESERVED_TAG: u64 = 55798;

const FIRST_TAG: u64 = RESERVED_TAG - 1;

/// One below the last registry tag. Tags at or above it are registry-space tags.
pub const REGISTRY_BOUNDARY: u64 = 55744;

/// The key of wrapped values with a registry tag.
pub const PAYLOAD_KEY_PLACEHOLDER: &str = "F6";

/// Separates the type path from the crate name in a type key.
pub const TYPE_KEY_SEPARATOR: char = '|';

const TAG_COUNT: usize = (FIRST_TAG - REGISTRY_BOUNDARY) as usize;

// Standard tags of the scalar encodings.
const TAG_DATE_TIME_TEXT: u64 = 0;
const TAG_EPOCH_SECONDS: u64 = 1;
const TAG_DECIMAL_FRACTION: u64 = 4;

// -----------------------------------------------------------------------------
// Table

macro_rules! tag_table {
    ($($ty:ty),* $(,)?) => {
        [$(<$ty as Typed>::type_info as fn() -> &'static TypeInfo),*]
    };
}

/// Indexed by `FIRST_TAG - tag`.
static TAGGED_TYPES: [fn() -> &'static TypeInfo; TAG_COUNT] = tag_table![
    i16, Option<i16>, Box<[i16]>,
    i32, Option<i32>, Box<[i32]>,
    i64, Option<i64>, Box<[i64]>,
    u16, Option<u16>, Box<[u16]>,
    u32, Option<u32>, Box<[u32]>,
    u64, Option<u64>, Box<[u64]>,
    f32, Option<f32>, Box<[f32]>,
    f64, Option<f64>, Box<[f64]>,
    bool, Option<bool>, Box<[bool]>,
    String, Box<[String]>,
    u8, Option<u8>, Box<[u8]>,
    char, Option<char>, Box<[char]>,
    i8, Option<i8>, Box<[i8]>,
    Decimal, Option<Decimal>, Box<[Decimal]>,
    NaiveDateTime, Option<NaiveDateTime>, Box<[NaiveDateTime]>,
    TimeDelta, Option<TimeDelta>, Box<[TimeDelta]>,
    Uuid, Option<Uuid>, Box<[Uuid]>,
    DateTime<FixedOffset>, Option<DateTime<FixedOffset>>, Box<[DateTime<FixedOffset>]>,
];

/// The shapes a scalar kind has registry tags for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Nullable,
    Array,
}

/// Returns the registry tag of a scalar kind in a shape.
///
/// # Examples
///
/// ```
/// use ac_cbor::tags::{Shape, registry_tag};
/// use ac_reflect::info::ScalarKind;
///
/// assert_eq!(registry_tag(ScalarKind::I32, Shape::Scalar), Some(55794));
/// assert_eq!(registry_tag(ScalarKind::String, Shape::Nullable), None);
/// assert_eq!(registry_tag(ScalarKind::IpAddr, Shape::Scalar), None);
/// ```
pub const fn registry_tag(kind: ScalarKind, shape: Shape) -> Option<u64> {
    let index = kind as u64;
    let first = if index <= ScalarKind::String as u64 {
        FIRST_TAG - 3 * index
    } else {
        FIRST_TAG - 3 * index + 1
    };

    match (kind, shape) {
        (ScalarKind::IpAddr, _) | (ScalarKind::String, Shape::Nullable) => None,
        (ScalarKind::String, Shape::Array) => Some(first - 1),
        (_, Shape::Scalar) => Some(first),
        (_, Shape::Nullable) => Some(first - 1),
        (_, Shape::Array) => Some(first - 2),
    }
}

// -----------------------------------------------------------------------------
// PayloadKey

/// The key of a wrapped value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadKey {
    /// [`PAYLOAD_KEY_PLACEHOLDER`], used with registry tags.
    Placeholder,
    /// `"{type_path}|{crate_name}"`, used with [`SELF_DESCRIBE_TAG`].
    TypeKey(String),
}

impl PayloadKey {
    pub fn as_str(&self) -> &str {
        match self {
            PayloadKey::Placeholder => PAYLOAD_KEY_PLACEHOLDER,
            PayloadKey::TypeKey(key) => key,
        }
    }
}

/// Builds the type key of `info`.
///
/// ```
/// use ac_cbor::tags::type_key;
/// use ac_reflect::info::Typed;
///
/// assert_eq!(type_key(<Vec<i32>>::type_info()), "alloc::vec::Vec<i32>|alloc");
/// ```
pub fn type_key(info: &TypeInfo) -> String {
    format!(
        "{}{TYPE_KEY_SEPARATOR}{}",
        info.type_path(),
        info.crate_name().unwrap_or_default()
    )
}

/// Splits a type key into type path and crate name.
pub fn split_type_key(key: &str) -> Option<(&str, &str)> {
    key.rsplit_once(TYPE_KEY_SEPARATOR)
}

// -----------------------------------------------------------------------------
// Lookup

/// Returns the tag and key a value of type `info` is wrapped with.
///
/// # Examples
///
/// ```
/// use ac_cbor::tags::{PayloadKey, SELF_DESCRIBE_TAG, tag_for};
/// use ac_reflect::info::Typed;
///
/// assert_eq!(tag_for(i32::type_info()), (55794, PayloadKey::Placeholder));
/// assert_eq!(tag_for(<Option<i32>>::type_info()).0, 55793);
/// assert_eq!(tag_for(<Box<[i32]>>::type_info()).0, 55792);
///
/// let (tag, key) = tag_for(<Vec<i32>>::type_info());
/// assert_eq!(tag, SELF_DESCRIBE_TAG);
/// assert_eq!(key.as_str(), "alloc::vec::Vec<i32>|alloc");
/// ```
pub fn tag_for(info: &TypeInfo) -> (u64, PayloadKey) {
    let tag = match info {
        TypeInfo::Scalar(scalar) => registry_tag(scalar.kind(), Shape::Scalar),
        TypeInfo::Nullable(nullable) => nullable
            .inner_info()
            .as_scalar()
            .and_then(|inner| registry_tag(inner.kind(), Shape::Nullable)),
        TypeInfo::Array(array) => array
            .item_info()
            .as_scalar()
            .and_then(|item| registry_tag(item.kind(), Shape::Array)),
        _ => None,
    };

    match tag {
        Some(tag) => (tag, PayloadKey::Placeholder),
        None => (SELF_DESCRIBE_TAG, PayloadKey::TypeKey(type_key(info))),
    }
}

/// Returns the type owning a registry tag.
///
/// `None` for [`SELF_DESCRIBE_TAG`], [`RESERVED_TAG`] and unassigned tags.
///
/// ```
/// use ac_cbor::tags::{SELF_DESCRIBE_TAG, type_for};
///
/// assert!(type_for(55794).unwrap().type_is::<i32>());
/// assert!(type_for(SELF_DESCRIBE_TAG).is_none());
/// ```
pub fn type_for(tag: u64) -> Option<&'static TypeInfo> {
    if !(REGISTRY_BOUNDARY < tag && tag <= FIRST_TAG) {
        return None;
    }
    TAGGED_TYPES
        .get((FIRST_TAG - tag) as usize)
        .map(|type_info| type_info())
}

// -----------------------------------------------------------------------------
// Scalars

/// Writes `value` if it is a scalar, returns `false` otherwise.
pub fn encode_scalar(writer: &mut CborWriter, value: &dyn Reflect) -> Result<bool, WriteError> {
    match value.reflect_ref() {
        ReflectRef::Scalar(scalar) => write_scalar(writer, scalar.get()).map(|()| true),
        _ => Ok(false),
    }
}

/// Writes a scalar.
///
/// 8 and 16 bit integers use the 32 bit paths, date-times are tagged epoch
/// seconds, time deltas are microseconds as `f64`.
///
/// # Examples
///
/// ```
/// use ac_cbor::{CborWriter, tags::write_scalar};
/// use ac_reflect::ops::ScalarRef;
/// use ac_reflect::scalar_types::Decimal;
///
/// let mut writer = CborWriter::new();
/// write_scalar(&mut writer, ScalarRef::Decimal(Decimal::new(12345, 2))).unwrap();
///
/// // 4([-2, 12345])
/// assert_eq!(writer.as_bytes(), [0xC4, 0x82, 0x21, 0x19, 0x30, 0x39]);
/// ```
pub fn write_scalar(writer: &mut CborWriter, value: ScalarRef<'_>) -> Result<(), WriteError> {
    match value {
        ScalarRef::I8(value) => writer.write_i32(value.into()),
        ScalarRef::I16(value) => writer.write_i32(value.into()),
        ScalarRef::I32(value) => writer.write_i32(value),
        ScalarRef::I64(value) => writer.write_i64(value),
        ScalarRef::U8(value) => writer.write_u32(value.into()),
        ScalarRef::U16(value) => writer.write_u32(value.into()),
        ScalarRef::U32(value) => writer.write_u32(value),
        ScalarRef::U64(value) => writer.write_u64(value),
        ScalarRef::F32(value) => writer.write_f32(value),
        ScalarRef::F64(value) => writer.write_f64(value),
        ScalarRef::Bool(value) => writer.write_bool(value),
        ScalarRef::String(value) => writer.write_text(value),
        ScalarRef::Char(value) => writer.write_text(value.encode_utf8(&mut [0; 4])),
        ScalarRef::Decimal(value) => {
            writer.write_tag(TAG_DECIMAL_FRACTION)?;
            writer.start_array(2)?;
            writer.write_i64(-i64::from(value.scale()))?;
            writer.write_i128(value.mantissa())?;
            writer.end_array()
        }
        ScalarRef::DateTime(value) => {
            writer.write_tag(TAG_EPOCH_SECONDS)?;
            writer.write_i64(value.and_utc().timestamp())
        }
        ScalarRef::TimeDelta(value) => writer.write_f64(total_microseconds(value)),
        ScalarRef::Uuid(value) => {
            writer.write_text(value.hyphenated().encode_lower(&mut Uuid::encode_buffer()))
        }
        ScalarRef::DateTimeOffset(value) => {
            writer.write_tag(TAG_DATE_TIME_TEXT)?;
            writer.write_text(&value.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }
        ScalarRef::IpAddr(value) => writer.write_text(&value.to_string()),
    }
}

fn total_microseconds(value: TimeDelta) -> f64 {
    match value.num_microseconds() {
        Some(micros) => micros as f64,
        None => value.num_milliseconds() as f64 * 1000.0,
    }
}

fn invalid(kind: ScalarKind, reason: impl ToString) -> ReadError {
    ReadError::InvalidValue {
        kind: kind.name(),
        reason: reason.to_string(),
    }
}

fn narrow<T: TryFrom<V>, V>(value: V, kind: ScalarKind) -> Result<T, ReadError> {
    T::try_from(value).map_err(|_| ReadError::Overflow { target: kind.name() })
}

/// `f64` to `i64` when it is in range.
fn float_to_i64(value: f64) -> Option<i64> {
    const LIMIT: f64 = 9_223_372_036_854_775_808.0; // 2^63
    (value.is_finite() && (-LIMIT..LIMIT).contains(&value)).then_some(value as i64)
}

/// Reads a scalar of `kind`, the inverse of [`write_scalar`].
///
/// Floats of any width are accepted, narrowing to `f32` must be lossless.
///
/// # Examples
///
/// ```
/// use ac_cbor::{CborReader, tags::decode_scalar};
/// use ac_reflect::info::ScalarKind;
/// use ac_reflect::ops::ScalarValue;
///
/// let mut reader = CborReader::new(&[0x19, 0x01, 0x00]);
/// assert_eq!(decode_scalar(&mut reader, ScalarKind::U16).unwrap(), ScalarValue::U16(256));
///
/// let mut reader = CborReader::new(&[0x19, 0x01, 0x00]);
/// assert!(decode_scalar(&mut reader, ScalarKind::U8).is_err());
/// ```
pub fn decode_scalar(reader: &mut CborReader<'_>, kind: ScalarKind) -> Result<ScalarValue, ReadError> {
    Ok(match kind {
        ScalarKind::I8 => ScalarValue::I8(narrow(reader.read_i32()?, kind)?),
        ScalarKind::I16 => ScalarValue::I16(narrow(reader.read_i32()?, kind)?),
        ScalarKind::I32 => ScalarValue::I32(reader.read_i32()?),
        ScalarKind::I64 => ScalarValue::I64(reader.read_i64()?),
        ScalarKind::U8 => ScalarValue::U8(narrow(reader.read_u32()?, kind)?),
        ScalarKind::U16 => ScalarValue::U16(narrow(reader.read_u32()?, kind)?),
        ScalarKind::U32 => ScalarValue::U32(reader.read_u32()?),
        ScalarKind::U64 => ScalarValue::U64(reader.read_u64()?),
        ScalarKind::F32 => ScalarValue::F32(reader.read_f32()?),
        ScalarKind::F64 => ScalarValue::F64(reader.read_f64()?),
        ScalarKind::Bool => ScalarValue::Bool(reader.read_bool()?),
        ScalarKind::String => ScalarValue::String(reader.read_text()?.into()),
        ScalarKind::Char => {
            let mut chars = reader.read_text()?.chars();
            match (chars.next(), chars.next()) {
                (Some(value), None) => ScalarValue::Char(value),
                _ => return Err(invalid(kind, "expected exactly one character")),
            }
        }
        ScalarKind::Decimal => ScalarValue::Decimal(read_decimal(reader)?),
        ScalarKind::DateTime => {
            reader.read_expected_tag(TAG_EPOCH_SECONDS, kind.name())?;
            let seconds = if reader.peek_state()?.is_float() {
                float_to_i64(reader.read_f64()?.trunc())
                    .ok_or_else(|| invalid(kind, "timestamp out of range"))?
            } else {
                reader.read_i64()?
            };
            let value = DateTime::from_timestamp(seconds, 0)
                .ok_or_else(|| invalid(kind, "timestamp out of range"))?;
            ScalarValue::DateTime(value.naive_utc())
        }
        ScalarKind::TimeDelta => {
            let micros = reader.read_f64()?;
            let value = match float_to_i64(micros.round()) {
                Some(micros) => Some(TimeDelta::microseconds(micros)),
                None => float_to_i64((micros / 1000.0).round()).and_then(TimeDelta::try_milliseconds),
            };
            ScalarValue::TimeDelta(value.ok_or_else(|| invalid(kind, "duration out of range"))?)
        }
        ScalarKind::Uuid => {
            let text = reader.read_text()?;
            ScalarValue::Uuid(Uuid::parse_str(text).map_err(|err| invalid(kind, err))?)
        }
        ScalarKind::DateTimeOffset => {
            reader.read_expected_tag(TAG_DATE_TIME_TEXT, kind.name())?;
            let text = reader.read_text()?;
            let value = DateTime::parse_from_rfc3339(text).map_err(|err| invalid(kind, err))?;
            ScalarValue::DateTimeOffset(value)
        }
        ScalarKind::IpAddr => {
            let text = reader.read_text()?;
            ScalarValue::IpAddr(text.parse::<IpAddr>().map_err(|err| invalid(kind, err))?)
        }
    })
}

fn read_decimal(reader: &mut CborReader<'_>) -> Result<Decimal, ReadError> {
    let kind = ScalarKind::Decimal;
    reader.read_expected_tag(TAG_DECIMAL_FRACTION, kind.name())?;
    if reader.read_start_array()? != 2 {
        return Err(invalid(kind, "expected [exponent, mantissa]"));
    }
    let exponent = reader.read_i64()?;
    let mantissa = reader.read_big_integer()?;
    reader.read_end_array()?;

    let (mantissa, scale) = if exponent <= 0 {
        let scale = u32::try_from(exponent.unsigned_abs())
            .map_err(|_| invalid(kind, "scale out of range"))?;
        (mantissa, scale)
    } else {
        let mantissa = u32::try_from(exponent)
            .ok()
            .and_then(|exponent| 10_i128.checked_pow(exponent))
            .and_then(|factor| mantissa.checked_mul(factor))
            .ok_or_else(|| invalid(kind, "value out of range"))?;
        (mantissa, 0)
    };

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|err| invalid(kind, err))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use chrono::NaiveDate;
    use core::net::Ipv6Addr;

    #[test]
    fn tag_block() {
        assert_eq!(TAG_COUNT, 53);
        assert_eq!(tag_for(i16::type_info()).0, 55797);
        assert_eq!(tag_for(String::type_info()).0, 55770);
        assert_eq!(tag_for(<Box<[String]>>::type_info()).0, 55769);
        assert_eq!(tag_for(u8::type_info()).0, 55768);
        assert_eq!(tag_for(<Box<[DateTime<FixedOffset>]>>::type_info()).0, 55745);
        assert_eq!(REGISTRY_BOUNDARY, 55745 - 1);

        assert!(type_for(RESERVED_TAG).is_none());
        assert!(type_for(REGISTRY_BOUNDARY).is_none());
        assert!(type_for(1).is_none());
    }

    #[test]
    fn table_matches_tag_for() {
        let mut tags: Vec<u64> = ScalarKind::ALL
            .iter()
            .flat_map(|&kind| {
                [Shape::Scalar, Shape::Nullable, Shape::Array]
                    .into_iter()
                    .filter_map(move |shape| registry_tag(kind, shape))
            })
            .collect();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(tags.len(), TAG_COUNT);

        for tag in tags {
            let info = type_for(tag).unwrap();
            assert_eq!(tag_for(info), (tag, PayloadKey::Placeholder), "{}", info.type_path());
        }
    }

    #[test]
    fn fallback_keys() {
        let (tag, key) = tag_for(<Option<String>>::type_info());
        assert_eq!(tag, SELF_DESCRIBE_TAG);
        assert_eq!(key.as_str(), "core::option::Option<alloc::string::String>|core");

        let (tag, key) = tag_for(IpAddr::type_info());
        assert_eq!(tag, SELF_DESCRIBE_TAG);
        assert_eq!(split_type_key(key.as_str()), Some(("core::net::IpAddr", "core")));
    }

    fn round_trip(value: ScalarValue) -> Vec<u8> {
        let mut writer = CborWriter::new();
        write_scalar(&mut writer, value.as_scalar_ref()).unwrap();
        let bytes = writer.finish().unwrap().into_vec();

        let mut reader = CborReader::new(&bytes);
        assert_eq!(decode_scalar(&mut reader, value.kind()).unwrap(), value);
        reader.finish().unwrap();
        bytes
    }

    #[test]
    fn scalar_encodings() {
        assert_eq!(round_trip(ScalarValue::I8(-128)), [0x38, 0x7F]);
        assert_eq!(round_trip(ScalarValue::I32(i32::MAX)), [0x1A, 0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(round_trip(ScalarValue::U64(u64::MAX))[0], 0x1B);
        assert_eq!(round_trip(ScalarValue::F32(f32::MAX))[0], 0xFA);
        assert_eq!(round_trip(ScalarValue::F64(f64::MAX))[0], 0xFB);
        assert_eq!(round_trip(ScalarValue::Char('é')), [0x62, 0xC3, 0xA9]);
        assert_eq!(round_trip(ScalarValue::String("abc".into())), [0x63, b'a', b'b', b'c']);

        let time = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            round_trip(ScalarValue::DateTime(time)),
            [0xC1, 0x1A, 0x65, 0x92, 0x00, 0x80]
        );

        let delta = TimeDelta::microseconds(1_500_000);
        let mut expected = Vec::from([0xFB]);
        expected.extend_from_slice(&1_500_000_f64.to_bits().to_be_bytes());
        assert_eq!(round_trip(ScalarValue::TimeDelta(delta)), expected);

        let uuid = Uuid::from_u128(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8);
        let bytes = round_trip(ScalarValue::Uuid(uuid));
        assert_eq!(&bytes[..2], [0x78, 36]);
        assert_eq!(&bytes[2..], b"67e55044-10b1-426f-9247-bb680e5fe0c8");

        let offset = DateTime::parse_from_rfc3339("2024-05-06T07:08:09+02:00").unwrap();
        let bytes = round_trip(ScalarValue::DateTimeOffset(offset));
        assert_eq!(&bytes[..2], [0xC0, 0x78]);
        assert_eq!(&bytes[3..], b"2024-05-06T07:08:09+02:00");

        round_trip(ScalarValue::IpAddr(IpAddr::V6(Ipv6Addr::LOCALHOST)));
    }

    #[test]
    fn decimals() {
        round_trip(ScalarValue::Decimal(Decimal::MAX));
        round_trip(ScalarValue::Decimal(Decimal::MIN));
        round_trip(ScalarValue::Decimal(Decimal::new(-5, 28)));

        // 4([2, 3]) is 300.
        let mut reader = CborReader::new(&[0xC4, 0x82, 0x02, 0x03]);
        assert_eq!(
            decode_scalar(&mut reader, ScalarKind::Decimal).unwrap(),
            ScalarValue::Decimal(Decimal::new(300, 0))
        );
    }

    #[test]
    fn invalid_scalars() {
        let mut reader = CborReader::new(&[0x62, b'a', b'b']);
        assert!(matches!(
            decode_scalar(&mut reader, ScalarKind::Char),
            Err(ReadError::InvalidValue { kind: "char", .. })
        ));

        let mut reader = CborReader::new(&[0x19, 0x80, 0x00]);
        assert_eq!(
            decode_scalar(&mut reader, ScalarKind::I16),
            Err(ReadError::Overflow { target: "i16" })
        );

        let mut reader = CborReader::new(&[0xF5]);
        assert!(matches!(
            decode_scalar(&mut reader, ScalarKind::I32),
            Err(ReadError::UnexpectedState { found: crate::CborState::Boolean, .. })
        ));
    }
}
