use alloc::string::String;
use core::net::IpAddr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::Reflect;
use crate::info::ScalarKind;

macro_rules! define_scalar_enums {
    ($($kind:ident($ty:ty)),* $(,)?) => {
        /// A borrowed scalar, one variant per [`ScalarKind`].
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub enum ScalarRef<'a> {
            $($kind($ty),)*
            String(&'a str),
        }

        /// An owned scalar, one variant per [`ScalarKind`].
        #[derive(Clone, Debug, PartialEq)]
        pub enum ScalarValue {
            $($kind($ty),)*
            String(String),
        }

        impl ScalarRef<'_> {
            pub const fn kind(&self) -> ScalarKind {
                match self {
                    $(Self::$kind(_) => ScalarKind::$kind,)*
                    Self::String(_) => ScalarKind::String,
                }
            }

            pub fn to_value(&self) -> ScalarValue {
                match *self {
                    $(Self::$kind(value) => ScalarValue::$kind(value),)*
                    Self::String(value) => ScalarValue::String(value.into()),
                }
            }
        }

        impl ScalarValue {
            pub const fn kind(&self) -> ScalarKind {
                match self {
                    $(Self::$kind(_) => ScalarKind::$kind,)*
                    Self::String(_) => ScalarKind::String,
                }
            }

            pub fn as_scalar_ref(&self) -> ScalarRef<'_> {
                match self {
                    $(Self::$kind(value) => ScalarRef::$kind(*value),)*
                    Self::String(value) => ScalarRef::String(value),
                }
            }
        }

        $(
            impl From<$ty> for ScalarValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$kind(value)
                }
            }
        )*
    };
}

define_scalar_enums! {
    I16(i16),
    I32(i32),
    I64(i64),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Bool(bool),
    U8(u8),
    Char(char),
    I8(i8),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
    TimeDelta(TimeDelta),
    Uuid(Uuid),
    DateTimeOffset(DateTime<FixedOffset>),
    IpAddr(IpAddr),
}

impl From<String> for ScalarValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

// -----------------------------------------------------------------------------
// Scalar

/// A leaf value with a fixed wire form.
///
/// # Examples
///
/// ```
/// use ac_reflect::{Reflect, info::ScalarKind, ops::{ScalarRef, ScalarValue}};
///
/// let mut value = 7_u16;
/// let scalar = value.reflect_mut().as_scalar().unwrap();
///
/// assert_eq!(scalar.kind(), ScalarKind::U16);
/// assert_eq!(scalar.get(), ScalarRef::U16(7));
///
/// scalar.assign(ScalarValue::U16(9)).unwrap();
/// assert!(scalar.assign(ScalarValue::I32(1)).is_err());
/// assert_eq!(value, 9);
/// ```
pub trait Scalar: Reflect {
    fn kind(&self) -> ScalarKind;

    fn get(&self) -> ScalarRef<'_>;

    /// Stores `value` if it is of the same kind, otherwise returns it.
    fn assign(&mut self, value: ScalarValue) -> Result<(), ScalarValue>;
}
