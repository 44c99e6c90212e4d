use core::fmt;

use crate::info::{Type, TypePath};

// -----------------------------------------------------------------------------
// ScalarKind

/// The scalar types understood by the marshaller.
///
/// The declaration order is part of the wire format: registry tags are
/// assigned in this order, see `ac_cbor::tags`. [`ScalarKind::IpAddr`] is
/// last because it has no registry tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    I16,
    I32,
    I64,
    U16,
    U32,
    U64,
    F32,
    F64,
    Bool,
    String,
    U8,
    Char,
    I8,
    Decimal,
    DateTime,
    TimeDelta,
    Uuid,
    DateTimeOffset,
    IpAddr,
}

impl ScalarKind {
    /// Every kind, in declaration order.
    pub const ALL: [ScalarKind; 19] = [
        ScalarKind::I16,
        ScalarKind::I32,
        ScalarKind::I64,
        ScalarKind::U16,
        ScalarKind::U32,
        ScalarKind::U64,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::Bool,
        ScalarKind::String,
        ScalarKind::U8,
        ScalarKind::Char,
        ScalarKind::I8,
        ScalarKind::Decimal,
        ScalarKind::DateTime,
        ScalarKind::TimeDelta,
        ScalarKind::Uuid,
        ScalarKind::DateTimeOffset,
        ScalarKind::IpAddr,
    ];

    /// A short name for messages.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::U8 => "u8",
            ScalarKind::Char => "char",
            ScalarKind::I8 => "i8",
            ScalarKind::Decimal => "decimal",
            ScalarKind::DateTime => "date-time",
            ScalarKind::TimeDelta => "time delta",
            ScalarKind::Uuid => "uuid",
            ScalarKind::DateTimeOffset => "date-time with offset",
            ScalarKind::IpAddr => "ip address",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// -----------------------------------------------------------------------------
// ScalarInfo

/// Type info of a scalar type.
#[derive(Clone, Debug)]
pub struct ScalarInfo {
    ty: Type,
    kind: ScalarKind,
}

impl ScalarInfo {
    crate::info::impl_type_fn!(ty);

    #[inline]
    pub fn new<T: TypePath>(kind: ScalarKind) -> Self {
        Self {
            ty: Type::of::<T>(),
            kind,
        }
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }
}
