use alloc::boxed::Box;
use alloc::string::String;
use core::net::{IpAddr, Ipv4Addr};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::Reflect;
use crate::impls::impl_auto_register;
use crate::info::{NonGenericTypeInfoCell, ScalarInfo, ScalarKind, TypeInfo, TypePath, Typed};
use crate::ops::{Scalar, ScalarRef, ScalarValue};
use crate::registry::{GetTypeMeta, TypeMeta, TypeTraitDefault};

macro_rules! impl_scalar {
    (
        $ty:ty => $kind:ident,
        path: $path:expr,
        name: $name:expr,
        ident: $ident:expr,
        module: $module:expr,
        default: $default:expr,
        get: |$this:ident| $get:expr $(,)?
    ) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }

            #[inline]
            fn type_ident() -> &'static str {
                $ident
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                $module
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Scalar(ScalarInfo::new::<Self>(ScalarKind::$kind)))
            }
        }

        impl Reflect for $ty {
            crate::reflection::impl_reflect_cast_fn!(Scalar);

            #[inline]
            fn reset(&mut self) {
                *self = $default;
            }
        }

        impl Scalar for $ty {
            #[inline]
            fn kind(&self) -> ScalarKind {
                ScalarKind::$kind
            }

            #[inline]
            fn get(&self) -> ScalarRef<'_> {
                let $this = self;
                $get
            }

            fn assign(&mut self, value: ScalarValue) -> Result<(), ScalarValue> {
                match value {
                    ScalarValue::$kind(value) => {
                        *self = value;
                        Ok(())
                    }
                    other => Err(other),
                }
            }
        }

        impl GetTypeMeta for $ty {
            fn get_type_meta() -> TypeMeta {
                let mut meta = TypeMeta::of::<Self>();
                meta.insert_trait(TypeTraitDefault::new(|| -> Box<dyn Reflect> {
                    let value: $ty = $default;
                    Box::new(value)
                }));
                meta
            }
        }

        impl_auto_register!($ty);
    };
}

macro_rules! impl_primitive {
    ($($ty:ident => $kind:ident),* $(,)?) => {
        $(
            impl_scalar! {
                $ty => $kind,
                path: stringify!($ty),
                name: stringify!($ty),
                ident: stringify!($ty),
                module: None,
                default: <$ty as Default>::default(),
                get: |this| ScalarRef::$kind(*this),
            }
        )*
    };
}

impl_primitive! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    char => Char,
}

impl_scalar! {
    String => String,
    path: "alloc::string::String",
    name: "String",
    ident: "String",
    module: Some("alloc::string"),
    default: String::new(),
    get: |this| ScalarRef::String(this.as_str()),
}

impl_scalar! {
    Decimal => Decimal,
    path: "rust_decimal::Decimal",
    name: "Decimal",
    ident: "Decimal",
    module: Some("rust_decimal"),
    default: Decimal::ZERO,
    get: |this| ScalarRef::Decimal(*this),
}

impl_scalar! {
    NaiveDateTime => DateTime,
    path: "chrono::NaiveDateTime",
    name: "NaiveDateTime",
    ident: "NaiveDateTime",
    module: Some("chrono"),
    default: NaiveDateTime::default(),
    get: |this| ScalarRef::DateTime(*this),
}

impl_scalar! {
    TimeDelta => TimeDelta,
    path: "chrono::TimeDelta",
    name: "TimeDelta",
    ident: "TimeDelta",
    module: Some("chrono"),
    default: TimeDelta::zero(),
    get: |this| ScalarRef::TimeDelta(*this),
}

impl_scalar! {
    Uuid => Uuid,
    path: "uuid::Uuid",
    name: "Uuid",
    ident: "Uuid",
    module: Some("uuid"),
    default: Uuid::nil(),
    get: |this| ScalarRef::Uuid(*this),
}

impl_scalar! {
    DateTime<FixedOffset> => DateTimeOffset,
    path: "chrono::DateTime<chrono::FixedOffset>",
    name: "DateTime<FixedOffset>",
    ident: "DateTime",
    module: Some("chrono"),
    default: DateTime::<FixedOffset>::default(),
    get: |this| ScalarRef::DateTimeOffset(*this),
}

impl_scalar! {
    IpAddr => IpAddr,
    path: "core::net::IpAddr",
    name: "IpAddr",
    ident: "IpAddr",
    module: Some("core::net"),
    default: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
    get: |this| ScalarRef::IpAddr(*this),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::ReflectKind;

    #[test]
    fn scalar_paths() {
        assert_eq!(<i16 as TypePath>::type_path(), "i16");
        assert_eq!(String::crate_name(), Some("alloc"));
        assert_eq!(<DateTime<FixedOffset>>::type_ident(), "DateTime");
        assert_eq!(IpAddr::crate_name(), Some("core"));
    }

    #[test]
    fn reset_and_assign() {
        let mut addr: IpAddr = "::1".parse().unwrap();
        addr.reset();
        assert_eq!(addr, IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        let mut text = String::from("abc");
        assert_eq!(text.reflect_kind(), ReflectKind::Scalar);
        assert_eq!(Scalar::get(&text), ScalarRef::String("abc"));
        text.assign(ScalarValue::String("d".into())).unwrap();
        assert_eq!(text, "d");

        let rejected = text.assign(ScalarValue::Bool(true)).unwrap_err();
        assert_eq!(rejected, ScalarValue::Bool(true));
    }

    #[test]
    fn default_through_meta() {
        let meta = IpAddr::get_type_meta();
        let value = meta.construct().unwrap();
        assert_eq!(value.take::<IpAddr>().unwrap(), IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }
}
