use ac_reflect::Reflect;
use ac_reflect::ops::{ReflectRef, Struct};

#[cfg(feature = "debug")]
use crate::info_stack::TypeInfoStack;
use crate::tags::{tag_for, write_scalar};
use crate::{CborBytes, CborWriter, Error, Result};

// -----------------------------------------------------------------------------
// Encoder

/// Writes reflected values as CBOR.
///
/// # Encoding Rules
///
/// | value | CBOR |
/// |---|---|
/// | `None` | null |
/// | `Some(v)` | `v` |
/// | scalar | see [`write_scalar`] |
/// | `Box<[T]>`, `Vec<T>` | array of the items |
/// | maps | map of the entries |
/// | struct | map of the writable fields in declaration order, or undefined if there are none |
/// | [`AnyValue`] holding `v` | `tag(map(1) { key: v })`, see [`tag_for`] |
/// | bare [`AnyValue`] | undefined |
///
/// A `None` held by an [`AnyValue`] is null, it is never wrapped.
///
/// # Examples
///
/// ```
/// use ac_cbor::Encoder;
/// use ac_reflect::AnyValue;
///
/// let mut encoder = Encoder::new();
/// encoder.encode(&AnyValue::new(10_i32)).unwrap();
///
/// let bytes = encoder.finish().unwrap();
/// assert_eq!(bytes, [0xD9, 0xD9, 0xF2, 0xA1, 0x62, b'F', b'6', 0x0A]);
/// ```
///
/// [`AnyValue`]: ac_reflect::AnyValue
/// [`write_scalar`]: crate::tags::write_scalar
/// [`tag_for`]: crate::tags::tag_for
#[derive(Default)]
pub struct Encoder {
    writer: CborWriter,
    #[cfg(feature = "debug")]
    stack: TypeInfoStack,
}

impl Encoder {
    #[inline]
    pub const fn new() -> Self {
        Self {
            writer: CborWriter::new(),
            #[cfg(feature = "debug")]
            stack: TypeInfoStack::new(),
        }
    }

    /// Encodes the root value of the document.
    ///
    /// A document has exactly one root, a second call fails with
    /// [`WriteError::MultipleRoots`](crate::WriteError::MultipleRoots).
    pub fn encode(&mut self, value: &dyn Reflect) -> Result<()> {
        let result = self.encode_value(value);

        #[cfg(feature = "debug")]
        let result = {
            let result = result.map_err(|error| self.stack.attach(error));
            self.stack.clear();
            result
        };

        result
    }

    /// Returns the encoded document.
    pub fn finish(self) -> Result<CborBytes> {
        Ok(self.writer.finish()?)
    }

    fn encode_value(&mut self, value: &dyn Reflect) -> Result<()> {
        #[cfg(feature = "debug")]
        self.stack.push(value.reflect_type_info());

        // On error the stack is left as is for the context.
        self.encode_shape(value)?;

        #[cfg(feature = "debug")]
        self.stack.pop();

        Ok(())
    }

    fn encode_shape(&mut self, value: &dyn Reflect) -> Result<()> {
        match value.reflect_ref() {
            ReflectRef::Nullable(nullable) => match nullable.get() {
                Some(inner) => self.encode_value(inner)?,
                None => self.writer.write_null()?,
            },
            ReflectRef::Any(any) => match any.get() {
                Some(inner) => self.encode_wrapped(inner)?,
                None => self.writer.write_undefined()?,
            },
            ReflectRef::Scalar(scalar) => write_scalar(&mut self.writer, scalar.get())?,
            ReflectRef::Array(array) => {
                self.writer.start_array(array.len())?;
                for item in (0..array.len()).filter_map(|index| array.get(index)) {
                    self.encode_value(item)?;
                }
                self.writer.end_array()?;
            }
            ReflectRef::List(list) => {
                self.writer.start_array(list.len())?;
                for item in (0..list.len()).filter_map(|index| list.get(index)) {
                    self.encode_value(item)?;
                }
                self.writer.end_array()?;
            }
            ReflectRef::Map(map) => {
                self.writer.start_map(map.len())?;
                for (key, value) in map.iter() {
                    self.encode_value(key)?;
                    self.encode_value(value)?;
                }
                self.writer.end_map()?;
            }
            ReflectRef::Struct(value) => self.encode_struct(value)?,
            ReflectRef::Opaque(value) => {
                return Err(Error::UnsupportedType {
                    type_path: value.reflect_type_path(),
                });
            }
        }
        Ok(())
    }

    fn encode_wrapped(&mut self, value: &dyn Reflect) -> Result<()> {
        if let ReflectRef::Nullable(nullable) = value.reflect_ref()
            && nullable.is_none()
        {
            return Ok(self.writer.write_null()?);
        }

        let info = value.reflect_type_info();
        let (tag, key) = tag_for(info);
        log::trace!("wrapping `{}` with tag {tag}", info.type_path());

        self.writer.write_tag(tag)?;
        self.writer.start_map(1)?;
        self.writer.write_text(key.as_str())?;
        self.encode_value(value)?;
        Ok(self.writer.end_map()?)
    }

    fn encode_struct(&mut self, value: &dyn Struct) -> Result<()> {
        let Some(info) = value.struct_info() else {
            return Err(Error::UnsupportedType {
                type_path: value.reflect_type_path(),
            });
        };

        if info.writable_len() == 0 {
            log::trace!("`{}` has no writable fields", info.type_path());
            return Ok(self.writer.write_undefined()?);
        }

        self.writer.start_map(info.writable_len())?;
        for (index, field) in info.iter().enumerate() {
            if !field.is_writable() {
                continue;
            }
            if let Some(field_value) = value.field_at(index) {
                self.writer.write_text(field.name())?;
                self.encode_value(field_value)?;
            }
        }
        Ok(self.writer.end_map()?)
    }
}

/// Encodes `value` into a new document.
///
/// # Examples
///
/// ```
/// use ac_cbor::to_vec;
///
/// assert_eq!(to_vec(&10_i32).unwrap(), [0x0A]);
/// assert_eq!(to_vec(&None::<u8>).unwrap(), [0xF6]);
/// assert_eq!(to_vec(&Box::<[i32]>::default()).unwrap(), [0x80]);
/// ```
pub fn to_vec<T: Reflect>(value: &T) -> Result<CborBytes> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WriteError;
    use ac_reflect::AnyValue;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Reflect, Default)]
    struct Pair {
        #[reflect(rename = "A")]
        a: u8,
        #[reflect(read_only)]
        hidden: u8,
        b: Option<String>,
    }

    #[derive(Reflect, Default)]
    #[reflect(opaque)]
    struct Handle;

    #[test]
    fn containers() {
        let map = BTreeMap::from([(1_u8, true), (2, false)]);
        assert_eq!(to_vec(&map).unwrap(), [0xA2, 0x01, 0xF5, 0x02, 0xF4]);

        let list = vec![Some(1_i64), None];
        assert_eq!(to_vec(&list).unwrap(), [0x82, 0x01, 0xF6]);
    }

    #[test]
    fn struct_fields() {
        let pair = Pair { a: 1, hidden: 2, b: Some("x".into()) };
        assert_eq!(
            to_vec(&pair).unwrap(),
            [0xA2, 0x61, b'A', 0x01, 0x61, b'b', 0x61, b'x']
        );
    }

    #[test]
    fn wrapped_values() {
        let none = AnyValue::new(None::<u32>);
        assert_eq!(to_vec(&none).unwrap(), [0xF6]);

        let some = AnyValue::new(Some(1_u32));
        // 55784: Option<u32>
        assert_eq!(
            to_vec(&some).unwrap(),
            [0xD9, 0xD9, 0xE8, 0xA1, 0x62, b'F', b'6', 0x01]
        );

        let items: Vec<AnyValue> = vec![AnyValue::object(), AnyValue::new(true)];
        let bytes = to_vec(&items).unwrap();
        assert_eq!(&bytes[..2], [0x82, 0xF7]);
        assert_eq!(&bytes[2..], [0xD9, 0xD9, 0xDD, 0xA1, 0x62, b'F', b'6', 0xF5]);
    }

    #[test]
    fn unsupported_and_misuse() {
        let error = to_vec(&Some(Handle)).unwrap_err();
        assert!(matches!(
            error.innermost(),
            Error::UnsupportedType { type_path } if type_path.ends_with("::Handle")
        ));

        let mut encoder = Encoder::new();
        encoder.encode(&1_u8).unwrap();
        let error = encoder.encode(&2_u8).unwrap_err();
        assert!(matches!(error.innermost(), Error::Write(WriteError::MultipleRoots)));

        assert!(matches!(
            Encoder::new().finish(),
            Err(Error::Write(WriteError::Incomplete))
        ));
    }

    #[cfg(feature = "debug")]
    #[test]
    fn error_stack() {
        let error = to_vec(&vec![Some(Handle)]).unwrap_err();
        let Error::Context { stack, .. } = &error else {
            panic!("expected a context, got {error:?}");
        };
        assert!(stack.starts_with("`alloc::vec::Vec<core::option::Option<"));
        assert!(stack.ends_with("::Handle`"));
        assert_eq!(stack.matches(" -> ").count(), 2);
    }
}
