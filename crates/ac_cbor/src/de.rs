use alloc::format;
use alloc::string::{String, ToString};

use ac_reflect::{AnyValue, Reflect};
use ac_reflect::info::TypeInfo;
use ac_reflect::ops::{ReflectMut, Struct};
use ac_reflect::registry::TypeRegistry;

#[cfg(feature = "debug")]
use crate::info_stack::TypeInfoStack;
use crate::tags::{REGISTRY_BOUNDARY, decode_scalar, split_type_key, type_for};
use crate::{CborReader, CborState, Error, ReadError, Result};

// -----------------------------------------------------------------------------
// Decoder

/// Reads CBOR into reflected values.
///
/// The inverse of [`Encoder`](crate::Encoder). Wrapped values are resolved
/// by their tag, or by the type key for the fallback tag, and created
/// through the [`TypeRegistry`] when they land in an
/// [`AnyValue`].
///
/// Decoding replaces the content of the target. On error the target is
/// left partially written.
///
/// # Examples
///
/// ```
/// use ac_cbor::Decoder;
/// use ac_reflect::AnyValue;
///
/// let mut value = AnyValue::default();
///
/// let mut decoder = Decoder::new(&[0xD9, 0xD9, 0xF2, 0xA1, 0x62, b'F', b'6', 0x0A]);
/// decoder.decode_into(&mut value).unwrap();
/// decoder.end().unwrap();
///
/// assert_eq!(value.downcast_ref::<i32>(), Some(&10));
/// ```
pub struct Decoder<'a> {
    reader: CborReader<'a>,
    registry: &'a TypeRegistry,
    #[cfg(feature = "debug")]
    stack: TypeInfoStack,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder resolving types through [`TypeRegistry::global`].
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_registry(input, TypeRegistry::global())
    }

    pub const fn with_registry(input: &'a [u8], registry: &'a TypeRegistry) -> Self {
        Self {
            reader: CborReader::new(input),
            registry,
            #[cfg(feature = "debug")]
            stack: TypeInfoStack::new(),
        }
    }

    /// Decodes the next data item into `target`.
    pub fn decode_into(&mut self, target: &mut dyn Reflect) -> Result<()> {
        let result = self.decode_value(target);

        #[cfg(feature = "debug")]
        let result = {
            let result = result.map_err(|error| self.stack.attach(error));
            self.stack.clear();
            result
        };

        result
    }

    /// Checks that the whole input was consumed.
    pub fn end(&self) -> Result<()> {
        Ok(self.reader.finish()?)
    }

    fn decode_value(&mut self, target: &mut dyn Reflect) -> Result<()> {
        #[cfg(feature = "debug")]
        self.stack.push(target.reflect_type_info());

        self.decode_node(target)?;

        #[cfg(feature = "debug")]
        self.stack.pop();

        Ok(())
    }

    fn decode_node(&mut self, target: &mut dyn Reflect) -> Result<()> {
        match self.reader.peek_state()? {
            CborState::Null => {
                self.reader.read_null()?;
                let info = target.reflect_type_info();
                match target.reflect_mut() {
                    ReflectMut::Nullable(nullable) => {
                        nullable.set_none();
                        Ok(())
                    }
                    ReflectMut::Any(any) => {
                        *any = AnyValue::null();
                        Ok(())
                    }
                    _ => Err(mismatch(info, "null")),
                }
            }
            CborState::Tag if self.reader.peek_tag()? >= REGISTRY_BOUNDARY => {
                self.decode_tagged(target)
            }
            CborState::Undefined => {
                self.reader.read_undefined()?;
                restore_default(target)
            }
            CborState::SimpleValue => {
                Err(Error::UnsupportedSimpleValue(self.reader.read_simple_value()?))
            }
            state => self.decode_payload(target, state),
        }
    }

    // -------------------------------------------------------------------------
    // Wrapped values

    fn decode_tagged(&mut self, target: &mut dyn Reflect) -> Result<()> {
        let tag = self.reader.read_tag()?;
        let resolved = type_for(tag);

        if self.reader.peek_state()? != CborState::StartMap {
            // A registry tag directly on its payload.
            let info = resolved.ok_or(Error::UnexpectedTag(tag))?;
            return self.decode_resolved(target, info);
        }

        let len = self.reader.read_start_map()?;
        if len != 1 {
            return Err(Error::StructuralMismatch {
                expected: "a wrapped value",
                found: format!("a map of {len} entries"),
            });
        }
        let key = self.reader.read_text()?;

        let info = match resolved {
            Some(info) => info,
            None => self.resolve_key(key)?,
        };
        log::trace!("tag {tag} with key `{key}` resolved to `{}`", info.type_path());

        self.decode_resolved(target, info)?;
        Ok(self.reader.read_end_map()?)
    }

    fn resolve_key(&self, key: &str) -> Result<&'static TypeInfo> {
        let unresolved = |reason| Error::TypeResolution {
            key: String::from(key),
            reason,
        };

        let (type_path, crate_name) =
            split_type_key(key).ok_or_else(|| unresolved("malformed type key"))?;
        if !crate_name.is_empty() && !self.registry.contains_crate(crate_name) {
            return Err(unresolved("crate not loaded"));
        }
        match self.registry.get_with_type_path(type_path) {
            Some(meta) => Ok(meta.type_info()),
            None => {
                log::warn!("crate `{crate_name}` is loaded but `{type_path}` is not registered");
                Err(unresolved("type not registered"))
            }
        }
    }

    /// Decodes a payload of type `info` into `target`.
    fn decode_resolved(&mut self, target: &mut dyn Reflect, info: &'static TypeInfo) -> Result<()> {
        let target_info = target.reflect_type_info();
        if target_info.type_id() == info.type_id() {
            return self.decode_value(target);
        }

        match target.reflect_mut() {
            ReflectMut::Any(any) => {
                let unresolved = |reason| Error::TypeResolution {
                    key: info.type_path().to_string(),
                    reason,
                };
                let meta = self
                    .registry
                    .get(info.type_id())
                    .ok_or_else(|| unresolved("type not registered"))?;
                let mut value = meta
                    .construct()
                    .ok_or_else(|| unresolved("type has no default"))?;

                self.decode_value(value.as_mut())?;
                any.set_boxed(value);
                Ok(())
            }
            ReflectMut::Nullable(nullable) => self.decode_resolved(nullable.insert_default(), info),
            _ => Err(mismatch(target_info, info.type_path())),
        }
    }

    // -------------------------------------------------------------------------
    // Payloads

    fn decode_payload(&mut self, target: &mut dyn Reflect, state: CborState) -> Result<()> {
        let info = target.reflect_type_info();

        match target.reflect_mut() {
            ReflectMut::Nullable(nullable) => self.decode_value(nullable.insert_default()),
            ReflectMut::Any(_) => Err(self.unexpected(info, state)),
            ReflectMut::Scalar(scalar) => {
                let value = match decode_scalar(&mut self.reader, scalar.kind()) {
                    Ok(value) => value,
                    Err(ReadError::UnexpectedState { found, .. }) => {
                        return Err(self.unexpected(info, found));
                    }
                    Err(error) => return Err(error.into()),
                };
                scalar
                    .assign(value)
                    .map_err(|value| mismatch(info, value.kind().name()))
            }
            ReflectMut::Array(array) => {
                self.expect(info, state, CborState::StartArray)?;
                let len = self.reader.read_start_array()?;
                array.resize_default(len);
                for index in 0..len {
                    if let Some(item) = array.get_mut(index) {
                        self.decode_value(item)?;
                    }
                }
                Ok(self.reader.read_end_array()?)
            }
            ReflectMut::List(list) => {
                self.expect(info, state, CborState::StartArray)?;
                let len = self.reader.read_start_array()?;
                list.clear();
                for _ in 0..len {
                    self.decode_value(list.push_default())?;
                }
                Ok(self.reader.read_end_array()?)
            }
            ReflectMut::Map(map) => {
                self.expect(info, state, CborState::StartMap)?;
                let len = self.reader.read_start_map()?;
                map.clear();
                for _ in 0..len {
                    let mut key = map.new_key();
                    self.decode_value(key.as_mut())?;
                    let mut value = map.new_value();
                    self.decode_value(value.as_mut())?;
                    map.insert_boxed(key, value)
                        .map_err(|value| mismatch(info, value.reflect_type_path()))?;
                }
                Ok(self.reader.read_end_map()?)
            }
            ReflectMut::Struct(value) => self.decode_struct(value, state),
            ReflectMut::Opaque(_) => Err(Error::UnsupportedType {
                type_path: info.type_path(),
            }),
        }
    }

    fn decode_struct(&mut self, target: &mut dyn Struct, state: CborState) -> Result<()> {
        let info = target.reflect_type_info();
        let Some(struct_info) = info.as_struct() else {
            return Err(Error::UnsupportedType {
                type_path: info.type_path(),
            });
        };
        if struct_info.writable_len() == 0 {
            return Err(Error::Unrestorable {
                type_name: info.type_name(),
            });
        }

        self.expect(info, state, CborState::StartMap)?;
        let len = self.reader.read_start_map()?;
        for _ in 0..len {
            let key = self.reader.read_text()?;
            let index = struct_info
                .index_of(key)
                .filter(|&index| struct_info.field_at(index).is_some_and(|field| field.is_writable()));

            let field = match index {
                Some(index) => target.field_at_mut(index),
                None => None,
            };
            match field {
                Some(field) => self.decode_value(field)?,
                None => {
                    log::debug!("skipping key `{key}` of `{}`", info.type_path());
                    self.reader.skip_value()?;
                }
            }
        }
        Ok(self.reader.read_end_map()?)
    }

    fn expect(&self, info: &'static TypeInfo, found: CborState, expected: CborState) -> Result<()> {
        if found == expected {
            Ok(())
        } else {
            Err(self.unexpected(info, found))
        }
    }

    /// The error for `found` where `info` is expected.
    fn unexpected(&self, info: &'static TypeInfo, found: CborState) -> Error {
        if found == CborState::Tag
            && let Ok(tag) = self.reader.peek_tag()
        {
            return Error::UnexpectedTag(tag);
        }
        mismatch(info, &found.to_string())
    }
}

fn mismatch(info: &'static TypeInfo, found: &str) -> Error {
    Error::StructuralMismatch {
        expected: info.type_path(),
        found: String::from(found),
    }
}

/// Restores `target` from undefined.
fn restore_default(target: &mut dyn Reflect) -> Result<()> {
    let info = target.reflect_type_info();
    if let Some(struct_info) = info.as_struct()
        && struct_info.field_len() > 0
        && struct_info.writable_len() == 0
    {
        return Err(Error::Unrestorable {
            type_name: info.type_name(),
        });
    }

    if let ReflectMut::Nullable(nullable) = target.reflect_mut() {
        return restore_default(nullable.insert_default());
    }
    target.reset();
    Ok(())
}

// -----------------------------------------------------------------------------
// Functions

/// Decodes a whole document into a new `T`, resolving types through
/// [`TypeRegistry::global`].
///
/// # Examples
///
/// ```
/// use ac_cbor::from_slice;
///
/// assert_eq!(from_slice::<i32>(&[0x0A]).unwrap(), 10);
/// assert_eq!(from_slice::<Option<u8>>(&[0xF6]).unwrap(), None);
/// assert!(from_slice::<i32>(&[0x0A, 0x0A]).is_err());
/// ```
pub fn from_slice<T: Reflect + Default>(input: &[u8]) -> Result<T> {
    from_slice_with(input, TypeRegistry::global())
}

/// Decodes a whole document into a new `T`, resolving types through `registry`.
pub fn from_slice_with<T: Reflect + Default>(input: &[u8], registry: &TypeRegistry) -> Result<T> {
    let mut value = T::default();
    let mut decoder = Decoder::with_registry(input, registry);
    decoder.decode_into(&mut value)?;
    decoder.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::collections::BTreeMap;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Pair {
        #[reflect(rename = "A")]
        a: u8,
        #[reflect(read_only)]
        hidden: u8,
        b: Option<String>,
    }

    #[test]
    fn nulls_and_undefined() {
        assert_eq!(from_slice::<Option<Vec<u8>>>(&[0xF6]).unwrap(), None);
        assert_eq!(from_slice::<i32>(&[0xF7]).unwrap(), 0);
        assert_eq!(from_slice::<Option<i32>>(&[0xF7]).unwrap(), Some(0));
        assert!(from_slice::<AnyValue>(&[0xF7]).unwrap().is_object());
        assert!(from_slice::<AnyValue>(&[0xF6]).unwrap().is_null());

        assert!(matches!(
            from_slice::<i32>(&[0xF6]).unwrap_err().innermost(),
            Error::StructuralMismatch { expected: "i32", found } if found == "null"
        ));
        assert!(matches!(
            from_slice::<bool>(&[0xF0]).unwrap_err().innermost(),
            Error::UnsupportedSimpleValue(16)
        ));
    }

    #[test]
    fn containers() {
        let map: BTreeMap<u8, bool> = from_slice(&[0xA2, 0x01, 0xF5, 0x02, 0xF4]).unwrap();
        assert_eq!(map, BTreeMap::from([(1, true), (2, false)]));

        let items: Box<[i16]> = from_slice(&[0x83, 0x01, 0x20, 0x19, 0x01, 0x00]).unwrap();
        assert_eq!(&*items, [1, -1, 256]);

        let list: Vec<Option<u8>> = from_slice(&[0x82, 0xF6, 0x07]).unwrap();
        assert_eq!(list, [None, Some(7)]);

        assert!(matches!(
            from_slice::<Vec<u8>>(&[0xA0]).unwrap_err().innermost(),
            Error::StructuralMismatch { found, .. } if found == "map"
        ));
    }

    #[test]
    fn struct_keys() {
        // { "b": "x", "hidden": 5, "zzz": [1], "A": 3 }
        let bytes = [
            0xA4, 0x61, b'b', 0x61, b'x', 0x66, b'h', b'i', b'd', b'd', b'e', b'n', 0x05, 0x63,
            b'z', b'z', b'z', 0x81, 0x01, 0x61, b'A', 0x03,
        ];
        let pair: Pair = from_slice(&bytes).unwrap();
        assert_eq!(pair, Pair { a: 3, hidden: 0, b: Some("x".into()) });
    }

    #[test]
    fn tags_outside_registry() {
        assert!(matches!(
            from_slice::<Vec<i32>>(&[0xC1, 0x80]).unwrap_err().innermost(),
            Error::UnexpectedTag(1)
        ));

        // A bare registry tag on its payload.
        let value: AnyValue = from_slice(&[0xD9, 0xD9, 0xF2, 0x0A]).unwrap();
        assert_eq!(value.downcast_ref::<i32>(), Some(&10));
    }

    #[test]
    fn wrapped_into_typed_slots() {
        let bytes = [0xD9, 0xD9, 0xF2, 0xA1, 0x62, b'F', b'6', 0x0A];
        assert_eq!(from_slice::<i32>(&bytes).unwrap(), 10);
        assert_eq!(from_slice::<Option<i32>>(&bytes).unwrap(), Some(10));

        let any: Option<AnyValue> = from_slice(&bytes).unwrap();
        assert!(any.unwrap().is::<i32>());

        assert!(matches!(
            from_slice::<u64>(&bytes).unwrap_err().innermost(),
            Error::StructuralMismatch { expected: "u64", found } if found == "i32"
        ));
    }

    #[test]
    fn type_keys() {
        let registry = TypeRegistry::new();
        let mut bytes = vec![0xD9, 0xD9, 0xF7, 0xA1];
        let key = "alloc::vec::Vec<i32>|alloc";
        bytes.extend_from_slice(&[0x78, key.len() as u8]);
        bytes.extend_from_slice(key.as_bytes());
        bytes.extend_from_slice(&[0x82, 0x01, 0x02]);

        let value: AnyValue = from_slice_with(&bytes, &registry).unwrap();
        assert_eq!(value.downcast_ref::<Vec<i32>>(), Some(&vec![1, 2]));

        let error = from_slice_with::<AnyValue>(&bytes, &TypeRegistry::empty()).unwrap_err();
        assert!(matches!(
            error.innermost(),
            Error::TypeResolution { reason: "crate not loaded", .. }
        ));
    }
}
