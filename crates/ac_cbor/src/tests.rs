use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::net::{IpAddr, Ipv4Addr};
use std::collections::HashMap;

use ac_reflect::registry::TypeRegistry;
use ac_reflect::scalar_types::{DateTime, Decimal, NaiveDateTime, TimeDelta, Uuid};
use ac_reflect::{AnyValue, Reflect};

use super::*;

// -----------------------------------------------------------------------------
// Types

#[derive(Reflect, Default, Debug, PartialEq)]
struct ClassWithArray {
    #[reflect(rename = "Tags")]
    tags: Box<[i32]>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "fixture::Locked")]
struct Locked {
    #[reflect(read_only)]
    id: u32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "fixture::Empty")]
struct Empty;

#[derive(Reflect, Default, Debug)]
#[reflect(type_path = "fixture::Node")]
struct Node {
    #[reflect(rename = "Name")]
    name: String,
    value: AnyValue,
    children: Vec<Node>,
}

#[derive(Reflect, Default, Debug, PartialEq)]
#[reflect(type_path = "fixture::Item")]
struct Item {
    n: i32,
}

#[derive(Reflect, Default, Debug, PartialEq)]
struct Extremes {
    float: f32,
    double: f64,
    int: i32,
    long: u64,
    small: i8,
    price: Decimal,
    at: NaiveDateTime,
    after: TimeDelta,
    id: Uuid,
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register::<Locked>();
    registry.register::<Empty>();
    registry.register::<Node>();
    registry.register::<Item>();
    registry
}

fn round_trip<T: Reflect + Default>(value: &T) -> T {
    let bytes = to_vec(value).unwrap();
    from_slice_with(&bytes, &registry()).unwrap()
}

// -----------------------------------------------------------------------------
// Scenarios

#[test]
fn concrete_scenarios() {
    assert_eq!(to_vec(&10_i32).unwrap(), [0x0A]);
    assert_eq!(from_slice::<i32>(&[0x0A]).unwrap(), 10);

    assert_eq!(to_vec(&None::<AnyValue>).unwrap(), [0xF6]);
    assert!(from_slice::<Option<AnyValue>>(&[0xF6]).unwrap().is_none());

    let empty: Box<[i32]> = Box::default();
    assert_eq!(to_vec(&empty).unwrap(), [0x80]);
    assert!(from_slice::<Box<[i32]>>(&[0x80]).unwrap().is_empty());

    let boxed = AnyValue::new(10_i32);
    let bytes = to_vec(&boxed).unwrap();
    assert_eq!(bytes, [0xD9, 0xD9, 0xF2, 0xA1, 0x62, b'F', b'6', 0x0A]);
    let decoded: AnyValue = from_slice(&bytes).unwrap();
    assert_eq!(decoded.downcast_ref::<i32>(), Some(&10));
}

#[test]
fn class_with_array() {
    let value = ClassWithArray { tags: Box::new([1, 2, 3, 4, 5, 6, 7]) };
    let bytes = to_vec(&value).unwrap();
    assert_eq!(
        bytes,
        [0xA1, 0x64, b'T', b'a', b'g', b's', 0x87, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07]
    );
    assert_eq!(from_slice::<ClassWithArray>(&bytes).unwrap(), value);
}

#[test]
fn wrapping_only_behind_any() {
    let items: Box<[i32]> = Box::new([1, 2]);
    assert_eq!(to_vec(&items).unwrap(), [0x82, 0x01, 0x02]);

    let bytes = to_vec(&AnyValue::new(items)).unwrap();
    // 55792: Box<[i32]>
    assert_eq!(bytes, [0xD9, 0xD9, 0xF0, 0xA1, 0x62, b'F', b'6', 0x82, 0x01, 0x02]);

    let decoded: AnyValue = from_slice(&bytes).unwrap();
    assert_eq!(decoded.downcast_ref::<Box<[i32]>>().map(|items| &**items), Some(&[1, 2][..]));
}

#[test]
fn object_array() {
    let values: Vec<Option<AnyValue>> = vec![
        Some(AnyValue::new(1_i32)),
        Some(AnyValue::new("2".to_string())),
        None,
        Some(AnyValue::new(4_i64)),
    ];
    let bytes = to_vec(&values).unwrap();
    assert_eq!(bytes[0], 0x84);

    let decoded = round_trip(&values);
    assert_eq!(decoded.len(), 4);
    assert_eq!(decoded[0].as_ref().unwrap().downcast_ref::<i32>(), Some(&1));
    assert_eq!(decoded[1].as_ref().unwrap().downcast_ref::<String>().map(String::as_str), Some("2"));
    assert!(decoded[2].is_none());
    assert_eq!(decoded[3].as_ref().unwrap().downcast_ref::<i64>(), Some(&4));
}

#[test]
fn wrapped_nulls() {
    let values = vec![AnyValue::new(1_i32), AnyValue::new(None::<i32>)];
    let bytes = to_vec(&values).unwrap();
    assert_eq!(bytes, [0x82, 0xD9, 0xD9, 0xF2, 0xA1, 0x62, b'F', b'6', 0x01, 0xF6]);

    let decoded: Vec<AnyValue> = from_slice_with(&bytes, &registry()).unwrap();
    assert_eq!(decoded[0].downcast_ref::<i32>(), Some(&1));
    assert!(decoded[1].is_null());

    let node = Node { name: "n".into(), value: AnyValue::null(), children: Vec::new() };
    assert!(round_trip(&node).value.is_null());
    assert!(round_trip(&AnyValue::new(None::<String>)).is_null());

    // The nullable slot itself takes the null.
    let held: Option<AnyValue> = Some(AnyValue::null());
    assert_eq!(to_vec(&held).unwrap(), [0xF6]);
    assert!(round_trip(&held).is_none());
}

#[test]
fn maps_of_any() {
    let map = BTreeMap::from([
        (1_i32, Some(AnyValue::new(1_i32))),
        (2, Some(AnyValue::new("2".to_string()))),
        (3, None),
    ]);
    let bytes = to_vec(&map).unwrap();
    // Typed keys stay bare, values are wrapped one by one.
    assert_eq!(&bytes[..6], [0xA3, 0x01, 0xD9, 0xD9, 0xF2, 0xA1]);
    assert_eq!(bytes.last(), Some(&0xF6));

    let decoded = round_trip(&map);
    assert_eq!(decoded[&1].as_ref().unwrap().downcast_ref::<i32>(), Some(&1));
    assert_eq!(
        decoded[&2].as_ref().unwrap().downcast_ref::<String>().map(String::as_str),
        Some("2")
    );
    assert!(decoded[&3].is_none());

    let map = HashMap::from([(7_u8, AnyValue::new(true)), (8, AnyValue::null())]);
    let decoded = round_trip(&map);
    assert_eq!(decoded[&7].downcast_ref::<bool>(), Some(&true));
    assert!(decoded[&8].is_null());
}

#[test]
fn any_keys() {
    let map: HashMap<AnyValue, Option<AnyValue>> = HashMap::from([
        (AnyValue::new(1_i32), Some(AnyValue::new(1_i32))),
        (AnyValue::new("2".to_string()), Some(AnyValue::new(2_i32))),
        (AnyValue::new(3_i32), None),
    ]);
    let bytes = to_vec(&map).unwrap();
    assert_eq!(bytes[0], 0xA3);

    // Every key and value is wrapped on its own.
    let i32_tags = bytes.windows(3).filter(|w| *w == [0xD9_u8, 0xD9, 0xF2]).count();
    let string_tags = bytes.windows(3).filter(|w| *w == [0xD9_u8, 0xD9, 0xDA]).count();
    assert_eq!((i32_tags, string_tags), (4, 1));

    let decoded = round_trip(&map);
    assert_eq!(decoded.len(), 3);
    let value = |key: AnyValue| decoded[&key].as_ref().and_then(|v| v.downcast_ref::<i32>()).copied();
    assert_eq!(value(AnyValue::new(1_i32)), Some(1));
    assert_eq!(value(AnyValue::new("2".to_string())), Some(2));
    assert!(decoded[&AnyValue::new(3_i32)].is_none());
}

#[test]
fn shapes_of_registered_types() {
    let decoded = round_trip(&AnyValue::new(Some(Item { n: 3 })));
    assert_eq!(decoded.downcast_ref::<Option<Item>>(), Some(&Some(Item { n: 3 })));

    let decoded = round_trip(&AnyValue::new(vec![Item { n: 1 }, Item { n: 2 }]));
    assert_eq!(decoded.downcast_ref::<Vec<Item>>().map(Vec::len), Some(2));

    let items: Box<[Item]> = Box::new([Item { n: 4 }]);
    let decoded = round_trip(&AnyValue::new(items));
    assert_eq!(decoded.downcast_ref::<Box<[Item]>>().map(|items| items[0].n), Some(4));
}

#[test]
fn builtin_maps_behind_any() {
    let decoded = round_trip(&AnyValue::new(HashMap::from([(1_i32, AnyValue::new(2_i32))])));
    let map = decoded.downcast_ref::<HashMap<i32, AnyValue>>().unwrap();
    assert_eq!(map[&1].downcast_ref::<i32>(), Some(&2));

    let prices = BTreeMap::from([("a".to_string(), 1.5_f64)]);
    let decoded = round_trip(&AnyValue::new(prices.clone()));
    assert_eq!(decoded.downcast_ref::<BTreeMap<String, f64>>(), Some(&prices));

    let keyed = HashMap::from([(AnyValue::new('k'), AnyValue::new(0_u8))]);
    let decoded = round_trip(&AnyValue::new(keyed));
    let map = decoded.downcast_ref::<HashMap<AnyValue, AnyValue>>().unwrap();
    assert_eq!(map[&AnyValue::new('k')].downcast_ref::<u8>(), Some(&0));
}

#[test]
fn empty_collections_and_null() {
    assert_eq!(to_vec(&Vec::<u8>::new()).unwrap(), [0x80]);
    assert_eq!(to_vec(&None::<Vec<u8>>).unwrap(), [0xF6]);
    assert_eq!(to_vec(&Some(Vec::<u8>::new())).unwrap(), [0x80]);

    let map = HashMap::<String, i32>::new();
    assert_eq!(to_vec(&map).unwrap(), [0xA0]);
}

#[test]
fn sixty_items() {
    let items: Vec<u8> = (0..60).collect();
    let bytes = to_vec(&items).unwrap();
    assert_eq!(&bytes[..2], [0x98, 0x3C]);
    assert_eq!(round_trip(&items), items);
}

// -----------------------------------------------------------------------------
// Undefined and unrestorable

#[test]
fn read_only_struct() {
    let bytes = to_vec(&Locked { id: 3 }).unwrap();
    assert_eq!(bytes, [0xF7]);

    let error = from_slice::<Locked>(&bytes).unwrap_err();
    assert_eq!(
        error.innermost().to_string(),
        "The object of \"Locked\" cannot be restored because there are no writable fields."
    );

    // Same outcome when wrapped.
    let bytes = to_vec(&AnyValue::new(Locked { id: 3 })).unwrap();
    let error = from_slice_with::<AnyValue>(&bytes, &registry()).unwrap_err();
    assert!(matches!(error.innermost(), Error::Unrestorable { type_name: "Locked" }));
}

#[test]
fn empty_struct() {
    assert_eq!(to_vec(&Empty).unwrap(), [0xF7]);
    assert_eq!(from_slice::<Empty>(&[0xF7]).unwrap(), Empty);

    let bytes = to_vec(&AnyValue::new(Empty)).unwrap();
    let key = b"fixture::Empty|fixture";
    let mut expected = vec![0xD9, 0xD9, 0xF7, 0xA1, 0x76];
    expected.extend_from_slice(key);
    expected.push(0xF7);
    assert_eq!(bytes.as_slice(), expected);

    let decoded = from_slice_with::<AnyValue>(&bytes, &registry()).unwrap();
    assert!(decoded.is::<Empty>());

    // A map payload cannot be restored.
    assert!(matches!(
        from_slice::<Empty>(&[0xA0]).unwrap_err().innermost(),
        Error::Unrestorable { type_name: "Empty" }
    ));
}

// -----------------------------------------------------------------------------
// Objects

#[test]
fn nested_objects() {
    let tree = Node {
        name: "root".into(),
        value: AnyValue::new(Some(2.5_f32)),
        children: vec![
            Node {
                name: "leaf".into(),
                value: AnyValue::new(vec![AnyValue::new(true), AnyValue::object()]),
                children: Vec::new(),
            },
            Node {
                name: "empty".into(),
                value: AnyValue::new(Empty),
                children: Vec::new(),
            },
        ],
    };

    let decoded = round_trip(&tree);
    assert_eq!(decoded.name, "root");
    assert_eq!(decoded.value.downcast_ref::<Option<f32>>(), Some(&Some(2.5)));
    assert_eq!(decoded.children.len(), 2);

    let leaf = decoded.children[0].value.downcast_ref::<Vec<AnyValue>>().unwrap();
    assert_eq!(leaf[0].downcast_ref::<bool>(), Some(&true));
    assert!(leaf[1].is_object());
    assert!(decoded.children[1].value.is::<Empty>());

    // A node held by `AnyValue` goes through the fallback tag.
    let any = AnyValue::new(Node { name: "x".into(), ..Default::default() });
    let decoded = round_trip(&any);
    assert_eq!(decoded.downcast_ref::<Node>().map(|node| node.name.as_str()), Some("x"));
}

#[test]
fn unknown_keys_are_skipped() {
    // { "Extra": { "a": [1, 2] }, "Tags": [9] }
    let bytes = [
        0xA2, 0x65, b'E', b'x', b't', b'r', b'a', 0xA1, 0x61, b'a', 0x82, 0x01, 0x02, 0x64, b'T',
        b'a', b'g', b's', 0x81, 0x09,
    ];
    let value: ClassWithArray = from_slice(&bytes).unwrap();
    assert_eq!(&*value.tags, [9]);
}

#[test]
fn unresolved_types() {
    let wrapped = |key: &str| {
        let mut bytes = vec![0xD9, 0xD9, 0xF7, 0xA1, 0x78, key.len() as u8];
        bytes.extend_from_slice(key.as_bytes());
        bytes.push(0xF7);
        bytes
    };

    let error = from_slice_with::<AnyValue>(&wrapped("fixture::Missing|fixture"), &registry())
        .unwrap_err();
    assert!(matches!(
        error.innermost(),
        Error::TypeResolution { key, reason: "type not registered" } if key == "fixture::Missing|fixture"
    ));

    let error = from_slice_with::<AnyValue>(&wrapped("elsewhere::Missing|elsewhere"), &registry())
        .unwrap_err();
    assert!(matches!(
        error.innermost(),
        Error::TypeResolution { reason: "crate not loaded", .. }
    ));
}

#[test]
fn mismatched_shapes() {
    let error = from_slice::<ClassWithArray>(&[0x80]).unwrap_err();
    assert!(matches!(error.innermost(), Error::StructuralMismatch { .. }));

    // Wrapped bool into an i32 slot.
    let bytes = to_vec(&AnyValue::new(true)).unwrap();
    assert!(matches!(
        from_slice::<i32>(&bytes).unwrap_err().innermost(),
        Error::StructuralMismatch { expected: "i32", .. }
    ));

    assert!(matches!(
        from_slice::<i32>(&[0x0A, 0x0B]).unwrap_err(),
        Error::Read(ReadError::TrailingBytes { count: 1 })
    ));
    assert!(matches!(
        from_slice::<Vec<i32>>(&[0x82, 0x01]).unwrap_err().innermost(),
        Error::Read(ReadError::UnexpectedEof)
    ));
}

// -----------------------------------------------------------------------------
// Scalars

#[test]
fn extreme_values() {
    let value = Extremes {
        float: f32::MAX,
        double: f64::MAX,
        int: i32::MAX,
        long: u64::MAX,
        small: i8::MIN,
        price: Decimal::MAX,
        at: DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc(),
        after: TimeDelta::days(400) + TimeDelta::microseconds(7),
        id: Uuid::from_u128(u128::MAX),
    };
    assert_eq!(round_trip(&value), value);

    // No default, decoded in place.
    let host = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
    let bytes = to_vec(&host).unwrap();
    let mut decoded = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
    let mut decoder = Decoder::new(&bytes);
    decoder.decode_into(&mut decoded).unwrap();
    decoder.end().unwrap();
    assert_eq!(decoded, host);

    let offset = DateTime::parse_from_rfc3339("1999-12-31T23:59:59-05:00").unwrap();
    assert_eq!(round_trip(&offset), offset);
    assert_eq!(round_trip(&AnyValue::new(offset)).downcast_ref(), Some(&offset));
}

#[test]
fn date_time_drops_sub_seconds() {
    let at = DateTime::from_timestamp(100, 999_000_000).unwrap().naive_utc();
    let decoded = round_trip(&at);
    assert_eq!(decoded.and_utc().timestamp(), 100);
    assert_eq!(decoded.and_utc().timestamp_subsec_nanos(), 0);
}

#[test]
fn wrapped_scalars() {
    let values: Vec<AnyValue> = vec![
        AnyValue::new(-3_i16),
        AnyValue::new(200_u8),
        AnyValue::new('z'),
        AnyValue::new(Some(Decimal::new(15, 1))),
        AnyValue::new(vec!["a".to_string()].into_boxed_slice()),
        AnyValue::new(Some("text".to_string())),
    ];

    let decoded = round_trip(&values);
    assert_eq!(decoded[0].downcast_ref::<i16>(), Some(&-3));
    assert_eq!(decoded[1].downcast_ref::<u8>(), Some(&200));
    assert_eq!(decoded[2].downcast_ref::<char>(), Some(&'z'));
    assert_eq!(decoded[3].downcast_ref::<Option<Decimal>>(), Some(&Some(Decimal::new(15, 1))));
    assert!(decoded[4].is::<Box<[String]>>());
    // No registry tag for a nullable string, it uses its type key.
    assert_eq!(
        decoded[5].downcast_ref::<Option<String>>(),
        Some(&Some("text".to_string()))
    );
}
