use bion::{vecmap::VecMap, Bion};
use bytes::Bytes;
use proptest::prelude::*;

/// arbitrary bytestrings, not necessarily UTF-8, for use with proptest
pub fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..300).prop_map(Bytes::from)
}

/// arbitrary numbers, excluding NaN, for use with proptest
pub fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        // every integer width
        any::<i8>().prop_map(f64::from),
        any::<u8>().prop_map(f64::from),
        any::<i16>().prop_map(f64::from),
        any::<u16>().prop_map(f64::from),
        any::<i32>().prop_map(f64::from),
        any::<u32>().prop_map(f64::from),
        any::<i64>().prop_map(|i| i as f64),
        any::<u64>().prop_map(|u| u as f64),
        // around the 2^24 boundary
        (16_777_200i64..16_777_300).prop_map(|i| i as f64),
        // floats
        prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::SUBNORMAL
            | prop::num::f64::INFINITE
            | prop::num::f64::ZERO,
    ]
}

/// arbitrary BION for use with proptest
pub fn arb_bion() -> impl Strategy<Value = Bion> {
    let leaf = prop_oneof![
        Just(Bion::Undefined),
        Just(Bion::Null),
        any::<bool>().prop_map(Bion::Bool),
        arb_number().prop_map(Bion::Number),
        any::<String>().prop_map(Bion::from),
        arb_bytes().prop_map(Bion::Str),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        20, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..20).prop_map(Bion::Array),
                prop::collection::btree_map(arb_bytes(), inner, 0..20)
                    .prop_map(|m| Bion::Object(VecMap::from(m)))
            ]
        },
    )
}
