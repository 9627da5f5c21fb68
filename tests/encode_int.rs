use bion::prelude::*;
use proptest::prelude::*;

const MAX_EXACT: i64 = 1 << 53;

fn tag_for(i: i64) -> u8 {
    match i {
        -128..=-1 => 0x30,
        -32_768..=-129 => 0x31,
        -2_147_483_648..=-32_769 => 0x32,
        i if i < 0 => 0x33,
        0..=255 => 0x34,
        256..=65_535 => 0x35,
        65_536..=16_777_215 => 0x36,
        _ => 0x37,
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn exact_below_2_53(i in -MAX_EXACT..=MAX_EXACT) {
        let enc = encode_full(&i).unwrap();

        let dec = decode_full(&enc).unwrap().to_number().unwrap();

        prop_assert_eq!(dec as i64, i);
        prop_assert_eq!(dec, i as f64);
    }

    #[test]
    fn narrowest_width(i in proptest::num::i64::ANY) {
        let enc = encode_full(&i).unwrap();

        prop_assert_eq!(enc[0], tag_for(i));
        let width = match enc[0] & 0x03 {
            0 => 1,
            1 => 2,
            2 => 4,
            _ => 8,
        };
        prop_assert_eq!(enc.len(), 1 + width);
    }

    #[test]
    fn integral_numbers_match_ints(i in -MAX_EXACT..=MAX_EXACT) {
        prop_assert_eq!(
            encode_full(&Bion::from(i as f64)).unwrap(),
            encode_full(&i).unwrap()
        );
    }

    #[test]
    fn fractions_are_doubles(i in -(1i64 << 52)..(1i64 << 52)) {
        let f = i as f64 + 0.5;
        let enc = encode_full(&Bion::from(f)).unwrap();

        prop_assert_eq!(enc[0], 0x38);
        prop_assert_eq!(decode_full(&enc), Ok(Bion::from(f)));
    }
}

#[test]
fn boundaries() {
    for (i, tag) in &[
        (0i64, 0x34u8),
        (255, 0x34),
        (256, 0x35),
        (65_535, 0x35),
        (65_536, 0x36),
        (16_777_215, 0x36),
        (16_777_216, 0x37),
        (4_294_967_296, 0x37),
        (-1, 0x30),
        (-128, 0x30),
        (-129, 0x31),
        (-32_768, 0x31),
        (-32_769, 0x32),
        (-2_147_483_648, 0x32),
        (-2_147_483_649, 0x33),
        (i64::MIN, 0x33),
    ] {
        assert_eq!(encode_full(i).unwrap()[0], *tag, "encoding {}", i);
        assert_eq!(decode_full(&encode_full(i).unwrap()), Ok(Bion::from(*i)));
    }
}
