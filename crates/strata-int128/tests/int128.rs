use pretty_assertions::assert_eq;
use strata_int128::{parse_decimal, Int128, ParseDecimalError, POW10};

fn i(v: i64) -> Int128 {
    Int128::from_i64(v)
}

fn u(v: u64) -> Int128 {
    Int128::from_u64(v)
}

#[test]
fn add_wraps_modulo_two_pow_128() {
    assert_eq!(Int128::MAX + i(1), Int128::MIN);
    assert_eq!(Int128::MIN + i(-1), Int128::MAX);
    assert_eq!(i(1) + i(1), i(2));
    assert_eq!(
        u(u64::MAX) + u(u64::MAX),
        Int128::from_be_bytes([
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE,
        ])
    );
    assert_eq!(i(i64::MAX) + i(1), Int128::from_words(0, 1 << 63));
    assert_eq!(u(u64::MAX) + i(1), Int128::from_words(1, 0));
}

#[test]
fn sub_wraps_modulo_two_pow_128() {
    assert_eq!(Int128::MIN - i(1), Int128::MAX);
    assert_eq!(Int128::MAX - i(-1), Int128::MIN);
    assert_eq!(i(0) - i(i64::MAX), Int128::from_words(-1, (1 << 63) | 1));
    assert_eq!(i(0) - u(u64::MAX), Int128::from_words(-1, 1));
}

#[test]
fn neg_is_twos_complement() {
    assert_eq!(-i(1), i(-1));
    assert_eq!(-i(-1), i(1));
    assert_eq!(-i(i64::MAX), i(0) - i(i64::MAX));
    assert_eq!(-Int128::MAX, Int128::MIN + i(1));
    // The most negative value has no positive counterpart; negation wraps.
    assert_eq!(-Int128::MIN, Int128::MIN);
}

#[test]
fn mul_truncates_to_low_128_bits() {
    assert_eq!(i(10) * i(10), i(100));
    assert_eq!(i(0) * Int128::MAX, Int128::ZERO);
    assert_eq!(Int128::MAX * i(-1), Int128::MIN + i(1));
    assert_eq!(Int128::MIN * i(-1), Int128::MIN);
    assert_eq!(i(-1) * i(-1), i(1));
    assert_eq!(
        u(u64::MAX) * i(2),
        Int128::from_words(1, u64::MAX - 1)
    );
}

#[test]
fn shl_shifts_across_words() {
    for n in 0..64u32 {
        assert_eq!(i(1) << n, Int128::from_words(0, 1 << n));
        assert_eq!(i(1) << (n + 64), Int128::from_words(1 << n, 0));
        assert_eq!(i(-1) << n, Int128::from_words(-1, (-1i64 << n) as u64));
        assert_eq!(i(-1) << (n + 64), Int128::from_words(-1 << n, 0));
    }
    assert_eq!(i(1) << 128, Int128::ZERO);
    assert_eq!(i(-1) << 200, Int128::ZERO);
}

#[test]
fn div_truncates_toward_zero() {
    let cases: &[(Int128, Int128, Int128)] = &[
        (i(100), i(10), i(10)),
        (i(10), i(3), i(3)),
        (i(99), i(25), i(3)),
        (i(-7), i(2), i(-3)),
        (i(7), i(-2), i(-3)),
        (i(-7), i(-2), i(3)),
        (
            Int128::from_words(0x6ada48d489007966, 0x3c9c5c98150d5d69),
            Int128::from_words(0x8bc308fb, 0x8cb9cc9a3b803344),
            i(0xc3b87e08),
        ),
        (
            Int128::from_words(0xd6946511b5b, 0x4886c5c96546bf5f),
            -Int128::from_words(0x263b, 0xfd516279efcfe2dc),
            i(-0x59cbabf0),
        ),
        (
            -Int128::from_words(0x33db734f9e8d1399, 0x8447ac92482bca4d),
            i(0x37495078240),
            -Int128::from_words(0xf01f1, 0xbc0368bf9a77eae8),
        ),
        (
            -Int128::from_words(0x13f837b409a07e7d, 0x7fc8e248a7d73560),
            i(-0x1b9f),
            Int128::from_words(0xb9157556d724, 0xb14f635714d7563e),
        ),
    ];
    for &(dividend, divisor, quotient) in cases {
        assert_eq!(dividend / divisor, quotient, "{dividend} / {divisor}");
    }
}

#[test]
fn compare_orders_high_word_signed_low_word_unsigned() {
    let ordered: &[(Int128, Int128)] = &[
        (i(0), i(1)),
        (i(-1), i(0)),
        (Int128::MIN, i(0)),
        (Int128::MIN, i(-1)),
        (Int128::MIN, i(i64::MIN)),
        (Int128::MIN, u(u64::MAX)),
        (Int128::MIN, Int128::MAX),
        (i(-1), Int128::MAX),
        (i(i64::MAX), Int128::MAX),
        (u(u64::MAX), Int128::MAX),
    ];
    for &(a, b) in ordered {
        assert!(a < b, "{a} < {b}");
        assert!(b > a, "{b} > {a}");
        assert_ne!(a, b);
    }
    assert_eq!(i(1) << 64, u(u64::MAX) + i(1));
}

#[test]
fn words_and_bytes_round_trip() {
    for v in [
        Int128::MIN,
        Int128::MAX,
        Int128::ZERO,
        i(-1),
        i(1),
        u(u64::MAX),
        Int128::from_words(0x0123_4567_89ab_cdef_u64 as i64, 0xfedc_ba98_7654_3210),
    ] {
        assert_eq!(Int128::from_be_bytes(v.to_be_bytes()), v);
        assert_eq!(Int128::from_words(v.high(), v.low()), v);
    }
    assert_eq!(i(-2).low(), u64::MAX - 1);
    assert_eq!(i(-2).high(), -1);
}

#[test]
fn decimal_string_round_trip_at_width_boundaries() {
    let boundary_values = [
        Int128::MIN,
        Int128::MAX,
        Int128::ZERO,
        i(-1),
        i(1),
        i(i8::MIN as i64),
        i(i8::MAX as i64),
        i(i16::MIN as i64),
        i(i16::MAX as i64),
        i(i32::MIN as i64),
        i(i32::MAX as i64),
        i(i64::MIN),
        i(i64::MAX),
        i(i64::MAX) + u(1),
    ];
    for v in boundary_values {
        let s = v.to_string();
        assert_eq!(s.parse::<Int128>().unwrap(), v, "{s}");
    }
}

#[test]
fn formats_extremes() {
    assert_eq!(
        Int128::MIN.to_string(),
        "-170141183460469231731687303715884105728"
    );
    assert_eq!(
        Int128::MAX.to_string(),
        "170141183460469231731687303715884105727"
    );
}

#[test]
fn parse_rejects_out_of_range_and_garbage() {
    // One below MIN and one above MAX.
    assert!("-170141183460469231731687303715884105729"
        .parse::<Int128>()
        .is_err());
    assert!("170141183460469231731687303715884105728"
        .parse::<Int128>()
        .is_err());
    assert!("".parse::<Int128>().is_err());
    assert!("12a".parse::<Int128>().is_err());
    assert!("1.5".parse::<Int128>().is_err());
    assert!("1e3".parse::<Int128>().is_err());
}

#[test]
fn byte_width_picks_smallest_fitting_width() {
    let cases: &[(i64, usize)] = &[
        (0, 1),
        (1, 1),
        (-1, 1),
        (-16, 1),
        (16, 1),
        (i8::MAX as i64, 1),
        (i8::MAX as i64 + 1, 2),
        (i8::MIN as i64, 1),
        (i8::MIN as i64 - 1, 2),
        (i16::MAX as i64, 2),
        (i16::MAX as i64 + 1, 4),
        (i16::MIN as i64, 2),
        (i16::MIN as i64 - 1, 4),
        (i32::MAX as i64, 4),
        (i32::MAX as i64 + 1, 8),
        (i32::MIN as i64, 4),
        (i32::MIN as i64 - 1, 8),
        (i64::MAX, 8),
        (i64::MIN, 8),
    ];
    for &(v, width) in cases {
        assert_eq!(i(v).byte_width(), width, "byte_width({v})");
    }
    assert_eq!((i(i64::MAX) + i(1)).byte_width(), 16);
    assert_eq!((i(i64::MIN) - i(1)).byte_width(), 16);
    assert_eq!(Int128::MIN.byte_width(), 16);
    assert_eq!(Int128::MAX.byte_width(), 16);
}

#[test]
fn pow10_table_is_consecutive_powers() {
    let mut expected = Int128::ONE;
    for v in POW10 {
        assert_eq!(v, expected);
        expected = expected * i(10);
    }
}

#[test]
fn rescale_widens_checked_and_narrows_truncating() {
    assert_eq!(i(i64::MAX).rescale(0, 1).unwrap(), i(i64::MAX) * i(10));
    assert_eq!(i(i64::MIN).rescale(0, 2).unwrap(), i(i64::MIN) * i(100));
    assert!(Int128::MAX.rescale(0, 1).is_err());
    assert!(Int128::MIN.rescale(0, 1).is_err());
    assert_eq!(Int128::MIN.rescale(0, 0).unwrap(), Int128::MIN);

    // Narrowing truncates toward zero and never fails.
    assert_eq!(i(1999).rescale(3, 0).unwrap(), i(1));
    assert_eq!(i(-1999).rescale(3, 0).unwrap(), i(-1));
    assert_eq!(Int128::MAX.rescale(38, 0).unwrap(), i(1));
    assert_eq!(i(5).rescale(40, 0).unwrap(), Int128::ZERO);
}

#[test]
fn fits_in_precision_counts_decimal_digits() {
    let max38 = "99999999999999999999999999999999999999".parse::<Int128>().unwrap();
    assert!(max38.fits_in_precision(38));
    assert!((-max38).fits_in_precision(38));
    assert!(!(max38 + i(1)).fits_in_precision(38));
    assert!(!Int128::MAX.fits_in_precision(38));
    assert!(!Int128::MIN.fits_in_precision(38));
    assert!(Int128::MIN.fits_in_precision(39));
    assert!(Int128::ZERO.fits_in_precision(0));
    assert!(!i(1).fits_in_precision(0));
    assert!(i(9).fits_in_precision(1));
    assert!(!i(10).fits_in_precision(1));
}

#[test]
fn parse_decimal_applies_scale_with_truncation() {
    assert_eq!(parse_decimal("123.4321", 4).unwrap(), i(1234321));
    assert_eq!(parse_decimal("123.4321", 2).unwrap(), i(12343));
    assert_eq!(parse_decimal("-123.4321", 2).unwrap(), i(-12343));
    assert_eq!(parse_decimal("12", 0).unwrap(), i(12));
    assert_eq!(parse_decimal("+12", 0).unwrap(), i(12));
    assert_eq!(parse_decimal("12", 3).unwrap(), i(12000));
    assert_eq!(parse_decimal("0.5", 0).unwrap(), Int128::ZERO);
    assert_eq!(parse_decimal("-0.5", 0).unwrap(), Int128::ZERO);
    assert_eq!(parse_decimal(".5", 1).unwrap(), i(5));
    assert_eq!(parse_decimal("1e5", 0).unwrap(), i(100_000));
    assert_eq!(parse_decimal("1.5E2", 0).unwrap(), i(150));
    assert_eq!(parse_decimal("1.2e-36", 37).unwrap(), i(12));
    assert_eq!(parse_decimal("1.2e-36", 0).unwrap(), Int128::ZERO);
}

#[test]
fn parse_decimal_handles_full_128_bit_range() {
    let tiny = parse_decimal("1.2e-36", 37).unwrap();
    assert!(tiny.fits_in_precision(38));

    assert_eq!(
        parse_decimal("-170141183460469231731687303715884105728", 0).unwrap(),
        Int128::MIN
    );
    assert_eq!(
        parse_decimal("170141183460469231731687303715884105727", 0).unwrap(),
        Int128::MAX
    );
    assert!(matches!(
        parse_decimal("170141183460469231731687303715884105728", 0),
        Err(ParseDecimalError::OutOfRange { .. })
    ));
    assert!(matches!(
        parse_decimal("18", 38),
        Err(ParseDecimalError::OutOfRange { .. })
    ));
}

#[test]
fn parse_decimal_rejects_malformed_tokens() {
    for bad in ["", "-", "+", ".", "1.2.3", "1e", "1e+", "12a", "a12", "1 2", " 12"] {
        assert!(
            matches!(parse_decimal(bad, 0), Err(ParseDecimalError::Malformed { .. })),
            "{bad:?}"
        );
    }
}
