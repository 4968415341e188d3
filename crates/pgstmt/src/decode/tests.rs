use super::*;

fn numeric(weight: i16, sign: u16, dscale: u16, digits: &[i16]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&(digits.len() as i16).to_be_bytes());
    buf.extend_from_slice(&weight.to_be_bytes());
    buf.extend_from_slice(&sign.to_be_bytes());
    buf.extend_from_slice(&dscale.to_be_bytes());
    for d in digits {
        buf.extend_from_slice(&d.to_be_bytes());
    }
    buf
}

fn interval(micros: i64, days: i32, months: i32) -> Vec<u8> {
    let mut buf = micros.to_be_bytes().to_vec();
    buf.extend_from_slice(&days.to_be_bytes());
    buf.extend_from_slice(&months.to_be_bytes());
    buf
}

/// One-dimensional array; `None` elements are NULL.
fn array(elements: &[Option<&[u8]>], lower: i32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(&1_i32.to_be_bytes());
    buf.extend_from_slice(&(elements.iter().any(Option::is_none) as i32).to_be_bytes());
    buf.extend_from_slice(&25_i32.to_be_bytes());
    buf.extend_from_slice(&(elements.len() as i32).to_be_bytes());
    buf.extend_from_slice(&lower.to_be_bytes());
    for e in elements {
        match e {
            Some(bytes) => {
                buf.extend_from_slice(&(bytes.len() as i32).to_be_bytes());
                buf.extend_from_slice(bytes);
            }
            None => buf.extend_from_slice(&(-1_i32).to_be_bytes()),
        }
    }
    buf
}

fn text(ty: &Type, raw: &[u8]) -> String {
    match decode_value(ty, raw).unwrap() {
        Value::Text(s) => s,
        other => panic!("expected text, got {other:?}"),
    }
}

#[test]
fn numeric_keeps_scale() {
    // 12345.678
    let raw = numeric(1, NUMERIC_POS, 3, &[1, 2345, 6780]);
    assert_eq!(text(&Type::NUMERIC, &raw), "12345.678");
    // -0.0012
    let raw = numeric(-1, NUMERIC_NEG, 4, &[12]);
    assert_eq!(text(&Type::NUMERIC, &raw), "-0.0012");
    // 0.00000001
    let raw = numeric(-2, NUMERIC_POS, 8, &[1]);
    assert_eq!(text(&Type::NUMERIC, &raw), "0.00000001");
    // 10000 with trailing zero groups stripped
    let raw = numeric(1, NUMERIC_POS, 0, &[1]);
    assert_eq!(text(&Type::NUMERIC, &raw), "10000");
}

#[test]
fn numeric_beyond_decimal_precision() {
    let raw = numeric(7, NUMERIC_POS, 0, &[9999; 8]);
    assert_eq!(text(&Type::NUMERIC, &raw), "9".repeat(32));
}

#[test]
fn numeric_special_values() {
    assert_eq!(text(&Type::NUMERIC, &numeric(0, NUMERIC_NAN, 0, &[])), "NaN");
    assert_eq!(text(&Type::NUMERIC, &numeric(0, NUMERIC_PINF, 0, &[])), "Infinity");
    assert_eq!(text(&Type::NUMERIC, &numeric(0, NUMERIC_NINF, 0, &[])), "-Infinity");
    assert!(decode_value(&Type::NUMERIC, &numeric(0, 0x1234, 0, &[])).is_err());
}

#[test]
fn interval_uses_postgres_style() {
    assert_eq!(text(&Type::INTERVAL, &interval(0, 1, 0)), "1 day");
    assert_eq!(
        text(&Type::INTERVAL, &interval(14_706_500_000, 3, 14)),
        "1 year 2 mons 3 days 04:05:06.5"
    );
    assert_eq!(text(&Type::INTERVAL, &interval(0, 0, 0)), "00:00:00");
    assert_eq!(text(&Type::INTERVAL, &interval(-90_000_000, -2, 0)), "-2 days -00:01:30");
}

#[test]
fn money_and_inet() {
    assert_eq!(text(&Type::MONEY, &123_456_i64.to_be_bytes()), "1234.56");
    assert_eq!(text(&Type::MONEY, &(-5_i64).to_be_bytes()), "-0.05");

    assert_eq!(text(&Type::INET, &[2, 32, 0, 4, 10, 0, 0, 1]), "10.0.0.1");
    assert_eq!(text(&Type::INET, &[2, 24, 0, 4, 10, 0, 0, 1]), "10.0.0.1/24");
    assert_eq!(text(&Type::CIDR, &[2, 32, 1, 4, 10, 0, 0, 1]), "10.0.0.1/32");
    let mut v6 = vec![3, 128, 0, 16];
    v6.extend_from_slice(&[0; 15]);
    v6.push(1);
    assert_eq!(text(&Type::INET, &v6), "::1");
}

#[test]
fn text_array_quotes_when_needed() {
    let raw = array(
        &[Some(&b"a"[..]), None, Some(&b"b c"[..]), Some(&b""[..]), Some(&b"x\"y"[..])],
        1,
    );
    assert_eq!(text(&Type::TEXT_ARRAY, &raw), r#"{a,NULL,"b c","","x\"y"}"#);
}

#[test]
fn int_array_with_lower_bound() {
    let one = 1_i32.to_be_bytes();
    let two = 2_i32.to_be_bytes();
    let raw = array(&[Some(&one[..]), Some(&two[..])], 0);
    assert_eq!(text(&Type::INT4_ARRAY, &raw), "[0:1]={1,2}");
}

#[test]
fn empty_array() {
    let raw = [0_i32.to_be_bytes(), 0_i32.to_be_bytes(), 23_i32.to_be_bytes()].concat();
    assert_eq!(text(&Type::INT4_ARRAY, &raw), "{}");
}

#[test]
fn domain_decodes_as_base_type() {
    let posint = Type::new("posint".into(), 90_001, Kind::Domain(Type::INT4), "public".into());
    assert_eq!(decode_value(&posint, &7_i32.to_be_bytes()).unwrap(), Value::Int(7));
}

#[test]
fn enum_label_and_unknown_type() {
    let mood = Type::new(
        "mood".into(),
        90_002,
        Kind::Enum(vec!["ok".into(), "sad".into()]),
        "public".into(),
    );
    assert_eq!(decode_value(&mood, b"sad").unwrap(), Value::from("sad"));

    let raw = [0x01, 0x02, 0x03];
    assert_eq!(decode_value(&Type::POINT, &raw).unwrap(), Value::Bytes(raw.to_vec()));
}

#[test]
fn infinite_dates() {
    assert_eq!(text(&Type::DATE, &i32::MAX.to_be_bytes()), "infinity");
    assert_eq!(text(&Type::TIMESTAMPTZ, &i64::MIN.to_be_bytes()), "-infinity");
    // 2000-01-02, one day after the PostgreSQL epoch
    assert_eq!(text(&Type::DATE, &1_i32.to_be_bytes()), "2000-01-02");
}

#[test]
fn truncated_data_is_an_error() {
    assert!(decode_value(&Type::INTERVAL, &[0, 1]).is_err());
    assert!(decode_value(&Type::INT4_ARRAY, &[0, 0, 0, 1]).is_err());
}
