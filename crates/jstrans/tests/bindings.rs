use jstrans::{Value, params};

#[test]
fn empty_params() {
    let p = params! {};
    assert!(p.is_empty());
}

#[test]
fn multiple_params() {
    let p = params! {
        "count" => 3,
        "name" => "Bob",
        "score" => 9.5_f64
    };
    assert_eq!(p.len(), 3);
    assert_eq!(p["count"].as_integer(), Some(3));
    assert_eq!(p["name"].as_string(), Some("Bob"));
    assert_eq!(p["score"], Value::Float(9.5));
}

#[test]
fn trailing_comma() {
    let p = params! {
        "a" => 1,
        "b" => 2,
    };
    assert_eq!(p.len(), 2);
}

#[test]
fn various_integer_types() {
    let p = params! {
        "i32" => 10_i32,
        "i64" => 20_i64,
        "u32" => 30_u32,
        "u64" => 40_u64,
        "usize" => 50_usize
    };
    assert_eq!(p["i32"].as_integer(), Some(10));
    assert_eq!(p["i64"].as_integer(), Some(20));
    assert_eq!(p["u32"].as_integer(), Some(30));
    assert_eq!(p["u64"].as_integer(), Some(40));
    assert_eq!(p["usize"].as_integer(), Some(50));
}

#[test]
fn oversized_unsigned_saturates() {
    assert_eq!(Value::from(u64::MAX).as_integer(), Some(i64::MAX));
}

#[test]
fn owned_string_value() {
    let name = String::from("Charlie");
    let p = params! { "name" => name };
    assert_eq!(p["name"].as_string(), Some("Charlie"));
}

#[test]
fn numeric_view_follows_javascript() {
    assert_eq!(Value::from("  12 ").to_number(), 12.0);
    assert_eq!(Value::from("").to_number(), 0.0);
    assert!(Value::from("12 apples").to_number().is_nan());
    assert_eq!(Value::from(7).to_number(), 7.0);
}

#[test]
fn float_display_matches_javascript() {
    assert_eq!(Value::from(1.0).to_string(), "1");
    assert_eq!(Value::from(-0.5).to_string(), "-0.5");
    assert_eq!(Value::from(1e21).to_string(), "1e+21");
}
