#![allow(missing_docs)]

use partstream::parse_content_disposition;

#[test]
fn parses_type_and_mixed_parameters() {
    let parsed = parse_content_disposition("form-data; name=\"file\"; filename=a.txt")
        .expect("header should parse");

    assert_eq!(parsed.disposition, "form-data");
    assert_eq!(
        parsed.parameters,
        vec![param("name", "file"), param("filename", "a.txt")]
    );
    assert_eq!(parsed.name(), Some("file"));
    assert_eq!(parsed.filename(), Some("a.txt"));
}

#[test]
fn parses_a_bare_type() {
    let parsed = parse_content_disposition("inline").expect("header should parse");

    assert_eq!(parsed.disposition, "inline");
    assert!(parsed.parameters.is_empty());
}

#[test]
fn lowercases_type_and_parameter_names_only() {
    let parsed = parse_content_disposition("Form-Data; NAME=MiXeD").expect("header should parse");

    assert_eq!(parsed.disposition, "form-data");
    assert_eq!(parsed.parameters, vec![param("name", "MiXeD")]);
}

#[test]
fn unescapes_quoted_values() {
    let parsed = parse_content_disposition("x; p=\"a\\\"b\"").expect("header should parse");
    assert_eq!(parsed.disposition, "x");
    assert_eq!(parsed.parameters, vec![param("p", "a\"b")]);
}

#[test]
fn backslash_escapes_any_character() {
    let parsed = parse_content_disposition("x; p=\"a\\\\b\\c\"").expect("header should parse");
    assert_eq!(parsed.parameters, vec![param("p", "a\\bc")]);
}

#[test]
fn keeps_multibyte_values_intact() {
    let parsed = parse_content_disposition("form-data; name=\"你好\"; filename=\"файл.txt\"")
        .expect("header should parse");

    assert_eq!(parsed.name(), Some("你好"));
    assert_eq!(parsed.filename(), Some("файл.txt"));
}

#[test]
fn unquoted_values_stop_at_separators() {
    let parsed = parse_content_disposition("x; a=1 ;b=2\tc=3").expect("header should parse");

    assert_eq!(
        parsed.parameters,
        vec![param("a", "1"), param("b", "2"), param("c", "3")]
    );
}

#[test]
fn empty_unquoted_value_is_allowed() {
    let parsed = parse_content_disposition("x; p=").expect("header should parse");
    assert_eq!(parsed.parameters, vec![param("p", "")]);
}

#[test]
fn rejects_a_parameter_without_equals() {
    assert!(parse_content_disposition("form-data; name").is_err());
}

#[test]
fn rejects_an_unterminated_quoted_value() {
    assert!(parse_content_disposition("form-data; name=\"file").is_err());
    assert!(parse_content_disposition("x; p=\"a\\").is_err());
}

#[test]
fn display_roundtrips_canonical_form() {
    let parsed = parse_content_disposition("Form-Data; name=\"my field\"; filename=a.txt")
        .expect("header should parse");

    let serialized = parsed.to_string();
    assert_eq!(serialized, "form-data; name=\"my field\"; filename=a.txt");

    let reparsed = parse_content_disposition(&serialized).expect("canonical form should parse");
    assert_eq!(reparsed, parsed);
}

#[test]
fn display_quotes_and_escapes_non_token_values() {
    let parsed = parse_content_disposition("x; p=\"a\\\"b\"").expect("header should parse");
    assert_eq!(parsed.to_string(), "x; p=\"a\\\"b\"");

    let reparsed = parse_content_disposition(&parsed.to_string()).expect("should parse");
    assert_eq!(reparsed, parsed);
}

fn param(name: &str, value: &str) -> (String, String) {
    (name.to_owned(), value.to_owned())
}
