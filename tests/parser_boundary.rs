#![allow(missing_docs)]

use partstream::extract_multipart_boundary;

#[test]
fn extracts_the_boundary_parameter() {
    let boundary = extract_multipart_boundary("multipart/form-data; boundary=XBOUND")
        .expect("boundary should extract");
    assert_eq!(boundary, "XBOUND");
}

#[test]
fn accepts_any_multipart_subtype() {
    let boundary = extract_multipart_boundary("multipart/mixed; boundary=gc0p4Jq0M2Yt08j34c0p")
        .expect("boundary should extract");
    assert_eq!(boundary, "gc0p4Jq0M2Yt08j34c0p");
}

#[test]
fn accepts_quoted_boundaries_with_spaces() {
    let boundary =
        extract_multipart_boundary("multipart/form-data; boundary=\"simple boundary\"")
            .expect("boundary should extract");
    assert_eq!(boundary, "simple boundary");
}

#[test]
fn rejects_non_multipart_content_types() {
    assert!(extract_multipart_boundary("text/plain; boundary=X").is_err());
    assert!(extract_multipart_boundary("application/json").is_err());
}

#[test]
fn rejects_an_invalid_content_type() {
    assert!(extract_multipart_boundary("not a content type").is_err());
}

#[test]
fn rejects_missing_boundary_parameter() {
    assert!(extract_multipart_boundary("multipart/form-data").is_err());
}

#[test]
fn rejects_overlong_boundaries() {
    let long = "a".repeat(71);
    let header = format!("multipart/form-data; boundary={long}");
    assert!(extract_multipart_boundary(&header).is_err());
}

#[test]
fn rejects_boundaries_with_invalid_characters() {
    assert!(extract_multipart_boundary("multipart/form-data; boundary=\"no<angle>\"").is_err());
}

#[test]
fn rejects_trailing_whitespace() {
    assert!(extract_multipart_boundary("multipart/form-data; boundary=\"oops \"").is_err());
}
