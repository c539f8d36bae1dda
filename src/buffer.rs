use bytes::{Bytes, BytesMut};

/// Joins deferred input with freshly supplied bytes.
///
/// Suspended parsers resume as if the caller had originally supplied the
/// concatenation; either side being empty avoids a copy.
pub(crate) fn concat(existing: Bytes, extra: Bytes) -> Bytes {
    if existing.is_empty() {
        return extra;
    }
    if extra.is_empty() {
        return existing;
    }

    let mut joined = BytesMut::with_capacity(existing.len() + extra.len());
    joined.extend_from_slice(&existing);
    joined.extend_from_slice(&extra);
    joined.freeze()
}

/// Finds the first occurrence of `needle` in `haystack`.
pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }

    memchr::memmem::find(haystack, needle)
}

/// Reports whether `data` ran out while it could still grow into `needle`.
pub(crate) fn is_partial_prefix(data: &[u8], needle: &[u8]) -> bool {
    data.len() < needle.len() && needle.starts_with(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concat_joins_both_sides() {
        let joined = concat(Bytes::from_static(b"ab"), Bytes::from_static(b"cd"));
        assert_eq!(&joined[..], b"abcd");
    }

    #[test]
    fn concat_skips_copy_for_empty_sides() {
        let right = concat(Bytes::new(), Bytes::from_static(b"cd"));
        assert_eq!(&right[..], b"cd");

        let left = concat(Bytes::from_static(b"ab"), Bytes::new());
        assert_eq!(&left[..], b"ab");
    }

    #[test]
    fn find_subslice_locates_needle() {
        assert_eq!(find_subslice(b"preamble\r\n--X", b"\r\n--X"), Some(8));
        assert_eq!(find_subslice(b"no match here", b"\r\n--X"), None);
        assert_eq!(find_subslice(b"anything", b""), Some(0));
    }

    #[test]
    fn partial_prefix_requires_shorter_input() {
        assert!(is_partial_prefix(b"\r\n-", b"\r\n--X"));
        assert!(is_partial_prefix(b"", b"\r\n--X"));
        assert!(!is_partial_prefix(b"\r\n--X", b"\r\n--X"));
        assert!(!is_partial_prefix(b"\rX", b"\r\n--X"));
    }
}
