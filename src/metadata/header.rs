//! Heuristic detection of undelimited metadata headers.

/// Detect whether `buf` opens with a metadata block.
///
/// Returns the split point, i.e. the offset of the first content byte after
/// the blank line that terminates the block, or `None` when no block is
/// present. The header is `buf[..pos]` and the content is `buf[pos..]`.
///
/// Carriage returns are skipped while looking for the terminator, but the
/// returned offset indexes the original buffer, so any `\r` bytes inside the
/// header are counted.
///
/// # Examples
///
/// ```
/// use platepipe::metadata::detect;
///
/// assert_eq!(detect(b"k = 'v'\n\ncontent"), Some(9));
/// assert_eq!(detect(b"k = 'v'\n\r\ncontent"), Some(10));
/// assert_eq!(detect(b" k = 'v'\n\ncontent"), None);
/// assert_eq!(detect(b"k = 'v'"), None);
/// ```
pub fn detect(buf: &[u8]) -> Option<usize> {
    let (&first, rest) = buf.split_first()?;

    if !is_start_of_key(first) {
        return None;
    }

    let mut last = first;
    for (i, &byte) in rest.iter().enumerate() {
        if byte == b'\r' {
            continue;
        }

        if byte == b'\n' && last == b'\n' {
            // `rest` starts at index 1 of `buf`
            return Some(i + 2);
        }

        last = byte;
    }

    None
}

/// Bytes that may open a key: a quote for quoted keys, or an ASCII
/// alphanumeric for bare keys.
fn is_start_of_key(byte: u8) -> bool {
    byte == b'\'' || byte == b'"' || byte.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_table() {
        let cases: &[(&[u8], Option<usize>)] = &[
            (b"", None),
            (b"test", None),
            (b"test\ntest", None),
            (b" barekey = 'value'\n\n", None),
            (b"barekey = 'value'\n\n", Some(19)),
            (b"1barekey = 'value'\n\n", Some(20)),
            (b"'key' = 'value'\n\n", Some(17)),
            (b"\"key\" = 'value'\n\n", Some(17)),
            (b"barekey = 'value'\n\nother text", Some(19)),
            (b"barekey = 'value'\n\r\nother text", Some(20)),
        ];

        for (buf, expected) in cases {
            assert_eq!(
                detect(buf),
                *expected,
                "detect({:?})",
                String::from_utf8_lossy(buf)
            );
        }
    }

    #[test]
    fn test_non_key_start_is_absent() {
        for start in [b' ', b'\t', b'\n', b'#', b'-', b'*', b'[', b'_', 0xC3] {
            let mut buf = vec![start];
            buf.extend_from_slice(b"key = 'value'\n\ncontent");
            assert_eq!(detect(&buf), None, "start byte {start:#04x}");
        }
    }

    #[test]
    fn test_unterminated_header_is_absent() {
        assert_eq!(detect(b"k = 'v'"), None);
        assert_eq!(detect(b"k = 'v'\n"), None);
        assert_eq!(detect(b"k = 'v'\nother = 1\n"), None);
        assert_eq!(detect(b"k = 'v'\r\r\n"), None);
    }

    #[test]
    fn test_carriage_returns_are_ignored() {
        assert_eq!(detect(b"k = 'v'\r\n\r\n"), Some(11));
        assert_eq!(detect(b"k = 'v'\r\n\r\ncontent"), Some(11));
        // CRs between the newlines do not break the pair
        assert_eq!(detect(b"k\n\r\r\r\nrest"), Some(6));
    }

    #[test]
    fn test_split_round_trip() {
        let buf = b"k = 'v'\n\ncontent";
        let pos = detect(buf).unwrap();

        assert_eq!(pos, 9);
        assert_eq!(&buf[..pos], b"k = 'v'\n\n");
        assert_eq!(&buf[pos..], b"content");
    }

    #[test]
    fn test_only_first_blank_line_counts() {
        let buf = b"a = 1\n\nb = 2\n\ncontent";
        assert_eq!(detect(buf), Some(7));
    }
}
