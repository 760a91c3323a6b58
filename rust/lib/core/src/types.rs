/// Get the current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Percent-encode a string for use as a query-string value.
///
/// Unreserved characters (RFC 3986) pass through; everything else is
/// encoded as UTF-8 `%XX` sequences. Spaces become `%20`, not `+`, so
/// the output is safe inside any query value.
pub fn percent_encode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(ch),
            _ => {
                let mut buf = [0u8; 4];
                let encoded = ch.encode_utf8(&mut buf);
                for byte in encoded.bytes() {
                    result.push('%');
                    result.push_str(&format!("{:02X}", byte));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_rfc3339() {
        let ts = now_rfc3339();
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_percent_encode() {
        assert_eq!(percent_encode("abc-123_.~"), "abc-123_.~");
        assert_eq!(
            percent_encode("https://cdn.example/x.jpg"),
            "https%3A%2F%2Fcdn.example%2Fx.jpg"
        );
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("é"), "%C3%A9");
    }
}
