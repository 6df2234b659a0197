//! Header sanitizing for raw sends

/// Banner lines that multipart body construction inserts for non-MIME readers.
///
/// They never belong on the wire-level envelope.
pub const PLACEHOLDER_HEADERS: [&str; 3] = [
    "0: This part of the E-mail should never be seen. If",
    "1: you are reading this, consider upgrading your e-mail",
    "2: client to a MIME-compatible client.",
];

/// Returns the header lines with every placeholder banner line removed.
///
/// Other lines keep their order. Duplicated placeholders are all removed.
pub fn strip_placeholder_headers(headers: &[String]) -> Vec<String> {
    headers
        .iter()
        .filter(|line| !PLACEHOLDER_HEADERS.contains(&line.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_strip_removes_placeholders_and_keeps_order() {
        let headers = lines(&[
            "From: a@x.com",
            PLACEHOLDER_HEADERS[0],
            "X-Custom: 1",
            PLACEHOLDER_HEADERS[1],
            PLACEHOLDER_HEADERS[2],
            "MIME-Version: 1.0",
        ]);

        assert_eq!(
            strip_placeholder_headers(&headers),
            lines(&["From: a@x.com", "X-Custom: 1", "MIME-Version: 1.0"])
        );
    }

    #[test]
    fn test_strip_removes_placeholder_at_first_position() {
        let headers = lines(&[PLACEHOLDER_HEADERS[0], "X-Custom: 1"]);

        assert_eq!(strip_placeholder_headers(&headers), lines(&["X-Custom: 1"]));
    }

    #[test]
    fn test_strip_removes_duplicated_placeholders() {
        let headers = lines(&[
            PLACEHOLDER_HEADERS[2],
            "X-Custom: 1",
            PLACEHOLDER_HEADERS[2],
        ]);

        assert_eq!(strip_placeholder_headers(&headers), lines(&["X-Custom: 1"]));
    }

    #[test]
    fn test_strip_without_placeholders_is_a_no_op() {
        let headers = lines(&["From: a@x.com", "X-Custom: 1"]);

        assert_eq!(strip_placeholder_headers(&headers), headers);
    }

    #[test]
    fn test_strip_keeps_near_matches() {
        let headers = lines(&["0: This part of the E-mail should never be seen."]);

        assert_eq!(strip_placeholder_headers(&headers), headers);
    }
}
