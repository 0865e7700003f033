//! Parsing of operator-entered response fields

/// One line typed at the response prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEntry {
    /// Empty line: the response is complete
    Done,
    /// `key:value` pair to set on the response
    Field { key: String, value: String },
}

impl FieldEntry {
    /// Parse a prompt line (without its line terminator).
    ///
    /// The line is split on the first colon. Neither side is trimmed, and a
    /// line with no colon becomes a key with an empty value.
    pub fn parse(line: &str) -> Self {
        if line.is_empty() {
            return FieldEntry::Done;
        }

        let (key, value) = line.split_once(':').unwrap_or((line, ""));
        FieldEntry::Field {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// Strip a trailing `\n` or `\r\n` and nothing else
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(key: &str, value: &str) -> FieldEntry {
        FieldEntry::Field {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_empty_line_is_done() {
        assert_eq!(FieldEntry::parse(""), FieldEntry::Done);
    }

    #[test]
    fn test_split_on_first_colon() {
        assert_eq!(FieldEntry::parse("status:ok"), field("status", "ok"));
        assert_eq!(
            FieldEntry::parse("url:http://example.com:8080/"),
            field("url", "http://example.com:8080/")
        );
    }

    #[test]
    fn test_no_trimming() {
        assert_eq!(FieldEntry::parse(" status : ok "), field(" status ", " ok "));
        assert_eq!(FieldEntry::parse("   "), field("   ", ""));
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(FieldEntry::parse("result"), field("result", ""));
    }

    #[test]
    fn test_leading_colon() {
        assert_eq!(FieldEntry::parse(":value"), field("", "value"));
        assert_eq!(FieldEntry::parse("key:"), field("key", ""));
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("status:ok\n"), "status:ok");
        assert_eq!(strip_line_ending("status:ok\r\n"), "status:ok");
        assert_eq!(strip_line_ending("status:ok "), "status:ok ");
        assert_eq!(strip_line_ending("\n"), "");
    }
}
