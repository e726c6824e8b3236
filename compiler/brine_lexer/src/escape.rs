//! Escape Sequence Processing
//!
//! Recognized escapes: `\n`, `\t`, `\r`, `\0`, `\\`, `\"`.

/// Resolve a single escape character to its replacement.
#[inline]
pub(crate) fn resolve_escape(c: char) -> Option<char> {
    match c {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        '0' => Some('\0'),
        '\\' => Some('\\'),
        '"' => Some('"'),
        _ => None,
    }
}

/// Cook the body of a string literal (quotes already stripped).
///
/// Returns the offending character on an unknown escape.
pub(crate) fn unescape_string(s: &str) -> Result<String, char> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        // The literal regex guarantees a character follows every backslash.
        let esc = chars.next().unwrap_or('\\');
        result.push(resolve_escape(esc).ok_or(esc)?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(unescape_string("hello world"), Ok("hello world".to_string()));
    }

    #[test]
    fn test_all_escapes() {
        assert_eq!(
            unescape_string(r#"a\nb\tc\rd\0e\\f\"g"#),
            Ok("a\nb\tc\rd\0e\\f\"g".to_string())
        );
    }

    #[test]
    fn test_unknown_escape_reports_char() {
        assert_eq!(unescape_string(r"bad\q"), Err('q'));
    }
}
