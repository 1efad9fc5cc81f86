/// String literal escaping and unescaping for rester source text.
///
/// Both dialects accept `"..."` literals without embedded quotes. The text
/// between the quotes goes through [`unescape_string`]; values are written
/// back out with [`escape_string`] when displayed.
use core::fmt;

/// Escape special characters so `s` reads back as the same string literal.
///
/// - `"` → `\"`
/// - `\` → `\\`
/// - `\n`, `\r`, `\t`, `\0` → their two-character escapes
/// - Other control characters → `\uNNNN`
pub fn escape_string(f: &mut impl fmt::Write, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\0' => write!(f, "\\0")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

/// Decode the escape sequences of a string literal body (quotes removed).
///
/// Supported escapes:
/// - `\n`, `\r`, `\t`, `\\`, `\"`, `\'`, `\0`
/// - `\xHH` (2 hex digits), `\uHHHH` (4), `\UHHHHHHHH` (8)
///
/// Sequences that are not recognized, or whose digits are malformed, are
/// kept verbatim rather than rejected.
pub fn unescape_string(input: &str) -> String {
    if !input.contains('\\') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some((_, esc)) = chars.next() else {
            out.push('\\');
            break;
        };
        match esc {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '0' => out.push('\0'),
            '\\' => out.push('\\'),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            'x' | 'u' | 'U' => {
                let digits = match esc {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                let start = pos + 2;
                let decoded = input
                    .get(start..start + digits)
                    .filter(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .and_then(char::from_u32);
                match decoded {
                    Some(c) => {
                        out.push(c);
                        for _ in 0..digits {
                            chars.next();
                        }
                    }
                    None => {
                        out.push('\\');
                        out.push(esc);
                    }
                }
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped(s: &str) -> String {
        let mut out = String::new();
        escape_string(&mut out, s).unwrap();
        out
    }

    #[test]
    fn test_unescape_plain() {
        assert_eq!(unescape_string("hello"), "hello");
    }

    #[test]
    fn test_unescape_common() {
        assert_eq!(unescape_string(r"a\nb\tc\\d"), "a\nb\tc\\d");
    }

    #[test]
    fn test_unescape_unicode() {
        assert_eq!(unescape_string(r"A\x42\U0001F600"), "AB\u{1F600}");
    }

    #[test]
    fn test_unescape_unknown_kept() {
        assert_eq!(unescape_string(r"\q\u12"), r"\q\u12");
    }

    #[test]
    fn test_unescape_trailing_backslash() {
        assert_eq!(unescape_string("abc\\"), "abc\\");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escaped("say \"hi\"\n"), r#""say \"hi\"\n""#);
        assert_eq!(escaped("\u{1}"), r#""\u0001""#);
    }
}
