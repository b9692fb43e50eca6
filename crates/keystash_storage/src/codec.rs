//! Line codec for the flat file format.
//!
//! Each entry is one line of the form `escaped_key=escaped_value`. Escaping
//! turns the characters that would collide with the format's own delimiters
//! into two-character backslash sequences:
//!
//! | Character | Escaped |
//! |-----------|---------|
//! | `\`       | `\\`    |
//! | newline   | `\n`    |
//! | CR        | `\r`    |
//! | tab       | `\t`    |
//! | `=`       | `\=`    |
//!
//! Unescaping is permissive: an unknown sequence such as `\q` is passed
//! through unchanged, as is a lone trailing backslash.

/// Separator between key and value on a line.
pub const SEPARATOR: char = '=';

const ESCAPE: char = '\\';

/// Escapes reserved characters in `input`.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            ESCAPE => escaped.push_str("\\\\"),
            SEPARATOR => escaped.push_str("\\="),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Reverses [`escape`].
#[must_use]
pub fn unescape(input: &str) -> String {
    let mut unescaped = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ESCAPE {
            unescaped.push(c);
            continue;
        }

        let decoded = match chars.peek() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some(&ESCAPE) => ESCAPE,
            Some(&SEPARATOR) => SEPARATOR,
            // Unknown sequence or trailing backslash: keep the backslash and
            // let the next character (if any) be handled on its own.
            _ => {
                unescaped.push(ESCAPE);
                continue;
            }
        };
        chars.next();
        unescaped.push(decoded);
    }

    unescaped
}

/// Encodes one entry as a line, without the trailing newline.
#[must_use]
pub fn encode_entry(key: &str, value: &str) -> String {
    let mut line = escape(key);
    line.push(SEPARATOR);
    line.push_str(&escape(value));
    line
}

/// Decodes one line into a key and a value.
///
/// The line is split at the first `=` that is not part of an escape
/// sequence. Returns `None` for empty lines and lines without a separator.
#[must_use]
pub fn decode_entry(line: &str) -> Option<(String, String)> {
    let split = find_separator(line)?;
    let (key, rest) = line.split_at(split);
    let value = &rest[SEPARATOR.len_utf8()..];
    Some((unescape(key), unescape(value)))
}

/// Returns the byte offset of the first unescaped separator.
fn find_separator(line: &str) -> Option<usize> {
    let mut chars = line.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            ESCAPE => {
                chars.next();
            }
            SEPARATOR => return Some(idx),
            _ => {}
        }
    }

    None
}
