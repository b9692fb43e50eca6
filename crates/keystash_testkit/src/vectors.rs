//! Known-answer vectors for the flat file line format.
//!
//! Each vector pins the exact on-disk line for an entry, so a change to the
//! escaping rules shows up as a vector failure rather than a silent format
//! drift.

/// A single entry and the line it must serialize to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineVector {
    /// Unique identifier for this vector.
    pub id: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Unescaped key.
    pub key: &'static str,
    /// Unescaped value.
    pub value: &'static str,
    /// Expected line, without the trailing newline.
    pub line: &'static str,
}

/// Vectors covering every reserved character in keys and values.
pub fn line_format_vectors() -> Vec<LineVector> {
    vec![
        LineVector {
            id: "plain",
            description: "No reserved characters",
            key: "name",
            value: "value",
            line: "name=value",
        },
        LineVector {
            id: "empty_value",
            description: "Empty value keeps the separator",
            key: "blank",
            value: "",
            line: "blank=",
        },
        LineVector {
            id: "empty_key",
            description: "Empty key starts the line with the separator",
            key: "",
            value: "v",
            line: "=v",
        },
        LineVector {
            id: "separator_in_key",
            description: "Separator inside the key is escaped",
            key: "a=b",
            value: "x\ny",
            line: "a\\=b=x\\ny",
        },
        LineVector {
            id: "separator_in_value",
            description: "Separator inside the value is escaped",
            key: "expr",
            value: "1+1=2",
            line: "expr=1+1\\=2",
        },
        LineVector {
            id: "control_characters",
            description: "Newline, carriage return and tab",
            key: "ctl",
            value: "\r\n\t",
            line: "ctl=\\r\\n\\t",
        },
        LineVector {
            id: "backslash",
            description: "Backslash is doubled",
            key: "path\\",
            value: "C:\\dir",
            line: "path\\\\=C:\\\\dir",
        },
        LineVector {
            id: "unicode",
            description: "Non-ASCII text is written as-is",
            key: "ключ",
            value: "値 ✓",
            line: "ключ=値 ✓",
        },
    ]
}
