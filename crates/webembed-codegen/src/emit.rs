//! C source emission.

use std::fmt::Write;

/// Names used in the generated C file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSourceOptions {
    /// Header declaring the accessors, included by the generated file
    pub header: String,

    /// Name of the static character array
    pub array_name: String,

    /// Accessor returning a pointer to the page
    pub content_fn: String,

    /// Accessor returning the page length in bytes
    pub len_fn: String,

    /// Where the assets came from, shown in the generated-file banner
    pub source_label: String,
}

impl Default for CSourceOptions {
    fn default() -> Self {
        Self {
            header: "dashboard.h".to_string(),
            array_name: "s_html".to_string(),
            content_fn: "dashboard_get_html".to_string(),
            len_fn: "dashboard_get_html_len".to_string(),
            source_label: "web/".to_string(),
        }
    }
}

impl CSourceOptions {
    /// Check that every name can be pasted into C source as-is.
    pub fn validate(&self) -> Result<(), EmitError> {
        for name in [&self.array_name, &self.content_fn, &self.len_fn] {
            if !is_c_identifier(name) {
                return Err(EmitError::InvalidIdentifier(name.clone()));
            }
        }
        if self.header.is_empty() || self.header.contains(['"', '\n', '\r']) {
            return Err(EmitError::InvalidHeader(self.header.clone()));
        }
        if self.source_label.contains("*/") || self.source_label.contains(['\n', '\r']) {
            return Err(EmitError::InvalidLabel(self.source_label.clone()));
        }
        Ok(())
    }
}

/// Errors raised for names that would produce broken C.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmitError {
    #[error("'{0}' is not a valid C identifier")]
    InvalidIdentifier(String),

    #[error("Invalid header name: {0:?}")]
    InvalidHeader(String),

    #[error("Source label cannot be placed in a C comment: {0:?}")]
    InvalidLabel(String),
}

/// Generate the C source embedding `chunks` as one string constant.
///
/// Each chunk becomes one literal segment on its own line. Chunks must already be escaped
/// and boundary-safe, as produced by `webembed_literal::LiteralEncoder`.
pub fn emit_c_source<S: AsRef<str>>(
    chunks: &[S],
    options: &CSourceOptions,
) -> Result<String, EmitError> {
    options.validate()?;

    let CSourceOptions {
        header,
        array_name,
        content_fn,
        len_fn,
        source_label,
    } = options;

    let body: usize = chunks.iter().map(|c| c.as_ref().len() + 5).sum();
    let mut buffer = String::with_capacity(body + 512);

    let _ = writeln!(
        buffer,
        "/* Auto-generated from {source_label} by webembed. Do not edit. */"
    );
    let _ = writeln!(buffer, "#include \"{header}\"");
    buffer.push('\n');
    let _ = writeln!(buffer, "static const char {array_name}[] =");

    if chunks.is_empty() {
        buffer.push_str("  \"\"\n");
    }
    for chunk in chunks {
        let _ = writeln!(buffer, "  \"{}\"", chunk.as_ref());
    }
    buffer.push_str(";\n\n");

    let _ = writeln!(
        buffer,
        "const char *{content_fn}(void) {{ return {array_name}; }}"
    );
    buffer.push('\n');
    let _ = writeln!(buffer, "size_t {len_fn}(void)");
    buffer.push_str("{\n");
    let _ = writeln!(buffer, "    return sizeof({array_name}) - 1;");
    buffer.push_str("}\n");

    Ok(buffer)
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn emits_full_source() {
        let options = CSourceOptions {
            header: "sensor_gateway_http.h".to_string(),
            array_name: "s_html".to_string(),
            content_fn: "sensor_gateway_get_dashboard_html".to_string(),
            len_fn: "sensor_gateway_get_dashboard_html_len".to_string(),
            source_label: "main/web/".to_string(),
        };

        let source = emit_c_source(&["<p>hi</p>\\n", "<b>x</b>"], &options).unwrap();

        assert_eq!(
            source,
            r#"/* Auto-generated from main/web/ by webembed. Do not edit. */
#include "sensor_gateway_http.h"

static const char s_html[] =
  "<p>hi</p>\n"
  "<b>x</b>"
;

const char *sensor_gateway_get_dashboard_html(void) { return s_html; }

size_t sensor_gateway_get_dashboard_html_len(void)
{
    return sizeof(s_html) - 1;
}
"#
        );
    }

    #[test]
    fn empty_document_still_declares_a_literal() {
        let none: [&str; 0] = [];
        let source = emit_c_source(&none, &CSourceOptions::default()).unwrap();
        assert!(source.contains("static const char s_html[] =\n  \"\"\n;\n"));
    }

    #[test]
    fn one_line_per_chunk() {
        let chunks = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let source = emit_c_source(&chunks, &CSourceOptions::default()).unwrap();
        let segments: Vec<&str> = source.lines().filter(|l| l.starts_with("  \"")).collect();
        assert_eq!(segments, vec!["  \"a\"", "  \"b\"", "  \"c\""]);
    }

    #[test]
    fn rejects_bad_identifiers() {
        let options = CSourceOptions {
            content_fn: "get-html".to_string(),
            ..Default::default()
        };
        assert_eq!(
            emit_c_source(&["x"], &options),
            Err(EmitError::InvalidIdentifier("get-html".to_string()))
        );

        let options = CSourceOptions {
            array_name: "9lives".to_string(),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn rejects_bad_header() {
        let options = CSourceOptions {
            header: "evil\".h".to_string(),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(EmitError::InvalidHeader(_))));
    }

    #[test]
    fn rejects_comment_terminator_in_label() {
        let options = CSourceOptions {
            source_label: "web/*/".to_string(),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(EmitError::InvalidLabel(_))));
    }

    #[test]
    fn identifier_rules() {
        assert!(is_c_identifier("_s_html2"));
        assert!(is_c_identifier("DashboardHtml"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("2x"));
        assert!(!is_c_identifier("s html"));
    }
}
