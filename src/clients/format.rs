use std::fmt::Write;

use crate::types::SqlValue;

/// Replaces each `?` outside quoted text with the next argument, escaped as a
/// MySQL literal. Placeholders beyond the last argument are left as they are.
pub fn format(query: &str, args: &[SqlValue]) -> String {
    let mut out = String::with_capacity(query.len() + args.len() * 8);
    let mut args = args.iter();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in query.chars() {
        match quote {
            Some(_) if escaped => escaped = false,
            // Backslash escapes apply to string literals, not backtick identifiers.
            Some('\'' | '"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if matches!(c, '\'' | '"' | '`') => quote = Some(c),
            None if c == '?' => {
                if let Some(arg) = args.next() {
                    push_literal(&mut out, arg);
                    continue;
                }
            }
            None => {}
        }
        out.push(c);
    }

    out
}

/// Renders one value as a MySQL literal.
pub fn sanitize(value: &SqlValue) -> String {
    let mut out = String::new();
    push_literal(&mut out, value);
    out
}

fn push_literal(out: &mut String, value: &SqlValue) {
    match value {
        SqlValue::Null => out.push_str("null"),
        SqlValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        SqlValue::Int(i) => out.push_str(&i.to_string()),
        SqlValue::UInt(u) => out.push_str(&u.to_string()),
        SqlValue::Float(f) if f.is_finite() => out.push_str(&f.to_string()),
        SqlValue::Float(_) => out.push_str("null"),
        SqlValue::Text(s) => push_quoted(out, s),
        SqlValue::DateTime(d) => push_quoted(out, &d.format("%Y-%m-%d %H:%M:%S%.3f").to_string()),
        SqlValue::Json(v) => push_quoted(out, &v.to_string()),
        SqlValue::Bytes(bytes) => {
            out.push_str("x'");
            for b in bytes {
                let _ = write!(out, "{b:02x}");
            }
            out.push('\'');
        }
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\0' => out.push_str("\\0"),
            '\u{8}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{1a}' => out.push_str("\\Z"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_positional_arguments() {
        let sql = format(
            "select * from pets where name = ? and age > ? and deleted = ?",
            &["Rex".into(), SqlValue::Int(3), false.into()],
        );
        assert_eq!(
            sql,
            "select * from pets where name = 'Rex' and age > 3 and deleted = false"
        );
    }

    #[test]
    fn test_placeholders_in_quotes_are_kept() {
        let sql = format("select '?', `a?`, ? from dual", &[SqlValue::Null]);
        assert_eq!(sql, "select '?', `a?`, null from dual");
    }

    #[test]
    fn test_backslash_does_not_escape_identifier_quote() {
        let sql = format(
            r"select `a\` from t where x = ? and y = '\'?' and z = ?",
            &[SqlValue::Int(1), SqlValue::Int(2)],
        );
        assert_eq!(sql, r"select `a\` from t where x = 1 and y = '\'?' and z = 2");
    }

    #[test]
    fn test_missing_arguments_leave_placeholder() {
        assert_eq!(format("select ?, ?", &[SqlValue::Int(1)]), "select 1, ?");
    }

    #[test]
    fn test_escapes_strings() {
        assert_eq!(sanitize(&"it's \"x\"\n\\".into()), r#"'it\'s \"x\"\n\\'"#);
    }

    #[test]
    fn test_literals() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(sanitize(&date.into()), "'2024-01-02 03:04:05.000'");
        assert_eq!(sanitize(&SqlValue::Bytes(vec![0xde, 0xad])), "x'dead'");
        assert_eq!(
            sanitize(&serde_json::json!({"a": "b"}).into()),
            r#"'{\"a\":\"b\"}'"#
        );
        assert_eq!(sanitize(&SqlValue::UInt(7)), "7");
    }
}
