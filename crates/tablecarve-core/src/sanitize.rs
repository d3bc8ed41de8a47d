use crate::model::CellValue;

/// Longest file stem `sanitize_filename` will produce, in characters.
pub const MAX_FILENAME_LEN: usize = 100;

/// Normalize a header cell into a column label.
///
/// Missing cells become an empty label, which callers treat as "not a data
/// column". See [`clean_header_text`] for the text rules.
pub fn clean_header(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        other => clean_header_text(&other.to_string()),
    }
}

/// Replace line breaks with spaces, collapse runs of spaces to one and trim.
///
/// Runs of any length collapse, so the result is idempotent.
pub fn clean_header_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut prev_space = false;
    for c in raw.chars() {
        let c = if c == '\n' || c == '\r' { ' ' } else { c };
        if c == ' ' {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Turn a table title or sheet name into a file stem.
///
/// Steps:
/// 1. Drop characters that are illegal in file names: `\ / * ? : " < > |`
/// 2. Replace each run of whitespace with a single underscore
/// 3. Drop commas and periods
/// 4. Truncate to [`MAX_FILENAME_LEN`] characters
pub fn sanitize_filename(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;
    for c in text.chars() {
        if matches!(c, '\\' | '/' | '*' | '?' | ':' | '"' | '<' | '>' | '|') {
            continue;
        }
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c == ',' || c == '.' {
            continue;
        }
        out.push(c);
    }
    out.chars().take(MAX_FILENAME_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header_missing_is_empty() {
        assert_eq!(clean_header(&CellValue::Empty), "");
    }

    #[test]
    fn clean_header_replaces_newlines() {
        assert_eq!(
            clean_header(&CellValue::Text("Number of\nchildren ".into())),
            "Number of children"
        );
        assert_eq!(clean_header_text("Rate\r\n(per 1,000)"), "Rate (per 1,000)");
    }

    #[test]
    fn clean_header_collapses_space_runs() {
        assert_eq!(clean_header_text("Age  group"), "Age group");
        assert_eq!(clean_header_text("Age   group"), "Age group");
        assert_eq!(clean_header_text("a \n b"), "a b");
    }

    #[test]
    fn clean_header_leaves_clean_text_alone() {
        for s in ["Count", "Age group", "2019-20", "Rate (%)"] {
            assert_eq!(clean_header_text(s), s);
            assert_eq!(clean_header_text(&clean_header_text(s)), s);
        }
    }

    #[test]
    fn clean_header_formats_numbers() {
        assert_eq!(clean_header(&CellValue::Float(2020.0)), "2020");
        assert_eq!(clean_header(&CellValue::Int(7)), "7");
    }

    #[test]
    fn sanitize_title() {
        assert_eq!(
            sanitize_filename("Table 1: Age, by sex. 2019"),
            "Table_1_Age_by_sex_2019"
        );
    }

    #[test]
    fn sanitize_removes_separators_and_illegal_chars() {
        let out = sanitize_filename(r#"a\b/c*d?e:f"g<h>i|j,k.l"#);
        assert_eq!(out, "abcdefghijkl");
    }

    #[test]
    fn sanitize_collapses_whitespace_runs() {
        assert_eq!(sanitize_filename("a \t\n b"), "a_b");
        // removal happens before whitespace runs are measured
        assert_eq!(sanitize_filename("a : b"), "a_b");
    }

    #[test]
    fn sanitize_truncates_to_limit() {
        let long = "x".repeat(250);
        assert_eq!(sanitize_filename(&long).chars().count(), MAX_FILENAME_LEN);
        let multibyte = "é".repeat(150);
        assert_eq!(sanitize_filename(&multibyte).chars().count(), MAX_FILENAME_LEN);
    }

    #[test]
    fn sanitize_output_is_always_safe() {
        let inputs = [
            "",
            "Table 12: Children/youth (aged 5-24), Canada*",
            "..\\..\\etc\\passwd",
            "\"quoted\" <tag> | pipe ? star * colon :",
            &"Long title, with. punctuation ".repeat(10),
        ];
        for input in inputs {
            let out = sanitize_filename(input);
            assert!(out.chars().count() <= MAX_FILENAME_LEN);
            for bad in ['\\', '/', '*', '?', ':', '"', '<', '>', '|', ',', '.'] {
                assert!(!out.contains(bad), "{out:?} contains {bad:?}");
            }
        }
    }
}
