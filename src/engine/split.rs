//! Quote-aware splitting of a single CSV line.

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Split a line into fields.
///
/// A `"` toggles the in-quotes state and a `,` outside quotes ends the
/// current field, which is trimmed of surrounding whitespace. Quote
/// characters are kept while scanning; once the line is split, each field
/// loses one leading and one trailing `"` and every `""` collapses to `"`.
///
/// An odd number of quotes leaves the remainder of the line inside the
/// quoted region. The final field is finalized as-is; this never fails.
/// Quoted line breaks are not supported because callers split on lines first.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current_field = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        if c == QUOTE {
            in_quotes = !in_quotes;
            current_field.push(c);
            continue;
        }

        if c == DELIMITER && !in_quotes {
            fields.push(current_field.trim().to_string());
            current_field.clear();
        } else {
            current_field.push(c);
        }
    }

    fields.push(current_field.trim().to_string());
    fields.into_iter().map(|f| unquote(&f)).collect()
}

/// Strip one layer of enclosing quotes and unescape doubled quotes.
fn unquote(field: &str) -> String {
    let inner = field.strip_prefix(QUOTE).unwrap_or(field);
    let inner = inner.strip_suffix(QUOTE).unwrap_or(inner);
    if inner.contains("\"\"") {
        inner.replace("\"\"", "\"")
    } else {
        inner.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_line("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_line(" a , b ,c "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        assert_eq!(split_line("\"a,b\",c"), vec!["a,b", "c"]);
    }

    #[test]
    fn test_split_escaped_quotes() {
        assert_eq!(
            split_line("\"he said \"\"hi\"\"\",x"),
            vec!["he said \"hi\"", "x"]
        );
    }

    #[test]
    fn test_split_empty_fields() {
        assert_eq!(split_line("a,,c"), vec!["a", "", "c"]);
        assert_eq!(split_line(",,"), vec!["", "", ""]);
        assert_eq!(split_line("\"\",x"), vec!["", "x"]);
    }

    #[test]
    fn test_split_unterminated_quote() {
        // The remainder stays quoted, so the comma is literal.
        assert_eq!(split_line("a,\"b,c"), vec!["a", "b,c"]);
        assert_eq!(split_line("\""), vec![""]);
    }

    #[test]
    fn test_split_quoted_whitespace_is_kept() {
        assert_eq!(split_line("\"  padded  \",x"), vec!["  padded  ", "x"]);
    }

    #[test]
    fn test_split_non_ascii() {
        assert_eq!(split_line("café,\"naïve, ok\""), vec!["café", "naïve, ok"]);
    }
}
