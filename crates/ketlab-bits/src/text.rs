//! Slicing, splitting and list printing for plain text.

use crate::config::SliceRange;

/// Characters of `text` within `range`, Python slice style.
pub fn slice_chars(text: &str, range: &SliceRange) -> String {
    let len = text.chars().count();
    let r = range.resolve(len);
    text.chars().skip(r.start).take(r.end - r.start).collect()
}

/// Split on runs of whitespace, dropping empty pieces.
pub fn split_whitespace(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

/// Quote one string the way Python's `repr` does.
fn repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Render a list of strings as Python prints it: `['1010']`.
pub fn python_list_repr<S: AsRef<str>>(items: &[S]) -> String {
    let inner: Vec<String> = items.iter().map(|s| repr(s.as_ref())).collect();
    format!("[{}]", inner.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_chars() {
        assert_eq!(slice_chars("0123", &SliceRange::new(0, 2)), "01");
        assert_eq!(slice_chars("0123", &SliceRange::new(-2, 4)), "23");
        assert_eq!(slice_chars("01", &SliceRange::new(0, 9)), "01");
        assert_eq!(slice_chars("", &SliceRange::new(0, 2)), "");
    }

    #[test]
    fn test_split_whitespace() {
        assert_eq!(split_whitespace("1010"), vec!["1010"]);
        assert_eq!(split_whitespace("  10 \t 10\n"), vec!["10", "10"]);
        assert!(split_whitespace("   ").is_empty());
    }

    #[test]
    fn test_python_list_repr() {
        assert_eq!(python_list_repr(&["1010"]), "['1010']");
        assert_eq!(python_list_repr(&["a", "b"]), "['a', 'b']");
        assert_eq!(python_list_repr::<&str>(&[]), "[]");
        assert_eq!(python_list_repr(&["it's"]), "[\"it's\"]");
        assert_eq!(python_list_repr(&["a\\b"]), "['a\\\\b']");
    }
}
