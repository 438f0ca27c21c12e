use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{-?[0-9]+\}").unwrap());

/// Substitute positional placeholders in a template string.
///
/// - `{1}`, `{2}`, ... are replaced with the corresponding (1-based) argument,
///   or an empty string if there is no such argument.
/// - `{-1}` and `{-2}` produce a literal `{` and `}`.
/// - Any other index (including `{0}`) is replaced with an empty string.
///
/// ```
/// # use bridge_shared_util::format_template;
/// assert_eq!(format_template("by {1} from {2}", &["B", "C"]), "by B from C");
/// ```
pub fn format_template(template: &str, args: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let token = &caps[0];
            let index: i64 = token[1..token.len() - 1].parse().unwrap_or(0);
            match index {
                -1 => "{",
                -2 => "}",
                n if n > 0 => args.get(n as usize - 1).copied().unwrap_or(""),
                _ => "",
            }
            .to_string()
        })
        .into_owned()
}

#[cfg(test)]
mod test {
    use super::format_template;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_positional() {
        assert_eq!(format_template("{1} by {2}", &["A", "B"]), "A by B");
        assert_eq!(format_template("{2}, {1}, {2}", &["x", "y"]), "y, x, y");
    }

    #[test]
    fn test_missing_argument() {
        assert_eq!(format_template("from {1}{3}", &["C"]), "from C");
        insta::assert_snapshot!(format_template("[{0}]", &["ignored"]), @"[]");
    }

    #[test]
    fn test_escapes() {
        assert_eq!(format_template("{-1}1{-2} is {1}", &["literal"]), "{1} is literal");
        assert_eq!(format_template("{-3}", &[]), "");
    }

    #[test]
    fn test_non_placeholders_untouched() {
        assert_eq!(format_template("{a} {} {1", &["x"]), "{a} {} {1");
    }
}
