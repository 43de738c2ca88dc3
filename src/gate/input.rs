//! Boundary handling for values coming from the page

/// Integer prefix of the raw input: an optional leading minus and digits,
/// stopping at the first other character
pub fn sanitize_answer(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut out = String::with_capacity(trimmed.len());
    for (i, ch) in trimmed.chars().enumerate() {
        if ch.is_ascii_digit() || (i == 0 && ch == '-') {
            out.push(ch);
        } else {
            break;
        }
    }
    out
}

/// Destination after a passed check. Absent or empty falls back to `default`.
pub fn resolve_redirect(param: Option<&str>, default: &str) -> String {
    match param {
        Some(target) if !target.is_empty() => target.to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_digits() {
        assert_eq!(sanitize_answer("12"), "12");
        assert_eq!(sanitize_answer(" 12 "), "12");
        assert_eq!(sanitize_answer("-3"), "-3");
        assert_eq!(sanitize_answer("3-"), "3");
        assert_eq!(sanitize_answer("abc"), "");
        assert_eq!(sanitize_answer("7.9"), "7");
        assert_eq!(sanitize_answer("1 2"), "1");
    }

    #[test]
    fn test_redirect_default_when_missing() {
        assert_eq!(resolve_redirect(None, "/dashboard"), "/dashboard");
        assert_eq!(resolve_redirect(Some(""), "/dashboard"), "/dashboard");
    }

    #[test]
    fn test_redirect_used_verbatim() {
        assert_eq!(
            resolve_redirect(Some("/reports?id=4"), "/dashboard"),
            "/reports?id=4"
        );
    }
}
