//! URL helpers for stylesheet references.

/// Join URL path segments onto a prefix with `/`.
///
/// Mirrors plain path joining: an empty prefix yields the bare segments,
/// trailing slashes on the prefix are collapsed.
///
/// # Examples
/// ```ignore
/// url_join("../", &["Roboto"])               -> "../Roboto"
/// url_join("../fonts", &["Roboto", "Roboto"]) -> "../fonts/Roboto/Roboto"
/// url_join("", &["Roboto"])                  -> "Roboto"
/// url_join("/", &["Roboto"])                 -> "/Roboto"
/// ```
pub fn url_join(prefix: &str, segments: &[&str]) -> String {
    let tail = segments.join("/");
    if prefix.is_empty() {
        return tail;
    }
    format!("{}/{}", prefix.trim_end_matches('/'), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        assert_eq!(url_join("../", &["Roboto"]), "../Roboto");
        assert_eq!(url_join("..", &["Roboto"]), "../Roboto");
        assert_eq!(url_join("../fonts/", &["Roboto", "Roboto"]), "../fonts/Roboto/Roboto");
        assert_eq!(url_join("", &["Roboto"]), "Roboto");
        assert_eq!(url_join("/", &["Roboto"]), "/Roboto");
        assert_eq!(url_join("https://cdn.example.com/f/", &["A"]), "https://cdn.example.com/f/A");
    }
}
