//! Validation of language codes and fact identifiers.
//!
//! Both end up as path components under the store root, so anything that
//! could escape the root (`..`, separators) or collide with the document
//! extension is rejected before touching the filesystem.

/// Longest accepted key, in bytes.
pub const MAX_KEY_LEN: usize = 64;

/// Whether `key` is an acceptable language code or fact identifier.
///
/// Accepts 1 to [`MAX_KEY_LEN`] ASCII letters, digits, `-` and `_`.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        assert!(is_valid_key("ru"));
        assert!(is_valid_key("abc123"));
        assert!(is_valid_key("zh-Hant"));
        assert!(is_valid_key("a_b"));
    }

    #[test]
    fn rejects_path_tricks() {
        assert!(!is_valid_key(""));
        assert!(!is_valid_key(".."));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key("a\\b"));
        assert!(!is_valid_key("abc.json"));
        assert!(!is_valid_key("white space"));
    }

    #[test]
    fn rejects_non_ascii_and_overlong() {
        assert!(!is_valid_key("факт"));
        assert!(!is_valid_key(&"a".repeat(MAX_KEY_LEN + 1)));
        assert!(is_valid_key(&"a".repeat(MAX_KEY_LEN)));
    }
}
