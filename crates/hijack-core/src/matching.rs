//! Hostname matching for the hijack target.

/// Compare a queried hostname against the configured target.
///
/// ASCII case-insensitive and bounded by the length of the *queried* name,
/// i.e. `strncasecmp(queried, target, strlen(queried)) == 0`. A queried name
/// that is a prefix of a longer target therefore matches, and an empty queried
/// name matches every target.
pub fn host_matches(queried: &[u8], target: &[u8]) -> bool {
    target.len() >= queried.len() && target[..queried.len()].eq_ignore_ascii_case(queried)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case() {
        assert!(host_matches(b"example.com", b"example.com"));
        assert!(host_matches(b"EXAMPLE.com", b"example.COM"));
    }

    #[test]
    fn test_different_hosts_do_not_match() {
        assert!(!host_matches(b"example.org", b"example.com"));
        assert!(!host_matches(b"cdn.example.com", b"example.com"));
    }

    #[test]
    fn test_queried_longer_than_target_does_not_match() {
        assert!(!host_matches(b"example.com.evil", b"example.com"));
        assert!(!host_matches(b"example.com.", b"example.com"));
    }

    #[test]
    fn test_queried_prefix_of_longer_target_matches() {
        // Only as many bytes as the queried name are compared.
        assert!(host_matches(b"example.com", b"example.com.evil"));
        assert!(host_matches(b"exa", b"example.com"));
    }

    #[test]
    fn test_empty_queried_name_matches_anything() {
        assert!(host_matches(b"", b"example.com"));
        assert!(host_matches(b"", b""));
    }
}
