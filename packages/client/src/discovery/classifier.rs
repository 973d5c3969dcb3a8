/// Sigil every Matrix user ID starts with
pub const USER_ID_SIGIL: char = '@';

/// Separator between localpart and server name
pub const SERVER_NAME_SEPARATOR: char = ':';

/// Whether `query` has the structure `@<localpart>:<domain>`.
///
/// Purely structural: no trimming, no case folding and no validation of the
/// localpart or server name grammar. `foo:example.org` is not identifier-shaped.
pub fn is_identifier_shaped(query: &str) -> bool {
    let Some(rest) = query.strip_prefix(USER_ID_SIGIL) else {
        return false;
    };

    rest.char_indices()
        .any(|(i, c)| c == SERVER_NAME_SEPARATOR && i > 0 && i + c.len_utf8() < rest.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("@a:b.com", true)]
    #[case("@alice:example.org", true)]
    #[case("@alice:example.org:8448", true)]
    #[case("@a:b", true)]
    #[case("@ünï:cödé.org", true)]
    #[case("@:b.com", false)]
    #[case("@a:", false)]
    #[case("@", false)]
    #[case("@alice", false)]
    #[case("foo:example.org", false)]
    #[case("alice", false)]
    #[case("AAA", false)]
    #[case("some query", false)]
    #[case("", false)]
    #[case(" @a:b.com", false)]
    fn test_is_identifier_shaped(#[case] query: &str, #[case] expected: bool) {
        assert_eq!(is_identifier_shaped(query), expected, "query: {query:?}");
    }

    #[test]
    fn test_any_separator_position_counts() {
        // the second ':' has ":a" before it and "b" after it
        assert!(is_identifier_shaped("@:a:b"));
    }
}
