use std::cmp::Ordering;

/// Rough estimate: GPT-style token ≈ 4 chars (good enough for UI)
pub fn approx_tokens(s: &str) -> usize {
    s.chars().count() / 4
}

/// Case-insensitive ordering with the exact string as tie-breaker, so equal
/// names differing only in case still sort deterministically.
pub fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_a_quarter_of_chars() {
        assert_eq!(approx_tokens(""), 0);
        assert_eq!(approx_tokens("abcdefgh"), 2);
    }

    #[test]
    fn case_insensitive_order() {
        let mut names = vec!["b", "A", "a", "C"];
        names.sort_by(|a, b| cmp_case_insensitive(a, b));
        assert_eq!(names, vec!["A", "a", "b", "C"]);
    }
}
