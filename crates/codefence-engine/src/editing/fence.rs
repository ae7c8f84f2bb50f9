use regex::Regex;
use std::sync::OnceLock;

/// Match a completed opening fence: three backticks, an optional language
/// and one trailing whitespace character, spanning the whole input.
///
/// Returns the language token, which is empty for a bare fence.
pub(crate) fn opening_fence(text: &str) -> Option<&str> {
    static FENCE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = FENCE_REGEX
        .get_or_init(|| Regex::new(r"^```([A-Za-z0-9_+#-]*)\s$").expect("Invalid fence regex"));
    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|language| language.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("``` ", Some(""))]
    #[case("```js ", Some("js"))]
    #[case("```c++ ", Some("c++"))]
    #[case("```\t", Some(""))]
    #[case("```", None)]
    #[case("`` ", None)]
    #[case("x``` ", None)]
    #[case("```js x ", None)]
    #[case("```\n ", None)]
    fn detects_opening_fences(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(opening_fence(input), expected);
    }
}
