//! "Did you mean" suggestions for misspelled keys.

use similar::TextDiff;

/// Minimum similarity for a candidate to be suggested.
pub const CUTOFF: f32 = 0.6;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 3;

/// Similarity ratio of two strings in `0.0..=1.0`.
pub fn similarity(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Known names close to `word`, best match first.
///
/// Ties are broken alphabetically.
///
/// ```
/// use dj_typed_settings::suggest::close_matches;
///
/// let known = ["NAME", "ENGINE", "HOST"];
/// assert_eq!(close_matches("NAEM", known), vec!["NAME"]);
/// ```
pub fn close_matches<'a, I>(word: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scored: Vec<(f32, &'a str)> = candidates
        .into_iter()
        .map(|c| (similarity(word, c), c))
        .filter(|(score, _)| *score >= CUTOFF)
        .collect();

    scored.sort_by(|(sa, a), (sb, b)| sb.total_cmp(sa).then_with(|| a.cmp(b)));
    scored.dedup_by(|(_, a), (_, b)| a == b);
    scored
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, c)| c)
        .collect()
}
