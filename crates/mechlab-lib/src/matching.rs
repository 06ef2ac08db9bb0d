//! Case-insensitive keys and fuzzy "did you mean" suggestions for catalog
//! lookups.

/// Minimum Jaro-Winkler similarity for a candidate to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Normalize a catalog key for case-insensitive lookup.
pub(crate) fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Return up to `limit` candidates similar to `needle`, best first.
pub(crate) fn fuzzy_matches<'a, I>(needle: &str, candidates: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = normalize_key(needle);
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            (
                strsim::jaro_winkler(&needle, &normalize_key(candidate)),
                candidate,
            )
        })
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
