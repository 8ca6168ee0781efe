//! Text normalization applied before vectorization

/// Lowercase `text` and drop every ASCII punctuation character.
///
/// Whitespace, digits and non-ASCII symbols are kept as they are, so
/// `"FREE! Win $$$ NOW!!"` becomes `"free win  now"`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}
