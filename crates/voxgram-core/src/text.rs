//! Utterance normalization.

/// Case-fold and collapse whitespace.
///
/// Grammar words and input utterances both go through this, so matching can
/// compare bytes and treat a single space as the only word boundary.
///
/// # Examples
/// ```
/// use voxgram_core::normalize;
/// assert_eq!(normalize("  I am\n  an   Antler "), "i am an antler");
/// ```
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.extend(word.chars().flat_map(char::to_lowercase));
    }
    out
}

