//! Storage-class rewriting for converter-produced XBM text.

/// Declaration emitted by image tools: `static char <id>_bits[] = {`.
pub const MUTABLE_STORAGE: &str = "static char";
/// Declaration the firmware expects: `const uint8_t <id>_bits[] = {`.
pub const IMMUTABLE_STORAGE: &str = "const uint8_t";

/// Replaces every mutable storage-class token with the immutable one.
///
/// Text already declared `const uint8_t` passes through unchanged. Returns
/// `None` when neither token is present, so a format change in the converter
/// surfaces instead of silently producing a mutable array.
pub fn retype_storage_class(source: &str) -> Option<String> {
    if source.contains(MUTABLE_STORAGE) {
        return Some(source.replace(MUTABLE_STORAGE, IMMUTABLE_STORAGE));
    }

    declares_immutable(source).then(|| source.to_owned())
}

/// Whether the `_bits` array declaration uses the immutable token.
pub fn declares_immutable(source: &str) -> bool {
    source
        .lines()
        .find(|line| line.contains("_bits[]"))
        .is_some_and(|line| line.trim_start().starts_with(IMMUTABLE_STORAGE))
}
