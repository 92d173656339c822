#![allow(clippy::struct_excessive_bools)]
//! Scan-time configuration.

/// Options controlling tokenizer leniency and matcher output.
///
/// These are a thin pass-through to the underlying tokenizer plus the two
/// flags that are specific to path matching. Every field defaults to
/// `false`.
///
/// # Examples
///
/// ```
/// use jscan::ScanOptions;
///
/// let opts = ScanOptions {
///     allow_comments: true,
///     with_path: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    /// Allow `//` and `/* */` comments, treated as whitespace.
    ///
    /// # Default
    /// `false`
    pub allow_comments: bool,

    /// Skip string validation: copy string bytes verbatim instead of
    /// checking escape sequences and UTF-8 validity.
    ///
    /// # Default
    /// `false`
    pub dont_validate_strings: bool,

    /// Allow trailing bytes after the first complete top-level value
    /// instead of raising a parse error.
    ///
    /// # Default
    /// `false`
    pub allow_trailing_garbage: bool,

    /// Allow more than one top-level JSON value in the input, separated by
    /// whitespace (as in JSON Lines / concatenated JSON).
    ///
    /// # Default
    /// `false`
    pub allow_multiple_values: bool,

    /// Allow the input to end mid-value without raising a parse error.
    ///
    /// # Default
    /// `false`
    pub allow_partial_values: bool,

    /// Materialize the current path alongside each match record.
    ///
    /// When `false`, match records are not wrapped, which avoids the
    /// allocation of a path vector per match.
    ///
    /// # Default
    /// `false`
    pub with_path: bool,

    /// When materializing paths, intern object keys so repeated keys share
    /// one allocation across all matches in a scan, the closest idiomatic
    /// Rust equivalent of an interned symbol.
    ///
    /// Has no effect when `with_path` is `false`.
    ///
    /// # Default
    /// `false`
    pub symbolize_path_keys: bool,

    /// Request a verbose tokenizer diagnostic (surrounding input excerpt
    /// and line/column) instead of a terse one on parse failure.
    ///
    /// # Default
    /// `false`
    pub verbose_error: bool,
}
