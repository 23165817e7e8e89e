/// Strictness of a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Input running out inside a token is a match.
    Prefix,
    /// Input running out inside a token is `PrefixOnly`.
    #[default]
    Exact,
}
