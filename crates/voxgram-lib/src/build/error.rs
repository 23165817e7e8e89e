//! Errors raised while turning a grammar document into an expansion graph.

/// Why a grammar document could not be built.
///
/// The first error aborts the build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BuildError {
    #[error("invalid grammar document: expected <grammar>, found <{0}>")]
    InvalidDocument(String),

    #[error("grammar declares no root rule")]
    NoRoot,

    #[error("root rule `{0}` is not defined")]
    RootNotFound(String),

    #[error("rules must have an id")]
    UnidentifiableRule,

    #[error("rule `{0}` is defined more than once")]
    DuplicateRule(String),

    #[error("rule references must have a non-empty uri")]
    EmptyRuleRef,

    #[error("rule reference `{0}` is not local")]
    NonLocalRuleRef(String),

    #[error("unknown special rule `{0}`")]
    UnknownSpecialRule(String),

    #[error("invalid repeat specifier `{spec}`: {reason}")]
    InvalidRepeat { spec: String, reason: &'static str },

    #[error("invalid weight `{0}`")]
    InvalidWeight(String),

    #[error("<one-of> may only contain <item>, found {0}")]
    ChoiceRequiresItems(String),

    #[error("unknown element <{0}>")]
    UnknownElement(String),

    #[error("unresolved rule references: {}", .0.join(", "))]
    UnresolvedRuleRefs(Vec<String>),

    /// Expansion exceeded `max_nodes` (usually deep recursion).
    #[error("grammar expands to more than {0} nodes")]
    GrammarTooLarge(usize),
}
