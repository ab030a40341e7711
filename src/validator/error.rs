#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Operation name `{0}` is used by more than one operation")]
    DuplicateOperationName(String),

    #[error("Anonymous operations are only allowed when a document defines exactly one operation")]
    LoneAnonymousOperationViolation,

    #[error("Fragment name `{0}` is used by more than one fragment")]
    DuplicateFragmentName(String),

    #[error("Unknown fragment `{0}`")]
    UnknownFragment(String),
}
