use prism_core::QualifiedName;
use prism_symbols::DeclId;
use thiserror::Error;

/// Contract violations and broken-environment failures.
///
/// Nothing in this crate recovers from these: they indicate bugs in the
/// caller (or a broken oracle) and are propagated unchanged so the hosting
/// round fails loudly.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("`{0}` is not a class-like declaration")]
    NotAClass(QualifiedName),

    #[error("`{0}` is not the boxed form of a primitive")]
    NotBoxed(QualifiedName),

    #[error("`{0}` is missing from the symbol graph")]
    MissingSymbol(QualifiedName),

    #[error("declaration handle {0:?} is not live in this round")]
    StaleDeclaration(DeclId),

    #[error("a wildcard carries an extends bound or a super bound, never both")]
    ConflictingWildcardBounds,

    #[error("annotation value payload could not be resolved")]
    UnresolvedPayload,

    #[error("annotation type `{0}` is missing from the symbol graph")]
    MissingAnnotationType(QualifiedName),
}
