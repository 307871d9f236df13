//! The legacy annotation-processing model, projected from the Prism symbol
//! graph.
//!
//! Downstream code generators were written against an erased-generic,
//! primitive/boxed, invariant world. This crate faithfully projects the
//! richer source-analysis model into that world without losing the semantics
//! generators rely on:
//!
//! - primitive vs. boxed distinctions driven by nullability
//! - type-argument substitution through supertype walks
//! - erasure, and subtyping with array and bounded-type-variable rules
//! - repeatable-annotation grouping into synthetic containers
//! - annotation-value adaptation preserving the visitor contract
//!
//! The mirror family is a tagged sum ([`TypeMirror`]); [`Types`] is the
//! projection service over a borrowed [`prism_symbols::SymbolOracle`]. One
//! `Types` instance serves one single-threaded processing round.
//!
//! There is no recovery inside this crate: contract violations surface to
//! the caller as [`MirrorError`]s and should fail the round loudly.

mod annotation;
mod element;
mod error;
mod mirror;
mod project;
mod types;

pub use annotation::{AnnotationMirror, AnnotationValue, AnnotationValueVisitor};
pub use element::{ClassElement, Element, ElementKind, ExecutableElement, VariableElement};
pub use error::MirrorError;
pub use mirror::{
    DeclaredType, ExecutableType, NoTypeKind, PrimitiveKind, TypeKind, TypeMirror, TypeVariable,
    WildcardType,
};
pub use types::{boxed_class_name, boxed_kind, Types};
