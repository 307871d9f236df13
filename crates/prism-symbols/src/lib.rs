//! The source-analysis symbol graph consumed by the Prism bridge.
//!
//! This crate has two roles:
//! 1) The data model of the modern source-analysis world: declarations with
//!    first-class generics, nullability marks on type references, companion
//!    objects, enum entries, and annotation payloads.
//! 2) The [`SymbolOracle`] trait, the narrow surface the adapter layer is
//!    allowed to consult, plus [`SymbolStore`], an in-memory implementation
//!    used by tests and by hosts that drive the bridge without a full
//!    frontend.
//!
//! Symbols are borrowed from the oracle for the lifetime of a processing
//! round; adapters wrap them on demand and never own them.

use std::fmt;

use prism_core::{Name, QualifiedName};

mod store;

pub use store::SymbolStore;

/// Identifier for a declaration in the symbol graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub u32);

impl DeclId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclId({})", self.0)
    }
}

/// Identifier for a declared type parameter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

impl TypeParamId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for TypeParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeParamId({})", self.0)
    }
}

/// What a declaration is.
///
/// `Object` covers singleton declarations, companion scopes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Interface,
    Object,
    Enum,
    EnumEntry,
    Annotation,
    Function,
    Property,
}

impl DeclKind {
    /// Whether the declaration can stand behind a declared type.
    pub fn is_class_like(self) -> bool {
        !matches!(self, DeclKind::Function | DeclKind::Property)
    }
}

/// A type as written at a use site, referenced by qualified name.
///
/// References resolve through [`SymbolOracle::resolve`] into
/// [`ResolvedType`] snapshots; unresolvable names simply fail to resolve.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: QualifiedName,
    pub args: Vec<TypeRefArg>,
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(name: impl Into<QualifiedName>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameterized(name: impl Into<QualifiedName>, args: Vec<TypeRefArg>) -> Self {
        Self {
            name: name.into(),
            args,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRefArg {
    Type(TypeRef),
    Param(TypeParamId),
    Star,
}

/// A resolved use of a type: declaration handle, arguments, and the
/// nullability mark of the source type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedType {
    pub decl: DeclId,
    pub args: Vec<ResolvedArg>,
    pub nullable: bool,
}

impl ResolvedType {
    pub fn new(decl: DeclId) -> Self {
        Self {
            decl,
            args: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameterized(decl: DeclId, args: Vec<ResolvedArg>) -> Self {
        Self {
            decl,
            args,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedArg {
    Type(ResolvedType),
    Param(TypeParamId),
    Star,
}

/// A declaration viewed with all type parameters erased to their bounds.
///
/// Only the declaration identity survives; raw-inheritance questions are
/// asked of this shape via [`SymbolOracle::raw_assignable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarType {
    pub decl: DeclId,
}

#[derive(Debug, Clone)]
pub struct TypeParamData {
    pub name: Name,
    pub bounds: Vec<TypeRef>,
}

#[derive(Debug, Clone)]
pub struct PropertyData {
    pub name: Name,
    pub ty: TypeRef,
}

#[derive(Debug, Clone)]
pub struct ParamData {
    pub name: Name,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Function,
    Getter,
    Setter,
}

#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: Name,
    pub kind: FunctionKind,
    pub params: Vec<ParamData>,
    pub return_type: TypeRef,
}

/// A raw annotation use: the annotation type plus its arguments in source
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationData {
    pub ty: QualifiedName,
    pub args: Vec<AnnotationArg>,
}

impl AnnotationData {
    pub fn new(ty: impl Into<QualifiedName>) -> Self {
        Self {
            ty: ty.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<Name>, value: ArgPayload) -> Self {
        self.args.push(AnnotationArg {
            name: name.into(),
            value,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationArg {
    pub name: Name,
    pub value: ArgPayload,
}

/// The raw payload of one annotation argument.
///
/// `Unresolved` stands for a payload the frontend could not type; the
/// adapter layer treats it as a caller bug, not a recoverable condition.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgPayload {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Char(char),
    Float(f32),
    Double(f64),
    String(String),
    /// A declaration reference: a class literal or an enum entry.
    Decl(DeclId),
    /// A resolved type, e.g. a class literal carried as a type snapshot.
    Type(ResolvedType),
    Annotation(Box<AnnotationData>),
    List(Vec<ArgPayload>),
    Unresolved,
}

/// A declaration in the symbol graph.
#[derive(Debug, Clone)]
pub struct DeclData {
    pub name: QualifiedName,
    pub kind: DeclKind,
    pub type_params: Vec<TypeParamId>,
    /// Direct supertype references, in declaration order.
    pub supertypes: Vec<TypeRef>,
    /// Nested declarations (inner classes, enum entries, companions).
    pub nested: Vec<DeclId>,
    pub properties: Vec<PropertyData>,
    pub functions: Vec<FunctionData>,
    /// Annotations on the declaration, in source order.
    pub annotations: Vec<AnnotationData>,
}

impl DeclData {
    pub fn new(name: impl Into<QualifiedName>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            type_params: Vec::new(),
            supertypes: Vec::new(),
            nested: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

/// Handles for the built-in types every oracle must know.
#[derive(Debug, Clone, Copy)]
pub struct Builtins {
    pub unit: DeclId,
    pub boolean: DeclId,
    pub byte: DeclId,
    pub short: DeclId,
    pub int: DeclId,
    pub long: DeclId,
    pub char: DeclId,
    pub float: DeclId,
    pub double: DeclId,
}

/// The narrow surface the adapter layer consults.
///
/// Implementations are expected to be driven from a single thread for the
/// duration of a processing round; nothing here suspends.
pub trait SymbolOracle {
    /// Declaration data for a handle, if the handle is live in this round.
    fn declaration(&self, id: DeclId) -> Option<&DeclData>;

    /// Data for a declared type parameter.
    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamData>;

    /// Look up a declaration by qualified name.
    fn lookup(&self, name: &QualifiedName) -> Option<DeclId>;

    /// Resolve a use-site reference to a snapshot carrying arguments, the
    /// nullability mark, and the declaration handle.
    fn resolve(&self, ty: &TypeRef) -> Option<ResolvedType>;

    /// The star-projected shape of a declaration.
    fn star_projection(&self, decl: DeclId) -> StarType;

    /// Raw-inheritance test between two star-projected types, ignoring
    /// argument detail.
    fn raw_assignable(&self, sub: &StarType, sup: &StarType) -> bool;

    /// Built-in handles: unit plus the eight numeric/boolean/char types.
    fn builtins(&self) -> &Builtins;
}
