//! The legacy type-mirror family.
//!
//! Mirrors are a tagged sum; the legacy inheritance hierarchy exists only at
//! the external boundary. Mirrors do not own the underlying symbols and may
//! be freely cloned; equality at the element level is by qualified name,
//! with full structural type equality delegated to [`crate::Types`].

use std::fmt;

use prism_core::Name;
use prism_symbols::{ResolvedType, TypeParamId};

use crate::element::ClassElement;
use crate::types::Types;

/// The eight primitive kinds of the legacy model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
}

/// Pseudo-types: `void`, the absence of a type, and package "types".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoTypeKind {
    Void,
    None,
    Package,
}

/// The kind vocabulary exposed to downstream generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
    None,
    Package,
    Null,
    Array,
    Declared,
    Wildcard,
    TypeVariable,
    Executable,
}

/// A type in the legacy model.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeMirror {
    Primitive(PrimitiveKind),
    NoType(NoTypeKind),
    Null,
    Array(Box<TypeMirror>),
    Wildcard(Box<WildcardType>),
    Variable(TypeVariable),
    Declared(DeclaredType),
    Executable(Box<ExecutableType>),
}

impl TypeMirror {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeMirror::Primitive(PrimitiveKind::Boolean) => TypeKind::Boolean,
            TypeMirror::Primitive(PrimitiveKind::Byte) => TypeKind::Byte,
            TypeMirror::Primitive(PrimitiveKind::Short) => TypeKind::Short,
            TypeMirror::Primitive(PrimitiveKind::Int) => TypeKind::Int,
            TypeMirror::Primitive(PrimitiveKind::Long) => TypeKind::Long,
            TypeMirror::Primitive(PrimitiveKind::Char) => TypeKind::Char,
            TypeMirror::Primitive(PrimitiveKind::Float) => TypeKind::Float,
            TypeMirror::Primitive(PrimitiveKind::Double) => TypeKind::Double,
            TypeMirror::NoType(NoTypeKind::Void) => TypeKind::Void,
            TypeMirror::NoType(NoTypeKind::None) => TypeKind::None,
            TypeMirror::NoType(NoTypeKind::Package) => TypeKind::Package,
            TypeMirror::Null => TypeKind::Null,
            TypeMirror::Array(_) => TypeKind::Array,
            TypeMirror::Wildcard(_) => TypeKind::Wildcard,
            TypeMirror::Variable(_) => TypeKind::TypeVariable,
            // A declared mirror is declared even when its element would map
            // to a primitive in isolation; primitive projection is decided
            // only at projection time from the source symbol.
            TypeMirror::Declared(_) => TypeKind::Declared,
            TypeMirror::Executable(_) => TypeKind::Executable,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeMirror::Primitive(_))
    }

    /// Whether this mirror is a reference type in the legacy sense.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            TypeMirror::Declared(_) | TypeMirror::Array(_) | TypeMirror::Variable(_)
        )
    }

    pub fn as_declared(&self) -> Option<&DeclaredType> {
        match self {
            TypeMirror::Declared(declared) => Some(declared),
            _ => None,
        }
    }

    pub fn array_component(&self) -> Option<&TypeMirror> {
        match self {
            TypeMirror::Array(component) => Some(component.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMirror::Primitive(kind) => f.write_str(match kind {
                PrimitiveKind::Boolean => "boolean",
                PrimitiveKind::Byte => "byte",
                PrimitiveKind::Short => "short",
                PrimitiveKind::Int => "int",
                PrimitiveKind::Long => "long",
                PrimitiveKind::Char => "char",
                PrimitiveKind::Float => "float",
                PrimitiveKind::Double => "double",
            }),
            TypeMirror::NoType(NoTypeKind::Void) => f.write_str("void"),
            TypeMirror::NoType(NoTypeKind::None) => f.write_str("none"),
            TypeMirror::NoType(NoTypeKind::Package) => f.write_str("package"),
            TypeMirror::Null => f.write_str("null"),
            TypeMirror::Array(component) => write!(f, "{component}[]"),
            TypeMirror::Wildcard(wildcard) => match (&wildcard.extends_bound, &wildcard.super_bound)
            {
                (Some(upper), _) => write!(f, "? extends {upper}"),
                (_, Some(lower)) => write!(f, "? super {lower}"),
                (None, None) => f.write_str("?"),
            },
            TypeMirror::Variable(variable) => f.write_str(variable.name.as_str()),
            TypeMirror::Declared(declared) => declared.fmt(f),
            TypeMirror::Executable(exec) => {
                f.write_str("(")?;
                for (i, param) in exec.param_types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    param.fmt(f)?;
                }
                write!(f, "){}", exec.return_type)
            }
        }
    }
}

/// A wildcard type argument. At most one bound is ever set.
#[derive(Debug, Clone, PartialEq)]
pub struct WildcardType {
    pub extends_bound: Option<TypeMirror>,
    pub super_bound: Option<TypeMirror>,
}

/// A named placeholder bound by a declaration's type parameters.
///
/// Distinct from wildcards; equality is by parameter name within its
/// declaring scope.
#[derive(Debug, Clone)]
pub struct TypeVariable {
    pub(crate) param: TypeParamId,
    pub(crate) name: Name,
}

impl TypeVariable {
    pub(crate) fn new(param: TypeParamId, name: Name) -> Self {
        Self { param, name }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn param(&self) -> TypeParamId {
        self.param
    }
}

impl PartialEq for TypeVariable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// The projection of a method or accessor signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutableType {
    pub param_types: Vec<TypeMirror>,
    pub return_type: TypeMirror,
}

/// A class/interface type reference, possibly parameterised.
///
/// One of three shapes:
/// - bound to a resolved source-type snapshot, so arguments survive;
/// - carrying an explicit argument list;
/// - neither (raw), in which case the argument accessor yields the
///   element's type parameters as [`TypeVariable`]s.
#[derive(Debug, Clone)]
pub struct DeclaredType {
    element: ClassElement,
    resolved: Option<ResolvedType>,
    args: Option<Vec<TypeMirror>>,
}

impl DeclaredType {
    pub(crate) fn raw(element: ClassElement) -> Self {
        Self {
            element,
            resolved: None,
            args: None,
        }
    }

    pub(crate) fn with_snapshot(element: ClassElement, resolved: ResolvedType) -> Self {
        Self {
            element,
            resolved: Some(resolved),
            args: None,
        }
    }

    pub(crate) fn with_args(element: ClassElement, args: Vec<TypeMirror>) -> Self {
        Self {
            element,
            resolved: None,
            args: Some(args),
        }
    }

    pub fn element(&self) -> &ClassElement {
        &self.element
    }

    /// The resolved source-type snapshot this mirror was projected from, if
    /// any.
    pub fn resolved(&self) -> Option<&ResolvedType> {
        self.resolved.as_ref()
    }

    /// Whether this mirror is the raw form: no explicit arguments and no
    /// snapshot to materialise them from.
    pub fn is_raw(&self) -> bool {
        self.args.is_none() && self.resolved.is_none()
    }

    /// Type arguments in declaration order.
    ///
    /// Explicit arguments win; otherwise arguments are materialised from the
    /// snapshot (projecting each, wrapping type parameters as variables);
    /// otherwise the element's own type parameters are returned as
    /// variables.
    pub fn type_arguments(&self, types: &Types<'_>) -> Vec<TypeMirror> {
        if let Some(args) = &self.args {
            return args.clone();
        }
        if let Some(resolved) = &self.resolved {
            return resolved
                .args
                .iter()
                .map(|arg| types.project_argument(arg))
                .collect();
        }
        types.type_params_as_variables(self.element.decl())
    }
}

impl PartialEq for DeclaredType {
    /// Element identity only; full type equality (argument recursion) is
    /// [`Types::is_same_type`]'s job.
    fn eq(&self, other: &Self) -> bool {
        self.element == other.element
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element.qualified_name())?;
        if let Some(args) = &self.args {
            if !args.is_empty() {
                f.write_str("<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    arg.fmt(f)?;
                }
                f.write_str(">")?;
            }
        }
        Ok(())
    }
}
