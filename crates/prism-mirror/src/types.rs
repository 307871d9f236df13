//! The type-utility service of the legacy model.
//!
//! Mirrors are compared structurally here; for cross-declaration questions
//! the service consults the oracle's star-projected assignability primitive
//! and re-checks invariant type arguments itself.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};

use prism_core::QualifiedName;
use prism_symbols::{SymbolOracle, TypeParamId};
use tracing::{debug, trace};

use crate::element::{ClassElement, Element};
use crate::error::MirrorError;
use crate::mirror::{
    DeclaredType, ExecutableType, NoTypeKind, PrimitiveKind, TypeMirror, TypeVariable,
    WildcardType,
};

/// Declared types every reference array is a subtype of.
const ARRAY_SUPERTYPES: [&str; 3] = ["java.lang.Object", "java.lang.Cloneable", "java.io.Serializable"];

const TOP_CLASS: &str = "java.lang.Object";

/// The canonical boxed class for a primitive kind.
pub fn boxed_class_name(kind: PrimitiveKind) -> &'static str {
    match kind {
        PrimitiveKind::Boolean => "java.lang.Boolean",
        PrimitiveKind::Byte => "java.lang.Byte",
        PrimitiveKind::Short => "java.lang.Short",
        PrimitiveKind::Int => "java.lang.Integer",
        PrimitiveKind::Long => "java.lang.Long",
        PrimitiveKind::Char => "java.lang.Character",
        PrimitiveKind::Float => "java.lang.Float",
        PrimitiveKind::Double => "java.lang.Double",
    }
}

/// The primitive kind a boxed class unboxes to, if any.
pub fn boxed_kind(name: &QualifiedName) -> Option<PrimitiveKind> {
    Some(match name.to_dotted().as_str() {
        "java.lang.Boolean" => PrimitiveKind::Boolean,
        "java.lang.Byte" => PrimitiveKind::Byte,
        "java.lang.Short" => PrimitiveKind::Short,
        "java.lang.Integer" => PrimitiveKind::Int,
        "java.lang.Long" => PrimitiveKind::Long,
        "java.lang.Character" => PrimitiveKind::Char,
        "java.lang.Float" => PrimitiveKind::Float,
        "java.lang.Double" => PrimitiveKind::Double,
        _ => return None,
    })
}

/// The projection service: type relations, erasure, boxing, supertype
/// enumeration, and mirror construction over a borrowed symbol oracle.
///
/// One instance serves one processing round, driven from a single thread;
/// the primitive mirror cache is round-local by design, so no locking is
/// involved.
pub struct Types<'o> {
    pub(crate) oracle: &'o dyn SymbolOracle,
    primitives: RefCell<HashMap<PrimitiveKind, TypeMirror>>,
}

impl<'o> Types<'o> {
    pub fn new(oracle: &'o dyn SymbolOracle) -> Self {
        Self {
            oracle,
            primitives: RefCell::new(HashMap::new()),
        }
    }

    pub fn oracle(&self) -> &'o dyn SymbolOracle {
        self.oracle
    }

    // === Constructors ========================================================

    /// The cached primitive mirror for `kind`. The cache is populated on
    /// first use of each kind.
    pub fn primitive_type(&self, kind: PrimitiveKind) -> TypeMirror {
        if let Some(mirror) = self.primitives.borrow().get(&kind) {
            return mirror.clone();
        }
        let mirror = TypeMirror::Primitive(kind);
        self.primitives
            .borrow_mut()
            .insert(kind, mirror.clone());
        mirror
    }

    pub fn no_type(&self, kind: NoTypeKind) -> TypeMirror {
        TypeMirror::NoType(kind)
    }

    pub fn null_type(&self) -> TypeMirror {
        TypeMirror::Null
    }

    pub fn array_type(&self, component: TypeMirror) -> TypeMirror {
        TypeMirror::Array(Box::new(component))
    }

    /// A wildcard with at most one bound; both may be absent.
    pub fn wildcard_type(
        &self,
        extends_bound: Option<TypeMirror>,
        super_bound: Option<TypeMirror>,
    ) -> Result<TypeMirror, MirrorError> {
        if extends_bound.is_some() && super_bound.is_some() {
            return Err(MirrorError::ConflictingWildcardBounds);
        }
        Ok(TypeMirror::Wildcard(Box::new(WildcardType {
            extends_bound,
            super_bound,
        })))
    }

    /// A declared mirror over `element`; no arguments produce the raw form.
    pub fn declared_type(&self, element: &ClassElement, args: Vec<TypeMirror>) -> TypeMirror {
        if args.is_empty() {
            TypeMirror::Declared(DeclaredType::raw(element.clone()))
        } else {
            TypeMirror::Declared(DeclaredType::with_args(element.clone(), args))
        }
    }

    // === Boxing ==============================================================

    /// The element of the canonical boxed class for `kind`.
    ///
    /// A missing boxed class indicates a broken oracle environment and is
    /// reported, not papered over.
    pub fn boxed_class(&self, kind: PrimitiveKind) -> Result<ClassElement, MirrorError> {
        let name = QualifiedName::from_dotted(boxed_class_name(kind));
        let decl = self
            .oracle
            .lookup(&name)
            .ok_or(MirrorError::MissingSymbol(name))?;
        ClassElement::wrap(self.oracle, decl)
    }

    /// The primitive a boxed declared type unboxes to.
    pub fn unboxed_type(&self, declared: &DeclaredType) -> Result<TypeMirror, MirrorError> {
        let kind = boxed_kind(declared.element().qualified_name())
            .ok_or_else(|| MirrorError::NotBoxed(declared.element().qualified_name().clone()))?;
        Ok(self.primitive_type(kind))
    }

    // === Relations ===========================================================

    pub fn is_same_type(&self, a: &TypeMirror, b: &TypeMirror) -> bool {
        match (a, b) {
            (TypeMirror::Primitive(x), TypeMirror::Primitive(y)) => x == y,
            (TypeMirror::NoType(x), TypeMirror::NoType(y)) => x == y,
            (TypeMirror::Null, TypeMirror::Null) => true,
            (TypeMirror::Array(x), TypeMirror::Array(y)) => self.is_same_type(x, y),
            (TypeMirror::Wildcard(x), TypeMirror::Wildcard(y)) => {
                self.same_opt(&x.extends_bound, &y.extends_bound)
                    && self.same_opt(&x.super_bound, &y.super_bound)
            }
            // Parameter name within the declaring scope.
            (TypeMirror::Variable(x), TypeMirror::Variable(y)) => x.name() == y.name(),
            (TypeMirror::Declared(x), TypeMirror::Declared(y)) => {
                if x.element() != y.element() {
                    return false;
                }
                let x_args = x.type_arguments(self);
                let y_args = y.type_arguments(self);
                x_args.len() == y_args.len()
                    && x_args
                        .iter()
                        .zip(&y_args)
                        .all(|(xa, ya)| self.is_same_type(xa, ya))
            }
            (TypeMirror::Executable(x), TypeMirror::Executable(y)) => {
                x.param_types.len() == y.param_types.len()
                    && x.param_types
                        .iter()
                        .zip(&y.param_types)
                        .all(|(xp, yp)| self.is_same_type(xp, yp))
                    && self.is_same_type(&x.return_type, &y.return_type)
            }
            _ => false,
        }
    }

    fn same_opt(&self, a: &Option<TypeMirror>, b: &Option<TypeMirror>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(x), Some(y)) => self.is_same_type(x, y),
            _ => false,
        }
    }

    pub fn is_subtype(&self, a: &TypeMirror, b: &TypeMirror) -> bool {
        if self.is_same_type(a, b) {
            return true;
        }

        match (a, b) {
            // The null type sits below every reference type.
            (TypeMirror::Null, other) if other.is_reference() => true,

            (TypeMirror::Array(sub_elem), TypeMirror::Array(super_elem)) => {
                // Primitive element arrays are invariant.
                if sub_elem.is_primitive() || super_elem.is_primitive() {
                    self.is_same_type(sub_elem, super_elem)
                } else {
                    self.is_subtype(sub_elem, super_elem)
                }
            }

            (TypeMirror::Array(_), TypeMirror::Declared(declared)) => {
                let name = declared.element().qualified_name().to_dotted();
                ARRAY_SUPERTYPES.contains(&name.as_str())
            }

            (TypeMirror::Declared(_), TypeMirror::Array(_)) => false,

            (TypeMirror::Declared(sub), TypeMirror::Declared(sup)) => {
                self.declared_subtype(sub, sup)
            }

            (TypeMirror::Variable(variable), other) => match self.variable_upper_bound(variable) {
                Some(bound) => self.is_subtype(&bound, other),
                None => false,
            },

            // NoType and primitives relate to nothing but themselves.
            _ => false,
        }
    }

    /// Subtyping plus boxing conversions.
    pub fn is_assignable(&self, from: &TypeMirror, to: &TypeMirror) -> bool {
        if self.is_same_type(from, to) {
            return true;
        }

        match (from, to) {
            (TypeMirror::Primitive(kind), TypeMirror::Declared(declared)) => {
                declared.element().qualified_name().to_dotted() == boxed_class_name(*kind)
            }
            (TypeMirror::Declared(declared), TypeMirror::Primitive(kind)) => {
                boxed_kind(declared.element().qualified_name()) == Some(*kind)
            }
            (TypeMirror::Declared(sub), TypeMirror::Declared(sup)) => {
                self.declared_subtype(sub, sup)
            }
            _ => self.is_subtype(from, to),
        }
    }

    fn declared_subtype(&self, sub: &DeclaredType, sup: &DeclaredType) -> bool {
        let sub_star = self.oracle.star_projection(sub.element().decl());
        let sup_star = self.oracle.star_projection(sup.element().decl());
        if !self.oracle.raw_assignable(&sub_star, &sup_star) {
            return false;
        }
        self.type_args_compatible(sub, sup)
    }

    /// The first upper bound of a variable, or the top class when unbounded.
    fn variable_upper_bound(&self, variable: &TypeVariable) -> Option<TypeMirror> {
        let first = self
            .oracle
            .type_param(variable.param())
            .and_then(|data| data.bounds.first().cloned());
        match first {
            Some(bound) => {
                let resolved = self.oracle.resolve(&bound)?;
                Some(self.project(&resolved))
            }
            // A missing top class means the oracle environment is broken.
            None => Some(
                self.top_class_mirror()
                    .unwrap_or_else(|err| panic!("broken oracle environment: {err}")),
            ),
        }
    }

    // === Invariant type-argument compatibility ===============================

    /// Invariant compatibility of type arguments between two declared types
    /// whose raw-inheritance check already passed.
    fn type_args_compatible(&self, sub: &DeclaredType, sup: &DeclaredType) -> bool {
        let sup_args = sup.type_arguments(self);

        // A raw target (no arguments, or nothing but unresolved variables)
        // behaves like erasure: any instantiation is compatible.
        if sup_args.is_empty()
            || sup_args
                .iter()
                .all(|arg| matches!(arg, TypeMirror::Variable(_)))
        {
            return true;
        }

        if sub.element() == sup.element() {
            let sub_args = sub.type_arguments(self);
            // Raw source against a parameterised target: unchecked, admitted.
            if sub_args
                .iter()
                .all(|arg| matches!(arg, TypeMirror::Variable(_)))
            {
                return true;
            }
            if sub_args.len() != sup_args.len() {
                debug!(
                    sub = %sub.element().qualified_name(),
                    sup = %sup.element().qualified_name(),
                    "type-argument arity mismatch after raw check; admitting"
                );
                return true;
            }
            return sub_args
                .iter()
                .zip(&sup_args)
                .all(|(s, t)| self.is_same_type(s, t));
        }

        match self.find_supertype_with_raw_type(sub, sup.element()) {
            Some(instantiated) => {
                let args = instantiated.type_arguments(self);
                if args.len() != sup_args.len() {
                    debug!(
                        sub = %sub.element().qualified_name(),
                        sup = %sup.element().qualified_name(),
                        "supertype instantiation arity mismatch; admitting"
                    );
                    return true;
                }
                args.iter().zip(&sup_args).all(|(s, t)| self.is_same_type(s, t))
            }
            None => {
                // The raw check already passed; a walk miss points at
                // malformed generics, not an invalid relation.
                debug!(
                    sub = %sub.element().qualified_name(),
                    sup = %sup.element().qualified_name(),
                    "raw-assignable supertype not found in walk; admitting"
                );
                true
            }
        }
    }

    /// Walk `from`'s supertypes transitively looking for an instantiation of
    /// `target`, substituting type arguments along the way. Declarations may
    /// cycle through interfaces, so visited qualified names are tracked.
    fn find_supertype_with_raw_type(
        &self,
        from: &DeclaredType,
        target: &ClassElement,
    ) -> Option<DeclaredType> {
        let mut queue: VecDeque<DeclaredType> = self.declared_supertypes(from).into();
        let mut seen: HashSet<QualifiedName> = HashSet::new();
        seen.insert(from.element().qualified_name().clone());

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current.element().qualified_name().clone()) {
                continue;
            }
            if current.element() == target {
                return Some(current);
            }
            queue.extend(self.declared_supertypes(&current));
        }

        None
    }

    // === Supertypes ==========================================================

    /// The direct supertypes of a declared type, in declaration order, with
    /// the declaration's type parameters substituted by the current type's
    /// arguments. Non-class supertype references are ignored.
    pub fn direct_supertypes(&self, declared: &DeclaredType) -> Vec<TypeMirror> {
        self.declared_supertypes(declared)
            .into_iter()
            .map(TypeMirror::Declared)
            .collect()
    }

    pub(crate) fn declared_supertypes(&self, declared: &DeclaredType) -> Vec<DeclaredType> {
        let Some(data) = self.oracle.declaration(declared.element().decl()) else {
            return Vec::new();
        };

        let args = declared.type_arguments(self);
        let subst: HashMap<TypeParamId, TypeMirror> = data
            .type_params
            .iter()
            .copied()
            .zip(args.into_iter())
            .collect();

        let mut out = Vec::new();
        for super_ref in &data.supertypes {
            let Some(resolved) = self.oracle.resolve(super_ref) else {
                continue;
            };
            let Some(super_data) = self.oracle.declaration(resolved.decl) else {
                continue;
            };
            if !super_data.kind.is_class_like() {
                continue;
            }
            let Ok(element) = ClassElement::wrap(self.oracle, resolved.decl) else {
                continue;
            };
            let super_args: Vec<TypeMirror> = resolved
                .args
                .iter()
                .map(|arg| self.project_argument_with(arg, &subst))
                .collect();
            out.push(DeclaredType::with_args(element, super_args));
        }
        out
    }

    // === Erasure =============================================================

    /// The erasure of a mirror: arguments dropped, variables rewritten to
    /// the erasure of their first bound, wildcards to the erasure of their
    /// extends bound (top class when absent).
    pub fn erasure(&self, ty: &TypeMirror) -> Result<TypeMirror, MirrorError> {
        Ok(match ty {
            TypeMirror::Primitive(_) | TypeMirror::NoType(_) | TypeMirror::Null => ty.clone(),
            TypeMirror::Array(component) => {
                TypeMirror::Array(Box::new(self.erasure(component)?))
            }
            TypeMirror::Declared(declared) => {
                TypeMirror::Declared(DeclaredType::raw(declared.element().clone()))
            }
            TypeMirror::Wildcard(wildcard) => match &wildcard.extends_bound {
                Some(upper) => self.erasure(upper)?,
                None => self.top_class_mirror()?,
            },
            TypeMirror::Variable(variable) => {
                let bound = self
                    .oracle
                    .type_param(variable.param())
                    .and_then(|data| data.bounds.first().cloned())
                    .and_then(|bound| self.oracle.resolve(&bound));
                match bound {
                    Some(resolved) => self.erasure(&self.project(&resolved))?,
                    None => self.top_class_mirror()?,
                }
            }
            TypeMirror::Executable(exec) => {
                let param_types = exec
                    .param_types
                    .iter()
                    .map(|param| self.erasure(param))
                    .collect::<Result<Vec<_>, _>>()?;
                TypeMirror::Executable(Box::new(ExecutableType {
                    param_types,
                    return_type: self.erasure(&exec.return_type)?,
                }))
            }
        })
    }

    fn top_class_element(&self) -> Result<ClassElement, MirrorError> {
        let name = QualifiedName::from_dotted(TOP_CLASS);
        let decl = self
            .oracle
            .lookup(&name)
            .ok_or(MirrorError::MissingSymbol(name))?;
        ClassElement::wrap(self.oracle, decl)
    }

    pub(crate) fn top_class_mirror(&self) -> Result<TypeMirror, MirrorError> {
        Ok(TypeMirror::Declared(DeclaredType::raw(
            self.top_class_element()?,
        )))
    }

    // === Signatures ==========================================================

    /// Whether `m1` is a subsignature of `m2`: equal arity, and parameters
    /// pairwise same-typed either directly or against the erasure of `m2`.
    pub fn is_subsignature(
        &self,
        m1: &ExecutableType,
        m2: &ExecutableType,
    ) -> Result<bool, MirrorError> {
        if m1.param_types.len() != m2.param_types.len() {
            return Ok(false);
        }
        if m1
            .param_types
            .iter()
            .zip(&m2.param_types)
            .all(|(a, b)| self.is_same_type(a, b))
        {
            return Ok(true);
        }
        for (a, b) in m1.param_types.iter().zip(&m2.param_types) {
            if !self.is_same_type(a, &self.erasure(b)?) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The type of `element` viewed as a member of `container`.
    pub fn as_member_of(
        &self,
        container: &DeclaredType,
        element: &Element,
    ) -> Result<TypeMirror, MirrorError> {
        trace!(container = %container.element().qualified_name(), "viewing member");
        match element {
            Element::Class(class) => Ok(self.declared_type(class, Vec::new())),
            Element::Variable(variable) => self.project_ref(variable.type_ref()),
            Element::Executable(executable) => {
                let data = executable.data();
                let mut param_types = Vec::with_capacity(data.params.len());
                for param in &data.params {
                    param_types.push(self.project_ref(&param.ty)?);
                }
                let return_type = self.project_ref(&data.return_type)?;
                Ok(TypeMirror::Executable(Box::new(ExecutableType {
                    param_types,
                    return_type,
                })))
            }
        }
    }
}
