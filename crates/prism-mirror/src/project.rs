//! Projection from resolved source types to legacy mirrors.
//!
//! This is the single choke point deciding which mirror stands in for a
//! source type; nothing else in the crate maps source declarations to
//! mirror variants.

use std::collections::HashMap;

use prism_core::Name;
use prism_symbols::{DeclId, ResolvedArg, ResolvedType, TypeParamId, TypeRef};

use crate::element::ClassElement;
use crate::error::MirrorError;
use crate::mirror::{
    DeclaredType, NoTypeKind, PrimitiveKind, TypeMirror, TypeVariable, WildcardType,
};
use crate::types::Types;

impl<'o> Types<'o> {
    /// Map a resolved source type to the appropriate legacy mirror.
    ///
    /// In the source model the primitive-like types are ordinary classes;
    /// only the combination of non-nullability and built-in identity
    /// projects to a legacy primitive. Nullable built-ins project to the
    /// boxed declared form, because the legacy model has no nullable
    /// primitive.
    pub fn project(&self, ty: &ResolvedType) -> TypeMirror {
        self.project_with(ty, &HashMap::new())
    }

    pub(crate) fn project_with(
        &self,
        ty: &ResolvedType,
        subst: &HashMap<TypeParamId, TypeMirror>,
    ) -> TypeMirror {
        let Some(decl) = self.oracle.declaration(ty.decl) else {
            return TypeMirror::NoType(NoTypeKind::None);
        };
        if !decl.kind.is_class_like() {
            return TypeMirror::NoType(NoTypeKind::None);
        }

        let star = self.oracle.star_projection(ty.decl);
        if star.decl == self.oracle.builtins().unit {
            return TypeMirror::NoType(NoTypeKind::Void);
        }

        if let Some(kind) = self.builtin_kind(star.decl) {
            if !ty.nullable {
                return self.primitive_type(kind);
            }
            // The legacy model has no nullable primitive; a missing boxed
            // class means the oracle environment is broken.
            let element = self
                .boxed_class(kind)
                .unwrap_or_else(|err| panic!("broken oracle environment: {err}"));
            return TypeMirror::Declared(DeclaredType::raw(element));
        }

        let Ok(element) = ClassElement::wrap(self.oracle, ty.decl) else {
            return TypeMirror::NoType(NoTypeKind::None);
        };

        if subst.is_empty() {
            // Bind the snapshot so type arguments survive; they materialise
            // lazily per accessor call.
            TypeMirror::Declared(DeclaredType::with_snapshot(element, ty.clone()))
        } else {
            let args = ty
                .args
                .iter()
                .map(|arg| self.project_argument_with(arg, subst))
                .collect();
            TypeMirror::Declared(DeclaredType::with_args(element, args))
        }
    }

    /// Resolve a use-site reference and project it.
    pub fn project_ref(&self, ty: &TypeRef) -> Result<TypeMirror, MirrorError> {
        let resolved = self
            .oracle
            .resolve(ty)
            .ok_or_else(|| MirrorError::MissingSymbol(ty.name.clone()))?;
        Ok(self.project(&resolved))
    }

    pub(crate) fn project_argument(&self, arg: &ResolvedArg) -> TypeMirror {
        self.project_argument_with(arg, &HashMap::new())
    }

    pub(crate) fn project_argument_with(
        &self,
        arg: &ResolvedArg,
        subst: &HashMap<TypeParamId, TypeMirror>,
    ) -> TypeMirror {
        match arg {
            ResolvedArg::Type(inner) => self.project_with(inner, subst),
            ResolvedArg::Param(param) => subst
                .get(param)
                .cloned()
                .unwrap_or_else(|| self.type_variable_mirror(*param)),
            ResolvedArg::Star => TypeMirror::Wildcard(Box::new(WildcardType {
                extends_bound: None,
                super_bound: None,
            })),
        }
    }

    pub(crate) fn type_variable_mirror(&self, param: TypeParamId) -> TypeMirror {
        let name = self
            .oracle
            .type_param(param)
            .map(|data| data.name.clone())
            .unwrap_or_else(|| Name::new(format!("#{}", param.0)));
        TypeMirror::Variable(TypeVariable::new(param, name))
    }

    /// Raw fallback: the declaration's type parameters as variables, in
    /// declaration order.
    pub(crate) fn type_params_as_variables(&self, decl: DeclId) -> Vec<TypeMirror> {
        let Some(data) = self.oracle.declaration(decl) else {
            return Vec::new();
        };
        data.type_params
            .iter()
            .map(|param| self.type_variable_mirror(*param))
            .collect()
    }

    pub(crate) fn builtin_kind(&self, decl: DeclId) -> Option<PrimitiveKind> {
        let builtins = self.oracle.builtins();
        Some(match decl {
            d if d == builtins.boolean => PrimitiveKind::Boolean,
            d if d == builtins.byte => PrimitiveKind::Byte,
            d if d == builtins.short => PrimitiveKind::Short,
            d if d == builtins.int => PrimitiveKind::Int,
            d if d == builtins.long => PrimitiveKind::Long,
            d if d == builtins.char => PrimitiveKind::Char,
            d if d == builtins.float => PrimitiveKind::Float,
            d if d == builtins.double => PrimitiveKind::Double,
            _ => return None,
        })
    }
}
