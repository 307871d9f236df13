//! In-memory [`SymbolOracle`] implementation.

use std::collections::{HashMap, HashSet, VecDeque};

use prism_core::QualifiedName;

use crate::{
    Builtins, DeclData, DeclId, DeclKind, ResolvedArg, ResolvedType, StarType, SymbolOracle,
    TypeParamData, TypeParamId, TypeRef, TypeRefArg,
};

/// A symbol graph held in memory.
///
/// Backed by plain vectors and a name index; used by tests and by hosts that
/// assemble a graph programmatically instead of wiring in a real frontend.
#[derive(Debug, Default)]
pub struct SymbolStore {
    decls: Vec<DeclData>,
    by_name: HashMap<QualifiedName, DeclId>,
    type_params: Vec<TypeParamData>,
    builtins: Option<Builtins>,
}

impl SymbolStore {
    /// A store seeded with the built-in types the bridge depends on: the
    /// source-language built-ins, the boxed classes, and the array
    /// supertypes.
    pub fn with_standard_symbols() -> Self {
        let mut store = SymbolStore::default();

        store.add_decl(DeclData::new("kotlin.Any", DeclKind::Class));

        let unit = store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("kotlin.Any")],
            ..DeclData::new("kotlin.Unit", DeclKind::Object)
        });
        let builtin = |store: &mut SymbolStore, name: &str| {
            store.add_decl(DeclData {
                supertypes: vec![TypeRef::new("kotlin.Any")],
                ..DeclData::new(name, DeclKind::Class)
            })
        };
        let boolean = builtin(&mut store, "kotlin.Boolean");
        let byte = builtin(&mut store, "kotlin.Byte");
        let short = builtin(&mut store, "kotlin.Short");
        let int = builtin(&mut store, "kotlin.Int");
        let long = builtin(&mut store, "kotlin.Long");
        let char_ = builtin(&mut store, "kotlin.Char");
        let float = builtin(&mut store, "kotlin.Float");
        let double = builtin(&mut store, "kotlin.Double");

        store.add_decl(DeclData::new("java.lang.Object", DeclKind::Class));
        for name in [
            "java.lang.String",
            "java.lang.Boolean",
            "java.lang.Byte",
            "java.lang.Short",
            "java.lang.Integer",
            "java.lang.Long",
            "java.lang.Character",
            "java.lang.Float",
            "java.lang.Double",
        ] {
            store.add_decl(DeclData {
                supertypes: vec![TypeRef::new("java.lang.Object")],
                ..DeclData::new(name, DeclKind::Class)
            });
        }
        store.add_decl(DeclData::new("java.lang.Cloneable", DeclKind::Interface));
        store.add_decl(DeclData::new("java.io.Serializable", DeclKind::Interface));
        store.add_decl(DeclData::new(
            "java.lang.annotation.Repeatable",
            DeclKind::Annotation,
        ));
        store.add_decl(DeclData::new(
            "kotlin.annotation.Repeatable",
            DeclKind::Annotation,
        ));

        store.builtins = Some(Builtins {
            unit,
            boolean,
            byte,
            short,
            int,
            long,
            char: char_,
            float,
            double,
        });

        store
    }

    pub fn add_type_param(
        &mut self,
        name: impl Into<prism_core::Name>,
        bounds: Vec<TypeRef>,
    ) -> TypeParamId {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(TypeParamData {
            name: name.into(),
            bounds,
        });
        id
    }

    pub fn add_decl(&mut self, decl: DeclData) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        if self.by_name.contains_key(&decl.name) {
            // Two ids for one qualified name would corrupt every
            // name-keyed comparison downstream. This is a programmer error
            // in tests/builders.
            panic!("duplicate declaration for {}", decl.name);
        }
        self.by_name.insert(decl.name.clone(), id);
        self.decls.push(decl);
        id
    }

    /// Add `decl` and record it as nested under `parent`.
    pub fn add_nested_decl(&mut self, parent: DeclId, decl: DeclData) -> DeclId {
        let id = self.add_decl(decl);
        self.decls[parent.0 as usize].nested.push(id);
        id
    }

    pub fn decl_id(&self, name: &str) -> Option<DeclId> {
        self.lookup(&QualifiedName::from_dotted(name))
    }
}

impl SymbolOracle for SymbolStore {
    fn declaration(&self, id: DeclId) -> Option<&DeclData> {
        self.decls.get(id.0 as usize)
    }

    fn type_param(&self, id: TypeParamId) -> Option<&TypeParamData> {
        self.type_params.get(id.0 as usize)
    }

    fn lookup(&self, name: &QualifiedName) -> Option<DeclId> {
        if let Some(id) = self.by_name.get(name).copied() {
            return Some(id);
        }

        // Best-effort support for the implicit universe scopes, so callers
        // are not forced to spell out `java.lang.Object` or `kotlin.Int` in
        // every reference.
        if name.segments().len() == 1 {
            let simple = name.simple_name().as_str();
            let jlang = QualifiedName::from_dotted(&format!("java.lang.{simple}"));
            if let Some(id) = self.by_name.get(&jlang).copied() {
                return Some(id);
            }
            let kotlin = QualifiedName::from_dotted(&format!("kotlin.{simple}"));
            return self.by_name.get(&kotlin).copied();
        }

        None
    }

    fn resolve(&self, ty: &TypeRef) -> Option<ResolvedType> {
        let decl = self.lookup(&ty.name)?;
        let mut args = Vec::with_capacity(ty.args.len());
        for arg in &ty.args {
            args.push(match arg {
                TypeRefArg::Type(inner) => ResolvedArg::Type(self.resolve(inner)?),
                TypeRefArg::Param(id) => ResolvedArg::Param(*id),
                TypeRefArg::Star => ResolvedArg::Star,
            });
        }
        Some(ResolvedType {
            decl,
            args,
            nullable: ty.nullable,
        })
    }

    fn star_projection(&self, decl: DeclId) -> StarType {
        StarType { decl }
    }

    fn raw_assignable(&self, sub: &StarType, sup: &StarType) -> bool {
        if sub.decl == sup.decl {
            return true;
        }

        // Declarations may cycle through interfaces; track visited ids.
        let mut queue = VecDeque::new();
        let mut seen = HashSet::new();
        queue.push_back(sub.decl);

        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if current == sup.decl {
                return true;
            }
            let Some(decl) = self.declaration(current) else {
                continue;
            };
            for super_ref in &decl.supertypes {
                if let Some(id) = self.lookup(&super_ref.name) {
                    queue.push_back(id);
                }
            }
        }

        false
    }

    fn builtins(&self) -> &Builtins {
        self.builtins
            .as_ref()
            .expect("SymbolStore::with_standard_symbols must initialize builtins")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn lookup_falls_back_to_universe_scopes() {
        let store = SymbolStore::with_standard_symbols();
        assert_eq!(
            store.decl_id("Object"),
            store.decl_id("java.lang.Object")
        );
        assert_eq!(store.decl_id("Int"), store.decl_id("kotlin.Int"));
        assert_eq!(store.decl_id("com.example.Missing"), None);
    }

    #[test]
    fn resolve_carries_args_and_nullability() {
        let mut store = SymbolStore::with_standard_symbols();
        let e = store.add_type_param("E", vec![TypeRef::new("kotlin.Any")]);
        store.add_decl(DeclData {
            type_params: vec![e],
            ..DeclData::new("kotlin.collections.List", DeclKind::Interface)
        });

        let resolved = store
            .resolve(
                &TypeRef::parameterized(
                    "kotlin.collections.List",
                    vec![TypeRefArg::Type(TypeRef::new("kotlin.Int").nullable())],
                )
                .nullable(),
            )
            .expect("resolves");

        assert!(resolved.nullable);
        assert_eq!(resolved.args.len(), 1);
        let ResolvedArg::Type(inner) = &resolved.args[0] else {
            panic!("expected a type argument");
        };
        assert!(inner.nullable);
        assert_eq!(Some(inner.decl), store.decl_id("kotlin.Int"));
    }

    #[test]
    fn raw_assignable_walks_supertypes_transitively() {
        let mut store = SymbolStore::with_standard_symbols();
        let base = store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("java.lang.Object")],
            ..DeclData::new("com.example.Base", DeclKind::Class)
        });
        let mid = store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("com.example.Base")],
            ..DeclData::new("com.example.Mid", DeclKind::Class)
        });
        let leaf = store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("com.example.Mid")],
            ..DeclData::new("com.example.Leaf", DeclKind::Class)
        });

        let star = |d| StarType { decl: d };
        let object = store.decl_id("java.lang.Object").unwrap();
        assert!(store.raw_assignable(&star(leaf), &star(base)));
        assert!(store.raw_assignable(&star(leaf), &star(object)));
        assert!(!store.raw_assignable(&star(base), &star(mid)));
    }

    #[test]
    fn raw_assignable_survives_supertype_cycles() {
        let mut store = SymbolStore::with_standard_symbols();
        // Malformed input: two interfaces extending each other.
        let a = store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("com.example.B")],
            ..DeclData::new("com.example.A", DeclKind::Interface)
        });
        store.add_decl(DeclData {
            supertypes: vec![TypeRef::new("com.example.A")],
            ..DeclData::new("com.example.B", DeclKind::Interface)
        });

        let other = store.decl_id("java.lang.String").unwrap();
        assert!(!store.raw_assignable(&StarType { decl: a }, &StarType { decl: other }));
    }
}
