use pretty_assertions::assert_eq;
use prism_mirror::{ClassElement, PrimitiveKind, TypeKind, TypeMirror, Types};
use prism_symbols::{
    DeclData, DeclKind, SymbolOracle, SymbolStore, TypeRef, TypeRefArg,
};

fn fixture() -> SymbolStore {
    let mut store = SymbolStore::with_standard_symbols();
    let e = store.add_type_param("E", vec![TypeRef::new("java.lang.Object")]);
    store.add_decl(DeclData {
        type_params: vec![e],
        supertypes: vec![TypeRef::new("java.lang.Object")],
        ..DeclData::new("java.util.List", DeclKind::Interface)
    });
    store.add_decl(DeclData::new("com.example.render", DeclKind::Function));
    store
}

fn declared(types: &Types<'_>, store: &SymbolStore, name: &str) -> TypeMirror {
    let element = ClassElement::wrap(store, store.decl_id(name).unwrap()).unwrap();
    types.declared_type(&element, Vec::new())
}

#[test]
fn non_nullable_builtin_projects_to_primitive() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store.resolve(&TypeRef::new("kotlin.Boolean")).unwrap();
    let mirror = types.project(&resolved);
    assert_eq!(mirror.kind(), TypeKind::Boolean);

    // The boxed class accepts the primitive through a boxing conversion.
    let boxed = declared(&types, &store, "java.lang.Boolean");
    assert!(types.is_assignable(&mirror, &boxed));
}

#[test]
fn nullable_builtin_projects_to_boxed_declared_form() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store.resolve(&TypeRef::new("kotlin.Int").nullable()).unwrap();
    let mirror = types.project(&resolved);

    let declared = mirror.as_declared().expect("nullable Int is a declared mirror");
    assert_eq!(mirror.kind(), TypeKind::Declared);
    assert_eq!(
        declared.element().qualified_name().to_dotted(),
        "java.lang.Integer"
    );
    assert_eq!(types.unboxed_type(declared).unwrap().kind(), TypeKind::Int);
}

#[test]
fn unit_projects_to_void() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store.resolve(&TypeRef::new("kotlin.Unit")).unwrap();
    assert_eq!(types.project(&resolved).kind(), TypeKind::Void);
}

#[test]
fn non_class_like_declaration_projects_to_none() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store.resolve(&TypeRef::new("com.example.render")).unwrap();
    assert_eq!(types.project(&resolved).kind(), TypeKind::None);
}

#[test]
fn primitive_mirrors_are_interned_per_kind() {
    let store = fixture();
    let types = Types::new(&store);

    for kind in [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Char,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ] {
        let first = types.primitive_type(kind);
        let second = types.primitive_type(kind);
        assert_eq!(first, second);
        assert!(types.is_same_type(&first, &second));
    }

    assert!(!types.is_same_type(
        &types.primitive_type(PrimitiveKind::Int),
        &types.primitive_type(PrimitiveKind::Long)
    ));
}

#[test]
fn snapshot_arguments_survive_projection() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store
        .resolve(&TypeRef::parameterized(
            "java.util.List",
            vec![TypeRefArg::Type(TypeRef::new("java.lang.String"))],
        ))
        .unwrap();
    let mirror = types.project(&resolved);

    let args = mirror.as_declared().unwrap().type_arguments(&types);
    assert_eq!(args.len(), 1);
    let string = declared(&types, &store, "java.lang.String");
    assert!(types.is_same_type(&args[0], &string));
}

#[test]
fn raw_declared_arguments_are_the_declarations_type_parameters() {
    let store = fixture();
    let types = Types::new(&store);

    let list = declared(&types, &store, "java.util.List");
    let args = list.as_declared().unwrap().type_arguments(&types);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].kind(), TypeKind::TypeVariable);
}

#[test]
fn star_argument_projects_to_unbounded_wildcard() {
    let store = fixture();
    let types = Types::new(&store);

    let resolved = store
        .resolve(&TypeRef::parameterized(
            "java.util.List",
            vec![TypeRefArg::Star],
        ))
        .unwrap();
    let mirror = types.project(&resolved);

    let args = mirror.as_declared().unwrap().type_arguments(&types);
    assert_eq!(args.len(), 1);
    assert_eq!(args[0].kind(), TypeKind::Wildcard);
}
