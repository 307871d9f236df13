use pretty_assertions::assert_eq;
use prism_mirror::{
    AnnotationMirror, AnnotationValue, AnnotationValueVisitor, ClassElement, MirrorError,
    TypeMirror, Types,
};
use prism_symbols::{
    AnnotationData, ArgPayload, DeclData, DeclId, DeclKind, SymbolStore,
};

fn fixture() -> SymbolStore {
    let mut store = SymbolStore::with_standard_symbols();

    // @Repeatable(Mappings.class) annotation Mapping
    let mappings = store.add_decl(DeclData::new("com.example.Mappings", DeclKind::Annotation));
    store.add_decl(DeclData {
        annotations: vec![AnnotationData::new("java.lang.annotation.Repeatable")
            .arg("value", ArgPayload::Decl(mappings))],
        ..DeclData::new("com.example.Mapping", DeclKind::Annotation)
    });

    // Source-language repeatable annotation with the implicit nested container.
    let tag = store.add_decl(DeclData {
        annotations: vec![AnnotationData::new("kotlin.annotation.Repeatable")],
        ..DeclData::new("com.example.Tag", DeclKind::Annotation)
    });
    store.add_nested_decl(
        tag,
        DeclData::new("com.example.Tag.Container", DeclKind::Annotation),
    );

    store.add_decl(DeclData::new("com.example.Marker", DeclKind::Annotation));
    store.add_decl(DeclData::new("com.example.Foo", DeclKind::Class));
    store.add_decl(DeclData::new("com.example.Bar", DeclKind::Class));

    let color = store.add_decl(DeclData::new("com.example.Color", DeclKind::Enum));
    store.add_nested_decl(
        color,
        DeclData::new("com.example.Color.RED", DeclKind::EnumEntry),
    );

    store
}

/// Renders each dispatch target as a tagged string.
struct Tagger;

impl AnnotationValueVisitor for Tagger {
    type Output = String;

    fn visit_bool(&mut self, value: bool) -> String {
        format!("bool:{value}")
    }
    fn visit_byte(&mut self, value: i8) -> String {
        format!("byte:{value}")
    }
    fn visit_short(&mut self, value: i16) -> String {
        format!("short:{value}")
    }
    fn visit_int(&mut self, value: i32) -> String {
        format!("int:{value}")
    }
    fn visit_long(&mut self, value: i64) -> String {
        format!("long:{value}")
    }
    fn visit_char(&mut self, value: char) -> String {
        format!("char:{value}")
    }
    fn visit_float(&mut self, value: f32) -> String {
        format!("float:{value}")
    }
    fn visit_double(&mut self, value: f64) -> String {
        format!("double:{value}")
    }
    fn visit_string(&mut self, value: &str) -> String {
        format!("string:{value}")
    }
    fn visit_enum_constant(&mut self, value: &ClassElement) -> String {
        format!("enum:{}", value.qualified_name())
    }
    fn visit_type(&mut self, value: &TypeMirror) -> String {
        format!("type:{value}")
    }
    fn visit_annotation(&mut self, value: &AnnotationMirror) -> String {
        format!("annotation:{}", value.annotation_type().qualified_name())
    }
    fn visit_array(&mut self, values: &[AnnotationValue]) -> String {
        format!("array:{}", values.len())
    }
}

fn mapping(target: &str) -> AnnotationData {
    AnnotationData::new("com.example.Mapping").arg("target", ArgPayload::String(target.into()))
}

fn inner_target(value: &AnnotationValue) -> &str {
    let AnnotationValue::Annotation(mirror) = value else {
        panic!("expected a nested annotation value");
    };
    let Some(AnnotationValue::String(target)) = mirror.value("target") else {
        panic!("expected a string target attribute");
    };
    target
}

#[test]
fn repeated_annotations_collapse_into_their_container() {
    let mut store = fixture();
    let owner = store.add_decl(DeclData {
        annotations: vec![mapping("make"), mapping("model")],
        ..DeclData::new("com.example.CarMapper", DeclKind::Interface)
    });
    let types = Types::new(&store);

    let mirrors = types.annotation_mirrors(owner).unwrap();
    assert_eq!(mirrors.len(), 1);
    assert_eq!(
        mirrors[0].annotation_type().qualified_name().to_dotted(),
        "com.example.Mappings"
    );

    let Some(AnnotationValue::Array(inner)) = mirrors[0].value("value") else {
        panic!("expected the container to carry a value list");
    };
    assert_eq!(inner.len(), 2);
    // Source order survives grouping.
    assert_eq!(inner_target(&inner[0]), "make");
    assert_eq!(inner_target(&inner[1]), "model");
}

#[test]
fn source_repeatable_resolves_the_implicit_container() {
    let mut store = fixture();
    let owner = store.add_decl(DeclData {
        annotations: vec![
            AnnotationData::new("com.example.Tag").arg("name", ArgPayload::String("a".into())),
            AnnotationData::new("com.example.Tag").arg("name", ArgPayload::String("b".into())),
        ],
        ..DeclData::new("com.example.Tagged", DeclKind::Class)
    });
    let types = Types::new(&store);

    let mirrors = types.annotation_mirrors(owner).unwrap();
    assert_eq!(mirrors.len(), 1);
    assert_eq!(
        mirrors[0].annotation_type().qualified_name().to_dotted(),
        "com.example.Tag.Container"
    );
    let Some(AnnotationValue::Array(inner)) = mirrors[0].value("value") else {
        panic!("expected the container to carry a value list");
    };
    assert_eq!(inner.len(), 2);
}

#[test]
fn duplicates_without_a_container_stay_separate() {
    let mut store = fixture();
    let owner = store.add_decl(DeclData {
        annotations: vec![
            AnnotationData::new("com.example.Marker"),
            AnnotationData::new("com.example.Marker"),
        ],
        ..DeclData::new("com.example.Plain", DeclKind::Class)
    });
    let types = Types::new(&store);

    let mirrors = types.annotation_mirrors(owner).unwrap();
    assert_eq!(mirrors.len(), 2);
    for mirror in &mirrors {
        assert_eq!(
            mirror.annotation_type().qualified_name().to_dotted(),
            "com.example.Marker"
        );
    }
}

#[test]
fn singleton_buckets_keep_attribute_order_verbatim() {
    let mut store = fixture();
    let owner = store.add_decl(DeclData {
        annotations: vec![AnnotationData::new("com.example.Mapping")
            .arg("target", ArgPayload::String("make".into()))
            .arg("source", ArgPayload::String("brand".into()))],
        ..DeclData::new("com.example.OneShot", DeclKind::Class)
    });
    let types = Types::new(&store);

    let mirrors = types.annotation_mirrors(owner).unwrap();
    assert_eq!(mirrors.len(), 1);

    let names: Vec<&str> = mirrors[0]
        .values()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, vec!["target", "source"]);
}

#[test]
fn grouping_preserves_first_occurrence_order_across_types() {
    let mut store = fixture();
    let owner = store.add_decl(DeclData {
        annotations: vec![
            mapping("make"),
            AnnotationData::new("com.example.Marker"),
            mapping("model"),
        ],
        ..DeclData::new("com.example.Mixed", DeclKind::Class)
    });
    let types = Types::new(&store);

    let mirrors = types.annotation_mirrors(owner).unwrap();
    let names: Vec<String> = mirrors
        .iter()
        .map(|m| m.annotation_type().qualified_name().to_dotted())
        .collect();
    assert_eq!(names, vec!["com.example.Mappings", "com.example.Marker"]);
}

#[test]
fn class_literal_lists_expose_wrapped_values() {
    let store = fixture();
    let types = Types::new(&store);
    let foo = store.decl_id("com.example.Foo").unwrap();
    let bar = store.decl_id("com.example.Bar").unwrap();

    let value = types
        .annotation_value(&ArgPayload::List(vec![
            ArgPayload::Decl(foo),
            ArgPayload::Decl(bar),
        ]))
        .unwrap();

    assert_eq!(value.accept(&mut Tagger), "array:2");
    let AnnotationValue::Array(items) = &value else {
        panic!("expected a wrapped list");
    };
    assert_eq!(items[0].accept(&mut Tagger), "type:com.example.Foo");
    assert_eq!(items[1].accept(&mut Tagger), "type:com.example.Bar");
}

#[test]
fn enum_entries_dispatch_to_the_enum_visit() {
    let store = fixture();
    let types = Types::new(&store);
    let red = store.decl_id("com.example.Color.RED").unwrap();

    let value = types.annotation_value(&ArgPayload::Decl(red)).unwrap();
    assert_eq!(value.accept(&mut Tagger), "enum:com.example.Color.RED");
}

#[test]
fn nested_annotations_dispatch_to_the_annotation_visit() {
    let store = fixture();
    let types = Types::new(&store);

    let value = types
        .annotation_value(&ArgPayload::Annotation(Box::new(AnnotationData::new(
            "com.example.Marker",
        ))))
        .unwrap();
    assert_eq!(value.accept(&mut Tagger), "annotation:com.example.Marker");
}

#[test]
fn leaf_payloads_dispatch_to_their_visits() {
    let store = fixture();
    let types = Types::new(&store);

    let cases: Vec<(ArgPayload, &str)> = vec![
        (ArgPayload::Bool(true), "bool:true"),
        (ArgPayload::Int(7), "int:7"),
        (ArgPayload::Long(-1), "long:-1"),
        (ArgPayload::Char('x'), "char:x"),
        (ArgPayload::String("hi".into()), "string:hi"),
    ];
    for (payload, expected) in cases {
        let value = types.annotation_value(&payload).unwrap();
        assert_eq!(value.accept(&mut Tagger), expected);
    }
}

#[test]
fn unresolved_payloads_are_contract_violations() {
    let store = fixture();
    let types = Types::new(&store);

    let err = types.annotation_value(&ArgPayload::Unresolved).unwrap_err();
    assert!(matches!(err, MirrorError::UnresolvedPayload));

    let missing = types
        .annotation_mirror(&AnnotationData::new("com.example.DoesNotExist"))
        .unwrap_err();
    assert!(matches!(missing, MirrorError::MissingAnnotationType(_)));
}

#[test]
fn stale_handles_are_reported() {
    let store = fixture();
    let types = Types::new(&store);

    let err = types
        .annotation_value(&ArgPayload::Decl(DeclId::new(9999)))
        .unwrap_err();
    assert!(matches!(err, MirrorError::StaleDeclaration(_)));
}
