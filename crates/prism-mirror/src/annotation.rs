//! Annotation mirrors and annotation-value adaptation.
//!
//! Raw annotation-argument payloads from the symbol graph are converted into
//! the visitor-dispatched value model the legacy generators consume. List
//! payloads always expose their items as [`AnnotationValue`]s, never as raw
//! payloads; the visitor contract requires that layer of wrapping.

use std::collections::HashMap;

use prism_core::{Name, QualifiedName};
use prism_symbols::{AnnotationData, ArgPayload, DeclId, DeclKind};

use crate::element::ClassElement;
use crate::error::MirrorError;
use crate::mirror::{DeclaredType, TypeMirror};
use crate::types::Types;

const JAVA_REPEATABLE: &str = "java.lang.annotation.Repeatable";
const SOURCE_REPEATABLE: &str = "kotlin.annotation.Repeatable";
/// Simple name of the implicit container nested under source-language
/// repeatable annotation types.
const IMPLICIT_CONTAINER: &str = "Container";
/// Attribute carrying the inner mirrors of a repeatable container.
const VALUE_ATTRIBUTE: &str = "value";

/// One annotation attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationValue {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Char(char),
    Float(f32),
    Double(f64),
    String(String),
    /// An enum-constant element.
    EnumConstant(ClassElement),
    /// A class literal, as a declared mirror.
    Type(TypeMirror),
    /// A nested annotation.
    Annotation(AnnotationMirror),
    /// List items are always wrapped values, never raw payloads.
    Array(Vec<AnnotationValue>),
}

impl AnnotationValue {
    pub fn accept<V: AnnotationValueVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            AnnotationValue::Bool(value) => visitor.visit_bool(*value),
            AnnotationValue::Byte(value) => visitor.visit_byte(*value),
            AnnotationValue::Short(value) => visitor.visit_short(*value),
            AnnotationValue::Int(value) => visitor.visit_int(*value),
            AnnotationValue::Long(value) => visitor.visit_long(*value),
            AnnotationValue::Char(value) => visitor.visit_char(*value),
            AnnotationValue::Float(value) => visitor.visit_float(*value),
            AnnotationValue::Double(value) => visitor.visit_double(*value),
            AnnotationValue::String(value) => visitor.visit_string(value),
            AnnotationValue::EnumConstant(element) => visitor.visit_enum_constant(element),
            AnnotationValue::Type(mirror) => visitor.visit_type(mirror),
            AnnotationValue::Annotation(mirror) => visitor.visit_annotation(mirror),
            AnnotationValue::Array(values) => visitor.visit_array(values),
        }
    }
}

/// Visitor over [`AnnotationValue`]s.
pub trait AnnotationValueVisitor {
    type Output;

    fn visit_bool(&mut self, value: bool) -> Self::Output;
    fn visit_byte(&mut self, value: i8) -> Self::Output;
    fn visit_short(&mut self, value: i16) -> Self::Output;
    fn visit_int(&mut self, value: i32) -> Self::Output;
    fn visit_long(&mut self, value: i64) -> Self::Output;
    fn visit_char(&mut self, value: char) -> Self::Output;
    fn visit_float(&mut self, value: f32) -> Self::Output;
    fn visit_double(&mut self, value: f64) -> Self::Output;
    fn visit_string(&mut self, value: &str) -> Self::Output;
    fn visit_enum_constant(&mut self, value: &ClassElement) -> Self::Output;
    fn visit_type(&mut self, value: &TypeMirror) -> Self::Output;
    fn visit_annotation(&mut self, value: &AnnotationMirror) -> Self::Output;
    fn visit_array(&mut self, values: &[AnnotationValue]) -> Self::Output;
}

/// An annotation viewed through the legacy model: the annotation-type
/// element plus an ordered attribute map.
///
/// Attribute names match the annotation's declared element names verbatim,
/// in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationMirror {
    annotation_type: ClassElement,
    values: Vec<(Name, AnnotationValue)>,
}

impl AnnotationMirror {
    pub fn annotation_type(&self) -> &ClassElement {
        &self.annotation_type
    }

    /// Attribute name/value pairs in source order.
    pub fn values(&self) -> &[(Name, AnnotationValue)] {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.values
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value)
    }
}

impl<'o> Types<'o> {
    /// Convert a raw annotation-argument payload to a wrapped value.
    pub fn annotation_value(&self, payload: &ArgPayload) -> Result<AnnotationValue, MirrorError> {
        Ok(match payload {
            ArgPayload::Bool(value) => AnnotationValue::Bool(*value),
            ArgPayload::Byte(value) => AnnotationValue::Byte(*value),
            ArgPayload::Short(value) => AnnotationValue::Short(*value),
            ArgPayload::Int(value) => AnnotationValue::Int(*value),
            ArgPayload::Long(value) => AnnotationValue::Long(*value),
            ArgPayload::Char(value) => AnnotationValue::Char(*value),
            ArgPayload::Float(value) => AnnotationValue::Float(*value),
            ArgPayload::Double(value) => AnnotationValue::Double(*value),
            ArgPayload::String(value) => AnnotationValue::String(value.clone()),
            ArgPayload::Decl(decl) => self.declaration_value(*decl)?,
            ArgPayload::Type(resolved) => {
                let data = self
                    .oracle
                    .declaration(resolved.decl)
                    .ok_or(MirrorError::StaleDeclaration(resolved.decl))?;
                if data.kind == DeclKind::EnumEntry {
                    AnnotationValue::EnumConstant(ClassElement::wrap(self.oracle, resolved.decl)?)
                } else {
                    AnnotationValue::Type(self.project(resolved))
                }
            }
            ArgPayload::Annotation(data) => {
                AnnotationValue::Annotation(self.annotation_mirror(data)?)
            }
            ArgPayload::List(items) => AnnotationValue::Array(
                items
                    .iter()
                    .map(|item| self.annotation_value(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ArgPayload::Unresolved => return Err(MirrorError::UnresolvedPayload),
        })
    }

    fn declaration_value(&self, decl: DeclId) -> Result<AnnotationValue, MirrorError> {
        let data = self
            .oracle
            .declaration(decl)
            .ok_or(MirrorError::StaleDeclaration(decl))?;
        if data.kind == DeclKind::EnumEntry {
            return Ok(AnnotationValue::EnumConstant(ClassElement::wrap(
                self.oracle,
                decl,
            )?));
        }
        if !data.kind.is_class_like() {
            return Err(MirrorError::NotAClass(data.name.clone()));
        }
        let element = ClassElement::wrap(self.oracle, decl)?;
        Ok(AnnotationValue::Type(TypeMirror::Declared(
            DeclaredType::raw(element),
        )))
    }

    /// Expose one raw annotation as a mirror.
    pub fn annotation_mirror(
        &self,
        data: &AnnotationData,
    ) -> Result<AnnotationMirror, MirrorError> {
        let decl = self
            .oracle
            .lookup(&data.ty)
            .ok_or_else(|| MirrorError::MissingAnnotationType(data.ty.clone()))?;
        let annotation_type = ClassElement::wrap(self.oracle, decl)?;

        let mut values = Vec::with_capacity(data.args.len());
        for arg in &data.args {
            values.push((arg.name.clone(), self.annotation_value(&arg.value)?));
        }

        Ok(AnnotationMirror {
            annotation_type,
            values,
        })
    }

    /// All annotations on `owner` as mirrors, with duplicate repeatable
    /// annotations grouped into their synthetic container.
    ///
    /// Annotations are partitioned by annotation-type qualified name. A
    /// bucket of two or more collapses into a single container mirror —
    /// provided the annotation type declares a container — whose sole
    /// `value` attribute lists the inner mirrors in source order. Everything
    /// else is emitted individually, in first-occurrence order.
    pub fn annotation_mirrors(
        &self,
        owner: DeclId,
    ) -> Result<Vec<AnnotationMirror>, MirrorError> {
        let data = self
            .oracle
            .declaration(owner)
            .ok_or(MirrorError::StaleDeclaration(owner))?;

        let mut order: Vec<&QualifiedName> = Vec::new();
        let mut buckets: HashMap<&QualifiedName, Vec<&AnnotationData>> = HashMap::new();
        for annotation in &data.annotations {
            let bucket = buckets.entry(&annotation.ty).or_default();
            if bucket.is_empty() {
                order.push(&annotation.ty);
            }
            bucket.push(annotation);
        }

        let mut out = Vec::new();
        for ty in order {
            let bucket = &buckets[ty];
            if bucket.len() == 1 {
                out.push(self.annotation_mirror(bucket[0])?);
                continue;
            }

            match self.repeatable_container(ty)? {
                Some(container) => {
                    let inner = bucket
                        .iter()
                        .map(|annotation| {
                            self.annotation_mirror(annotation)
                                .map(AnnotationValue::Annotation)
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    out.push(AnnotationMirror {
                        annotation_type: container,
                        values: vec![(
                            Name::new(VALUE_ATTRIBUTE),
                            AnnotationValue::Array(inner),
                        )],
                    });
                }
                None => {
                    for annotation in bucket {
                        out.push(self.annotation_mirror(annotation)?);
                    }
                }
            }
        }

        Ok(out)
    }

    /// The container element of a repeatable annotation type, if the type
    /// declares one.
    fn repeatable_container(
        &self,
        annotation_ty: &QualifiedName,
    ) -> Result<Option<ClassElement>, MirrorError> {
        let Some(decl) = self.oracle.lookup(annotation_ty) else {
            return Ok(None);
        };
        let Some(data) = self.oracle.declaration(decl) else {
            return Ok(None);
        };

        for meta in &data.annotations {
            let meta_ty = meta.ty.to_dotted();
            if meta_ty == JAVA_REPEATABLE {
                // The container type is the first argument.
                let container = meta.args.first().and_then(|arg| match &arg.value {
                    ArgPayload::Decl(id) => Some(*id),
                    ArgPayload::Type(resolved) => Some(resolved.decl),
                    _ => None,
                });
                if let Some(id) = container {
                    return Ok(Some(ClassElement::wrap(self.oracle, id)?));
                }
            } else if meta_ty == SOURCE_REPEATABLE {
                // The implicit container is the nested class named
                // `Container`, resolved through the oracle.
                let container_name = data.name.child(IMPLICIT_CONTAINER);
                if let Some(id) = self.oracle.lookup(&container_name) {
                    return Ok(Some(ClassElement::wrap(self.oracle, id)?));
                }
            }
        }

        Ok(None)
    }
}
