//! Element wrappers over symbol-graph declarations.

use std::fmt;

use prism_core::{Name, QualifiedName};
use prism_symbols::{DeclId, DeclKind, FunctionData, FunctionKind, SymbolOracle, TypeRef};

use crate::error::MirrorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Class,
    Interface,
    Enum,
    EnumConstant,
    AnnotationType,
    Method,
    Getter,
    Setter,
    Field,
    Parameter,
}

/// A declared-element wrapper: qualified name, element kind, and the raw
/// symbol handle.
///
/// One is constructed per declaration per adapter run; the wrapped symbol is
/// borrowed from the oracle, never owned. Equality is by qualified name —
/// the oracle may hand back fresh handles per call.
#[derive(Debug, Clone)]
pub struct ClassElement {
    decl: DeclId,
    name: QualifiedName,
    kind: ElementKind,
}

impl ClassElement {
    /// Wrap a class-like declaration.
    pub fn wrap(oracle: &dyn SymbolOracle, decl: DeclId) -> Result<ClassElement, MirrorError> {
        let data = oracle
            .declaration(decl)
            .ok_or(MirrorError::StaleDeclaration(decl))?;
        let kind = match data.kind {
            DeclKind::Class | DeclKind::Object => ElementKind::Class,
            DeclKind::Interface => ElementKind::Interface,
            DeclKind::Enum => ElementKind::Enum,
            DeclKind::EnumEntry => ElementKind::EnumConstant,
            DeclKind::Annotation => ElementKind::AnnotationType,
            DeclKind::Function | DeclKind::Property => {
                return Err(MirrorError::NotAClass(data.name.clone()))
            }
        };
        Ok(ClassElement {
            decl,
            name: data.name.clone(),
            kind,
        })
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.name
    }

    pub fn simple_name(&self) -> &Name {
        self.name.simple_name()
    }

    /// The raw symbol handle.
    pub fn decl(&self) -> DeclId {
        self.decl
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Class-like declarations nested under this one, in declaration order.
    pub fn nested(&self, oracle: &dyn SymbolOracle) -> Vec<ClassElement> {
        let Some(data) = oracle.declaration(self.decl) else {
            return Vec::new();
        };
        data.nested
            .iter()
            .filter_map(|id| ClassElement::wrap(oracle, *id).ok())
            .collect()
    }

    /// Enclosed members — properties as fields, functions and accessors as
    /// executables, nested class-like declarations — in declaration order.
    pub fn enclosed_elements(&self, oracle: &dyn SymbolOracle) -> Vec<Element> {
        let Some(data) = oracle.declaration(self.decl) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for property in &data.properties {
            out.push(Element::Variable(VariableElement {
                owner: self.decl,
                name: property.name.clone(),
                ty: property.ty.clone(),
                kind: ElementKind::Field,
            }));
        }
        for function in &data.functions {
            out.push(Element::Executable(ExecutableElement {
                owner: self.decl,
                data: function.clone(),
            }));
        }
        for nested in self.nested(oracle) {
            out.push(Element::Class(nested));
        }
        out
    }
}

impl PartialEq for ClassElement {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassElement {}

impl fmt::Display for ClassElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name.fmt(f)
    }
}

/// A method or accessor member.
#[derive(Debug, Clone)]
pub struct ExecutableElement {
    owner: DeclId,
    data: FunctionData,
}

impl ExecutableElement {
    pub fn new(owner: DeclId, data: FunctionData) -> Self {
        Self { owner, data }
    }

    pub fn owner(&self) -> DeclId {
        self.owner
    }

    pub fn name(&self) -> &Name {
        &self.data.name
    }

    pub fn kind(&self) -> ElementKind {
        match self.data.kind {
            FunctionKind::Function => ElementKind::Method,
            FunctionKind::Getter => ElementKind::Getter,
            FunctionKind::Setter => ElementKind::Setter,
        }
    }

    pub fn data(&self) -> &FunctionData {
        &self.data
    }

    /// Parameters as variable elements, in declaration order.
    pub fn parameters(&self) -> Vec<VariableElement> {
        self.data
            .params
            .iter()
            .map(|param| VariableElement {
                owner: self.owner,
                name: param.name.clone(),
                ty: param.ty.clone(),
                kind: ElementKind::Parameter,
            })
            .collect()
    }
}

/// A field (property) or parameter member.
#[derive(Debug, Clone)]
pub struct VariableElement {
    owner: DeclId,
    name: Name,
    ty: TypeRef,
    kind: ElementKind,
}

impl VariableElement {
    pub fn new(owner: DeclId, name: Name, ty: TypeRef, kind: ElementKind) -> Self {
        Self {
            owner,
            name,
            ty,
            kind,
        }
    }

    pub fn owner(&self) -> DeclId {
        self.owner
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// The declared type of the variable, as written.
    pub fn type_ref(&self) -> &TypeRef {
        &self.ty
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }
}

/// Any wrapped element, for operations that dispatch by element variant.
#[derive(Debug, Clone)]
pub enum Element {
    Class(ClassElement),
    Executable(ExecutableElement),
    Variable(VariableElement),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Class(element) => element.kind(),
            Element::Executable(element) => element.kind(),
            Element::Variable(element) => element.kind(),
        }
    }
}
