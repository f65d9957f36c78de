//! AST node definitions.
//!
//! Enums use serde's external tagging with camelCase variant names, so a `let`
//! statement serializes as `{"let": {"name": "x", ...}}` and a number literal as
//! `{"number": 5.0}`.

use serde::{Deserialize, Serialize};

// ============================================================================
// Source File
// ============================================================================

/// A parsed source file: its top-level constructs in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    #[serde(default)]
    pub constructs: Vec<TopLevelConstruct>,
}

impl SourceFile {
    pub fn new(constructs: Vec<TopLevelConstruct>) -> Self {
        Self { constructs }
    }

    /// Interface definitions in source order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDefinition> {
        self.constructs.iter().filter_map(|c| match c {
            TopLevelConstruct::Interface(i) => Some(i),
            TopLevelConstruct::Statement(_) => None,
        })
    }

    /// Statements in source order, skipping interfaces.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.constructs.iter().filter_map(|c| match c {
            TopLevelConstruct::Statement(s) => Some(s),
            TopLevelConstruct::Interface(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopLevelConstruct {
    Interface(InterfaceDefinition),
    Statement(Statement),
}

// ============================================================================
// Interfaces
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDefinition {
    pub name: String,
    #[serde(default)]
    pub members: Vec<InterfaceMember>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InterfaceMember {
    Field {
        name: String,
        #[serde(rename = "type")]
        type_ident: TypeIdentifier,
        #[serde(default)]
        optional: bool,
    },
    Method {
        name: String,
        #[serde(default)]
        parameters: Vec<Parameter>,
        /// Methods without an annotation return `void`.
        #[serde(default)]
        return_type: Option<TypeIdentifier>,
    },
}

impl InterfaceMember {
    pub fn name(&self) -> &str {
        match self {
            InterfaceMember::Field { name, .. } | InterfaceMember::Method { name, .. } => name,
        }
    }
}

// ============================================================================
// Type Identifiers
// ============================================================================

/// A type as written in an annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeIdentifier {
    /// A named type: `string`, `Foo`, `any`.
    Reference(String),
    /// `A | B | ...`
    Union(Vec<TypeIdentifier>),
    /// `{ name: string, age?: number }`
    ObjectLiteral(Vec<ObjectTypeField>),
    /// `(a: string, b?: number) => void`
    Function {
        #[serde(default)]
        parameters: Vec<Parameter>,
        return_type: Box<TypeIdentifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectTypeField {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "type")]
    pub type_ident: TypeIdentifier,
}

/// A function or method parameter. Parameters without an annotation are `any`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(rename = "type", default)]
    pub type_ident: Option<TypeIdentifier>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Statement {
    Let(LetDeclaration),
    Return(Option<Expression>),
    Expression(Expression),
    /// A function declared in statement position.
    Function(FunctionInstantiation),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetDeclaration {
    pub name: String,
    #[serde(default)]
    pub type_annotation: Option<TypeIdentifier>,
    #[serde(default)]
    pub value: Option<Expression>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    Number(f64),
    String(String),
    Ident(String),
    Function(FunctionInstantiation),
    Object(ObjectInstantiation),
    Chain(ChainedObjectOperation),
    Assignment(IdentAssignment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInstantiation {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<TypeIdentifier>,
    #[serde(default)]
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectInstantiation {
    #[serde(default)]
    pub fields: Vec<ObjectFieldInstantiation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectFieldInstantiation {
    pub name: String,
    pub value: Expression,
}

/// `a.b.c(x)`, `this.name`, `this.count = 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainedObjectOperation {
    pub accessee: Accessee,
    #[serde(default)]
    pub operations: Vec<ObjectOperation>,
    /// Assigns to the last accessed member.
    #[serde(default)]
    pub assignment: Option<Box<Expression>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessee {
    Ident(String),
    This,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectOperation {
    Access(String),
    Invocation(Vec<Expression>),
}

/// `x = value`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentAssignment {
    pub ident: String,
    pub value: Box<Expression>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_let_from_json() {
        let json = r#"{"let": {
            "name": "foo",
            "typeAnnotation": {"reference": "string"},
            "value": {"string": "bar"}
        }}"#;
        let stmt: Statement = serde_json::from_str(json).unwrap();
        assert_eq!(
            stmt,
            Statement::Let(LetDeclaration {
                name: "foo".into(),
                type_annotation: Some(TypeIdentifier::Reference("string".into())),
                value: Some(Expression::String("bar".into())),
            })
        );
    }

    #[test]
    fn test_this_chain_from_json() {
        let json = r#"{"chain": {
            "accessee": "this",
            "operations": [{"access": "getName"}, {"invocation": []}]
        }}"#;
        let expr: Expression = serde_json::from_str(json).unwrap();
        match expr {
            Expression::Chain(chain) => {
                assert_eq!(chain.accessee, Accessee::This);
                assert_eq!(chain.operations.len(), 2);
                assert!(chain.assignment.is_none());
            }
            other => panic!("expected chain, got {:?}", other),
        }
    }

    #[test]
    fn test_source_file_splits_interfaces_and_statements() {
        let json = r#"{"constructs": [
            {"statement": {"expression": {"ident": "x"}}},
            {"interface": {
                "name": "Foo",
                "members": [{"field": {"name": "a", "type": {"reference": "number"}}}]
            }}
        ]}"#;
        let file: SourceFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.interfaces().count(), 1);
        assert_eq!(file.statements().count(), 1);
        assert_eq!(file.interfaces().next().unwrap().members[0].name(), "a");
    }
}
