//! Shorthand constructors for assembling trees in code.
//!
//! ```
//! use hype_ast::build::*;
//!
//! let file = source(vec![
//!     stmt(let_typed("foo", ty("string"), string("bar"))),
//! ]);
//! assert_eq!(file.constructs.len(), 1);
//! ```

use crate::node::*;

pub fn source(constructs: Vec<TopLevelConstruct>) -> SourceFile {
    SourceFile::new(constructs)
}

pub fn stmt(statement: Statement) -> TopLevelConstruct {
    TopLevelConstruct::Statement(statement)
}

pub fn interface(name: &str, members: Vec<InterfaceMember>) -> TopLevelConstruct {
    TopLevelConstruct::Interface(InterfaceDefinition {
        name: name.to_string(),
        members,
    })
}

// ============================================================================
// Types
// ============================================================================

pub fn ty(name: &str) -> TypeIdentifier {
    TypeIdentifier::Reference(name.to_string())
}

pub fn union(arms: Vec<TypeIdentifier>) -> TypeIdentifier {
    TypeIdentifier::Union(arms)
}

pub fn object_type(fields: Vec<ObjectTypeField>) -> TypeIdentifier {
    TypeIdentifier::ObjectLiteral(fields)
}

pub fn type_field(name: &str, type_ident: TypeIdentifier) -> ObjectTypeField {
    ObjectTypeField {
        name: name.to_string(),
        optional: false,
        type_ident,
    }
}

pub fn fn_type(parameters: Vec<Parameter>, return_type: TypeIdentifier) -> TypeIdentifier {
    TypeIdentifier::Function {
        parameters,
        return_type: Box::new(return_type),
    }
}

pub fn param(name: &str, type_ident: TypeIdentifier) -> Parameter {
    Parameter {
        name: name.to_string(),
        optional: false,
        type_ident: Some(type_ident),
    }
}

pub fn optional_param(name: &str, type_ident: TypeIdentifier) -> Parameter {
    Parameter {
        optional: true,
        ..param(name, type_ident)
    }
}

pub fn field(name: &str, type_ident: TypeIdentifier) -> InterfaceMember {
    InterfaceMember::Field {
        name: name.to_string(),
        type_ident,
        optional: false,
    }
}

pub fn optional_field(name: &str, type_ident: TypeIdentifier) -> InterfaceMember {
    InterfaceMember::Field {
        name: name.to_string(),
        type_ident,
        optional: true,
    }
}

pub fn method(
    name: &str,
    parameters: Vec<Parameter>,
    return_type: Option<TypeIdentifier>,
) -> InterfaceMember {
    InterfaceMember::Method {
        name: name.to_string(),
        parameters,
        return_type,
    }
}

// ============================================================================
// Statements
// ============================================================================

pub fn let_(name: &str, value: Expression) -> Statement {
    Statement::Let(LetDeclaration {
        name: name.to_string(),
        type_annotation: None,
        value: Some(value),
    })
}

pub fn let_typed(name: &str, type_annotation: TypeIdentifier, value: Expression) -> Statement {
    Statement::Let(LetDeclaration {
        name: name.to_string(),
        type_annotation: Some(type_annotation),
        value: Some(value),
    })
}

pub fn let_uninit(name: &str, type_annotation: Option<TypeIdentifier>) -> Statement {
    Statement::Let(LetDeclaration {
        name: name.to_string(),
        type_annotation,
        value: None,
    })
}

pub fn ret(value: Expression) -> Statement {
    Statement::Return(Some(value))
}

pub fn ret_void() -> Statement {
    Statement::Return(None)
}

pub fn expr(expression: Expression) -> Statement {
    Statement::Expression(expression)
}

pub fn fn_decl(
    name: &str,
    parameters: Vec<Parameter>,
    return_type: Option<TypeIdentifier>,
    body: Vec<Statement>,
) -> Statement {
    Statement::Function(FunctionInstantiation {
        name: Some(name.to_string()),
        parameters,
        return_type,
        body,
    })
}

// ============================================================================
// Expressions
// ============================================================================

pub fn num(value: f64) -> Expression {
    Expression::Number(value)
}

pub fn string(value: &str) -> Expression {
    Expression::String(value.to_string())
}

pub fn ident(name: &str) -> Expression {
    Expression::Ident(name.to_string())
}

/// An anonymous function literal.
pub fn func(
    parameters: Vec<Parameter>,
    return_type: Option<TypeIdentifier>,
    body: Vec<Statement>,
) -> Expression {
    Expression::Function(FunctionInstantiation {
        name: None,
        parameters,
        return_type,
        body,
    })
}

pub fn object(fields: Vec<(&str, Expression)>) -> Expression {
    Expression::Object(ObjectInstantiation {
        fields: fields
            .into_iter()
            .map(|(name, value)| ObjectFieldInstantiation {
                name: name.to_string(),
                value,
            })
            .collect(),
    })
}

pub fn access(name: &str) -> ObjectOperation {
    ObjectOperation::Access(name.to_string())
}

pub fn invoke(arguments: Vec<Expression>) -> ObjectOperation {
    ObjectOperation::Invocation(arguments)
}

pub fn chain(accessee: &str, operations: Vec<ObjectOperation>) -> Expression {
    Expression::Chain(ChainedObjectOperation {
        accessee: Accessee::Ident(accessee.to_string()),
        operations,
        assignment: None,
    })
}

pub fn this_chain(operations: Vec<ObjectOperation>) -> Expression {
    Expression::Chain(ChainedObjectOperation {
        accessee: Accessee::This,
        operations,
        assignment: None,
    })
}

/// `accessee.op1.op2 = value`
pub fn chain_assign(
    accessee: Accessee,
    operations: Vec<ObjectOperation>,
    value: Expression,
) -> Expression {
    Expression::Chain(ChainedObjectOperation {
        accessee,
        operations,
        assignment: Some(Box::new(value)),
    })
}

/// `callee(args...)`
pub fn call(callee: &str, arguments: Vec<Expression>) -> Expression {
    chain(callee, vec![invoke(arguments)])
}

pub fn assign(name: &str, value: Expression) -> Expression {
    Expression::Assignment(IdentAssignment {
        ident: name.to_string(),
        value: Box::new(value),
    })
}
