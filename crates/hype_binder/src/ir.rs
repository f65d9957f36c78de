//! The typed statement tree produced by registration.
//!
//! Every registered statement remembers the scope it was registered in, and
//! every expression carries the type it was given at that point. Code
//! generators read this tree; nothing here is mutated after registration.

use hype_core::{FunctionId, ScopeId, TypeId};
use hype_types::TypeTable;

#[derive(Debug, Clone)]
pub struct StatementOrExpression {
    pub kind: Statement,
    /// The scope the statement was registered in.
    pub scope: ScopeId,
}

#[derive(Debug, Clone)]
pub enum Statement {
    Let {
        name: String,
        explicit_type: Option<TypeId>,
        value: Option<Expression>,
        /// The type the name was bound to.
        ty: TypeId,
    },
    Return(Option<Expression>),
    Expression(Expression),
    /// A function declared in statement position.
    Function(FunctionId),
}

impl Statement {
    /// The expression directly held by this statement, if any.
    pub fn expression(&self) -> Option<&Expression> {
        match self {
            Statement::Let { value, .. } => value.as_ref(),
            Statement::Return(value) => value.as_ref(),
            Statement::Expression(expr) => Some(expr),
            Statement::Function(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expression {
    Number(f64),
    String(String),
    Ident { name: String, ty: TypeId },
    Function { function: FunctionId, ty: TypeId },
    Object { ty: TypeId, fields: Vec<ObjectField> },
    Chain(ChainedOperation),
    /// `name = value`
    Assignment {
        name: String,
        value: Box<Expression>,
        ty: TypeId,
    },
}

#[derive(Debug, Clone)]
pub struct ObjectField {
    pub name: String,
    pub value: Expression,
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub struct ChainedOperation {
    pub accessee: Accessee,
    pub operations: Vec<Operation>,
    /// The type of the last link.
    pub ty: TypeId,
}

#[derive(Debug, Clone)]
pub enum Accessee {
    Ident { name: String, ty: TypeId },
    /// The object literal being registered.
    This { ty: TypeId },
}

impl Accessee {
    pub fn ty(&self) -> TypeId {
        match self {
            Accessee::Ident { ty, .. } | Accessee::This { ty } => *ty,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Operation {
    Access {
        name: String,
        ty: TypeId,
    },
    Invocation {
        /// The type being called.
        callee: TypeId,
        arguments: Vec<Expression>,
        /// The call's result.
        ty: TypeId,
    },
    /// Assignment to the member `name` of the previous link.
    Assignment {
        name: String,
        value: Box<Expression>,
        ty: TypeId,
    },
}

impl Expression {
    /// The type of this expression.
    pub fn ty(&self, table: &TypeTable) -> TypeId {
        match self {
            Expression::Number(_) => table.number_type,
            Expression::String(_) => table.string_type,
            Expression::Ident { ty, .. }
            | Expression::Function { ty, .. }
            | Expression::Object { ty, .. }
            | Expression::Assignment { ty, .. } => *ty,
            Expression::Chain(chain) => chain.ty,
        }
    }

    /// Visit this expression and every expression nested in it, parents
    /// first. Function bodies are not entered; they live in their own scopes.
    pub fn for_each<'a>(&'a self, visit: &mut impl FnMut(&'a Expression)) {
        visit(self);
        match self {
            Expression::Object { fields, .. } => {
                for field in fields {
                    field.value.for_each(visit);
                }
            }
            Expression::Chain(chain) => {
                for operation in &chain.operations {
                    match operation {
                        Operation::Invocation { arguments, .. } => {
                            for argument in arguments {
                                argument.for_each(visit);
                            }
                        }
                        Operation::Assignment { value, .. } => value.for_each(visit),
                        Operation::Access { .. } => {}
                    }
                }
            }
            Expression::Assignment { value, .. } => value.for_each(visit),
            Expression::Number(_)
            | Expression::String(_)
            | Expression::Ident { .. }
            | Expression::Function { .. } => {}
        }
    }
}

/// The type of a registered expression.
pub fn expr_type(table: &TypeTable, expr: &Expression) -> TypeId {
    expr.ty(table)
}
