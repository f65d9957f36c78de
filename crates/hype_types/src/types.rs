//! Type representation.

use crate::member_tracker::MemberTracker;
use hype_core::{FunctionId, ScopeId, TypeId};
use std::sync::Arc;

/// Built-in primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Void,
    Null,
    Undefined,
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::String,
        Primitive::Number,
        Primitive::Void,
        Primitive::Null,
        Primitive::Undefined,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Void => "void",
            Primitive::Null => "null",
            Primitive::Undefined => "undefined",
        }
    }

    pub fn from_name(name: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// The name of the top type. It is represented as a reference, not a primitive.
pub const ANY: &str = "any";

/// The specific data for each type kind.
#[derive(Debug, Clone)]
pub enum TypeKind {
    Function(FunctionId),
    /// An object literal's type.
    Object(Arc<MemberTracker>),
    Interface {
        name: String,
        members: Arc<MemberTracker>,
    },
    /// A type referred to by name, resolved through a scope.
    Reference(String),
    /// A set of alternatives. Arms are distinct under structural equality.
    Union(Vec<TypeId>),
    Primitive(Primitive),
    /// A type that is not known yet. The name is used for diagnostics.
    Placeholder { name: String },
}

/// A type stored in the [`TypeTable`](crate::TypeTable).
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub(crate) redirect: Option<TypeId>,
    pub(crate) resolved: bool,
}

impl TypeSpec {
    pub(crate) fn new(kind: TypeKind) -> Self {
        let resolved = !matches!(kind, TypeKind::Placeholder { .. });
        Self {
            kind,
            redirect: None,
            resolved,
        }
    }

    /// The type this one was redirected to when it was resolved.
    pub fn redirect(&self) -> Option<TypeId> {
        self.redirect
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// A member of an object or interface.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field {
        name: String,
        ty: TypeId,
        optional: bool,
    },
    /// `ty` is a function type.
    Method { name: String, ty: TypeId },
}

impl Member {
    pub fn field(name: impl Into<String>, ty: TypeId) -> Self {
        Member::Field {
            name: name.into(),
            ty,
            optional: false,
        }
    }

    pub fn method(name: impl Into<String>, ty: TypeId) -> Self {
        Member::Method { name: name.into(), ty }
    }

    pub fn name(&self) -> &str {
        match self {
            Member::Field { name, .. } | Member::Method { name, .. } => name,
        }
    }

    pub fn ty(&self) -> TypeId {
        match self {
            Member::Field { ty, .. } | Member::Method { ty, .. } => *ty,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Member::Field { optional: true, .. })
    }
}

/// A parameter in a function signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub optional: bool,
    pub ty: TypeId,
}

/// A function signature, and its body when the function was instantiated.
#[derive(Debug, Clone)]
pub struct Function {
    /// Declared name; anonymous literals have none.
    pub name: Option<String>,
    /// The declared name, or a synthetic `identN` for anonymous literals.
    pub internal_name: String,
    pub parameters: Vec<Parameter>,
    pub explicit_return_type: Option<TypeId>,
    /// Inferred from the body's `return` statements. Always set once the
    /// function has been registered.
    pub implicit_return_type: Option<TypeId>,
    /// The scope holding the body's registered statements.
    pub body: Option<ScopeId>,
}

impl Function {
    /// A body-less signature, as written in an interface or a type annotation.
    pub fn signature(parameters: Vec<Parameter>, return_type: TypeId) -> Self {
        Self {
            name: None,
            internal_name: String::new(),
            parameters,
            explicit_return_type: Some(return_type),
            implicit_return_type: Some(return_type),
            body: None,
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self.internal_name = name.to_string();
        self
    }

    /// The name used in diagnostics.
    pub fn display_name(&self) -> &str {
        match &self.name {
            Some(name) => name,
            None if self.internal_name.is_empty() => "anonymous fn",
            None => &self.internal_name,
        }
    }

    /// The type a call evaluates to: the inferred return type, falling back to
    /// the annotation while the body is still being registered.
    pub fn return_type(&self) -> Option<TypeId> {
        self.implicit_return_type.or(self.explicit_return_type)
    }

    pub fn required_parameter_count(&self) -> usize {
        self.parameters.iter().filter(|p| !p.optional).count()
    }
}
