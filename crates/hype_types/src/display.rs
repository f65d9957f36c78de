//! Rendering types for diagnostics.

use crate::table::TypeTable;
use crate::types::*;
use hype_core::TypeId;
use rustc_hash::FxHashSet;
use std::fmt::Write;

impl TypeTable {
    /// Render `id` the way it would be written in source, e.g.
    /// `{ name: string, greet(): void }` or `(a: string, b?: number) => void`.
    pub fn display(&self, id: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, id, &mut FxHashSet::default());
        out
    }

    fn write_type(&self, out: &mut String, id: TypeId, visiting: &mut FxHashSet<TypeId>) {
        let id = self.deref(id);
        let kind = self.kind(id);
        match kind {
            TypeKind::Primitive(primitive) => return out.push_str(primitive.name()),
            TypeKind::Reference(name)
            | TypeKind::Interface { name, .. }
            | TypeKind::Placeholder { name } => return out.push_str(name),
            _ => {}
        }

        // Types that reach themselves through a member, an arm or a return.
        if !visiting.insert(id) {
            let back_reference = match kind {
                TypeKind::Object(_) => "{ ... }",
                _ => "...",
            };
            out.push_str(back_reference);
            return;
        }
        match kind {
            TypeKind::Union(arms) => {
                for (i, &arm) in arms.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" | ");
                    }
                    self.write_type(out, arm, visiting);
                }
            }
            TypeKind::Function(function) => {
                let function = self.function(*function);
                self.write_parameters(out, &function.parameters, visiting);
                out.push_str(" => ");
                self.write_return(out, function.return_type(), visiting);
            }
            TypeKind::Object(members) => {
                let members = members.members();
                if members.is_empty() {
                    out.push_str("{}");
                } else {
                    out.push_str("{ ");
                    for (i, member) in members.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_member(out, member, visiting);
                    }
                    out.push_str(" }");
                }
            }
            TypeKind::Primitive(_)
            | TypeKind::Reference(_)
            | TypeKind::Interface { .. }
            | TypeKind::Placeholder { .. } => {}
        }
        visiting.remove(&id);
    }

    fn write_member(&self, out: &mut String, member: &Member, visiting: &mut FxHashSet<TypeId>) {
        match member {
            Member::Field { name, ty, optional } => {
                out.push_str(name);
                if *optional {
                    out.push('?');
                }
                out.push_str(": ");
                self.write_type(out, *ty, visiting);
            }
            Member::Method { name, ty } => {
                out.push_str(name);
                match self.as_function(*ty) {
                    Some(function) => {
                        let function = self.function(function);
                        self.write_parameters(out, &function.parameters, visiting);
                        out.push_str(": ");
                        self.write_return(out, function.return_type(), visiting);
                    }
                    None => {
                        out.push_str(": ");
                        self.write_type(out, *ty, visiting);
                    }
                }
            }
        }
    }

    fn write_parameters(
        &self,
        out: &mut String,
        parameters: &[Parameter],
        visiting: &mut FxHashSet<TypeId>,
    ) {
        out.push('(');
        for (i, parameter) in parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let optional = if parameter.optional { "?" } else { "" };
            let _ = write!(out, "{}{}: ", parameter.name, optional);
            self.write_type(out, parameter.ty, visiting);
        }
        out.push(')');
    }

    fn write_return(
        &self,
        out: &mut String,
        return_type: Option<TypeId>,
        visiting: &mut FxHashSet<TypeId>,
    ) {
        match return_type {
            Some(ty) => self.write_type(out, ty, visiting),
            None => out.push('?'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Function;

    #[test]
    fn test_display_primitives_and_unions() {
        let mut table = TypeTable::new();
        assert_eq!(table.display(table.string_type), "string");
        let union = table.widen(table.string_type, table.number_type);
        assert_eq!(table.display(union), "string | number");
    }

    #[test]
    fn test_display_object() {
        let mut table = TypeTable::new();
        let (object, members) = table.add_object();
        members.add_member(Member::field("name", table.string_type));
        members.add_member(Member::Field {
            name: "age".into(),
            ty: table.number_type,
            optional: true,
        });
        assert_eq!(table.display(object), "{ name: string, age?: number }");
    }

    #[test]
    fn test_display_function() {
        let mut table = TypeTable::new();
        let parameters = vec![
            Parameter {
                name: "a".into(),
                optional: false,
                ty: table.string_type,
            },
            Parameter {
                name: "b".into(),
                optional: true,
                ty: table.number_type,
            },
        ];
        let (_, function) = table.add_function(Function::signature(parameters, table.void_type));
        assert_eq!(table.display(function), "(a: string, b?: number) => void");
    }

    #[test]
    fn test_display_self_referencing_object() {
        let mut table = TypeTable::new();
        let (object, members) = table.add_object();
        members.add_member(Member::field("me", object));
        assert_eq!(table.display(object), "{ me: { ... } }");
    }

    #[test]
    fn test_display_self_returning_function() {
        let mut table = TypeTable::new();
        let placeholder = table.add_placeholder("f");
        let (_, function) = table.add_function(Function::signature(vec![], placeholder));
        table.resolve_placeholder(placeholder, function).unwrap();
        assert_eq!(table.display(function), "() => ...");
    }

    #[test]
    fn test_display_union_reaching_itself_through_a_return() {
        let mut table = TypeTable::new();
        let placeholder = table.add_placeholder("g");
        let (_, function) = table.add_function(Function::signature(vec![], placeholder));
        let union = table.widen(function, table.number_type);
        table.resolve_placeholder(placeholder, union).unwrap();
        assert_eq!(table.display(union), "() => ... | number");
    }
}
