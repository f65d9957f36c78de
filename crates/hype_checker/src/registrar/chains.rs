//! Chained operations: `a.b`, `f(x)`, `this.name`, `obj.count = 1`.

use super::{DeferredCheckKind, DeferredResult, Registrar};
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_binder::ir;
use hype_core::TypeId;
use tracing::trace;

impl Registrar {
    pub(super) fn register_chain(
        &mut self,
        chain: &ast::ChainedObjectOperation,
    ) -> Result<ir::Expression, RegistrationError> {
        let (accessee, mut path) = match &chain.accessee {
            ast::Accessee::Ident(name) => {
                // `x = value` can arrive as a chain without links.
                if chain.operations.is_empty() {
                    if let Some(value) = &chain.assignment {
                        return self.register_ident_assignment(name, value);
                    }
                }
                let ty = self.scopes.ident_type(name)?;
                (ir::Accessee::Ident { name: name.clone(), ty }, name.clone())
            }
            ast::Accessee::This => {
                let frame = self.this_stack.last().ok_or(RegistrationError::ThisOutsideObject)?;
                (ir::Accessee::This { ty: frame.object }, "this".to_string())
            }
        };

        let mut current = accessee.ty();
        let mut operations = Vec::with_capacity(chain.operations.len() + 1);
        for operation in &chain.operations {
            match operation {
                ast::ObjectOperation::Access(name) => {
                    let ty = self.access_member(current, name, &path)?;
                    path.push('.');
                    path.push_str(name);
                    operations.push(ir::Operation::Access { name: name.clone(), ty });
                    current = ty;
                }
                ast::ObjectOperation::Invocation(arguments) => {
                    let arguments = arguments
                        .iter()
                        .map(|argument| self.register_expression(argument))
                        .collect::<Result<Vec<_>, _>>()?;
                    let ty = self.invocation_result(current, &path)?;
                    operations.push(ir::Operation::Invocation {
                        callee: current,
                        arguments,
                        ty,
                    });
                    path.push_str("()");
                    current = ty;
                }
            }
        }

        if let Some(value) = &chain.assignment {
            // The last access is the member being assigned.
            let Some(ir::Operation::Access { name, ty: member_ty }) = operations.pop() else {
                return Err(RegistrationError::InvalidAssignmentTarget);
            };
            let value = self.register_expression(value)?;
            let value_ty = value.ty(&self.table);
            let kind = DeferredCheckKind::Assignment {
                target: path.clone(),
            };
            self.check_assignable(kind, value_ty, member_ty)?;
            operations.push(ir::Operation::Assignment {
                name,
                value: Box::new(value),
                ty: member_ty,
            });
            current = member_ty;
        }

        Ok(ir::Expression::Chain(ir::ChainedOperation {
            accessee,
            operations,
            ty: current,
        }))
    }

    /// The type of `base.<name>`. `path` spells out `base` for diagnostics.
    fn access_member(
        &mut self,
        base: TypeId,
        name: &str,
        path: &str,
    ) -> Result<TypeId, RegistrationError> {
        if self.is_this_object(base) {
            return self.this_member(name);
        }
        if self.table.is_any(base) {
            return Ok(self.table.any_type);
        }
        if self.table.is_pending(base) {
            let placeholder = self.table.add_placeholder(format!("{path}.{name}"));
            trace!(member = name, %placeholder, "deferred member access");
            self.deferred_results.push(DeferredResult::Access {
                placeholder,
                base,
                member: name.to_string(),
                scope: self.scopes.current(),
            });
            return Ok(placeholder);
        }

        let resolved = self.scopes.resolve_type(&self.table, base)?;
        match self.table.members_of(resolved).and_then(|members| members.member(name)) {
            Some(member) => Ok(member.ty()),
            None => Err(RegistrationError::UnknownMember {
                member: name.to_string(),
                ty: self.table.display(resolved),
            }),
        }
    }

    /// The type a call to `callee` evaluates to. A callee whose return type
    /// is not known yet gets a placeholder settled by the fix-up sweep.
    fn invocation_result(
        &mut self,
        callee: TypeId,
        path: &str,
    ) -> Result<TypeId, RegistrationError> {
        if self.table.is_any(callee) {
            return Ok(self.table.any_type);
        }
        if !self.table.is_pending(callee) {
            let resolved = self.scopes.resolve_type(&self.table, callee)?;
            let Some(function) = self.table.as_function(resolved) else {
                return Err(RegistrationError::NotCallable {
                    name: path.to_string(),
                    ty: self.table.display(resolved),
                });
            };
            if let Some(return_type) = self.table.function(function).return_type() {
                return Ok(return_type);
            }
        }

        let placeholder = self.table.add_placeholder(format!("{path}()"));
        trace!(callee = %callee, %placeholder, "deferred invocation result");
        self.deferred_results.push(DeferredResult::Invocation {
            placeholder,
            callee,
            path: path.to_string(),
        });
        Ok(placeholder)
    }
}
