use super::{DeferredCheckKind, Registrar};
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_binder::ir;

impl Registrar {
    // ========================================================================
    // Statements
    // ========================================================================

    pub(super) fn register_statement(
        &mut self,
        statement: &ast::Statement,
    ) -> Result<(), RegistrationError> {
        match statement {
            ast::Statement::Let(decl) => {
                let registered = self.register_let(decl)?;
                self.scopes.add_statement(registered);
            }
            ast::Statement::Return(value) => {
                let registered = self.register_return(value.as_ref())?;
                self.scopes.add_statement(registered);
            }
            ast::Statement::Expression(expr) => {
                let registered = self.register_expression(expr)?;
                self.scopes.add_statement(ir::Statement::Expression(registered));
            }
            ast::Statement::Function(func) => {
                self.register_function_declaration(func)?;
            }
        }
        Ok(())
    }

    /// Bind a `let`. The binding takes the annotation when there is one, the
    /// initializer's type otherwise, and `any` when there is neither.
    fn register_let(
        &mut self,
        decl: &ast::LetDeclaration,
    ) -> Result<ir::Statement, RegistrationError> {
        let explicit_type = self.optional_type(decl.type_annotation.as_ref())?;
        let value = decl
            .value
            .as_ref()
            .map(|value| self.register_expression(value))
            .transpose()?;
        let inferred = value.as_ref().map(|value| value.ty(&self.table));

        if let (Some(explicit), Some(inferred)) = (explicit_type, inferred) {
            let kind = DeferredCheckKind::Let {
                name: decl.name.clone(),
            };
            self.check_assignable(kind, inferred, explicit)?;
        }

        let ty = explicit_type.or(inferred).unwrap_or(self.table.any_type);
        self.scopes.add_identifier(&decl.name, ty);

        Ok(ir::Statement::Let {
            name: decl.name.clone(),
            explicit_type,
            value,
            ty,
        })
    }

    /// Widen the enclosing function's inferred return type with this
    /// statement's type. `return;` contributes `void`.
    fn register_return(
        &mut self,
        value: Option<&ast::Expression>,
    ) -> Result<ir::Statement, RegistrationError> {
        let function = *self
            .function_stack
            .last()
            .ok_or(RegistrationError::ReturnOutsideFunction)?;

        let value = value.map(|value| self.register_expression(value)).transpose()?;
        let ty = match &value {
            Some(value) => value.ty(&self.table),
            None => self.table.void_type,
        };

        let widened = match self.table.function(function).implicit_return_type {
            Some(existing) => self.table.widen(existing, ty),
            None => ty,
        };
        self.table.function_mut(function).implicit_return_type = Some(widened);

        Ok(ir::Statement::Return(value))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub(super) fn register_expression(
        &mut self,
        expr: &ast::Expression,
    ) -> Result<ir::Expression, RegistrationError> {
        match expr {
            ast::Expression::Number(value) => Ok(ir::Expression::Number(*value)),
            ast::Expression::String(value) => Ok(ir::Expression::String(value.clone())),
            ast::Expression::Ident(name) => {
                let ty = self.scopes.ident_type(name)?;
                Ok(ir::Expression::Ident { name: name.clone(), ty })
            }
            ast::Expression::Function(func) => self.register_function_literal(func),
            ast::Expression::Object(object) => self.register_object(object),
            ast::Expression::Chain(chain) => self.register_chain(chain),
            ast::Expression::Assignment(assignment) => {
                self.register_ident_assignment(&assignment.ident, &assignment.value)
            }
        }
    }

    /// `name = value`, checked against the type `name` is bound to.
    pub(super) fn register_ident_assignment(
        &mut self,
        name: &str,
        value: &ast::Expression,
    ) -> Result<ir::Expression, RegistrationError> {
        let target_ty = self.scopes.ident_type(name)?;
        let value = self.register_expression(value)?;
        let value_ty = value.ty(&self.table);

        let kind = DeferredCheckKind::Assignment {
            target: name.to_string(),
        };
        self.check_assignable(kind, value_ty, target_ty)?;

        Ok(ir::Expression::Assignment {
            name: name.to_string(),
            value: Box::new(value),
            ty: target_ty,
        })
    }
}
