use super::Registrar;
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_binder::{ir, ScopeContext};
use hype_core::{FunctionId, ScopeId, TypeId};
use hype_types::Function;
use tracing::debug;

impl Registrar {
    /// A function in statement position. The name is bound in the enclosing
    /// scope before the body is registered, so the body can call itself.
    pub(super) fn register_function_declaration(
        &mut self,
        func: &ast::FunctionInstantiation,
    ) -> Result<FunctionId, RegistrationError> {
        let internal_name = self.internal_name(func);
        let (function, ty) = self.function_header(func, internal_name)?;
        if let Some(name) = &func.name {
            self.scopes.add_identifier(name, ty);
        }
        self.scopes.add_statement(ir::Statement::Function(function));

        self.within_new_scope(|this, body| this.register_body(function, func, body))?;
        Ok(function)
    }

    /// A function literal. Its body scope only joins the tree once the whole
    /// literal registered. A named literal can call itself by name from
    /// inside its body.
    pub(super) fn register_function_literal(
        &mut self,
        func: &ast::FunctionInstantiation,
    ) -> Result<ir::Expression, RegistrationError> {
        let internal_name = self.internal_name(func);
        self.within_temp_scope(|this, body| {
            let (function, ty) = this.function_header(func, internal_name)?;
            if let Some(name) = &func.name {
                this.scopes.add_identifier(name, ty);
            }
            this.register_body(function, func, body)?;
            Ok(ir::Expression::Function { function, ty })
        })
    }

    /// The declared name, or a synthetic one from the current scope.
    fn internal_name(&mut self, func: &ast::FunctionInstantiation) -> String {
        match &func.name {
            Some(name) => name.clone(),
            None => self.scopes.new_ident(),
        }
    }

    fn function_header(
        &mut self,
        func: &ast::FunctionInstantiation,
        internal_name: String,
    ) -> Result<(FunctionId, TypeId), RegistrationError> {
        let parameters = self.parameters(&func.parameters)?;
        let explicit_return_type = self.optional_type(func.return_type.as_ref())?;

        Ok(self.table.add_function(Function {
            name: func.name.clone(),
            internal_name,
            parameters,
            explicit_return_type,
            implicit_return_type: None,
            body: None,
        }))
    }

    /// Register the body in `scope`, which must be current, and settle the
    /// inferred return type. A body without `return` returns `void`.
    fn register_body(
        &mut self,
        function: FunctionId,
        func: &ast::FunctionInstantiation,
        scope: ScopeId,
    ) -> Result<(), RegistrationError> {
        self.table.function_mut(function).body = Some(scope);
        for param in self.table.function(function).parameters.clone() {
            self.scopes.add_identifier(&param.name, param.ty);
        }

        self.function_stack.push(function);
        let registered = func
            .body
            .iter()
            .try_for_each(|statement| self.register_statement(statement));
        self.function_stack.pop();
        registered?;

        let void = self.table.void_type;
        let record = self.table.function_mut(function);
        let implicit = *record.implicit_return_type.get_or_insert(void);
        debug!(function = %record.display_name(), %implicit, "synthesized return type");
        Ok(())
    }
}
