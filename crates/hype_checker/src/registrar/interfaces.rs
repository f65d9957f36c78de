use super::Registrar;
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_core::TypeId;
use hype_types::{Function, Member};
use tracing::debug;

impl Registrar {
    /// Declare an interface in the global scope.
    ///
    /// Member types are registered before the interface name is declared, so
    /// a self-referencing member goes through a placeholder like any other
    /// forward reference.
    pub(super) fn register_interface(
        &mut self,
        def: &ast::InterfaceDefinition,
    ) -> Result<TypeId, RegistrationError> {
        let (ty, members) = self.table.add_interface(&def.name);

        for member in &def.members {
            let member = match member {
                ast::InterfaceMember::Field {
                    name,
                    type_ident,
                    optional,
                } => Member::Field {
                    name: name.clone(),
                    ty: self.type_from_ident(type_ident)?,
                    optional: *optional,
                },
                ast::InterfaceMember::Method {
                    name,
                    parameters,
                    return_type,
                } => {
                    let parameters = self.parameters(parameters)?;
                    let return_type = self
                        .optional_type(return_type.as_ref())?
                        .unwrap_or(self.table.void_type);
                    let signature = Function::signature(parameters, return_type).named(name);
                    let (_, method) = self.table.add_function(signature);
                    Member::method(name.clone(), method)
                }
            };
            self.add_member(&members, member)?;
        }

        members.seal();
        self.scopes.add_type(&def.name, ty);
        debug!(name = %def.name, members = members.len(), "registered interface");
        Ok(ty)
    }
}
