//! Types written in source: annotations, parameters and type literals.

use super::Registrar;
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_core::TypeId;
use hype_types::{Function, Member, Parameter};

impl Registrar {
    /// The type an annotation denotes. Names that are not declared yet become
    /// placeholders in the current scope.
    pub(super) fn type_from_ident(
        &mut self,
        ident: &ast::TypeIdentifier,
    ) -> Result<TypeId, RegistrationError> {
        match ident {
            ast::TypeIdentifier::Reference(name) => {
                Ok(self.scopes.type_from_name(&mut self.table, name))
            }
            ast::TypeIdentifier::Union(arms) => {
                let Some((first, rest)) = arms.split_first() else {
                    return Ok(self.table.any_type);
                };
                let mut union = self.type_from_ident(first)?;
                for arm in rest {
                    let arm = self.type_from_ident(arm)?;
                    union = self.table.widen(union, arm);
                }
                Ok(union)
            }
            ast::TypeIdentifier::ObjectLiteral(fields) => {
                let (object, members) = self.table.add_object();
                for field in fields {
                    let ty = self.type_from_ident(&field.type_ident)?;
                    self.add_member(
                        &members,
                        Member::Field {
                            name: field.name.clone(),
                            ty,
                            optional: field.optional,
                        },
                    )?;
                }
                members.seal();
                Ok(object)
            }
            ast::TypeIdentifier::Function {
                parameters,
                return_type,
            } => {
                let parameters = self.parameters(parameters)?;
                let return_type = self.type_from_ident(return_type)?;
                let (_, ty) = self.table.add_function(Function::signature(parameters, return_type));
                Ok(ty)
            }
        }
    }

    /// The annotation's type, or `None` when there is no annotation.
    pub(super) fn optional_type(
        &mut self,
        ident: Option<&ast::TypeIdentifier>,
    ) -> Result<Option<TypeId>, RegistrationError> {
        ident.map(|ident| self.type_from_ident(ident)).transpose()
    }

    /// Parameters without an annotation take `any`.
    pub(super) fn parameters(
        &mut self,
        parameters: &[ast::Parameter],
    ) -> Result<Vec<Parameter>, RegistrationError> {
        parameters
            .iter()
            .map(|param| {
                let ty = self
                    .optional_type(param.type_ident.as_ref())?
                    .unwrap_or(self.table.any_type);
                Ok(Parameter {
                    name: param.name.clone(),
                    optional: param.optional,
                    ty,
                })
            })
            .collect()
    }
}
