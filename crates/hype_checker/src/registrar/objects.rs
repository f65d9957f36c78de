//! Object literals and `this`.
//!
//! Fields are registered in source order. A method body may reach a member
//! through `this` before the field declaring it has been registered; such a
//! reference gets a placeholder and a waiter on the object's member tracker.
//! When the literal is complete the tracker is sealed, which fails every
//! waiter whose member never showed up, and each placeholder is redirected to
//! the type its waiter received.

use super::{Registrar, ThisFrame};
use crate::error::RegistrationError;
use hype_ast as ast;
use hype_binder::ir;
use hype_core::TypeId;
use hype_types::{Member, MemberTracker, MemberWait, TypeError, WaitError};
use std::sync::Arc;
use tracing::{debug, trace};

impl Registrar {
    pub(super) fn register_object(
        &mut self,
        object: &ast::ObjectInstantiation,
    ) -> Result<ir::Expression, RegistrationError> {
        let (ty, members) = self.table.add_object();
        self.this_stack.push(ThisFrame {
            object: ty,
            members: Arc::clone(&members),
            waits: Vec::new(),
        });

        let fields = self.register_fields(&members, &object.fields);

        let waits = self.this_stack.pop().map(|frame| frame.waits).unwrap_or_default();
        let unanswered = members.seal();
        if !unanswered.is_empty() {
            debug!(?unanswered, "sealed object with outstanding waiters");
        }
        // Join every waiter, even when a field failed, so no thread outlives
        // the literal.
        let joined = self.join_waits(waits);

        let fields = fields?;
        joined?;
        Ok(ir::Expression::Object { ty, fields })
    }

    /// Function values become methods; everything else is a field.
    fn register_fields(
        &mut self,
        members: &MemberTracker,
        fields: &[ast::ObjectFieldInstantiation],
    ) -> Result<Vec<ir::ObjectField>, RegistrationError> {
        let mut registered = Vec::with_capacity(fields.len());
        for field in fields {
            let value = self.register_expression(&field.value)?;
            let ty = value.ty(&self.table);
            let member = match value {
                ir::Expression::Function { .. } => Member::method(field.name.clone(), ty),
                _ => Member::field(field.name.clone(), ty),
            };
            self.add_member(members, member)?;
            registered.push(ir::ObjectField {
                name: field.name.clone(),
                value,
                ty,
            });
        }
        Ok(registered)
    }

    /// Whether `base` is the object literal `this` currently refers to. Its
    /// members may still be on their way.
    pub(super) fn is_this_object(&self, base: TypeId) -> bool {
        self.this_stack
            .last()
            .is_some_and(|frame| self.table.deref(base) == frame.object)
    }

    /// The type of `this.<name>`: the member's type when it is already
    /// declared, a placeholder filled in when the literal completes otherwise.
    pub(super) fn this_member(&mut self, name: &str) -> Result<TypeId, RegistrationError> {
        let frame = self
            .this_stack
            .last_mut()
            .ok_or(RegistrationError::ThisOutsideObject)?;
        if let Some(member) = frame.members.member(name) {
            return Ok(member.ty());
        }

        let wait = frame
            .members
            .spawn_wait(name, self.options.member_wait_timeout)
            .map_err(|source| RegistrationError::MemberWaitFailed { source })?;
        let placeholder = self.table.add_placeholder(format!("this.{name}"));
        trace!(member = name, %placeholder, "waiting for member");
        frame.waits.push((placeholder, wait));
        Ok(placeholder)
    }

    fn join_waits(&mut self, waits: Vec<(TypeId, MemberWait)>) -> Result<(), RegistrationError> {
        let mut first_error = None;
        for (placeholder, wait) in waits {
            let member = wait.name().to_string();
            let outcome = match wait.join() {
                Ok(delivered) => self.redirect(placeholder, delivered.ty(), &member),
                Err(WaitError::Sealed { name }) => {
                    Err(RegistrationError::UndeclaredSelfReference { member: name })
                }
                Err(WaitError::TimedOut { name, timeout }) => {
                    Err(RegistrationError::MemberWaitTimedOut {
                        member: name,
                        timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    })
                }
                Err(source) => Err(RegistrationError::MemberWaitFailed { source }),
            };
            trace!(member = %member, ok = outcome.is_ok(), "joined member waiter");
            if let Err(err) = outcome {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Resolve `placeholder` to `target`. `name` is what the placeholder
    /// stands for, for diagnostics.
    pub(super) fn redirect(
        &mut self,
        placeholder: TypeId,
        target: TypeId,
        name: &str,
    ) -> Result<(), RegistrationError> {
        match self.table.resolve_placeholder(placeholder, target) {
            Ok(()) | Err(TypeError::AlreadyResolved { .. }) => Ok(()),
            Err(TypeError::CyclicRedirect { .. }) => Err(RegistrationError::CyclicType {
                name: name.to_string(),
            }),
        }
    }
}
