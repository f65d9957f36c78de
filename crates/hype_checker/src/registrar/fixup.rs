//! Fix-up sweeps run once every construct has been registered.

use super::{DeferredResult, Registrar};
use crate::error::RegistrationError;
use hype_core::TypeId;
use tracing::debug;

impl Registrar {
    /// Resolve type-name placeholders whose names are declared by now, each
    /// against the scope it was created in. Returns the names still unknown.
    pub(super) fn resolve_unresolved_types(&mut self) -> Result<Vec<String>, RegistrationError> {
        let mut unknown = Vec::new();
        for entry in self.scopes.tree().unresolved_types() {
            let Some(target) = self.scopes.tree().lookup_type(entry.scope, &entry.name) else {
                unknown.push(entry.name);
                continue;
            };
            self.redirect(entry.placeholder, target, &entry.name)?;
            self.scopes
                .tree_mut()
                .get_mut(entry.scope)
                .unresolved_types
                .shift_remove(&entry.name);
        }
        Ok(unknown)
    }

    /// Like [`resolve_unresolved_types`](Self::resolve_unresolved_types), but
    /// any name still unknown is an error.
    pub(super) fn fix_unresolved_types(&mut self) -> Result<(), RegistrationError> {
        let unknown = self.resolve_unresolved_types()?;
        if unknown.is_empty() {
            return Ok(());
        }
        let mut names: Vec<String> = Vec::with_capacity(unknown.len());
        for name in unknown {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Err(RegistrationError::UnresolvedTypes { names })
    }

    /// Settle deferred call results and member accesses. One result can wait
    /// on another, so sweep until a pass makes no progress.
    pub(super) fn fix_deferred_results(&mut self) -> Result<(), RegistrationError> {
        let mut pending = std::mem::take(&mut self.deferred_results);
        let mut passes = 0;
        while !pending.is_empty() {
            passes += 1;
            let before = pending.len();
            let mut waiting = Vec::new();
            for deferred in pending {
                if !self.settle(&deferred)? {
                    waiting.push(deferred);
                }
            }
            pending = waiting;
            if pending.len() == before {
                break;
            }
        }
        debug!(passes, left = pending.len(), "fixed deferred results");

        if pending.is_empty() {
            return Ok(());
        }
        let names = pending
            .iter()
            .map(|deferred| match deferred {
                DeferredResult::Invocation { path, .. } => format!("{path}()"),
                DeferredResult::Access { member, .. } => member.clone(),
            })
            .collect();
        Err(RegistrationError::UnresolvedTypes { names })
    }

    /// Try to resolve one deferred result. `Ok(false)` means what it depends
    /// on is still pending.
    fn settle(&mut self, deferred: &DeferredResult) -> Result<bool, RegistrationError> {
        match deferred {
            DeferredResult::Invocation {
                placeholder,
                callee,
                path,
            } => {
                if self.table.is_pending(*callee) {
                    return Ok(false);
                }
                if self.table.is_any(*callee) {
                    self.redirect(*placeholder, self.table.any_type, path)?;
                    return Ok(true);
                }
                let Some(function) = self.table.as_function(*callee) else {
                    return Err(RegistrationError::NotCallable {
                        name: path.clone(),
                        ty: self.table.display(*callee),
                    });
                };
                let Some(return_type) = self.table.function(function).return_type() else {
                    return Ok(false);
                };
                let return_type = self.without_self_arm(return_type, *placeholder, path)?;
                self.redirect(*placeholder, return_type, path)?;
                Ok(true)
            }
            DeferredResult::Access {
                placeholder,
                base,
                member,
                scope,
            } => {
                if self.table.is_pending(*base) {
                    return Ok(false);
                }
                if self.table.is_any(*base) {
                    self.redirect(*placeholder, self.table.any_type, member)?;
                    return Ok(true);
                }
                let resolved = self.scopes.tree().resolve_type(&self.table, *scope, *base)?;
                let found = self
                    .table
                    .members_of(resolved)
                    .and_then(|members| members.member(member));
                let Some(found) = found else {
                    return Err(RegistrationError::UnknownMember {
                        member: member.clone(),
                        ty: self.table.display(resolved),
                    });
                };
                self.redirect(*placeholder, found.ty(), member)?;
                Ok(true)
            }
        }
    }

    /// A recursive call ahead of the base case leaves the call's own result
    /// as an arm of the callee's return union. Drop that arm so the result
    /// stands for the remaining arms. Nothing remaining is a cycle.
    fn without_self_arm(
        &mut self,
        return_type: TypeId,
        placeholder: TypeId,
        path: &str,
    ) -> Result<TypeId, RegistrationError> {
        self.table
            .remove_arm(return_type, placeholder)
            .ok_or_else(|| RegistrationError::CyclicType { name: path.to_string() })
    }
}
