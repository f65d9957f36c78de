//! The registration pass.
//!
//! Walks a source file once, in order, building the scope tree and the type
//! table. Anything that cannot be typed at the point it is seen (a type name
//! declared further down, a call to a function whose return type is still
//! being inferred, a `this.member` declared by a later field) gets a
//! placeholder. The fix-up sweeps at the end redirect every placeholder to
//! its real type.

mod chains;
mod fixup;
mod functions;
mod interfaces;
mod objects;
mod statements;
mod types;

use crate::error::RegistrationError;
use crate::options::RegistrationOptions;
use crate::validator;
use hype_ast as ast;
use hype_binder::{ScopeContext, ScopeTracker, ScopeTree};
use hype_core::{FunctionId, ScopeId, TypeId};
use hype_types::{Member, MemberTracker, MemberWait, TypeTable};
use std::sync::Arc;
use tracing::debug;

/// The object literal currently being registered, as seen through `this`.
struct ThisFrame {
    object: TypeId,
    members: Arc<MemberTracker>,
    /// Placeholders for members referenced before their declaration.
    waits: Vec<(TypeId, MemberWait)>,
}

#[derive(Debug, Clone)]
pub(crate) enum DeferredCheckKind {
    Let { name: String },
    Assignment { target: String },
}

/// A compatibility check postponed because one side was still a placeholder.
#[derive(Debug, Clone)]
pub(crate) struct DeferredCheck {
    pub kind: DeferredCheckKind,
    pub value_ty: TypeId,
    pub target_ty: TypeId,
    pub scope: ScopeId,
}

/// A result type that depends on a type that was pending when it was needed.
#[derive(Debug, Clone)]
enum DeferredResult {
    /// The result of calling `callee`.
    Invocation {
        placeholder: TypeId,
        callee: TypeId,
        path: String,
    },
    /// The type of `base.member`.
    Access {
        placeholder: TypeId,
        base: TypeId,
        member: String,
        scope: ScopeId,
    },
}

/// The output of a successful registration pass.
#[derive(Debug)]
pub struct Registration {
    pub table: TypeTable,
    pub scopes: ScopeTree,
    pub(crate) deferred_checks: Vec<DeferredCheck>,
}

impl Registration {
    /// The global scope.
    pub fn root(&self) -> ScopeId {
        self.scopes.root()
    }
}

pub struct Registrar {
    table: TypeTable,
    scopes: ScopeTracker,
    options: RegistrationOptions,
    this_stack: Vec<ThisFrame>,
    /// Functions whose bodies are being registered, innermost last.
    function_stack: Vec<FunctionId>,
    deferred_checks: Vec<DeferredCheck>,
    deferred_results: Vec<DeferredResult>,
}

impl ScopeContext for Registrar {
    fn scopes(&mut self) -> &mut ScopeTracker {
        &mut self.scopes
    }
}

impl Registrar {
    pub fn new(options: RegistrationOptions) -> Self {
        let mut table = TypeTable::new();
        let scopes = ScopeTracker::with_prelude(&mut table);
        Self {
            table,
            scopes,
            options,
            this_stack: Vec::new(),
            function_stack: Vec::new(),
            deferred_checks: Vec::new(),
            deferred_results: Vec::new(),
        }
    }

    /// Register every construct of `file`, then resolve all placeholders.
    #[tracing::instrument(skip_all, fields(constructs = file.constructs.len()))]
    pub fn register(mut self, file: &ast::SourceFile) -> Result<Registration, RegistrationError> {
        for interface in file.interfaces() {
            self.register_interface(interface)?;
        }
        // Interfaces may name interfaces declared after them.
        let left = self.resolve_unresolved_types()?;
        debug!(unresolved = left.len(), "registered interfaces");

        for statement in file.statements() {
            self.register_statement(statement)?;
        }

        self.fix_unresolved_types()?;
        self.fix_deferred_results()?;
        validator::ensure_resolved(&self.table)?;
        debug!(
            types = self.table.len(),
            scopes = self.scopes.tree().len(),
            "registration complete"
        );

        Ok(Registration {
            table: self.table,
            scopes: self.scopes.into_tree(),
            deferred_checks: self.deferred_checks,
        })
    }

    /// Add `member`, rejecting a redefinition unless the options allow it.
    fn add_member(&self, members: &MemberTracker, member: Member) -> Result<(), RegistrationError> {
        let name = member.name().to_string();
        if members.add_member(member).is_some() && !self.options.allow_member_redefinition {
            return Err(RegistrationError::DuplicateMember { member: name });
        }
        Ok(())
    }

    /// Check that a value of type `value_ty` can be stored where `target_ty`
    /// is expected, or record the check for later when either is pending.
    fn check_assignable(
        &mut self,
        kind: DeferredCheckKind,
        value_ty: TypeId,
        target_ty: TypeId,
    ) -> Result<(), RegistrationError> {
        let check = DeferredCheck {
            kind,
            value_ty,
            target_ty,
            scope: self.scopes.current(),
        };
        if validator::contains_pending(&self.table, value_ty)
            || validator::contains_pending(&self.table, target_ty)
        {
            self.deferred_checks.push(check);
            return Ok(());
        }
        validator::check_assignment(&self.table, self.scopes.tree(), &check)
    }
}
