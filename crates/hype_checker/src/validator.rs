//! Checks that need the whole program registered.
//!
//! The validator runs after every placeholder has been resolved. It re-runs
//! the compatibility checks registration had to postpone, compares each
//! function's inferred return type against its annotation, and checks every
//! call site against the signature it calls.

use crate::error::RegistrationError;
use crate::registrar::{DeferredCheck, DeferredCheckKind, Registration};
use hype_binder::{ir, ScopeTree};
use hype_core::{ScopeId, TypeId};
use hype_types::{TypeKind, TypeTable};
use tracing::debug;

/// Validate a registered program.
#[tracing::instrument(skip_all)]
pub fn validate(registration: &Registration) -> Result<(), RegistrationError> {
    let table = &registration.table;
    let tree = &registration.scopes;

    for check in &registration.deferred_checks {
        check_assignment(table, tree, check)?;
    }
    validate_return_types(table, tree)?;
    validate_invocations(table, tree)?;
    ensure_resolved(table)?;

    debug!(deferred = registration.deferred_checks.len(), "validation complete");
    Ok(())
}

/// Fail with the names of any placeholders that were never resolved.
pub(crate) fn ensure_resolved(table: &TypeTable) -> Result<(), RegistrationError> {
    let pending = table.pending_placeholders();
    if pending.is_empty() {
        return Ok(());
    }
    let names = pending
        .into_iter()
        .map(|id| match &table.get(id).kind {
            TypeKind::Placeholder { name } => name.clone(),
            _ => id.to_string(),
        })
        .collect();
    Err(RegistrationError::UnresolvedTypes { names })
}

/// Whether `ty` or any type it is built from is still a pending placeholder.
pub(crate) fn contains_pending(table: &TypeTable, ty: TypeId) -> bool {
    let mut visited = Vec::new();
    contains_pending_inner(table, ty, &mut visited)
}

fn contains_pending_inner(table: &TypeTable, ty: TypeId, visited: &mut Vec<TypeId>) -> bool {
    let ty = table.deref(ty);
    if table.is_pending(ty) {
        return true;
    }
    if visited.contains(&ty) {
        return false;
    }
    visited.push(ty);

    match table.kind(ty) {
        TypeKind::Union(arms) => arms
            .iter()
            .any(|&arm| contains_pending_inner(table, arm, visited)),
        TypeKind::Object(members) | TypeKind::Interface { members, .. } => members
            .members()
            .iter()
            .any(|member| contains_pending_inner(table, member.ty(), visited)),
        TypeKind::Function(function) => {
            let function = table.function(*function);
            function
                .parameters
                .iter()
                .any(|param| contains_pending_inner(table, param.ty, visited))
                || function
                    .return_type()
                    .is_some_and(|ret| contains_pending_inner(table, ret, visited))
        }
        TypeKind::Reference(_) | TypeKind::Primitive(_) | TypeKind::Placeholder { .. } => false,
    }
}

/// Check a `let` initializer or an assignment against its target type.
pub(crate) fn check_assignment(
    table: &TypeTable,
    tree: &ScopeTree,
    check: &DeferredCheck,
) -> Result<(), RegistrationError> {
    let value = tree.resolve_type(table, check.scope, check.value_ty)?;
    let target = tree.resolve_type(table, check.scope, check.target_ty)?;
    if table.satisfies(value, target) {
        return Ok(());
    }

    let expected = table.display(check.target_ty);
    let actual = table.display(check.value_ty);
    Err(match &check.kind {
        DeferredCheckKind::Let { name } => RegistrationError::TypeMismatch {
            name: name.clone(),
            expected,
            actual,
        },
        DeferredCheckKind::Assignment { target } => RegistrationError::AssignmentMismatch {
            target: target.clone(),
            expected,
            actual,
        },
    })
}

/// Every function with a body and an annotation must return what it declares.
fn validate_return_types(table: &TypeTable, tree: &ScopeTree) -> Result<(), RegistrationError> {
    for (_, function) in table.functions() {
        let (Some(scope), Some(explicit), Some(implicit)) =
            (function.body, function.explicit_return_type, function.implicit_return_type)
        else {
            continue;
        };

        let resolved_explicit = tree.resolve_type(table, scope, explicit)?;
        let resolved_implicit = tree.resolve_type(table, scope, implicit)?;
        if !table.satisfies(resolved_implicit, resolved_explicit) {
            return Err(RegistrationError::FnRtnTypeMismatch {
                name: function.display_name().to_string(),
                implicit: table.display(implicit),
                explicit: table.display(explicit),
            });
        }
    }
    Ok(())
}

struct CallSite<'a> {
    scope: ScopeId,
    callee: TypeId,
    arguments: &'a [ir::Expression],
    path: String,
}

/// Check every call in the program, including calls nested in arguments,
/// object fields, `let` initializers and `return` values.
fn validate_invocations(table: &TypeTable, tree: &ScopeTree) -> Result<(), RegistrationError> {
    let mut sites = Vec::new();
    tree.walk(|scope_id, scope| {
        for statement in &scope.statements {
            let Some(expr) = statement.kind.expression() else {
                continue;
            };
            expr.for_each(&mut |expr| {
                if let ir::Expression::Chain(chain) = expr {
                    collect_call_sites(scope_id, chain, &mut sites);
                }
            });
        }
    });

    debug!(calls = sites.len(), "validating call sites");
    sites.iter().try_for_each(|site| check_call(table, tree, site))
}

fn collect_call_sites<'a>(
    scope: ScopeId,
    chain: &'a ir::ChainedOperation,
    sites: &mut Vec<CallSite<'a>>,
) {
    let mut path = match &chain.accessee {
        ir::Accessee::Ident { name, .. } => name.clone(),
        ir::Accessee::This { .. } => "this".to_string(),
    };
    for operation in &chain.operations {
        match operation {
            ir::Operation::Access { name, .. } | ir::Operation::Assignment { name, .. } => {
                path.push('.');
                path.push_str(name);
            }
            ir::Operation::Invocation { callee, arguments, .. } => {
                sites.push(CallSite {
                    scope,
                    callee: *callee,
                    arguments,
                    path: path.clone(),
                });
                path.push_str("()");
            }
        }
    }
}

fn check_call(
    table: &TypeTable,
    tree: &ScopeTree,
    site: &CallSite<'_>,
) -> Result<(), RegistrationError> {
    let callee = tree.resolve_type(table, site.scope, site.callee)?;
    if table.is_any(callee) {
        return Ok(());
    }
    let Some(function) = table.as_function(callee) else {
        return Err(RegistrationError::NotCallable {
            name: site.path.clone(),
            ty: table.display(callee),
        });
    };
    let function = table.function(function);
    let name = function.display_name();

    if site.arguments.len() > function.parameters.len() {
        return Err(RegistrationError::TooManyArguments {
            function: name.to_string(),
            expected: function.parameters.len(),
            actual: site.arguments.len(),
        });
    }

    for (index, param) in function.parameters.iter().enumerate() {
        let Some(argument) = site.arguments.get(index) else {
            if param.optional {
                continue;
            }
            return Err(RegistrationError::MissingArgument {
                function: name.to_string(),
                parameter: param.name.clone(),
            });
        };

        let argument_ty = argument.ty(table);
        let resolved_argument = tree.resolve_type(table, site.scope, argument_ty)?;
        let resolved_param = tree.resolve_type(table, site.scope, param.ty)?;
        if !table.satisfies(resolved_argument, resolved_param) {
            return Err(RegistrationError::ArgumentTypeMismatch {
                function: name.to_string(),
                parameter: param.name.clone(),
                expected: table.display(param.ty),
                actual: table.display(argument_ty),
            });
        }
    }
    Ok(())
}
