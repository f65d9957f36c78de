//! Declarations every program starts with.

use crate::tree::ScopeTree;
use hype_types::{Function, Member, Parameter, Primitive, TypeTable};
use tracing::debug;

/// Name of the built-in console interface.
pub const CONSOLE_INTERFACE: &str = "Console";
/// Name of the built-in console object.
pub const CONSOLE: &str = "console";

/// Declare the primitive types and `console: Console` in the global scope,
/// where `Console { log(fmt: any): void }`.
pub fn install(tree: &mut ScopeTree, table: &mut TypeTable) {
    let root = tree.root();

    for primitive in Primitive::ALL {
        let ty = table.primitive(primitive);
        tree.get_mut(root).types.insert(primitive.name().to_string(), ty);
    }

    let (console_type, members) = table.add_interface(CONSOLE_INTERFACE);
    let log = Function::signature(
        vec![Parameter {
            name: "fmt".to_string(),
            optional: false,
            ty: table.any_type,
        }],
        table.void_type,
    )
    .named("log");
    let (_, log_type) = table.add_function(log);
    members.add_member(Member::method("log", log_type));

    let console_ref = table.add_reference(CONSOLE_INTERFACE);
    let global = tree.get_mut(root);
    global.types.insert(CONSOLE_INTERFACE.to_string(), console_type);
    global.ident_types.insert(CONSOLE.to_string(), console_ref);

    debug!("installed global prelude");
}
