//! hype_checker: The registration pass and the validator.
//!
//! Registration walks a parsed source file once, building the scope tree and
//! the type table and typing every statement. It tolerates forward
//! references: names used before they are declared, calls to functions whose
//! return types are still being inferred, and `this.member` references to
//! fields declared later in the same object literal. After registration the
//! validator checks what needs the complete program.

pub mod error;
pub mod options;
mod registrar;
pub mod validator;

pub use error::RegistrationError;
pub use options::RegistrationOptions;
pub use registrar::{Registrar, Registration};
pub use validator::validate;

use hype_ast::SourceFile;

/// Register and validate `file`.
pub fn check(
    file: &SourceFile,
    options: RegistrationOptions,
) -> Result<Registration, RegistrationError> {
    let registration = Registrar::new(options).register(file)?;
    validate(&registration)?;
    Ok(registration)
}
