//! Registration options.

use std::time::Duration;

/// Options controlling the registration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOptions {
    /// How long a `this.member` reference waits for the member to be declared.
    pub member_wait_timeout: Duration,
    /// Let a later object-literal field replace an earlier one with the same
    /// name instead of failing with `DuplicateMember`.
    pub allow_member_redefinition: bool,
}

impl RegistrationOptions {
    pub const DEFAULT_MEMBER_WAIT_TIMEOUT: Duration = Duration::from_millis(5000);
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            member_wait_timeout: Self::DEFAULT_MEMBER_WAIT_TIMEOUT,
            allow_member_redefinition: false,
        }
    }
}
