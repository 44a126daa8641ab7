//! Reentrancy guard of an org.

use guild_types::ContractError;

/// Which privileged entry point, if any, is currently on the org's stack.
///
/// `Idle → Executing → Idle` for `execute`, `Idle → Upgrading → Idle` for
/// `upgradeTo`. Entering from any state other than `Idle` is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallGuard {
    #[default]
    Idle,
    Executing,
    Upgrading,
}

impl CallGuard {
    /// Move from `Idle` into `state`.
    pub fn enter(&mut self, state: CallGuard) -> Result<(), ContractError> {
        if *self != CallGuard::Idle {
            return Err(ContractError::ReentrantCall);
        }
        *self = state;
        Ok(())
    }

    pub fn release(&mut self) {
        *self = CallGuard::Idle;
    }

    pub fn is_idle(&self) -> bool {
        *self == CallGuard::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_then_release() {
        let mut guard = CallGuard::default();
        guard.enter(CallGuard::Executing).unwrap();
        assert_eq!(guard, CallGuard::Executing);
        guard.release();
        assert!(guard.is_idle());
    }

    #[test]
    fn nested_entry_is_rejected() {
        let mut guard = CallGuard::Idle;
        guard.enter(CallGuard::Executing).unwrap();
        assert_eq!(guard.enter(CallGuard::Executing), Err(ContractError::ReentrantCall));
        assert_eq!(guard.enter(CallGuard::Upgrading), Err(ContractError::ReentrantCall));
        assert_eq!(guard, CallGuard::Executing);
    }
}
