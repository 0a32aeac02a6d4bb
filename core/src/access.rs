//! Authority slots behind owner, admin, and oracle checks.

use serde::{Deserialize, Serialize};

use crate::principal::Principal;

/// A single privileged-principal slot.
///
/// `permits` is the pure check every privileged operation runs before
/// touching state. A vacant slot permits no one, so operations gated on
/// an unassigned authority are unreachable rather than open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authority {
    holder: Option<Principal>,
}

impl Authority {
    /// A slot held by `holder` from the start.
    pub fn new(holder: Principal) -> Self {
        Authority {
            holder: Some(holder),
        }
    }

    /// An unassigned slot.
    pub fn vacant() -> Self {
        Authority { holder: None }
    }

    /// Assign or replace the privileged principal.
    pub fn assign(&mut self, holder: Principal) {
        self.holder = Some(holder);
    }

    pub fn holder(&self) -> Option<&Principal> {
        self.holder.as_ref()
    }

    /// Whether `caller` currently holds this authority.
    pub fn permits(&self, caller: &Principal) -> bool {
        self.holder.as_ref() == Some(caller)
    }
}
