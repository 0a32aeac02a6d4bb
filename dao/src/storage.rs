//! Checkpoint seam for embedding hosts.

use crate::state::MicrogridDao;

/// Host-side persistence for governance state.
///
/// Operations never reach partial states, so a host that saves after
/// each successful call and skips the save on error gets the same
/// all-or-nothing behavior across restarts. Implementations decide
/// where checkpoints live.
pub trait StateStore {
    /// The most recent checkpoint, if one exists.
    fn load(&self) -> Option<MicrogridDao>;

    /// Replace the checkpoint with `state`.
    fn save(&mut self, state: &MicrogridDao);
}

/// Keeps the latest checkpoint in memory. Suitable for tests and
/// single-process hosts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    latest: Option<MicrogridDao>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn load(&self) -> Option<MicrogridDao> {
        self.latest.clone()
    }

    fn save(&mut self, state: &MicrogridDao) {
        self.latest = Some(state.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgd_core::Principal;

    #[test]
    fn empty_store_has_no_checkpoint() {
        let store = InMemoryStore::new();
        assert!(store.load().is_none());
    }

    #[test]
    fn save_then_load_round_trips_the_state() {
        let mut dao = MicrogridDao::new(Principal::from("STDAOADMIN"));
        dao.register_microgrid(
            &Principal::from("ST1MEMBER"),
            5,
            "Hilltop Cooperative".to_string(),
            40,
        )
        .unwrap();

        let mut store = InMemoryStore::new();
        store.save(&dao);
        let restored = store.load().unwrap();
        assert_eq!(restored, dao);
    }
}
