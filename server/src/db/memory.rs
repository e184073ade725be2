use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

use super::{backend::SwitchBackend, models::Switch};
use crate::error::{Result, SwitchError};

/// Process-local backend. Each entry is locked for the duration of a
/// toggle, so concurrent toggles on one id are serialized.
#[derive(Clone, Default)]
pub struct MemorySwitchBackend {
    switches: Arc<DashMap<String, Switch>>,
}

impl MemorySwitchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

#[async_trait]
impl SwitchBackend for MemorySwitchBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, switch: &Switch) -> Result<()> {
        match self.switches.entry(switch.id.clone()) {
            Entry::Occupied(_) => Err(SwitchError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(switch.clone());
                Ok(())
            }
        }
    }

    async fn find(&self, id: &str) -> Result<Option<Switch>> {
        Ok(self.switches.get(id).map(|entry| entry.value().clone()))
    }

    async fn toggle_if_authorized(&self, id: &str, password: &str) -> Result<Option<bool>> {
        let Some(mut switch) = self.switches.get_mut(id) else {
            return Ok(None);
        };

        if !switch.password_matches(password) {
            return Ok(None);
        }

        switch.state = !switch.state;
        Ok(Some(switch.state))
    }
}
