//! Switch identity, authorization and toggle protocol.
//!
//! [`SwitchStore`] sits between the request layer and a [`SwitchBackend`].
//! It owns the rules (validate before touching the backend, existence before
//! authorization, one conditional write per toggle) while the backend owns
//! atomicity.

use ident::{SwitchId, PASSWORD_LEN};
use std::sync::Arc;

use crate::db::{Switch, SwitchBackend};
use crate::error::{Result, SwitchError};

#[derive(Clone)]
pub struct SwitchStore {
    backend: Arc<dyn SwitchBackend>,
}

impl SwitchStore {
    pub fn new<B: SwitchBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    pub async fn exists(&self, id: &str) -> Result<bool> {
        Ok(self.backend.find(id).await?.is_some())
    }

    pub async fn state(&self, id: &str) -> Result<bool> {
        self.backend
            .find(id)
            .await?
            .map(|switch| switch.state)
            .ok_or(SwitchError::Nonexistent)
    }

    /// Create a switch that starts off. The id is validated before any
    /// backend round trip.
    pub async fn create(&self, id: &str, password: &str) -> Result<()> {
        let id = SwitchId::parse(id)?;

        if password.chars().count() > PASSWORD_LEN {
            return Err(SwitchError::PasswordTooLong {
                limit: PASSWORD_LEN,
            });
        }

        if self.exists(id.as_str()).await? {
            return Err(SwitchError::AlreadyExists);
        }

        // A concurrent create can still win between the check and the
        // insert; the backend's uniqueness constraint rejects the loser.
        self.backend
            .insert(&Switch::new(id.into_inner(), password))
            .await
    }

    async fn password_matches(&self, id: &str, password: &str) -> Result<bool> {
        Ok(self
            .backend
            .find(id)
            .await?
            .is_some_and(|switch| switch.password_matches(password)))
    }

    /// An absent switch is never authorized. Backend failures count as
    /// unauthorized.
    pub async fn is_authorized(&self, id: &str, password: &str) -> bool {
        self.password_matches(id, password)
            .await
            .unwrap_or_else(|err| {
                log::error!("Authorization lookup for '{}' failed: {}", id, err);
                false
            })
    }

    /// Flip the switch and return the state produced by this call's write.
    pub async fn toggle(&self, id: &str, password: &str) -> Result<bool> {
        // Existence is reported before authorization.
        let current = self.state(id).await?;

        if !self.password_matches(id, password).await? {
            return Err(SwitchError::Unauthorized);
        }

        // The password or the record may have changed since the checks above.
        match self.backend.toggle_if_authorized(id, password).await? {
            Some(state) => {
                log::debug!("Toggled '{}': {} -> {}", id, current, state);
                Ok(state)
            }
            None => Err(SwitchError::Unauthorized),
        }
    }

    /// Create `count` switches with fresh random ids, in order. Switches
    /// created before a failure stay persisted.
    pub async fn create_many(&self, count: usize, password: &str) -> Result<Vec<SwitchId>> {
        let mut ids = Vec::with_capacity(count);

        for _ in 0..count {
            let id = SwitchId::random();
            self.create(id.as_str(), password).await?;
            ids.push(id);
        }

        log::info!("Created {} switches", ids.len());
        Ok(ids)
    }
}
