use async_trait::async_trait;

use super::models::Switch;
use crate::error::Result;

/// Primitive persistence operations behind [`crate::store::SwitchStore`].
///
/// Implementations must make `insert` fail with
/// [`SwitchError::AlreadyExists`](crate::error::SwitchError::AlreadyExists) on
/// an id collision, and must apply `toggle_if_authorized` as one atomic
/// conditional update.
#[async_trait]
pub trait SwitchBackend: Send + Sync {
    /// Short name used in logs and the health endpoint.
    fn name(&self) -> &'static str;

    /// Insert a new switch. Never overwrites.
    async fn insert(&self, switch: &Switch) -> Result<()>;

    /// Look up a switch by id.
    async fn find(&self, id: &str) -> Result<Option<Switch>>;

    /// Negate `state` where both `id` and `password` match and return the
    /// state this write produced. `None` means no record matched.
    async fn toggle_if_authorized(&self, id: &str, password: &str) -> Result<Option<bool>>;
}
