use std::sync::Arc;

use crate::services::identity::IdentityProvider;
use crate::store::TableStore;

/// Shared handles injected into every handler: the entity store's data
/// plane and the identity provider's admin plane. Both are read-only after
/// construction and safe to share across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TableStore>,
    pub identity: Arc<dyn IdentityProvider>,
}
