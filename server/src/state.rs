//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the two upstream clients and nothing else: this server stores no
//! data of its own, so there is no pool, no cache, and no per-request state
//! to coordinate. The NocoDB client is optional so the site can serve
//! authored content even when no table backend is configured.

use std::sync::Arc;

use crate::services::cms::CmsClient;
use crate::services::nocodb::NocoClient;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; both fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub cms: Arc<CmsClient>,
    /// Optional NocoDB client. `None` if NocoDB env vars are not configured;
    /// table endpoints then answer 503.
    pub noco: Option<Arc<NocoClient>>,
}

impl AppState {
    #[must_use]
    pub fn new(cms: Arc<CmsClient>, noco: Option<Arc<NocoClient>>) -> Self {
        Self { cms, noco }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_without_noco_has_no_table_backend() {
        let state = test_helpers::test_app_state("http://127.0.0.1:9", None);
        assert!(state.noco.is_none());
        assert_eq!(state.cms.base_url(), "http://127.0.0.1:9");
    }

    #[test]
    fn state_clone_shares_clients() {
        let state = test_helpers::test_app_state("http://127.0.0.1:9", Some("http://127.0.0.1:9"));
        let cloned = state.clone();
        assert!(Arc::ptr_eq(&state.cms, &cloned.cms));
        let (a, b) = (state.noco.as_ref().unwrap(), cloned.noco.as_ref().unwrap());
        assert!(Arc::ptr_eq(a, b));
    }
}
