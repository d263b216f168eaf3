//! Application state shared across handlers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};
use tower_sessions::Session;
use uuid::Uuid;

use cardfile_client::AddressBookClient;

use crate::config::WebConfig;
use crate::error::AppError;
use crate::session::ContactSession;

/// Session-data key holding this UI session's registry id.
const SESSION_KEY: &str = "cardfile.session";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// address-book client, configuration, and the per-UI-session registry.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    client: AddressBookClient,
    /// One `ContactSession` per UI session. The per-entry mutex serializes
    /// a session's operations; sessions never share state with each other.
    sessions: Mutex<HashMap<Uuid, Arc<Mutex<ContactSession>>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: WebConfig) -> Self {
        let client = AddressBookClient::new(&config.api_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                client,
                sessions: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Get a reference to the web configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the address-book API client.
    #[must_use]
    pub fn client(&self) -> &AddressBookClient {
        &self.inner.client
    }

    /// Resolve the `ContactSession` for the current UI session, creating and
    /// initializing it on first access. The returned guard holds the
    /// session's lock, so a UI session's operations run one at a time.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie-session store fails.
    pub async fn contact_session(
        &self,
        session: &Session,
    ) -> Result<OwnedMutexGuard<ContactSession>, AppError> {
        let key = match session.get::<Uuid>(SESSION_KEY).await? {
            Some(key) => key,
            None => {
                let key = Uuid::new_v4();
                session.insert(SESSION_KEY, key).await?;
                key
            }
        };

        let handle = {
            let mut sessions = self.inner.sessions.lock().await;
            Arc::clone(
                sessions
                    .entry(key)
                    .or_insert_with(|| Arc::new(Mutex::new(ContactSession::new(self.inner.client.clone())))),
            )
        };

        let mut guard = handle.lock_owned().await;
        guard.ensure_initialized().await;
        Ok(guard)
    }
}
