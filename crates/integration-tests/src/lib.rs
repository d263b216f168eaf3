//! Integration tests for Cardfile.
//!
//! Provides [`StubStore`], an in-memory implementation of the remote
//! address-book API that the client and session are exercised against:
//!
//! - insertion-ordered listing
//! - 201 on create with store-assigned sequential ids
//! - 404 for unknown ids, 204 on delete
//! - a failure toggle that turns every route into a 500
//! - [`unreachable_api_root`] for connection-refused scenarios
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cardfile-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `client_crud` - CRUD verb mapping and error kinds
//! - `search` - delegated search semantics
//! - `session_flows` - session sequencing (load, mutate, reload, refilter)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tokio::sync::Mutex;
use url::Url;

use cardfile_client::AddressBookClient;
use cardfile_core::{Contact, ContactId};

struct StoreInner {
    next_id: i64,
    contacts: Vec<Contact>,
}

#[derive(Clone)]
struct StubState {
    store: Arc<Mutex<StoreInner>>,
    failing: Arc<AtomicBool>,
}

/// An in-memory address-book store served over HTTP on an ephemeral port.
pub struct StubStore {
    addr: SocketAddr,
    state: StubState,
    server: tokio::task::JoinHandle<()>,
}

impl StubStore {
    /// Bind to an ephemeral localhost port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let state = StubState {
            store: Arc::new(Mutex::new(StoreInner {
                next_id: 1,
                contacts: Vec::new(),
            })),
            failing: Arc::new(AtomicBool::new(false)),
        };

        let app = Router::new()
            .route("/api/addressbook", get(list).post(create))
            .route(
                "/api/addressbook/{id}",
                get(get_one).put(update).delete(remove),
            )
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub store listener");
        let addr = listener.local_addr().expect("listener has no local addr");

        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            state,
            server,
        }
    }

    /// Root URL to hand to [`AddressBookClient::new`].
    ///
    /// # Panics
    ///
    /// Panics if the address does not form a valid URL.
    #[must_use]
    pub fn api_root(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).expect("valid stub store url")
    }

    /// A client pointed at this store.
    #[must_use]
    pub fn client(&self) -> AddressBookClient {
        AddressBookClient::new(&self.api_root())
    }

    /// When set, every route answers 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Stop serving; subsequent requests are refused at the socket.
    pub fn kill(&self) {
        self.server.abort();
    }

    /// Insert contacts directly, assigning ids; returns them as stored.
    pub async fn seed(&self, contacts: Vec<Contact>) -> Vec<Contact> {
        let mut inner = self.state.store.lock().await;
        let mut stored = Vec::with_capacity(contacts.len());
        for mut contact in contacts {
            contact.id = Some(ContactId::new(inner.next_id));
            inner.next_id += 1;
            inner.contacts.push(contact.clone());
            stored.push(contact);
        }
        stored
    }

    /// Snapshot of the stored contacts, in insertion order.
    pub async fn contacts(&self) -> Vec<Contact> {
        self.state.store.lock().await.contacts.clone()
    }
}

impl Drop for StubStore {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// A URL whose port was just released: connections to it are refused.
///
/// # Panics
///
/// Panics if no ephemeral port can be bound.
pub async fn unreachable_api_root() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind throwaway listener");
    let addr = listener.local_addr().expect("listener has no local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/api")).expect("valid unreachable url")
}

fn store_offline() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "store offline").into_response()
}

async fn list(State(state): State<StubState>) -> Response {
    if state.failing.load(Ordering::SeqCst) {
        return store_offline();
    }

    let inner = state.store.lock().await;
    Json(inner.contacts.clone()).into_response()
}

async fn get_one(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    if state.failing.load(Ordering::SeqCst) {
        return store_offline();
    }

    let inner = state.store.lock().await;
    inner
        .contacts
        .iter()
        .find(|c| c.id == Some(ContactId::new(id)))
        .map_or_else(
            || StatusCode::NOT_FOUND.into_response(),
            |contact| Json(contact.clone()).into_response(),
        )
}

async fn create(State(state): State<StubState>, Json(body): Json<Contact>) -> Response {
    if state.failing.load(Ordering::SeqCst) {
        return store_offline();
    }

    let mut inner = state.store.lock().await;
    let mut contact = body;
    contact.id = Some(ContactId::new(inner.next_id));
    inner.next_id += 1;
    inner.contacts.push(contact.clone());

    (StatusCode::CREATED, Json(contact)).into_response()
}

async fn update(
    State(state): State<StubState>,
    Path(id): Path<i64>,
    Json(body): Json<Contact>,
) -> Response {
    if state.failing.load(Ordering::SeqCst) {
        return store_offline();
    }

    let mut inner = state.store.lock().await;
    let id = ContactId::new(id);
    let Some(slot) = inner.contacts.iter_mut().find(|c| c.id == Some(id)) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    *slot = Contact {
        id: Some(id),
        ..body
    };
    Json(slot.clone()).into_response()
}

async fn remove(State(state): State<StubState>, Path(id): Path<i64>) -> Response {
    if state.failing.load(Ordering::SeqCst) {
        return store_offline();
    }

    let mut inner = state.store.lock().await;
    let id = ContactId::new(id);
    let before = inner.contacts.len();
    inner.contacts.retain(|c| c.id != Some(id));

    if inner.contacts.len() == before {
        StatusCode::NOT_FOUND.into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}
