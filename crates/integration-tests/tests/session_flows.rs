//! Session sequencing: load, mutate, reload, refilter.

#![allow(clippy::unwrap_used)]

use cardfile_client::AddressBookClient;
use cardfile_core::{Contact, ContactId};
use cardfile_integration_tests::{StubStore, unreachable_api_root};
use cardfile_web::session::{ContactSession, NoticeLevel};

fn ann() -> Contact {
    Contact {
        category: "friend".to_owned(),
        ..Contact::new("Ann", "Lee", "a@x.com")
    }
}

fn bo() -> Contact {
    Contact {
        company: "Acme".to_owned(),
        category: "business".to_owned(),
        ..Contact::new("Bo", "Ng", "b@x.com")
    }
}

async fn session_with(store: &StubStore) -> ContactSession {
    let mut session = ContactSession::new(store.client());
    session.initialize().await;
    session
}

#[tokio::test]
async fn test_initialize_loads_contacts_into_both_lists() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;

    let mut session = session_with(&store).await;

    assert_eq!(session.all_contacts(), seeded.as_slice());
    assert_eq!(session.visible_contacts(), seeded.as_slice());
    assert!(!session.is_editing());
    assert!(session.take_notices().is_empty());
}

#[tokio::test]
async fn test_initialize_failure_leaves_empty_lists_and_error() {
    let client = AddressBookClient::new(&unreachable_api_root().await);
    let mut session = ContactSession::new(client);

    session.initialize().await;

    assert!(session.all_contacts().is_empty());
    assert!(session.visible_contacts().is_empty());
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_submit_create_success_resets_draft_and_reloads() {
    let store = StubStore::spawn().await;
    let mut session = session_with(&store).await;

    session.fill_draft(ann());
    session.submit_form().await;

    let notices = session.take_notices();
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Success);
    assert_eq!(session.draft(), &Contact::default());
    assert_eq!(session.total(), 1);
    assert!(session.all_contacts().first().unwrap().id.is_some());
}

#[tokio::test]
async fn test_failed_create_leaves_state_unchanged() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    let draft = Contact::new("Cy", "Ops", "c@x.com");
    session.fill_draft(draft.clone());

    // Transport failure: the store goes away mid-session
    store.kill();
    session.submit_create().await;

    assert_eq!(session.all_contacts(), seeded.as_slice());
    assert_eq!(session.visible_contacts(), seeded.as_slice());
    assert_eq!(session.draft(), &draft);
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_failed_create_on_server_error_leaves_state_unchanged() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann()]).await;
    let mut session = session_with(&store).await;

    let draft = Contact::new("Cy", "Ops", "c@x.com");
    session.fill_draft(draft.clone());

    store.set_failing(true);
    session.submit_create().await;

    assert_eq!(session.all_contacts(), seeded.as_slice());
    assert_eq!(session.draft(), &draft);
    assert_eq!(session.take_notices().len(), 1);
}

#[tokio::test]
async fn test_edit_flow_dispatches_submit_to_update() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    let target = seeded.first().unwrap();
    let id = target.id.unwrap();
    session.begin_edit_by_id(id);
    assert!(session.is_editing());
    assert_eq!(session.draft(), target);

    // The form posts changed fields; the draft keeps the id
    let mut fields = target.clone();
    fields.email = "ann.lee@x.com".to_owned();
    session.fill_draft(fields);
    session.submit_form().await;

    assert!(!session.is_editing());
    assert_eq!(session.draft(), &Contact::default());
    let notices = session.take_notices();
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Success);

    let stored = store.client().get(id).await.unwrap().unwrap();
    assert_eq!(stored.email, "ann.lee@x.com");
    assert_eq!(stored.id, Some(id));
}

#[tokio::test]
async fn test_submit_without_edit_mode_creates() {
    let store = StubStore::spawn().await;
    store.seed(vec![ann()]).await;
    let mut session = session_with(&store).await;

    session.fill_draft(bo());
    session.submit_form().await;
    session.take_notices();

    assert_eq!(session.total(), 2);
}

#[tokio::test]
async fn test_remove_reloads_and_notifies() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    let id = seeded.first().unwrap().id.unwrap();
    session.remove(id).await;

    let notices = session.take_notices();
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Success);
    assert_eq!(session.total(), 1);
    assert!(session.all_contacts().iter().all(|c| c.id != Some(id)));
}

#[tokio::test]
async fn test_remove_failure_only_queues_error() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann()]).await;
    let mut session = session_with(&store).await;

    session.remove(ContactId::new(999)).await;

    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Error);
    assert_eq!(session.all_contacts(), seeded.as_slice());
}

#[tokio::test]
async fn test_apply_filter_narrows_visible_contacts() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    session.apply_filter("ac".to_owned(), String::new()).await;

    assert_eq!(session.total(), 1);
    assert_eq!(
        session.visible_contacts().first().unwrap().company,
        "Acme"
    );
    // The unfiltered set is untouched
    assert_eq!(session.all_contacts(), seeded.as_slice());
}

#[tokio::test]
async fn test_clear_filter_restores_full_set() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    session.apply_filter("ac".to_owned(), String::new()).await;
    session.clear_filter();

    assert!(session.filter().is_empty());
    assert_eq!(session.visible_contacts(), seeded.as_slice());
}

#[tokio::test]
async fn test_filter_failure_falls_back_to_full_copy() {
    let store = StubStore::spawn().await;
    let seeded = store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    store.set_failing(true);
    session.apply_filter("ac".to_owned(), String::new()).await;

    assert_eq!(session.visible_contacts(), seeded.as_slice());
    let notices = session.take_notices();
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_reload_failure_resets_lists_and_notifies() {
    let store = StubStore::spawn().await;
    store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;
    assert_eq!(session.total(), 2);

    store.kill();
    session.reload().await;

    assert!(session.all_contacts().is_empty());
    assert!(session.visible_contacts().is_empty());
    let notices = session.take_notices();
    assert_eq!(notices.first().unwrap().level, NoticeLevel::Error);
}

#[tokio::test]
async fn test_mutation_reapplies_the_active_filter() {
    let store = StubStore::spawn().await;
    store.seed(vec![ann(), bo()]).await;
    let mut session = session_with(&store).await;

    session.apply_filter(String::new(), "business".to_owned()).await;
    assert_eq!(session.total(), 1);

    // Creating a second business contact shows up through the active filter
    let mut extra = bo();
    extra.first_name = "Cy".to_owned();
    extra.email = "c@x.com".to_owned();
    session.fill_draft(extra);
    session.submit_form().await;
    session.take_notices();

    assert_eq!(session.total(), 2);
    assert!(
        session
            .visible_contacts()
            .iter()
            .all(|c| c.category == "business")
    );
    assert_eq!(session.all_contacts().len(), 3);
}
