//! End-to-end tests: `SyncStore` over HTTP against the stand-in server.

use serde_json::{json, Value};
use std::collections::BTreeSet;
use tabsync::{Config, Fields, HttpTransport, RemoteAccess, SyncStore};
use tabsync_server::{app, AppState};

const CONTRACT: &str = "test-contract";
const TABLE: &str = "todo";

/// A server running on an ephemeral port for the duration of a test.
struct TestServer {
    state: AppState,
    base_url: String,
}

impl TestServer {
    async fn start() -> Self {
        let state = AppState::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = app(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    fn config(&self) -> Config {
        Config::new(&self.base_url, CONTRACT, TABLE)
    }

    fn remote(&self) -> RemoteAccess<HttpTransport> {
        RemoteAccess::from_config(&self.config())
    }

    fn seed(&self, data: Value) -> String {
        self.state
            .tables
            .insert(CONTRACT, TABLE, fields(data))
            .entry_id
    }
}

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap()
}

fn id_set(store: &SyncStore) -> BTreeSet<String> {
    store.items().iter().map(|i| i.id().to_string()).collect()
}

#[tokio::test]
async fn open_loads_existing_rows_in_order() {
    let server = TestServer::start().await;
    let a = server.seed(json!({"name": "A"}));
    let b = server.seed(json!({"name": "B"}));

    let store = SyncStore::open(server.remote()).await;

    let ids: Vec<_> = store.items().iter().map(|i| i.id().to_string()).collect();
    assert_eq!(ids, vec![a, b]);
    assert!(!store.is_loading());
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn refresh_is_idempotent() {
    let server = TestServer::start().await;
    server.seed(json!({"name": "A"}));
    server.seed(json!({"name": "B"}));
    let store = SyncStore::open(server.remote()).await;

    let first = id_set(&store);
    store.refresh().await;
    store.refresh().await;
    assert_eq!(id_set(&store), first);
}

#[tokio::test]
async fn create_becomes_visible_with_server_id() {
    let server = TestServer::start().await;
    server.seed(json!({"name": "A"}));
    let store = SyncStore::open(server.remote()).await;
    let before = id_set(&store);

    store.create(fields(json!({"name": "X"}))).await;

    let items = store.items();
    assert_eq!(items.len(), before.len() + 1);
    let created: Vec<_> = items
        .iter()
        .filter(|i| i.get("name") == Some(&json!("X")))
        .collect();
    assert_eq!(created.len(), 1);
    assert!(!before.contains(created[0].id()));
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn update_picks_up_server_side_fields() {
    let server = TestServer::start().await;
    let id = server.seed(json!({"name": "A", "done": false}));
    let store = SyncStore::open(server.remote()).await;

    let returned = store.update(fields(json!({"id": id, "name": "A2"}))).await;

    assert!(!returned);
    let item = &store.items()[0];
    assert_eq!(item.get("name"), Some(&json!("A2")));
    // merged on the server, not known to the caller
    assert_eq!(item.get("done"), Some(&json!(false)));
    assert_eq!(store.last_error(), None);
}

#[tokio::test]
async fn delete_removes_locally_on_success() {
    let server = TestServer::start().await;
    let first = server.seed(json!({"name": "A"}));
    let second = server.seed(json!({"name": "B"}));
    let store = SyncStore::open(server.remote()).await;

    assert!(store.delete(&first).await);

    let items = store.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), second);
    assert!(server.state.tables.list(CONTRACT, TABLE).len() == 1);
}

#[tokio::test]
async fn delete_failure_leaves_items_untouched() {
    let server = TestServer::start().await;
    let first = server.seed(json!({"name": "A"}));
    server.seed(json!({"name": "B"}));
    let store = SyncStore::open(server.remote()).await;

    // Another client removes the row first; our delete gets a 404.
    assert!(server.state.tables.delete(CONTRACT, TABLE, &first));
    let before = store.items();

    assert!(!store.delete(&first).await);
    assert_eq!(store.items(), before);
    assert!(store.last_error().is_some());
}

#[tokio::test]
async fn id_with_query_characters_never_reaches_another_row() {
    let server = TestServer::start().await;
    let id = server.seed(json!({"name": "A"}));
    let remote = server.remote();

    let deleted = remote.delete(format!("{}?x=1", id).as_str()).await.unwrap();
    assert!(!deleted);

    let updated = remote
        .update(&format!("{}#frag", id), &fields(json!({"name": "Z"})))
        .await
        .unwrap();
    assert!(!updated);

    let rows = server.state.tables.list(CONTRACT, TABLE);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].entry_id, id);
    assert_eq!(rows[0].data["name"], json!("A"));
}

#[tokio::test]
async fn unreachable_server_sets_error_and_keeps_items() {
    let server = TestServer::start().await;
    server.seed(json!({"name": "A"}));
    let store = SyncStore::open(server.remote()).await;
    let before = store.items();

    let offline = SyncStore::new(RemoteAccess::from_config(&Config::new(
        "http://127.0.0.1:9",
        CONTRACT,
        TABLE,
    )));
    offline.refresh().await;
    assert!(offline.items().is_empty());
    assert_eq!(offline.last_error().as_deref(), Some("Failed to fetch items."));

    assert_eq!(store.items(), before);
}

#[tokio::test]
async fn delete_all_empties_the_table() {
    let server = TestServer::start().await;
    for name in ["A", "B", "C"] {
        server.seed(json!({ "name": name }));
    }
    let remote = server.remote();

    assert!(remote.delete_all().await);
    assert!(remote.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn concurrent_creates_all_land() {
    let server = TestServer::start().await;
    let store = SyncStore::open(server.remote()).await;

    let creates = (0..5).map(|i| {
        let store = store.clone();
        async move { store.create(fields(json!({ "name": format!("item {}", i) }))).await }
    });
    futures::future::join_all(creates).await;
    store.refresh().await;

    assert_eq!(store.items().len(), 5);
    assert!(!store.is_loading());
}
