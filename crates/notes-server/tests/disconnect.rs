//! Clients that hang up mid-request, against a real listening server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use notes_server::notes_core::{NativeCodec, Note, NoteId};
use notes_server::notes_store::{MemoryNoteRepository, NoteRepository};
use notes_server::{AppState, ServerConfig, routes};
use serde_json::json;
use tokio::net::TcpListener;

const MIN_LATENCY: Duration = Duration::from_millis(300);

async fn spawn_server() -> (SocketAddr, Arc<dyn NoteRepository>) {
    let notes: Arc<dyn NoteRepository> = Arc::new(MemoryNoteRepository::<NativeCodec>::new(10));
    let config = ServerConfig {
        min_latency: MIN_LATENCY,
        ..ServerConfig::default()
    };
    let app = routes::build_router(AppState::new(notes.clone(), config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, notes)
}

fn impatient_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(MIN_LATENCY / 6)
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_client_timeout_then_server_keeps_serving() {
    let (addr, _notes) = spawn_server().await;

    let err = impatient_client()
        .get(format!("http://{addr}/notes?page=0"))
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{err}");

    let client = reqwest::Client::new();
    let response = client
        .post(format!("http://{addr}/notes"))
        .json(&json!({ "title": "A", "content": "B" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    let id: NoteId = response.json().await.unwrap();

    let note: Note = client
        .get(format!("http://{addr}/notes/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(note.id, id);
    assert_eq!(note.title, "A");
}

#[tokio::test]
async fn test_abandoned_create_is_not_stored() {
    let (addr, notes) = spawn_server().await;

    let err = impatient_client()
        .post(format!("http://{addr}/notes"))
        .json(&json!({ "title": "abandoned", "content": "" }))
        .send()
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "{err}");

    // Long enough for the delay to have elapsed had the request survived.
    tokio::time::sleep(MIN_LATENCY * 2).await;
    assert!(notes.list_page(0).await.unwrap().is_empty());
}
