use std::time::Instant;

use events::ServerEvent;
use futures_util::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio_tungstenite::accept_async;

use super::*;

/// Accept loop for a throwaway server: reports each accepted connection,
/// greets it with the given events, then echoes received texts back out on
/// the report channel.
async fn spawn_server(greetings: Vec<ServerEvent>) -> (String, UnboundedReceiver<ServerSeen>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (report, seen) = unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let _ = report.send(ServerSeen::Connected);
            tokio::spawn(serve_one(stream, greetings.clone(), report.clone()));
        }
    });

    (format!("ws://{addr}/ws"), seen)
}

#[derive(Debug, PartialEq, Eq)]
enum ServerSeen {
    Connected,
    Text(String),
}

async fn serve_one(
    stream: TcpStream,
    greetings: Vec<ServerEvent>,
    report: UnboundedSender<ServerSeen>,
) {
    let mut ws = accept_async(stream).await.unwrap();
    for event in &greetings {
        ws.send(Message::Text(events::encode_server_event(event).into())).await.unwrap();
    }
    while let Some(Ok(message)) = ws.next().await {
        if let Message::Text(text) = message {
            let _ = report.send(ServerSeen::Text(text.to_string()));
        }
    }
}

async fn eventually(mut condition: impl AsyncFnMut() -> bool, what: &str) {
    let deadline = Instant::now() + Duration::from_secs(3);
    while !condition().await {
        assert!(Instant::now() < deadline, "timed out waiting for {what}");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn joined(id: &str) -> ServerEvent {
    ServerEvent::PlayerJoined {
        player: events::Player { id: id.to_owned(), nickname: "Test".to_owned(), group: None },
    }
}

#[tokio::test]
async fn connect_twice_yields_one_connection_dispatching_once() {
    let (url, mut seen) = spawn_server(vec![joined("p1")]).await;
    let stores = Arc::new(Stores::default());
    let manager = Manager::new(Arc::clone(&stores), url);

    let first = manager.connect().await;
    let second = manager.connect().await;

    assert_eq!(seen.recv().await, Some(ServerSeen::Connected));
    eventually(async || stores.session.read().await.players.len() == 1, "greeting dispatch").await;

    // Both handles feed the same socket task.
    first.request_state();
    second.request_state();
    assert_eq!(seen.recv().await, Some(ServerSeen::Text(r#"{"type":"request_state"}"#.into())));
    assert_eq!(seen.recv().await, Some(ServerSeen::Text(r#"{"type":"request_state"}"#.into())));

    // No second connection was dialed.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(seen.try_recv().is_err());
    assert!(manager.is_connected().await);
}

#[tokio::test]
async fn disconnect_stops_dispatch_and_clears_the_flag() {
    let (url, mut seen) = spawn_server(vec![joined("p1")]).await;
    let stores = Arc::new(Stores::default());
    let manager = Manager::new(Arc::clone(&stores), url);

    manager.connect().await;
    assert_eq!(seen.recv().await, Some(ServerSeen::Connected));
    eventually(async || stores.session.read().await.players.len() == 1, "greeting dispatch").await;

    manager.disconnect().await;
    assert!(!manager.is_connected().await);

    // Roster state survives the teardown; only the transport flag drops.
    assert_eq!(stores.session.read().await.players.len(), 1);
}

#[tokio::test]
async fn disconnect_without_a_connection_is_safe() {
    let stores = Arc::new(Stores::default());
    let manager = Manager::new(Arc::clone(&stores), "ws://127.0.0.1:9/ws".to_owned());

    manager.disconnect().await;
    manager.disconnect().await;

    assert!(!manager.is_connected().await);
    assert_eq!(stores.revision(), 0);
}

#[tokio::test]
async fn connect_after_disconnect_dials_a_fresh_connection() {
    let (url, mut seen) = spawn_server(Vec::new()).await;
    let stores = Arc::new(Stores::default());
    let manager = Manager::new(Arc::clone(&stores), url);

    manager.connect().await;
    assert_eq!(seen.recv().await, Some(ServerSeen::Connected));
    eventually(async || manager.is_connected().await, "first connection").await;

    manager.disconnect().await;
    manager.connect().await;

    assert_eq!(seen.recv().await, Some(ServerSeen::Connected));
    eventually(async || manager.is_connected().await, "second connection").await;
}
