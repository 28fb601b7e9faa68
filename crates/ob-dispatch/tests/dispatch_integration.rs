//! Dispatch integration tests
//!
//! Runs the TCP connector against in-process fake consoles.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use ob_core::{BindingMap, BindingStore, DispatchStatus};
use ob_dispatch::{Coordinator, DispatchOptions, MultiHostDispatcher, TcpConnector};
use ob_protocol::{ConnectionTarget, PlayerRecord, SessionOptions};

fn session_options() -> SessionOptions {
    SessionOptions {
        connect_timeout: Duration::from_secs(1),
        idle_timeout: Duration::from_millis(100),
    }
}

fn dispatch_options() -> DispatchOptions {
    DispatchOptions {
        settle_delay: Duration::from_millis(10),
        target_timeout: Duration::from_secs(3),
        completion_message: "binds loaded".to_string(),
    }
}

/// Fake console: answers the roster query with `roster`, forwards every
/// other line it receives to the returned channel
async fn spawn_console(roster: &'static str) -> (ConnectionTarget, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake console");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let tx = tx.clone();
            tokio::spawn(async move {
                let (read, mut write) = stream.into_split();
                let mut lines = BufReader::new(read).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if line == "voice_show_mute" {
                        let _ = write.write_all(roster.as_bytes()).await;
                    } else {
                        let _ = tx.send(line);
                    }
                }
            });
        }
    });

    (ConnectionTarget::new("127.0.0.1", port), rx)
}

/// Fake console that prints a log line every 30ms for as long as the
/// connection stays open
async fn spawn_streaming_console() -> (ConnectionTarget, mpsc::UnboundedReceiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake console");
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        let Ok((stream, _)) = listener.accept().await else {
            return;
        };
        let (read, mut write) = stream.into_split();
        tokio::spawn(async move {
            let mut tick = 0u64;
            loop {
                let line = format!("L {:05}: server tick\n", tick);
                if write.write_all(line.as_bytes()).await.is_err() {
                    return;
                }
                tick += 1;
                tokio::time::sleep(Duration::from_millis(30)).await;
            }
        });
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let _ = tx.send(line);
        }
    });

    (ConnectionTarget::new("127.0.0.1", port), rx)
}

/// A target on a port nothing listens on
async fn refused_target() -> ConnectionTarget {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    ConnectionTarget::new("127.0.0.1", port)
}

async fn collect(rx: &mut mpsc::UnboundedReceiver<String>, count: usize) -> Vec<String> {
    let mut lines = Vec::new();
    while lines.len() < count {
        match tokio::time::timeout(Duration::from_secs(2), rx.recv()).await {
            Ok(Some(line)) => lines.push(line),
            _ => break,
        }
    }
    lines
}

#[tokio::test]
async fn test_dispatch_reachable_and_refused() {
    let (reachable, mut rx) = spawn_console("").await;
    let refused = refused_target().await;

    let dispatcher = MultiHostDispatcher::new(
        Arc::new(TcpConnector::new(session_options())),
        dispatch_options(),
    );
    let commands = vec![
        "spec_usenumberkeys_nobinds false".to_string(),
        r#"bind "1" "spec_player 2""#.to_string(),
    ];

    let report = dispatcher
        .dispatch(&[reachable.clone(), refused.clone()], &commands)
        .await;

    assert_eq!(report.status(), DispatchStatus::PartialFailure);
    assert_eq!(report.outcomes[0].target, reachable);
    assert!(report.outcomes[0].succeeded());
    assert_eq!(report.outcomes[1].target, refused);
    assert!(report.outcomes[1].error().unwrap().is_refused());

    let received = collect(&mut rx, 3).await;
    assert_eq!(
        received,
        vec![
            "spec_usenumberkeys_nobinds false".to_string(),
            r#"bind "1" "spec_player 2""#.to_string(),
            r#"echo "binds loaded""#.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetch_then_apply_over_tcp() {
    let (first, mut first_rx) = spawn_console("Player list\n 0 Alice\n 1 Bob\n").await;
    let (second, mut second_rx) = spawn_console("").await;
    let dir = tempfile::TempDir::new().unwrap();

    let coordinator = Coordinator::new(
        TcpConnector::new(session_options()),
        dispatch_options(),
        BindingStore::new(dir.path().join("state.toml")),
    );
    let targets = vec![first, second];

    let roster = coordinator.fetch_roster(&targets).await.unwrap();
    assert_eq!(
        roster,
        vec![PlayerRecord::new(1, "Alice"), PlayerRecord::new(2, "Bob")]
    );

    let entered: BindingMap = [("Bob".to_string(), "f2".to_string())].into_iter().collect();
    let report = coordinator
        .save_and_apply(&targets, &roster, &entered)
        .await
        .unwrap();

    assert!(report.dispatch.all_succeeded());
    assert!(report.save_error.is_none());
    assert_eq!(coordinator.store().load(), entered);

    for rx in [&mut first_rx, &mut second_rx] {
        let received = collect(rx, 3).await;
        assert_eq!(received[1], r#"bind "f2" "spec_player 2""#);
    }
}

#[tokio::test]
async fn test_fetch_from_refused_host() {
    let refused = refused_target().await;
    let dir = tempfile::TempDir::new().unwrap();

    let coordinator = Coordinator::new(
        TcpConnector::new(session_options()),
        dispatch_options(),
        BindingStore::new(dir.path().join("state.toml")),
    );

    let err = coordinator.fetch_roster(&[refused]).await.unwrap_err();
    assert!(err.to_string().contains("Connection refused"));
}

#[tokio::test]
async fn test_streaming_console_counts_as_applied() {
    let (target, mut rx) = spawn_streaming_console().await;

    let options = DispatchOptions {
        settle_delay: Duration::from_millis(10),
        target_timeout: Duration::from_secs(1),
        completion_message: "done".to_string(),
    };
    let dispatcher = MultiHostDispatcher::new(Arc::new(TcpConnector::new(session_options())), options);
    let commands = vec![
        "spec_usenumberkeys_nobinds false".to_string(),
        r#"bind "1" "spec_player 2""#.to_string(),
    ];

    let report = dispatcher.dispatch(std::slice::from_ref(&target), &commands).await;

    assert_eq!(report.status(), DispatchStatus::AllSucceeded);
    assert!(report.outcomes[0].error().is_none());

    let received = collect(&mut rx, 3).await;
    assert_eq!(
        received,
        vec![
            "spec_usenumberkeys_nobinds false".to_string(),
            r#"bind "1" "spec_player 2""#.to_string(),
            r#"echo "done""#.to_string(),
        ]
    );
}
