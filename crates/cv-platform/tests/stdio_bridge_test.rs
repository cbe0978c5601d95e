use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use cv_core::ports::{HistoryGatewayPort, HostInput, ViewHostPort};
use cv_core::{
    ClipContent, ClipEntry, DisplayRow, GatewayError, MalformedPayload, RestoreFn, RowPreview,
};
use cv_platform::StdioBridge;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::io::{duplex, AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines};
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

struct Host {
    stdin: DuplexStream,
    stdout: Lines<BufReader<DuplexStream>>,
    bridge: Arc<StdioBridge>,
    _dir: TempDir,
}

fn start_with_history(history: Option<&str>) -> Host {
    let dir = tempfile::tempdir().unwrap();
    let history_path: PathBuf = dir.path().join("history.json");
    if let Some(history) = history {
        std::fs::write(&history_path, history).unwrap();
    }

    let (stdin, bridge_in) = duplex(64 * 1024);
    let (bridge_out, stdout) = duplex(64 * 1024);
    let (bridge, _writer) = StdioBridge::spawn(bridge_in, bridge_out, history_path);

    Host {
        stdin,
        stdout: BufReader::new(stdout).lines(),
        bridge,
        _dir: dir,
    }
}

impl Host {
    async fn send(&mut self, line: &str) {
        self.stdin.write_all(line.as_bytes()).await.unwrap();
        self.stdin.write_all(b"\n").await.unwrap();
    }

    async fn next_event(&mut self) -> Value {
        let line = timeout(WAIT, self.stdout.next_line())
            .await
            .expect("timed out waiting for stdout")
            .unwrap()
            .expect("stdout closed");
        serde_json::from_str(&line).unwrap()
    }
}

fn text_row(text: &str, on_restore: RestoreFn) -> DisplayRow {
    DisplayRow::new(
        ClipEntry::text(text),
        RowPreview::Text {
            text: text.to_string(),
        },
        None,
        on_restore,
    )
}

#[tokio::test]
async fn test_missing_history_file_is_empty() {
    let host = start_with_history(None);

    let clips = host.bridge.fetch_history().await.unwrap();

    assert!(clips.is_empty());
}

#[tokio::test]
async fn test_history_file_entries_are_fetched_in_order() {
    let host = start_with_history(Some(
        r#"[{"content":{"Text":"first"}},{"ts":"2025-01-15T12:34:56Z","content":{"Text":"second"}}]"#,
    ));

    let clips = host.bridge.fetch_history().await.unwrap();

    assert_eq!(clips.len(), 2);
    assert_eq!(clips[0], Ok(ClipEntry::text("first")));
    let second = clips[1].clone().unwrap();
    assert_eq!(second.content, ClipContent::text("second"));
    assert!(second.ts.is_some());
}

#[tokio::test]
async fn test_clip_lines_feed_the_clip_stream() {
    let mut host = start_with_history(None);
    let mut clips = host.bridge.subscribe("clip").await.unwrap();

    host.send(r#"{"type":"clip","payload":{"content":{"Text":"hello"}}}"#)
        .await;
    host.send(r#"{"type":"clip","payload":{"content":{"Text":"a","ImageBase64":"QUJD"}}}"#)
        .await;

    let first = timeout(WAIT, clips.recv()).await.unwrap().unwrap();
    assert_eq!(first, Ok(ClipEntry::text("hello")));
    let second = timeout(WAIT, clips.recv()).await.unwrap().unwrap();
    assert_eq!(second, Err(MalformedPayload::AmbiguousVariant));
}

#[tokio::test]
async fn test_subscribe_only_once_and_only_to_clip() {
    let host = start_with_history(None);

    assert!(matches!(
        host.bridge.subscribe("paste").await,
        Err(GatewayError::Subscribe { .. })
    ));
    assert!(host.bridge.subscribe("clip").await.is_ok());
    assert!(matches!(
        host.bridge.subscribe("clip").await,
        Err(GatewayError::Subscribe { .. })
    ));
}

#[tokio::test]
async fn test_filter_lines_feed_host_input() {
    let mut host = start_with_history(None);
    let mut input = host.bridge.subscribe_input().unwrap();

    host.send(r#"{"type":"filter","value":"Needle"}"#).await;

    let event = timeout(WAIT, input.recv()).await.unwrap();
    assert_eq!(event, Some(HostInput::FilterChanged("Needle".to_string())));
}

#[tokio::test]
async fn test_end_of_stdin_closes_host_input() {
    let host = start_with_history(None);
    let mut input = host.bridge.subscribe_input().unwrap();

    drop(host.stdin);

    let event = timeout(WAIT, input.recv()).await.unwrap();
    assert_eq!(event, None);
}

#[tokio::test]
async fn test_rows_are_written_and_clicks_restore_that_row() {
    let mut host = start_with_history(None);
    let (restore_tx, mut restore_rx) = mpsc::unbounded_channel();
    let on_restore: RestoreFn = Arc::new(move |entry| {
        let _ = restore_tx.send(entry);
    });

    host.bridge.show_rows(vec![
        text_row("newest", on_restore.clone()),
        text_row("oldest", on_restore),
    ]);
    let rows = host.next_event().await;
    assert_eq!(rows["event"], "rows");
    assert_eq!(rows["generation"], 0);
    assert_eq!(rows["rows"][1], json!({"row": 1, "kind": "text", "text": "oldest"}));

    host.send(r#"{"type":"click","generation":0,"row":1}"#).await;

    let restored = timeout(WAIT, restore_rx.recv()).await.unwrap().unwrap();
    assert_eq!(restored, ClipEntry::text("oldest"));
}

#[tokio::test]
async fn test_click_outside_displayed_rows_is_reported() {
    let mut host = start_with_history(None);

    host.send(r#"{"type":"click","generation":0,"row":7}"#).await;

    let event = host.next_event().await;
    assert_eq!(event["event"], "error");
    assert_eq!(event["kind"], "malformed_payload");
}

#[tokio::test]
async fn test_malformed_line_is_reported_and_skipped() {
    let mut host = start_with_history(None);
    let mut input = host.bridge.subscribe_input().unwrap();

    host.send("not json at all").await;
    host.send(r#"{"type":"filter","value":"after"}"#).await;

    let event = host.next_event().await;
    assert_eq!(event["event"], "error");
    assert_eq!(event["kind"], "malformed_payload");

    let next = timeout(WAIT, input.recv()).await.unwrap();
    assert_eq!(next, Some(HostInput::FilterChanged("after".to_string())));
}

#[tokio::test]
async fn test_restore_writes_restore_clip_event() {
    let mut host = start_with_history(None);

    host.bridge
        .restore(&ClipEntry::image(b"ABC".to_vec()))
        .await
        .unwrap();

    let event = host.next_event().await;
    assert_eq!(
        event,
        json!({"event": "restore_clip", "entry": {"content": {"ImageBase64": "QUJD"}}})
    );
}

#[tokio::test]
async fn test_click_uses_the_generation_it_names() {
    let mut host = start_with_history(None);
    let (restore_tx, mut restore_rx) = mpsc::unbounded_channel();
    let on_restore: RestoreFn = Arc::new(move |entry| {
        let _ = restore_tx.send(entry);
    });

    host.bridge.show_rows(vec![text_row("e1", on_restore.clone())]);
    host.bridge.show_rows(vec![
        text_row("newer", on_restore.clone()),
        text_row("e1", on_restore),
    ]);
    assert_eq!(host.next_event().await["generation"], 0);
    assert_eq!(host.next_event().await["generation"], 1);

    host.send(r#"{"type":"click","generation":0,"row":0}"#).await;
    let restored = timeout(WAIT, restore_rx.recv()).await.unwrap().unwrap();
    assert_eq!(restored, ClipEntry::text("e1"));

    host.send(r#"{"type":"click","generation":1,"row":0}"#).await;
    let restored = timeout(WAIT, restore_rx.recv()).await.unwrap().unwrap();
    assert_eq!(restored, ClipEntry::text("newer"));
}
