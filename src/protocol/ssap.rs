// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! SSAP client over `tokio-tungstenite`.
//!
//! Each connection runs one handler task that owns the WebSocket. Requests
//! and subscriptions are sent to it over a channel and correlated with
//! responses by frame id.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::pointer::PointerSocket;
use super::ssap_message::{IncomingFrame, OutgoingFrame, REGISTER_ID, register_payload};
use super::{Connection, ConnectionEvent, Connector, POINTER_SOCKET_URI, PushReceiver};
use crate::error::ProtocolError;

/// Default SSAP WebSocket port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const PUSH_BUFFER: usize = 32;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type ResponseTx = oneshot::Sender<Result<Value, ProtocolError>>;
type PushTx = mpsc::Sender<Result<Value, ProtocolError>>;

/// Opens SSAP sessions to webOS TVs.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lgtv_bridge::protocol::SsapConnector;
///
/// let connector = SsapConnector::new("/var/lib/lgtv")
///     .with_request_timeout(Duration::from_secs(5));
/// assert_eq!(connector.port(), 3000);
/// ```
#[derive(Debug, Clone)]
pub struct SsapConnector {
    key_dir: PathBuf,
    port: u16,
    request_timeout: Duration,
}

impl SsapConnector {
    /// Creates a connector storing pairing keys under `key_dir`.
    #[must_use]
    pub fn new(key_dir: impl Into<PathBuf>) -> Self {
        Self {
            key_dir: key_dir.into(),
            port: DEFAULT_PORT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Overrides the WebSocket port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Overrides the per-request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Returns the WebSocket port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the path of the pairing key file for `address`.
    #[must_use]
    pub fn key_file(&self, address: &str) -> PathBuf {
        self.key_dir.join(format!("lgtv-{address}-keyFile"))
    }
}

impl Connector for SsapConnector {
    type Connection = SsapConnection;

    fn connect(&self, address: &str, events: mpsc::Sender<ConnectionEvent>) -> SsapConnection {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let url = format!("ws://{address}:{}", self.port);
        let key_file = self.key_file(address);

        tracing::debug!(host = %address, url = %url, "Opening SSAP session");
        tokio::spawn(run_connection(
            address.to_string(),
            url,
            key_file,
            cmd_rx,
            events,
        ));

        SsapConnection {
            address: address.to_string(),
            cmd_tx,
            next_id: AtomicU64::new(1),
            request_timeout: self.request_timeout,
        }
    }
}

enum Outgoing {
    Request {
        id: String,
        uri: String,
        payload: Option<Value>,
        response_tx: ResponseTx,
    },
    Subscribe {
        id: String,
        uri: String,
        push_tx: PushTx,
    },
    Close,
}

/// Handle to a running SSAP session.
#[derive(Debug)]
pub struct SsapConnection {
    address: String,
    cmd_tx: mpsc::UnboundedSender<Outgoing>,
    next_id: AtomicU64,
    request_timeout: Duration,
}

impl SsapConnection {
    /// Returns the device address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn send(&self, outgoing: Outgoing) -> Result<(), ProtocolError> {
        self.cmd_tx
            .send(outgoing)
            .map_err(|_| ProtocolError::ChannelClosed("SSAP handler stopped".to_string()))
    }
}

impl Connection for SsapConnection {
    type Input = PointerSocket;

    async fn request(&self, uri: &str, payload: Option<Value>) -> Result<Value, ProtocolError> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(Outgoing::Request {
            id: self.next_id("request"),
            uri: uri.to_string(),
            payload,
            response_tx,
        })?;

        #[allow(clippy::cast_possible_truncation)]
        let timeout_ms = self.request_timeout.as_millis() as u64;
        tokio::time::timeout(self.request_timeout, response_rx)
            .await
            .map_err(|_| ProtocolError::Timeout(timeout_ms))?
            .map_err(|_| ProtocolError::ChannelClosed("response dropped".to_string()))?
    }

    fn subscribe(&self, uri: &str) -> Result<PushReceiver, ProtocolError> {
        let (push_tx, push_rx) = mpsc::channel(PUSH_BUFFER);
        self.send(Outgoing::Subscribe {
            id: self.next_id("subscription"),
            uri: uri.to_string(),
            push_tx,
        })?;
        Ok(push_rx)
    }

    async fn input_socket(&self) -> Result<PointerSocket, ProtocolError> {
        let payload = self.request(POINTER_SOCKET_URI, None).await?;
        let path = payload
            .get("socketPath")
            .and_then(Value::as_str)
            .ok_or_else(|| ProtocolError::Rejected("response has no socketPath".to_string()))?;
        PointerSocket::connect(path).await
    }

    fn close(&self) {
        let _ = self.cmd_tx.send(Outgoing::Close);
    }
}

async fn emit(events: &mpsc::Sender<ConnectionEvent>, event: ConnectionEvent) {
    // The receiver is gone once the session has moved to a newer connection.
    let _ = events.send(event).await;
}

async fn run_connection(
    address: String,
    url: String,
    key_file: PathBuf,
    cmd_rx: mpsc::UnboundedReceiver<Outgoing>,
    events: mpsc::Sender<ConnectionEvent>,
) {
    let mut ws = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((ws, _)) => ws,
        Err(e) => {
            tracing::debug!(host = %address, error = %e, "SSAP dial failed");
            emit(&events, ConnectionEvent::Error(e.into())).await;
            emit(&events, ConnectionEvent::Disconnected(None)).await;
            return;
        }
    };

    if let Err(e) = register(&address, &mut ws, &key_file).await {
        tracing::warn!(host = %address, error = %e, "SSAP registration failed");
        emit(&events, ConnectionEvent::Error(e)).await;
        emit(&events, ConnectionEvent::Disconnected(None)).await;
        return;
    }

    tracing::info!(host = %address, "SSAP session registered");
    emit(&events, ConnectionEvent::Connected).await;

    match handler_loop(&address, ws, cmd_rx).await {
        Ended::Local => tracing::debug!(host = %address, "SSAP session closed locally"),
        Ended::Remote(err) => {
            if let Some(e) = err {
                tracing::debug!(host = %address, error = %e, "SSAP session failed");
                emit(&events, ConnectionEvent::Error(e)).await;
            }
            emit(&events, ConnectionEvent::Disconnected(None)).await;
        }
    }
}

async fn register(address: &str, ws: &mut WsStream, key_file: &Path) -> Result<(), ProtocolError> {
    let stored = read_client_key(key_file).await;
    let payload = register_payload(stored.as_deref());
    ws.send(Message::Text(OutgoingFrame::register(&payload).encode()?.into()))
        .await?;

    while let Some(message) = ws.next().await {
        let Message::Text(text) = message? else {
            continue;
        };
        let frame = IncomingFrame::decode(&text)?;
        if frame.id.as_deref() != Some(REGISTER_ID) {
            continue;
        }

        if frame.is_error() {
            return Err(ProtocolError::Registration(
                frame.error.unwrap_or_else(|| "pairing refused".to_string()),
            ));
        }

        if frame.is_registered() {
            if let Some(key) = frame.client_key()
                && stored.as_deref() != Some(key)
            {
                write_client_key(address, key_file, key).await;
            }
            return Ok(());
        }

        let prompted = frame
            .payload
            .as_ref()
            .and_then(|p| p.get("pairingType"))
            .and_then(Value::as_str)
            == Some("PROMPT");
        if prompted {
            tracing::info!(host = %address, "Accept the pairing request on the TV");
        }
    }

    Err(ProtocolError::Registration(
        "connection closed during registration".to_string(),
    ))
}

async fn read_client_key(key_file: &Path) -> Option<String> {
    let key = tokio::fs::read_to_string(key_file).await.ok()?;
    let key = key.trim();
    (!key.is_empty()).then(|| key.to_string())
}

async fn write_client_key(address: &str, key_file: &Path, key: &str) {
    match tokio::fs::write(key_file, key).await {
        Ok(()) => tracing::debug!(host = %address, path = %key_file.display(), "Stored client key"),
        Err(e) => {
            tracing::warn!(host = %address, path = %key_file.display(), error = %e, "Failed to store client key");
        }
    }
}

/// How a handler loop ended.
enum Ended {
    /// The connection handle asked to close.
    Local,
    /// The socket went away, with the failure if it was not a clean close.
    Remote(Option<ProtocolError>),
}

/// Open requests and subscriptions keyed by frame id.
#[derive(Default)]
struct Routes {
    pending: HashMap<String, ResponseTx>,
    subscriptions: HashMap<String, PushTx>,
}

impl Routes {
    /// Tracks a request. Requests whose caller gave up are dropped.
    fn add_request(&mut self, id: String, tx: ResponseTx) {
        self.pending.retain(|_, tx| !tx.is_closed());
        self.pending.insert(id, tx);
    }

    /// Tracks a subscription. Subscriptions nobody listens to are dropped.
    fn add_subscription(&mut self, id: String, tx: PushTx) {
        self.subscriptions.retain(|_, tx| !tx.is_closed());
        self.subscriptions.insert(id, tx);
    }

    async fn route(&mut self, address: &str, text: &str) {
        let frame = match IncomingFrame::decode(text) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(host = %address, error = %e, "Ignoring undecodable SSAP frame");
                return;
            }
        };
        let Some(id) = frame.id.clone() else {
            return;
        };

        if let Some(tx) = self.pending.remove(&id) {
            let _ = tx.send(frame.into_result());
        } else if let Some(tx) = self.subscriptions.get(&id) {
            if tx.send(frame.into_result()).await.is_err() {
                tracing::trace!(host = %address, id = %id, "Subscription receiver dropped");
                self.subscriptions.remove(&id);
            }
        } else {
            tracing::trace!(host = %address, id = %id, "Unsolicited SSAP frame");
        }
    }
}

/// Runs the request/push loop until the session ends.
async fn handler_loop(
    address: &str,
    ws: WsStream,
    mut cmd_rx: mpsc::UnboundedReceiver<Outgoing>,
) -> Ended {
    let (mut ws_tx, mut ws_rx) = ws.split();
    let mut routes = Routes::default();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let (id, frame) = match cmd {
                    None | Some(Outgoing::Close) => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        return Ended::Local;
                    }
                    Some(Outgoing::Request { id, uri, payload, response_tx }) => {
                        match OutgoingFrame::request(&id, &uri, payload.as_ref()).encode() {
                            Ok(frame) => {
                                routes.add_request(id.clone(), response_tx);
                                (id, frame)
                            }
                            Err(e) => {
                                let _ = response_tx.send(Err(e));
                                continue;
                            }
                        }
                    }
                    Some(Outgoing::Subscribe { id, uri, push_tx }) => {
                        match OutgoingFrame::subscribe(&id, &uri).encode() {
                            Ok(frame) => {
                                routes.add_subscription(id.clone(), push_tx);
                                (id, frame)
                            }
                            Err(e) => {
                                let _ = push_tx.try_send(Err(e));
                                continue;
                            }
                        }
                    }
                };

                tracing::trace!(host = %address, id = %id, "SSAP frame out");
                if let Err(e) = ws_tx.send(Message::Text(frame.into())).await {
                    return Ended::Remote(Some(e.into()));
                }
            }
            message = ws_rx.next() => {
                match message {
                    None => return Ended::Remote(None),
                    Some(Err(e)) => return Ended::Remote(Some(e.into())),
                    Some(Ok(Message::Text(text))) => routes.route(address, &text).await,
                    Some(Ok(Message::Close(frame))) => return Ended::Remote(close_error(frame)),
                    Some(Ok(_)) => {}
                }
            }
        }
    }
}

fn close_error(frame: Option<CloseFrame>) -> Option<ProtocolError> {
    let frame = frame?;
    if frame.code == CloseCode::Normal {
        return None;
    }
    Some(ProtocolError::Closed(format!(
        "code {}: {}",
        u16::from(frame.code),
        frame.reason.as_str()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::InputSocket;
    use serde_json::json;
    use tokio::net::TcpListener;

    type ServerStream = WebSocketStream<TcpStream>;

    async fn listen() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    async fn accept(listener: &TcpListener) -> ServerStream {
        let (stream, _) = listener.accept().await.unwrap();
        tokio_tungstenite::accept_async(stream).await.unwrap()
    }

    async fn next_json(ws: &mut ServerStream) -> Value {
        loop {
            if let Message::Text(text) = ws.next().await.unwrap().unwrap() {
                return serde_json::from_str(&text).unwrap();
            }
        }
    }

    async fn reply(ws: &mut ServerStream, value: Value) {
        ws.send(Message::Text(value.to_string().into())).await.unwrap();
    }

    /// Accepts a connection and completes registration with `key`.
    async fn accept_registered(listener: &TcpListener, key: &str) -> (ServerStream, Value) {
        let mut ws = accept(listener).await;
        let register = next_json(&mut ws).await;
        reply(
            &mut ws,
            json!({"type": "response", "id": REGISTER_ID, "payload": {"pairingType": "PROMPT"}}),
        )
        .await;
        reply(
            &mut ws,
            json!({"type": "registered", "id": REGISTER_ID, "payload": {"client-key": key}}),
        )
        .await;
        (ws, register)
    }

    fn key_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lgtv-bridge-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn key_file_naming() {
        let connector = SsapConnector::new("/keys");
        assert_eq!(
            connector.key_file("192.168.1.20"),
            PathBuf::from("/keys/lgtv-192.168.1.20-keyFile")
        );
    }

    #[test]
    fn close_error_classification() {
        assert!(close_error(None).is_none());
        assert!(
            close_error(Some(CloseFrame {
                code: CloseCode::Normal,
                reason: "bye".into(),
            }))
            .is_none()
        );
        assert!(matches!(
            close_error(Some(CloseFrame {
                code: CloseCode::Away,
                reason: "standby".into(),
            })),
            Some(ProtocolError::Closed(_))
        ));
    }

    #[tokio::test]
    async fn registers_and_stores_key() {
        let (listener, port) = listen().await;
        let dir = key_dir("register");
        let connector = SsapConnector::new(&dir).with_port(port);
        let (events_tx, mut events_rx) = mpsc::channel(8);

        let _conn = connector.connect("127.0.0.1", events_tx);
        let (_ws, register) = accept_registered(&listener, "fresh-key").await;

        assert_eq!(register["type"], "register");
        assert!(register["payload"].get("client-key").is_none());
        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Connected)
        ));

        let stored = tokio::fs::read_to_string(connector.key_file("127.0.0.1"))
            .await
            .unwrap();
        assert_eq!(stored, "fresh-key");
    }

    #[tokio::test]
    async fn sends_stored_key_on_register() {
        let (listener, port) = listen().await;
        let dir = key_dir("stored");
        let connector = SsapConnector::new(&dir).with_port(port);
        std::fs::write(connector.key_file("127.0.0.1"), "old-key\n").unwrap();
        let (events_tx, _events_rx) = mpsc::channel(8);

        let _conn = connector.connect("127.0.0.1", events_tx);
        let (_ws, register) = accept_registered(&listener, "old-key").await;

        assert_eq!(register["payload"]["client-key"], "old-key");
    }

    #[tokio::test]
    async fn request_is_correlated_by_id() {
        let (listener, port) = listen().await;
        let connector = SsapConnector::new(key_dir("request")).with_port(port);
        let (events_tx, mut events_rx) = mpsc::channel(8);

        let conn = connector.connect("127.0.0.1", events_tx);
        let (mut ws, _) = accept_registered(&listener, "k").await;
        events_rx.recv().await.unwrap();

        let server = tokio::spawn(async move {
            let request = next_json(&mut ws).await;
            assert_eq!(request["uri"], "ssap://audio/getVolume");
            reply(
                &mut ws,
                json!({"type": "response", "id": "unrelated", "payload": {}}),
            )
            .await;
            reply(
                &mut ws,
                json!({
                    "type": "response",
                    "id": request["id"],
                    "payload": {"returnValue": true, "volume": 11}
                }),
            )
            .await;
            ws
        });

        let payload = conn.request("ssap://audio/getVolume", None).await.unwrap();
        assert_eq!(payload["volume"], 11);
        server.await.unwrap();
    }

    #[tokio::test]
    async fn rejected_request() {
        let (listener, port) = listen().await;
        let connector = SsapConnector::new(key_dir("rejected")).with_port(port);
        let (events_tx, _events_rx) = mpsc::channel(8);

        let conn = connector.connect("127.0.0.1", events_tx);
        let (mut ws, _) = accept_registered(&listener, "k").await;

        let server = tokio::spawn(async move {
            let request = next_json(&mut ws).await;
            reply(
                &mut ws,
                json!({"type": "error", "id": request["id"], "error": "401 insufficient permissions"}),
            )
            .await;
            ws
        });

        let result = conn.request("ssap://system/turnOff", None).await;
        assert!(matches!(result, Err(ProtocolError::Rejected(_))));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn request_times_out() {
        let (listener, port) = listen().await;
        let connector = SsapConnector::new(key_dir("timeout"))
            .with_port(port)
            .with_request_timeout(Duration::from_millis(50));
        let (events_tx, _events_rx) = mpsc::channel(8);

        let conn = connector.connect("127.0.0.1", events_tx);
        let (_ws, _) = accept_registered(&listener, "k").await;

        let result = conn.request("ssap://audio/getVolume", None).await;
        assert!(matches!(result, Err(ProtocolError::Timeout(50))));
    }

    #[tokio::test]
    async fn subscription_delivers_pushes() {
        let (listener, port) = listen().await;
        let connector = SsapConnector::new(key_dir("subscribe")).with_port(port);
        let (events_tx, _events_rx) = mpsc::channel(8);

        let conn = connector.connect("127.0.0.1", events_tx);
        let (mut ws, _) = accept_registered(&listener, "k").await;
        let mut pushes = conn.subscribe("ssap://audio/getMute").unwrap();

        let subscribe = next_json(&mut ws).await;
        assert_eq!(subscribe["type"], "subscribe");
        for mute in [false, true] {
            reply(
                &mut ws,
                json!({"type": "response", "id": subscribe["id"], "payload": {"mute": mute}}),
            )
            .await;
        }

        assert_eq!(pushes.recv().await.unwrap().unwrap()["mute"], false);
        assert_eq!(pushes.recv().await.unwrap().unwrap()["mute"], true);
    }

    #[tokio::test]
    async fn dial_failure_reports_error_then_disconnect() {
        let (listener, port) = listen().await;
        drop(listener);
        let connector = SsapConnector::new(key_dir("dial")).with_port(port);
        let (events_tx, mut events_rx) = mpsc::channel(8);

        let _conn = connector.connect("127.0.0.1", events_tx);

        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Error(_))
        ));
        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Disconnected(None))
        ));
    }

    #[tokio::test]
    async fn abnormal_close_reports_error_then_disconnect() {
        let (listener, port) = listen().await;
        let connector = SsapConnector::new(key_dir("abnormal")).with_port(port);
        let (events_tx, mut events_rx) = mpsc::channel(8);

        let _conn = connector.connect("127.0.0.1", events_tx);
        let (mut ws, _) = accept_registered(&listener, "k").await;
        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Connected)
        ));

        ws.close(Some(CloseFrame {
            code: CloseCode::Away,
            reason: "standby".into(),
        }))
        .await
        .unwrap();

        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Error(ProtocolError::Closed(_)))
        ));
        assert!(matches!(
            events_rx.recv().await,
            Some(ConnectionEvent::Disconnected(None))
        ));
    }

    #[test]
    fn routes_drop_abandoned_entries() {
        let mut routes = Routes::default();

        let (timed_out, rx) = oneshot::channel();
        drop(rx);
        routes.add_request("1".to_string(), timed_out);
        let (live, _live_rx) = oneshot::channel();
        routes.add_request("2".to_string(), live);
        assert_eq!(routes.pending.len(), 1);
        assert!(routes.pending.contains_key("2"));

        let (unwatched, rx) = mpsc::channel(1);
        drop(rx);
        routes.add_subscription("3".to_string(), unwatched);
        let (watched, _watched_rx) = mpsc::channel(1);
        routes.add_subscription("4".to_string(), watched);
        assert_eq!(routes.subscriptions.len(), 1);
        assert!(routes.subscriptions.contains_key("4"));
    }

    #[tokio::test]
    async fn answered_request_leaves_no_route() {
        let mut routes = Routes::default();
        let (tx, rx) = oneshot::channel();
        routes.add_request("7".to_string(), tx);

        routes
            .route(
                "127.0.0.1",
                r#"{"type":"response","id":"7","payload":{"returnValue":true}}"#,
            )
            .await;

        assert!(routes.pending.is_empty());
        assert_eq!(rx.await.unwrap().unwrap()["returnValue"], true);
    }

    #[tokio::test]
    async fn input_socket_sends_buttons() {
        let (listener, port) = listen().await;
        let (pointer_listener, pointer_port) = listen().await;
        let connector = SsapConnector::new(key_dir("pointer")).with_port(port);
        let (events_tx, _events_rx) = mpsc::channel(8);

        let conn = connector.connect("127.0.0.1", events_tx);
        let (mut ws, _) = accept_registered(&listener, "k").await;

        let server = tokio::spawn(async move {
            let request = next_json(&mut ws).await;
            assert_eq!(request["uri"], POINTER_SOCKET_URI);
            reply(
                &mut ws,
                json!({
                    "type": "response",
                    "id": request["id"],
                    "payload": {"socketPath": format!("ws://127.0.0.1:{pointer_port}/pointer")}
                }),
            )
            .await;
            let mut pointer = accept(&pointer_listener).await;
            let Message::Text(text) = pointer.next().await.unwrap().unwrap() else {
                panic!("expected text frame");
            };
            (ws, text.to_string())
        });

        let input = conn.input_socket().await.unwrap();
        input.send_button("ENTER").unwrap();

        let (_ws, frame) = server.await.unwrap();
        assert_eq!(frame, "type:button\nname:ENTER\n\n");
    }
}
