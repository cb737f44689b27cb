use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::core::input::InputBuffer;
use crate::core::message::DisplayLog;
use crate::core::transport::{MessageTransport, TransportError};
use crate::core::widget::{ChatWidget, WidgetEvent, WidgetEventDispatcher};

/// A request captured by [`ScriptedTransport`], waiting for the test to answer.
pub struct PendingRequest {
    pub text: String,
    reply_tx: oneshot::Sender<Result<String, TransportError>>,
}

impl PendingRequest {
    pub fn reply(self, result: Result<String, TransportError>) {
        let _ = self.reply_tx.send(result);
    }
}

/// Transport whose responses are resolved by the test, in any order.
pub struct ScriptedTransport {
    requests: mpsc::UnboundedSender<PendingRequest>,
}

impl ScriptedTransport {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { requests: tx }, rx)
    }
}

#[async_trait]
impl MessageTransport for ScriptedTransport {
    async fn send(&self, text: &str) -> Result<String, TransportError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.requests.send(PendingRequest {
            text: text.to_string(),
            reply_tx,
        });
        reply_rx.await.unwrap_or_else(|_| {
            Err(TransportError::Status {
                status: 503,
                body: "scripted request dropped".to_string(),
            })
        })
    }
}

pub type TestWidgetParts = (
    ChatWidget,
    mpsc::UnboundedReceiver<PendingRequest>,
    mpsc::UnboundedReceiver<WidgetEvent>,
);

pub fn create_test_widget(draft: &str) -> TestWidgetParts {
    create_test_widget_with_log(DisplayLog::new(), draft)
}

pub fn create_test_widget_with_log(log: DisplayLog, draft: &str) -> TestWidgetParts {
    let (transport, requests) = ScriptedTransport::new();
    let (dispatcher, events) = WidgetEventDispatcher::new();
    let widget = ChatWidget::new(
        log,
        InputBuffer::from(draft),
        Arc::new(transport),
        dispatcher,
    );
    (widget, requests, events)
}

/// A responder that accepts connections and reads requests but never answers.
///
/// Returns the base URL and the server task; abort the task when done.
pub async fn spawn_silent_responder() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("local addr should resolve");

    let handle = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut chunk = [0u8; 1024];
            let _ = stream.read(&mut chunk).await;
            held.push(stream);
        }
    });

    (format!("http://{addr}"), handle)
}
