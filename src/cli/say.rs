//! TUI-less "say" command

use std::error::Error;
use std::sync::Arc;

use crate::core::config::Settings;
use crate::core::input::InputBuffer;
use crate::core::message::DisplayLog;
use crate::core::transport::{HttpTransport, MessageTransport};
use crate::core::widget::{ChatWidget, WidgetEvent, WidgetEventDispatcher};

/// Submit `prompt` through a fresh widget and wait for its outcome.
///
/// Returns the reply text, or the failure description.
pub async fn say_once(
    transport: Arc<dyn MessageTransport>,
    prompt: &str,
) -> Result<String, String> {
    let (dispatcher, mut events) = WidgetEventDispatcher::new();
    let mut widget = ChatWidget::new(
        DisplayLog::new(),
        InputBuffer::from(prompt),
        transport,
        dispatcher,
    );

    if widget.submit().is_none() {
        return Err("nothing to send".to_string());
    }

    while let Some(event) = events.recv().await {
        match &event {
            WidgetEvent::Reply { text, .. } => {
                let text = text.clone();
                widget.apply(event);
                return Ok(text);
            }
            WidgetEvent::Failed { error, .. } => return Err(error.clone()),
            WidgetEvent::ScrollTick => {}
        }
    }
    Err("request task ended without a result".to_string())
}

pub async fn run_say(prompt: Vec<String>, settings: &Settings) -> Result<(), Box<dyn Error>> {
    let prompt = prompt.join(" ");
    if prompt.is_empty() {
        eprintln!("Usage: poncho-chat say <message>");
        std::process::exit(1);
    }

    let transport = HttpTransport::with_timeout(&settings.server_url, settings.request_timeout)?;
    match say_once(Arc::new(transport), &prompt).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ Error: {err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transport::TransportError;
    use crate::utils::test_utils::ScriptedTransport;

    #[tokio::test]
    async fn reply_is_returned_verbatim() {
        let (transport, mut requests) = ScriptedTransport::new();
        let answer = tokio::spawn(async move {
            let request = requests.recv().await.expect("request");
            assert_eq!(request.text, "hello there");
            request.reply(Ok("<b>hi</b>\n".to_string()));
        });

        let reply = say_once(Arc::new(transport), "hello there").await;
        answer.await.expect("responder task");
        assert_eq!(reply, Ok("<b>hi</b>\n".to_string()));
    }

    #[tokio::test]
    async fn failure_is_reported() {
        let (transport, mut requests) = ScriptedTransport::new();
        tokio::spawn(async move {
            let request = requests.recv().await.expect("request");
            request.reply(Err(TransportError::Status {
                status: 500,
                body: "boom".to_string(),
            }));
        });

        let err = say_once(Arc::new(transport), "hello")
            .await
            .expect_err("should fail");
        assert!(err.contains("500"), "error was {err:?}");
    }

    #[tokio::test]
    async fn empty_prompt_sends_nothing() {
        let (transport, mut requests) = ScriptedTransport::new();
        assert!(say_once(Arc::new(transport), "").await.is_err());
        assert!(requests.try_recv().is_err());
    }
}
