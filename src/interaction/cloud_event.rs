//! Answers incoming CloudEvents with a chat reply.
//!
//! The reply is sent from a detached task; the caller is acknowledged without
//! waiting for the chat service. The task may outlive the request that spawned it,
//! and its only continuation is logging.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, error, info, instrument};

use crate::{
    base::{
        replies::GREETING,
        types::{Acknowledgment, CloudEvent, EventKind, ImageProcessedData, Reply, Res, TextData},
    },
    interaction::format::format_faces,
    service::chat::ChatClient,
};

/// Message logged and returned when a request carries no event.
pub const NO_CLOUD_EVENT: &str = "No CloudEvent received";

/// Handles a single event.
///
/// Must be called from within a tokio runtime, since the reply is sent from a spawned task.
#[instrument(skip_all, fields(event_type = event.as_ref().map(|e| e.ty.as_str())))]
pub fn handle_cloud_event(event: Option<CloudEvent>, chat: ChatClient) -> Acknowledgment {
    let Some(event) = event else {
        error!("{}", NO_CLOUD_EVENT);
        return Acknowledgment::message(NO_CLOUD_EVENT);
    };

    match build_reply(&event) {
        Ok(Some(reply)) => send_reply(reply, chat),
        Ok(None) => error!("Cannot handle events of type: {}", event.ty),
        Err(err) => error!("Malformed `{}` event: {}", event.ty, err),
    }

    Acknowledgment::no_content()
}

/// Builds the reply for an event, or `None` when the event type is not one we answer.
pub fn build_reply(event: &CloudEvent) -> Res<Option<Reply>> {
    let reply = match event.kind() {
        EventKind::ImageProcessed => {
            let data: ImageProcessedData = decode(&event.data)?;
            Reply {
                text: format_faces(&data.faces),
                chat: data.chat,
            }
        }
        EventKind::Text => {
            let data: TextData = decode(&event.data)?;
            Reply {
                text: GREETING.to_string(),
                chat: data.chat,
            }
        }
        EventKind::Unrecognized(_) => return Ok(None),
    };

    Ok(Some(reply))
}

fn decode<T: DeserializeOwned>(data: &Value) -> Res<T> {
    Ok(T::deserialize(data)?)
}

/// Sends the reply in the background, logging the outcome.
#[instrument(skip_all, fields(chat = %reply.chat))]
fn send_reply(reply: Reply, chat: ChatClient) {
    tokio::spawn(
        async move {
            match chat.send_message(&reply.chat, &reply.text).await {
                Ok(()) => info!("Done"),
                Err(err) => error!("Error while sending reply: {}", err),
            }
        }
        .in_current_span(),
    );
}

// Tests.

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;
    use crate::{
        base::types::{ChatTarget, Face, IMAGE_PROCESSED_EVENT, TEXT_EVENT, Void},
        service::chat::MockGenericChatClient,
    };

    /// A chat client that forwards every sent message to the returned receiver.
    fn recording_chat(result: fn() -> Void) -> (ChatClient, mpsc::UnboundedReceiver<(ChatTarget, String)>) {
        let (tx, rx) = mpsc::unbounded_channel();

        let mut mock = MockGenericChatClient::new();
        mock.expect_send_message().times(1).returning(move |chat, text| {
            let _ = tx.send((chat.clone(), text.to_string()));
            result()
        });

        (ChatClient::new(Arc::new(mock)), rx)
    }

    /// A chat client that fails the test if anything is sent.
    fn silent_chat() -> ChatClient {
        let mut mock = MockGenericChatClient::new();
        mock.expect_send_message().never();

        ChatClient::new(Arc::new(mock))
    }

    async fn next_sent(rx: &mut mpsc::UnboundedReceiver<(ChatTarget, String)>) -> (ChatTarget, String) {
        tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.expect("timed out waiting for a send").expect("chat client dropped")
    }

    #[tokio::test]
    async fn test_no_event() {
        let ack = handle_cloud_event(None, silent_chat());

        assert_eq!(ack, Acknowledgment::message("No CloudEvent received"));
    }

    #[tokio::test]
    async fn test_text_event() {
        let (chat, mut rx) = recording_chat(|| Ok(()));

        let ack = handle_cloud_event(Some(CloudEvent::new(TEXT_EVENT, json!({ "chat": "C1" }))), chat);

        assert_eq!(ack, Acknowledgment::no_content());
        let (target, text) = next_sent(&mut rx).await;
        assert_eq!(target, ChatTarget::from("C1"));
        assert_eq!(text, "👋 😃\nSend me an image with faces in it and I will analyze it for you.");
    }

    #[tokio::test]
    async fn test_image_processed_event() {
        let (chat, mut rx) = recording_chat(|| Ok(()));
        let faces = json!([{ "age": 30, "emotion": { "happiness": 0.9, "sadness": 0.1 } }]);

        let ack = handle_cloud_event(Some(CloudEvent::new(IMAGE_PROCESSED_EVENT, json!({ "faces": faces.clone(), "chat": "C2" }))), chat);

        assert_eq!(ack, Acknowledgment::no_content());
        let (target, text) = next_sent(&mut rx).await;
        assert_eq!(target, ChatTarget::from("C2"));
        assert_eq!(text, format_faces(&serde_json::from_value::<Vec<Face>>(faces).unwrap()));
    }

    #[tokio::test]
    async fn test_null_emotion_is_answered() {
        let (chat, mut rx) = recording_chat(|| Ok(()));
        let data = json!({ "faces": [{ "age": 9, "emotion": null }], "chat": "C5" });

        let ack = handle_cloud_event(Some(CloudEvent::new(IMAGE_PROCESSED_EVENT, data)), chat);

        assert_eq!(ack, Acknowledgment::no_content());
        let (_, text) = next_sent(&mut rx).await;
        assert!(text.ends_with("I found 1 face in this image.\n\n\n* Age: 9"));
    }

    #[tokio::test]
    async fn test_unrecognized_event_is_not_answered() {
        let ack = handle_cloud_event(Some(CloudEvent::new("unknown.type", json!({}))), silent_chat());

        assert_eq!(ack, Acknowledgment::no_content());
    }

    #[tokio::test]
    async fn test_malformed_data_is_not_answered() {
        let chat = silent_chat();

        assert_eq!(handle_cloud_event(Some(CloudEvent::new(TEXT_EVENT, json!({}))), chat.clone()), Acknowledgment::no_content());
        assert_eq!(
            handle_cloud_event(Some(CloudEvent::new(IMAGE_PROCESSED_EVENT, json!({ "chat": "C2" }))), chat.clone()),
            Acknowledgment::no_content()
        );
        assert_eq!(handle_cloud_event(Some(CloudEvent::new(IMAGE_PROCESSED_EVENT, Value::Null)), chat), Acknowledgment::no_content());
    }

    #[tokio::test]
    async fn test_send_failure_is_absorbed() {
        let (chat, mut rx) = recording_chat(|| Err(anyhow::anyhow!("Telegram is down")));

        let ack = handle_cloud_event(Some(CloudEvent::new(TEXT_EVENT, json!({ "chat": 7 }))), chat);

        assert_eq!(ack, Acknowledgment::no_content());
        assert_eq!(next_sent(&mut rx).await.0, ChatTarget::from("7"));
    }

    #[test]
    fn test_build_reply() {
        let reply = build_reply(&CloudEvent::new(TEXT_EVENT, json!({ "chat": "C1", "faces": "ignored" }))).unwrap().unwrap();
        assert_eq!(reply.chat, ChatTarget::from("C1"));
        assert_eq!(reply.text, GREETING);

        assert!(build_reply(&CloudEvent::new("telegram.unknown", json!({ "chat": "C1" }))).unwrap().is_none());
        assert!(build_reply(&CloudEvent::new(TEXT_EVENT, json!("C1"))).is_err());
    }
}
