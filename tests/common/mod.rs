//! In-memory stand-ins for the language backend and the LINE transport.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

use linebot::ai::TextGenerator;
use linebot::core::models::{DeliveryResult, GeneratedReply, SentMessage};
use linebot::dispatch::{Dispatcher, ReplyGenerator};
use linebot::errors::BotError;
use linebot::line::ReplyTransport;

enum Script {
    Answer(String),
    Fail(String),
    Panic,
}

/// Backend answering from a prompt -> script table. With a barrier set,
/// every call waits on it before answering.
#[derive(Default)]
pub struct ScriptedBackend {
    answers: HashMap<String, Script>,
    barrier: Option<Arc<Barrier>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, prompt: &str, text: &str) -> Self {
        self.answers
            .insert(prompt.to_string(), Script::Answer(text.to_string()));
        self
    }

    pub fn fail(mut self, prompt: &str, reason: &str) -> Self {
        self.answers
            .insert(prompt.to_string(), Script::Fail(reason.to_string()));
        self
    }

    pub fn panic_on(mut self, prompt: &str) -> Self {
        self.answers.insert(prompt.to_string(), Script::Panic);
        self
    }

    /// Calls block until `parties` of them are in flight at once.
    pub fn rendezvous(mut self, parties: usize) -> Self {
        self.barrier = Some(Arc::new(Barrier::new(parties)));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<GeneratedReply, BotError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        match &self.barrier {
            Some(barrier) => {
                barrier.wait().await;
            }
            None => tokio::task::yield_now().await,
        }
        match self.answers.get(prompt) {
            Some(Script::Answer(text)) => Ok(GeneratedReply { text: text.clone() }),
            Some(Script::Fail(reason)) => Err(BotError::GeminiError(reason.clone())),
            Some(Script::Panic) => panic!("backend blew up on {prompt}"),
            None => Err(BotError::GeminiError(format!("no answer scripted for {prompt}"))),
        }
    }
}

/// Transport recording every reply; tokens listed in `reject` fail.
#[derive(Default)]
pub struct RecordingTransport {
    reject: Vec<String>,
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(mut self, reply_token: &str) -> Self {
        self.reject.push(reply_token.to_string());
        self
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn text_for(&self, reply_token: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .find(|(token, _)| token == reply_token)
            .map(|(_, text)| text)
    }
}

#[async_trait]
impl ReplyTransport for RecordingTransport {
    async fn reply_text(
        &self,
        reply_token: &str,
        text: &str,
    ) -> Result<DeliveryResult, BotError> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        tokio::task::yield_now().await;
        if self.reject.iter().any(|t| t == reply_token) {
            return Err(BotError::LineApiError(
                "reply failed (status 400 Bad Request): Invalid reply token".to_string(),
            ));
        }
        Ok(DeliveryResult {
            sent_messages: vec![SentMessage {
                id: format!("msg-{reply_token}"),
                quote_token: None,
            }],
            request_id: Some(format!("req-{reply_token}")),
        })
    }
}

pub fn dispatcher_with(
    backend: Arc<ScriptedBackend>,
    transport: Arc<RecordingTransport>,
) -> Dispatcher {
    Dispatcher::new(ReplyGenerator::new(backend, transport))
}

pub fn text_event_json(reply_token: &str, text: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "message",
        "mode": "active",
        "timestamp": 1_700_000_000_000_u64,
        "source": { "type": "user", "userId": "U4af4980629" },
        "webhookEventId": format!("evt-{reply_token}"),
        "deliveryContext": { "isRedelivery": false },
        "replyToken": reply_token,
        "message": { "id": format!("m-{reply_token}"), "type": "text", "text": text }
    })
}

pub fn follow_event_json(reply_token: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "follow",
        "mode": "active",
        "timestamp": 1_700_000_000_000_u64,
        "source": { "type": "user", "userId": "U4af4980629" },
        "replyToken": reply_token
    })
}

pub fn batch_body(events: Vec<serde_json::Value>) -> String {
    serde_json::json!({ "destination": "Uxxxxxxxxxx", "events": events }).to_string()
}
