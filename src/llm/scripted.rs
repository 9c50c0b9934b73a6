//! Scripted backend with canned replies.
//!
//! Replies are consumed in order; every request is recorded so tests can
//! inspect the prompt that was sent.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{CompletionRequest, LlmBackend, LlmError};

/// A reply the scripted backend will give.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Return this completion text.
    Text(String),
    /// Fail with [`LlmError::Other`].
    Fail(String),
    /// Wait this long, then return the text. Used to exercise timeouts.
    Delayed(Duration, String),
}

#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<ScriptedReply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply(self, reply: ScriptedReply) -> Self {
        self.push(reply);
        self
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_reply(ScriptedReply::Text(text.into()))
    }

    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.with_reply(ScriptedReply::Fail(message.into()))
    }

    /// Queue another reply on a backend that is already shared.
    pub fn push(&self, reply: ScriptedReply) {
        self.replies
            .lock()
            .expect("scripted replies lock poisoned")
            .push_back(reply);
    }

    /// Requests received so far.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("scripted calls lock poisoned").clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("scripted calls lock poisoned").len()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.calls
            .lock()
            .expect("scripted calls lock poisoned")
            .push(request);

        let reply = self
            .replies
            .lock()
            .expect("scripted replies lock poisoned")
            .pop_front();

        match reply {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::Fail(message)) => Err(LlmError::Other(message)),
            Some(ScriptedReply::Delayed(delay, text)) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
            None => Err(LlmError::Other("no scripted reply left".to_string())),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
