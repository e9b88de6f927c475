use super::Platform;
use crate::errors::{Error, Result, UNKNOWN_CHANNEL};
use crate::structs::Presentation;

use serenity::async_trait;
use serenity::model::id::{ChannelId, MessageId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Resolve(ChannelId),
    SendEmbed(ChannelId, Presentation),
    SendText(ChannelId, String),
    EditEmbed(ChannelId, MessageId, Presentation),
    EditText(ChannelId, MessageId, String),
    Delete(ChannelId, MessageId),
}

impl Call {
    pub const fn channel(&self) -> ChannelId {
        match self {
            Call::Resolve(c)
            | Call::SendEmbed(c, _)
            | Call::SendText(c, _)
            | Call::EditEmbed(c, _, _)
            | Call::EditText(c, _, _)
            | Call::Delete(c, _) => *c,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// channel deleted or bot kicked
    Unreachable,
    /// anything else, e.g. a dropped connection
    Transient,
}

impl Failure {
    fn to_error(self) -> Error {
        match self {
            Failure::Unreachable => Error::Discord {
                code: UNKNOWN_CHANNEL,
                message: String::from("Unknown Channel"),
            },
            Failure::Transient => Error::ConstStr("connection reset"),
        }
    }
}

pub struct MockPlatform {
    calls: Mutex<Vec<Call>>,
    failing: Mutex<HashMap<ChannelId, Failure>>,
    failing_text: Mutex<HashMap<ChannelId, Failure>>,
    next_id: AtomicU64,
}

impl Default for MockPlatform {
    fn default() -> Self {
        MockPlatform::new()
    }
}

impl MockPlatform {
    pub fn new() -> MockPlatform {
        MockPlatform {
            calls: Mutex::new(Vec::new()),
            failing: Mutex::new(HashMap::new()),
            failing_text: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(9000),
        }
    }

    /// Every call against `channel` fails from now on
    pub fn fail(&self, channel: ChannelId, failure: Failure) {
        self.failing.lock().unwrap().insert(channel, failure);
    }

    /// Only plain text sends to `channel` fail
    pub fn fail_text(&self, channel: ChannelId, failure: Failure) {
        self.failing_text.lock().unwrap().insert(channel, failure);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn sends(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::SendEmbed(..) | Call::SendText(..)))
            .collect()
    }

    pub fn edits(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::EditEmbed(..) | Call::EditText(..)))
            .collect()
    }

    pub fn deletes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Delete(..)))
            .collect()
    }

    fn record(&self, call: Call) -> Result<()> {
        let channel = call.channel();
        let text_failure = match call {
            Call::SendText(..) => self.failing_text.lock().unwrap().get(&channel).copied(),
            _ => None,
        };
        self.calls.lock().unwrap().push(call);

        match self.failing.lock().unwrap().get(&channel).copied().or(text_failure) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }

    fn new_id(&self) -> MessageId {
        MessageId(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl Platform for MockPlatform {
    async fn resolve_channel(&self, channel_id: ChannelId) -> Result<ChannelId> {
        self.record(Call::Resolve(channel_id))?;
        Ok(channel_id)
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        presentation: &Presentation,
    ) -> Result<MessageId> {
        self.record(Call::SendEmbed(channel_id, presentation.clone()))?;
        Ok(self.new_id())
    }

    async fn send_text(&self, channel_id: ChannelId, content: &str) -> Result<MessageId> {
        self.record(Call::SendText(channel_id, content.to_string()))?;
        Ok(self.new_id())
    }

    async fn edit_embed(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        presentation: &Presentation,
    ) -> Result<()> {
        self.record(Call::EditEmbed(channel_id, message_id, presentation.clone()))
    }

    async fn edit_text(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        content: &str,
    ) -> Result<()> {
        self.record(Call::EditText(channel_id, message_id, content.to_string()))
    }

    async fn delete_message(&self, channel_id: ChannelId, message_id: MessageId) -> Result<()> {
        self.record(Call::Delete(channel_id, message_id))
    }
}
