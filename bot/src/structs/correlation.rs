use serenity::model::id::{ChannelId, GuildId, MessageId};
use std::collections::{BTreeMap, HashMap};

/// A relayed copy of a source message in one destination server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayedCopy {
    /// destination channel at the time of sending
    pub channel_id: ChannelId,
    /// the embed message
    pub message_id: MessageId,
    /// the attachment links message, if one was sent
    pub follow_up: Option<MessageId>,
}

impl RelayedCopy {
    pub const fn new(channel_id: ChannelId, message_id: MessageId) -> RelayedCopy {
        RelayedCopy {
            channel_id,
            message_id,
            follow_up: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct CorrelationTable {
    relayed: HashMap<MessageId, BTreeMap<GuildId, RelayedCopy>>,
}

impl CorrelationTable {
    pub fn new() -> CorrelationTable {
        CorrelationTable::default()
    }

    pub fn record(&mut self, source: MessageId, server: GuildId, copy: RelayedCopy) {
        self.relayed.entry(source).or_default().insert(server, copy);
    }

    pub fn contains(&self, source: MessageId) -> bool {
        self.relayed.contains_key(&source)
    }

    pub fn copies(&self, source: MessageId) -> Option<Vec<(GuildId, RelayedCopy)>> {
        self.relayed
            .get(&source)
            .map(|copies| copies.iter().map(|(server, copy)| (*server, *copy)).collect())
    }

    pub fn clear_follow_up(&mut self, source: MessageId, server: GuildId) {
        if let Some(copy) = self
            .relayed
            .get_mut(&source)
            .and_then(|copies| copies.get_mut(&server))
        {
            copy.follow_up = None;
        }
    }

    pub fn remove(&mut self, source: MessageId) -> Option<BTreeMap<GuildId, RelayedCopy>> {
        self.relayed.remove(&source)
    }

    pub fn len(&self) -> usize {
        self.relayed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relayed.is_empty()
    }
}
