use phf::phf_map;
use serenity::model::channel::{Attachment, Message};
use serenity::model::id::{ChannelId, GuildId, MessageId};

/// Top level media type to attachment kind, anything missing is `Other`
static MEDIA_KINDS: phf::Map<&'static str, AttachmentKind> = phf_map! {
    "image" => AttachmentKind::Image,
    "video" => AttachmentKind::Video,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    Image,
    Video,
    Other,
}

impl AttachmentKind {
    pub fn classify(content_type: Option<&str>) -> AttachmentKind {
        content_type
            .and_then(|t| t.split('/').next())
            .and_then(|top| MEDIA_KINDS.get(top.trim().to_ascii_lowercase().as_str()))
            .copied()
            .unwrap_or(AttachmentKind::Other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttachment {
    pub url: String,
    pub size: u64,
    pub kind: AttachmentKind,
}

impl SourceAttachment {
    pub fn from_attachment(attachment: &Attachment) -> SourceAttachment {
        SourceAttachment {
            url: attachment.url.clone(),
            size: attachment.size,
            kind: AttachmentKind::classify(attachment.content_type.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMessage {
    pub id: MessageId,
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub author_name: String,
    pub author_avatar: String,
    pub content: String,
    pub attachments: Vec<SourceAttachment>,
}

impl SourceMessage {
    /// `member_nick` is only used when `msg` has no member
    pub fn from_message(
        msg: &Message,
        guild_id: GuildId,
        member_nick: Option<String>,
    ) -> SourceMessage {
        let author_name = match &msg.member {
            Some(member) => member.nick.clone(),
            None => member_nick,
        }
        .unwrap_or_else(|| msg.author.name.clone());

        SourceMessage {
            id: msg.id,
            guild_id,
            channel_id: msg.channel_id,
            author_name,
            author_avatar: msg.author.face(),
            content: msg.content.clone(),
            attachments: msg
                .attachments
                .iter()
                .map(SourceAttachment::from_attachment)
                .collect(),
        }
    }

    pub fn has_kind(&self, kind: AttachmentKind) -> bool {
        self.attachments.iter().any(|a| a.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn message_json(member: Option<Value>) -> Message {
        let mut msg = json!({
            "id": "1",
            "channel_id": "101",
            "guild_id": "100",
            "type": 0,
            "content": "hello",
            "author": {
                "id": "7",
                "username": "raw_username",
                "discriminator": "0001",
                "avatar": null,
            },
            "timestamp": "2024-11-20T19:30:00+00:00",
            "edited_timestamp": null,
            "tts": false,
            "pinned": false,
            "mention_everyone": false,
            "mentions": [],
            "mention_roles": [],
            "attachments": [],
            "embeds": [],
        });
        if let Some(member) = member {
            msg["member"] = member;
        }
        serde_json::from_value(msg).unwrap()
    }

    fn member_json(nick: Option<&str>) -> Value {
        json!({
            "nick": nick,
            "roles": [],
            "joined_at": "2024-01-01T00:00:00+00:00",
            "deaf": false,
            "mute": false,
        })
    }

    #[test]
    fn test_author_nickname() {
        let msg = message_json(Some(member_json(Some("Fish Nick"))));
        let source = SourceMessage::from_message(&msg, GuildId(100), None);
        assert_eq!(source.author_name, "Fish Nick");
        assert_eq!(source.content, "hello");
        assert_eq!(source.guild_id, GuildId(100));
    }

    #[test]
    fn test_author_without_nickname() {
        let msg = message_json(Some(member_json(None)));
        // the member on the message wins over a looked up nickname
        let source = SourceMessage::from_message(&msg, GuildId(100), Some(String::from("stale")));
        assert_eq!(source.author_name, "raw_username");
    }

    #[test]
    fn test_fetched_message_keeps_nickname() {
        let created = message_json(Some(member_json(Some("Fish Nick"))));
        let fetched = message_json(None);

        let on_create = SourceMessage::from_message(&created, GuildId(100), None);
        let on_edit =
            SourceMessage::from_message(&fetched, GuildId(100), Some(String::from("Fish Nick")));
        assert_eq!(on_edit.author_name, on_create.author_name);

        // lookup failed too
        let unknown = SourceMessage::from_message(&fetched, GuildId(100), None);
        assert_eq!(unknown.author_name, "raw_username");
    }

    #[test]
    fn test_classify_media() {
        assert_eq!(
            AttachmentKind::classify(Some("image/png")),
            AttachmentKind::Image
        );
        assert_eq!(
            AttachmentKind::classify(Some("image/gif")),
            AttachmentKind::Image
        );
        assert_eq!(
            AttachmentKind::classify(Some("video/mp4")),
            AttachmentKind::Video
        );
        assert_eq!(
            AttachmentKind::classify(Some("Video/QuickTime")),
            AttachmentKind::Video
        );
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(
            AttachmentKind::classify(Some("application/pdf")),
            AttachmentKind::Other
        );
        assert_eq!(
            AttachmentKind::classify(Some("audio/ogg")),
            AttachmentKind::Other
        );
        assert_eq!(AttachmentKind::classify(Some("")), AttachmentKind::Other);
        assert_eq!(AttachmentKind::classify(None), AttachmentKind::Other);
    }
}
