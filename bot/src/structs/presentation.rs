use crate::structs::source::{AttachmentKind, SourceMessage};

use serenity::builder::CreateEmbed;

pub const VIDEO_PLACEHOLDER: &str = "Video Attachment";
pub const EMPTY_PLACEHOLDER: &str = "No content";

/// Attachments larger than this are never embedded, only linked. 8 MiB
pub const MAX_INLINE_BYTES: u64 = 8 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub author_name: String,
    pub author_avatar: String,
    pub body: Option<String>,
    pub image: Option<String>,
    pub footer: String,
    pub links: Vec<String>,
}

impl Presentation {
    pub fn render(msg: &SourceMessage, footer: String) -> Presentation {
        let text = msg.content.trim();
        let body = if !text.is_empty() {
            Some(msg.content.clone())
        } else if msg.has_kind(AttachmentKind::Video) {
            Some(VIDEO_PLACEHOLDER.to_string())
        } else if msg.has_kind(AttachmentKind::Image) {
            None
        } else {
            Some(EMPTY_PLACEHOLDER.to_string())
        };

        let mut image = None;
        let mut links = Vec::new();
        for attachment in &msg.attachments {
            let inline = image.is_none()
                && attachment.kind == AttachmentKind::Image
                && attachment.size <= MAX_INLINE_BYTES;
            if inline {
                image = Some(attachment.url.clone());
            } else {
                links.push(attachment.url.clone());
            }
        }

        Presentation {
            author_name: msg.author_name.clone(),
            author_avatar: msg.author_avatar.clone(),
            body,
            image,
            footer,
            links,
        }
    }

    pub fn follow_up(&self) -> Option<String> {
        if self.links.is_empty() {
            None
        } else {
            Some(self.links.join("\n"))
        }
    }

    pub fn fill_embed<'a>(&self, embed: &'a mut CreateEmbed) -> &'a mut CreateEmbed {
        embed.author(|a| a.name(&self.author_name).icon_url(&self.author_avatar));
        if let Some(body) = &self.body {
            embed.description(body);
        }
        if let Some(image) = &self.image {
            embed.image(image);
        }
        embed.footer(|f| f.text(&self.footer))
    }
}
