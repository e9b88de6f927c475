use super::Relay;
use crate::platform::Platform;
use crate::structs::SourceMessage;

use chrono::{DateTime, FixedOffset};
use db::ConfigStore;
use log::{info, trace};
use serenity::model::id::MessageId;

impl<S: ConfigStore> Relay<S> {
    pub async fn sync_edit<P: Platform>(
        &mut self,
        platform: &P,
        msg: &SourceMessage,
        now: &DateTime<FixedOffset>,
    ) -> usize {
        let copies = match self.correlations.copies(msg.id) {
            Some(copies) => copies,
            None => {
                trace!("edited message {} was not relayed", msg.id);
                return 0;
            }
        };

        let presentation = self.render(msg, now);
        let links = presentation.follow_up();
        let mut edited = 0;

        for (server_id, copy) in copies {
            let channel_id = copy.channel_id;
            if let Err(why) = platform
                .edit_embed(channel_id, copy.message_id, &presentation)
                .await
            {
                self.handle_failure(server_id, channel_id, "edit relayed message", &why);
                continue;
            }
            edited += 1;

            let follow_up = match copy.follow_up {
                Some(follow_up) => follow_up,
                None => continue,
            };
            match &links {
                Some(text) => {
                    if let Err(why) = platform.edit_text(channel_id, follow_up, text).await {
                        self.handle_failure(server_id, channel_id, "edit attachment links", &why);
                    }
                }
                None => match platform.delete_message(channel_id, follow_up).await {
                    Ok(()) => self.correlations.clear_follow_up(msg.id, server_id),
                    Err(why) => {
                        self.handle_failure(server_id, channel_id, "clear attachment links", &why)
                    }
                },
            }
        }

        info!("synced edit of message {} to {edited} channels", msg.id);
        edited
    }

    pub async fn sync_delete<P: Platform>(&mut self, platform: &P, source: MessageId) -> usize {
        let copies = match self.correlations.copies(source) {
            Some(copies) => copies,
            None => {
                trace!("deleted message {source} was not relayed");
                return 0;
            }
        };

        let mut deleted = 0;
        for (server_id, copy) in copies {
            let channel_id = copy.channel_id;
            match platform.delete_message(channel_id, copy.message_id).await {
                Ok(()) => deleted += 1,
                Err(why) => {
                    self.handle_failure(server_id, channel_id, "delete relayed message", &why)
                }
            }

            if let Some(follow_up) = copy.follow_up {
                if let Err(why) = platform.delete_message(channel_id, follow_up).await {
                    self.handle_failure(server_id, channel_id, "delete attachment links", &why);
                }
            }
        }

        self.correlations.remove(source);
        info!("synced delete of message {source} to {deleted} channels");
        deleted
    }
}
