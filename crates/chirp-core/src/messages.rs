use chirp_types::{Message, NewMessage};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::store::MessageStore;

/// Longest text a message may carry.
pub const MAX_MESSAGE_LEN: usize = 255;

/// Result of a delete. Deleting a missing id is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// One row was removed.
    Deleted,
    /// No message had that id; nothing changed.
    NoOp,
}

/// Message lifecycle: create, read, patch and delete.
pub struct MessageBoard<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: MessageStore + ?Sized> MessageBoard<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Create a message after checking, in order: non-blank text, text
    /// strictly shorter than [`MAX_MESSAGE_LEN`], and an existing author.
    ///
    /// Create rejects exactly 255 characters while patch accepts it.
    /// Lengths count Unicode scalar values, not UTF-16 units.
    pub fn create(&self, candidate: NewMessage) -> Result<Message> {
        if is_blank(&candidate.message_text) {
            warn!("Message rejected: blank text");
            return Err(CoreError::InvalidInput("message text is blank"));
        }
        if candidate.message_text.chars().count() >= MAX_MESSAGE_LEN {
            warn!("Message rejected: text too long");
            return Err(CoreError::InvalidInput("message text too long"));
        }
        if !self.store.account_exists(candidate.posted_by)? {
            warn!("Message rejected: unknown author {}", candidate.posted_by);
            return Err(CoreError::InvalidInput("postedBy does not exist"));
        }

        let message = self.store.insert_message(candidate)?;
        debug!("Created message {} by {}", message.message_id, message.posted_by);
        Ok(message)
    }

    pub fn list_all(&self) -> Result<Vec<Message>> {
        Ok(self.store.all_messages()?)
    }

    pub fn get_by_id(&self, message_id: i64) -> Result<Option<Message>> {
        Ok(self.store.find_message(message_id)?)
    }

    /// Idempotent delete: a missing id reports [`DeleteOutcome::NoOp`].
    pub fn delete_by_id(&self, message_id: i64) -> Result<DeleteOutcome> {
        let Some(message) = self.store.find_message(message_id)? else {
            return Ok(DeleteOutcome::NoOp);
        };

        let before = self.store.count_messages()?;
        self.store.delete_message(&message)?;
        let after = self.store.count_messages()?;
        debug!("Deleted message {} (rows {} -> {})", message_id, before, after);

        Ok(DeleteOutcome::Deleted)
    }

    /// Replace the text of an existing message. Unlike create, text of
    /// exactly [`MAX_MESSAGE_LEN`] characters is accepted here.
    pub fn patch_by_id(&self, message_id: i64, new_text: &str) -> Result<Message> {
        let mut message = self
            .store
            .find_message(message_id)?
            .ok_or(CoreError::NotFound)?;

        if is_blank(new_text) {
            warn!("Patch of message {} rejected: blank text", message_id);
            return Err(CoreError::InvalidInput("message text is blank"));
        }
        if new_text.chars().count() > MAX_MESSAGE_LEN {
            warn!("Patch of message {} rejected: text too long", message_id);
            return Err(CoreError::InvalidInput("message text too long"));
        }

        message.message_text = new_text.to_string();
        self.store.update_message(&message)?;
        debug!("Patched message {}", message_id);
        Ok(message)
    }

    /// Messages posted by `account_id`. The account itself is not looked
    /// up; an unknown id just yields nothing.
    pub fn list_by_author(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self.store.messages_by_author(account_id)?)
    }
}

fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
