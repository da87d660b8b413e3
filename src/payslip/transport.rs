//! Mail transports shipped with the engine.
//!
//! SMTP delivery lives outside this crate. [`OutboxMailTransport`] drops each
//! message into a directory for a relay to pick up; [`RecordingMailTransport`]
//! keeps messages in memory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::dispatcher::{Attachment, MailTransport, TransportError};

/// A message captured by [`RecordingMailTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// The attached file.
    pub attachment: Attachment,
}

/// Keeps every sent message in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingMailTransport {
    sent: Arc<RwLock<Vec<SentMessage>>>,
}

impl RecordingMailTransport {
    /// Creates a transport with an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// The messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<SentMessage> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Attachment,
    ) -> Result<(), TransportError> {
        self.sent.write().await.push(SentMessage {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment,
        });
        Ok(())
    }
}

/// The JSON envelope written next to each outbox attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxEnvelope {
    /// Message identifier; also the stem of both outbox files.
    pub id: Uuid,
    /// Sender address.
    pub from_email: String,
    /// Sender display name.
    pub from_name: String,
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// Name the recipient should see for the attachment.
    pub attachment_name: String,
    /// MIME type of the attachment.
    pub attachment_content_type: String,
    /// File name of the attachment inside the outbox directory.
    pub attachment_file: String,
    /// When the message was queued.
    pub queued_at: DateTime<Utc>,
}

/// Writes each message into an outbox directory as `{id}.json` plus `{id}.pdf`.
///
/// The attachment is written before the envelope, so a relay that waits for
/// the envelope never sees a partial message.
#[derive(Debug, Clone)]
pub struct OutboxMailTransport {
    dir: PathBuf,
    from_email: String,
    from_name: String,
}

impl OutboxMailTransport {
    /// Creates a transport writing into `dir` on behalf of the given sender.
    pub fn new(dir: impl Into<PathBuf>, from_email: impl Into<String>, from_name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            from_email: from_email.into(),
            from_name: from_name.into(),
        }
    }

    /// The outbox directory.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl MailTransport for OutboxMailTransport {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Attachment,
    ) -> Result<(), TransportError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| TransportError::new(format!("cannot create outbox {}: {}", self.dir.display(), e)))?;

        let id = Uuid::new_v4();
        let attachment_file = format!("{}.pdf", id);
        let envelope = OutboxEnvelope {
            id,
            from_email: self.from_email.clone(),
            from_name: self.from_name.clone(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            attachment_name: attachment.filename,
            attachment_content_type: attachment.content_type,
            attachment_file: attachment_file.clone(),
            queued_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&envelope)
            .map_err(|e| TransportError::new(format!("cannot encode envelope: {}", e)))?;

        tokio::fs::write(self.dir.join(&attachment_file), &attachment.content)
            .await
            .map_err(|e| TransportError::new(format!("cannot write attachment: {}", e)))?;
        tokio::fs::write(self.dir.join(format!("{}.json", id)), json)
            .await
            .map_err(|e| TransportError::new(format!("cannot write envelope: {}", e)))?;

        info!(message_id = %id, to = %to, outbox = %self.dir.display(), "Queued message in outbox");
        Ok(())
    }
}
