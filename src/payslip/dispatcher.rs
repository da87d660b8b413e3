//! Payslip delivery over an outbound mail transport.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::MonthYear;

/// File name of the payslip attachment.
pub const ATTACHMENT_FILE_NAME: &str = "payslip.pdf";

/// Content type of the payslip attachment.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Error reported by a mail transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mail transport failure: {message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Creates a transport error with a description of the failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The transport's description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A file attached to an outgoing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Name the recipient sees.
    pub filename: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Raw file bytes.
    pub content: Vec<u8>,
}

/// An outbound mail transport.
///
/// Sender identity is the transport's concern.
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sends one plain-text message with a single attachment.
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Attachment,
    ) -> Result<(), TransportError>;
}

/// Subject line of a payslip message.
pub fn payslip_subject(employee_name: &str, month: MonthYear) -> String {
    format!("Payslip - {} {}", employee_name, month)
}

/// Plain-text body of a payslip message.
pub fn payslip_body(employee_name: &str, month: MonthYear) -> String {
    format!(
        "Dear {},\n\n\
         Please find your payslip for {} attached to this email.\n\n\
         If you have any questions, please contact the HR department.\n\n\
         Best regards,\n\
         HR Team\n",
        employee_name, month
    )
}

/// Hands rendered payslips to a mail transport.
///
/// Sends once per call; retrying is the caller's decision.
#[derive(Clone)]
pub struct PayslipDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl PayslipDispatcher {
    /// Creates a dispatcher over the given transport.
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    /// Sends `document` to `recipient` as the employee's payslip for `month`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::DeliveryFailed`] wrapping the transport error.
    pub async fn dispatch(
        &self,
        document: Vec<u8>,
        recipient: &str,
        employee_name: &str,
        month: MonthYear,
    ) -> EngineResult<()> {
        let subject = payslip_subject(employee_name, month);
        let body = payslip_body(employee_name, month);
        let attachment = Attachment {
            filename: ATTACHMENT_FILE_NAME.to_string(),
            content_type: PDF_CONTENT_TYPE.to_string(),
            content: document,
        };

        debug!(recipient = %recipient, subject = %subject, "Handing payslip to mail transport");

        self.transport
            .send(recipient, &subject, &body, attachment)
            .await
            .map_err(|source| {
                debug!(recipient = %recipient, error = %source, "Mail transport rejected payslip");
                EngineError::DeliveryFailed {
                    recipient: recipient.to_string(),
                    source,
                }
            })
    }
}
