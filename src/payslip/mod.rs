//! Payslip documents and their delivery.
//!
//! A stored [`Payroll`](crate::models::Payroll) is rendered into a one-page
//! PDF by [`render_payslip`] and handed to a [`MailTransport`] by the
//! [`PayslipDispatcher`].

mod currency;
mod dispatcher;
pub mod pdf;
mod renderer;
mod transport;

pub use currency::{CURRENCY_SUFFIX, format_currency};
pub use dispatcher::{
    ATTACHMENT_FILE_NAME, Attachment, MailTransport, PDF_CONTENT_TYPE, PayslipDispatcher,
    TransportError, payslip_body, payslip_subject,
};
pub use renderer::render_payslip;
pub use transport::{OutboxEnvelope, OutboxMailTransport, RecordingMailTransport, SentMessage};
