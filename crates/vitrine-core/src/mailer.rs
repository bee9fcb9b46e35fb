//! The `Mailer` trait and the two notification messages sent after a
//! contact submission.
//!
//! Email is a best-effort side channel: delivery failures are logged by
//! the caller and never change the HTTP outcome of the request that
//! triggered them.

use async_trait::async_trait;
use thiserror::Error;

use crate::contact::Contact;

/// An error returned by a mail transport.
#[derive(Debug, Error)]
pub enum MailError {
  #[error("mail transport error: {0}")]
  Transport(String),

  #[error("mail rejected: {0}")]
  Rejected(String),
}

/// A single outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
  pub to:        String,
  pub subject:   String,
  pub html_body: String,
}

/// Abstraction over the outbound email transport.
///
/// Object-safe so handlers can hold an `Arc<dyn Mailer>` without
/// threading a second type parameter through the router.
#[async_trait]
pub trait Mailer: Send + Sync {
  async fn send(&self, mail: &OutboundEmail) -> Result<(), MailError>;
}

/// The acknowledgment sent to the submitter.
pub fn acknowledgment(contact: &Contact) -> OutboundEmail {
  let html_body = format!(
    "<h2>Thank you for contacting me, {}!</h2>\
     <p>I have received your message and will get back to you as soon as possible.</p>\
     <hr>\
     <h3>Your Message Details:</h3>\
     <p><strong>Subject:</strong> {}</p>\
     <p><strong>Message:</strong> {}</p>\
     <hr>\
     <p>Best regards,<br>Mohammad Ali Khan</p>",
    contact.full_name, contact.subject, contact.message,
  );

  OutboundEmail {
    to: contact.email.clone(),
    subject: "Thank you for reaching out!".to_owned(),
    html_body,
  }
}

/// The alert sent to the site owner.
pub fn owner_alert(contact: &Contact, owner: &str) -> OutboundEmail {
  let html_body = format!(
    "<h2>New Contact Form Submission</h2>\
     <p><strong>Name:</strong> {}</p>\
     <p><strong>Email:</strong> {}</p>\
     <p><strong>Phone:</strong> {}</p>\
     <p><strong>Subject:</strong> {}</p>\
     <p><strong>Message:</strong></p>\
     <p>{}</p>\
     <hr>\
     <p>Reply to: {}</p>",
    contact.full_name,
    contact.email,
    contact.phone,
    contact.subject,
    contact.message,
    contact.email,
  );

  OutboundEmail {
    to: owner.to_owned(),
    subject: format!("New Contact: {}", contact.subject),
    html_body,
  }
}
