//! Turns a validated inquiry into the plain text and HTML email sent to the operator

use super::OutgoingEmail;
use crate::config::MailboxConfig;
use crate::models::ValidatedInquiry;
use chrono::Utc;

const SUBJECT_PREFIX: &str = "New Safari Inquiry";

pub fn compose(inquiry: &ValidatedInquiry, mailboxes: &MailboxConfig) -> OutgoingEmail {
    let subject = inquiry.subject_or_default();
    let received_at = Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let text_body = format!(
        "You have received a new inquiry from the website.\n\n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\
         Received: {}\n\n\
         Message:\n{}\n",
        inquiry.name, inquiry.email, subject, received_at, inquiry.message,
    );

    let html_body = format!(
        "<h2>New inquiry from the website</h2>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Received:</strong> {}</p>\n\
         <h3>Message</h3>\n\
         <p>{}</p>\n",
        escape_html(&inquiry.name),
        escape_html(&inquiry.email),
        escape_html(subject),
        received_at,
        html_line_breaks(&escape_html(&inquiry.message)),
    );

    OutgoingEmail {
        from: mailboxes.sender.clone(),
        to: mailboxes.recipient.clone(),
        reply_to: inquiry.email.clone(),
        subject: format!("{}: {}", SUBJECT_PREFIX, subject),
        text_body,
        html_body,
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn html_line_breaks(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\n', "<br>")
}
