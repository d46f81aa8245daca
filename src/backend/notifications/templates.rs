/**
 * Email Templates
 *
 * Renders a `NotificationJob` into a plain-text and HTML message. User
 * supplied text is escaped before it is placed into the HTML body.
 */

use crate::backend::notifications::jobs::{NotificationJob, NotificationKind};
use crate::backend::notifications::mailer::OutboundEmail;

/// Escape the characters that are significant in HTML text and attributes
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn subject_and_lines(kind: NotificationKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        NotificationKind::Registered => (
            "Welcome to SwApp!",
            "Your account has been created successfully.",
            "You can now sign in with your email and password.",
        ),
        NotificationKind::ProfileUpdated => (
            "Your SwApp profile was updated",
            "The information on your profile has just been changed.",
            "If you did not make this change, please contact our support team.",
        ),
        NotificationKind::AccountDeleted => (
            "Your SwApp account was deleted",
            "Your account and its personal data have been removed.",
            "We are sorry to see you go. You are welcome back at any time.",
        ),
        NotificationKind::PasswordChanged => (
            "Your SwApp password was changed",
            "The password for your account has just been changed.",
            "If you did not make this change, reset your password immediately.",
        ),
    }
}

/// Render a job into a ready-to-send message
pub fn render(job: &NotificationJob) -> OutboundEmail {
    let (subject, headline, detail) = subject_and_lines(job.kind);

    let text_body = format!(
        "Hello {},\n\n{}\n{}\n\nThe SwApp team\n",
        job.first_name, headline, detail
    );
    let html_body = format!(
        "<html><body>\
         <p>Hello {},</p>\
         <p>{}</p>\
         <p>{}</p>\
         <p>The SwApp team</p>\
         </body></html>",
        escape_html(&job.first_name),
        headline,
        detail
    );

    OutboundEmail {
        to: job.email.clone(),
        subject: subject.to_string(),
        text_body,
        html_body,
    }
}
