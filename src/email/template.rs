//! HTML bodies for the quiz emails. Every user-supplied value goes through
//! [`escape_html`] before interpolation.

use super::OutgoingEmail;
use crate::error::Result;
use crate::models::lead::LeadSubmission;
use serde_json::json;

pub const BRAND_NAME: &str = "Tan Lounge";
pub const CUSTOMER_SUBJECT: &str = "Your Tan Lounge shade match";
pub const INTERNAL_SUBJECT: &str = "New Tan Lounge Quiz Lead";
const BOOKING_URL: &str = "https://tanlounge.com.au/book";
const FONT_STACK: &str = "system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif";

/// Escapes `& < > " '` for safe interpolation into HTML text and attributes.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// The personalised result sent to the person who took the quiz.
pub fn customer_email(lead: &LeadSubmission) -> OutgoingEmail {
    let result = &lead.result;

    let tips = if result.tips.is_empty() {
        String::new()
    } else {
        let joined: Vec<String> = result.tips.iter().map(|tip| escape_html(tip)).collect();
        format!("<p><em>Care tips:</em> {}</p>", joined.join(" "))
    };

    let site = if lead.site.is_empty() { "website" } else { lead.site.as_str() };

    let html = format!(
        r#"<div style="font-family:{font};line-height:1.6;color:#111">
  <h2 style="margin:0 0 8px">Your {brand} match</h2>
  <p>Hi {name}, here’s your personalised result.</p>
  <ul>
    <li><strong>Shade family:</strong> {family}</li>
    <li><strong>Depth:</strong> {depth}</li>
    <li><strong>Rinse guide:</strong> {rinse}</li>
  </ul>
  {tips}
  <p style="margin:14px 0">Ready to glow? <a href="{booking}" target="_blank" rel="noopener">Book your tan</a>.</p>
  <hr style="border:none;border-top:1px solid #eee;margin:16px 0" />
  <p style="font-size:12px;color:#555">Submitted from {site} • Phone: {phone} • Marketing consent: {consent}</p>
</div>"#,
        font = FONT_STACK,
        brand = BRAND_NAME,
        name = escape_html(&lead.name),
        family = escape_html(&result.family),
        depth = escape_html(&result.depth),
        rinse = escape_html(&result.rinse),
        tips = tips,
        booking = BOOKING_URL,
        site = escape_html(site),
        phone = escape_html(&lead.phone),
        consent = yes_no(lead.marketing_consent),
    );

    OutgoingEmail {
        to: lead.email.clone(),
        subject: CUSTOMER_SUBJECT.to_string(),
        html,
    }
}

/// Notification for staff, with the raw quiz data dumped as JSON.
pub fn internal_email(lead: &LeadSubmission, to: &str) -> Result<OutgoingEmail> {
    let dump = serde_json::to_string_pretty(&json!({
        "result": lead.result,
        "answers": lead.answers,
    }))?;

    let html = format!(
        r#"<div style="font-family:{font}">
  <h3>New Quiz Lead</h3>
  <p><strong>Name:</strong> {name}<br/><strong>Email:</strong> {email}<br/><strong>Phone:</strong> {phone}<br/><strong>Consent:</strong> {consent}<br/><strong>Source:</strong> {source}<br/><strong>Site:</strong> {site}</p>
  <pre style="white-space:pre-wrap">{dump}</pre>
</div>"#,
        font = FONT_STACK,
        name = escape_html(&lead.name),
        email = escape_html(&lead.email),
        phone = escape_html(&lead.phone),
        consent = yes_no(lead.marketing_consent),
        source = escape_html(&lead.source),
        site = escape_html(&lead.site),
        dump = escape_html(&dump),
    );

    Ok(OutgoingEmail {
        to: to.to_string(),
        subject: INTERNAL_SUBJECT.to_string(),
        html,
    })
}
