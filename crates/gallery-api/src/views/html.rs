//! Minimal HTML helpers shared by the views.

use std::fmt::Write;

/// Escape text for use in element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full document around a rendered body
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 512);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n<link rel=\"stylesheet\" href=\"{}\">\n</head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        crate::constants::STYLESHEET_PATH,
        body
    );
    html
}

/// Informational banner shown while the local provider is active
pub fn dev_notice(text: &str) -> String {
    format!("<div class=\"dev-notice\">{}</div>", escape(text))
}

pub fn error_message(text: &str) -> String {
    format!(
        "<div class=\"error-message\" role=\"alert\"><p>{}</p></div>",
        escape(text)
    )
}
