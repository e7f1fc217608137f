//! HTML rendering of the prediction form.

use std::fmt::Write;

use crate::form::{ControlKind, FormSubmission, CONTROLS};

/// Contents of the output region.
#[derive(Clone, Debug, PartialEq)]
pub enum Output {
    /// Nothing submitted yet.
    Idle,
    /// Sentence for the most recent submission.
    Evaluated(&'static str),
    /// The most recent submission could not be scored.
    Failed(String),
}

impl Output {
    /// Text shown in the output region.
    pub fn text(&self) -> String {
        match self {
            Output::Idle => String::new(),
            Output::Evaluated(sentence) => (*sentence).to_string(),
            Output::Failed(reason) => format!("Prediction failed: {reason}"),
        }
    }
}

const STYLE: &str = r#"
    body { font-family: "Telex", -apple-system, "Segoe UI", Roboto, sans-serif; color: #495057; margin: 0; }
    .container { max-width: 960px; margin: 0 auto; padding: 24px 15px; }
    label { display: block; margin: 12px 0 4px; font-weight: 500; }
    select, input { width: 100%; padding: 6px 12px; font-size: 15px; border: 1px solid #ced4da; border-radius: 4px; box-sizing: border-box; }
    .btn { margin-top: 16px; padding: 8px 16px; font-size: 15px; border: none; border-radius: 4px; cursor: pointer; }
    .btn-primary { background: #2fa4e7; color: #fff; }
    .btn-primary:hover { background: #178acc; }
    #prediction-output { margin-top: 24px; min-height: 1.5em; font-size: 18px; }
    #prediction-output.error { color: #c71c22; }
"#;

/// Render the full page with the current control values and output region.
pub fn render_page(form: &FormSubmission, output: &Output) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    html.push_str("  <title>Cirrhosis Prediction</title>\n");
    let _ = writeln!(html, "  <style>{STYLE}  </style>");
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str("<form method=\"post\" action=\"/\">\n");

    for control in &CONTROLS {
        let current = form.value(control.name);
        let _ = writeln!(
            html,
            "  <label for=\"{}\">{}</label>",
            control.id,
            escape_html(control.label)
        );
        match control.kind {
            ControlKind::Dropdown { options, .. } => {
                let _ = writeln!(
                    html,
                    "  <select id=\"{}\" name=\"{}\">",
                    control.id, control.name
                );
                for option in options {
                    let selected = if current == Some(*option) {
                        " selected"
                    } else {
                        ""
                    };
                    let escaped = escape_html(option);
                    let _ = writeln!(
                        html,
                        "    <option value=\"{escaped}\"{selected}>{escaped}</option>"
                    );
                }
                html.push_str("  </select>\n");
            }
            ControlKind::Number {
                min,
                max,
                placeholder,
            } => {
                let _ = write!(
                    html,
                    "  <input id=\"{}\" name=\"{}\" type=\"number\" step=\"any\"",
                    control.id, control.name
                );
                if let Some(min) = min {
                    let _ = write!(html, " min=\"{min}\"");
                }
                if let Some(max) = max {
                    let _ = write!(html, " max=\"{max}\"");
                }
                let _ = write!(html, " placeholder=\"{}\"", escape_html(placeholder));
                if let Some(value) = current {
                    let _ = write!(html, " value=\"{}\"", escape_html(value));
                }
                html.push_str(">\n");
            }
        }
    }

    html.push_str(
        "  <button type=\"submit\" id=\"submit-button\" class=\"btn btn-primary\">Submit</button>\n",
    );
    html.push_str("</form>\n");

    let class = match output {
        Output::Failed(_) => " class=\"error\"",
        _ => "",
    };
    let _ = writeln!(
        html,
        "<div id=\"prediction-output\"{class}>{}</div>",
        escape_html(&output.text())
    );
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Text inside the output region of a rendered page.
#[cfg(test)]
pub(crate) fn output_text(html: &str) -> &str {
    let start = html.find("<div id=\"prediction-output\"").expect("output region");
    let rest = &html[start..];
    let open = rest.find('>').expect("output region tag") + 1;
    let close = rest.find("</div>").expect("output region end");
    &rest[open..close]
}
