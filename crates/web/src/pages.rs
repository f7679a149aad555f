//! Embedded HTML pages

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Escape text for use inside HTML element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn message_block(message: Option<&str>) -> String {
    match message {
        Some(m) => format!(r#"<p class="error">{}</p>"#, escape_html(m)),
        None => String::new(),
    }
}

/// Fill `{{NAME}}` slots in one pass over the template. Substituted text is
/// never scanned again, so user input cannot open another slot.
fn fill(template: &str, slots: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let value = tail.find("}}").and_then(|end| {
            let name = &tail[..end];
            slots
                .iter()
                .find(|(slot, _)| *slot == name)
                .map(|(_, value)| (*value, end))
        });
        match value {
            Some((value, end)) => {
                out.push_str(value);
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str("{{");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Login page, optionally with an inline error.
pub fn login_page(error: Option<&str>) -> String {
    fill(LOGIN_HTML, &[("MESSAGE", message_block(error).as_str())])
}

/// Story form, prefilled with earlier input.
pub fn form_page(story: &str, criteria: &str, message: Option<&str>) -> String {
    fill(
        FORM_HTML,
        &[
            ("MESSAGE", message_block(message).as_str()),
            ("STORY", escape_html(story).as_str()),
            ("CRITERIA", escape_html(criteria).as_str()),
        ],
    )
}

/// Serve a page with the given status.
pub fn html(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}

const LOGIN_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>User Story to Testcase Generator</title>
<style>
body { font-family: "Comic Sans MS", "Comic Sans", cursive, sans-serif; background: #dff7f7; margin: 0; }
.card { max-width: 640px; margin: 10vh auto; padding: 28px 30px; border-radius: 22px; text-align: center;
        border: 2px solid #a3d9ff; background: #ffffffcc; box-shadow: 0 12px 28px rgba(91,153,255,.25); }
.title { display: block; width: fit-content; margin: 0 auto 12px auto; padding: 12px 24px; border-radius: 18px;
         border: 2px solid #b98db0; background: #f8c9ea; color: #333; font-size: 36px; font-weight: 800; }
input[type=password] { max-width: 320px; border-radius: 16px; border: 2px solid #bfe1ff; background: #f9ffff;
        font-size: 24px; padding: 6px 16px; letter-spacing: 0.08em; }
button { border: none; border-radius: 999px; padding: .7rem 1.4rem; font-weight: 700; font-family: inherit;
         background: linear-gradient(135deg, #bfe1ff, #9fd2ff); color: #123; margin-top: 12px; cursor: pointer; }
.note { color: #355c7d; font-size: 16px; }
.error { color: #b00020; font-weight: 700; }
</style>
</head>
<body>
<div class="card">
  <div class="title">User Story to Testcase Generator</div>
  <p class="note">Private app. Please enter the password to continue.</p>
  <form method="post" action="/login">
    <input type="password" name="password" autofocus>
    <br>
    <button type="submit">Let me in</button>
  </form>
  {{MESSAGE}}
</div>
</body>
</html>
"#;

const FORM_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>User Story to Testcase Generator</title>
<style>
body { font-family: "Comic Sans MS", "Comic Sans", cursive, sans-serif; background: #ccf4f4; margin: 0; }
.card { max-width: 900px; margin: 6vh auto; padding: 28px 30px; border-radius: 22px;
        border: 2px solid #a3d9ff; background: #ffffffcc; box-shadow: 0 12px 28px rgba(91,153,255,.25); }
.title { margin: 0 auto 20px auto; width: fit-content; padding: 10px 24px; border-radius: 14px;
         border: 3px solid #000; background: #f7d8ef; font-weight: 800; font-size: 26px; text-align: center; }
label { display: block; font-weight: 800; font-size: 20px; margin: 12px 0 6px 0; }
textarea { width: 100%; box-sizing: border-box; background: #fff4c7; border: 3px solid #000;
           border-radius: 16px; font-size: 18px; padding: 12px 16px; font-family: inherit; }
button { margin-top: 20px; background: #e6f1a6; border: 3px solid #000; border-radius: 10px;
         font-weight: 800; font-size: 20px; padding: 12px 24px; font-family: inherit; cursor: pointer; }
.note { color: #355c7d; }
.error { color: #b00020; font-weight: 700; }
.logout { text-align: right; }
.logout button { font-size: 14px; padding: 6px 14px; margin: 0; background: #fff; }
</style>
</head>
<body>
<div class="card">
  <form class="logout" method="post" action="/logout"><button type="submit">Logout</button></form>
  <div class="title">User Story to Testcase Generator</div>
  {{MESSAGE}}
  <form method="post" action="/export">
    <label for="story">Enter your User Story here</label>
    <textarea id="story" name="story" rows="3" placeholder="As a &lt;role&gt;, I want ..., so that ...">{{STORY}}</textarea>
    <label for="criteria">Enter the Acceptance Criteria (1 criteria per line)</label>
    <textarea id="criteria" name="criteria" rows="12" placeholder="Criterion 1&#10;Criterion 2&#10;Criterion 3">{{CRITERIA}}</textarea>
    <button type="submit">Export to PDF!</button>
    <p class="note">Generating the test design can take up to 2 minutes. The download starts when it is ready.</p>
  </form>
</div>
</body>
</html>
"#;
