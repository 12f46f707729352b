//! HTML/JavaScript emission helpers.
//!
//! Writers take any `std::fmt::Write` sink (a `String` page buffer in practice)
//! and append markup to it. Inputs are emitted verbatim: callers own escaping
//! of URLs and script bodies, except for [`debug_var`] which escapes its dump.

use std::fmt::{self, Debug, Write};

/// Timeout used by [`js_redirect`] when the caller has no preference.
pub const DEFAULT_REDIRECT_TIMEOUT_MS: u64 = 2000;

/// Append a `<script src=...>` include.
pub fn load_js<W: Write>(out: &mut W, src: &str) -> fmt::Result {
  write!(out, r#"<script type="text/javascript" src="{src}"></script>"#)
}

/// Append an inline `<script>` block containing `code`.
pub fn write_script<W: Write>(out: &mut W, code: &str) -> fmt::Result {
  out.write_str(r#"<script type="text/javascript">"#)?;
  out.write_str(code)?;
  out.write_str("</script>")
}

/// Merge `new_class` into an attribute string.
///
/// With an existing `class="..."` the new class goes first inside it,
/// otherwise a fresh `class` attribute is prepended:
///   `add_class("foo", r#"class="bar""#)` -> `class="foo bar"`
///   `add_class("foo", "")` -> `class="foo" `
pub fn add_class(new_class: &str, attr: &str) -> String {
  const MARKER: &str = r#"class=""#;
  match attr.find(MARKER) {
    Some(pos) => {
      let (head, tail) = attr.split_at(pos + MARKER.len());
      format!("{head}{new_class} {tail}")
    }
    None => format!(r#"class="{new_class}" {attr}"#),
  }
}

/// Message, manual fallback link, and a delayed `window.location` change.
pub fn js_redirect<W: Write>(out: &mut W, msg: &str, url: &str, timeout_ms: u64) -> fmt::Result {
  write!(out, "{msg}<br />")?;
  write!(
    out,
    r#"If your browser did not redirect automatically, please <a href="{url}">click here</a>"#
  )?;
  write_script(
    out,
    &format!(r#"setTimeout(function(){{window.location = "{url}";}},{timeout_ms});"#),
  )
}

/// Pretty `Debug` dump of `value` inside a `<pre>` block.
pub fn debug_var<W: Write, T: Debug + ?Sized>(out: &mut W, value: &T) -> fmt::Result {
  out.write_str("<pre>")?;
  out.write_str(&escape_html(&format!("{value:#?}")))?;
  out.write_str("</pre>")
}

/// Escape the characters that would otherwise open tags or entities.
pub fn escape_html(raw: &str) -> String {
  let mut escaped = String::with_capacity(raw.len());
  for ch in raw.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}
