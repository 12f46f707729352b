//! HTTP endpoint handlers. These are thin wrappers over the library helpers.
//! Each handler is instrumented and logs its parameters and basic result info.

use std::fmt;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use tracing::{info, instrument, warn};

use webutils::{
    dates::{add_days_to_ts, days_between_timestamps, days_in_week},
    html::{add_class, debug_var, escape_html, js_redirect},
    text::{generate_key, shorten_string, two_decimal_str, DEFAULT_KEY_LENGTH, DEFAULT_SHORTEN_LENGTH},
    RequestContext,
};

use crate::protocol::*;
use crate::state::AppState;

/// Render into a fresh page buffer.
fn render(build: impl FnOnce(&mut String) -> fmt::Result) -> Result<Html<String>, StatusCode> {
    let mut page = String::new();
    build(&mut page).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Html(page))
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse {
    Json(HealthOut { ok: true })
}

#[instrument(level = "info", skip(ctx), fields(host = %ctx.server_name))]
pub async fn http_get_url(ctx: RequestContext) -> impl IntoResponse {
    Json(UrlOut {
        current: ctx.current_url(false, false),
        with_port: ctx.current_url(true, false),
        without_params: ctx.current_url(false, true),
        domain: ctx.domain(),
    })
}

#[instrument(level = "info", skip(ctx), fields(fields = ctx.form.len()))]
pub async fn http_post_url_with(ctx: RequestContext) -> impl IntoResponse {
    let url = ctx.add_url_param(ctx.form.clone());
    info!(target: "webutils::request", %url, "Merged form fields into query");
    Json(MergedUrlOut { url })
}

#[instrument(level = "info", skip(state), fields(to = %q.to))]
pub async fn http_get_redirect(
    State(state): State<Arc<AppState>>,
    Query(q): Query<RedirectQuery>,
) -> Result<Html<String>, StatusCode> {
    // The target lands inside an attribute and a JS string literal.
    if q.to.contains(['"', '\'', '<', '>', '\\']) {
        warn!(target: "webutils::request", to = %q.to, "Rejected redirect target");
        return Err(StatusCode::BAD_REQUEST);
    }
    let msg = escape_html(q.msg.as_deref().unwrap_or("Redirecting..."));
    let timeout = q.timeout.unwrap_or(state.config.server.redirect_timeout_ms);
    render(|page| js_redirect(page, &msg, &q.to, timeout))
}

#[instrument(level = "info", skip(ctx, field), fields(%field))]
pub async fn http_post_form_field(Path(field): Path<String>, ctx: RequestContext) -> impl IntoResponse {
    let value = ctx.post_var(&field).map(str::to_string);
    info!(target: "webutils::request", %field, present = value.is_some(), "Form field read");
    Json(FieldOut { field, value })
}

#[instrument(level = "info")]
pub async fn http_get_key(Query(q): Query<KeyQuery>) -> impl IntoResponse {
    Json(KeyOut { key: generate_key(q.length.unwrap_or(DEFAULT_KEY_LENGTH)) })
}

#[instrument(level = "info")]
pub async fn http_get_days(Query(q): Query<DaysQuery>) -> impl IntoResponse {
    Json(DaysOut {
        days_between: days_between_timestamps(q.from, q.to),
        next_day: add_days_to_ts(1, q.from),
        previous_day: add_days_to_ts(-1, q.from),
    })
}

#[instrument(level = "info")]
pub async fn http_get_weekdays() -> impl IntoResponse {
    Json(WeekdaysOut { days: days_in_week().to_vec() })
}

#[instrument(level = "info", skip(q), fields(text_len = q.text.len()))]
pub async fn http_get_format(Query(q): Query<FormatQuery>) -> impl IntoResponse {
    Json(FormatOut {
        amount: two_decimal_str(&q.amount),
        short: shorten_string(&q.text, q.max.unwrap_or(DEFAULT_SHORTEN_LENGTH)),
    })
}

#[instrument(level = "info", skip(ctx))]
pub async fn http_get_debug(ctx: RequestContext) -> Result<Html<String>, StatusCode> {
    render(|page| {
        page.push_str(&format!("<div {}>", add_class("debug", r#"class="panel""#)));
        debug_var(page, &ctx)?;
        page.push_str("</div>");
        Ok(())
    })
}
