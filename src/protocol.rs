//! HTTP request/response DTOs for the demo endpoints (serde ready).

use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct UrlOut {
    pub current: String,
    pub with_port: String,
    pub without_params: String,
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MergedUrlOut {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub to: String,
    pub msg: Option<String>,
    pub timeout: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct FieldOut {
    pub field: String,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct KeyQuery {
    pub length: Option<usize>,
}
#[derive(Serialize)]
pub struct KeyOut {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct DaysQuery {
    pub from: i64,
    pub to: i64,
}
#[derive(Serialize)]
pub struct DaysOut {
    pub days_between: i64,
    pub next_day: Option<i64>,
    pub previous_day: Option<i64>,
}

#[derive(Serialize)]
pub struct WeekdaysOut {
    pub days: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub text: String,
    pub max: Option<usize>,
}
#[derive(Serialize)]
pub struct FormatOut {
    pub amount: String,
    pub short: String,
}
