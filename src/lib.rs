//! webutils · helper functions for web applications
//!
//! - HTML/JS emission (`html`), string and array helpers (`text`, `arrays`)
//! - Request context: current URL, query merging, form fields (`request`)
//! - Dates (`dates`), MIME and email checks (`mime`, `validate`)
//! - Outbound HTTP and downloads (`http_client`), mail (`mail`)
//! - Diagnostics / logging setup (`telemetry`) and configuration (`config`)

pub mod arrays;
pub mod config;
pub mod dates;
pub mod error;
pub mod html;
pub mod http_client;
pub mod mail;
pub mod mime;
pub mod request;
pub mod telemetry;
pub mod text;
pub mod typename;
pub mod validate;

pub use error::{Result, UtilError};
pub use request::RequestContext;
