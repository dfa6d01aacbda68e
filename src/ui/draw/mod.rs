//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header with dispatch status, footer with key help
//! - `panels`: Request composer (URL, method, params, headers, body, send)
//! - `tabs`: Response inspector (JSON and Table tabs)
//! - `styling`: Color schemes and style constants

mod components;
mod panels;
mod styling;
mod tabs;

pub use components::{render_footer, render_header};
pub use panels::render_request_panel;
pub use tabs::render_response_panel;
