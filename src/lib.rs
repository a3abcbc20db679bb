//! MindBuddy
//!
//! A mental wellbeing chat companion: a small chat widget that posts each
//! message to a reply service and renders the JSON answer, plus the service
//! itself.
//!
//! # Architecture
//!
//! - **Widget**: transcript, typing placeholder and one HTTP request per turn
//! - **Server**: Axum-based HTTP service answering `POST /chat`
//! - **Responder**: crisis detection, keyword knowledge base, LLM fallback
//! - **UI**: server-rendered page hosting the browser widget
//!
//! # Modules
//!
//! - [`widget`]: chat widget, view contract, transport and event loop
//! - [`responder`]: reply selection for the service
//! - [`llm`]: OpenAI-compatible completion client
//! - [`terminal`]: stdin/stdout host for the widget
//! - [`ui`]: HTML page and message markup

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod config;
pub mod llm;
pub mod responder;
pub mod server;
pub mod terminal;
pub mod ui;
pub mod widget;

use crate::config::AppConfig;

use responder::Responder;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Reply selection for incoming messages.
    pub responder: Arc<Responder>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}
