//! Voyage Admin
//!
//! Admin console for the travel agency site.
//!
//! This library provides:
//! - Credential submission against the booking backend (`auth`)
//! - Session persistence in browser storage (`session`)
//! - The route guard deciding which views are reachable (`navigation`)
//! - The dashboard shell model: menu, highlighting, drawer, theme (`dashboard`)
//! - Web UI (Dioxus + Pico CSS) wiring all of the above (`app`)

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
#![deny(unsafe_code)]
#![deny(unused_must_use)]

// Dioxus UI app (shared between server SSR and WASM client)
pub mod app;

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod http;
pub mod navigation;
pub mod session;
