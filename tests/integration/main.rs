//! Integration tests for reprobate
//!
//! These exercise the public API end to end: the documented rendering
//! scenarios, properties that must hold for every value and budget, and the
//! extension points (budget hooks, registered renderers, capabilities).

mod extension;
mod properties;
mod scenarios;
