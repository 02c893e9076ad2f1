// Library target exists solely for integration tests.
// The binary entry point is main.rs; this file re-declares the module tree so
// that tests can import types via `kotoba::session::*` / `kotoba::content::*`.
// Most code is only exercised through the binary, so suppress dead_code warnings.
#![allow(dead_code)]

// Public: used directly by integration tests
pub mod config;
pub mod content;
pub mod session;

// Private: required transitively by the above (won't compile without them)
mod app;
mod event;
mod ui;
