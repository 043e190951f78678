//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests drive `TuiApp<TestBackend>` against a
//! scripted search backend with a synthetic clock.

mod acceptance_search;
