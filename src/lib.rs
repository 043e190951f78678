//! GitHub repository search (ghsearch)
//!
//! Terminal UI for searching GitHub repositories as you type, with results
//! that load page by page as the end of the list scrolls into view.
//!
//! Pure Core / Impure Shell: [`model`] and [`state`] are pure and time is
//! passed in; [`api`] and [`view`] own the network and the terminal.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
