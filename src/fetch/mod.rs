//! Background execution of page fetches.
//!
//! The select control only describes what it wants fetched. [`spawn`] starts
//! a worker thread that runs those requests against a [`PageSource`] one at a
//! time, and [`FetchRuntime`] is the UI-side handle that issues them and
//! drains the answers.
//!
//! [`PageSource`]: fetch_select_api::PageSource

mod commands;
mod runtime;
mod worker;

pub use commands::{FetchCommand, FetchOutcome, FetchResult};
pub use runtime::FetchRuntime;
pub use worker::spawn;
