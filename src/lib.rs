//! The `dawdle` crate is an asyncronous library for waiting around, remembering things, and asking
//! GitHub about them.
//!
//! Each module covers one small idea, and each idea gets its own tests:
//!
//! 1. Waiting with purpose - [`wait_random`]
//!     * [`wait_n`] and [`task_wait_n`] run many waits at once and report them as they finish.
//!     * [`measure_time`] shows that concurrent waits cost the longest wait, not the sum.
//! 2. Slow streams - [`Generator`]
//!     * [`async_generator`] yields ten random values, one per second.
//!     * [`async_comprehension`] collects them, and [`measure_runtime`] races four collections.
//! 3. Digging through nested maps - [`access_nested_map`]
//! 4. Computing once - [`Memo`] and [`AsyncMemo`]
//! 5. Asking GitHub - [`GithubOrgClient`]
//!     * The network sits behind the [`Fetch`] trait.  [`HttpFetch`] talks to the real API and
//!       [`CannedFetch`] stands in for it during tests.
//!
//! The binary runs every [`Exercise`] in turn using [`Settings`] read from `Dawdle.toml` and the
//! `DAWDLE_*` environment.  Logging goes through [`tracing`], set up by [`trace_init`].
//! Everything fallible returns [`Arrive`], which assigns [`Blame`] when things go wrong.
mod client;
mod delay;
mod error;
mod exercise;
mod fetch;
mod generator;
mod memo;
mod nested;
mod settings;
mod utils;

/// Since this is a small library, we lift all user-facing data types and functions to the parent
/// namespace for ease of access.
pub use client::{GithubOrgClient, GITHUB_API};
pub use delay::{measure_time, task_wait_n, task_wait_random, wait_n, wait_random};
pub use error::{Arrive, Blame};
pub use exercise::Exercise;
pub use fetch::{CannedFetch, Fetch, HttpFetch, USER_AGENT_VALUE};
pub use generator::{async_comprehension, async_generator, measure_runtime, Generator, ROUNDS};
pub use memo::{AsyncMemo, Memo};
pub use nested::access_nested_map;
pub use settings::Settings;
pub use utils::trace_init;
