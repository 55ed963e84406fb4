//! Dashboard pipeline integration tests: fetch, debounce, state, render.

mod support;
mod rendering;
mod analytics;
mod http_source;
