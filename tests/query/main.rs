//! Filter/sort/paginate engine integration tests.

mod support;
mod properties;
mod examples;
