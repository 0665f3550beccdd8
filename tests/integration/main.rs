//! HTTP-level integration tests over the in-memory store.

mod helpers;

mod auth_test;
mod event_test;
mod user_test;
