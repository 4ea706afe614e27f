//! BlockCollection integration tests.
//!
//! - mutations: create/update/delete effects on local state
//! - loading: fetch/search state, error mapping and clearing
//! - local: against a real `BlockService` through `LocalBlockApi`
//! - over_http: against the axum router through `HttpBlockApi`

mod support;
mod local;

#[cfg(all(feature = "http", feature = "client"))]
mod over_http;
