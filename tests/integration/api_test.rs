//! End-to-end tests against the composed storefront router

mod admin;
mod auth;
mod common;
mod invariants;
