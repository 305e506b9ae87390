//! Identity store implementations.
//!
//! Production talks to the account service over HTTP; tests use in-memory
//! fakes defined next to the code under test.

mod http;

pub use http::HttpIdentityStore;
