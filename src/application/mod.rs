//! Application layer - use-case handlers connecting HTTP adapters to the
//! domain through ports.

pub mod handlers;
