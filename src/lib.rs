//! Coinpress - Entitlement and Paywall Backend
//!
//! This crate owns the premium-access entitlement records of the Coinpress
//! publication and the reconciliation of payment-processor notifications
//! into those records. Content, identity, and payment processing live in
//! external services consumed through ports.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
