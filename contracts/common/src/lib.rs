//! Shared building blocks for the staking contracts.
//!
//! This crate provides:
//! - [`access`]: an on-chain role registry (`has_role` / `grant_role` /
//!   `revoke_role` / `renounce_role`) with member tracking.
//! - [`ttl`]: the storage TTL convention every contract follows.

#![cfg_attr(not(feature = "std"), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod access;
pub mod ttl;

pub use access::*;
