//! Haul: derive the ordered activities a driver performs on a transport.
//!
//! A transport (segments, deliveries, sites and status updates) goes in;
//! the ordered list of loadings, unloadings and bulking breaks comes out,
//! each with its lifecycle status and whether it can be done or undone now.
//!
//! - [`derive`]: the derivation engine.
//! - [`model`]: input and output types.
//! - [`cache`]: memoization across repeated derivations.

pub mod cache;
pub mod config;
pub mod derive;
pub mod logging;
pub mod model;
