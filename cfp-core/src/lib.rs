//! Core types for the carbon footprint estimator.
//!
//! Estimation is delegated: a [`lifestyle::LifestyleInput`] becomes a
//! chat-completion prompt, an external model answers, and whatever comes back
//! must decode into a well-formed [`footprint::FootprintResult`].
//! [`reference`] holds the only local arithmetic and is never used in place
//! of the model.
//!
//! The `api` feature adds [`gateway`], the reqwest client for the upstream
//! chat-completion endpoint.

pub mod emission_factors;
pub mod error;
pub mod extract;
pub mod footprint;
pub mod lifestyle;
pub mod prompt;
pub mod reference;
pub mod wire;

#[cfg(feature = "api")]
pub mod gateway;

pub use error::{EstimateError, Result};
