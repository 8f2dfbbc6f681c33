//! Client side of the estimator.
//!
//! The form/display layer: a [`session::Session`] validates input and holds
//! the current result, a [`transport::EstimateTransport`] carries submissions
//! to the proxy, and [`render::Report`] turns a result into text.

pub mod render;
pub mod session;
pub mod transport;
