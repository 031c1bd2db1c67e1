//! Heart disease risk scoring: a closed-domain intake form, a
//! deterministic feature encoder, and a pre-trained classifier
//! loaded once at startup.

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
pub mod web;
