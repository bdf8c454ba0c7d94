//! Client core for the OlaHire job marketplace.
//!
//! Applicants browse and apply to jobs and maintain a resume profile;
//! company administrators post jobs and review scored applicant matches.
//! This crate holds everything below the view layer: the dual-identity
//! session model, route authorization, the debounced list engine, the
//! per-row status edit buffer, the backend contract, and the navigation
//! coordinator. Rendering and transport live elsewhere.

pub mod access;
pub mod config;
pub mod error;
pub mod jobs;
pub mod listing;
pub mod nav;
pub mod profile;
pub mod remote;
pub mod review;
pub mod session;
pub mod telemetry;
