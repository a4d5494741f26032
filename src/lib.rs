//! listprov - Apple Provisioning Profile Inspection Library
//!
//! This library exposes the core pipeline for inspecting provisioning
//! profiles: decoding the signed container, the typed profile model and
//! entitlements view, filter predicate compilation, and directory scanning.

pub mod cli;
pub mod decode;
pub mod entitlements;
pub mod filter;
pub mod models;
pub mod output;
pub mod profile;
pub mod scan;
