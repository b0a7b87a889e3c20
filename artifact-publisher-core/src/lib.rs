#![doc = "artifact-publisher-core: core logic library for artifact-publisher."]

//! This crate holds the data model and the publish pipeline: artifact
//! discovery, object naming, status report rendering and the orchestration
//! over the [`contract::ObjectStore`] and [`contract::SourceHost`] traits.
//! Concrete network clients live in the `artifact-publisher` crate.

pub mod artifact;
pub mod config;
pub mod context;
pub mod contract;
pub mod discover;
pub mod error;
pub mod layout;
pub mod publish;
pub mod report;
