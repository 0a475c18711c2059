//! CV Builder - conversational CV authoring service.
//!
//! A chat collects a candidate's details turn by turn, an extraction oracle
//! turns each answer into structured profile data, and the accumulated
//! profile is rendered into a printable CV.
//!
//! Layers follow a hexagonal layout: `domain` holds the pure rules,
//! `ports` the contracts, `adapters` the implementations and
//! `application` the use cases that tie them together.

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
