//! llm-porter: pipeline for porting one UI framework's source tree to
//! another through an external LLM conversion service.
//!
//! The crate scans a project tree, classifies every file by path
//! convention and lightweight content sniffing, groups definition files
//! with their templates and style sheets into logical units, and fans the
//! resulting inventory out to collaborator traits for conversion and
//! persistence. All framework semantics live behind the [`contract`]
//! traits; the core never interprets the source language itself.

pub mod associate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod contract;
pub mod convert;
pub mod error;
pub mod extract;
pub mod inventory;
pub mod load_config;
pub mod migrate;
pub mod scan;
pub mod write;
