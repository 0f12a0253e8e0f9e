// inflector/src/lib.rs
//! # Inflector CLI Application
//!
//! This crate provides the command-line interface for `inflector-core`: it
//! loads an inflector description from YAML, collects source values from the
//! command line and prints the resolved target.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
