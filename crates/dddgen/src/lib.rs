//! Code generator for DDD application-layer command handlers
//!
//! Reads command directives and a reference configuration, and emits Go
//! source: a regenerated handler unit per command plus an editable stub unit
//! written once.

pub mod ast_builder;
pub mod code_generator;
pub mod config;
pub mod directive;
pub mod go_ast;
pub mod naming;
pub mod orchestrator;
pub mod types;
pub mod unparser;
pub mod visitors;

#[cfg(test)]
mod test_utils;
