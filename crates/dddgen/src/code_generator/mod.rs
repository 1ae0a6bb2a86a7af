//! Code generation for DDD command handlers
//!
//! One [`CommandDirective`](crate::directive::CommandDirective) plus a
//! [`GenerationConfig`](crate::config::GenerationConfig) maps to up to two
//! units:
//! - the generated unit (`<name>_gen.go`): sentinel errors, handler struct,
//!   guarded constructor, and the `Handle` protocol
//! - the stub unit (`<name>.go`): the command struct, its `handle` method, and
//!   interface accessors for the user to fill in
//!
//! Builders are pure functions over a [`GenerationContext`]; the
//! [`assembler`] orders their output and checks the result before handing it
//! out.

pub mod assembler;
pub mod context;
pub mod errors;
pub mod handle_method;
pub mod handler;
pub mod shape;
pub mod stubs;

pub use assembler::{gen_command, gen_doc, stub_command};
pub use context::GenerationContext;
pub use shape::{ProtocolShape, SentinelKind};
