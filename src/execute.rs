//! The `Execute` command trait
//!
//! Commands are structs whose fields are the parameters; executing one
//! against a context does all the work and returns a JSON value.

use async_trait::async_trait;
use serde_json::Value;

/// A command executable against a context
#[async_trait]
pub trait Execute<C, E> {
    /// Run the command
    async fn execute(&self, ctx: &C) -> Result<Value, E>;
}
