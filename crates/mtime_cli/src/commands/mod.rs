//! CLI command handlers.

/// Resolving commit times and stamping the working tree.
pub mod set_mtime;

/// Convenience alias for command return types.
pub type Result<T = ()> = anyhow::Result<T>;
