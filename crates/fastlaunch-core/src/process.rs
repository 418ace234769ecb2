//! Child process invocation.

use crate::error::Result;
use futures::stream::BoxStream;
use std::path::PathBuf;

/// What to spawn and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            cwd: cwd.into(),
        }
    }
}

/// Raw standard output lines of a running child, line terminator included.
///
/// The stream ends when the child closes its standard output.
pub type OutputLines = BoxStream<'static, std::io::Result<Vec<u8>>>;

/// Spawns child processes and reports the current privilege level.
#[async_trait::async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawns `spec` and returns its standard output as a line stream.
    ///
    /// The child is neither timed out nor killed; it stays alive at least
    /// until the stream is dropped.
    async fn run(&self, spec: &CommandSpec) -> Result<OutputLines>;

    /// Whether the current process runs with administrator privileges.
    fn is_elevated(&self) -> bool;
}
