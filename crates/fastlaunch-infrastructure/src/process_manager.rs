//! Child process spawning backed by `tokio::process`.

use async_trait::async_trait;
use fastlaunch_core::error::{LaunchError, Result};
use fastlaunch_core::process::{CommandSpec, OutputLines, ProcessRunner};
use futures::StreamExt;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<OutputLines> {
        tracing::info!(
            "Spawning {} {:?} in {}",
            spec.program.display(),
            spec.args,
            spec.cwd.display()
        );

        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| {
                LaunchError::process(format!(
                    "Failed to spawn {}: {}",
                    spec.program.display(),
                    e
                ))
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LaunchError::process("child process has no stdout"))?;

        // The child rides along in the stream state so it outlives the reader.
        let lines = futures::stream::try_unfold(
            (BufReader::new(stdout), child),
            |(mut reader, mut child)| async move {
                let mut line = Vec::new();
                if reader.read_until(b'\n', &mut line).await? == 0 {
                    let status = child.wait().await?;
                    tracing::debug!("Child process exited with {}", status);
                    return Ok(None);
                }
                Ok::<_, std::io::Error>(Some((line, (reader, child))))
            },
        );

        Ok(lines.boxed())
    }

    fn is_elevated(&self) -> bool {
        #[cfg(windows)]
        {
            // `net session` is refused without administrator rights.
            std::process::Command::new("net")
                .arg("session")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map(|status| status.success())
                .unwrap_or(false)
        }

        #[cfg(not(windows))]
        {
            std::process::Command::new("id")
                .arg("-u")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim() == "0")
                .unwrap_or(false)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use futures::TryStreamExt;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_streams_raw_lines() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new(
            "/bin/sh",
            vec!["-c".into(), "printf 'one\\ntwo\\n'; pwd -P".into()],
            temp_dir.path(),
        );

        let lines: Vec<Vec<u8>> = TokioProcessRunner::new()
            .run(&spec)
            .await
            .expect("Should spawn sh")
            .try_collect()
            .await
            .expect("Should read output");

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], b"one\n");
        assert_eq!(lines[1], b"two\n");
        let cwd = String::from_utf8(lines[2].clone()).unwrap();
        let expected = temp_dir.path().canonicalize().unwrap();
        assert_eq!(std::path::Path::new(cwd.trim_end()).canonicalize().unwrap(), expected);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_process_error() {
        let temp_dir = TempDir::new().unwrap();
        let spec = CommandSpec::new("/definitely/not/here", vec![], temp_dir.path());

        let err = match TokioProcessRunner::new().run(&spec).await {
            Ok(_) => panic!("spawn should fail"),
            Err(e) => e,
        };
        assert!(matches!(err, LaunchError::Process(_)));
    }
}
