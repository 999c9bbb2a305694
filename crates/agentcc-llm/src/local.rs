//! Local CLI agent backend.
//!
//! Runs an installed agent executable once per exchange. The transcript is
//! flattened into readable text and passed as the prompt argument together
//! with a flag that suppresses interactive confirmations.
//!
//! ## Protocol
//!
//! **argv**: `<leading args…> --dangerously-skip-permissions -p <transcript>`
//!
//! **stdout**: the reply, minus trailing whitespace.
//!
//! **stderr**: diagnostics, logged and attached to failures.
//!
//! **exit code**: non-zero is a failure.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use agentcc_types::Turn;

use crate::backend::ChatBackend;
use crate::error::{LlmError, Result};

/// Flag that stops the agent from asking for confirmation.
const SKIP_CONFIRMATION_FLAG: &str = "--dangerously-skip-permissions";

/// Flag that introduces the prompt text.
const PROMPT_FLAG: &str = "-p";

/// Read buffer size for draining output pipes.
const CHUNK_SIZE: usize = 8 * 1024;

/// Render a transcript as plain text, one block per turn.
///
/// Each turn becomes `"<Role>: <content>\n\n"`.
pub fn flatten_transcript(transcript: &[Turn]) -> String {
    transcript
        .iter()
        .map(|turn| format!("{}: {}\n\n", turn.role.label(), turn.content))
        .collect()
}

/// Configuration for the local agent backend.
#[derive(Debug, Clone)]
pub struct LocalAgentConfig {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments placed before the confirmation and prompt flags.
    pub leading_args: Vec<OsString>,
    /// Kill the agent if it runs longer than this.
    pub timeout: Option<Duration>,
}

impl LocalAgentConfig {
    /// Create a config that runs `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: None,
        }
    }

    /// Add an argument before the fixed flags.
    pub fn with_leading_arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Set the subprocess timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Backend that shells out to a locally installed agent.
#[derive(Debug, Clone)]
pub struct LocalAgentBackend {
    config: LocalAgentConfig,
}

/// Everything a finished agent process produced.
struct ProcessOutput {
    status: std::process::ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl LocalAgentBackend {
    /// Create a new backend.
    pub fn new(config: LocalAgentConfig) -> Self {
        Self { config }
    }

    fn command_name(&self) -> String {
        self.config.program.display().to_string()
    }

    /// Spawn the agent with `prompt` and collect its output.
    async fn run(&self, prompt: &str) -> Result<ProcessOutput> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.leading_args)
            .arg(SKIP_CONFIRMATION_FLAG)
            .arg(PROMPT_FLAG)
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LlmError::Spawn {
                command: self.command_name(),
                source,
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| LlmError::Internal("agent stdout was not captured".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| LlmError::Internal("agent stderr was not captured".to_string()))?;

        let collect = async {
            let (stdout, stderr) = tokio::try_join!(drain(stdout), drain(stderr))?;
            let status = child.wait().await?;
            Ok::<_, std::io::Error>(ProcessOutput {
                status,
                stdout,
                stderr,
            })
        };

        let output = match self.config.timeout {
            Some(limit) => tokio::time::timeout(limit, collect)
                .await
                .map_err(|_| LlmError::Timeout(limit))??,
            None => collect.await?,
        };
        Ok(output)
    }
}

/// Read a pipe to the end, chunk by chunk.
async fn drain<R: AsyncRead + Unpin>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(buffer);
        }
        buffer.extend_from_slice(&chunk[..n]);
    }
}

#[async_trait]
impl ChatBackend for LocalAgentBackend {
    async fn exchange(&self, transcript: &[Turn]) -> Result<String> {
        let prompt = flatten_transcript(transcript);
        tracing::debug!(
            program = %self.command_name(),
            turns = transcript.len(),
            prompt_bytes = prompt.len(),
            "Running local agent"
        );

        let output = self.run(&prompt).await?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !stderr.is_empty() {
            tracing::debug!(stderr = %stderr, "Local agent stderr");
        }

        if !output.status.success() {
            return Err(LlmError::ProcessFailed {
                code: output.status.code(),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim_end().to_string())
    }

    fn name(&self) -> &str {
        "local"
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
