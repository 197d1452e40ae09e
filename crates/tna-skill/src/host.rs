// SPDX-FileCopyrightText: 2026 TNA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host process runner shared by the built-in tools.
//!
//! Every tool that shells out goes through [`HostRunner`], which captures
//! stdout and stderr through one shared pipe, applies the configured time
//! bound, and kills the child if the invoking future is dropped.

use std::io::Read;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tna_config::model::HostConfig;
use tracing::debug;

/// Why a host process did not complete successfully.
#[derive(Debug, Error)]
pub enum HostError {
    /// The program could not be started (not on `PATH`, not executable).
    #[error("failed to start `{program}`: {source}")]
    NotStarted {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The program ran past the configured bound and was killed.
    #[error("command timed out after {}s", .limit.as_secs())]
    TimedOut { limit: Duration },

    /// The program ran but reported failure.
    #[error("{}", describe_exit(.code))]
    NonZeroExit { code: Option<i32>, output: String },
}

impl HostError {
    /// Output captured before the failure, if any.
    pub fn output(&self) -> &str {
        match self {
            HostError::NonZeroExit { output, .. } => output,
            _ => "",
        }
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

/// Captured result of a finished host process.
#[derive(Debug, Clone)]
pub struct HostOutput {
    pub code: Option<i32>,
    combined: String,
}

impl HostOutput {
    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout and stderr interleaved in the order the child wrote them.
    pub fn combined(&self) -> &str {
        &self.combined
    }

    /// Converts a non-zero exit into [`HostError::NonZeroExit`].
    pub fn into_result(self) -> Result<HostOutput, HostError> {
        if self.success() {
            Ok(self)
        } else {
            Err(HostError::NonZeroExit {
                code: self.code,
                output: self.combined,
            })
        }
    }
}

/// Spawns host utilities with a shared time bound.
#[derive(Debug, Clone, Default)]
pub struct HostRunner {
    timeout: Option<Duration>,
}

impl HostRunner {
    /// `None` runs processes without a bound.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config(config: &HostConfig) -> Self {
        Self::new(config.command_timeout())
    }

    /// Runs `program` with `args` and captures its output.
    ///
    /// Only start-up failures and timeouts are errors here; a non-zero exit
    /// is returned as a [`HostOutput`] for the caller to judge.
    pub async fn output<S: AsRef<str>>(
        &self,
        program: &str,
        args: &[S],
    ) -> Result<HostOutput, HostError> {
        let argv: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        debug!(program, argc = argv.len(), "spawning host process");

        let not_started = |source| HostError::NotStarted {
            program: program.to_string(),
            source,
        };

        // Both streams share one pipe so their writes keep their order.
        let (mut reader, writer) = std::io::pipe().map_err(not_started)?;
        let stderr_writer = writer.try_clone().map_err(not_started)?;

        // The command holds the parent's copies of the write end; it must be
        // dropped before reading or EOF never arrives.
        let mut child = {
            let mut command = tokio::process::Command::new(program);
            command
                .args(&argv)
                .stdin(Stdio::null())
                .stdout(writer)
                .stderr(stderr_writer)
                .kill_on_drop(true);
            command.spawn().map_err(not_started)?
        };

        let collect = tokio::task::spawn_blocking(move || {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).map(|_| buf)
        });
        let finished = async move {
            let status = child.wait().await?;
            let bytes = collect.await.map_err(std::io::Error::other)??;
            Ok::<_, std::io::Error>((status, bytes))
        };

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, finished)
                .await
                .map_err(|_| HostError::TimedOut { limit })?,
            None => finished.await,
        };
        let (status, bytes) = waited.map_err(not_started)?;

        let result = HostOutput {
            code: status.code(),
            combined: String::from_utf8_lossy(&bytes).into_owned(),
        };
        debug!(program, code = ?result.code, "host process finished");
        Ok(result)
    }

    /// Runs `program` and fails on any non-zero exit.
    pub async fn run<S: AsRef<str>>(
        &self,
        program: &str,
        args: &[S],
    ) -> Result<HostOutput, HostError> {
        self.output(program, args).await?.into_result()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn interleaves_streams_in_write_order() {
        let runner = HostRunner::default();
        let out = runner
            .output("sh", &["-c", "echo err 1>&2; echo out; echo late 1>&2"])
            .await
            .unwrap();
        assert!(out.success());
        assert_eq!(out.combined(), "err\nout\nlate\n");
    }

    #[tokio::test]
    async fn non_zero_exit_reports_status_and_output() {
        let runner = HostRunner::default();
        let err = runner
            .run("sh", &["-c", "echo partial; echo why 1>&2; exit 3"])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "exit status 3");
        assert_eq!(err.output(), "partial\nwhy\n");
    }

    #[tokio::test]
    async fn missing_program_is_not_started() {
        let runner = HostRunner::default();
        let err = runner
            .run("tna-no-such-program-anywhere", &[] as &[&str])
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::NotStarted { .. }));
        assert!(err.to_string().contains("tna-no-such-program-anywhere"));
    }

    #[tokio::test]
    async fn slow_process_times_out() {
        let runner = HostRunner::new(Some(Duration::from_secs(1)));
        let err = runner.run("sleep", &["5"]).await.unwrap_err();
        assert!(matches!(err, HostError::TimedOut { .. }));
        assert_eq!(err.to_string(), "command timed out after 1s");
    }
}
