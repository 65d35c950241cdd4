use std::{
    future::Future,
    io,
    pin::Pin,
    process::{ExitStatus, Stdio},
    time::{Duration, Instant},
};

use thiserror::Error;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    process::{Child, Command},
    task::JoinHandle,
    time,
};
use tokio_util::sync::CancellationToken;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub prompt: String,
    pub program: String,
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
}

impl AgentRequest {
    pub fn new(prompt: String, program: impl Into<String>) -> Self {
        Self {
            prompt,
            program: program.into(),
            timeout: None,
            cancel: None,
        }
    }

    pub fn from_config(prompt: String, config: &Config) -> Self {
        Self {
            timeout: config.agent_timeout,
            ..Self::new(prompt, config.agent_program.clone())
        }
    }

    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[derive(Debug, Clone)]
pub struct AgentResponse {
    /// Raw stdout bytes, forwarded to the user untouched.
    pub stdout: Vec<u8>,
    pub stderr: String,
    pub exit_code: i32,
    pub duration_ms: u128,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("'{0}' command not found. Please make sure Claude CLI is installed and in PATH.")]
    BinaryNotFound(String),

    #[error("failed spawning '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("I/O error while talking to the assistant: {0}")]
    Io(#[from] io::Error),

    #[error("running Claude failed (exit status {code}): {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("assistant did not finish within {0}s and was stopped")]
    Timeout(u64),

    #[error("assistant run was cancelled")]
    Cancelled,
}

pub type AgentFuture = Pin<Box<dyn Future<Output = Result<AgentResponse, AgentError>> + Send>>;

pub trait AgentRunner: Send + Sync {
    fn backend_name(&self) -> &'static str;

    fn execute(&self, request: AgentRequest) -> AgentFuture;
}

/// Runs the assistant as a child process: payload on stdin, answer on stdout.
pub struct ScriptRunner;

enum Exit {
    Finished(io::Result<ExitStatus>),
    TimedOut(Duration),
    Cancelled,
}

impl ScriptRunner {
    fn spawn_reader<R>(reader: Option<R>) -> Option<JoinHandle<io::Result<Vec<u8>>>>
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        reader.map(|mut reader| {
            tokio::spawn(async move {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer).await?;
                Ok(buffer)
            })
        })
    }

    async fn join_reader(handle: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
        match handle {
            Some(handle) => handle.await.unwrap_or_else(|_| Ok(Vec::new())),
            None => Ok(Vec::new()),
        }
    }

    async fn wait_for_exit(
        child: &mut Child,
        timeout: Option<Duration>,
        cancel: Option<&CancellationToken>,
    ) -> Exit {
        let deadline = async {
            match timeout {
                Some(limit) => {
                    time::sleep(limit).await;
                    limit
                }
                None => std::future::pending().await,
            }
        };
        let cancelled = async {
            match cancel {
                Some(token) => token.cancelled().await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            status = child.wait() => Exit::Finished(status),
            limit = deadline => Exit::TimedOut(limit),
            _ = cancelled => Exit::Cancelled,
        }
    }
}

impl AgentRunner for ScriptRunner {
    fn backend_name(&self) -> &'static str {
        "process"
    }

    fn execute(&self, request: AgentRequest) -> AgentFuture {
        Box::pin(async move {
            let AgentRequest {
                prompt,
                program,
                timeout,
                cancel,
            } = request;

            let mut command = Command::new(&program);
            command.stdin(Stdio::piped());
            command.stdout(Stdio::piped());
            command.stderr(Stdio::piped());
            command.kill_on_drop(true);

            let start = Instant::now();
            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(err) if err.kind() == io::ErrorKind::NotFound => {
                    return Err(AgentError::BinaryNotFound(program));
                }
                Err(source) => return Err(AgentError::Spawn { program, source }),
            };
            tracing::debug!(program = %program, pid = ?child.id(), "spawned assistant");

            let stdout_handle = Self::spawn_reader(child.stdout.take());
            let stderr_handle = Self::spawn_reader(child.stderr.take());
            let stdin_handle = child.stdin.take().map(|mut stdin| {
                tokio::spawn(async move {
                    stdin.write_all(prompt.as_bytes()).await?;
                    stdin.shutdown().await
                })
            });

            let status = match Self::wait_for_exit(&mut child, timeout, cancel.as_ref()).await {
                Exit::Finished(status) => status?,
                Exit::TimedOut(limit) => {
                    let _ = child.kill().await;
                    for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
                        handle.abort();
                    }
                    return Err(AgentError::Timeout(limit.as_secs()));
                }
                Exit::Cancelled => {
                    let _ = child.kill().await;
                    for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
                        handle.abort();
                    }
                    return Err(AgentError::Cancelled);
                }
            };

            if let Some(handle) = stdin_handle {
                match handle.await {
                    Ok(Ok(())) | Err(_) => {}
                    // The assistant may exit without draining its input.
                    Ok(Err(err)) if err.kind() == io::ErrorKind::BrokenPipe => {
                        tracing::debug!("assistant closed stdin before reading the full payload");
                    }
                    Ok(Err(err)) => return Err(AgentError::Io(err)),
                }
            }

            let stdout = Self::join_reader(stdout_handle).await?;
            let stderr = Self::join_reader(stderr_handle).await?;
            let stderr = String::from_utf8_lossy(&stderr).trim_end().to_string();
            let duration_ms = start.elapsed().as_millis();

            tracing::debug!(
                status = ?status.code(),
                duration_ms,
                stdout_bytes = stdout.len(),
                "assistant exited"
            );

            if !status.success() {
                return Err(AgentError::NonZeroExit {
                    code: status.code().unwrap_or(-1),
                    stderr,
                });
            }

            if !stderr.is_empty() {
                tracing::info!("assistant stderr: {stderr}");
            }

            Ok(AgentResponse {
                stdout,
                stderr,
                exit_code: status.code().unwrap_or(0),
                duration_ms,
            })
        })
    }
}
