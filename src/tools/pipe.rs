//! Composable chains of external processes.
//!
//! A `PipeChain` is a list of `(program, args)` stages. The input bytes are
//! fed to the first stage's stdin, each stage's stdout becomes the next
//! stage's stdin, and the last stage's stdout is captured in memory.

use crate::utils::error::ToolError;
use log::{debug, warn};
use std::io::{ErrorKind, Write};
use std::process::{Child, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;

/// One process in a chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub program: String,
    pub args: Vec<String>,
}

impl Stage {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Captured result of running a chain
#[derive(Debug)]
pub struct ChainOutput {
    /// Stdout of the final stage
    pub stdout: Vec<u8>,

    /// Exit status of every stage, in chain order
    pub statuses: Vec<(String, ExitStatus)>,
}

impl ChainOutput {
    /// True if every stage exited successfully
    pub fn success(&self) -> bool {
        self.statuses.iter().all(|(_, status)| status.success())
    }

    /// Final output decoded as (lossy) UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }
}

/// Ordered list of stages sharing one byte stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeChain {
    stages: Vec<Stage>,
}

impl PipeChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Run the chain to completion with `input` on the first stage's stdin
    ///
    /// Failing to launch any stage is an error; non-zero exits are reported
    /// through `ChainOutput::statuses`.
    pub fn run(&self, input: &[u8]) -> Result<ChainOutput, ToolError> {
        if self.stages.is_empty() {
            return Err(ToolError::EmptyChain);
        }

        let mut children: Vec<(String, Child)> = Vec::with_capacity(self.stages.len());
        let mut upstream: Option<ChildStdout> = None;

        for stage in &self.stages {
            let mut command = Command::new(&stage.program);
            command
                .args(&stage.args)
                .stdout(Stdio::piped())
                .stderr(Stdio::inherit());

            match upstream.take() {
                Some(stdout) => command.stdin(Stdio::from(stdout)),
                None => command.stdin(Stdio::piped()),
            };

            debug!("Spawning {} {:?}", stage.program, stage.args);

            let mut child = match command.spawn() {
                Ok(child) => child,
                Err(source) => {
                    reap(children);
                    return Err(ToolError::Spawn {
                        program: stage.program.clone(),
                        source,
                    });
                }
            };

            upstream = child.stdout.take();
            children.push((stage.program.clone(), child));
        }

        let first_program = children[0].0.clone();
        let stdin = children[0].1.stdin.take();
        let payload = input.to_vec();
        let writer = thread::spawn(move || match stdin {
            Some(mut stdin) => stdin.write_all(&payload),
            None => Ok(()),
        });

        let mut stdout = Vec::new();
        if let Some(mut final_out) = upstream.take() {
            if let Err(source) = std::io::copy(&mut final_out, &mut stdout) {
                let program = children[children.len() - 1].0.clone();
                drop(final_out);
                reap(children);
                let _ = writer.join();
                return Err(ToolError::Io { program, source });
            }
        }

        let mut statuses = Vec::with_capacity(children.len());
        let mut remaining = children.into_iter();
        while let Some((program, mut child)) = remaining.next() {
            let status = match child.wait() {
                Ok(status) => status,
                Err(source) => {
                    reap(remaining.collect());
                    let _ = writer.join();
                    return Err(ToolError::Io { program, source });
                }
            };
            if !status.success() {
                warn!("{} exited with {}", program, status);
            }
            statuses.push((program, status));
        }

        match writer.join() {
            Ok(Ok(())) => {}
            // A stage may exit without consuming all of its input
            Ok(Err(e)) if e.kind() == ErrorKind::BrokenPipe => {}
            Ok(Err(source)) => {
                return Err(ToolError::Io {
                    program: first_program,
                    source,
                })
            }
            Err(_) => {
                return Err(ToolError::Io {
                    program: first_program,
                    source: std::io::Error::new(ErrorKind::Other, "stdin writer panicked"),
                })
            }
        }

        Ok(ChainOutput { stdout, statuses })
    }
}

/// Kill and wait on stages that are still running after a failure
fn reap(children: Vec<(String, Child)>) {
    for (program, mut child) in children {
        if let Err(e) = child.kill() {
            debug!("Could not kill {}: {}", program, e);
        }
        let _ = child.wait();
    }
}
