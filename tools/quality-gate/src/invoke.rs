use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// One tool invocation, fully described: argv vector plus an optional
/// deadline. Never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl CommandCall {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: i32,
    /// Merged stdout and stderr, lossily decoded.
    pub output: String,
    /// The invocation outlived its deadline and was killed.
    pub timed_out: bool,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status == 0
    }

    pub fn silent(&self) -> bool {
        self.output.is_empty()
    }
}

pub trait CommandRunner {
    fn run(&self, call: CommandCall) -> CommandResult;
}

#[derive(Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, call: CommandCall) -> CommandResult {
        match call.timeout {
            Some(limit) => run_with_deadline(&call, limit),
            None => run_to_completion(&call),
        }
    }
}

fn run_to_completion(call: &CommandCall) -> CommandResult {
    let output = Command::new(&call.program)
        .args(&call.args)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) => CommandResult {
            status: output.status.code().unwrap_or(1),
            output: merge_streams(&output.stdout, &output.stderr),
            timed_out: false,
        },
        Err(error) => spawn_failure(&call.program, &error),
    }
}

fn run_with_deadline(call: &CommandCall, limit: Duration) -> CommandResult {
    let mut child = match Command::new(&call.program)
        .args(&call.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(error) => return spawn_failure(&call.program, &error),
    };

    // Drain both pipes off-thread so a chatty child cannot block on a
    // full pipe while we poll for exit.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let out_reader = thread::spawn(move || read_all(stdout));
    let err_reader = thread::spawn(move || read_all(stderr));

    let deadline = Instant::now() + limit;
    let (status, timed_out) = loop {
        match child.try_wait() {
            Ok(Some(status)) => break (status.code().unwrap_or(1), false),
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    break (1, true);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(_) => {
                let _ = child.kill();
                let _ = child.wait();
                break (1, false);
            }
        }
    };

    let stdout = out_reader.join().unwrap_or_default();
    let stderr = err_reader.join().unwrap_or_default();
    CommandResult {
        status,
        output: merge_streams(&stdout, &stderr),
        timed_out,
    }
}

/// A tool that vanished or cannot be spawned is reported as that check's
/// own failure output; the run carries on with the remaining checks.
fn spawn_failure(program: &str, error: &std::io::Error) -> CommandResult {
    CommandResult {
        status: 1,
        output: format!("failed to execute '{program}': {error}"),
        timed_out: false,
    }
}

fn merge_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let mut merged = String::new();
    merged.push_str(&String::from_utf8_lossy(stdout));
    merged.push_str(&String::from_utf8_lossy(stderr));
    merged
}

fn read_all(stream: Option<impl Read>) -> Vec<u8> {
    let mut buffer = Vec::new();
    if let Some(mut stream) = stream {
        let _ = stream.read_to_end(&mut buffer);
    }
    buffer
}
