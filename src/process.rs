use std::{
    ffi::OsString,
    io::Read,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
    time::Duration,
};

use itertools::Itertools;

use crate::{
    Res,
    context::Context,
    error::{Error, QueryError},
};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

lazy_static::lazy_static! {
    static ref GIT_ENV: Vec<(OsString, OsString)> = git_env();
}

fn git_env() -> Vec<(OsString, OsString)> {
    let mut env = vec![
        // Override any user-specific localization
        ("LC_ALL".into(), "C".into()),
        // Don't take locks that other git processes could be waiting on
        ("GIT_OPTIONAL_LOCKS".into(), "0".into()),
    ];

    for key in ["HOME", "PATH"] {
        if let Some(value) = std::env::var_os(key) {
            env.push((key.into(), value));
        }
    }

    log::debug!("Assembled git environment: {:?}", env);
    env
}

/// Executes the external queries a snapshot is built from.
pub trait Runner {
    /// Directory the queries run in.
    fn dir(&self) -> &Path;

    /// Runs the program with `args` and returns its standard output.
    ///
    /// Returns [`Error::Cancelled`] if `ctx` is done before the command starts
    /// or while it is running.
    fn run(&self, ctx: &Context, args: &[&str]) -> Res<Vec<u8>>;
}

/// Runs the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    dir: PathBuf,
}

impl GitCli {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_program("git", dir)
    }

    pub fn with_program(program: impl Into<OsString>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            dir: dir.into(),
        }
    }
}

impl Runner for GitCli {
    fn dir(&self) -> &Path {
        &self.dir
    }

    fn run(&self, ctx: &Context, args: &[&str]) -> Res<Vec<u8>> {
        ctx.check()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .current_dir(&self.dir)
            .env_clear()
            .envs(GIT_ENV.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let display = command_args(&cmd);
        log::debug!("Running '{}' in {:?}", display, self.dir);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::query(&display, QueryError::Spawn(e)))?;

        let mut stdout = child.stdout.take();
        let mut stderr = child.stderr.take();

        // Drain both pipes so a chatty child can't block on a full buffer
        let stdout_thread = thread::spawn(move || read_all(stdout.as_mut()));
        let stderr_thread = thread::spawn(move || read_all(stderr.as_mut()));

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Ok(status),
                Ok(None) if ctx.is_done() => {
                    log::debug!("Killing '{}'", display);
                    break Err(Error::Cancelled);
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => break Err(Error::query(&display, QueryError::ReadOutput(e))),
            }
        };

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                // Reap the child and its readers before giving up
                let _ = child.kill();
                let _ = child.wait();
                let _ = stdout_thread.join();
                let _ = stderr_thread.join();
                return Err(e);
            }
        };

        let stdout = join_output(stdout_thread).map_err(|e| Error::query(&display, e))?;
        let stderr = join_output(stderr_thread).map_err(|e| Error::query(&display, e))?;

        if !status.success() {
            return Err(Error::query(
                &display,
                QueryError::BadExit(
                    status.code(),
                    String::from_utf8_lossy(&stderr).trim().to_string(),
                ),
            ));
        }

        log::debug!("'{}' returned {} bytes", display, stdout.len());
        Ok(stdout)
    }
}

fn read_all<R: Read>(handle: Option<&mut R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(handle) = handle {
        handle.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

fn join_output(
    handle: thread::JoinHandle<std::io::Result<Vec<u8>>>,
) -> Result<Vec<u8>, QueryError> {
    handle
        .join()
        .map_err(|_| {
            QueryError::ReadOutput(std::io::Error::other("output reader thread panicked"))
        })?
        .map_err(QueryError::ReadOutput)
}

pub(crate) fn command_args(cmd: &Command) -> String {
    std::iter::once(cmd.get_program().to_string_lossy())
        .chain(cmd.get_args().map(|arg| arg.to_string_lossy()))
        .join(" ")
}
