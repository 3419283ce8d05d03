//! Test harness utilities for the launcher suites.
//!
//! Supplies a substitutable process environment, captured-output pipeline
//! runners, and filesystem scaffolding so the unit suites stay focused on
//! their assertions.

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::env::Environment;
use crate::launcher::{LaunchError, LaunchRequest};
use crate::paths::SERVER_ENTRY_CANDIDATES;
use crate::{IoStreams, run_with_environment, run_with_handler};

/// In-memory stand-in for the process environment.
#[derive(Debug, Clone)]
pub(crate) struct FakeEnvironment {
    vars: HashMap<String, String>,
    euid: u32,
}

impl FakeEnvironment {
    /// Builds an unprivileged environment with no variables set.
    pub(crate) fn new() -> Self {
        Self {
            vars: HashMap::new(),
            euid: 1000,
        }
    }

    pub(crate) fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }

    pub(crate) fn with_euid(mut self, euid: u32) -> Self {
        self.euid = euid;
        self
    }
}

impl Environment for FakeEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn effective_uid(&self) -> u32 {
        self.euid
    }
}

/// Captured result of one pipeline run.
#[derive(Debug)]
pub(crate) struct RunOutcome {
    pub(crate) exit: ExitCode,
    pub(crate) stdout: String,
    pub(crate) stderr: String,
}

/// Builds an argument vector as the operating system would deliver it.
pub(crate) fn build_args(arguments: &[&str]) -> Vec<OsString> {
    let mut args = vec![OsString::from("optimushq")];
    args.extend(arguments.iter().map(OsString::from));
    args
}

/// Runs the pipeline with the launch stage replaced by `handler`.
pub(crate) fn run_scripted<F>(
    arguments: &[&str],
    environment: &FakeEnvironment,
    handler: F,
) -> RunOutcome
where
    F: FnMut(&LaunchRequest) -> Result<ExitCode, LaunchError>,
{
    run_scripted_os(build_args(arguments), environment, handler)
}

/// Like [`run_scripted`], for argument vectors that are not valid UTF-8.
pub(crate) fn run_scripted_os<F>(
    args: Vec<OsString>,
    environment: &FakeEnvironment,
    handler: F,
) -> RunOutcome
where
    F: FnMut(&LaunchRequest) -> Result<ExitCode, LaunchError>,
{
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with_handler(args, &mut io, environment, handler)
    };
    RunOutcome {
        exit,
        stdout: decode_utf8(stdout, "stdout"),
        stderr: decode_utf8(stderr, "stderr"),
    }
}

/// Runs the pipeline while recording every request the launch stage receives.
pub(crate) fn run_with_recorder(
    arguments: &[&str],
    environment: &FakeEnvironment,
) -> (RunOutcome, Vec<LaunchRequest>) {
    let mut requests = Vec::new();
    let outcome = run_scripted(arguments, environment, |request| {
        requests.push(request.clone());
        Ok(ExitCode::SUCCESS)
    });
    (outcome, requests)
}

/// Runs the pipeline end to end with the real process launcher.
pub(crate) fn run_real(arguments: &[&str], environment: &FakeEnvironment) -> RunOutcome {
    let mut stdout: Vec<u8> = Vec::new();
    let mut stderr: Vec<u8> = Vec::new();
    let exit = {
        let mut io = IoStreams::new(&mut stdout, &mut stderr);
        run_with_environment(build_args(arguments), &mut io, environment)
    };
    RunOutcome {
        exit,
        stdout: decode_utf8(stdout, "stdout"),
        stderr: decode_utf8(stderr, "stderr"),
    }
}

/// Writes a built server entry under `root` and returns its path.
pub(crate) fn install_server_entry(root: &Path, contents: &str) -> PathBuf {
    let entry = root.join(SERVER_ENTRY_CANDIDATES[0]);
    let parent = entry.parent().expect("entry parent");
    fs::create_dir_all(parent).expect("create server dist directory");
    fs::write(&entry, contents).expect("write server entry");
    entry
}

fn decode_utf8(bytes: Vec<u8>, stream: &str) -> String {
    String::from_utf8(bytes).unwrap_or_else(|_| panic!("{stream} was not valid UTF-8"))
}
