//! Line-delimited JSON request loop.
//!
//! Each request line carries a Debug and a Release build of the same
//! program. The worker runs both and answers with one response line
//! followed by the sentinel line `Done`.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use reducto_sandbox::{ContainerId, Harness, RunOutcome, SandboxError};
use serde::{Deserialize, Serialize};

use crate::config::WorkerConfig;
use crate::lifecycle::Recycler;

/// Written after every response line.
pub const SENTINEL: &str = "Done";

/// Two builds of one candidate program.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    #[serde(rename = "Debug", with = "base64_bytes")]
    pub debug: Vec<u8>,
    #[serde(rename = "Release", with = "base64_bytes")]
    pub release: Vec<u8>,
}

/// Outcome of both builds, in the shape the supervisor expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RunResponse {
    pub debug_output: i32,
    pub debug_error: Option<String>,
    pub release_output: i32,
    pub release_error: Option<String>,
    /// Timeouts are decided by the supervisor; always false here.
    pub is_timeout: bool,
    pub is_jit_assert: bool,
    /// Crashes are observed by the supervisor; always false here.
    pub has_crashed: bool,
    pub environment_variables: BTreeMap<String, String>,
}

impl RunResponse {
    pub fn new(debug: &RunOutcome, release: &RunOutcome, env: BTreeMap<String, String>) -> Self {
        Self {
            debug_output: debug.fingerprint().unwrap_or(0),
            debug_error: debug.error_message().map(str::to_owned),
            release_output: release.fingerprint().unwrap_or(0),
            release_error: release.error_message().map(str::to_owned),
            is_timeout: false,
            is_jit_assert: debug.is_assertion() || release.is_assertion(),
            has_crashed: false,
            environment_variables: env,
        }
    }
}

/// Variables from `vars` whose names start with one of `prefixes`.
pub fn environment_snapshot(
    vars: impl IntoIterator<Item = (String, String)>,
    prefixes: &[String],
) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter(|(name, _)| prefixes.iter().any(|prefix| name.starts_with(prefix.as_str())))
        .collect()
}

/// Serves run requests against a recycled execution container.
#[derive(Debug)]
pub struct Worker {
    harness: Harness,
    recycler: Recycler,
    env_prefixes: Vec<String>,
}

impl Worker {
    pub fn new(config: &WorkerConfig) -> Result<Self, SandboxError> {
        Ok(Self {
            harness: Harness::new(&config.sandbox)?,
            recycler: Recycler::new(config.sandbox.clone(), config.recycle_threshold)?,
            env_prefixes: config.env_prefixes.clone(),
        })
    }

    /// The container the next request will run in.
    pub fn container_id(&self) -> ContainerId {
        self.recycler.active_id()
    }

    /// Handle one input line. Empty or malformed lines yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<RunResponse> {
        let response = self.respond(line)?;
        self.finish_request();
        Some(response)
    }

    /// Read requests until end of input, answering each well-formed one.
    pub fn serve(&mut self, mut input: impl BufRead, mut output: impl Write) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                tracing::info!("input closed");
                return Ok(());
            }
            let line = String::from_utf8_lossy(&buf);
            let Some(response) = self.respond(&line) else {
                continue;
            };

            serde_json::to_writer(&mut output, &response)?;
            output.write_all(b"\n")?;
            output.flush()?;
            writeln!(output, "{SENTINEL}")?;
            output.flush()?;

            self.finish_request();
        }
    }

    /// Decode a request and run both builds.
    fn respond(&mut self, line: &str) -> Option<RunResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let request: RunRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "skipping malformed request");
                return None;
            }
        };
        Some(self.run(&request))
    }

    pub fn run(&mut self, request: &RunRequest) -> RunResponse {
        let container = self.recycler.active();
        let debug_run = self.harness.run_binary(container, &request.debug);
        let release_run = self.harness.run_binary(container, &request.release);
        tracing::debug!(
            container = %container.id(),
            debug = ?debug_run,
            release = ?release_run,
            "request finished"
        );

        let env = environment_snapshot(std::env::vars(), &self.env_prefixes);
        RunResponse::new(&debug_run, &release_run, env)
    }

    /// Book-keeping after a response has been delivered.
    fn finish_request(&mut self) {
        if let Err(error) = self.recycler.record_request() {
            tracing::warn!(%error, "could not create a fresh container, keeping the current one");
        }
        self.recycler.reclaim();
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
