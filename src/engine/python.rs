use super::{
    types::{Generation, WorkerReply, WorkerRequest},
    TextGenerator,
};
use crate::{config::Config, util::expand_tilde};
use anyhow::{anyhow, bail, Context, Result};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tracing::{debug, info, warn};

pub const WORKER_SCRIPT: &str = "qg_worker.py";

/// A Python process hosting a transformers pipeline.
///
/// The model is loaded once when the worker starts and reused for every
/// prompt. Requests and replies are single JSON lines on stdin/stdout.
pub struct PythonPipeline {
    label: String,
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: BufReader<ChildStdout>,
}

impl PythonPipeline {
    pub fn spawn(cfg: &Config) -> Result<Self> {
        let scripts_dir = resolve_scripts_dir(cfg)?;
        let script = scripts_dir.join(WORKER_SCRIPT);
        let python_exe = resolve_python_exe(&cfg.python.python_exe)?;

        let mut cmd = Command::new(&python_exe);
        cmd.arg(&script)
            .arg("--task")
            .arg(&cfg.model.task)
            .arg("--model")
            .arg(&cfg.model.name);
        for (k, v) in &cfg.python.env {
            cmd.env(k, v);
        }
        if cfg.debug.keep_python_stderr {
            cmd.stderr(Stdio::inherit());
        } else {
            cmd.stderr(Stdio::null());
        }

        info!(
            "loading model task={} model={} python={}",
            cfg.model.task,
            cfg.model.name,
            python_exe.display()
        );
        Self::from_command(cmd, script.display().to_string())
    }

    /// Starts any command that speaks the worker protocol and waits for its ready line.
    pub fn from_command(mut cmd: Command, label: impl Into<String>) -> Result<Self> {
        let label = label.into();
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawning worker: {label}"))?;
        let stdin = child.stdin.take().ok_or_else(|| anyhow!("no stdin"))?;
        let stdout = child.stdout.take().ok_or_else(|| anyhow!("no stdout"))?;

        let mut pipeline = Self {
            label,
            child,
            stdin: Some(stdin),
            stdout: BufReader::new(stdout),
        };

        let hello = pipeline
            .read_reply()
            .with_context(|| format!("waiting for worker to load model: {}", pipeline.label))?;
        if !hello.ok || !hello.ready {
            bail!(
                "worker failed to start: {}",
                hello.error.as_deref().unwrap_or("no ready signal")
            );
        }
        debug!("worker ready {} meta={}", pipeline.label, hello.meta);
        Ok(pipeline)
    }

    fn read_reply(&mut self) -> Result<WorkerReply> {
        let mut line = String::new();
        loop {
            line.clear();
            let n = self
                .stdout
                .read_line(&mut line)
                .with_context(|| "reading worker output")?;
            if n == 0 {
                bail!("worker exited before replying: {}", self.label);
            }
            if line.trim().is_empty() {
                continue;
            }
            return parse_reply(&line);
        }
    }
}

impl TextGenerator for PythonPipeline {
    fn generate(&mut self, prompt: &str) -> Result<Vec<Generation>> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow!("worker stdin already closed"))?;
        let mut bytes = serde_json::to_vec(&WorkerRequest { prompt })?;
        bytes.push(b'\n');
        stdin
            .write_all(&bytes)
            .with_context(|| format!("writing prompt to worker: {}", self.label))?;
        stdin.flush()?;

        let reply = self.read_reply()?;
        if !reply.ok {
            bail!(
                "generation failed: {}",
                reply.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(reply.results)
    }
}

impl Drop for PythonPipeline {
    fn drop(&mut self) {
        // Closing stdin is the worker's signal to exit.
        drop(self.stdin.take());
        match self.child.wait() {
            Ok(status) if !status.success() => {
                warn!("worker {} exited with {}", self.label, status)
            }
            Ok(_) => {}
            Err(err) => warn!("waiting for worker {}: {err}", self.label),
        }
    }
}

pub fn parse_reply(line: &str) -> Result<WorkerReply> {
    serde_json::from_str(line.trim())
        .with_context(|| format!("parsing worker JSON output: {}", line.trim()))
}

fn resolve_scripts_dir(cfg: &Config) -> Result<PathBuf> {
    let scripts_dir = expand_tilde(&cfg.python.scripts_dir);
    if cfg.security.pin_scripts_dir {
        let cwd = std::env::current_dir().with_context(|| "current_dir")?;
        let canon = scripts_dir
            .canonicalize()
            .with_context(|| format!("canonicalize scripts_dir: {}", scripts_dir.display()))?;
        if !canon.starts_with(&cwd) {
            bail!(
                "scripts_dir is outside cwd while pin_scripts_dir=true: {}",
                canon.display()
            );
        }
    }
    check_worker_script(&scripts_dir)?;
    Ok(scripts_dir)
}

pub fn check_worker_script(scripts_dir: &Path) -> Result<()> {
    let path = scripts_dir.join(WORKER_SCRIPT);
    if !path.exists() {
        bail!("missing script: {}", path.display());
    }
    Ok(())
}

fn resolve_python_exe(raw: &str) -> Result<PathBuf> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("auto") {
        if let Ok(env_val) = std::env::var("QUIZGEN_PYTHON") {
            let p = expand_tilde(&env_val);
            if p.exists() {
                return Ok(p);
            }
        }
        return Ok(PathBuf::from("python3"));
    }
    Ok(expand_tilde(raw))
}
