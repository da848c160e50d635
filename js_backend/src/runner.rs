//! Runs generated JavaScript through an external `node` process.

use crate::js_identifier;
use frontend::ast::{Program, Stmt};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to talk to {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

#[derive(Debug, Clone)]
pub struct NodeRunner {
    node: PathBuf,
}

impl Default for NodeRunner {
    fn default() -> Self {
        Self::new("node")
    }
}

impl NodeRunner {
    pub fn new(node: impl Into<PathBuf>) -> Self {
        Self { node: node.into() }
    }

    /// Whether the interpreter can be started at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.node)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// Feeds `js` on stdin and returns trimmed stdout.
    pub fn run(&self, js: &str) -> Result<String, RunError> {
        let program = self.node.display().to_string();
        log::info!("Running generated code with {program}");

        let mut child = Command::new(&self.node)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RunError::Spawn {
                program: program.clone(),
                source,
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(js.as_bytes()).map_err(|source| RunError::Io {
                program: program.clone(),
                source,
            })?;
        }

        let output = child.wait_with_output().map_err(|source| RunError::Io {
            program: program.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(RunError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Runs `js` with the `node` found on `PATH`.
pub fn execute_js(js: &str) -> Result<String, RunError> {
    NodeRunner::default().run(js)
}

/// Names declared by top-level statements, first declaration first.
pub fn top_level_declarations(program: &Program) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for stmt in &program.statements {
        if let Stmt::Declaration { name, .. } = stmt {
            let name = program.name(*name);
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// `js` followed by one `console.log` per name, printing `name = value`.
pub fn with_report(js: &str, names: &[&str]) -> String {
    let mut out = js.to_string();
    for name in names {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("console.log(\"{name} = \" + {});", js_identifier(name)));
    }
    out
}
