//! wkhtmltopdf-backed rendering engine.
//!
//! Each launch probes the binary, and each render runs one child process
//! that reads HTML on stdin and writes the document to stdout. Children are
//! spawned with `kill_on_drop`, so a timed-out or abandoned render never
//! leaves a process behind.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{PageSettings, RenderError, RenderingEngine, RenderingEngineLauncher};

/// Launches wkhtmltopdf instances.
#[derive(Debug, Clone)]
pub struct WkhtmltopdfLauncher {
    binary: String,
    dpi: u32,
    timeout: Duration,
}

impl WkhtmltopdfLauncher {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            dpi: 96,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for WkhtmltopdfLauncher {
    fn default() -> Self {
        Self::new("wkhtmltopdf")
    }
}

#[async_trait]
impl RenderingEngineLauncher for WkhtmltopdfLauncher {
    async fn launch(&self) -> Result<Box<dyn RenderingEngine>, RenderError> {
        let probe = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| RenderError::Launch(format!("{}: {}", self.binary, e)))?;

        if !probe.success() {
            return Err(RenderError::Launch(format!(
                "{} --version exited with {}",
                self.binary, probe
            )));
        }

        tracing::debug!(binary = %self.binary, "rendering engine launched");
        Ok(Box::new(WkhtmltopdfEngine {
            binary: self.binary.clone(),
            dpi: self.dpi,
            timeout: self.timeout,
            renders: 0,
        }))
    }
}

/// One launched engine.
#[derive(Debug)]
pub struct WkhtmltopdfEngine {
    binary: String,
    dpi: u32,
    timeout: Duration,
    renders: u32,
}

impl WkhtmltopdfEngine {
    fn args(&self, page: &PageSettings) -> Vec<String> {
        vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "--dpi".to_string(),
            self.dpi.to_string(),
            "--page-size".to_string(),
            page.size.as_str().to_string(),
            "--margin-top".to_string(),
            format!("{}mm", page.margin_top_mm),
            "--margin-right".to_string(),
            format!("{}mm", page.margin_right_mm),
            "--margin-bottom".to_string(),
            format!("{}mm", page.margin_bottom_mm),
            "--margin-left".to_string(),
            format!("{}mm", page.margin_left_mm),
            "--print-media-type".to_string(),
            "-".to_string(),
            "-".to_string(),
        ]
    }
}

#[async_trait]
impl RenderingEngine for WkhtmltopdfEngine {
    async fn render(&mut self, html: &str, page: &PageSettings) -> Result<Vec<u8>, RenderError> {
        self.renders += 1;

        let mut child = Command::new(&self.binary)
            .args(self.args(page))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RenderError::Launch(format!("{}: {}", self.binary, e)))?;

        // Feeding stdin and draining stdout run together, so a child that
        // stops reading cannot block us past the timeout.
        let stdin = child.stdin.take();
        let feed = async move {
            if let Some(mut stdin) = stdin {
                stdin.write_all(html.as_bytes()).await?;
                stdin.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };
        let run = async { tokio::join!(feed, child.wait_with_output()) };

        let (fed, output) = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| RenderError::EngineFailed {
                status: "timeout".to_string(),
                stderr: format!("no result after {}s", self.timeout.as_secs()),
            })?;
        let output = output?;

        if !output.status.success() {
            return Err(RenderError::EngineFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        fed?;
        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        Ok(output.stdout)
    }

    async fn close(self: Box<Self>) -> Result<(), RenderError> {
        tracing::debug!(renders = self.renders, "rendering engine closed");
        Ok(())
    }
}
