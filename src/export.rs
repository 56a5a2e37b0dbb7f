//! Document export.
//!
//! The preview HTML (with page-break-avoidance styling on block-level
//! elements) is staged to a temporary file, then an external HTML-to-PDF
//! converter runs in a background thread. When no converter succeeds, the
//! staged HTML opens in the default browser instead and the user prints to
//! PDF from there. The event loop polls the job each tick; the exporting
//! flag clears as soon as an outcome (or a dead worker) is observed, so
//! no failure path can leave the guard stuck.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, TryRecvError};

use thiserror::Error;

/// File name of the exported document.
const PDF_FILE_NAME: &str = "markdown-preview.pdf";

/// Print styling injected into the staged HTML: keep block elements on one
/// page, and give the document sane print margins and colors.
pub const PRINT_CSS: &str = "\
body { background: #fff; color: #1f2328; font-family: sans-serif; margin: 12mm; max-width: 210mm; }
pre { background: #f6f8fa; padding: 8px; overflow-x: auto; }
table { border-collapse: collapse; }
td, th { border: 1px solid #d0d7de; padding: 4px 8px; }
blockquote { border-left: 4px solid #d0d7de; margin-left: 0; padding-left: 12px; color: #57606a; }
table tr, p, pre, li, h1, h2, h3, h4, h5, h6, blockquote, ul, ol { page-break-inside: avoid; }
";

/// External converters tried in order, each invoked as `cmd IN.html OUT.pdf`.
const CONVERTERS: &[&str] = &["wkhtmltopdf", "weasyprint"];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to stage HTML: {0}")]
    Stage(#[from] std::io::Error),
    #[error("no PDF converter produced output")]
    NoConverter,
}

/// How an export ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// A converter wrote the PDF at this path.
    Pdf(PathBuf),
    /// No converter available; the HTML was opened in the browser for the
    /// user to print to PDF there.
    BrowserFallback,
    /// Everything failed, including the browser fallback.
    Failed(String),
}

/// A single in-flight export.
pub struct ExportJob {
    rx: Receiver<ExportOutcome>,
}

impl ExportJob {
    /// Stage the HTML and start the conversion in a background thread.
    pub fn spawn(html: String) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            let outcome = run_export(&html);
            // The receiver may already be gone if the user quit.
            let _ = tx.send(outcome);
        });
        Self { rx }
    }

    /// Non-blocking poll for the outcome.
    ///
    /// A disconnected channel means the worker died without reporting; that
    /// is surfaced as a failure so the caller still clears its guard.
    pub fn try_outcome(&self) -> Option<ExportOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                Some(ExportOutcome::Failed("export worker died".to_string()))
            }
        }
    }
}

fn run_export(html: &str) -> ExportOutcome {
    let staged = match stage_html(html) {
        Ok(path) => path,
        Err(err) => return ExportOutcome::Failed(err.to_string()),
    };

    match convert_to_pdf(&staged) {
        Ok(pdf) => ExportOutcome::Pdf(pdf),
        Err(err) => {
            tracing::warn!(%err, "PDF conversion failed, falling back to browser");
            match open_in_browser(&staged) {
                Ok(()) => ExportOutcome::BrowserFallback,
                Err(open_err) => ExportOutcome::Failed(open_err.to_string()),
            }
        }
    }
}

/// Write the HTML to a stable path in the system temp directory.
///
/// The file must outlive the export: the browser fallback opens it after
/// this process has moved on.
fn stage_html(html: &str) -> Result<PathBuf, ExportError> {
    let path = std::env::temp_dir().join("mdlive-preview.html");
    let mut file = std::fs::File::create(&path)?;
    file.write_all(html.as_bytes())?;
    Ok(path)
}

fn convert_to_pdf(staged: &Path) -> Result<PathBuf, ExportError> {
    let pdf = std::env::current_dir()
        .unwrap_or_else(|_| std::env::temp_dir())
        .join(PDF_FILE_NAME);

    for converter in CONVERTERS {
        let status = Command::new(converter)
            .arg(staged)
            .arg(&pdf)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() && pdf.exists() => return Ok(pdf),
            Ok(status) => {
                tracing::debug!(converter, code = ?status.code(), "converter failed");
            }
            Err(err) => {
                tracing::debug!(converter, %err, "converter unavailable");
            }
        }
    }
    Err(ExportError::NoConverter)
}

fn open_in_browser(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(path).spawn()?.wait()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Command::new("xdg-open").arg(path).spawn()?.wait()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_html_writes_document() {
        let path = stage_html("<html><body>x</body></html>").unwrap();
        let read_back = std::fs::read_to_string(&path).unwrap();
        assert!(read_back.contains("<body>x</body>"));
    }

    #[test]
    fn test_print_css_avoids_page_breaks_in_blocks() {
        assert!(PRINT_CSS.contains("page-break-inside: avoid"));
        for tag in ["p", "pre", "li", "blockquote", "h1"] {
            assert!(PRINT_CSS.contains(tag));
        }
    }

    #[test]
    fn test_try_outcome_empty_while_pending() {
        let (tx, rx) = mpsc::channel();
        let job = ExportJob { rx };
        assert_eq!(job.try_outcome(), None);
        tx.send(ExportOutcome::BrowserFallback).unwrap();
        assert_eq!(job.try_outcome(), Some(ExportOutcome::BrowserFallback));
    }

    #[test]
    fn test_dead_worker_reports_failure() {
        let (tx, rx) = mpsc::channel::<ExportOutcome>();
        drop(tx);
        let job = ExportJob { rx };
        assert!(matches!(job.try_outcome(), Some(ExportOutcome::Failed(_))));
    }
}
