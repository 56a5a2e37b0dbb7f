use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, ToastLevel, update};
use crate::export::{ExportJob, ExportOutcome};
use crate::storage::{Preferences, Store};
use crate::ui;
use crate::ui::style::ThemeMode;

impl App {
    /// Run the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized, a seed file
    /// cannot be read, or the event loop hits an I/O failure. Storage and
    /// clipboard problems are not errors; they surface as toasts.
    pub fn run(&mut self) -> Result<()> {
        // Storage opens and hydrates before the terminal comes up, so the
        // first frame already paints with the persisted theme.
        let store = Store::open(
            self.state_dir
                .clone()
                .unwrap_or_else(Store::default_dir),
        );
        if self.reset_session {
            store.clear();
        }
        let prefs = Preferences::load(&store);
        let dark = match self.theme {
            ThemeMode::Auto => prefs.dark,
            ThemeMode::Light => false,
            ThemeMode::Dark => true,
        };

        let content = if let Some(path) = &self.seed_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            store.write_content(&text);
            text
        } else {
            store
                .read_content()
                .unwrap_or_else(|| crate::app::DEFAULT_MARKDOWN.to_string())
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — mdlive requires an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableMouseCapture)?;

        let mut model = Model::new(&content, prefs, store, dark, (size.width, size.height));

        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut export_job: Option<ExportJob> = None;
        let mut needs_render = true;

        loop {
            let now = Instant::now();
            if model.expire_toast(now) {
                needs_render = true;
            }
            if model.expire_copy_confirmation(now) {
                needs_render = true;
            }

            // Export outcome. The exporting flag clears on every path:
            // success, fallback, failure, or a dead worker.
            if let Some(outcome) = export_job.as_ref().and_then(ExportJob::try_outcome) {
                export_job = None;
                model.exporting = false;
                match outcome {
                    ExportOutcome::Pdf(path) => model.show_toast(
                        ToastLevel::Info,
                        format!("PDF saved to {}", path.display()),
                    ),
                    ExportOutcome::BrowserFallback => model.show_toast(
                        ToastLevel::Info,
                        "Use \"Save as PDF\" in the print dialog",
                    ),
                    ExportOutcome::Failed(err) => {
                        model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                    }
                }
                needs_render = true;
            }

            let waiting_on_timers = export_job.is_some()
                || model.active_toast().is_some()
                || model.copy_confirmation_pending();
            let poll_ms = if needs_render {
                0
            } else if waiting_on_timers {
                50
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                if let Some(msg) = Self::handle_event(&event::read()?, model, now_ms) {
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &mut export_job, &side_msg);
                    needs_render = true;
                }

                // Coalesce key-repeat and wheel bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    if let Some(msg) = Self::handle_event(&event::read()?, model, drain_ms) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &mut export_job, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                model.apply_layout();
                terminal.draw(|frame| ui::render(model, frame))?;
                // Frame boundary: preview echoes armed during this frame's
                // events stop being suppressed one rendering tick later.
                model.sync.end_frame();
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
