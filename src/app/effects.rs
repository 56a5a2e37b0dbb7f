use std::io::{Write, stdout};

use base64::Engine;

use crate::app::update::Message;
use crate::app::{App, Model, ToastLevel};
use crate::export::{ExportJob, PRINT_CSS};
use crate::preview::html_document;
use crate::ui::style::Theme;

/// What the clipboard accepted.
enum CopyResult {
    Rich,
    PlainOnly,
    Failed,
}

impl App {
    /// Run the side effects for a message, right after its state
    /// transition and within the same event turn.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        export_job: &mut Option<ExportJob>,
        msg: &Message,
    ) {
        // Document mutation → persistence, synchronously in this turn.
        if model.take_content_dirty() {
            model.store.write_content(&model.buffer.text());
        }

        match msg {
            Message::Reset => {
                if model.reset_armed {
                    model.show_toast(
                        ToastLevel::Warning,
                        "Press Ctrl+R again to reset — current content will be lost",
                    );
                } else {
                    model.show_toast(ToastLevel::Info, "Reset to default");
                }
            }

            Message::CopyOutput => {
                // Label flips optimistically, like the button it models.
                model.flash_copy_confirmation();
                let html = html_document(&model.buffer.text(), "");
                let plain = model.preview.plain_text();
                match copy_rich(&html, &plain) {
                    CopyResult::Rich => model.show_toast(ToastLevel::Info, "Output copied"),
                    CopyResult::PlainOnly => {
                        model.show_toast(ToastLevel::Info, "Output copied (plain text)");
                    }
                    CopyResult::Failed => model.show_toast(ToastLevel::Error, "Copy failed"),
                }
            }

            Message::CopyMarkdown => match copy_plain(&model.buffer.text()) {
                Ok(()) => model.show_toast(ToastLevel::Info, "Markdown copied"),
                Err(err) => model.show_toast(ToastLevel::Error, format!("Copy failed: {err}")),
            },

            Message::Export => {
                // One export at a time.
                if model.exporting {
                    return;
                }
                model.exporting = true;
                let html = html_document(&model.buffer.text(), PRINT_CSS);
                *export_job = Some(ExportJob::spawn(html));
            }

            Message::ToggleSync => {
                model.prefs.toggle_sync_scroll(&model.store);
                let state = if model.prefs.sync_scroll { "on" } else { "off" };
                model.show_toast(ToastLevel::Info, format!("Sync scroll {state}"));
            }

            Message::ToggleTheme => {
                model.prefs.toggle_dark(&model.store);
                model.theme = Theme::for_dark(model.prefs.dark);
                // Highlighting palette follows the theme.
                model.reflow_preview();
            }

            Message::ToggleNavbar => {
                model.prefs.toggle_navbar(&model.store);
                model.apply_layout();
            }

            _ => {}
        }
    }
}

/// Dual-representation clipboard write with cascading fallback:
/// rich HTML + plain text, then plain text, then OSC 52.
fn copy_rich(html: &str, plain: &str) -> CopyResult {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if clipboard.set_html(html, Some(plain)).is_ok() {
            return CopyResult::Rich;
        }
        if clipboard.set_text(plain).is_ok() {
            return CopyResult::PlainOnly;
        }
    }
    if copy_osc52(plain).is_ok() {
        return CopyResult::PlainOnly;
    }
    CopyResult::Failed
}

/// Plain-text clipboard write with the OSC 52 fallback.
fn copy_plain(text: &str) -> std::io::Result<()> {
    if let Ok(mut clipboard) = arboard::Clipboard::new()
        && clipboard.set_text(text).is_ok()
    {
        return Ok(());
    }
    copy_osc52(text)
}

/// Last-resort copy through the terminal itself.
fn copy_osc52(text: &str) -> std::io::Result<()> {
    let mut out = stdout();
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
