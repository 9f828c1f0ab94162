//! The progress window itself.
//!
//! Runs inside the child process started by
//! [`WindowProcess`](super::WindowProcess). It shows a label and a bar whose
//! block sweeps back and forth until the process is killed. Close requests
//! from the window manager are cancelled.

use std::time::{Duration, Instant};

use eframe::egui;

/// Title of the progress window.
pub const WINDOW_TITLE: &str = "PDFMerger";

/// Text shown above the bar.
pub const LABEL: &str = "Merging files, please wait...";

const BAR_LENGTH: f32 = 300.0;
const BAR_HEIGHT: f32 = 14.0;
const BLOCK_FRACTION: f32 = 0.2;
const FRAME_INTERVAL: Duration = Duration::from_millis(15);
const SWEEP_PERIOD: Duration = Duration::from_millis(1500);

/// Open the progress window and block until the process is terminated.
pub fn run() -> anyhow::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([BAR_LENGTH + 40.0, 80.0])
            .with_resizable(false)
            .with_maximize_button(false)
            .with_minimize_button(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(ProgressWindow::new()))),
    )
    .map_err(|err| anyhow::anyhow!("progress window failed: {err}"))
}

struct ProgressWindow {
    started: Instant,
}

impl ProgressWindow {
    fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn indeterminate_bar(&self, ui: &mut egui::Ui) {
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(BAR_LENGTH, BAR_HEIGHT), egui::Sense::hover());

        let visuals = ui.visuals();
        let painter = ui.painter();
        painter.rect_filled(rect, 2.0, visuals.extreme_bg_color);

        let block_width = BAR_LENGTH * BLOCK_FRACTION;
        let x = rect.left() + block_offset(self.started.elapsed(), BAR_LENGTH, block_width);
        let block = egui::Rect::from_min_size(
            egui::pos2(x, rect.top()),
            egui::vec2(block_width, BAR_HEIGHT),
        );
        painter.rect_filled(block, 2.0, visuals.selection.bg_fill);
    }
}

impl eframe::App for ProgressWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Only the parent process may end this window.
        if ctx.input(|input| input.viewport().close_requested()) {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(LABEL);
                ui.add_space(6.0);
                self.indeterminate_bar(ui);
            });
        });

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

/// Left edge of the moving block, relative to the track.
///
/// The block travels from 0 to `track - block` in one [`SWEEP_PERIOD`] and
/// back in the next.
fn block_offset(elapsed: Duration, track: f32, block: f32) -> f32 {
    let travel = (track - block).max(0.0);
    let phase = (elapsed.as_secs_f32() / SWEEP_PERIOD.as_secs_f32()) % 2.0;
    let position = if phase <= 1.0 { phase } else { 2.0 - phase };
    position * travel
}
