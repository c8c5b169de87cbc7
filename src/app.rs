use std::collections::BTreeSet;

use eframe::egui;
use log::{debug, info, warn};
use queens_trace::export;
use queens_trace::playback::{Instant, MAX_DELAY_MS, MIN_DELAY_MS};
use queens_trace::{check_answer, solve, Algorithm, Board, Playback, Settings, Step, StepKind, N};

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Placing fixed queens by hand.
    Edit,
    /// Stepping through a solver trace.
    Play,
}

struct Particle {
    pos: egui::Pos2,
    vel: egui::Vec2,
    color: egui::Color32,
    life: f32, // 1.0 down to 0.0
    size: f32,
}

pub struct QueensTraceApp {
    settings: Settings,
    theme: Theme,
    mode: Mode,
    /// The board being edited; solvers start from it and keep its queens.
    board: Board,
    /// Rows outlined after "Check Answer".
    highlighted: BTreeSet<usize>,
    message: String,
    playback: Playback,
    particles: Vec<Particle>,
}

impl QueensTraceApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        let settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::with_settings(settings.clamp())
    }

    fn with_settings(settings: Settings) -> Self {
        let mut playback = Playback::default();
        playback.set_delay(settings.delay());
        Self {
            theme: Theme::by_name(&settings.theme),
            settings,
            mode: Mode::Edit,
            board: Board::empty(),
            highlighted: BTreeSet::new(),
            message: String::new(),
            playback,
            particles: Vec::new(),
        }
    }

    fn spawn_particles(&mut self, pos: egui::Pos2, color: egui::Color32) {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        for _ in 0..30 {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            let speed: f32 = rng.gen_range(100.0..500.0);
            self.particles.push(Particle {
                pos,
                vel: egui::vec2(angle.cos() * speed, angle.sin() * speed - 200.0),
                color,
                life: 1.0,
                size: rng.gen_range(3.0..7.0),
            });
        }
    }

    /// Burst of particles whenever the cursor lands on a `done` step.
    fn celebrate_if_done(&mut self, center: egui::Pos2) {
        if self.playback.current().map(|s| s.kind) == Some(StepKind::Done) {
            self.spawn_particles(center, self.theme.accent_color);
        }
    }

    // --- Actions ---

    fn run(&mut self) {
        self.highlighted.clear();
        self.message.clear();
        let steps = solve(&self.board, self.settings.algorithm, self.settings.granularity);
        self.playback.load(steps);
        self.mode = Mode::Play;
    }

    fn restart(&mut self) {
        self.playback.reset();
        self.mode = Mode::Edit;
        self.highlighted.clear();
    }

    fn clear(&mut self) {
        self.board = Board::empty();
        self.message.clear();
        self.restart();
    }

    fn check(&mut self) {
        if self.mode != Mode::Edit {
            self.message = "You can check only in Edit mode.".to_owned();
            return;
        }
        let verdict = check_answer(&self.board);
        self.highlighted = verdict.highlighted_rows();
        self.message = verdict.message();
    }

    fn click_cell(&mut self, row: usize, col: usize) {
        if self.mode != Mode::Edit {
            return;
        }
        self.board.toggle(row, col);
        self.highlighted.clear();
    }

    fn export(&mut self) {
        let name = export::file_name(self.settings.algorithm);
        let count = self.playback.len();

        #[cfg(not(target_arch = "wasm32"))]
        let result = save_native(self.playback.steps(), name).map_err(|e| e.to_string());
        #[cfg(target_arch = "wasm32")]
        let result = export::trace_csv(self.playback.steps())
            .map_err(|e| e.to_string())
            .and_then(|csv| {
                web_csv_download(&csv, name)
                    .map(|()| true)
                    .map_err(|e| format!("{e:?}"))
            });

        match result {
            Ok(true) => self.message = format!("Exported {count} steps to {name}."),
            Ok(false) => {}
            Err(e) => {
                warn!("trace export failed: {e}");
                self.message = format!("Export failed: {e}");
            }
        }
    }

    // --- Panels ---

    fn step_info(&self) -> String {
        match (self.mode, self.playback.current()) {
            (Mode::Play, Some(step)) => format!(
                "Step {}/{}   Action: {} at row {}, col {}   State: {}   {}",
                self.playback.position() + 1,
                self.playback.len(),
                step.kind.label(),
                step.row,
                step.col,
                step.state,
                step.metrics()
            ),
            _ => format!("Edit mode – {}/{N} queens placed.", self.board.placed()),
        }
    }

    fn state_panel(&self, ui: &mut egui::Ui) {
        let (state, active) = match (self.mode, self.playback.current()) {
            (Mode::Play, Some(step)) => (step.state, step.active_row()),
            _ => (self.board, None),
        };
        for row in 0..N {
            let value = state
                .get(row)
                .map_or_else(|| "·".to_owned(), |c| c.to_string());
            let mut text = egui::RichText::new(format!("queens[{row}]: {value}"))
                .monospace()
                .color(self.theme.text_color);
            if active == Some(row) {
                text = text.strong().background_color(self.theme.active_row);
            }
            ui.label(text);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let editing = self.mode == Mode::Edit;
        let center = ui.ctx().screen_rect().center();

        ui.label(
            egui::RichText::new("Solver")
                .strong()
                .color(self.theme.text_color),
        );
        ui.separator();
        let mut recompute = false;
        ui.horizontal(|ui| {
            for algorithm in [Algorithm::AStar, Algorithm::Backtracking] {
                recompute |= ui
                    .radio_value(&mut self.settings.algorithm, algorithm, algorithm.label())
                    .changed();
            }
        });
        let mut detailed = self.settings.detailed();
        if ui.checkbox(&mut detailed, "Show detailed steps").changed() {
            self.settings.set_detailed(detailed);
            recompute = true;
        }
        if recompute && !editing {
            self.run();
        }

        ui.add_space(15.0);
        ui.label(
            egui::RichText::new("Controls")
                .strong()
                .color(self.theme.text_color),
        );
        ui.separator();
        ui.horizontal_wrapped(|ui| {
            let btn_size = egui::vec2(64.0, 36.0);
            let in_play = !editing;
            if ui
                .add_enabled(editing, egui::Button::new("Run").min_size(btn_size))
                .clicked()
            {
                self.run();
            }
            if ui
                .add_enabled(
                    in_play && !self.playback.at_start(),
                    egui::Button::new("Back").min_size(btn_size),
                )
                .clicked()
            {
                self.playback.back();
            }
            if ui
                .add_enabled(
                    in_play && !self.playback.at_end(),
                    egui::Button::new("Next").min_size(btn_size),
                )
                .clicked()
            {
                self.playback.next();
                self.celebrate_if_done(center);
            }
            let play_label = if self.playback.is_playing() {
                "Pause"
            } else {
                "Play"
            };
            if ui
                .add_enabled(in_play, egui::Button::new(play_label).min_size(btn_size))
                .clicked()
            {
                self.playback.toggle(Instant::now());
                self.celebrate_if_done(center);
            }
            if ui
                .add_sized(btn_size, egui::Button::new("Restart"))
                .clicked()
            {
                self.restart();
            }
            if ui.add_sized(btn_size, egui::Button::new("Clear")).clicked() {
                self.clear();
            }
        });

        ui.add_space(10.0);
        if ui
            .add(
                egui::Slider::new(&mut self.settings.delay_ms, MIN_DELAY_MS..=MAX_DELAY_MS)
                    .text("Delay")
                    .suffix(" ms"),
            )
            .changed()
        {
            self.playback.set_delay(self.settings.delay());
        }

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Check Answer").clicked() {
                self.check();
            }
            if ui
                .add_enabled(!editing, egui::Button::new("Export trace CSV"))
                .clicked()
            {
                self.export();
            }
        });
        if !self.message.is_empty() {
            ui.label(egui::RichText::new(&self.message).color(self.theme.accent_color));
        }

        ui.add_space(10.0);
        ui.label("Theme:");
        egui::ComboBox::from_id_salt("theme_picker")
            .selected_text(self.theme.name)
            .show_ui(ui, |ui| {
                for preset in Theme::presets() {
                    ui.selectable_value(&mut self.theme, preset.clone(), preset.name);
                }
            });
        self.settings.theme = self.theme.name.to_owned();

        ui.add_space(20.0);
        ui.label(
            egui::RichText::new("Trace")
                .strong()
                .color(self.theme.text_color),
        );
        ui.separator();
        ui.label(egui::RichText::new(self.step_info()).size(13.0));
        ui.add_space(8.0);
        self.state_panel(ui);

        if editing {
            ui.add_space(10.0);
            ui.label("Click on the board to place queens, one per row.");
            ui.label("Queens attack if they share a column or a diagonal.");
            ui.label("Run solves from the placed queens with the selected method.");
        }
    }

    fn board_view(&mut self, ui: &mut egui::Ui, is_mobile: bool) {
        let available_rect = ui.available_rect_before_wrap();
        let margin = if is_mobile { 10.0 } else { 60.0 };
        let size = (available_rect.height() - margin)
            .min(available_rect.width() - margin)
            .max(0.0);
        let board_rect =
            egui::Rect::from_center_size(available_rect.center(), egui::vec2(size, size));
        let cell_size = size / N as f32;

        let response = ui.allocate_rect(board_rect, egui::Sense::click());
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let col = ((pos.x - board_rect.min.x) / cell_size).floor();
                let row = ((pos.y - board_rect.min.y) / cell_size).floor();
                if (0.0..N as f32).contains(&row) && (0.0..N as f32).contains(&col) {
                    self.click_cell(row as usize, col as usize);
                }
            }
        }

        let step: Option<Step> = match self.mode {
            Mode::Play => self.playback.current().cloned(),
            Mode::Edit => None,
        };
        let state = step.as_ref().map_or(self.board, |s| s.state);
        let cell_rect = |row: usize, col: usize| {
            egui::Rect::from_min_size(
                egui::pos2(
                    board_rect.min.x + col as f32 * cell_size,
                    board_rect.min.y + row as f32 * cell_size,
                ),
                egui::vec2(cell_size, cell_size),
            )
        };

        let painter = ui.painter();
        let font_id = egui::FontId::proportional(cell_size * 0.7);

        // Draw background shadow/border
        painter.rect_filled(
            board_rect.expand(5.0),
            5.0,
            self.theme.text_color.linear_multiply(0.2),
        );

        for row in 0..N {
            for col in 0..N {
                let color = if (row + col) % 2 == 0 {
                    self.theme.board_light
                } else {
                    self.theme.board_dark
                };
                painter.rect_filled(cell_rect(row, col), 0.0, color);
            }
        }

        let mut skip_cell = None;
        if let Some(step) = &step {
            if let Some(row) = step.active_row() {
                let band = egui::Rect::from_min_size(
                    cell_rect(row, 0).min,
                    egui::vec2(size, cell_size),
                );
                painter.rect_filled(band, 0.0, self.theme.active_row);
            }
            if let (true, Some(row), Some(col)) =
                (step.kind.marks_candidate(), step.active_row(), step.active_col())
            {
                if step.kind == StepKind::Discover {
                    skip_cell = Some((row, col));
                }
                painter.text(
                    cell_rect(row, col).center(),
                    egui::Align2::CENTER_CENTER,
                    "♛",
                    font_id.clone(),
                    self.theme.accent_color,
                );
            }
        }

        for (row, col) in state.occupied() {
            if skip_cell == Some((row, col)) {
                continue;
            }
            let rect = cell_rect(row, col);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                "♛",
                font_id.clone(),
                self.theme.queen_color,
            );
            if self.mode == Mode::Edit && self.highlighted.contains(&row) {
                painter.rect_stroke(
                    rect.shrink(1.5),
                    0.0,
                    egui::Stroke::new(3.0, self.theme.conflict),
                );
            }
        }

        for p in &self.particles {
            painter.circle_filled(p.pos, p.size, p.color.linear_multiply(p.life));
        }

        // Row and column indices, matching the step info line
        let label_font = egui::FontId::proportional(cell_size * 0.15);
        for i in 0..N {
            painter.text(
                egui::pos2(
                    board_rect.min.x + i as f32 * cell_size + cell_size / 2.0,
                    board_rect.max.y + 10.0,
                ),
                egui::Align2::CENTER_TOP,
                i.to_string(),
                label_font.clone(),
                self.theme.text_color,
            );
            painter.text(
                egui::pos2(
                    board_rect.min.x - 10.0,
                    board_rect.min.y + i as f32 * cell_size + cell_size / 2.0,
                ),
                egui::Align2::RIGHT_CENTER,
                i.to_string(),
                label_font.clone(),
                self.theme.text_color,
            );
        }
    }
}

impl eframe::App for QueensTraceApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // --- Animation Update ---
        let dt = ctx.input(|i| i.stable_dt);
        self.particles.retain_mut(|p| {
            p.pos += p.vel * dt;
            p.vel.y += 800.0 * dt; // Gravity
            p.life -= dt * 1.5;
            p.life > 0.0
        });
        if !self.particles.is_empty() {
            ctx.request_repaint();
        }

        // --- Auto-play ---
        let now = Instant::now();
        if self.playback.tick(now) {
            self.celebrate_if_done(ctx.screen_rect().center());
        }
        if let Some(wait) = self.playback.until_due(now) {
            ctx.request_repaint_after(wait);
        }

        let panel_frame = egui::Frame::none()
            .fill(self.theme.panel_background)
            .inner_margin(12.0)
            .rounding(10.0)
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(20)));

        // --- Responsive Layout Detection ---
        let is_mobile = ctx.screen_rect().width() < 700.0;

        if is_mobile {
            egui::TopBottomPanel::top("mobile_top")
                .frame(panel_frame.inner_margin(egui::Margin::symmetric(10.0, 5.0)))
                .show(ctx, |ui| {
                    ui.label(
                        egui::RichText::new("♛ 8-Queens")
                            .strong()
                            .color(self.theme.accent_color),
                    );
                    ui.label(egui::RichText::new(self.step_info()).size(12.0));
                });

            egui::TopBottomPanel::bottom("mobile_bottom")
                .frame(panel_frame.inner_margin(egui::Margin::symmetric(15.0, 10.0)))
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(280.0)
                        .show(ui, |ui| self.controls(ui));
                });
        } else {
            egui::SidePanel::right("controls")
                .frame(panel_frame)
                .min_width(340.0)
                .resizable(true)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.add_space(8.0);
                            ui.label(
                                egui::RichText::new("♛ 8-Queens: A* vs Backtracking")
                                    .size(22.0)
                                    .strong()
                                    .color(self.theme.text_color),
                            );
                        });
                        ui.add_space(20.0);
                        self.controls(ui);
                    });
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.background))
            .show(ctx, |ui| self.board_view(ui, is_mobile));
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        debug!("saving settings: {:?}", self.settings);
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn save_native(steps: &[Step], name: &str) -> Result<bool, queens_trace::ExportError> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("CSV", &["csv"])
        .set_file_name(name)
        .save_file()
    else {
        return Ok(false);
    };
    let file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    export::write_trace_csv(steps, file)?;
    info!("trace written to {}", path.display());
    Ok(true)
}

#[cfg(target_arch = "wasm32")]
fn web_csv_download(csv_content: &str, name: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::JsValue;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let parts = js_sys::Array::of1(&JsValue::from_str(csv_content));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/csv");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()?;
    a.set_href(&url);
    a.set_download(name);
    a.click();
    web_sys::Url::revoke_object_url(&url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> QueensTraceApp {
        QueensTraceApp::with_settings(Settings::default())
    }

    #[test]
    fn run_enters_play_mode_and_restart_keeps_the_board() {
        let mut app = app();
        app.click_cell(0, 0);
        app.run();
        assert_eq!(app.mode, Mode::Play);
        assert_eq!(app.playback.current().unwrap().kind, StepKind::Start);

        app.click_cell(1, 1);
        assert_eq!(app.board.get(1), None, "clicks are ignored while playing");

        app.restart();
        assert_eq!(app.mode, Mode::Edit);
        assert!(app.playback.is_empty());
        assert_eq!(app.board.get(0), Some(0));

        app.clear();
        assert_eq!(app.board, Board::empty());
    }

    #[test]
    fn check_highlights_conflicts_and_editing_clears_them() {
        let mut app = app();
        for row in 0..N {
            app.click_cell(row, row);
        }
        app.check();
        assert_eq!(app.highlighted.len(), N);
        app.click_cell(0, 0);
        assert!(app.highlighted.is_empty());
    }

    #[test]
    fn check_is_refused_outside_edit_mode() {
        let mut app = app();
        app.run();
        app.check();
        assert_eq!(app.message, "You can check only in Edit mode.");
    }

    #[test]
    fn playback_delay_follows_settings() {
        let app = QueensTraceApp::with_settings(Settings {
            delay_ms: 600,
            ..Settings::default()
        });
        assert_eq!(app.playback.delay().as_millis(), 600);
    }
}
