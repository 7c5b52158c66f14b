#![warn(clippy::pedantic, clippy::nursery, clippy::cargo)]
#![deny(clippy::use_self, rust_2018_idioms)]
#![allow(clippy::multiple_crate_versions, clippy::module_name_repetitions)]

use std::{path::PathBuf, time::Instant};

use alarm_edit::{AlarmInput, EditingState};
use clock::Ticker;
use config::{Config, Theme};
use eframe::egui::{
    self, Align2, Button, CentralPanel, Color32, Grid, Layout, RichText, ScrollArea,
    TopBottomPanel, Window,
};
use log::{error, warn};

pub mod alarm;
/// the "new alarm" input row
pub mod alarm_edit;
pub mod alert;
pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod sound;
pub mod store;

pub use app::AppState;
pub use error::{Error, Result};

enum AlarmAction {
    Toggle(u64),
    Delete(u64),
}

/// The clock window.
#[derive(Debug)]
pub struct Clock {
    state: AppState,
    config: Config,
    // where to write the config back to when the theme changes
    config_path: Option<PathBuf>,
    input: AlarmInput,
    ticker: Ticker,
    status: Option<String>,
}

impl Clock {
    #[must_use]
    pub fn new(state: AppState, config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            state,
            config,
            config_path,
            input: AlarmInput::default(),
            ticker: Ticker::default(),
            status: None,
        }
    }

    /// logs a failed operation and shows it in the status line
    fn report<T>(&mut self, what: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                if matches!(e, Error::InvalidTime(_)) {
                    warn!("{what}: {e}");
                } else {
                    error!("{what}: {e}");
                }
                self.status = Some(format!("{what}: {e}"));
                None
            }
        }
    }

    fn poll(&mut self, ctx: &egui::Context) {
        if self.ticker.due(Instant::now()) {
            self.state.tick(chrono::Local::now().naive_local());
        }
        ctx.request_repaint_after(self.ticker.remaining(Instant::now()));
    }

    fn render_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("time_and_ctrl").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_btn = ui.add(Button::new(if self.config.theme == Theme::Dark {
                    "🌞"
                } else {
                    "🌙"
                }));
                if theme_btn.clicked() {
                    self.config.theme = !self.config.theme;
                    if let Some(path) = self.config_path.clone() {
                        let saved = self.config.save(&path);
                        self.report("couldn't save settings", saved);
                    }
                }
                ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.heading(self.state.current_time_display());
                });
            });
        });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let Some(status) = self.status.clone() else {
            return;
        };
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(Color32::LIGHT_RED, status);
                if ui.small_button("x").clicked() {
                    self.status = None;
                }
            });
        });
    }

    fn render_ringing(&mut self, ctx: &egui::Context) {
        let Some(alarm) = self.state.ringing_alarm() else {
            return;
        };
        let time = alarm.time.clone();
        let mut snooze = false;
        let mut dismiss = false;
        Window::new("⏰ Alarm Ringing!")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(RichText::new(time).size(32.0));
                ui.horizontal(|ui| {
                    snooze = ui
                        .button(format!("Snooze {} min", self.state.snooze_minutes()))
                        .clicked();
                    dismiss = ui.button("Dismiss").clicked();
                });
            });
        if snooze {
            let snoozed = self.state.snooze(chrono::Local::now().naive_local());
            self.report("couldn't save snoozed alarm", snoozed);
        } else if dismiss {
            self.state.dismiss();
        }
    }

    fn list_alarms(&mut self, ui: &mut egui::Ui) {
        let mut actions = Vec::new();
        let ringing = self.state.ringing_alarm_id();
        for alarm in self.state.alarms() {
            let mut label = RichText::new(&alarm.time).size(18.0);
            if !alarm.enabled {
                label = label.weak();
            } else if ringing == Some(alarm.id) {
                label = label.strong();
            }
            ui.label(label);
            let mut enabled = alarm.enabled;
            if ui.checkbox(&mut enabled, "enabled").changed() {
                actions.push(AlarmAction::Toggle(alarm.id));
            }
            if ui.button("Delete").on_hover_text("delete alarm").clicked() {
                actions.push(AlarmAction::Delete(alarm.id));
            }
            ui.end_row();
        }
        for action in actions {
            match action {
                AlarmAction::Toggle(id) => {
                    let toggled = self.state.toggle(id);
                    self.report("couldn't save alarm", toggled);
                }
                AlarmAction::Delete(id) => {
                    let deleted = self.state.delete(id);
                    self.report("couldn't save alarms", deleted);
                }
            }
        }
    }
}

impl eframe::App for Clock {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll(ctx);
        ctx.set_visuals(self.config.theme.into());

        self.render_header(ctx);
        self.render_status(ctx);
        self.render_ringing(ctx);

        CentralPanel::default().show(ctx, |ui| {
            if let EditingState::Submitted(time) = self.input.render(ui) {
                let added = self.state.add(&time);
                if let Some(Some(_)) = self.report("couldn't add alarm", added) {
                    self.input.clear();
                    self.status = None;
                }
            }
            ui.separator();
            ui.heading("Set Alarms");
            ScrollArea::vertical().show(ui, |ui| {
                Grid::new("alarms").striped(true).show(ui, |ui| {
                    self.list_alarms(ui);
                });
            });
        });
    }
}
