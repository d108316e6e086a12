use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::ReminderWindow;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::ViewState;
use crate::ui::panels::{self, PanelAction};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub api_base_url: String,
    pub reminder_window: ReminderWindow,
}

pub struct AssignmentDeskApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    api_base_url: String,
    state: ViewState,
}

impl AssignmentDeskApp {
    pub fn bootstrap(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            api_base_url: startup.api_base_url,
            state: ViewState::new(startup.reminder_window),
        };
        let refresh = app.state.refresh();
        app.dispatch(refresh);
        app
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Err(rejected) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.state.status)
        {
            self.state.dispatch_failed(&rejected);
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.state.apply(event);
        }
    }

    fn handle_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Refresh => {
                let cmd = self.state.refresh();
                self.dispatch(cmd);
            }
            PanelAction::CreateAssignment => {
                let cmd = self.state.create_assignment();
                self.dispatch(cmd);
            }
            PanelAction::Select(id) => self.state.select(id),
            PanelAction::Submit => {
                if let Some(cmd) = self.state.submit() {
                    self.dispatch(cmd);
                }
            }
            PanelAction::CancelSelection => self.state.cancel_selection(),
            PanelAction::SendReminders => {
                if let Some(cmd) = self.state.send_reminders(Utc::now()) {
                    self.dispatch(cmd);
                }
            }
        }
    }
}

impl eframe::App for AssignmentDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.state.last_error.is_some() {
                    ui.colored_label(ui.visuals().error_fg_color, &self.state.status);
                } else {
                    ui.label(&self.state.status);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&self.api_base_url);
                });
            });
        });

        let mut actions = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_max_width(800.0);
                ui.heading("Student Assignment Submission");
                ui.add_space(8.0);

                actions.extend(panels::reminder_panel(ui, &mut self.state));
                ui.separator();
                actions.extend(panels::new_assignment_panel(ui, &mut self.state));
                ui.add_space(8.0);
                actions.extend(panels::assignment_list(ui, &self.state));
                ui.add_space(8.0);
                actions.extend(panels::submission_form(ui, &mut self.state));
            });
        });

        for action in actions {
            self.handle_action(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
