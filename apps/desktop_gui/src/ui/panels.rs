//! Panels of the assignment desk. Each returns the action the user triggered, if any.

use egui::{Align, Button, ComboBox, Frame, Layout, TextEdit, Ui};
use shared::domain::{AssignmentId, ReminderWindow};

use crate::controller::forms::{AssignmentField, SubmissionField};
use crate::controller::reducer::ViewState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    Refresh,
    CreateAssignment,
    Select(AssignmentId),
    Submit,
    CancelSelection,
    SendReminders,
}

pub fn reminder_panel(ui: &mut Ui, state: &mut ViewState) -> Option<PanelAction> {
    let mut action = None;
    Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Send Reminder Emails");
        ui.label("Remind students whose assignments are due within the next:");
        ui.horizontal(|ui| {
            let mut window = state.reminder_window;
            ComboBox::from_id_salt("reminder-window")
                .width(120.0)
                .selected_text(window.label())
                .show_ui(ui, |ui| {
                    for option in ReminderWindow::ALL {
                        ui.selectable_value(&mut window, option, option.label());
                    }
                });
            if window != state.reminder_window {
                state.set_reminder_window(window);
            }

            let sending = state.is_sending();
            if ui
                .add_enabled(!sending, Button::new("Send Reminders"))
                .clicked()
            {
                action = Some(PanelAction::SendReminders);
            }
            if sending {
                ui.spinner();
            }
        });

        if let Some(summary) = &state.last_reminder_summary {
            if summary.failed() > 0 {
                ui.colored_label(
                    ui.visuals().warn_fg_color,
                    format!(
                        "{} of {} reminder(s) failed",
                        summary.failed(),
                        summary.attempted()
                    ),
                );
            }
        }
    });
    action
}

pub fn new_assignment_panel(ui: &mut Ui, state: &mut ViewState) -> Option<PanelAction> {
    let mut action = None;
    Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Post New Assignment");
        for field in AssignmentField::ALL {
            ui.label(field.label());
            let mut edit = TextEdit::singleline(field.get_mut(&mut state.assignment_draft))
                .desired_width(f32::INFINITY);
            if let Some(hint) = field.placeholder() {
                edit = edit.hint_text(hint);
            }
            ui.add(edit);
        }
        ui.add_space(4.0);
        if ui.button("Create Assignment").clicked() {
            action = Some(PanelAction::CreateAssignment);
        }
    });
    action
}

pub fn assignment_list(ui: &mut Ui, state: &ViewState) -> Option<PanelAction> {
    let mut action = None;
    ui.horizontal(|ui| {
        ui.heading("Available Assignments");
        if ui
            .add_enabled(!state.is_loading(), Button::new("Refresh"))
            .clicked()
        {
            action = Some(PanelAction::Refresh);
        }
        if state.is_loading() {
            ui.spinner();
        }
    });

    if state.assignments.is_empty() {
        ui.weak("No assignments yet.");
    }

    for assignment in &state.assignments {
        Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.strong(&assignment.title);
                    ui.label(&assignment.description);
                    ui.small(format!("Deadline: {}", assignment.deadline));
                    ui.small(format!("Submissions: {}", assignment.submissions.len()));
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let selected = state.is_selected(&assignment.id);
                    let label = if selected { "Selected" } else { "Select" };
                    if ui.button(label).clicked() {
                        action = Some(PanelAction::Select(assignment.id.clone()));
                    }
                });
            });
        });
    }
    action
}

pub fn submission_form(ui: &mut Ui, state: &mut ViewState) -> Option<PanelAction> {
    if !state.submission_form_visible() {
        return None;
    }

    let mut action = None;
    let heading = match state.selected_assignment() {
        Some(assignment) => format!("Submit Your Work: {}", assignment.title),
        None => "Submit Your Work".to_string(),
    };
    Frame::group(ui.style()).show(ui, |ui| {
        ui.heading(heading);
        for field in SubmissionField::ALL {
            ui.label(field.label());
            let mut edit = TextEdit::singleline(field.get_mut(&mut state.submission_draft))
                .desired_width(f32::INFINITY);
            if let Some(hint) = field.placeholder() {
                edit = edit.hint_text(hint);
            }
            ui.add(edit);
        }
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            if ui.button("Submit Assignment").clicked() {
                action = Some(PanelAction::Submit);
            }
            if ui.button("Cancel").clicked() {
                action = Some(PanelAction::CancelSelection);
            }
        });
    });
    action
}
