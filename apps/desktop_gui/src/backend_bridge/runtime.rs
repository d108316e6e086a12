//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::{send_reminders, AssignmentApi, ClientConfig, HttpAssignmentClient};
use crossbeam_channel::{Receiver, SendTimeoutError, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub struct BackendContext {
    api: Arc<dyn AssignmentApi>,
    reminder_recipient: String,
}

impl BackendContext {
    pub fn new(api: Arc<dyn AssignmentApi>, reminder_recipient: impl Into<String>) -> Self {
        Self {
            api,
            reminder_recipient: reminder_recipient.into(),
        }
    }
}

pub fn launch(
    config: ClientConfig,
    reminder_recipient: String,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            tracing::info!(base_url = %config.base_url(), "backend worker ready");
            let context = BackendContext::new(
                Arc::new(HttpAssignmentClient::new(config)),
                reminder_recipient,
            );
            while let Ok(cmd) = cmd_rx.recv() {
                handle_command(&context, cmd, &ui_tx).await;
            }
            tracing::info!("command queue closed; backend worker exiting");
        });
    });
}

/// Runs one command to completion. Mutations are followed by a full refresh.
pub async fn handle_command(
    context: &BackendContext,
    cmd: BackendCommand,
    ui_tx: &Sender<UiEvent>,
) {
    let name = cmd.name();
    tracing::debug!(command = name, "processing backend command");

    match cmd {
        BackendCommand::RefreshAssignments => refresh(context, ui_tx).await,
        BackendCommand::CreateAssignment { assignment } => {
            match context.api.create_assignment(&assignment).await {
                Ok(()) => {
                    tracing::info!(title = %assignment.title, "assignment created");
                    emit(ui_tx, UiEvent::AssignmentCreated);
                    refresh(context, ui_tx).await;
                }
                Err(err) => report(ui_tx, UiErrorContext::CreateAssignment, &err),
            }
        }
        BackendCommand::SubmitWork {
            assignment_id,
            submission,
        } => match context
            .api
            .submit_assignment(&assignment_id, &submission)
            .await
        {
            Ok(()) => {
                tracing::info!(%assignment_id, "work submitted");
                emit(ui_tx, UiEvent::WorkSubmitted { assignment_id });
                refresh(context, ui_tx).await;
            }
            Err(err) => report(ui_tx, UiErrorContext::SubmitWork, &err),
        },
        BackendCommand::SendReminders {
            assignments,
            window,
            now,
        } => {
            let summary = send_reminders(
                context.api.as_ref(),
                &context.reminder_recipient,
                &assignments,
                now,
                window,
            )
            .await;
            tracing::info!(
                attempted = summary.attempted(),
                failed = summary.failed(),
                "reminder batch finished"
            );
            emit(ui_tx, UiEvent::RemindersFinished(summary));
        }
    }
}

async fn refresh(context: &BackendContext, ui_tx: &Sender<UiEvent>) {
    match context.api.fetch_assignments().await {
        Ok(assignments) => emit(ui_tx, UiEvent::AssignmentsLoaded(assignments)),
        Err(err) => report(ui_tx, UiErrorContext::LoadAssignments, &err),
    }
}

fn report(ui_tx: &Sender<UiEvent>, context: UiErrorContext, err: &client_core::ClientError) {
    tracing::error!("{}: {err}", context.action());
    emit(ui_tx, UiEvent::Error(UiError::from_client_error(context, err)));
}

/// The UI drains its queue every frame; a full queue is waited out, not dropped.
const UI_EVENT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

fn emit(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.send_timeout(event, UI_EVENT_SEND_TIMEOUT) {
        Ok(()) => {}
        Err(SendTimeoutError::Timeout(_)) => {
            tracing::error!("ui event queue stayed full; dropping event")
        }
        Err(SendTimeoutError::Disconnected(_)) => tracing::warn!("ui event receiver dropped"),
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
