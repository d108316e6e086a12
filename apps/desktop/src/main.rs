use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client_core::{
    select_upcoming, send_reminders, AssignmentApi, ClientSettings, HttpAssignmentClient,
    ReminderOutcome,
};
use shared::{
    domain::{AssignmentId, ReminderWindow},
    protocol::{NewAssignment, Submission},
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Command-line access to the assignment service")]
struct Args {
    /// Base URL of the assignment API; overrides settings file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file to read instead of ./assignment_desk.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List every assignment with its submission count.
    List {
        /// Print the raw assignment records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Post a new assignment.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Deadline as entered, e.g. 2024-05-01T10:00.
        #[arg(long)]
        deadline: String,
    },
    /// Record a submission against an assignment.
    Submit {
        assignment_id: String,
        #[arg(long)]
        student_name: String,
        #[arg(long)]
        link: String,
        /// Defaults to the current time.
        #[arg(long)]
        submitted_at: Option<String>,
    },
    /// Show which assignments a reminder batch would cover, without sending.
    Upcoming {
        #[arg(long)]
        window: Option<ReminderWindow>,
    },
    /// Send one reminder per assignment due within the window.
    Remind {
        #[arg(long)]
        window: Option<ReminderWindow>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = ClientSettings::load_from(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let client = HttpAssignmentClient::new(
        settings
            .client_config()
            .context("assignment API base URL is not usable")?,
    );
    tracing::debug!(base_url = %client.config().base_url(), "using assignment API");

    match args.command {
        Command::List { json } => {
            let assignments = client.fetch_assignments().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&assignments)?);
                return Ok(());
            }
            if assignments.is_empty() {
                println!("No assignments yet.");
            }
            for assignment in &assignments {
                println!(
                    "{}  {}  due {}  ({} submission(s))",
                    assignment.id,
                    assignment.title,
                    assignment.deadline,
                    assignment.submissions.len()
                );
            }
        }
        Command::Create {
            title,
            description,
            deadline,
        } => {
            let assignment = NewAssignment {
                title,
                description,
                deadline,
            };
            client.create_assignment(&assignment).await?;
            println!("Assignment created successfully!");
        }
        Command::Submit {
            assignment_id,
            student_name,
            link,
            submitted_at,
        } => {
            let submission = Submission {
                student_name,
                submission_link: link,
                submitted_at: submitted_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
            };
            client
                .submit_assignment(&AssignmentId::new(assignment_id), &submission)
                .await?;
            println!("Assignment submitted successfully!");
        }
        Command::Upcoming { window } => {
            let window = window.unwrap_or(settings.default_window);
            let assignments = client.fetch_assignments().await?;
            let selection = select_upcoming(&assignments, Utc::now(), window);
            println!(
                "{} assignment(s) due within {}:",
                selection.upcoming.len(),
                window.label()
            );
            for assignment in &selection.upcoming {
                println!("  {}  {}  due {}", assignment.id, assignment.title, assignment.deadline);
            }
            if !selection.unparseable.is_empty() {
                println!(
                    "{} assignment(s) skipped with unreadable deadlines.",
                    selection.unparseable.len()
                );
            }
        }
        Command::Remind { window } => {
            let window = window.unwrap_or(settings.default_window);
            let assignments = client.fetch_assignments().await?;
            let summary = send_reminders(
                &client,
                &settings.reminder_recipient,
                &assignments,
                Utc::now(),
                window,
            )
            .await;
            for delivery in &summary.deliveries {
                match &delivery.outcome {
                    ReminderOutcome::Sent => println!("  sent    {}", delivery.title),
                    ReminderOutcome::Failed(reason) => {
                        println!("  failed  {}: {reason}", delivery.title)
                    }
                }
            }
            println!("{}", summary.status_line());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_takes_positional_id_and_optional_timestamp() {
        let args = Args::try_parse_from([
            "desktop",
            "submit",
            "665f1c",
            "--student-name",
            "Ada",
            "--link",
            "https://example.com/ada",
        ])
        .expect("args");
        assert_eq!(
            args.command,
            Command::Submit {
                assignment_id: "665f1c".into(),
                student_name: "Ada".into(),
                link: "https://example.com/ada".into(),
                submitted_at: None,
            }
        );
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let args = Args::try_parse_from([
            "desktop",
            "remind",
            "--window",
            "6",
            "--api-url",
            "http://10.0.0.2:5000",
        ])
        .expect("args");
        assert_eq!(args.api_url.as_deref(), Some("http://10.0.0.2:5000"));
        assert_eq!(
            args.command,
            Command::Remind {
                window: Some(ReminderWindow::SixHours)
            }
        );
    }

    #[test]
    fn remind_rejects_unoffered_window() {
        assert!(Args::try_parse_from(["desktop", "upcoming", "--window", "3"]).is_err());
    }

    #[test]
    fn create_requires_a_deadline() {
        assert!(Args::try_parse_from(["desktop", "create", "--title", "Essay"]).is_err());
    }
}
