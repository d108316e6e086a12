use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(AssignmentId);

/// Look-ahead interval used to pick assignments that are due soon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ReminderWindow {
    OneHour,
    SixHours,
    TwelveHours,
    #[default]
    OneDay,
    TwoDays,
}

impl ReminderWindow {
    pub const ALL: [ReminderWindow; 5] = [
        ReminderWindow::OneHour,
        ReminderWindow::SixHours,
        ReminderWindow::TwelveHours,
        ReminderWindow::OneDay,
        ReminderWindow::TwoDays,
    ];

    pub fn hours(self) -> u32 {
        match self {
            ReminderWindow::OneHour => 1,
            ReminderWindow::SixHours => 6,
            ReminderWindow::TwelveHours => 12,
            ReminderWindow::OneDay => 24,
            ReminderWindow::TwoDays => 48,
        }
    }

    pub fn from_hours(hours: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|window| window.hours() == hours)
    }

    pub fn label(self) -> String {
        format!("{} hours", self.hours())
    }
}

impl fmt::Display for ReminderWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h", self.hours())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReminderWindowError {
    #[error("unsupported reminder window of {0} hours (expected one of 1, 6, 12, 24, 48)")]
    Unsupported(u32),
    #[error("'{0}' is not a number of hours")]
    NotANumber(String),
}

impl TryFrom<u32> for ReminderWindow {
    type Error = ReminderWindowError;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        Self::from_hours(hours).ok_or(ReminderWindowError::Unsupported(hours))
    }
}

/// Accepts `24` as well as `24h`.
impl FromStr for ReminderWindow {
    type Err = ReminderWindowError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        let digits = trimmed
            .strip_suffix('h')
            .or_else(|| trimmed.strip_suffix('H'))
            .unwrap_or(trimmed);
        let hours = digits
            .parse::<u32>()
            .map_err(|_| ReminderWindowError::NotANumber(raw.to_string()))?;
        Self::try_from(hours)
    }
}

impl From<ReminderWindow> for u32 {
    fn from(window: ReminderWindow) -> Self {
        window.hours()
    }
}
