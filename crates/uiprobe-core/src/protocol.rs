//! The uniform command protocol spoken by automation routers.
//!
//! These are pure types: the adapters that own device communication
//! (shelling out to platform CLIs, talking to companion processes)
//! live outside this crate and exchange these requests and responses
//! as JSON. Element-addressed commands carry the snapshot generation
//! they were resolved against, so a router can reject actions aimed at
//! a screen that has since changed (see [`crate::session`]).

use serde::{Deserialize, Serialize};

use crate::diff::ScreenDiff;
use crate::element::UiElement;
use crate::error::ApiError;

/// Target platform for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Android,
    Ios,
    Desktop,
    Aurora,
}

impl Platform {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Desktop => "desktop",
            Platform::Aurora => "aurora",
        }
    }
}

/// A request from an agent to the automation router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: String,
    pub platform: Platform,
    pub command: Command,
}

/// Device-automation commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Command {
    /// Tap at absolute screen coordinates.
    Tap { x: i32, y: i32 },
    /// Swipe from one point to another.
    Swipe {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        duration_ms: Option<u64>,
    },
    /// Type text into the focused field.
    TypeText { text: String },
    /// Press a named hardware/system key.
    PressKey { key: String },
    /// Capture the screen.
    Screenshot,
    /// Dump and parse the UI hierarchy.
    DumpUi {
        /// Include non-meaningful elements in the rendering.
        show_all: Option<bool>,
    },
    /// Resolve a natural-language description to an element.
    FindElement { description: String },
    /// Tap an element by the index it had in a previous dump.
    TapElement { index: usize, generation: u64 },
    /// Launch an application.
    LaunchApp { app_id: String },
    /// Terminate an application.
    TerminateApp { app_id: String },
    /// Retrieve recent application logs.
    AppLogs {
        app_id: Option<String>,
        lines: Option<usize>,
    },
}

/// A response from the router back to the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: impl Into<String>, data: ResponseData) -> Self {
        Self {
            id: id.into(),
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(id: impl Into<String>, error: ApiError) -> Self {
        Self {
            id: id.into(),
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Response payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseData {
    /// A parsed element sequence with its snapshot generation.
    Elements {
        generation: u64,
        elements: Vec<UiElement>,
    },
    /// A resolved element match.
    Match {
        generation: u64,
        element: UiElement,
        confidence: u8,
        reason: String,
    },
    /// A change report between two dumps.
    Diff(ScreenDiff),
    /// Rendered text (tree, analysis, logs).
    Text { content: String },
    /// Generic success message.
    Ok { message: String },
}
