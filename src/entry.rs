//! Canonical log entry and the workflow vocabulary.
//!
//! A [`LogEntry`] keeps its vocabulary fields (`event_type`, `state`,
//! `prev_state`) as the raw strings found in the log, so values outside the
//! vocabulary reach the validator intact. [`EventType`] and
//! [`WorkflowState`] are the typed views of those strings.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Placeholder for a numeric field that was absent from the source record.
pub const MISSING_NUMBER: i64 = -1;

/// One recorded event of a workflow trace, in canonical shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Global ordering key; expected to strictly increase.
    #[serde(rename = "seq")]
    pub sequence: i64,
    pub timestamp_ms: i64,
    pub timestamp_us: i64,
    pub event_type: String,
    pub state: String,
    /// Empty when the record carries no previous state.
    pub prev_state: String,
    pub event: String,
    pub reason: String,
    pub data: String,
}

impl Default for LogEntry {
    fn default() -> Self {
        Self {
            sequence: MISSING_NUMBER,
            timestamp_ms: MISSING_NUMBER,
            timestamp_us: MISSING_NUMBER,
            event_type: String::new(),
            state: String::new(),
            prev_state: String::new(),
            event: String::new(),
            reason: String::new(),
            data: String::new(),
        }
    }
}

impl LogEntry {
    /// The entry's event type, if it belongs to the vocabulary.
    pub fn event_kind(&self) -> Option<EventType> {
        self.event_type.parse().ok()
    }

    /// The entry's state, if it belongs to the vocabulary.
    pub fn workflow_state(&self) -> Option<WorkflowState> {
        self.state.parse().ok()
    }
}

/// Returned when a string is not part of the workflow vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $Name:ident ($kind:literal) {
            $( $Variant:ident => $text:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $Name {
            $( $Variant, )*
        }

        impl $Name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$Name] = &[$( $Name::$Variant ),*];

            /// The name as it appears in logs.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $Name::$Variant => $text, )*
                }
            }
        }

        impl fmt::Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $Name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($Name::$Variant), )*
                    other => Err(UnknownName {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// Kind of a logged workflow event.
    EventType ("event type") {
        StateEntry => "STATE_ENTRY",
        StateExit => "STATE_EXIT",
        Transition => "TRANSITION",
        Error => "ERROR",
        UserAction => "USER_ACTION",
        Timeout => "TIMEOUT",
    }
}

vocabulary! {
    /// States of the workflow engine that produced the log.
    WorkflowState ("state") {
        Idle => "IDLE",
        Init => "INIT",
        Listening => "LISTENING",
        Analyzing => "ANALYZING",
        Ready => "READY",
        TxGated => "TX_GATED",
        Transmit => "TRANSMIT",
        Cleanup => "CLEANUP",
    }
}

/// Whether `name` is a member of the state vocabulary.
pub fn is_known_state(name: &str) -> bool {
    name.parse::<WorkflowState>().is_ok()
}
