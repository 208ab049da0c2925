pub mod api_client;
pub mod event_form;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError, ImageFile, MediaHostClient};
pub use event_form::{
    DraftChange, EventDraft, FormError, FormState, Redirect, StatusMessage,
    Tone, UploadTicket,
};

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Route the form navigates to after an event has been created.
pub const ADMIN_DASHBOARD_PATH: &str = "/admin-dashboard";

/// Identifier assigned by the server when an event is created. The form
/// never chooses one itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EventId(pub i64);

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum EventCategory {
    Disaster,
    Health,
    Food,
    Education,
    Other,
}

impl EventCategory {
    pub const ALL: [Self; 5] = [
        Self::Disaster,
        Self::Health,
        Self::Food,
        Self::Education,
        Self::Other,
    ];
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Self; 4] =
        [Self::Low, Self::Moderate, Self::High, Self::Critical];
}

/// How quickly aid is needed. Distinct from [`Severity`], which describes
/// the scale of the event itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize,
)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Immediate,
}

impl UrgencyLevel {
    pub const ALL: [Self; 4] =
        [Self::Low, Self::Medium, Self::High, Self::Immediate];
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized {kind}: {value:?}")]
pub struct ParseOptionError {
    kind: &'static str,
    value: String,
}

/// Implements `FromStr` by matching against the `Display` of each variant,
/// which is also what serde uses on the wire.
macro_rules! parse_from_display {
    ($ty:ty, $kind:literal) => {
        impl std::str::FromStr for $ty {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .into_iter()
                    .find(|variant| variant.to_string() == s)
                    .ok_or_else(|| ParseOptionError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

parse_from_display!(EventCategory, "category");
parse_from_display!(Severity, "severity");
parse_from_display!(UrgencyLevel, "urgency level");
