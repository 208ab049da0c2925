//! The Add New Event form, independent of how it is rendered.
//!
//! [`EventDraft`] holds what the user has typed so far. [`FormState`] wraps
//! it with the status of the two network round-trips the form makes (the
//! cover image upload and the event submission) and the message shown to
//! the user. The UI owns the network calls and timers; this module decides
//! what each outcome does to the form.

use jiff::civil::Date;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::{str::FromStr, time::Duration};

use crate::{
    ADMIN_DASHBOARD_PATH, ClientError, EventCategory, Severity, UrgencyLevel,
    requests::{Amount, Count, CreateEvent},
};

/// How long the success message stays visible before leaving the form.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1200);

pub const UPLOADING_MESSAGE: &str = "Uploading image...";
pub const UPLOADED_MESSAGE: &str = "Image uploaded successfully!";
pub const EVENT_ADDED_MESSAGE: &str = "Event added successfully! Redirecting...";

/// Everything entered into the form so far.
///
/// Numeric inputs are kept as the raw text from the input element and are
/// only interpreted by [`EventDraft::to_submission`], so that whatever the
/// user typed is shown back to them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: Option<EventCategory>,
    pub is_ongoing: bool,
    pub estimated_affected_people: String,
    pub severity: Option<Severity>,
    pub location: String,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub urgency_level: Option<UrgencyLevel>,
    pub funding_goal: String,
    pub current_funding: String,
    /// Only ever a URL returned by the media host.
    cover_image: String,
}

/// A single edit to one field of an [`EventDraft`].
///
/// The cover image has no variant; it is only set by
/// [`FormState::finish_upload`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftChange {
    Title(String),
    Description(String),
    Category(Option<EventCategory>),
    IsOngoing(bool),
    EstimatedAffectedPeople(String),
    Severity(Option<Severity>),
    Location(String),
    StartDate(Option<Date>),
    EndDate(Option<Date>),
    UrgencyLevel(Option<UrgencyLevel>),
    FundingGoal(String),
    CurrentFunding(String),
}

impl DraftChange {
    /// Build a change from a form control's `name` attribute and its value.
    ///
    /// `checked` is only read for the `isOngoing` checkbox. Select and date
    /// values that don't parse (including the empty placeholder option)
    /// clear the field. Returns `None` for names the form doesn't have.
    pub fn from_input(name: &str, value: &str, checked: bool) -> Option<Self> {
        let change = match name {
            "title" => Self::Title(value.to_string()),
            "description" => Self::Description(value.to_string()),
            "category" => Self::Category(value.parse().ok()),
            "isOngoing" => Self::IsOngoing(checked),
            "estimatedAffectedPeople" => {
                Self::EstimatedAffectedPeople(value.to_string())
            }
            "severity" => Self::Severity(value.parse().ok()),
            "location" => Self::Location(value.to_string()),
            "startDate" => Self::StartDate(value.parse().ok()),
            "endDate" => Self::EndDate(value.parse().ok()),
            "urgencyLevel" => Self::UrgencyLevel(value.parse().ok()),
            "fundingGoal" => Self::FundingGoal(value.to_string()),
            "currentFunding" => Self::CurrentFunding(value.to_string()),
            _ => return None,
        };
        Some(change)
    }
}

impl EventDraft {
    pub fn cover_image(&self) -> &str {
        &self.cover_image
    }

    /// Return the draft with one field replaced.
    pub fn apply(mut self, change: DraftChange) -> Self {
        match change {
            DraftChange::Title(v) => self.title = v,
            DraftChange::Description(v) => self.description = v,
            DraftChange::Category(v) => self.category = v,
            DraftChange::IsOngoing(v) => self.is_ongoing = v,
            DraftChange::EstimatedAffectedPeople(v) => {
                self.estimated_affected_people = v
            }
            DraftChange::Severity(v) => self.severity = v,
            DraftChange::Location(v) => self.location = v,
            DraftChange::StartDate(v) => self.start_date = v,
            DraftChange::EndDate(v) => self.end_date = v,
            DraftChange::UrgencyLevel(v) => self.urgency_level = v,
            DraftChange::FundingGoal(v) => self.funding_goal = v,
            DraftChange::CurrentFunding(v) => self.current_funding = v,
        }
        self
    }

    /// Normalize the draft into the record the creation endpoint expects.
    ///
    /// Numeric text that is empty, not a number or not finite becomes
    /// `None`. The affected-people count must be a whole number.
    pub fn to_submission(&self) -> CreateEvent {
        CreateEvent {
            id: None,
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            is_ongoing: self.is_ongoing,
            estimated_affected_people: parse_count(
                &self.estimated_affected_people,
            ),
            severity: self.severity,
            location: self.location.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            cover_image: self.cover_image.clone(),
            urgency_level: self.urgency_level,
            funding_goal: parse_amount(&self.funding_goal),
            current_funding: parse_amount(&self.current_funding),
        }
    }
}

/// Parse a number typed into a numeric input. Accepts plain decimals and
/// scientific notation; surrounding whitespace is ignored. Numbers too
/// large for `Decimal` fall back to `f64`, as long as they are finite.
fn parse_amount(raw: &str) -> Option<Amount> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(exact) =
        Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw))
    {
        return Some(Amount::Exact(exact));
    }
    raw.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Amount::Approximate)
}

fn parse_count(raw: &str) -> Option<Count> {
    match parse_amount(raw)? {
        Amount::Exact(n) if n.fract().is_zero() => match n.to_i64() {
            Some(n) => Some(Count::Exact(n)),
            None => raw.trim().parse().ok().map(Count::Approximate),
        },
        Amount::Approximate(n) if n.fract() == 0.0 => {
            Some(Count::Approximate(n))
        }
        _ => None,
    }
}

/// Why an upload or submission attempt did not go through. Every variant
/// is shown inline and the user may simply try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Failed to upload image")]
    UploadRejected,
    #[error("Failed to upload image")]
    UploadTransportFailure,
    #[error("Failed to add event")]
    SubmissionRejected,
    #[error("Network error")]
    SubmissionTransportFailure,
    #[error("Please wait for the image to finish uploading.")]
    PrematureSubmit,
    #[error("Event is already being submitted.")]
    SubmissionInFlight,
}

impl FormError {
    fn from_upload(error: &ClientError) -> Self {
        match error {
            ClientError::Network(_) | ClientError::FileRead(_) => {
                Self::UploadTransportFailure
            }
            ClientError::APIError(..) | ClientError::MissingSecureUrl(_) => {
                Self::UploadRejected
            }
        }
    }

    fn from_submission(error: &ClientError) -> Self {
        match error {
            ClientError::Network(_) | ClientError::FileRead(_) => {
                Self::SubmissionTransportFailure
            }
            ClientError::APIError(..) | ClientError::MissingSecureUrl(_) => {
                Self::SubmissionRejected
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Error,
}

/// The status line under the form heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub tone: Tone,
}

impl StatusMessage {
    fn info(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Info,
        }
    }

    fn success(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tone: Tone::Success,
        }
    }
}

impl From<FormError> for StatusMessage {
    fn from(error: FormError) -> Self {
        Self {
            text: error.to_string(),
            tone: Tone::Error,
        }
    }
}

/// Identifies one upload attempt. Only the most recently issued ticket can
/// complete an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadTicket(u64);

/// A navigation to perform once `delay` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub path: &'static str,
    pub delay: Duration,
    /// Replace the current history entry so "back" does not return to the
    /// submitted form.
    pub replace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    draft: EventDraft,
    uploading: bool,
    submitting: bool,
    message: Option<StatusMessage>,
    upload_generation: u64,
}

impl FormState {
    pub fn draft(&self) -> &EventDraft {
        &self.draft
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn change(&mut self, change: DraftChange) {
        self.draft = std::mem::take(&mut self.draft).apply(change);
    }

    /// Record that a file was picked and its upload is about to be sent.
    ///
    /// Any upload still in flight is superseded: its result will be
    /// discarded when it arrives.
    pub fn start_upload(&mut self) -> UploadTicket {
        self.upload_generation += 1;
        self.uploading = true;
        self.message = Some(StatusMessage::info(UPLOADING_MESSAGE));
        UploadTicket(self.upload_generation)
    }

    /// Apply the outcome of an upload. Returns `false` if the ticket was
    /// superseded, in which case nothing changes.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<String, ClientError>,
    ) -> bool {
        if ticket.0 != self.upload_generation {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.upload_generation,
                "Discarding result of superseded upload"
            );
            return false;
        }

        self.uploading = false;
        self.message = Some(match result {
            Ok(url) => {
                tracing::info!(%url, "Cover image uploaded");
                self.draft.cover_image = url;
                StatusMessage::success(UPLOADED_MESSAGE)
            }
            Err(e) => {
                tracing::warn!("Cover image upload failed: {e}");
                FormError::from_upload(&e).into()
            }
        });
        true
    }

    /// Start a submission, returning the record to send.
    ///
    /// Refused while an upload or another submission is outstanding; the
    /// refusal is also shown as the status message.
    pub fn begin_submit(&mut self) -> Result<CreateEvent, FormError> {
        let blocked = if self.uploading {
            Some(FormError::PrematureSubmit)
        } else if self.submitting {
            Some(FormError::SubmissionInFlight)
        } else {
            None
        };
        if let Some(error) = blocked {
            self.message = Some(error.into());
            return Err(error);
        }

        self.submitting = true;
        let record = self.draft.to_submission();
        tracing::debug!(?record, "Submitting event payload");
        Ok(record)
    }

    /// Apply the outcome of a submission, returning the navigation to
    /// schedule if the event was created.
    pub fn finish_submit(
        &mut self,
        result: Result<(), ClientError>,
    ) -> Option<Redirect> {
        self.submitting = false;
        match result {
            Ok(()) => {
                tracing::info!("Event created");
                self.message = Some(StatusMessage::success(EVENT_ADDED_MESSAGE));
                Some(Redirect {
                    path: ADMIN_DASHBOARD_PATH,
                    delay: REDIRECT_DELAY,
                    replace: true,
                })
            }
            Err(e) => {
                tracing::warn!("Event creation failed: {e}");
                self.message = Some(FormError::from_submission(&e).into());
                None
            }
        }
    }
}
