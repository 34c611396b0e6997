use crate::models::{Mood, MoodEntry};
use crate::storage::MoodStorage;
use chrono::{DateTime, SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, info};

pub const SAVED_MESSAGE: &str = "Your mood has been saved successfully.";
pub const NO_MOOD_MESSAGE: &str = "Please select a mood before saving.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Please select a mood before saving.")]
    NoMoodSelected,
}

/// Optional controls present on the capture page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureAffordances {
    pub note_input: bool,
    pub feedback: bool,
}

impl Default for CaptureAffordances {
    fn default() -> Self {
        Self {
            note_input: true,
            feedback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTone {
    Success,
    Error,
}

impl FeedbackTone {
    pub fn class(self) -> &'static str {
        match self {
            FeedbackTone::Success => "mood-positive",
            FeedbackTone::Error => "mood-negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub tone: FeedbackTone,
}

/// In-memory state of one capture page view.
#[derive(Debug, Clone, Default)]
pub struct MoodCapture {
    affordances: CaptureAffordances,
    selected: Option<Mood>,
    note: String,
    feedback: Option<Feedback>,
}

impl MoodCapture {
    pub fn new(affordances: CaptureAffordances) -> Self {
        Self {
            affordances,
            ..Self::default()
        }
    }

    pub fn affordances(&self) -> CaptureAffordances {
        self.affordances
    }

    pub fn selected(&self) -> Option<&Mood> {
        self.selected.as_ref()
    }

    pub fn is_active(&self, mood: &Mood) -> bool {
        self.selected.as_ref() == Some(mood)
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn select_mood(&mut self, mood: Mood) {
        debug!(mood = %mood, "mood selected");
        self.selected = Some(mood);
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        if self.affordances.note_input {
            self.note = note.into();
        }
    }

    pub fn save<S: MoodStorage + ?Sized>(
        &mut self,
        storage: &mut S,
        now: DateTime<Utc>,
    ) -> Result<MoodEntry, CaptureError> {
        let Some(mood) = self.selected.take() else {
            self.show_feedback(NO_MOOD_MESSAGE, FeedbackTone::Error);
            return Err(CaptureError::NoMoodSelected);
        };

        let note = if self.affordances.note_input {
            self.note.trim().to_string()
        } else {
            String::new()
        };

        let entry = MoodEntry {
            id: now.timestamp_millis(),
            mood,
            note,
            date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        storage.append(entry.clone());
        info!(id = entry.id, mood = %entry.mood, "mood saved");

        self.note.clear();
        self.show_feedback(SAVED_MESSAGE, FeedbackTone::Success);
        Ok(entry)
    }

    fn show_feedback(&mut self, message: &str, tone: FeedbackTone) {
        if !self.affordances.feedback {
            return;
        }
        self.feedback = Some(Feedback {
            message: message.to_string(),
            tone,
        });
    }
}
