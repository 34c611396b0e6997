use serde::{Deserialize, Serialize};
use std::fmt;

/// A recorded mood value. Unrecognized strings are carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    VeryBad,
    Bad,
    Neutral,
    Good,
    VeryGood,
    Other(String),
}

/// Display and scoring data for one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodMeta {
    pub label: &'static str,
    pub class: &'static str,
    pub score: u8,
}

const MOOD_TABLE: [(&str, MoodMeta); 5] = [
    ("very-bad", MoodMeta { label: "Very Bad 😞", class: "mood-negative", score: 1 }),
    ("bad", MoodMeta { label: "Bad 😕", class: "mood-negative", score: 2 }),
    ("neutral", MoodMeta { label: "Neutral 😐", class: "mood-neutral", score: 3 }),
    ("good", MoodMeta { label: "Good 🙂", class: "mood-positive", score: 4 }),
    ("very-good", MoodMeta { label: "Very Good 😄", class: "mood-positive", score: 5 }),
];

pub const NEUTRAL_SCORE: u8 = 3;

impl Mood {
    /// Known moods in capture order, worst to best.
    pub const KNOWN: [Mood; 5] = [
        Mood::VeryBad,
        Mood::Bad,
        Mood::Neutral,
        Mood::Good,
        Mood::VeryGood,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Mood::VeryBad => "very-bad",
            Mood::Bad => "bad",
            Mood::Neutral => "neutral",
            Mood::Good => "good",
            Mood::VeryGood => "very-good",
            Mood::Other(raw) => raw,
        }
    }

    pub fn meta(&self) -> Option<MoodMeta> {
        MOOD_TABLE
            .iter()
            .find(|(key, _)| *key == self.as_str())
            .map(|(_, meta)| *meta)
    }

    /// Label shown on history cards; unknown moods show their raw value.
    pub fn label(&self) -> &str {
        match self.meta() {
            Some(meta) => meta.label,
            None => self.as_str(),
        }
    }

    pub fn class(&self) -> &'static str {
        self.meta().map(|meta| meta.class).unwrap_or("")
    }

    pub fn score(&self) -> u8 {
        self.meta().map(|meta| meta.score).unwrap_or(NEUTRAL_SCORE)
    }
}

impl From<String> for Mood {
    fn from(value: String) -> Self {
        match value.as_str() {
            "very-bad" => Mood::VeryBad,
            "bad" => Mood::Bad,
            "neutral" => Mood::Neutral,
            "good" => Mood::Good,
            "very-good" => Mood::VeryGood,
            _ => Mood::Other(value),
        }
    }
}

impl From<&str> for Mood {
    fn from(value: &str) -> Self {
        Mood::from(value.to_string())
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        match mood {
            Mood::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub mood: Mood,
    #[serde(default)]
    pub note: String,
    pub date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Lavender,
}

impl Theme {
    pub const LAVENDER: &'static str = "lavender";
    pub const DEFAULT: &'static str = "default";

    /// Anything other than `lavender` behaves as the default theme.
    pub fn from_value(value: &str) -> Self {
        if value == Self::LAVENDER {
            Theme::Lavender
        } else {
            Theme::Default
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Default => Self::DEFAULT,
            Theme::Lavender => Self::LAVENDER,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Default => Theme::Lavender,
            Theme::Lavender => Theme::Default,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SaveMoodRequest {
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectMoodForm {
    pub mood: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteForm {
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    pub mood: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InsightQuery {
    pub width: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: String,
}
