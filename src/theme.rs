use crate::models::Theme;
use crate::storage::{MoodStorage, THEME_KEY};
use tracing::info;

/// Optional theme controls present on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeAffordances {
    pub toggle: bool,
    pub options: bool,
}

impl Default for ThemeAffordances {
    fn default() -> Self {
        Self {
            toggle: true,
            options: true,
        }
    }
}

/// Holds the document-level theme marker. The marker, not storage, is the
/// source of truth for the theme currently shown.
#[derive(Debug, Clone, Default)]
pub struct ThemeSwitcher {
    affordances: ThemeAffordances,
    marker: Option<Theme>,
}

impl ThemeSwitcher {
    /// Applies the persisted preference, or the default when none is stored.
    pub fn init<S: MoodStorage + ?Sized>(storage: &S, affordances: ThemeAffordances) -> Self {
        let saved = storage
            .preference(THEME_KEY)
            .unwrap_or_else(|| Theme::DEFAULT.to_string());
        let mut switcher = Self {
            affordances,
            marker: None,
        };
        switcher.apply(Theme::from_value(&saved));
        switcher
    }

    pub fn affordances(&self) -> ThemeAffordances {
        self.affordances
    }

    pub fn apply(&mut self, theme: Theme) {
        self.marker = match theme {
            Theme::Lavender => Some(Theme::Lavender),
            Theme::Default => None,
        };
    }

    pub fn current(&self) -> Theme {
        self.marker.unwrap_or_default()
    }

    pub fn toggle<S: MoodStorage + ?Sized>(&mut self, storage: &mut S) -> Theme {
        let next = self.current().flipped();
        self.apply(next);
        storage.set_preference(THEME_KEY, next.as_str());
        info!(theme = next.as_str(), "theme toggled");
        next
    }

    /// Applies and persists a chosen value. The raw value is stored as given.
    pub fn select_explicit<S: MoodStorage + ?Sized>(&mut self, storage: &mut S, value: &str) -> Theme {
        let theme = Theme::from_value(value);
        self.apply(theme);
        storage.set_preference(THEME_KEY, value);
        info!(theme = value, "theme selected");
        theme
    }

    /// Attribute for the page root element; empty when no marker is set.
    pub fn root_attributes(&self) -> String {
        match self.marker {
            Some(theme) => format!(r#" data-theme="{}""#, theme.as_str()),
            None => String::new(),
        }
    }
}
