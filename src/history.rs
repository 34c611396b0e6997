use crate::models::{Mood, MoodEntry};
use crate::storage::MoodStorage;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MoodFilter {
    #[default]
    All,
    Only(Mood),
}

impl MoodFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => MoodFilter::All,
            Some(mood) => MoodFilter::Only(Mood::from(mood)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            MoodFilter::All => ALL,
            MoodFilter::Only(mood) => mood.as_str(),
        }
    }

    fn matches(&self, entry: &MoodEntry) -> bool {
        match self {
            MoodFilter::All => true,
            MoodFilter::Only(mood) => entry.mood == *mood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeFilter {
    #[default]
    All,
    LastDays(u32),
}

impl RangeFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some(ALL) => RangeFilter::All,
            Some(raw) => match raw.parse::<u32>() {
                Ok(days) => RangeFilter::LastDays(days),
                Err(err) => {
                    debug!("ignoring range filter {raw:?}: {err}");
                    RangeFilter::All
                }
            },
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            RangeFilter::All => ALL.to_string(),
            RangeFilter::LastDays(days) => days.to_string(),
        }
    }

    /// Earliest instant still inside the range. A range reaching past the
    /// representable calendar has no cutoff.
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            RangeFilter::All => None,
            RangeFilter::LastDays(days) => {
                Duration::try_days(i64::from(*days)).and_then(|span| now.checked_sub_signed(span))
            }
        }
    }
}

/// Entries matching both filters, in their original order.
pub fn filter_entries(
    entries: &[MoodEntry],
    mood: &MoodFilter,
    range: RangeFilter,
    now: DateTime<Utc>,
) -> Vec<MoodEntry> {
    let cutoff = range.cutoff(now);
    entries
        .iter()
        .filter(|entry| mood.matches(entry))
        .filter(|entry| match cutoff {
            None => true,
            Some(cutoff) => parse_date(&entry.date).is_some_and(|date| date >= cutoff),
        })
        .cloned()
        .collect()
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

/// Long-form date such as "October 18, 2026" in the local time zone.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

pub fn format_date_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match parse_date(raw) {
        Some(date) => date.with_timezone(tz).format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryCard {
    pub mood: String,
    pub label: String,
    pub class: &'static str,
    pub date: String,
    pub display_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl HistoryCard {
    pub fn from_entry(entry: &MoodEntry) -> Self {
        Self {
            mood: entry.mood.as_str().to_string(),
            label: entry.mood.label().to_string(),
            class: entry.mood.class(),
            date: entry.date.clone(),
            display_date: format_date(&entry.date),
            note: (!entry.note.is_empty()).then(|| entry.note.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRender {
    Empty,
    Cards(Vec<HistoryCard>),
}

pub fn render(entries: &[MoodEntry]) -> HistoryRender {
    if entries.is_empty() {
        return HistoryRender::Empty;
    }
    HistoryRender::Cards(entries.iter().map(HistoryCard::from_entry).collect())
}

/// Optional controls present on the history page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryAffordances {
    pub list: bool,
    pub empty_state: bool,
    pub range_filter: bool,
    pub mood_filter: bool,
}

impl Default for HistoryAffordances {
    fn default() -> Self {
        Self {
            list: true,
            empty_state: true,
            range_filter: true,
            mood_filter: true,
        }
    }
}

/// One history page view over a snapshot read once from storage.
#[derive(Debug, Clone)]
pub struct HistoryView {
    affordances: HistoryAffordances,
    snapshot: Vec<MoodEntry>,
    mood: MoodFilter,
    range: RangeFilter,
    visible: Vec<MoodEntry>,
}

impl HistoryView {
    pub fn load<S: MoodStorage + ?Sized>(storage: &S, affordances: HistoryAffordances) -> Self {
        let snapshot = storage.load();
        debug!(entries = snapshot.len(), "history snapshot loaded");
        Self {
            affordances,
            visible: snapshot.clone(),
            snapshot,
            mood: MoodFilter::All,
            range: RangeFilter::All,
        }
    }

    pub fn affordances(&self) -> HistoryAffordances {
        self.affordances
    }

    pub fn mood_filter(&self) -> &MoodFilter {
        &self.mood
    }

    pub fn range_filter(&self) -> RangeFilter {
        self.range
    }

    pub fn snapshot(&self) -> &[MoodEntry] {
        &self.snapshot
    }

    pub fn visible(&self) -> &[MoodEntry] {
        &self.visible
    }

    /// Recomputes the visible entries from the snapshot. Filters whose control
    /// is absent from the page stay at "all".
    pub fn apply_filters(&mut self, mood: MoodFilter, range: RangeFilter, now: DateTime<Utc>) {
        self.mood = if self.affordances.mood_filter { mood } else { MoodFilter::All };
        self.range = if self.affordances.range_filter { range } else { RangeFilter::All };
        self.visible = filter_entries(&self.snapshot, &self.mood, self.range, now);
    }

    /// `None` when the page has no list to render into.
    pub fn render(&self) -> Option<HistoryRender> {
        self.affordances.list.then(|| render(&self.visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use chrono::SecondsFormat;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T12:00:00.000Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn entry(id: i64, mood: &str, days_ago: i64, note: &str) -> MoodEntry {
        MoodEntry {
            id,
            mood: Mood::from(mood),
            note: note.to_string(),
            date: (now() - Duration::days(days_ago)).to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn sample() -> Vec<MoodEntry> {
        vec![
            entry(6, "good", 0, "today"),
            entry(5, "bad", 2, ""),
            entry(4, "good", 7, "a week ago"),
            entry(3, "neutral", 8, ""),
            entry(2, "good", 30, "last month"),
            entry(1, "very-bad", 40, ""),
        ]
    }

    fn ids(entries: &[MoodEntry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn mood_filter_keeps_matching_in_order() {
        let filtered = filter_entries(&sample(), &MoodFilter::parse(Some("good")), RangeFilter::All, now());
        assert_eq!(ids(&filtered), vec![6, 4, 2]);
    }

    #[test]
    fn range_filter_is_inclusive_of_now_and_cutoff() {
        let filtered = filter_entries(&sample(), &MoodFilter::All, RangeFilter::parse(Some("7")), now());
        assert_eq!(ids(&filtered), vec![6, 5, 4]);
    }

    #[test]
    fn huge_range_keeps_every_entry() {
        let entries = vec![entry(1, "good", 0, "now"), entry(2, "bad", 40, "")];
        let filtered = filter_entries(&entries, &MoodFilter::All, RangeFilter::parse(Some("100000000")), now());
        assert_eq!(ids(&filtered), vec![1, 2]);

        let filtered = filter_entries(&entries, &MoodFilter::All, RangeFilter::LastDays(u32::MAX), now());
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn filters_compose_by_conjunction() {
        let filtered = filter_entries(
            &sample(),
            &MoodFilter::Only(Mood::Good),
            RangeFilter::LastDays(30),
            now(),
        );
        assert_eq!(ids(&filtered), vec![6, 4, 2]);

        let filtered = filter_entries(&sample(), &MoodFilter::Only(Mood::Bad), RangeFilter::LastDays(1), now());
        assert!(filtered.is_empty());
    }

    #[test]
    fn unparseable_dates_fall_outside_ranges() {
        let mut entries = sample();
        entries[0].date = "yesterday-ish".to_string();
        let filtered = filter_entries(&entries, &MoodFilter::All, RangeFilter::LastDays(7), now());
        assert_eq!(ids(&filtered), vec![5, 4]);

        let unfiltered = filter_entries(&entries, &MoodFilter::All, RangeFilter::All, now());
        assert_eq!(unfiltered.len(), entries.len());
    }

    #[test]
    fn filter_values_parse_leniently() {
        assert_eq!(RangeFilter::parse(Some("all")), RangeFilter::All);
        assert_eq!(RangeFilter::parse(Some("soon")), RangeFilter::All);
        assert_eq!(RangeFilter::parse(Some("30")), RangeFilter::LastDays(30));
        assert_eq!(MoodFilter::parse(None), MoodFilter::All);
        assert_eq!(MoodFilter::parse(Some("odd")), MoodFilter::Only(Mood::from("odd")));
    }

    #[test]
    fn view_refilters_from_original_snapshot() {
        let mut storage = LocalStorage::default();
        for entry in sample().into_iter().rev() {
            storage.append(entry);
        }
        let mut view = HistoryView::load(&storage, HistoryAffordances::default());

        view.apply_filters(MoodFilter::Only(Mood::Bad), RangeFilter::All, now());
        assert_eq!(ids(view.visible()), vec![5]);

        view.apply_filters(MoodFilter::Only(Mood::Good), RangeFilter::All, now());
        assert_eq!(ids(view.visible()), vec![6, 4, 2]);

        view.apply_filters(MoodFilter::All, RangeFilter::All, now());
        assert_eq!(view.visible(), view.snapshot());
    }

    #[test]
    fn absent_controls_leave_filters_at_all() {
        let storage = LocalStorage::default();
        let mut view = HistoryView::load(
            &storage,
            HistoryAffordances {
                mood_filter: false,
                ..HistoryAffordances::default()
            },
        );
        view.apply_filters(MoodFilter::Only(Mood::Good), RangeFilter::LastDays(7), now());
        assert_eq!(view.mood_filter(), &MoodFilter::All);
        assert_eq!(view.range_filter(), RangeFilter::LastDays(7));
    }

    #[test]
    fn render_empty_and_cards() {
        assert_eq!(render(&[]), HistoryRender::Empty);

        let entries = vec![entry(2, "very-good", 0, "Great day"), entry(1, "sleepy", 1, "")];
        let HistoryRender::Cards(cards) = render(&entries) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].label, "Very Good 😄");
        assert_eq!(cards[0].class, "mood-positive");
        assert_eq!(cards[0].note.as_deref(), Some("Great day"));
        assert_eq!(cards[1].label, "sleepy");
        assert_eq!(cards[1].class, "");
        assert_eq!(cards[1].note, None);
    }

    #[test]
    fn view_without_list_renders_nothing() {
        let storage = LocalStorage::default();
        let view = HistoryView::load(
            &storage,
            HistoryAffordances {
                list: false,
                ..HistoryAffordances::default()
            },
        );
        assert_eq!(view.render(), None);
    }

    #[test]
    fn dates_format_long_form() {
        assert_eq!(format_date_in("2026-10-18T12:00:00.000Z", &Utc), "October 18, 2026");
        assert_eq!(format_date_in("2026-03-05T23:30:00Z", &Utc), "March 5, 2026");
        assert_eq!(format_date_in("not a date", &Utc), "not a date");
    }
}
