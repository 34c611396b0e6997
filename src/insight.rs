use crate::models::{Mood, MoodEntry};
use crate::storage::MoodStorage;
use serde::Serialize;
use std::collections::HashMap;
use tracing::info;

pub const CHART_HEIGHT: f64 = 220.0;
pub const CHART_PADDING: f64 = 20.0;
pub const CHART_POINTS: usize = 7;

/// Most frequent mood. Among tied moods the one first observed last wins.
pub fn dominant_mood(entries: &[MoodEntry]) -> Option<Mood> {
    let mut order: Vec<&Mood> = Vec::new();
    let mut counts: HashMap<&Mood, usize> = HashMap::new();
    for entry in entries {
        let count = counts.entry(&entry.mood).or_insert(0);
        if *count == 0 {
            order.push(&entry.mood);
        }
        *count += 1;
    }

    let mut best: Option<(&Mood, usize)> = None;
    for mood in order {
        let count = counts[mood];
        match best {
            Some((_, top)) if top > count => {}
            _ => best = Some((mood, count)),
        }
    }
    best.map(|(mood, _)| mood.clone())
}

/// Scores of the most recent entries, oldest first.
pub fn chart_scores(entries: &[MoodEntry]) -> Vec<u8> {
    entries
        .iter()
        .take(CHART_POINTS)
        .rev()
        .map(|entry| entry.mood.score())
        .collect()
}

/// Drawable region the chart is laid out on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSurface {
    pub width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPlot {
    pub width: f64,
    pub height: f64,
    pub points: Vec<ChartPoint>,
    /// False for a single point, which is drawn alone.
    pub line: bool,
}

pub fn plot_chart(entries: &[MoodEntry], surface: Option<ChartSurface>) -> Option<ChartPlot> {
    let surface = surface?;
    let scores = chart_scores(entries);
    if scores.is_empty() {
        return None;
    }

    let width = surface.width;
    let height = CHART_HEIGHT;
    let step_y = (height - CHART_PADDING * 2.0) / 4.0;
    let y_for = |score: u8| height - CHART_PADDING - f64::from(score.saturating_sub(1)) * step_y;

    let points: Vec<ChartPoint> = if scores.len() == 1 {
        vec![ChartPoint {
            x: width / 2.0,
            y: y_for(scores[0]),
            score: scores[0],
        }]
    } else {
        let step_x = (width - CHART_PADDING * 2.0) / (scores.len() - 1) as f64;
        scores
            .iter()
            .enumerate()
            .map(|(i, &score)| ChartPoint {
                x: CHART_PADDING + i as f64 * step_x,
                y: y_for(score),
                score,
            })
            .collect()
    };

    Some(ChartPlot {
        width,
        height,
        line: points.len() > 1,
        points,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightSummary {
    pub total: usize,
    pub dominant: Option<Mood>,
    pub average_score: Option<f64>,
}

pub fn summarize(entries: &[MoodEntry]) -> InsightSummary {
    let average_score = (!entries.is_empty()).then(|| {
        let sum: u32 = entries.iter().map(|entry| u32::from(entry.mood.score())).sum();
        f64::from(sum) / entries.len() as f64
    });
    InsightSummary {
        total: entries.len(),
        dominant: dominant_mood(entries),
        average_score,
    }
}

/// One insight page view: summary plus chart for the stored entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightView {
    pub summary: InsightSummary,
    pub chart: Option<ChartPlot>,
}

impl InsightView {
    pub fn load<S: MoodStorage + ?Sized>(storage: &S, surface: Option<ChartSurface>) -> Self {
        let entries = storage.load();
        let summary = summarize(&entries);
        if let Some(dominant) = &summary.dominant {
            info!(dominant = %dominant, entries = summary.total, "insight computed");
        }
        Self {
            chart: plot_chart(&entries, surface),
            summary,
        }
    }
}
