use crate::capture::MoodCapture;
use crate::history::{HistoryRender, HistoryView};
use crate::insight::{ChartPlot, InsightView};
use crate::models::{Mood, Theme};
use crate::theme::ThemeSwitcher;

const RANGE_OPTIONS: [(&str, &str); 4] = [
    ("all", "All time"),
    ("7", "Last 7 days"),
    ("30", "Last 30 days"),
    ("90", "Last 90 days"),
];

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_page(title: &str, path: &str, theme: &ThemeSwitcher, body: &str) -> String {
    let nav = [("/", "Check in"), ("/history", "History"), ("/insight", "Insight"), ("/settings", "Settings")]
        .iter()
        .map(|(href, label)| {
            let active = if *href == path { r#" class="active""# } else { "" };
            format!(r#"<a href="{href}"{active}>{label}</a>"#)
        })
        .collect::<String>();

    let toggle = if theme.affordances().toggle {
        format!(
            r#"<form method="post" action="/theme/toggle" class="inline">
        <input type="hidden" name="next" value="{path}" />
        <button type="submit" id="themeToggle" class="ghost">Theme</button>
      </form>"#
        )
    } else {
        String::new()
    };

    LAYOUT_HTML
        .replace("{{THEME_ATTRS}}", &theme.root_attributes())
        .replace("{{TITLE}}", title)
        .replace("{{NAV}}", &nav)
        .replace("{{TOGGLE}}", &toggle)
        .replace("{{BODY}}", body)
}

pub fn render_capture(capture: &MoodCapture, theme: &ThemeSwitcher) -> String {
    let options = Mood::KNOWN
        .iter()
        .map(|mood| {
            let active = if capture.is_active(mood) { " active" } else { "" };
            format!(
                r#"<button type="submit" name="mood" value="{value}" class="mood-option {class}{active}" data-mood="{value}">{label}</button>"#,
                value = mood.as_str(),
                class = mood.class(),
                label = mood.label(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    let affordances = capture.affordances();
    let note = if affordances.note_input {
        format!(
            r#"<label for="moodNote">Note (optional)</label>
        <textarea id="moodNote" name="note" rows="3">{}</textarea>"#,
            escape_html(capture.note())
        )
    } else {
        String::new()
    };

    let feedback = match (affordances.feedback, capture.feedback()) {
        (true, Some(feedback)) => format!(
            r#"<p id="moodFeedback" class="mood-feedback {}">{}</p>"#,
            feedback.tone.class(),
            escape_html(&feedback.message)
        ),
        (true, None) => r#"<p id="moodFeedback" class="mood-feedback"></p>"#.to_string(),
        (false, _) => String::new(),
    };

    let body = CAPTURE_HTML
        .replace("{{OPTIONS}}", &options)
        .replace("{{NOTE}}", &note)
        .replace("{{FEEDBACK}}", &feedback);
    render_page("How are you feeling?", "/", theme, &body)
}

pub fn render_history(view: &HistoryView, theme: &ThemeSwitcher) -> String {
    let affordances = view.affordances();

    let mut filters = String::new();
    if affordances.range_filter {
        let current = view.range_filter().as_string();
        filters.push_str(&select_html(
            "filterRange",
            "range",
            RANGE_OPTIONS.iter().map(|(value, label)| (value.to_string(), label.to_string())),
            &current,
        ));
    }
    if affordances.mood_filter {
        let mut moods = vec![("all".to_string(), "All moods".to_string())];
        moods.extend(
            Mood::KNOWN
                .iter()
                .map(|mood| (mood.as_str().to_string(), mood.label().to_string())),
        );
        filters.push_str(&select_html(
            "filterMood",
            "mood",
            moods.into_iter(),
            view.mood_filter().as_str(),
        ));
    }
    if !filters.is_empty() {
        filters = format!(
            r#"<form method="get" action="/history" class="history-filters">
        {filters}
        <button type="submit" class="ghost">Apply</button>
      </form>"#
        );
    }

    let list = match view.render() {
        None => String::new(),
        Some(HistoryRender::Empty) => {
            let empty = if affordances.empty_state {
                r#"<p class="history-empty">No moods recorded yet.</p>"#
            } else {
                ""
            };
            format!(r#"<div class="history-list"></div>{empty}"#)
        }
        Some(HistoryRender::Cards(cards)) => {
            let items = cards
                .iter()
                .map(|card| {
                    let note = card
                        .note
                        .as_deref()
                        .map(|note| format!(r#"<p class="history-note">{}</p>"#, escape_html(note)))
                        .unwrap_or_default();
                    format!(
                        r#"<article class="card history-item {class}">
          <header class="history-item-header">
            <h3>{label}</h3>
            <time datetime="{date}">{display}</time>
          </header>
          {note}
        </article>"#,
                        class = card.class,
                        label = escape_html(&card.label),
                        date = escape_html(&card.date),
                        display = escape_html(&card.display_date),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n        ");
            format!(r#"<div class="history-list">{items}</div>"#)
        }
    };

    let body = HISTORY_HTML
        .replace("{{FILTERS}}", &filters)
        .replace("{{LIST}}", &list);
    render_page("Mood history", "/history", theme, &body)
}

fn select_html(
    id: &str,
    name: &str,
    options: impl Iterator<Item = (String, String)>,
    current: &str,
) -> String {
    let options = options
        .map(|(value, label)| {
            let selected = if value == current { " selected" } else { "" };
            format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                escape_html(&value),
                escape_html(&label)
            )
        })
        .collect::<String>();
    format!(r#"<select id="{id}" name="{name}">{options}</select>"#)
}

pub fn render_chart_svg(plot: &ChartPlot) -> String {
    let mut svg = format!(
        r#"<svg id="moodChart" class="chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="Recent moods">"#,
        w = plot.width,
        h = plot.height
    );
    if plot.line {
        let path = plot
            .points
            .iter()
            .map(|point| format!("{:.2},{:.2}", point.x, point.y))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(r#"<polyline class="chart-line" points="{path}" />"#));
    }
    for point in &plot.points {
        svg.push_str(&format!(
            r#"<circle class="chart-point" cx="{:.2}" cy="{:.2}" r="4" />"#,
            point.x, point.y
        ));
    }
    svg.push_str("</svg>");
    svg
}

pub fn render_insight(view: &InsightView, theme: &ThemeSwitcher) -> String {
    let summary = &view.summary;
    let dominant = summary
        .dominant
        .as_ref()
        .map(|mood| escape_html(mood.label()))
        .unwrap_or_else(|| "--".to_string());
    let average = summary
        .average_score
        .map(|score| format!("{score:.1}"))
        .unwrap_or_else(|| "--".to_string());
    let chart = match &view.chart {
        Some(plot) => render_chart_svg(plot),
        None => r#"<p class="chart-empty">Save a mood to see your trend.</p>"#.to_string(),
    };

    let body = INSIGHT_HTML
        .replace("{{TOTAL}}", &summary.total.to_string())
        .replace("{{DOMINANT}}", &dominant)
        .replace("{{AVERAGE}}", &average)
        .replace("{{CHART}}", &chart);
    render_page("Insight", "/insight", theme, &body)
}

pub fn render_settings(theme: &ThemeSwitcher) -> String {
    let options = if theme.affordances().options {
        [Theme::Default, Theme::Lavender]
            .iter()
            .map(|option| {
                let active = if theme.current() == *option { " active" } else { "" };
                format!(
                    r#"<button type="submit" name="theme" value="{value}" class="theme-option{active}" data-theme-option="{value}">{value}</button>"#,
                    value = option.as_str()
                )
            })
            .collect::<Vec<_>>()
            .join("\n        ")
    } else {
        String::new()
    };

    let body = SETTINGS_HTML
        .replace("{{CURRENT}}", theme.current().as_str())
        .replace("{{OPTIONS}}", &options);
    render_page("Settings", "/settings", theme, &body)
}

const CAPTURE_HTML: &str = r#"<section class="card">
      <h1>How are you feeling?</h1>
      <form method="post" action="/mood/select" class="mood-options">
        {{OPTIONS}}
      </form>
      <form method="post" action="/mood/save" class="mood-save">
        {{NOTE}}
        <button type="submit" id="saveMood" class="primary">Save mood</button>
      </form>
      {{FEEDBACK}}
    </section>"#;

const HISTORY_HTML: &str = r#"<section class="card">
      <h1>Mood history</h1>
      {{FILTERS}}
    </section>
    {{LIST}}"#;

const INSIGHT_HTML: &str = r#"<section class="insight-cards">
      <div class="card insight-card">
        <span class="label">Entries</span>
        <span class="value">{{TOTAL}}</span>
      </div>
      <div class="card insight-card">
        <span class="label">Most frequent</span>
        <span class="value">{{DOMINANT}}</span>
      </div>
      <div class="card insight-card">
        <span class="label">Average score</span>
        <span class="value">{{AVERAGE}}</span>
      </div>
    </section>
    <section class="card">
      <h2>Last 7 entries</h2>
      {{CHART}}
    </section>"#;

const SETTINGS_HTML: &str = r#"<section class="card">
      <h1>Settings</h1>
      <p class="subtitle">Current theme: <strong>{{CURRENT}}</strong></p>
      <form method="post" action="/theme/select" class="theme-options">
        {{OPTIONS}}
      </form>
    </section>"#;

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en"{{THEME_ATTRS}}>
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} · Mood Tracker</title>
  <style>
    :root {
      --bg: #f6f4ef;
      --ink: #2b2a28;
      --muted: #77716a;
      --card: #ffffff;
      --accent: #3f7d6e;
      --positive: #3f7d6e;
      --neutral: #8b857d;
      --negative: #c0504d;
      --shadow: 0 16px 40px rgba(43, 42, 40, 0.12);
    }

    [data-theme="lavender"] {
      --bg: #f3effa;
      --ink: #2e2640;
      --muted: #7a6f90;
      --card: #fdfbff;
      --accent: #7b61c4;
      --shadow: 0 16px 40px rgba(123, 97, 196, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
    }

    nav {
      display: flex;
      gap: 16px;
      align-items: center;
      padding: 18px 24px;
    }

    nav a {
      color: var(--muted);
      text-decoration: none;
      font-weight: 600;
    }

    nav a.active {
      color: var(--accent);
    }

    nav .inline {
      margin-left: auto;
    }

    main {
      width: min(760px, 100%);
      margin: 0 auto;
      padding: 12px 18px 48px;
      display: grid;
      gap: 20px;
    }

    .card {
      background: var(--card);
      border-radius: 20px;
      box-shadow: var(--shadow);
      padding: 24px;
    }

    h1, h2, h3 {
      margin: 0 0 12px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 18px;
      font-weight: 600;
      cursor: pointer;
    }

    button.primary {
      background: var(--accent);
      color: white;
    }

    button.ghost {
      background: transparent;
      color: var(--accent);
      border: 1px solid var(--accent);
    }

    .mood-options, .theme-options {
      display: flex;
      flex-wrap: wrap;
      gap: 10px;
      margin-bottom: 16px;
    }

    .mood-option, .theme-option {
      background: var(--bg);
      color: var(--ink);
    }

    .mood-option.active, .theme-option.active {
      outline: 3px solid var(--accent);
    }

    textarea {
      display: block;
      width: 100%;
      margin: 8px 0 16px;
      border-radius: 12px;
      border: 1px solid var(--muted);
      padding: 10px;
      font: inherit;
    }

    .mood-positive { border-left: 6px solid var(--positive); }
    .mood-neutral { border-left: 6px solid var(--neutral); }
    .mood-negative { border-left: 6px solid var(--negative); }

    .mood-feedback {
      min-height: 1.2em;
      padding-left: 10px;
    }

    .history-filters {
      display: flex;
      gap: 10px;
      flex-wrap: wrap;
    }

    .history-list {
      display: grid;
      gap: 12px;
    }

    .history-item-header {
      display: flex;
      justify-content: space-between;
      align-items: baseline;
    }

    .history-item-header time, .history-empty, .subtitle, .label {
      color: var(--muted);
    }

    .insight-cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .insight-card span {
      display: block;
    }

    .insight-card .value {
      font-size: 1.5rem;
      font-weight: 600;
      color: var(--accent);
    }

    .chart {
      width: 100%;
      height: auto;
    }

    .chart-line {
      fill: none;
      stroke: #999;
      stroke-width: 2;
    }

    .chart-point {
      fill: #555;
    }
  </style>
</head>
<body>
  <nav>
    {{NAV}}
    {{TOGGLE}}
  </nav>
  <main>
    {{BODY}}
  </main>
</body>
</html>
"#;
