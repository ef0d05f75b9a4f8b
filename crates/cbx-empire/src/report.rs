//! # Reports
//!
//! Renderers over [`EmpireSnapshot`]. The HTML report is a single page with
//! one table per group and a state summary per section. A custom template
//! may place the generated parts with the placeholders `{{ project }}`,
//! `{{ generated_at }}` and `{{ sections }}`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use cbx_core::{ControlSnapshot, ControlState, EmpireSnapshot, SectionSnapshot, PLACEHOLDER};

use crate::error::{EmpireError, EmpireResult};

/// Built-in page layout.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ project }}</title>
<style>
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; width: 100%; margin-bottom: 1.5em; }
th, td { border: 1px solid #ccc; padding: 0.3em 0.5em; text-align: left; vertical-align: top; }
tr.item td { background: #eee; font-weight: bold; }
.checked { color: #2a7d2a; }
.not_relevant { color: #777; }
.unchecked { color: #b03030; }
</style>
</head>
<body>
<h1>{{ project }}</h1>
<p>Generated {{ generated_at }}</p>
{{ sections }}
</body>
</html>
"#;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    /// Single-page HTML.
    #[default]
    Html,
}

impl ReportType {
    /// All report types.
    pub fn all() -> &'static [ReportType] {
        &[Self::Html]
    }

    /// Command-line spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown report type {s:?}; expected: html"))
    }
}

/// Count of controls per state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateSummary {
    pub unchecked: usize,
    pub checked: usize,
    pub not_relevant: usize,
}

impl StateSummary {
    /// Tally a sequence of control snapshots by their state name.
    pub fn from_controls<'a>(controls: impl IntoIterator<Item = &'a ControlSnapshot>) -> Self {
        let mut summary = Self::default();
        for control in controls {
            match snapshot_state(control) {
                Some(ControlState::Checked) => summary.checked += 1,
                Some(ControlState::NotRelevant) => summary.not_relevant += 1,
                Some(ControlState::Unchecked) | None => summary.unchecked += 1,
            }
        }
        summary
    }

    /// Tally one section.
    pub fn from_section(section: &SectionSnapshot) -> Self {
        Self::from_controls(section.controls())
    }

    /// Tally a whole project.
    pub fn from_snapshot(snapshot: &EmpireSnapshot) -> Self {
        Self::from_controls(snapshot.controls())
    }

    /// Number of controls counted.
    pub fn total(&self) -> usize {
        self.unchecked + self.checked + self.not_relevant
    }

    /// Controls still needing a decision.
    pub fn open(&self) -> usize {
        self.unchecked
    }
}

fn snapshot_state(control: &ControlSnapshot) -> Option<ControlState> {
    ControlState::all()
        .iter()
        .copied()
        .find(|state| state.name() == control.state)
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
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

/// Render the HTML report. `template` replaces [`DEFAULT_TEMPLATE`].
pub fn render_html(
    project: &str,
    snapshot: &EmpireSnapshot,
    template: Option<&str>,
    generated_at: DateTime<Utc>,
) -> String {
    let sections: String = snapshot.sections.iter().map(render_section).collect();
    template
        .unwrap_or(DEFAULT_TEMPLATE)
        .replace("{{ project }}", &escape_html(project))
        .replace(
            "{{ generated_at }}",
            &generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        )
        .replace("{{ sections }}", &sections)
}

fn render_section(section: &SectionSnapshot) -> String {
    let summary = StateSummary::from_section(section);
    let mut out = format!(
        "<section>\n<h2>{} <small>({})</small></h2>\n<p>{}</p>\n",
        escape_html(&section.manual_name),
        escape_html(&section.manual_prefix),
        escape_html(&section.manual_description),
    );
    if section.data_name != PLACEHOLDER {
        out.push_str(&format!(
            "<p>Source: {} {}</p>\n",
            escape_html(&section.data_name),
            escape_html(&section.data_version),
        ));
    }
    out.push_str(&format!(
        "<p class=\"summary\">{} controls: {} checked, {} not relevant, {} open</p>\n",
        summary.total(),
        summary.checked,
        summary.not_relevant,
        summary.open(),
    ));
    for group in &section.groups {
        let heading = if group.name == PLACEHOLDER {
            section.manual_name.as_str()
        } else {
            group.name.as_str()
        };
        out.push_str(&format!("<h3>{}</h3>\n", escape_html(heading)));
        out.push_str(
            "<table>\n<tr><th>uid</th><th>State</th><th>Description</th>\
             <th>Statement</th><th>CWE</th><th>NIST</th></tr>\n",
        );
        for item in &group.items {
            if item.name != PLACEHOLDER {
                out.push_str(&format!(
                    "<tr class=\"item\"><td colspan=\"6\">{} {}</td></tr>\n",
                    escape_html(&item.shortcode),
                    escape_html(&item.name),
                ));
            }
            for control in &item.controls {
                out.push_str(&render_control(control));
            }
        }
        out.push_str("</table>\n");
    }
    out.push_str("</section>\n");
    out
}

fn render_control(control: &ControlSnapshot) -> String {
    let class = snapshot_state(control)
        .unwrap_or_default()
        .as_str();
    let cwe = control
        .cwe
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "<tr><td>{}</td><td class=\"{}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape_html(&control.uid),
        class,
        escape_html(&control.state),
        escape_html(&control.description),
        escape_html(control.statement.as_deref().unwrap_or("")),
        cwe,
        escape_html(&control.nist.join(", ")),
    )
}

/// Serialize the snapshot as TOML.
pub fn export_toml(snapshot: &EmpireSnapshot) -> EmpireResult<String> {
    toml::to_string(snapshot).map_err(|e| EmpireError::Serialize(e.to_string()))
}
