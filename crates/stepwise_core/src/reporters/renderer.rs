//! Report view rendering.
//!
//! # Responsibility
//! - Collect per-story report files from the output directory.
//! - Render an HTML index linking them, with statistics totals.
//!
//! # Invariants
//! - Rendering only reads report files and writes below `view/`.

use crate::reporters::builder::Format;
use crate::reporters::statistics::StoryStatistics;
use log::{error, info};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const DEFAULT_VIEW_DIRECTORY: &str = "view";
const INDEX_FILE: &str = "index.html";
const STATS_EXTENSION: &str = "stats";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Story Reports</title></head>
<body>
<h1>Story Reports</h1>
<table>
<thead><tr><th>Story</th><th>Scenarios</th><th>Failed</th><th>Steps</th><th>Pending</th><th>Reports</th></tr></thead>
<tbody>
{{rows}}
</tbody>
<tfoot>
{{totals}}
</tfoot>
</table>
</body>
</html>
"#;

/// View rendering errors.
#[derive(Debug)]
pub enum RenderError {
    MissingOutputDirectory(PathBuf),
    Io { path: PathBuf, source: io::Error },
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingOutputDirectory(path) => {
                write!(f, "report output directory does not exist: {}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "failed to render `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MissingOutputDirectory(_) => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Summary of one rendered view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub index: PathBuf,
    pub stories: usize,
    pub totals: StoryStatistics,
}

/// Converts accumulated story reports into a viewable document.
pub trait ReportRenderer: Debug + Send + Sync {
    fn render(
        &self,
        output_directory: &Path,
        formats: &[Format],
    ) -> Result<RenderedView, RenderError>;
}

/// Renderer filling `{{rows}}` and `{{totals}}` placeholders of an HTML template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReportRenderer {
    template: String,
    view_directory: String,
}

impl Default for TemplateReportRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl TemplateReportRenderer {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            view_directory: DEFAULT_VIEW_DIRECTORY.to_string(),
        }
    }

    /// Directory name, relative to the output directory, the view is written to.
    pub fn with_view_directory(mut self, view_directory: impl Into<String>) -> Self {
        self.view_directory = view_directory.into();
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

#[derive(Debug, Default)]
struct StoryEntry {
    reports: BTreeSet<String>,
    stats: Option<StoryStatistics>,
}

impl ReportRenderer for TemplateReportRenderer {
    fn render(
        &self,
        output_directory: &Path,
        formats: &[Format],
    ) -> Result<RenderedView, RenderError> {
        if !output_directory.is_dir() {
            error!(
                "event=view_render module=reporters status=error error_code=missing_output_dir path={}",
                output_directory.display()
            );
            return Err(RenderError::MissingOutputDirectory(output_directory.to_path_buf()));
        }

        let extensions: BTreeSet<&str> = formats.iter().filter_map(|f| f.extension()).collect();
        let entries = collect_entries(output_directory, &extensions)?;

        let mut totals = StoryStatistics::default();
        let mut rows = String::new();
        for (story, entry) in &entries {
            let stats = entry.stats.unwrap_or_default();
            totals.add(&stats);
            let links: Vec<String> = entry
                .reports
                .iter()
                .map(|file| {
                    let extension = Path::new(file)
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .unwrap_or_default();
                    format!(
                        "<a href=\"../{}\">{}</a>",
                        escape_html(file),
                        escape_html(extension)
                    )
                })
                .collect();
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(story),
                stats.scenarios,
                stats.scenarios_failed,
                stats.steps,
                stats.steps_pending,
                links.join(" ")
            ));
        }
        let totals_row = format!(
            "<tr><td>Totals: {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td></td></tr>",
            entries.len(),
            totals.scenarios,
            totals.scenarios_failed,
            totals.steps,
            totals.steps_pending
        );
        let html = self
            .template
            .replace("{{rows}}", rows.trim_end())
            .replace("{{totals}}", &totals_row);

        let view_directory = output_directory.join(&self.view_directory);
        std::fs::create_dir_all(&view_directory).map_err(|source| RenderError::Io {
            path: view_directory.clone(),
            source,
        })?;
        let index = view_directory.join(INDEX_FILE);
        std::fs::write(&index, html).map_err(|source| RenderError::Io {
            path: index.clone(),
            source,
        })?;

        info!(
            "event=view_render module=reporters status=ok stories={} index={}",
            entries.len(),
            index.display()
        );
        Ok(RenderedView {
            index,
            stories: entries.len(),
            totals,
        })
    }
}

fn collect_entries(
    output_directory: &Path,
    extensions: &BTreeSet<&str>,
) -> Result<BTreeMap<String, StoryEntry>, RenderError> {
    let io_error = |source| RenderError::Io {
        path: output_directory.to_path_buf(),
        source,
    };
    let mut entries: BTreeMap<String, StoryEntry> = BTreeMap::new();
    for dir_entry in std::fs::read_dir(output_directory).map_err(io_error)? {
        let path = dir_entry.map_err(io_error)?.path();
        if !path.is_file() {
            continue;
        }
        let (Some(stem), Some(extension), Some(file_name)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.extension().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
        ) else {
            continue;
        };

        let is_stats = extension == STATS_EXTENSION;
        if !is_stats && !extensions.contains(extension) {
            continue;
        }
        let entry = entries.entry(stem.to_string()).or_default();
        if extensions.contains(extension) {
            entry.reports.insert(file_name.to_string());
        }
        if is_stats {
            let text = std::fs::read_to_string(&path).map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
            entry.stats = Some(StoryStatistics::from_properties(&text));
        }
    }
    Ok(entries)
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
