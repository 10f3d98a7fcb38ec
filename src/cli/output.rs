//! Output formatting for CLI results

use colorful::Colorful;

use crate::config::OutputMode;
use crate::detection::{AnalysisResult, BatchSummary, Status};

/// Renders results according to the selected [`OutputMode`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    mode: OutputMode,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Text to print for one result, or `None` when the mode hides it
    pub fn render(&self, result: &AnalysisResult) -> Option<String> {
        if (self.mode.only_fake || self.mode.quiet) && !result.is_fake() {
            return None;
        }

        if self.mode.quiet {
            Some(result.file_path.display().to_string())
        } else if self.mode.json {
            Some(format_json(result))
        } else {
            Some(format_result(result))
        }
    }

    /// Closing summary, only in human-readable mode
    pub fn render_summary(&self, summary: &BatchSummary) -> Option<String> {
        self.mode.shows_progress().then(|| format_summary(summary))
    }
}

/// One compact JSON object
pub fn format_json(result: &AnalysisResult) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| {
        log::error!("Failed to serialize result for {}: {}", result.file_path.display(), e);
        String::new()
    })
}

/// Human-readable block for one file
pub fn format_result(result: &AnalysisResult) -> String {
    let mut out = String::new();

    let status = match result.status {
        Status::Ok => format!("{} {}", result.status.symbol(), result.status).green(),
        Status::Fake => format!("{} {}", result.status.symbol(), result.status).red(),
        Status::Error => format!("{} {}", result.status.symbol(), result.status).yellow(),
    };

    out.push_str(&format!("{}\n", result.file_name().as_str().bold()));
    out.push_str(&format!("  Path:   {}\n", result.file_path.display()));
    if !result.format.is_empty() {
        out.push_str(&format!("  Format: {}\n", result.format));
    }
    out.push_str(&format!("  Status: {}\n", status));

    if let Some(error) = &result.error {
        out.push_str(&format!("  Error:  {}\n", error));
        return out;
    }

    let Some(analysis) = &result.analysis else {
        return out;
    };

    out.push_str(&format!("  Sample Rate: {} Hz\n", analysis.sample_rate));
    out.push_str(&format!("  Bit Depth:   {} bit\n", analysis.bit_depth));
    out.push_str(&format!("  Channels:    {}\n", analysis.channels));
    match &result.metadata.duration {
        Some(text) => out.push_str(&format!("  Duration:    {}\n", text)),
        None => out.push_str(&format!("  Duration:    {:.2}s\n", analysis.duration)),
    }

    let tags = [
        ("Title", &result.metadata.title),
        ("Artist", &result.metadata.artist),
        ("Album", &result.metadata.album),
        ("Year", &result.metadata.year),
        ("Genre", &result.metadata.genre),
    ];
    for (label, value) in tags {
        if let Some(value) = value {
            out.push_str(&format!("  {:<12} {}\n", format!("{}:", label), value));
        }
    }

    out.push_str(&format!("  Max Effective Frequency: {:.0} Hz\n", analysis.max_frequency));
    if analysis.cutoff_hz > 0.0 {
        out.push_str(&format!("  Cutoff Frequency:        {:.0} Hz\n", analysis.cutoff_hz));
    }
    out.push_str(&format!("  Details: {}\n", analysis.details));

    if analysis.is_fake {
        out.push_str(&format!("  {}\n", "Likely transcoded from a lossy source".yellow()));
    } else {
        out.push_str(&format!("  {}\n", "Looks like genuine lossless audio".green()));
    }

    out
}

pub fn format_summary(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "Summary".bold()));
    out.push_str(&format!("  Files analyzed: {}\n", summary.total));
    out.push_str(&format!("  OK:   {}\n", summary.ok));
    out.push_str(&format!("  FAKE: {}\n", summary.fake));
    if summary.errors > 0 {
        out.push_str(&format!("  ERROR: {}\n", summary.errors));
    }

    if summary.fake > 0 {
        out.push_str(&format!(
            "{}\n",
            format!("{} file(s) look like fake lossless", summary.fake).red()
        ));
    } else {
        out.push_str(&format!("{}\n", "No fake lossless files found".green()));
    }
    out
}
