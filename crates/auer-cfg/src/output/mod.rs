//! Output formatting: layouts, JSON, YAML, plain.
//!
//! `--output table` renders through a [`Layout`]; the structured formats
//! serialize the `Overview` via serde; `plain` emits the identification
//! number of the active configuration.

mod layout;

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;

use auer_core::Overview;

use crate::cli::{ColorMode, LayoutStyle, OutputFormat};
use crate::error::CliError;

pub use layout::{CompactLayout, DetailedLayout, Layout};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Applies colors when enabled, passes text through otherwise.
#[derive(Debug, Clone, Copy)]
pub struct Painter {
    color: bool,
}

impl Painter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// ✔ in green or ✘ in red.
    pub fn marker(self, enabled: bool) -> String {
        match (enabled, self.color) {
            (true, true) => "✔".green().to_string(),
            (true, false) => "✔".to_owned(),
            (false, true) => "✘".red().to_string(),
            (false, false) => "✘".to_owned(),
        }
    }

    /// Marker for the active configuration; inactive rows stay blank.
    pub fn active(self, active: bool) -> String {
        if active { self.marker(true) } else { String::new() }
    }

    pub fn product(self, text: &str) -> String {
        if self.color {
            text.bold().blue().to_string()
        } else {
            text.to_owned()
        }
    }

    pub fn strong(self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_owned()
        }
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Pick the layout selected by `--layout`.
pub fn layout_for(style: LayoutStyle) -> Box<dyn Layout> {
    match style {
        LayoutStyle::Detailed => Box::new(DetailedLayout),
        LayoutStyle::Compact => Box::new(CompactLayout),
    }
}

/// Render the overview in the chosen format.
pub fn render_overview(
    format: OutputFormat,
    layout: &dyn Layout,
    overview: &Overview,
    painter: Painter,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(layout.render(overview, painter)),
        OutputFormat::Json => render_json(overview, false),
        OutputFormat::JsonCompact => render_json(overview, true),
        OutputFormat::Yaml => render_yaml(overview),
        OutputFormat::Plain => Ok(overview
            .active_configuration()
            .map(|c| c.number.clone())
            .unwrap_or_default()),
    }
}

/// Render a raw JSON document; `table` falls back to pretty JSON.
pub fn render_value(format: OutputFormat, value: &serde_json::Value) -> Result<String, CliError> {
    match format {
        OutputFormat::Table | OutputFormat::Json => render_json(value, false),
        OutputFormat::JsonCompact | OutputFormat::Plain => render_json(value, true),
        OutputFormat::Yaml => render_yaml(value),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    Ok(if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    })
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use auer_core::{AutoswitchStatus, Configuration, PbxIdentity};

    use super::*;

    pub(crate) fn sample_overview() -> Overview {
        Overview {
            address: "192.168.0.240".into(),
            identity: PbxIdentity {
                product: "COMpact 5500R".into(),
                name: "Zentrale".into(),
                firmware: "7.4A".into(),
                date: "12.03.2024".into(),
                serial: "4711".into(),
                user: "admin".into(),
            },
            autoswitch: AutoswitchStatus {
                enabled: true,
                relay_enabled: false,
                relay_name: "Relais 1".into(),
            },
            configurations: vec![
                Configuration {
                    id: "1".into(),
                    name: "Day".into(),
                    number: "10".into(),
                    active: true,
                },
                Configuration {
                    id: "2".into(),
                    name: "Night".into(),
                    number: "20".into(),
                    active: false,
                },
            ],
        }
    }

    #[test]
    fn plain_prints_active_number() {
        let out = render_overview(
            OutputFormat::Plain,
            &DetailedLayout,
            &sample_overview(),
            Painter::new(false),
        )
        .expect("render");
        assert_eq!(out, "10");
    }

    #[test]
    fn json_carries_the_whole_overview() {
        let out = render_overview(
            OutputFormat::JsonCompact,
            &DetailedLayout,
            &sample_overview(),
            Painter::new(false),
        )
        .expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(value["identity"]["serial"], "4711");
        assert_eq!(value["autoswitch"]["relay_name"], "Relais 1");
        assert_eq!(value["configurations"][1]["number"], "20");
    }

    #[test]
    fn markers_without_color() {
        let painter = Painter::new(false);
        assert_eq!(painter.marker(true), "✔");
        assert_eq!(painter.marker(false), "✘");
        assert_eq!(painter.active(false), "");
    }
}
