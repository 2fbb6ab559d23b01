// Human-readable layouts of the overview.
//
// Both layouts share the section order and the status panel; they differ
// in the header, the section titles, and the configuration table.

use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

use auer_core::{AutoswitchStatus, Configuration, Overview};

use super::Painter;

const SWITCHING_TITLE: &str = "Konfigurationsumschaltung";
const NAMES_TITLE: &str = "Konfigurationsnamen";

/// A presentation strategy for `--output table`.
pub trait Layout {
    /// Identity lines at the top.
    fn header(&self, overview: &Overview, painter: Painter) -> String;

    fn section_title(&self, title: &str, painter: Painter) -> String;

    fn configuration_table(&self, configurations: &[Configuration], painter: Painter) -> String;

    /// Header, status panel, and configuration table, blank-line separated.
    fn render(&self, overview: &Overview, painter: Painter) -> String {
        [
            self.header(overview, painter),
            String::new(),
            self.section_title(SWITCHING_TITLE, painter),
            status_panel(&overview.autoswitch, painter),
            String::new(),
            self.section_title(NAMES_TITLE, painter),
            self.configuration_table(&overview.configurations, painter),
        ]
        .join("\n")
    }
}

/// The two-row autoswitch panel.
fn status_panel(status: &AutoswitchStatus, painter: Painter) -> String {
    let mut builder = Builder::default();
    builder.push_record([
        "Automatische Konfigurationsumschaltung".to_owned(),
        painter.marker(status.enabled),
    ]);
    builder.push_record([
        format!("Steuerbar mit Systemrelais: {}", status.relay_name),
        painter.marker(status.relay_enabled),
    ]);
    builder.build().with(Style::blank()).to_string()
}

// ── Detailed ─────────────────────────────────────────────────────────

/// Full identity header and upper-case titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailedLayout;

impl Layout for DetailedLayout {
    fn header(&self, overview: &Overview, painter: Painter) -> String {
        let id = &overview.identity;
        format!(
            "{} {}\n{}",
            painter.product(&id.product),
            painter.strong("Zeitsteuerung - Konfigurationen"),
            painter.strong(&format!(
                "{}, Datum {}, SN {} | Angemeldet als: {}@{} | Anlagenname: {}",
                id.firmware, id.date, id.serial, id.user, overview.address, id.name
            )),
        )
    }

    fn section_title(&self, title: &str, painter: Painter) -> String {
        painter.strong(&title.to_uppercase())
    }

    fn configuration_table(&self, configurations: &[Configuration], painter: Painter) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Konfigurationsname", "Identifikationsnummer", "Aktiv"].map(String::from));
        for config in configurations {
            builder.push_record([
                config.name.clone(),
                config.number.clone(),
                painter.active(config.active),
            ]);
        }
        builder
            .build()
            .with(Style::blank())
            .with(Modify::new(Columns::new(1..)).with(Alignment::center()))
            .to_string()
    }
}

// ── Compact ──────────────────────────────────────────────────────────

/// One-line header and plain titles.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactLayout;

impl Layout for CompactLayout {
    fn header(&self, overview: &Overview, painter: Painter) -> String {
        format!(
            "{} | {}: {}",
            painter.product(&overview.identity.product),
            overview.identity.name,
            painter.strong("Zeitsteuerung / Konfigurationen"),
        )
    }

    fn section_title(&self, title: &str, painter: Painter) -> String {
        painter.strong(title)
    }

    fn configuration_table(&self, configurations: &[Configuration], painter: Painter) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Konfigurationsname", "Identifikationsnummer", ""].map(String::from));
        for config in configurations {
            builder.push_record([
                config.name.clone(),
                config.number.clone(),
                painter.active(config.active),
            ]);
        }
        builder.build().with(Style::blank()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::sample_overview;

    #[test]
    fn detailed_header_carries_identity() {
        let out = DetailedLayout.render(&sample_overview(), Painter::new(false));
        let mut lines = out.lines();

        assert_eq!(lines.next(), Some("COMpact 5500R Zeitsteuerung - Konfigurationen"));
        assert_eq!(
            lines.next(),
            Some(
                "7.4A, Datum 12.03.2024, SN 4711 | Angemeldet als: admin@192.168.0.240 \
                 | Anlagenname: Zentrale"
            )
        );
        assert!(out.contains("KONFIGURATIONSUMSCHALTUNG"));
        assert!(out.contains("KONFIGURATIONSNAMEN"));
        assert!(out.contains("Aktiv"));
    }

    #[test]
    fn status_panel_marks_flags() {
        let out = DetailedLayout.render(&sample_overview(), Painter::new(false));
        let autoswitch = out
            .lines()
            .find(|l| l.contains("Automatische Konfigurationsumschaltung"))
            .expect("autoswitch row");
        let relay = out
            .lines()
            .find(|l| l.contains("Steuerbar mit Systemrelais: Relais 1"))
            .expect("relay row");

        assert!(autoswitch.contains('✔'));
        assert!(relay.contains('✘'));
    }

    #[test]
    fn active_configuration_is_marked() {
        let out = CompactLayout.render(&sample_overview(), Painter::new(false));
        let day = out.lines().find(|l| l.contains("Day")).expect("day row");
        let night = out.lines().find(|l| l.contains("Night")).expect("night row");

        assert!(day.contains('✔'));
        assert!(!night.contains('✔'));
    }

    #[test]
    fn compact_header_is_one_line() {
        let out = CompactLayout.render(&sample_overview(), Painter::new(false));
        assert_eq!(
            out.lines().next(),
            Some("COMpact 5500R | Zentrale: Zeitsteuerung / Konfigurationen")
        );
        assert!(out.contains("\nKonfigurationsumschaltung\n"));
        assert!(!out.contains("KONFIGURATIONSNAMEN"));
    }
}
