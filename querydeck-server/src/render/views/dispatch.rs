//! Emergency dispatch dashboard: status counters followed by one card per
//! dispatch.

use crate::db::Row;
use crate::render::html::{HtmlView, Markup};
use crate::render::value::{display, short_datetime};
use crate::render::vitals::{vital_status, VitalKind};

/// Dispatch statuses in display order, with their counter colour.
const STATUSES: [(&str, &str); 4] = [
    ("Pending", "#e74c3c"),
    ("Dispatched", "#f39c12"),
    ("Arrived", "#9b59b6"),
    ("Resolved", "#2ecc71"),
];

const VITALS: [(&str, &str, VitalKind, &str); 5] = [
    ("Blood Pressure", "Blood_pressure", VitalKind::BloodPressure, " mmHg"),
    ("Heart Rate", "Heart_rate", VitalKind::HeartRate, " bpm"),
    ("Temperature", "Body_temperature", VitalKind::Temperature, "°F"),
    ("Oxygen Saturation", "Oxygen_saturation", VitalKind::OxygenSaturation, "%"),
    ("Breathing Rate", "Breathing_rate", VitalKind::BreathingRate, " bpm"),
];

const STYLES: &str = r#"
        .header-status { padding: 20px; color: white; border-radius: 10px; text-align: center; }
        .emergency-card {
            background: white;
            border-radius: 10px;
            box-shadow: 0 4px 6px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        .emergency-card.pending { border-left: 5px solid #e74c3c; }
        .emergency-card.dispatched { border-left: 5px solid #f39c12; }
        .emergency-card.arrived { border-left: 5px solid #9b59b6; }
        .emergency-card.resolved { border-left: 5px solid #2ecc71; }
        .status-badge { padding: 5px 10px; border-radius: 15px; font-weight: bold; color: white; }
        .status-badge.pending { background-color: #e74c3c; }
        .status-badge.dispatched { background-color: #f39c12; }
        .status-badge.arrived { background-color: #9b59b6; }
        .status-badge.resolved { background-color: #2ecc71; }
        .vitals-grid {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 15px;
            margin-top: 15px;
        }
        .vital-box { background: var(--highlight-blue); padding: 10px; border-radius: 8px; text-align: center; }
        .vital-value { font-size: 1.2rem; font-weight: bold; }
        .critical { color: #e74c3c; }
        .warning { color: #f39c12; }
        .normal { color: #2ecc71; }
        .timestamp { color: var(--medium-blue); font-size: 0.9rem; }
        .contact-info, .alert-info { background: var(--highlight-blue); padding: 10px; border-radius: 8px; }
"#;

pub struct DispatchSummary;

/// Number of rows per dispatch status, in [`STATUSES`] order.
pub fn status_counts(rows: &[Row]) -> [usize; 4] {
    let mut counts = [0; 4];
    for row in rows {
        let status = display(row.get("Dispatch_Status"));
        if let Some(slot) = STATUSES.iter().position(|(name, _)| *name == status) {
            counts[slot] += 1;
        }
    }
    counts
}

fn status_class(status: &str) -> String {
    status.to_ascii_lowercase()
}

impl DispatchSummary {
    fn counters(rows: &[Row], out: &mut Markup) {
        out.raw("<div class=\"row mb-4\">\n");
        for ((name, colour), count) in STATUSES.into_iter().zip(status_counts(rows)) {
            out.raw("<div class=\"col-md-3 col-sm-6 mb-3\"><div class=\"header-status\" style=\"background-color: ")
                .raw(colour)
                .raw("\"><h3>")
                .text(count)
                .raw("</h3><p class=\"mb-0\">")
                .raw(name)
                .raw("</p></div></div>\n");
        }
        out.raw("</div>\n");
    }

    fn timestamp(out: &mut Markup, label: &'static str, when: &str) {
        out.raw("<div class=\"col-md-3\"><p><strong>")
            .raw(label)
            .raw(":</strong><br><span class=\"timestamp\">")
            .text(when)
            .raw("</span></p></div>\n");
    }

    fn card(row: &Row, out: &mut Markup) {
        let status = display(row.get("Dispatch_Status"));
        let class = status_class(&status);

        out.raw("<div class=\"emergency-card ")
            .text(&class)
            .raw("\">\n<div class=\"card-body\">\n<div class=\"row align-items-center mb-3\">\n")
            .raw("<div class=\"col-md-6\"><h5 class=\"card-title\">Patient: ")
            .text(display(row.get("Patient_Name")))
            .raw("</h5><p class=\"mb-1\">Age: ")
            .text(display(row.get("Patient_Age")))
            .raw(" | Medical History: ")
            .text(display(row.get("Medical_history")))
            .raw("</p></div>\n<div class=\"col-md-6 text-md-end\"><span class=\"status-badge ")
            .text(&class)
            .raw("\">")
            .text(&status)
            .raw("</span></div>\n</div>\n");

        out.raw("<div class=\"row\">\n<div class=\"col-md-6\"><div class=\"contact-info\"><h6>Contact Information</h6>")
            .raw("<p class=\"mb-1\"><strong>Phone:</strong> ")
            .text(display(row.get("Patient_phone_num")))
            .raw("</p><p class=\"mb-0\"><strong>Address:</strong> ")
            .text(display(row.get("Patient_address")))
            .raw("</p></div></div>\n")
            .raw("<div class=\"col-md-6\"><div class=\"alert-info\"><h6>Alert Information</h6>")
            .raw("<p class=\"mb-1\"><strong>Alert Type:</strong> ")
            .text(display(row.get("Alert_type")))
            .raw("</p><p class=\"mb-0\"><strong>Device Status:</strong> ")
            .text(display(row.get("Patch_status")))
            .raw("</p></div></div>\n</div>\n");

        let arrival = match row.get("Arrival_time") {
            None | Some(serde_json::Value::Null) => "Not arrived".to_string(),
            arrived => short_datetime(arrived),
        };
        out.raw("<div class=\"row mt-3\">\n");
        let dispatched = short_datetime(row.get("Dispatch_time"));
        let alerted = short_datetime(row.get("Alert_Time"));
        let measured = short_datetime(row.get("Vitals_Time"));
        Self::timestamp(out, "Dispatch Time", &dispatched);
        Self::timestamp(out, "Arrival Time", &arrival);
        Self::timestamp(out, "Alert Time", &alerted);
        Self::timestamp(out, "Vitals Updated", &measured);
        out.raw("</div>\n");

        out.raw("<div class=\"vitals-grid\">\n");
        for (label, column, kind, unit) in VITALS {
            let reading = row.get(column);
            out.raw("<div class=\"vital-box\"><h6>")
                .raw(label)
                .raw("</h6><p class=\"vital-value ")
                .raw(vital_status(kind, reading).as_class())
                .raw("\">")
                .text(display(reading))
                .raw(unit)
                .raw("</p></div>\n");
        }
        out.raw("</div>\n");

        let notes = display(row.get("Dispatch_Notes"));
        if !notes.is_empty() {
            out.raw("<div class=\"mt-3\"><p><strong>Dispatch Notes:</strong> ")
                .text(&notes)
                .raw("</p></div>\n");
        }

        out.raw("</div>\n</div>\n");
    }
}

impl HtmlView for DispatchSummary {
    fn title(&self) -> &'static str {
        "Emergency Dispatch Dashboard"
    }

    fn styles(&self) -> &'static str {
        STYLES
    }

    fn tagline(&self) -> &'static str {
        "Emergency Dispatch Monitor"
    }

    fn error_heading(&self) -> Option<&'static str> {
        Some("Error Loading Emergency Dispatch Data")
    }

    fn body(&self, rows: &[Row], out: &mut Markup) {
        Self::counters(rows, out);

        if rows.is_empty() {
            out.raw("<div class=\"empty-state\">\n<h3>No Emergency Dispatches Found</h3>\n")
                .raw("<p>There are currently no active emergency dispatch records in the system.</p>\n</div>\n");
            return;
        }

        for row in rows {
            Self::card(row, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::html::document;
    use serde_json::{json, Value};

    fn dispatch(status: &str, heart_rate: i64, notes: Value, arrival: Value) -> Row {
        let value = json!({
            "Dispatch_ID": 1,
            "Dispatch_time": "2024-11-20T14:05:09",
            "Arrival_time": arrival,
            "Dispatch_Status": status,
            "Dispatch_Notes": notes,
            "Patient_Name": "Jordan Lee",
            "Patient_Age": 71,
            "Medical_history": "COPD",
            "Patient_phone_num": "555-0100",
            "Patient_address": "12 Elm St",
            "Alert_type": "CRITICAL",
            "Alert_Time": "2024-11-20T14:00:00",
            "Patch_status": "Active",
            "Blood_pressure": "150/95",
            "Heart_rate": heart_rate,
            "Body_temperature": "98.6",
            "Oxygen_saturation": 96,
            "Breathing_rate": 22,
            "Vitals_Time": "2024-11-20T13:58:00",
        });
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn counts_each_status() {
        let rows = [
            dispatch("Pending", 80, Value::Null, Value::Null),
            dispatch("Pending", 80, Value::Null, Value::Null),
            dispatch("Arrived", 80, Value::Null, Value::Null),
            dispatch("Cancelled", 80, Value::Null, Value::Null),
        ];
        assert_eq!(status_counts(&rows), [2, 0, 1, 0]);
    }

    #[test]
    fn empty_dashboard_has_zero_counters_and_empty_state() {
        let page = document(&DispatchSummary, &[]);
        assert!(page.contains("class=\"empty-state\""));
        assert!(page.contains("No Emergency Dispatches Found"));
        assert_eq!(page.matches("<h3>0</h3>").count(), 4);
        assert!(!page.contains("<div class=\"emergency-card"));
        assert!(!page.contains("<tr"));
    }

    #[test]
    fn card_styles_vitals_by_threshold() {
        let notes = json!("Gate code 1234");
        let rows = [dispatch("Dispatched", 101, notes, Value::Null)];
        let page = document(&DispatchSummary, &rows);

        assert!(page.contains("<div class=\"emergency-card dispatched\">"));
        assert!(page.contains("<span class=\"status-badge dispatched\">Dispatched</span>"));
        assert!(page.contains("vital-value critical\">150/95 mmHg"));
        assert!(page.contains("vital-value critical\">101 bpm"));
        assert!(page.contains("vital-value normal\">98.6°F"));
        assert!(page.contains("vital-value warning\">96%"));
        assert!(page.contains("vital-value critical\">22 bpm"));
        assert!(page.contains("Not arrived"));
        assert!(page.contains("11/20/2024, 2:05:09 PM"));
        assert!(page.contains("<strong>Dispatch Notes:</strong> Gate code 1234"));
    }

    #[test]
    fn notes_block_is_omitted_when_absent() {
        let arrival = json!("2024-11-20T14:30:00");
        let rows = [dispatch("Resolved", 72, Value::Null, arrival)];
        let page = document(&DispatchSummary, &rows);
        assert!(!page.contains("Dispatch Notes"));
        assert!(page.contains("11/20/2024, 2:30:00 PM"));
        assert!(page.contains("vital-value normal\">72 bpm"));
    }
}
