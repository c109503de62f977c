//! Patient authorization and health summary table.

use crate::db::Row;
use crate::render::html::{HtmlView, Markup};
use crate::render::value::{display, is_truthy, short_date};
use crate::render::vitals::summary_indicator;

const HEADERS: [&str; 9] = [
    "Authorization",
    "Patient Name",
    "Age",
    "Medical History",
    "Vital Signs",
    "Treatments",
    "Provider Notes",
    "Provider",
    "Last Visit",
];

const STYLES: &str = r#"
        .page-title { color: var(--royal-blue); font-weight: bold; }
        .table-container {
            background: white;
            border-radius: 15px;
            padding: 20px;
            box-shadow: 0 4px 15px rgba(0,0,0,0.1);
        }
        .table th {
            background: linear-gradient(135deg, var(--royal-blue), var(--medium-blue));
            color: white;
            text-transform: uppercase;
        }
        .table tbody tr:hover { background-color: var(--highlight-blue); }
        .status-indicator {
            display: inline-block;
            width: 10px;
            height: 10px;
            border-radius: 50%;
            margin-right: 8px;
        }
        .status-critical { background-color: #f44336; }
        .status-warning { background-color: #ff9800; }
        .status-active { background-color: #4CAF50; }
"#;

/// One summary row per authorization and health check, each with a
/// collapsible detail row.
pub struct AuthorizationSummary;

impl AuthorizationSummary {
    fn cell(out: &mut Markup, row: &Row, column: &str) {
        out.raw("<td>").text(display(row.get(column))).raw("</td>");
    }

    fn detail(out: &mut Markup, label: &'static str, row: &Row, column: &str) {
        out.raw("<p><strong>")
            .raw(label)
            .raw(":</strong> ")
            .text(display(row.get(column)))
            .raw("</p>");
    }
}

impl HtmlView for AuthorizationSummary {
    fn title(&self) -> &'static str {
        "Patient Authorization and Health Summary"
    }

    fn styles(&self) -> &'static str {
        STYLES
    }

    fn tagline(&self) -> &'static str {
        "Remote Monitoring for Healthcare Providers"
    }

    fn body(&self, rows: &[Row], out: &mut Markup) {
        if rows.is_empty() {
            out.raw("<div class=\"empty-state\">No matching patients found.</div>\n");
            return;
        }

        out.raw("<div class=\"table-container\">\n<table class=\"table\">\n<thead>\n<tr>");
        for header in HEADERS {
            out.raw("<th>").raw(header).raw("</th>");
        }
        out.raw("</tr>\n</thead>\n<tbody>\n");

        for (index, row) in rows.iter().enumerate() {
            out.raw("<tr>\n<td><button class=\"btn btn-sm btn-primary\" type=\"button\" ")
                .raw("data-bs-toggle=\"collapse\" data-bs-target=\"#collapse")
                .text(index)
                .raw("\" aria-expanded=\"false\" aria-controls=\"collapse")
                .text(index)
                .raw("\">View Details</button></td>\n");

            out.raw("<td><span class=\"status-indicator ")
                .raw(summary_indicator(row.get("Vital_Signs")))
                .raw("\"></span>")
                .text(display(row.get("Patient_Name")))
                .raw("</td>");
            for column in [
                "Patient_Age",
                "Medical_History",
                "Vital_Signs",
                "Treatments_Provided",
                "Provider_Notes",
                "Provider_Name",
            ] {
                Self::cell(out, row, column);
            }
            out.raw("<td>")
                .text(short_date(row.get("Last_Health_Check_Date")))
                .raw("</td>\n</tr>\n");

            let active = is_truthy(row.get("Is_Activated"));
            out.raw("<tr>\n<td colspan=\"9\" class=\"p-0\">\n")
                .raw("<div class=\"collapse\" id=\"collapse")
                .text(index)
                .raw("\">\n<div class=\"card card-body\">\n<div class=\"row\">\n")
                .raw("<div class=\"col-md-4\">");
            Self::detail(out, "User ID", row, "User_ID");
            Self::detail(out, "Patient ID", row, "Patient_ID");
            out.raw("</div>\n<div class=\"col-md-4\">");
            Self::detail(out, "Authorization Code", row, "Authorization_Code");
            out.raw("<p><strong>Activation Status:</strong> ")
                .raw(if active {
                    "<span class=\"badge bg-success\">Active</span>"
                } else {
                    "<span class=\"badge bg-danger\">Inactive</span>"
                })
                .raw("</p></div>\n<div class=\"col-md-4\">");
            Self::detail(out, "Authorized Email", row, "Authorized_Email");
            out.raw("</div>\n</div>\n</div>\n</div>\n</td>\n</tr>\n");
        }

        out.raw("</tbody>\n</table>\n</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::html::document;
    use serde_json::json;

    fn patient(name: &str, signs: &str, activation: &str) -> Row {
        let value = json!({
            "User_ID": 7,
            "Patient_ID": 3,
            "Authorization_Code": "AUTH-3",
            "Is_Activated": activation,
            "Authorized_Email": "pat@example.com",
            "Patient_Name": name,
            "Patient_Age": 64,
            "Medical_History": "Hypertension",
            "Last_Health_Check_Date": "2024-10-02",
            "Vital_Signs": signs,
            "Treatments_Provided": "Beta blockers",
            "Provider_Notes": "Follow up in 2 weeks",
            "Provider_Name": "Ana Ruiz",
        });
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_result_renders_empty_state_without_rows() {
        let page = document(&AuthorizationSummary, &[]);
        assert!(page.contains("class=\"empty-state\""));
        assert!(page.contains("No matching patients found."));
        assert!(!page.contains("<tr"));
        assert!(!page.contains("<table"));
    }

    #[test]
    fn renders_summary_and_detail_rows() {
        let rows = [
            patient("Mary Major", "Critical BP", "T"),
            patient("Sam Minor", "Stable", "F"),
        ];
        let page = document(&AuthorizationSummary, &rows);

        assert_eq!(page.matches("<tr>").count(), 1 + 2 * rows.len());
        assert!(page.contains("status-indicator status-critical\"></span>Mary Major"));
        assert!(page.contains("status-indicator status-active\"></span>Sam Minor"));
        assert!(page.contains("id=\"collapse0\""));
        assert!(page.contains("id=\"collapse1\""));
        assert!(page.contains("<span class=\"badge bg-success\">Active</span>"));
        assert!(page.contains("<span class=\"badge bg-danger\">Inactive</span>"));
        assert!(page.contains("<td>10/2/2024</td>"));
    }

    #[test]
    fn provider_notes_are_escaped() {
        let mut row = patient("Eve", "Stable", "T");
        row.insert("Provider_Notes".into(), json!("<script>steal()</script>"));
        let page = document(&AuthorizationSummary, &[row]);
        assert!(page.contains("&lt;script&gt;steal()&lt;/script&gt;"));
        assert!(!page.contains("<script>steal()"));
    }
}
