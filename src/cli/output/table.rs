//! Table formatting for CLI output.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::domain::models::{AuditRecord, Lead};

/// Format leads as a table, one row per lead.
pub fn format_lead_table(leads: &[Lead]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["ID", "Name", "Email", "Company", "Status", "Score", "Confidence"]);

    for lead in leads {
        table.add_row(vec![
            Cell::new(lead.id),
            Cell::new(lead.name.as_deref().unwrap_or("-")),
            Cell::new(lead.email.as_deref().unwrap_or("-")),
            Cell::new(lead.company.as_deref().unwrap_or("-")),
            Cell::new(lead.status.as_str()),
            Cell::new(format!("{:.2}", lead.score)),
            Cell::new(format!("{:.2}", lead.confidence)),
        ]);
    }

    table
}

/// Format an audit trail as a table, oldest first.
pub fn format_audit_table(records: &[AuditRecord]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Recorded", "Action", "Details"]);

    for record in records {
        table.add_row(vec![
            Cell::new(record.recorded_at.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&record.action),
            Cell::new(record.details.to_string()),
        ]);
    }

    table
}
