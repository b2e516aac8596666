use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::orchestrator::{FormMode, Notice, PageState};
use crate::model::ServiceRecord;

pub const NO_DATA_MESSAGE: &str = "No service records found";

const HEADERS: [&str; 8] = [
    "ID",
    "Vehicle No",
    "Owner",
    "Service Type",
    "Service Date",
    "Next Service",
    "Cost",
    "Remarks",
];

/// One table row, every cell already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: [String; 8],
}

impl TableRow {
    pub fn from_record(record: &ServiceRecord) -> Self {
        TableRow {
            cells: [
                record.service_id.to_string(),
                record.vehicle_no.clone(),
                record.owner_name.clone(),
                record.service_type.clone(),
                format_date(record.service_date),
                record.next_service_date.map(format_date).unwrap_or_else(dash),
                record.cost.map(format_cost).unwrap_or_else(dash),
                record
                    .remarks
                    .as_deref()
                    .filter(|remarks| !remarks.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(dash),
            ],
        }
    }
}

fn dash() -> String {
    String::from("-")
}

/// `10 Jan 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

pub fn format_cost(cost: Decimal) -> String {
    format!("₹{:.2}", cost)
}

/// Renders the table as aligned plain text, or the placeholder when empty.
pub fn render_table(records: &[ServiceRecord]) -> String {
    if records.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let rows: Vec<TableRow> = records.iter().map(TableRow::from_record).collect();
    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![format_line(HEADERS.iter().copied(), &widths)];
    out.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        out.push(format_line(row.cells.iter().map(String::as_str), &widths));
    }
    out.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

/// Full page text: notice, table and the form heading for the current mode.
pub fn render_page(state: &PageState) -> String {
    let mut out = Vec::new();

    match &state.notice {
        Some(Notice::Success(message)) => out.push(format!("[ok] {message}")),
        Some(Notice::Error(message)) => out.push(format!("[error] {message}")),
        None => {}
    }

    out.push(render_table(&state.rows));

    match state.mode {
        FormMode::View => out.push(format!("form: {}", state.submit_label())),
        FormMode::Edit { id } => out.push(format!(
            "form: {} (editing service {id}, `cancel` to discard)",
            state.submit_label()
        )),
    }

    out.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ServiceRecord {
        ServiceRecord {
            service_id: 1,
            vehicle_no: "KA01AB1234".to_string(),
            owner_name: "A Rao".to_string(),
            service_type: "Oil Change".to_string(),
            service_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            next_service_date: None,
            cost: Some(Decimal::new(1500, 0)),
            remarks: None,
        }
    }

    #[test]
    fn formats_cells() {
        let row = TableRow::from_record(&record());
        assert_eq!(row.cells[4], "10 Jan 2024");
        assert_eq!(row.cells[5], "-");
        assert_eq!(row.cells[6], "₹1500.00");
        assert_eq!(row.cells[7], "-");
    }

    #[test]
    fn empty_table_shows_placeholder() {
        assert_eq!(render_table(&[]), NO_DATA_MESSAGE);
    }

    #[test]
    fn table_has_header_and_one_line_per_record() {
        let text = render_table(&[record(), record()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[2].contains("KA01AB1234"));
    }

    #[test]
    fn page_shows_edit_mode() {
        let state = PageState {
            mode: FormMode::Edit { id: 4 },
            notice: Some(Notice::Error("Service not found".to_string())),
            ..Default::default()
        };
        let text = render_page(&state);
        assert!(text.starts_with("[error] Service not found"));
        assert!(text.contains("Update Service (editing service 4"));
    }
}
