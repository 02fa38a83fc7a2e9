use chrono::Local;
use dataguard_common::types::{RunStatus, ValidationResult};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::App;

const TITLE: &str = "DataGuard Dashboard";
const LOADING_TEXT: &str = "Loading...";
const EMPTY_TEXT: &str = "No matching records found";
const COLUMNS: [&str; 5] = ["Status", "Source", "Records", "Failed Rules", "Time"];

/// Draw the dashboard. Exactly one of three bodies is shown, selected by
/// `(loading, results.len())`: the loading indicator, the empty-table
/// placeholder, or one row per run in response order.
pub fn render(frame: &mut Frame, app: &App) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let title = Paragraph::new(TITLE).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(title, header_area);

    if app.loading {
        let indicator = Paragraph::new(LOADING_TEXT)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(indicator, body_area);
    } else {
        render_table(frame, body_area, &app.results);
    }

    let footer = Paragraph::new("r: refresh  q: quit").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

fn render_table(frame: &mut Frame, area: Rect, runs: &[ValidationResult]) {
    let header = Row::new(COLUMNS).style(Style::default().add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(19),
    ];
    let block = Block::default().borders(Borders::ALL);

    if runs.is_empty() {
        let table = Table::new(Vec::<Row>::new(), widths)
            .header(header)
            .block(block);
        frame.render_widget(table, area);
        // Full-width placeholder row directly under the header line.
        if area.height > 3 && area.width > 2 {
            let row_area = Rect::new(area.x + 1, area.y + 2, area.width - 2, 1);
            let placeholder = Paragraph::new(EMPTY_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, row_area);
        }
        return;
    }

    let rows = runs.iter().map(|run| {
        Row::new(vec![
            status_badge(run.status),
            Cell::from(run.source_id.clone()),
            Cell::from(run.records_checked.to_string()),
            Cell::from(run.rules_failed.to_string()),
            Cell::from(format_timestamp(run)),
        ])
    });

    let table = Table::new(rows, widths).header(header).block(block);
    frame.render_widget(table, area);
}

/// Two visual states, no third: PASS is green, FAIL is red.
fn status_badge(status: RunStatus) -> Cell<'static> {
    let color = match status {
        RunStatus::Pass => Color::Green,
        RunStatus::Fail => Color::Red,
    };
    Cell::from(status.to_string()).style(Style::default().fg(color).add_modifier(Modifier::BOLD))
}

fn format_timestamp(run: &ValidationResult) -> String {
    run.timestamp
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
