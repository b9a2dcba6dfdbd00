use crate::app::{App, RegionRow};
use crate::ui::screens::{
    render_shortcuts, render_status, render_title, screen_layout, selected_style,
};
use crate::ui::widgets::cards::render_cards;
use crate::ui::widgets::tables::scroll_offset;
use jma_forecast::view::{DetailPane, PLACEHOLDER_TEXT};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

const SHORTCUTS: [(&str, &str); 6] = [
    ("F1", "Help"),
    ("Enter", "Open"),
    ("←/→", "Collapse/Expand"),
    ("/", "Search"),
    ("Tab", "Subdivisions"),
    ("q", "Quit"),
];

pub fn render_regions(app: &App, f: &mut Frame<'_>) {
    let layout = screen_layout(f);

    render_title(f, layout.title, "Regions");
    render_region_list(app, f, layout.left);
    render_detail(app, f, layout.right);
    render_status(app, f, layout.status);
    render_shortcuts(f, layout.shortcuts, &SHORTCUTS);
}

fn render_region_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let title = if app.search_active {
        format!(" Search: {}_ ", app.search_query)
    } else {
        " Regions ".to_string()
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if let Some(message) = &app.catalog_error {
        let paragraph = Paragraph::new(message.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    let rows = app.visible_rows();
    if rows.is_empty() {
        let empty = if app.search_active {
            "No matching offices."
        } else {
            "No regions found."
        };
        let paragraph = Paragraph::new(empty)
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_visible_rows = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(rows.len(), max_visible_rows, app.selected_row);

    let items: Vec<ListItem<'_>> = rows
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, row)| {
            let line = region_line(app, *row);
            if index == app.selected_row {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn region_line(app: &App, row: RegionRow) -> TextLine<'static> {
    match row {
        RegionRow::Center(center) => {
            let expanded = app.expanded.get(center).copied().unwrap_or(false);
            let marker = if expanded { "▾" } else { "▸" };
            let label = app
                .centers
                .get(center)
                .map(|node| node.label.clone())
                .unwrap_or_default();
            TextLine::from(Span::styled(
                format!("{marker} {label}"),
                Style::default().add_modifier(Modifier::BOLD),
            ))
        }
        RegionRow::Office { center, office } => {
            let label = app
                .office_node(center, office)
                .map(|node| node.label.clone())
                .unwrap_or_default();
            let indent = if app.search_active { "" } else { "    " };
            TextLine::from(format!("{indent}{label}"))
        }
    }
}

fn render_detail(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if let Some(office) = &app.loading_office {
        let throbber = Throbber::default()
            .label(format!("Fetching forecast for {}...", app.office_title(office)))
            .style(Style::default().fg(Color::Cyan))
            .throbber_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX);
        let mut state = app.throbber_state.clone();
        f.render_stateful_widget(throbber, inner, &mut state);
        return;
    }

    match &app.detail {
        DetailPane::Placeholder => {
            let paragraph = Paragraph::new(PLACEHOLDER_TEXT)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
        DetailPane::Error(message) => {
            let paragraph = Paragraph::new(message.as_str())
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, inner);
        }
        DetailPane::Forecast {
            office_code,
            title,
            cards,
        } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(0)])
                .split(inner);

            let heading = Paragraph::new(TextLine::from(vec![
                Span::styled(
                    title.as_str(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ({office_code})"), Style::default().fg(Color::Gray)),
            ]));
            f.render_widget(heading, chunks[0]);

            if cards.is_empty() {
                f.render_widget(Paragraph::new("No forecast days returned."), chunks[1]);
            } else {
                render_cards(f, chunks[1], cards);
            }
        }
    }
}
