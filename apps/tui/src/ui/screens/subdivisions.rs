use crate::app::App;
use crate::ui::screens::{
    render_shortcuts, render_status, render_title, screen_layout, selected_style,
};
use crate::ui::widgets::tables::scroll_offset;
use jma_forecast::view::NO_CLASS15_TEXT;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

const SHORTCUTS: [(&str, &str); 4] = [
    ("F1", "Help"),
    ("↑/↓", "Navigate"),
    ("Tab", "Regions"),
    ("q", "Quit"),
];

pub fn render_subdivisions(app: &App, f: &mut Frame<'_>) {
    let layout = screen_layout(f);

    render_title(f, layout.title, "Subdivisions");
    render_class10_list(app, f, layout.left);
    render_class15_list(app, f, layout.right);
    render_status(app, f, layout.status);
    render_shortcuts(f, layout.shortcuts, &SHORTCUTS);
}

fn render_class10_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" Class10 areas ({}) ", app.subdivisions.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    if app.subdivisions.is_empty() {
        let paragraph = Paragraph::new("No class10 areas found.")
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let max_visible_rows = area.height.saturating_sub(2) as usize;
    let offset = scroll_offset(
        app.subdivisions.len(),
        max_visible_rows,
        app.selected_subdivision,
    );

    let items: Vec<ListItem<'_>> = app
        .subdivisions
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, node)| {
            let item = ListItem::new(node.label.as_str());
            if index == app.selected_subdivision {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_class15_list(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(node) = app.selected_subdivision_node() else {
        let block = Block::default().title(" Class15 ").borders(Borders::ALL);
        f.render_widget(block, area);
        return;
    };

    let block = Block::default()
        .title(format!(" Class15 of {} ", node.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if node.class15s.is_empty() {
        let paragraph = Paragraph::new(NO_CLASS15_TEXT)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem<'_>> = node
        .class15s
        .iter()
        .map(|label| ListItem::new(label.as_str()))
        .collect();
    f.render_widget(List::new(items).block(block), area);
}
