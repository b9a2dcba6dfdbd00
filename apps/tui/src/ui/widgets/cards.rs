use jma_forecast::view::WeatherCard;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 6;

/// How the forecast days are laid out in the available space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardLayout {
    /// Boxed cards, `columns` per row; every card fits.
    Grid { columns: usize },
    /// One line per day; `hidden` days did not fit and are summarised.
    Compact { shown: usize, hidden: usize },
}

/// How many cards fit side by side in `width` columns (at least one).
pub const fn card_columns(width: u16) -> usize {
    let columns = width / CARD_WIDTH;
    if columns == 0 {
        1
    } else {
        columns as usize
    }
}

/// Picks the grid when all `count` cards fit, otherwise one line per day.
pub const fn card_layout(area: Rect, count: usize) -> CardLayout {
    let columns = card_columns(area.width);
    let grid_rows = (area.height / CARD_HEIGHT) as usize;
    if area.width >= CARD_WIDTH && count <= columns * grid_rows {
        return CardLayout::Grid { columns };
    }

    let lines = area.height as usize;
    if count <= lines {
        CardLayout::Compact {
            shown: count,
            hidden: 0,
        }
    } else {
        // last line carries the "+N more" note
        let shown = lines.saturating_sub(1);
        CardLayout::Compact {
            shown,
            hidden: count - shown,
        }
    }
}

pub fn render_cards(f: &mut Frame<'_>, area: Rect, cards: &[WeatherCard]) {
    match card_layout(area, cards.len()) {
        CardLayout::Grid { columns } => render_grid(f, area, cards, columns),
        CardLayout::Compact { shown, hidden } => render_compact(f, area, cards, shown, hidden),
    }
}

fn render_grid(f: &mut Frame<'_>, area: Rect, cards: &[WeatherCard], columns: usize) {
    let row_count = cards.len().div_ceil(columns);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(CARD_HEIGHT); row_count])
        .split(area);

    for (row_area, row_cards) in row_areas.iter().zip(cards.chunks(columns)) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(CARD_WIDTH); columns])
            .split(*row_area);

        for (cell, card) in cells.iter().zip(row_cards) {
            f.render_widget(card_widget(card), *cell);
        }
    }
}

fn render_compact(
    f: &mut Frame<'_>,
    area: Rect,
    cards: &[WeatherCard],
    shown: usize,
    hidden: usize,
) {
    let mut lines: Vec<TextLine<'_>> = cards.iter().take(shown).map(compact_line).collect();
    if hidden > 0 {
        lines.push(TextLine::from(Span::styled(
            format!("+{hidden} more"),
            Style::default().fg(Color::Gray),
        )));
    }

    f.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn compact_line(card: &WeatherCard) -> TextLine<'_> {
    TextLine::from(vec![
        Span::styled(
            card.date.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  {} {}", card.icon, card.text)),
        Span::styled(format!(" ({})", card.code), Style::default().fg(Color::Gray)),
    ])
}

fn card_widget(card: &WeatherCard) -> Paragraph<'_> {
    let block = Block::default()
        .title(Span::styled(
            card.date.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let text = Text::from(vec![
        TextLine::from(Span::raw(card.icon.as_str())),
        TextLine::from(Span::styled(
            card.text.as_str(),
            Style::default().fg(Color::White),
        )),
        TextLine::from(Span::styled(
            format!("code {}", card.code),
            Style::default().fg(Color::Gray),
        )),
    ]);

    Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_columns() {
        assert_eq!(card_columns(0), 1);
        assert_eq!(card_columns(25), 1);
        assert_eq!(card_columns(52), 2);
        assert_eq!(card_columns(80), 3);
    }

    #[test]
    fn test_grid_when_everything_fits() {
        let area = Rect::new(0, 0, 80, 12);
        assert_eq!(card_layout(area, 3), CardLayout::Grid { columns: 3 });
        assert_eq!(card_layout(area, 6), CardLayout::Grid { columns: 3 });
    }

    #[test]
    fn test_compact_when_grid_is_too_small() {
        // right pane of an 80x24 terminal
        let area = Rect::new(0, 0, 49, 13);
        assert_eq!(
            card_layout(area, 3),
            CardLayout::Compact {
                shown: 3,
                hidden: 0
            }
        );
    }

    #[test]
    fn test_overflow_is_counted() {
        let area = Rect::new(0, 0, 40, 4);
        assert_eq!(
            card_layout(area, 7),
            CardLayout::Compact {
                shown: 3,
                hidden: 4
            }
        );
    }
}
