use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(12),
        Constraint::Length(2),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "SELECT COURSES",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Questions are drawn from every course you tick.".fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    render_categories(frame, chunks[1], app);

    if let Some(notice) = app.notice() {
        let widget = Paragraph::new(notice)
            .alignment(Alignment::Center)
            .fg(Color::Red)
            .bold();
        frame.render_widget(widget, chunks[2]);
    }

    super::render_controls(
        frame,
        chunks[4],
        "j/k move  ·  space toggle  ·  enter start  ·  esc back",
    );
}

fn render_categories(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = Vec::new();

    for (index, (category, count, ticked)) in app.category_rows().enumerate() {
        let is_cursor = index == app.category_cursor();
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let checkbox = if ticked { "[x]" } else { "[ ]" };
        let count_style = if count == 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{} ", checkbox), style),
            Span::styled(category.display_name(), style),
            Span::styled(format!("  ({} questions)", count), count_style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::uniform(1)),
    );
    frame.render_widget(widget, area);
}
