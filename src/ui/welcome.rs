use ratatui::{
    layout::Flex,
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::session::MAX_QUESTIONS;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let rows = app.category_rows().count() as u16;
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(rows + 9),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);
    let [panel] = Layout::horizontal([Constraint::Max(56)])
        .flex(Flex::Center)
        .areas(chunks[1]);

    let mut lines = vec![
        Line::from(Span::styled(
            "QUIZ BOWL",
            Style::default().fg(Color::Cyan).bold(),
        ))
        .centered(),
        Line::from(Span::styled(
            format!("Up to {} questions per run, from the courses you pick", MAX_QUESTIONS),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
        Line::from(""),
    ];

    for (category, count, _) in app.category_rows() {
        let count_style = if count == 0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<26}", category.display_name()), Style::default().fg(Color::Gray)),
            Span::styled(format!("{:>4}", count), count_style),
        ]));
    }

    lines.push(Line::from(""));
    let bank_size = app.bank_size();
    if bank_size == 0 {
        lines.push(
            Line::from("Empty bank: run `quiz-bowl import` first".fg(Color::Yellow)).centered(),
        );
    } else {
        lines.push(
            Line::from(Span::styled(
                format!("{} questions in the bank", bank_size),
                Style::default().fg(Color::Green),
            ))
            .centered(),
        );
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::vertical(1)),
    );
    frame.render_widget(widget, panel);

    super::render_controls(frame, chunks[3], "enter choose courses  ·  q quit");
}
