use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::{App, Feedback};
use crate::models::{Choice, Question};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.current_question() else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(8),
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app, question);
    render_question_text(frame, chunks[1], &question.prompt);
    render_options(frame, chunks[2], question, app.selected_option(), app.feedback());
    if let Some(feedback) = app.feedback() {
        render_feedback(frame, chunks[3], question, feedback);
    }

    let controls = if app.feedback().is_some() {
        "enter continue  ·  esc main menu"
    } else {
        "j/k navigate  ·  enter or a-d answer  ·  esc main menu"
    };
    super::render_controls(frame, chunks[5], controls);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let line = Line::from(vec![
        Span::styled(question.category.display_name(), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("{}/{}", app.current_question_number(), app.total_questions()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let widget = Paragraph::new(line).alignment(Alignment::Right);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    selected: usize,
    feedback: Option<&Feedback>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(Choice::ALL.len() * 2);

    for choice in Choice::ALL {
        let is_selected = choice.index() == selected;
        let style = match feedback {
            Some(f) if choice == f.outcome.correct_choice => Style::default().fg(Color::Green).bold(),
            Some(f) if choice == f.choice => Style::default().fg(Color::Red).bold(),
            Some(_) => Style::default().fg(Color::DarkGray),
            None if is_selected => Style::default().fg(Color::Cyan).bold(),
            None => Style::default().fg(Color::Gray),
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", choice), style),
            Span::styled(question.option(choice), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_feedback(frame: &mut Frame, area: Rect, question: &Question, feedback: &Feedback) {
    let (text, color) = if feedback.outcome.correct {
        ("Correct!".to_string(), Color::Green)
    } else {
        let correct = feedback.outcome.correct_choice;
        (
            format!(
                "Incorrect. The correct answer was {}. {}",
                correct,
                question.option(correct)
            ),
            Color::Red,
        )
    };

    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(color)
        .bold();
    frame.render_widget(widget, area);
}
