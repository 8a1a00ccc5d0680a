/// Flash card screen: labels, answer field and modal dialogs
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::game::{Dialog, FlashCardGame};
use super::INFO;

const LOW_TIME: u32 = 10;

pub fn render(frame: &mut Frame, game: &FlashCardGame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(
        Paragraph::new(format!(" {} ", INFO.name))
            .block(Block::default().borders(Borders::ALL))
            .alignment(Alignment::Center),
        chunks[0],
    );

    let drill = game.drill();
    let secs = drill.seconds_remaining();
    let time_style = if secs <= LOW_TIME {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let question = drill
        .current_question()
        .map(|q| q.to_string())
        .unwrap_or_default();

    let board = vec![
        Line::from(Span::styled(format!("Time Left: {}", secs), time_style)),
        Line::from(Span::styled(
            format!("Score: {}", drill.score()),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(question, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(format!("> {}", game.input())),
    ];
    let board_area = chunks[1];
    frame.render_widget(
        Paragraph::new(board).block(Block::default().borders(Borders::ALL)),
        board_area,
    );

    frame.render_widget(
        Paragraph::new("[Enter] Submit  [Ctrl+R] Restart  [Ctrl+L] Show Combinations  [Esc] Quit")
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        chunks[3],
    );

    match game.dialog() {
        Some(dialog) => render_dialog(frame, dialog),
        None => {
            // Inside the border, on the answer line after "> "
            let x = board_area.x + 3 + game.input().chars().count() as u16;
            let y = board_area.y + 6;
            if x < board_area.right().saturating_sub(1) && y < board_area.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

fn render_dialog(frame: &mut Frame, dialog: &Dialog) {
    let area = frame.area();
    let (title, body, scroll) = match dialog {
        Dialog::Message { title, text } => (title.to_string(), vec![Line::from(text.as_str())], 0),
        Dialog::RoundOver { final_score } => (
            "Game Over".to_string(),
            vec![
                Line::from("Time's up! Game Over."),
                Line::from(format!("Your final score is: {}", final_score)),
                Line::from(""),
                Line::from("Press Enter to restart"),
            ],
            0,
        ),
        Dialog::Combinations { entries, scroll } => (
            format!("All Stored Questions ({} combinations)", entries.len()),
            entries.iter().map(|e| Line::from(e.to_string())).collect(),
            *scroll,
        ),
    };

    let height = match dialog {
        Dialog::Combinations { .. } => area.height.saturating_sub(4),
        _ => body.len() as u16 + 4,
    };
    let popup = centered(area, 60, height);

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(body)
            .block(
                Block::default()
                    .title(format!(" {} ", title))
                    .title_bottom(Line::from(" Enter ").alignment(Alignment::Right))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
