use crate::shared::DisplayState;
use super::grid::draw_step_grid;
use super::mode::TuiState;
use ratatui::layout::{Layout, Direction, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const HELP: &str =
    "arrows/hjkl move  enter/x toggle  space play  c clear  [ ] { } tempo  - = steps  , . volume  r reload  q quit";

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState, ts: &TuiState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // transport bar
            Constraint::Min(9), // grid: header + six rows + borders
            Constraint::Length(1), // key help
        ])
        .split(area);

    draw_transport(frame, sections[0], state);
    draw_step_grid(frame, sections[1], state, (ts.cursor_row, ts.cursor_col));
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
        sections[2],
    );
}

fn draw_transport(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let (icon, icon_style) = if state.playing {
        ("▶ PLAY", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        ("■ STOP", Style::default().fg(Color::Gray))
    };
    let line = Line::from(vec![
        Span::styled(icon, icon_style),
        Span::raw(format!("   {} BPM", state.bpm)),
        Span::raw(format!("   {}/{} steps", state.steps, state.max_steps)),
        Span::raw(format!("   vol {:>3.0}%", state.volume * 100.0)),
    ]);
    let block = Block::default().borders(Borders::ALL).title(" drumgrid ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}
