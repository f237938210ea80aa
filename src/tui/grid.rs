use crate::shared::{DisplayState, SoundId, SoundStatus};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

const LABEL_WIDTH: usize = 9;

pub fn draw_step_grid(frame: &mut Frame, area: Rect, state: &DisplayState, cursor: (usize, usize)) {
    let mut lines = Vec::with_capacity(state.grid.len() + 1);
    lines.push(step_numbers(state));

    for (row_idx, (row, sound)) in state.grid.iter().zip(SoundId::ALL).enumerate() {
        let mut spans = vec![label(sound, state.sounds[sound.index()])];
        for (col_idx, &active) in row.iter().enumerate() {
            let on_playhead = state.playhead == Some(col_idx);
            let mut style = match (active, on_playhead) {
                (true, true) => Style::default().fg(Color::White).bg(Color::LightMagenta),
                (true, false) => Style::default().fg(Color::LightMagenta),
                (false, true) => Style::default().fg(Color::Gray).bg(Color::DarkGray),
                (false, false) => Style::default().fg(Color::DarkGray),
            };
            if cursor == (row_idx, col_idx) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let glyph = if active { "■" } else { "·" };
            spans.push(Span::styled(glyph, style));
            // group by beat
            spans.push(Span::raw(if col_idx % 4 == 3 { "  " } else { " " }));
        }
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::ALL).title(" pattern ");
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn step_numbers(state: &DisplayState) -> Line<'static> {
    let mut spans = vec![Span::raw(" ".repeat(LABEL_WIDTH))];
    for col in 0..state.steps {
        let style = if state.playhead == Some(col) {
            Style::default().fg(Color::LightMagenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        // one character per step: the beat number on downbeats
        let mark = if col % 4 == 0 { ((col / 4 + 1) % 10).to_string() } else { " ".into() };
        spans.push(Span::styled(mark, style));
        spans.push(Span::raw(if col % 4 == 3 { "  " } else { " " }));
    }
    Line::from(spans)
}

fn label(sound: SoundId, status: SoundStatus) -> Span<'static> {
    let style = match status {
        SoundStatus::Ready => Style::default().fg(Color::White),
        SoundStatus::Pending => Style::default().fg(Color::Yellow),
        SoundStatus::Failed => Style::default().fg(Color::Red).add_modifier(Modifier::CROSSED_OUT),
    };
    Span::styled(format!("{:<width$}", sound.label(), width = LABEL_WIDTH), style)
}
