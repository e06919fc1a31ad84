pub mod ball_bounce;
pub mod donut_chase;
pub mod maze;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::input::Controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// One single-screen game driven by the frame loop. `now` is monotonic
/// seconds from the app's clock.
pub trait Game {
    fn title(&self) -> &'static str;
    fn update(&mut self, controls: &Controls, now: f64);
    fn render(&self, frame: &mut Frame, area: Rect, now: f64);
    fn reset(&mut self, now: f64);
    fn get_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
}

/// Help bar shared by both games.
fn help_line(game_over: bool, moves: &'static str) -> Paragraph<'static> {
    if game_over {
        Paragraph::new(Line::from(vec![
            Span::styled(" 💀 GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled("Press R to restart, Q to quit", Style::default().fg(Color::Gray)),
        ]))
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", moves), Style::default().fg(Color::DarkGray)),
            Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
            Span::styled("Q/Esc Quit", Style::default().fg(Color::DarkGray)),
        ]))
    }
}
