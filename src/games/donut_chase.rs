use log::{debug, warn};
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::DonutConfig;
use crate::games::maze::{Maze, Region};
use crate::games::{help_line, Game, Phase};
use crate::geom::Aabb;
use crate::input::Controls;
use crate::surface::Surface;

const BACKGROUND_COLOR: Color = Color::Rgb(222, 184, 135);
const WALL_COLOR: Color = Color::Rgb(34, 139, 34);
const PLAYER_COLOR: Color = Color::Rgb(0, 0, 255);
const BADGE_COLOR: Color = Color::Rgb(255, 255, 0);
const DONUT_COLOR: Color = Color::Rgb(255, 51, 153);
const FROSTING_COLOR: Color = Color::Rgb(255, 255, 255);
const TEXT_COLOR: Color = Color::Rgb(0, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub score: u32,
}

impl Player {
    fn spawn<R: Rng>(maze: &Maze, rng: &mut R, config: &DonutConfig) -> Self {
        let (col, row) = maze
            .random_path_cell(rng, Region::Interior)
            .unwrap_or_else(|| {
                warn!("Maze has no interior path, spawning player in the corner");
                (0, 0)
            });
        let (x, y) = maze.cell_origin(col, row, config.player_size);
        Self {
            x,
            y,
            size: config.player_size,
            speed: config.player_speed,
            score: 0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    /// One tick of movement. The whole step is dropped if it would touch a
    /// wall (no sliding along it), then the result is kept on screen.
    /// Returns whether the step was taken.
    fn step(&mut self, controls: &Controls, maze: &Maze, config: &DonutConfig) -> bool {
        let mut x = self.x;
        let mut y = self.y;
        if controls.left {
            x -= self.speed;
        }
        if controls.right {
            x += self.speed;
        }
        if controls.up {
            y -= self.speed;
        }
        if controls.down {
            y += self.speed;
        }

        let moved = !maze.collides(&Aabb::new(x, y, self.size, self.size));
        if moved {
            self.x = x;
            self.y = y;
        }
        (self.x, self.y) = config.clamp_to_screen(self.x, self.y, self.size);
        moved
    }

    fn draw(&self, surface: &mut Surface) {
        let cx = self.x + self.size / 2.0;
        surface.fill_circle(cx, self.y + self.size / 2.0, self.size / 2.0, PLAYER_COLOR);
        surface.fill_circle(cx, self.y + self.size / 3.0, self.size / 6.0, BADGE_COLOR);
    }
}

/// A timed pickup. Once inactive it is pruned and never comes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Donut {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub spawn_time: f64,
    pub active: bool,
}

impl Donut {
    pub fn new(x: f32, y: f32, size: f32, spawn_time: f64) -> Self {
        Self { x, y, size, spawn_time, active: true }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.size, self.size)
    }

    pub fn is_expired(&self, now: f64, appear_time: f64) -> bool {
        now - self.spawn_time > appear_time
    }

    fn draw(&self, surface: &mut Surface) {
        let cx = self.x + self.size / 2.0;
        let cy = self.y + self.size / 2.0;
        surface.fill_circle(cx, cy, self.size / 2.0, DONUT_COLOR);
        surface.circle_outline(cx, cy, self.size / 3.0, 2.0, FROSTING_COLOR);
        surface.fill_circle(cx, cy, self.size / 5.0, BACKGROUND_COLOR);
    }
}

/// Everything a restart throws away.
struct Round {
    player: Player,
    donuts: Vec<Donut>,
    missed: u32,
    phase: Phase,
    last_spawn_time: f64,
}

impl Round {
    fn new<R: Rng>(maze: &Maze, rng: &mut R, config: &DonutConfig, now: f64) -> Self {
        Self {
            player: Player::spawn(maze, rng, config),
            donuts: Vec::new(),
            missed: 0,
            phase: Phase::Playing,
            last_spawn_time: now,
        }
    }
}

/// Catch the donuts that pop up around the maze before they go stale.
pub struct DonutChase<R> {
    config: DonutConfig,
    maze: Maze,
    rng: R,
    best: u32,
    round: Round,
}

impl<R: Rng> DonutChase<R> {
    pub fn new(config: DonutConfig, maze: Maze, mut rng: R, now: f64) -> Self {
        let round = Round::new(&maze, &mut rng, &config, now);
        Self { config, maze, rng, best: 0, round }
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.round.player
    }

    pub fn donuts(&self) -> &[Donut] {
        &self.round.donuts
    }

    pub fn missed(&self) -> u32 {
        self.round.missed
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    fn spawn_donut(&mut self, now: f64) {
        let Some((col, row)) = self.maze.random_path_cell(&mut self.rng, Region::Anywhere) else {
            return;
        };
        let size = self.config.donut_size;
        let (x, y) = self.maze.cell_origin(col, row, size);
        self.round.donuts.push(Donut::new(x, y, size, now));
        debug!("Donut spawned at cell ({}, {})", col, row);
    }

    /// Collection is checked before expiry, so a donut grabbed on the tick it
    /// would have gone stale still counts.
    fn resolve_donuts(&mut self, now: f64) {
        let round = &mut self.round;
        let player = round.player.bounds();
        for donut in round.donuts.iter_mut().filter(|d| d.active) {
            if donut.bounds().intersects(&player) {
                donut.active = false;
                round.player.score += 1;
                debug!("Donut collected, score {}", round.player.score);
            } else if donut.is_expired(now, self.config.donut_appear_time) {
                donut.active = false;
                round.missed += 1;
                debug!("Donut missed ({}/{})", round.missed, self.config.max_missed);
            }
        }
        round.donuts.retain(|d| d.active);
    }

    fn draw(&self, surface: &mut Surface) {
        let c = &self.config;
        let round = &self.round;

        surface.fill(BACKGROUND_COLOR);
        for wall in self.maze.walls() {
            surface.fill_rect(wall.x, wall.y, wall.w, wall.h, WALL_COLOR);
        }
        round.player.draw(surface);
        for donut in &round.donuts {
            donut.draw(surface);
        }

        surface.text(10.0, 10.0, &format!("Score: {}", round.player.score), TEXT_COLOR);
        surface.text(10.0, 50.0, &format!("Missed: {}/{}", round.missed, c.max_missed), TEXT_COLOR);
        if round.phase == Phase::GameOver {
            surface.text(
                c.screen_width / 2.0 - 180.0,
                c.screen_height / 2.0,
                "Game Over! Press R to restart",
                TEXT_COLOR,
            );
        }
    }
}

impl<R: Rng> Game for DonutChase<R> {
    fn title(&self) -> &'static str {
        "Donut Chase"
    }

    fn update(&mut self, controls: &Controls, now: f64) {
        if self.round.phase == Phase::GameOver {
            return;
        }

        self.round.player.step(controls, &self.maze, &self.config);

        if now - self.round.last_spawn_time > self.config.donut_spawn_rate {
            self.spawn_donut(now);
            self.round.last_spawn_time = now;
        }

        self.resolve_donuts(now);

        if self.round.missed >= self.config.max_missed {
            self.round.phase = Phase::GameOver;
            self.best = self.best.max(self.round.player.score);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, _now: f64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(255, 51, 153)))
            .title(" 🍩 Donut Chase ")
            .title_style(Style::default().fg(Color::Rgb(255, 120, 190)).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(4),
                Constraint::Length(1),
            ])
            .split(inner);

        let round = &self.round;
        let status = Line::from(vec![
            Span::styled(" 🚓 ", Style::default()),
            Span::styled(
                format!("Score: {} ", round.player.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Missed: {}/{} ", round.missed, self.config.max_missed),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Donuts: {} ", round.donuts.len()),
                Style::default().fg(Color::Magenta),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("🏆 Best: {} ", self.best.max(round.player.score)),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let field = chunks[1];
        let mut surface = Surface::new(field.width, field.height, self.config.screen_width, self.config.screen_height);
        self.draw(&mut surface);
        frame.render_widget(Paragraph::new(surface.into_lines()), field);

        frame.render_widget(help_line(round.phase == Phase::GameOver, "←↑↓→ Move"), chunks[2]);
    }

    fn reset(&mut self, now: f64) {
        self.round = Round::new(&self.maze, &mut self.rng, &self.config, now);
    }

    fn get_score(&self) -> u32 {
        self.round.player.score
    }

    fn is_game_over(&self) -> bool {
        self.round.phase == Phase::GameOver
    }
}
