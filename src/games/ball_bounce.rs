use std::f32::consts::PI;

use log::debug;
use rand::Rng;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::BallConfig;
use crate::games::{help_line, Game, Phase};
use crate::input::Controls;
use crate::surface::Surface;

/// Largest deflection from vertical a paddle edge can impart (60°).
const MAX_BOUNCE_ANGLE: f32 = PI / 3.0;
const GRASS_STRIPE: f32 = 30.0;

const GRASS_LIGHT: Color = Color::Rgb(76, 187, 23);
const GRASS_DARK: Color = Color::Rgb(56, 142, 17);
const PADDLE_COLOR: Color = Color::Rgb(0, 0, 139);
const BALL_COLOR: Color = Color::Rgb(255, 255, 255);
const TEXT_COLOR: Color = Color::Rgb(255, 0, 0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Paddle {
    fn new(config: &BallConfig) -> Self {
        Self {
            x: config.paddle_start_x(),
            y: config.paddle_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
        }
    }

    fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// One tick of horizontal input.
    fn steer(&mut self, controls: &Controls, config: &BallConfig) {
        if controls.left {
            self.x -= self.speed;
        }
        if controls.right {
            self.x += self.speed;
        }
        self.x = config.clamp_paddle_x(self.x);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub radius: f32,
}

impl Ball {
    /// Ball at screen centre heading along `angle` (radians, +y is down).
    fn launch(config: &BallConfig, angle: f32) -> Self {
        Self {
            x: config.screen_width / 2.0,
            y: config.screen_height / 2.0,
            dx: config.ball_speed * angle.cos(),
            dy: config.ball_speed * angle.sin(),
            radius: config.ball_radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.dx.hypot(self.dy)
    }

    /// Rescale the velocity to `speed`, keeping the heading.
    pub fn set_speed(&mut self, speed: f32) {
        let current = self.speed();
        if current > 0.0 {
            let ratio = speed / current;
            self.dx *= ratio;
            self.dy *= ratio;
        }
    }

    /// Reflect off the left, right and top edges. Only a component heading
    /// into a wall flips, so a ball that overshot cannot get stuck.
    pub fn bounce_walls(&mut self, screen_width: f32) -> bool {
        let mut bounced = false;
        if (self.x <= self.radius && self.dx < 0.0)
            || (self.x >= screen_width - self.radius && self.dx > 0.0)
        {
            self.dx = -self.dx;
            bounced = true;
        }
        if self.y <= self.radius && self.dy < 0.0 {
            self.dy = -self.dy;
            bounced = true;
        }
        bounced
    }

    /// Bottom edge reached the paddle top while over its span and falling.
    pub fn hits_paddle(&self, paddle: &Paddle) -> bool {
        self.dy > 0.0
            && self.y + self.radius >= paddle.y
            && self.x >= paddle.x
            && self.x <= paddle.x + paddle.width
    }

    fn deflect_off(&mut self, paddle: &Paddle) {
        let offset = (self.x - paddle.center_x()) / (paddle.width / 2.0);
        let (ux, uy) = bounce_direction(offset);
        let speed = self.speed();
        self.dx = ux * speed;
        self.dy = uy * speed;
    }
}

/// Speed multiplier after `elapsed` seconds, before the cap.
pub fn speed_multiplier(config: &BallConfig, elapsed: f32) -> f32 {
    1.0 + elapsed.max(0.0) * config.speed_increase_rate
}

/// Ball speed after `elapsed` seconds of play.
pub fn speed_at(config: &BallConfig, elapsed: f32) -> f32 {
    (config.ball_speed * speed_multiplier(config, elapsed))
        .min(config.ball_speed * config.max_speed_multiplier)
}

/// Unit direction after a paddle hit. `offset` is the hit point relative to
/// the paddle centre, -1 at the left edge and 1 at the right edge; the
/// result leans up to 60° toward that side and always points up.
pub fn bounce_direction(offset: f32) -> (f32, f32) {
    let angle = offset.clamp(-1.0, 1.0) * MAX_BOUNCE_ANGLE;
    let dx = angle.sin();
    let dy = -angle.cos();
    (dx, if dy > 0.0 { -dy } else { dy })
}

/// Everything a restart throws away.
struct Round {
    paddle: Paddle,
    ball: Ball,
    score: u32,
    phase: Phase,
    start_time: f64,
}

impl Round {
    fn new<R: Rng>(config: &BallConfig, rng: &mut R, now: f64) -> Self {
        // Downward half-plane, 45° to 135°
        let angle = rng.gen_range(PI / 4.0..=3.0 * PI / 4.0);
        Self {
            paddle: Paddle::new(config),
            ball: Ball::launch(config, angle),
            score: 0,
            phase: Phase::Playing,
            start_time: now,
        }
    }
}

/// Keep the ball off the grass with a paddle while it keeps speeding up.
pub struct BallBounce<R> {
    config: BallConfig,
    rng: R,
    best: u32,
    round: Round,
}

impl<R: Rng> BallBounce<R> {
    pub fn new(config: BallConfig, mut rng: R, now: f64) -> Self {
        let round = Round::new(&config, &mut rng, now);
        Self { config, rng, best: 0, round }
    }

    pub fn paddle(&self) -> &Paddle {
        &self.round.paddle
    }

    pub fn ball(&self) -> &Ball {
        &self.round.ball
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn elapsed(&self, now: f64) -> f32 {
        (now - self.round.start_time).max(0.0) as f32
    }

    fn draw(&self, surface: &mut Surface, now: f64) {
        let c = &self.config;
        let round = &self.round;

        // Grass checkerboard
        let mut y = 0.0;
        while y < c.screen_height {
            let mut x = 0.0;
            while x < c.screen_width {
                let even = ((x / GRASS_STRIPE) as u32 + (y / GRASS_STRIPE) as u32) % 2 == 0;
                let color = if even { GRASS_LIGHT } else { GRASS_DARK };
                surface.fill_rect(x, y, GRASS_STRIPE, GRASS_STRIPE, color);
                x += GRASS_STRIPE;
            }
            y += GRASS_STRIPE;
        }

        let p = &round.paddle;
        surface.fill_rect(p.x, p.y, p.width, p.height, PADDLE_COLOR);
        let b = &round.ball;
        surface.fill_circle(b.x, b.y, b.radius, BALL_COLOR);

        surface.text(10.0, 10.0, &format!("Score: {}", round.score), TEXT_COLOR);
        match round.phase {
            Phase::Playing => {
                let multiplier = speed_multiplier(c, self.elapsed(now));
                surface.text(10.0, 50.0, &format!("Speed: {:.2}x", multiplier), TEXT_COLOR);
            }
            Phase::GameOver => {
                surface.text(
                    c.screen_width / 2.0 - 150.0,
                    c.screen_height / 2.0,
                    "Game Over! Press R to restart",
                    TEXT_COLOR,
                );
            }
        }
    }
}

impl<R: Rng> Game for BallBounce<R> {
    fn title(&self) -> &'static str {
        "Ball Bounce"
    }

    fn update(&mut self, controls: &Controls, now: f64) {
        if self.round.phase == Phase::GameOver {
            return;
        }
        let speed = speed_at(&self.config, self.elapsed(now));
        let config = &self.config;
        let round = &mut self.round;

        round.paddle.steer(controls, config);

        round.ball.set_speed(speed);
        round.ball.x += round.ball.dx;
        round.ball.y += round.ball.dy;
        round.ball.bounce_walls(config.screen_width);

        if round.ball.hits_paddle(&round.paddle) {
            round.ball.deflect_off(&round.paddle);
            round.score += 1;
            debug!("Paddle hit at x={:.1}, score {}", round.ball.x, round.score);
        }

        if round.ball.y >= config.screen_height {
            round.phase = Phase::GameOver;
            self.best = self.best.max(round.score);
        }
    }

    fn render(&self, frame: &mut Frame, area: Rect, now: f64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(76, 187, 23)))
            .title(" 🏐 Ball Bounce ")
            .title_style(Style::default().fg(Color::Rgb(120, 220, 80)).add_modifier(Modifier::BOLD));

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

        let status = Line::from(vec![
            Span::styled(" 🏐 ", Style::default()),
            Span::styled(
                format!("Score: {} ", self.round.score),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("🏆 Best: {} ", self.best.max(self.round.score)),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("Speed: {:.1} px/tick ", self.round.ball.speed()),
                Style::default().fg(Color::Green),
            ),
        ]);
        frame.render_widget(Paragraph::new(status), chunks[0]);

        let field = chunks[1];
        let mut surface = Surface::new(field.width, field.height, self.config.screen_width, self.config.screen_height);
        self.draw(&mut surface, now);
        frame.render_widget(Paragraph::new(surface.into_lines()), field);

        let game_over = self.round.phase == Phase::GameOver;
        frame.render_widget(help_line(game_over, "←→ Move Paddle"), chunks[2]);
    }

    fn reset(&mut self, now: f64) {
        self.round = Round::new(&self.config, &mut self.rng, now);
    }

    fn get_score(&self) -> u32 {
        self.round.score
    }

    fn is_game_over(&self) -> bool {
        self.round.phase == Phase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    const EPS: f32 = 1e-3;

    fn new_game(seed: u64) -> BallBounce<ChaCha8Rng> {
        BallBounce::new(BallConfig::new(), ChaCha8Rng::seed_from_u64(seed), 0.0)
    }

    fn place_ball(game: &mut BallBounce<ChaCha8Rng>, x: f32, y: f32, dx: f32, dy: f32) {
        game.round.ball.x = x;
        game.round.ball.y = y;
        game.round.ball.dx = dx;
        game.round.ball.dy = dy;
    }

    #[test]
    fn test_speed_ramp_example() {
        let config = BallConfig::new();
        assert!((speed_multiplier(&config, 10.0) - 1.5).abs() < EPS);
        assert!((speed_at(&config, 10.0) - 7.5).abs() < EPS);
    }

    #[test]
    fn test_speed_ramp_caps_at_three_times_base() {
        let config = BallConfig::new();
        assert_eq!(speed_at(&config, 0.0), 5.0);
        assert_eq!(speed_at(&config, 40.0), 15.0);
        assert_eq!(speed_at(&config, 1000.0), 15.0);
    }

    #[test]
    fn test_update_renormalizes_to_ramp_after_bounces() {
        let mut game = new_game(1);
        // Heading into the left wall at an odd speed
        place_ball(&mut game, 12.0, 300.0, -20.0, 3.0);
        game.update(&Controls::default(), 0.0);
        assert!((game.ball().speed() - 5.0).abs() < EPS);

        game.update(&Controls::default(), 10.0);
        assert!((game.ball().speed() - 7.5).abs() < EPS, "speed {}", game.ball().speed());
    }

    #[test]
    fn test_left_wall_bounce_flips_dx_only() {
        let mut ball = Ball { x: 5.0, y: 300.0, dx: -3.0, dy: 4.0, radius: 10.0 };
        assert!(ball.bounce_walls(800.0));
        assert_eq!(ball.dx, 3.0);
        assert_eq!(ball.dy, 4.0);
    }

    #[test]
    fn test_right_wall_bounce_flips_dx_only() {
        let mut ball = Ball { x: 795.0, y: 300.0, dx: 3.0, dy: -4.0, radius: 10.0 };
        assert!(ball.bounce_walls(800.0));
        assert_eq!(ball.dx, -3.0);
        assert_eq!(ball.dy, -4.0);
    }

    #[test]
    fn test_top_wall_bounce_flips_dy_only() {
        let mut ball = Ball { x: 400.0, y: 8.0, dx: 2.0, dy: -4.5, radius: 10.0 };
        assert!(ball.bounce_walls(800.0));
        assert_eq!(ball.dx, 2.0);
        assert_eq!(ball.dy, 4.5);
    }

    #[test]
    fn test_ball_leaving_wall_does_not_bounce_again() {
        let mut ball = Ball { x: 5.0, y: 300.0, dx: 3.0, dy: 4.0, radius: 10.0 };
        assert!(!ball.bounce_walls(800.0));
        assert_eq!(ball.dx, 3.0);
    }

    #[test]
    fn test_bounce_direction_edges_and_centre() {
        let (dx, dy) = bounce_direction(0.0);
        assert!(dx.abs() < EPS);
        assert!((dy + 1.0).abs() < EPS);

        let (dx, dy) = bounce_direction(1.0);
        assert!((dx - (PI / 3.0).sin()).abs() < EPS);
        assert!((dy + 0.5).abs() < EPS);

        let (dx, _) = bounce_direction(-1.0);
        assert!((dx + (PI / 3.0).sin()).abs() < EPS);
    }

    #[test]
    fn test_bounce_direction_is_monotonic() {
        let mut last = f32::NEG_INFINITY;
        for i in 0..=200 {
            let offset = -1.0 + i as f32 / 100.0;
            let (dx, _) = bounce_direction(offset);
            assert!(dx >= last, "dx must not decrease at offset {}", offset);
            last = dx;
        }
    }

    #[test]
    fn test_paddle_hit_scores_and_sends_ball_up() {
        let mut game = new_game(2);
        // Paddle spans x 350..450 with its top at y 575
        place_ball(&mut game, 400.0, 560.0, 0.0, 5.0);
        game.update(&Controls::default(), 0.0);

        assert_eq!(game.get_score(), 1);
        assert!(game.ball().dy < 0.0);
        assert!((game.ball().speed() - 5.0).abs() < EPS);
        assert_eq!(game.phase(), Phase::Playing);
    }

    #[test]
    fn test_off_centre_hit_deflects_toward_that_side() {
        let mut game = new_game(3);
        place_ball(&mut game, 440.0, 560.0, 0.0, 5.0);
        game.update(&Controls::default(), 0.0);
        assert_eq!(game.get_score(), 1);
        assert!(game.ball().dx > 0.0);
        assert!(game.ball().dy < 0.0);
    }

    #[test]
    fn test_rising_ball_passes_paddle_without_scoring() {
        let mut game = new_game(4);
        place_ball(&mut game, 400.0, 570.0, 0.0, -5.0);
        game.update(&Controls::default(), 0.0);
        assert_eq!(game.get_score(), 0);
        assert!(game.ball().dy < 0.0);
    }

    #[test]
    fn test_ball_past_bottom_ends_game_and_freezes() {
        let mut game = new_game(5);
        place_ball(&mut game, 100.0, 597.0, 0.0, 5.0);
        game.update(&Controls::default(), 0.0);
        assert!(game.is_game_over());

        let frozen = *game.ball();
        let paddle = *game.paddle();
        let held = Controls { left: true, ..Default::default() };
        game.update(&held, 1.0);
        game.update(&held, 2.0);
        assert_eq!(*game.ball(), frozen);
        assert_eq!(*game.paddle(), paddle);
    }

    #[test]
    fn test_paddle_clamped_to_screen() {
        let mut game = new_game(6);
        game.round.paddle.x = 4.0;
        game.round.paddle.steer(&Controls { left: true, ..Default::default() }, &game.config);
        assert_eq!(game.paddle().x, 0.0);

        game.round.paddle.x = 696.0;
        game.round.paddle.steer(&Controls { right: true, ..Default::default() }, &game.config);
        assert_eq!(game.paddle().x, 700.0);
    }

    #[test]
    fn test_initial_direction_is_downward_half_plane() {
        for seed in 0..50 {
            let game = new_game(seed);
            let ball = game.ball();
            assert!((ball.speed() - 5.0).abs() < EPS);
            // sin(45°) of the base speed at least
            assert!(ball.dy >= 5.0 * (PI / 4.0).sin() - EPS, "seed {} dy {}", seed, ball.dy);
            assert_eq!((ball.x, ball.y), (400.0, 300.0));
        }
    }

    #[test]
    fn test_reset_starts_fresh_round_and_keeps_best() {
        let mut game = new_game(7);
        game.round.score = 4;
        place_ball(&mut game, 100.0, 599.0, 0.0, 5.0);
        game.update(&Controls::default(), 20.0);
        assert!(game.is_game_over());
        assert_eq!(game.best(), 4);

        game.reset(30.0);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.get_score(), 0);
        assert_eq!(game.best(), 4);
        assert_eq!(game.elapsed(30.0), 0.0);
        assert_eq!(game.paddle().x, 350.0);
        assert!(game.ball().dy > 0.0);
    }

    #[test]
    fn test_render_shows_game_over_prompt() {
        let mut game = new_game(8);
        place_ball(&mut game, 100.0, 599.0, 0.0, 5.0);
        game.update(&Controls::default(), 0.0);

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                game.render(frame, area, 1.0)
            })
            .unwrap();
        let text: String = terminal.backend().buffer().content.iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Game Over! Press R to restart"));
        assert!(text.contains("Score: 0"));
    }

    proptest! {
        #[test]
        fn prop_speed_follows_ramp(elapsed in 0.0f64..400.0, angle in 0.0f32..std::f32::consts::TAU, scale in 0.1f32..40.0) {
            let mut game = new_game(9);
            place_ball(&mut game, 400.0, 300.0, scale * angle.cos(), scale * angle.sin());
            game.update(&Controls::default(), elapsed);
            let expected = speed_at(&game.config, elapsed as f32);
            prop_assert!((game.ball().speed() - expected).abs() < expected * 1e-4);
        }

        #[test]
        fn prop_bounce_stays_within_sixty_degrees(offset in -1.0f32..=1.0) {
            let (dx, dy) = bounce_direction(offset);
            prop_assert!(dy < 0.0);
            prop_assert!(dx.atan2(-dy).abs() <= MAX_BOUNCE_ANGLE + 1e-5);
            prop_assert!((dx.hypot(dy) - 1.0).abs() < 1e-5);
        }
    }
}
