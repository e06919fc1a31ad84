/// Logical canvas both games draw on.
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Frame tick (~60 FPS).
pub const TICK_RATE_MS: u64 = 16;
/// How long a key stays held after its last press when the terminal
/// never reports releases.
pub const KEY_HOLD_MS: u64 = 150;

/// Ball Bounce tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct BallParams;

impl BallParams {
    // Paddle
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 8.0;
    pub const PADDLE_MARGIN: f32 = 10.0;

    // Ball
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_SPEED: f32 = 5.0;
    pub const SPEED_INCREASE_RATE: f32 = 0.05;
    pub const MAX_SPEED_MULTIPLIER: f32 = 3.0;
}

/// Ball Bounce configuration
#[derive(Debug, Clone)]
pub struct BallConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    /// Gap between the paddle's bottom edge and the bottom of the screen
    pub paddle_margin: f32,
    pub ball_radius: f32,
    /// Speed at elapsed time zero, in pixels per tick
    pub ball_speed: f32,
    /// Multiplier growth per elapsed second
    pub speed_increase_rate: f32,
    pub max_speed_multiplier: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            paddle_width: BallParams::PADDLE_WIDTH,
            paddle_height: BallParams::PADDLE_HEIGHT,
            paddle_speed: BallParams::PADDLE_SPEED,
            paddle_margin: BallParams::PADDLE_MARGIN,
            ball_radius: BallParams::BALL_RADIUS,
            ball_speed: BallParams::BALL_SPEED,
            speed_increase_rate: BallParams::SPEED_INCREASE_RATE,
            max_speed_multiplier: BallParams::MAX_SPEED_MULTIPLIER,
        }
    }
}

impl BallConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Top edge of the paddle; the paddle never moves vertically
    pub fn paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_height - self.paddle_margin
    }

    /// Left edge of a paddle centred on the screen
    pub fn paddle_start_x(&self) -> f32 {
        self.screen_width / 2.0 - self.paddle_width / 2.0
    }

    /// Clamp paddle X to screen bounds
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        x.clamp(0.0, (self.screen_width - self.paddle_width).max(0.0))
    }
}

/// Donut Chase tuning parameters
#[derive(Debug, Clone, Copy)]
pub struct DonutParams;

impl DonutParams {
    pub const CELL_SIZE: f32 = 40.0;

    // Player
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PLAYER_SPEED: f32 = 4.0;

    // Donuts
    pub const DONUT_SIZE: f32 = 20.0;
    pub const DONUT_APPEAR_TIME: f64 = 5.0;
    pub const DONUT_SPAWN_RATE: f64 = 3.0;
    pub const MAX_MISSED_DONUTS: u32 = 3;
}

/// Donut Chase configuration
#[derive(Debug, Clone)]
pub struct DonutConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub cell_size: f32,
    pub player_size: f32,
    pub player_speed: f32,
    pub donut_size: f32,
    /// Seconds a donut stays before it counts as missed
    pub donut_appear_time: f64,
    /// Seconds between donut spawns
    pub donut_spawn_rate: f64,
    pub max_missed: u32,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: DonutParams::CELL_SIZE,
            player_size: DonutParams::PLAYER_SIZE,
            player_speed: DonutParams::PLAYER_SPEED,
            donut_size: DonutParams::DONUT_SIZE,
            donut_appear_time: DonutParams::DONUT_APPEAR_TIME,
            donut_spawn_rate: DonutParams::DONUT_SPAWN_RATE,
            max_missed: DonutParams::MAX_MISSED_DONUTS,
        }
    }
}

impl DonutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamp a square of `size` to screen bounds
    pub fn clamp_to_screen(&self, x: f32, y: f32, size: f32) -> (f32, f32) {
        (
            x.clamp(0.0, (self.screen_width - size).max(0.0)),
            y.clamp(0.0, (self.screen_height - size).max(0.0)),
        )
    }
}
