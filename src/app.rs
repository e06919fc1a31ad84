use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

use crate::config::{KEY_HOLD_MS, TICK_RATE_MS};
use crate::event::{Event, EventHandler};
use crate::games::Game;
use crate::input::{Command, KeyTracker};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Monotonic seconds since the clock started.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    origin: Instant,
}

impl FrameClock {
    pub fn start() -> Self {
        Self { origin: Instant::now() }
    }

    pub fn seconds_at(&self, instant: Instant) -> f64 {
        instant.saturating_duration_since(self.origin).as_secs_f64()
    }

    pub fn now(&self) -> f64 {
        self.seconds_at(Instant::now())
    }
}

/// Playing/GameOver driver around one game: updates only while playing,
/// restarts on R after a game over, quits on request.
pub struct App<G> {
    pub should_quit: bool,
    pub game: G,
    clock: FrameClock,
    keys: KeyTracker,
}

impl<G: Game> App<G> {
    pub fn new(game: G, clock: FrameClock) -> Self {
        Self {
            should_quit: false,
            game,
            clock,
            keys: KeyTracker::new(Duration::from_millis(KEY_HOLD_MS)),
        }
    }

    pub fn on_tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn tick_at(&mut self, instant: Instant) {
        if self.game.is_game_over() {
            return;
        }
        let controls = self.keys.controls(instant);
        self.game.update(&controls, self.clock.seconds_at(instant));
        if self.game.is_game_over() {
            info!("{} over, final score {}", self.game.title(), self.game.get_score());
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        self.key_at(key, Instant::now());
    }

    fn key_at(&mut self, key: KeyEvent, instant: Instant) {
        match self.keys.on_key(&key, instant) {
            Command::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Command::Restart if self.game.is_game_over() => {
                self.game.reset(self.clock.seconds_at(instant));
                self.keys.clear();
                info!("{} restarted", self.game.title());
            }
            Command::Restart | Command::None => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        self.game.render(frame, area, self.clock.now());
    }
}

/// Takes over the terminal, runs `game` until quit, and gives the terminal
/// back on every exit path.
pub fn run<G: Game>(game: G, clock: FrameClock) -> io::Result<()> {
    let (mut terminal, enhanced) = init_terminal()?;
    let mut app = App::new(game, clock);
    let result = event_loop(&mut terminal, &mut app);
    restore_terminal(&mut terminal, enhanced)?;
    if result.is_ok() {
        info!("{} exited, score {}", app.game.title(), app.game.get_score());
    }
    result
}

fn init_terminal() -> io::Result<(Tui, bool)> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Release events let held keys end exactly when the key comes up
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    info!("Keyboard release events {}", if enhanced { "enabled" } else { "unavailable" });
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;
    Ok((terminal, enhanced))
}

fn restore_terminal(terminal: &mut Tui, enhanced: bool) -> io::Result<()> {
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop<G: Game>(terminal: &mut Tui, app: &mut App<G>) -> io::Result<()> {
    let size = terminal.size()?;
    info!("{} started on a {}x{} terminal", app.game.title(), size.width, size.height);
    let events = EventHandler::new(TICK_RATE_MS);

    loop {
        match events.next()? {
            Event::Tick => {
                app.on_tick();
                terminal.draw(|frame| app.render(frame))?;
            }
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
