//! Donut Chase: run the maze and grab each donut before it goes stale.
//!
//! Logs go to stderr; run with `RUST_LOG=debug donut-chase 2>donut.log` to keep them.

use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use twin_arcade::app::{self, FrameClock};
use twin_arcade::config::DonutConfig;
use twin_arcade::games::donut_chase::DonutChase;
use twin_arcade::games::maze::Maze;

fn main() -> io::Result<()> {
    env_logger::init();

    let config = DonutConfig::default();
    let maze = Maze::classic(config.cell_size);
    let clock = FrameClock::start();
    let game = DonutChase::new(config, maze, StdRng::from_entropy(), clock.now());
    app::run(game, clock)
}
