//! Ball Bounce: keep the ball in play while it speeds up.
//!
//! Logs go to stderr; run with `RUST_LOG=debug ball-bounce 2>ball.log` to keep them.

use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use twin_arcade::app::{self, FrameClock};
use twin_arcade::config::BallConfig;
use twin_arcade::games::ball_bounce::BallBounce;

fn main() -> io::Result<()> {
    env_logger::init();

    let clock = FrameClock::start();
    let game = BallBounce::new(BallConfig::default(), StdRng::from_entropy(), clock.now());
    app::run(game, clock)
}
