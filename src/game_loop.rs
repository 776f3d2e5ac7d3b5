use std::io;
use std::time::{Duration, Instant};

use log::info;

use crate::game::Game;
use crate::input::GameInput;

/// Source of player input, polled between ticks.
pub trait InputSource {
    /// Waits up to `timeout` for one input event.
    fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>>;
}

/// How a play session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionEnd {
    GameOver { score: u32 },
    /// The player quit; nothing is recorded.
    Quit,
}

/// Fixed-period tick schedule.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    interval: Duration,
    last_tick: Instant,
}

impl TickClock {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: Instant::now(),
        }
    }

    /// Time left before the next tick is due.
    #[must_use]
    pub fn until_next_tick(&self) -> Duration {
        self.interval.saturating_sub(self.last_tick.elapsed())
    }

    #[must_use]
    pub fn is_due(&self) -> bool {
        self.last_tick.elapsed() >= self.interval
    }

    pub fn restart(&mut self) {
        self.last_tick = Instant::now();
    }
}

/// Runs `game` until it ends or the player quits.
///
/// Input is drained between ticks and only latches a direction; the state
/// only advances when the clock fires. `draw` is called once up front and
/// after every tick, including the final one.
pub fn run_session<I, D>(
    game: &mut Game,
    input: &mut I,
    interval: Duration,
    mut draw: D,
) -> io::Result<SessionEnd>
where
    I: InputSource + ?Sized,
    D: FnMut(&Game) -> io::Result<()>,
{
    info!("session started, tick interval {interval:?}");
    let mut clock = TickClock::new(interval);
    draw(game)?;

    loop {
        match input.poll_input(clock.until_next_tick())? {
            Some(GameInput::Quit) => {
                info!("player quit after {} ticks", game.tick_count);
                return Ok(SessionEnd::Quit);
            }
            Some(GameInput::Direction(direction)) => game.steer(direction),
            None => {}
        }

        if !clock.is_due() {
            continue;
        }

        clock.restart();
        game.tick();
        draw(game)?;

        if game.is_over() {
            return Ok(SessionEnd::GameOver { score: game.score });
        }
    }
}
