use std::time::{Duration, Instant};

use crossterm::style::Color;
use log::info;

use crate::Coords;
use crate::config::Settings;
use crate::error::{GameError, GameResult};
use crate::game::{GameState, Phase};
use crate::geometry::Position;
use crate::input::Input;
use crate::random::GameRng;
use crate::schedule::{Scheduler, Task, TimerQueue};
use crate::term::TermManager;

// 25 cells of 2 columns between the side borders
const GRID_CELLS: u16 = 25;
const BOARD_WIDTH: u16 = GRID_CELLS * 2 + 2;
// Status line, then the bordered board
const BOARD_HEIGHT: u16 = GRID_CELLS + 3;

// Upper bound on how long input polling may block
const IDLE_POLL: Duration = Duration::from_millis(50);

// Play-area box in world units: 500 wide, shifted down by half the status band
const BOX_LEFT: f64 = -250.0;
const BOX_TOP: f64 = 230.0;

const SNAKE_BODY_CHAR: char = '█';
const MONSTER_CHAR: char = 'M';

/// Whether the player wants another round.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Again,
    Quit,
}

/// Owns the terminal and runs games on it.
pub struct Session {
    settings: Settings,
    term: TermManager,
    origin: Coords,
    rounds: u64,
}

impl Session {
    pub fn new(settings: Settings) -> GameResult<Self> {
        let term = TermManager::new()?;
        Ok(Session { settings, term, origin: (0, 0), rounds: 0 })
    }

    pub fn initialize(&mut self) -> GameResult<()> {
        let (w, h) = self.term.size();
        if w < BOARD_WIDTH || h < BOARD_HEIGHT {
            return Err(GameError::TerminalTooSmall {
                width: w,
                height: h,
                min_width: BOARD_WIDTH,
                min_height: BOARD_HEIGHT,
            });
        }

        self.origin = ((w - BOARD_WIDTH) / 2, (h - BOARD_HEIGHT) / 2);
        self.term.setup()?;
        Ok(())
    }

    pub fn restore(&mut self) -> GameResult<()> {
        self.term.restore()?;
        Ok(())
    }

    /// Runs one game from the intro screen to its outcome.
    pub fn play(&mut self) -> GameResult<Flow> {
        // Each round gets its own stream; a fixed seed still replays the same sequence of rounds
        let seed = self.settings.seed.map(|s| s.wrapping_add(self.rounds));
        self.rounds += 1;

        let mut rng = GameRng::new(seed);
        let mut game = GameState::new(&self.settings, &mut rng)?;
        let mut timers = TimerQueue::new(Instant::now());

        // Food starts wandering right away, even on the intro screen
        let next = game.food_tick(&mut rng);
        timers.apply(Task::Food, next);

        self.term.clear()?;
        self.draw(&game, Instant::now())?;
        self.term.show_message(&[
            "Use arrow keys to control the snake.",
            "Eat the food in any order, avoid the monsters.",
            "Space to pause, Esc or CTRL+C to quit.",
            "",
            "Click anywhere or press any key to start, have fun!!!",
        ])?;

        while !game.phase().is_over() {
            let now = Instant::now();
            timers.advance_to(now);

            let timeout = timers
                .next_deadline()
                .map(|at| at.saturating_duration_since(now))
                .unwrap_or(IDLE_POLL)
                .min(IDLE_POLL);

            let mut dirty = false;
            for input in self.term.read_inputs(timeout)? {
                match input {
                    Input::Quit => return Ok(Flow::Quit),
                    _ if game.phase() == Phase::NotStarted => {
                        let now = Instant::now();
                        if game.start(now) {
                            timers.advance_to(now);
                            timers.apply(Task::Snake, game.snake_tick());
                            timers.apply(Task::Monsters, game.monster_tick(&mut rng));
                            self.term.hide_message()?;
                            dirty = true;
                        }
                    }
                    Input::Move(dir) => dirty |= game.press(dir),
                    Input::Pause => dirty |= game.toggle_pause(),
                    Input::Start => {}
                }
            }

            timers.advance_to(Instant::now());
            while let Some(task) = timers.pop_due() {
                let next = match task {
                    Task::Snake => game.snake_tick(),
                    Task::Monsters => game.monster_tick(&mut rng),
                    Task::Food => game.food_tick(&mut rng),
                };
                timers.apply(task, next);
                dirty = true;
            }

            // The intro message covers the board until the game starts
            if dirty && game.phase() != Phase::NotStarted {
                self.draw(&game, Instant::now())?;
            }
        }

        self.finish(&game)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn finish(&mut self, game: &GameState) -> GameResult<Flow> {
        let headline = if game.phase() == Phase::Won {"Winner!!"} else {"Game Over!!"};
        info!("round over: {} (length {}, contacts {}, eaten {:?})",
              headline, game.snake().len(), game.contact_count(), game.eaten());

        self.term.show_message(&[
            headline,
            &*format!("Length: {}   Contacts: {}", game.snake().len(), game.contact_count()),
            "",
            "Press any key to play again,",
            "or CTRL+C to quit.",
        ])?;

        // Give a held arrow key a moment to stop repeating
        std::thread::sleep(Duration::from_millis(300));
        self.term.read_inputs(Duration::ZERO)?;

        match self.term.read_input_blocking()? {
            Input::Quit => Ok(Flow::Quit),
            _ => Ok(Flow::Again),
        }
    }

    fn draw(&mut self, game: &GameState, now: Instant) -> GameResult<()> {
        let (ox, oy) = self.origin;

        let status = game.status(now).to_string();
        self.term.print_str_at((ox, oy), &format!("{:<width$}", status, width = BOARD_WIDTH as usize))?;
        self.term.draw_box((ox, oy + 1), BOARD_WIDTH, GRID_CELLS + 2)?;

        for row in 0..GRID_CELLS {
            for col in 0..GRID_CELLS {
                let (x, y) = self.screen_pos((col, row));
                self.term.print_str_at((x, y), "  ")?;
            }
        }

        for (index, pos) in game.food().iter() {
            let at = self.screen_pos(cell_of(pos));
            self.term.print_str_at(at, &index.to_string())?;
        }

        for segment in game.snake().body() {
            let at = self.screen_pos(cell_of(*segment));
            self.term.print_colored_at(at, SNAKE_BODY_CHAR, Color::Blue)?;
            self.term.print_colored_at((at.0 + 1, at.1), SNAKE_BODY_CHAR, Color::Blue)?;
        }

        let head = self.screen_pos(cell_of(game.snake().head()));
        self.term.print_colored_at(head, game.snake().head_char(), Color::Red)?;

        for monster in game.monsters() {
            let at = self.screen_pos(cell_of(monster.pos()));
            self.term.print_colored_at(at, MONSTER_CHAR, Color::Magenta)?;
        }

        if game.phase() == Phase::Paused {
            self.term.print_str_at((ox + BOARD_WIDTH - 8, oy), "[paused]")?;
        }

        self.term.flush()?;
        Ok(())
    }

    fn screen_pos(&self, cell: Coords) -> Coords {
        (self.origin.0 + 1 + cell.0 * 2, self.origin.1 + 2 + cell.1)
    }
}

/// Grid cell (column, row) containing a world position, clamped to the board.
fn cell_of(pos: Position) -> Coords {
    let max = (GRID_CELLS - 1) as f64;
    let col = ((pos.x - BOX_LEFT) / 20.0).floor().clamp(0.0, max);
    let row = ((BOX_TOP - pos.y) / 20.0).floor().clamp(0.0, max);
    (col as u16, row as u16)
}
