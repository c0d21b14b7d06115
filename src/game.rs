use std::fmt;
use std::time::Instant;

use log::{debug, info};

use crate::config::Settings;
use crate::consts::{win_length, SNAKE_TICK};
use crate::error::GameResult;
use crate::food::FoodManager;
use crate::geometry::{Direction, Position};
use crate::monster::{self, Monster};
use crate::random::RandomSource;
use crate::schedule::Schedule;
use crate::snake::{MoveResult, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Paused,
    Won,
    Lost,
}

impl Phase {
    pub fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// The status band contents.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub contact_count: u32,
    pub elapsed_secs: u64,
    pub intent: Option<Direction>,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Contact: {}   Time: {}   Motion: ", self.contact_count, self.elapsed_secs)?;
        match self.intent {
            Some(dir) => write!(f, "{}", dir),
            None => f.write_str("None"),
        }
    }
}

/// Everything that changes during a game, owned in one place.
///
/// Ticks and inputs are plain methods; nothing here knows about timers or
/// the terminal. Once the phase is `Won` or `Lost` every method is a no-op.
pub struct GameState {
    phase: Phase,
    snake: Snake,
    food: FoodManager,
    monsters: Vec<Monster>,
    eaten: Vec<u32>,
    contact_count: u32,
    started_at: Option<Instant>,
    intent: Option<Direction>,
    saved_intent: Option<Direction>,
    win_length: usize,
}

impl GameState {
    /// Builds a fresh game: snake at the origin, a full food batch and the
    /// monster pack spawned away from the head.
    pub fn new<R: RandomSource>(settings: &Settings, rng: &mut R) -> GameResult<Self> {
        settings.validate()?;

        let snake = Snake::new(Position::ORIGIN, Direction::Right);

        let mut food = FoodManager::new();
        food.spawn_batch(settings.food_count, rng);

        let monsters = monster::spawn_pack(settings.monsters, snake.head(), rng)?;

        Ok(Self::from_parts(snake, food, monsters, settings.food_count))
    }

    /// Assembles a game from prepared entities.
    pub fn from_parts(snake: Snake, food: FoodManager, monsters: Vec<Monster>, food_count: u32) -> Self {
        GameState {
            phase: Phase::NotStarted,
            snake,
            food,
            monsters,
            eaten: vec![],
            contact_count: 0,
            started_at: None,
            intent: None,
            saved_intent: None,
            win_length: win_length(food_count),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &FoodManager {
        &self.food
    }

    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Consumed food indices in the order they were eaten.
    pub fn eaten(&self) -> &[u32] {
        &self.eaten
    }

    pub fn contact_count(&self) -> u32 {
        self.contact_count
    }

    pub fn intent(&self) -> Option<Direction> {
        self.intent
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Leaves the intro. Returns `true` only on the first call, which is
    /// when the caller should arm the snake and monster ticks.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }

        self.phase = Phase::Running;
        self.started_at = Some(now);
        info!("game started with {} food and {} monsters", self.food.len(), self.monsters.len());
        true
    }

    /// A directional key. While paused it resumes immediately and the new
    /// key wins over the intent saved when pausing.
    pub fn press(&mut self, dir: Direction) -> bool {
        match self.phase {
            Phase::Running => {
                self.intent = Some(dir);
                true
            }
            Phase::Paused => {
                info!("resumed by {} key", dir);
                self.phase = Phase::Running;
                self.saved_intent = None;
                self.intent = Some(dir);
                true
            }
            _ => false,
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Running => {
                self.saved_intent = self.intent.take();
                self.phase = Phase::Paused;
                info!("paused");
                true
            }
            Phase::Paused => {
                self.intent = self.saved_intent.take();
                self.phase = Phase::Running;
                info!("resumed, motion {:?}", self.intent);
                true
            }
            _ => false,
        }
    }

    /// Moves the snake one cell along the current intent, eats, trims the
    /// tail and checks for the win.
    pub fn snake_tick(&mut self) -> Schedule {
        if self.phase.is_over() {
            return Schedule::Stop;
        }
        if self.phase != Phase::Running {
            return Schedule::After(SNAKE_TICK);
        }

        let new_head = match self.snake.move_step(self.intent) {
            MoveResult::Moved { new_head, .. } => new_head,
            MoveResult::Blocked { candidate } => {
                debug!("move to {} blocked", candidate);
                return Schedule::After(SNAKE_TICK);
            }
            MoveResult::Idle => return Schedule::After(SNAKE_TICK),
        };

        if let Some(index) = self.food.try_consume(new_head) {
            self.eaten.push(index);
            self.snake.grow(index as usize);
            info!("ate food {} at {}, size now {}", index, new_head, self.snake.size());
        }

        self.snake.trim();
        debug_assert!(self.snake.len() <= self.snake.size());

        if self.snake.len() == self.win_length {
            info!("won with length {}", self.snake.len());
            self.phase = Phase::Won;
            return Schedule::Stop;
        }

        Schedule::After(SNAKE_TICK)
    }

    /// Moves every monster toward the head, counts body contacts and ends
    /// the game on a head collision.
    pub fn monster_tick<R: RandomSource>(&mut self, rng: &mut R) -> Schedule {
        if self.phase.is_over() {
            return Schedule::Stop;
        }
        if self.phase == Phase::NotStarted {
            return Schedule::After(monster::next_delay(rng));
        }

        let body = self.snake.body_snapshot();
        let result = monster::pursue_tick(&mut self.monsters, self.snake.head(), &body);

        if result.contacts > 0 {
            self.contact_count += result.contacts;
            debug!("{} monster contacts, total {}", result.contacts, self.contact_count);
        }

        if result.head_hit {
            info!("caught by a monster at {}", self.snake.head());
            self.phase = Phase::Lost;
            return Schedule::Stop;
        }

        Schedule::After(monster::next_delay(rng))
    }

    /// Relocates food. Runs from construction on, before the game starts.
    pub fn food_tick<R: RandomSource>(&mut self, rng: &mut R) -> Schedule {
        if self.phase.is_over() {
            return Schedule::Stop;
        }

        Schedule::After(self.food.relocate(rng))
    }

    /// Seconds since `start`, zero before it.
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.started_at.map_or(0, |t| now.saturating_duration_since(t).as_secs())
    }

    pub fn status(&self, now: Instant) -> Status {
        Status { contact_count: self.contact_count, elapsed_secs: self.elapsed_secs(now), intent: self.intent }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SZ_SQUARE;
    use crate::random::GameRng;
    use std::time::Duration;

    fn quiet_game() -> GameState {
        let monsters = vec![Monster::new(Position::new(-200.0, -200.0))];
        GameState::from_parts(Snake::new(Position::ORIGIN, Direction::Right), FoodManager::new(), monsters, 5)
    }

    fn started() -> GameState {
        let mut game = quiet_game();
        game.start(Instant::now());
        game
    }

    #[test]
    fn new_game_layout() {
        let game = GameState::new(&Settings::default(), &mut GameRng::seeded(1)).unwrap();
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.food().len(), 5);
        assert_eq!(game.monsters().len(), 4);
        assert_eq!(game.snake().head(), Position::ORIGIN);
        assert_eq!(game.snake().size(), 6);
        assert_eq!(game.win_length(), 21);
    }

    #[test]
    fn start_happens_once() {
        let mut game = quiet_game();
        let t0 = Instant::now();
        assert!(game.start(t0));
        assert!(!game.start(t0 + Duration::from_secs(5)));
        assert_eq!(game.elapsed_secs(t0 + Duration::from_millis(2500)), 2);
    }

    #[test]
    fn keys_ignored_before_start() {
        let mut game = quiet_game();
        assert!(!game.press(Direction::Up));
        assert!(!game.toggle_pause());
        assert_eq!(game.intent(), None);
        assert_eq!(game.snake_tick(), Schedule::After(SNAKE_TICK));
        assert_eq!(game.snake().head(), Position::ORIGIN);
    }

    #[test]
    fn pause_then_resume_restores_intent() {
        let mut game = started();
        game.press(Direction::Up);
        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Paused);
        assert_eq!(game.intent(), None);

        // Snake stays put while paused
        game.snake_tick();
        assert_eq!(game.snake().head(), Position::ORIGIN);

        game.toggle_pause();
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.intent(), Some(Direction::Up));
    }

    #[test]
    fn key_while_paused_resumes_with_new_key() {
        let mut game = started();
        game.press(Direction::Up);
        game.toggle_pause();
        game.press(Direction::Left);
        assert_eq!(game.phase(), Phase::Running);
        assert_eq!(game.intent(), Some(Direction::Left));

        // The saved intent is gone, pausing again saves Left
        game.toggle_pause();
        game.toggle_pause();
        assert_eq!(game.intent(), Some(Direction::Left));
    }

    #[test]
    fn eating_grows_by_index() {
        let mut game = started();
        game.food.place(4, Position::new(SZ_SQUARE, 10.0));
        game.press(Direction::Right);
        game.snake_tick();

        assert_eq!(game.eaten(), &[4]);
        assert!(!game.food().contains(4));
        assert_eq!(game.snake().size(), 10);
    }

    #[test]
    fn win_at_target_length() {
        let mut game = started();
        game.press(Direction::Right);
        // Start from (-240, 0) so twenty-one moves stay in bounds
        game.snake = Snake::new(Position::new(-240.0, 0.0), Direction::Right);
        game.snake.grow(15);

        for _ in 0..20 {
            assert!(matches!(game.snake_tick(), Schedule::After(_)));
        }
        assert_eq!(game.snake().len(), 20);
        assert_eq!(game.snake_tick(), Schedule::Stop);
        assert_eq!(game.phase(), Phase::Won);
    }

    #[test]
    fn frozen_after_loss() {
        let mut game = started();
        game.monsters = vec![Monster::new(Position::new(20.0, 0.0))];
        let mut rng = GameRng::seeded(2);

        assert_eq!(game.monster_tick(&mut rng), Schedule::Stop);
        assert_eq!(game.phase(), Phase::Lost);

        let monsters = game.monsters().to_vec();
        assert_eq!(game.monster_tick(&mut rng), Schedule::Stop);
        assert_eq!(game.snake_tick(), Schedule::Stop);
        assert_eq!(game.food_tick(&mut rng), Schedule::Stop);
        assert!(!game.press(Direction::Up));
        assert!(!game.toggle_pause());
        assert_eq!(game.monsters(), &monsters[..]);
        assert_eq!(game.snake().head(), Position::ORIGIN);
    }

    #[test]
    fn status_line_format() {
        let status = Status { contact_count: 3, elapsed_secs: 12, intent: Some(Direction::Left) };
        assert_eq!(status.to_string(), "Contact: 3   Time: 12   Motion: Left");
        let status = Status { intent: None, ..status };
        assert_eq!(status.to_string(), "Contact: 3   Time: 12   Motion: None");
    }
}
