//! Game state module - the fall / placement state machine
//!
//! This module ties together all core components: field, pieces, collision,
//! rotation, ghost projection, pointer targeting and the piece generator.
//!
//! # Tick order
//!
//! Every [`GameState::tick`] runs the same fixed sequence:
//!
//! 1. Pointer targeting (consumed, applies to this tick only)
//! 2. Pending horizontal move
//! 3. Pending rotation
//! 4. Landing check one gravity step ahead
//! 5. Either land (place, clear, score, spawn) or fall by one gravity step
//!
//! Intents that would leave the footprint or overlap the stack are dropped.
//! They are never queued and never reported as errors.
//!
//! # States
//!
//! `Spawned -> Falling -> Landed -> (LevelClear)* -> Spawned`, or
//! `Falling -> GameOver` when a promoted piece does not fit. A piece that
//! lands with a cell still above the top level also ends the session (lock
//! out) and is not merged. Game over is terminal until [`GameState::reset`].

use glam::Vec3;
use log::{debug, info};

use crate::collision::{check_bounds, check_collision, fix_bounds};
use crate::config::GameConfig;
use crate::field::Field;
use crate::ghost;
use crate::piece::Piece;
use crate::pointer::{target_cell, PointerInput};
use crate::rng::PieceGenerator;
use crate::rotation;
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{Axis, GameAction, MoveDirection, MAX_FALL_STEP, TICK_MS};

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    field: Field,
    /// Active piece, `None` once the game is over
    current: Option<Piece>,
    /// Upcoming piece, parked at the preview slot
    next: Piece,
    generator: PieceGenerator,
    /// Levels per nominal tick
    fall_speed: f32,
    drop_multiplier: f32,
    score: u32,
    levels_cleared: u32,
    pieces_placed: u32,
    /// Monotonic session id (increments on reset)
    episode_id: u32,
    paused: bool,
    game_over: bool,
    pending_move: Option<MoveDirection>,
    pending_rotation: Option<Axis>,
    pointer: Option<PointerInput>,
}

impl GameState {
    /// New session with a random generator seeded from `config.seed`.
    ///
    /// The first piece is already falling when this returns.
    pub fn new(config: GameConfig) -> Self {
        Self::with_generator(config, PieceGenerator::random(config.seed))
    }

    /// New session drawing pieces from `generator`
    pub fn with_generator(config: GameConfig, generator: PieceGenerator) -> Self {
        let field = Field::new(
            config.num_levels as usize,
            config.num_rows as usize,
            config.num_cols as usize,
        );
        Self::with_field(config, generator, field)
    }

    /// New session on a prepared field.
    ///
    /// The field's dimensions replace the ones in `config`. If the first piece
    /// does not fit, the session starts in the game-over state.
    pub fn with_field(mut config: GameConfig, mut generator: PieceGenerator, field: Field) -> Self {
        config.num_levels = u8::try_from(field.num_levels()).unwrap_or(u8::MAX);
        config.num_rows = u8::try_from(field.num_rows()).unwrap_or(u8::MAX);
        config.num_cols = u8::try_from(field.num_cols()).unwrap_or(u8::MAX);

        let next = Piece::new(generator.next_kind(), config.preview_position());
        let mut state = Self {
            config,
            field,
            current: None,
            next,
            generator,
            fall_speed: config.base_fall_speed,
            drop_multiplier: 1.0,
            score: 0,
            levels_cleared: 0,
            pieces_placed: 0,
            episode_id: 0,
            paused: false,
            game_over: false,
            pending_move: None,
            pending_rotation: None,
            pointer: None,
        };
        state.spawn_next();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> Option<Piece> {
        self.current
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn levels_cleared(&self) -> u32 {
        self.levels_cleared
    }

    pub fn pieces_placed(&self) -> u32 {
        self.pieces_placed
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn fall_speed(&self) -> f32 {
        self.fall_speed
    }

    pub fn drop_multiplier(&self) -> f32 {
        self.drop_multiplier
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Neither paused nor over
    pub fn playable(&self) -> bool {
        !self.paused && !self.game_over
    }

    /// Where the active piece would rest if dropped now
    pub fn ghost(&self) -> Option<Piece> {
        self.current
            .as_ref()
            .map(|piece| ghost::project(piece, &self.field))
    }

    /// Record an input intent.
    ///
    /// Moves and rotations are resolved on the next tick; a later intent of
    /// the same kind replaces an unresolved one. Returns false if the action
    /// was ignored.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Move(direction) => {
                if !self.playable() {
                    return false;
                }
                self.pending_move = Some(direction);
                true
            }
            GameAction::Rotate(axis) => {
                if !self.playable() {
                    return false;
                }
                self.pending_rotation = Some(axis);
                true
            }
            GameAction::Pause => {
                if self.game_over {
                    return false;
                }
                self.paused = !self.paused;
                debug!("paused: {}", self.paused);
                true
            }
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Pointer for the next tick, `None` when the pointer left the view
    pub fn set_pointer(&mut self, pointer: Option<PointerInput>) {
        self.pointer = pointer;
    }

    /// Gravity boost while the drop key is held; values below 1.0 mean released
    pub fn set_drop_multiplier(&mut self, multiplier: f32) {
        self.drop_multiplier = if multiplier.is_finite() {
            multiplier.max(1.0)
        } else {
            1.0
        };
    }

    /// Start a fresh session on an empty field.
    ///
    /// The piece generator keeps its state, so the new session continues the
    /// same deterministic sequence instead of replaying it.
    pub fn reset(&mut self) {
        self.field = Field::new(
            self.config.num_levels as usize,
            self.config.num_rows as usize,
            self.config.num_cols as usize,
        );
        self.current = None;
        self.next = Piece::new(self.generator.next_kind(), self.config.preview_position());
        self.fall_speed = self.config.base_fall_speed;
        self.drop_multiplier = 1.0;
        self.score = 0;
        self.levels_cleared = 0;
        self.pieces_placed = 0;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.paused = false;
        self.game_over = false;
        self.pointer = None;
        debug!("reset, episode {}", self.episode_id);
        self.spawn_next();
    }

    /// Vertical distance gravity covers in `elapsed_ms`
    pub fn fall_step(&self, elapsed_ms: u32) -> f32 {
        let step = self.fall_speed * self.drop_multiplier * elapsed_ms as f32 / TICK_MS as f32;
        step.min(MAX_FALL_STEP)
    }

    /// Advance the simulation by `elapsed_ms`.
    ///
    /// Returns true if the active piece landed during this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.playable() {
            return false;
        }
        if self.current.is_none() {
            return false;
        }

        if let Some(pointer) = self.pointer.take() {
            self.apply_pointer(&pointer);
        }
        if let Some(direction) = self.pending_move.take() {
            self.try_move(direction);
        }
        if let Some(axis) = self.pending_rotation.take() {
            self.try_rotate(axis);
        }

        let step = self.fall_step(elapsed_ms);
        let Some(piece) = self.current.as_mut() else {
            return false;
        };
        if piece.detect_collision(&self.field, step) {
            self.land();
            return true;
        }
        piece.position.y -= step;
        false
    }

    /// Move the active piece one cell, if the target fits
    pub fn try_move(&mut self, direction: MoveDirection) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let (d_col, d_row) = direction.delta();
        let position = piece.position + Vec3::new(d_col as f32, 0.0, d_row as f32);
        self.commit_position(piece, position)
    }

    /// Rotate the active piece 90° about `axis`, if the result fits
    pub fn try_rotate(&mut self, axis: Axis) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        match rotation::try_rotate(&piece, &self.field, axis) {
            Some(rotated) => {
                self.current = Some(rotated);
                true
            }
            None => false,
        }
    }

    /// Move the active piece over the column under the pointer, if it fits there
    pub fn apply_pointer(&mut self, pointer: &PointerInput) -> bool {
        let Some(piece) = self.current else {
            return false;
        };
        let Some((col, row)) = target_cell(pointer, &self.field, &self.config.field_transform) else {
            return false;
        };
        let position = Vec3::new(col as f32, piece.position.y, row as f32);
        self.commit_position(piece, position)
    }

    fn commit_position(&mut self, piece: Piece, position: Vec3) -> bool {
        let fits = check_bounds(
            self.field.num_rows(),
            self.field.num_cols(),
            position,
            &piece.offsets,
        ) && check_collision(&self.field, position, &piece.offsets);
        if fits {
            self.current = Some(piece.at(position));
        }
        fits
    }

    /// Merge the active piece into the field, clear full levels and spawn the next piece
    pub fn land(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        if piece.highest_level() >= self.field.num_levels() as i32 {
            self.game_over = true;
            info!(
                "lock out: {} landed above the top level, score {}, {} pieces",
                piece.kind.as_str(),
                self.score,
                self.pieces_placed
            );
            return;
        }

        self.field.place(&piece);
        self.pieces_placed += 1;
        self.score += self.config.placement_score;

        let cleared = self.field.scan_and_clear_all();
        if cleared > 0 {
            self.levels_cleared += cleared;
            self.score += cleared * self.config.level_clear_score;
            info!(
                "cleared {} level(s), total {}, score {}",
                cleared, self.levels_cleared, self.score
            );
        }

        self.fall_speed =
            (self.fall_speed + self.config.fall_speed_increment).min(self.config.max_fall_speed);

        self.spawn_next();
    }

    /// Promote the preview piece to the spawn slot and draw a new preview.
    ///
    /// Returns false, and ends the game, if the promoted piece does not fit.
    fn spawn_next(&mut self) -> bool {
        let spawn = self.next.at(self.config.spawn_position());
        let position = fix_bounds(
            self.field.num_rows(),
            self.field.num_cols(),
            spawn.position,
            &spawn.offsets,
        );
        let piece = spawn.at(position);

        self.next = Piece::new(self.generator.next_kind(), self.config.preview_position());
        self.pending_move = None;
        self.pending_rotation = None;

        if !check_collision(&self.field, piece.position, &piece.offsets) {
            self.current = None;
            self.game_over = true;
            info!(
                "game over: score {}, {} pieces, {} levels",
                self.score, self.pieces_placed, self.levels_cleared
            );
            return false;
        }

        debug!("spawned {} at {:?}", piece.kind.as_str(), piece.position);
        self.current = Some(piece);
        true
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.num_levels = self.field.num_levels();
        out.num_rows = self.field.num_rows();
        out.num_cols = self.field.num_cols();
        self.field.write_ids(&mut out.cells);

        out.active = self.current.as_ref().map(PieceSnapshot::from);
        out.ghost = self.ghost().as_ref().map(PieceSnapshot::from);
        out.next = Some(PieceSnapshot::from(&self.next));
        out.depth = self.current.map(|piece| piece.depth());
        out.score = self.score;
        out.levels_cleared = self.levels_cleared;
        out.pieces_placed = self.pieces_placed;
        out.fall_speed = self.fall_speed;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
