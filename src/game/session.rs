//! Game session state machine
//!
//! Coordinates every entity once per frame: advance layers, player, and
//! obstacles; fire the spawner; sweep exited obstacles into the score;
//! run collision checks; and drive the Idle -> Running -> GameOver ->
//! (restart) -> Running state machine.
//!
//! The session exclusively owns the player, the layers, the obstacle
//! collection, and the spawn deadline, so stopping or dropping a session
//! can never leak scheduled work into another one.

use macroquad::logging::info;
use macroquad::rand::gen_range;

use super::collision::Hitbox;
use super::layer::ScrollingLayer;
use super::obstacle::{Obstacle, ObstacleSpec, Spawner};
use super::player::Player;
use super::Advance;

/// Top-level session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Assets loaded, passive preview loop, waiting for start.
    #[default]
    Idle,
    Running,
    /// Terminal until an explicit restart.
    GameOver,
}

/// Session-level tuning, separate from the entities so tests construct it
/// without assets.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub viewport_w: f32,
    pub viewport_h: f32,
    /// Leftward obstacle speed in px per reference frame.
    pub obstacle_speed: f32,
    /// Hitbox inset from the obstacle's sprite bounds, px per side.
    pub obstacle_hitbox_inset: f32,
    pub spawn_min_ms: f32,
    pub spawn_max_ms: f32,
}

pub struct GameSession {
    cfg: SessionConfig,
    state: SessionState,
    score: u32,
    elapsed_ms: f32,
    final_elapsed_ms: f32,
    layers: Vec<ScrollingLayer>,
    player: Player,
    obstacles: Vec<Obstacle>,
    pool: Vec<ObstacleSpec>,
    spawner: Spawner,
}

impl GameSession {
    pub fn new(
        cfg: SessionConfig,
        layers: Vec<ScrollingLayer>,
        player: Player,
        pool: Vec<ObstacleSpec>,
    ) -> Self {
        let spawner = Spawner::new(cfg.spawn_min_ms, cfg.spawn_max_ms);
        Self {
            cfg,
            state: SessionState::Idle,
            score: 0,
            elapsed_ms: 0.0,
            final_elapsed_ms: 0.0,
            layers,
            player,
            obstacles: Vec::new(),
            pool,
            spawner,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.player.lives()
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Session time recorded at the moment of game over.
    pub fn final_elapsed_ms(&self) -> f32 {
        self.final_elapsed_ms
    }

    pub fn layers(&self) -> &[ScrollingLayer] {
        &self.layers
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// External start signal; only meaningful from Idle.
    pub fn start(&mut self) {
        if self.state == SessionState::Idle {
            info!("session started");
            self.begin_run();
        }
    }

    /// External restart signal; only meaningful from GameOver.
    pub fn restart(&mut self) {
        if self.state == SessionState::GameOver {
            info!("session restarted");
            self.begin_run();
        }
    }

    /// External jump signal, forwarded while running.
    pub fn jump(&mut self) {
        if self.state == SessionState::Running {
            self.player.jump();
        }
    }

    fn begin_run(&mut self) {
        self.player.reset();
        self.player.start_running();
        self.obstacles.clear();
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.final_elapsed_ms = 0.0;
        self.spawner.schedule(0.0);
        self.state = SessionState::Running;
    }

    fn game_over(&mut self) {
        self.final_elapsed_ms = self.elapsed_ms;
        self.spawner.cancel();
        self.state = SessionState::GameOver;
        info!(
            "game over: score {} after {:.1}s",
            self.score,
            self.final_elapsed_ms / 1000.0
        );
    }

    /// Passive preview while Idle: only the stand animation cycles. No
    /// scrolling, no obstacles, no score.
    pub fn idle_step(&mut self, dt_ms: f32) {
        if self.state == SessionState::Idle {
            self.player.advance(dt_ms);
        }
    }

    /// One simulation frame. A no-op unless Running.
    pub fn step(&mut self, dt_ms: f32) {
        if self.state != SessionState::Running {
            return;
        }
        self.elapsed_ms += dt_ms;

        // Update phase: layers, player, obstacles, in that order.
        for entity in self
            .layers
            .iter_mut()
            .map(|l| l as &mut dyn Advance)
            .chain(std::iter::once(&mut self.player as &mut dyn Advance))
            .chain(self.obstacles.iter_mut().map(|o| o as &mut dyn Advance))
        {
            entity.advance(dt_ms);
        }

        // Spawn after the obstacle sweep's iteration source is settled; a
        // fresh obstacle sits at the right edge and cannot exit or collide
        // this same frame.
        if self.spawner.poll(self.elapsed_ms) {
            self.spawn_obstacle();
        }

        // Every exit scores, collided or not: scoring and collision are
        // independent counters.
        let score = &mut self.score;
        self.obstacles.retain(|ob| {
            if ob.off_screen() {
                *score += 1;
                false
            } else {
                true
            }
        });

        self.check_collisions();
    }

    fn spawn_obstacle(&mut self) {
        if self.pool.is_empty() {
            return;
        }
        let image_index = gen_range(0, self.pool.len());
        let spec = self.pool[image_index];
        let hitbox = Hitbox::inset(spec.width, spec.height, self.cfg.obstacle_hitbox_inset);
        self.obstacles.push(Obstacle {
            x: self.cfg.viewport_w,
            // Base on the ground line at the bottom of the viewport
            y: self.cfg.viewport_h - spec.height,
            width: spec.width,
            height: spec.height,
            speed: self.cfg.obstacle_speed,
            image_index,
            collided: false,
            hitbox,
        });
    }

    fn check_collisions(&mut self) {
        let player_box = self.player.hitbox_rect();
        for ob in &mut self.obstacles {
            if ob.collided {
                continue;
            }
            if player_box.overlaps(&ob.hitbox_rect()) {
                ob.collided = true;
                if self.player.lose_life() {
                    self.game_over();
                    return;
                }
                self.player.flash();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::collision::Hitbox;
    use crate::game::player::{Mode, PlayerParams};
    use crate::game::sprite::AnimationSpec;
    use crate::game::FRAME_DT_MS;

    fn test_player() -> Player {
        Player::new(PlayerParams {
            x: 450.0,
            ground_y: 350.0,
            jump_impulse: -12.0,
            gravity: 0.4,
            lives: 3,
            hitbox: Hitbox::new(0.0, 0.0, 50.0, 50.0),
            stand: AnimationSpec::new("stand", 4, 50.0, 50.0, 200.0).unwrap(),
            run: AnimationSpec::new("run", 8, 50.0, 50.0, 100.0).unwrap(),
            jump: AnimationSpec::new("jump", 4, 50.0, 50.0, 100.0).unwrap(),
        })
    }

    fn test_session() -> GameSession {
        GameSession::new(
            SessionConfig {
                viewport_w: 1000.0,
                viewport_h: 400.0,
                obstacle_speed: 8.0,
                obstacle_hitbox_inset: 0.0,
                spawn_min_ms: 2000.0,
                spawn_max_ms: 5000.0,
            },
            vec![ScrollingLayer::new(0, 3.0, 800.0, 400.0)],
            test_player(),
            vec![ObstacleSpec { width: 40.0, height: 60.0 }],
        )
    }

    /// An obstacle far from the player, one step away from exiting.
    fn exiting_obstacle() -> Obstacle {
        Obstacle {
            x: -35.0,
            y: 340.0,
            width: 40.0,
            height: 60.0,
            speed: 8.0,
            image_index: 0,
            collided: false,
            hitbox: Hitbox::new(0.0, 0.0, 40.0, 60.0),
        }
    }

    /// An obstacle planted on the player's hitbox.
    fn overlapping_obstacle() -> Obstacle {
        Obstacle {
            x: 460.0,
            y: 355.0,
            width: 40.0,
            height: 60.0,
            speed: 8.0,
            image_index: 0,
            collided: false,
            hitbox: Hitbox::new(0.0, 0.0, 40.0, 60.0),
        }
    }

    #[test]
    fn test_step_is_noop_while_idle() {
        let mut s = test_session();
        s.step(FRAME_DT_MS);
        assert_eq!(s.elapsed_ms(), 0.0);
        assert_eq!(s.layers()[0].offset_x, 0.0);
    }

    #[test]
    fn test_start_transitions_to_running() {
        let mut s = test_session();
        s.start();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.player().mode(), Mode::Running);
        s.step(FRAME_DT_MS);
        assert!(s.elapsed_ms() > 0.0);
        assert_eq!(s.layers()[0].offset_x, -3.0);
    }

    #[test]
    fn test_clean_exits_score_without_costing_lives() {
        let mut s = test_session();
        s.start();
        for _ in 0..5 {
            s.obstacles.push(exiting_obstacle());
        }
        s.step(FRAME_DT_MS);
        assert_eq!(s.score(), 5);
        assert_eq!(s.lives(), 3);
        assert_eq!(s.state(), SessionState::Running);
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_overlap_costs_exactly_one_life() {
        let mut s = test_session();
        s.start();
        s.obstacles.push(overlapping_obstacle());
        // Overlap persists for several frames at speed 8 over a 50px box
        for _ in 0..4 {
            s.step(FRAME_DT_MS);
        }
        assert_eq!(s.lives(), 2);
        assert!(s.player().is_flashing());
        assert!(s.obstacles()[0].collided);
        assert_eq!(s.state(), SessionState::Running);
    }

    #[test]
    fn test_collided_obstacle_still_scores_on_exit() {
        let mut s = test_session();
        s.start();
        s.obstacles.push(overlapping_obstacle());
        s.step(FRAME_DT_MS);
        assert!(s.obstacles()[0].collided);
        // Let it scroll all the way off
        while !s.obstacles().is_empty() {
            s.step(FRAME_DT_MS);
        }
        assert_eq!(s.score(), 1);
        assert_eq!(s.lives(), 2);
    }

    #[test]
    fn test_third_hit_ends_the_session() {
        let mut s = test_session();
        s.start();
        for hit in 1..=3 {
            s.obstacles.push(overlapping_obstacle());
            s.step(FRAME_DT_MS);
            s.obstacles.clear();
            assert_eq!(s.lives(), 3 - hit);
        }
        assert_eq!(s.state(), SessionState::GameOver);
        assert!(s.final_elapsed_ms() > 0.0);

        // Frozen: further steps change nothing
        let elapsed = s.elapsed_ms();
        let offset = s.layers()[0].offset_x;
        s.step(FRAME_DT_MS);
        assert_eq!(s.elapsed_ms(), elapsed);
        assert_eq!(s.layers()[0].offset_x, offset);
    }

    #[test]
    fn test_game_over_disarms_spawner() {
        let mut s = test_session();
        s.start();
        for _ in 0..3 {
            s.obstacles.push(overlapping_obstacle());
            s.step(FRAME_DT_MS);
            s.obstacles.clear();
        }
        assert_eq!(s.state(), SessionState::GameOver);
        assert!(!s.spawner.is_armed());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = test_session();
        s.start();
        s.obstacles.push(exiting_obstacle());
        s.step(FRAME_DT_MS);
        for _ in 0..3 {
            s.obstacles.push(overlapping_obstacle());
            s.step(FRAME_DT_MS);
            s.obstacles.clear();
        }
        assert_eq!(s.state(), SessionState::GameOver);

        s.restart();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.score(), 0);
        assert_eq!(s.lives(), 3);
        assert!(s.obstacles().is_empty());
        assert_eq!(s.elapsed_ms(), 0.0);
        assert_eq!(s.player().mode(), Mode::Running);
        assert!(s.spawner.is_armed());
    }

    #[test]
    fn test_restart_ignored_unless_game_over() {
        let mut s = test_session();
        s.restart();
        assert_eq!(s.state(), SessionState::Idle);
        s.start();
        s.obstacles.push(exiting_obstacle());
        s.step(FRAME_DT_MS);
        s.restart();
        assert_eq!(s.score(), 1, "restart while running must not reset");
    }

    #[test]
    fn test_spawner_populates_session() {
        macroquad::rand::srand(42);
        let mut s = test_session();
        s.start();
        // Six simulated seconds guarantees at least one firing
        let steps = (6000.0 / FRAME_DT_MS) as usize;
        let mut seen = 0;
        for _ in 0..steps {
            s.step(FRAME_DT_MS);
            seen = seen.max(s.obstacles().len());
        }
        assert!(seen >= 1, "no obstacle spawned in 6s");
        for ob in s.obstacles() {
            assert_eq!(ob.y, 400.0 - ob.height, "base must sit on the ground line");
        }
    }

    #[test]
    fn test_idle_step_only_cycles_the_stand_animation() {
        let mut s = test_session();
        // Stand interval is 200ms: 13 ticks crosses it once
        for _ in 0..13 {
            s.idle_step(FRAME_DT_MS);
        }
        assert_eq!(s.player().frame_index(), 1);
        assert_eq!(s.layers()[0].offset_x, 0.0);
        assert!(s.obstacles().is_empty());
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn test_jump_signal_only_while_running() {
        let mut s = test_session();
        s.jump();
        assert_eq!(s.player().mode(), Mode::Standing);
        s.start();
        s.jump();
        assert_eq!(s.player().mode(), Mode::Jumping);
    }
}
