//! Host-facing frame driver.
//!
//! Wraps a [`GameSession`] with its collaborators and turns each step's
//! events into side effects: renderer sync, sound cues and the high score
//! write. The session itself stays pure.

use super::constants::HIGH_SCORE_KEY;
use super::session::{GameInput, GamePhase, GameSession};
use super::tick::{TickEvent, TickResult};
use crate::host::{AudioSink, Banner, Cue, HighScoreStore, Hud, Renderer};
use crate::scene::SceneSync;
use rand::Rng;

pub struct Driver<R: Renderer, A: AudioSink, S: HighScoreStore, G: Rng> {
    pub session: GameSession,
    pub renderer: R,
    pub audio: A,
    pub store: S,
    rng: G,
    scene: SceneSync<R::Handle>,
    last_hud: Option<Hud>,
}

impl<R: Renderer, A: AudioSink, S: HighScoreStore, G: Rng> Driver<R, A, S, G> {
    /// Seeds the session's high score from `store`. A failed load starts
    /// from whatever the session already had.
    pub fn new(session: GameSession, renderer: R, audio: A, mut store: S, rng: G) -> Self {
        let stored = match store.load(HIGH_SCORE_KEY) {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                tracing::warn!(error = %e, "could not load high score");
                0
            }
        };
        let high_score = stored.max(session.high_score());
        let mut driver = Self {
            session: session.with_high_score(high_score),
            renderer,
            audio,
            store,
            rng,
            scene: SceneSync::new(),
            last_hud: None,
        };
        driver.refresh_view();
        driver
    }

    pub fn input(&mut self, input: GameInput) -> Option<TickEvent> {
        let event = self.session.handle_input(input);
        if event == Some(TickEvent::Flapped) {
            self.audio.play(Cue::Flap);
        }
        if event.is_some() {
            self.refresh_view();
        }
        event
    }

    /// One host frame of `dt` seconds.
    pub fn frame(&mut self, dt: f64) -> TickResult {
        let result = self.session.step(dt, &mut self.rng);

        for event in &result.events {
            match event {
                TickEvent::Scored { .. } => self.audio.play(Cue::Score),
                TickEvent::GoalReached { .. } => self.audio.play(Cue::Goal),
                TickEvent::Died { .. } => self.audio.play(Cue::Hit),
                _ => {}
            }
        }

        if result.high_score_changed {
            self.persist_high_score();
        }

        self.refresh_view();
        result
    }

    /// Remove every primitive this driver placed. Called once when the host
    /// quits.
    pub fn shutdown(&mut self) {
        tracing::debug!(pieces = self.scene.piece_count(), "clearing scene");
        self.scene.clear(&mut self.renderer);
    }

    fn persist_high_score(&mut self) {
        let high_score = self.session.high_score();
        match self.store.save(HIGH_SCORE_KEY, high_score) {
            Ok(()) => tracing::debug!(high_score, "high score saved"),
            Err(e) => tracing::warn!(error = %e, high_score, "could not save high score"),
        }
    }

    fn refresh_view(&mut self) {
        self.scene.sync(&mut self.renderer, &self.session);

        let hud = Hud {
            score: self.session.score(),
            high_score: self.session.high_score(),
            banner: banner_for(&self.session),
            backdrop_offset: self.session.backdrop_offset,
        };
        if self.last_hud.as_ref() != Some(&hud) {
            self.renderer.set_hud(&hud);
            self.last_hud = Some(hud);
        }
    }
}

fn banner_for(session: &GameSession) -> Option<Banner> {
    match session.phase {
        GamePhase::Idle => Some(Banner::GetReady),
        GamePhase::Dead => Some(Banner::GameOver),
        GamePhase::Flying if session.scoreboard.goal_reached => Some(Banner::GoalReached),
        GamePhase::Flying => None,
    }
}
