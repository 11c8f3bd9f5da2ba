//! Fixed-rate driver for a shared [`Game`].
//!
//! Ticks and player actions both go through the same mutex, so a tick
//! never observes a half-applied action and actions always land between
//! ticks.

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use tokio::{
    sync::broadcast,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{info, warn};

use crate::{game::Game, state::GameSnapshot};

pub type SharedGame = Arc<Mutex<Game>>;

pub fn shared(game: Game) -> SharedGame {
    Arc::new(Mutex::new(game))
}

/// Locks the game, recovering the guard if a previous holder panicked.
pub fn lock(game: &SharedGame) -> MutexGuard<'_, Game> {
    game.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct GameLoop {
    game: SharedGame,
    interval: Duration,
    frame_interval_ticks: u64,
    frames: broadcast::Sender<GameSnapshot>,
    handle: Option<JoinHandle<()>>,
}

impl GameLoop {
    pub fn new(game: SharedGame) -> Self {
        let (interval, frame_interval_ticks) = {
            let guard = lock(&game);
            let sim = &guard.config().simulation;
            (sim.tick_interval(), sim.frame_interval_ticks)
        };
        let (frames, _) = broadcast::channel(64);
        Self {
            game,
            interval,
            frame_interval_ticks,
            frames,
            handle: None,
        }
    }

    pub fn game(&self) -> &SharedGame {
        &self.game
    }

    /// Snapshots published every `frame_interval_ticks` ticks.
    pub fn subscribe(&self) -> broadcast::Receiver<GameSnapshot> {
        self.frames.subscribe()
    }

    pub fn frames(&self) -> broadcast::Sender<GameSnapshot> {
        self.frames.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Spawns the timer task. Returns `false` without side effects when a
    /// loop is already recorded. Must be called inside a tokio runtime.
    pub fn start(&mut self) -> bool {
        if self.handle.is_some() {
            return false;
        }
        let game = self.game.clone();
        let frames = self.frames.clone();
        let frame_every = self.frame_interval_ticks;
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.handle = Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let frame = {
                    let mut guard = lock(&game);
                    match guard.tick() {
                        Ok(summary) if frame_every > 0 && summary.tick % frame_every == 0 => {
                            Some(guard.snapshot())
                        }
                        Ok(_) => None,
                        Err(err) => {
                            warn!(error = %err, "tick failed");
                            None
                        }
                    }
                };
                if let Some(frame) = frame {
                    // No subscribers is not an error.
                    let _ = frames.send(frame);
                }
            }
        }));
        info!(interval_ms = self.interval.as_millis() as u64, "game loop started");
        true
    }

    /// Stops the timer. A tick already in progress runs to completion.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            info!("game loop stopped");
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
