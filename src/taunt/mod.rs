//! Adversary taunts from an external narrative collaborator.
//!
//! The battle never waits on the collaborator. [`TauntBoard::spawn`] runs a
//! [`TauntSource`] on the tokio runtime with a timeout and publishes the line
//! on a watch channel. Any failure (error, timeout, empty reply) is logged
//! with `warn!` and replaced by a line from the static fallback pool, so
//! callers always end up with a taunt.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::cards::catalog::PlayerClass;
use crate::core::{Combatant, GameRng, PlayerProfile};

/// Lines used whenever the collaborator cannot deliver.
pub const FALLBACK_TAUNTS: [&str; 6] = [
    "This requirement is simple, why isn't it done yet?",
    "You call this code? Looks like noise to me.",
    "Pull an all-nighter tonight, we ship tomorrow.",
    "I want a colorful black, and a flowing white.",
    "I think your attitude is the real problem here.",
    "Young people should eat bitterness, not think about money.",
];

/// Failure reported by a taunt source.
#[derive(Debug, Error)]
pub enum TauntError {
    /// The collaborator is not configured or not reachable.
    #[error("taunt source unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with something unusable.
    #[error("malformed taunt reply: {0}")]
    Malformed(String),
}

/// Read-only copy of what the adversary can see of the player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub class: PlayerClass,
    pub title: String,
    pub health: i64,
    pub max_health: i64,
    pub shield: i64,
}

impl PlayerSnapshot {
    #[must_use]
    pub fn of(profile: &PlayerProfile, player: &Combatant) -> Self {
        Self {
            class: profile.class,
            title: profile.name.clone(),
            health: player.health(),
            max_health: player.max_health(),
            shield: player.shield(),
        }
    }
}

/// Something that can produce a one-line taunt.
#[async_trait]
pub trait TauntSource: Send + Sync {
    async fn taunt(&self, player: &PlayerSnapshot, adversary: &str) -> Result<String, TauntError>;
}

/// Offline source that composes a line from the snapshot.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTaunts;

#[async_trait]
impl TauntSource for ScriptedTaunts {
    async fn taunt(&self, player: &PlayerSnapshot, adversary: &str) -> Result<String, TauntError> {
        let line = if player.health * 4 < player.max_health {
            format!(
                "{adversary} here. {} health left? Put it in your exit interview.",
                player.health
            )
        } else if player.shield > 0 {
            format!(
                "Hiding behind {} shield, {}? Meetings will wear that down.",
                player.shield, player.title
            )
        } else {
            format!("{adversary} here. So this is what a {} looks like.", player.title)
        };
        Ok(line)
    }
}

/// Display slot for the adversary's taunt.
#[derive(Debug)]
pub struct TauntBoard {
    line: watch::Receiver<Option<String>>,
    task: JoinHandle<()>,
}

impl TauntBoard {
    /// Ask `source` for a taunt in the background.
    ///
    /// Must be called from within a tokio runtime. The fallback line is drawn
    /// from a stream derived from `rng`, so the battle's own stream is not
    /// disturbed.
    pub fn spawn(
        source: Arc<dyn TauntSource>,
        player: PlayerSnapshot,
        adversary: impl Into<String>,
        timeout: Duration,
        rng: &GameRng,
    ) -> Self {
        let adversary = adversary.into();
        let mut fallback_rng = rng.for_context("taunt");
        let (tx, rx) = watch::channel(None);

        let task = tokio::spawn(async move {
            let reply = tokio::time::timeout(timeout, source.taunt(&player, &adversary)).await;
            let line = match reply {
                Ok(Ok(line)) if !line.trim().is_empty() => {
                    debug!(%adversary, "taunt received");
                    line.trim().to_string()
                }
                Ok(Ok(_)) => {
                    warn!(%adversary, "taunt source returned an empty line");
                    fallback(&mut fallback_rng)
                }
                Ok(Err(err)) => {
                    warn!(%adversary, %err, "taunt source failed");
                    fallback(&mut fallback_rng)
                }
                Err(_) => {
                    warn!(%adversary, ?timeout, "taunt source timed out");
                    fallback(&mut fallback_rng)
                }
            };
            // Nobody watching is fine.
            let _ = tx.send(Some(line));
        });

        Self { line: rx, task }
    }

    /// The taunt, once it has arrived.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.line.borrow().clone()
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the taunt.
    pub async fn settled(mut self) -> String {
        while self.line.borrow().is_none() {
            if self.line.changed().await.is_err() {
                break;
            }
        }
        self.current()
            .unwrap_or_else(|| FALLBACK_TAUNTS[0].to_string())
    }
}

fn fallback(rng: &mut GameRng) -> String {
    rng.choose(&FALLBACK_TAUNTS)
        .copied()
        .unwrap_or(FALLBACK_TAUNTS[0])
        .to_string()
}
