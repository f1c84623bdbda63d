//! Presentation boundary.
//!
//! The controller never touches presentation primitives. It emits
//! [UiCommand]s to a [UiSink] and awaits a [Delay] for cosmetic pauses.

use reelquest_types::slot::{
    Achievement, AchievementBook, GameState, SpinOutcome, WinResult, REELS,
};
use std::{future::Future, time::Duration};

/// Instructions for the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCommand {
    /// Redraw balances, level and statistics.
    Render(GameState),
    /// Redraw the achievement list.
    RenderAchievements(AchievementBook),
    /// Animate the reels, settling on an outcome that is already decided.
    PlayReels {
        outcome: SpinOutcome,
        stop_after: [Duration; REELS],
    },
    ShowWin(WinResult),
    ShowAchievement(Achievement),
    LevelUp(u8),
    Log(String),
    SetControlsEnabled(bool),
    /// Signed-in display name, `None` for guests.
    SetUser(Option<String>),
    Loading(bool),
}

/// Consumer of [UiCommand]s.
pub trait UiSink {
    fn dispatch(&mut self, command: UiCommand);
}

impl UiSink for Vec<UiCommand> {
    fn dispatch(&mut self, command: UiCommand) {
        self.push(command);
    }
}

/// Cosmetic pause between accepting and settling a spin.
///
/// Settlement does not depend on the pause elapsing, so implementations
/// may return immediately.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
