//! Text presentation of [UiCommand]s.

use reelquest_execution::{Delay, UiCommand, UiSink};
use reelquest_types::slot::{AchievementBook, GameState, WinKind, WinResult, ACHIEVEMENTS};
use std::{
    collections::VecDeque,
    fmt::Display,
    io::{self, Stdout, Write},
    time::Duration,
};
use tracing::warn;

/// Log lines kept for the `log` command.
pub const LOG_CAPACITY: usize = 20;

/// Renders game output as lines of text.
pub struct Terminal<W: Write = Stdout> {
    out: W,
    log: VecDeque<String>,
    controls_enabled: bool,
    user: Option<String>,
}

impl Terminal {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            log: VecDeque::with_capacity(LOG_CAPACITY),
            controls_enabled: true,
            user: None,
        }
    }

    /// Recent log lines, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(String::as_str)
    }

    /// Whether the last render allowed spinning.
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn print(&mut self, line: impl Display) {
        if let Err(e) = writeln!(self.out, "{line}") {
            warn!(error = %e, "failed to write to terminal");
        }
    }

    pub fn print_state(&mut self, state: &GameState) {
        self.print(format!(
            "💰 {} gold | 🏆 best {} | ⭐ level {} | 🎲 bet {}",
            state.gold, state.high_score, state.level, state.bet
        ));
    }

    pub fn print_stats(&mut self, state: &GameState) {
        let rate = if state.total_spins == 0 {
            0.0
        } else {
            state.total_wins as f64 * 100.0 / state.total_spins as f64
        };
        self.print_state(state);
        self.print(format!(
            "   spins {} | wins {} ({rate:.1}%) | biggest win {}",
            state.total_spins, state.total_wins, state.biggest_win
        ));
    }

    pub fn print_achievements(&mut self, book: &AchievementBook) {
        self.print(format!(
            "🏅 Achievements {}/{}",
            book.unlocked_count(),
            ACHIEVEMENTS.len()
        ));
        let lines: Vec<String> = book
            .iter()
            .map(|a| {
                let mark = if a.unlocked { a.icon } else { "🔒" };
                format!("   {mark} {}: {}", a.name, a.description)
            })
            .collect();
        for line in lines {
            self.print(line);
        }
    }

    pub fn print_log(&mut self) {
        let lines: Vec<String> = self.log.iter().cloned().collect();
        for line in lines {
            self.print(line);
        }
    }

    fn print_win(&mut self, win: &WinResult) {
        let banner = match win.kind {
            WinKind::Triple => "✨ EPIC WIN! ✨",
            WinKind::Double => "⭐ NICE WIN! ⭐",
            WinKind::None => return,
        };
        self.print(format!("{banner} {} +{} gold", win.combo, win.amount));
    }

    fn push_log(&mut self, line: String) {
        if self.log.len() == LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }
}

impl<W: Write> UiSink for Terminal<W> {
    fn dispatch(&mut self, command: UiCommand) {
        match command {
            UiCommand::Render(state) => self.print_state(&state),
            UiCommand::RenderAchievements(book) => self.print(format!(
                "🏅 {}/{} achievements unlocked",
                book.unlocked_count(),
                ACHIEVEMENTS.len()
            )),
            UiCommand::PlayReels { outcome, .. } => self.print(format!("🎰 [ {outcome} ]")),
            UiCommand::ShowWin(win) => self.print_win(&win),
            UiCommand::ShowAchievement(achievement) => self.print(format!(
                "{} {}: {}",
                achievement.icon, achievement.name, achievement.description
            )),
            UiCommand::LevelUp(level) => self.print(format!("⭐ LEVEL {level} ⭐")),
            UiCommand::Log(line) => {
                self.print(&line);
                self.push_log(line);
            }
            UiCommand::SetControlsEnabled(enabled) => self.controls_enabled = enabled,
            UiCommand::SetUser(user) => {
                match &user {
                    Some(name) => self.print(format!("👤 {name}")),
                    None => self.print("👤 guest"),
                }
                self.user = user;
            }
            UiCommand::Loading(true) => self.print("⏳ Loading..."),
            UiCommand::Loading(false) => {}
        }
    }
}

/// Real pauses on the tokio timer, or none at all when animation is off.
#[derive(Clone, Copy, Debug)]
pub struct TokioDelay {
    enabled: bool,
}

impl TokioDelay {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        if self.enabled {
            tokio::time::sleep(duration).await;
        }
    }
}
