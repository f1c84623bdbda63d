//! Line-oriented commands driving a [Controller].

use reelquest_execution::{AuthService, Controller, Delay, KeyValueStore, UniformSource};
use std::{io::Write, str::FromStr};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::terminal::Terminal;

pub const HELP: &str = "\
Commands:
  bet <amount>   choose a bet (10, 25, 50, 100 or 250)
  max            bet the most you can afford
  spin           spin the reels
  login          sign in and save progress
  logout         sign out
  stats          show balance and lifetime statistics
  achievements   list achievements
  log            show recent messages
  help           show this help
  quit           leave the game";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Bet(u64),
    MaxBet,
    Spin,
    Login,
    Logout,
    Stats,
    Achievements,
    Log,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),
    #[error("usage: bet <amount>")]
    MissingAmount,
    #[error("invalid bet amount: {0}")]
    InvalidAmount(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let command = match name.as_str() {
            "bet" => {
                let amount = words.next().ok_or(CommandError::MissingAmount)?;
                let amount = amount
                    .parse()
                    .map_err(|_| CommandError::InvalidAmount(amount.to_string()))?;
                Command::Bet(amount)
            }
            "max" => Command::MaxBet,
            "spin" | "s" => Command::Spin,
            "login" => Command::Login,
            "logout" => Command::Logout,
            "stats" => Command::Stats,
            "achievements" | "ach" => Command::Achievements,
            "log" => Command::Log,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };
        Ok(command)
    }
}

/// Apply one command. Returns `false` once the player quits.
pub async fn execute<S, A, W, R, D>(
    game: &mut Controller<S, A, Terminal<W>, R, D>,
    command: Command,
) -> bool
where
    S: KeyValueStore,
    A: AuthService,
    W: Write,
    R: UniformSource,
    D: Delay,
{
    debug!(?command, "command");
    match command {
        Command::Bet(amount) => {
            if game.place_bet(amount).is_none() {
                game.ui_mut()
                    .print(format!("🚫 Cannot bet {amount} right now."));
            }
        }
        Command::MaxBet => {
            if game.max_bet().is_none() {
                game.ui_mut().print("🚫 Not enough gold for any bet.");
            }
        }
        Command::Spin => {
            if game.spin().await.is_none() {
                game.ui_mut()
                    .print("🚫 Not enough gold for this bet. Try a lower one.");
            }
        }
        Command::Login => {
            if game.user().is_some() {
                game.ui_mut().print("Already signed in.");
            } else {
                game.login().await;
            }
        }
        Command::Logout => {
            if game.user().is_none() {
                game.ui_mut().print("Not signed in.");
            } else {
                game.logout().await;
            }
        }
        Command::Stats => {
            let state = game.state().clone();
            game.ui_mut().print_stats(&state);
        }
        Command::Achievements => {
            let book = game.achievements().clone();
            game.ui_mut().print_achievements(&book);
        }
        Command::Log => game.ui_mut().print_log(),
        Command::Help => game.ui_mut().print(HELP),
        Command::Quit => return false,
    }
    true
}

/// Read commands from `input` until it ends or the player quits.
pub async fn run<S, A, W, R, D, I>(
    game: &mut Controller<S, A, Terminal<W>, R, D>,
    input: I,
) -> std::io::Result<()>
where
    S: KeyValueStore,
    A: AuthService,
    W: Write,
    R: UniformSource,
    D: Delay,
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                game.ui_mut().print(format!("❓ {e}"));
                continue;
            }
        };
        if !execute(game, command).await {
            break;
        }
    }
    Ok(())
}
