//! Game session controller.
//!
//! The controller owns the authoritative [GameState] and [AchievementBook]
//! and is the only writer to either. A spin moves through
//! `Idle -> Spinning -> Settling -> Idle`:
//!
//! 1. [Controller::begin_spin] checks the guard, takes the bet and fixes the
//!    full outcome before anything is presented.
//! 2. The caller awaits the cosmetic delay (see [Controller::spin]).
//! 3. [Controller::settle] applies the payout, progression, achievements and
//!    persistence, then returns to idle.
//!
//! Invalid player actions (unknown or unaffordable bets, spinning while a
//! spin is in flight) are ignored without surfacing an error.

use reelquest_types::slot::{
    Achievement, AchievementBook, BetTier, GameState, PersistedSnapshot, SpinOutcome, WinKind,
    WinResult,
};
use tracing::{debug, info, warn};

use crate::{
    achievements::{self, Trigger},
    auth::{AuthError, AuthService, User},
    config::GameConfig,
    payout,
    persistence::Gateway,
    progression,
    reels::{ReelTable, UniformSource},
    store::KeyValueStore,
    ui::{Delay, UiCommand, UiSink},
};

/// An accepted spin awaiting settlement.
///
/// Only [Controller::begin_spin] creates one and [Controller::settle]
/// consumes it, so each accepted spin settles exactly once.
#[derive(Debug)]
#[must_use = "an accepted spin must be settled"]
pub struct PendingSpin {
    outcome: SpinOutcome,
    bet: BetTier,
}

impl PendingSpin {
    pub fn outcome(&self) -> &SpinOutcome {
        &self.outcome
    }

    pub fn bet(&self) -> BetTier {
        self.bet
    }
}

/// What a settled spin did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpinReport {
    pub outcome: SpinOutcome,
    pub bet: BetTier,
    pub win: WinResult,
    /// Loss recovery bonus granted
    pub bonus: u64,
    /// Levels reached during settlement
    pub levels: Vec<u8>,
    /// Achievements unlocked by the spin (at acceptance or settlement)
    pub unlocked: Vec<Achievement>,
}

pub struct Controller<S, A, U, R, D>
where
    S: KeyValueStore,
    A: AuthService,
    U: UiSink,
    R: UniformSource,
    D: Delay,
{
    config: GameConfig,
    state: GameState,
    achievements: AchievementBook,
    reels: ReelTable,
    gateway: Gateway<S>,
    auth: A,
    ui: U,
    source: R,
    delay: D,
    user: Option<User>,
    /// Unlocked at acceptance, reported at settlement
    pending_unlocks: Vec<Achievement>,
}

impl<S, A, U, R, D> Controller<S, A, U, R, D>
where
    S: KeyValueStore,
    A: AuthService,
    U: UiSink,
    R: UniformSource,
    D: Delay,
{
    pub fn new(config: GameConfig, store: S, auth: A, ui: U, source: R, delay: D) -> Self {
        let state = GameState::new(config.starting_gold, config.starting_bet);
        Self {
            config,
            state,
            achievements: AchievementBook::default(),
            reels: ReelTable::default(),
            gateway: Gateway::new(store),
            auth,
            ui,
            source,
            delay,
            user: None,
            pending_unlocks: Vec::new(),
        }
    }

    /// Replace the symbol table (custom catalogs, tests).
    pub fn with_reels(mut self, reels: ReelTable) -> Self {
        self.reels = reels;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn achievements(&self) -> &AchievementBook {
        &self.achievements
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot::capture(&self.state, &self.achievements)
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn delay(&self) -> &D {
        &self.delay
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    pub fn is_persisting(&self) -> bool {
        self.gateway.is_attached()
    }

    fn log(&mut self, line: impl Into<String>) {
        self.ui.dispatch(UiCommand::Log(line.into()));
    }

    fn render(&mut self) {
        self.ui.dispatch(UiCommand::Render(self.state.clone()));
        self.ui
            .dispatch(UiCommand::SetControlsEnabled(self.state.can_spin()));
    }

    fn announce(&mut self, unlocked: &[Achievement]) {
        if unlocked.is_empty() {
            return;
        }
        for achievement in unlocked {
            self.log(format!("🏅 Achievement Unlocked: {}!", achievement.name));
            self.ui.dispatch(UiCommand::ShowAchievement(*achievement));
        }
        self.ui
            .dispatch(UiCommand::RenderAchievements(self.achievements.clone()));
    }

    fn unlock(&mut self, trigger: Trigger<'_>) -> Vec<Achievement> {
        let unlocked = achievements::evaluate(&mut self.achievements, trigger);
        self.announce(&unlocked);
        unlocked
    }

    fn announce_levels(&mut self, levels: &[u8]) -> Vec<Achievement> {
        let mut unlocked = Vec::new();
        for &level in levels {
            info!(level, "level up");
            self.log(format!("🎊 Level Up! You are now level {level}!"));
            self.ui.dispatch(UiCommand::LevelUp(level));
            unlocked.extend(self.unlock(Trigger::LevelReached(level)));
        }
        unlocked
    }

    async fn persist(&mut self) {
        let snapshot = self.snapshot();
        if let Err(e) = self.gateway.save(&snapshot).await {
            warn!(error = %e, "failed to save progress");
        }
    }

    /// Restore the identity session and saved progress, then draw the UI.
    ///
    /// Any failure leaves the game playable offline.
    pub async fn init(&mut self) {
        self.ui.dispatch(UiCommand::Loading(true));

        match self.auth.is_signed_in().await {
            Ok(true) => match self.auth.current_user().await {
                Ok(user) => {
                    let name = user.display_name().to_string();
                    self.sign_in_as(user);
                    self.log(format!("👋 Welcome back, {name}!"));
                    self.load_progress().await;
                }
                Err(e) => self.go_offline(e),
            },
            Ok(false) => {}
            Err(e) => self.go_offline(e),
        }

        self.ui
            .dispatch(UiCommand::RenderAchievements(self.achievements.clone()));
        self.render();
        self.log("🌟 Welcome to Fantasy Slot Quest! Your adventure begins...");
        self.ui.dispatch(UiCommand::Loading(false));
    }

    fn go_offline(&mut self, error: impl std::fmt::Display) {
        warn!(error = %error, "identity provider unavailable");
        self.log("⚠️ Game loaded in offline mode. Login to save progress.");
    }

    fn sign_in_as(&mut self, user: User) {
        info!(user = user.display_name(), "signed in");
        self.ui
            .dispatch(UiCommand::SetUser(Some(user.display_name().to_string())));
        self.user = Some(user);
        self.gateway.attach();
    }

    async fn load_progress(&mut self) {
        match self.gateway.load().await {
            Ok(Some(snapshot)) => {
                snapshot.restore(&mut self.state, &mut self.achievements);
                let levels = progression::apply_level_ups(&mut self.state);
                self.announce_levels(&levels);
                info!(gold = self.state.gold, level = self.state.level, "progress loaded");
                self.log("💾 Game progress loaded successfully!");
            }
            Ok(None) => debug!("no saved progress"),
            Err(e) => {
                warn!(error = %e, "failed to load progress");
                self.log("⚠️ Could not load saved progress.");
            }
        }
    }

    /// Interactive sign-in. On success, saved progress is loaded and future
    /// settlements are persisted.
    pub async fn login(&mut self) -> bool {
        self.ui.dispatch(UiCommand::Loading(true));
        let signed_in = match self.try_login().await {
            Ok(Some(user)) => {
                let name = user.display_name().to_string();
                self.sign_in_as(user);
                self.load_progress().await;
                self.ui
                    .dispatch(UiCommand::RenderAchievements(self.achievements.clone()));
                self.render();
                self.log(format!("🎉 Successfully logged in as {name}!"));
                self.log("💾 Your progress will now be saved automatically.");
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "login failed");
                self.log("❌ Login failed. Please try again.");
                false
            }
        };
        self.ui.dispatch(UiCommand::Loading(false));
        signed_in
    }

    async fn try_login(&mut self) -> Result<Option<User>, AuthError> {
        self.auth.sign_in_interactive().await?;
        if !self.auth.is_signed_in().await? {
            return Ok(None);
        }
        Ok(Some(self.auth.current_user().await?))
    }

    /// Sign out. Progress keeps playing but is no longer saved.
    pub async fn logout(&mut self) -> bool {
        if let Err(e) = self.auth.sign_out().await {
            warn!(error = %e, "logout failed");
            return false;
        }
        info!("signed out");
        self.user = None;
        self.gateway.detach();
        self.ui.dispatch(UiCommand::SetUser(None));
        self.log("👋 Logged out successfully. Progress will not be saved.");
        true
    }

    fn select_bet(&mut self, bet: BetTier) {
        self.state.bet = bet;
        debug!(bet = bet.amount(), "bet selected");
        self.unlock(Trigger::BetSelected(bet));
        self.render();
    }

    /// Select a bet from the tier set. Unknown or unaffordable amounts, and
    /// requests while spinning, are ignored.
    pub fn place_bet(&mut self, amount: u64) -> Option<BetTier> {
        if self.state.is_spinning {
            return None;
        }
        match BetTier::affordable(amount, self.state.gold) {
            Ok(bet) => {
                self.select_bet(bet);
                Some(bet)
            }
            Err(e) => {
                debug!(error = %e, "bet ignored");
                None
            }
        }
    }

    /// Select the highest tier the balance covers.
    pub fn max_bet(&mut self) -> Option<BetTier> {
        if self.state.is_spinning {
            return None;
        }
        let bet = BetTier::max_affordable(self.state.gold)?;
        self.select_bet(bet);
        Some(bet)
    }

    /// Accept a spin: take the bet and decide the outcome.
    ///
    /// Returns `None` without changing anything if a spin is already in
    /// flight or the bet is unaffordable.
    pub fn begin_spin(&mut self) -> Option<PendingSpin> {
        let bet = self.state.bet;
        progression::debit(&mut self.state)?;
        info!(bet = bet.amount(), gold = self.state.gold, "spin accepted");

        let unlocked = self.unlock(Trigger::SpinStarted {
            total_spins: self.state.total_spins,
            bet,
        });
        self.pending_unlocks = unlocked;

        // No randomness is consumed after this point
        let outcome = self.reels.spin(&mut self.source);

        self.render();
        self.log(format!("🎰 Spinning with {bet} gold bet..."));
        self.ui.dispatch(UiCommand::PlayReels {
            outcome,
            stop_after: self.config.reel_stops(),
        });

        Some(PendingSpin { outcome, bet })
    }

    /// Apply a spin's consequences and return to idle.
    pub async fn settle(&mut self, pending: PendingSpin) -> SpinReport {
        let PendingSpin { outcome, bet } = pending;
        let win = payout::evaluate(&outcome, bet);
        let settlement = progression::settle(&mut self.state, &win);
        let mut unlocked = std::mem::take(&mut self.pending_unlocks);

        if win.is_win() {
            if let Some(symbol) = win.symbol {
                let kind = match win.kind {
                    WinKind::Triple => "TRIPLE",
                    _ => "DOUBLE",
                };
                self.log(format!(
                    "🎉 {kind} {}! Won {} gold!",
                    symbol.name.to_uppercase(),
                    win.amount
                ));
            }
            self.ui.dispatch(UiCommand::ShowWin(win.clone()));
        } else {
            self.log("💸 No luck this time. Try again!");
            if settlement.low_gold {
                self.log("💡 Tip: Lower your bet to make your gold last longer!");
            }
            if settlement.bonus > 0 {
                self.log(format!(
                    "🎁 Bonus! You received {} gold to continue your adventure!",
                    settlement.bonus
                ));
            }
        }
        info!(
            outcome = %outcome,
            payout = win.amount,
            bonus = settlement.bonus,
            gold = self.state.gold,
            "spin settled"
        );

        unlocked.extend(self.unlock(Trigger::Settled {
            win: &win,
            total_wins: self.state.total_wins,
            gold: self.state.gold,
        }));
        unlocked.extend(self.announce_levels(&settlement.levels));

        self.state.is_spinning = false;
        self.render();
        self.persist().await;

        SpinReport {
            outcome,
            bet,
            win,
            bonus: settlement.bonus,
            levels: settlement.levels,
            unlocked,
        }
    }

    /// Run a full spin: accept, wait out the presentation delay, settle.
    pub async fn spin(&mut self) -> Option<SpinReport> {
        let pending = self.begin_spin()?;
        self.delay.sleep(self.config.settle_delay()).await;
        Some(self.settle(pending).await)
    }
}
