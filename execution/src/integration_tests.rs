//! Integration tests for the game controller.
//!
//! These tests drive full sessions (sign-in, bets, spins, persistence)
//! through the controller with scripted draws and a recording UI.

#[cfg(test)]
mod tests {
    use crate::mocks::{
        create_controller, create_controller_with_store, draws, logged, FailingStore, MockAuth,
        NoDelay, Sequence, TestController,
    };
    use crate::persistence::{GOLD_KEY, LEVEL_KEY, STATS_KEY};
    use crate::{Controller, GameConfig, KeyValueStore, MemoryStore, UiCommand};
    use reelquest_types::slot::{AchievementId, BetTier, SymbolId, WinKind};

    const DRAGONS: [f64; 3] = [draws::DRAGON, draws::DRAGON, draws::DRAGON];
    const SWORDS: [f64; 3] = [draws::SWORD, draws::SWORD, draws::SWORD];
    const MISS: [f64; 3] = [draws::CROWN, draws::CASTLE, draws::BLADE];

    fn controller_with(gold: u64, bet: u64, values: &[f64]) -> TestController {
        let config = GameConfig {
            starting_gold: gold,
            starting_bet: BetTier::try_from(bet).unwrap(),
            ..GameConfig::default()
        };
        Controller::new(
            config,
            MemoryStore::default(),
            MockAuth::signed_out("guest"),
            Vec::new(),
            Sequence::new(values.to_vec()),
            NoDelay::default(),
        )
    }

    /// A store holding progress saved by an earlier session.
    async fn saved_store(entries: &[(&str, &str)]) -> MemoryStore {
        let mut store = MemoryStore::default();
        for (key, value) in entries {
            store.set(key, value.to_string()).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_winning_spin_settles_gold() {
        let mut game = create_controller(MockAuth::signed_out("guest"), DRAGONS.to_vec());
        game.init().await;

        let report = game.spin().await.unwrap();
        assert_eq!(report.win.kind, WinKind::Triple);
        assert_eq!(report.win.amount, 1_000);
        assert_eq!(game.state().gold, 1_000 - 25 + 1_000);
        assert_eq!(game.state().total_spins, 1);
        assert_eq!(game.state().total_wins, 1);
        assert_eq!(game.state().biggest_win, 1_000);
        assert_eq!(game.state().high_score, 1_975);
        assert!(!game.state().is_spinning);
        assert_eq!(game.delay().waits(), 1);

        let unlocked: Vec<AchievementId> = report.unlocked.iter().map(|a| a.id).collect();
        assert_eq!(
            unlocked,
            vec![
                AchievementId::FirstSpin,
                AchievementId::FirstWin,
                AchievementId::BigWin,
                AchievementId::TripleDragon,
            ]
        );
        assert!(logged(game.ui(), "TRIPLE DRAGON! Won 1000 gold!"));
    }

    #[tokio::test]
    async fn test_every_tier_deducts_then_pays() {
        for amount in [10, 25, 50, 100, 250] {
            let mut game = controller_with(1_000, amount, &SWORDS);
            let pending = game.begin_spin().unwrap();
            assert_eq!(game.state().gold, 1_000 - amount);

            let report = game.settle(pending).await;
            assert_eq!(report.win.amount, 100 * amount / 25);
            assert_eq!(game.state().gold, 1_000 - amount + report.win.amount);
        }
    }

    #[tokio::test]
    async fn test_losing_spin() {
        let mut game = create_controller(MockAuth::signed_out("guest"), MISS.to_vec());
        let report = game.spin().await.unwrap();

        let ids: Vec<SymbolId> = report.outcome.reels.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![SymbolId::Crown, SymbolId::Castle, SymbolId::Blade]);
        assert!(!report.win.is_win());
        assert_eq!(report.bonus, 0);
        assert_eq!(game.state().gold, 975);
        assert_eq!(game.state().total_wins, 0);
        assert!(logged(game.ui(), "No luck this time"));
        assert!(!game
            .ui()
            .iter()
            .any(|command| matches!(command, UiCommand::ShowWin(_))));
    }

    #[tokio::test]
    async fn test_concurrent_spin_requests() {
        let mut game = create_controller(MockAuth::signed_out("guest"), MISS.to_vec());

        let pending = game.begin_spin().unwrap();
        assert!(game.begin_spin().is_none());
        assert!(game.spin().await.is_none());
        assert_eq!(game.state().gold, 975);
        assert_eq!(game.state().total_spins, 1);

        // Bets are frozen while spinning
        assert!(game.place_bet(10).is_none());
        assert!(game.max_bet().is_none());

        game.settle(pending).await;
        assert_eq!(game.state().gold, 975);
        assert!(game.begin_spin().is_some());
    }

    #[tokio::test]
    async fn test_outcome_is_fixed_before_animation() {
        let mut game = create_controller(MockAuth::signed_out("guest"), DRAGONS.to_vec());
        let pending = game.begin_spin().unwrap();
        let outcome = *pending.outcome();

        let played = game.ui().iter().find_map(|command| match command {
            UiCommand::PlayReels {
                outcome,
                stop_after,
            } => Some((*outcome, *stop_after)),
            _ => None,
        });
        let (played, stops) = played.unwrap();
        assert_eq!(played, outcome);
        assert_eq!(stops, GameConfig::default().reel_stops());

        let report = game.settle(pending).await;
        assert_eq!(report.outcome, outcome);
    }

    #[tokio::test]
    async fn test_loss_recovery_bonus() {
        let mut game = controller_with(15, 10, &MISS);
        let report = game.spin().await.unwrap();
        assert_eq!(report.bonus, 100);
        assert_eq!(game.state().gold, 105);
        assert!(logged(game.ui(), "Tip: Lower your bet"));
        assert!(logged(game.ui(), "Bonus! You received 100 gold"));

        // Affordable again, no further bonus
        let report = game.spin().await.unwrap();
        assert_eq!(report.bonus, 0);
        assert_eq!(game.state().gold, 95);
    }

    #[tokio::test]
    async fn test_insufficient_gold_rejected() {
        let mut game = controller_with(9, 10, &MISS);
        assert!(game.spin().await.is_none());
        assert_eq!(game.state().gold, 9);
        assert_eq!(game.state().total_spins, 0);
        assert_eq!(game.delay().waits(), 0);
    }

    #[tokio::test]
    async fn test_level_up_to_five() {
        let mut game = controller_with(4_975, 25, &SWORDS);
        let report = game.spin().await.unwrap();
        assert_eq!(game.state().gold, 5_050);
        assert_eq!(report.levels, vec![2, 3, 4, 5]);
        assert_eq!(game.state().level, 5);
        assert!(game.achievements().is_unlocked(AchievementId::Level5));
        assert!(logged(game.ui(), "You are now level 5!"));

        let level_ups = game
            .ui()
            .iter()
            .filter(|command| matches!(command, UiCommand::LevelUp(_)))
            .count();
        assert_eq!(level_ups, 4);
    }

    #[tokio::test]
    async fn test_gold_hoarder() {
        let mut game = controller_with(9_500, 25, &DRAGONS);
        game.spin().await.unwrap();
        assert_eq!(game.state().gold, 10_475);
        assert!(game.achievements().is_unlocked(AchievementId::GoldHoarder));
        assert_eq!(game.state().level, 10);
    }

    #[tokio::test]
    async fn test_bet_selection() {
        let mut game = controller_with(200, 25, &MISS);

        assert!(game.place_bet(30).is_none());
        assert!(game.place_bet(250).is_none());
        assert_eq!(game.state().bet.amount(), 25);

        assert_eq!(game.place_bet(100).map(BetTier::amount), Some(100));
        assert_eq!(game.max_bet().map(BetTier::amount), Some(100));
        assert!(!game.achievements().is_unlocked(AchievementId::HighRoller));

        let mut rich = controller_with(1_000, 25, &MISS);
        assert_eq!(rich.max_bet(), Some(BetTier::MAX));
        assert!(rich.achievements().is_unlocked(AchievementId::HighRoller));

        let mut broke = controller_with(5, 10, &MISS);
        assert!(broke.max_bet().is_none());
        assert_eq!(broke.state().bet.amount(), 10);
    }

    #[tokio::test]
    async fn test_offline_identity_provider() {
        let mut game = create_controller(MockAuth::offline(), MISS.to_vec());
        game.init().await;
        assert!(game.user().is_none());
        assert!(!game.is_persisting());
        assert!(logged(game.ui(), "offline mode"));

        assert!(!game.login().await);
        assert!(logged(game.ui(), "Login failed"));

        // Still playable
        assert!(game.spin().await.is_some());
        assert!(game.store().is_empty());
    }

    #[tokio::test]
    async fn test_restores_saved_progress() {
        let store = saved_store(&[
            (GOLD_KEY, "2500"),
            (LEVEL_KEY, "2"),
            (STATS_KEY, r#"{"totalSpins":99,"totalWins":40,"biggestWin":500}"#),
        ])
        .await;
        let mut game =
            create_controller_with_store(store, MockAuth::signed_in("mira"), MISS.to_vec());
        game.init().await;

        assert_eq!(game.user().map(|u| u.display_name()), Some("mira"));
        assert_eq!(game.state().gold, 2_500);
        assert_eq!(game.state().level, 2);
        assert_eq!(game.state().total_spins, 99);
        assert!(logged(game.ui(), "Welcome back, mira!"));
        assert!(logged(game.ui(), "Game progress loaded successfully!"));
        assert!(game
            .ui()
            .contains(&UiCommand::SetUser(Some("mira".to_string()))));

        // The 100th spin
        let report = game.spin().await.unwrap();
        assert!(report
            .unlocked
            .iter()
            .any(|a| a.id == AchievementId::SpinMaster));
    }

    #[tokio::test]
    async fn test_corrupt_saved_numbers_stay_playable() {
        let max = u64::MAX.to_string();
        let stats = format!(r#"{{"totalSpins":{max},"totalWins":0,"biggestWin":0}}"#);
        let store = saved_store(&[(GOLD_KEY, max.as_str()), (STATS_KEY, stats.as_str())]).await;
        let mut game =
            create_controller_with_store(store, MockAuth::signed_in("mira"), DRAGONS.to_vec());
        game.init().await;
        assert_eq!(game.state().gold, 1_000);
        assert_eq!(game.state().total_spins, 0);

        game.spin().await.unwrap();
        assert_eq!(game.state().gold, 1_975);
        assert_eq!(game.state().total_spins, 1);
    }

    #[tokio::test]
    async fn test_saved_stats_keep_wins_within_spins() {
        let store = saved_store(&[
            (GOLD_KEY, "800"),
            (STATS_KEY, r#"{"totalSpins":3,"totalWins":50,"biggestWin":0}"#),
        ])
        .await;
        let mut game =
            create_controller_with_store(store, MockAuth::signed_in("mira"), MISS.to_vec());
        game.init().await;

        assert_eq!(game.state().gold, 800);
        assert!(game.state().total_wins <= game.state().total_spins);
        assert_eq!(game.state().total_wins, 0);
    }

    #[tokio::test]
    async fn test_login_persists_and_logout_stops() {
        let mut game = create_controller(MockAuth::signed_out("mira"), MISS.to_vec());
        game.init().await;
        game.spin().await.unwrap();
        assert!(game.store().is_empty());

        assert!(game.login().await);
        assert!(game.is_persisting());
        // Guest progress is kept when nothing was saved before
        assert_eq!(game.state().gold, 975);

        game.spin().await.unwrap();
        let stored = game.store().get(GOLD_KEY).await.unwrap();
        assert_eq!(stored.as_deref(), Some("950"));

        assert!(game.logout().await);
        assert!(game.user().is_none());
        game.spin().await.unwrap();
        assert_eq!(game.state().gold, 925);
        let stored = game.store().get(GOLD_KEY).await.unwrap();
        assert_eq!(stored.as_deref(), Some("950"));
    }

    #[tokio::test]
    async fn test_cancelled_login() {
        let mut auth = MockAuth::signed_out("mira");
        auth.cancel_sign_in = true;
        let mut game = create_controller(auth, MISS.to_vec());
        assert!(!game.login().await);
        assert!(!game.is_persisting());
        assert!(logged(game.ui(), "Login failed"));
    }

    #[tokio::test]
    async fn test_save_failure_keeps_state() {
        let mut game =
            create_controller_with_store(FailingStore, MockAuth::signed_in("mira"), DRAGONS.to_vec());
        game.init().await;
        assert!(logged(game.ui(), "Could not load saved progress."));
        assert!(game.is_persisting());

        let report = game.spin().await.unwrap();
        assert_eq!(report.win.amount, 1_000);
        assert_eq!(game.state().gold, 1_975);
        assert!(!game.state().is_spinning);
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let mut first = create_controller(MockAuth::signed_in("mira"), DRAGONS.to_vec());
        first.init().await;
        first.max_bet().unwrap();
        first.spin().await.unwrap();
        first.spin().await.unwrap();
        let saved = first.snapshot();

        let mut second = create_controller_with_store(
            first.store().clone(),
            MockAuth::signed_in("mira"),
            MISS.to_vec(),
        );
        second.init().await;
        assert_eq!(second.snapshot(), saved);
        assert!(second
            .achievements()
            .is_unlocked(AchievementId::HighRoller));
    }

    #[tokio::test]
    async fn test_achievements_never_relock() {
        let mut game = create_controller(
            MockAuth::signed_out("guest"),
            [DRAGONS, MISS, MISS, SWORDS, MISS].concat(),
        );
        let mut seen = Vec::new();
        for _ in 0..50 {
            if game.spin().await.is_none() {
                break;
            }
            for id in AchievementId::ALL {
                if game.achievements().is_unlocked(id) {
                    if !seen.contains(&id) {
                        seen.push(id);
                    }
                } else {
                    assert!(!seen.contains(&id), "{id} was relocked");
                }
            }
        }
        assert!(seen.contains(&AchievementId::TripleDragon));
        assert!(game.state().total_wins <= game.state().total_spins);
    }
}
