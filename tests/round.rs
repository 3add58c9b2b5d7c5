use std::cell::RefCell;

use imposter::{
    AlarmMessage, Error, Game,
    assignment::Role,
    catalog::{Catalog, Category, CategoryChoice},
    feedback::Notification,
    game::{Options, RoundDuration, State, SyncMessage},
    leaderboard::{Leaderboard, ScoreEntry},
    random::Scripted,
    store::{JsonFileStore, MemoryStore, ScoreStore},
};

fn scripted(values: &[usize]) -> Scripted {
    Scripted::new(values.iter().copied())
}

/// Stand-in for the host's timer facility
#[derive(Default)]
struct Scheduler {
    pending: RefCell<Vec<AlarmMessage>>,
}

impl Scheduler {
    fn schedule(&self) -> impl FnMut(AlarmMessage, web_time::Duration) + '_ {
        |message, duration| {
            assert_eq!(duration, web_time::Duration::from_secs(1));
            self.pending.borrow_mut().push(message);
        }
    }

    /// Delivers every pending alarm once, as if one second passed
    fn fire<B: imposter::feedback::FeedbackSink>(&self, game: &mut Game, feedback: &B) {
        let due = self.pending.take();
        for message in due {
            game.receive_alarm(message, self.schedule(), feedback);
        }
    }
}

fn new_game(store: &MemoryStore, names: &[&str]) -> Game {
    let mut game = Game::new(
        Options::default(),
        Catalog::default(),
        Leaderboard::load(store),
    );
    for name in names {
        game.add_player(name, store).unwrap();
    }
    while game.roster().len() > names.len() {
        game.remove_player(0).unwrap();
    }
    game
}

#[test]
fn full_round_with_crew_win() {
    let store = MemoryStore::default();
    let scheduler = Scheduler::default();
    let notifications = RefCell::new(Vec::new());
    let feedback = |n: &Notification| notifications.borrow_mut().push(*n);

    let mut game = new_game(&store, &["Asha", "Ben", "Chitra", "Dev"]);
    assert_eq!(game.roster().names(), ["Asha", "Ben", "Chitra", "Dev"]);

    game.select_category(CategoryChoice::Named("Jobs".to_string())).unwrap();
    game.start_round(&mut scripted(&[5, 2, 1])).unwrap();

    let mut seen = Vec::new();
    while game.state() == State::Assign {
        game.reveal(&feedback).unwrap();
        if let SyncMessage::Assign {
            player,
            role: Some(role),
            ..
        } = game.state_message()
        {
            seen.push((player, role));
        }
        game.advance(scheduler.schedule()).unwrap();
    }

    assert_eq!(seen.len(), 4);
    for (index, (player, role)) in seen.iter().enumerate() {
        assert_eq!(player, game.roster().get(index).unwrap());
        if index == 2 {
            assert_eq!(
                role,
                &Role::Imposter {
                    category: "Jobs".to_string()
                }
            );
        } else {
            assert_eq!(
                role,
                &Role::Crew {
                    word: "Artist".to_string()
                }
            );
        }
    }

    assert_eq!(game.state(), State::Playing);
    assert_eq!(game.countdown().remaining(), 240);

    for _ in 0..30 {
        scheduler.fire(&mut game, &feedback);
    }
    assert_eq!(game.countdown().remaining(), 210);

    game.vote(true, &store, &feedback).unwrap();
    scheduler.fire(&mut game, &feedback);
    assert_eq!(game.countdown().remaining(), 210);

    let recorded = notifications.borrow();
    assert_eq!(
        recorded
            .iter()
            .filter(|n| **n == Notification::Reveal)
            .count(),
        4
    );
    assert_eq!(
        recorded.last(),
        Some(&Notification::RoundResolved { crew_won: true })
    );

    let stored = Leaderboard::load(&store);
    assert_eq!(stored.score("Chitra"), Some(ScoreEntry::default()));
    for name in ["Asha", "Ben", "Dev"] {
        assert_eq!(
            stored.score(name),
            Some(ScoreEntry {
                crew_wins: 1,
                imposter_wins: 0
            })
        );
    }
}

#[test]
fn countdown_runs_out_without_ending_round() {
    let store = MemoryStore::default();
    let scheduler = Scheduler::default();
    let notifications = RefCell::new(Vec::new());
    let feedback = |n: &Notification| notifications.borrow_mut().push(*n);

    let options = Options::new(RoundDuration::Fixed(30), 5);
    let mut game = Game::new(options, Catalog::default(), Leaderboard::default());
    game.start_round(&mut fastrand::Rng::with_seed(11)).unwrap();
    while game.state() == State::Assign {
        game.reveal(&()).unwrap();
        game.advance(scheduler.schedule()).unwrap();
    }

    for _ in 0..45 {
        scheduler.fire(&mut game, &feedback);
    }

    assert_eq!(game.countdown().remaining(), 0);
    assert!(!game.countdown().is_running());
    assert!(scheduler.pending.borrow().is_empty());
    assert_eq!(game.state(), State::Playing);

    let recorded = notifications.borrow();
    assert_eq!(recorded.len(), 30);
    assert!(
        recorded[..24]
            .iter()
            .all(|n| matches!(n, Notification::Tick { .. }))
    );
    assert_eq!(recorded[0], Notification::Tick { remaining: 29 });
    assert_eq!(
        recorded[24..],
        [
            Notification::WarningTick { remaining: 5 },
            Notification::WarningTick { remaining: 4 },
            Notification::WarningTick { remaining: 3 },
            Notification::WarningTick { remaining: 2 },
            Notification::WarningTick { remaining: 1 },
            Notification::Expired,
        ]
    );
    drop(recorded);

    assert_eq!(game.toggle_timer(scheduler.schedule()), Ok(()));
    assert!(!game.countdown().is_running());

    game.vote(false, &store, &()).unwrap();
    assert_eq!(game.state(), State::Result { crew_won: false });
}

#[test]
fn custom_catalog_and_unknown_category() {
    let catalog = Catalog::new(vec![Category::new("Colors", ["Red", "Blue"])]).unwrap();
    let mut game = Game::new(Options::default(), catalog, Leaderboard::default());

    assert_eq!(
        game.select_category(CategoryChoice::Named("Animals".to_string())),
        Err(Error::UnknownCategory)
    );

    game.start_round(&mut scripted(&[0, 1, 0, 0])).unwrap();
    let round = game.round().unwrap();
    assert_eq!(round.category(), "Colors");
    assert_eq!(round.word(), "Blue");
}

#[test]
fn scores_survive_restart_through_file_store() {
    let path = std::env::temp_dir().join(format!("imposter-it-{}.json", fastrand::u64(..)));
    let store = JsonFileStore::new(&path);

    let mut game = Game::new(
        Options::default(),
        Catalog::default(),
        Leaderboard::load(&store),
    );
    game.start_round(&mut scripted(&[0, 0, 0, 0])).unwrap();
    while game.state() == State::Assign {
        game.reveal(&()).unwrap();
        game.advance(|_, _| {}).unwrap();
    }
    game.vote(false, &store, &()).unwrap();

    let mut restarted = Game::new(
        Options::default(),
        Catalog::default(),
        Leaderboard::load(&store),
    );
    assert_eq!(
        restarted.leaderboard().score("Player 1"),
        Some(ScoreEntry {
            crew_wins: 0,
            imposter_wins: 1
        })
    );
    assert_eq!(restarted.ranked_scores().items()[0].0, "Player 1");

    restarted.clear_scores(&store);
    assert!(store.load().unwrap().is_empty());

    std::fs::remove_file(path).unwrap();
}

#[test]
fn corrupt_scores_start_empty() {
    let store = MemoryStore::with_document("{ definitely not scores");
    let game = Game::new(
        Options::default(),
        Catalog::default(),
        Leaderboard::load(&store),
    );
    assert!(game.leaderboard().is_empty());
}
