use manor_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use web_time::{Duration, Instant};

/// Hands out instants far enough apart that feedback never blocks.
struct Clock(Instant);

impl Clock {
    fn new() -> Self {
        Self(Instant::now())
    }

    fn next(&mut self) -> Instant {
        self.0 += Duration::from_secs(5);
        self.0
    }
}

fn record(id: i64, stage: u8, grid_data: &str, words_to_find: &str) -> PuzzleRecord {
    PuzzleRecord {
        id,
        stage,
        grid_data: grid_data.to_string(),
        words_to_find: words_to_find.to_string(),
        title: "Manor".to_string(),
        description: None,
    }
}

fn submit(word: &str) -> GameEvent {
    GameEvent::Scramble(ScrambleEvent::Submit(word.to_string()))
}

fn potion_state(game: &ManorGame) -> &PotionState {
    match game.game() {
        StageGame::Potion(state) => state,
        other => panic!("expected potion stage, got {other:?}"),
    }
}

fn spirit_state(game: &ManorGame) -> &SpiritState {
    match game.game() {
        StageGame::Spirits(state) => state,
        other => panic!("expected spirits stage, got {other:?}"),
    }
}

#[test]
fn scramble_stage_plays_to_completion() {
    let mut clock = Clock::new();
    let mut game = ManorGame::new(Stage::One, GameConfig::default());
    let record = record(
        1,
        1,
        r#"["nevar", "tac", "lowf"]"#,
        r#"["raven", "cat", "wolf"]"#,
    );
    assert!(game.load(&record, &mut SmallRng::seed_from_u64(7)));

    let mut completions = Vec::new();
    for word in ["raven", "dog", "cat", "wolf"] {
        let step = game.handle(submit(word), clock.next());
        completions.extend(step.completion);
    }

    assert_eq!(game.status(), PuzzleStatus::Completed);
    assert_eq!(completions.len(), 1);
    assert_eq!(completions[0].completed_puzzles, r#"["1"]"#);
}

#[test]
fn scramble_success_clears_after_the_short_delay() {
    let now = Instant::now();
    let mut game = ManorGame::new(Stage::One, GameConfig::default());
    let record = record(1, 1, r#"["TAB", "LWO"]"#, r#"["bat", "owl"]"#);
    assert!(game.load(&record, &mut SmallRng::seed_from_u64(7)));

    game.handle(submit("BAT"), now);
    let expires_at = game.feedback().map(Feedback::expires_at);

    assert_eq!(expires_at, Some(now + Duration::from_millis(2000)));
    assert!(game.handle(submit("OWL"), now + Duration::from_millis(2000)).completion.is_some());
}

#[test]
fn potion_stage_plays_to_completion() {
    let mut clock = Clock::new();
    let mut rng = SmallRng::seed_from_u64(42);
    let mut game = ManorGame::new(Stage::Two, GameConfig::default());
    let record = record(2, 2, "[]", r#"["mandrake", "newt", "nightshade"]"#);
    assert!(game.load(&record, &mut rng));

    let ingredients: Vec<Ingredient> = potion_state(&game).ingredients().to_vec();
    let pool_size: usize = ingredients
        .iter()
        .map(|ingredient| ingredient.missing_letters().len())
        .sum();
    assert_eq!(potion_state(&game).available_letters().len(), pool_size);

    let mut completion = None;
    for (index, ingredient) in ingredients.iter().enumerate() {
        for &position in ingredient.missing_letters() {
            let letter = ingredient.word().chars().nth(position).unwrap();
            let state = potion_state(&game);
            let pick = (0..state.available_letters().len())
                .find(|&i| state.available_letters()[i] == letter)
                .unwrap();
            assert!(state.is_letter_available(letter));

            game.handle(GameEvent::Potion(PotionEvent::SelectLetter(pick)), clock.next());
            let step = game.handle(
                GameEvent::Potion(PotionEvent::Place {
                    ingredient: index,
                    position,
                }),
                clock.next(),
            );
            completion = completion.or(step.completion);
        }
        assert!(potion_state(&game).is_ingredient_completed(index));
    }

    assert_eq!(game.progress().percent(), 100);
    let completion = completion.unwrap();
    assert_eq!(completion.stage, Stage::Two);
    assert!(completion.is_completed);
}

#[test]
fn potion_success_uses_the_long_delay() {
    let now = Instant::now();
    let mut game = ManorGame::new(Stage::Two, GameConfig::default());
    assert!(game.load(&record(2, 2, "[]", r#"["ox"]"#), &mut SmallRng::seed_from_u64(1)));

    for position in 0..2 {
        let letter = ['O', 'X'][position];
        let pick = potion_state(&game)
            .available_letters()
            .iter()
            .position(|&candidate| candidate == letter)
            .unwrap();
        game.handle(GameEvent::Potion(PotionEvent::SelectLetter(pick)), now);
        game.handle(
            GameEvent::Potion(PotionEvent::Place {
                ingredient: 0,
                position,
            }),
            now,
        );
    }

    assert!(game.status().is_completed());
    assert_eq!(
        game.feedback().map(Feedback::expires_at),
        Some(now + Duration::from_millis(2500))
    );
}

#[test]
fn potion_slot_counts_follow_word_length() {
    let mut rng = SmallRng::seed_from_u64(3);
    let state = PotionState::from_words(
        vec!["ox".to_string(), "toad".to_string(), "wolfsbane".to_string()],
        &mut rng,
    )
    .unwrap();

    let counts: Vec<usize> = state
        .ingredients()
        .iter()
        .map(|ingredient| ingredient.missing_letters().len())
        .collect();
    assert_eq!(counts, [2, 2, 3]);
}

#[test]
fn spirits_stage_recovers_from_a_mismatch() {
    let now = Instant::now();
    let mut rng = SmallRng::seed_from_u64(9);
    let mut game = ManorGame::new(Stage::Three, GameConfig::default());
    let record = record(
        3,
        3,
        "[]",
        r#"[{"shadow": "raven", "spirit": "nevermore"}, {"shadow": "candle", "spirit": "flame"}]"#,
    );
    assert!(game.load(&record, &mut rng));

    let spirit = |name: &str| GameEvent::Spirits(SpiritEvent::SelectSpirit(name.to_string()));
    let shadow = |name: &str| GameEvent::Spirits(SpiritEvent::SelectShadow(name.to_string()));

    game.handle(shadow("RAVEN"), now);
    let wrong = game.handle(spirit("FLAME"), now);
    assert_eq!(wrong.outcome.feedback(), Some(FeedbackKind::Failure));
    assert_eq!(spirit_state(&game).selected_shadow(), None);

    // inside the 2000 ms failure window
    let early = now + Duration::from_millis(1500);
    assert_eq!(game.handle(shadow("RAVEN"), early).outcome, GameOutcome::Blocked);
    assert!(game.feedback().is_some());

    let later = now + Duration::from_millis(2000);
    assert!(game.tick(later));
    game.handle(shadow("RAVEN"), later);
    let matched = game.handle(spirit("NEVERMORE"), later);
    assert_eq!(
        matched.outcome,
        GameOutcome::Spirits(SpiritOutcome::Matched(SpiritPair::new("RAVEN", "NEVERMORE")))
    );

    let last = later + Duration::from_millis(2500);
    game.handle(shadow("CANDLE"), last);
    let done = game.handle(spirit("FLAME"), last);

    assert!(done.completion.is_some());
    assert_eq!(spirit_state(&game).matched_pairs().len(), 2);
}

#[test]
fn reset_replays_the_same_puzzle() {
    let mut clock = Clock::new();
    let mut game = ManorGame::new(Stage::Three, GameConfig::default());
    let record = record(
        3,
        3,
        "[]",
        r#"[{"shadow": "owl", "spirit": "hoot"}, {"shadow": "bat", "spirit": "wing"}]"#,
    );
    assert!(game.load(&record, &mut SmallRng::seed_from_u64(1)));
    let columns = (
        spirit_state(&game).shadow_words().to_vec(),
        spirit_state(&game).spirit_words().to_vec(),
    );

    let attempt = GameEvent::Spirits(SpiritEvent::AttemptMatch {
        shadow: "owl".to_string(),
        spirit: "hoot".to_string(),
    });
    game.handle(attempt, clock.next());
    assert_eq!(game.progress(), Progress::new(1, 2));

    game.reset();

    assert_eq!(game.status(), PuzzleStatus::Ready);
    assert_eq!(game.progress(), Progress::new(0, 2));
    assert_eq!(spirit_state(&game).shadow_words(), columns.0);
    assert_eq!(spirit_state(&game).spirit_words(), columns.1);
}

#[test]
fn malformed_payloads_leave_the_game_loading() {
    let mut rng = SmallRng::seed_from_u64(1);
    let duplicate_shadows =
        r#"[{"shadow": "a", "spirit": "b"}, {"shadow": "a", "spirit": "c"}]"#;
    let cases = [
        (Stage::One, record(1, 1, "not json", r#"["cat"]"#)),
        (Stage::One, record(1, 1, r#"["TAC"]"#, r#"["cat", "dog"]"#)),
        (Stage::One, record(1, 1, r#"["TAC", "TCA"]"#, r#"["cat", "CAT"]"#)),
        (Stage::Two, record(2, 2, "[]", "[]")),
        (Stage::Two, record(2, 2, "[]", r#"["newt", ""]"#)),
        (Stage::Three, record(3, 3, "[]", r#"["raven"]"#)),
        (Stage::Three, record(3, 3, "[]", duplicate_shadows)),
    ];

    for (stage, record) in cases {
        let mut game = ManorGame::new(stage, GameConfig::default());
        assert!(!game.load(&record, &mut rng), "{record:?}");
        assert_eq!(game.status(), PuzzleStatus::Loading);
        assert_eq!(game.progress(), Progress::default());

        let step = game.handle(submit("CAT"), Instant::now());
        assert!(!step.outcome.has_update());
    }
}

#[test]
fn word_search_finds_words_in_all_directions() {
    let grid = LetterGrid::from_rows(&["DOGX", "XXXA", "XXXB", "TACX"]).unwrap();
    let words = vec!["dog".to_string(), "CAT".to_string(), "ab".to_string()];
    let mut state = WordSearchState::new(grid, words).unwrap();

    let mut drag = |from: Coord2, to: Coord2| {
        state.apply(WordSearchEvent::PointerDown(from));
        state.apply(WordSearchEvent::PointerEnter(to));
        state.apply(WordSearchEvent::PointerUp)
    };

    assert_eq!(drag((0, 0), (0, 2)), WordSearchOutcome::WordFound("DOG".to_string()));
    assert_eq!(drag((3, 2), (3, 0)), WordSearchOutcome::WordFound("CAT".to_string()));
    assert_eq!(drag((0, 0), (3, 3)), WordSearchOutcome::Missed);
    assert_eq!(drag((1, 3), (2, 3)), WordSearchOutcome::WordFound("AB".to_string()));
    assert!(state.is_completed());
}
