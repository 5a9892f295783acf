//! End-to-end runs through the public API

use verb_defense::config::{EnemyId, ProgressionRule};
use verb_defense::platform::{GameRunner, QueuedScheduler};
use verb_defense::quiz::{QuizDeck, QuizGate, VerbSelection, VerbType, parse_verbs};
use verb_defense::sim::{GameEvent, GamePhase, GameSession, Outcome, PlayArea};
use verb_defense::{ConfigError, DifficultyId, GameConfig};

const FRAME_MS: f64 = 1000.0 / 60.0;

/// Drive a run frame by frame until it ends or `max_frames` pass
fn play(
    runner: &mut GameRunner<QueuedScheduler>,
    max_frames: u32,
    mut on_frame: impl FnMut(&mut GameRunner<QueuedScheduler>, f64),
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let mut now = 0.0;
    for _ in 0..max_frames {
        let Some((_, generation)) = runner.scheduler_mut().pop() else {
            break;
        };
        now += FRAME_MS;
        on_frame(runner, now);
        events.extend(runner.frame(generation, now).unwrap_or_default());
    }
    events
}

fn runner(config: GameConfig) -> GameRunner<QueuedScheduler> {
    GameRunner::new(GameSession::new(config).unwrap(), QueuedScheduler::new())
}

#[test]
fn unattended_run_ends_in_defeat() {
    let mut runner = runner(GameConfig::default());
    runner
        .start(DifficultyId::Dificil, PlayArea::default(), 11)
        .unwrap();

    let events = play(&mut runner, 200_000, |_, _| {});

    assert_eq!(
        runner.session().phase(),
        GamePhase::Ended(Outcome::Defeat)
    );
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CastleHit { .. }))
        .count();
    assert_eq!(hits, 3);
    assert_eq!(events.iter().filter(|e| **e == GameEvent::Defeat).count(), 1);
    assert!(!runner.frames().is_scheduled());
}

#[test]
fn quiz_answers_raise_projectile_power() {
    let verbs = parse_verbs(
        r#"[{"verb": "ser", "tense": "presente", "pronoun": "yo", "answer": "soy", "regular": false}]"#,
    )
    .unwrap();
    let deck = QuizDeck::from_selection(
        &verbs,
        &VerbSelection::new("presente", VerbType::RegularAndIrregular),
    )
    .unwrap();
    let mut quiz = QuizGate::new(deck, 1);

    let mut runner = runner(GameConfig::default());
    runner
        .start(DifficultyId::Facil, PlayArea::default(), 2)
        .unwrap();

    let mut answered = 0;
    let events = play(&mut runner, 600, |runner, _| {
        if answered < 3 && quiz.submit("  SOY ").is_correct() {
            runner.session_mut().on_correct_answer();
            answered += 1;
        }
    });

    assert_eq!(runner.session().attack_power(), 4);
    // Every projectile fired after the answers carries the new power
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::ProjectileFired { power: 4, .. }
    )));
    assert!(events.iter().all(|e| !matches!(
        e,
        GameEvent::ProjectileFired { power: 1..=3, .. }
    )));
}

#[test]
fn restart_discards_previous_run() {
    let mut runner = runner(GameConfig::default());
    let first = runner
        .start(DifficultyId::Intermedio, PlayArea::default(), 3)
        .unwrap();
    play(&mut runner, 400, |_, _| {});
    assert!(!runner.session().state().unwrap().projectiles.is_empty());

    let second = runner
        .start(DifficultyId::Facil, PlayArea::default(), 4)
        .unwrap();
    assert!(runner.frame(first, 10_000.0).is_none());

    let state = runner.session().state().unwrap();
    assert_eq!(state.difficulty, DifficultyId::Facil);
    assert_eq!(state.lives, 10);
    assert!(state.monsters.is_empty() && state.projectiles.is_empty());
    assert_eq!(runner.frames().generation(), second);
}

#[test]
fn strong_hero_wins_easy_run() {
    let mut config = GameConfig::default();
    if let Some(preset) = config.presets.get_mut(&DifficultyId::Facil) {
        preset.target_score = 50;
    }
    let mut runner = runner(config);
    runner
        .start(DifficultyId::Facil, PlayArea::default(), 5)
        .unwrap();
    for _ in 0..20 {
        runner.session_mut().on_correct_answer();
    }

    let events = play(&mut runner, 100_000, |_, _| {});

    assert_eq!(
        runner.session().phase(),
        GamePhase::Ended(Outcome::Victory)
    );
    let state = runner.session().state().unwrap();
    assert!(state.score >= 50);
    assert_eq!(state.lives, 10);
    assert!(events.contains(&GameEvent::Victory));
}

#[test]
fn custom_config_from_json() {
    let mut config = GameConfig::default();
    config.progression.insert(
        DifficultyId::Facil,
        vec![ProgressionRule::initial(EnemyId::Enemigo5)],
    );
    let json = serde_json::to_string(&config).unwrap();
    let parsed = GameConfig::from_json(&json).unwrap();

    let mut session = GameSession::new(parsed).unwrap();
    session
        .start(DifficultyId::Facil, PlayArea::default(), 6)
        .unwrap();
    let events = session.step(4000.0);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::MonsterSpawned {
            kind: EnemyId::Enemigo5,
            ..
        }
    )));
}

#[test]
fn config_errors_are_reported_before_a_run() {
    let mut config = GameConfig::default();
    config.progression.insert(DifficultyId::Dificil, Vec::new());
    assert!(matches!(
        GameSession::new(config),
        Err(ConfigError::NoProgression {
            difficulty: DifficultyId::Dificil
        })
    ));
}
