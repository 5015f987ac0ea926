//! Behavioral properties of the puppeteers.
//!
//! These tests drive each puppeteer the way a rollout would:
//! - Output depends only on (timestep, state), across calls and threads
//! - A first-step timestep resets whatever state the caller passes
//! - The schedules, the cleaning commitment and the grim trigger hold over
//!   whole episodes
//! - The caller's timestep is never modified

use puppeteer_bots::{
    run_episode, AlternateCleanFirst, AlternateEatFirst, AnyPuppeteer, AnyState, CleanupGoal,
    ConditionalCleaner, ConditionalCleanerState, GrimTwoResource, PartnerDefections, Puppeteer,
    PuppeteerConfig, StepCount, TwoResourceGoal,
};
use puppeteer_core::{goal_of, Array, GoalVocabulary, Observation, TimeStep, GOAL_OBSERVATION_KEY};

// ============================================================================
// Helpers
// ============================================================================

fn goal<V: GoalVocabulary>(timestep: &TimeStep) -> V {
    let index = goal_of(timestep)
        .and_then(Array::one_hot_index)
        .expect("one-hot goal");
    V::ALL[index]
}

fn cleanup_goal(timestep: &TimeStep) -> CleanupGoal {
    goal(timestep)
}

fn two_resource_goal(timestep: &TimeStep) -> TwoResourceGoal {
    goal(timestep)
}

/// Three agents; we are agent 0. `cleaning` lists the other agents firing
/// the cleaning beam this frame. Everyone stands near the river.
fn clean_up(cleaning: &[usize]) -> Observation {
    let actions: Vec<i64> = (0..3)
        .map(|i| if cleaning.contains(&i) { 8 } else { 1 })
        .collect();
    let global = Observation::new()
        .with("actions", Array::vector(actions))
        .with(
            "observations",
            Observation::new().with(
                "POSITION",
                Array::matrix(vec![vec![4i32, 3], vec![6, 2], vec![9, 5]]).unwrap(),
            ),
        );
    Observation::new()
        .with("agent_slot", Array::vector(vec![1.0f32, 0.0, 0.0]))
        .with("RGB", Array::vector(vec![0i32; 12]))
        .with("global", global)
}

fn in_the_matrix(partner: [i32; 2], own: [i32; 2]) -> Observation {
    Observation::new()
        .with(
            "INTERACTION_INVENTORIES",
            Array::matrix(vec![vec![1, 1], partner.to_vec()]).unwrap(),
        )
        .with("INVENTORY", Array::vector(own.to_vec()))
}

fn at(t: usize, observation: Observation) -> TimeStep {
    if t == 0 {
        TimeStep::restart(observation)
    } else {
        TimeStep::transition(0.0, observation)
    }
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn step_is_deterministic() {
    let cleaner = ConditionalCleaner::new(1);
    let timestep = at(5, clean_up(&[2]));
    let state = ConditionalCleanerState {
        step_count: 5,
        clean_until: 3,
        prev_cleaning: Some(vec![false, true, false]),
    };

    let first = cleaner.step(&timestep, state.clone()).unwrap();
    for _ in 0..10 {
        assert_eq!(cleaner.step(&timestep, state.clone()).unwrap(), first);
    }
}

#[test]
fn parallel_episodes_match_sequential() {
    let puppeteer = AnyPuppeteer::from(ConditionalCleaner::new(1));
    let episode: Vec<TimeStep> = (0..400)
        .map(|t| {
            let cleaning: &[usize] = if t % 150 == 10 { &[1] } else { &[] };
            at(t, clean_up(cleaning))
        })
        .collect();

    let sequential = run_episode(&puppeteer, episode.clone()).unwrap();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| run_episode(&puppeteer, episode.clone()).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for run in parallel {
        assert_eq!(run.trace, sequential.trace);
        assert_eq!(run.timesteps, sequential.timesteps);
    }
}

// ============================================================================
// Reset on first step
// ============================================================================

#[test]
fn first_step_ignores_stale_state() {
    let clean_up_first = TimeStep::restart(clean_up(&[]));
    let matrix_first = TimeStep::restart(in_the_matrix([0, 0], [0, 0]));

    let (fresh, _) = AlternateCleanFirst.step(&clean_up_first, StepCount(0)).unwrap();
    let (stale, _) = AlternateCleanFirst.step(&clean_up_first, StepCount(600)).unwrap();
    assert_eq!(cleanup_goal(&fresh), cleanup_goal(&stale));

    let (fresh, _) = AlternateEatFirst.step(&clean_up_first, StepCount(0)).unwrap();
    let (stale, _) = AlternateEatFirst.step(&clean_up_first, StepCount(300)).unwrap();
    assert_eq!(cleanup_goal(&fresh), cleanup_goal(&stale));

    let cleaner = ConditionalCleaner::new(1);
    let stale_state = ConditionalCleanerState {
        step_count: 10,
        clean_until: 90,
        prev_cleaning: Some(vec![true, true, true, true]),
    };
    let (fresh, fresh_next) = cleaner
        .step(&clean_up_first, cleaner.initial_state())
        .unwrap();
    let (stale, stale_next) = cleaner.step(&clean_up_first, stale_state).unwrap();
    assert_eq!(cleanup_goal(&fresh), CleanupGoal::Eat);
    assert_eq!(cleanup_goal(&fresh), cleanup_goal(&stale));
    assert_eq!(fresh_next, stale_next);

    let grim = GrimTwoResource::new(1);
    let (fresh, _) = grim.step(&matrix_first, grim.initial_state()).unwrap();
    let (stale, _) = grim.step(&matrix_first, PartnerDefections(50)).unwrap();
    assert_eq!(two_resource_goal(&fresh), TwoResourceGoal::CollectCooperate);
    assert_eq!(two_resource_goal(&fresh), two_resource_goal(&stale));
}

// ============================================================================
// Alternator schedule
// ============================================================================

#[test]
fn alternator_schedules() {
    let clean_first = run_episode(
        &AlternateCleanFirst,
        (0..1001).map(|t| at(t, Observation::new())),
    )
    .unwrap();
    let eat_first = run_episode(
        &AlternateEatFirst,
        (0..1001).map(|t| at(t, Observation::new())),
    )
    .unwrap();

    let expected = [
        (0, CleanupGoal::Clean),
        (249, CleanupGoal::Clean),
        (250, CleanupGoal::Eat),
        (499, CleanupGoal::Eat),
        (500, CleanupGoal::Clean),
        (749, CleanupGoal::Clean),
        (750, CleanupGoal::Eat),
        (1000, CleanupGoal::Eat),
    ];
    for (step, goal) in expected {
        assert_eq!(cleanup_goal(&clean_first.timesteps[step]), goal, "step {step}");
        assert_ne!(cleanup_goal(&eat_first.timesteps[step]), goal, "step {step}");
    }
    assert_eq!(clean_first.trace.switches(), 3);
    assert_eq!(eat_first.trace.switches(), 3);
}

// ============================================================================
// Conditional cleaner
// ============================================================================

#[test]
fn cleaner_commits_for_one_hundred_steps() {
    let trigger = 20;
    let episode: Vec<TimeStep> = (0..trigger + 150)
        .map(|t| at(t, if t == trigger { clean_up(&[1]) } else { clean_up(&[]) }))
        .collect();

    let run = run_episode(&ConditionalCleaner::new(1), episode).unwrap();
    let goals: Vec<CleanupGoal> = run.timesteps.iter().map(cleanup_goal).collect();

    assert!(goals[..trigger].iter().all(|g| *g == CleanupGoal::Eat));
    // The trigger frame is smoothed into the next one, re-arming once more.
    for (t, goal) in goals.iter().enumerate().take(trigger + 101).skip(trigger) {
        assert_eq!(*goal, CleanupGoal::Clean, "step {t}");
    }
    assert_eq!(goals[trigger + 101], CleanupGoal::Eat);
}

#[test]
fn cleaner_rearm_extends_commitment() {
    let cleaner = ConditionalCleaner::new(2);
    let state = ConditionalCleanerState {
        step_count: 50,
        clean_until: 60,
        prev_cleaning: Some(vec![false, false, false]),
    };

    let (puppet, next) = cleaner.step(&at(50, clean_up(&[1, 2])), state).unwrap();
    assert_eq!(cleanup_goal(&puppet), CleanupGoal::Clean);
    assert_eq!(next.clean_until, 150);

    let quiet = ConditionalCleanerState {
        prev_cleaning: Some(vec![false, false, false]),
        ..next
    };
    let (puppet, next) = cleaner.step(&at(51, clean_up(&[1])), quiet).unwrap();
    assert_eq!(cleanup_goal(&puppet), CleanupGoal::Clean);
    assert_eq!(next.clean_until, 150);
}

// ============================================================================
// Grim trigger
// ============================================================================

#[test]
fn grim_never_forgives() {
    let threshold = 2;
    let grim = GrimTwoResource::new(threshold);
    let mut state = grim.initial_state();
    let mut goals = Vec::new();

    for t in 0..60 {
        let partner = if t == 10 || t == 30 { [0, 3] } else { [2, 0] };
        let own = if t % 7 == 6 { [1, 0] } else { [0, 0] };
        let (puppet, next) = grim.step(&at(t, in_the_matrix(partner, own)), state).unwrap();
        goals.push(two_resource_goal(&puppet));
        state = next;
    }

    assert_eq!(state, PartnerDefections(2));
    assert!(goals[..30].iter().all(|g| *g != TwoResourceGoal::CollectDefect));
    assert!(goals[30..].iter().all(|g| *g != TwoResourceGoal::CollectCooperate));
    assert!(goals[30..].contains(&TwoResourceGoal::CollectDefect));
    assert!(goals.contains(&TwoResourceGoal::Interact));
}

// ============================================================================
// Augmentation
// ============================================================================

#[test]
fn caller_timestep_is_not_modified() {
    let timestep = at(3, clean_up(&[1]));
    let snapshot = timestep.clone();

    let (puppet, _) = ConditionalCleaner::new(1)
        .step(
            &timestep,
            ConditionalCleanerState {
                step_count: 3,
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(timestep, snapshot);
    assert!(!timestep.observation().contains_key(GOAL_OBSERVATION_KEY));
    assert_eq!(puppet.observation().len(), timestep.observation().len() + 1);
    for (key, value) in timestep.observation().iter() {
        assert_eq!(puppet.observation().get(key), Some(value));
    }
}

#[test]
fn missing_fields_fail_on_first_step() {
    let empty = TimeStep::restart(Observation::new());
    let cleaner = AnyPuppeteer::from(ConditionalCleaner::new(1));
    let grim = AnyPuppeteer::from(GrimTwoResource::new(1));

    assert!(cleaner.step(&empty, cleaner.initial_state()).is_err());
    assert!(grim.step(&empty, grim.initial_state()).is_err());
    assert!(run_episode(&cleaner, vec![empty.clone()]).is_err());

    // Alternators read nothing from the observation.
    assert!(AlternateCleanFirst.step(&empty, StepCount(0)).is_ok());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn configured_puppeteers_run_episodes() {
    let configs = [
        r#"{"puppeteer": "alternate_clean_first"}"#,
        r#"{"puppeteer": "alternate_eat_first"}"#,
        r#"{"puppeteer": "conditional_cleaner", "threshold": 1}"#,
    ];
    for json in configs {
        let puppeteer = PuppeteerConfig::from_json(json).unwrap().build();
        let run = run_episode(&puppeteer, (0..20).map(|t| at(t, clean_up(&[])))).unwrap();
        assert_eq!(run.len(), 20);
        assert_eq!(puppeteer.goal_names(), CleanupGoal::NAMES);
    }

    let grim = PuppeteerConfig::from_json(r#"{"puppeteer": "grim_two_resource", "threshold": 1}"#)
        .unwrap()
        .build();
    assert!(matches!(grim.initial_state(), AnyState::PartnerDefections(_)));
    let run = run_episode(&grim, (0..20).map(|t| at(t, in_the_matrix([0, 1], [0, 0])))).unwrap();
    assert_eq!(two_resource_goal(&run.timesteps[19]), TwoResourceGoal::CollectDefect);
}
