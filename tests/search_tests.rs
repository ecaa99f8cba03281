//! Best-first search integration tests using the subtraction game.

use std::time::Duration;

use lazy_bfs::core::PlayerId;
use lazy_bfs::eval::{FnHeuristic, FnScorer, TerminalAware};
use lazy_bfs::games::subtraction::{PileHeuristic, PileState, SubtractionGame, Take};
use lazy_bfs::search::{BestFirstSearch, SearchBudget, SearchConfig};
use lazy_bfs::{AnalyticsLog, RulesEngine};

fn new_search(config: SearchConfig) -> BestFirstSearch<SubtractionGame> {
    BestFirstSearch::new(SubtractionGame::new(3), PileHeuristic::default(), config)
}

// =============================================================================
// Move Selection Tests
// =============================================================================

#[test]
fn test_finds_winning_moves() {
    // Leave the opponent a multiple of 4
    for (pile, expected) in [(9, Take(1)), (10, Take(2)), (11, Take(3)), (13, Take(1))] {
        let mut search = new_search(SearchConfig::default());
        let state = search.engine().initial_state(pile);

        let mv = search.select_move(&state, &SearchBudget::iterations(300)).unwrap();

        assert_eq!(mv, Some(expected), "pile {}", pile);
    }
}

#[test]
fn test_losing_position_still_moves() {
    let mut search = new_search(SearchConfig::default());
    let state = search.engine().initial_state(8);

    let mv = search.select_move(&state, &SearchBudget::iterations(50)).unwrap();

    assert!(mv.is_some());
}

#[test]
fn test_second_player_perspective() {
    let game = SubtractionGame::new(3);
    let mut state = game.initial_state(11);
    game.apply_move(&mut state, &Take(1));
    assert_eq!(game.mover(&state), PlayerId::new(1));

    let mut search = BestFirstSearch::new(game, PileHeuristic::default(), SearchConfig::default());
    let mv = search.select_move(&state, &SearchBudget::iterations(300)).unwrap();

    // Pile 10 with player 1 to move: take 2 leaves 8
    assert_eq!(mv, Some(Take(2)));
}

#[test]
fn test_multi_player_search() {
    let game = SubtractionGame::new(2).with_player_count(3);
    let state = game.initial_state(10);
    let mut search = BestFirstSearch::new(game, PileHeuristic::default(), SearchConfig::default());

    let mv = search.select_move(&state, &SearchBudget::iterations(100)).unwrap();

    assert!(matches!(mv, Some(Take(1)) | Some(Take(2))));
}

// =============================================================================
// Budget Tests
// =============================================================================

#[test]
fn test_time_budget() {
    let mut search = new_search(SearchConfig::default());
    let state = search.engine().initial_state(60);

    let mv = search
        .select_move(&state, &SearchBudget::time(Duration::from_millis(20)))
        .unwrap();

    assert!(mv.is_some());
    assert!(search.stats().iterations > 0);
    assert!(search.stats().time_us < 5_000_000);
}

#[test]
fn test_small_game_exhausts_tree() {
    let mut search = new_search(SearchConfig::default());
    let state = search.engine().initial_state(5);

    let mv = search.select_move(&state, &SearchBudget::iterations(10_000)).unwrap();

    assert_eq!(mv, Some(Take(1)));
    assert!(search.tree().root_node().exhausted);
    assert!(search.stats().iterations < 10_000);
    assert!(search.stats().terminal_hits > 0);
}

#[test]
fn test_exhausted_tree_values_are_exact() {
    let heuristic = TerminalAware::new(PileHeuristic::default(), 1000.0);
    let mut search = BestFirstSearch::new(SubtractionGame::new(3), heuristic, SearchConfig::default());
    let state = search.engine().initial_state(4);

    search.select_move(&state, &SearchBudget::iterations(10_000)).unwrap();

    // Every move from 4 loses against perfect play
    assert!(search.tree().root_node().exhausted);
    assert_eq!(search.tree().root_node().value, -1000.0);
    assert!(search.root_scores().iter().all(|(_, s)| *s == -1000.0));
}

#[test]
fn test_principal_variation_starts_with_choice() {
    let mut search = new_search(SearchConfig::default());
    let state = search.engine().initial_state(10);

    let mv = search.select_move(&state, &SearchBudget::iterations(100)).unwrap();
    let line = search.principal_variation();

    assert_eq!(line.first(), mv.as_ref());
    assert!(line.len() > 1);
}

// =============================================================================
// Determinism Tests
// =============================================================================

#[test]
fn test_deterministic_with_seed() {
    let config = SearchConfig::default().with_seed(12345).with_exploration_epsilon(0.3);
    let mut search1 = new_search(config.clone());
    let mut search2 = new_search(config);
    let state = search1.engine().initial_state(25);

    let mv1 = search1.select_move(&state, &SearchBudget::iterations(200)).unwrap();
    let mv2 = search2.select_move(&state, &SearchBudget::iterations(200)).unwrap();

    assert_eq!(mv1, mv2);
    assert_eq!(search1.tree().len(), search2.tree().len());
    assert_eq!(search1.root_scores(), search2.root_scores());
}

#[test]
fn test_repeated_searches_reset_tree() {
    let mut search = new_search(SearchConfig::default());
    let state = search.engine().initial_state(30);

    search.select_move(&state, &SearchBudget::iterations(40)).unwrap();
    let first_len = search.tree().len();
    search.select_move(&state, &SearchBudget::iterations(40)).unwrap();

    assert_eq!(search.tree().len(), first_len);
    assert_eq!(search.stats().iterations, 40);
}

// =============================================================================
// Analytics Tests
// =============================================================================

fn analysed_config() -> SearchConfig {
    SearchConfig::default()
        .with_analysis(true)
        .with_action_evaluation_weight(0.5)
}

fn take_scorer() -> FnScorer<impl Fn(&PileState, &Take) -> f32 + Send + Sync> {
    FnScorer(|_: &PileState, mv: &Take| mv.0 as f32)
}

#[test]
fn test_analytics_written_after_each_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("analytics.json");

    let mut search = new_search(analysed_config().with_analytics_path(&path)).with_scorer(take_scorer());
    let state = search.engine().initial_state(20);

    search.select_move(&state, &SearchBudget::iterations(30)).unwrap();
    assert!(!search.analytics().is_empty());
    assert_eq!(
        search.analytics().action_evaluations().len(),
        search.analytics().score_evolutions().len()
    );
    assert_eq!(AnalyticsLog::load(&path).unwrap().len(), 1);

    search.select_move(&state, &SearchBudget::iterations(30)).unwrap();
    let log = AnalyticsLog::load(&path).unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(search.analytics_log().len(), 2);

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let rows = json.as_array().unwrap();
    assert!(rows.iter().all(|row| row.as_array().map(Vec::len) == Some(4)));
}

#[test]
fn test_resumed_log_keeps_previous_records() {
    let mut previous = AnalyticsLog::new();
    previous.push_record([1.0, 2.0, 3.0, 4.0]);

    let mut search = new_search(analysed_config())
        .with_scorer(take_scorer())
        .with_analytics_log(previous);
    let state = search.engine().initial_state(20);

    search.select_move(&state, &SearchBudget::iterations(10)).unwrap();

    assert_eq!(search.analytics_log().len(), 2);
    assert_eq!(search.analytics_log().records()[0], [1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_unwritable_analytics_path_does_not_fail_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("analytics.json");

    let mut search = new_search(analysed_config().with_analytics_path(&path)).with_scorer(take_scorer());
    let state = search.engine().initial_state(10);

    let mv = search.select_move(&state, &SearchBudget::iterations(20)).unwrap();

    assert!(mv.is_some());
    assert_eq!(search.analytics_log().len(), 1);
    assert!(!path.exists());
}

#[test]
fn test_analysis_disabled_records_nothing() {
    let mut search = new_search(SearchConfig::default()).with_scorer(take_scorer());
    let state = search.engine().initial_state(20);

    search.select_move(&state, &SearchBudget::iterations(30)).unwrap();

    assert!(search.analytics().is_empty());
    assert!(search.analytics_log().is_empty());
}

#[test]
fn test_analysis_does_not_change_search() {
    let mut plain = new_search(SearchConfig::default().with_action_evaluation_weight(0.5))
        .with_scorer(take_scorer());
    let mut analysed = new_search(analysed_config()).with_scorer(take_scorer());
    let state = plain.engine().initial_state(17);

    let mv1 = plain.select_move(&state, &SearchBudget::iterations(80)).unwrap();
    let mv2 = analysed.select_move(&state, &SearchBudget::iterations(80)).unwrap();

    assert_eq!(mv1, mv2);
    assert_eq!(plain.root_scores(), analysed.root_scores());
}

#[test]
fn test_tree_description_lists_expanded_nodes() {
    let mut search = new_search(SearchConfig::default().with_tree_description(true));
    let state = search.engine().initial_state(13);

    search.select_move(&state, &SearchBudget::iterations(15)).unwrap();

    let description = search.tree_description();
    assert_eq!(description.len(), search.stats().nodes_expanded as usize);
    assert!(description.as_str().starts_with("(root,1.0,1),\n"));
    assert!(description.as_str().lines().all(|l| l.starts_with('(') && l.ends_with("),")));
}

#[test]
fn test_tree_description_written_after_each_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tree.txt");

    let mut search = new_search(SearchConfig::default().with_tree_description_path(&path));
    let state = search.engine().initial_state(13);

    search.select_move(&state, &SearchBudget::iterations(15)).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, search.tree_description().as_str());
    assert!(written.starts_with("(root,1.0,1),\n"));
}

#[test]
fn test_analysis_scores_immediate_wins_with_win_score() {
    let game = SubtractionGame::new(3);
    let state = game.initial_state(2);
    let mut search = BestFirstSearch::new(
        game,
        FnHeuristic(|_: &PileState, _: PlayerId| 0.0),
        analysed_config(),
    )
    .with_scorer(take_scorer());

    search.select_move(&state, &SearchBudget::iterations(5)).unwrap();

    // Root samples come first: Take(1) leaves a running game, Take(2) wins
    let evolutions = search.analytics().score_evolutions();
    assert_eq!(evolutions[0], 0.0);
    assert_eq!(evolutions[1], 5.0);
}
