use optcache_report::aggregator::{CounterBundle, ProfileAggregator, ProfileKind};
use optcache_report::pipeline::{canonicalize, merge_pass, reduce_pass, triage_pass, Pipeline};
use optcache_report::tools::{ReduceOutcome, Reducer, TriageVerdict, Triager};
use optcache_report::utils::error::ToolError;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::collections::HashMap;

fn bundle(location: &str, s: u64, d: u64) -> CounterBundle {
    let mut b = CounterBundle::new();
    b.add(ProfileKind::Static, location, s);
    b.add(ProfileKind::Dynamic, location, d);
    b
}

/// Reducer answering from a fixed table; unknown inputs are left unchanged
#[derive(Default)]
struct TableReducer {
    outcomes: HashMap<String, ReduceOutcome>,
    calls: RefCell<Vec<String>>,
}

impl TableReducer {
    fn with(mut self, input: &str, outcome: ReduceOutcome) -> Self {
        self.outcomes.insert(input.to_string(), outcome);
        self
    }
}

impl Reducer for TableReducer {
    fn reduce(&self, text: &str) -> Result<ReduceOutcome, ToolError> {
        self.calls.borrow_mut().push(text.to_string());
        Ok(self
            .outcomes
            .get(text)
            .cloned()
            .unwrap_or(ReduceOutcome::Unchanged))
    }
}

/// Triager that treats the record text itself as the optimized IR
struct EchoTriager;

impl Triager for EchoTriager {
    fn triage(&self, text: &str) -> Result<TriageVerdict, ToolError> {
        Ok(TriageVerdict::scan(text, "bogus", "keep"))
    }
}

#[test]
fn test_reduce_failure_removes_record() {
    let mut agg = ProfileAggregator::new();
    agg.register("broken", bundle("a", 4, 4), true);
    agg.register("fine", bundle("b", 1, 1), true);

    let reducer = TableReducer::default().with("broken", ReduceOutcome::Failed(Some(1)));
    let summary = reduce_pass(&mut agg, &reducer, false).unwrap();

    assert_eq!(summary.removed, 1);
    assert_eq!(summary.kept, 1);
    assert!(!agg.contains("broken"));
    assert!(agg.bundle("broken").is_none());
    assert_eq!(agg.snapshot(), vec!["fine"]);
}

#[test]
fn test_reduce_replaces_and_migrates_counters() {
    let mut agg = ProfileAggregator::new();
    agg.register("big record", bundle("a", 4, 6), true);
    agg.register("small", bundle("a", 1, 1), true);

    let reducer = TableReducer::default().with("big record", ReduceOutcome::Reduced("small".to_string()));
    reduce_pass(&mut agg, &reducer, true).unwrap();

    assert_eq!(agg.snapshot(), vec!["small"]);
    let b = agg.bundle("small").unwrap();
    assert_eq!(b.static_total(), 5);
    assert_eq!(b.dynamic_total(), 7);
    assert!(agg.is_consistent());
}

#[test]
fn test_reduce_visits_snapshot_only() {
    let mut agg = ProfileAggregator::new();
    agg.register("a", bundle("x", 1, 0), true);

    let reducer = TableReducer::default().with("a", ReduceOutcome::Reduced("z".to_string()));
    reduce_pass(&mut agg, &reducer, false).unwrap();

    // "z" appeared during the pass and is not visited by it
    assert_eq!(*reducer.calls.borrow(), vec!["a".to_string()]);
    assert_eq!(agg.snapshot(), vec!["z"]);
}

#[test]
fn test_triage_keeps_only_surviving_sound_records() {
    let mut agg = ProfileAggregator::new();
    agg.register("keep me", bundle("a", 1, 1), true);
    agg.register("bogus keep", bundle("a", 1, 1), true);
    agg.register("already optimized", bundle("a", 1, 1), true);

    let summary = triage_pass(&mut agg, &EchoTriager, false).unwrap();

    assert_eq!(summary.visited, 3);
    assert_eq!(summary.removed, 2);
    assert_eq!(agg.snapshot(), vec!["keep me"]);
}

#[test]
fn test_merge_collapses_width_and_constant_variants() {
    let mut agg = ProfileAggregator::new();
    agg.register("%0:i32 = var\n%1:i32 = add %0, 1:i32\nresult %1\n", bundle("a", 2, 10), true);
    agg.register("%0:i64 = var\n%1:i64 = add %0, 7:i64\nresult %1\n", bundle("b", 3, 20), true);

    let summary = merge_pass(&mut agg, false).unwrap();

    assert_eq!(summary.replaced, 2);
    assert_eq!(agg.len(), 1);
    let identity = &agg.snapshot()[0];
    assert_eq!(identity, "%0 = var\n%1 = add %0, C\nresult %1\n");
    let b = agg.bundle(identity).unwrap();
    assert_eq!(b.static_total(), 5);
    assert_eq!(b.dynamic_total(), 30);
}

#[test]
fn test_merge_is_idempotent_on_canonical_identities() {
    let text = "%0:i16 = var\n%1:i16 = and %0, 255:i16\nresult %1\n";
    let canonical = canonicalize(text);

    let mut agg = ProfileAggregator::new();
    agg.register(&canonical, bundle("a", 1, 1), true);
    let summary = merge_pass(&mut agg, false).unwrap();

    assert_eq!(summary.kept, 1);
    assert_eq!(summary.replaced, 0);
    assert_eq!(agg.snapshot(), vec![canonical]);
}

#[test]
fn test_pipeline_runs_passes_in_order() {
    let mut agg = ProfileAggregator::new();
    agg.register("keep 1", bundle("a", 1, 0), true);
    agg.register("keep 2", bundle("a", 2, 0), true);
    agg.register("drop 3", bundle("a", 4, 0), true);

    let reducer = TableReducer::default();
    let summaries = Pipeline::new()
        .with_reducer(&reducer)
        .with_triager(&EchoTriager)
        .with_merge(true)
        .run(&mut agg)
        .unwrap();

    let passes: Vec<&str> = summaries.iter().map(|s| s.pass).collect();
    assert_eq!(passes, vec!["reduce", "triage", "merge"]);
    assert_eq!(agg.snapshot(), vec!["keep C"]);
    assert_eq!(agg.bundle("keep C").unwrap().static_total(), 3);
}

#[test]
fn test_disabled_pipeline_is_a_noop() {
    let mut agg = ProfileAggregator::new();
    agg.register("x 1", bundle("a", 1, 0), true);

    let summaries = Pipeline::new().run(&mut agg).unwrap();

    assert!(summaries.is_empty());
    assert_eq!(agg.snapshot(), vec!["x 1"]);
}
