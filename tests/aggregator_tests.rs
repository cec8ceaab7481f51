use optcache_report::aggregator::{CounterBundle, LocationCounts, ProfileAggregator, ProfileKind};
use optcache_report::report::{Report, SortKey};

fn bundle(s: u64, d: u64) -> CounterBundle {
    let mut b = CounterBundle::new();
    b.add(ProfileKind::Static, "s.c:1", s);
    b.add(ProfileKind::Dynamic, "d.c:1", d);
    b
}

/// Deterministic pseudo-random sequence for operation mixes
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}

#[test]
fn test_invariant_holds_under_mixed_operations() {
    let mut agg = ProfileAggregator::new();
    let mut rng = Lcg(42);
    let names: Vec<String> = (0..12).map(|i| format!("rec{}", i)).collect();

    for name in &names {
        agg.register(name, bundle(rng.next(50), rng.next(50)), rng.next(4) != 0);
    }

    for _ in 0..500 {
        let a = &names[rng.next(names.len() as u64) as usize];
        let b = &names[rng.next(names.len() as u64) as usize];
        match rng.next(4) {
            0 => agg.replace(a, b).unwrap(),
            1 => agg.remove(a),
            2 => {
                let counts: LocationCounts =
                    [(format!("loc{}", rng.next(3)), rng.next(10))].into_iter().collect();
                agg.merge_static(a, &counts);
                agg.merge_dynamic(b, &counts);
            }
            _ => agg.register(a, bundle(rng.next(5), rng.next(5)), true),
        }

        assert!(agg.is_consistent());
    }

    for (identity, b) in agg.included() {
        let static_sum: u64 = b.locations(ProfileKind::Static).values().sum();
        let dynamic_sum: u64 = b.locations(ProfileKind::Dynamic).values().sum();
        assert_eq!(b.static_total(), static_sum, "{}", identity);
        assert_eq!(b.dynamic_total(), dynamic_sum, "{}", identity);
    }
}

#[test]
fn test_replace_accumulates_and_hides_old() {
    let mut agg = ProfileAggregator::new();
    agg.register("old", bundle(3, 7), true);
    agg.register("new", bundle(5, 1), true);

    agg.replace("old", "new").unwrap();

    let report = Report::build(&agg, SortKey::Length);
    assert_eq!(report.len(), 1);

    let entry = &report.records[0];
    assert_eq!(entry.identity, "new");
    assert_eq!(entry.static_total, 8);
    assert_eq!(entry.dynamic_total, 8);
    assert!(entry.static_total >= 3 && entry.static_total >= 5);
}

#[test]
fn test_replace_onto_parked_identity_includes_it() {
    let mut agg = ProfileAggregator::new();
    agg.register("parked", bundle(2, 0), false);
    agg.register("live", bundle(1, 0), true);

    agg.replace("live", "parked").unwrap();

    assert!(agg.contains("parked"));
    assert_eq!(agg.bundle("parked").unwrap().static_total(), 3);
}

#[test]
fn test_empty_replacement_is_rejected() {
    let mut agg = ProfileAggregator::new();
    agg.register("x", bundle(1, 1), true);

    assert!(agg.replace("x", "").is_err());
    assert!(agg.contains("x"));
}
