//! Concurrent recording into a shared measurement store.
//!
//! `record` must serialize mutations: appends from many threads to the same
//! or different names may never race or drop samples.

use std::sync::Arc;
use std::thread;

use chronograph::{measure, MeasurementStore};

#[test]
fn concurrent_appends_to_one_name_lose_nothing() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 500;

    let store = Arc::new(MeasurementStore::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    store.record("shared", (t * PER_THREAD + i) as f64 * 1e-6);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("recording thread panicked");
    }

    let stats = store.statistics("shared").expect("recorded");
    assert_eq!(stats.count(), THREADS * PER_THREAD);
}

#[test]
fn concurrent_appends_to_distinct_names_stay_separate() {
    const THREADS: usize = 4;
    const PER_THREAD: usize = 200;

    let store = Arc::new(MeasurementStore::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let store = store.clone();
            thread::spawn(move || {
                let name = format!("worker-{t}");
                for _ in 0..PER_THREAD {
                    store.record(&name, 0.001);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("recording thread panicked");
    }

    let all = store.all_statistics();
    assert_eq!(all.len(), THREADS);
    for stats in all.values() {
        assert_eq!(stats.count(), PER_THREAD);
    }
}

#[test]
fn measure_from_many_threads() {
    const THREADS: usize = 6;

    let store = Arc::new(MeasurementStore::new());
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                measure(&store, "work", || {
                    std::hint::black_box((0..1000u64).sum::<u64>())
                })
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("measuring thread panicked");
    }

    assert_eq!(store.statistics("work").map(|s| s.count()), Some(THREADS));
}

#[test]
fn snapshot_under_concurrent_load_is_well_formed() {
    let store = Arc::new(MeasurementStore::new());
    let writer = {
        let store = store.clone();
        thread::spawn(move || {
            for i in 0..2000 {
                store.record("hot", i as f64 * 1e-7);
            }
        })
    };

    // Snapshots taken mid-write may be stale but never inconsistent.
    for _ in 0..50 {
        let all = store.all_statistics();
        if let Some(stats) = all.get("hot") {
            assert!(stats.count() >= 1);
            assert!(stats.min() <= stats.max());
        }
    }
    writer.join().expect("writer panicked");

    assert_eq!(store.statistics("hot").map(|s| s.count()), Some(2000));
}
