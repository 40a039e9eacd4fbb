use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use proptest::prelude::*;
use chocogate::exec::ConcurrencyLimiter;

/// Spawn `tasks` holders against a limiter of `capacity` and report the
/// highest number that were ever inside the guarded section at once.
fn max_observed_concurrency(capacity: usize, tasks: usize, hold_ms: u64) -> (usize, usize) {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .enable_time()
        .build()
        .unwrap();

    rt.block_on(async move {
        let limiter = ConcurrencyLimiter::new(capacity);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..tasks)
            .map(|_| {
                let limiter = limiter.clone();
                let running = Arc::clone(&running);
                let peak = Arc::clone(&peak);
                tokio::spawn(async move {
                    let slot = limiter.acquire().await;
                    let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                    peak.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(hold_ms)).await;
                    running.fetch_sub(1, Ordering::SeqCst);
                    drop(slot);
                })
            })
            .collect();

        for h in handles {
            h.await.unwrap();
        }

        (peak.load(Ordering::SeqCst), limiter.available())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn never_more_than_capacity_running(
        capacity in 1usize..5,
        tasks in 1usize..16,
        hold_ms in 0u64..3,
    ) {
        let (peak, available_after) = max_observed_concurrency(capacity, tasks, hold_ms);

        prop_assert!(peak <= capacity, "peak {} > capacity {}", peak, capacity);
        prop_assert!(peak >= 1);
        // No leaked permits once everyone is done.
        prop_assert_eq!(available_after, capacity);
    }
}
