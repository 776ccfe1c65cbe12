//! Bounded concurrent batch executor
//!
//! Runs a unit processor over every work item with a fixed worker budget.
//! Guarantees: at most `workers` units in flight; exactly one
//! [`WorkResult`] per [`WorkItem`] no matter how many units fail; one
//! unit's failure never cancels or delays its siblings. Completion order
//! across workers is unspecified — the only ordering contract is the
//! identity-sorted aggregation step downstream.

use std::sync::Mutex;

use crate::item::{BatchSummary, Outcome, WorkItem, WorkResult};
use crate::progress::SharedProgress;
use crate::queue::WorkQueue;

/// Execute `process` over all items under a fixed concurrency budget.
///
/// The processor returns a typed `Result`; errors become `Failure`
/// outcomes for that one identity and are logged — they never propagate
/// out of the batch. The progress bar advances once per completed unit,
/// in completion order.
pub fn run_batch<P, T, F>(
    label: &str,
    items: &[WorkItem<P>],
    workers: usize,
    progress: &SharedProgress,
    process: F,
) -> Vec<WorkResult<T>>
where
    P: Sync,
    T: Send,
    F: Fn(&WorkItem<P>) -> Result<T, crate::UnitError> + Sync,
{
    let queue = WorkQueue::new(items);
    let results: Mutex<Vec<WorkResult<T>>> = Mutex::new(Vec::with_capacity(items.len()));
    let pb = progress.batch_bar(label, items.len() as u64);

    let workers = workers.max(1).min(items.len().max(1));
    rayon::scope(|s| {
        for _ in 0..workers {
            s.spawn(|_| {
                while let Some(item) = queue.claim() {
                    let outcome = match process(item) {
                        Ok(v) => {
                            log::debug!("{label} {}: ok", item.identity);
                            Outcome::Success(v)
                        }
                        Err(e) => {
                            log::warn!("{label} {}: {e}", item.identity);
                            Outcome::Failure(e)
                        }
                    };
                    results
                        .lock()
                        .expect("worker thread panicked")
                        .push(WorkResult {
                            identity: item.identity,
                            outcome,
                        });
                    pb.inc(1);
                }
            });
        }
    });

    pb.finish_and_clear();

    let results = results.into_inner().expect("worker thread panicked");
    let summary = BatchSummary::from_results(&results);
    log::info!(
        "{label}: {} of {} units succeeded, {} failed",
        summary.succeeded,
        summary.total,
        summary.failed
    );
    results
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::UnitError;
    use crate::progress::ProgressContext;

    fn items(n: u32) -> Vec<WorkItem<u32>> {
        (0..n)
            .map(|i| WorkItem {
                identity: i,
                payload: i,
            })
            .collect()
    }

    fn progress() -> SharedProgress {
        Arc::new(ProgressContext::new())
    }

    fn network_err() -> UnitError {
        UnitError::Network {
            status: Some(500),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn one_result_per_item() {
        let items = items(25);
        let results = run_batch("test", &items, 4, &progress(), |item| {
            if item.payload % 3 == 0 {
                Err(network_err())
            } else {
                Ok(item.payload)
            }
        });

        assert_eq!(results.len(), items.len());
        let mut ids: Vec<u32> = results.iter().map(|r| r.identity).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), items.len(), "duplicate or dropped result");
    }

    #[test]
    fn concurrency_never_exceeds_budget() {
        let budget = 3;
        let current = AtomicUsize::new(0);
        let high_water = AtomicUsize::new(0);

        let items = items(20);
        run_batch("test", &items, budget, &progress(), |item| {
            let now = current.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(now, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(5));
            current.fetch_sub(1, Ordering::SeqCst);
            Ok(item.payload)
        });

        assert!(
            high_water.load(Ordering::SeqCst) <= budget,
            "observed {} concurrent units with budget {budget}",
            high_water.load(Ordering::SeqCst)
        );
    }

    #[test]
    fn failures_do_not_block_siblings() {
        // Half the units fail; the batch still completes with every
        // surviving unit succeeding.
        let items = items(40);
        let results = run_batch("test", &items, 8, &progress(), |item| {
            if item.payload % 2 == 0 {
                Err(network_err())
            } else {
                Ok(item.payload)
            }
        });

        assert_eq!(results.len(), 40);
        assert_eq!(results.iter().filter(|r| r.is_success()).count(), 20);
    }

    #[test]
    fn empty_batch() {
        let items: Vec<WorkItem<u32>> = Vec::new();
        let results = run_batch("test", &items, 4, &progress(), |item| Ok(item.payload));
        assert!(results.is_empty());
    }

    #[test]
    fn single_worker_processes_everything() {
        let items = items(10);
        let results = run_batch("test", &items, 1, &progress(), |item| Ok(item.payload * 2));
        assert_eq!(results.len(), 10);
        assert!(results.iter().all(|r| r.is_success()));
    }
}
