//! Work items, results, and identity-ordered aggregation

use crate::error::UnitError;

/// One unit of input work tagged with a stable identity.
///
/// The identity is derived from the source position (spreadsheet row
/// number, filename stem), never from enumeration order, so output rows
/// stay traceable to input rows even when entries are skipped. Unique
/// within a run, not necessarily contiguous.
#[derive(Debug, Clone)]
pub struct WorkItem<P> {
    pub identity: u32,
    pub payload: P,
}

/// Terminal outcome of one work unit.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Failure(UnitError),
}

/// The outcome for one [`WorkItem`], tagged with its identity.
///
/// The executor produces exactly one of these per item — no drops, no
/// duplicates — regardless of how many units fail.
#[derive(Debug)]
pub struct WorkResult<T> {
    pub identity: u32,
    pub outcome: Outcome<T>,
}

impl<T> WorkResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success(_))
    }
}

/// Extract successful outcomes sorted strictly ascending by identity.
///
/// Failures are dropped here; the run log is their only record.
pub fn successes_by_identity<T>(results: Vec<WorkResult<T>>) -> Vec<(u32, T)> {
    let mut successes: Vec<(u32, T)> = results
        .into_iter()
        .filter_map(|r| match r.outcome {
            Outcome::Success(v) => Some((r.identity, v)),
            Outcome::Failure(_) => None,
        })
        .collect();
    successes.sort_unstable_by_key(|(id, _)| *id);
    successes
}

/// Success/failure counts for a completed batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results<T>(results: &[WorkResult<T>]) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(identity: u32) -> WorkResult<u32> {
        WorkResult {
            identity,
            outcome: Outcome::Success(identity * 10),
        }
    }

    fn fail(identity: u32) -> WorkResult<u32> {
        WorkResult {
            identity,
            outcome: Outcome::Failure(UnitError::Network {
                status: None,
                message: "down".to_string(),
            }),
        }
    }

    #[test]
    fn successes_sorted_ascending() {
        let results = vec![ok(30), ok(2), fail(7), ok(15)];
        let agg = successes_by_identity(results);
        let ids: Vec<u32> = agg.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![2, 15, 30]);
    }

    #[test]
    fn failures_excluded_from_aggregate() {
        let results = vec![fail(1), ok(2), fail(3)];
        let agg = successes_by_identity(results);
        assert_eq!(agg.len(), 1);
        assert_eq!(agg[0], (2, 20));
    }

    #[test]
    fn empty_results() {
        let agg = successes_by_identity(Vec::<WorkResult<()>>::new());
        assert!(agg.is_empty());
    }

    #[test]
    fn summary_counts() {
        let results = vec![ok(1), fail(2), ok(3), fail(4), fail(5)];
        let summary = BatchSummary::from_results(&results);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 3);
    }
}
