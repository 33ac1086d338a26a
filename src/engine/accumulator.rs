// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Concurrent fan-out of grafts into one merged fact mapping.
//!
//! The [`Accumulator`] schedules every graft as its own tokio task, merges
//! each result as it completes, and lets a caller wait for the moment the
//! last scheduled graft has finished.
//!
//! # Readiness
//!
//! Readiness is a pending-task count plus a `watch` flag:
//!
//! ```text
//! spawn()      lock { pending += 1; ready = false }  then schedule the task
//! completion   lock { merge; pending -= 1; if pending == 0 { ready = true } }
//! join()       wait until ready, then snapshot the facts
//! ```
//!
//! Both updates happen under the same mutex, and `spawn` clears the flag
//! before the task exists. A `join` that is already waiting therefore keeps
//! waiting for grafts spawned after it started, and can never see `ready`
//! while a spawned graft is still uncounted. Calling `join` with nothing
//! spawned returns the (empty) facts immediately; calling `spawn` after a
//! `join` has returned opens a new window.
//!
//! # Failure isolation
//!
//! Each graft runs inside a second task, so an error, a panic, or a timeout
//! in the graft still reaches the completion step: the count is decremented,
//! the failure is logged and recorded, and facts merged so far are untouched.
//! Aborting the handle returned by `spawn` aborts the graft too and settles
//! it as `GraftCancelled`.
//!
//! # Examples
//!
//! ```rust
//! use facts::engine::Accumulator;
//! use facts::grafts::{FnGraft, GraftOutput};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let accumulator = Accumulator::new(tokio::runtime::Handle::current());
//!
//! accumulator.spawn(Arc::new(FnGraft::new("a", || async {
//!     let facts = json!({"a": 1}).as_object().cloned().unwrap_or_default();
//!     Ok::<_, facts::errors::GraftError>(GraftOutput::Plain(facts))
//! })));
//!
//! let merged = accumulator.join().await;
//! assert_eq!(merged.get("a"), Some(&json!(1)));
//! # }
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::Instrument;

use super::merge::merge_output;
use crate::errors::{GatherError, GraftError};
use crate::grafts::GraftOutput;
use crate::observability::messages::graft::{GraftCompleted, GraftFailed, GraftSpawned};
use crate::observability::messages::StructuredLog;
use crate::traits::Graft;
use crate::Facts;

#[derive(Default)]
struct State {
    facts: Facts,
    pending: usize,
    failures: Vec<GatherError>,
}

struct Shared {
    state: Mutex<State>,
    ready: watch::Sender<bool>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock must not wedge later completions.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn complete(&self, graft: &str, outcome: Result<GraftOutput, GatherError>, started: Instant) {
        let namespace = match &outcome {
            Ok(GraftOutput::Namespaced(namespace, _)) => Some(namespace.to_string()),
            _ => None,
        };

        let (result, pending) = {
            let mut state = self.lock();
            let result = outcome.and_then(|output| merge_output(&mut state.facts, graft, output));
            if let Err(error) = &result {
                state.failures.push(error.clone());
            }
            state.pending = state.pending.saturating_sub(1);
            if state.pending == 0 {
                self.ready.send_replace(true);
            }
            (result, state.pending)
        };

        match result {
            Ok(merged_keys) => GraftCompleted {
                graft,
                namespace: namespace.as_deref(),
                merged_keys,
                pending,
                duration: started.elapsed(),
            }
            .log(),
            Err(error) => GraftFailed {
                error: &error,
                pending,
            }
            .log(),
        }
    }
}

/// Runs grafts concurrently and merges their facts.
///
/// Cloning an `Accumulator` yields another handle onto the same pass, so a
/// graft or helper task can spawn more work while someone else is joining.
#[derive(Clone)]
pub struct Accumulator {
    shared: Arc<Shared>,
    handle: Handle,
    timeout: Option<Duration>,
}

impl Accumulator {
    /// Create an accumulator that schedules onto `handle` and waits on grafts forever.
    pub fn new(handle: Handle) -> Self {
        Self::with_timeout(handle, None)
    }

    /// Create an accumulator that aborts any graft running longer than `timeout`.
    pub fn with_timeout(handle: Handle, timeout: Option<Duration>) -> Self {
        let (ready, _) = watch::channel(true);
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                ready,
            }),
            handle,
            timeout,
        }
    }

    /// Schedule `graft` and return a handle to its task. Never blocks.
    pub fn spawn(&self, graft: Arc<dyn Graft>) -> JoinHandle<()> {
        let pending = {
            let mut state = self.shared.lock();
            state.pending += 1;
            self.shared.ready.send_replace(false);
            state.pending
        };

        let spawned = GraftSpawned {
            graft: graft.name(),
            pending,
        };
        spawned.log();
        let span = spawned.span("graft");

        let name = graft.name().to_string();
        let task = self
            .handle
            .spawn(async move { graft.run().await }.instrument(span.clone()));
        let completion = Completion {
            shared: Arc::clone(&self.shared),
            graft: name.clone(),
            started: Instant::now(),
            inner: task.abort_handle(),
            finished: false,
        };
        let timeout = self.timeout;
        self.handle.spawn(
            async move {
                let outcome = await_graft(name, task, timeout).await;
                completion.finish(outcome);
            }
            .instrument(span),
        )
    }

    /// Wait until every spawned graft has finished, then return the merged facts.
    pub async fn join(&self) -> Facts {
        let mut ready = self.shared.ready.subscribe();
        // The sender lives in `shared`, which `self` keeps alive, so this
        // cannot fail.
        let _ = ready.wait_for(|ready| *ready).await;
        self.shared.lock().facts.clone()
    }

    /// Number of spawned grafts that have not finished yet.
    pub fn pending(&self) -> usize {
        self.shared.lock().pending
    }

    pub fn is_ready(&self) -> bool {
        self.pending() == 0
    }

    /// Failures recorded so far, in completion order.
    pub fn failures(&self) -> Vec<GatherError> {
        self.shared.lock().failures.clone()
    }
}

impl std::fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Accumulator")
            .field("pending", &state.pending)
            .field("fact_count", &state.facts.len())
            .field("failure_count", &state.failures.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Settles exactly one pending slot for a spawned graft.
///
/// If the completion task is aborted or dropped before the graft settles,
/// the graft task is aborted and the slot is settled as `GraftCancelled`.
struct Completion {
    shared: Arc<Shared>,
    graft: String,
    started: Instant,
    inner: AbortHandle,
    finished: bool,
}

impl Completion {
    fn finish(mut self, outcome: Result<GraftOutput, GatherError>) {
        self.finished = true;
        self.shared.complete(&self.graft, outcome, self.started);
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.inner.abort();
        let cancelled = Err(GatherError::GraftCancelled {
            graft: self.graft.clone(),
        });
        self.shared.complete(&self.graft, cancelled, self.started);
    }
}

/// Wait on a graft running in its own task, so that panics and timeouts come back as values.
async fn await_graft(
    name: String,
    task: JoinHandle<Result<GraftOutput, GraftError>>,
    timeout: Option<Duration>,
) -> Result<GraftOutput, GatherError> {
    let joined = match timeout {
        Some(limit) => {
            let abort = task.abort_handle();
            match tokio::time::timeout(limit, task).await {
                Ok(joined) => joined,
                Err(_) => {
                    abort.abort();
                    return Err(GatherError::GraftTimedOut {
                        graft: name,
                        timeout: limit,
                    });
                }
            }
        }
        None => task.await,
    };

    match joined {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(error)) => Err(GatherError::GraftFailed {
            graft: name,
            message: error.to_string(),
        }),
        Err(join_error) if join_error.is_panic() => Err(GatherError::GraftPanicked { graft: name }),
        Err(_) => Err(GatherError::GraftCancelled { graft: name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grafts::stub::{
        facts, FailingGraft, GatedGraft, HangingGraft, PanickingGraft, StubGraft,
    };
    use serde_json::json;
    use tokio::time::sleep;

    fn accumulator() -> Accumulator {
        Accumulator::new(Handle::current())
    }

    #[tokio::test]
    async fn test_join_without_spawn_returns_empty_immediately() {
        let acc = accumulator();

        let merged = tokio::time::timeout(Duration::from_secs(1), acc.join())
            .await
            .expect("join with nothing spawned must not block");

        assert!(merged.is_empty());
        assert!(acc.is_ready());
    }

    #[tokio::test]
    async fn test_single_plain_graft() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("a", facts(json!({"a": 1}))).arc());

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"a": 1})));
        assert!(acc.failures().is_empty());
    }

    #[tokio::test]
    async fn test_merge_is_independent_of_completion_order() {
        for (delay_a, delay_b) in [(0, 30), (30, 0)] {
            let acc = accumulator();
            acc.spawn(StubGraft::plain("p1", facts(json!({"a": 1}))).after(delay_a).arc());
            acc.spawn(StubGraft::plain("p2", facts(json!({"b": 2}))).after(delay_b).arc());

            let merged = acc.join().await;

            assert_eq!(merged, facts(json!({"a": 1, "b": 2})));
        }
    }

    #[tokio::test]
    async fn test_overlapping_keys_last_writer_wins() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("early", facts(json!({"k": "early"}))).arc());
        acc.spawn(StubGraft::plain("late", facts(json!({"k": "late"}))).after(50).arc());

        let merged = acc.join().await;

        assert_eq!(merged.get("k"), Some(&json!("late")));
    }

    #[tokio::test]
    async fn test_namespaced_graft_nests_facts() {
        let acc = accumulator();
        acc.spawn(StubGraft::namespaced("eth0", "net.eth0", facts(json!({"mtu": 1500}))).arc());

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"net": {"eth0": {"mtu": 1500}}})));
    }

    #[tokio::test]
    async fn test_empty_output_contributes_nothing() {
        let acc = accumulator();
        acc.spawn(StubGraft::empty("nothing").arc());
        acc.spawn(StubGraft::plain("x", facts(json!({"x": 1}))).arc());

        assert_eq!(acc.join().await, facts(json!({"x": 1})));
    }

    #[tokio::test]
    async fn test_join_waits_for_graft_spawned_after_join_began() {
        let acc = accumulator();

        let (graft_a, gate_a) = GatedGraft::plain("a", facts(json!({"a": 1})));
        acc.spawn(graft_a);

        let waiter = tokio::spawn({
            let acc = acc.clone();
            async move { acc.join().await }
        });
        sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        let (graft_b, gate_b) = GatedGraft::plain("b", facts(json!({"b": 2})));
        acc.spawn(graft_b);

        gate_a.notify_one();
        sleep(Duration::from_millis(50)).await;
        assert!(
            !waiter.is_finished(),
            "join returned while graft 'b' was still pending"
        );
        assert_eq!(acc.pending(), 1);

        gate_b.notify_one();
        let merged = waiter.await.expect("join task should not panic");

        assert_eq!(merged, facts(json!({"a": 1, "b": 2})));
        assert!(acc.is_ready());
    }

    #[tokio::test]
    async fn test_spawn_after_join_opens_new_window() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("first", facts(json!({"first": 1}))).arc());
        assert_eq!(acc.join().await, facts(json!({"first": 1})));

        acc.spawn(StubGraft::plain("second", facts(json!({"second": 2}))).after(20).arc());
        assert!(!acc.is_ready());

        let merged = acc.join().await;
        assert_eq!(merged, facts(json!({"first": 1, "second": 2})));
    }

    #[tokio::test]
    async fn test_graft_spawning_more_grafts() {
        let acc = accumulator();

        let inner_acc = acc.clone();
        let parent = crate::grafts::FnGraft::new("parent", move || {
            let acc = inner_acc.clone();
            async move {
                acc.spawn(StubGraft::plain("child", facts(json!({"child": true}))).after(20).arc());
                Ok::<_, crate::errors::GraftError>(GraftOutput::Plain(facts(json!({"parent": true}))))
            }
        });
        acc.spawn(Arc::new(parent));

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"parent": true, "child": true})));
    }

    #[tokio::test]
    async fn test_failing_graft_is_isolated() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("p1", facts(json!({"x": 1}))).arc());
        acc.spawn(FailingGraft::arc("p2"));

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"x": 1})));
        assert_eq!(
            acc.failures(),
            vec![GatherError::GraftFailed {
                graft: "p2".to_string(),
                message: "Invalid data: Simulated graft failure".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_panicking_graft_is_isolated() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("p1", facts(json!({"x": 1}))).after(10).arc());
        acc.spawn(PanickingGraft::arc("boom"));

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"x": 1})));
        assert_eq!(
            acc.failures(),
            vec![GatherError::GraftPanicked {
                graft: "boom".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_aborted_graft_is_cancelled_and_join_returns() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("p1", facts(json!({"x": 1}))).arc());
        let (gated, _gate) = GatedGraft::plain("gated", facts(json!({"y": 2})));
        let task = acc.spawn(Arc::clone(&gated));

        tokio::task::yield_now().await;
        task.abort();

        let merged = tokio::time::timeout(Duration::from_secs(2), acc.join())
            .await
            .expect("aborting a graft must not hold up join");

        assert_eq!(merged, facts(json!({"x": 1})));
        assert_eq!(acc.pending(), 0);
        assert_eq!(
            acc.failures(),
            vec![GatherError::GraftCancelled {
                graft: "gated".to_string()
            }]
        );

        // The graft task itself is gone once its clone of the graft is dropped.
        sleep(Duration::from_millis(20)).await;
        assert_eq!(Arc::strong_count(&gated), 1);
    }

    #[tokio::test]
    async fn test_abort_before_first_poll_still_settles() {
        let acc = accumulator();
        let task = acc.spawn(StubGraft::plain("a", facts(json!({"a": 1}))).after(50).arc());
        task.abort();

        let merged = tokio::time::timeout(Duration::from_secs(2), acc.join())
            .await
            .expect("aborting a graft must not hold up join");

        assert!(merged.is_empty());
        assert_eq!(acc.failures().len(), 1);
        assert_eq!(acc.failures()[0].graft(), "a");
    }

    #[tokio::test]
    async fn test_hanging_graft_times_out() {
        let acc = Accumulator::with_timeout(Handle::current(), Some(Duration::from_millis(50)));
        acc.spawn(StubGraft::plain("p1", facts(json!({"x": 1}))).arc());
        acc.spawn(HangingGraft::arc("stuck"));

        let merged = tokio::time::timeout(Duration::from_secs(2), acc.join())
            .await
            .expect("timed-out graft must not hold up join");

        assert_eq!(merged, facts(json!({"x": 1})));
        assert_eq!(
            acc.failures(),
            vec![GatherError::GraftTimedOut {
                graft: "stuck".to_string(),
                timeout: Duration::from_millis(50),
            }]
        );
    }

    #[tokio::test]
    async fn test_structural_collision_is_recorded_not_overwritten() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("leaf", facts(json!({"net": "down"}))).arc());
        acc.spawn(
            StubGraft::namespaced("ns", "net.eth0", facts(json!({"mtu": 1500})))
                .after(30)
                .arc(),
        );

        let merged = acc.join().await;

        assert_eq!(merged, facts(json!({"net": "down"})));
        let failures = acc.failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].is_collision());
        assert_eq!(failures[0].graft(), "ns");
    }

    #[tokio::test]
    async fn test_join_snapshot_is_detached() {
        let acc = accumulator();
        acc.spawn(StubGraft::plain("a", facts(json!({"a": 1}))).arc());
        let first = acc.join().await;

        acc.spawn(StubGraft::plain("b", facts(json!({"b": 2}))).arc());
        let second = acc.join().await;

        assert_eq!(first, facts(json!({"a": 1})));
        assert_eq!(second, facts(json!({"a": 1, "b": 2})));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_concurrent_grafts_lose_no_updates() {
        let acc = accumulator();
        for i in 0..200 {
            let key = format!("k{}", i);
            let mut data = Facts::new();
            data.insert(key.clone(), json!(i));
            acc.spawn(StubGraft::plain(&key, data).after((i % 7) as u64).arc());
        }

        let merged = acc.join().await;

        assert_eq!(merged.len(), 200);
        for i in 0..200 {
            assert_eq!(merged.get(&format!("k{}", i)), Some(&json!(i)));
        }
        assert!(acc.failures().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_returns_task_handle() {
        let acc = accumulator();
        let task = acc.spawn(StubGraft::plain("a", facts(json!({"a": 1}))).arc());

        task.await.expect("completion task should not panic");

        assert!(acc.is_ready());
        assert_eq!(acc.join().await, facts(json!({"a": 1})));
    }
}
