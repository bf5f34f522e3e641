//! Optimistic update protocol: capture, apply locally, call the service,
//! then either keep the local change or put the captured state back.

use parking_lot::Mutex;
use std::future::Future;
use taskboard_core::{TaskboardError, TaskboardResult};

/// Captures and restores the part of a state an optimistic change touches.
pub trait Checkpoint<S> {
    type Saved: PartialEq;

    fn capture(&self, state: &S) -> Self::Saved;

    fn restore(&self, state: &mut S, saved: Self::Saved);
}

/// What to do with the local change when the service rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    Revert,
    Keep,
}

#[derive(Debug)]
pub enum Settlement<T> {
    /// The service accepted the change.
    Confirmed(T),
    /// The service failed and the captured state was put back.
    Reverted(TaskboardError),
    /// The service failed and the local change was left in place.
    Kept(TaskboardError),
    /// The service failed, but the touched state changed again while the
    /// request was in flight, so it was not reverted.
    Diverged(TaskboardError),
}

/// Run one optimistic change against `state`.
///
/// `apply` runs under the lock and hands back what `remote` needs to send,
/// or `None` when there was nothing to change, in which case `remote` is
/// never called and `None` comes back. The lock is released before `remote` runs, so other changes can
/// land while the request is in flight. On failure with
/// [`OnFailure::Revert`] the captured state is restored only if the touched
/// part still looks exactly like it did right after `apply`.
pub async fn apply_optimistic<S, C, P, A, R, Fut, T>(
    state: &Mutex<S>,
    checkpoint: &C,
    apply: A,
    remote: R,
    on_failure: OnFailure,
) -> Option<Settlement<T>>
where
    C: Checkpoint<S>,
    A: FnOnce(&mut S) -> Option<P>,
    R: FnOnce(P) -> Fut,
    Fut: Future<Output = TaskboardResult<T>>,
{
    let (before, after, request) = {
        let mut guard = state.lock();
        let before = checkpoint.capture(&guard);
        let request = apply(&mut guard)?;
        (before, checkpoint.capture(&guard), request)
    };

    let error = match remote(request).await {
        Ok(value) => return Some(Settlement::Confirmed(value)),
        Err(error) => error,
    };

    if on_failure == OnFailure::Keep {
        return Some(Settlement::Kept(error));
    }

    let mut guard = state.lock();
    if checkpoint.capture(&guard) != after {
        return Some(Settlement::Diverged(error));
    }
    checkpoint.restore(&mut guard, before);
    Some(Settlement::Reverted(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Checkpoints the whole vector.
    struct Whole;

    impl Checkpoint<Vec<u32>> for Whole {
        type Saved = Vec<u32>;

        fn capture(&self, state: &Vec<u32>) -> Vec<u32> {
            state.clone()
        }

        fn restore(&self, state: &mut Vec<u32>, saved: Vec<u32>) {
            *state = saved;
        }
    }

    fn swap_first_two(state: &mut Vec<u32>) -> Option<u32> {
        state.swap(0, 1);
        state.first().copied()
    }

    #[tokio::test]
    async fn test_confirmed_keeps_change() {
        let state = Mutex::new(vec![1, 2, 3]);
        let settled = apply_optimistic(
            &state,
            &Whole,
            swap_first_two,
            |first| async move { Ok(first * 10) },
            OnFailure::Revert,
        )
        .await
        .unwrap();

        assert!(matches!(settled, Settlement::Confirmed(20)));
        assert_eq!(*state.lock(), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_failure_reverts() {
        let state = Mutex::new(vec![1, 2, 3]);
        let settled = apply_optimistic(
            &state,
            &Whole,
            swap_first_two,
            |_| async { Err::<(), _>(TaskboardError::Timeout("Failed to reorder tasks".into())) },
            OnFailure::Revert,
        )
        .await
        .unwrap();

        assert!(matches!(settled, Settlement::Reverted(TaskboardError::Timeout(_))));
        assert_eq!(*state.lock(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_kept() {
        let state = Mutex::new(vec![1, 2, 3]);
        let settled = apply_optimistic(
            &state,
            &Whole,
            swap_first_two,
            |_| async { Err::<(), _>(TaskboardError::Internal("boom".into())) },
            OnFailure::Keep,
        )
        .await
        .unwrap();

        assert!(matches!(settled, Settlement::Kept(_)));
        assert_eq!(*state.lock(), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_nothing_applied_skips_remote() {
        let state = Mutex::new(vec![1]);
        let called = AtomicBool::new(false);
        let settled = apply_optimistic(
            &state,
            &Whole,
            |_: &mut Vec<u32>| None::<()>,
            |_| async {
                called.store(true, Ordering::SeqCst);
                Ok(())
            },
            OnFailure::Revert,
        )
        .await;
        assert!(settled.is_none());
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_newer_change_is_not_clobbered() {
        let state = Mutex::new(vec![1, 2, 3]);
        let settled = apply_optimistic(
            &state,
            &Whole,
            swap_first_two,
            |_| async {
                // Another gesture lands while this request is in flight
                state.lock().push(4);
                Err::<(), _>(TaskboardError::Internal("boom".into()))
            },
            OnFailure::Revert,
        )
        .await
        .unwrap();

        assert!(matches!(settled, Settlement::Diverged(_)));
        assert_eq!(*state.lock(), vec![2, 1, 3, 4]);
    }
}
