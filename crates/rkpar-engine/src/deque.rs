//! Mutex-guarded double-ended task queue for the work-stealing driver.
//!
//! The owner pushes and pops at the head (LIFO); thieves take from the
//! tail, the end the owner touches last. One lock per deque makes `pop`
//! and `steal` mutually exclusive. The queue is array-backed
//! (`VecDeque`), so removing the last element leaves it fully empty with
//! no dangling tail.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// A double-ended task queue owned by one worker and stolen from by others.
#[derive(Debug)]
pub struct TaskDeque<T> {
    inner: Mutex<VecDeque<T>>,
}

// Compile-time assertion: a deque of Send items can be shared across workers.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<TaskDeque<Vec<f64>>>();
};

impl<T> Default for TaskDeque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskDeque<T> {
    /// Create an empty deque.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(VecDeque::new()),
        }
    }

    /// Push onto the head. Called by the producer placing work for the owner.
    pub fn push(&self, item: T) {
        self.lock().push_front(item);
    }

    /// Pop from the head. Called by the owning worker.
    pub fn pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Take from the tail. Called by peers with nothing left of their own.
    pub fn steal(&self) -> Option<T> {
        self.lock().pop_back()
    }

    /// Number of queued items.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no items are queued.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Remove and return every queued item, head first.
    pub fn drain(&self) -> Vec<T> {
        self.lock().drain(..).collect()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            // A worker panicked while holding the lock: the queue can no
            // longer be trusted to hand out each task exactly once.
            Err(_) => panic!("task deque lock poisoned"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn owner_pops_lifo() {
        let dq = TaskDeque::new();
        dq.push(1);
        dq.push(2);
        dq.push(3);
        assert_eq!(dq.pop(), Some(3));
        assert_eq!(dq.pop(), Some(2));
        assert_eq!(dq.pop(), Some(1));
        assert_eq!(dq.pop(), None);
    }

    #[test]
    fn thief_takes_oldest() {
        let dq = TaskDeque::new();
        dq.push(1);
        dq.push(2);
        dq.push(3);
        assert_eq!(dq.steal(), Some(1));
        assert_eq!(dq.pop(), Some(3));
        assert_eq!(dq.steal(), Some(2));
        assert!(dq.is_empty());
    }

    #[test]
    fn single_element_clears_both_ends() {
        let dq = TaskDeque::new();
        dq.push(7);
        assert_eq!(dq.steal(), Some(7));
        assert_eq!(dq.pop(), None);
        assert_eq!(dq.steal(), None);

        dq.push(8);
        assert_eq!(dq.pop(), Some(8));
        assert_eq!(dq.steal(), None);
        assert_eq!(dq.len(), 0);

        // Still usable after being emptied from either end.
        dq.push(9);
        dq.push(10);
        assert_eq!(dq.steal(), Some(9));
        assert_eq!(dq.pop(), Some(10));
    }

    #[test]
    fn concurrent_pop_and_steal_hand_out_each_item_once() {
        let dq = Arc::new(TaskDeque::new());
        for i in 0..10_000u32 {
            dq.push(i);
        }
        let owner = {
            let dq = Arc::clone(&dq);
            thread::spawn(move || {
                let mut got = Vec::new();
                while let Some(v) = dq.pop() {
                    got.push(v);
                }
                got
            })
        };
        let thieves: Vec<_> = (0..3)
            .map(|_| {
                let dq = Arc::clone(&dq);
                thread::spawn(move || {
                    let mut got = Vec::new();
                    while let Some(v) = dq.steal() {
                        got.push(v);
                    }
                    got
                })
            })
            .collect();

        let mut all = owner.join().unwrap();
        for t in thieves {
            all.extend(t.join().unwrap());
        }
        all.sort_unstable();
        assert_eq!(all, (0..10_000).collect::<Vec<_>>());
    }

    #[test]
    fn drain_returns_head_first() {
        let dq = TaskDeque::new();
        dq.push('a');
        dq.push('b');
        assert_eq!(dq.drain(), vec!['b', 'a']);
        assert!(dq.is_empty());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Push(u8),
        Pop,
        Steal,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![any::<u8>().prop_map(Op::Push), Just(Op::Pop), Just(Op::Steal)]
    }

    proptest! {
        #[test]
        fn matches_a_vecdeque_model(ops in proptest::collection::vec(arb_op(), 0..200)) {
            let dq = TaskDeque::new();
            let mut model = VecDeque::new();
            for op in ops {
                match op {
                    Op::Push(v) => {
                        dq.push(v);
                        model.push_front(v);
                    }
                    Op::Pop => prop_assert_eq!(dq.pop(), model.pop_front()),
                    Op::Steal => prop_assert_eq!(dq.steal(), model.pop_back()),
                }
                prop_assert_eq!(dq.len(), model.len());
            }
        }
    }
}
