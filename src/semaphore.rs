use std::sync::{Condvar, Mutex, MutexGuard};

use crate::diag;

//==============================================================================
// Counting semaphore
//==============================================================================

struct Permits {
    count: usize,
    abandoned: bool,
}

/// Counting semaphore built on a mutex-guarded counter.
///
/// `acquire` blocks while the count is zero; `release` adds one permit back
/// and wakes a single waiter. The count never exceeds the initial value.
/// Once abandoned, every pending and future `acquire` returns `false`.
pub struct Semaphore {
    permits: Mutex<Permits>,
    available: Condvar,
    max: usize,
}

impl Semaphore {
    pub fn new(permits: usize) -> Self {
        Semaphore {
            permits: Mutex::new(Permits {
                count: permits,
                abandoned: false,
            }),
            available: Condvar::new(),
            max: permits,
        }
    }

    /// Takes one permit, blocking while none is left.
    ///
    /// Returns `false` without taking a permit if the semaphore was abandoned.
    pub fn acquire(&self) -> bool {
        let mut permits = self.lock();
        while permits.count == 0 && !permits.abandoned {
            permits = self.available.wait(permits).unwrap_or_else(|poisoned| {
                diag::warn("semaphore mutex was poisoned, recovering");
                poisoned.into_inner()
            });
        }
        if permits.abandoned {
            return false;
        }
        permits.count -= 1;
        true
    }

    pub fn release(&self) {
        let mut permits = self.lock();
        debug_assert!(
            permits.count < self.max,
            "semaphore released above its initial count"
        );
        permits.count += 1;
        drop(permits);
        self.available.notify_one();
    }

    /// Wakes every waiter and makes all further acquires fail.
    pub fn abandon(&self) {
        let mut permits = self.lock();
        permits.abandoned = true;
        drop(permits);
        self.available.notify_all();
    }

    pub fn is_abandoned(&self) -> bool {
        self.lock().abandoned
    }

    pub fn available(&self) -> usize {
        self.lock().count
    }

    fn lock(&self) -> MutexGuard<'_, Permits> {
        self.permits.lock().unwrap_or_else(|poisoned| {
            diag::warn("semaphore mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
