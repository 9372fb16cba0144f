use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CadenceDecision {
    pub is_donut: bool,
    /// Пустая строка, если пост обычный
    pub duration: String,
}

/// Счётчик постов, решающий, какой из них будет донатным
pub struct CadenceTracker {
    posts_counter: AtomicU64,
    donut_frequency: NonZeroU32,
    donut_duration: String,
}

impl CadenceTracker {
    pub fn new(donut_frequency: NonZeroU32, donut_duration: impl Into<String>) -> Self {
        CadenceTracker {
            posts_counter: AtomicU64::new(0),
            donut_frequency,
            donut_duration: donut_duration.into(),
        }
    }

    /// Увеличивает счётчик и решает, донатный ли текущий пост
    pub fn next(&self) -> CadenceDecision {
        let counter = self.posts_counter.fetch_add(1, Ordering::SeqCst) + 1;

        if counter % u64::from(self.donut_frequency.get()) == 0 {
            CadenceDecision {
                is_donut: true,
                duration: self.donut_duration.clone(),
            }
        } else {
            CadenceDecision {
                is_donut: false,
                duration: String::new(),
            }
        }
    }

    pub fn posts_made(&self) -> u64 {
        self.posts_counter.load(Ordering::SeqCst)
    }

    pub fn donut_frequency(&self) -> u32 {
        self.donut_frequency.get()
    }
}
