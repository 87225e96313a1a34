//!
//! Injectable clock
//!
//! The signer reads the `created` timestamp from here. Tests either freeze it or step it by hand.
//!

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::{Duration, SystemTime},
};

/// Handle driving a clock returned by [`Clock::mockable`]
#[derive(Clone, Debug)]
pub struct MockHandle {
    unix_secs: Arc<AtomicU64>,
}

impl MockHandle {
    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.unix_secs.fetch_add(by.as_secs(), Ordering::AcqRel);
    }

    /// Jump to the given UNIX timestamp (in seconds), in either direction
    pub fn set(&self, unix_secs: u64) {
        self.unix_secs.store(unix_secs, Ordering::Release);
    }
}

#[derive(Clone, Debug, Default)]
enum Source {
    #[default]
    System,
    Fixed(SystemTime),
    Mock(Arc<AtomicU64>),
}

/// Clock handed to the signer
#[derive(Clone, Debug, Default)]
pub struct Clock {
    source: Source,
}

impl Clock {
    /// Construct a clock reading the system time
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a clock that always returns the same point in time
    #[must_use]
    pub fn fixed(at: SystemTime) -> Self {
        Self {
            source: Source::Fixed(at),
        }
    }

    /// Construct a clock frozen at the given UNIX timestamp (in seconds)
    #[must_use]
    pub fn fixed_unix(secs: u64) -> Self {
        Self::fixed(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
    }

    /// Construct a clock starting at the given UNIX timestamp (in seconds)
    ///
    /// It only moves when told to through the returned handle. Clones share the same time.
    #[must_use]
    pub fn mockable(start_unix_secs: u64) -> (Self, MockHandle) {
        let unix_secs = Arc::new(AtomicU64::new(start_unix_secs));
        let handle = MockHandle {
            unix_secs: Arc::clone(&unix_secs),
        };

        (
            Self {
                source: Source::Mock(unix_secs),
            },
            handle,
        )
    }

    /// Read the current time
    #[must_use]
    pub fn now(&self) -> SystemTime {
        match self.source {
            Source::System => SystemTime::now(),
            Source::Fixed(at) => at,
            Source::Mock(ref unix_secs) => {
                SystemTime::UNIX_EPOCH + Duration::from_secs(unix_secs.load(Ordering::Acquire))
            }
        }
    }
}
