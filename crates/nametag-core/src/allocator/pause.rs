use std::time::Duration;

/// Blocking wait used between a commit and its verification read.
pub trait Pause: Send + Sync {
    fn pause(&self, wait: Duration);
}

/// Sleeps the current thread. Not cancellable once entered.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPause;

impl Pause for ThreadPause {
    fn pause(&self, wait: Duration) {
        std::thread::sleep(wait);
    }
}
