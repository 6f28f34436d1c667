use std::{fmt, sync::Arc};

use crate::{
    allocator::pause::{Pause, ThreadPause},
    registry::Registry,
};

/// Shared handles passed to the allocator.
#[derive(Clone)]
pub struct AllocationContext {
    registry: Arc<dyn Registry>,
    pause: Arc<dyn Pause>,
}

impl AllocationContext {
    /// Context over `registry` that waits with a blocking thread sleep.
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self {
            registry,
            pause: Arc::new(ThreadPause),
        }
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }

    pub fn pause(&self) -> &dyn Pause {
        self.pause.as_ref()
    }

    /// Replace the pause implementation and return updated context.
    pub fn with_pause(mut self, pause: Arc<dyn Pause>) -> Self {
        self.pause = pause;
        self
    }
}

impl fmt::Debug for AllocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocationContext")
            .field("registry", &self.registry.name())
            .field("pause", &"<handle>")
            .finish()
    }
}

impl fmt::Display for AllocationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AllocationContext(registry={})", self.registry.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MemoryRegistry;

    #[test]
    fn display_names_the_backend() {
        let ctx = AllocationContext::new(Arc::new(MemoryRegistry::new()));
        assert_eq!(ctx.to_string(), "AllocationContext(registry=memory)");
        assert_eq!(ctx.registry().name(), "memory");
    }
}
