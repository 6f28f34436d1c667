pub mod allocator;
pub mod error;
pub mod map;
pub mod outcome;
pub mod policy;
pub mod registry;

pub use allocator::{AllocationContext, AllocationState, Allocator, Pause, ThreadPause};
pub use error::{AllocError, AllocResult, ErrorClass};
pub use outcome::{Assignment, ExitStatus, Report};
pub use policy::BackoffPolicy;
pub use registry::{JsonFileRegistry, MemoryRegistry, Registry, RegistryError};

pub mod prelude {
    pub use crate::allocator::{AllocationContext, Allocator};
    pub use crate::error::AllocError;
    pub use crate::outcome::{Assignment, ExitStatus, Report};
    pub use crate::registry::{Registry, RegistryError};
}
