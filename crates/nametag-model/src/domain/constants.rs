//! Common model-level constants.
//!
//! Well-known tag keys and defaults shared by the allocator and the command line.

/// Tag key receiving the allocated name unless overridden.
pub const DEFAULT_NAME_TAG: &str = "Name";

/// Tag key holding the group value unless overridden.
///
/// Entities sharing the same value under this key form one naming namespace.
pub const DEFAULT_GROUP_TAG: &str = "Group";

/// Number of commit+verify rounds an allocation may spend before giving up.
pub const DEFAULT_RETRIES: u32 = 10;
