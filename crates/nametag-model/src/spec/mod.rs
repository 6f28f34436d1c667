mod allocation;
pub use allocation::AllocationSpec;
