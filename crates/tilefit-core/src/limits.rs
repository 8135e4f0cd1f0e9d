//! Engine defaults shared by the settings layer and the designer.

/// Line segments each cubic segment is flattened into
pub const DEFAULT_FLATTEN_STEPS: u32 = 16;

/// Upper bound on candidate cells for one generation
pub const DEFAULT_MAX_CELLS: usize = 20_000;
