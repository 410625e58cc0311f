pub mod diff_options;
pub mod myers;
pub mod raw_operation;
pub mod semantic_diff;
