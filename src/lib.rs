mod diffs;
mod errors;
mod operation_transformation;
mod types;
mod utils;

pub use diffs::diff_options::{Cleanup, DiffOptions};
pub use errors::{InputLocation, MergeConflict, ReconcileError};
pub use operation_transformation::{
    apply_edits, apply_edits_with_options,
    attributed_diff::{diff, diff_with_options},
    canonicalize_ranges::{canonicalize_ranges, split_range_markers},
    layering::{layer, layer_with_options},
    merge::{merge, merge_two},
};
pub use types::{
    change::{Change, base_text, visible_text},
    edit::Edit,
    owner_id::OwnerId,
    reserved_character::{RANGE_END, RANGE_START, ReservedCharacter, strip_range_markers},
};
pub use utils::side::Side;
