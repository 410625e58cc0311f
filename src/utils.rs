pub mod change_builder;
pub mod common_affix_len;
pub mod side;
