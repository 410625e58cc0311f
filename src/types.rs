pub mod change;
pub mod edit;
pub mod owner_id;
pub mod reserved_character;
