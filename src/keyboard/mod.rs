pub mod code;
pub mod layout;
