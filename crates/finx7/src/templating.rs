pub mod layout;
pub mod maud_ext;
