pub mod form;
pub mod slot;
