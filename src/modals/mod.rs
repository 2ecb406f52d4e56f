pub mod settings;
pub mod submitted;
