pub mod services;
pub mod settings;
pub mod stores;
