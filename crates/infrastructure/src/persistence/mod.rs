//! Persistence for user preferences

mod preference_store;

pub use preference_store::JsonFilePreferenceStore;
