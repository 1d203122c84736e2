pub mod actions;
pub mod client;
pub mod event_manager;
pub mod ignore;
pub mod nuke;
pub mod platform;
pub mod settings;
