pub mod modules;
pub mod services;

use std::sync::Arc;

pub type Error = anyhow::Error;

// Collaborators handed to every event handler
#[derive(Clone)]
pub struct Data {
    pub client: Arc<dyn services::client::ModerationClient>,
    pub settings: Arc<dyn services::settings::SettingsStore>,
}

impl Data {
    pub fn new(
        client: Arc<dyn services::client::ModerationClient>,
        settings: Arc<dyn services::settings::SettingsStore>,
    ) -> Self {
        Self { client, settings }
    }
}
