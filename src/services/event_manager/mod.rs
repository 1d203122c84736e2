use crate::services::settings::Settings;
use crate::{Data, Error};
use anyhow::Context as _;
use tracing::{debug, info};

pub mod events;

pub use events::TriggerEvent;

/// Routes inbound trigger events to every registered module
pub struct Handler {
    modules: Vec<crate::modules::Module>,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    pub fn new() -> Self {
        Self {
            modules: crate::modules::get_modules(),
        }
    }

    pub fn with_modules(modules: Vec<crate::modules::Module>) -> Self {
        Self { modules }
    }

    /// Reads settings once, then runs each module's handlers in registration
    /// order. The first failure stops dispatch and is returned to the caller.
    pub async fn dispatch(&self, data: &Data, event: &TriggerEvent) -> Result<(), Error> {
        info!("Dispatching {} event", event.name());

        let settings = Settings::load(data.settings.as_ref())
            .await
            .context("Failed to read installation settings")?;

        for module in &self.modules {
            for handler in &module.event_handlers {
                debug!("Running handler of module {}", module.definition.id);
                handler(data, event, &settings)
                    .await
                    .with_context(|| format!("Event handler for module {} failed", module.definition.id))?;
            }
        }

        Ok(())
    }
}
