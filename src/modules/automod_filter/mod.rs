pub mod events;

use crate::modules::{Module, ModuleDefinition};

pub const DEFINITION: ModuleDefinition = ModuleDefinition {
    id: "automod_filter",
    label: "Lock filtered posts",
    description: "Locks posts filtered by AutoModerator.",
};

pub fn module() -> Module {
    Module {
        definition: DEFINITION,
        event_handlers: vec![events::handler],
    }
}
