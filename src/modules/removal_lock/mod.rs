pub mod events;

use crate::modules::{Module, ModuleDefinition};

pub const DEFINITION: ModuleDefinition = ModuleDefinition {
    id: "removal_lock",
    label: "Lock removed posts",
    description: "Locks posts when a moderator removes them or marks them as spam.",
};

pub fn module() -> Module {
    Module {
        definition: DEFINITION,
        event_handlers: vec![events::handler],
    }
}
