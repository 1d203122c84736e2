pub mod events;

use crate::modules::{Module, ModuleDefinition};

pub const DEFINITION: ModuleDefinition = ModuleDefinition {
    id: "approval_unlock",
    label: "Unlock approved posts",
    description: "Unlocks locked posts when a moderator approves them.",
};

pub fn module() -> Module {
    Module {
        definition: DEFINITION,
        event_handlers: vec![events::handler],
    }
}
