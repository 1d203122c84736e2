pub mod events;

use crate::modules::{Module, ModuleDefinition};

pub const DEFINITION: ModuleDefinition = ModuleDefinition {
    id: "deletion_lock",
    label: "Lock deleted posts",
    description: "Locks posts deleted by their author.",
};

pub fn module() -> Module {
    Module {
        definition: DEFINITION,
        event_handlers: vec![events::handler],
    }
}
