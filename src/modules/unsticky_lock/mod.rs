pub mod events;

use crate::modules::{Module, ModuleDefinition};

pub const DEFINITION: ModuleDefinition = ModuleDefinition {
    id: "unsticky_lock",
    label: "Lock unstickied posts",
    description: "Locks posts when a moderator unstickies them.",
};

pub fn module() -> Module {
    Module {
        definition: DEFINITION,
        event_handlers: vec![events::handler],
    }
}
