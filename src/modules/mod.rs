pub mod approval_unlock;
pub mod automod_filter;
pub mod deletion_lock;
pub mod removal_lock;
pub mod unsticky_lock;

use crate::services::event_manager::TriggerEvent;
use crate::services::settings::Settings;
use crate::{Data, Error};
use std::future::Future;
use std::pin::Pin;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub type EventHandler =
    for<'a> fn(&'a Data, &'a TriggerEvent, &'a Settings) -> BoxFuture<'a, Result<(), Error>>;

#[derive(Debug, Clone)]
pub struct ModuleDefinition {
    pub id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

pub struct Module {
    pub definition: ModuleDefinition,
    pub event_handlers: Vec<EventHandler>,
}

pub fn get_modules() -> Vec<Module> {
    vec![
        removal_lock::module(),
        approval_unlock::module(),
        deletion_lock::module(),
        automod_filter::module(),
        unsticky_lock::module(),
    ]
}

pub fn definitions() -> Vec<ModuleDefinition> {
    get_modules().into_iter().map(|m| m.definition).collect()
}
