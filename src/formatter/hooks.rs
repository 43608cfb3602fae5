//! User-registered format hooks.
//!
//! A hook is a plain `&str -> String` transform that runs either before the
//! built-in placeholder steps or after them, on both output channels.

use consol_config::RunAt;

use crate::error::{ConsolError, Result};

pub type HookFn = Box<dyn Fn(&str) -> String + Send + Sync>;

struct FormatHook {
    id: String,
    run_at: RunAt,
    func: HookFn,
}

/// Hooks in registration order, unique by id.
#[derive(Default)]
pub struct FormatHooks {
    hooks: Vec<FormatHook>,
}

impl FormatHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook. Fails if `id` is already taken.
    pub fn register(&mut self, id: impl Into<String>, run_at: RunAt, func: HookFn) -> Result<()> {
        let id = id.into();
        if self.contains(&id) {
            return Err(ConsolError::DuplicateRegistration(id));
        }
        log::debug!("Registered format hook {id:?} ({run_at:?})");
        self.hooks.push(FormatHook { id, run_at, func });
        Ok(())
    }

    /// Remove a hook by id. Fails if no hook has that id.
    pub fn unregister(&mut self, id: &str) -> Result<()> {
        let before = self.hooks.len();
        self.hooks.retain(|hook| hook.id != id);
        if self.hooks.len() == before {
            return Err(ConsolError::MissingRegistration(id.to_string()));
        }
        Ok(())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.hooks.iter().any(|hook| hook.id == id)
    }

    /// Registered ids with their timing, in registration order.
    pub fn ids(&self) -> Vec<(&str, RunAt)> {
        self.hooks
            .iter()
            .map(|hook| (hook.id.as_str(), hook.run_at))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook registered for `run_at` over `buffer`, in order.
    pub fn apply(&self, run_at: RunAt, buffer: String) -> String {
        self.hooks
            .iter()
            .filter(|hook| hook.run_at == run_at)
            .fold(buffer, |acc, hook| (hook.func)(&acc))
    }
}

impl std::fmt::Debug for FormatHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
