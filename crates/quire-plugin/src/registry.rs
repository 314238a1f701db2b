//! Plugin registry: stores loaded plugin instances and metadata.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use quire_core::error::AppError;
use quire_core::result::AppResult;

use crate::error::HookError;
use crate::hooks::definitions::{ActionHook, FilterHook, HookArgs, HookName};
use crate::hooks::registry::{HookRegistry, RegisterOptions, RegistrationHandle};

/// Metadata about a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Load priority (lower = loaded first).
    pub priority: i32,
}

/// Trait that all plugins must implement.
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Registers the plugin's hook callbacks.
    fn register_hooks(&self, hooks: &PluginHooks<'_>) -> AppResult<()>;

    /// Called before the plugin's hooks are registered.
    fn on_load(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called after the plugin's hooks have been removed.
    fn on_unload(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Hook registry view handed to a plugin while it registers.
///
/// Every registration made through it is owned by the plugin, so unloading
/// the plugin removes them all.
#[derive(Debug, Clone, Copy)]
pub struct PluginHooks<'a> {
    registry: &'a HookRegistry,
    plugin_id: &'a str,
}

impl<'a> PluginHooks<'a> {
    /// Creates a view registering on behalf of `plugin_id`.
    pub fn new(registry: &'a HookRegistry, plugin_id: &'a str) -> Self {
        Self {
            registry,
            plugin_id,
        }
    }

    /// Returns the owning plugin id.
    pub fn plugin_id(&self) -> &str {
        self.plugin_id
    }

    /// Registers a typed filter callback receiving the value and arguments.
    pub fn add_filter<V, A, F>(
        &self,
        hook: &FilterHook<V, A>,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        V: Serialize + serde::de::DeserializeOwned + 'static,
        A: HookArgs + 'static,
        F: Fn(V, A) -> Result<V, HookError> + Send + Sync + 'static,
    {
        hook.add(self.registry, self.owned(options), callback)
    }

    /// Registers a typed filter callback that only needs the value.
    pub fn add_value_filter<V, A, F>(
        &self,
        hook: &FilterHook<V, A>,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        V: Serialize + serde::de::DeserializeOwned + 'static,
        A: HookArgs + 'static,
        F: Fn(V) -> Result<V, HookError> + Send + Sync + 'static,
    {
        hook.add_value(self.registry, self.owned(options), callback)
    }

    /// Registers a typed action callback.
    pub fn add_action<A, F>(
        &self,
        hook: &ActionHook<A>,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        A: HookArgs + 'static,
        F: Fn(A) -> Result<(), HookError> + Send + Sync + 'static,
    {
        hook.add(self.registry, self.owned(options), callback)
    }

    /// Registers an untyped callback under any hook name.
    pub fn register<F>(
        &self,
        hook: HookName,
        options: RegisterOptions,
        callback: F,
    ) -> RegistrationHandle
    where
        F: Fn(Vec<Value>) -> Result<Value, HookError> + Send + Sync + 'static,
    {
        self.registry.register(hook, self.owned(options), callback)
    }

    /// Removes one of this plugin's registrations.
    pub fn unregister(&self, handle: &RegistrationHandle) -> bool {
        self.registry.unregister(handle)
    }

    fn owned(&self, options: RegisterOptions) -> RegisterOptions {
        options.with_owner(self.plugin_id)
    }
}

/// Registry of all loaded plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    /// Plugin ID → plugin instance and its metadata.
    plugins: DashMap<String, (Arc<dyn Plugin>, PluginInfo)>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            plugins: DashMap::new(),
        }
    }

    /// Registers a plugin.
    pub fn register(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let id = info.id.clone();

        match self.plugins.entry(id) {
            dashmap::mapref::entry::Entry::Occupied(entry) => Err(AppError::conflict(format!(
                "Plugin '{}' is already registered",
                entry.key()
            ))),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                info!(
                    plugin_id = %info.id,
                    name = %info.name,
                    version = %info.version,
                    "Registering plugin"
                );
                entry.insert((plugin, info));
                Ok(())
            }
        }
    }

    /// Unregisters a plugin by ID.
    pub fn unregister(&self, plugin_id: &str) -> AppResult<Arc<dyn Plugin>> {
        let (_, (plugin, _)) = self
            .plugins
            .remove(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        info!(plugin_id = %plugin_id, "Plugin unregistered");

        Ok(plugin)
    }

    /// Gets a plugin by ID.
    pub fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(plugin_id).map(|entry| entry.0.clone())
    }

    /// Lists all registered plugin metadata, by load priority then id.
    pub fn list(&self) -> Vec<PluginInfo> {
        let mut infos: Vec<PluginInfo> = self.plugins.iter().map(|e| e.1.clone()).collect();
        infos.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
        infos
    }

    /// Returns plugin count.
    pub fn count(&self) -> usize {
        self.plugins.len()
    }

    /// Checks whether a plugin is registered.
    pub fn contains(&self, plugin_id: &str) -> bool {
        self.plugins.contains_key(plugin_id)
    }
}
