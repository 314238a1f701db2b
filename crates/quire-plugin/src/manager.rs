//! Plugin manager: bootstrap and lifecycle management for all plugins.
//!
//! The manager owns the hook registry for the lifetime of the process. It
//! starts empty, is filled by [`PluginManager::bootstrap`], and is then
//! shared read-mostly with the host through the dispatcher. Loading or
//! unloading a plugin after bootstrap is allowed; the registry's
//! copy-on-write lists keep in-flight dispatches consistent.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, error, info, warn};

use quire_core::config::PluginConfig;
use quire_core::error::AppError;
use quire_core::result::AppResult;

use crate::hooks::dispatcher::HookDispatcher;
use crate::hooks::registry::HookRegistry;
use crate::registry::{Plugin, PluginHooks, PluginInfo, PluginRegistry};

/// Manages the lifecycle of plugins: load, register hooks, unload.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Hook dispatcher.
    hook_dispatcher: Arc<HookDispatcher>,
    /// Set once [`PluginManager::bootstrap`] has finished.
    bootstrapped: AtomicBool,
}

impl PluginManager {
    /// Creates a new plugin manager with an empty hook registry.
    pub fn new() -> Self {
        let hook_registry = Arc::new(HookRegistry::new());
        let hook_dispatcher = Arc::new(HookDispatcher::new(hook_registry.clone()));

        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            hook_dispatcher,
            bootstrapped: AtomicBool::new(false),
        }
    }

    /// Loads every enabled plugin, in load-priority order, then marks the
    /// bootstrap phase complete.
    ///
    /// Stops at the first plugin that fails to load.
    pub fn bootstrap(
        &self,
        plugins: Vec<Arc<dyn Plugin>>,
        config: &PluginConfig,
    ) -> AppResult<()> {
        let mut plugins: Vec<(PluginInfo, Arc<dyn Plugin>)> =
            plugins.into_iter().map(|p| (p.info(), p)).collect();
        plugins.sort_by_key(|(info, _)| info.priority);

        for (info, plugin) in plugins {
            if !config.is_enabled(&info.id) {
                info!(plugin_id = %info.id, "Plugin disabled by configuration, skipping");
                continue;
            }
            self.load_plugin(plugin)?;
        }

        self.bootstrapped.store(true, Ordering::Release);

        info!(
            plugins = self.plugin_registry.count(),
            hooks = self.hook_registry.registered_hooks().len(),
            callbacks = self.hook_registry.len(),
            "Plugin bootstrap complete"
        );

        Ok(())
    }

    /// Loads a compiled-in plugin and registers its hooks.
    ///
    /// A duplicate id is rejected before the plugin's `on_load` runs. If
    /// `on_load` or hook registration fails, the plugin and everything it
    /// registered so far are removed again.
    pub fn load_plugin(&self, plugin: Arc<dyn Plugin>) -> AppResult<()> {
        let info = plugin.info();
        let plugin_id = info.id.clone();

        if self.is_bootstrapped() {
            debug!(plugin_id = %plugin_id, "Loading plugin after bootstrap");
        }

        self.plugin_registry.register(plugin.clone())?;

        if let Err(e) = plugin.on_load() {
            self.plugin_registry.unregister(&plugin_id)?;
            return Err(AppError::plugin(format!(
                "Plugin '{}' load failed: {}",
                plugin_id, e
            )));
        }

        let hooks = PluginHooks::new(&self.hook_registry, &plugin_id);
        if let Err(e) = plugin.register_hooks(&hooks) {
            error!(plugin_id = %plugin_id, error = %e, "Plugin hook registration failed");
            self.hook_registry.unregister_owner(&plugin_id);
            self.plugin_registry.unregister(&plugin_id)?;
            return Err(AppError::plugin(format!(
                "Plugin '{}' hook registration failed: {}",
                plugin_id, e
            )));
        }

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            "Plugin loaded"
        );

        Ok(())
    }

    /// Removes a plugin's hooks and unloads it.
    pub fn unload_plugin(&self, plugin_id: &str) -> AppResult<()> {
        let plugin = self
            .plugin_registry
            .get(plugin_id)
            .ok_or_else(|| AppError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        let removed = self.hook_registry.unregister_owner(plugin_id);
        self.plugin_registry.unregister(plugin_id)?;

        if let Err(e) = plugin.on_unload() {
            warn!(
                plugin_id = %plugin_id,
                error = %e,
                "Plugin unload returned error"
            );
        }

        info!(plugin_id = %plugin_id, callbacks = removed, "Plugin unloaded");

        Ok(())
    }

    /// Unloads all plugins, logging individual failures.
    pub fn unload_all(&self) {
        for info in self.plugin_registry.list().iter().rev() {
            if let Err(e) = self.unload_plugin(&info.id) {
                error!(
                    plugin_id = %info.id,
                    error = %e,
                    "Error unloading plugin"
                );
            }
        }

        info!("All plugins unloaded");
    }

    /// Returns whether the bootstrap phase has finished.
    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped.load(Ordering::Acquire)
    }

    /// Returns the hook dispatcher for firing hooks.
    pub fn dispatcher(&self) -> &Arc<HookDispatcher> {
        &self.hook_dispatcher
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    /// Lists all loaded plugins.
    pub fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list()
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}
