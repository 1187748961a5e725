//! Process-wide format registry
//!
//! Holds the current [`FormatConfig`] plus the derived muid/rmuid assignment
//! flags. Rendering reads the config current at call time, not at message
//! construction time, so one `set_format` affects every message rendered
//! afterwards. Configs are immutable once installed; `set_format` swaps the
//! whole Arc under a write lock.

use parking_lot::RwLock;
use std::sync::Arc;

use super::error::Result;
use super::format::{FormatConfig, FormatOptions, MUID_KEY, RMUID_KEY};

struct Registry {
    config: Arc<FormatConfig>,
    use_muid: bool,
    use_rmuid: bool,
}

impl Registry {
    fn from_config(config: FormatConfig) -> Self {
        let use_muid = config.is_positional(MUID_KEY);
        let use_rmuid = config.is_positional(RMUID_KEY);
        Self {
            config: config.shared(),
            use_muid,
            use_rmuid,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::from_config(FormatConfig::default())
    }
}

static REGISTRY: RwLock<Option<Registry>> = RwLock::new(None);

fn read_registry<T>(f: impl FnOnce(&Registry) -> T) -> T {
    {
        let guard = REGISTRY.read();
        if let Some(registry) = guard.as_ref() {
            return f(registry);
        }
    }
    let mut guard = REGISTRY.write();
    let registry = guard.get_or_insert_with(Registry::default);
    f(registry)
}

/// Validate, normalize and install a new format
///
/// Recomputes the muid/rmuid flags from the new field set. Fails only on
/// malformed field descriptors; the previous config stays in place on error.
pub fn set_format(options: FormatOptions) -> Result<()> {
    let registry = Registry::from_config(FormatConfig::from_options(options)?);
    *REGISTRY.write() = Some(registry);
    Ok(())
}

/// Restore the process-start default format: muid(12), where(15), what(23),
/// elastic on
pub fn reset_default() {
    *REGISTRY.write() = Some(Registry::default());
}

/// The config current at this instant
#[must_use]
pub fn current() -> Arc<FormatConfig> {
    read_registry(|registry| Arc::clone(&registry.config))
}

/// Whether newly constructed messages get a muid assigned
#[must_use]
pub fn use_muid() -> bool {
    read_registry(|registry| registry.use_muid)
}

/// Whether newly constructed messages get an rmuid assigned
#[must_use]
pub fn use_rmuid() -> bool {
    read_registry(|registry| registry.use_rmuid)
}

#[cfg(test)]
pub(crate) static TEST_LOCK: parking_lot::Mutex<()> = parking_lot::Mutex::new(());
