//! This crate provides a tracing subscriber configuration that works with the
//! Mupen64Plus debug callback.
//!
//! Mupen64Plus hands every plugin a `DebugCallback` and an opaque context pointer at
//! startup. Rather than logging to stdout (which frontends generally swallow), events
//! raised anywhere in the plugin are routed back through that callback so they show up
//! alongside the core's own output.

use std::ffi::{c_int, c_void};
use std::sync::{Arc, Once, RwLock};

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;

mod layer;
pub use layer::{
    convert_m64p_level_to_tracing_level, convert_tracing_level_to_m64p_level, ForeignDebugFn,
    M64pLoggerLayer, M64MSG_ERROR, M64MSG_INFO, M64MSG_STATUS, M64MSG_VERBOSE, M64MSG_WARNING,
};

/// A marker for where logs should be routed to.
///
/// Rust enum variants can't be strings, but we want to be able to pass an
/// enum to the tracing macro `target` field - which requires a static str.
/// The syntax is the same as if using an enum.
#[allow(non_upper_case_globals)]
pub mod Log {
    /// The default target for all tracing.
    pub const General: &'static str = "alrdp";

    /// Lifecycle and host bridging of the plugin itself.
    pub const Plugin: &'static str = "alrdp_plugin";
}

/// Filter state shared between the installed layer and the FFI update hook.
#[derive(Debug)]
pub struct LogFilter {
    pub is_enabled: bool,
    pub level: tracing::Level,
}

impl LogFilter {
    /// Builds a filter from a Mupen64Plus message level (`M64MSG_*`).
    pub fn new(is_enabled: bool, m64p_level: c_int) -> Self {
        Self {
            is_enabled,
            level: convert_m64p_level_to_tracing_level(m64p_level),
        }
    }

    /// Whether an event at `level` should be forwarded at all.
    ///
    /// In tracing, ERROR is the *lowest* level, so anything "greater" than the
    /// configured level is more verbose than we want.
    pub fn allows(&self, level: tracing::Level) -> bool {
        self.is_enabled && level <= self.level
    }
}

/// The filter the global subscriber reads from. Registration happens exactly once,
/// after which `RwLock` gives the layer parallel read access.
static LOG_FILTER: OnceCell<Arc<RwLock<LogFilter>>> = OnceCell::new();

/// Installs the global subscriber that forwards events to `debug_fn`.
///
/// *Usually* you do not want a library installing a global logger, however this library
/// acts as an application in the sense that the host only ever talks to it over the C ABI,
/// and we *want* a global subscriber. Calling this more than once only updates the filter.
pub fn init(debug_fn: ForeignDebugFn, context: *mut c_void, m64p_level: c_int) {
    let filter = LOG_FILTER.get_or_init(|| Arc::new(RwLock::new(LogFilter::new(true, m64p_level))));

    // A guard so that we don't double-init logging layers.
    static LOGGER: Once = Once::new();

    let mut installed = false;

    LOGGER.call_once(|| {
        let layer = M64pLoggerLayer::new(debug_fn, context, Arc::clone(filter));

        // `try_init` so a host that links two copies of us doesn't bring the process down.
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("Failed to install Mupen64Plus logging layer: {:?}", e);
        }

        installed = true;
    });

    if !installed {
        update(true, m64p_level);
    }
}

/// Updates the shared filter. A no-op before `init` has been called.
pub fn update(is_enabled: bool, m64p_level: c_int) {
    let Some(filter) = LOG_FILTER.get() else {
        return;
    };

    match filter.write() {
        Ok(mut writer) => {
            *writer = LogFilter::new(is_enabled, m64p_level);
        },

        Err(e) => {
            eprintln!("Unable to acquire write lock on `LOG_FILTER`: {:?}", e);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn filter_respects_level_and_enabled_flag() {
        let filter = LogFilter::new(true, M64MSG_WARNING);
        assert!(filter.allows(Level::ERROR));
        assert!(filter.allows(Level::WARN));
        assert!(!filter.allows(Level::INFO));

        let disabled = LogFilter::new(false, M64MSG_VERBOSE);
        assert!(!disabled.allows(Level::ERROR));
    }
}
