//! This module implements a custom `tracing_subscriber::Layer` that facilitates
//! routing logs through the Mupen64Plus debug callback.

use std::ffi::CString;
use std::fmt::Write;
use std::os::raw::{c_char, c_int, c_void};
use std::sync::{Arc, RwLock};

use tracing::Level;
use tracing_subscriber::Layer;

use super::LogFilter;

/// Corresponds to Mupen64Plus' `M64MSG_ERROR` value.
pub const M64MSG_ERROR: c_int = 1;

/// Corresponds to Mupen64Plus' `M64MSG_WARNING` value.
pub const M64MSG_WARNING: c_int = 2;

/// Corresponds to Mupen64Plus' `M64MSG_INFO` value.
pub const M64MSG_INFO: c_int = 3;

/// Corresponds to Mupen64Plus' `M64MSG_STATUS` value.
pub const M64MSG_STATUS: c_int = 4;

/// Corresponds to Mupen64Plus' `M64MSG_VERBOSE` value.
pub const M64MSG_VERBOSE: c_int = 5;

/// A helper method for converting Mupen64Plus levels to a `tracing::Level`.
///
/// `STATUS` has no tracing counterpart and is treated as `INFO`.
pub fn convert_m64p_level_to_tracing_level(level: c_int) -> Level {
    match level {
        M64MSG_ERROR => Level::ERROR,
        M64MSG_WARNING => Level::WARN,
        M64MSG_INFO | M64MSG_STATUS => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// The inverse of `convert_m64p_level_to_tracing_level`, used when forwarding events.
pub fn convert_tracing_level_to_m64p_level(level: Level) -> c_int {
    match level {
        Level::ERROR => M64MSG_ERROR,
        Level::WARN => M64MSG_WARNING,
        Level::INFO => M64MSG_INFO,
        Level::DEBUG | Level::TRACE => M64MSG_VERBOSE,
    }
}

/// A type that mirrors the `DebugCallback` handed to plugins in `PluginStartup`; because the
/// library exists as a dylib, it can't depend on any functions from the host application - but
/// we _can_ be handed a hook/callback fn.
///
/// This should correspond to:
///
/// ```c
/// void DebugCallback(void *Context, int level, const char *message);
/// ```
pub type ForeignDebugFn = unsafe extern "C" fn(*mut c_void, c_int, *const c_char);

/// A custom tracing layer that forwards events back into the host's debug callback.
///
/// This implements `tracing_subscriber::Layer` and is the default way to log in this library.
#[derive(Debug)]
pub struct M64pLoggerLayer {
    debug_fn: ForeignDebugFn,

    // Held as an address so the layer stays `Send + Sync`; it's only ever handed back to
    // the host, never dereferenced on our side.
    context: usize,

    filter: Arc<RwLock<LogFilter>>,
}

impl M64pLoggerLayer {
    /// Creates and returns a new logger layer.
    pub fn new(debug_fn: ForeignDebugFn, context: *mut c_void, filter: Arc<RwLock<LogFilter>>) -> Self {
        Self {
            debug_fn,
            context: context as usize,
            filter,
        }
    }
}

impl<S> Layer<S> for M64pLoggerLayer
where
    S: tracing::Subscriber,
{
    /// Unpacks a tracing event and routes it to the host debug callback.
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let metadata = event.metadata();
        let level = *metadata.level();

        // Check the filter before allocating anything for the message.
        match self.filter.read() {
            Ok(filter) if filter.allows(level) => {},
            Ok(_) => return,

            Err(e) => {
                eprintln!("Unable to acquire read lock on log filter: {:?}", e);
                return;
            },
        }

        let mut visitor = M64pLoggerVisitor::new(metadata.target());
        event.record(&mut visitor);

        match CString::new(visitor.0) {
            Ok(c_str_msg) => unsafe {
                (self.debug_fn)(
                    self.context as *mut c_void,
                    convert_tracing_level_to_m64p_level(level),
                    c_str_msg.as_ptr() as *const c_char,
                );
            },

            // This should never happen, but on the off chance it does, just dump it
            // to stderr.
            Err(e) => {
                eprintln!("Failed to convert log msg to CString: {:?}", e);
            },
        }
    }
}

/// Builds the single line of text Mupen64Plus expects per message.
///
/// The `message` field is written first and verbatim; every other field is appended
/// as `name=value`.
#[derive(Debug)]
struct M64pLoggerVisitor(String);

impl M64pLoggerVisitor {
    /// Creates a visitor whose output starts with a `[target]` prefix.
    fn new(target: &str) -> Self {
        Self(format!("[{}] ", target))
    }

    fn push(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Display) {
        let result = match field.name() {
            "message" => write!(&mut self.0, "{} ", value),
            name => write!(&mut self.0, "{}={} ", name, value),
        };

        if let Err(e) = result {
            eprintln!("Failed to record field {}: {:?}", field.name(), e);
        }
    }
}

impl tracing::field::Visit for M64pLoggerVisitor {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.push(field, &value);
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.push(field, &value);
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.push(field, &value);
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.push(field, &value);
    }

    fn record_error(&mut self, field: &tracing::field::Field, value: &(dyn std::error::Error + 'static)) {
        self.push(field, &value);
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.push(field, &format_args!("{:?}", value));
    }
}
