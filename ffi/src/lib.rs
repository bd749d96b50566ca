//! This library is the C interface of the angrylion RDP plugin's Mupen64Plus adapter, and
//! consists predominantly of FFI bridging functions that the video plugin shim calls.
//!
//! This library auto-generates C headers on build, and the plugin build is pre-configured
//! to locate these headers and link the dylib.

use std::ffi::{c_char, c_int, c_void};

pub mod api;
pub use api::{plugin_mupen64plus, PluginApi};

pub mod plugin;

/// This should be called from `PluginStartup` to ensure that all logging on the Rust side
/// is routed through the core's debug callback.
///
/// For more information, consult `m64p_logger::init`.
///
/// Note that `debug_fn` cannot be type-aliased here, otherwise cbindgen will
/// mess up the header output. That said, the function type represents:
///
/// ```c
/// void DebugCallback(void *Context, int level, const char *message);
/// ```
#[no_mangle]
pub extern "C" fn alrdp_logging_init(
    debug_fn: unsafe extern "C" fn(*mut c_void, c_int, *const c_char),
    context: *mut c_void,
    level: c_int,
) {
    m64p_logger::init(debug_fn, context, level);
}

/// Enables/disables forwarding and sets the most verbose `M64MSG_*` level that still
/// reaches the debug callback.
#[no_mangle]
pub extern "C" fn alrdp_logging_update(is_enabled: bool, level: c_int) {
    m64p_logger::update(is_enabled, level);
}
