use std::ffi::{c_char, c_uint};
use std::ptr;
use std::slice;

use alrdp_plugin::{DpRegisters, GfxInfo, HostAdapter, PluginConfig, PluginContext, ViRegisters};
use m64p_logger::Log;

/// Borrows the context behind `instance_ptr`, or returns `default` for a zero handle.
///
/// This is theoretically safe since the shim on the C side is the only owner of the
/// handle, and creates/destroys it with `alrdp_plugin_init`/`alrdp_plugin_close`.
fn with_context<T>(instance_ptr: usize, default: T, f: impl FnOnce(&PluginContext) -> T) -> T {
    if instance_ptr == 0 {
        tracing::warn!(target: Log::Plugin, "Called without a plugin handle");
        return default;
    }

    let ctx = unsafe { &*(instance_ptr as *const PluginContext) };
    f(ctx)
}

/// Same as `with_context`, for the few calls that need the context mutably.
fn with_context_mut<T>(instance_ptr: usize, default: T, f: impl FnOnce(&mut PluginContext) -> T) -> T {
    if instance_ptr == 0 {
        tracing::warn!(target: Log::Plugin, "Called without a plugin handle");
        return default;
    }

    let ctx = unsafe { &mut *(instance_ptr as *mut PluginContext) };
    f(ctx)
}

/// Creates and leaks a plugin context.
///
/// The shim should call this from `InitiateGFX` with the `GFX_INFO` it was handed. Set
/// `extended_info` only when the core's `GFX_INFO` carries a `version` field (core 2.5.1+).
/// Returns 0 if the host info is unusable; the reason is logged.
///
/// The returned handle should *not* be used after calling `alrdp_plugin_close`.
#[no_mangle]
pub extern "C" fn alrdp_plugin_init(gfx_info: *const GfxInfo, extended_info: bool) -> usize {
    // The shim passes the `GFX_INFO` it got from the core untouched, and the core keeps
    // everything it points at alive until the ROM is closed.
    let host = match unsafe { HostAdapter::from_raw(gfx_info, extended_info) } {
        Ok(host) => host,

        Err(e) => {
            tracing::error!(target: Log::Plugin, error = %e, "Failed to start plugin");
            return 0;
        },
    };

    let config = PluginConfig::from_host(&host);
    let ctx = Box::new(PluginContext::new(host, config));
    let instance_ptr = Box::into_raw(ctx) as usize;

    tracing::debug!(target: Log::Plugin, ptr = instance_ptr, "Created plugin context");

    instance_ptr
}

/// Tells the Rust side that it can safely release the context (and its hidden bits).
#[no_mangle]
pub extern "C" fn alrdp_plugin_close(instance_ptr: usize) {
    if instance_ptr == 0 {
        return;
    }

    tracing::debug!(target: Log::Plugin, ptr = instance_ptr, "Destroying plugin context");

    // Coerce ownership back, then let standard Drop semantics apply.
    unsafe {
        let _ctx = Box::from_raw(instance_ptr as *mut PluginContext);
    }
}

/// Raises the DP interrupt on the host.
#[no_mangle]
pub extern "C" fn alrdp_plugin_sync_dp(instance_ptr: usize) {
    with_context(instance_ptr, (), |ctx| ctx.sync_dp());
}

/// The host's DP registers, valid until `alrdp_plugin_close`.
#[no_mangle]
pub extern "C" fn alrdp_plugin_get_dp_registers(instance_ptr: usize) -> *const DpRegisters {
    with_context(instance_ptr, ptr::null(), |ctx| ctx.dp_registers() as *const DpRegisters)
}

/// The host's VI registers, valid until `alrdp_plugin_close`.
#[no_mangle]
pub extern "C" fn alrdp_plugin_get_vi_registers(instance_ptr: usize) -> *const ViRegisters {
    with_context(instance_ptr, ptr::null(), |ctx| ctx.vi_registers() as *const ViRegisters)
}

/// A single DP register by index, or null if `index` is out of range.
#[no_mangle]
pub extern "C" fn alrdp_plugin_get_dp_register(instance_ptr: usize, index: u32) -> *mut c_uint {
    with_context(instance_ptr, ptr::null_mut(), |ctx| {
        ctx.dp_register(index).unwrap_or_else(|e| {
            tracing::error!(target: Log::Plugin, error = %e, "Invalid register lookup");
            ptr::null_mut()
        })
    })
}

/// A single VI register by index, or null if `index` is out of range.
#[no_mangle]
pub extern "C" fn alrdp_plugin_get_vi_register(instance_ptr: usize, index: u32) -> *mut c_uint {
    with_context(instance_ptr, ptr::null_mut(), |ctx| {
        ctx.vi_register(index).unwrap_or_else(|e| {
            tracing::error!(target: Log::Plugin, error = %e, "Invalid register lookup");
            ptr::null_mut()
        })
    })
}

#[no_mangle]
pub extern "C" fn alrdp_plugin_get_rdram(instance_ptr: usize) -> *mut u8 {
    with_context(instance_ptr, ptr::null_mut(), |ctx| ctx.rdram())
}

#[no_mangle]
pub extern "C" fn alrdp_plugin_get_rdram_hidden(instance_ptr: usize) -> *mut u8 {
    with_context_mut(instance_ptr, ptr::null_mut(), |ctx| ctx.rdram_hidden())
}

#[no_mangle]
pub extern "C" fn alrdp_plugin_get_rdram_size(instance_ptr: usize) -> u32 {
    with_context(instance_ptr, 0, |ctx| ctx.rdram_size())
}

#[no_mangle]
pub extern "C" fn alrdp_plugin_get_dmem(instance_ptr: usize) -> *mut u8 {
    with_context(instance_ptr, ptr::null_mut(), |ctx| ctx.dmem())
}

/// Writes the NUL-terminated cartridge name into `name` and returns its length.
///
/// Returns 0 without touching `name` if `name_size` is below 21 bytes (or `name` is null);
/// callers should retry with a larger buffer.
#[no_mangle]
pub extern "C" fn alrdp_plugin_get_rom_name(instance_ptr: usize, name: *mut c_char, name_size: u32) -> u32 {
    if name.is_null() {
        return 0;
    }

    with_context(instance_ptr, 0, |ctx| {
        // The caller guarantees `name` is writable for `name_size` bytes.
        let out = unsafe { slice::from_raw_parts_mut(name as *mut u8, name_size as usize) };

        match ctx.rom_name(out) {
            Ok(len) => len as u32,

            Err(e) => {
                tracing::debug!(target: Log::Plugin, error = %e, "ROM name not written");
                0
            },
        }
    })
}
