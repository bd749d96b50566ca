//! The capability table the RDP core pulls everything host-related from.

use std::ffi::{c_char, c_uint};

use alrdp_plugin::{DpRegisters, GfxInfo, ViRegisters};
use m64p_logger::Log;

use crate::plugin::*;

/// Function pointers the RDP core calls into. Every entry except `init` takes the handle
/// `init` returned.
#[repr(C)]
#[derive(Debug, Default)]
pub struct PluginApi {
    pub init: Option<extern "C" fn(*const GfxInfo, bool) -> usize>,
    pub sync_dp: Option<extern "C" fn(usize)>,
    pub get_dp_registers: Option<extern "C" fn(usize) -> *const DpRegisters>,
    pub get_vi_registers: Option<extern "C" fn(usize) -> *const ViRegisters>,
    pub get_dp_register: Option<extern "C" fn(usize, u32) -> *mut c_uint>,
    pub get_vi_register: Option<extern "C" fn(usize, u32) -> *mut c_uint>,
    pub get_rdram: Option<extern "C" fn(usize) -> *mut u8>,
    pub get_rdram_hidden: Option<extern "C" fn(usize) -> *mut u8>,
    pub get_rdram_size: Option<extern "C" fn(usize) -> u32>,
    pub get_dmem: Option<extern "C" fn(usize) -> *mut u8>,
    pub get_rom_name: Option<extern "C" fn(usize, *mut c_char, u32) -> u32>,
    pub close: Option<extern "C" fn(usize)>,
}

/// Registers the Mupen64Plus adapter by filling in every entry of `api`.
#[no_mangle]
pub extern "C" fn plugin_mupen64plus(api: *mut PluginApi) {
    if api.is_null() {
        tracing::error!(target: Log::Plugin, "plugin_mupen64plus called with a null table");
        return;
    }

    // The RDP core owns the table and only hands us a pointer to fill it in.
    let api = unsafe { &mut *api };

    api.init = Some(alrdp_plugin_init);
    api.sync_dp = Some(alrdp_plugin_sync_dp);
    api.get_dp_registers = Some(alrdp_plugin_get_dp_registers);
    api.get_vi_registers = Some(alrdp_plugin_get_vi_registers);
    api.get_dp_register = Some(alrdp_plugin_get_dp_register);
    api.get_vi_register = Some(alrdp_plugin_get_vi_register);
    api.get_rdram = Some(alrdp_plugin_get_rdram);
    api.get_rdram_hidden = Some(alrdp_plugin_get_rdram_hidden);
    api.get_rdram_size = Some(alrdp_plugin_get_rdram_size);
    api.get_dmem = Some(alrdp_plugin_get_dmem);
    api.get_rom_name = Some(alrdp_plugin_get_rom_name);
    api.close = Some(alrdp_plugin_close);
}
