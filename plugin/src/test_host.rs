//! A stand-in for the host core's memory, used by the unit tests.

use std::cell::Cell;
use std::os::raw::c_uint;

use crate::gfx_info::GfxInfo;
use crate::registers::{DpRegister, ViRegister};
use crate::rom_name::{physical_offset, ROM_HEADER_LEN, WORD_SIZE};

thread_local! {
    static CHECK_INTERRUPTS_CALLS: Cell<usize> = Cell::new(0);
}

unsafe extern "C" fn check_interrupts() {
    CHECK_INTERRUPTS_CALLS.with(|calls| calls.set(calls.get() + 1));
}

/// How often `CheckInterrupts` has been called on this thread.
pub fn check_interrupts_calls() -> usize {
    CHECK_INTERRUPTS_CALLS.with(Cell::get)
}

pub struct FakeHost {
    pub header: [u8; ROM_HEADER_LEN],
    pub rdram: Vec<u8>,
    pub dmem: Vec<u8>,
    pub imem: Vec<u8>,
    pub mi_intr: c_uint,
    pub dp: [c_uint; DpRegister::COUNT],
    pub vi: [c_uint; ViRegister::COUNT],
    pub sp_status: c_uint,
    pub rdram_size: c_uint,
}

impl FakeHost {
    /// Builds a header the way the host stores it, with `name` space-padded to 20 bytes.
    pub fn new(name: &[u8], game_id: &[u8; 4]) -> Self {
        let mut logical = [0u8; ROM_HEADER_LEN];
        logical[32..52].fill(b' ');
        logical[32..32 + name.len()].copy_from_slice(name);
        logical[59..63].copy_from_slice(game_id);

        let mut header = [0u8; ROM_HEADER_LEN];
        for (i, byte) in logical.iter().enumerate() {
            header[physical_offset(i, WORD_SIZE)] = *byte;
        }

        Self {
            header,
            rdram: vec![0; 0x1000],
            dmem: vec![0; 0x1000],
            imem: vec![0; 0x1000],
            mi_intr: 0,
            dp: [0; DpRegister::COUNT],
            vi: [0; ViRegister::COUNT],
            sp_status: 0,
            rdram_size: 0,
        }
    }

    pub fn gfx_info(&mut self) -> GfxInfo {
        let [dpc_start, dpc_end, dpc_current, dpc_status, dpc_clock, dpc_bufbusy, dpc_pipebusy, dpc_tmem] =
            self.dp.each_mut();
        let [vi_status, vi_origin, vi_width, vi_intr, vi_current_line, vi_timing, vi_v_sync, vi_h_sync, vi_leap, vi_h_start, vi_v_start, vi_v_burst, vi_x_scale, vi_y_scale] =
            self.vi.each_mut();

        GfxInfo {
            HEADER: self.header.as_mut_ptr(),
            RDRAM: self.rdram.as_mut_ptr(),
            DMEM: self.dmem.as_mut_ptr(),
            IMEM: self.imem.as_mut_ptr(),
            MI_INTR_REG: &mut self.mi_intr,
            DPC_START_REG: dpc_start,
            DPC_END_REG: dpc_end,
            DPC_CURRENT_REG: dpc_current,
            DPC_STATUS_REG: dpc_status,
            DPC_CLOCK_REG: dpc_clock,
            DPC_BUFBUSY_REG: dpc_bufbusy,
            DPC_PIPEBUSY_REG: dpc_pipebusy,
            DPC_TMEM_REG: dpc_tmem,
            VI_STATUS_REG: vi_status,
            VI_ORIGIN_REG: vi_origin,
            VI_WIDTH_REG: vi_width,
            VI_INTR_REG: vi_intr,
            VI_V_CURRENT_LINE_REG: vi_current_line,
            VI_TIMING_REG: vi_timing,
            VI_V_SYNC_REG: vi_v_sync,
            VI_H_SYNC_REG: vi_h_sync,
            VI_LEAP_REG: vi_leap,
            VI_H_START_REG: vi_h_start,
            VI_V_START_REG: vi_v_start,
            VI_V_BURST_REG: vi_v_burst,
            VI_X_SCALE_REG: vi_x_scale,
            VI_Y_SCALE_REG: vi_y_scale,
            CheckInterrupts: Some(check_interrupts),
            version: 0,
            SP_STATUS_REG: &mut self.sp_status,
            RDRAM_SIZE: &self.rdram_size,
        }
    }
}
