use crate::adapter::HostAdapter;

/// RDRAM size assumed when the host doesn't report one (the expansion pak size).
pub const DEFAULT_RDRAM_SIZE: u32 = 0x80_0000;

/// Initial value of every hidden-bits byte.
pub const DEFAULT_HIDDEN_BITS_FILL: u8 = 3;

/// Settings a `PluginContext` is created with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PluginConfig {
    pub rdram_size: u32,
    pub hidden_bits_fill: u8,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            rdram_size: DEFAULT_RDRAM_SIZE,
            hidden_bits_fill: DEFAULT_HIDDEN_BITS_FILL,
        }
    }
}

impl PluginConfig {
    /// Derives the configuration from what the host reports.
    pub fn from_host(host: &HostAdapter) -> Self {
        let mut config = Self::default();

        if let Some(size) = host.reported_rdram_size() {
            config.rdram_size = size;
        }

        config
    }
}
