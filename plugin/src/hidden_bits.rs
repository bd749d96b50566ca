/// The RDRAM "hidden bits" (the ninth bit of every byte on real hardware), which the RDP
/// core reads for coverage and the host core doesn't expose to video plugins.
///
/// One byte per RDRAM byte, owned by the plugin context and freed along with it.
#[derive(Debug)]
pub struct HiddenBits {
    bits: Box<[u8]>,
}

impl HiddenBits {
    /// Allocates `size` bytes, all set to `fill`.
    pub fn new(size: usize, fill: u8) -> Self {
        tracing::debug!(size, fill, "Allocating RDRAM hidden bits");

        Self {
            bits: vec![fill; size].into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// The pointer the RDP core writes through. Valid for as long as `self` lives.
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.bits.as_mut_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_and_fills() {
        let mut bits = HiddenBits::new(0x1000, 3);
        assert_eq!(bits.len(), 0x1000);
        assert!(bits.as_slice().iter().all(|&b| b == 3));

        let ptr = bits.as_mut_ptr();
        unsafe { *ptr.add(0xFFF) = 1 };
        assert_eq!(bits.as_slice()[0xFFF], 1);
    }
}
