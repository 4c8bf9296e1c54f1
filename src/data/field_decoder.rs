use super::bitset::Bitset;
use crate::error::{BitgenesError, Result};

/// Reads a bitset as a sequence of unsigned fields.
///
/// The format is an ordered list of field widths in bits. Each field is read
/// least significant bit first from its own sub-range, so `[3, 5]` decodes
/// bits `0..3` and `3..8` of an 8-bit bitset into two integers.
#[derive(Debug, Clone, Default)]
pub struct FieldDecoder {
    widths: Vec<usize>,
    total_width: usize,
}

impl FieldDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(widths: &[usize]) -> Result<Self> {
        let mut decoder = Self::new();
        decoder.set_format(widths)?;
        Ok(decoder)
    }

    /// Replace the field widths. Every width must fit in a `u64`.
    pub fn set_format(&mut self, widths: &[usize]) -> Result<()> {
        if let Some(&width) = widths.iter().find(|&&w| w > 64) {
            return Err(BitgenesError::FieldTooWide { width });
        }
        self.widths = widths.to_vec();
        self.total_width = widths.iter().sum();
        Ok(())
    }

    pub fn widths(&self) -> &[usize] {
        &self.widths
    }

    /// The only bitset size `decode` accepts.
    pub fn total_width(&self) -> usize {
        self.total_width
    }

    pub fn decode(&self, bits: &Bitset) -> Result<Vec<u64>> {
        if bits.size() != self.total_width {
            return Err(BitgenesError::FormatMismatch {
                expected: self.total_width,
                actual: bits.size(),
            });
        }

        let mut offset = 0;
        let mut fields = Vec::with_capacity(self.widths.len());
        for &width in &self.widths {
            fields.push(bits.slice(offset, width)?.to_u64()?);
            offset += width;
        }
        Ok(fields)
    }
}
