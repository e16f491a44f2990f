//! Segmented write-once memory
//!
//! Memory is a list of independently growing segments. Cells are addressed by
//! [`Relocatable`] and hold either a field element or another address. A cell
//! can be written exactly once; reading a cell nobody wrote is an error.

use crate::error::MemoryError;
use hintvm_core::{Felt, MemoryValue, Relocatable};
use std::collections::HashMap;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, MemoryError>;

/// Written cells of one segment, keyed by offset
#[derive(Debug, Clone, Default)]
struct Segment {
    cells: HashMap<u64, MemoryValue>,
    /// One past the highest written offset
    len: u64,
}

#[derive(Debug, Clone)]
pub struct Memory {
    segments: Vec<Segment>,
    max_segments: usize,
}

impl Memory {
    pub fn new(max_segments: usize) -> Self {
        Memory {
            segments: Vec::new(),
            max_segments,
        }
    }

    /// Add an empty segment and return its base address
    pub fn allocate_segment(&mut self) -> Result<Relocatable> {
        if self.segments.len() >= self.max_segments {
            return Err(MemoryError::SegmentLimitExceeded {
                limit: self.max_segments,
            });
        }
        self.segments.push(Segment::default());
        let base = Relocatable::new(self.segments.len() - 1, 0);
        debug!("allocated segment {}", base.segment_index);
        Ok(base)
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// One past the highest written offset of a segment
    pub fn segment_len(&self, segment_index: usize) -> Result<u64> {
        self.segment(segment_index).map(|segment| segment.len)
    }

    /// Cell content, or `None` when the cell is unset or the segment unknown
    pub fn peek(&self, address: Relocatable) -> Option<&MemoryValue> {
        self.segments
            .get(address.segment_index)
            .and_then(|segment| segment.cells.get(&address.offset))
    }

    pub fn read(&self, address: Relocatable) -> Result<MemoryValue> {
        self.segment(address.segment_index)?
            .cells
            .get(&address.offset)
            .cloned()
            .ok_or(MemoryError::UnsetCell(address))
    }

    pub fn read_felt(&self, address: Relocatable) -> Result<Felt> {
        let value = self.read(address)?;
        Ok(value.as_felt()?.clone())
    }

    pub fn read_address(&self, address: Relocatable) -> Result<Relocatable> {
        Ok(self.read(address)?.as_address()?)
    }

    /// Write a cell that has not been written before
    pub fn write(&mut self, address: Relocatable, value: impl Into<MemoryValue>) -> Result<()> {
        let value = value.into();
        let end = address
            .offset
            .checked_add(1)
            .ok_or(MemoryError::OutOfBounds(address))?;
        let segment = self
            .segments
            .get_mut(address.segment_index)
            .ok_or(MemoryError::UnknownSegment(address.segment_index))?;

        if let Some(existing) = segment.cells.get(&address.offset) {
            return Err(MemoryError::WriteOnceViolation {
                address,
                existing: existing.clone(),
                attempted: value,
            });
        }

        trace!("write {} <- {}", address, value);
        segment.cells.insert(address.offset, value);
        segment.len = segment.len.max(end);
        Ok(())
    }

    /// Write consecutive cells starting at `start`, returning the address past the last one
    ///
    /// Stops at the first failing cell; cells written before it stay written.
    pub fn write_range<I>(&mut self, start: Relocatable, values: I) -> Result<Relocatable>
    where
        I: IntoIterator,
        I::Item: Into<MemoryValue>,
    {
        let mut address = start;
        for value in values {
            self.write(address, value)?;
            address = address.add_usize(1)?;
        }
        Ok(address)
    }

    fn segment(&self, segment_index: usize) -> Result<&Segment> {
        self.segments
            .get(segment_index)
            .ok_or(MemoryError::UnknownSegment(segment_index))
    }
}
