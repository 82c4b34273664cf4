use crate::error::ViewError;

/// A zero-copy view of a contiguous sub-range of a backing slice
///
/// Similar to taking a sub-slice, but the window remembers where it sits in
/// the original storage, so local indices can be translated back to absolute
/// ones. The cache uses this to operate on the ways of one set in place,
/// without copying the per-way arrays on every access
///
/// All reads and writes go straight through to the backing slice. The window
/// is a plain mutable borrow, so it cannot outlive the storage it views
pub struct Window<'a, T> {
    backing: &'a mut [T],
    start: usize,
    end: usize,
}

impl<'a, T> Window<'a, T> {
    /// Creates a window over `[start, end)` of the backing slice
    ///
    /// `end` is clamped to the backing length, and `start` to at most `end`,
    /// so a window never escapes the storage bounds
    pub fn new(backing: &'a mut [T], start: usize, end: usize) -> Self {
        let end = end.min(backing.len());
        let start = start.min(end);
        Self { backing, start, end }
    }

    /// Creates a window spanning the whole backing slice
    pub fn full(backing: &'a mut [T]) -> Self {
        let end = backing.len();
        Self { backing, start: 0, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Translates a local index to an absolute index into the backing slice
    ///
    /// Negative indices count from the window's end, as in `[-1]` for the
    /// last element. A translation landing outside `[start, end)` is an
    /// out-of-range error
    pub fn to_absolute(&self, local: isize) -> Result<usize, ViewError> {
        let absolute = if local < 0 {
            self.end as isize + local
        } else {
            self.start as isize + local
        };
        if absolute < self.start as isize || absolute >= self.end as isize {
            return Err(ViewError::OutOfRange {
                local,
                len: self.len(),
            });
        }
        Ok(absolute as usize)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.backing[self.start..self.end].iter()
    }
}

impl<'a, T: Copy> Window<'a, T> {
    pub fn get(&self, local: isize) -> Result<T, ViewError> {
        Ok(self.backing[self.to_absolute(local)?])
    }

    /// Writes through to the backing slice immediately, nothing is buffered
    pub fn set(&mut self, local: isize, value: T) -> Result<(), ViewError> {
        let absolute = self.to_absolute(local)?;
        self.backing[absolute] = value;
        Ok(())
    }
}

impl<'a, T: PartialEq> Window<'a, T> {
    /// Linear scan within the window
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|element| element == value)
    }

    /// Returns the first local index holding `value`
    pub fn index_of(&self, value: &T) -> Result<usize, ViewError> {
        self.iter()
            .position(|element| element == value)
            .ok_or(ViewError::NotFound)
    }
}
