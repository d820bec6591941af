use std::cmp;

/// A half-open byte range `[start, end)` of a buffer.
///
/// Constructed ranges are always ordered (`start <= end`). An empty range
/// marks a position without covering any byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Filerange {
	/// First byte covered by the range.
	pub start: usize,
	/// One past the last byte covered by the range.
	pub end: usize,
}

impl Filerange {
	/// Creates a range spanning `a` and `b`, in either order.
	pub fn new(a: usize, b: usize) -> Self {
		Self {
			start: cmp::min(a, b),
			end: cmp::max(a, b),
		}
	}

	/// Creates an empty range at `pos`.
	pub fn empty_at(pos: usize) -> Self {
		Self { start: pos, end: pos }
	}

	/// Returns the number of bytes covered.
	#[inline]
	pub fn len(&self) -> usize {
		self.end - self.start
	}

	/// Returns true if the range covers no byte.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	/// Returns true if `pos` lies within `[start, end)`.
	#[inline]
	pub fn contains(&self, pos: usize) -> bool {
		self.start <= pos && pos < self.end
	}

	/// Returns true if both ranges share at least one byte.
	pub fn overlaps(&self, other: &Filerange) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Returns true if the ranges share a byte or touch end to start.
	pub fn touches(&self, other: &Filerange) -> bool {
		self.start <= other.end && other.start <= self.end
	}

	/// Returns the smallest range covering both.
	pub fn hull(&self, other: &Filerange) -> Self {
		Self {
			start: cmp::min(self.start, other.start),
			end: cmp::max(self.end, other.end),
		}
	}

	/// Returns the bytes covered by both ranges, if any.
	pub fn intersection(&self, other: &Filerange) -> Option<Self> {
		self.overlaps(other).then(|| Self {
			start: cmp::max(self.start, other.start),
			end: cmp::min(self.end, other.end),
		})
	}

	/// Clamps both ends to `[0, size]`.
	pub fn clamp(&self, size: usize) -> Self {
		Self {
			start: self.start.min(size),
			end: self.end.min(size),
		}
	}
}

impl From<std::ops::Range<usize>> for Filerange {
	fn from(r: std::ops::Range<usize>) -> Self {
		Self::new(r.start, r.end)
	}
}
