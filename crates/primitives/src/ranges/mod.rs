//! Set algebra over selection range lists.
//!
//! Inputs are slices of [`Filerange`] sorted by start. Every function returns
//! a sorted list of non-empty, pairwise disjoint ranges. Empty input ranges
//! cover no bytes and are ignored.

use crate::range::Filerange;


/// Merges two sorted lists into one, joining ranges that overlap or touch.
///
/// Classic two-stream interval merge: the range with the smaller start is
/// folded into a running accumulator until the next one no longer touches it.
pub fn union(a: &[Filerange], b: &[Filerange]) -> Vec<Filerange> {
	let mut a = a.iter().filter(|r| !r.is_empty()).peekable();
	let mut b = b.iter().filter(|r| !r.is_empty()).peekable();
	let mut out = Vec::new();
	let mut cur: Option<Filerange> = None;

	loop {
		let next = match (a.peek(), b.peek()) {
			(None, None) => break,
			(Some(_), None) => a.next(),
			(None, Some(_)) => b.next(),
			(Some(r1), Some(r2)) => {
				if r1.start <= r2.start {
					a.next()
				} else {
					b.next()
				}
			}
		};
		let Some(&next) = next else { break };
		cur = match cur {
			Some(c) if c.touches(&next) => Some(c.hull(&next)),
			Some(c) => {
				out.push(c);
				Some(next)
			}
			None => Some(next),
		};
	}

	out.extend(cur);
	out
}

/// Returns the bytes covered by both lists.
///
/// Twin-pointer scan: whichever range ends first is advanced.
pub fn intersect(a: &[Filerange], b: &[Filerange]) -> Vec<Filerange> {
	let mut out = Vec::new();
	let (mut i, mut j) = (0, 0);
	while let (Some(r1), Some(r2)) = (a.get(i), b.get(j)) {
		if let Some(common) = r1.intersection(r2) {
			out.push(common);
		}
		if r1.end < r2.end {
			i += 1;
		} else {
			j += 1;
		}
	}
	out
}

/// Returns the gaps of `a` within `universe`.
///
/// The complement of an empty list is the whole universe.
pub fn complement(a: &[Filerange], universe: Filerange) -> Vec<Filerange> {
	let mut out = Vec::new();
	let mut pos = universe.start;
	for r in a.iter().filter(|r| !r.is_empty()) {
		let start = r.start.clamp(universe.start, universe.end);
		if pos < start {
			out.push(Filerange::new(pos, start));
		}
		pos = pos.max(r.end.min(universe.end));
	}
	if pos < universe.end {
		out.push(Filerange::new(pos, universe.end));
	}
	out
}

/// Returns the bytes of `a` not covered by `b`.
///
/// Defined as `intersect(a, complement(b, universe))`, so `universe` must
/// cover `a`.
pub fn minus(a: &[Filerange], b: &[Filerange], universe: Filerange) -> Vec<Filerange> {
	intersect(a, &complement(b, universe))
}
