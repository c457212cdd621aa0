/*!
# `Chalk` - Encoding Quality.
*/

use std::{
	fmt,
	num::NonZeroU8,
};



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Encoding Quality.
///
/// Quality is tracked in tenths, `1..=10`, i.e. `0.1..=1.0`. Encoders want
/// percentages, so that conversion is provided too.
///
/// Sweeps begin at [`Quality::START`] and step down one tenth at a time until
/// [`Quality::FLOOR`].
pub struct Quality(NonZeroU8);

impl Default for Quality {
	#[inline]
	fn default() -> Self { Self::START }
}

impl fmt::Display for Quality {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let q = self.0.get();
		if q >= 10 { f.write_str("1.0") }
		else { write!(f, "0.{q}") }
	}
}

/// ## Instantiation.
impl Quality {
	/// # Starting Quality (0.8).
	pub const START: Self = Self(unsafe { NonZeroU8::new_unchecked(8) });

	/// # Lowest Quality (0.1).
	pub const FLOOR: Self = Self(unsafe { NonZeroU8::new_unchecked(1) });

	/// # Highest Quality (1.0).
	pub const MAX: Self = Self(unsafe { NonZeroU8::new_unchecked(10) });

	#[must_use]
	/// # New.
	///
	/// Create a quality from tenths, returning `None` if out of range.
	pub const fn new(tenths: u8) -> Option<Self> {
		if 10 < tenths { None }
		else if let Some(q) = NonZeroU8::new(tenths) { Some(Self(q)) }
		else { None }
	}
}

/// ## Getters.
impl Quality {
	#[inline]
	#[must_use]
	/// # Tenths.
	pub const fn tenths(self) -> u8 { self.0.get() }

	#[inline]
	#[must_use]
	/// # Percent.
	///
	/// The equivalent `1..=100` value, as encoders like it.
	pub const fn percent(self) -> u8 { self.0.get() * 10 }

	#[must_use]
	/// # Step Down.
	///
	/// Return the next lower quality, or `None` if this is already the floor.
	pub const fn step_down(self) -> Option<Self> { Self::new(self.0.get() - 1) }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_sweep() {
		let mut all = vec![Quality::START];
		while let Some(q) = all[all.len() - 1].step_down() { all.push(q); }

		assert_eq!(all.len(), 8);
		assert_eq!(all.last(), Some(&Quality::FLOOR));
		assert_eq!(
			all.iter().map(|q| q.percent()).collect::<Vec<_>>(),
			vec![80, 70, 60, 50, 40, 30, 20, 10],
		);
	}

	#[test]
	fn t_new() {
		assert_eq!(Quality::new(0), None);
		assert_eq!(Quality::new(11), None);
		assert_eq!(Quality::new(8), Some(Quality::START));
		assert_eq!(Quality::new(10), Some(Quality::MAX));
	}

	#[test]
	fn t_display() {
		assert_eq!(Quality::START.to_string(), "0.8");
		assert_eq!(Quality::FLOOR.to_string(), "0.1");
		assert_eq!(Quality::MAX.to_string(), "1.0");
	}
}
