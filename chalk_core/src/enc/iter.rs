/*!
# `Chalk` - Encoding Iterator.
*/

use crate::{
	ChalkError,
	MAX_ENCODED_LEN,
	Output,
	OutputKind,
	Quality,
	Raster,
};
use std::time::{
	Duration,
	Instant,
};



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Encoding Attempt.
///
/// A record of one pass through the encoder: the quality used and the
/// resulting data URI length.
pub struct Attempt {
	/// # Quality.
	pub quality: Quality,

	/// # URI Length.
	pub len: usize,
}



#[derive(Debug)]
/// # Encoding Iterator.
///
/// This is a guided encoding "iterator" produced by providing a [`Raster`]
/// and an [`OutputKind`].
///
/// Each call to [`EncodeIter::advance`] encodes the raster once, starting at
/// [`Quality::START`] and stepping down a tenth per call, until a result fits
/// under the length cap or [`Quality::FLOOR`] has been tried. Every image
/// therefore sees between one and eight attempts.
///
/// Once iteration has finished, the history can be collected via
/// [`EncodeIter::attempts`] and [`EncodeIter::time`], and the accepted
/// [`Output`] obtained by calling [`EncodeIter::take`].
pub struct EncodeIter<'a> {
	src: &'a Raster,
	kind: OutputKind,
	limit: usize,

	next: Option<Quality>,
	candidate: Option<Output>,
	attempts: Vec<Attempt>,

	time: Duration,
}

/// ## Instantiation.
impl<'a> EncodeIter<'a> {
	#[must_use]
	/// # New.
	///
	/// Start a new iterator given a raster and output format, capped at
	/// [`MAX_ENCODED_LEN`](crate::MAX_ENCODED_LEN).
	pub fn new(src: &'a Raster, kind: OutputKind) -> Self {
		Self::with_limit(src, kind, MAX_ENCODED_LEN)
	}

	#[must_use]
	/// # New (Custom Cap).
	pub(crate) fn with_limit(src: &'a Raster, kind: OutputKind, limit: usize) -> Self {
		Self {
			src,
			kind,
			limit,

			next: Some(Quality::START),
			candidate: None,
			attempts: Vec::with_capacity(8),

			time: Duration::from_secs(0),
		}
	}
}

/// ## Getters.
impl EncodeIter<'_> {
	#[inline]
	#[must_use]
	/// # Attempts.
	///
	/// This returns the quality and length of every encoding pass so far, in
	/// order.
	pub fn attempts(&self) -> &[Attempt] { &self.attempts }

	#[inline]
	#[must_use]
	/// # Candidate.
	///
	/// This returns a reference to the most recent candidate image, if any.
	pub const fn candidate(&self) -> Option<&Output> { self.candidate.as_ref() }

	#[inline]
	#[must_use]
	/// # Is Done?
	///
	/// Returns `true` once a candidate fits or the quality floor has been
	/// reached.
	pub fn is_done(&self) -> bool {
		self.next.is_none() ||
		self.candidate.as_ref().is_some_and(|c| c.fits(self.limit))
	}

	#[inline]
	#[must_use]
	/// # Output Kind.
	pub const fn kind(&self) -> OutputKind { self.kind }

	#[inline]
	#[must_use]
	/// # Computation Time.
	///
	/// This method returns the total amount of time spent encoding.
	pub const fn time(&self) -> Duration { self.time }

	/// # Take the Result!
	///
	/// Consume the iterator, running any remaining steps, and return the
	/// candidate if it fits.
	///
	/// ## Errors
	///
	/// Encoder errors are passed through. If even the lowest quality is over
	/// the cap, [`ChalkError::TooBig`] is returned.
	pub fn take(mut self) -> Result<Output, ChalkError> {
		while self.advance()?.is_some() {}

		match self.candidate {
			Some(c) if c.fits(self.limit) => {
				log::info!(
					"Accepted {} at quality {} ({} characters).",
					c.kind(),
					c.quality(),
					c.len(),
				);
				Ok(c)
			},
			_ => {
				log::info!(
					"Rejected {}: still over {} characters after {} attempts.",
					self.kind,
					self.limit,
					self.attempts.len(),
				);
				Err(ChalkError::TooBig)
			},
		}
	}
}

/// ## Encoding.
impl EncodeIter<'_> {
	/// # Crunch the Next Quality!
	///
	/// This is the tick method for the "iterator". Each call encodes the
	/// raster at the next quality, returning a reference to the result, or
	/// `None` once there is nothing left to do.
	///
	/// ## Errors
	///
	/// Encoder errors are passed straight through; there are no retries.
	pub fn advance(&mut self) -> Result<Option<&Output>, ChalkError> {
		if self.is_done() { return Ok(None); }
		let Some(quality) = self.next else { return Ok(None); };

		// Start a timer.
		let now = Instant::now();
		let res = self.kind.encode(self.src, quality)
			.and_then(|raw| Output::new(
				&raw,
				self.kind,
				quality,
				self.src.width(),
				self.src.height(),
			));
		self.time += now.elapsed();

		let out = res?;
		let len = out.len();
		log::debug!("{} at quality {quality}: {len} characters.", self.kind);

		self.attempts.push(Attempt { quality, len });
		self.next = quality.step_down();
		self.candidate = Some(out);

		Ok(self.candidate.as_ref())
	}
}
