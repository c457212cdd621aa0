/*!
# `Chalk` - Encoded Output.
*/

use base64::{
	Engine,
	engine::general_purpose::STANDARD,
};
use crate::{
	ChalkError,
	ImageKind,
	OutputKind,
	Quality,
};
use std::{
	fmt,
	ops::Deref,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Encoded Output.
///
/// This holds an encoded image as a complete `data:` URI, along with the
/// format, quality, and dimensions used to produce it.
///
/// Both `AsRef<str>` and `Deref` are implemented to provide access to the
/// URI itself. Its length is measured in characters, which is what the
/// storage cap cares about.
///
/// Instances are only created by [`EncodeIter`](crate::EncodeIter).
pub struct Output {
	uri: String,
	kind: OutputKind,
	quality: Quality,
	width: u32,
	height: u32,
}

impl AsRef<str> for Output {
	#[inline]
	fn as_ref(&self) -> &str { self }
}

impl Deref for Output {
	type Target = str;

	#[inline]
	fn deref(&self) -> &Self::Target { &self.uri }
}

impl fmt::Display for Output {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.uri)
	}
}

impl From<Output> for String {
	#[inline]
	fn from(src: Output) -> Self { src.uri }
}

/// ## Instantiation.
impl Output {
	/// # New.
	///
	/// Wrap freshly encoded bytes into a data URI.
	///
	/// ## Errors
	///
	/// The bytes are double-checked against the expected format before
	/// anything is built; empty or mismatched data is an encoding error.
	pub(crate) fn new(
		raw: &[u8],
		kind: OutputKind,
		quality: Quality,
		width: u32,
		height: u32,
	) -> Result<Self, ChalkError> {
		if ImageKind::try_from(raw).ok() != Some(kind.image_kind()) {
			return Err(ChalkError::Encode);
		}

		let mime = kind.mime();
		let mut uri = String::with_capacity(mime.len() + 13 + base64::encoded_len(raw.len(), true).unwrap_or(0));
		uri.push_str("data:");
		uri.push_str(mime);
		uri.push_str(";base64,");
		STANDARD.encode_string(raw, &mut uri);

		Ok(Self { uri, kind, quality, width, height })
	}
}

/// ## Getters.
impl Output {
	#[inline]
	#[must_use]
	/// # Length.
	///
	/// The length of the URI, in characters. (It is all ASCII, so this is
	/// the byte length too.)
	pub fn len(&self) -> usize { self.uri.len() }

	#[inline]
	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.uri.is_empty() }

	#[inline]
	#[must_use]
	/// # Fits?
	///
	/// Returns `true` if the URI is no longer than `limit`.
	pub fn fits(&self, limit: usize) -> bool { self.uri.len() <= limit }

	#[inline]
	#[must_use]
	/// # Kind.
	pub const fn kind(&self) -> OutputKind { self.kind }

	#[inline]
	#[must_use]
	/// # Quality.
	pub const fn quality(&self) -> Quality { self.quality }

	#[inline]
	#[must_use]
	/// # Width.
	pub const fn width(&self) -> u32 { self.width }

	#[inline]
	#[must_use]
	/// # Height.
	pub const fn height(&self) -> u32 { self.height }

	#[inline]
	#[must_use]
	/// # Media Type.
	pub const fn mime(&self) -> &'static str { self.kind.mime() }

	#[inline]
	#[must_use]
	/// # Into String.
	///
	/// Consume the instance, returning the URI.
	pub fn into_string(self) -> String { self.uri }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_uri() {
		let mut raw = vec![0xFF, 0xD8, 0xFF, 0xE0];
		raw.resize(20, 7);

		let out = Output::new(&raw, OutputKind::Jpeg, Quality::START, 3, 4)
			.expect("Output failed.");
		assert!(out.starts_with("data:image/jpeg;base64,/9j/4A"));
		assert_eq!(out.len(), "data:image/jpeg;base64,".len() + 28);
		assert!(out.fits(out.len()));
		assert!(! out.fits(out.len() - 1));
		assert_eq!((out.width(), out.height()), (3, 4));

		// The payload decodes back to the original bytes.
		let payload = out.split_once(',').map(|(_, b)| b).expect("No payload.");
		assert_eq!(STANDARD.decode(payload).expect("Bad base64."), raw);
	}

	#[test]
	fn t_mismatch() {
		let mut raw = vec![0xFF, 0xD8, 0xFF, 0xE0];
		raw.resize(20, 7);
		assert_eq!(
			Output::new(&raw, OutputKind::Webp, Quality::START, 3, 4),
			Err(ChalkError::Encode),
		);
		assert_eq!(
			Output::new(&[], OutputKind::Jpeg, Quality::START, 3, 4),
			Err(ChalkError::Encode),
		);
	}
}
