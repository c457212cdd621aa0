/*!
# `Chalk` - Source Image
*/

use crate::{
	ChalkError,
	MediaType,
	OutputKind,
};
use std::{
	fmt,
	ops::Deref,
	path::Path,
};



#[derive(Clone)]
/// # Source Image.
///
/// This holds the raw (undecoded) bytes of a user-selected image along with
/// the media type it was declared as. The declared type only decides the
/// output format; see [`OutputKind`].
///
/// Both `AsRef<[u8]>` and `Deref` are implemented to provide access to the
/// raw bytes.
///
/// ## Examples
///
/// ```no_run
/// use chalk_core::Source;
/// use std::path::Path;
///
/// let src = Source::try_from(Path::new("/path/to/my.png")).unwrap();
/// ```
pub struct Source {
	raw: Vec<u8>,
	media: MediaType,
}

impl AsRef<[u8]> for Source {
	#[inline]
	fn as_ref(&self) -> &[u8] { self }
}

impl fmt::Debug for Source {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Source")
			.field("media", &self.media)
			.field("size", &self.raw.len())
			.finish()
	}
}

impl Deref for Source {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &Self::Target { &self.raw }
}

impl TryFrom<&Path> for Source {
	type Error = ChalkError;

	/// # From Path.
	///
	/// Read the file, guessing its declared type from the extension.
	///
	/// ## Errors
	///
	/// An unreadable or empty file is a [`ChalkError::Read`].
	fn try_from(src: &Path) -> Result<Self, Self::Error> {
		let media = MediaType::from(src);
		let raw = std::fs::read(src).map_err(|_| ChalkError::Read)?;
		if raw.is_empty() { Err(ChalkError::Read) }
		else { Ok(Self::new(raw, media)) }
	}
}

/// ## Instantiation.
impl Source {
	#[inline]
	#[must_use]
	/// # New.
	pub const fn new(raw: Vec<u8>, media: MediaType) -> Self {
		Self { raw, media }
	}

	#[must_use]
	/// # From Declared Type.
	///
	/// Same as [`Source::new`], but with the media type given as a MIME
	/// string, e.g. `"image/png"`. Any string is accepted.
	pub fn from_declared(raw: Vec<u8>, media: &str) -> Self {
		Self::new(raw, MediaType::from(media))
	}
}

/// ## Getters.
impl Source {
	#[inline]
	#[must_use]
	/// # Raw Bytes.
	pub fn raw(&self) -> &[u8] { &self.raw }

	#[inline]
	#[must_use]
	/// # Declared Media Type.
	pub const fn media(&self) -> MediaType { self.media }

	#[inline]
	#[must_use]
	/// # Output Kind.
	///
	/// The format this source will be encoded as.
	pub fn output_kind(&self) -> OutputKind { OutputKind::from(self.media) }
}
