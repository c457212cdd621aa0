/*!
# `Chalk` - Bitmaps and Rasters
*/

use crate::{
	ChalkError,
	ImageKind,
	MAX_DIMENSION,
};
use fast_image_resize::{
	FilterType,
	PixelType,
	ResizeAlg,
	ResizeOptions,
	Resizer,
	images::{
		Image,
		ImageRef,
	},
};
use std::{
	fmt,
	num::NonZeroU32,
	ops::Deref,
};



#[derive(Clone)]
/// # Decoded Bitmap.
///
/// This holds the full-size RGBA pixels of a decoded source image. It is
/// created from the raw file bytes via `TryFrom<&[u8]>`, which picks a
/// decoder based on the payload's magic headers.
///
/// ## Examples
///
/// ```no_run
/// use chalk_core::Bitmap;
///
/// let raw = std::fs::read("/path/to/my.jpg").unwrap();
/// let img = Bitmap::try_from(raw.as_slice()).unwrap();
/// ```
pub struct Bitmap {
	pixels: Vec<u8>,
	width: NonZeroU32,
	height: NonZeroU32,
	kind: ImageKind,
}

impl AsRef<[u8]> for Bitmap {
	#[inline]
	fn as_ref(&self) -> &[u8] { self }
}

impl fmt::Debug for Bitmap {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Bitmap")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

impl Deref for Bitmap {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &Self::Target { &self.pixels }
}

impl TryFrom<&[u8]> for Bitmap {
	type Error = ChalkError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		let (kind, (pixels, width, height)) = ImageKind::decode(src)?;
		let width = NonZeroU32::new(width).ok_or(ChalkError::Decode)?;
		let height = NonZeroU32::new(height).ok_or(ChalkError::Decode)?;

		Ok(Self { pixels, width, height, kind })
	}
}

/// ## Getters.
impl Bitmap {
	#[inline]
	#[must_use]
	/// # Width.
	pub const fn width(&self) -> u32 { self.width.get() }

	#[inline]
	#[must_use]
	/// # Height.
	pub const fn height(&self) -> u32 { self.height.get() }

	#[inline]
	#[must_use]
	/// # Source Kind.
	///
	/// This returns the format the pixels were decoded from.
	pub const fn kind(&self) -> ImageKind { self.kind }
}



#[derive(Clone, Eq, PartialEq)]
/// # Raster.
///
/// This is the drawing surface images are encoded from: an RGBA buffer whose
/// longer side never exceeds [`MAX_DIMENSION`](crate::MAX_DIMENSION).
///
/// Every raster owns its own freshly allocated buffer; nothing is shared
/// between calls.
pub struct Raster {
	pixels: Vec<u8>,
	width: NonZeroU32,
	height: NonZeroU32,
}

impl AsRef<[u8]> for Raster {
	#[inline]
	fn as_ref(&self) -> &[u8] { self }
}

impl fmt::Debug for Raster {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Raster")
			.field("width", &self.width)
			.field("height", &self.height)
			.finish_non_exhaustive()
	}
}

impl Deref for Raster {
	type Target = [u8];

	#[inline]
	fn deref(&self) -> &Self::Target { &self.pixels }
}

impl TryFrom<&Bitmap> for Raster {
	type Error = ChalkError;

	#[inline]
	fn try_from(src: &Bitmap) -> Result<Self, Self::Error> {
		Self::fit(src, MAX_DIMENSION)
	}
}

/// ## Instantiation.
impl Raster {
	/// # Fit.
	///
	/// Draw the bitmap onto a new zeroed surface sized per
	/// [`fit_dimensions`]. Images already within bounds are copied over
	/// as-is; bigger ones are resampled with a bilinear filter.
	///
	/// ## Errors
	///
	/// If the surface cannot be allocated, or the resampler chokes, a
	/// [`ChalkError::Surface`] is returned.
	pub fn fit(src: &Bitmap, max: u32) -> Result<Self, ChalkError> {
		let (w, h) = fit_dimensions(src.width(), src.height(), max);
		let width = NonZeroU32::new(w).ok_or(ChalkError::Surface)?;
		let height = NonZeroU32::new(h).ok_or(ChalkError::Surface)?;
		let size = rgba_len(w, h).ok_or(ChalkError::Surface)?;

		let mut pixels: Vec<u8> = Vec::new();
		pixels.try_reserve_exact(size).map_err(|_| ChalkError::Surface)?;
		pixels.resize(size, 0);

		// Same size, same pixels.
		if w == src.width() && h == src.height() {
			if src.len() != size { return Err(ChalkError::Surface); }
			pixels.copy_from_slice(src);
		}
		else {
			let from = ImageRef::new(src.width(), src.height(), src, PixelType::U8x4)
				.map_err(|_| ChalkError::Surface)?;
			let mut to = Image::from_vec_u8(w, h, pixels, PixelType::U8x4)
				.map_err(|_| ChalkError::Surface)?;

			let options = ResizeOptions::new()
				.resize_alg(ResizeAlg::Convolution(FilterType::Bilinear));
			Resizer::new()
				.resize(&from, &mut to, Some(&options))
				.map_err(|_| ChalkError::Surface)?;

			pixels = to.into_vec();
		}

		log::debug!("Surface: {}x{} -> {w}x{h}.", src.width(), src.height());
		Ok(Self { pixels, width, height })
	}

	/// # From RGBA.
	///
	/// Wrap an existing RGBA buffer. The buffer length must match the
	/// dimensions exactly.
	///
	/// ## Errors
	///
	/// An error is returned if either dimension is zero or the buffer is
	/// the wrong size.
	pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Result<Self, ChalkError> {
		let width = NonZeroU32::new(width).ok_or(ChalkError::Overflow)?;
		let height = NonZeroU32::new(height).ok_or(ChalkError::Overflow)?;
		if Some(pixels.len()) == rgba_len(width.get(), height.get()) {
			Ok(Self { pixels, width, height })
		}
		else { Err(ChalkError::Overflow) }
	}
}

/// ## Getters.
impl Raster {
	#[inline]
	#[must_use]
	/// # Width.
	pub const fn width(&self) -> u32 { self.width.get() }

	#[inline]
	#[must_use]
	/// # Height.
	pub const fn height(&self) -> u32 { self.height.get() }

	#[inline]
	/// # Width as `i32`.
	///
	/// This is a convenience method for C bindings.
	///
	/// ## Errors
	///
	/// This will return an error if the value does not fit.
	pub(crate) fn width_i32(&self) -> Result<i32, ChalkError> {
		i32::try_from(self.width.get()).map_err(|_| ChalkError::Overflow)
	}

	#[inline]
	/// # Height as `i32`.
	///
	/// This is a convenience method for C bindings.
	///
	/// ## Errors
	///
	/// This will return an error if the value does not fit.
	pub(crate) fn height_i32(&self) -> Result<i32, ChalkError> {
		i32::try_from(self.height.get()).map_err(|_| ChalkError::Overflow)
	}
}



#[must_use]
/// # Fit Dimensions.
///
/// Return the largest dimensions with the same aspect ratio as `width` and
/// `height` whose longer side does not exceed `max`. Dimensions already in
/// range are returned unchanged.
///
/// When scaling is needed, the longer side becomes exactly `max` and the
/// shorter side is rounded to the nearest whole pixel (halves round up),
/// never dropping below one.
///
/// ## Examples
///
/// ```
/// use chalk_core::fit_dimensions;
///
/// assert_eq!(fit_dimensions(2000, 1000, 800), (800, 400));
/// assert_eq!(fit_dimensions(640, 480, 800), (640, 480));
/// assert_eq!(fit_dimensions(1, 5000, 800), (1, 800));
/// ```
pub fn fit_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
	let max = max.max(1);
	let long = width.max(height);
	if long <= max { return (width, height); }

	let short = u64::from(width.min(height));
	let long = u64::from(long);
	let scaled = num_integer::div_floor(short * u64::from(max) * 2 + long, long * 2);
	let scaled = u32::try_from(scaled).unwrap_or(max).clamp(1, max);

	if width >= height { (max, scaled) }
	else { (scaled, max) }
}

/// # RGBA Buffer Length.
fn rgba_len(width: u32, height: u32) -> Option<usize> {
	usize::try_from(width).ok()
		.zip(usize::try_from(height).ok())
		.and_then(|(w, h)| w.checked_mul(h))
		.and_then(|x| x.checked_mul(4))
}



#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	/// # Solid Bitmap.
	fn solid(width: u32, height: u32, px: [u8; 4]) -> Bitmap {
		let pixels = px.repeat((width * height) as usize);
		Bitmap {
			pixels,
			width: NonZeroU32::new(width).expect("Zero width."),
			height: NonZeroU32::new(height).expect("Zero height."),
			kind: ImageKind::Png,
		}
	}

	#[test]
	fn t_fit_dimensions() {
		assert_eq!(fit_dimensions(2000, 1000, 800), (800, 400));
		assert_eq!(fit_dimensions(1000, 2000, 800), (400, 800));
		assert_eq!(fit_dimensions(800, 800, 800), (800, 800));
		assert_eq!(fit_dimensions(801, 801, 800), (800, 800));
		assert_eq!(fit_dimensions(100, 100, 800), (100, 100));

		// 1601 * 800 / 1602 = 799.5006; rounds up.
		assert_eq!(fit_dimensions(1602, 1601, 800), (800, 800));
		// 3 * 800 / 1600 = 1.5; halves round up.
		assert_eq!(fit_dimensions(1600, 3, 800), (800, 2));
		// Slivers never vanish.
		assert_eq!(fit_dimensions(100_000, 1, 800), (800, 1));
	}

	#[test]
	fn t_unchanged() {
		let src = solid(10, 6, [1, 2, 3, 4]);
		let out = Raster::try_from(&src).expect("Fit failed.");
		assert_eq!((out.width(), out.height()), (10, 6));
		assert_eq!(out.as_ref(), src.as_ref());
	}

	#[test]
	fn t_downscale() {
		let src = solid(2000, 1000, [90, 120, 200, 255]);
		let out = Raster::try_from(&src).expect("Fit failed.");
		assert_eq!((out.width(), out.height()), (800, 400));
		assert_eq!(out.len(), 800 * 400 * 4);

		// A flat color should stay (about) flat.
		assert!(out.chunks_exact(4).all(|px|
			px.iter().zip([90_u8, 120, 200, 255]).all(|(a, b)| a.abs_diff(b) <= 1)
		));
	}

	#[test]
	fn t_from_rgba() {
		assert!(Raster::from_rgba(vec![0; 16], 2, 2).is_ok());
		assert_eq!(Raster::from_rgba(vec![0; 15], 2, 2), Err(ChalkError::Overflow));
		assert_eq!(Raster::from_rgba(Vec::new(), 0, 2), Err(ChalkError::Overflow));
	}

	proptest! {
		#[test]
		fn t_fit_within_bounds(width in 1_u32..=800, height in 1_u32..=800) {
			prop_assert_eq!(fit_dimensions(width, height, 800), (width, height));
		}

		#[test]
		fn t_fit_oversized(width in 1_u32..20_000, height in 1_u32..20_000) {
			prop_assume!(width.max(height) > 800);
			let (w, h) = fit_dimensions(width, height, 800);

			// The long side lands on the limit exactly.
			if width >= height { prop_assert_eq!(w, 800); }
			else { prop_assert_eq!(h, 800); }
			prop_assert!(w.min(h) >= 1);

			// The short side is within a pixel of the exact ratio.
			let exact = f64::from(width.min(height)) * 800.0 / f64::from(width.max(height));
			prop_assert!((f64::from(w.min(h)) - exact).abs() <= 1.0);
		}
	}
}
