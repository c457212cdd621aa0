/*!
# `Chalk`: `WebP` Handling

This uses [`libwebp-sys2`](https://crates.io/crates/libwebp-sys2) bindings to Google's
`libwebp`. Lossy output should be equivalent to the corresponding `cwebp -q`.
*/

use crate::{
	ChalkError,
	Quality,
	Raster,
	traits::{
		Decoder,
		DecoderResult,
		Encoder,
	},
};
use libwebp_sys::{
	WEBP_MAX_DIMENSION,
	WebPConfig,
	WebPConfigInit,
	WebPDecodeRGBA,
	WebPEncode,
	WebPFree,
	WebPMemoryWrite,
	WebPMemoryWriter,
	WebPMemoryWriterClear,
	WebPMemoryWriterInit,
	WebPPicture,
	WebPPictureFree,
	WebPPictureImportRGBA,
	WebPPictureInit,
	WebPValidateConfig,
};
use std::os::raw::c_int;



/// # `WebP` Image.
pub(crate) struct ImageWebp;

impl Decoder for ImageWebp {
	fn decode(raw: &[u8]) -> Result<DecoderResult, ChalkError> {
		let d = DecodedRgba::try_from(raw)?;

		let width = u32::try_from(d.width).map_err(|_| ChalkError::Overflow)?;
		let height = u32::try_from(d.height).map_err(|_| ChalkError::Overflow)?;
		let size = usize::try_from(d.width).ok()
			.zip(usize::try_from(d.height).ok())
			.and_then(|(w, h)| w.checked_mul(h))
			.and_then(|x| x.checked_mul(4))
			.ok_or(ChalkError::Overflow)?;

		let buf: Vec<u8> = unsafe { std::slice::from_raw_parts(d.ptr, size) }
			.to_vec();

		if buf.len() == size && size != 0 { Ok((buf, width, height)) }
		else { Err(ChalkError::Decode) }
	}
}

impl Encoder for ImageWebp {
	#[inline]
	/// # Encode Lossy.
	fn encode(img: &Raster, quality: Quality) -> Result<Vec<u8>, ChalkError> {
		encode(img, quality)
	}
}



/// # Decoded Pixels.
///
/// `libwebp` owns the buffer; dropping this hands it back.
struct DecodedRgba {
	width: c_int,
	height: c_int,
	ptr: *mut u8,
}

impl TryFrom<&[u8]> for DecodedRgba {
	type Error = ChalkError;

	fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
		let mut width: c_int = 0;
		let mut height: c_int = 0;
		let ptr = unsafe {
			WebPDecodeRGBA(src.as_ptr(), src.len(), &mut width, &mut height)
		};

		if ptr.is_null() { Err(ChalkError::Decode) }
		else { Ok(Self { width, height, ptr }) }
	}
}

impl Drop for DecodedRgba {
	#[inline]
	fn drop(&mut self) { unsafe { WebPFree(self.ptr.cast()); } }
}



/// # Encoder Picture.
///
/// An ARGB `WebPPicture` holding a copy of the raster, freed on drop.
struct Picture(WebPPicture);

impl TryFrom<&Raster> for Picture {
	type Error = ChalkError;

	fn try_from(img: &Raster) -> Result<Self, Self::Error> {
		let width = img.width_i32()?;
		let height = img.height_i32()?;
		if width > WEBP_MAX_DIMENSION || height > WEBP_MAX_DIMENSION {
			return Err(ChalkError::Overflow);
		}

		let mut out = Self(unsafe { std::mem::zeroed() });
		maybe_die(unsafe { WebPPictureInit(&mut out.0) })?;
		out.0.use_argb = 1;
		out.0.width = width;
		out.0.height = height;
		out.0.argb_stride = width;

		// The import copies; nothing is written back to the raster.
		let rgba: &[u8] = img;
		maybe_die(unsafe {
			WebPPictureImportRGBA(&mut out.0, rgba.as_ptr(), width << 2)
		})?;

		Ok(out)
	}
}

impl Drop for Picture {
	#[inline]
	fn drop(&mut self) { unsafe { WebPPictureFree(&mut self.0); } }
}



/// # In-Memory Sink.
///
/// A boxed `WebPMemoryWriter` wired to a picture's output hook. It must
/// outlive the `WebPEncode` call that fills it.
struct MemorySink(*mut WebPMemoryWriter);

impl From<&mut WebPPicture> for MemorySink {
	fn from(picture: &mut WebPPicture) -> Self {
		extern "C" fn on_write(
			data: *const u8,
			data_size: usize,
			picture: *const WebPPicture,
		) -> c_int {
			unsafe { WebPMemoryWrite(data, data_size, picture) }
		}

		let sink = Self(unsafe {
			let mut writer: WebPMemoryWriter = std::mem::zeroed();
			WebPMemoryWriterInit(&mut writer);
			Box::into_raw(Box::new(writer))
		});

		picture.writer = Some(on_write);
		picture.custom_ptr = sink.0.cast::<std::ffi::c_void>();
		sink
	}
}

impl MemorySink {
	/// # Copy Out.
	fn to_vec(&self) -> Vec<u8> {
		let data = unsafe { &*self.0 };
		if data.mem.is_null() || data.size == 0 { Vec::new() }
		else { unsafe { std::slice::from_raw_parts(data.mem, data.size) }.to_vec() }
	}
}

impl Drop for MemorySink {
	#[inline]
	fn drop(&mut self) {
		unsafe {
			WebPMemoryWriterClear(self.0);
			drop(Box::from_raw(self.0));
		}
	}
}



/// # Encode `WebP`.
///
/// Lossy, at the given quality.
///
/// ## Errors
///
/// Any `libwebp` failure, or an empty result, is an encoding error.
fn encode(img: &Raster, quality: Quality) -> Result<Vec<u8>, ChalkError> {
	let config = make_config(quality)?;
	let mut picture = Picture::try_from(img)?;
	let sink = MemorySink::from(&mut picture.0);
	maybe_die(unsafe { WebPEncode(&config, &mut picture.0) })?;

	let out = sink.to_vec();
	if out.is_empty() { Err(ChalkError::Encode) }
	else { Ok(out) }
}

/// # Make Config.
///
/// This generates a lossy encoder configuration profile roughly equivalent
/// to:
///
/// ```bash
/// cwebp -m 4 -q {QUALITY}
/// ```
///
/// Threading stays off so repeat runs produce identical bytes.
fn make_config(quality: Quality) -> Result<WebPConfig, ChalkError> {
	let mut config: WebPConfig = unsafe { std::mem::zeroed() };
	maybe_die(unsafe { WebPConfigInit(&mut config) })?;

	config.quality = f32::from(quality.percent());
	config.method = 4;
	config.thread_level = 0;
	maybe_die(unsafe { WebPValidateConfig(&config) })?;

	Ok(config)
}

#[inline]
/// # Check Status.
///
/// `libwebp` signals failure with a zero.
const fn maybe_die(res: c_int) -> Result<(), ChalkError> {
	if 0 == res { Err(ChalkError::Encode) }
	else { Ok(()) }
}



#[cfg(test)]
mod tests {
	use super::*;

	/// # Checkerboard With a See-Through Stripe.
	fn checkers(width: u32, height: u32) -> Raster {
		let mut buf = Vec::new();
		for y in 0..height {
			for x in 0..width {
				let v = if (x / 4 + y / 4) % 2 == 0 { 230 } else { 25 };
				let a = if y < 4 { 0 } else { 255 };
				buf.extend_from_slice(&[v, v, 255 - v, a]);
			}
		}
		Raster::from_rgba(buf, width, height).expect("Raster failed.")
	}

	#[test]
	fn t_roundtrip() {
		let img = checkers(48, 32);
		let webp = ImageWebp::encode(&img, Quality::START).expect("Encode failed.");
		assert_eq!(&webp[..4], b"RIFF");
		assert_eq!(&webp[8..12], b"WEBP");

		let (pixels, width, height) = ImageWebp::decode(&webp).expect("Decode failed.");
		assert_eq!((width, height), (48, 32));
		assert_eq!(pixels.len(), 48 * 32 * 4);

		// Transparency should make it through.
		assert_eq!(pixels[3], 0);
		assert_eq!(pixels[pixels.len() - 1], 255);
	}

	#[test]
	fn t_picture() {
		let img = checkers(20, 12);
		let picture = Picture::try_from(&img).expect("Picture failed.");
		assert_eq!((picture.0.width, picture.0.height), (20, 12));
		assert_eq!(picture.0.use_argb, 1);
		assert!(! picture.0.argb.is_null());

		// The first (see-through) pixel lands in ARGB order.
		let first = unsafe { *picture.0.argb };
		assert_eq!(first >> 24, 0);
		assert_eq!(first & 0x00FF_FFFF, (230 << 16) | (230 << 8) | 25);
	}

	#[test]
	fn t_deterministic() {
		let img = checkers(64, 64);
		let a = ImageWebp::encode(&img, Quality::START).expect("Encode failed.");
		let b = ImageWebp::encode(&img, Quality::START).expect("Encode failed.");
		assert_eq!(a, b);
	}

	#[test]
	fn t_corrupt() {
		let mut raw = b"RIFF\x20\0\0\0WEBPVP8 ".to_vec();
		raw.extend_from_slice(&[0xAB; 24]);
		assert_eq!(ImageWebp::decode(&raw), Err(ChalkError::Decode));
	}
}
