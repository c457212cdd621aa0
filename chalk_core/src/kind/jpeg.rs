/*!
# `Chalk` - JPEG Images.

Decoding uses [`jpeg-decoder`](https://crates.io/crates/jpeg-decoder);
encoding uses the baseline encoder from [`image`](https://crates.io/crates/image).
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
use jpeg_decoder::PixelFormat;
use rgb::{
	ComponentSlice,
	FromSlice,
};



/// # JPEG Image.
pub(crate) struct ImageJpeg;

impl Decoder for ImageJpeg {
	/// # Decode.
	fn decode(mut raw: &[u8]) -> Result<DecoderResult, ChalkError> {
		// Decode the image.
		let mut jecoder = jpeg_decoder::Decoder::new(&mut raw);
		let pixels = jecoder.decode()
			.map_err(|_| ChalkError::Decode)?;
		let info = jecoder.info().ok_or(ChalkError::Decode)?;

		let width = u32::from(info.width);
		let height = u32::from(info.height);
		let size = usize::from(info.width).checked_mul(usize::from(info.height))
			.and_then(|x| x.checked_mul(4))
			.ok_or(ChalkError::Overflow)?;

		// So many ways to be a JPEG...
		let raw: Vec<u8> = match info.pixel_format {
			// Upscale greyscale to RGBA.
			PixelFormat::L8 => pixels.iter()
				.fold(Vec::with_capacity(size), |mut acc, &px| {
					acc.extend_from_slice(&[px, px, px, 255]);
					acc
				}),
			// Sixteen-bit greyscale comes through in native byte order; the
			// high byte is plenty.
			PixelFormat::L16 => pixels.chunks_exact(2)
				.fold(Vec::with_capacity(size), |mut acc, px| {
					let v = grey16(px[0], px[1]);
					acc.extend_from_slice(&[v, v, v, 255]);
					acc
				}),
			// Upscale RGB to RGBA.
			PixelFormat::RGB24 => pixels.as_rgb()
				.iter()
				.map(|px| px.with_alpha(255))
				.fold(Vec::with_capacity(size), |mut acc, px| {
					acc.extend_from_slice(px.as_slice());
					acc
				}),
			// Print-style CMYK (Adobe inversion already undone).
			PixelFormat::CMYK32 => pixels.chunks_exact(4)
				.fold(Vec::with_capacity(size), |mut acc, px| {
					acc.extend_from_slice(&cmyk(px));
					acc
				}),
		};

		// Make sure the buffer was actually filled to the right size.
		if raw.len() == size { Ok((raw, width, height)) }
		else { Err(ChalkError::Overflow) }
	}
}

impl Encoder for ImageJpeg {
	/// # Encode.
	///
	/// JPEG has no alpha channel, so translucent pixels are composited onto
	/// black first, matching what a canvas export does.
	fn encode(img: &Raster, quality: Quality) -> Result<Vec<u8>, ChalkError> {
		use image::{
			codecs::jpeg::JpegEncoder,
			ExtendedColorType,
		};

		let rgb = flatten(img);
		let mut out = Vec::new();
		JpegEncoder::new_with_quality(&mut out, quality.percent())
			.encode(&rgb, img.width(), img.height(), ExtendedColorType::Rgb8)
			.map_err(|_| ChalkError::Encode)?;

		if out.is_empty() { Err(ChalkError::Encode) }
		else { Ok(out) }
	}
}



#[inline]
/// # Native Sixteen-Bit Grey to Eight.
const fn grey16(a: u8, b: u8) -> u8 { u16::from_ne_bytes([a, b]).to_be_bytes()[0] }

#[allow(clippy::cast_possible_truncation)] // Values are in range.
/// # CMYK to RGBA.
///
/// Zero means no ink, so each channel is the product of its own and the
/// black plate's remainders.
fn cmyk(px: &[u8]) -> [u8; 4] {
	let k = 255 - u16::from(px[3]);
	let ink = |c: u8| num_integer::div_floor((255 - u16::from(c)) * k + 127, 255) as u8;
	[ink(px[0]), ink(px[1]), ink(px[2]), 255]
}

#[allow(clippy::cast_possible_truncation)] // Values are in range.
/// # Flatten RGBA to RGB.
///
/// Each color channel is premultiplied by its alpha, i.e. blended against a
/// black background.
fn flatten(img: &Raster) -> Vec<u8> {
	img.chunks_exact(4)
		.fold(Vec::with_capacity((img.len() >> 2) * 3), |mut acc, px| {
			let alpha = u16::from(px[3]);
			if alpha == 255 { acc.extend_from_slice(&px[..3]); }
			else {
				for &c in &px[..3] {
					acc.push(num_integer::div_floor(u16::from(c) * alpha + 127, 255) as u8);
				}
			}
			acc
		})
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_flatten() {
		let img = Raster::from_rgba(
			vec![
				10, 20, 30, 255,
				200, 100, 50, 0,
				255, 255, 255, 128,
				0, 0, 0, 7,
			],
			2,
			2,
		).expect("Raster failed.");

		assert_eq!(
			flatten(&img),
			vec![
				10, 20, 30,
				0, 0, 0,
				128, 128, 128,
				0, 0, 0,
			],
		);
	}

	#[test]
	fn t_grey16() {
		for (v, expected) in [(0x8000_u16, 0x80), (0x80FF, 0x80), (0x00FF, 0), (0xFFFF, 255), (0x1234, 0x12)] {
			let [a, b] = v.to_ne_bytes();
			assert_eq!(grey16(a, b), expected, "{v:#06x}");
		}
	}

	#[test]
	fn t_cmyk() {
		assert_eq!(cmyk(&[0, 0, 0, 0]), [255, 255, 255, 255]);
		assert_eq!(cmyk(&[0, 0, 0, 255]), [0, 0, 0, 255]);
		assert_eq!(cmyk(&[255, 0, 0, 0]), [0, 255, 255, 255]);
		assert_eq!(cmyk(&[0, 255, 255, 0]), [255, 0, 0, 255]);
		assert_eq!(cmyk(&[0, 0, 0, 128]), [127, 127, 127, 255]);
	}

	#[test]
	fn t_roundtrip() {
		// A small gradient should survive a trip through the encoder and
		// decoder with its dimensions intact.
		let mut buf = Vec::with_capacity(40 * 30 * 4);
		for y in 0..30_u8 {
			for x in 0..40_u8 {
				buf.extend_from_slice(&[x * 6, y * 8, 128, 255]);
			}
		}
		let img = Raster::from_rgba(buf, 40, 30).expect("Raster failed.");
		let quality = Quality::START;

		let jpg = ImageJpeg::encode(&img, quality).expect("Encode failed.");
		assert_eq!(&jpg[..3], &[0xFF, 0xD8, 0xFF]);

		let (pixels, width, height) = ImageJpeg::decode(&jpg).expect("Decode failed.");
		assert_eq!((width, height), (40, 30));
		assert_eq!(pixels.len(), 40 * 30 * 4);
		assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
	}

	#[test]
	fn t_corrupt() {
		// Right header, garbage body.
		let mut raw = vec![0xFF, 0xD8, 0xFF, 0xE0];
		raw.extend_from_slice(&[0x42; 64]);
		assert_eq!(ImageJpeg::decode(&raw), Err(ChalkError::Decode));
	}
}
