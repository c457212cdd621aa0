/*!
# `Chalk` - Encoding.
*/

pub(super) mod iter;
pub(super) mod output;
pub(super) mod quality;

use crate::{
	Bitmap,
	ChalkError,
	EncodeIter,
	MAX_ENCODED_LEN,
	Output,
	OutputKind,
	Raster,
	Source,
};



/// # Compress.
///
/// Run a source image through the whole pipeline: decode it, fit it within
/// [`MAX_DIMENSION`](crate::MAX_DIMENSION), encode it as WebP (for PNG and
/// WebP sources) or JPEG (for everything else), and step the quality down
/// from `0.8` until the resulting data URI is no longer than
/// [`MAX_ENCODED_LEN`] characters.
///
/// Each call owns all of its buffers, so it is safe to run any number of
/// these in parallel on different threads.
///
/// ## Examples
///
/// ```no_run
/// use chalk_core::{MediaType, Source};
///
/// let raw = std::fs::read("/path/to/photo.jpg").unwrap();
/// let src = Source::new(raw, MediaType::Jpeg);
/// let out = chalk_core::compress(&src).unwrap();
/// assert!(out.starts_with("data:image/jpeg;base64,"));
/// ```
///
/// ## Errors
///
/// | Problem | Error |
/// | ------- | ----- |
/// | Unreadable or unsupported image data | [`ChalkError::Decode`] |
/// | Surface allocation failure | [`ChalkError::Surface`] |
/// | Encoder failure | [`ChalkError::Encode`] |
/// | Over the cap even at quality `0.1` | [`ChalkError::TooBig`] |
pub fn compress(src: &Source) -> Result<Output, ChalkError> {
	compress_with_limit(src, MAX_ENCODED_LEN)
}

/// # Compress (Custom Cap).
pub(crate) fn compress_with_limit(src: &Source, limit: usize) -> Result<Output, ChalkError> {
	let img = Bitmap::try_from(src.raw())?;
	let img = Raster::try_from(&img)?;
	let kind = OutputKind::from(src.media());
	log::debug!(
		"Compressing {}x{} {} as {kind}.",
		img.width(),
		img.height(),
		src.media(),
	);

	EncodeIter::with_limit(&img, kind, limit).take()
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		MediaType,
		Quality,
	};

	/// # Noisy RGBA Pixels.
	///
	/// A cheap xorshift fill that compresses poorly, with a transparent
	/// corner.
	fn noise(width: u32, height: u32) -> Vec<u8> {
		let mut state = 0x2545_F491_u32;
		let mut out = Vec::with_capacity((width * height * 4) as usize);
		for y in 0..height {
			for x in 0..width {
				state ^= state << 13;
				state ^= state >> 17;
				state ^= state << 5;
				let [r, g, b, _] = state.to_le_bytes();
				let a = if x < 8 && y < 8 { 0 } else { 255 };
				out.extend_from_slice(&[r, g, b, a]);
			}
		}
		out
	}

	/// # Gradient RGBA Pixels.
	fn gradient(width: u32, height: u32) -> Vec<u8> {
		let mut out = Vec::with_capacity((width * height * 4) as usize);
		for y in 0..height {
			for x in 0..width {
				out.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 96, 255]);
			}
		}
		out
	}

	/// # PNG Source.
	fn png(width: u32, height: u32, pixels: &[u8]) -> Vec<u8> {
		lodepng::encode_memory(pixels, width as usize, height as usize, lodepng::ColorType::RGBA, 8)
			.expect("PNG encoding failed.")
	}

	/// # JPEG Source.
	fn jpeg(width: u32, height: u32) -> Vec<u8> {
		let img = Raster::from_rgba(gradient(width, height), width, height)
			.expect("Raster failed.");
		OutputKind::Jpeg.encode(&img, Quality::MAX).expect("JPEG encoding failed.")
	}

	#[test]
	fn t_small_jpeg() {
		let src = Source::new(jpeg(100, 100), MediaType::Jpeg);
		let out = compress(&src).expect("Compress failed.");

		assert_eq!(out.kind(), OutputKind::Jpeg);
		assert_eq!(out.quality(), Quality::START);
		assert_eq!((out.width(), out.height()), (100, 100));
		assert!(out.starts_with("data:image/jpeg;base64,"));
		assert!(out.len() <= MAX_ENCODED_LEN);
	}

	#[test]
	fn t_large_png() {
		let src = Source::new(png(2000, 1000, &gradient(2000, 1000)), MediaType::Png);
		let out = compress(&src).expect("Compress failed.");

		assert_eq!(out.kind(), OutputKind::Webp);
		assert_eq!((out.width(), out.height()), (800, 400));
		assert!(out.starts_with("data:image/webp;base64,"));
		assert!(out.len() <= MAX_ENCODED_LEN);
	}

	#[test]
	fn t_declared_type_wins() {
		// PNG bytes labelled as JPEG still decode, but come out as JPEG.
		let src = Source::new(png(40, 30, &gradient(40, 30)), MediaType::Jpeg);
		let out = compress(&src).expect("Compress failed.");
		assert_eq!(out.kind(), OutputKind::Jpeg);

		// And JPEG bytes labelled as PNG come out as WebP.
		let src = Source::new(jpeg(40, 30), MediaType::Png);
		let out = compress(&src).expect("Compress failed.");
		assert_eq!(out.kind(), OutputKind::Webp);
	}

	#[test]
	fn t_unknown_declared() {
		// Unrecognized declarations fall through to JPEG.
		let raw = jpeg(40, 30);
		for media in ["image/jfif", "image/avif", "application/octet-stream", ""] {
			let src = Source::from_declared(raw.clone(), media);
			let out = compress(&src).expect("Compress failed.");
			assert_eq!(out.kind(), OutputKind::Jpeg, "{media:?}");
			assert!(out.starts_with("data:image/jpeg;base64,"));
		}

		// PNG bytes work too; only the output side cares about the label.
		let src = Source::from_declared(png(40, 30, &gradient(40, 30)), "image/x-icon");
		assert_eq!(compress(&src).map(|o| o.kind()), Ok(OutputKind::Jpeg));

		// Junk is still junk.
		let src = Source::from_declared(b"Definitely not a picture.".to_vec(), "");
		assert_eq!(compress(&src), Err(ChalkError::Decode));
	}

	#[test]
	fn t_corrupt() {
		let mut raw = vec![0xFF, 0xD8, 0xFF, 0xE0];
		raw.extend_from_slice(&[0x13; 200]);
		let src = Source::new(raw, MediaType::Jpeg);
		assert_eq!(compress(&src), Err(ChalkError::Decode));

		let src = Source::new(b"Definitely not a picture.".to_vec(), MediaType::Png);
		assert_eq!(compress(&src), Err(ChalkError::Decode));
	}

	#[test]
	fn t_too_big() {
		// With a one-character cap, every quality is tried and rejected.
		let pixels = noise(64, 64);
		let img = Raster::from_rgba(pixels, 64, 64).expect("Raster failed.");
		let mut iter = EncodeIter::with_limit(&img, OutputKind::Webp, 1);
		while iter.advance().expect("Encode failed.").is_some() {}

		let attempts = iter.attempts();
		assert_eq!(attempts.len(), 8);
		assert_eq!(attempts[0].quality, Quality::START);
		assert_eq!(attempts[7].quality, Quality::FLOOR);
		assert_eq!(iter.take(), Err(ChalkError::TooBig));

		let src = Source::new(png(64, 64, &noise(64, 64)), MediaType::Png);
		assert_eq!(compress_with_limit(&src, 1), Err(ChalkError::TooBig));
	}

	#[test]
	fn t_step_down() {
		// Pick a cap that the first attempt misses but the floor meets.
		let img = Raster::from_rgba(noise(96, 96), 96, 96).expect("Raster failed.");
		let mut iter = EncodeIter::new(&img, OutputKind::Jpeg);
		let first = iter.advance().expect("Encode failed.").map(Output::len).expect("No output.");

		let mut iter = EncodeIter::with_limit(&img, OutputKind::Jpeg, 1);
		while iter.advance().expect("Encode failed.").is_some() {}
		let floor = iter.attempts().last().map(|a| a.len).expect("No attempts.");
		assert!(floor < first);

		let limit = floor + (first - floor) / 2;
		let mut iter = EncodeIter::with_limit(&img, OutputKind::Jpeg, limit);
		while iter.advance().expect("Encode failed.").is_some() {}
		let attempts = iter.attempts().to_vec();
		let out = iter.take().expect("Take failed.");

		assert!(1 < attempts.len());
		assert!(out.len() <= limit);
		assert_eq!(out.quality(), attempts[attempts.len() - 1].quality);
		assert!(attempts[..attempts.len() - 1].iter().all(|a| limit < a.len));
		for pair in attempts.windows(2) {
			assert_eq!(pair[0].quality.step_down(), Some(pair[1].quality));
		}
	}

	#[test]
	fn t_deterministic() {
		let raw = png(300, 200, &noise(300, 200));
		let a = compress(&Source::new(raw.clone(), MediaType::Png)).expect("Compress failed.");
		let b = compress(&Source::new(raw, MediaType::Png)).expect("Compress failed.");
		assert_eq!(a, b);

		let payload = a.split_once(',').map(|(_, b)| b).expect("No payload.");
		assert!(payload.starts_with("UklGR")); // RIFF
		assert_eq!(a.len(), b.len());
	}

	#[test]
	fn t_threads() {
		let raw = png(320, 240, &noise(320, 240));
		let expected = compress(&Source::new(raw.clone(), MediaType::Png))
			.expect("Compress failed.");

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let raw = raw.clone();
				std::thread::spawn(move || compress(&Source::new(raw, MediaType::Png)))
			})
			.collect();

		for h in handles {
			let out = h.join().expect("Thread panicked.").expect("Compress failed.");
			assert_eq!(out, expected);
		}
	}
}
