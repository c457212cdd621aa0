/*!
# Chalk: Images
*/

use dowser::Extension;
use std::path::Path;



// The E_BMP, E_GIF, E_JPE, E_JPEG, E_JPG, E_PNG, and E_WEBP constants are
// generated by build.rs.
include!(concat!(env!("OUT_DIR"), "/chalk-extensions.rs"));

/// # Is Image File?
///
/// Match the extensions `chalk_core` knows how to label.
pub(super) fn is_image(path: &Path) -> bool {
	Extension::try_from3(path).map_or_else(
		|| Extension::try_from4(path).is_some_and(|e| e == E_JPEG || e == E_WEBP),
		|e| e == E_JPG || e == E_PNG || e == E_GIF || e == E_BMP || e == E_JPE,
	)
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_is_image() {
		for p in ["a.jpg", "a.JPEG", "/b/c.png", "d.webp", "e.gif", "f.bmp", "g.jpe"] {
			assert!(is_image(Path::new(p)), "{p}");
		}
		for p in ["a.txt", "a.avif", "png", "/b/c.jxl", "a.tiff"] {
			assert!(! is_image(Path::new(p)), "{p}");
		}
	}
}
