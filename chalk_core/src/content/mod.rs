/*!
# `Chalk` - Content Records
*/

mod store;

pub use store::{
	ContentStore,
	DirStore,
	MemoryStore,
};

use crate::{
	ChalkError,
	Output,
};
use serde::{
	Deserialize,
	Serialize,
};
use std::{
	fmt,
	str::FromStr,
};



/// # School Profile ID.
///
/// The school profile is a singleton stored under this ID.
pub const PROFILE_ID: &str = "main";



#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # News Article.
pub struct NewsArticle {
	/// # Headline.
	pub title: String,

	/// # Publication Date.
	pub date: String,

	/// # Category.
	pub category: String,

	/// # Body Text.
	pub content: String,

	/// # Image (Data URI).
	pub image: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # Teacher.
pub struct Teacher {
	/// # Name.
	pub name: String,

	/// # Position.
	pub position: String,

	/// # Subject.
	pub subject: String,

	/// # Portrait (Data URI).
	pub image: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # Gallery Item.
pub struct GalleryItem {
	/// # Caption.
	pub title: String,

	/// # Category.
	pub category: String,

	/// # Image (Data URI).
	pub image: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # School Profile.
pub struct SchoolProfile {
	/// # School Name.
	pub name: String,

	/// # Tagline.
	pub tagline: String,

	/// # Vision Statement.
	pub vision: String,

	/// # Mission Statement.
	pub mission: String,

	/// # History.
	pub history: String,

	/// # Street Address.
	pub address: String,

	/// # Phone Number.
	pub phone: String,

	/// # Email Address.
	pub email: String,

	/// # Hero Image (Data URI).
	pub image: String,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// # Suggestion.
///
/// Visitor feedback. These have no image.
pub struct Suggestion {
	/// # Sender Name.
	pub name: String,

	/// # Message.
	pub message: String,

	/// # Date Sent.
	pub date: String,
}



#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(untagged)]
/// # Record.
///
/// A content record of any collection. Records serialize as their bare
/// fields; the collection a record belongs to determines the schema used to
/// read it back (see [`Collection::parse_record`]).
pub enum Record {
	/// # News.
	News(NewsArticle),

	/// # Teacher.
	Teacher(Teacher),

	/// # Gallery.
	Gallery(GalleryItem),

	/// # School Profile.
	SchoolProfile(SchoolProfile),

	/// # Suggestion.
	Suggestion(Suggestion),
}

impl From<NewsArticle> for Record {
	#[inline]
	fn from(src: NewsArticle) -> Self { Self::News(src) }
}

impl From<Teacher> for Record {
	#[inline]
	fn from(src: Teacher) -> Self { Self::Teacher(src) }
}

impl From<GalleryItem> for Record {
	#[inline]
	fn from(src: GalleryItem) -> Self { Self::Gallery(src) }
}

impl From<SchoolProfile> for Record {
	#[inline]
	fn from(src: SchoolProfile) -> Self { Self::SchoolProfile(src) }
}

impl From<Suggestion> for Record {
	#[inline]
	fn from(src: Suggestion) -> Self { Self::Suggestion(src) }
}

impl Record {
	#[must_use]
	/// # Collection.
	///
	/// Return the collection this kind of record lives in.
	pub const fn collection(&self) -> Collection {
		match self {
			Self::News(_) => Collection::News,
			Self::Teacher(_) => Collection::Teachers,
			Self::Gallery(_) => Collection::Gallery,
			Self::SchoolProfile(_) => Collection::SchoolProfile,
			Self::Suggestion(_) => Collection::Suggestions,
		}
	}

	#[must_use]
	/// # Image.
	///
	/// Return the image field, if the record has one.
	pub fn image(&self) -> Option<&str> {
		match self {
			Self::News(r) => Some(&r.image),
			Self::Teacher(r) => Some(&r.image),
			Self::Gallery(r) => Some(&r.image),
			Self::SchoolProfile(r) => Some(&r.image),
			Self::Suggestion(_) => None,
		}
	}

	/// # Set Image.
	///
	/// Copy the data URI into the record's image field.
	///
	/// ## Errors
	///
	/// Suggestions have no image field, so return
	/// [`ChalkError::NoImageField`].
	pub fn set_image(&mut self, img: &Output) -> Result<(), ChalkError> {
		let field = match self {
			Self::News(r) => &mut r.image,
			Self::Teacher(r) => &mut r.image,
			Self::Gallery(r) => &mut r.image,
			Self::SchoolProfile(r) => &mut r.image,
			Self::Suggestion(_) => return Err(ChalkError::NoImageField),
		};

		field.clear();
		field.push_str(img);
		Ok(())
	}
}



#[derive(Debug, Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Collection.
///
/// The named groups of records in the content store.
pub enum Collection {
	/// # `news`.
	News,

	/// # `teachers`.
	Teachers,

	/// # `gallery`.
	Gallery,

	/// # `school_profile`.
	SchoolProfile,

	/// # `suggestions`.
	Suggestions,
}

impl AsRef<str> for Collection {
	#[inline]
	fn as_ref(&self) -> &str { self.as_str() }
}

impl fmt::Display for Collection {
	#[inline]
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Collection {
	type Err = ChalkError;

	fn from_str(src: &str) -> Result<Self, Self::Err> {
		match src.trim() {
			"news" => Ok(Self::News),
			"teachers" => Ok(Self::Teachers),
			"gallery" => Ok(Self::Gallery),
			"school_profile" => Ok(Self::SchoolProfile),
			"suggestions" => Ok(Self::Suggestions),
			_ => Err(ChalkError::Collection),
		}
	}
}

impl Collection {
	/// # All Collections.
	pub const ALL: [Self; 5] = [
		Self::News,
		Self::Teachers,
		Self::Gallery,
		Self::SchoolProfile,
		Self::Suggestions,
	];

	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::News => "news",
			Self::Teachers => "teachers",
			Self::Gallery => "gallery",
			Self::SchoolProfile => "school_profile",
			Self::Suggestions => "suggestions",
		}
	}

	#[must_use]
	/// # Has Image?
	pub const fn has_image(self) -> bool { ! matches!(self, Self::Suggestions) }

	#[must_use]
	/// # Create on Attach?
	///
	/// Attaching an image to a gallery item or the school profile creates
	/// the record if it does not exist yet. News and teacher records carry
	/// text that has to be written first.
	pub const fn auto_create(self) -> bool {
		matches!(self, Self::Gallery | Self::SchoolProfile)
	}

	#[must_use]
	/// # Default ID.
	pub const fn default_id(self) -> Option<&'static str> {
		match self {
			Self::SchoolProfile => Some(PROFILE_ID),
			_ => None,
		}
	}

	#[must_use]
	/// # Blank Record.
	pub fn blank_record(self) -> Record {
		match self {
			Self::News => Record::News(NewsArticle::default()),
			Self::Teachers => Record::Teacher(Teacher::default()),
			Self::Gallery => Record::Gallery(GalleryItem::default()),
			Self::SchoolProfile => Record::SchoolProfile(SchoolProfile::default()),
			Self::Suggestions => Record::Suggestion(Suggestion::default()),
		}
	}

	/// # Parse Record.
	///
	/// Decode a JSON payload using this collection's schema. Unknown fields
	/// are ignored and missing ones are left blank.
	///
	/// ## Errors
	///
	/// Malformed JSON returns [`ChalkError::Store`].
	pub fn parse_record(self, src: &str) -> Result<Record, ChalkError> {
		let value: serde_json::Value = serde_json::from_str(src)
			.map_err(|_| ChalkError::Store)?;
		self.record_from_value(value)
	}

	/// # Record From JSON Value.
	pub(crate) fn record_from_value(self, src: serde_json::Value) -> Result<Record, ChalkError> {
		let res = match self {
			Self::News => serde_json::from_value(src).map(Record::News),
			Self::Teachers => serde_json::from_value(src).map(Record::Teacher),
			Self::Gallery => serde_json::from_value(src).map(Record::Gallery),
			Self::SchoolProfile => serde_json::from_value(src).map(Record::SchoolProfile),
			Self::Suggestions => serde_json::from_value(src).map(Record::Suggestion),
		};
		res.map_err(|_| ChalkError::Store)
	}
}



/// # Validate ID.
///
/// Record IDs must be non-empty and consist only of ASCII letters, numbers,
/// dashes, and underscores.
///
/// ## Errors
///
/// Anything else returns [`ChalkError::Id`].
pub fn validate_id(src: &str) -> Result<&str, ChalkError> {
	if
		! src.is_empty() &&
		src.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
	{
		Ok(src)
	}
	else { Err(ChalkError::Id) }
}

#[must_use]
/// # Slug.
///
/// Reduce arbitrary text (like a file stem) to a valid record ID: lowercase
/// ASCII alphanumerics with runs of anything else collapsed to a single dash.
///
/// Returns `None` if nothing usable remains.
///
/// ## Examples
///
/// ```
/// assert_eq!(chalk_core::slug("Sports Day 2024").as_deref(), Some("sports-day-2024"));
/// assert_eq!(chalk_core::slug("!!!"), None);
/// ```
pub fn slug(src: &str) -> Option<String> {
	let mut out = String::with_capacity(src.len());
	for c in src.chars() {
		if c.is_ascii_alphanumeric() { out.push(c.to_ascii_lowercase()); }
		else if c == '_' { out.push(c); }
		else if ! out.is_empty() && ! out.ends_with('-') { out.push('-'); }
	}

	let len = out.trim_end_matches('-').len();
	out.truncate(len);

	if out.is_empty() { None }
	else { Some(out) }
}
