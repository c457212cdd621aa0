/*!
# `Chalk` - Content Stores
*/

use crate::{
	ChalkError,
	Collection,
	Output,
	Record,
	validate_id,
};
use std::{
	collections::BTreeMap,
	path::{
		Path,
		PathBuf,
	},
};



/// # Content Store.
///
/// A place to keep records, addressed by collection and ID. Writes are
/// create-or-update; nothing is retried.
pub trait ContentStore {
	/// # Upsert.
	///
	/// Create or replace the record at `id`.
	///
	/// ## Errors
	///
	/// The ID must be valid and the record must belong to the collection.
	/// Implementations may add their own I/O errors.
	fn upsert(&mut self, collection: Collection, id: &str, record: &Record)
	-> Result<(), ChalkError>;

	/// # Get.
	///
	/// ## Errors
	///
	/// Implementations may return I/O or parse errors.
	fn get(&self, collection: Collection, id: &str)
	-> Result<Option<Record>, ChalkError>;

	/// # List.
	///
	/// Return every record in the collection, ordered by ID.
	///
	/// ## Errors
	///
	/// Implementations may return I/O or parse errors.
	fn list(&self, collection: Collection)
	-> Result<Vec<(String, Record)>, ChalkError>;

	/// # Delete.
	///
	/// Remove the record, returning `true` if there was one.
	///
	/// ## Errors
	///
	/// Implementations may return I/O or parse errors.
	fn delete(&mut self, collection: Collection, id: &str)
	-> Result<bool, ChalkError>;

	/// # Attach Image.
	///
	/// Fetch the record, set its image, and save it, returning the updated
	/// copy. Missing gallery items and school profiles are created from
	/// scratch; other missing records are an error.
	///
	/// ## Errors
	///
	/// Returns [`ChalkError::NoRecord`] if the record is missing and cannot
	/// be created, [`ChalkError::NoImageField`] for suggestions, and any
	/// errors from the underlying reads and writes.
	fn attach_image(&mut self, collection: Collection, id: &str, img: &Output)
	-> Result<Record, ChalkError> {
		let id = validate_id(id)?;
		let mut record = match self.get(collection, id)? {
			Some(r) => r,
			None if collection.auto_create() => collection.blank_record(),
			None => return Err(ChalkError::NoRecord),
		};

		record.set_image(img)?;
		self.upsert(collection, id, &record)?;
		Ok(record)
	}
}

/// # Check Upsert Arguments.
fn check_upsert<'a>(collection: Collection, id: &'a str, record: &Record)
-> Result<&'a str, ChalkError> {
	if record.collection() == collection { validate_id(id) }
	else { Err(ChalkError::Collection) }
}



#[derive(Debug, Clone, Default)]
/// # Memory Store.
///
/// An in-process store, mostly useful for testing.
pub struct MemoryStore(BTreeMap<Collection, BTreeMap<String, Record>>);

impl ContentStore for MemoryStore {
	fn upsert(&mut self, collection: Collection, id: &str, record: &Record)
	-> Result<(), ChalkError> {
		let id = check_upsert(collection, id, record)?;
		self.0.entry(collection).or_default().insert(id.to_owned(), record.clone());
		Ok(())
	}

	fn get(&self, collection: Collection, id: &str)
	-> Result<Option<Record>, ChalkError> {
		Ok(self.0.get(&collection).and_then(|c| c.get(id)).cloned())
	}

	fn list(&self, collection: Collection)
	-> Result<Vec<(String, Record)>, ChalkError> {
		Ok(
			self.0.get(&collection)
				.map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
				.unwrap_or_default()
		)
	}

	fn delete(&mut self, collection: Collection, id: &str)
	-> Result<bool, ChalkError> {
		Ok(
			self.0.get_mut(&collection)
				.is_some_and(|c| c.remove(id).is_some())
		)
	}
}

impl MemoryStore {
	#[must_use]
	/// # New.
	pub const fn new() -> Self { Self(BTreeMap::new()) }
}



#[derive(Debug, Clone)]
/// # Directory Store.
///
/// Each collection is kept as a pretty-printed `<collection>.json` object
/// mapping IDs to records. Files are read fresh on every call and replaced
/// atomically on write, so an interrupted save never leaves half a file.
pub struct DirStore {
	dir: PathBuf,
}

impl ContentStore for DirStore {
	fn upsert(&mut self, collection: Collection, id: &str, record: &Record)
	-> Result<(), ChalkError> {
		let id = check_upsert(collection, id, record)?;
		let mut all = self.load(collection)?;
		all.insert(id.to_owned(), record.clone());
		self.save(collection, &all)
	}

	fn get(&self, collection: Collection, id: &str)
	-> Result<Option<Record>, ChalkError> {
		let mut all = self.load(collection)?;
		Ok(all.remove(id))
	}

	fn list(&self, collection: Collection)
	-> Result<Vec<(String, Record)>, ChalkError> {
		Ok(self.load(collection)?.into_iter().collect())
	}

	fn delete(&mut self, collection: Collection, id: &str)
	-> Result<bool, ChalkError> {
		let mut all = self.load(collection)?;
		if all.remove(id).is_some() {
			self.save(collection, &all)?;
			Ok(true)
		}
		else { Ok(false) }
	}
}

impl DirStore {
	#[must_use]
	/// # New.
	///
	/// The directory need not exist yet; it is created on first write.
	pub fn new<P: AsRef<Path>>(dir: P) -> Self {
		Self { dir: dir.as_ref().to_path_buf() }
	}

	#[must_use]
	/// # Directory.
	pub fn dir(&self) -> &Path { &self.dir }

	#[must_use]
	/// # Collection File.
	pub fn file(&self, collection: Collection) -> PathBuf {
		self.dir.join(format!("{collection}.json"))
	}

	/// # Load Collection.
	fn load(&self, collection: Collection)
	-> Result<BTreeMap<String, Record>, ChalkError> {
		let file = self.file(collection);
		if ! file.exists() { return Ok(BTreeMap::new()); }

		let raw = std::fs::read_to_string(&file).map_err(|_| ChalkError::Read)?;
		let values: BTreeMap<String, serde_json::Value> = serde_json::from_str(&raw)
			.map_err(|_| ChalkError::Store)?;

		values.into_iter()
			.map(|(k, v)| collection.record_from_value(v).map(|r| (k, r)))
			.collect()
	}

	/// # Save Collection.
	fn save(&self, collection: Collection, all: &BTreeMap<String, Record>)
	-> Result<(), ChalkError> {
		std::fs::create_dir_all(&self.dir).map_err(|_| ChalkError::Write)?;

		let mut out = serde_json::to_vec_pretty(all).map_err(|_| ChalkError::Write)?;
		out.push(b'\n');

		write_atomic::write_file(self.file(collection), &out)
			.map_err(|_| ChalkError::Write)
	}
}
