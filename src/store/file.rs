//! File-backed [`CredentialStore`] that survives process restarts, the desktop analogue of
//! browser-local storage.

// std
use std::{
	fs::{self, File},
	io::{ErrorKind, Write},
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	auth::{CredentialPair, TokenSecret},
	store::{CompareAndSwapOutcome, CredentialStore, StoreError, StoreFuture, swap_if_refresh_matches},
};

/// Persists the pair as a two-slot JSON object (`access_token`, `refresh_token`) after each
/// mutation and deletes the file when the session is cleared.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<Option<CredentialPair>>>,
	writer: Arc<AsyncMutex<()>>,
}
impl FileStore {
	/// Opens (or prepares) a store at `path`, eagerly loading an existing pair.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		ensure_parent_exists(&path)?;

		let snapshot = load_snapshot(&path)?;

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)), writer: Default::default() })
	}

	/// Location of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn persist(&self, contents: Option<&CredentialPair>) -> Result<(), StoreError> {
		let Some(pair) = contents else {
			return match fs::remove_file(&self.path) {
				Ok(()) => Ok(()),
				Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
				Err(e) => Err(StoreError::Backend {
					message: format!("Failed to remove {}: {e}", self.path.display()),
				}),
			};
		};

		ensure_parent_exists(&self.path)?;

		let serialized = serde_json::to_vec_pretty(pair).map_err(|e| StoreError::Serialization {
			message: format!("Failed to serialize credentials: {e}"),
		})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}
}
impl CredentialStore for FileStore {
	fn fetch(&self) -> StoreFuture<'_, Option<CredentialPair>> {
		Box::pin(async move { Ok(self.inner.read().clone()) })
	}

	fn save(&self, pair: CredentialPair) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let _writer = self.writer.lock().await;

			self.persist(Some(&pair))?;
			*self.inner.write() = Some(pair);

			Ok(())
		})
	}

	fn rotate<'a>(
		&'a self,
		expected_refresh: &'a TokenSecret,
		replacement: CredentialPair,
	) -> StoreFuture<'a, CompareAndSwapOutcome> {
		Box::pin(async move {
			let _writer = self.writer.lock().await;
			let mut next = self.inner.read().clone();
			let outcome = swap_if_refresh_matches(&mut next, expected_refresh, replacement);

			if outcome == CompareAndSwapOutcome::Updated {
				self.persist(next.as_ref())?;
				*self.inner.write() = next;
			}

			Ok(outcome)
		})
	}

	fn clear(&self) -> StoreFuture<'_, ()> {
		Box::pin(async move {
			let _writer = self.writer.lock().await;

			self.persist(None)?;
			self.inner.write().take();

			Ok(())
		})
	}
}

fn load_snapshot(path: &Path) -> Result<Option<CredentialPair>, StoreError> {
	let bytes = match fs::read(path) {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
		Err(e) =>
			return Err(StoreError::Backend {
				message: format!("Failed to read {}: {e}", path.display()),
			}),
	};

	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(None);
	}

	serde_json::from_slice(&bytes).map(Some).map_err(|e| StoreError::Serialization {
		message: format!("Failed to parse {}: {e}", path.display()),
	})
}

fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
			message: format!("Failed to create store directory {}: {e}", parent.display()),
		})?;
	}

	Ok(())
}
