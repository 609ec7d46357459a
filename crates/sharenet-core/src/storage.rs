// Rust guideline compliant 2026-02-06

//! Storage module for JSONL collections.
//!
//! Each record type lives in its own JSONL file under the data directory. Reads
//! stream through `serde_json`, writes replace the whole file through a temp file
//! and rename. Multi-collection mutations go through [`Store::atomic`], which
//! serializes writers with an exclusive `fs2` lock on the data directory and
//! commits only the collections a closure actually changed.

use crate::models::{
    Item, LostFoundClaim, LostFoundPost, Request, Transaction, UserProfile, WantedItem,
};
use crate::{Error, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const LOCK_FILE: &str = ".sharenet.lock";
const LOCK_POLL: Duration = Duration::from_millis(10);

/// A record type persisted as one JSONL collection.
pub trait Record: Serialize + DeserializeOwned + Clone + PartialEq {
    /// File stem of the collection.
    const COLLECTION: &'static str;
    /// Entity name used in errors.
    const ENTITY: &'static str;

    /// Primary identifier.
    fn id(&self) -> &str;

    /// Checks record-level invariants before it is written.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRecord`] describing the first violation.
    fn validate(&self) -> Result<()>;
}

macro_rules! impl_record {
    ($ty:ty, $collection:literal, $entity:literal) => {
        impl Record for $ty {
            const COLLECTION: &'static str = $collection;
            const ENTITY: &'static str = $entity;

            fn id(&self) -> &str {
                &self.id
            }

            fn validate(&self) -> Result<()> {
                <$ty>::validate(self)
            }
        }
    };
}

impl_record!(Item, "items", "item");
impl_record!(Request, "requests", "request");
impl_record!(Transaction, "transactions", "transaction");
impl_record!(LostFoundPost, "posts", "post");
impl_record!(LostFoundClaim, "claims", "claim");
impl_record!(WantedItem, "wanted", "wanted item");
impl_record!(UserProfile, "profiles", "profile");

/// Finds a record by ID.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no record has the ID.
pub fn find<'a, T: Record>(records: &'a [T], id: &str) -> Result<&'a T> {
    records
        .iter()
        .find(|record| record.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

/// Finds a record by ID for mutation.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if no record has the ID.
pub fn find_mut<'a, T: Record>(records: &'a mut [T], id: &str) -> Result<&'a mut T> {
    records
        .iter_mut()
        .find(|record| record.id() == id)
        .ok_or_else(|| not_found::<T>(id))
}

fn not_found<T: Record>(id: &str) -> Error {
    Error::NotFound {
        entity: T::ENTITY,
        id: id.to_string(),
    }
}

/// Every collection, loaded in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Listings.
    pub items: Vec<Item>,
    /// Requests.
    pub requests: Vec<Request>,
    /// Transactions.
    pub transactions: Vec<Transaction>,
    /// Lost&found posts.
    pub posts: Vec<LostFoundPost>,
    /// Lost&found claims.
    pub claims: Vec<LostFoundClaim>,
    /// Wanted items with their offers.
    pub wanted: Vec<WantedItem>,
    /// Trust profiles.
    pub profiles: Vec<UserProfile>,
}

impl Dataset {
    /// Looks up an item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the item does not exist.
    pub fn item(&self, id: &str) -> Result<&Item> {
        find(&self.items, id)
    }

    /// Looks up an item for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the item does not exist.
    pub fn item_mut(&mut self, id: &str) -> Result<&mut Item> {
        find_mut(&mut self.items, id)
    }

    /// Looks up a request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the request does not exist.
    pub fn request(&self, id: &str) -> Result<&Request> {
        find(&self.requests, id)
    }

    /// Looks up a request for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the request does not exist.
    pub fn request_mut(&mut self, id: &str) -> Result<&mut Request> {
        find_mut(&mut self.requests, id)
    }

    /// Looks up a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the transaction does not exist.
    pub fn transaction(&self, id: &str) -> Result<&Transaction> {
        find(&self.transactions, id)
    }

    /// Looks up a transaction for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the transaction does not exist.
    pub fn transaction_mut(&mut self, id: &str) -> Result<&mut Transaction> {
        find_mut(&mut self.transactions, id)
    }

    /// Looks up a post.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the post does not exist.
    pub fn post(&self, id: &str) -> Result<&LostFoundPost> {
        find(&self.posts, id)
    }

    /// Looks up a post for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the post does not exist.
    pub fn post_mut(&mut self, id: &str) -> Result<&mut LostFoundPost> {
        find_mut(&mut self.posts, id)
    }

    /// Looks up a claim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the claim does not exist.
    pub fn claim(&self, id: &str) -> Result<&LostFoundClaim> {
        find(&self.claims, id)
    }

    /// Looks up a claim for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the claim does not exist.
    pub fn claim_mut(&mut self, id: &str) -> Result<&mut LostFoundClaim> {
        find_mut(&mut self.claims, id)
    }

    /// Looks up a wanted item.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the wanted item does not exist.
    pub fn wanted(&self, id: &str) -> Result<&WantedItem> {
        find(&self.wanted, id)
    }

    /// Looks up a wanted item for mutation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the wanted item does not exist.
    pub fn wanted_mut(&mut self, id: &str) -> Result<&mut WantedItem> {
        find_mut(&mut self.wanted, id)
    }

    /// Trust score of `user`, or `default` without a profile.
    pub fn trust_score(&self, user: &str, default: u8) -> u8 {
        self.profiles
            .iter()
            .find(|profile| profile.id == user)
            .map_or(default, |profile| profile.trust_score)
    }

    /// Profile of `user`, created with `default` score if missing.
    pub fn profile_mut(&mut self, user: &str, default: u8, now: i64) -> &mut UserProfile {
        let pos = match self.profiles.iter().position(|profile| profile.id == user) {
            Some(pos) => pos,
            None => {
                self.profiles.push(UserProfile {
                    id: user.to_string(),
                    trust_score: default,
                    updated_at: now,
                });
                self.profiles.len() - 1
            }
        };
        &mut self.profiles[pos]
    }
}

/// JSONL-backed store rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    lock_timeout: Option<Duration>,
}

impl Store {
    /// Opens a store, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty or the directory cannot be created.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if root.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            lock_timeout: None,
        })
    }

    /// Bounds how long writers wait for the store lock.
    pub fn with_lock_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.lock_timeout = timeout;
        self
    }

    /// Returns the data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the JSONL path of a collection.
    pub fn collection_path<T: Record>(&self) -> PathBuf {
        self.root.join(format!("{}.jsonl", T::COLLECTION))
    }

    /// Loads every record of a collection using streaming deserialization.
    ///
    /// Malformed lines are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a record fails validation.
    pub fn load_all<T: Record>(&self) -> Result<Vec<T>> {
        let path = self.collection_path::<T>();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        let mut records = Vec::new();
        for result in serde_json::Deserializer::from_reader(reader).into_iter::<T>() {
            match result {
                Ok(record) => {
                    Record::validate(&record)?;
                    records.push(record);
                }
                Err(e) => {
                    tracing::warn!(
                        collection = T::COLLECTION,
                        error = %e,
                        "skipping malformed JSON line"
                    );
                }
            }
        }
        Ok(records)
    }

    /// Loads a single record with early termination.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has the ID.
    pub fn load_by_id<T: Record>(&self, id: &str) -> Result<T> {
        let path = self.collection_path::<T>();
        if !path.exists() {
            return Err(not_found::<T>(id));
        }

        let reader = BufReader::new(File::open(&path)?);
        for result in serde_json::Deserializer::from_reader(reader).into_iter::<T>() {
            match result {
                Ok(record) if record.id() == id => {
                    Record::validate(&record)?;
                    return Ok(record);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        collection = T::COLLECTION,
                        error = %e,
                        "skipping malformed JSON line"
                    );
                }
            }
        }
        Err(not_found::<T>(id))
    }

    /// Replaces a collection atomically (temp file + rename).
    ///
    /// # Errors
    ///
    /// Returns an error if a record fails validation or the write fails.
    pub fn save_all<T: Record>(&self, records: &[T]) -> Result<()> {
        for record in records {
            Record::validate(record)?;
        }
        self.write_collection(records)
    }

    fn write_collection<T: Record>(&self, records: &[T]) -> Result<()> {
        let path = self.collection_path::<T>();
        let temp_path = path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for record in records {
                let json = serde_json::to_string(record)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Loads every collection under a shared lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock or any collection cannot be read.
    pub fn snapshot(&self) -> Result<Dataset> {
        let _guard = self.acquire(LockMode::Shared)?;
        self.load_dataset()
    }

    fn load_dataset(&self) -> Result<Dataset> {
        Ok(Dataset {
            items: self.load_all()?,
            requests: self.load_all()?,
            transactions: self.load_all()?,
            posts: self.load_all()?,
            claims: self.load_all()?,
            wanted: self.load_all()?,
            profiles: self.load_all()?,
        })
    }

    /// Runs a read-validate-write unit of work under the exclusive store lock.
    ///
    /// The closure mutates an in-memory copy of the dataset. If it returns an
    /// error nothing is written. Otherwise every changed collection is
    /// validated, then written in a fixed order; if a write fails, collections
    /// already written are restored from the pre-image before the error is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, a lock timeout as [`Error::Conflict`], or
    /// the I/O error of a failed commit.
    pub fn atomic<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Dataset) -> std::result::Result<T, E>,
    {
        let _guard = self.acquire(LockMode::Exclusive)?;
        let original = self.load_dataset()?;
        let mut working = original.clone();

        let value = f(&mut working)?;
        if working != original {
            self.commit(&original, &working)?;
        }
        Ok(value)
    }

    fn commit(&self, original: &Dataset, working: &Dataset) -> Result<()> {
        validate_changed(&original.items, &working.items)?;
        validate_changed(&original.requests, &working.requests)?;
        validate_changed(&original.transactions, &working.transactions)?;
        validate_changed(&original.posts, &working.posts)?;
        validate_changed(&original.claims, &working.claims)?;
        validate_changed(&original.wanted, &working.wanted)?;
        validate_changed(&original.profiles, &working.profiles)?;

        let mut written = Vec::new();
        let result = self
            .write_changed(&original.items, &working.items, &mut written)
            .and_then(|()| self.write_changed(&original.requests, &working.requests, &mut written))
            .and_then(|()| {
                self.write_changed(&original.transactions, &working.transactions, &mut written)
            })
            .and_then(|()| self.write_changed(&original.posts, &working.posts, &mut written))
            .and_then(|()| self.write_changed(&original.claims, &working.claims, &mut written))
            .and_then(|()| self.write_changed(&original.wanted, &working.wanted, &mut written))
            .and_then(|()| self.write_changed(&original.profiles, &working.profiles, &mut written));

        if let Err(err) = result {
            self.restore(original, &written);
            return Err(err);
        }
        Ok(())
    }

    fn write_changed<T: Record>(
        &self,
        original: &[T],
        working: &[T],
        written: &mut Vec<&'static str>,
    ) -> Result<()> {
        if original == working {
            return Ok(());
        }
        self.write_collection(working)?;
        written.push(T::COLLECTION);
        Ok(())
    }

    fn restore(&self, original: &Dataset, written: &[&'static str]) {
        for &collection in written {
            let result = if collection == Item::COLLECTION {
                self.write_collection(&original.items)
            } else if collection == Request::COLLECTION {
                self.write_collection(&original.requests)
            } else if collection == Transaction::COLLECTION {
                self.write_collection(&original.transactions)
            } else if collection == LostFoundPost::COLLECTION {
                self.write_collection(&original.posts)
            } else if collection == LostFoundClaim::COLLECTION {
                self.write_collection(&original.claims)
            } else if collection == WantedItem::COLLECTION {
                self.write_collection(&original.wanted)
            } else {
                self.write_collection(&original.profiles)
            };
            match result {
                Ok(()) => tracing::warn!(collection, "commit failed, collection restored"),
                Err(e) => tracing::error!(
                    collection,
                    error = %e,
                    "commit failed and collection could not be restored"
                ),
            }
        }
    }

    fn acquire(&self, mode: LockMode) -> Result<LockGuard> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(LOCK_FILE))?;

        match self.lock_timeout {
            None => match mode {
                LockMode::Shared => FileExt::lock_shared(&file)?,
                LockMode::Exclusive => file.lock_exclusive()?,
            },
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                loop {
                    let attempt = match mode {
                        LockMode::Shared => FileExt::try_lock_shared(&file),
                        LockMode::Exclusive => file.try_lock_exclusive(),
                    };
                    match attempt {
                        Ok(()) => break,
                        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
                            if Instant::now() >= deadline {
                                return Err(Error::Conflict(format!(
                                    "store is locked by another writer (waited {} ms)",
                                    timeout.as_millis()
                                )));
                            }
                            std::thread::sleep(LOCK_POLL);
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
            }
        }
        Ok(LockGuard { file })
    }
}

fn validate_changed<T: Record>(original: &[T], working: &[T]) -> Result<()> {
    if original == working {
        return Ok(());
    }
    working.iter().try_for_each(<T as Record>::validate)
}

#[derive(Debug, Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

struct LockGuard {
    file: File,
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            tracing::warn!(error = %e, "failed to release store lock");
        }
    }
}
