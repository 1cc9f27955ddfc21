// Catalog store: the in-memory list of books and its JSON mirror on disk.
// Every successful mutation rewrites the whole file before returning, so
// the file always reflects the last committed state.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Storage file used when the caller doesn't pick one.
pub const DEFAULT_PATH: &str = "library.json";

/// Availability of a book. Older catalogs wrote the Russian literals, so
/// those are still accepted on read and rewritten in English on save.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    #[serde(rename = "available", alias = "в наличии")]
    Available,
    #[serde(rename = "checked-out", alias = "выдана")]
    CheckedOut,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Available => "available",
            Status::CheckedOut => "checked-out",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" | "в наличии" => Ok(Status::Available),
            "checked-out" | "выдана" => Ok(Status::CheckedOut),
            _ => Err(CatalogError::InvalidStatus(s.to_string())),
        }
    }
}

/// One catalog entry. Field order here is the key order in the file.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub status: Status,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, title: {}, author: {}, year: {}, status: {}",
            self.id, self.title, self.author, self.year, self.status
        )
    }
}

/// The book collection bound to a single storage file.
///
/// Construct it with [`Catalog::open`]; the file is read once on open and
/// rewritten after each `add`, `remove` and `set_status`.
#[derive(Debug)]
pub struct Catalog {
    path: PathBuf,
    books: Vec<Book>,
}

impl Catalog {
    /// Bind a catalog to `path` and load whatever is stored there.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut catalog = Catalog {
            path: path.as_ref().to_path_buf(),
            books: Vec::new(),
        };
        catalog.load()?;
        Ok(catalog)
    }

    /// Open `library.json` in the working directory.
    pub fn open_default() -> Result<Self> {
        Self::open(DEFAULT_PATH)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Replace the in-memory collection with the file contents. A missing
    /// file means an empty catalog; a malformed one is an error.
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no catalog file, starting empty");
            self.books = Vec::new();
            return Ok(());
        }
        let content = fs::read_to_string(&self.path)?;
        self.books = serde_json::from_str(&content)?;
        debug!(path = %self.path.display(), books = self.books.len(), "catalog loaded");
        Ok(())
    }

    /// Write the whole collection out, replacing the previous file.
    pub fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.books.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write beside the target and rename over it.
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, &buf)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), books = self.books.len(), "catalog saved");
        Ok(())
    }

    /// Append a new available book and persist. The id is one past the
    /// highest id in use, so ids freed by removal are not reused.
    pub fn add(&mut self, title: &str, author: &str, year: i32) -> Result<Book> {
        let max = self.books.iter().map(|b| b.id).max().unwrap_or(0);
        let id = max.checked_add(1).ok_or(CatalogError::IdOverflow(max))?;
        let book = Book {
            id,
            title: title.to_string(),
            author: author.to_string(),
            year,
            status: Status::Available,
        };
        self.books.push(book.clone());
        self.save()?;
        info!(id, "book added");
        Ok(book)
    }

    /// Remove a book by id. Nothing is written when the id is unknown.
    pub fn remove(&mut self, id: u64) -> Result<Book> {
        let index = self.position(id).ok_or(CatalogError::NotFound(id))?;
        let book = self.books.remove(index);
        self.save()?;
        info!(id, "book removed");
        Ok(book)
    }

    pub fn find_by_id(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Books whose title or author contains `term` ignoring case, or whose
    /// year contains it as text. Results keep catalog order.
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let needle = term.to_lowercase();
        self.books
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle)
                    || b.author.to_lowercase().contains(&needle)
                    || b.year.to_string().contains(term)
            })
            .collect()
    }

    /// Change a book's status. The id is checked before the status text,
    /// and neither failure touches the record or the file.
    pub fn set_status(&mut self, id: u64, new_status: &str) -> Result<&Book> {
        let index = self.position(id).ok_or(CatalogError::NotFound(id))?;
        let status: Status = new_status.parse()?;
        self.books[index].status = status;
        self.save()?;
        info!(id, %status, "status changed");
        Ok(&self.books[index])
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PATH.to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
