use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::{Error, Result};

/// Plain file access for article storage
pub struct FileReader;

impl FileReader {
    /// Read a whole file
    pub fn fetch(path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    /// Article file names in `dir`, newest-named first
    ///
    /// Directories and dotfiles are skipped.
    pub fn filenames(dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort_by(|a, b| b.cmp(a));
        Ok(names)
    }
}

/// One article backed by a file, loaded on first access
#[derive(Debug)]
pub struct Article {
    id: String,
    backing_file: PathBuf,
    contents: OnceLock<String>,
}

impl Article {
    pub fn new(backing_file: impl Into<PathBuf>) -> Result<Self> {
        let backing_file = backing_file.into();
        if backing_file.as_os_str().is_empty() {
            return Err(Error::Other("article backing file is required".to_string()));
        }
        let id = backing_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| backing_file.to_string_lossy().into_owned());

        Ok(Self {
            id,
            backing_file,
            contents: OnceLock::new(),
        })
    }

    /// Article with contents already in memory
    pub fn with_contents(id: impl Into<String>, contents: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            backing_file: PathBuf::from(&id),
            id,
            contents: OnceLock::from(contents.into()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Raw contents, read from disk the first time and cached afterwards
    pub fn contents(&self) -> Result<&str> {
        if let Some(contents) = self.contents.get() {
            return Ok(contents);
        }
        let loaded = FileReader::fetch(&self.backing_file)?;
        tracing::debug!(id = %self.id, bytes = loaded.len(), "Loaded article");
        Ok(self.contents.get_or_init(|| loaded))
    }

    pub fn is_loaded(&self) -> bool {
        self.contents.get().is_some()
    }

    /// First h1-h3 heading, falling back to the article id
    pub fn title(&self) -> Result<String> {
        let contents = self.contents()?;
        Ok(first_heading(contents).unwrap_or_else(|| self.id.clone()))
    }

    /// Contents rendered to wrapped plain text
    pub fn plain_text(&self, width: usize) -> Result<String> {
        let contents = self.contents()?;
        Ok(html2text::from_read(contents.as_bytes(), width.max(10))
            .unwrap_or_else(|_| contents.to_string()))
    }
}

fn first_heading(html: &str) -> Option<String> {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();

    let heading = HEADING.get_or_init(|| {
        Regex::new(r"(?is)<h[1-3][^>]*>(.*?)</h[1-3]>").expect("valid heading regex")
    });
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

    let inner = heading.captures(html)?.get(1)?.as_str();
    let text = tag.replace_all(inner, "");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Every article in a directory, in display order
#[derive(Debug, Default)]
pub struct ArticleLibrary {
    articles: Vec<Article>,
}

impl ArticleLibrary {
    pub fn load(dir: &Path) -> Result<Self> {
        let articles = FileReader::filenames(dir)?
            .into_iter()
            .map(|name| Article::new(dir.join(name)))
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = articles.len(), dir = %dir.display(), "Loaded article library");
        Ok(Self { articles })
    }

    pub fn from_articles(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Article> {
        self.articles
            .iter()
            .find(|a| a.id() == id)
            .ok_or_else(|| Error::ArticleNotFound(id.to_string()))
    }
}
