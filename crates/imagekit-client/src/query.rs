//! Query parameters for listing and searching files

use crate::{ClientError, Result};
use std::fmt;
use std::str::FromStr;

/// Smallest accepted `limit`
pub const MIN_LIMIT: i64 = 1;
/// Largest accepted `limit`
pub const MAX_LIMIT: i64 = 1000;
/// Smallest accepted `skip`
pub const MIN_SKIP: i64 = 0;

/// Which kinds of entries to list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListType {
    All,
    File,
    Folder,
}

impl ListType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl FromStr for ListType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "file" => Ok(Self::File),
            "folder" => Ok(Self::Folder),
            other => Err(ClientError::InvalidType(other.to_string())),
        }
    }
}

/// Sort order for listings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    AscName,
    DescName,
    AscCreated,
    DescCreated,
    AscUpdated,
    DescUpdated,
    AscHeight,
    DescHeight,
    AscWidth,
    DescWidth,
    AscSize,
    DescSize,
}

impl SortOrder {
    /// Every accepted sort order
    pub const ALL: [SortOrder; 12] = [
        Self::AscName,
        Self::DescName,
        Self::AscCreated,
        Self::DescCreated,
        Self::AscUpdated,
        Self::DescUpdated,
        Self::AscHeight,
        Self::DescHeight,
        Self::AscWidth,
        Self::DescWidth,
        Self::AscSize,
        Self::DescSize,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AscName => "ASC_NAME",
            Self::DescName => "DESC_NAME",
            Self::AscCreated => "ASC_CREATED",
            Self::DescCreated => "DESC_CREATED",
            Self::AscUpdated => "ASC_UPDATED",
            Self::DescUpdated => "DESC_UPDATED",
            Self::AscHeight => "ASC_HEIGHT",
            Self::DescHeight => "DESC_HEIGHT",
            Self::AscWidth => "ASC_WIDTH",
            Self::DescWidth => "DESC_WIDTH",
            Self::AscSize => "ASC_SIZE",
            Self::DescSize => "DESC_SIZE",
        }
    }
}

impl FromStr for SortOrder {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|order| order.as_str() == s)
            .ok_or_else(|| ClientError::InvalidSort(s.to_string()))
    }
}

/// Restrict listings to images or non-images
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileTypeFilter {
    All,
    Image,
    NonImage,
}

impl FileTypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Image => "image",
            Self::NonImage => "non-image",
        }
    }
}

impl FromStr for FileTypeFilter {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "all" => Ok(Self::All),
            "image" => Ok(Self::Image),
            "non-image" => Ok(Self::NonImage),
            other => Err(ClientError::InvalidFileType(other.to_string())),
        }
    }
}

macro_rules! impl_display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_as_str!(ListType, SortOrder, FileTypeFilter);

/// Options for listing files
#[derive(Clone, Debug, Default)]
pub struct ListFilesParams {
    pub list_type: Option<ListType>,
    pub sort: Option<SortOrder>,
    /// Folder path to list
    pub path: Option<String>,
    /// Lucene-like search expression
    pub search_query: Option<String>,
    /// Match any of these tags
    pub tags: Option<Vec<String>>,
    pub file_type: Option<FileTypeFilter>,
    /// Page size, 1 to 1000
    pub limit: Option<i64>,
    /// Number of entries to skip
    pub skip: Option<i64>,
}

impl ListFilesParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, list_type: ListType) -> Self {
        self.list_type = Some(list_type);
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        self.search_query = Some(query.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_file_type(mut self, file_type: FileTypeFilter) -> Self {
        self.file_type = Some(file_type);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: i64) -> Self {
        self.skip = Some(skip);
        self
    }

    /// Validate and collect the parameters as `(name, value)` pairs
    pub fn to_pairs(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pairs = Vec::new();

        if let Some(list_type) = self.list_type {
            pairs.push(("type", list_type.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.to_string()));
        }
        if let Some(path) = &self.path {
            pairs.push(("path", path.clone()));
        }
        if let Some(query) = &self.search_query {
            pairs.push(("searchQuery", query.clone()));
        }
        if let Some(tags) = &self.tags {
            pairs.push(("tags", tags.join(",")));
        }
        if let Some(file_type) = self.file_type {
            pairs.push(("fileType", file_type.to_string()));
        }
        if let Some(limit) = self.limit {
            if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
                return Err(ClientError::LimitOutOfBounds(limit));
            }
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            if skip < MIN_SKIP {
                return Err(ClientError::SkipOutOfBounds(skip));
            }
            pairs.push(("skip", skip.to_string()));
        }

        Ok(pairs)
    }

    /// Build the URL query string (without the leading `?`), escaping each
    /// value on its own
    pub fn to_query_string(&self) -> Result<String> {
        let query = self
            .to_pairs()?
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, urlencoding::encode(&value)))
            .collect::<Vec<_>>()
            .join("&");
        Ok(query)
    }
}
