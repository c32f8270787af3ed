//! Optional file attributes sent on upload and on details update
//!
//! Each field is an `Option`: `None` leaves the field out of the request,
//! `Some(false)` / `Some(vec![])` send an explicit value.

use crate::{ClientError, Result};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Options for creating or modifying files
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_unique_file_name: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Destination folder
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private_file: Option<bool>,
    /// Region of interest, `x,y,width,height`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_coordinates: Option<String>,
    /// Extra fields to return in the response
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_comma_joined"
    )]
    pub response_fields: Option<Vec<String>>,
    /// Extension descriptors, e.g. background removal or auto-tagging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_file: Option<bool>,
    #[serde(rename = "overwriteAITags", skip_serializing_if = "Option::is_none")]
    pub overwrite_ai_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_tags: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overwrite_custom_metadata: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_metadata: Option<serde_json::Value>,
}

fn serialize_comma_joined<S: Serializer>(
    value: &Option<Vec<String>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(items) => serializer.serialize_str(&items.join(",")),
        None => serializer.serialize_none(),
    }
}

impl FileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    pub fn with_unique_file_name(mut self, unique: bool) -> Self {
        self.use_unique_file_name = Some(unique);
        self
    }

    pub fn with_private_file(mut self, private: bool) -> Self {
        self.is_private_file = Some(private);
        self
    }

    pub fn with_custom_coordinates(mut self, coordinates: impl Into<String>) -> Self {
        self.custom_coordinates = Some(coordinates.into());
        self
    }

    pub fn with_response_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.response_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_extension(mut self, extension: serde_json::Value) -> Self {
        self.extensions.get_or_insert_with(Vec::new).push(extension);
        self
    }

    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    pub fn with_overwrite_file(mut self, overwrite: bool) -> Self {
        self.overwrite_file = Some(overwrite);
        self
    }

    pub fn with_overwrite_ai_tags(mut self, overwrite: bool) -> Self {
        self.overwrite_ai_tags = Some(overwrite);
        self
    }

    pub fn with_overwrite_tags(mut self, overwrite: bool) -> Self {
        self.overwrite_tags = Some(overwrite);
        self
    }

    pub fn with_overwrite_custom_metadata(mut self, overwrite: bool) -> Self {
        self.overwrite_custom_metadata = Some(overwrite);
        self
    }

    /// Set custom metadata from any serializable value
    pub fn with_custom_metadata<T: Serialize>(mut self, metadata: &T) -> Result<Self> {
        let value =
            serde_json::to_value(metadata).map_err(ClientError::Serialization)?;
        self.custom_metadata = Some(value);
        Ok(self)
    }

    /// Flatten into upload form fields.
    ///
    /// Booleans become `true`/`false`, lists are comma-joined and
    /// structured values are embedded as JSON text.
    pub fn to_form_fields(&self) -> Result<BTreeMap<String, String>> {
        let mut fields = BTreeMap::new();
        let mut put = |name: &str, value: String| {
            fields.insert(name.to_string(), value);
        };

        if let Some(v) = self.use_unique_file_name {
            put("useUniqueFileName", v.to_string());
        }
        if let Some(tags) = &self.tags {
            put("tags", tags.join(","));
        }
        if let Some(folder) = &self.folder {
            put("folder", folder.clone());
        }
        if let Some(v) = self.is_private_file {
            put("isPrivateFile", v.to_string());
        }
        if let Some(coords) = &self.custom_coordinates {
            put("customCoordinates", coords.clone());
        }
        if let Some(response_fields) = &self.response_fields {
            put("responseFields", response_fields.join(","));
        }
        if let Some(extensions) = &self.extensions {
            put("extensions", to_json_text(extensions)?);
        }
        if let Some(url) = &self.webhook_url {
            put("webhookUrl", url.clone());
        }
        if let Some(v) = self.overwrite_file {
            put("overwriteFile", v.to_string());
        }
        if let Some(v) = self.overwrite_ai_tags {
            put("overwriteAITags", v.to_string());
        }
        if let Some(v) = self.overwrite_tags {
            put("overwriteTags", v.to_string());
        }
        if let Some(v) = self.overwrite_custom_metadata {
            put("overwriteCustomMetadata", v.to_string());
        }
        if let Some(metadata) = &self.custom_metadata {
            put("customMetadata", to_json_text(metadata)?);
        }

        Ok(fields)
    }

    /// JSON body for the update-details call
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(ClientError::Serialization)
    }
}

fn to_json_text<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(ClientError::Serialization)
}
