// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! JSON parsing for Postman collection exports.
//!
//! This module handles deserialization of the collection format produced by
//! Postman's "Export" feature (schema v2.0 and v2.1). The format is a tree of
//! folders and requests, where each request may carry saved example
//! responses.
//!
//! # Format Overview
//!
//! A collection export contains:
//! - An `info` block with the collection name and description
//! - A list of items, each either a folder (`item`) or a request (`request`)
//! - Each request can carry headers, a body, authentication and examples
//!
//! The export format is loose: many fields can be a string or an object,
//! and `null` shows up wherever a value is unset. The types here normalize
//! all of that so the renderer only deals with `Option` and `Vec`.
//!
//! # Example
//!
//! ```
//! use postman2md::parser::{parse_collection, ItemKind};
//!
//! let json = r#"{
//!     "info": { "name": "API" },
//!     "item": [{
//!         "name": "Ping",
//!         "request": { "method": "GET", "url": "http://x/ping" }
//!     }]
//! }"#;
//!
//! let collection = parse_collection(json).unwrap();
//! assert_eq!(collection.name, "API");
//! assert!(matches!(collection.items[0].kind, ItemKind::Request { .. }));
//! ```

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use snafu::prelude::*;

/// Error type for JSON parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// Failed to parse JSON content.
    #[snafu(display("failed to parse JSON: {source}"))]
    Json {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },
}

/// The root of a Postman collection export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawCollection")]
pub struct Collection {
    /// The collection name, taken from `info.name`.
    pub name: String,

    /// The collection description, taken from `info.description`.
    pub description: Option<String>,

    /// Top-level folders and requests, in export order.
    pub items: Vec<Item>,
}

/// A node in the collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawItem")]
pub struct Item {
    /// The display name of the folder or request.
    pub name: String,

    /// Optional markdown description attached to the node.
    pub description: Option<String>,

    /// Whether this node is a folder or a request.
    pub kind: ItemKind,
}

/// The two shapes an [`Item`] can take.
///
/// An exported node is never both a folder and a request; the parser
/// rejects input that claims to be both (or neither).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// A folder holding nested items.
    Folder(Vec<Item>),

    /// A single API call with its saved examples.
    Request {
        /// The request definition.
        request: Box<Request>,
        /// Saved example responses, in export order.
        responses: Vec<Response>,
    },
}

/// An HTTP request definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method (e.g., "GET", "POST").
    pub method: String,

    /// The request URL.
    pub url: Url,

    /// Request headers, in export order.
    pub headers: Vec<Parameter>,

    /// The request body, if any.
    pub body: Option<Body>,

    /// Request-level authentication, if any.
    pub auth: Option<Auth>,

    /// Optional markdown description of the request itself.
    pub description: Option<String>,
}

/// A request URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Url {
    /// The URL exactly as typed in Postman, variables included.
    pub raw: String,

    /// Structured query parameters.
    ///
    /// Empty when the export has no structured list, even if `raw`
    /// contains a query string.
    pub query: Vec<Parameter>,
}

/// A key/value entry: header, query parameter, urlencoded field or
/// auth credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    /// The entry name.
    #[serde(default, deserialize_with = "loose_string")]
    pub key: Option<String>,

    /// The entry value.
    #[serde(default, deserialize_with = "loose_string")]
    pub value: Option<String>,

    /// The Postman value type (e.g., "text", "string").
    #[serde(default, rename = "type", deserialize_with = "loose_string")]
    pub kind: Option<String>,

    /// Free-text description of the entry.
    #[serde(default, deserialize_with = "description_field")]
    pub description: Option<String>,

    /// Whether the entry is unchecked in Postman.
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

/// A single `multipart/form-data` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormField {
    /// The field name.
    #[serde(default, deserialize_with = "loose_string")]
    pub key: Option<String>,

    /// The field value for text fields.
    #[serde(default, deserialize_with = "loose_string")]
    pub value: Option<String>,

    /// The field type, `"text"` or `"file"`.
    #[serde(default, rename = "type", deserialize_with = "loose_string")]
    pub kind: Option<String>,

    /// Source path(s) for file fields, comma-separated when several.
    #[serde(default, deserialize_with = "file_source")]
    pub src: Option<String>,

    /// Whether the field is unchecked in Postman.
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

impl FormField {
    /// Returns `true` for file upload fields.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind.as_deref() == Some("file")
    }
}

/// A request body, tagged by its Postman `mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Free-form text, usually JSON.
    Raw {
        /// The body text, verbatim.
        raw: String,
        /// Highlight language from `options.raw.language`.
        language: Option<String>,
    },

    /// `multipart/form-data` fields.
    FormData(Vec<FormField>),

    /// `application/x-www-form-urlencoded` fields.
    UrlEncoded(Vec<Parameter>),

    /// A GraphQL query.
    GraphQl {
        /// The query document.
        query: String,
        /// The variables, as JSON text.
        variables: Option<String>,
    },

    /// A binary file upload.
    File {
        /// Source path of the uploaded file.
        src: Option<String>,
    },
}

impl Body {
    /// The Postman mode name for this body.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::Raw { .. } => "raw",
            Self::FormData(_) => "formdata",
            Self::UrlEncoded(_) => "urlencoded",
            Self::GraphQl { .. } => "graphql",
            Self::File { .. } => "file",
        }
    }
}

/// Request authentication, tagged by its Postman `type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Auth {
    /// Bearer token authentication with its credential entries.
    Bearer(Vec<Parameter>),

    /// Any other scheme (basic, apikey, oauth2, noauth, ...).
    Other {
        /// The scheme name as exported.
        kind: String,
    },
}

impl Auth {
    /// The Postman type name for this scheme.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Bearer(_) => "bearer",
            Self::Other { kind } => kind,
        }
    }
}

/// A saved example response.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// The example name.
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,

    /// The HTTP status code.
    #[serde(default)]
    pub code: Option<u16>,

    /// The HTTP status text (e.g., "OK").
    #[serde(default)]
    pub status: Option<String>,

    /// The response body text.
    #[serde(default)]
    pub body: Option<String>,

    /// The request that produced this example.
    #[serde(default)]
    pub original_request: Option<Box<Request>>,

    /// Postman's guess at the body language (e.g., "json", "html").
    #[serde(default, rename = "_postman_previewlanguage")]
    pub preview_language: Option<String>,
}

#[derive(Deserialize)]
struct RawCollection {
    info: RawInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    item: Vec<Item>,
}

#[derive(Deserialize)]
struct RawInfo {
    name: String,
    #[serde(default, deserialize_with = "description_field")]
    description: Option<String>,
}

impl From<RawCollection> for Collection {
    fn from(raw: RawCollection) -> Self {
        Self {
            name: raw.info.name,
            description: raw.info.description,
            items: raw.item,
        }
    }
}

#[derive(Deserialize)]
struct RawItem {
    name: String,
    #[serde(default, deserialize_with = "description_field")]
    description: Option<String>,
    #[serde(default)]
    item: Option<Vec<Item>>,
    #[serde(default)]
    request: Option<Request>,
    #[serde(default, deserialize_with = "null_as_default")]
    response: Vec<Response>,
}

impl TryFrom<RawItem> for Item {
    type Error = String;

    fn try_from(raw: RawItem) -> Result<Self, Self::Error> {
        let kind = match (raw.item, raw.request) {
            (Some(children), None) => ItemKind::Folder(children),
            (None, Some(request)) => ItemKind::Request {
                request: Box::new(request),
                responses: raw.response,
            },
            (Some(_), Some(_)) => {
                return Err(format!(
                    "item `{}` has both `item` and `request`",
                    raw.name
                ));
            }
            (None, None) => {
                return Err(format!(
                    "item `{}` has neither `item` nor `request`",
                    raw.name
                ));
            }
        };

        Ok(Self {
            name: raw.name,
            description: raw.description,
            kind,
        })
    }
}

#[derive(Deserialize)]
struct RawRequestObject {
    #[serde(default, deserialize_with = "loose_string")]
    method: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    url: Url,
    #[serde(default, deserialize_with = "header_field")]
    header: Vec<Parameter>,
    #[serde(default, deserialize_with = "body_field")]
    body: Option<Body>,
    #[serde(default, deserialize_with = "auth_field")]
    auth: Option<Auth>,
    #[serde(default, deserialize_with = "description_field")]
    description: Option<String>,
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        // A bare string is shorthand for a GET to that URL.
        if let Value::String(raw) = value {
            return Ok(Self {
                method: DEFAULT_METHOD.to_owned(),
                url: Url {
                    raw,
                    query: Vec::new(),
                },
                headers: Vec::new(),
                body: None,
                auth: None,
                description: None,
            });
        }

        let req = RawRequestObject::deserialize(value).map_err(serde::de::Error::custom)?;
        Ok(Self {
            method: req.method.unwrap_or_else(|| DEFAULT_METHOD.to_owned()),
            url: req.url,
            headers: req.header,
            body: req.body,
            auth: req.auth,
            description: req.description,
        })
    }
}

/// Postman sends a GET when the method is left unset.
const DEFAULT_METHOD: &str = "GET";

#[derive(Deserialize)]
struct RawUrlObject {
    #[serde(default, deserialize_with = "null_as_default")]
    raw: String,
    #[serde(default, deserialize_with = "null_as_default")]
    query: Vec<Parameter>,
}

impl<'de> Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Value::String(raw) = value {
            return Ok(Self {
                raw,
                query: Vec::new(),
            });
        }

        let url = RawUrlObject::deserialize(value).map_err(serde::de::Error::custom)?;
        Ok(Self {
            raw: url.raw,
            query: url.query,
        })
    }
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts strings, numbers and booleans, rendering the latter as JSON text.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value))
}

/// Accepts a plain string or a `{ "content": ... }` description object.
fn description_field<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::String(text) => Some(text.clone()),
        Value::Object(_) => get_string(&value, &["content"]),
        _ => None,
    })
}

/// Accepts a single path or an array of paths.
fn file_source<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::String(path) => Some(path.clone()),
        Value::Array(paths) => {
            let paths: Vec<&str> = paths.iter().filter_map(Value::as_str).collect();
            (!paths.is_empty()).then(|| paths.join(", "))
        }
        _ => None,
    })
}

/// Accepts a header array or a raw `Key: Value` header block.
fn header_field<'de, D>(deserializer: D) -> Result<Vec<Parameter>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(block) => Ok(parse_header_block(&block)),
        Value::Array(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(Vec::new()),
    }
}

/// Splits a raw header block into entries, skipping lines without a colon.
fn parse_header_block(block: &str) -> Vec<Parameter> {
    block
        .lines()
        .filter_map(|line| line.split_once(':'))
        .map(|(key, value)| Parameter {
            key: Some(key.trim().to_owned()),
            value: Some(value.trim().to_owned()),
            ..Parameter::default()
        })
        .collect()
}

fn body_field<'de, D>(deserializer: D) -> Result<Option<Body>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    body_from_value(&value).map_err(serde::de::Error::custom)
}

/// Builds a [`Body`] from its JSON form, dispatching on `mode`.
///
/// `mode: "none"`, a missing mode, or an unrecognized mode all mean
/// "no body".
fn body_from_value(value: &Value) -> Result<Option<Body>, serde_json::Error> {
    let Some(mode) = get_str(value, &["mode"]) else {
        return Ok(None);
    };

    Ok(Some(match mode {
        "raw" => Body::Raw {
            raw: get_string(value, &["raw"]).unwrap_or_default(),
            language: get_string(value, &["options", "raw", "language"]),
        },
        "formdata" => Body::FormData(array_field(value, "formdata")?),
        "urlencoded" => Body::UrlEncoded(array_field(value, "urlencoded")?),
        "graphql" => Body::GraphQl {
            query: get_string(value, &["graphql", "query"]).unwrap_or_default(),
            variables: get_string(value, &["graphql", "variables"])
                .filter(|vars| !vars.trim().is_empty()),
        },
        "file" => Body::File {
            src: get_string(value, &["file", "src"]),
        },
        "none" => return Ok(None),
        other => {
            tracing::warn!(mode = other, "skipping request body with unknown mode");
            return Ok(None);
        }
    }))
}

fn auth_field<'de, D>(deserializer: D) -> Result<Option<Auth>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    auth_from_value(&value).map_err(serde::de::Error::custom)
}

/// Builds an [`Auth`] from its JSON form, dispatching on `type`.
fn auth_from_value(value: &Value) -> Result<Option<Auth>, serde_json::Error> {
    let Some(kind) = get_str(value, &["type"]) else {
        return Ok(None);
    };

    if kind != "bearer" {
        return Ok(Some(Auth::Other {
            kind: kind.to_owned(),
        }));
    }

    let params: Vec<Parameter> = match value.get("bearer") {
        // Schema v2.0 exported credentials as a plain map.
        Some(Value::Object(map)) => map
            .iter()
            .map(|(key, val)| Parameter {
                key: Some(key.clone()),
                value: scalar_text(val),
                ..Parameter::default()
            })
            .collect(),
        Some(list @ Value::Array(_)) => Vec::deserialize(list)?,
        _ => Vec::new(),
    };

    Ok(Some(Auth::Bearer(params)))
}

/// Deserializes an optional array field, treating `null` and absence as empty.
fn array_field<T>(value: &Value, key: &str) -> Result<Vec<T>, serde_json::Error>
where
    T: for<'de> Deserialize<'de>,
{
    match value.get(key) {
        Some(list @ Value::Array(_)) => Vec::deserialize(list),
        _ => Ok(Vec::new()),
    }
}

/// Renders a JSON scalar as text; `null`, arrays and objects yield `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Navigates a JSON path and returns the string value at the end.
///
/// # Arguments
///
/// * `value` - The root JSON value to navigate from
/// * `path` - A sequence of keys to follow through the JSON structure
fn get_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    current.as_str()
}

/// Like [`get_str`] but returns an owned `String`.
fn get_string(value: &Value, path: &[&str]) -> Option<String> {
    get_str(value, path).map(str::to_owned)
}

/// Parses a JSON string into a [`Collection`].
///
/// This is the main entry point for parsing Postman collection exports.
///
/// # Arguments
///
/// * `json_str` - The raw JSON content of a collection export file
///
/// # Errors
///
/// Returns an error if the JSON is malformed, a required name is missing,
/// or a tree node is neither a folder nor a request.
///
/// # Example
///
/// ```
/// use postman2md::parser::parse_collection;
///
/// let json = r#"{ "info": { "name": "Empty" }, "item": [] }"#;
///
/// let collection = parse_collection(json).unwrap();
/// assert_eq!(collection.name, "Empty");
/// assert!(collection.items.is_empty());
/// ```
pub fn parse_collection(json_str: &str) -> Result<Collection, ParseError> {
    serde_json::from_str(json_str).context(JsonSnafu)
}
