// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Config codec: policy tree <-> JSON document with short, stable tags

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::error::{MaskError, Result};
use super::group::GroupPolicy;
use super::item::{ItemKind, ItemPolicy, DEFAULT_MASK_LENGTH, DEFAULT_MASK_STR};
use super::policy::{IgnorePolicy, MaskPolicy};
use super::size_select::SizeSelectPolicy;
use super::splitter::SeparableAttrs;

/// Discriminator field carrying the node tag
pub const TYPE_FIELD: &str = "@class";

const HANDLERS_OF_SIZE: &str = "handlersOfSize";
const HANDLER_OF_SIZE: &str = "handlerOfSize";
const DEFAULT_HANDLER: &str = "defaultHandler";

/// Registry of config tags, one per encodable node variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaskTag {
    Group,
    WithSize,
    Appender,
    Inner,
    Outer,
    Letter,
    Number,
    Ignore,
}

impl MaskTag {
    pub const ALL: [MaskTag; 8] = [
        MaskTag::Group,
        MaskTag::WithSize,
        MaskTag::Appender,
        MaskTag::Inner,
        MaskTag::Outer,
        MaskTag::Letter,
        MaskTag::Number,
        MaskTag::Ignore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MaskTag::Group => "MASK_GROUP",
            MaskTag::WithSize => "MASK_WITH_SIZE",
            MaskTag::Appender => "MASK_APPENDER",
            MaskTag::Inner => "MASK_INNER",
            MaskTag::Outer => "MASK_OUTER",
            MaskTag::Letter => "MASK_LETTER",
            MaskTag::Number => "MASK_NUMBER",
            MaskTag::Ignore => "MASK_IGNORE",
        }
    }

    /// Look up a tag by its config name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.as_str() == name)
    }

    /// Tag of a node, `None` for variants outside the registry
    pub fn of(policy: &MaskPolicy) -> Option<Self> {
        match policy {
            MaskPolicy::Ignore(_) => Some(MaskTag::Ignore),
            MaskPolicy::Item(item) => Some(match item.kind() {
                ItemKind::Inner(_) => MaskTag::Inner,
                ItemKind::Outer(_) => MaskTag::Outer,
                ItemKind::AppendOuter(_) => MaskTag::Appender,
                ItemKind::Number => MaskTag::Number,
                ItemKind::Letter => MaskTag::Letter,
            }),
            MaskPolicy::Group(_) => Some(MaskTag::Group),
            MaskPolicy::SizeSelect(_) => Some(MaskTag::WithSize),
            MaskPolicy::Custom(_) => None,
        }
    }
}

/// Scalar fields of a node document
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NodeFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    separator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    separate_limit: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output_delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    left_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    right_size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mask_str: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mask_length: Option<i32>,
}

static GLOBAL_CODEC: Lazy<ConfigCodec> = Lazy::new(ConfigCodec::default);

/// Encodes and decodes policy trees
///
/// Every node is a JSON object whose `@class` field names its [`MaskTag`].
/// Unknown tags decode to an inert ignore node; nodes without a tag cannot
/// be encoded.
///
/// ```json
/// {
///   "@class": "MASK_GROUP",
///   "separator": "@",
///   "handlersOfSize": {
///     "2": [
///       {"@class": "MASK_INNER", "leftSize": 1, "rightSize": 0},
///       {"@class": "MASK_OUTER", "leftSize": 1, "rightSize": 0,
///        "separator": ".", "maskStr": "^_^"}
///     ]
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigCodec {
    pretty: bool,
    omit_defaults: bool,
}

impl Default for ConfigCodec {
    fn default() -> Self {
        Self {
            pretty: false,
            omit_defaults: true,
        }
    }
}

impl ConfigCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide codec with default settings
    pub fn global() -> &'static ConfigCodec {
        &GLOBAL_CODEC
    }

    /// Indent encoded documents
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Leave fields at their default value out of encoded documents
    pub fn with_omit_defaults(mut self, omit_defaults: bool) -> Self {
        self.omit_defaults = omit_defaults;
        self
    }

    /// Encode a policy tree as a JSON string
    pub fn encode(&self, policy: &MaskPolicy) -> Result<String> {
        let value = self.to_value(policy)?;
        debug!(
            tag = MaskTag::of(policy).map(|tag| tag.as_str()),
            pretty = self.pretty,
            "encoded mask policy config"
        );
        let json = if self.pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }

    /// Decode a policy tree from a JSON string
    pub fn decode(&self, json: &str) -> Result<MaskPolicy> {
        let value: Value = serde_json::from_str(json)?;
        let policy = self.from_value(&value)?;
        debug!(
            tag = MaskTag::of(&policy).map(|tag| tag.as_str()),
            "decoded mask policy config"
        );
        Ok(policy)
    }

    /// Encode a policy tree as a JSON value
    pub fn to_value(&self, policy: &MaskPolicy) -> Result<Value> {
        let tag = MaskTag::of(policy).ok_or_else(|| match policy {
            MaskPolicy::Custom(custom) => MaskError::UnregisteredVariant(format!(
                "custom policy `{}` has no config tag",
                custom.name()
            )),
            _ => MaskError::UnregisteredVariant(format!("{:?}", policy)),
        })?;

        let mut fields = NodeFields::default();
        let mut children = Map::new();

        match policy {
            MaskPolicy::Ignore(ignore) => self.separable_fields(ignore.separable(), &mut fields),
            MaskPolicy::Item(item) => {
                self.separable_fields(item.separable(), &mut fields);
                self.item_fields(item, &mut fields)?;
            }
            MaskPolicy::Group(group) => {
                self.separable_fields(group.separable(), &mut fields);

                let mut sizes = Map::new();
                for (size, slots) in group.handlers_of_size() {
                    let slots = slots
                        .iter()
                        .map(|slot| match slot {
                            Some(child) => self.to_value(child),
                            None => Ok(Value::Null),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    sizes.insert(size.to_string(), Value::Array(slots));
                }
                if !sizes.is_empty() || !self.omit_defaults {
                    children.insert(HANDLERS_OF_SIZE.to_string(), Value::Object(sizes));
                }
                self.default_handler_field(group.default_handler(), &mut children)?;
            }
            MaskPolicy::SizeSelect(selector) => {
                self.separable_fields(selector.separable(), &mut fields);

                let mut sizes = Map::new();
                for (size, child) in selector.handler_of_size() {
                    sizes.insert(size.to_string(), self.to_value(child)?);
                }
                if !sizes.is_empty() || !self.omit_defaults {
                    children.insert(HANDLER_OF_SIZE.to_string(), Value::Object(sizes));
                }
                self.default_handler_field(selector.default_handler(), &mut children)?;
            }
            MaskPolicy::Custom(_) => {}
        }

        let mut node = Map::new();
        node.insert(TYPE_FIELD.to_string(), Value::String(tag.as_str().to_string()));
        if let Value::Object(scalars) = serde_json::to_value(&fields)? {
            node.extend(scalars);
        }
        node.extend(children);
        Ok(Value::Object(node))
    }

    /// Decode a policy tree from a JSON value
    pub fn from_value(&self, value: &Value) -> Result<MaskPolicy> {
        let object = value.as_object().ok_or_else(|| {
            MaskError::ConfigParse(format!("policy node must be an object, got `{}`", value))
        })?;
        let name = match object.get(TYPE_FIELD) {
            Some(Value::String(name)) => name,
            Some(other) => {
                return Err(MaskError::ConfigParse(format!(
                    "`{}` must be a string, got `{}`",
                    TYPE_FIELD, other
                )))
            }
            None => {
                return Err(MaskError::ConfigParse(format!(
                    "policy node is missing `{}`",
                    TYPE_FIELD
                )))
            }
        };

        let Some(tag) = MaskTag::from_name(name) else {
            warn!(tag = %name, "unknown mask policy tag, decoding as ignore");
            return Ok(MaskPolicy::ignore());
        };

        let fields = NodeFields::deserialize(value)?;
        let separable = separable_attrs(&fields);

        let policy: MaskPolicy = match tag {
            MaskTag::Ignore => IgnorePolicy::new().with_separable(separable).into(),
            MaskTag::Inner | MaskTag::Outer | MaskTag::Appender => {
                let left = fields.left_size.unwrap_or(0);
                let right = fields.right_size.unwrap_or(0);
                let item = match tag {
                    MaskTag::Inner => ItemPolicy::inner(left, right)?,
                    MaskTag::Outer => ItemPolicy::outer(left, right)?,
                    _ => ItemPolicy::append_outer(left, right)?,
                };
                with_item_fields(item, &fields).with_separable(separable).into()
            }
            MaskTag::Number => with_item_fields(ItemPolicy::number(), &fields)
                .with_separable(separable)
                .into(),
            MaskTag::Letter => with_item_fields(ItemPolicy::letter(), &fields)
                .with_separable(separable)
                .into(),
            MaskTag::Group => self.decode_group(object)?.with_separable(separable).into(),
            MaskTag::WithSize => self
                .decode_size_select(object)?
                .with_separable(separable)
                .into(),
        };
        Ok(policy)
    }

    fn separable_fields(&self, attrs: &SeparableAttrs, fields: &mut NodeFields) {
        fields.separator = attrs.separator().map(str::to_string);
        fields.separate_limit =
            (!self.omit_defaults || attrs.separate_limit() != 0).then_some(attrs.separate_limit());
        // a delimiter resolved from the separator is not worth writing back
        fields.output_delimiter = attrs
            .output_delimiter()
            .filter(|delimiter| !self.omit_defaults || Some(*delimiter) != attrs.separator())
            .map(str::to_string);
    }

    fn item_fields(&self, item: &ItemPolicy, fields: &mut NodeFields) -> Result<()> {
        if let ItemKind::Inner(span) | ItemKind::Outer(span) | ItemKind::AppendOuter(span) =
            item.kind()
        {
            fields.left_size = Some(size_field("leftSize", span.left)?);
            fields.right_size = Some(size_field("rightSize", span.right)?);
        }
        if !self.omit_defaults || item.mask_str() != DEFAULT_MASK_STR {
            fields.mask_str = Some(item.mask_str().to_string());
        }
        if !self.omit_defaults || item.mask_length() != DEFAULT_MASK_LENGTH {
            fields.mask_length = Some(item.mask_length());
        }
        Ok(())
    }

    fn default_handler_field(
        &self,
        handler: Option<&MaskPolicy>,
        children: &mut Map<String, Value>,
    ) -> Result<()> {
        match handler {
            Some(handler) => {
                children.insert(DEFAULT_HANDLER.to_string(), self.to_value(handler)?);
            }
            None if !self.omit_defaults => {
                children.insert(DEFAULT_HANDLER.to_string(), Value::Null);
            }
            None => {}
        }
        Ok(())
    }

    fn decode_default_handler(&self, object: &Map<String, Value>) -> Result<Option<MaskPolicy>> {
        match object.get(DEFAULT_HANDLER) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => self.from_value(value).map(Some),
        }
    }

    fn decode_group(&self, object: &Map<String, Value>) -> Result<GroupPolicy> {
        let mut group = GroupPolicy::unseparated();

        for (size, slots) in size_entries(object, HANDLERS_OF_SIZE)? {
            let slots = slots.as_array().ok_or_else(|| {
                MaskError::ConfigParse(format!(
                    "`{}` entry `{}` must be an array",
                    HANDLERS_OF_SIZE, size
                ))
            })?;
            let slots = slots
                .iter()
                .map(|slot| match slot {
                    Value::Null => Ok(None),
                    child => self.from_value(child).map(Some),
                })
                .collect::<Result<Vec<_>>>()?;
            group = group.add_slots_at(size, slots);
        }

        if let Some(handler) = self.decode_default_handler(object)? {
            group = group.with_default_handler(handler);
        }
        Ok(group)
    }

    fn decode_size_select(&self, object: &Map<String, Value>) -> Result<SizeSelectPolicy> {
        let mut selector = SizeSelectPolicy::new();

        for (size, child) in size_entries(object, HANDLER_OF_SIZE)? {
            if child.is_null() {
                continue;
            }
            selector = selector.add_handler(self.from_value(child)?, [size]);
        }

        if let Some(handler) = self.decode_default_handler(object)? {
            selector = selector.with_default_handler(handler);
        }
        Ok(selector)
    }
}

fn separable_attrs(fields: &NodeFields) -> SeparableAttrs {
    let mut attrs = SeparableAttrs::default();
    attrs.set_separator(fields.separator.clone());
    attrs.set_separate_limit(fields.separate_limit.unwrap_or(0));
    if let Some(delimiter) = &fields.output_delimiter {
        attrs.set_output_delimiter(delimiter.clone());
    }
    attrs
}

/// Edge size as a document field; sizes past `i32::MAX` have no encoding
fn size_field(name: &str, size: usize) -> Result<i32> {
    i32::try_from(size).map_err(|_| {
        MaskError::InvalidParameter(format!("{} {} does not fit a config document", name, size))
    })
}

fn with_item_fields(item: ItemPolicy, fields: &NodeFields) -> ItemPolicy {
    item.with_mask(
        fields
            .mask_str
            .clone()
            .unwrap_or_else(|| DEFAULT_MASK_STR.to_string()),
        fields.mask_length.unwrap_or(DEFAULT_MASK_LENGTH),
    )
}

/// Entries of a size-keyed child map; absent or null maps are empty
fn size_entries<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<Vec<(usize, &'a Value)>> {
    let entries = match object.get(field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(MaskError::ConfigParse(format!(
                "`{}` must be an object, got `{}`",
                field, other
            )))
        }
    };

    entries
        .iter()
        .map(|(key, value)| {
            let size = key.trim().parse::<usize>().map_err(|_| {
                MaskError::ConfigParse(format!(
                    "`{}` key `{}` is not a non-negative integer",
                    field, key
                ))
            })?;
            Ok((size, value))
        })
        .collect()
}
