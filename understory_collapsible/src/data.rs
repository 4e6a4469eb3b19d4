// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host payload decoding.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use understory_hierarchy::HostNode;

use crate::error::WidgetError;
use crate::options::Options;

/// One entry of the host's nested data, as sent over the wire.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct NodeData {
    /// Display label.
    pub name: String,
    /// Weight controlling the rendered radius.
    #[serde(rename = "SizeOfNode", default)]
    pub size: Option<f64>,
    /// Metric shown in tooltips.
    #[serde(rename = "WeightOfNode", default)]
    pub weight: Option<f64>,
    /// Tooltip text overriding the composed default.
    #[serde(default)]
    pub tooltip: Option<String>,
    /// Ordered children; `null` and absence both mean a leaf.
    #[serde(default)]
    pub children: Option<Vec<NodeData>>,
    /// Any other fields. Booleans among them can drive the `collapsed` option.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl From<NodeData> for HostNode {
    fn from(data: NodeData) -> Self {
        Self {
            name: data.name,
            size: data.size,
            weight: data.weight,
            tooltip: data.tooltip,
            flags: data
                .fields
                .into_iter()
                .filter_map(|(k, v)| v.as_bool().map(|b| (k, b)))
                .collect(),
            children: data
                .children
                .unwrap_or_default()
                .into_iter()
                .map(Self::from)
                .collect(),
        }
    }
}

/// Everything `render_value` receives: the data and the options.
#[derive(Clone, Debug, PartialEq)]
pub struct Payload {
    /// Nested data.
    pub data: NodeData,
    /// Widget options.
    pub options: Options,
}

#[derive(Deserialize)]
struct RawPayload {
    data: Value,
    #[serde(default)]
    options: Option<Value>,
}

impl Payload {
    /// Decode a `{"data": ..., "options": ...}` document.
    ///
    /// Problems with `data` are reported as [`WidgetError::MalformedHierarchy`], problems with
    /// `options` as [`WidgetError::InvalidConfiguration`].
    pub fn from_json(json: &str) -> Result<Self, WidgetError> {
        let raw: RawPayload =
            serde_json::from_str(json).map_err(|e| WidgetError::MalformedHierarchy {
                reason: e.to_string(),
            })?;
        let data = serde_json::from_value(raw.data).map_err(|e| {
            WidgetError::MalformedHierarchy {
                reason: e.to_string(),
            }
        })?;
        let options = match raw.options {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                WidgetError::InvalidConfiguration {
                    reason: e.to_string(),
                }
            })?,
            None => Options::default(),
        };
        Ok(Self { data, options })
    }
}
