// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Value of a `+ NAME value...` feature run on a component entry.
///
/// Exactly one value is stored as `Scalar`, two or more as `Multi`. A
/// one-element `Multi` never occurs; downstream consumers rely on the
/// distinction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureValue {
    Scalar(String),
    Multi(Vec<String>),
}

/// A placement coordinate in database units. Coordinates that fail integer
/// parsing keep their raw text instead of dropping the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Coord {
    Db(i64),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub x: Coord,
    pub y: Coord,
    pub orientation: String, // N, S, E, W, FN, FS, FE, FW
}

impl Placement {
    pub fn db(x: i64, y: i64, orientation: &str) -> Self {
        Self {
            x: Coord::Db(x),
            y: Coord::Db(y),
            orientation: orientation.to_string(),
        }
    }
}

/// One entry of the COMPONENTS section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub instance_name: String,
    pub cell_name: String,
    pub features: HashMap<String, FeatureValue>,
    /// Absent when the entry carried no structurally valid placement.
    pub placement: Option<Placement>,
    /// Original physical lines of the entry, kept for diagnostics only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_lines: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetConnection {
    pub instance_name: String,
    pub pin_name: String,
}

impl NetConnection {
    pub fn new(instance_name: &str, pin_name: &str) -> Self {
        Self {
            instance_name: instance_name.to_string(),
            pin_name: pin_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetProperty {
    pub name: String,
    pub value: Option<String>,
}

/// One entry of the NETS section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetRecord {
    pub net_name: String,
    pub connections: Vec<NetConnection>,
    pub properties: Vec<NetProperty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_lines: Option<Vec<String>>,
}

/// Coordinate scale from the UNITS DISTANCE MICRONS statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Units {
    pub distance: String,
    pub database_units_per_micron: i64,
    /// True when UNITS was absent or unparsable and the 1000 default applied.
    pub default_used: bool,
}

impl Units {
    pub const DEFAULT_DB_PER_MICRON: i64 = 1000;

    pub fn parsed(database_units_per_micron: i64) -> Self {
        Self {
            distance: "MICRONS".to_string(),
            database_units_per_micron,
            default_used: false,
        }
    }
}

impl Default for Units {
    fn default() -> Self {
        Self {
            distance: "MICRONS".to_string(),
            database_units_per_micron: Self::DEFAULT_DB_PER_MICRON,
            default_used: true,
        }
    }
}

/// Header attributes of a DEF file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeaderInfo {
    pub version: Option<String>,
    pub design: Option<String>,
    pub technology: Option<String>,
    #[serde(default)]
    pub units: Units,
    pub dividerchar: Option<char>,
    pub busbitchars: Option<String>,
}

/// Structured records of one parsed DEF file, before id indexing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefContent {
    pub components: Vec<ComponentRecord>,
    pub nets: Vec<NetRecord>,
    pub header: HeaderInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub instance_name: String,
    pub cell_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
}

/// Net entry of the final dataset; connections to the external-pin marker
/// instance `PIN` are already filtered out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetInfo {
    pub net_name: String,
    pub connections: Vec<NetConnection>,
}

/// Id-indexed dataset handed to downstream tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefDataset {
    pub instance_to_id: HashMap<String, usize>,
    pub id_to_instance: BTreeMap<usize, InstanceInfo>,
    pub net_to_id: HashMap<String, usize>,
    pub id_to_net: BTreeMap<usize, NetInfo>,
    pub header: HeaderInfo,
}

pub mod def_parser;
pub mod extractor;
pub mod reader;
pub mod transform;
