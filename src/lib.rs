//! DEF Netlist Extraction Library
//!
//! This library parses DEF (Design Exchange Format) files used in
//! Electronic Design Automation (EDA) workflows and converts component
//! placements and net connectivity into id-indexed records for downstream
//! tools.

pub mod def;
pub mod error;
pub mod export;

// Re-export commonly used types
pub use def::def_parser::{build_dataset, DefParser};
pub use def::reader::DefReader;
pub use def::{
    ComponentRecord, Coord, DefContent, DefDataset, FeatureValue, HeaderInfo, InstanceInfo,
    NetConnection, NetInfo, NetProperty, NetRecord, Placement, Units,
};
pub use error::DefError;
