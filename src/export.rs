// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 defnet contributors

use std::fs::File;
use std::path::Path;

use csv::Writer;
use serde::Serialize;

use crate::def::{Coord, DefDataset};
use crate::error::DefError;

#[derive(Debug, Serialize)]
pub struct ComponentCsvRecord {
    #[serde(rename = "Id")]
    pub id: usize,
    #[serde(rename = "Instance")]
    pub instance_name: String,
    #[serde(rename = "Cell")]
    pub cell_name: String,
    #[serde(rename = "X")]
    pub x: String,
    #[serde(rename = "Y")]
    pub y: String,
    #[serde(rename = "Orientation")]
    pub orientation: String,
}

#[derive(Debug, Serialize)]
pub struct NetCsvRecord {
    #[serde(rename = "Id")]
    pub id: usize,
    #[serde(rename = "Net")]
    pub net_name: String,
    #[serde(rename = "Connections")]
    pub connections: usize,
    #[serde(rename = "Pinlist")]
    pub pinlist: String,
}

fn coord_text(coord: &Coord) -> String {
    match coord {
        Coord::Db(value) => value.to_string(),
        Coord::Raw(text) => text.clone(),
    }
}

/// Export instance placements to CSV, one row per dataset id.
pub fn export_components_to_csv<P: AsRef<Path>>(
    dataset: &DefDataset,
    file_path: P,
) -> Result<(), DefError> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    for (id, info) in &dataset.id_to_instance {
        let (x, y, orientation) = match &info.placement {
            Some(placement) => (
                coord_text(&placement.x),
                coord_text(&placement.y),
                placement.orientation.clone(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        writer.serialize(ComponentCsvRecord {
            id: *id,
            instance_name: info.instance_name.clone(),
            cell_name: info.cell_name.clone(),
            x,
            y,
            orientation,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Export net connectivity to CSV; the pin list is "instance:pin" pairs
/// joined by commas.
pub fn export_nets_to_csv<P: AsRef<Path>>(
    dataset: &DefDataset,
    file_path: P,
) -> Result<(), DefError> {
    let file = File::create(file_path)?;
    let mut writer = Writer::from_writer(file);

    for (id, info) in &dataset.id_to_net {
        let pinlist = info
            .connections
            .iter()
            .map(|c| format!("{}:{}", c.instance_name, c.pin_name))
            .collect::<Vec<String>>()
            .join(",");
        writer.serialize(NetCsvRecord {
            id: *id,
            net_name: info.net_name.clone(),
            connections: info.connections.len(),
            pinlist,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Persist the whole dataset as pretty-printed JSON.
pub fn export_dataset_to_json<P: AsRef<Path>>(
    dataset: &DefDataset,
    file_path: P,
) -> Result<(), DefError> {
    let file = File::create(file_path)?;
    serde_json::to_writer_pretty(file, dataset)?;
    Ok(())
}
