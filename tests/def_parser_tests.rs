//! Test cases for the DEF parsing pipeline
//!
//! Tests cover:
//! - Header attribute extraction (VERSION, DESIGN, UNITS, ...)
//! - Component parsing with single- and multi-line entries
//! - Net parsing with connection/property gating
//! - Degraded input that must not abort the parse

use defnet::def::{Coord, FeatureValue, Placement};
use defnet::DefParser;

#[test]
fn test_basic_def_parsing() {
    let def_content = r#"
VERSION 5.8 ;
NAMESCASESENSITIVE ON ;
DIVIDERCHAR "/" ;
BUSBITCHARS "[]" ;

DESIGN simple_design ;
TECHNOLOGY tech0 ;
UNITS DISTANCE MICRONS 2000 ;

DIEAREA ( 0 0 ) ( 100000 100000 ) ;

COMPONENTS 3 ;
    - INV1 INVX1 + PLACED ( 10000 20000 ) N ;
    - NAND1 NAND2X1 + PLACED ( 30000 20000 ) FS ;
    - BUF1 BUFX1 + SOURCE DIST + FIXED ( 50000 20000 ) S ;
END COMPONENTS

NETS 2 ;
    - IN1 ( PIN IN1 ) ( INV1 A ) + USE SIGNAL ;
    - W1 ( INV1 Y ) ( NAND1 A ) ( BUF1 A ) ;
END NETS

END DESIGN
"#;

    let parsed = DefParser::new().parse_content(def_content);

    assert_eq!(parsed.header.version.as_deref(), Some("5.8"));
    assert_eq!(parsed.header.design.as_deref(), Some("simple_design"));
    assert_eq!(parsed.header.technology.as_deref(), Some("tech0"));
    assert_eq!(parsed.header.dividerchar, Some('/'));
    assert_eq!(parsed.header.busbitchars.as_deref(), Some("[]"));
    assert_eq!(parsed.header.units.database_units_per_micron, 2000);
    assert!(!parsed.header.units.default_used);

    assert_eq!(parsed.components.len(), 3);

    let inv1 = &parsed.components[0];
    assert_eq!(inv1.instance_name, "INV1");
    assert_eq!(inv1.cell_name, "INVX1");
    assert_eq!(inv1.placement, Some(Placement::db(10000, 20000, "N")));

    let buf1 = &parsed.components[2];
    assert_eq!(
        buf1.features.get("SOURCE"),
        Some(&FeatureValue::Scalar("DIST".to_string()))
    );
    assert_eq!(buf1.placement, Some(Placement::db(50000, 20000, "S")));

    assert_eq!(parsed.nets.len(), 2);
    let in1 = &parsed.nets[0];
    assert_eq!(in1.net_name, "IN1");
    assert_eq!(in1.connections.len(), 2);
    assert_eq!(in1.connections[0].instance_name, "PIN");
    assert_eq!(in1.properties.len(), 1);
    assert_eq!(in1.properties[0].name, "USE");
    assert_eq!(in1.properties[0].value, Some("SIGNAL".to_string()));

    let w1 = &parsed.nets[1];
    assert_eq!(w1.connections.len(), 3);
    assert!(w1.properties.is_empty());
}

#[test]
fn test_multi_line_component_entries() {
    // Cadence Innovus splits entries across physical lines with the
    // terminator on its own line.
    let def_content = r#"
VERSION 5.8 ;
DESIGN soc_top ;
COMPONENTS 2 ;
- u_io_top/u_TEST_west_9 HPDWUW0608DGP_H + FIXED ( 0 4735000 ) E
 ;
- u_io_top/u_RST_N_west_11 HPDWUW0608DGP_H
  + SOURCE DIST
  + FIXED ( 0 4655000 ) E
 ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.components.len(), 2);

    let first = &parsed.components[0];
    assert_eq!(first.instance_name, "u_io_top/u_TEST_west_9");
    assert_eq!(first.placement, Some(Placement::db(0, 4735000, "E")));

    let second = &parsed.components[1];
    assert_eq!(second.instance_name, "u_io_top/u_RST_N_west_11");
    assert_eq!(
        second.features.get("SOURCE"),
        Some(&FeatureValue::Scalar("DIST".to_string()))
    );
    assert_eq!(second.placement, Some(Placement::db(0, 4655000, "E")));
}

#[test]
fn test_multi_line_net_entries_with_property_gating() {
    let def_content = r#"
NETS 2 ;
- clk ( PIN clk ) ( U1 CK )
  ( U2 CK )
  + USE CLOCK ;
- data ( U1 Q )
  + ROUTED metal1 ( 100 200 ) ( 300 200 )
  ( U2 D ) ;
END NETS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.nets.len(), 2);

    let clk = &parsed.nets[0];
    assert_eq!(clk.connections.len(), 3);
    assert_eq!(clk.properties.len(), 1);

    // Groups after the first `+` keyword are routing data, not connections.
    let data = &parsed.nets[1];
    assert_eq!(data.connections.len(), 1);
    assert_eq!(data.connections[0].instance_name, "U1");
    assert_eq!(data.properties.len(), 1);
    assert_eq!(data.properties[0].name, "ROUTED");
    assert_eq!(data.properties[0].value, Some("metal1".to_string()));
}

#[test]
fn test_units_default_when_absent() {
    let parsed = DefParser::new().parse_content("VERSION 5.8 ;\n");
    assert_eq!(parsed.header.units.database_units_per_micron, 1000);
    assert!(parsed.header.units.default_used);
}

#[test]
fn test_units_whitespace_insensitive() {
    let parsed = DefParser::new().parse_content("UNITS    DISTANCE  MICRONS   100 ;\n");
    assert_eq!(parsed.header.units.database_units_per_micron, 100);
    assert!(!parsed.header.units.default_used);
}

#[test]
fn test_units_malformed_falls_back_to_default() {
    let parsed = DefParser::new().parse_content("UNITS DISTANCE MICRONS abc ;\n");
    assert_eq!(parsed.header.units.database_units_per_micron, 1000);
    assert!(parsed.header.units.default_used);
}

#[test]
fn test_unknown_prefix_then_components_block() {
    let def_content = r#"
HISTORY created by a tool nobody remembers ;
COMPONENTS 2 ;
- U1 INVX1 + PLACED ( 100 200 ) N ;
- U2 NAND2X1 + PLACED ( 300 200 ) N ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.components.len(), 2);
}

#[test]
fn test_comment_lines_are_skipped() {
    let def_content = r#"
# Generated by: some router
# Date: long ago
VERSION 5.7 ;
COMPONENTS 1 ;
- U1 INVX1 + PLACED ( 1 2 ) N ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.header.version.as_deref(), Some("5.7"));
    assert_eq!(parsed.components.len(), 1);
}

#[test]
fn test_malformed_component_entry_degrades_to_sentinel() {
    let def_content = r#"
COMPONENTS 2 ;
- LONELY ;
- U1 INVX1 + PLACED ( 1 2 ) N ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.components.len(), 2);
    assert_eq!(parsed.components[0].instance_name, "UNKNOWN");
    assert_eq!(parsed.components[1].instance_name, "U1");
}

#[test]
fn test_non_numeric_placement_keeps_raw_text() {
    let def_content = r#"
COMPONENTS 1 ;
- U1 INVX1 + PLACED ( 12.5 200 ) N ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    let placement = parsed.components[0]
        .placement
        .as_ref()
        .expect("placement survives a failed integer parse");
    assert_eq!(placement.x, Coord::Raw("12.5".to_string()));
    assert_eq!(placement.y, Coord::Db(200));
}

#[test]
fn test_component_without_placement_has_none() {
    let def_content = r#"
COMPONENTS 1 ;
- U1 INVX1 + SOURCE NETLIST ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert!(parsed.components[0].placement.is_none());
}

#[test]
fn test_sections_between_components_and_nets_are_isolated() {
    let def_content = r#"
COMPONENTS 1 ;
- U1 INVX1 + PLACED ( 1 2 ) N ;
END COMPONENTS
SPECIALNETS 1 ;
- VDD ( * VDD ) + USE POWER ;
END SPECIALNETS
NETS 1 ;
- n1 ( U1 A ) ( U1 Y ) ;
END NETS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    assert_eq!(parsed.components.len(), 1);
    assert_eq!(parsed.nets.len(), 1);
    assert_eq!(parsed.nets[0].net_name, "n1");
}

#[test]
fn test_raw_lines_attached_to_multiline_records() {
    let def_content = r#"
COMPONENTS 1 ;
- U1 INVX1
  + PLACED ( 1 2 ) N ;
END COMPONENTS
"#;

    let parsed = DefParser::new().parse_content(def_content);
    let raw = parsed.components[0]
        .raw_lines
        .as_ref()
        .expect("multi-line extractor keeps the original lines");
    assert_eq!(raw.len(), 2);
}
