// Janusforge - JanusGraph Schema and Sample Data Engineering
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Geometry descriptors.
//!
//! A geoshape field in a model document describes its coordinates as nested
//! `array` schemas whose numeric leaves carry `sample`, `default` or `enum`
//! values. [`Geometry::from_field`] reads that tree into concrete numbers,
//! and [`Geometry::to_field_schema`] builds the tree back from a geometry
//! decoded from GeoJSON-shaped server output.

use crate::schema::{NumberMode, PropertyKind, PropertySchema};
use serde_json::Value;

/// Value used for a coordinate that declares no usable number.
pub const DEFAULT_COORDINATE: f64 = 37.97;

/// Well-known text used when a `wkt` field carries no sample.
pub const DEFAULT_WKT: &str = "POLYGON ((35.4 48.9, 35.6 48.9, 35.6 49.1, 35.4 49.1, 35.4 48.9))";

/// One coordinate tuple.
pub type Position = Vec<f64>;

/// A sequence of positions forming a line or ring.
pub type Ring = Vec<Position>;

/// A geometry with resolved coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Up to two coordinates.
    Point(Position),
    /// Up to four coordinates.
    Box(Position),
    /// Center and radius.
    Circle {
        /// Up to two center coordinates.
        center: Position,
        /// Radius.
        radius: f64,
    },
    /// A line string.
    Line(Ring),
    /// A polygon made of one or more rings.
    Polygon(Vec<Ring>),
    /// Several points.
    MultiPoint(Vec<Position>),
    /// Several line strings.
    MultiLineString(Vec<Ring>),
    /// Several polygons, each made of rings.
    MultiPolygon(Vec<Vec<Ring>>),
    /// Nested geometries.
    Collection(Vec<Geometry>),
    /// Raw well-known text. `None` renders the default polygon.
    Wkt(Option<String>),
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Resolve a numeric leaf: sample, then default, then the first enum value,
/// then [`DEFAULT_COORDINATE`].
pub fn number_sample(leaf: Option<&PropertySchema>) -> f64 {
    leaf.and_then(|leaf| {
        leaf.sample
            .as_ref()
            .and_then(numeric)
            .or_else(|| leaf.default.as_ref().and_then(numeric))
            .or_else(|| leaf.enumeration.first().and_then(numeric))
    })
    .unwrap_or(DEFAULT_COORDINATE)
}

/// Format a coordinate the way a script literal expects it.
///
/// Whole numbers print without a fractional part.
pub fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn coordinates(field: &PropertySchema) -> &[PropertySchema] {
    field
        .properties
        .get("coordinates")
        .map(|c| c.items.as_slice())
        .unwrap_or(&[])
}

fn positions(nodes: &[PropertySchema]) -> Ring {
    nodes.iter().map(|node| position_of(&node.items, usize::MAX)).collect()
}

fn rings(nodes: &[PropertySchema]) -> Vec<Ring> {
    nodes.iter().map(|node| positions(&node.items)).collect()
}

fn wkt_sample(field: &PropertySchema) -> Option<String> {
    let declared = field
        .properties
        .get("WKT")
        .map(|wkt| (wkt.sample.clone(), wkt.enumeration.first().cloned()))
        .or_else(|| {
            field.extra.get("WKT").map(|wkt| {
                (
                    wkt.get("sample").cloned(),
                    wkt.get("enum").and_then(|e| e.get(0)).cloned(),
                )
            })
        })?;
    let (sample, first_enum) = declared;
    [sample, first_enum]
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
}

impl Geometry {
    /// Read a geoshape field of a model document.
    ///
    /// Unknown or missing subtypes are treated as well-known text.
    pub fn from_field(field: &PropertySchema) -> Geometry {
        let coords = coordinates(field);
        match field.geo_subtype.as_deref() {
            Some("point") => Geometry::Point(position_of(coords, 2)),
            Some("box") => Geometry::Box(position_of(coords, 4)),
            Some("circle") => Geometry::Circle {
                center: position_of(coords, 2),
                radius: number_sample(field.properties.get("radius")),
            },
            Some("line") => Geometry::Line(positions(coords)),
            Some("polygon") => Geometry::Polygon(rings(coords)),
            Some("multipoint") => Geometry::MultiPoint(positions(coords)),
            Some("multilinestring") => Geometry::MultiLineString(rings(coords)),
            Some("multipolygon") => {
                Geometry::MultiPolygon(coords.iter().map(|polygon| rings(&polygon.items)).collect())
            }
            Some("geometrycollection") => {
                let children = field
                    .properties
                    .get("geometries")
                    .map(|g| g.items.as_slice())
                    .unwrap_or(&[]);
                Geometry::Collection(children.iter().map(Geometry::from_field).collect())
            }
            _ => Geometry::Wkt(wkt_sample(field)),
        }
    }

    /// The subtype name used in model documents.
    pub fn subtype(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "point",
            Geometry::Box(_) => "box",
            Geometry::Circle { .. } => "circle",
            Geometry::Line(_) => "line",
            Geometry::Polygon(_) => "polygon",
            Geometry::MultiPoint(_) => "multipoint",
            Geometry::MultiLineString(_) => "multilinestring",
            Geometry::MultiPolygon(_) => "multipolygon",
            Geometry::Collection(_) => "geometrycollection",
            Geometry::Wkt(_) => "wkt",
        }
    }

    /// Decode a plain GeoJSON-shaped value as returned by the server.
    ///
    /// A two-element `coordinates` array without a `type` is a point. A
    /// nested `geometry` object takes precedence over the outer value for
    /// every other shape. Anything unrecognized is well-known text.
    pub fn from_geojson(value: &Value) -> Geometry {
        let type_of = |v: &Value| v.get("type").and_then(Value::as_str).map(str::to_string);
        let outer_type = type_of(value);
        let outer_coords = value.get("coordinates").and_then(Value::as_array);

        let is_point = (outer_type.is_none() && outer_coords.map(Vec::len) == Some(2))
            || outer_type.as_deref() == Some("Point");
        if is_point {
            return Geometry::Point(decode_position(value.get("coordinates")));
        }

        let data = value.get("geometry").unwrap_or(value);
        let coords = data.get("coordinates");
        match type_of(data).as_deref() {
            Some("Circle") => Geometry::Circle {
                center: decode_position(coords),
                radius: data.get("radius").and_then(numeric).unwrap_or(DEFAULT_COORDINATE),
            },
            Some("Polygon") => Geometry::Polygon(decode_rings(coords)),
            Some("LineString") => Geometry::Line(decode_ring(coords)),
            Some("MultiPoint") => Geometry::MultiPoint(decode_ring(coords)),
            Some("MultiLineString") => Geometry::MultiLineString(decode_rings(coords)),
            Some("MultiPolygon") => Geometry::MultiPolygon(
                array(coords).iter().map(|p| decode_rings(Some(p))).collect(),
            ),
            Some("GeometryCollection") => Geometry::Collection(
                array(data.get("geometries"))
                    .iter()
                    .map(Geometry::from_geojson)
                    .collect(),
            ),
            _ => Geometry::Wkt(None),
        }
    }

    /// Build the model-document field describing this geometry.
    pub fn to_field_schema(&self) -> PropertySchema {
        let field = PropertySchema::of(PropertyKind::Geoshape).with_geo_subtype(self.subtype());
        match self {
            Geometry::Point(p) | Geometry::Box(p) => {
                field.with_property("coordinates", array_node(number_leaves(p)))
            }
            Geometry::Circle { center, radius } => field
                .with_property(
                    "radius",
                    PropertySchema::number(Some(NumberMode::Double)).with_sample(*radius),
                )
                .with_property("coordinates", array_node(number_leaves(center))),
            Geometry::Line(ring) | Geometry::MultiPoint(ring) => {
                field.with_property("coordinates", array_node(ring_nodes(ring)))
            }
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => field.with_property(
                "coordinates",
                array_node(rings.iter().map(|r| array_node(ring_nodes(r))).collect()),
            ),
            Geometry::MultiPolygon(polygons) => field.with_property(
                "coordinates",
                array_node(
                    polygons
                        .iter()
                        .map(|rings| {
                            array_node(rings.iter().map(|r| array_node(ring_nodes(r))).collect())
                        })
                        .collect(),
                ),
            ),
            Geometry::Collection(children) => field.with_property(
                "geometries",
                array_node(children.iter().map(Geometry::to_field_schema).collect()),
            ),
            Geometry::Wkt(sample) => {
                let wkt = match sample {
                    Some(s) => PropertySchema::string().with_sample(s.clone()),
                    None => PropertySchema::string(),
                };
                field.with_property("WKT", wkt)
            }
        }
    }
}

fn position_of(coords: &[PropertySchema], take: usize) -> Position {
    coords.iter().take(take).map(|leaf| number_sample(Some(leaf))).collect()
}

fn array(value: Option<&Value>) -> &[Value] {
    value.and_then(Value::as_array).map(Vec::as_slice).unwrap_or(&[])
}

fn decode_position(value: Option<&Value>) -> Position {
    array(value).iter().filter_map(numeric).collect()
}

fn decode_ring(value: Option<&Value>) -> Ring {
    array(value).iter().map(|p| decode_position(Some(p))).collect()
}

fn decode_rings(value: Option<&Value>) -> Vec<Ring> {
    array(value).iter().map(|r| decode_ring(Some(r))).collect()
}

fn array_node(items: Vec<PropertySchema>) -> PropertySchema {
    PropertySchema::of(PropertyKind::Array).with_items(items)
}

fn number_leaves(position: &[f64]) -> Vec<PropertySchema> {
    position
        .iter()
        .map(|c| PropertySchema::number(Some(NumberMode::Double)).with_sample(*c))
        .collect()
}

fn ring_nodes(ring: &[Position]) -> Vec<PropertySchema> {
    ring.iter().map(|p| array_node(number_leaves(p))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> PropertySchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_point_takes_two_coordinates() {
        let f = field(json!({
            "type": "geoshape",
            "subType": "point",
            "properties": {"coordinates": {"type": "array", "items": [
                {"type": "number", "sample": 35.4},
                {"type": "number", "sample": 48.9},
                {"type": "number", "sample": 1}
            ]}}
        }));
        assert_eq!(Geometry::from_field(&f), Geometry::Point(vec![35.4, 48.9]));
    }

    #[test]
    fn test_number_fallback_chain() {
        let sample = PropertySchema::number(None).with_sample("12.5");
        assert_eq!(number_sample(Some(&sample)), 12.5);

        let mut with_default = PropertySchema::number(None);
        with_default.default = Some(json!(3));
        assert_eq!(number_sample(Some(&with_default)), 3.0);

        let mut with_enum = PropertySchema::number(None);
        with_enum.enumeration = vec![json!(8), json!(9)];
        assert_eq!(number_sample(Some(&with_enum)), 8.0);

        assert_eq!(number_sample(Some(&PropertySchema::number(None))), DEFAULT_COORDINATE);
        assert_eq!(number_sample(None), DEFAULT_COORDINATE);
    }

    #[test]
    fn test_zero_sample_is_kept() {
        let zero = PropertySchema::number(None).with_sample(0);
        assert_eq!(number_sample(Some(&zero)), 0.0);
    }

    #[test]
    fn test_circle_radius_default() {
        let f = field(json!({"type": "geoshape", "subType": "circle"}));
        assert_eq!(
            Geometry::from_field(&f),
            Geometry::Circle { center: vec![], radius: DEFAULT_COORDINATE }
        );
    }

    #[test]
    fn test_unknown_subtype_is_wkt() {
        let f = field(json!({"type": "geoshape", "subType": "blob"}));
        assert_eq!(Geometry::from_field(&f), Geometry::Wkt(None));

        let f = field(json!({
            "type": "geoshape",
            "subType": "wkt",
            "properties": {"WKT": {"type": "string", "sample": "POINT (1 2)"}}
        }));
        assert_eq!(Geometry::from_field(&f), Geometry::Wkt(Some("POINT (1 2)".into())));
    }

    #[test]
    fn test_decode_point_without_type() {
        let g = Geometry::from_geojson(&json!({"coordinates": [1.5, 2.5]}));
        assert_eq!(g, Geometry::Point(vec![1.5, 2.5]));
    }

    #[test]
    fn test_decode_polygon_from_geometry() {
        let g = Geometry::from_geojson(&json!({
            "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}
        }));
        match g {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0][1], vec![1.0, 0.0]);
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_is_wkt() {
        assert_eq!(Geometry::from_geojson(&json!({"type": "Weird"})), Geometry::Wkt(None));
    }

    #[test]
    fn test_field_schema_reads_back() {
        let original = Geometry::Polygon(vec![vec![vec![1.0, 2.0], vec![3.0, 4.0]]]);
        let schema = original.to_field_schema();
        assert_eq!(schema.geo_subtype.as_deref(), Some("polygon"));
        assert_eq!(Geometry::from_field(&schema), original);
    }

    #[test]
    fn test_format_coordinate() {
        assert_eq!(format_coordinate(35.4), "35.4");
        assert_eq!(format_coordinate(35.0), "35");
        assert_eq!(format_coordinate(-2.0), "-2");
        assert_eq!(format_coordinate(37.97), "37.97");
    }
}
