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


//! Geoshape constructor text.
//!
//! A geometry renders either as a standalone `Geoshape` value or, inside a
//! geometry collection, as a spatial4j shape-factory expression. Each builder
//! step of a multi-line shape continues on its own indented line.

use crate::script::quote_double;
use janusforge_core::geometry::{format_coordinate, Position, Ring, DEFAULT_WKT};
use janusforge_core::Geometry;

const SHAPE_FACTORY: &str = "Geoshape.getShapeFactory()";
const DISTANCE_UTILS: &str = "org.locationtech.spatial4j.distance.DistanceUtils";
const INDENT: &str = "    ";

fn continuation() -> String {
    format!("\n{}{}", INDENT, INDENT)
}

fn step_separator() -> String {
    format!(".{}{}", continuation(), INDENT)
}

fn coordinates(position: &[f64]) -> String {
    position
        .iter()
        .map(|c| format_coordinate(*c))
        .collect::<Vec<_>>()
        .join(",")
}

fn double_array(position: &[f64]) -> String {
    format!("(double[])[{}]", coordinates(position))
}

fn double_array_list(ring: &[Position]) -> String {
    let points: Vec<String> = ring.iter().map(|p| double_array(p)).collect();
    format!("[{}].asList()", points.join(","))
}

fn point_xy(position: &[f64]) -> String {
    format!("pointXY({})", coordinates(position))
}

fn point_chain(ring: &[Position], separator: &str) -> String {
    ring.iter()
        .map(|p| point_xy(p))
        .collect::<Vec<_>>()
        .join(separator)
}

fn wkt_ring(ring: &[Position]) -> String {
    let points: Vec<String> = ring
        .iter()
        .map(|p| {
            p.iter()
                .map(|c| format_coordinate(*c))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    format!("({})", points.join(","))
}

fn from_wkt(text: &str) -> String {
    format!("Geoshape.fromWkt({})", quote_double(text))
}

fn multi_line_string(lines: &[Ring]) -> String {
    let parts: Vec<String> = lines
        .iter()
        .map(|line| {
            format!(
                "add({}.lineString().{})",
                SHAPE_FACTORY,
                point_chain(line, ".")
            )
        })
        .collect();
    format!(
        "{}.multiLineString().{}{}",
        SHAPE_FACTORY,
        continuation(),
        parts.join(&format!(".{}", continuation()))
    )
}

fn multi_polygon(polygons: &[Vec<Ring>]) -> String {
    let parts: Vec<String> = polygons
        .iter()
        .map(|rings| {
            let outer = rings.first().map(Vec::as_slice).unwrap_or(&[]);
            format!("add({}.polygon().{})", SHAPE_FACTORY, point_chain(outer, "."))
        })
        .collect();
    format!(
        "{}.multiPolygon().{}{}",
        SHAPE_FACTORY,
        continuation(),
        parts.join(&format!(".{}", continuation()))
    )
}

/// Render a geometry as a standalone `Geoshape` value.
pub fn standalone(geometry: &Geometry) -> String {
    match geometry {
        Geometry::Point(p) => format!("Geoshape.point({})", coordinates(p)),
        Geometry::Box(p) => format!("Geoshape.box({})", coordinates(p)),
        Geometry::Circle { center, radius } => format!(
            "Geoshape.circle({}, {})",
            coordinates(center),
            format_coordinate(*radius)
        ),
        Geometry::Line(ring) => format!("Geoshape.line({})", double_array_list(ring)),
        Geometry::Polygon(rings) => match rings.as_slice() {
            [] => from_wkt(DEFAULT_WKT),
            [ring] => format!("Geoshape.polygon({})", double_array_list(ring)),
            rings => {
                let body: Vec<String> = rings.iter().map(|r| wkt_ring(r)).collect();
                from_wkt(&format!("POLYGON ({})", body.join(",")))
            }
        },
        Geometry::MultiPoint(points) => format!(
            "Geoshape.geoshape({}.multiPoint().{}.build())",
            SHAPE_FACTORY,
            point_chain(points, ".")
        ),
        Geometry::MultiLineString(lines) => {
            format!("Geoshape.geoshape({}.build())", multi_line_string(lines))
        }
        Geometry::MultiPolygon(polygons) => {
            format!("Geoshape.geoshape({}.build())", multi_polygon(polygons))
        }
        Geometry::Collection(children) => {
            let parts: Vec<String> = children
                .iter()
                .filter_map(embedded)
                .map(|shape| format!("add({})", shape))
                .collect();
            format!(
                "Geoshape.geoshape(Geoshape.getGeometryCollectionBuilder().{}{}.build())",
                continuation(),
                parts.join(&format!(".{}", continuation()))
            )
        }
        Geometry::Wkt(text) => from_wkt(text.as_deref().unwrap_or(DEFAULT_WKT)),
    }
}

/// Render a geometry as a shape-factory expression for a geometry collection.
///
/// Raw text and nested collections have no embedded form.
pub fn embedded(geometry: &Geometry) -> Option<String> {
    Some(match geometry {
        Geometry::Point(p) => format!("{}.{}", SHAPE_FACTORY, point_xy(p)),
        Geometry::Box(p) => format!("{}.rect({})", SHAPE_FACTORY, coordinates(p)),
        Geometry::Circle { center, radius } => format!(
            "{}.circle({},{}.dist2Degrees({},{}.EARTH_MEAN_RADIUS_KM))",
            SHAPE_FACTORY,
            coordinates(center),
            DISTANCE_UTILS,
            format_coordinate(*radius),
            DISTANCE_UTILS
        ),
        Geometry::Line(ring) => format!(
            "{}.lineString().{}{}{}.build()",
            SHAPE_FACTORY,
            continuation(),
            INDENT,
            point_chain(ring, &step_separator())
        ),
        Geometry::Polygon(rings) => {
            let points: Vec<Position> = rings.iter().flatten().cloned().collect();
            format!(
                "{}.polygon().{}{}{}.build()",
                SHAPE_FACTORY,
                continuation(),
                INDENT,
                point_chain(&points, &step_separator())
            )
        }
        Geometry::MultiPoint(points) => format!(
            "{}.multiPoint().{}.build()",
            SHAPE_FACTORY,
            point_chain(points, ".")
        ),
        Geometry::MultiLineString(lines) => format!("{}.build()", multi_line_string(lines)),
        Geometry::MultiPolygon(polygons) => format!("{}.build()", multi_polygon(polygons)),
        Geometry::Collection(_) | Geometry::Wkt(_) => return None,
    })
}
