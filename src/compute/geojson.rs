//! GeoJSON conversion for interpolated geometries.
//!
//! Rectangles have no GeoJSON counterpart and are written as four-corner
//! polygons; parsing therefore only yields points and polygons.

use crate::error::{Error, Result};
use geo::{Coord, LineString, Point, Polygon};
use geojson::{Geometry as GeoJsonGeometry, Value};
use shapetween_types::geometry::Geometry;

fn ring(coords: impl Iterator<Item = Coord<f64>>) -> Vec<Vec<f64>> {
    coords.map(|c| vec![c.x, c.y]).collect()
}

/// Build the GeoJSON geometry object for `geometry`.
pub fn to_geojson_value(geometry: &Geometry) -> GeoJsonGeometry {
    let value = match geometry {
        Geometry::Point(point) => Value::Point(vec![point.x(), point.y()]),
        Geometry::Rectangle(rect) => {
            Value::Polygon(vec![ring(rect.to_polygon().exterior().coords().copied())])
        }
        Geometry::Polygon(polygon) => {
            let mut rings = vec![ring(polygon.exterior().coords().copied())];
            for interior in polygon.interiors() {
                rings.push(ring(interior.coords().copied()));
            }
            Value::Polygon(rings)
        }
    };
    GeoJsonGeometry::new(value)
}

/// Converts a geometry to a GeoJSON string.
pub fn to_geojson(geometry: &Geometry) -> Result<String> {
    serde_json::to_string(&to_geojson_value(geometry)).map_err(|e| {
        Error::Serialization(format!(
            "Failed to serialize {}: {}",
            geometry.kind(),
            e
        ))
    })
}

/// Parses a GeoJSON Point or Polygon.
pub fn from_geojson(geojson: &str) -> Result<Geometry> {
    let geom: GeoJsonGeometry = serde_json::from_str(geojson)
        .map_err(|e| Error::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    match geom.value {
        Value::Point(coords) => {
            if coords.len() < 2 {
                return Err(Error::InvalidInput(
                    "Point must have at least 2 coordinates".to_string(),
                ));
            }
            Ok(Geometry::Point(Point::new(coords[0], coords[1])))
        }
        Value::Polygon(rings) => {
            let mut rings = rings.into_iter().map(parse_ring);
            let exterior = rings.next().ok_or_else(|| {
                Error::InvalidInput("Polygon must have at least one ring".to_string())
            })??;
            let interiors = rings.collect::<Result<Vec<_>>>()?;
            Ok(Geometry::Polygon(Polygon::new(exterior, interiors)))
        }
        _ => Err(Error::InvalidInput(
            "GeoJSON geometry is not a Point or Polygon".to_string(),
        )),
    }
}

fn parse_ring(positions: Vec<Vec<f64>>) -> Result<LineString<f64>> {
    positions
        .into_iter()
        .map(|position| {
            if position.len() < 2 {
                return Err(Error::InvalidInput(
                    "Coordinate must have at least 2 values".to_string(),
                ));
            }
            Ok(Coord {
                x: position[0],
                y: position[1],
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{coord, polygon, Rect};

    #[test]
    fn test_point_geojson() {
        let point = Geometry::Point(Point::new(3.0, 4.0));
        let json = to_geojson(&point).unwrap();
        assert!(json.contains("\"Point\""));
        assert_eq!(from_geojson(&json).unwrap(), point);
    }

    #[test]
    fn test_polygon_geojson() {
        let poly = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 5.0, y: 8.0),
        ]);
        let json = to_geojson(&poly).unwrap();
        assert_eq!(from_geojson(&json).unwrap(), poly);
    }

    #[test]
    fn test_rectangle_written_as_polygon() {
        let rect = Geometry::Rectangle(Rect::new(
            coord! { x: 0.0, y: 0.0 },
            coord! { x: 4.0, y: 2.0 },
        ));
        let parsed = from_geojson(&to_geojson(&rect).unwrap()).unwrap();
        let exterior = parsed.as_polygon().unwrap().exterior();
        assert_eq!(exterior.0.len(), 5);
    }

    #[test]
    fn test_rejects_other_geometries() {
        let line = r#"{"type":"LineString","coordinates":[[0,0],[1,1]]}"#;
        assert!(from_geojson(line).is_err());
        assert!(from_geojson("not json").is_err());
    }
}
