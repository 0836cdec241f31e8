use shared::{Coordinate, MapRegion};

const SPAN_PADDING: f64 = 1.5;
const MIN_SPAN_DEG: f64 = 0.01;
const DEFAULT_SPAN_DEG: f64 = 0.1;

/// Viewport center used when there is nothing to frame yet.
const DEFAULT_CENTER: Coordinate = Coordinate {
    lat: 12.9716,
    lon: 77.5946,
};

/// Compute a viewport that covers all of `points` with padding on both
/// axes. Degenerate extents fall back to a minimum span so a single
/// point still produces a usable region.
pub fn region_for(points: &[Coordinate]) -> MapRegion {
    let Some(first) = points.first() else {
        return MapRegion {
            center: DEFAULT_CENTER,
            lat_span: DEFAULT_SPAN_DEG,
            lon_span: DEFAULT_SPAN_DEG,
        };
    };

    let mut min_lat = first.lat;
    let mut max_lat = first.lat;
    let mut min_lon = first.lon;
    let mut max_lon = first.lon;
    for point in &points[1..] {
        min_lat = min_lat.min(point.lat);
        max_lat = max_lat.max(point.lat);
        min_lon = min_lon.min(point.lon);
        max_lon = max_lon.max(point.lon);
    }

    MapRegion {
        center: Coordinate {
            lat: (min_lat + max_lat) / 2.0,
            lon: (min_lon + max_lon) / 2.0,
        },
        lat_span: padded_span(max_lat - min_lat),
        lon_span: padded_span(max_lon - min_lon),
    }
}

fn padded_span(extent: f64) -> f64 {
    let span = extent * SPAN_PADDING;
    if span == 0.0 {
        MIN_SPAN_DEG
    } else {
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn frames_two_points_with_padding() {
        let region = region_for(&[coord(12.0, 77.0), coord(13.0, 78.0)]);
        assert_eq!(region.center, coord(12.5, 77.5));
        assert!((region.lat_span - 1.5).abs() < 1e-12);
        assert!((region.lon_span - 1.5).abs() < 1e-12);
    }

    #[test]
    fn single_point_gets_minimum_span() {
        let region = region_for(&[coord(12.97, 77.59)]);
        assert_eq!(region.center, coord(12.97, 77.59));
        assert_eq!(region.lat_span, MIN_SPAN_DEG);
        assert_eq!(region.lon_span, MIN_SPAN_DEG);
    }

    #[test]
    fn degenerate_axis_gets_minimum_span_independently() {
        // Points on the same parallel: latitude extent is zero, longitude
        // extent is not.
        let region = region_for(&[coord(12.0, 77.0), coord(12.0, 78.0)]);
        assert_eq!(region.lat_span, MIN_SPAN_DEG);
        assert!((region.lon_span - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_input_falls_back_to_default_viewport() {
        let region = region_for(&[]);
        assert_eq!(region.center, DEFAULT_CENTER);
        assert_eq!(region.lat_span, DEFAULT_SPAN_DEG);
        assert_eq!(region.lon_span, DEFAULT_SPAN_DEG);
    }
}
