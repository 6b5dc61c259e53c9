use crate::extent::Extent;
use crate::vec::Vec2;

/// Spherical Web Mercator radius (meters). EPSG:3857 uses the WGS84 semi-major axis.
pub const MERCATOR_RADIUS: f64 = 6_378_137.0;
/// Half the extent of the Web Mercator plane along one axis (meters).
pub const MERCATOR_HALF_WORLD: f64 = MERCATOR_RADIUS * std::f64::consts::PI;
/// Latitude beyond which the Mercator projection diverges; inputs are clamped here.
pub const MERCATOR_MAX_LAT_DEG: f64 = 85.051_128_779_806_59;

/// Geographic coordinates in degrees (WGS84 / EPSG:4326).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LonLat {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl LonLat {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

pub fn lon_lat_to_mercator(geo: LonLat) -> Vec2 {
    let lat = geo.lat_deg.clamp(-MERCATOR_MAX_LAT_DEG, MERCATOR_MAX_LAT_DEG);
    let x = MERCATOR_RADIUS * geo.lon_deg.to_radians();
    let y = MERCATOR_RADIUS * ((lat.to_radians() / 2.0 + std::f64::consts::FRAC_PI_4).tan()).ln();
    Vec2::new(x, y)
}

pub fn mercator_to_lon_lat(p: Vec2) -> LonLat {
    let lon = (p.x / MERCATOR_RADIUS).to_degrees();
    let lat = (2.0 * (p.y / MERCATOR_RADIUS).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    LonLat::new(lon, lat)
}

/// Reprojects a geographic bounding box `[lon_min, lat_min, lon_max, lat_max]`
/// into a projected extent. Done once at startup; the result constrains the view.
pub fn transform_extent(geographic: [f64; 4]) -> Extent {
    let min = lon_lat_to_mercator(LonLat::new(geographic[0], geographic[1]));
    let max = lon_lat_to_mercator(LonLat::new(geographic[2], geographic[3]));
    Extent::new(min, max)
}

#[cfg(test)]
mod tests {
    use super::{
        LonLat, MERCATOR_HALF_WORLD, lon_lat_to_mercator, mercator_to_lon_lat, transform_extent,
    };

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn origin_maps_to_origin() {
        let p = lon_lat_to_mercator(LonLat::new(0.0, 0.0));
        assert_close(p.x, 0.0, 1e-9);
        assert_close(p.y, 0.0, 1e-9);
    }

    #[test]
    fn antimeridian_maps_to_half_world() {
        let p = lon_lat_to_mercator(LonLat::new(180.0, 0.0));
        assert_close(p.x, MERCATOR_HALF_WORLD, 1e-6);
    }

    #[test]
    fn polar_latitudes_are_clamped() {
        let p = lon_lat_to_mercator(LonLat::new(0.0, 90.0));
        assert_close(p.y, MERCATOR_HALF_WORLD, 1.0);
        assert!(p.is_finite());
    }

    #[test]
    fn round_trip_lon_lat() {
        let geo = LonLat::new(13.356374, 55.680635);
        let rt = mercator_to_lon_lat(lon_lat_to_mercator(geo));
        assert_close(rt.lon_deg, geo.lon_deg, 1e-9);
        assert_close(rt.lat_deg, geo.lat_deg, 1e-9);
    }

    #[test]
    fn transform_extent_preserves_corner_order() {
        let e = transform_extent([13.051695, 55.5, 13.95379, 55.803461]);
        assert!(e.min.x < e.max.x);
        assert!(e.min.y < e.max.y);
        assert!(e.contains(lon_lat_to_mercator(LonLat::new(13.356374, 55.680635))));
    }
}
