use std::collections::BTreeMap;

use geocore::Vec2;
use serde::{Deserialize, Serialize};

use crate::layer::{Layer, LayerId};

/// Pixel window used for GetFeatureInfo requests. Odd so the queried
/// coordinate lands exactly on the center pixel.
const QUERY_WINDOW_PX: u32 = 101;

/// Source descriptor for a WMS service (WMS 1.3.0).
///
/// `extra_params` are passed through verbatim on every request, in key order,
/// so generated URLs are deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WmsSource {
    pub url: String,
    pub layers: String,
    pub styles: String,
    #[serde(default)]
    pub extra_params: BTreeMap<String, String>,
    #[serde(default)]
    pub min_resolution: Option<f64>,
    #[serde(default)]
    pub max_resolution: Option<f64>,
}

impl WmsSource {
    pub fn new(url: impl Into<String>, layers: impl Into<String>, styles: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            layers: layers.into(),
            styles: styles.into(),
            extra_params: BTreeMap::new(),
            min_resolution: None,
            max_resolution: None,
        }
    }

    /// Whether the source answers feature-info queries at this resolution.
    pub fn queryable_at(&self, resolution: f64) -> bool {
        if self.layers.trim().is_empty() {
            return false;
        }
        if let Some(min) = self.min_resolution
            && resolution < min
        {
            return false;
        }
        if let Some(max) = self.max_resolution
            && resolution >= max
        {
            return false;
        }
        true
    }

    /// Builds a GetFeatureInfo request URL for the map coordinate, or `None`
    /// when the source is not queryable at the current resolution.
    ///
    /// The request window is a `QUERY_WINDOW_PX` square centered on the
    /// coordinate, so I/J always address the center pixel.
    pub fn feature_info_url(
        &self,
        coordinate: Vec2,
        resolution: f64,
        crs: &str,
        info_format: &str,
    ) -> Option<String> {
        if !resolution.is_finite() || resolution <= 0.0 || !coordinate.is_finite() {
            return None;
        }
        if !self.queryable_at(resolution) {
            return None;
        }

        let half = QUERY_WINDOW_PX as f64 / 2.0 * resolution;
        let min_x = coordinate.x - half;
        let min_y = coordinate.y - half;
        let max_x = coordinate.x + half;
        let max_y = coordinate.y + half;
        let i = ((coordinate.x - min_x) / resolution).floor() as u32;
        let j = ((max_y - coordinate.y) / resolution).floor() as u32;

        let mut params: Vec<(String, String)> = vec![
            ("SERVICE".into(), "WMS".into()),
            ("VERSION".into(), "1.3.0".into()),
            ("REQUEST".into(), "GetFeatureInfo".into()),
            ("LAYERS".into(), self.layers.clone()),
            ("QUERY_LAYERS".into(), self.layers.clone()),
            ("STYLES".into(), self.styles.clone()),
            ("CRS".into(), crs.into()),
            ("BBOX".into(), format!("{min_x},{min_y},{max_x},{max_y}")),
            ("WIDTH".into(), QUERY_WINDOW_PX.to_string()),
            ("HEIGHT".into(), QUERY_WINDOW_PX.to_string()),
            ("I".into(), i.to_string()),
            ("J".into(), j.to_string()),
            ("INFO_FORMAT".into(), info_format.into()),
        ];
        for (k, v) in &self.extra_params {
            params.push((k.clone(), v.clone()));
        }

        Some(append_query(&self.url, &params))
    }
}

fn append_query(base: &str, params: &[(String, String)]) -> String {
    let mut out = String::from(base);
    let mut separator = if !base.contains('?') {
        '?'
    } else if base.ends_with('?') || base.ends_with('&') {
        // Base already terminates the query prefix; start params directly.
        '\0'
    } else {
        '&'
    };
    for (k, v) in params {
        if separator != '\0' {
            out.push(separator);
        }
        separator = '&';
        out.push_str(k);
        out.push('=');
        out.push_str(&encode_query_value(v));
    }
    out
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' | b':' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

/// Last rendered frame of a raster layer as tightly packed RGBA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: [u32; 2],
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Returns `None` when the byte length does not match the size.
    pub fn new(size: [u32; 2], rgba: Vec<u8>) -> Option<Self> {
        let expected = size[0] as usize * size[1] as usize * 4;
        if rgba.len() != expected {
            return None;
        }
        Some(Self { size, rgba })
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }

    pub fn sample(&self, pixel: [f64; 2]) -> Option<[u8; 4]> {
        if !pixel[0].is_finite() || !pixel[1].is_finite() || pixel[0] < 0.0 || pixel[1] < 0.0 {
            return None;
        }
        let x = pixel[0].floor() as u32;
        let y = pixel[1].floor() as u32;
        if x >= self.size[0] || y >= self.size[1] {
            return None;
        }
        let offset = (y as usize * self.size[0] as usize + x as usize) * 4;
        Some([
            self.rgba[offset],
            self.rgba[offset + 1],
            self.rgba[offset + 2],
            self.rgba[offset + 3],
        ])
    }
}

/// The thematic WMS layer: source descriptor plus the most recently rendered
/// pixel data, sampled by the hover probe.
#[derive(Debug, Clone, PartialEq)]
pub struct WmsLayer {
    id: LayerId,
    pub source: WmsSource,
    rendered: Option<PixelBuffer>,
}

impl WmsLayer {
    pub fn new(id: u64, source: WmsSource) -> Self {
        Self {
            id: LayerId(id),
            source,
            rendered: None,
        }
    }

    /// Installs the layer's rendered output for subsequent pixel probes.
    pub fn set_rendered(&mut self, buffer: PixelBuffer) {
        self.rendered = Some(buffer);
    }

    /// RGBA channels under a pixel, or `None` outside the rendered frame (or
    /// before any frame has been rendered).
    pub fn data_at_pixel(&self, pixel: [f64; 2]) -> Option<[u8; 4]> {
        self.rendered.as_ref()?.sample(pixel)
    }
}

impl Layer for WmsLayer {
    fn id(&self) -> LayerId {
        self.id
    }
}
