//! Size and viewport preset model.
//!
//! A size is either concrete (`Some(Size)`) or natural (`None`): width and
//! height are never set independently. Wire records that carry a mixed
//! pair collapse to natural.

use crate::constants::{HEIGHT_KEY, WIDTH_KEY};
use crate::error::{ConfigError, Result};
use crate::id::PresetId;
use crate::length::parse_dimension;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A concrete surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Swap width and height (portrait ↔ landscape).
    pub const fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    /// Round a fractional measurement to whole pixels.
    pub fn from_f64(width: f64, height: f64) -> Self {
        Self {
            width: round_px(width),
            height: round_px(height),
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

fn round_px(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// The `{ width, height }` record as stored and broadcast by the host.
/// Each field is a number or `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeRecord {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl SizeRecord {
    /// Resolve into a paired size. A half-set record is treated as natural.
    pub fn into_size(self) -> Option<Size> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(Size { width, height }),
            (None, None) => None,
            (w, h) => {
                log::warn!("ignoring half-set size record (width={w:?}, height={h:?})");
                None
            }
        }
    }

    /// Read the record from the two flat store values.
    pub fn from_store_values(width: &Value, height: &Value) -> Result<Self> {
        Ok(Self {
            width: store_value(WIDTH_KEY, width)?,
            height: store_value(HEIGHT_KEY, height)?,
        })
    }

    /// The two flat store values for this record.
    pub fn to_store_values(self) -> (Value, Value) {
        (
            self.width.map_or(Value::Null, Value::from),
            self.height.map_or(Value::Null, Value::from),
        )
    }
}

impl From<Option<Size>> for SizeRecord {
    fn from(size: Option<Size>) -> Self {
        match size {
            Some(s) => Self {
                width: Some(s.width),
                height: Some(s.height),
            },
            None => Self::default(),
        }
    }
}

/// Store values may arrive as numbers, or as strings when rehydrated from a
/// URL. Both forms round the same way.
fn store_value(key: &'static str, value: &Value) -> Result<Option<u32>> {
    let invalid = || ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    };
    let px = match value {
        Value::Null => return Ok(None),
        Value::String(s) if s.is_empty() || s == "null" => return Ok(None),
        Value::Number(n) => n.as_f64().ok_or_else(invalid)?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if px < 0.0 || !px.is_finite() {
        return Err(invalid());
    }
    Ok(Some(round_px(px)))
}

// ─── Viewport presets ────────────────────────────────────────────────────

/// Device category used to group presets in the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mobile,
    Tablet,
    Desktop,
    #[default]
    Other,
}

impl Category {
    /// Menu order.
    pub const ALL: [Category; 4] = [
        Category::Mobile,
        Category::Tablet,
        Category::Desktop,
        Category::Other,
    ];
}

/// A named, fixed size offered as a one-click selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewportPreset {
    pub id: PresetId,
    pub name: String,
    pub size: Size,
    pub category: Category,
}

/// Preset as written in configuration: CSS lengths under `styles`.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewportConfig {
    pub name: String,
    pub styles: ViewportStyles,
    #[serde(rename = "type", default)]
    pub category: Option<Category>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ViewportStyles {
    pub width: String,
    pub height: String,
}

impl ViewportConfig {
    /// Resolve CSS lengths. `None` when either dimension isn't a positive integer.
    pub fn resolve(&self, id: PresetId) -> Option<ViewportPreset> {
        let width = parse_dimension(&self.styles.width)?;
        let height = parse_dimension(&self.styles.height)?;
        Some(ViewportPreset {
            id,
            name: self.name.clone(),
            size: Size { width, height },
            category: self.category.unwrap_or_default(),
        })
    }
}

/// Presets in configuration order. Lookups scan in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetMap {
    presets: Vec<ViewportPreset>,
}

impl PresetMap {
    pub fn new(presets: Vec<ViewportPreset>) -> Self {
        Self { presets }
    }

    /// The built-in mobile / tablet / desktop set.
    pub fn minimal() -> Self {
        let preset = |id: &str, name: &str, width, height, category| ViewportPreset {
            id: PresetId::intern(id),
            name: name.to_string(),
            size: Size { width, height },
            category,
        };
        Self::new(vec![
            preset("mobile", "Mobile", 360, 800, Category::Mobile),
            preset("tablet", "Tablet", 768, 1024, Category::Tablet),
            preset("desktop", "Desktop", 1920, 1080, Category::Desktop),
        ])
    }

    pub fn get(&self, id: PresetId) -> Option<&ViewportPreset> {
        self.presets.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ViewportPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl<'a> IntoIterator for &'a PresetMap {
    type Item = &'a ViewportPreset;
    type IntoIter = std::slice::Iter<'a, ViewportPreset>;

    fn into_iter(self) -> Self::IntoIter {
        self.presets.iter()
    }
}

impl<'de> Deserialize<'de> for PresetMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PresetMapVisitor)
    }
}

/// Walks the JSON object in document order so preset order is preserved.
struct PresetMapVisitor;

impl<'de> Visitor<'de> for PresetMapVisitor {
    type Value = PresetMap;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of preset id to viewport")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<PresetMap, A::Error> {
        let mut presets: Vec<ViewportPreset> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, config)) = map.next_entry::<String, ViewportConfig>()? {
            let id = PresetId::intern(&key);
            match config.resolve(id) {
                Some(preset) => {
                    // Later duplicates replace earlier ones in place
                    if let Some(existing) = presets.iter_mut().find(|p| p.id == id) {
                        *existing = preset;
                    } else {
                        presets.push(preset);
                    }
                }
                None => log::warn!(
                    "skipping preset {key}: width {:?} / height {:?} is not a positive length",
                    config.styles.width,
                    config.styles.height
                ),
            }
        }
        Ok(PresetMap::new(presets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rotate_twice_restores() {
        let s = Size::new(400, 300);
        assert_eq!(s.rotated(), Size::new(300, 400));
        assert_eq!(s.rotated().rotated(), s);
    }

    #[test]
    fn display_label() {
        assert_eq!(Size::new(768, 1024).to_string(), "768x1024");
    }

    #[test]
    fn from_f64_rounds() {
        assert_eq!(Size::from_f64(799.6, 600.4), Size::new(800, 600));
        assert_eq!(Size::from_f64(-3.0, f64::NAN), Size::new(0, 0));
    }

    #[test]
    fn half_set_record_collapses() {
        let r = SizeRecord {
            width: Some(400),
            height: None,
        };
        assert_eq!(r.into_size(), None);
        let full = SizeRecord {
            width: Some(400),
            height: Some(300),
        };
        assert_eq!(full.into_size(), Some(Size::new(400, 300)));
    }

    #[test]
    fn channel_payload_shape() {
        let json = serde_json::to_string(&Some(Size::new(320, 640))).unwrap();
        assert_eq!(json, r#"{"width":320,"height":640}"#);
        let cleared: Option<Size> = serde_json::from_str("null").unwrap();
        assert_eq!(cleared, None);
    }

    #[test]
    fn store_values_accept_numbers_strings_and_null() {
        let r = SizeRecord::from_store_values(&Value::from(400), &Value::from("300")).unwrap();
        assert_eq!(r.into_size(), Some(Size::new(400, 300)));

        let r = SizeRecord::from_store_values(&Value::Null, &Value::Null).unwrap();
        assert_eq!(r.into_size(), None);

        let err = SizeRecord::from_store_values(&Value::from(-5), &Value::Null).unwrap_err();
        assert!(err.to_string().contains(WIDTH_KEY));
    }

    #[test]
    fn fractional_store_strings_round_like_numbers() {
        let from_strings =
            SizeRecord::from_store_values(&Value::from("360.5"), &Value::from(" 640.4 ")).unwrap();
        let from_numbers =
            SizeRecord::from_store_values(&Value::from(360.5), &Value::from(640.4)).unwrap();
        assert_eq!(from_strings, from_numbers);
        assert_eq!(from_strings.into_size(), Some(Size::new(361, 640)));

        for bad in ["-1", "NaN", "inf", "375px"] {
            assert!(
                SizeRecord::from_store_values(&Value::from(bad), &Value::Null).is_err(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn store_values_roundtrip_shape() {
        let (w, h) = SizeRecord::from(Some(Size::new(360, 800))).to_store_values();
        assert_eq!(w, Value::from(360));
        assert_eq!(h, Value::from(800));
        let (w, h) = SizeRecord::from(None).to_store_values();
        assert_eq!((w, h), (Value::Null, Value::Null));
    }

    #[test]
    fn preset_map_preserves_document_order() {
        let json = r#"{
            "zeta": { "name": "Zeta", "styles": { "width": "100px", "height": "200px" } },
            "alpha": { "name": "Alpha", "styles": { "width": "300px", "height": "400px" }, "type": "mobile" }
        }"#;
        let map: PresetMap = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = map.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
        assert_eq!(map.iter().next().unwrap().category, Category::Other);
        assert_eq!(
            map.get(PresetId::intern("alpha")).unwrap().category,
            Category::Mobile
        );
    }

    #[test]
    fn preset_map_skips_unparseable_lengths() {
        let json = r#"{
            "bad": { "name": "Bad", "styles": { "width": "auto", "height": "200px" } },
            "ok": { "name": "Ok", "styles": { "width": "320px", "height": "480px" } }
        }"#;
        let map: PresetMap = serde_json::from_str(json).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.iter().next().unwrap().size, Size::new(320, 480));
    }

    #[test]
    fn minimal_set() {
        let map = PresetMap::minimal();
        let sizes: Vec<Size> = map.iter().map(|p| p.size).collect();
        assert_eq!(
            sizes,
            vec![
                Size::new(360, 800),
                Size::new(768, 1024),
                Size::new(1920, 1080)
            ]
        );
    }
}
