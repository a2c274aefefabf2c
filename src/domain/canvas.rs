//! Canvas dimensions of image-bearing object types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Texture size and display name of one object type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub label: String,
}

impl CanvasSpec {
    #[must_use]
    pub fn new(width: u32, height: u32, label: impl Into<String>) -> Self {
        Self {
            width,
            height,
            label: label.into(),
        }
    }
}

const BUILTIN_CANVASES: &[(&str, u32, u32, &str)] = &[
    ("sign.hanging", 128, 256, "Two Sided Hanging Sign"),
    ("sign.hanging.banner.large", 64, 256, "Large Banner Hanging"),
    ("sign.hanging.ornate", 256, 128, "Two Sided Ornate Hanging Sign"),
    ("sign.huge.wood", 512, 128, "Huge Wooden Sign"),
    ("sign.large.wood", 256, 128, "Large Wooden Sign"),
    ("sign.medium.wood", 256, 128, "Wooden Sign"),
    ("sign.pictureframe.landscape", 256, 128, "Landscape Picture Frame"),
    ("sign.pictureframe.portrait", 128, 256, "Portrait Picture Frame"),
    ("sign.pictureframe.tall", 128, 512, "Tall Picture Frame"),
    ("sign.pictureframe.xl", 512, 512, "XL Picture Frame"),
    ("sign.pictureframe.xxl", 1024, 512, "XXL Picture Frame"),
    ("sign.pole.banner.large", 64, 256, "Large Banner on pole"),
    ("sign.post.double", 256, 256, "Double Sign Post"),
    ("sign.post.single", 128, 64, "Single Sign Post"),
    ("sign.post.town", 256, 128, "One Sided Town Sign Post"),
    ("sign.post.town.roof", 256, 128, "Two Sided Town Sign Post"),
    ("sign.small.wood", 128, 64, "Small Wooden Sign"),
];

/// Lookup table from object type to canvas.
#[derive(Debug, Clone)]
pub struct CanvasTable {
    canvases: HashMap<String, CanvasSpec>,
}

impl CanvasTable {
    /// Table of the standard sign types.
    #[must_use]
    pub fn builtin() -> Self {
        let canvases = BUILTIN_CANVASES
            .iter()
            .map(|(kind, w, h, label)| ((*kind).to_string(), CanvasSpec::new(*w, *h, *label)))
            .collect();
        Self { canvases }
    }

    /// Adds or replaces the canvas of `kind`.
    #[must_use]
    pub fn with(mut self, kind: impl Into<String>, spec: CanvasSpec) -> Self {
        self.canvases.insert(kind.into(), spec);
        self
    }

    #[must_use]
    pub fn dimensions(&self, kind: &str) -> Option<&CanvasSpec> {
        self.canvases.get(kind)
    }

    /// Display label for `kind`, falling back to the raw type id.
    #[must_use]
    pub fn label_for<'a>(&'a self, kind: &'a str) -> &'a str {
        self.canvases.get(kind).map_or(kind, |c| c.label.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.canvases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.canvases.is_empty()
    }
}

impl Default for CanvasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        let table = CanvasTable::builtin();

        assert_eq!(table.len(), 17);
        let xxl = table.dimensions("sign.pictureframe.xxl").unwrap();
        assert_eq!((xxl.width, xxl.height), (1024, 512));
        assert!(table.dimensions("spinner.wheel.deployed").is_none());
    }

    #[test]
    fn test_label_falls_back_to_kind() {
        let table = CanvasTable::builtin();

        assert_eq!(table.label_for("sign.small.wood"), "Small Wooden Sign");
        assert_eq!(table.label_for("door.hinged"), "door.hinged");
    }

    #[test]
    fn test_override_entry() {
        let table = CanvasTable::builtin().with(
            "spinner.wheel.deployed",
            CanvasSpec::new(512, 512, "Spinning wheel"),
        );
        assert_eq!(table.len(), 18);
        assert_eq!(table.label_for("spinner.wheel.deployed"), "Spinning wheel");
    }
}
