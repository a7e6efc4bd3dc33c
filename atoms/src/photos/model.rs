use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Photo key -> Drive file id for one folder, in discovery order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FolderPhotos {
    entries: Map<String, Value>,
}

impl FolderPhotos {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, photo_key: String, file_id: String) {
        self.entries.insert(photo_key, Value::String(file_id));
    }

    pub fn get(&self, photo_key: &str) -> Option<&str> {
        self.entries.get(photo_key).and_then(Value::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Move the keys named in `order` to the front (in that order, when present).
    /// Everything else keeps its discovery order behind them.
    pub fn apply_key_order(&mut self, order: &[String]) {
        if order.is_empty() {
            return;
        }

        let remaining = std::mem::take(&mut self.entries);
        let mut ordered = Map::new();
        for key in order {
            if let Some(value) = remaining.get(key) {
                ordered.insert(key.clone(), value.clone());
            }
        }
        for (key, value) in remaining {
            if !ordered.contains_key(&key) {
                ordered.insert(key, value);
            }
        }
        self.entries = ordered;
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Object(self.entries)
    }
}

/// The `images.json` document read by the front-end:
/// `{"properties": {<folder-key>: {<photo-key>: <file-id>}}}`
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoManifest {
    pub properties: Map<String, Value>,
}

impl PhotoManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_folder(&mut self, folder_key: String, photos: FolderPhotos) {
        self.properties.insert(folder_key, photos.into_value());
    }

    pub fn folder_count(&self) -> usize {
        self.properties.len()
    }

    pub fn photo_count(&self) -> usize {
        self.properties
            .values()
            .filter_map(Value::as_object)
            .map(Map::len)
            .sum()
    }

    /// Serialize with 4-space indentation
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}
