use serde::{Deserialize, Serialize};

use super::collection::Collection;
use super::lenient;
use super::{Character, Location, Scene};

/// 一个剧本及其全部资产
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    #[serde(deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(deserialize_with = "lenient::text")]
    pub created_at: String,
    #[serde(deserialize_with = "lenient::text")]
    pub last_modified: String,
    pub characters: Collection<Character>,
    pub scenes: Collection<Scene>,
    pub locations: Collection<Location>,
}

impl Script {
    pub fn new(id: &str, name: &str, description: &str, now: &str) -> Self {
        Script {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            created_at: now.to_string(),
            last_modified: now.to_string(),
            ..Default::default()
        }
    }
}

/// 剧本中按类别划分的资产
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Characters,
    Scenes,
    Locations,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Characters => "characters",
            AssetKind::Scenes => "scenes",
            AssetKind::Locations => "locations",
        }
    }
}
