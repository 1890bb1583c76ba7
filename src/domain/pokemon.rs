use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// `{name, url}` pair used all over the PokéAPI.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbilitySlot {
    pub slot: u32,
    pub is_hidden: bool,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub base_stat: u32,
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionGroupDetail {
    pub level_learned_at: u32,
    pub move_learn_method: NamedResource,
    pub version_group: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<VersionGroupDetail>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sprites {
    pub back_default: Option<String>,
    pub back_female: Option<String>,
    pub back_shiny: Option<String>,
    pub back_shiny_female: Option<String>,
    pub front_default: Option<String>,
    pub front_female: Option<String>,
    pub front_shiny: Option<String>,
    pub front_shiny_female: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameIndex {
    pub game_index: u32,
    pub version: NamedResource,
}

/// `GET /pokemon/{name}` response. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default)]
    pub forms: Vec<NamedResource>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub held_items: Vec<serde_json::Value>,
    #[serde(default)]
    pub location_area_encounters: String,
    #[serde(default)]
    pub species: NamedResource,
    #[serde(default)]
    pub game_indices: Vec<GameIndex>,
}

impl Pokemon {
    pub fn type_names(&self) -> Vec<&str> {
        let mut slots: Vec<&TypeSlot> = self.types.iter().collect();
        slots.sort_by_key(|t| t.slot);
        slots.into_iter().map(|t| t.kind.name.as_str()).collect()
    }

    pub fn summary(&self) -> String {
        let mut out = String::new();
        // 寫入 String 不會失敗
        let _ = writeln!(out, "#{} {}", self.id, self.name);
        let _ = writeln!(
            out,
            "height: {} dm, weight: {} hg",
            self.height, self.weight
        );
        if !self.types.is_empty() {
            let _ = writeln!(out, "types: {}", self.type_names().join(", "));
        }
        if !self.abilities.is_empty() {
            let abilities: Vec<String> = self
                .abilities
                .iter()
                .map(|a| {
                    if a.is_hidden {
                        format!("{} (hidden)", a.ability.name)
                    } else {
                        a.ability.name.clone()
                    }
                })
                .collect();
            let _ = writeln!(out, "abilities: {}", abilities.join(", "));
        }
        for stat in &self.stats {
            let _ = writeln!(out, "  {:<16}{:>4}", stat.stat.name, stat.base_stat);
        }
        out
    }
}
