//! Closed vocabularies consulted by the grammars: terrain, borders,
//! passages, resources and items.
//!
//! All lookups take the lower-case text as it appears in a normalized
//! report. Tables are sorted slices so lookups are deterministic.

use std::fmt;

use serde::{Deserialize, Serialize};

// ──────────────────────────────────────────────
// Terrain
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Alps,
    AridHills,
    AridTundra,
    BrushFlat,
    BrushHills,
    ConiferHills,
    Deciduous,
    DeciduousHills,
    Desert,
    GrassyHills,
    GrassyHillsPlateau,
    HighSnowyMountains,
    Jungle,
    JungleHills,
    Lake,
    LowAridMountains,
    LowConiferMountains,
    LowJungleMountains,
    LowSnowyMountains,
    LowVolcanicMountains,
    Ocean,
    PolarIce,
    Prairie,
    PrairiePlateau,
    RockyHills,
    SnowyHills,
    Swamp,
    Tundra,
    UnknownJungleSwamp,
    UnknownLand,
    UnknownMountain,
    UnknownWater,
}

/// Short map codes used in movement and neighbor fields.
const TERRAIN_CODES: &[(&str, Terrain)] = &[
    ("ah", Terrain::AridHills),
    ("alps", Terrain::Alps),
    ("ar", Terrain::AridTundra),
    ("bf", Terrain::BrushFlat),
    ("bh", Terrain::BrushHills),
    ("ch", Terrain::ConiferHills),
    ("d", Terrain::Deciduous),
    ("de", Terrain::Desert),
    ("dh", Terrain::DeciduousHills),
    ("gh", Terrain::GrassyHills),
    ("ghp", Terrain::GrassyHillsPlateau),
    ("hsm", Terrain::HighSnowyMountains),
    ("jg", Terrain::Jungle),
    ("jh", Terrain::JungleHills),
    ("l", Terrain::Lake),
    ("lam", Terrain::LowAridMountains),
    ("lcm", Terrain::LowConiferMountains),
    ("ljm", Terrain::LowJungleMountains),
    ("lsm", Terrain::LowSnowyMountains),
    ("lvm", Terrain::LowVolcanicMountains),
    ("o", Terrain::Ocean),
    ("pi", Terrain::PolarIce),
    ("ppr", Terrain::PrairiePlateau),
    ("pr", Terrain::Prairie),
    ("rh", Terrain::RockyHills),
    ("sh", Terrain::SnowyHills),
    ("sw", Terrain::Swamp),
    ("tu", Terrain::Tundra),
    ("ujs", Terrain::UnknownJungleSwamp),
    ("ul", Terrain::UnknownLand),
    ("um", Terrain::UnknownMountain),
    ("uw", Terrain::UnknownWater),
];

/// Long names used in status lines and failed-move messages.
const TERRAIN_NAMES: &[(&str, Terrain)] = &[
    ("alps", Terrain::Alps),
    ("arid", Terrain::AridHills),
    ("arid hills", Terrain::AridHills),
    ("arid tundra", Terrain::AridTundra),
    ("brush", Terrain::BrushFlat),
    ("brush flat", Terrain::BrushFlat),
    ("brush hills", Terrain::BrushHills),
    ("conifer hills", Terrain::ConiferHills),
    ("deciduous", Terrain::Deciduous),
    ("deciduous forest", Terrain::Deciduous),
    ("deciduous hills", Terrain::DeciduousHills),
    ("desert", Terrain::Desert),
    ("grassy hills", Terrain::GrassyHills),
    ("grassy hills plateau", Terrain::GrassyHillsPlateau),
    ("high snowy mountains", Terrain::HighSnowyMountains),
    ("jungle", Terrain::Jungle),
    ("jungle hills", Terrain::JungleHills),
    ("lake", Terrain::Lake),
    ("low arid mountains", Terrain::LowAridMountains),
    ("low conifer mountains", Terrain::LowConiferMountains),
    ("low jungle mountains", Terrain::LowJungleMountains),
    ("low snowy mountains", Terrain::LowSnowyMountains),
    ("low volcanic mountains", Terrain::LowVolcanicMountains),
    ("low volcano mountains", Terrain::LowVolcanicMountains),
    ("ocean", Terrain::Ocean),
    ("plateau grassy hills", Terrain::GrassyHillsPlateau),
    ("plateau prairie", Terrain::PrairiePlateau),
    ("polar ice", Terrain::PolarIce),
    ("prairie", Terrain::Prairie),
    ("rocky hills", Terrain::RockyHills),
    ("snowy hills", Terrain::SnowyHills),
    ("swamp", Terrain::Swamp),
    ("tundra", Terrain::Tundra),
];

impl Terrain {
    pub fn from_code(code: &str) -> Option<Terrain> {
        lookup(TERRAIN_CODES, code)
    }

    pub fn from_long_name(name: &str) -> Option<Terrain> {
        lookup(TERRAIN_NAMES, name)
    }
}

impl fmt::Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ──────────────────────────────────────────────
// Edges: borders and passages
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Border {
    Canal,
    River,
}

impl Border {
    pub fn from_name(name: &str) -> Option<Border> {
        match name {
            "canal" => Some(Border::Canal),
            "river" => Some(Border::River),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Passage {
    Ford,
    Pass,
    StoneRoad,
}

impl Passage {
    pub fn from_name(name: &str) -> Option<Passage> {
        match name {
            "ford" => Some(Passage::Ford),
            "pass" => Some(Passage::Pass),
            "stone road" => Some(Passage::StoneRoad),
            _ => None,
        }
    }
}

// ──────────────────────────────────────────────
// Resources
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    Coal,
    CopperOre,
    Diamond,
    Frankincense,
    Gold,
    IronOre,
    Jade,
    Kaolin,
    LeadOre,
    Limestone,
    NickelOre,
    Pearls,
    Pyrite,
    Rubies,
    Salt,
    Silver,
    Sulphur,
    TinOre,
    VanadiumOre,
    ZincOre,
}

const RESOURCE_NAMES: &[(&str, Resource)] = &[
    ("coal", Resource::Coal),
    ("copper ore", Resource::CopperOre),
    ("diamond", Resource::Diamond),
    ("frankincense", Resource::Frankincense),
    ("gold", Resource::Gold),
    ("iron ore", Resource::IronOre),
    ("jade", Resource::Jade),
    ("kaolin", Resource::Kaolin),
    ("lead ore", Resource::LeadOre),
    ("limestone", Resource::Limestone),
    ("nickel ore", Resource::NickelOre),
    ("pearls", Resource::Pearls),
    ("pyrite", Resource::Pyrite),
    ("rubies", Resource::Rubies),
    ("salt", Resource::Salt),
    ("silver", Resource::Silver),
    ("sulphur", Resource::Sulphur),
    ("tin ore", Resource::TinOre),
    ("vanadium ore", Resource::VanadiumOre),
    ("zinc ore", Resource::ZincOre),
];

impl Resource {
    /// Longest resource name that `text` starts with, with its length.
    pub fn prefix_of(text: &str) -> Option<(Resource, usize)> {
        RESOURCE_NAMES
            .iter()
            .filter(|(name, _)| text.starts_with(name))
            .max_by_key(|(name, _)| name.len())
            .map(|(name, r)| (*r, name.len()))
    }
}

// ──────────────────────────────────────────────
// Items
// ──────────────────────────────────────────────

/// Trade and equipment goods a scout can report finding. Sorted.
const ITEM_NAMES: &[&str] = &[
    "adze", "arbalest", "arrows", "axes", "backpack", "ballistae", "bark", "barrel", "bladder",
    "blubber", "boat", "bonearmour", "bones", "bows", "bread", "breastplate", "candle", "canoes",
    "carpets", "catapult", "cattle", "cauldrons", "chain", "china", "clay", "cloth", "clubs",
    "coal", "coffee", "coins", "cotton", "cuirass", "cuirboilli", "diamond", "diamonds", "drum",
    "elephant", "falchion", "fish", "flax", "flour", "flute", "fodder", "frame", "frankincense",
    "fur", "glasspipe", "goats", "gold", "grain", "grape", "gut", "harp", "haube", "hbow",
    "heaters", "helm", "herbs", "hive", "hoe", "honey", "hood", "horn", "horses", "jade",
    "jerkin", "kayak", "ladder", "leather", "logs", "lute", "mace", "mattock", "metal",
    "millstone", "musk", "net", "oar", "oil", "olives", "opium", "ores", "paddle", "palanquin",
    "parchment", "pavis", "pearls", "pellets", "people", "pewter", "picks", "plows",
    "provisions", "quarrel", "rake", "ram", "ramp", "ring", "rope", "rug", "saddle",
    "saddlebag", "salt", "sand", "scale", "sculpture", "scutum", "scythe", "shackle", "shaft",
    "shield", "shovel", "silk", "silver", "skin", "slaves", "slings", "snare", "spear",
    "spetum", "spice", "statue", "stave", "stones", "string", "sugar", "sword", "tapestries",
    "tea", "tobacco", "trap", "trews", "trinket", "trumpet", "urn", "wagons", "wax",
];

/// A known item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Item(&'static str);

impl Item {
    pub fn from_name(name: &str) -> Option<Item> {
        ITEM_NAMES
            .binary_search(&name)
            .ok()
            .map(|i| Item(ITEM_NAMES[i]))
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|i| table[i].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_sorted_for_binary_search() {
        for table in [TERRAIN_CODES, TERRAIN_NAMES] {
            assert!(table.windows(2).all(|w| w[0].0 < w[1].0), "{:?}", table);
        }
        assert!(RESOURCE_NAMES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(ITEM_NAMES.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn terrain_codes_and_names() {
        assert_eq!(Terrain::from_code("pr"), Some(Terrain::Prairie));
        assert_eq!(Terrain::from_code("alps"), Some(Terrain::Alps));
        assert_eq!(Terrain::from_code("xx"), None);
        assert_eq!(Terrain::from_long_name("prairie"), Some(Terrain::Prairie));
        assert_eq!(
            Terrain::from_long_name("low volcano mountains"),
            Some(Terrain::LowVolcanicMountains)
        );
    }

    #[test]
    fn edge_names() {
        assert_eq!(Border::from_name("river"), Some(Border::River));
        assert_eq!(Passage::from_name("stone road"), Some(Passage::StoneRoad));
        assert_eq!(Passage::from_name("road"), None);
    }

    #[test]
    fn resources_and_items() {
        assert_eq!(Resource::prefix_of("iron orb"), None);
        assert_eq!(
            Resource::prefix_of("iron ore,pr n"),
            Some((Resource::IronOre, 8))
        );
        assert_eq!(Item::from_name("wagons").map(|i| i.name()), Some("wagons"));
        assert_eq!(Item::from_name("spaceship"), None);
    }
}
