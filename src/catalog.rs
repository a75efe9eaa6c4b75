//! Cosmetic shop catalog.
//!
//! Item ids follow the avatar asset set: each slot owns a block of ids and
//! every item has one sprite per resolution tier.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Hat,
    Shirt,
    Pants,
    Shoes,
    Accessory,
    Body,
}

impl Slot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Slot::Hat => "hat",
            Slot::Shirt => "shirt",
            Slot::Pants => "pants",
            Slot::Shoes => "shoes",
            Slot::Accessory => "accessory",
            Slot::Body => "body",
        }
    }

    fn asset_prefix(&self) -> &'static str {
        match self {
            Slot::Accessory => "acc",
            other => other.as_str(),
        }
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hat" => Ok(Slot::Hat),
            "shirt" => Ok(Slot::Shirt),
            "pants" => Ok(Slot::Pants),
            "shoes" => Ok(Slot::Shoes),
            "accessory" => Ok(Slot::Accessory),
            "body" => Ok(Slot::Body),
            other => Err(format!("unknown slot: {}", other)),
        }
    }
}

/// Sprite resolution a user can render their avatar at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionTier {
    FourBit,
    EightBit,
    SixteenBit,
}

impl ResolutionTier {
    pub const ALL: [ResolutionTier; 3] = [
        ResolutionTier::FourBit,
        ResolutionTier::EightBit,
        ResolutionTier::SixteenBit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionTier::FourBit => "four_bit",
            ResolutionTier::EightBit => "eight_bit",
            ResolutionTier::SixteenBit => "sixteen_bit",
        }
    }

    pub fn asset_dir(&self) -> &'static str {
        match self {
            ResolutionTier::FourBit => "4bit",
            ResolutionTier::EightBit => "8bit",
            ResolutionTier::SixteenBit => "16bit",
        }
    }

    pub fn price(&self) -> i64 {
        match self {
            ResolutionTier::FourBit => 0,
            ResolutionTier::EightBit => 150,
            ResolutionTier::SixteenBit => 300,
        }
    }

    /// Tier that must be unlocked before this one can be bought.
    pub fn prerequisite(&self) -> Option<ResolutionTier> {
        match self {
            ResolutionTier::FourBit => None,
            ResolutionTier::EightBit => Some(ResolutionTier::FourBit),
            ResolutionTier::SixteenBit => Some(ResolutionTier::EightBit),
        }
    }
}

impl FromStr for ResolutionTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResolutionTier::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown resolution tier: {}", s))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetPaths {
    pub four_bit: String,
    pub eight_bit: String,
    pub sixteen_bit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: i64,
    pub slot: Slot,
    pub price: i64,
    /// `None` for the empty hat.
    pub assets: Option<AssetPaths>,
}

impl CatalogItem {
    pub fn is_default(&self) -> bool {
        DEFAULT_ITEMS.contains(&self.id)
    }
}

struct SlotBlock {
    slot: Slot,
    first_id: i64,
    count: i64,
    price: i64,
}

const BLOCKS: [SlotBlock; 6] = [
    SlotBlock { slot: Slot::Hat, first_id: 0, count: 6, price: 50 },
    SlotBlock { slot: Slot::Body, first_id: 10, count: 5, price: 100 },
    SlotBlock { slot: Slot::Shirt, first_id: 20, count: 6, price: 40 },
    SlotBlock { slot: Slot::Pants, first_id: 30, count: 6, price: 40 },
    SlotBlock { slot: Slot::Shoes, first_id: 50, count: 6, price: 30 },
    SlotBlock { slot: Slot::Accessory, first_id: 60, count: 6, price: 60 },
];

pub const EMPTY_HAT: i64 = 0;
pub const DEFAULT_BODY: i64 = 10;

/// Granted to and worn by every new user.
pub const DEFAULT_ITEMS: [i64; 2] = [EMPTY_HAT, DEFAULT_BODY];

fn build_item(block: &SlotBlock, id: i64) -> CatalogItem {
    let is_default = DEFAULT_ITEMS.contains(&id);
    // hat ids start at the empty hat, so hat1 is id 1; other slots start at 1
    let number = if block.slot == Slot::Hat {
        id - block.first_id
    } else {
        id - block.first_id + 1
    };
    let assets = (id != EMPTY_HAT).then(|| {
        let file = format!("{}{}.png", block.slot.asset_prefix(), number);
        AssetPaths {
            four_bit: format!("{}/{}", ResolutionTier::FourBit.asset_dir(), file),
            eight_bit: format!("{}/{}", ResolutionTier::EightBit.asset_dir(), file),
            sixteen_bit: format!("{}/{}", ResolutionTier::SixteenBit.asset_dir(), file),
        }
    });

    CatalogItem {
        id,
        slot: block.slot,
        price: if is_default { 0 } else { block.price },
        assets,
    }
}

pub fn items() -> Vec<CatalogItem> {
    BLOCKS
        .iter()
        .flat_map(|block| {
            (block.first_id..block.first_id + block.count).map(move |id| build_item(block, id))
        })
        .collect()
}

pub fn find(id: i64) -> Option<CatalogItem> {
    BLOCKS
        .iter()
        .find(|block| (block.first_id..block.first_id + block.count).contains(&id))
        .map(|block| build_item(block, id))
}
