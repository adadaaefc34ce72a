//! Closed categorical vocabularies accepted by the prediction endpoint
//!
//! Each enumeration mirrors the category set the model was trained on. The
//! textual label of a variant is exactly what clients send and exactly what
//! the model sees after categorical coercion.

use std::fmt;

/// A closed set of textual categories.
pub trait Categorical: Sized + Copy + 'static {
    /// Every member, in declaration order.
    const ALL: &'static [Self];

    /// Wire label of this member.
    fn as_str(&self) -> &'static str;

    /// Exact, case-sensitive lookup by label.
    fn parse(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == label)
    }

    /// All labels in declaration order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Categorical for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Fat content label printed on the item.
    FatContent {
        LowFat => "Low Fat",
        Regular => "Regular",
    }
}

categorical! {
    /// Product category of the item.
    ItemType {
        Breads => "Breads",
        Breakfast => "Breakfast",
        BakingGoods => "Baking Goods",
        Canned => "Canned",
        Dairy => "Dairy",
        FrozenFoods => "Frozen Foods",
        FruitsAndVegetables => "Fruits and Vegetables",
        HardDrinks => "Hard Drinks",
        HealthAndHygiene => "Health and Hygiene",
        Household => "Household",
        Meat => "Meat",
        Others => "Others",
        Seafood => "Seafood",
        SnackFoods => "Snack Foods",
        SoftDrinks => "Soft Drinks",
        StarchyFoods => "Starchy Foods",
    }
}

categorical! {
    /// Store code of the outlet.
    OutletIdentifier {
        Out010 => "OUT010",
        Out013 => "OUT013",
        Out017 => "OUT017",
        Out018 => "OUT018",
        Out019 => "OUT019",
        Out027 => "OUT027",
        Out035 => "OUT035",
        Out045 => "OUT045",
        Out046 => "OUT046",
        Out049 => "OUT049",
    }
}

categorical! {
    /// Floor size of the outlet. `Unknown` is a real training category.
    OutletSize {
        Small => "Small",
        Medium => "Medium",
        High => "High",
        Unknown => "Unknown",
    }
}

categorical! {
    /// City tier the outlet is located in.
    LocationType {
        Tier1 => "Tier 1",
        Tier2 => "Tier 2",
        Tier3 => "Tier 3",
    }
}

categorical! {
    /// Store format.
    OutletType {
        GroceryStore => "Grocery Store",
        SupermarketType1 => "Supermarket Type1",
        SupermarketType2 => "Supermarket Type2",
        SupermarketType3 => "Supermarket Type3",
    }
}
