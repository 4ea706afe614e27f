use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The fixed color palette. Wire values are the tailwind class names the
/// views render with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Color {
    #[serde(rename = "bg-red-500")]
    #[strum(to_string = "bg-red-500")]
    Red,
    #[default]
    #[serde(rename = "bg-blue-500")]
    #[strum(to_string = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-green-500")]
    #[strum(to_string = "bg-green-500")]
    Green,
    #[serde(rename = "bg-yellow-500")]
    #[strum(to_string = "bg-yellow-500")]
    Yellow,
    #[serde(rename = "bg-purple-500")]
    #[strum(to_string = "bg-purple-500")]
    Purple,
    #[serde(rename = "bg-orange-500")]
    #[strum(to_string = "bg-orange-500")]
    Orange,
    #[serde(rename = "bg-pink-500")]
    #[strum(to_string = "bg-pink-500")]
    Pink,
    #[serde(rename = "bg-indigo-500")]
    #[strum(to_string = "bg-indigo-500")]
    Indigo,
}

impl Color {
    pub fn all() -> Vec<Color> {
        Color::iter().collect()
    }

    /// Human label shown in color pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Yellow => "Yellow",
            Color::Purple => "Purple",
            Color::Orange => "Orange",
            Color::Pink => "Pink",
            Color::Indigo => "Indigo",
        }
    }

    /// Swatch color as `#rrggbb`.
    pub fn hex(&self) -> &'static str {
        match self {
            Color::Red => "#ef4444",
            Color::Blue => "#3b82f6",
            Color::Green => "#22c55e",
            Color::Yellow => "#eab308",
            Color::Purple => "#9333ea",
            Color::Orange => "#f97316",
            Color::Pink => "#ec4899",
            Color::Indigo => "#6366f1",
        }
    }
}
