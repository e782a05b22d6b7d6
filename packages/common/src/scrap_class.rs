#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::prediction::Prediction;

/// The closed set of scrap types a factory classifies.
///
/// Corrections to scrap predictions must use one of these; plate predictions
/// carry free text instead. When the `sea-orm` feature is enabled, this enum
/// can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
pub enum ScrapClass {
    #[serde(rename = "CRC")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "CRC"))]
    Crc,
    #[serde(rename = "Burada")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Burada"))]
    Burada,
    #[serde(rename = "K2")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "K2"))]
    K2,
    #[serde(rename = "Selected")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Selected"))]
    Selected,
    #[serde(rename = "Piece to Piece")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Piece to Piece"))]
    PieceToPiece,
    #[serde(rename = "Melting")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Melting"))]
    Melting,
    #[serde(rename = "Sponge Iron")]
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "Sponge Iron"))]
    SpongeIron,
}

impl ScrapClass {
    /// All known scrap types.
    pub const ALL: &'static [ScrapClass] = &[
        Self::Crc,
        Self::Burada,
        Self::K2,
        Self::Selected,
        Self::PieceToPiece,
        Self::Melting,
        Self::SpongeIron,
    ];

    /// Returns the display string, matching what the classifier emits.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crc => "CRC",
            Self::Burada => "Burada",
            Self::K2 => "K2",
            Self::Selected => "Selected",
            Self::PieceToPiece => "Piece to Piece",
            Self::Melting => "Melting",
            Self::SpongeIron => "Sponge Iron",
        }
    }
}

impl fmt::Display for ScrapClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a string that is not a known scrap type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scrap class '{0}'")]
pub struct UnknownScrapClass(pub String);

impl FromStr for ScrapClass {
    type Err = UnknownScrapClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownScrapClass(s.to_string()))
    }
}

/// Check that every prediction's class is a known scrap type.
///
/// Used on corrected scrap predictions: the editor constrains classes to the
/// closed set on the client, and the server re-validates since its callers
/// may not be the editor.
pub fn ensure_known_scrap_classes(predictions: &[Prediction]) -> Result<(), UnknownScrapClass> {
    for p in predictions {
        p.class.parse::<ScrapClass>()?;
    }
    Ok(())
}
