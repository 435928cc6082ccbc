use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// a derived congestion measure computed per virtual node and time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoeKind {
    /// vehicle miles traveled
    Vmt,
    /// vehicle hours traveled
    Vht,
    /// vmt lost to congestion, above critical density
    Lvmt,
    /// unused capacity vmt, at or below critical density
    Uvmt,
    /// delayed vehicle hours
    Dvh,
    /// congested miles
    Cm,
    /// congested mile hours
    Cmh,
}

impl MoeKind {
    pub const ALL: [MoeKind; 7] = [
        MoeKind::Vmt,
        MoeKind::Vht,
        MoeKind::Lvmt,
        MoeKind::Uvmt,
        MoeKind::Dvh,
        MoeKind::Cm,
        MoeKind::Cmh,
    ];
}

impl Display for MoeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MoeKind::Vmt => "vmt",
            MoeKind::Vht => "vht",
            MoeKind::Lvmt => "lvmt",
            MoeKind::Uvmt => "uvmt",
            MoeKind::Dvh => "dvh",
            MoeKind::Cm => "cm",
            MoeKind::Cmh => "cmh",
        };
        write!(f, "{s}")
    }
}

impl FromStr for MoeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoeKind::ALL
            .into_iter()
            .find(|k| k.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown measure '{s}'"))
    }
}
