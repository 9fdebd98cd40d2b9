use serde::{Deserialize, Serialize};

use crate::error::{BallisticsError, Result};

/// Static physical parameters of one ammunition type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulletProfile {
    pub drag_coefficient: f64,      // dimensionless
    pub cross_sectional_area: f64,  // m²
    pub mass: f64,                  // kg
}

impl BulletProfile {
    pub fn new(drag_coefficient: f64, cross_sectional_area: f64, mass: f64) -> Self {
        Self {
            drag_coefficient,
            cross_sectional_area,
            mass,
        }
    }

    /// Reject profiles that would make the drag term degenerate.
    pub fn validate(&self) -> Result<()> {
        if !self.drag_coefficient.is_finite() || self.drag_coefficient < 0.0 {
            return Err(BallisticsError::InvalidProfile(format!(
                "drag coefficient must be finite and >= 0 (got {})",
                self.drag_coefficient
            )));
        }
        if !self.cross_sectional_area.is_finite() || self.cross_sectional_area <= 0.0 {
            return Err(BallisticsError::InvalidProfile(format!(
                "cross-sectional area must be finite and > 0 (got {})",
                self.cross_sectional_area
            )));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(BallisticsError::InvalidProfile(format!(
                "mass must be finite and > 0 (got {})",
                self.mass
            )));
        }
        Ok(())
    }
}

/// Built-in ammunition templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletPreset {
    /// 5.56x45mm NATO
    Nato556,
    /// .308 Winchester
    Win308,
}

impl BulletPreset {
    pub const ALL: [BulletPreset; 2] = [BulletPreset::Nato556, BulletPreset::Win308];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "5.56" | "556" | "5.56mm" | "nato556" | "5.56x45" => Some(BulletPreset::Nato556),
            ".308" | "308" | "win308" | "7.62x51" => Some(BulletPreset::Win308),
            _ => None,
        }
    }

    /// Like [`BulletPreset::from_str`] but reports the unknown name.
    pub fn parse(s: &str) -> Result<Self> {
        Self::from_str(s).ok_or_else(|| BallisticsError::UnknownPreset(s.to_string()))
    }

    pub fn profile(&self) -> BulletProfile {
        match self {
            BulletPreset::Nato556 => BulletProfile::new(0.388, 0.000025419304, 0.0123),
            BulletPreset::Win308 => BulletProfile::new(0.295, 4.8e-05, 0.016),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BulletPreset::Nato556 => "5.56mm",
            BulletPreset::Win308 => ".308",
        }
    }
}

impl std::fmt::Display for BulletPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
