//! Stat and modifier aggregation.
//!
//! Both folds are plain field-by-field sums, so they are commutative and
//! associative. They differ only in how absent fields come out: a stat
//! absent everywhere folds to zero, a modifier absent everywhere stays absent.

use serde::{Deserialize, Serialize};

/// One contribution to a ship's stats. Absent fields count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dmg_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shields: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shield_regen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hull_regen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor_regen: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evasion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
}

/// Folded ship stats: every field present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ShipStats {
    pub dmg_per_day: f64,
    pub shields: f64,
    pub shield_regen: f64,
    pub hull: f64,
    pub hull_regen: f64,
    pub armor: f64,
    pub armor_regen: f64,
    pub evasion: f64,
    pub speed: f64,
    pub power: f64,
}

impl ShipStats {
    /// Adds one contribution into the running totals.
    pub fn accumulate(&mut self, c: &ShipSummary) {
        self.dmg_per_day += c.dmg_per_day.unwrap_or(0.0);
        self.shields += c.shields.unwrap_or(0.0);
        self.shield_regen += c.shield_regen.unwrap_or(0.0);
        self.hull += c.hull.unwrap_or(0.0);
        self.hull_regen += c.hull_regen.unwrap_or(0.0);
        self.armor += c.armor.unwrap_or(0.0);
        self.armor_regen += c.armor_regen.unwrap_or(0.0);
        self.evasion += c.evasion.unwrap_or(0.0);
        self.speed += c.speed.unwrap_or(0.0);
        self.power += c.power.unwrap_or(0.0);
    }

    /// The military power heuristic for these stats.
    pub fn military_power(&self) -> f64 {
        military_power(self)
    }
}

impl From<ShipStats> for ShipSummary {
    fn from(s: ShipStats) -> Self {
        ShipSummary {
            dmg_per_day: Some(s.dmg_per_day),
            shields: Some(s.shields),
            shield_regen: Some(s.shield_regen),
            hull: Some(s.hull),
            hull_regen: Some(s.hull_regen),
            armor: Some(s.armor),
            armor_regen: Some(s.armor_regen),
            evasion: Some(s.evasion),
            speed: Some(s.speed),
            power: Some(s.power),
        }
    }
}

/// Sums stat contributions starting from all zeros.
pub fn fold_stats<'a, I>(contributions: I) -> ShipStats
where
    I: IntoIterator<Item = &'a ShipSummary>,
{
    let mut total = ShipStats::default();
    for c in contributions {
        total.accumulate(c);
    }
    total
}

/// `(dmg_per_day * (hull / 2 + shields + armor)) ^ 0.65`
///
/// Blends offense with effective survivability. Only hull is halved.
pub fn military_power(stats: &ShipStats) -> f64 {
    (stats.dmg_per_day * (stats.hull / 2.0 + stats.shields + stats.armor)).powf(0.65)
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Ship-wide combat and mobility modifiers provided by devices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShipModifiers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combat_disengagement_chance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_damage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fire_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapons_damage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sublight_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evasion: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapon_range: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explosive_weapon_damage: Option<f64>,
}

fn add_opt(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    match (left, right) {
        (Some(a), Some(b)) => Some(a + b),
        (a, None) => a,
        (None, b) => b,
    }
}

impl ShipModifiers {
    /// Field-wise sum; a field stays absent only if absent on both sides.
    pub fn combine(&self, other: &ShipModifiers) -> ShipModifiers {
        ShipModifiers {
            combat_disengagement_chance: add_opt(
                self.combat_disengagement_chance,
                other.combat_disengagement_chance,
            ),
            crisis_damage: add_opt(self.crisis_damage, other.crisis_damage),
            fire_rate: add_opt(self.fire_rate, other.fire_rate),
            weapons_damage: add_opt(self.weapons_damage, other.weapons_damage),
            sublight_speed: add_opt(self.sublight_speed, other.sublight_speed),
            evasion: add_opt(self.evasion, other.evasion),
            tracking: add_opt(self.tracking, other.tracking),
            engagement_range: add_opt(self.engagement_range, other.engagement_range),
            weapon_range: add_opt(self.weapon_range, other.weapon_range),
            explosive_weapon_damage: add_opt(
                self.explosive_weapon_damage,
                other.explosive_weapon_damage,
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == ShipModifiers::default()
    }
}

/// Sums modifier sets. Fields no contribution defines stay `None`.
pub fn fold_modifiers<'a, I>(contributions: I) -> ShipModifiers
where
    I: IntoIterator<Item = &'a ShipModifiers>,
{
    contributions
        .into_iter()
        .fold(ShipModifiers::default(), |acc, m| acc.combine(m))
}
