//! Tuning knobs for perception.

use crate::entity::{MonsterKind, NoiseProfile};
use crate::error::ConfigError;
use crate::terrain::Terrain;

/// Noise detection tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseConfig {
    /// Number of outcomes of the listening draw; every outcome but zero is
    /// a detection.
    pub listen_range: i32,
    /// Added to `listen_range` when the player wears the hearing cloak.
    pub hearing_cloak_bonus: i32,
    /// Terrain on which moving monsters are always heard.
    pub always_heard: Vec<Terrain>,
    /// Per-species replacements for the default noise profiles.
    pub overrides: Vec<(MonsterKind, NoiseProfile)>,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            listen_range: 2,
            hearing_cloak_bonus: 2,
            always_heard: vec![Terrain::QueenRock],
            overrides: Vec::new(),
        }
    }
}

impl NoiseConfig {
    pub fn profile(&self, kind: MonsterKind) -> NoiseProfile {
        self.overrides
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or_else(|| kind.default_noise(), |&(_, p)| p)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_range < 1 {
            return Err(ConfigError::ListenRange(self.listen_range));
        }
        if self.hearing_cloak_bonus < 0 {
            return Err(ConfigError::HearingBonus(self.hearing_cloak_bonus));
        }
        for (i, (kind, _)) in self.overrides.iter().enumerate() {
            if self.overrides[..i].iter().any(|(k, _)| k == kind) {
                return Err(ConfigError::DuplicateProfile(*kind));
            }
        }
        Ok(())
    }
}

/// Configuration of a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SenseConfig {
    pub noise: NoiseConfig,
    /// Wall cost of the generic dungeon domain.
    pub dungeon_wall_cost: i32,
}

impl Default for SenseConfig {
    fn default() -> Self {
        Self {
            noise: NoiseConfig::default(),
            dungeon_wall_cost: 4,
        }
    }
}

impl SenseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.noise.validate()?;
        if self.dungeon_wall_cost < 1 {
            return Err(ConfigError::WallCost(self.dungeon_wall_cost));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::NoiseKind;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SenseConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let mut c = SenseConfig::default();
        c.noise.listen_range = 0;
        assert_eq!(c.validate(), Err(ConfigError::ListenRange(0)));

        let mut c = SenseConfig::default();
        c.dungeon_wall_cost = 0;
        assert_eq!(c.validate(), Err(ConfigError::WallCost(0)));

        let mut c = SenseConfig::default();
        c.noise.hearing_cloak_bonus = -1;
        assert_eq!(c.validate(), Err(ConfigError::HearingBonus(-1)));

        let mut c = SenseConfig::default();
        c.noise.overrides = vec![
            (MonsterKind::Dog, NoiseProfile::Silent),
            (MonsterKind::Dog, NoiseProfile::Audible(NoiseKind::Wings)),
        ];
        assert_eq!(c.validate(), Err(ConfigError::DuplicateProfile(MonsterKind::Dog)));
    }

    #[test]
    fn overrides_replace_defaults() {
        let mut n = NoiseConfig::default();
        n.overrides.push((MonsterKind::Dog, NoiseProfile::Silent));
        assert_eq!(n.profile(MonsterKind::Dog), NoiseProfile::Silent);
        assert_eq!(n.profile(MonsterKind::Worm), MonsterKind::Worm.default_noise());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let c: SenseConfig =
            serde_json::from_str(r#"{"noise":{"listen_range":3}}"#).expect("valid json");
        assert_eq!(c.noise.listen_range, 3);
        assert_eq!(c.noise.always_heard, vec![Terrain::QueenRock]);
        assert_eq!(c.dungeon_wall_cost, 4);
    }
}
