use rand::Rng;
use rand::seq::SliceRandom;

/// Preset palettes picked by [`ThemeSettings::surprise`].
pub const PRESETS: [(&str, &str, u8); 3] = [
    ("#ff4dd8", "#8affef", 88),
    ("#6f7dff", "#58ffd1", 72),
    ("#ff6b35", "#ffe066", 90),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSettings {
    pub primary: String,
    pub secondary: String,
    /// Glow intensity in percent
    pub glow: u8,
}

/// CSS custom properties plus the status line shown under the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTheme {
    pub properties: Vec<(String, String)>,
    pub status: String,
}

impl ThemeSettings {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>, glow: u8) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            glow: glow.min(100),
        }
    }

    /// One of the [`PRESETS`], chosen at random.
    pub fn surprise<R: Rng>(rng: &mut R) -> Self {
        let (primary, secondary, glow) = *PRESETS.choose(rng).unwrap_or(&PRESETS[0]);
        Self::new(primary, secondary, glow)
    }

    pub fn apply(&self) -> AppliedTheme {
        AppliedTheme {
            properties: vec![
                ("--primary".to_string(), self.primary.clone()),
                ("--secondary".to_string(), self.secondary.clone()),
                ("--glow".to_string(), self.glow.to_string()),
            ],
            status: format!(
                "Theme applied: {} + {} · Glow {}%",
                self.primary, self.secondary, self.glow
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_apply_sets_properties_and_status() {
        let applied = ThemeSettings::new("#112233", "#445566", 40).apply();
        assert_eq!(applied.properties[0], ("--primary".to_string(), "#112233".to_string()));
        assert_eq!(applied.properties[2].1, "40");
        assert_eq!(applied.status, "Theme applied: #112233 + #445566 · Glow 40%");
    }

    #[test]
    fn test_surprise_picks_a_preset() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            let theme = ThemeSettings::surprise(&mut rng);
            assert!(PRESETS.iter().any(|(p, s, g)| theme.primary == *p
                && theme.secondary == *s
                && theme.glow == *g));
        }
    }

    #[test]
    fn test_glow_is_clamped() {
        assert_eq!(ThemeSettings::new("a", "b", 250).glow, 100);
    }
}
