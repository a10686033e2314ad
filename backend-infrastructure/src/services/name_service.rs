use backend_domain::NameNormalizer;

/// Cosmetic dungeon-name abbreviation rules, applied in order.
const REWRITES: &[(&str, &str)] = &[
    ("No Continues", "No Cont"),
    ("No Continue", "No Cont"),
    ("Some Limited Time Dungeons", "Some Guerrillas"),
    ("are added in", "in"),
    ("!", ""),
    ("Dragon Infestation", "Dragons"),
    (" Infestation", "s"),
    ("Daily Descended Dungeon", "Daily Descends"),
    ("Chance for ", ""),
    ("Jewel of the Spirit", "Spirit Jewel"),
    (" & ", "/"),
    (" / ", "/"),
    ("PAD Radar", "PADR"),
    ("in normal dungeons", "in normals"),
    ("Selected ", "Some "),
    ("Enhanced ", "Enh "),
    ("All Att. Req.", "All Att."),
    ("Extreme King Metal Dragon", "Extreme KMD"),
    ("Golden Mound-Tricolor [Fr/Wt/Wd Only]", "Golden Mound"),
    ("Gods-Awakening Materials Descended", "Awoken Mats"),
    ("Orb move time 4 sec", "4s move time"),
    ("Awakening Materials Descended", "Awkn Mats"),
    ("Awakening Materials", "Awkn Mats"),
    ("Star Treasure Thieves' Den", "STTD"),
    ("Ruins of the Star Vault", "Star Vault"),
    ("-★6 or lower Enhanced", ""),
];

pub struct DefaultNameNormalizer;

impl DefaultNameNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DefaultNameNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl NameNormalizer for DefaultNameNormalizer {
    fn normalize(&self, raw: &str) -> String {
        if raw.to_lowercase().contains("tamadra invades in some tech") {
            return "Latents invades some Techs & 20x +Eggs".to_string();
        }
        let mut name = raw.to_string();
        if name.contains("1.5x Bonus Pal Point in multiplay") {
            name = "[Descends] 1.5x Pal Points in multiplay".to_string();
        }
        for (from, to) in REWRITES {
            name = name.replace(from, to);
        }
        name
    }
}
