use serde::Serialize;

/// Immutable mapping from a style key to the phrase appended to a prompt.
#[derive(Debug)]
pub struct StyleTable {
    entries: &'static [(&'static str, &'static str)],
    default_key: &'static str,
}

impl StyleTable {
    /// Unknown or absent keys resolve to the default entry.
    pub fn lookup(&self, key: Option<&str>) -> &'static str {
        self.resolve(key).1
    }

    /// Resolved `(key, phrase)` pair; the key is the default one when `key`
    /// is unknown, so the name always matches its phrase.
    pub fn resolve(&self, key: Option<&str>) -> (&'static str, &'static str) {
        key.map(str::trim)
            .and_then(|k| self.entries.iter().find(|(name, _)| *name == k))
            .or_else(|| self.entries.iter().find(|(name, _)| *name == self.default_key))
            .copied()
            .unwrap_or((self.default_key, ""))
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    pub fn default_key(&self) -> &'static str {
        self.default_key
    }

    pub fn default_phrase(&self) -> &'static str {
        self.lookup(None)
    }

    fn summary(&self) -> StyleSummary {
        StyleSummary { keys: self.keys(), default: self.default_key }
    }
}

pub static BLUEPRINT_STYLES: StyleTable = StyleTable {
    entries: &[
        ("Modern Minimalist", "clean white palette, light oak wood floors, grey tiles, minimalist aesthetic"),
        ("Warm Professional", "rich walnut flooring, beige walls, soft accent lighting, executive feel"),
        ("Industrial Loft", "concrete floor textures, exposed red brick accents, black metal outlines"),
        ("Eco-Green", "bamboo flooring, vertical green wall textures, natural stone surfaces"),
        ("Classic Blueprint", "aesthetic blue and white coloring with realistic texture overlays"),
    ],
    default_key: "Modern Minimalist",
};

pub static BACKDROP_STYLES: StyleTable = StyleTable {
    entries: &[
        ("Minimalist Studio", "clean, soft-lit professional studio setting with a neutral light-grey background"),
        ("Luxury Marble", "opulent white marble surface with elegant reflections and soft warm lighting"),
        ("Industrial Concrete", "raw industrial concrete surface with dramatic shadows and atmospheric lighting"),
        ("Soft Silk", "draped luxurious silk fabric in soft neutral tones with gentle folds and highlights"),
        ("Nature Green", "fresh natural setting with blurred green leaves in the background and natural sunlight"),
    ],
    default_key: "Minimalist Studio",
};

pub static OUTFIT_VIBES: StyleTable = StyleTable {
    entries: &[
        ("elegant", "refined elegance with tailored silhouettes, luxe fabrics and understated jewelry"),
        ("casual", "relaxed everyday comfort with breathable layers and clean sneakers"),
        ("streetwear", "bold streetwear with oversized fits, statement sneakers and graphic accents"),
        ("bohemian", "free-spirited bohemian layers, earthy textures, flowing fabrics and artisan accessories"),
        ("minimalist", "minimalist capsule pieces in a restrained neutral palette with sharp lines"),
    ],
    default_key: "elegant",
};

pub static BRAND_PERSONALITIES: StyleTable = StyleTable {
    entries: &[
        ("Modern", "sleek geometric forms, confident sans-serif lettering and generous negative space"),
        ("Playful", "rounded friendly shapes, bouncy lettering and a bright cheerful palette"),
        ("Luxury", "refined serif lettering, fine line work and a restrained premium palette"),
        ("Technical", "precise grid-aligned marks, monoline strokes and a cool engineered palette"),
        ("Organic", "hand-drawn natural motifs, soft curves and an earthy palette"),
    ],
    default_key: "Modern",
};

#[derive(Debug, Serialize)]
pub struct StyleSummary {
    pub keys: Vec<&'static str>,
    pub default: &'static str,
}

/// Style keys offered by each studio, for populating the style pickers.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleCatalog {
    pub blueprint: StyleSummary,
    pub backdrop: StyleSummary,
    pub outfit_vibe: StyleSummary,
    pub brand_personality: StyleSummary,
}

impl StyleCatalog {
    pub fn current() -> Self {
        Self {
            blueprint: BLUEPRINT_STYLES.summary(),
            backdrop: BACKDROP_STYLES.summary(),
            outfit_vibe: OUTFIT_VIBES.summary(),
            brand_personality: BRAND_PERSONALITIES.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables() -> [&'static StyleTable; 4] {
        [&BLUEPRINT_STYLES, &BACKDROP_STYLES, &OUTFIT_VIBES, &BRAND_PERSONALITIES]
    }

    #[test]
    fn every_default_key_exists_in_its_table() {
        for table in tables() {
            assert!(table.keys().contains(&table.default_key()), "{table:?}");
            assert!(!table.default_phrase().is_empty());
        }
    }

    #[test]
    fn known_keys_resolve_to_their_own_phrase() {
        assert_eq!(
            BLUEPRINT_STYLES.lookup(Some("Industrial Loft")),
            "concrete floor textures, exposed red brick accents, black metal outlines"
        );
        assert_eq!(BACKDROP_STYLES.lookup(Some(" Luxury Marble ")), BACKDROP_STYLES.entries[1].1);
    }

    #[test]
    fn unknown_or_missing_keys_fall_back_to_default() {
        for table in tables() {
            assert_eq!(table.lookup(None), table.default_phrase());
            assert_eq!(table.lookup(Some("Vaporwave")), table.default_phrase());
            assert_eq!(table.lookup(Some("")), table.default_phrase());
        }
    }

    #[test]
    fn resolve_names_the_entry_it_used() {
        assert_eq!(OUTFIT_VIBES.resolve(Some("casual")), OUTFIT_VIBES.entries[1]);
        assert_eq!(OUTFIT_VIBES.resolve(Some("cyberpunk")), ("elegant", OUTFIT_VIBES.default_phrase()));
        assert_eq!(BRAND_PERSONALITIES.resolve(None).0, "Modern");
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(OUTFIT_VIBES.lookup(Some("Streetwear")), OUTFIT_VIBES.default_phrase());
    }

    #[test]
    fn catalog_lists_keys_in_declaration_order() {
        let catalog = serde_json::to_value(StyleCatalog::current()).unwrap();
        assert_eq!(catalog["blueprint"]["keys"][0], "Modern Minimalist");
        assert_eq!(catalog["outfitVibe"]["default"], "elegant");
        assert_eq!(catalog["brandPersonality"]["keys"].as_array().unwrap().len(), 5);
    }
}
