use super::surface::ShapeConstants;

pub struct ShapePreset {
    pub name: &'static str,
    pub description: &'static str,
    pub constants: ShapeConstants,
}

pub const SHAPE_PRESETS: &[ShapePreset] = &[
    ShapePreset {
        name: "Spiral Shell",
        description: "Reference proportions",
        constants: ShapeConstants::new(0.3, 0.3, 0.15),
    },
    ShapePreset {
        name: "Round Shell",
        description: "Equal scale on every axis",
        constants: ShapeConstants::new(0.3, 0.3, 0.3),
    },
    ShapePreset {
        name: "Flat Coil",
        description: "Nearly planar, height almost zero",
        constants: ShapeConstants::new(0.3, 0.3, 0.02),
    },
    ShapePreset {
        name: "Oval Shell",
        description: "Stretched along x",
        constants: ShapeConstants::new(0.5, 0.2, 0.15),
    },
    ShapePreset {
        name: "Inverted",
        description: "Reference shape mirrored through the xy plane",
        constants: ShapeConstants::new(0.3, 0.3, -0.15),
    },
];

/// Case-insensitive lookup by preset name.
pub fn find_preset(name: &str) -> Option<&'static ShapePreset> {
    SHAPE_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_preset_is_reference() {
        assert_eq!(SHAPE_PRESETS[0].constants, ShapeConstants::default());
    }

    #[test]
    fn lookup_ignores_case() {
        let preset = find_preset("flat coil").unwrap();
        assert_eq!(preset.name, "Flat Coil");
        assert!(find_preset("torus").is_none());
    }

    #[test]
    fn presets_are_valid() {
        for preset in SHAPE_PRESETS {
            assert!(preset.constants.validate().is_ok(), "{}", preset.name);
        }
    }
}
