//! Built-in grammars.
//!
//! The first entry is the startup preset.

use crate::grammar::{Grammar, RewriteEngine};

/// A named grammar with the settings it looks best with.
#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub axiom: &'static str,
    pub rules: &'static [(char, &'static str)],
    /// Rotation angle in degrees.
    pub angle: f32,
    /// Recommended number of rewrite passes.
    pub generations: usize,
    /// Whether pitch/roll commands are meaningful for this grammar.
    pub is_3d: bool,
}

impl Preset {
    pub fn grammar(&self) -> Grammar {
        self.rules.iter().fold(
            Grammar::new(self.axiom).with_angle(self.angle),
            |grammar, (symbol, replacement)| grammar.with_rule(*symbol, *replacement),
        )
    }

    /// A rewrite engine at generation 0 of this preset.
    pub fn engine(&self) -> RewriteEngine {
        RewriteEngine::from_grammar(self.grammar())
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "Fractal Plant",
        axiom: "X",
        rules: &[('X', "F+[[X]-X]-F[-FX]+X"), ('F', "FF")],
        angle: 25.0,
        generations: 5,
        is_3d: false,
    },
    Preset {
        name: "Flowering Bush",
        axiom: "A",
        rules: &[
            ('A', "[&FL!A]/////'[&FL!A]///////'[&FLK!A]"),
            ('F', "S/////F"),
            ('S', "FL"),
        ],
        angle: 22.5,
        generations: 5,
        is_3d: true,
    },
    Preset {
        name: "Leafy Tree",
        axiom: "X",
        rules: &[('X', "F[&+XL]//[&-XL]//[^+XK]F!X"), ('F', "FF")],
        angle: 25.0,
        generations: 4,
        is_3d: true,
    },
    Preset {
        name: "Koch Snowflake",
        axiom: "F++F++F",
        rules: &[('F', "F-F++F-F")],
        angle: 60.0,
        generations: 4,
        is_3d: false,
    },
    Preset {
        name: "Sierpinski Triangle",
        axiom: "F-G-G",
        rules: &[('F', "F-G+F+G-F"), ('G', "GG")],
        angle: 120.0,
        generations: 5,
        is_3d: false,
    },
    Preset {
        name: "Dragon Curve",
        axiom: "FX",
        rules: &[('X', "X+YF+"), ('Y', "-FX-Y")],
        angle: 90.0,
        generations: 10,
        is_3d: false,
    },
    Preset {
        name: "Binary Tree",
        axiom: "X",
        rules: &[('X', "F[+XL][-XL]"), ('F', "FF")],
        angle: 40.0,
        generations: 7,
        is_3d: false,
    },
];

/// The preset loaded at startup.
pub fn default_preset() -> &'static Preset {
    &PRESETS[0]
}

/// Looks a preset up by name, ignoring ASCII case.
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}
