//! Weapons: immutable bindings from style tags to attack styles.
//!
//! A weapon carries its base attack power, the distance unit that scales
//! every range shape used through it, and a fixed map of the styles it
//! supports (at most one per tag). Weapons never change after
//! construction; swapping capabilities means equipping a different weapon.

use std::collections::HashMap;

use crate::style::{AttackStyle, SlashStyle, SmashStyle, StabStyle, StyleKind, SwingStyle};

/// Weapon family tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    /// Sword: slash and stab.
    Sword,
    /// Knife: slash and swing.
    Knife,
    /// Spear: long thrusts.
    Spear,
    /// Hammer: smashes and swings.
    Hammer,
}

/// An equippable weapon.
#[derive(Debug)]
pub struct Weapon {
    /// Family tag.
    kind: WeaponKind,
    /// Base attack power, added to the wielder's attack attribute.
    base_attack: i32,
    /// Distance unit scaling all range geometry for this weapon.
    distance_unit: f32,
    /// Supported styles, keyed by tag.
    styles: HashMap<StyleKind, Box<dyn AttackStyle>>,
}

impl Weapon {
    /// Creates a weapon with no styles; chain [`Weapon::with_style`].
    #[must_use]
    pub fn new(kind: WeaponKind, base_attack: i32, distance_unit: f32) -> Self {
        Self {
            kind,
            base_attack,
            distance_unit,
            styles: HashMap::new(),
        }
    }

    /// Adds a style, keyed by its own tag. A second style with the same
    /// tag replaces the first.
    #[must_use]
    pub fn with_style(mut self, style: Box<dyn AttackStyle>) -> Self {
        self.styles.insert(style.kind(), style);
        self
    }

    /// Family tag.
    #[must_use]
    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    /// Base attack power.
    #[must_use]
    pub fn base_attack(&self) -> i32 {
        self.base_attack
    }

    /// Distance unit scaling this weapon's range geometry.
    #[must_use]
    pub fn distance_unit(&self) -> f32 {
        self.distance_unit
    }

    /// The style bound to a tag, if this weapon supports it.
    #[must_use]
    pub fn style(&self, kind: StyleKind) -> Option<&dyn AttackStyle> {
        self.styles.get(&kind).map(AsRef::as_ref)
    }

    /// Whether this weapon supports a style tag.
    #[must_use]
    pub fn supports(&self, kind: StyleKind) -> bool {
        self.styles.contains_key(&kind)
    }

    /// Tags of all supported styles, in no particular order.
    #[must_use]
    pub fn supported_styles(&self) -> Vec<StyleKind> {
        self.styles.keys().copied().collect()
    }

    /// Stock knife: short reach, slash + swing.
    #[must_use]
    pub fn knife() -> Self {
        Self::new(WeaponKind::Knife, 10, 32.0)
            .with_style(Box::new(SlashStyle::new()))
            .with_style(Box::new(SwingStyle::new()))
    }

    /// Stock sword: medium reach, slash + stab.
    #[must_use]
    pub fn sword() -> Self {
        Self::new(WeaponKind::Sword, 12, 48.0)
            .with_style(Box::new(SlashStyle::new()))
            .with_style(Box::new(StabStyle::new()))
    }

    /// Stock spear: long reach, stab only.
    #[must_use]
    pub fn spear() -> Self {
        Self::new(WeaponKind::Spear, 14, 64.0).with_style(Box::new(StabStyle::new()))
    }

    /// Stock hammer: smash + swing.
    #[must_use]
    pub fn hammer() -> Self {
        Self::new(WeaponKind::Hammer, 18, 40.0)
            .with_style(Box::new(SmashStyle::new()))
            .with_style(Box::new(SwingStyle::new()))
    }
}
