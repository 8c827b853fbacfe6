//! Themed scene renderers.
//!
//! Each renderer is a function of a palette, a subject tag and a canvas. All
//! randomness comes from the `DrawRng` passed in, consumed in the order the
//! shapes are listed in each renderer.

pub mod character;
pub mod environment;
pub mod weapon;

pub use character::{render_character, CharacterWeapon};
pub use environment::{render_environment, EnvironmentKind};
pub use weapon::{render_weapon, WeaponKind};

use crate::draw::BBox;

/// Translate a bounding box given relative to `origin`.
pub(crate) fn offset(origin: (i32, i32), rel: BBox) -> BBox {
    [origin.0 + rel[0], origin.1 + rel[1], origin.0 + rel[2], origin.1 + rel[3]]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset() {
        assert_eq!(offset((256, 256), [-25, -40, 25, 40]), [231, 216, 281, 296]);
    }
}
