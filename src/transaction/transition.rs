//! Animation references applied to a transaction.

use serde::{Deserialize, Serialize};

/// Animation reference meaning "no animation".
pub const NO_ANIMATION: u32 = 0;

/// Named set of four directional animation references.
///
/// The references are opaque to this crate; the host resolves them to
/// whatever animation resources it owns.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transition {
    pub name: String,
    #[serde(default)]
    pub enter: u32,
    #[serde(default)]
    pub exit: u32,
    /// Played by the unit re-entering when the back stack is popped.
    #[serde(default)]
    pub pop_enter: u32,
    /// Played by the unit leaving when the back stack is popped.
    #[serde(default)]
    pub pop_exit: u32,
}

impl Transition {
    pub fn new(
        name: impl Into<String>,
        enter: u32,
        exit: u32,
        pop_enter: u32,
        pop_exit: u32,
    ) -> Self {
        Self {
            name: name.into(),
            enter,
            exit,
            pop_enter,
            pop_exit,
        }
    }

    /// The no-op transition.
    pub fn none() -> Self {
        Self::default()
    }

    /// True when every reference is [`NO_ANIMATION`].
    pub fn is_trivial(&self) -> bool {
        [self.enter, self.exit, self.pop_enter, self.pop_exit]
            .iter()
            .all(|anim| *anim == NO_ANIMATION)
    }

    /// References in application order: enter, exit, pop enter, pop exit.
    pub fn animations(&self) -> [u32; 4] {
        [self.enter, self.exit, self.pop_enter, self.pop_exit]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_trivial() {
        assert!(Transition::none().is_trivial());
        assert!(Transition::new("named-but-empty", 0, 0, 0, 0).is_trivial());
    }

    #[test]
    fn any_reference_makes_it_non_trivial() {
        assert!(!Transition::new("fade", 0, 0, 0, 9).is_trivial());
    }

    #[test]
    fn animations_keep_fixed_order() {
        let slide = Transition::new("slide", 1, 2, 3, 4);
        assert_eq!(slide.animations(), [1, 2, 3, 4]);
    }

    #[test]
    fn missing_references_deserialize_as_none() {
        let t: Transition = toml::from_str("name = \"fade\"\nenter = 5").unwrap();
        assert_eq!(t.enter, 5);
        assert_eq!(t.exit, NO_ANIMATION);
    }
}
