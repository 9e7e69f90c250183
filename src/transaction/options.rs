//! Per-show transaction configuration.

use crate::handle::SlotId;
use crate::transaction::transition::Transition;

/// Tag used when neither the caller, the handle, nor a factory names one.
pub const DEFAULT_TAG: &str = "viewstack:default";

/// Immutable configuration for one show/replace.
///
/// Build with [`TransactionOptions::builder`]; derive variants with
/// [`TransactionOptions::to_builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionOptions {
    tag: Option<String>,
    transition: Transition,
    container: Option<SlotId>,
    add_to_back_stack: bool,
    replace_same: bool,
    show_immediate: bool,
    add_mode: bool,
}

impl Default for TransactionOptions {
    fn default() -> Self {
        Self {
            tag: None,
            transition: Transition::none(),
            container: None,
            add_to_back_stack: false,
            replace_same: true,
            show_immediate: false,
            add_mode: false,
        }
    }
}

impl TransactionOptions {
    pub fn builder() -> TransactionOptionsBuilder {
        TransactionOptionsBuilder {
            options: Self::default(),
        }
    }

    pub fn to_builder(&self) -> TransactionOptionsBuilder {
        TransactionOptionsBuilder {
            options: self.clone(),
        }
    }

    /// Tag set by the caller. `None` lets the handle or the controller's
    /// configured default decide.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Explicit container slot, `None` to use the controller's default.
    pub fn container(&self) -> Option<SlotId> {
        self.container
    }

    pub fn add_to_back_stack(&self) -> bool {
        self.add_to_back_stack
    }

    /// When false, an existing unit with the same tag is kept instead of replaced.
    pub fn replace_same(&self) -> bool {
        self.replace_same
    }

    /// Flush pending host transactions right after commit.
    ///
    /// Forces every queued transaction through, so it can be costly when
    /// many are pending.
    pub fn show_immediate(&self) -> bool {
        self.show_immediate
    }

    /// True: add alongside the slot's current units. False: replace them.
    pub fn add_mode(&self) -> bool {
        self.add_mode
    }
}

/// Fluent builder for [`TransactionOptions`].
#[derive(Debug, Clone)]
pub struct TransactionOptionsBuilder {
    options: TransactionOptions,
}

impl TransactionOptionsBuilder {
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.options.tag = Some(tag.into());
        self
    }

    /// Drop an explicit tag.
    pub fn default_tag(mut self) -> Self {
        self.options.tag = None;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.options.transition = transition;
        self
    }

    pub fn container(mut self, slot: SlotId) -> Self {
        self.options.container = Some(slot);
        self
    }

    /// Reset the container to "use the controller default".
    pub fn default_container(mut self) -> Self {
        self.options.container = None;
        self
    }

    pub fn add_to_back_stack(mut self, value: bool) -> Self {
        self.options.add_to_back_stack = value;
        self
    }

    pub fn replace_same(mut self, value: bool) -> Self {
        self.options.replace_same = value;
        self
    }

    pub fn show_immediate(mut self, value: bool) -> Self {
        self.options.show_immediate = value;
        self
    }

    pub fn add_mode(mut self, value: bool) -> Self {
        self.options.add_mode = value;
        self
    }

    pub fn build(self) -> TransactionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = TransactionOptions::default();
        assert_eq!(options.tag(), None);
        assert!(options.transition().is_trivial());
        assert_eq!(options.container(), None);
        assert!(!options.add_to_back_stack());
        assert!(options.replace_same());
        assert!(!options.show_immediate());
        assert!(!options.add_mode());
    }

    #[test]
    fn builder_sets_every_field() {
        let options = TransactionOptions::builder()
            .tag("inbox")
            .transition(Transition::new("slide", 1, 2, 3, 4))
            .container(SlotId(10))
            .add_to_back_stack(true)
            .replace_same(false)
            .show_immediate(true)
            .add_mode(true)
            .build();

        assert_eq!(options.tag(), Some("inbox"));
        assert_eq!(options.transition().name, "slide");
        assert_eq!(options.container(), Some(SlotId(10)));
        assert!(options.add_to_back_stack());
        assert!(!options.replace_same());
        assert!(options.show_immediate());
        assert!(options.add_mode());
    }

    #[test]
    fn to_builder_leaves_original_untouched() {
        let base = TransactionOptions::builder().tag("a").container(SlotId(1)).build();
        let derived = base.to_builder().tag("b").default_container().build();

        assert_eq!(base.tag(), Some("a"));
        assert_eq!(base.container(), Some(SlotId(1)));
        assert_eq!(derived.tag(), Some("b"));
        assert_eq!(derived.container(), None);
    }

    #[test]
    fn explicit_default_tag_is_still_explicit() {
        let options = TransactionOptions::builder().tag(DEFAULT_TAG).build();
        assert_eq!(options.tag(), Some(DEFAULT_TAG));
        assert_eq!(options.to_builder().default_tag().build().tag(), None);
    }
}
