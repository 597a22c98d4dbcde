//! Layouts and the menu graph that owns them.
//!
//! A [`Layout`] is one screen: a fixed, ordered list of labels. A [`Menu`]
//! owns every layout in a flat table and hands out [`LayoutId`]s. Labels
//! link to other screens by id, never by reference, so the graph may
//! contain cycles (a "Back" entry pointing at its parent) without any
//! ownership knots.

use std::fmt;

use crate::error::MenuError;
use crate::label::Label;

/// Handle to a layout inside a [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(usize);

impl LayoutId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ============================================================================
// LAYOUT
// ============================================================================

/// One navigable screen.
///
/// The label set is fixed at construction; labels themselves stay mutable.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    title: Option<String>,
    labels: Vec<Label>,
}

impl Layout {
    pub fn new(labels: Vec<Label>) -> Self {
        Self {
            title: None,
            labels,
        }
    }

    pub fn titled(title: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            title: Some(title.into()),
            labels,
        }
    }

    /// Title, or empty when the layout has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn size(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    pub fn at_mut(&mut self, index: usize) -> Option<&mut Label> {
        self.labels.get_mut(index)
    }

    /// Like [`at`](Self::at), but with a descriptive error.
    pub fn get(&self, index: usize) -> Result<&Label, MenuError> {
        self.labels.get(index).ok_or(MenuError::IndexOutOfRange {
            index,
            len: self.labels.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }
}

// ============================================================================
// MENU
// ============================================================================

/// Owning table of layouts.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    layouts: Vec<Layout>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, layout: Layout) -> LayoutId {
        self.layouts.push(layout);
        LayoutId(self.layouts.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn layout(&self, id: LayoutId) -> Option<&Layout> {
        self.layouts.get(id.0)
    }

    pub fn layout_mut(&mut self, id: LayoutId) -> Option<&mut Layout> {
        self.layouts.get_mut(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = LayoutId> {
        (0..self.layouts.len()).map(LayoutId)
    }

    /// Point label `index` of layout `from` at layout `to`.
    ///
    /// Called after every layout exists, which is what makes cycles
    /// possible to build.
    pub fn link(&mut self, from: LayoutId, index: usize, to: LayoutId) -> Result<(), MenuError> {
        if self.layout(to).is_none() {
            return Err(MenuError::UnknownLayout(to.0));
        }
        let layout = self
            .layouts
            .get_mut(from.0)
            .ok_or(MenuError::UnknownLayout(from.0))?;
        let len = layout.size();
        let label = layout
            .at_mut(index)
            .ok_or(MenuError::IndexOutOfRange { index, len })?;
        label.set_next(Some(to));
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn two_labels() -> Layout {
        Layout::titled("Main", vec![Label::new("A", "first"), Label::new("B", "second")])
    }

    #[test]
    fn at_returns_labels_in_order() {
        let layout = two_labels();
        assert_eq!(layout.size(), 2);
        assert_eq!(layout.at(0).map(|l| l.title.as_str()), Some("A"));
        assert_eq!(layout.at(1).map(|l| l.title.as_str()), Some("B"));
    }

    #[test]
    fn at_past_end_is_none() {
        let layout = two_labels();
        assert!(layout.at(2).is_none());
        assert!(matches!(
            layout.get(5),
            Err(MenuError::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn untitled_layout_has_empty_title() {
        let layout = Layout::new(vec![]);
        assert_eq!(layout.title(), "");
        assert!(layout.is_empty());
    }

    #[test]
    fn labels_are_mutable_in_place() {
        let mut layout = two_labels();
        if let Some(label) = layout.at_mut(1) {
            label.text = "changed".into();
        }
        assert_eq!(layout.at(1).map(|l| l.text.as_str()), Some("changed"));
        assert_eq!(layout.size(), 2);
    }

    #[test]
    fn link_builds_a_cycle() {
        let mut menu = Menu::new();
        let a = menu.add(Layout::new(vec![Label::new("to B", "")]));
        let b = menu.add(Layout::new(vec![Label::new("to A", "")]));
        menu.link(a, 0, b).unwrap();
        menu.link(b, 0, a).unwrap();

        let next_of = |id| menu.layout(id).and_then(|l| l.at(0)).and_then(|l| l.next);
        assert_eq!(next_of(a), Some(b));
        assert_eq!(next_of(b), Some(a));
    }

    #[test]
    fn link_rejects_bad_targets() {
        let mut menu = Menu::new();
        let a = menu.add(Layout::new(vec![Label::new("only", "")]));
        assert!(matches!(
            menu.link(a, 3, a),
            Err(MenuError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert!(matches!(
            menu.link(a, 0, LayoutId(9)),
            Err(MenuError::UnknownLayout(9))
        ));
    }

    #[test]
    fn ids_cover_every_layout() {
        let mut menu = Menu::new();
        let a = menu.add(Layout::default());
        let b = menu.add(Layout::default());
        assert_eq!(menu.ids().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(b.index(), 1);
    }
}
