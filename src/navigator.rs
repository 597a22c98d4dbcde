//! The menu state machine.
//!
//! State is the pair (current layout, selected index). `up` and `down`
//! clamp at the ends, `enter` either follows the selected label's link or
//! runs its action, and `print` draws the whole screen. The navigator
//! borrows the [`Menu`] per call rather than owning it, so the application
//! stays free to edit labels between inputs.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::MenuError;
use crate::label::{Label, Selection};
use crate::layout::{LayoutId, Menu};
use crate::prompt::LineInput;
use crate::render::Renderer;
use crate::theme;

/// Default number of debug log lines kept and shown.
pub const DEFAULT_LOG_LENGTH: usize = 10;

/// Default screen column of the debug log gutter.
pub const DEFAULT_LOG_COLUMN: u16 = 50;

// ============================================================================
// DEBUG LOG
// ============================================================================

/// Fixed-capacity ring of recent messages, newest first.
#[derive(Debug, Clone)]
pub struct DebugLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl DebugLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Add a message, dropping the oldest beyond capacity.
    pub fn push(&mut self, message: impl Into<String>) {
        if self.capacity == 0 {
            return;
        }
        self.entries.push_front(message.into());
        self.entries.truncate(self.capacity);
    }

    /// Messages, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ============================================================================
// NAVIGATOR
// ============================================================================

/// Result of [`Navigator::enter`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entered {
    /// Empty layout or nothing selectable.
    Nothing,
    /// Followed a link; selection is back at the top.
    Moved(LayoutId),
    /// Ran the selected label's action in place.
    Selected(Selection),
}

#[derive(Debug, Clone)]
pub struct Navigator {
    current: LayoutId,
    selected: usize,
    log: DebugLog,
    log_column: u16,
}

fn row(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

impl Navigator {
    pub fn new(start: LayoutId) -> Self {
        Self {
            current: start,
            selected: 0,
            log: DebugLog::new(DEFAULT_LOG_LENGTH),
            log_column: DEFAULT_LOG_COLUMN,
        }
    }

    /// Resize the debug log and move its column. Existing entries are dropped.
    pub fn with_debug_log(mut self, length: usize, column: u16) -> Self {
        self.log = DebugLog::new(length);
        self.log_column = column;
        self
    }

    pub fn current(&self) -> LayoutId {
        self.current
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn log(&self) -> &DebugLog {
        &self.log
    }

    pub fn selected_label<'m>(&self, menu: &'m Menu) -> Option<&'m Label> {
        menu.layout(self.current)?.at(self.selected)
    }

    fn size(&self, menu: &Menu) -> usize {
        menu.layout(self.current).map_or(0, |layout| layout.size())
    }

    /// Append a line to the on-screen debug log.
    pub fn debug(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "termenu::log", "{}", message);
        self.log.push(message);
    }

    /// Move the selection up one row, stopping at the top.
    pub fn up(&mut self, menu: &Menu) {
        let last = self.size(menu).saturating_sub(1);
        self.selected = self.selected.saturating_sub(1).min(last);
    }

    /// Move the selection down one row, stopping at the bottom.
    pub fn down(&mut self, menu: &Menu) {
        let size = self.size(menu);
        self.selected = if size == 0 {
            0
        } else {
            (self.selected + 1).min(size - 1)
        };
    }

    /// Follow the selected label's link, if it has one.
    ///
    /// Returns the new layout. Selection resets to the top.
    pub fn follow(&mut self, menu: &Menu) -> Option<LayoutId> {
        let next = self.selected_label(menu)?.next?;
        let Some(layout) = menu.layout(next) else {
            self.debug(format!("broken link to layout {}", next));
            return None;
        };
        let title = match layout.title() {
            "" => next.to_string(),
            title => title.to_string(),
        };
        self.current = next;
        self.selected = 0;
        self.debug(format!("-> {}", title));
        Some(next)
    }

    /// Follow the selected link, or run the selected label's action.
    pub fn enter(
        &mut self,
        menu: &Menu,
        renderer: &mut dyn Renderer,
        input: &mut dyn LineInput,
    ) -> Result<Entered, MenuError> {
        if let Some(next) = self.follow(menu) {
            return Ok(Entered::Moved(next));
        }
        let Some(layout) = menu.layout(self.current) else {
            return Ok(Entered::Nothing);
        };
        let Some(label) = layout.at(self.selected) else {
            return Ok(Entered::Nothing);
        };
        if label.next.is_some() {
            // dangling link, already logged by `follow`
            return Ok(Entered::Nothing);
        }

        let selection = label.select(layout.title(), renderer, input)?;
        match &selection {
            Selection::Nothing => {}
            Selection::Toggled(value) => self.debug(format!("{} = {}", label.title, value)),
            Selection::Edited(value) => self.debug(format!("{} = {}", label.title, value)),
            Selection::Cancelled => self.debug(format!("{} unchanged", label.title)),
        }
        Ok(Entered::Selected(selection))
    }

    /// Draw the current layout and the debug log.
    ///
    /// Row 0 holds the title, label `i` sits on row `i + 1`, the divider
    /// on row `size + 2` and the selected label's detail on `size + 3`.
    pub fn print(&self, menu: &Menu, renderer: &mut dyn Renderer) {
        renderer.move_to(0, 0);
        renderer.clear_screen();

        let size = self.size(menu);
        if let Some(layout) = menu.layout(self.current) {
            if !layout.title().is_empty() {
                renderer.move_to(0, 0);
                theme::STYLE_TITLE.paint(renderer, layout.title());
            }
            for (i, label) in layout.iter().enumerate() {
                renderer.move_to(row(i + 1), 0);
                if i == self.selected {
                    renderer.write(theme::MARKER);
                    label.print_selected(renderer, row(size + 3));
                } else {
                    renderer.write(theme::NO_MARKER);
                    label.print(renderer);
                }
            }
            renderer.move_to(row(size + 2), 0);
            renderer.write(theme::DIVIDER);
        }

        let log_col = self.log_column.saturating_sub(1);
        let mut entries = self.log.iter();
        for r in 0..self.log.capacity() {
            renderer.move_to(row(r), log_col);
            renderer.write(theme::LOG_GUTTER);
            renderer.write(entries.next().unwrap_or(""));
        }

        renderer.move_to(row((size + 4).max(self.log.capacity())), 0);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::VariableCell;
    use crate::layout::Layout;
    use crate::prompt::LineReader;
    use crate::render::Recorder;
    use std::cell::Cell;
    use std::io::Cursor;
    use std::rc::Rc;

    fn no_input() -> LineReader<Cursor<Vec<u8>>> {
        LineReader::new(Cursor::new(Vec::new()))
    }

    fn flat_menu(n: usize) -> (Menu, LayoutId) {
        let labels = (0..n).map(|i| Label::new(format!("L{}", i), "")).collect();
        let mut menu = Menu::new();
        let id = menu.add(Layout::new(labels));
        (menu, id)
    }

    /// Layout A = [Back -> B, Toggle(x)], Layout B = [Back -> A].
    fn scenario() -> (Menu, LayoutId, LayoutId, Rc<Cell<bool>>) {
        let x = Rc::new(Cell::new(false));
        let mut menu = Menu::new();
        let a = menu.add(Layout::titled(
            "A",
            vec![
                Label::new("Back", "-> B"),
                Label::new("Toggle", "flag x").with_variable(VariableCell::bind(&x)),
            ],
        ));
        let b = menu.add(Layout::titled("B", vec![Label::new("Back", "-> A")]));
        menu.link(a, 0, b).unwrap();
        menu.link(b, 0, a).unwrap();
        (menu, a, b, x)
    }

    #[test]
    fn up_converges_to_zero() {
        for n in 1..6 {
            let (menu, id) = flat_menu(n);
            for start in 0..n {
                let mut nav = Navigator::new(id);
                for _ in 0..start {
                    nav.down(&menu);
                }
                assert_eq!(nav.selected(), start);
                for _ in 0..n + 2 {
                    nav.up(&menu);
                }
                assert_eq!(nav.selected(), 0);
            }
        }
    }

    #[test]
    fn down_converges_to_last() {
        for n in 1..6 {
            let (menu, id) = flat_menu(n);
            let mut nav = Navigator::new(id);
            for _ in 0..n + 3 {
                nav.down(&menu);
            }
            assert_eq!(nav.selected(), n - 1);
            nav.down(&menu);
            assert_eq!(nav.selected(), n - 1, "no wraparound");
        }
    }

    #[test]
    fn up_at_top_does_not_wrap() {
        let (menu, id) = flat_menu(3);
        let mut nav = Navigator::new(id);
        nav.up(&menu);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn enter_on_link_resets_selection() {
        let x = Rc::new(Cell::new(false));
        let mut menu = Menu::new();
        let target = menu.add(Layout::new(vec![Label::new("t0", ""), Label::new("t1", "")]));
        let home = menu.add(Layout::new(vec![
            Label::new("a", ""),
            Label::new("b", "").with_variable(VariableCell::bind(&x)),
            Label::new("go", "").with_next(target),
        ]));
        let mut nav = Navigator::new(home);
        nav.down(&menu);
        nav.down(&menu);

        let mut rec = Recorder::new();
        let outcome = nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!(outcome, Entered::Moved(target));
        assert_eq!(nav.current(), target);
        assert_eq!(nav.selected(), 0);
    }

    #[test]
    fn link_takes_priority_over_variable() {
        let x = Rc::new(Cell::new(false));
        let mut menu = Menu::new();
        let other = menu.add(Layout::new(vec![Label::new("o", "")]));
        let home = menu.add(Layout::new(vec![
            Label::new("both", "")
                .with_variable(VariableCell::bind(&x))
                .with_next(other),
        ]));
        let mut nav = Navigator::new(home);
        let mut rec = Recorder::new();
        nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!(nav.current(), other);
        assert!(!x.get());
    }

    #[test]
    fn scenario_cycle_closes() {
        let (menu, a, b, x) = scenario();
        let mut nav = Navigator::new(a);
        let mut rec = Recorder::new();

        nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!((nav.current(), nav.selected()), (b, 0));

        nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!((nav.current(), nav.selected()), (a, 0));
        assert!(!x.get());
    }

    #[test]
    fn scenario_toggle_stays_on_layout() {
        let (menu, a, _, x) = scenario();
        let mut nav = Navigator::new(a);
        nav.down(&menu);
        let mut rec = Recorder::new();

        let outcome = nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!(outcome, Entered::Selected(Selection::Toggled(true)));
        assert!(x.get());
        assert_eq!((nav.current(), nav.selected()), (a, 1));
        assert_eq!(nav.log().iter().next(), Some("Toggle = true"));
    }

    #[test]
    fn enter_on_empty_layout_is_noop() {
        let mut menu = Menu::new();
        let empty = menu.add(Layout::titled("Empty", vec![]));
        let mut nav = Navigator::new(empty);
        nav.down(&menu);
        nav.up(&menu);
        assert_eq!(nav.selected(), 0);

        let mut rec = Recorder::new();
        let outcome = nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!(outcome, Entered::Nothing);
        nav.print(&menu, &mut rec);
        assert!(rec.row(0).starts_with("Empty"));
        assert!(rec.row(2).starts_with(theme::DIVIDER));
    }

    #[test]
    fn enter_on_plain_label_does_nothing() {
        let (menu, id) = flat_menu(2);
        let mut nav = Navigator::new(id);
        let mut rec = Recorder::new();
        let outcome = nav.enter(&menu, &mut rec, &mut no_input()).unwrap();
        assert_eq!(outcome, Entered::Selected(Selection::Nothing));
        assert!(nav.log().is_empty());
    }

    #[test]
    fn debug_log_keeps_most_recent() {
        let mut log = DebugLog::new(3);
        for i in 0..4 {
            log.push(format!("m{}", i));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["m3", "m2", "m1"]);
    }

    #[test]
    fn zero_capacity_log_stays_empty() {
        let mut log = DebugLog::new(0);
        log.push("ignored");
        assert!(log.is_empty());
    }

    #[test]
    fn print_marks_selected_row_and_shows_detail() {
        let (menu, a, _, _) = scenario();
        let mut nav = Navigator::new(a).with_debug_log(2, 30);
        nav.down(&menu);
        let mut rec = Recorder::new();
        nav.print(&menu, &mut rec);

        assert!(rec.row(0).starts_with("A"));
        assert!(rec.row(1).starts_with("   Back"));
        assert!(rec.row(2).starts_with(" > Toggle"));
        assert_eq!(rec.row(4), theme::DIVIDER);
        assert_eq!(rec.row(5), "flag x : false");
    }

    #[test]
    fn print_renders_log_newest_first() {
        let (menu, a, _, _) = scenario();
        let mut nav = Navigator::new(a).with_debug_log(3, 40);
        for i in 0..4 {
            nav.debug(format!("msg{}", i));
        }
        let mut rec = Recorder::new();
        nav.print(&menu, &mut rec);

        let log_text = |r: usize| rec.row(r).chars().skip(39).collect::<String>();
        assert_eq!(log_text(0), "| msg3");
        assert_eq!(log_text(1), "| msg2");
        assert_eq!(log_text(2), "| msg1");
        assert!(!rec.screen().contains("msg0"));
    }
}
