//! Menu actions and their enabled state
//!
//! An action is a named, categorized operation on some application context.
//! Actions that can become unavailable publish their state through a
//! [`CanExecuteState`]; the [`Menu`] subscribes to every action once and
//! keeps a cached enabled flag per item, so rendering the menu never has to
//! poll the actions.

use crate::error::{ActionError, ActionResult};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MenuCategory {
    File,
    Settings,
    Fractals,
}

impl MenuCategory {
    /// Display order in the menu bar
    pub const ALL: [MenuCategory; 3] = [
        MenuCategory::File,
        MenuCategory::Settings,
        MenuCategory::Fractals,
    ];

    pub fn title(self) -> &'static str {
        match self {
            MenuCategory::File => "File",
            MenuCategory::Settings => "Settings",
            MenuCategory::Fractals => "Fractals",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Callback receiving the new enabled state
pub type CanExecuteListener = Box<dyn Fn(bool)>;

/// Observable enabled flag shared between an action and whoever toggles it
///
/// Clones share the same flag. Listeners run only when the value actually
/// changes and must not subscribe from inside the callback.
#[derive(Clone)]
pub struct CanExecuteState {
    inner: Rc<StateInner>,
}

struct StateInner {
    value: Cell<bool>,
    listeners: RefCell<Vec<CanExecuteListener>>,
}

impl CanExecuteState {
    pub fn new(initial: bool) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: Cell::new(initial),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn get(&self) -> bool {
        self.inner.value.get()
    }

    pub fn set(&self, value: bool) {
        if self.inner.value.replace(value) == value {
            return;
        }
        for listener in self.inner.listeners.borrow().iter() {
            listener(value);
        }
    }

    pub fn subscribe(&self, listener: CanExecuteListener) {
        self.inner.listeners.borrow_mut().push(listener);
    }
}

impl fmt::Debug for CanExecuteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanExecuteState")
            .field("value", &self.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish()
    }
}

/// A user-triggered operation bound to a menu entry
pub trait UiAction<Ctx> {
    fn category(&self) -> MenuCategory;

    fn name(&self) -> &str;

    fn can_execute(&self) -> bool {
        true
    }

    /// Registers a listener for changes of [`UiAction::can_execute`]
    ///
    /// Always-enabled actions keep the default, which never calls back.
    fn subscribe(&self, _listener: CanExecuteListener) {}

    fn execute(&mut self, ctx: &mut Ctx) -> ActionResult<()>;
}

/// Handle of a menu entry, valid for the menu that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuItemId(usize);

pub struct MenuItem<Ctx> {
    action: Box<dyn UiAction<Ctx>>,
    enabled: Rc<Cell<bool>>,
}

impl<Ctx> MenuItem<Ctx> {
    pub fn name(&self) -> &str {
        self.action.name()
    }

    pub fn category(&self) -> MenuCategory {
        self.action.category()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }
}

pub struct Menu<Ctx> {
    items: Vec<MenuItem<Ctx>>,
}

impl<Ctx> Menu<Ctx> {
    pub fn new(actions: Vec<Box<dyn UiAction<Ctx>>>) -> Self {
        let items = actions
            .into_iter()
            .map(|action| {
                let enabled = Rc::new(Cell::new(action.can_execute()));
                let sink = Rc::clone(&enabled);
                action.subscribe(Box::new(move |value| sink.set(value)));
                MenuItem { action, enabled }
            })
            .collect();
        Self { items }
    }

    /// Non-empty categories in display order, items in registration order
    pub fn categories(&self) -> Vec<(MenuCategory, Vec<(MenuItemId, &MenuItem<Ctx>)>)> {
        MenuCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let entries: Vec<_> = self
                    .items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| item.category() == category)
                    .map(|(index, item)| (MenuItemId(index), item))
                    .collect();
                (!entries.is_empty()).then_some((category, entries))
            })
            .collect()
    }

    pub fn execute(&mut self, id: MenuItemId, ctx: &mut Ctx) -> ActionResult<()> {
        let item = self
            .items
            .get_mut(id.0)
            .ok_or(ActionError::UnknownItem(id.0))?;
        if !item.is_enabled() {
            return Err(ActionError::Disabled(item.name().to_string()));
        }
        item.action.execute(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Journal {
        executed: Vec<String>,
    }

    struct Recording {
        category: MenuCategory,
        name: &'static str,
        state: Option<CanExecuteState>,
    }

    impl Recording {
        fn boxed(category: MenuCategory, name: &'static str) -> Box<dyn UiAction<Journal>> {
            Box::new(Self {
                category,
                name,
                state: None,
            })
        }
    }

    impl UiAction<Journal> for Recording {
        fn category(&self) -> MenuCategory {
            self.category
        }

        fn name(&self) -> &str {
            self.name
        }

        fn can_execute(&self) -> bool {
            self.state.as_ref().is_none_or(CanExecuteState::get)
        }

        fn subscribe(&self, listener: CanExecuteListener) {
            if let Some(state) = &self.state {
                state.subscribe(listener);
            }
        }

        fn execute(&mut self, ctx: &mut Journal) -> ActionResult<()> {
            ctx.executed.push(self.name.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_categories_grouped_in_display_order() {
        let menu = Menu::new(vec![
            Recording::boxed(MenuCategory::Fractals, "Dragon"),
            Recording::boxed(MenuCategory::File, "Save"),
            Recording::boxed(MenuCategory::Fractals, "Koch"),
        ]);

        let layout: Vec<(MenuCategory, Vec<&str>)> = menu
            .categories()
            .into_iter()
            .map(|(category, items)| (category, items.iter().map(|(_, i)| i.name()).collect()))
            .collect();
        assert_eq!(
            layout,
            vec![
                (MenuCategory::File, vec!["Save"]),
                (MenuCategory::Fractals, vec!["Dragon", "Koch"]),
            ]
        );
    }

    #[test]
    fn test_execute_runs_action() {
        let mut menu = Menu::new(vec![Recording::boxed(MenuCategory::File, "Save")]);
        let id = menu.categories()[0].1[0].0;
        let mut journal = Journal::default();

        menu.execute(id, &mut journal).unwrap();
        assert_eq!(journal.executed, ["Save"]);
    }

    #[test]
    fn test_enabled_state_follows_subscription() {
        let state = CanExecuteState::new(false);
        let mut menu = Menu::new(vec![Box::new(Recording {
            category: MenuCategory::File,
            name: "Save",
            state: Some(state.clone()),
        }) as Box<dyn UiAction<Journal>>]);
        let id = menu.categories()[0].1[0].0;
        let mut journal = Journal::default();

        assert!(!menu.categories()[0].1[0].1.is_enabled());
        assert!(matches!(
            menu.execute(id, &mut journal),
            Err(ActionError::Disabled(name)) if name == "Save"
        ));

        state.set(true);
        assert!(menu.categories()[0].1[0].1.is_enabled());
        menu.execute(id, &mut journal).unwrap();
        assert_eq!(journal.executed, ["Save"]);
    }

    #[test]
    fn test_listeners_only_fire_on_change() {
        let state = CanExecuteState::new(true);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        state.subscribe(Box::new(move |_| counter.set(counter.get() + 1)));

        state.set(true);
        state.set(false);
        state.set(false);
        state.set(true);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_unknown_item() {
        let mut menu: Menu<Journal> = Menu::new(Vec::new());
        assert!(menu.categories().is_empty());
        assert!(matches!(
            menu.execute(MenuItemId(3), &mut Journal::default()),
            Err(ActionError::UnknownItem(3))
        ));
    }
}
