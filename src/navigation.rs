/// Collapsible navbar state. Owned by the shell and reset on reload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavigationState {
    pub menu_is_active: bool,
}

impl NavigationState {
    /// Flips the menu when `explicit` is `None`, otherwise sets it.
    pub fn toggle_menu(&mut self, explicit: Option<bool>) {
        self.menu_is_active = explicit.unwrap_or(!self.menu_is_active);
    }

    pub fn burger_class(self) -> &'static str {
        if self.menu_is_active {
            "navbar-burger burger is-active"
        } else {
            "navbar-burger burger"
        }
    }

    pub fn menu_class(self) -> &'static str {
        if self.menu_is_active {
            "navbar-menu is-active"
        } else {
            "navbar-menu"
        }
    }

    pub fn aria_expanded(self) -> &'static str {
        if self.menu_is_active {
            "true"
        } else {
            "false"
        }
    }
}
