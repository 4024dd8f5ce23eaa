//! Menu toggle: checkbox and keyboard → `navOpen` / `navClose`.

/// Signal consumed by the navigation animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSignal {
    Open,
    Close,
}

impl NavSignal {
    pub fn for_checked(checked: bool) -> Self {
        if checked {
            Self::Open
        } else {
            Self::Close
        }
    }

    /// DOM event name.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Open => "navOpen",
            Self::Close => "navClose",
        }
    }
}

/// Keys that activate the toggle like a click.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " " | "Spacebar")
}

/// Mirrors the checkbox's checked state.
#[derive(Debug, Default, Clone)]
pub struct ToggleController {
    checked: bool,
}

impl ToggleController {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Checkbox `change`: one signal per flip.
    pub fn changed(&mut self, checked: bool) -> NavSignal {
        self.checked = checked;
        NavSignal::for_checked(checked)
    }

    /// Keyboard activation on the toggle flips it and signals like a click.
    /// Other keys and targets are ignored.
    pub fn key_up(&mut self, key: &str, on_toggle: bool) -> Option<NavSignal> {
        if !on_toggle || !is_activation_key(key) {
            return None;
        }
        Some(self.changed(!self.checked))
    }

    /// Re-announce the current state, e.g. once the menu has been built.
    pub fn sync(&self) -> NavSignal {
        NavSignal::for_checked(self.checked)
    }
}
