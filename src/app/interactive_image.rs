use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use egui::{Response, Ui};

use crate::app::element::Shared;

/// A button drawn as a small image (an arrow glyph) that runs an action when clicked.
pub struct InteractiveImage {
    label: String,
    class: String,
    disabled: bool,
    on_activate: Rc<dyn Fn()>,
}

impl fmt::Debug for InteractiveImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveImage")
            .field("label", &self.label)
            .field("class", &self.class)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl InteractiveImage {
    /// a new, enabled button
    pub fn create(
        label: &str,
        class: &str,
        on_activate: impl Fn() + 'static,
    ) -> Shared<InteractiveImage> {
        Rc::new(RefCell::new(InteractiveImage {
            label: label.to_string(),
            class: class.to_string(),
            disabled: false,
            on_activate: Rc::new(on_activate),
        }))
    }

    /// what the button does, "increase" or "decrease"
    pub fn label(&self) -> &str {
        &self.label
    }

    /// the class attribute
    pub fn class(&self) -> &str {
        &self.class
    }

    /// whether clicks are ignored
    pub fn disabled(&self) -> bool {
        self.disabled
    }

    /// ignore clicks iff `disabled`
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled
    }

    /// Runs the action once unless the button is disabled. Returns whether it ran.
    ///
    /// The button is not borrowed while the action runs.
    pub fn activate(this: &Shared<InteractiveImage>) -> bool {
        let action = {
            let button = this.borrow();
            if button.disabled {
                tracing::trace!(
                    label = button.label.as_str(),
                    "ignored activation of disabled button"
                );
                return false;
            }
            Rc::clone(&button.on_activate)
        };
        action();
        true
    }

    fn glyph(&self) -> &str {
        match self.label.as_str() {
            "increase" => "⏶",
            "decrease" => "⏷",
            other => other,
        }
    }

    pub(crate) fn ui(&self, ui: &mut Ui) -> Response {
        ui.add_enabled(!self.disabled, egui::Button::new(self.glyph()))
            .on_hover_text(self.label.as_str())
    }
}
