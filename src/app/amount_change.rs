use std::fmt;
use std::rc::{Rc, Weak};

use crate::app::element::{Amount, Container, Element, Label, Shared};
use crate::app::interactive_image::InteractiveImage;

const BOX_CLASS: &str = "amount-change-box text-center";
const BUTTON_CLASS: &str = "amount-change-img";
const LABEL_CLASS: &str = "short-label";
const INCREASE_LABEL: &str = "increase";
const DECREASE_LABEL: &str = "decrease";

/// An up arrow, the current amount and a down arrow, stacked. Used to pick how many of a resource
/// to trade or discard.
///
/// The widget knows nothing about limits. Whoever owns it decides which arrows are usable through
/// [`AmountChangeWidget::show`] and [`AmountChangeWidget::hide`], and is told about clicks through
/// the callbacks passed to [`AmountChangeWidget::new`].
pub struct AmountChangeWidget {
    inner: Rc<Inner>,
}

struct Inner {
    /// what is being counted, "wood", "wheat"...
    value: String,
    increase_action: Box<dyn Fn()>,
    decrease_action: Box<dyn Fn()>,
    increase_elem: Shared<InteractiveImage>,
    decrease_elem: Shared<InteractiveImage>,
    label_elem: Shared<Label>,
    view: Element,
}

struct Controls {
    view: Element,
    increase_elem: Shared<InteractiveImage>,
    label_elem: Shared<Label>,
    decrease_elem: Shared<InteractiveImage>,
}

impl fmt::Debug for AmountChangeWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmountChangeWidget")
            .field("value", &self.inner.value)
            .field("view", &self.inner.view)
            .finish_non_exhaustive()
    }
}

impl Inner {
    fn increase(&self) {
        tracing::trace!(value = self.value.as_str(), "increase");
        (self.increase_action)()
    }

    fn decrease(&self) {
        tracing::trace!(value = self.value.as_str(), "decrease");
        (self.decrease_action)()
    }
}

impl AmountChangeWidget {
    /// Builds the widget and its view. The view is not mounted anywhere, see
    /// [`AmountChangeWidget::view`].
    pub fn new(
        value: impl Into<String>,
        increase_action: impl Fn() + 'static,
        decrease_action: impl Fn() + 'static,
    ) -> Self {
        let inner = Rc::new_cyclic(|this| {
            let Controls {
                view,
                increase_elem,
                label_elem,
                decrease_elem,
            } = build_view(this);
            Inner {
                value: value.into(),
                increase_action: Box::new(increase_action),
                decrease_action: Box::new(decrease_action),
                increase_elem,
                decrease_elem,
                label_elem,
                view,
            }
        });
        Self { inner }
    }

    /// what the widget counts
    pub fn value(&self) -> &str {
        &self.inner.value
    }

    /// The root of the widget's view, for the owner to mount.
    pub fn view(&self) -> &Element {
        &self.inner.view
    }

    /// the up arrow
    pub fn increase_elem(&self) -> &Shared<InteractiveImage> {
        &self.inner.increase_elem
    }

    /// the down arrow
    pub fn decrease_elem(&self) -> &Shared<InteractiveImage> {
        &self.inner.decrease_elem
    }

    /// the label between the arrows
    pub fn label_elem(&self) -> &Shared<Label> {
        &self.inner.label_elem
    }

    /// Calls the increase callback.
    pub fn increase(&self) {
        self.inner.increase()
    }

    /// Calls the decrease callback.
    pub fn decrease(&self) {
        self.inner.decrease()
    }

    /// Enables the up arrow iff `show_up` and the down arrow iff `show_down`, then displays and
    /// stores `amount`.
    ///
    /// Without an `amount` the label's stored value is displayed again, which is empty if nothing
    /// was ever stored. Note that [`AmountChangeWidget::hide`] leaves the stored value alone, so
    /// this can bring back an amount that was hidden.
    pub fn show(&self, show_up: bool, show_down: bool, amount: Option<Amount>) {
        self.inner.increase_elem.borrow_mut().set_disabled(!show_up);
        self.inner.decrease_elem.borrow_mut().set_disabled(!show_down);

        let mut label = self.inner.label_elem.borrow_mut();
        let amount = match amount {
            Some(amount) => {
                label.set_value(amount.clone());
                amount
            }
            None => label.value().cloned().unwrap_or_default(),
        };
        tracing::trace!(
            value = self.inner.value.as_str(),
            show_up,
            show_down,
            amount = amount.as_str(),
            "show"
        );
        label.set_text(amount);
    }

    /// [`AmountChangeWidget::show`] with an amount that is always given.
    pub fn show_amount(&self, show_up: bool, show_down: bool, amount: impl Into<Amount>) {
        self.show(show_up, show_down, Some(amount.into()))
    }

    /// Disables both arrows and blanks the label. The stored value survives.
    pub fn hide(&self) {
        tracing::trace!(value = self.inner.value.as_str(), "hide");
        self.inner.increase_elem.borrow_mut().set_disabled(true);
        self.inner.decrease_elem.borrow_mut().set_disabled(true);
        self.inner.label_elem.borrow_mut().set_text("");
    }

    /// Displays and stores `amount` without touching the arrows.
    pub fn display_amount(&self, amount: impl Into<Amount>) {
        let amount = amount.into();
        tracing::trace!(
            value = self.inner.value.as_str(),
            amount = amount.as_str(),
            "display amount"
        );
        let mut label = self.inner.label_elem.borrow_mut();
        label.set_text(&amount);
        label.set_value(amount);
    }
}

fn build_view(this: &Weak<Inner>) -> Controls {
    let container = Container::create();
    container.borrow_mut().set_class(BOX_CLASS);

    let up = this.clone();
    let increase_elem = InteractiveImage::create(INCREASE_LABEL, BUTTON_CLASS, move || {
        if let Some(widget) = up.upgrade() {
            widget.increase()
        }
    });
    container.borrow_mut().append_child(increase_elem.clone());

    let label_elem = Label::create();
    {
        let mut label = label_elem.borrow_mut();
        label.set_text(0);
        label.set_class(LABEL_CLASS);
    }
    container.borrow_mut().append_child(label_elem.clone());

    let down = this.clone();
    let decrease_elem = InteractiveImage::create(DECREASE_LABEL, BUTTON_CLASS, move || {
        if let Some(widget) = down.upgrade() {
            widget.decrease()
        }
    });
    container.borrow_mut().append_child(decrease_elem.clone());

    Controls {
        view: Element::Container(container),
        increase_elem,
        label_elem,
        decrease_elem,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;

    fn counting_widget() -> (AmountChangeWidget, Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let ups = Rc::new(Cell::new(0));
        let downs = Rc::new(Cell::new(0));
        let widget = AmountChangeWidget::new(
            "wood",
            {
                let ups = ups.clone();
                move || ups.set(ups.get() + 1)
            },
            {
                let downs = downs.clone();
                move || downs.set(downs.get() + 1)
            },
        );
        (widget, ups, downs)
    }

    fn label_text(widget: &AmountChangeWidget) -> String {
        widget.label_elem().borrow().text().to_string()
    }

    fn enabled(widget: &AmountChangeWidget) -> (bool, bool) {
        (
            !widget.increase_elem().borrow().disabled(),
            !widget.decrease_elem().borrow().disabled(),
        )
    }

    #[test]
    fn view_is_increase_label_decrease() {
        let (widget, _, _) = counting_widget();
        let container = match widget.view() {
            Element::Container(container) => container,
            other => panic!("view is not a container: {:?}", other),
        };
        let container = container.borrow();
        assert_eq!(container.class(), "amount-change-box text-center");

        match container.children() {
            [Element::Button(up), Element::Label(label), Element::Button(down)] => {
                assert!(Rc::ptr_eq(up, widget.increase_elem()));
                assert!(Rc::ptr_eq(label, widget.label_elem()));
                assert!(Rc::ptr_eq(down, widget.decrease_elem()));
                assert_eq!(up.borrow().label(), "increase");
                assert_eq!(down.borrow().label(), "decrease");
                assert_eq!(up.borrow().class(), "amount-change-img");
                assert_eq!(label.borrow().class(), "short-label");
            }
            other => panic!("unexpected children {:?}", other),
        }
    }

    #[test]
    fn new_widget_shows_zero_with_nothing_stored() {
        let (widget, _, _) = counting_widget();
        assert_eq!(widget.value(), "wood");
        assert_eq!(label_text(&widget), "0");
        assert_eq!(widget.label_elem().borrow().value(), None);
    }

    #[test]
    fn increase_and_decrease_call_their_callback_once() {
        let (widget, ups, downs) = counting_widget();

        widget.increase();
        assert_eq!((ups.get(), downs.get()), (1, 0));
        widget.decrease();
        assert_eq!((ups.get(), downs.get()), (1, 1));
        widget.increase();
        widget.increase();
        assert_eq!((ups.get(), downs.get()), (3, 1));
    }

    #[test]
    fn buttons_go_through_the_widget() {
        let (widget, ups, downs) = counting_widget();

        assert!(InteractiveImage::activate(widget.increase_elem()));
        assert!(InteractiveImage::activate(widget.decrease_elem()));
        assert_eq!((ups.get(), downs.get()), (1, 1));

        widget.hide();
        assert!(!InteractiveImage::activate(widget.increase_elem()));
        assert!(!InteractiveImage::activate(widget.decrease_elem()));
        assert_eq!((ups.get(), downs.get()), (1, 1));
    }

    #[test]
    fn buttons_outliving_the_widget_do_nothing() {
        let (widget, ups, _) = counting_widget();
        let button = widget.increase_elem().clone();
        drop(widget);

        assert!(InteractiveImage::activate(&button));
        assert_eq!(ups.get(), 0);
    }

    #[test]
    fn show_sets_enablement_and_text() {
        let (widget, _, _) = counting_widget();
        for show_up in [true, false] {
            for show_down in [true, false] {
                widget.show_amount(show_up, show_down, 5);
                assert_eq!(enabled(&widget), (show_up, show_down));
                assert_eq!(label_text(&widget), "5");
            }
        }
    }

    #[test]
    fn show_without_amount_reuses_stored_value() {
        let (widget, _, _) = counting_widget();

        widget.display_amount(4);
        widget.show(true, false, None);
        assert_eq!(label_text(&widget), "4");

        widget.show_amount(false, true, 9);
        widget.display_amount(2);
        widget.show(true, true, None);
        assert_eq!(label_text(&widget), "2");
    }

    #[test]
    fn show_stores_its_amount() {
        let (widget, _, _) = counting_widget();

        widget.show(true, true, Some(Amount::from(5)));
        assert_eq!(
            widget.label_elem().borrow().value(),
            Some(&Amount::from(5))
        );
        widget.show(false, false, None);
        assert_eq!(enabled(&widget), (false, false));
        assert_eq!(label_text(&widget), "5");

        widget.display_amount(1);
        widget.show_amount(true, false, "6");
        widget.show(true, true, None);
        assert_eq!(label_text(&widget), "6");
    }

    #[test]
    fn show_without_anything_stored_is_blank() {
        let (widget, _, _) = counting_widget();
        widget.show(true, true, None);
        assert_eq!(label_text(&widget), "");
    }

    #[test]
    fn hide_disables_and_blanks() {
        let (widget, _, _) = counting_widget();
        widget.show(true, true, Some(Amount::from(1)));

        widget.hide();
        assert_eq!(enabled(&widget), (false, false));
        assert_eq!(label_text(&widget), "");

        widget.hide();
        assert_eq!(enabled(&widget), (false, false));
        assert_eq!(label_text(&widget), "");
    }

    #[test]
    fn display_amount_keeps_enablement() {
        let (widget, _, _) = counting_widget();
        widget.show(true, false, None);

        widget.display_amount("7");
        assert_eq!(label_text(&widget), "7");
        assert_eq!(
            widget.label_elem().borrow().value(),
            Some(&Amount::from(7))
        );
        assert_eq!(enabled(&widget), (true, false));

        widget.display_amount(8);
        assert_eq!(label_text(&widget), "8");
        assert_eq!(
            widget.label_elem().borrow().value(),
            Some(&Amount::from(8))
        );
    }

    #[test]
    fn hidden_amount_comes_back_on_show() {
        let (widget, _, _) = counting_widget();
        assert_eq!(label_text(&widget), "0");

        widget.show(true, false, Some(Amount::from(3)));
        assert_eq!(enabled(&widget), (true, false));
        assert_eq!(label_text(&widget), "3");

        widget.hide();
        assert_eq!(enabled(&widget), (false, false));
        assert_eq!(label_text(&widget), "");

        widget.show(true, true, None);
        assert_eq!(enabled(&widget), (true, true));
        assert_eq!(label_text(&widget), "3");
    }

    #[test]
    fn callback_may_update_the_widget() {
        let slot: Rc<RefCell<Option<AmountChangeWidget>>> = Rc::default();
        let count = Rc::new(Cell::new(0));
        let widget = AmountChangeWidget::new(
            "wheat",
            {
                let slot = Rc::downgrade(&slot);
                let count = count.clone();
                move || {
                    count.set(count.get() + 1);
                    if let Some(slot) = slot.upgrade() {
                        if let Some(widget) = slot.borrow().as_ref() {
                            widget.display_amount(count.get());
                            widget.show(count.get() < 2, true, None);
                        }
                    }
                }
            },
            || {},
        );
        *slot.borrow_mut() = Some(widget);

        let up = slot.borrow().as_ref().map(|w| w.increase_elem().clone());
        let up = up.expect("widget was just stored");
        assert!(InteractiveImage::activate(&up));
        assert!(InteractiveImage::activate(&up));
        assert!(!InteractiveImage::activate(&up));

        let slot = slot.borrow();
        let widget = slot.as_ref().expect("widget was just stored");
        assert_eq!(label_text(widget), "2");
        assert_eq!(enabled(widget), (false, true));
    }

    #[test]
    fn renders_headless() {
        let (widget, ups, _) = counting_widget();
        widget.show(true, false, Some(Amount::from(1)));

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                widget.view().ui(ui);
            });
        });
        assert_eq!(ups.get(), 0);
    }
}
