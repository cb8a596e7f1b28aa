use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use egui::{Response, Ui};

use crate::app::interactive_image::InteractiveImage;

/// A reference to a node in the view tree.
pub type Shared<T> = Rc<RefCell<T>>;

/// class that makes a container stack its children vertically and centered
const TEXT_CENTER_CLASS: &str = "text-center";

/// A number (or any text) shown in a [`Label`].
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Amount(String);

impl Amount {
    /// the amount as it is displayed
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount(value)
    }
}

macro_rules! amount_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Amount {
                fn from(value: $ty) -> Self {
                    Amount(value.to_string())
                }
            }
        )*
    };
}

amount_from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64);

/// A node of the view tree. Cloning copies the reference, not the node.
#[derive(Clone, Debug)]
pub enum Element {
    /// groups other elements
    Container(Shared<Container>),
    /// displays text
    Label(Shared<Label>),
    /// a clickable button
    Button(Shared<InteractiveImage>),
}

/// A generic node holding children in insertion order.
#[derive(Default, Debug)]
pub struct Container {
    class: String,
    children: Vec<Element>,
}

impl Container {
    /// a new empty container with no class
    pub fn create() -> Shared<Self> {
        Rc::new(RefCell::new(Container::default()))
    }

    /// the class attribute, space separated
    pub fn class(&self) -> &str {
        &self.class
    }

    /// replaces the class attribute
    pub fn set_class(&mut self, class: &str) {
        self.class = class.to_string();
    }

    /// appends `child` after every existing child
    pub fn append_child(&mut self, child: impl Into<Element>) {
        self.children.push(child.into())
    }

    /// the children, in the order they were appended
    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// A text node. The visible text and the stored value are independent.
#[derive(Default, Debug)]
pub struct Label {
    class: String,
    text: String,
    value: Option<Amount>,
}

impl Label {
    /// a new label with empty text and nothing stored
    pub fn create() -> Shared<Self> {
        Rc::new(RefCell::new(Label::default()))
    }

    /// the class attribute, space separated
    pub fn class(&self) -> &str {
        &self.class
    }

    /// replaces the class attribute
    pub fn set_class(&mut self, class: &str) {
        self.class = class.to_string();
    }

    /// the visible text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// replaces the visible text, the stored value is left alone
    pub fn set_text(&mut self, text: impl fmt::Display) {
        self.text = text.to_string();
    }

    /// the stored value, `None` if it was never written
    pub fn value(&self) -> Option<&Amount> {
        self.value.as_ref()
    }

    /// stores `value` without showing it
    pub fn set_value(&mut self, value: Amount) {
        self.value = Some(value);
    }
}

impl From<Shared<Container>> for Element {
    fn from(container: Shared<Container>) -> Self {
        Element::Container(container)
    }
}

impl From<Shared<Label>> for Element {
    fn from(label: Shared<Label>) -> Self {
        Element::Label(label)
    }
}

impl From<Shared<InteractiveImage>> for Element {
    fn from(button: Shared<InteractiveImage>) -> Self {
        Element::Button(button)
    }
}

impl Element {
    /// Draws the element and its children.
    ///
    /// Buttons are activated only after their node is no longer borrowed, so an activation is
    /// free to call back into whatever owns the tree.
    pub fn ui(&self, ui: &mut Ui) -> Response {
        match self {
            Element::Container(container) => container_ui(&container.borrow(), ui),
            Element::Label(label) => ui.label(label.borrow().text()),
            Element::Button(button) => {
                let response = button.borrow().ui(ui);
                if response.clicked() {
                    InteractiveImage::activate(button);
                }
                response
            }
        }
    }
}

fn container_ui(container: &Container, ui: &mut Ui) -> Response {
    let add_children = |ui: &mut Ui| {
        for child in container.children() {
            child.ui(ui);
        }
    };
    if container.class().split_whitespace().any(|c| c == TEXT_CENTER_CLASS) {
        ui.vertical_centered(add_children).response
    } else {
        ui.horizontal(add_children).response
    }
}
