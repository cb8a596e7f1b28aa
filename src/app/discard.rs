use std::collections::BTreeMap;
use std::fmt;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

use egui::{Response, Ui};
use tracing::{info, warn};

use crate::app::amount_change::AmountChangeWidget;

/// The five kinds of resource cards.
#[derive(
    serde::Deserialize, serde::Serialize, Ord, PartialOrd, Eq, PartialEq, Hash, Clone, Copy, Debug,
)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// brick
    Brick,
    /// ore
    Ore,
    /// sheep
    Sheep,
    /// wheat
    Wheat,
    /// wood
    Wood,
}

impl ResourceType {
    /// every resource, in display order
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Brick,
        ResourceType::Ore,
        ResourceType::Sheep,
        ResourceType::Wheat,
        ResourceType::Wood,
    ];

    /// lowercase name, as used in hand files
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Brick => "brick",
            ResourceType::Ore => "ore",
            ResourceType::Sheep => "sheep",
            ResourceType::Wheat => "wheat",
            ResourceType::Wood => "wood",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A count of cards per resource.
#[derive(serde::Deserialize, serde::Serialize, Default, Eq, PartialEq, Clone, Copy, Debug)]
#[serde(default, deny_unknown_fields)]
pub struct ResourceList {
    /// brick cards
    pub brick: u32,
    /// ore cards
    pub ore: u32,
    /// sheep cards
    pub sheep: u32,
    /// wheat cards
    pub wheat: u32,
    /// wood cards
    pub wood: u32,
}

impl ResourceList {
    /// cards of `resource`
    pub fn get(&self, resource: ResourceType) -> u32 {
        match resource {
            ResourceType::Brick => self.brick,
            ResourceType::Ore => self.ore,
            ResourceType::Sheep => self.sheep,
            ResourceType::Wheat => self.wheat,
            ResourceType::Wood => self.wood,
        }
    }

    /// sets the cards of `resource` to `count`
    pub fn set(&mut self, resource: ResourceType, count: u32) {
        match resource {
            ResourceType::Brick => self.brick = count,
            ResourceType::Ore => self.ore = count,
            ResourceType::Sheep => self.sheep = count,
            ResourceType::Wheat => self.wheat = count,
            ResourceType::Wood => self.wood = count,
        }
    }

    /// number of cards of every kind together
    pub fn total(&self) -> u32 {
        ResourceType::ALL.iter().map(|r| self.get(*r)).sum()
    }

    /// `self` minus `other`, never going below zero
    pub fn saturating_sub(&self, other: &ResourceList) -> ResourceList {
        let mut remaining = ResourceList::default();
        for resource in ResourceType::ALL {
            remaining.set(
                resource,
                self.get(resource).saturating_sub(other.get(resource)),
            );
        }
        remaining
    }
}

/// What an arrow click asks the panel to do.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub enum AmountChange {
    /// discard one more
    Increase(ResourceType),
    /// discard one less
    Decrease(ResourceType),
}

#[derive(Debug)]
struct DiscardRow {
    widget: AmountChangeWidget,
    /// cards of this resource in hand
    max: u32,
    /// cards of this resource picked for discarding
    amount: u32,
}

/// The "discard half your hand" dialog. Owns one [`AmountChangeWidget`] per resource and decides
/// which arrows are usable.
#[derive(Debug)]
pub struct DiscardPanel {
    rows: BTreeMap<ResourceType, DiscardRow>,
    /// how many cards have to go
    required: u32,
    /// how many cards are picked so far
    discarded: u32,
    /// arrow clicks, queued by the widgets' callbacks
    changes: (Sender<AmountChange>, Receiver<AmountChange>),
}

impl Default for DiscardPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscardPanel {
    /// a closed dialog, every widget hidden
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        let rows = ResourceType::ALL
            .into_iter()
            .map(|resource| {
                let widget = AmountChangeWidget::new(
                    resource.name(),
                    send_change(&sender, AmountChange::Increase(resource)),
                    send_change(&sender, AmountChange::Decrease(resource)),
                );
                widget.hide();
                let row = DiscardRow {
                    widget,
                    max: 0,
                    amount: 0,
                };
                (resource, row)
            })
            .collect();
        Self {
            rows,
            required: 0,
            discarded: 0,
            changes: (sender, receiver),
        }
    }

    /// Starts discarding from `hand`: nothing picked, half the hand (rounded down) to pick.
    pub fn set_hand(&mut self, hand: &ResourceList) {
        for (resource, row) in self.rows.iter_mut() {
            let count = hand.get(*resource);
            row.max = count;
            row.amount = 0;
            row.widget.display_amount(0);
            row.widget.show(count > 0, false, None);
        }
        self.required = hand.total() / 2;
        self.discarded = 0;
        info!(required = self.required, "discarding started");
    }

    /// Picks one more card of `resource`, if there is one left in hand.
    pub fn increase_amount(&mut self, resource: ResourceType) {
        let row = match self.rows.get_mut(&resource) {
            Some(row) => row,
            None => return,
        };
        if row.amount < row.max {
            row.amount += 1;
            self.discarded += 1;
            row.widget.display_amount(row.amount);
        } else {
            warn!(%resource, max = row.max, "no more cards to pick");
        }
        self.amount_changed(resource);
    }

    /// Puts one card of `resource` back, if any was picked.
    pub fn decrease_amount(&mut self, resource: ResourceType) {
        let row = match self.rows.get_mut(&resource) {
            Some(row) => row,
            None => return,
        };
        if row.amount > 0 {
            row.amount -= 1;
            self.discarded -= 1;
            row.widget.display_amount(row.amount);
        } else {
            warn!(%resource, "no picked cards to put back");
        }
        self.amount_changed(resource);
    }

    fn amount_changed(&self, resource: ResourceType) {
        if let Some(row) = self.rows.get(&resource) {
            row.widget.show(row.amount < row.max, row.amount > 0, None);
        }
        info!(
            %resource,
            discarded = self.discarded,
            required = self.required,
            "amount changed"
        );
    }

    /// Applies every arrow click queued since the last call, oldest first.
    pub fn process_pending(&mut self) {
        loop {
            match self.changes.1.try_recv() {
                Ok(AmountChange::Increase(resource)) => self.increase_amount(resource),
                Ok(AmountChange::Decrease(resource)) => self.decrease_amount(resource),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    unreachable!("the panel holds a sender for as long as it lives")
                }
            }
        }
    }

    /// "picked/required"
    pub fn state_message(&self) -> String {
        format!("{}/{}", self.discarded, self.required)
    }

    /// whether exactly the required number of cards is picked
    pub fn can_discard(&self) -> bool {
        self.discarded == self.required
    }

    /// the cards picked so far
    pub fn selection(&self) -> ResourceList {
        let mut list = ResourceList::default();
        for (resource, row) in &self.rows {
            list.set(*resource, row.amount);
        }
        list
    }

    /// Returns the picked cards and closes the dialog, or `None` if the wrong number is picked.
    pub fn discard(&mut self) -> Option<ResourceList> {
        if !self.can_discard() {
            warn!(
                discarded = self.discarded,
                required = self.required,
                "cannot discard yet"
            );
            return None;
        }
        let list = self.selection();
        self.hide();
        info!(?list, "discarded");
        Some(list)
    }

    /// Disables every widget.
    pub fn hide(&self) {
        for row in self.rows.values() {
            row.widget.hide();
        }
    }

    /// the widget for `resource`
    pub fn widget(&self, resource: ResourceType) -> Option<&AmountChangeWidget> {
        self.rows.get(&resource).map(|row| &row.widget)
    }

    /// Draws the dialog. Returns the discarded cards once the discard button is pressed.
    pub fn ui(&mut self, ui: &mut Ui) -> Option<ResourceList> {
        ui.heading("Discard half of your cards");
        ui.horizontal(|ui| {
            for (resource, row) in &self.rows {
                discard_row_ui(ui, *resource, row);
            }
        });
        ui.label(self.state_message());

        let discard_clicked = ui
            .add_enabled(self.can_discard(), egui::Button::new("Discard"))
            .clicked();
        self.process_pending();
        if discard_clicked {
            self.discard()
        } else {
            None
        }
    }
}

fn discard_row_ui(ui: &mut Ui, resource: ResourceType, row: &DiscardRow) -> Response {
    ui.vertical(|ui| {
        ui.label(resource.name());
        row.widget.view().ui(ui);
        ui.weak(format!("of {}", row.max));
    })
    .response
}

fn send_change(sender: &Sender<AmountChange>, change: AmountChange) -> impl Fn() + 'static {
    let sender = sender.clone();
    move || {
        if let Err(err) = sender.send(change) {
            warn!(?err, "discard panel is gone");
        }
    }
}
