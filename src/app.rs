use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

pub use amount_change::AmountChangeWidget;
pub use discard::{AmountChange, DiscardPanel, ResourceList, ResourceType};
pub use element::{Amount, Container, Element, Label, Shared};
pub use interactive_image::InteractiveImage;

mod amount_change;
mod discard;
mod element;
mod file_upload;
mod interactive_image;
mod parse_hand;

/// the hand offered when no file is loaded
const SAMPLE_HAND: ResourceList = ResourceList {
    brick: 2,
    ore: 1,
    sheep: 3,
    wheat: 1,
    wood: 2,
};

/// Lets a player pick which half of their hand to discard.
#[derive(Debug)]
pub struct DiscardApp {
    /// the cards in hand, once one is loaded
    hand: Option<ResourceList>,
    /// the dialog with one amount widget per resource
    panel: DiscardPanel,
    /// what was discarded last
    discarded: Option<ResourceList>,
    /// why the last file could not be used
    error: Option<String>,
    /// receive files asynchronously
    file_channel: (Sender<Vec<u8>>, Receiver<Vec<u8>>),
}

impl Default for DiscardApp {
    fn default() -> Self {
        Self {
            hand: None,
            panel: DiscardPanel::new(),
            discarded: None,
            error: None,
            file_channel: channel(),
        }
    }
}

impl DiscardApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        DiscardApp::default()
    }

    fn start(&mut self, hand: ResourceList) {
        self.panel.set_hand(&hand);
        self.hand = Some(hand);
        self.discarded = None;
        self.error = None;
    }
}

impl eframe::App for DiscardApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        match self.file_channel.1.try_recv() {
            Ok(bytes) => match parse_hand::from_json_slice(&bytes) {
                Ok(hand) => {
                    tracing::trace!(?hand, "parsed hand");
                    self.start(hand)
                }
                Err(err) => {
                    tracing::trace!(error = ?err, "failed to parse json");
                    self.error = Some(format!("Could not parse hand: {}", err));
                }
            },
            Err(TryRecvError::Empty) => { /* no file has been uploaded yet - no problem! */ }
            Err(TryRecvError::Disconnected) => {
                unreachable!("the app holds a sender for as long as it lives")
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Load hand").clicked() {
                    file_upload::open_upload_dialog(self.file_channel.0.clone())
                }
                if ui.button("Use sample hand").clicked() {
                    self.start(SAMPLE_HAND)
                }
            });
            if let Some(error) = &self.error {
                ui.colored_label(egui::Color32::RED, error.as_str());
            }
            ui.separator();

            match (self.hand, self.discarded) {
                (None, _) => {
                    ui.label("Load a hand to start discarding.");
                }
                (Some(hand), Some(discarded)) => {
                    let remaining = hand.saturating_sub(&discarded);
                    ui.label(format!("Discarded {} cards.", discarded.total()));
                    for resource in ResourceType::ALL {
                        ui.label(format!("{}: {}", resource, remaining.get(resource)));
                    }
                }
                (Some(_), None) => {
                    if let Some(discarded) = self.panel.ui(ui) {
                        self.discarded = Some(discarded);
                    }
                }
            }
        });
    }
}
