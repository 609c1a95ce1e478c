//! The bingo widget instance
//!
//! Owns the one piece of mutable state (which card is showing) along with
//! everything needed to change or print it. Platform-free: the DOM side
//! lives in `web`, printing goes through a `CardPrinter`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::BingoOptions;
use crate::error::{Error, Result};
use crate::paths::PathResolver;
use crate::selector::pick_card;

/// Renders a card somewhere printable and starts printing it
pub trait CardPrinter {
    fn print_card(&self, image_url: &str) -> Result<()>;
}

/// Currently displayed card. Always one of the configured cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
    current: String,
}

impl CardState {
    pub fn current(&self) -> &str {
        &self.current
    }
}

/// A mounted bingo widget
pub struct BingoApp {
    options: BingoOptions,
    resolver: PathResolver,
    state: CardState,
    rng: Pcg32,
    printer: Box<dyn CardPrinter>,
    print_enabled: bool,
}

impl BingoApp {
    /// Create the widget and pick the first card
    pub fn new(
        options: BingoOptions,
        resolver: PathResolver,
        printer: Box<dyn CardPrinter>,
        seed: u64,
    ) -> Result<Self> {
        options.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = pick_card(&options.cards, None, &mut rng)
            .ok_or(Error::EmptyCardList)?
            .to_string();

        log::info!(
            "Bingo widget ready ({} cards, {} deployment), first card: {}",
            options.cards.len(),
            resolver.deployment().as_str(),
            current
        );

        Ok(Self {
            options,
            resolver,
            state: CardState { current },
            rng,
            printer,
            print_enabled: true,
        })
    }

    pub fn options(&self) -> &BingoOptions {
        &self.options
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn current_card(&self) -> &str {
        self.state.current()
    }

    /// Image URL of the card on display
    pub fn current_image_url(&self) -> String {
        self.resolver.image_url(self.state.current())
    }

    /// Switch to a different card.
    ///
    /// Returns the new image URL, or `None` when there was nothing else to
    /// switch to and the image on display stays as it is.
    pub fn refresh(&mut self) -> Option<String> {
        let current = Some(self.state.current.as_str());
        let card = pick_card(&self.options.cards, current, &mut self.rng)?;
        if card == self.state.current {
            return None;
        }
        self.state.current = card.to_string();
        log::debug!("Switched to card {}", self.state.current);
        Some(self.current_image_url())
    }

    /// False once printing has failed in a way retrying won't fix
    pub fn print_enabled(&self) -> bool {
        self.print_enabled
    }

    /// Print the card on display.
    ///
    /// A blocked popup disables printing for the rest of the page's life.
    pub fn print(&mut self) -> Result<()> {
        if !self.print_enabled {
            return Err(Error::PopupBlocked);
        }
        let url = self.current_image_url();
        match self.printer.print_card(&url) {
            Ok(()) => {
                log::info!("Printing {}", url);
                Ok(())
            }
            Err(Error::PopupBlocked) => {
                log::warn!("Print window blocked, disabling print");
                self.print_enabled = false;
                Err(Error::PopupBlocked)
            }
            Err(e) => {
                log::warn!("Print failed: {}", e);
                Err(e)
            }
        }
    }
}
