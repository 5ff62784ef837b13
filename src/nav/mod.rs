//! Deep-link navigation: locate, reveal, address-bar synchronization

mod address;
mod locator;
mod orchestrator;
mod reveal;

pub use address::{message_fragment, parse_message_fragment, AddressBar, MemoryAddressBar};
pub use locator::{ElementLocator, LocateError};
pub use orchestrator::{NavigateOptions, NavigationOutcome, Navigator};
pub use reveal::{reveal, RevealOptions, HIGHLIGHT_BACKGROUND};
