//! In-memory view tree
//!
//! The reference rendering target: a vertical stack of message elements
//! with a scrollable viewport. Used by the CLI simulator and the stress
//! harnesses; doubles as the model other targets implement against.
//!
//! Virtualization is modeled by unmounting: an element leaves the tree
//! but keeps its layout slot, so remounting restores the same geometry.

use super::tree::{
    ChangeStream, ElementBounds, RevealPosition, ViewChange, ViewElement, ViewTree, Viewport,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 900.0;
const ELEMENT_GAP: f64 = 16.0;
/// Smooth scrolling is animated in fixed steps.
const SCROLL_STEPS: u32 = 4;
const SCROLL_STEP_DELAY_MS: u64 = 15;

#[derive(Debug, Clone)]
struct ElementSlot {
    top: f64,
    height: f64,
    background: Option<String>,
    mounted: bool,
}

#[derive(Debug)]
struct TreeState {
    slots: HashMap<String, ElementSlot>,
    next_top: f64,
    viewport: Viewport,
}

/// An in-memory scrollable view of message elements.
#[derive(Clone)]
pub struct MemoryViewTree {
    state: Arc<Mutex<TreeState>>,
    changes: broadcast::Sender<ViewChange>,
    watchable: bool,
}

impl MemoryViewTree {
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(64);
        Self {
            state: Arc::new(Mutex::new(TreeState {
                slots: HashMap::new(),
                next_top: 0.0,
                viewport: Viewport {
                    scroll_top: 0.0,
                    height: DEFAULT_VIEWPORT_HEIGHT,
                },
            })),
            changes,
            watchable: true,
        }
    }

    /// A tree without the change-notification capability; `watch` returns
    /// `None` and locators degrade to polling.
    pub fn without_watcher() -> Self {
        Self {
            watchable: false,
            ..Self::new()
        }
    }

    /// Mount an element. A new id is laid out below the existing stack; a
    /// previously unmounted id remounts into its original slot.
    pub fn insert_element(&self, element_id: impl Into<String>, height: f64) {
        let element_id = element_id.into();
        {
            let mut state = self.state.lock().expect("view tree lock");
            match state.slots.get_mut(&element_id) {
                Some(slot) => slot.mounted = true,
                None => {
                    let top = state.next_top;
                    state.next_top += height + ELEMENT_GAP;
                    state.slots.insert(
                        element_id.clone(),
                        ElementSlot {
                            top,
                            height,
                            background: None,
                            mounted: true,
                        },
                    );
                }
            }
        }
        let _ = self.changes.send(ViewChange::ElementsAdded(vec![element_id]));
    }

    /// Unmount an element, keeping its layout slot (virtualization).
    pub fn remove_element(&self, element_id: &str) {
        let removed = {
            let mut state = self.state.lock().expect("view tree lock");
            match state.slots.get_mut(element_id) {
                Some(slot) if slot.mounted => {
                    slot.mounted = false;
                    true
                }
                _ => false,
            }
        };
        if removed {
            let _ = self
                .changes
                .send(ViewChange::ElementsRemoved(vec![element_id.to_string()]));
        }
    }

    pub fn set_viewport_height(&self, height: f64) {
        let mut state = self.state.lock().expect("view tree lock");
        state.viewport.height = height;
    }

    /// Number of mounted elements.
    pub fn element_count(&self) -> usize {
        let state = self.state.lock().expect("view tree lock");
        state.slots.values().filter(|s| s.mounted).count()
    }
}

impl Default for MemoryViewTree {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ViewTree for MemoryViewTree {
    fn find(&self, element_id: &str) -> Option<Arc<dyn ViewElement>> {
        let state = self.state.lock().expect("view tree lock");
        let slot = state.slots.get(element_id)?;
        if !slot.mounted {
            return None;
        }
        Some(Arc::new(MemoryElement {
            element_id: element_id.to_string(),
            state: Arc::clone(&self.state),
        }))
    }

    fn watch(&self) -> Option<ChangeStream> {
        if self.watchable {
            Some(ChangeStream::new(self.changes.subscribe()))
        } else {
            None
        }
    }

    fn viewport(&self) -> Viewport {
        self.state.lock().expect("view tree lock").viewport
    }

    async fn scroll_to(&self, element_id: &str, position: RevealPosition) -> bool {
        let (start, target) = {
            let state = self.state.lock().expect("view tree lock");
            let slot = match state.slots.get(element_id) {
                Some(slot) if slot.mounted => slot,
                _ => return false,
            };
            let target = match position {
                RevealPosition::Start => slot.top,
                RevealPosition::Center => {
                    slot.top + slot.height / 2.0 - state.viewport.height / 2.0
                }
            };
            (state.viewport.scroll_top, target.max(0.0))
        };

        for step in 1..=SCROLL_STEPS {
            tokio::time::sleep(std::time::Duration::from_millis(SCROLL_STEP_DELAY_MS)).await;
            let progress = f64::from(step) / f64::from(SCROLL_STEPS);
            let mut state = self.state.lock().expect("view tree lock");
            state.viewport.scroll_top = start + (target - start) * progress;
        }
        true
    }
}

struct MemoryElement {
    element_id: String,
    state: Arc<Mutex<TreeState>>,
}

impl MemoryElement {
    fn with_slot<T>(&self, f: impl FnOnce(&ElementSlot) -> T) -> Option<T> {
        let state = self.state.lock().expect("view tree lock");
        state.slots.get(&self.element_id).map(f)
    }
}

impl ViewElement for MemoryElement {
    fn element_id(&self) -> String {
        self.element_id.clone()
    }

    fn bounds(&self) -> ElementBounds {
        self.with_slot(|slot| ElementBounds {
            top: slot.top,
            height: slot.height,
        })
        .unwrap_or(ElementBounds {
            top: 0.0,
            height: 0.0,
        })
    }

    fn background(&self) -> Option<String> {
        self.with_slot(|slot| slot.background.clone()).flatten()
    }

    fn set_background(&self, background: Option<String>) {
        let mut state = self.state.lock().expect("view tree lock");
        if let Some(slot) = state.slots.get_mut(&self.element_id) {
            slot.background = background;
        }
    }
}
