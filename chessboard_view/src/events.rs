use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Dimension;

/// The named game controls shown next to the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlAction {
    Start,
    Restart,
    Forfeit,
    Undo,
    Redo,
}

impl ControlAction {
    pub const ALL: [ControlAction; 5] = [
        ControlAction::Start,
        ControlAction::Restart,
        ControlAction::Forfeit,
        ControlAction::Undo,
        ControlAction::Redo,
    ];

    /// The button caption.
    pub fn label(self) -> &'static str {
        match self {
            ControlAction::Start => "Start",
            ControlAction::Restart => "Restart",
            ControlAction::Forfeit => "Forfeit",
            ControlAction::Undo => "Undo",
            ControlAction::Redo => "Redo",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Pressed,
    Released,
}

/// A pointer interaction on one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PointerEvent {
    pub rank: usize,
    pub file: usize,
    pub kind: PointerKind,
}

pub type ControlHandler = Box<dyn FnMut(ControlAction)>;
pub type PointerHandler = Box<dyn FnMut(PointerEvent)>;

/// What became of an attempt to register a handler.
///
/// Registration never fails loudly. The caller decides whether a handler
/// that could not be attached is worth reporting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Registration {
    Registered,
    /// The control is not part of this view.
    TargetNotFound,
    OutOfRange { rank: usize, file: usize },
}

impl Registration {
    pub fn is_registered(self) -> bool {
        self == Registration::Registered
    }
}

struct ControlSlot {
    action: ControlAction,
    handlers: Vec<ControlHandler>,
}

/// The registration points for controls and cells, and the dispatch of
/// events to whatever was registered there.
///
/// Registering several handlers on the same slot chains them; they run in
/// registration order.
pub struct EventWiring {
    dimension: Dimension,
    controls: Vec<ControlSlot>,
    // One entry per cell, row-major.
    cells: Vec<Vec<PointerHandler>>,
}

impl EventWiring {
    pub fn new(dimension: Dimension, controls: &[ControlAction]) -> Self {
        let mut slots: Vec<ControlSlot> = Vec::with_capacity(controls.len());
        for &action in controls {
            if !slots.iter().any(|slot| slot.action == action) {
                slots.push(ControlSlot {
                    action,
                    handlers: Vec::new(),
                });
            }
        }
        Self {
            dimension,
            controls: slots,
            cells: (0..dimension.area()).map(|_| Vec::new()).collect(),
        }
    }

    /// The controls that exist, in display order.
    pub fn controls(&self) -> impl Iterator<Item = ControlAction> + '_ {
        self.controls.iter().map(|slot| slot.action)
    }

    pub fn add_control_listener(
        &mut self,
        action: ControlAction,
        handler: ControlHandler,
    ) -> Registration {
        match self.controls.iter_mut().find(|slot| slot.action == action) {
            Some(slot) => {
                slot.handlers.push(handler);
                debug!(?action, handlers = slot.handlers.len(), "Registered control listener");
                Registration::Registered
            }
            None => {
                warn!(?action, "No such control, listener ignored");
                Registration::TargetNotFound
            }
        }
    }

    pub fn add_cell_listener(
        &mut self,
        rank: usize,
        file: usize,
        handler: PointerHandler,
    ) -> Registration {
        match self.cell_index(rank, file) {
            Some(idx) => {
                self.cells[idx].push(handler);
                Registration::Registered
            }
            None => {
                warn!(rank, file, "Cell out of range, listener ignored");
                Registration::OutOfRange { rank, file }
            }
        }
    }

    /// Runs every handler registered on `action`, returning how many ran.
    pub fn trigger(&mut self, action: ControlAction) -> usize {
        let Some(slot) = self.controls.iter_mut().find(|slot| slot.action == action) else {
            return 0;
        };
        for handler in slot.handlers.iter_mut() {
            handler(action);
        }
        slot.handlers.len()
    }

    /// Runs every handler registered on the event's cell, returning how
    /// many ran. Events outside the board are dropped.
    pub fn dispatch_pointer(&mut self, event: PointerEvent) -> usize {
        let Some(idx) = self.cell_index(event.rank, event.file) else {
            return 0;
        };
        let handlers = &mut self.cells[idx];
        for handler in handlers.iter_mut() {
            handler(event);
        }
        handlers.len()
    }

    fn cell_index(&self, rank: usize, file: usize) -> Option<usize> {
        self.dimension
            .contains(rank, file)
            .then(|| rank * self.dimension.width() + file)
    }
}

impl std::fmt::Debug for EventWiring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventWiring")
            .field("dimension", &self.dimension)
            .field("controls", &self.controls().collect::<Vec<_>>())
            .field(
                "cell_listeners",
                &self.cells.iter().map(Vec::len).sum::<usize>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn handlers_chain() {
        let mut wiring = EventWiring::new(Dimension::SQUARE, &ControlAction::ALL);
        let log = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            let outcome = wiring.add_control_listener(
                ControlAction::Undo,
                Box::new(move |action| log.borrow_mut().push((tag, action))),
            );
            assert_eq!(outcome, Registration::Registered);
        }
        assert_eq!(wiring.trigger(ControlAction::Undo), 2);
        assert_eq!(wiring.trigger(ControlAction::Redo), 0);
        assert_eq!(
            *log.borrow(),
            [("first", ControlAction::Undo), ("second", ControlAction::Undo)]
        );
    }

    #[test]
    fn missing_control() {
        let mut wiring = EventWiring::new(Dimension::SQUARE, &[ControlAction::Start]);
        let outcome = wiring.add_control_listener(ControlAction::Forfeit, Box::new(|_| {}));
        assert_eq!(outcome, Registration::TargetNotFound);
        assert_eq!(wiring.trigger(ControlAction::Forfeit), 0);
    }

    #[test]
    fn duplicate_controls_get_one_slot() {
        let wiring = EventWiring::new(
            Dimension::SQUARE,
            &[ControlAction::Undo, ControlAction::Redo, ControlAction::Undo],
        );
        assert_eq!(
            wiring.controls().collect::<Vec<_>>(),
            [ControlAction::Undo, ControlAction::Redo]
        );
    }

    #[test]
    fn cell_listeners() {
        let mut wiring = EventWiring::new(Dimension::SQUARE, &[]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        assert!(wiring
            .add_cell_listener(1, 0, Box::new(move |ev| sink.borrow_mut().push(ev)))
            .is_registered());
        assert_eq!(
            wiring.add_cell_listener(8, 0, Box::new(|_| {})),
            Registration::OutOfRange { rank: 8, file: 0 }
        );

        let press = PointerEvent {
            rank: 1,
            file: 0,
            kind: PointerKind::Pressed,
        };
        assert_eq!(wiring.dispatch_pointer(press), 1);
        assert_eq!(
            wiring.dispatch_pointer(PointerEvent { rank: 0, file: 0, ..press }),
            0
        );
        assert_eq!(
            wiring.dispatch_pointer(PointerEvent { rank: 9, file: 9, ..press }),
            0
        );
        assert_eq!(*seen.borrow(), [press]);
    }
}
