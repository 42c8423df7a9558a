use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::*;

/// Notifications published by [`Game`] to its listeners.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A cell changed status, `cell` is the snapshot after the change.
    CellChanged { row: Coord, col: Coord, cell: Cell },
    /// The game ended; only raised for losses.
    GameEnded { has_won: bool },
}

/// Handle returned by [`Game::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

type Listener = Box<dyn FnMut(&GameEvent)>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u32,
    entries: Vec<(ListenerId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn publish(&mut self, event: &GameEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}

/// Shared recorder of published events.
///
/// Clones share the same buffer, so one clone can be subscribed while another is inspected:
///
/// ```
/// use kaboom_core::*;
///
/// let layout = MineLayout::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
/// let mut game = Game::from_layout(layout);
/// let log = EventLog::default();
/// game.subscribe(log.listener());
///
/// game.select_space(0, 0);
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Rc<RefCell<Vec<GameEvent>>>,
}

impl EventLog {
    pub fn listener(&self) -> impl FnMut(&GameEvent) + 'static {
        let events = Rc::clone(&self.events);
        move |event| events.borrow_mut().push(*event)
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.borrow().clone()
    }

    /// Drains the recorded events.
    pub fn take(&self) -> Vec<GameEvent> {
        self.events.take()
    }
}
