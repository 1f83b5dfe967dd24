//! Frame-stepped actor scheduler.
//!
//! Actors live in slots ordered by creation.  `step_all` runs every live actor
//! exactly once, oldest first.  The actor being stepped is taken out of its
//! slot for the duration of its step, so it never matches its own queries.
//!
//! Visibility rules:
//! * `spawn` queues the actor; it joins the slots (and the collision index)
//!   at the start of the next `step_all`.
//! * `kill` takes effect immediately: a killed actor is skipped by the rest
//!   of the current frame and never matches another query.  Its slot is
//!   reclaimed when the frame ends.

use crate::actor::{Actor, Frame, Step, World};
use crate::collision::CollisionIndex;
use crate::entities::{Aabb, ActorId, ActorRef, Category};

struct Slot {
    id: ActorId,
    category: Category,
    actor: Option<Actor>,
    killed: bool,
}

impl Slot {
    fn is_live(&self) -> bool {
        !self.killed && self.actor.is_some()
    }
}

pub struct Scheduler {
    slots: Vec<Slot>,
    pending: Vec<(ActorId, Actor)>,
    index: CollisionIndex,
    next_id: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Scheduler {
            slots: Vec::new(),
            pending: Vec::new(),
            index: CollisionIndex::new(),
            next_id: 0,
        }
    }

    /// Register an actor.  It is stepped and queryable from the next frame on.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.pending.push((id, actor));
        id
    }

    /// Mark an actor for removal.  Returns `false` if it was already dead or
    /// never existed.
    pub fn kill(&mut self, id: ActorId) -> bool {
        if let Some(i) = self.slot_of(id) {
            let slot = &mut self.slots[i];
            if slot.killed {
                return false;
            }
            slot.killed = true;
            tracing::debug!(%id, category = ?slot.category, "killed");
            return true;
        }
        if let Some(p) = self.pending.iter().position(|(pid, _)| *pid == id) {
            self.pending.remove(p);
            tracing::debug!(%id, "killed before first step");
            return true;
        }
        false
    }

    /// Kill every actor, pending ones included.  Returns how many died.
    pub fn kill_all(&mut self) -> usize {
        let mut count = self.pending.len();
        self.pending.clear();
        for slot in &mut self.slots {
            if !slot.killed {
                slot.killed = true;
                count += 1;
            }
        }
        self.sweep();
        count
    }

    /// Advance every live actor by one frame.
    pub fn step_all(&mut self, world: &mut World<'_>) {
        self.flush_spawns();

        for i in 0..self.slots.len() {
            if self.slots[i].killed {
                continue;
            }
            let Some(mut actor) = self.slots[i].actor.take() else {
                continue;
            };

            let step = actor.step(&mut Frame::new(self, world));

            let slot = &mut self.slots[i];
            match step {
                Step::Continue if !slot.killed => slot.actor = Some(actor),
                _ => slot.killed = true,
            }
        }

        self.sweep();
    }

    /// Oldest live actor of `category` whose box intersects `area`.
    pub fn find(&self, category: Category, area: &Aabb) -> Option<ActorRef> {
        self.find_any(&[category], area)
    }

    /// Oldest live actor in any of `categories` whose box intersects `area`.
    pub fn find_any(&self, categories: &[Category], area: &Aabb) -> Option<ActorRef> {
        self.index
            .first_match(categories, |i| {
                let slot = &self.slots[i];
                !slot.killed
                    && slot
                        .actor
                        .as_ref()
                        .is_some_and(|a| a.body.bounds().intersects(area))
            })
            .map(|i| ActorRef {
                id: self.slots[i].id,
                category: self.slots[i].category,
            })
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        match self.slot_of(id) {
            Some(i) if !self.slots[i].killed => self.slots[i].actor.as_ref(),
            Some(_) => None,
            None => self.pending.iter().find(|(pid, _)| *pid == id).map(|(_, a)| a),
        }
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        match self.slot_of(id) {
            Some(i) if !self.slots[i].killed => self.slots[i].actor.as_mut(),
            Some(_) => None,
            None => self
                .pending
                .iter_mut()
                .find(|(pid, _)| *pid == id)
                .map(|(_, a)| a),
        }
    }

    /// Every live actor in creation order, including ones spawned this frame.
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> + '_ {
        self.slots
            .iter()
            .filter(|s| !s.killed)
            .filter_map(|s| s.actor.as_ref().map(|a| (s.id, a)))
            .chain(self.pending.iter().map(|(id, a)| (*id, a)))
    }

    pub fn count(&self, category: Category) -> usize {
        self.count_where(|c| c == category)
    }

    pub fn count_where(&self, mut pred: impl FnMut(Category) -> bool) -> usize {
        self.iter().filter(|(_, a)| pred(a.body.category)).count()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    fn slot_of(&self, id: ActorId) -> Option<usize> {
        self.slots.binary_search_by_key(&id, |s| s.id).ok()
    }

    fn flush_spawns(&mut self) {
        for (id, actor) in self.pending.drain(..) {
            let category = actor.body.category;
            self.index.insert(category, self.slots.len());
            self.slots.push(Slot {
                id,
                category,
                actor: Some(actor),
                killed: false,
            });
        }
    }

    fn sweep(&mut self) {
        self.slots.retain(Slot::is_live);
        self.index.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            self.index.insert(slot.category, i);
        }
    }
}
