use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use super::actor::{Actor, ActorId, ActorIdAllocator, ActorKind, Archetype};
use super::input::InputSnapshot;

static NEXT_WORLD_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldId(pub u64);

impl WorldId {
    fn allocate() -> Self {
        Self(NEXT_WORLD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Which actors a location query should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorQuery {
    /// Any actor with a pawn body.
    Pawns,
    Kind(ActorKind),
}

impl From<ActorKind> for ActorQuery {
    fn from(kind: ActorKind) -> Self {
        Self::Kind(kind)
    }
}

impl ActorQuery {
    fn matches(&self, actor: &Actor) -> bool {
        match self {
            ActorQuery::Pawns => actor.pawn().is_some(),
            ActorQuery::Kind(kind) => actor.kind() == *kind,
        }
    }
}

/// Owns every actor it creates and ticks them in creation order.
/// Actors are never removed while the world lives.
#[derive(Debug)]
pub struct World {
    id: WorldId,
    allocator: ActorIdAllocator,
    actors: Vec<Actor>,
    tick_count: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            id: WorldId::allocate(),
            allocator: ActorIdAllocator::default(),
            actors: Vec::new(),
            tick_count: 0,
        }
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    pub fn create_actor<A: Archetype>(&mut self, archetype: A) -> &mut Actor {
        let id = self.allocator.allocate();
        let actor = Actor::new(id, self.id, archetype.into_spec());
        debug!(
            world = self.id.0,
            actor = id.0,
            kind = actor.kind().name(),
            "actor_created"
        );
        let index = self.actors.len();
        self.actors.push(actor);
        &mut self.actors[index]
    }

    pub fn tick(&mut self, input: &InputSnapshot) {
        let count = self.actors.len();
        for actor in &mut self.actors[..count] {
            actor.tick(input);
        }
        self.tick_count = self.tick_count.saturating_add(1);
        trace!(
            world = self.id.0,
            tick = self.tick_count,
            actor_count = count,
            "world_ticked"
        );
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn find_actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|actor| actor.id() == id)
    }

    pub fn find_actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|actor| actor.id() == id)
    }

    /// Actors matching `query` whose position is exactly `(x, y)`, in
    /// creation order. Actors without a pawn body have no position and never
    /// match.
    pub fn find_actors_at_location(
        &self,
        query: impl Into<ActorQuery>,
        x: f32,
        y: f32,
    ) -> Vec<&Actor> {
        let query = query.into();
        self.actors
            .iter()
            .filter(|actor| query.matches(actor))
            .filter(|actor| {
                actor
                    .frame()
                    .is_some_and(|frame| frame.pos.x == x && frame.pos.y == y)
            })
            .collect()
    }
}
