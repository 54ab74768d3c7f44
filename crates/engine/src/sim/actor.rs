use std::collections::HashMap;

use tracing::debug;

use super::component::{Component, ComponentTypeId};
use super::input::InputSnapshot;
use super::math::{Frame, Vec2};
use super::pawn::{Bounds, PawnBody};
use super::world::WorldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

#[derive(Debug, Default)]
pub(crate) struct ActorIdAllocator {
    next: u64,
}

impl ActorIdAllocator {
    pub(crate) fn allocate(&mut self) -> ActorId {
        let id = ActorId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Kind tag fixed at creation. Location queries and renderers branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorKind(pub &'static str);

impl ActorKind {
    pub const BASIC: ActorKind = ActorKind("basic");
    pub const PAWN: ActorKind = ActorKind("pawn");
    pub const BOUNDABLE_PAWN: ActorKind = ActorKind("boundable_pawn");

    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// One phase of an actor's per-tick update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateStage {
    /// Ticks attached components in attachment order.
    Components,
    /// Runs the actor's [`Behavior`], if any.
    Rules,
    /// Truncates queued movement to the pawn's bounds.
    Bounds,
    /// Turns queued movement into position and facing.
    Integrate,
}

pub const BASIC_STAGES: &[UpdateStage] = &[UpdateStage::Components];
pub const PAWN_STAGES: &[UpdateStage] = &[UpdateStage::Components, UpdateStage::Integrate];
pub const BOUNDABLE_PAWN_STAGES: &[UpdateStage] = &[
    UpdateStage::Components,
    UpdateStage::Bounds,
    UpdateStage::Integrate,
];
pub const RULED_PAWN_STAGES: &[UpdateStage] = &[
    UpdateStage::Components,
    UpdateStage::Rules,
    UpdateStage::Bounds,
    UpdateStage::Integrate,
];

/// Per-type logic that runs in the [`UpdateStage::Rules`] phase.
pub trait Behavior {
    fn tick(&mut self, ctx: &mut ActorContext<'_>);
}

pub struct ActorSpec {
    pub kind: ActorKind,
    pub stages: &'static [UpdateStage],
    pub rules: Option<Box<dyn Behavior>>,
}

impl ActorSpec {
    pub fn new(kind: ActorKind, stages: &'static [UpdateStage]) -> Self {
        Self {
            kind,
            stages,
            rules: None,
        }
    }

    pub fn with_rules(mut self, rules: impl Behavior + 'static) -> Self {
        self.rules = Some(Box::new(rules));
        self
    }
}

/// Something `World::create_actor` knows how to build.
pub trait Archetype {
    fn into_spec(self) -> ActorSpec;
}

impl Archetype for ActorSpec {
    fn into_spec(self) -> ActorSpec {
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BasicActor;

impl Archetype for BasicActor {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(ActorKind::BASIC, BASIC_STAGES)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Pawn;

impl Archetype for Pawn {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(ActorKind::PAWN, PAWN_STAGES)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoundablePawn;

impl Archetype for BoundablePawn {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(ActorKind::BOUNDABLE_PAWN, BOUNDABLE_PAWN_STAGES)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: HashMap<String, i32>,
}

impl Attributes {
    pub fn set(&mut self, name: &str, value: i32) {
        match self.values.get_mut(name) {
            Some(existing) => *existing = value,
            None => {
                self.values.insert(name.to_string(), value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The owner as seen from a component or behavior during a tick.
pub struct ActorContext<'a> {
    actor_id: ActorId,
    kind: ActorKind,
    input: &'a InputSnapshot,
    pawn: Option<&'a mut PawnBody>,
    attributes: &'a mut Attributes,
}

impl<'a> ActorContext<'a> {
    pub fn actor_id(&self) -> ActorId {
        self.actor_id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    pub fn input(&self) -> &InputSnapshot {
        self.input
    }

    pub fn pawn(&self) -> Option<&PawnBody> {
        self.pawn.as_deref()
    }

    pub fn pawn_mut(&mut self) -> Option<&mut PawnBody> {
        self.pawn.as_deref_mut()
    }

    /// Returns false when the owner has no pawn body.
    pub fn apply_movement(&mut self, delta: Vec2) -> bool {
        match self.pawn_mut() {
            Some(body) => {
                body.apply_movement(delta);
                true
            }
            None => false,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<i32> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: &str, value: i32) {
        self.attributes.set(name, value);
    }
}

pub struct Actor {
    id: ActorId,
    kind: ActorKind,
    world: WorldId,
    stages: &'static [UpdateStage],
    components: Vec<Box<dyn Component>>,
    rules: Option<Box<dyn Behavior>>,
    attributes: Attributes,
    body: Option<PawnBody>,
}

impl std::fmt::Debug for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actor")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("world", &self.world)
            .field("stages", &self.stages)
            .field("component_count", &self.components.len())
            .field("has_rules", &self.rules.is_some())
            .field("attributes", &self.attributes)
            .field("body", &self.body)
            .finish()
    }
}

impl Actor {
    pub(crate) fn new(id: ActorId, world: WorldId, spec: ActorSpec) -> Self {
        let has_body = spec.stages.contains(&UpdateStage::Integrate);
        Self {
            id,
            kind: spec.kind,
            world,
            stages: spec.stages,
            components: Vec::new(),
            rules: spec.rules,
            attributes: Attributes::default(),
            body: has_body.then(PawnBody::default),
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn kind(&self) -> ActorKind {
        self.kind
    }

    /// The world that created this actor.
    pub fn world(&self) -> WorldId {
        self.world
    }

    pub fn has_stage(&self, stage: UpdateStage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn add_component(&mut self, mut component: Box<dyn Component>) {
        component.on_attach(self.id);
        debug!(
            actor = self.id.0,
            component = component.debug_name(),
            type_id = component.component_type_id().0,
            "component_attached"
        );
        self.components.push(component);
    }

    pub fn component(&self, type_id: ComponentTypeId) -> Option<&dyn Component> {
        self.components
            .iter()
            .find(|component| component.component_type_id() == type_id)
            .map(|component| component.as_ref())
    }

    pub fn component_mut(&mut self, type_id: ComponentTypeId) -> Option<&mut dyn Component> {
        for component in self.components.iter_mut() {
            if component.component_type_id() == type_id {
                return Some(component.as_mut());
            }
        }
        None
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn set_attribute(&mut self, name: &str, value: i32) {
        self.attributes.set(name, value);
    }

    pub fn attribute(&self, name: &str) -> Option<i32> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn pawn(&self) -> Option<&PawnBody> {
        self.body.as_ref()
    }

    pub fn pawn_mut(&mut self) -> Option<&mut PawnBody> {
        self.body.as_mut()
    }

    /// Confines this actor's movement to `bounds`. Returns false, storing
    /// nothing, when the actor has no pawn body or no bounds stage to
    /// enforce them.
    pub fn set_bounds(&mut self, bounds: Bounds) -> bool {
        if !self.has_stage(UpdateStage::Bounds) {
            return false;
        }
        match self.body.as_mut() {
            Some(body) => {
                body.set_bounds(bounds);
                true
            }
            None => false,
        }
    }

    pub fn frame(&self) -> Option<Frame> {
        self.body.as_ref().map(PawnBody::frame)
    }

    /// Returns false when this actor has no pawn body.
    pub fn apply_movement(&mut self, delta: Vec2) -> bool {
        match self.body.as_mut() {
            Some(body) => {
                body.apply_movement(delta);
                true
            }
            None => false,
        }
    }

    pub(crate) fn tick(&mut self, input: &InputSnapshot) {
        for stage in self.stages {
            match stage {
                UpdateStage::Components => self.tick_components(input),
                UpdateStage::Rules => self.tick_rules(input),
                UpdateStage::Bounds => {
                    if let Some(body) = self.body.as_mut() {
                        body.clamp_to_bounds();
                    }
                }
                UpdateStage::Integrate => {
                    if let Some(body) = self.body.as_mut() {
                        body.integrate();
                    }
                }
            }
        }

        // Movement queued after integration is dropped, never carried over.
        if let Some(body) = self.body.as_mut() {
            body.reset_velocity();
        }
    }

    fn tick_components(&mut self, input: &InputSnapshot) {
        let Self {
            id,
            kind,
            components,
            attributes,
            body,
            ..
        } = self;
        for component in components.iter_mut() {
            let mut ctx = ActorContext {
                actor_id: *id,
                kind: *kind,
                input,
                pawn: body.as_mut(),
                attributes: &mut *attributes,
            };
            component.tick(&mut ctx);
        }
    }

    fn tick_rules(&mut self, input: &InputSnapshot) {
        let Self {
            id,
            kind,
            rules,
            attributes,
            body,
            ..
        } = self;
        let Some(rules) = rules.as_mut() else {
            return;
        };
        let mut ctx = ActorContext {
            actor_id: *id,
            kind: *kind,
            input,
            pawn: body.as_mut(),
            attributes,
        };
        rules.tick(&mut ctx);
    }
}
