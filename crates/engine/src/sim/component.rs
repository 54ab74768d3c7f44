use std::any::Any;

use tracing::trace;

use super::actor::{ActorContext, ActorId};
use super::input::InputAction;
use super::math::Vec2;

/// Lookup key for a component type. Ids below [`ComponentTypeId::USER_BASE`]
/// belong to the engine; game code builds its ids with
/// [`ComponentTypeId::user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u32);

impl ComponentTypeId {
    pub const USER_BASE: u32 = 1000;
    pub const MOVE: ComponentTypeId = ComponentTypeId(1);

    pub const fn user(offset: u32) -> Self {
        Self(Self::USER_BASE + offset)
    }

    pub const fn is_engine_reserved(self) -> bool {
        self.0 < Self::USER_BASE
    }
}

/// A behavior unit owned by exactly one actor.
///
/// The owner calls [`Component::on_attach`] once when the component is added
/// and [`Component::tick`] once per world tick afterwards, in attachment
/// order and before any of the owner's own stages.
pub trait Component {
    fn component_type_id(&self) -> ComponentTypeId;

    fn on_attach(&mut self, _owner: ActorId) {}

    fn tick(&mut self, ctx: &mut ActorContext<'_>);

    fn debug_name(&self) -> &'static str {
        "component"
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputTrigger {
    #[default]
    FirstPressed,
    Held,
}

/// Queues one step of movement per frame from the four directional actions.
#[derive(Debug, Clone)]
pub struct MoveComponent {
    owner: Option<ActorId>,
    step: f32,
    trigger: InputTrigger,
}

impl Default for MoveComponent {
    fn default() -> Self {
        Self::new(1.0, InputTrigger::FirstPressed)
    }
}

impl MoveComponent {
    pub fn new(step: f32, trigger: InputTrigger) -> Self {
        Self {
            owner: None,
            step,
            trigger,
        }
    }

    pub fn owner(&self) -> Option<ActorId> {
        self.owner
    }

    fn triggered(&self, ctx: &ActorContext<'_>, action: InputAction) -> bool {
        match self.trigger {
            InputTrigger::FirstPressed => ctx.input().first_pressed(action),
            InputTrigger::Held => ctx.input().is_down(action),
        }
    }

    fn movement(&self, ctx: &ActorContext<'_>) -> Vec2 {
        let mut movement = Vec2::ZERO;
        if self.triggered(ctx, InputAction::MoveUp) {
            movement.y += self.step;
        }
        if self.triggered(ctx, InputAction::MoveDown) {
            movement.y -= self.step;
        }
        if self.triggered(ctx, InputAction::MoveRight) {
            movement.x += self.step;
        }
        if self.triggered(ctx, InputAction::MoveLeft) {
            movement.x -= self.step;
        }
        movement
    }
}

impl Component for MoveComponent {
    fn component_type_id(&self) -> ComponentTypeId {
        ComponentTypeId::MOVE
    }

    fn on_attach(&mut self, owner: ActorId) {
        self.owner = Some(owner);
    }

    fn tick(&mut self, ctx: &mut ActorContext<'_>) {
        let movement = self.movement(ctx);
        if movement.is_zero() {
            return;
        }
        if !ctx.apply_movement(movement) {
            trace!(actor = ctx.actor_id().0, "move_component_owner_cannot_move");
        }
    }

    fn debug_name(&self) -> &'static str {
        "move"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
