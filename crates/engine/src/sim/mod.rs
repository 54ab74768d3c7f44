mod actor;
mod component;
mod input;
mod math;
mod pawn;
mod world;

pub use actor::{
    Actor, ActorContext, ActorId, ActorKind, ActorSpec, Archetype, Attributes, BasicActor,
    Behavior, BoundablePawn, Pawn, UpdateStage, BASIC_STAGES, BOUNDABLE_PAWN_STAGES, PAWN_STAGES,
    RULED_PAWN_STAGES,
};
pub use component::{Component, ComponentTypeId, InputTrigger, MoveComponent};
pub use input::{InputAction, InputSnapshot, InputTracker};
pub use math::{Frame, Vec2};
pub use pawn::{Bounds, BoundsError, PawnBody};
pub use world::{ActorQuery, World, WorldId};
