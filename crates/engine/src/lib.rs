//! Fixed-step actor simulation: a [`World`] owns actors, each actor runs an
//! ordered list of update stages per tick, and pawns integrate queued
//! movement into a position that location queries can match against.

pub mod sim;

pub use sim::{
    Actor, ActorContext, ActorId, ActorKind, ActorQuery, ActorSpec, Archetype, Attributes,
    BasicActor, Behavior, BoundablePawn, Bounds, BoundsError, Component, ComponentTypeId, Frame,
    InputAction, InputSnapshot, InputTracker, InputTrigger, MoveComponent, Pawn, PawnBody,
    UpdateStage, Vec2, World, WorldId, BASIC_STAGES, BOUNDABLE_PAWN_STAGES, PAWN_STAGES,
    RULED_PAWN_STAGES,
};
