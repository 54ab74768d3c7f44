use engine::{
    Actor, ActorContext, ActorKind, ActorSpec, Archetype, Behavior, InputAction, Vec2,
    RULED_PAWN_STAGES,
};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

pub(crate) const PLAYER: ActorKind = ActorKind("player");
pub(crate) const DAMAGING: ActorKind = ActorKind("damaging");
pub(crate) const HEALING: ActorKind = ActorKind("healing");

pub(crate) const HP_ATTRIBUTE: &str = "hp";
pub(crate) const MAX_HP_ATTRIBUTE: &str = "max_hp";
pub(crate) const POINTS_ATTRIBUTE: &str = "points";

const SLOT1_SELF_DAMAGE: i32 = 10;
const SLOT2_SELF_DAMAGE: i32 = 20;
const CRITICAL_HIT_THRESHOLD: i32 = 20;
const CONTACT_DAMAGE: i32 = 20;
const CONTACT_DAMAGE_POINTS: i32 = 10;
const CONTACT_HEALING: i32 = 10;
const CONTACT_HEALING_POINTS: i32 = 5;
const DAMAGING_ROLL_RANGE: u32 = 6;
const HEALING_ROLL_RANGE: u32 = 10;
const WANDER_STEP: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlayerStatus {
    pub(crate) hp: i32,
    pub(crate) points: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HuntOutcome {
    Running,
    Won,
    Lost,
}

pub(crate) struct PlayerPawn;

impl Archetype for PlayerPawn {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(PLAYER, RULED_PAWN_STAGES).with_rules(PlayerRules)
    }
}

pub(crate) struct DamagingPawn {
    pub(crate) rng: ChaCha8Rng,
}

impl Archetype for DamagingPawn {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(DAMAGING, RULED_PAWN_STAGES)
            .with_rules(WanderRules::new(self.rng, DAMAGING_ROLL_RANGE))
    }
}

pub(crate) struct HealingPawn {
    pub(crate) rng: ChaCha8Rng,
}

impl Archetype for HealingPawn {
    fn into_spec(self) -> ActorSpec {
        ActorSpec::new(HEALING, RULED_PAWN_STAGES)
            .with_rules(WanderRules::new(self.rng, HEALING_ROLL_RANGE))
    }
}

/// Debug keys let the player hurt themselves: slot 1 for a light hit, slot 2
/// for a critical one.
struct PlayerRules;

impl Behavior for PlayerRules {
    fn tick(&mut self, ctx: &mut ActorContext<'_>) {
        let mut accrued = 0;
        if ctx.input().first_pressed(InputAction::Slot1) {
            accrued += SLOT1_SELF_DAMAGE;
        }
        if ctx.input().first_pressed(InputAction::Slot2) {
            accrued += SLOT2_SELF_DAMAGE;
        }
        if accrued == 0 {
            return;
        }
        if accrued >= CRITICAL_HIT_THRESHOLD {
            info!(damage = accrued, "player_critical_hit");
        }

        let hp = (ctx.attribute(HP_ATTRIBUTE).unwrap_or(0) - accrued).max(0);
        ctx.set_attribute(HP_ATTRIBUTE, hp);
        info!(hp, "player_hp_changed");
    }
}

/// Rolls uniformly in `0..roll_range` each tick. Rolls 0 to 3 step one cell
/// up, right, down or left; anything higher stays put.
struct WanderRules {
    rng: ChaCha8Rng,
    roll_range: u32,
}

impl WanderRules {
    fn new(rng: ChaCha8Rng, roll_range: u32) -> Self {
        Self { rng, roll_range }
    }

    fn next_step(&mut self) -> Vec2 {
        match self.rng.random_range(0..self.roll_range) {
            0 => Vec2::new(0.0, WANDER_STEP),
            1 => Vec2::new(WANDER_STEP, 0.0),
            2 => Vec2::new(0.0, -WANDER_STEP),
            3 => Vec2::new(-WANDER_STEP, 0.0),
            _ => Vec2::ZERO,
        }
    }
}

impl Behavior for WanderRules {
    fn tick(&mut self, ctx: &mut ActorContext<'_>) {
        let step = self.next_step();
        if !step.is_zero() {
            ctx.apply_movement(step);
        }
    }
}

pub(crate) fn init_player(player: &mut Actor, max_hp: i32) {
    player.set_attribute(HP_ATTRIBUTE, max_hp);
    player.set_attribute(MAX_HP_ATTRIBUTE, max_hp);
    player.set_attribute(POINTS_ATTRIBUTE, 0);
}

pub(crate) fn player_status(player: &Actor) -> PlayerStatus {
    PlayerStatus {
        hp: player.attribute(HP_ATTRIBUTE).unwrap_or(0),
        points: player.attribute(POINTS_ATTRIBUTE).unwrap_or(0),
    }
}

pub(crate) fn take_damage(player: &mut Actor) -> PlayerStatus {
    let status = player_status(player);
    let hp = (status.hp - CONTACT_DAMAGE).max(0);
    let points = status.points + CONTACT_DAMAGE_POINTS;
    player.set_attribute(HP_ATTRIBUTE, hp);
    player.set_attribute(POINTS_ATTRIBUTE, points);
    info!(hp, points, "player_damaged");
    PlayerStatus { hp, points }
}

pub(crate) fn take_healing(player: &mut Actor) -> PlayerStatus {
    let status = player_status(player);
    let max_hp = player.attribute(MAX_HP_ATTRIBUTE).unwrap_or(status.hp);
    let hp = (status.hp + CONTACT_HEALING).min(max_hp);
    let points = status.points + CONTACT_HEALING_POINTS;
    player.set_attribute(HP_ATTRIBUTE, hp);
    player.set_attribute(POINTS_ATTRIBUTE, points);
    info!(hp, points, "player_healed");
    PlayerStatus { hp, points }
}

pub(crate) fn outcome(status: PlayerStatus, win_points: i32) -> HuntOutcome {
    if status.hp < 1 {
        HuntOutcome::Lost
    } else if status.points >= win_points {
        HuntOutcome::Won
    } else {
        HuntOutcome::Running
    }
}
