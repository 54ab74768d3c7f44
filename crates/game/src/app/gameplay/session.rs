use engine::{ActorId, BoundsError, InputSnapshot, MoveComponent, Vec2, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use super::pawns::{
    init_player, outcome, player_status, take_damage, take_healing, DamagingPawn, HealingPawn,
    HuntOutcome, PlayerPawn, PlayerStatus, DAMAGING, HEALING,
};
use crate::app::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepReport {
    pub(crate) ticked: bool,
    pub(crate) damage_hits: usize,
    pub(crate) healing_hits: usize,
    pub(crate) status: PlayerStatus,
    pub(crate) outcome: HuntOutcome,
}

/// One game of Actor Hunt: the world, the player handle, and the win rule.
pub(crate) struct HuntSession {
    world: World,
    player_id: ActorId,
    width: u32,
    height: u32,
    win_points: i32,
    seed: u64,
    outcome: HuntOutcome,
}

impl HuntSession {
    pub(crate) fn new(config: &GameConfig) -> Result<Self, BoundsError> {
        let bounds = config.bounds()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut world = World::new();

        // Spawn positions are queued as movement and land on the first tick.
        for _ in 0..config.healing_count {
            let spawn = random_cell(&mut rng, config.world_width, config.world_height);
            let pawn_rng = ChaCha8Rng::seed_from_u64(rng.random());
            let healer = world.create_actor(HealingPawn { rng: pawn_rng });
            healer.set_bounds(bounds);
            healer.apply_movement(spawn);
        }
        for _ in 0..config.damaging_count {
            let spawn = random_cell(&mut rng, config.world_width, config.world_height);
            let pawn_rng = ChaCha8Rng::seed_from_u64(rng.random());
            let hazard = world.create_actor(DamagingPawn { rng: pawn_rng });
            hazard.set_bounds(bounds);
            hazard.apply_movement(spawn);
        }

        let player = world.create_actor(PlayerPawn);
        player.add_component(Box::new(MoveComponent::default()));
        init_player(player, config.max_hp);
        player.set_bounds(bounds);
        player.apply_movement(config.player_spawn());
        let player_id = player.id();

        info!(
            seed,
            width = config.world_width,
            height = config.world_height,
            actor_count = world.actor_count(),
            "hunt_session_created"
        );

        Ok(Self {
            world,
            player_id,
            width: config.world_width,
            height: config.world_height,
            win_points: config.win_points,
            seed,
            outcome: HuntOutcome::Running,
        })
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub(crate) fn seed(&self) -> u64 {
        self.seed
    }

    pub(crate) fn outcome(&self) -> HuntOutcome {
        self.outcome
    }

    pub(crate) fn player_status(&self) -> PlayerStatus {
        self.world
            .find_actor(self.player_id)
            .map(player_status)
            .unwrap_or(PlayerStatus { hp: 0, points: 0 })
    }

    /// Advances the game by one frame. The world only ticks when some key was
    /// pressed this frame and the game is still running.
    pub(crate) fn step(&mut self, input: &InputSnapshot) -> StepReport {
        if self.outcome != HuntOutcome::Running || !input.any_first_pressed() {
            return self.report(false, 0, 0);
        }

        self.world.tick(input);

        let Some(pos) = self
            .world
            .find_actor(self.player_id)
            .and_then(|player| player.frame())
            .map(|frame| frame.pos)
        else {
            return self.report(true, 0, 0);
        };
        let damage_hits = self
            .world
            .find_actors_at_location(DAMAGING, pos.x, pos.y)
            .len();
        let healing_hits = self
            .world
            .find_actors_at_location(HEALING, pos.x, pos.y)
            .len();

        if let Some(player) = self.world.find_actor_mut(self.player_id) {
            for _ in 0..damage_hits {
                take_damage(player);
            }
            for _ in 0..healing_hits {
                take_healing(player);
            }
        }

        let next = outcome(self.player_status(), self.win_points);
        if next != self.outcome {
            let status = self.player_status();
            info!(outcome = ?next, hp = status.hp, points = status.points, "hunt_finished");
            self.outcome = next;
        }
        self.report(true, damage_hits, healing_hits)
    }

    fn report(&self, ticked: bool, damage_hits: usize, healing_hits: usize) -> StepReport {
        StepReport {
            ticked,
            damage_hits,
            healing_hits,
            status: self.player_status(),
            outcome: self.outcome,
        }
    }
}

fn random_cell(rng: &mut ChaCha8Rng, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        rng.random_range(0..width) as f32,
        rng.random_range(0..height) as f32,
    )
}

#[cfg(test)]
mod tests {
    use engine::{ActorKind, ActorSpec, InputAction, BOUNDABLE_PAWN_STAGES};

    use super::*;

    fn empty_board(max_hp: i32, win_points: i32) -> GameConfig {
        GameConfig {
            world_width: 6,
            world_height: 6,
            damaging_count: 0,
            healing_count: 0,
            max_hp,
            win_points,
            seed: Some(42),
            player_spawn: Some(Vec2::new(2.0, 2.0)),
        }
    }

    fn place_stationary(session: &mut HuntSession, kind: ActorKind, at: Vec2) {
        let actor = session
            .world_mut()
            .create_actor(ActorSpec::new(kind, BOUNDABLE_PAWN_STAGES));
        actor.apply_movement(at);
    }

    fn press(action: InputAction) -> InputSnapshot {
        InputSnapshot::empty().with_first_pressed(action, true)
    }

    #[test]
    fn no_tick_without_a_fresh_key_press() {
        let mut session = HuntSession::new(&empty_board(100, 100)).expect("session");
        let held = InputSnapshot::empty().with_action_down(InputAction::MoveUp, true);

        let report = session.step(&held);

        assert!(!report.ticked);
        assert_eq!(session.world().tick_count(), 0);
    }

    #[test]
    fn stepping_onto_hazard_damages_player() {
        let mut session = HuntSession::new(&empty_board(100, 100)).expect("session");
        place_stationary(&mut session, DAMAGING, Vec2::new(3.0, 2.0));

        let report = session.step(&press(InputAction::MoveRight));

        assert!(report.ticked);
        assert_eq!(report.damage_hits, 1);
        assert_eq!(report.status, PlayerStatus { hp: 80, points: 10 });
        assert_eq!(report.outcome, HuntOutcome::Running);
    }

    #[test]
    fn stacked_healers_each_count() {
        let mut session = HuntSession::new(&empty_board(100, 100)).expect("session");
        place_stationary(&mut session, HEALING, Vec2::new(2.0, 3.0));
        place_stationary(&mut session, HEALING, Vec2::new(2.0, 3.0));

        let report = session.step(&press(InputAction::MoveUp));

        assert_eq!(report.healing_hits, 2);
        assert_eq!(report.status, PlayerStatus { hp: 100, points: 10 });
    }

    #[test]
    fn reaching_point_threshold_wins_and_freezes_world() {
        let mut session = HuntSession::new(&empty_board(100, 10)).expect("session");
        place_stationary(&mut session, DAMAGING, Vec2::new(1.0, 2.0));

        let report = session.step(&press(InputAction::MoveLeft));
        assert_eq!(report.outcome, HuntOutcome::Won);

        let after = session.step(&press(InputAction::MoveLeft));
        assert!(!after.ticked);
        assert_eq!(session.world().tick_count(), 1);
    }

    #[test]
    fn running_out_of_hp_loses() {
        let mut session = HuntSession::new(&empty_board(20, 100)).expect("session");
        place_stationary(&mut session, DAMAGING, Vec2::new(2.0, 1.0));

        let report = session.step(&press(InputAction::MoveDown));

        assert_eq!(report.status.hp, 0);
        assert_eq!(session.outcome(), HuntOutcome::Lost);
    }

    #[test]
    fn player_cannot_leave_the_board() {
        let mut config = empty_board(100, 100);
        config.player_spawn = Some(Vec2::new(0.0, 0.0));
        let mut session = HuntSession::new(&config).expect("session");

        session.step(&press(InputAction::MoveLeft));
        session.step(&press(InputAction::MoveDown));

        let frame = session
            .world()
            .actors()
            .last()
            .and_then(|player| player.frame())
            .expect("player frame");
        assert_eq!(frame.pos, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn seeded_sessions_spawn_identically() {
        let config = GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        };
        let mut a = HuntSession::new(&config).expect("a");
        let mut b = HuntSession::new(&config).expect("b");
        assert_eq!(a.seed(), 7);

        for action in [InputAction::MoveUp, InputAction::MoveRight, InputAction::Slot1] {
            a.step(&press(action));
            b.step(&press(action));
        }

        let frames = |session: &HuntSession| {
            session
                .world()
                .actors()
                .iter()
                .filter_map(|actor| actor.frame())
                .collect::<Vec<_>>()
        };
        assert_eq!(frames(&a), frames(&b));
        assert_eq!(a.world().actor_count(), 25);
        let bounds = config.bounds().expect("bounds");
        assert!(frames(&a).iter().all(|frame| bounds.contains(frame.pos)));
    }
}
