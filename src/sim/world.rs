//! World orchestrator
//!
//! Owns every entity (sorted by id, ids never reused), the session state and
//! the seeded RNG. One [`World::update`] call advances one frame in a fixed
//! order: session, spawning, player control, hunter AI, physics, collisions,
//! purge, end-of-game check.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{Rect, overlaps};
use super::dragon::{Dragon, nearest};
use super::entity::{Body, Entity, EntityId, EntityKind, Payload};
use super::food::Food;
use super::fox::Fox;
use super::hunter::{EvaderView, HitOutcome, Hunter, HunterState, speed_multiplier_for};
use super::input::FrameInput;
use super::projectile::{Fireball, Poo};
use super::session::{GamePhase, GameState};
use crate::config::{ConfigError, MapConfig, SessionConfig};
use crate::consts::*;

/// Gameplay events recorded during a frame for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ResourceCollected { id: EntityId },
    AdversarySpawned { id: EntityId },
    AdversaryStunned { id: EntityId },
    /// Hit while stuck in poo; lost health but stays immobilized
    AdversaryWounded { id: EntityId },
    AdversaryDisabled { id: EntityId },
    AdversaryImmobilized { id: EntityId },
    ProjectileFired { id: EntityId },
    EvaderCaptured,
    PhaseChanged(GamePhase),
}

/// Values the UI shows every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub difficulty: f32,
    pub hide_cooldown: f32,
    pub hide_time_remaining: f32,
    pub resources_collected: u32,
    pub adversaries: usize,
    pub phase: GamePhase,
}

pub struct World {
    map: MapConfig,
    session: GameState,
    /// Sorted by id
    entities: Vec<Entity>,
    /// Static obstacle rectangles, cached for AI and collision queries
    obstacles: Vec<Rect>,
    rng: Pcg32,
    next_id: EntityId,
    fox_id: EntityId,
    dragon_id: EntityId,
    /// Food eaten this session; survives the fox being purged
    resources_collected: u32,
    events: Vec<GameEvent>,
}

impl World {
    /// Validate the map and populate a fresh world in the Idle phase
    pub fn new(map: MapConfig, session: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        map.validate()?;

        let mut world = Self {
            map,
            session: GameState::new(session),
            entities: Vec::new(),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            fox_id: 0,
            dragon_id: 0,
            resources_collected: 0,
            events: Vec::new(),
        };
        world.populate();

        log::info!(
            "World '{}' ready (seed {}): {} obstacles, {} hunters, {} food",
            world.map.name,
            seed,
            world.obstacles.len(),
            world.count(EntityKind::Adversary),
            world.count(EntityKind::Resource),
        );
        Ok(world)
    }

    fn populate(&mut self) {
        for i in 0..self.map.obstacles.len() {
            let o = self.map.obstacles[i];
            let texture = self.pick_obstacle_texture();
            let body = Body::new(Vec2::new(o.x, o.y), o.width, o.height);
            self.obstacles.push(body.rect());
            self.insert(body, Payload::Obstacle, texture);
        }

        // Players first so spawn clearance can see them
        let center = self.map.size() / 2.0;
        self.fox_id = self.insert(
            Body::new(center, FOX_SIZE, FOX_SIZE),
            Payload::Evader(Fox::new()),
            Some(FOX_TEXTURE.into()),
        );
        self.dragon_id = self.insert(
            Body::new(center + Vec2::splat(DRAGON_SPAWN_OFFSET), DRAGON_SIZE, DRAGON_SIZE),
            Payload::Attacker(Dragon::new()),
            Some(DRAGON_TEXTURE.into()),
        );

        for _ in 0..self.map.resource_count {
            self.spawn_resource();
        }
        for _ in 0..self.map.adversary_count {
            self.spawn_adversary();
        }
    }

    fn pick_obstacle_texture(&mut self) -> Option<String> {
        let textures = &self.map.textures.obstacles;
        if textures.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..textures.len());
        textures.get(index).cloned()
    }

    fn insert(&mut self, body: Body, payload: Payload, texture: Option<String>) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        let entity = Entity::new(id, body, payload);
        // Ids grow monotonically, so pushing keeps the list sorted
        self.entities.push(match texture {
            Some(key) => entity.with_texture(key),
            None => entity,
        });
        id
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        let dt = dt.max(0.0);

        self.session.update(dt);

        if !self.session.is_playing() {
            if input.start {
                self.start();
            }
            return;
        }

        self.spawn_due();
        self.control_players(dt, input);
        self.step_hunters(dt);

        for entity in &mut self.entities {
            entity.update(dt);
        }
        self.clamp_players();

        self.collect_resources();
        self.rebound_fox();
        self.update_vision();
        self.resolve_fireballs();
        self.resolve_hazards();
        self.resolve_captures();

        self.purge();

        if !self.fox_active() {
            self.set_phase(GamePhase::Ended);
        }
    }

    /// Begin play; after a finished session the world is rebuilt first
    pub fn start(&mut self) {
        if self.session.phase() == GamePhase::Ended {
            self.restart();
        }

        if let Some(Entity {
            payload: Payload::Evader(fox),
            ..
        }) = self.entity_mut(self.fox_id)
        {
            fox.reset_hiding();
        }

        self.set_phase(GamePhase::Playing);
    }

    fn restart(&mut self) {
        log::info!("Rebuilding world '{}' for replay", self.map.name);
        self.teardown();
        self.resources_collected = 0;
        self.populate();
    }

    fn set_phase(&mut self, phase: GamePhase) {
        if self.session.phase() != phase {
            self.session.set_phase(phase);
            self.events.push(GameEvent::PhaseChanged(phase));
        }
    }

    fn spawn_due(&mut self) {
        if self.session.should_spawn_adversary() {
            self.spawn_adversary();
        }

        let on_field = self
            .entities
            .iter()
            .filter(|e| e.is_active() && matches!(&e.payload, Payload::Resource(f) if !f.is_collecting()))
            .count();
        if self.session.should_spawn_resource(on_field) {
            self.spawn_resource();
        }
    }

    fn control_players(&mut self, dt: f32, input: &FrameInput) {
        if let Some(Entity {
            body,
            payload: Payload::Evader(fox),
            ..
        }) = self.entity_mut(self.fox_id)
        {
            fox.control(body, dt, &input.evader);
        }

        // Forward fire wins; aimed fire needs a live hunter to aim at
        let aim = if input.attacker.action && !input.fire_forward {
            self.entity(self.dragon_id)
                .and_then(|dragon| self.nearest_adversary(dragon.body.pos))
        } else {
            None
        };
        let wants_fire = input.fire_forward || aim.is_some();

        let Some(Entity {
            body,
            payload: Payload::Attacker(dragon),
            ..
        }) = self.entity_mut(self.dragon_id)
        else {
            return;
        };

        dragon.control(body, dt, &input.attacker);
        if !wants_fire {
            return;
        }

        if let Some(dir) = dragon.fire(body, aim) {
            let origin = body.pos;
            self.spawn_fireball(origin, dir);
        }
    }

    fn nearest_adversary(&self, from: Vec2) -> Option<Vec2> {
        nearest(
            from,
            self.entities
                .iter()
                .filter(|e| e.is_active() && e.kind() == EntityKind::Adversary)
                .map(|e| e.body.pos),
        )
    }

    fn step_hunters(&mut self, dt: f32) {
        let evader = self.evader_view();
        for entity in &mut self.entities {
            if let Payload::Adversary(hunter) = &mut entity.payload {
                hunter.update_ai(
                    &mut entity.body,
                    dt,
                    evader.as_ref(),
                    &self.obstacles,
                    &mut self.rng,
                );
            }
        }
    }

    fn clamp_players(&mut self) {
        let size = self.map.size();
        for entity in &mut self.entities {
            if matches!(entity.kind(), EntityKind::Evader | EntityKind::Attacker) {
                entity.body.clamp_to_bounds(size, MAP_PADDING);
            }
        }
    }

    fn collect_resources(&mut self) {
        let Some(fox_rect) = self.active_rect(self.fox_id) else {
            return;
        };

        let mut collected = Vec::new();
        for entity in &mut self.entities {
            if !entity.body.active {
                continue;
            }
            if let Payload::Resource(food) = &mut entity.payload {
                if overlaps(&fox_rect, &entity.body.rect()) && food.collect() {
                    collected.push(entity.id);
                }
            }
        }

        for id in collected {
            let Some(Entity {
                body,
                payload: Payload::Evader(fox),
                ..
            }) = self.entity_mut(self.fox_id)
            else {
                return;
            };

            let poo_pos = fox.collect_resource(body);
            self.resources_collected += 1;
            self.session.add_score(SCORE_PER_FOOD);
            self.events.push(GameEvent::ResourceCollected { id });
            self.spawn_hazard(poo_pos);
        }
    }

    fn rebound_fox(&mut self) {
        let Some(index) = self.index_of(self.fox_id) else {
            return;
        };
        let entity = &mut self.entities[index];
        if !entity.body.active {
            return;
        }

        let rect = entity.body.rect();
        if !self.obstacles.iter().any(|o| overlaps(&rect, o)) {
            return;
        }
        if let Payload::Evader(fox) = &mut entity.payload {
            fox.rebound(&mut entity.body);
        }
    }

    /// Hunters that see the fox start chasing; chasers that lost it give up
    fn update_vision(&mut self) {
        let evader = self.evader_view();

        for entity in &mut self.entities {
            if !entity.body.active {
                continue;
            }
            let Payload::Adversary(hunter) = &mut entity.payload else {
                continue;
            };

            let visible = evader
                .as_ref()
                .is_some_and(|e| hunter.can_see(&entity.body, e, &self.obstacles));

            match (hunter.state, visible, evader.as_ref()) {
                (HunterState::Patrolling, true, Some(e)) => {
                    hunter.start_chasing(e.id);
                    log::debug!("Hunter {} spotted the fox", entity.id);
                }
                (HunterState::Chasing, false, _) => hunter.stop_chasing(),
                _ => {}
            }
        }
    }

    fn resolve_fireballs(&mut self) {
        let fireballs: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_active() && e.kind() == EntityKind::Projectile)
            .map(|(i, _)| i)
            .collect();

        for fi in fireballs {
            let rect = self.entities[fi].body.rect();

            let hit = self.entities.iter().position(|e| {
                e.is_active() && e.kind() == EntityKind::Adversary && overlaps(&rect, &e.body.rect())
            });

            if let Some(hi) = hit {
                self.entities[fi].body.deactivate();

                let target = &mut self.entities[hi];
                if let Payload::Adversary(hunter) = &mut target.payload {
                    let id = target.id;
                    let event = match hunter.take_hit(&mut target.body) {
                        HitOutcome::Stunned => GameEvent::AdversaryStunned { id },
                        HitOutcome::Wounded => GameEvent::AdversaryWounded { id },
                        HitOutcome::Disabled => {
                            log::debug!("Hunter {} disabled", id);
                            GameEvent::AdversaryDisabled { id }
                        }
                    };
                    self.events.push(event);
                }
                continue;
            }

            // Obstacles absorb fireballs without damage
            if self.obstacles.iter().any(|o| overlaps(&rect, o)) {
                self.entities[fi].body.deactivate();
            }
        }
    }

    fn resolve_hazards(&mut self) {
        let hazards: Vec<Rect> = self
            .entities
            .iter()
            .filter(|e| e.is_active() && e.kind() == EntityKind::Hazard)
            .map(|e| e.body.rect())
            .collect();
        if hazards.is_empty() {
            return;
        }

        for entity in &mut self.entities {
            if !entity.body.active {
                continue;
            }
            let Payload::Adversary(hunter) = &mut entity.payload else {
                continue;
            };

            let rect = entity.body.rect();
            if hazards.iter().any(|h| overlaps(h, &rect)) && hunter.immobilize(&mut entity.body) {
                self.events
                    .push(GameEvent::AdversaryImmobilized { id: entity.id });
            }
        }
    }

    fn resolve_captures(&mut self) {
        let Some(fox_rect) = self.active_rect(self.fox_id) else {
            return;
        };

        let caught = self.entities.iter().any(|e| {
            e.is_active() && e.kind() == EntityKind::Adversary && overlaps(&fox_rect, &e.body.rect())
        });
        if !caught {
            return;
        }

        let Some(Entity {
            body,
            payload: Payload::Evader(fox),
            ..
        }) = self.entity_mut(self.fox_id)
        else {
            return;
        };

        if fox.get_caught(body) {
            log::info!("Fox captured after eating {}", fox.resources_collected);
            self.events.push(GameEvent::EvaderCaptured);
        }
    }

    /// Drop inactive entities; every hunter removed counts as disabled
    fn purge(&mut self) {
        let disabled = self
            .entities
            .iter()
            .filter(|e| !e.is_active() && e.kind() == EntityKind::Adversary)
            .count() as u32;
        if disabled > 0 {
            self.session.add_score(disabled * SCORE_PER_HUNTER);
        }

        self.entities.retain(Entity::is_active);
    }

    /// Random spawn point far enough from both players and clear of obstacles
    fn find_spawn_point(&mut self, size: f32, clearance: f32, edge_bias: bool) -> Option<Vec2> {
        let players: Vec<Vec2> = [self.fox_id, self.dragon_id]
            .iter()
            .filter_map(|&id| self.entity(id))
            .filter(|e| e.is_active())
            .map(|e| e.body.pos)
            .collect();
        let map = self.map.size();

        for _ in 0..MAX_SPAWN_ATTEMPTS {
            let pos = if edge_bias && self.rng.random_bool(EDGE_SPAWN_BIAS) {
                edge_point(map, &mut self.rng)
            } else {
                Vec2::new(
                    self.rng.random_range(0.0..=map.x),
                    self.rng.random_range(0.0..=map.y),
                )
            };

            if players.iter().any(|p| p.distance(pos) <= clearance) {
                continue;
            }

            let rect = Rect::new(pos, size, size);
            if self.obstacles.iter().any(|o| overlaps(&rect, o)) {
                continue;
            }

            return Some(pos);
        }

        None
    }

    /// Place a hunter, scaled to the current difficulty
    pub fn spawn_adversary(&mut self) -> Option<EntityId> {
        let clearance = spawn_clearance(
            HUNTER_SPAWN_CLEARANCE,
            HUNTER_SPAWN_CLEARANCE_MIN,
            self.session.difficulty(),
        );
        let Some(pos) = self.find_spawn_point(HUNTER_SIZE, clearance, true) else {
            log::debug!("No valid hunter spawn point after {} attempts", MAX_SPAWN_ATTEMPTS);
            return None;
        };

        let mut hunter = Hunter::new(pos, self.map.size(), &mut self.rng);
        hunter.set_speed_multiplier(speed_multiplier_for(self.session.difficulty()));

        let id = self.insert(
            Body::new(pos, HUNTER_SIZE, HUNTER_SIZE),
            Payload::Adversary(hunter),
            Some(HUNTER_TEXTURE.into()),
        );
        self.events.push(GameEvent::AdversarySpawned { id });
        Some(id)
    }

    pub fn spawn_resource(&mut self) -> Option<EntityId> {
        let clearance = spawn_clearance(
            FOOD_SPAWN_CLEARANCE,
            FOOD_SPAWN_CLEARANCE_MIN,
            self.session.difficulty(),
        );
        let Some(pos) = self.find_spawn_point(FOOD_SIZE, clearance, false) else {
            log::debug!("No valid food spawn point after {} attempts", MAX_SPAWN_ATTEMPTS);
            return None;
        };

        Some(self.insert(
            Body::new(pos, FOOD_SIZE, FOOD_SIZE),
            Payload::Resource(Food::new()),
            Some(FOOD_TEXTURE.into()),
        ))
    }

    pub fn spawn_hazard(&mut self, pos: Vec2) -> EntityId {
        self.insert(
            Body::new(pos, POO_SIZE, POO_SIZE),
            Payload::Hazard(Poo::new()),
            Some(POO_TEXTURE.into()),
        )
    }

    fn spawn_fireball(&mut self, origin: Vec2, dir: Vec2) -> EntityId {
        let mut body = Body::new(origin, FIREBALL_SIZE, FIREBALL_SIZE);
        body.vel = dir * FIREBALL_SPEED;
        let id = self.insert(
            body,
            Payload::Projectile(Fireball::new()),
            Some(FIREBALL_TEXTURE.into()),
        );
        self.events.push(GameEvent::ProjectileFired { id });
        id
    }

    /// Deactivate and release every entity
    pub fn teardown(&mut self) {
        for entity in &mut self.entities {
            entity.body.deactivate();
        }
        self.entities.clear();
        self.obstacles.clear();
    }

    fn index_of(&self, id: EntityId) -> Option<usize> {
        self.entities.binary_search_by_key(&id, |e| e.id).ok()
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.index_of(id).map(|i| &self.entities[i])
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let index = self.index_of(id)?;
        self.entities.get_mut(index)
    }

    fn active_rect(&self, id: EntityId) -> Option<Rect> {
        self.entity(id)
            .filter(|e| e.is_active())
            .map(|e| e.body.rect())
    }

    fn fox_active(&self) -> bool {
        self.entity(self.fox_id).is_some_and(Entity::is_active)
    }

    fn evader_view(&self) -> Option<EvaderView> {
        let entity = self.entity(self.fox_id)?;
        let fox = entity.as_fox()?;
        Some(EvaderView {
            id: entity.id,
            pos: entity.body.pos,
            active: entity.body.active,
            hiding: fox.is_hidden(),
        })
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.entities
            .iter()
            .filter(|e| e.is_active() && e.kind() == kind)
            .count()
    }

    /// All live entities, in id order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    pub fn fox_id(&self) -> EntityId {
        self.fox_id
    }

    pub fn dragon_id(&self) -> EntityId {
        self.dragon_id
    }

    pub fn map(&self) -> &MapConfig {
        &self.map
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase()
    }

    pub fn hud(&self) -> Hud {
        let fox = self.entity(self.fox_id).and_then(Entity::as_fox);
        Hud {
            score: self.session.score(),
            difficulty: self.session.difficulty(),
            hide_cooldown: fox.map_or(0.0, Fox::hide_cooldown_remaining),
            hide_time_remaining: fox.map_or(0.0, Fox::hide_time_remaining),
            resources_collected: self.resources_collected,
            adversaries: self.count(EntityKind::Adversary),
            phase: self.session.phase(),
        }
    }

    /// Hand over the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Distance kept from the players; shrinks with difficulty down to `floor`
fn spawn_clearance(base: f32, floor: f32, difficulty: f32) -> f32 {
    (base / difficulty).max(floor)
}

/// A point within `EDGE_SPAWN_MARGIN` of a random map border
fn edge_point(map: Vec2, rng: &mut impl Rng) -> Vec2 {
    let margin = EDGE_SPAWN_MARGIN.min(map.x).min(map.y);
    let inset = rng.random_range(0.0..=margin);
    let along_x = rng.random_range(0.0..=map.x);
    let along_y = rng.random_range(0.0..=map.y);

    match rng.random_range(0..4) {
        0 => Vec2::new(along_x, inset),
        1 => Vec2::new(map.x - inset, along_y),
        2 => Vec2::new(along_x, map.y - inset),
        _ => Vec2::new(inset, along_y),
    }
}
