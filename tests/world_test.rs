use tui_platformer::core::{HeldKeys, StepOutcome, TerrainParams, World, WorldConfig};
use tui_platformer::types::GameAction;

const CANVAS_H: f32 = 480.0;

fn config(seed: u32) -> WorldConfig {
    WorldConfig {
        seed,
        chunk_size: 20,
        ..WorldConfig::default()
    }
}

fn settle(world: &mut World) {
    for _ in 0..120 {
        world.tick();
    }
}

#[test]
fn chunks_do_not_depend_on_visit_order() {
    let mut forward = World::new(config(7), CANVAS_H);
    let mut backward = World::new(config(7), CANVAS_H);

    forward.chunks_mut().ensure_range(-3, 3);
    for index in (-3..=3).rev() {
        backward.chunks_mut().load(index);
    }

    for index in -3..=3 {
        assert_eq!(forward.chunks().get(index), backward.chunks().get(index), "chunk {}", index);
    }
}

#[test]
fn different_seeds_give_different_terrain() {
    let mut a = World::new(config(1), CANVAS_H);
    let mut b = World::new(config(2), CANVAS_H);
    a.chunks_mut().ensure_range(0, 4);
    b.chunks_mut().ensure_range(0, 4);

    let differs = (0..=4).any(|i| a.chunks().get(i) != b.chunks().get(i));
    assert!(differs);
}

#[test]
fn every_column_is_within_the_height_range() {
    let mut cfg = config(11);
    cfg.terrain = TerrainParams {
        min_height: 1,
        max_height: 4,
        ..TerrainParams::default()
    };
    let mut world = World::new(cfg, CANVAS_H);
    world.chunks_mut().ensure_range(-5, 5);

    for index in -5..=5 {
        let chunk = world.chunks().get(index).unwrap();
        assert_eq!(chunk.len(), 20);
        assert!(chunk.heights().iter().all(|h| (1..=4).contains(h)));
    }
    assert!(world.spawn_run().iter().all(|h| (1..=4).contains(h)));
}

#[test]
fn spawn_stands_on_first_run_column() {
    let world = World::new(config(5), CANVAS_H);
    let blocks = world.spawn_run()[0] as f32;
    let c = world.character();

    assert_eq!(c.world_x, 0.0);
    assert_eq!(c.bottom(), CANVAS_H - blocks * 40.0);
    assert_eq!(world.spawn_run().len(), 20);
}

#[test]
fn walking_right_generates_terrain_ahead() {
    let mut world = World::new(config(3), CANVAS_H);
    world.set_keys(HeldKeys { left: false, right: true });

    // 20 columns * 40px = 800px per chunk; 5px per frame.
    for _ in 0..400 {
        world.tick();
        world.load_chunks_around(800.0);
    }

    assert_eq!(world.character().world_x, 2000.0);
    assert!(world.chunks().contains(world.chunks().chunk_index(2000.0) + 1));
    assert!(world.chunks().contains(-1));
}

#[test]
fn walking_left_crosses_into_negative_chunks() {
    let mut world = World::new(config(3), CANVAS_H);
    world.set_keys(HeldKeys { left: true, right: false });

    for _ in 0..200 {
        world.tick();
    }

    assert_eq!(world.character().world_x, -1000.0);
    assert!(world.chunks().contains(-2));
    // Ground under the character is always known after a tick.
    assert!(world.character().bottom() <= CANVAS_H);
}

#[test]
fn character_never_sinks_below_the_surface() {
    let mut world = World::new(config(9), CANVAS_H);
    world.set_keys(HeldKeys { left: false, right: true });

    for _ in 0..1000 {
        world.tick();
        let x = world.character().center_x() as f64;
        let ground = world.chunks_mut().ground_y(x, CANVAS_H);
        assert!(world.character().bottom() <= ground + f32::EPSILON);
    }
}

#[test]
fn jump_only_from_the_ground() {
    let mut world = World::new(config(4), CANVAS_H);
    settle(&mut world);
    assert!(world.character().is_grounded());

    assert!(world.apply_action(GameAction::Jump));
    assert!(!world.apply_action(GameAction::Jump));
    assert_eq!(world.tick(), StepOutcome::Airborne);

    let mut landed = false;
    for _ in 0..120 {
        if world.tick() == StepOutcome::Landed {
            landed = true;
            break;
        }
    }
    assert!(landed);
    assert!(world.apply_action(GameAction::Jump));
}

#[test]
fn canvas_resize_resettles_the_character() {
    let mut world = World::new(config(8), CANVAS_H);
    settle(&mut world);
    let before = world.character().bottom();

    world.set_canvas_height(CANVAS_H + 200.0);
    settle(&mut world);

    assert!(world.character().is_grounded());
    assert_eq!(world.character().bottom(), before + 200.0);
}
