use dg_core::{ConfigError, GenConfig, GenError, Grid, Tile};

#[test]
fn test_seeded_random_walk_is_reproducible() {
    let mut a = Grid::with_seed(20, 20, 1234);
    let mut b = Grid::with_seed(20, 20, 1234);
    a.generate_random_walk(40).unwrap();
    b.generate_random_walk(40).unwrap();

    assert!(a.count(Tile::Floor) >= 40);
    assert_eq!(a.floor_cells(), b.floor_cells());
}

#[test]
fn test_random_walk_spans_half_the_grid() {
    let mut grid = Grid::with_seed(20, 20, 99);
    grid.generate_random_walk(40).unwrap();
    let bounds = grid.floor_bounds().unwrap();
    assert!(bounds.width > 10 || bounds.height > 10, "{bounds:?}");
}

#[test]
fn test_grid_rooms_fill_exact_capacity() {
    let mut grid = Grid::with_seed(60, 60, 5);
    assert_eq!(grid.lattice_capacity(), 25);
    grid.generate_grid_rooms(25).unwrap();

    let rooms = grid.rooms();
    assert_eq!(rooms.len(), 25);
    let mut centres: Vec<_> = rooms.iter().map(|r| r.center()).collect();
    centres.sort_unstable();
    centres.dedup();
    assert_eq!(centres.len(), 25);
}

#[test]
fn test_grid_rooms_over_capacity() {
    let mut grid = Grid::with_seed(60, 60, 5);
    let err = grid.generate_grid_rooms(26).unwrap_err();
    assert!(matches!(
        err,
        GenError::NotEnoughSpace {
            requested: 26,
            capacity: 25
        }
    ));
    assert_eq!(grid.count(Tile::Void), 60 * 60);
}

#[test]
fn test_freeform_rooms_connected_without_overlap() {
    let mut grid = Grid::with_seed(90, 90, 31);
    grid.generate_freeform_rooms(20).unwrap();

    let rooms = grid.rooms();
    assert_eq!(rooms.len(), 20);
    for (i, a) in rooms.iter().enumerate() {
        for b in &rooms[i + 1..] {
            assert!(!a.intersects(b));
        }
    }
    assert_eq!(grid.floor_regions().len(), 1);
    assert_eq!(grid.count(Tile::PendingWall), 0);
}

#[test]
fn test_regenerating_discards_previous_layout() {
    let mut grid = Grid::with_seed(80, 80, 2);
    grid.generate_freeform_rooms(12).unwrap();
    grid.generate_grid_rooms(4).unwrap();
    assert_eq!(grid.rooms().len(), 4);
    assert!(grid.corridors().len() >= 3);
    assert!(grid.rooms().iter().all(|r| r.width == 8 && r.height == 8));
}

#[test]
fn test_thicken_after_generation_is_idempotent() {
    let mut grid = Grid::with_seed(40, 40, 8);
    grid.generate_random_walk(200).unwrap();
    grid.thicken_walls();
    let once = grid.tiles().to_vec();
    grid.thicken_walls();
    assert_eq!(grid.tiles(), &once[..]);
}

#[test]
fn test_walk_pipeline_keeps_one_region() {
    let mut grid = Grid::with_seed(50, 50, 77);
    grid.generate_random_walk(400).unwrap();
    grid.remove_islands(grid.config.min_island_size);
    grid.thicken_walls();
    for _ in 0..2 {
        grid.prune_walls(5);
    }
    grid.remove_islands(grid.config.min_island_size);
    assert!(grid.floor_regions().iter().all(|r| r.len() >= 26));
    assert_eq!(grid.count(Tile::PendingWall), 0);
}

#[test]
fn test_invalid_config_rejected_before_mutation() {
    let mut grid = Grid::with_seed(40, 40, 1);
    grid.write(10, 10, Tile::Floor).unwrap();
    grid.config.min_room_width = 9;

    let err = grid.generate_freeform_rooms(3).unwrap_err();
    assert!(matches!(
        err,
        GenError::InvalidConfig(ConfigError::RoomWidthRange { min: 9, max: 8 })
    ));
    assert_eq!(grid.count(Tile::Floor), 1);
}

#[test]
fn test_config_from_json_drives_generation() {
    let config = GenConfig::from_json(r#"{ "corridor_width": 1, "max_room_width": 6 }"#).unwrap();
    let mut grid = Grid::with_seed(50, 50, 3);
    grid.config = config;
    grid.generate_grid_rooms(9).unwrap();
    assert!(grid.rooms().iter().all(|r| r.width == 6));
    assert!(grid.corridors().iter().all(|c| c.width == 1 || c.height == 1));
}
