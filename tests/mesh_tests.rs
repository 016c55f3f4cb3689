use tearcloth::{ClothConfig, ClothError, ClothMesh, ConstraintKey, StepObserver, Vec2};

fn mesh(width: usize, height: usize) -> ClothMesh<f32> {
    ClothMesh::new(ClothConfig::new().with_grid(width, height)).expect("valid config")
}

#[test]
fn constraint_count_matches_grid_formula() {
    for &(width, height) in &[(1, 1), (3, 2), (10, 35), (7, 1)] {
        let cloth = mesh(width, height);
        assert_eq!(cloth.particle_count(), (width + 1) * (height + 1));
        assert_eq!(
            cloth.constraint_count(),
            width * (height + 1) + height * (width + 1),
            "wrong constraint count for {}x{}",
            width,
            height,
        );
    }
}

#[test]
fn incident_constraints_depend_on_position_in_grid() {
    let cloth = mesh(4, 3);
    for row in 0..cloth.rows() {
        for col in 0..cloth.columns() {
            let edges = [col == 0, col == cloth.width(), row == 0, row == cloth.height()]
                .iter()
                .filter(|e| **e)
                .count();
            let count = cloth.particle_at(col, row).expect("in grid").constraints().len();
            assert_eq!(count, 4 - edges, "particle ({}, {}) has {} constraints", col, row, count);
            assert!((2..=4).contains(&count));
        }
    }
}

#[test]
fn every_handle_on_a_particle_is_live_and_incident() {
    let mut cloth = mesh(5, 5);
    cloth.cut_near(Vec2::new(600.0, 50.0), 30.0);
    for (id, p) in cloth.particles().iter().enumerate() {
        for key in p.constraints() {
            let c = cloth.constraint(*key).expect("dangling handle");
            assert!(c.p1 == id || c.p2 == id);
            assert_ne!(c.p1, c.p2);
            assert!(c.rest_length > 0.0);
        }
    }
}

#[test]
fn cloth_at_rest_stays_put() {
    let config = ClothConfig::<f32>::new()
        .with_grid(10, 35)
        .with_spacing(15.0)
        .with_gravity(0.0);
    let mut cloth = ClothMesh::new(config).expect("valid config");
    let initial = cloth.positions();

    cloth.step(0.016);

    for (id, (before, after)) in initial.iter().zip(cloth.positions().iter()).enumerate() {
        assert!(
            before.distance(*after) < 1e-4,
            "particle {} drifted from ({}, {}) to ({}, {})",
            id, before.x, before.y, after.x, after.y,
        );
    }
}

#[test]
fn cloth_at_rest_stays_put_in_f64() {
    let config = ClothConfig::<f64>::new().with_gravity(0.0);
    let mut cloth = ClothMesh::new(config).expect("valid config");
    let initial = cloth.positions();
    for _ in 0..10 {
        cloth.step(0.016);
    }
    for (before, after) in initial.iter().zip(cloth.positions().iter()) {
        assert!(before.distance(*after) < 1e-9);
    }
}

#[test]
fn boundary_reflects_overshoot() {
    let mut cloth = mesh(1, 1);
    cloth.cut_near(Vec2::new(600.0, 30.0), 1000.0);
    assert_eq!(cloth.constraint_count(), 0);

    let bounds = cloth.bounds();
    cloth
        .place_particle(0, Vec2::new(bounds.x + 5.0, 100.0), Vec2::new(bounds.x + 5.0, 100.0))
        .expect("in range");
    cloth.relax();

    let p = cloth.particle(0).expect("particle 0");
    assert_eq!(p.pos.x, bounds.x - 5.0);
    assert_eq!(p.pos.y, 100.0);
}

#[test]
fn pinned_particle_sits_on_target_every_frame() {
    let mut cloth = ClothMesh::new(ClothConfig::<f32>::new()).expect("valid config");
    let target = Vec2::new(480.0, 10.0);
    cloth.pin_particle(25, target).expect("in range");
    cloth.pin_particle(0, Vec2::new(525.0, 20.0)).expect("in range");

    for frame in 0..120 {
        cloth.step(0.016);
        assert_eq!(cloth.particle(25).expect("grab").pos, target, "frame {}", frame);
        assert_eq!(cloth.particle(0).expect("corner").pos, Vec2::new(525.0, 20.0));
    }
}

#[test]
fn pinned_particle_holds_against_earlier_owner() {
    let mut cloth = ClothMesh::new(ClothConfig::<f32>::new().with_grid(2, 2).with_gravity(0.0))
        .expect("valid config");
    // Particle 0 owns this constraint and is relaxed after particle 8.
    cloth.attach(0, 8).expect("distinct particles");
    let target = Vec2::new(900.0, 600.0);
    cloth.pin_particle(8, target).expect("in range");

    for frame in 0..10 {
        cloth.step(0.016);
        assert_eq!(cloth.particle(8).expect("pinned").pos, target, "frame {}", frame);
    }
}

#[test]
fn pinned_top_row_drapes_under_gravity() {
    let mut cloth = ClothMesh::new(ClothConfig::<f32>::new().with_grid(8, 8)).expect("valid config");
    for col in 0..cloth.columns() {
        let pos = cloth.particle_at(col, 0).expect("top row").pos;
        cloth.pin_particle(col, pos).expect("in range");
    }
    let bottom = cloth.rows() - 1;
    let initial: Vec<f32> = (0..cloth.columns())
        .map(|col| cloth.particle_at(col, bottom).expect("bottom row").pos.y)
        .collect();

    for _ in 0..30 {
        cloth.step(0.016);
    }

    for col in 0..cloth.columns() {
        let y = cloth.particle_at(col, bottom).expect("bottom row").pos.y;
        assert!(y > initial[col], "bottom particle {} should sag: {} -> {}", col, initial[col], y);
    }
}

#[test]
fn tearing_removes_constraint_from_both_endpoints() {
    let mut cloth = mesh(3, 3);
    let before = cloth.constraint_count();
    let key = cloth.particle(5).expect("particle").constraints()[0];
    let (p1, p2) = {
        let c = cloth.constraint(key).expect("live");
        (c.p1, c.p2)
    };

    let far = cloth.particle(p1).expect("p1").pos + Vec2::new(400.0, 0.0);
    cloth.place_particle(p1, far, far).expect("in range");
    assert!(cloth.tear_if_overstretched(key));

    assert_eq!(cloth.constraint_count(), before - 1);
    assert!(cloth.constraint(key).is_none());
    assert!(!cloth.particle(p1).expect("p1").constraints().contains(&key));
    assert!(!cloth.particle(p2).expect("p2").constraints().contains(&key));
}

#[test]
fn short_constraints_survive_tear_check() {
    let mut cloth = mesh(3, 3);
    let key = cloth.particle(5).expect("particle").constraints()[0];
    assert!(!cloth.tear_if_overstretched(key));
    assert_eq!(cloth.tear_overstretched(), 0);
}

#[test]
fn overstretch_sweep_tears_only_long_constraints() {
    let mut cloth = mesh(4, 4);
    let before = cloth.constraint_count();
    let id = cloth.index(2, 2);
    let incident = cloth.particle(id).expect("middle").constraints().len();
    let far = Vec2::new(1100.0, 700.0);
    cloth.place_particle(id, far, far).expect("in range");

    assert_eq!(cloth.tear_overstretched(), incident);
    assert_eq!(cloth.constraint_count(), before - incident);
    assert!(cloth.particle(id).expect("middle").constraints().is_empty());
}

#[test]
fn auto_tear_runs_during_step() {
    let stretch = |cloth: &mut ClothMesh<f32>| {
        // Opposite corners pinned ~1400 apart; a 4-edge path cannot span that
        // without at least one edge over the 150 tear distance.
        cloth.pin_particle(0, Vec2::new(10.0, 10.0)).expect("in range");
        cloth.pin_particle(8, Vec2::new(1180.0, 780.0)).expect("in range");
        cloth.step(0.016);
    };

    let mut tearing = ClothMesh::new(ClothConfig::<f32>::new().with_grid(2, 2).with_auto_tear(true))
        .expect("valid config");
    let before = tearing.constraint_count();
    stretch(&mut tearing);
    assert!(tearing.constraint_count() < before);

    let mut elastic = ClothMesh::new(ClothConfig::<f32>::new().with_grid(2, 2)).expect("valid config");
    stretch(&mut elastic);
    assert_eq!(elastic.constraint_count(), before);
}

#[test]
fn cut_near_removes_constraints_under_the_point() {
    let mut cloth = mesh(10, 35);
    let before = cloth.constraint_count();
    // Midpoint of the constraint between particles 0 and 1.
    let cut = cloth.cut_near(Vec2::new(532.5, 20.0), 5.0);
    assert_eq!(cut, 1);
    assert_eq!(cloth.constraint_count(), before - 1);
    assert_eq!(cloth.cut_near(Vec2::new(5.0, 5.0), 5.0), 0);
}

#[derive(Default)]
struct TearLog {
    torn: Vec<ConstraintKey>,
}

impl StepObserver for TearLog {
    fn on_tear(&mut self, key: ConstraintKey) { self.torn.push(key); }
}

#[test]
fn observed_cuts_and_tears_are_reported() {
    let mut cloth = mesh(3, 3);
    let mut log = TearLog::default();

    let key = cloth.particle(5).expect("particle").constraints()[0];
    assert!(cloth.tear_observed(key, &mut log).is_some());
    assert_eq!(log.torn, vec![key]);

    let cut = cloth.cut_near_observed(cloth.particle(0).expect("corner").pos, 10.0, &mut log);
    assert_eq!(cut, 2);
    assert_eq!(log.torn.len(), 3);

    let id = cloth.index(3, 3);
    let far = Vec2::new(1100.0, 700.0);
    cloth.place_particle(id, far, far).expect("in range");
    let torn = cloth.tear_overstretched_observed(&mut log);
    assert_eq!(torn, 2);
    assert_eq!(log.torn.len(), 5);

    // Plain calls stay silent.
    cloth.cut_near(Vec2::new(1.0, 1.0), 1000.0);
    assert_eq!(log.torn.len(), 5);
}

#[test]
fn invalid_configurations_are_rejected() {
    let zero = ClothMesh::new(ClothConfig::<f32>::new().with_grid(10, 0));
    assert_eq!(zero.err(), Some(ClothError::InvalidGridDimensions { width: 10, height: 0 }));

    let spacing = ClothMesh::new(ClothConfig::<f32>::new().with_spacing(-1.0));
    assert_eq!(spacing.err(), Some(ClothError::InvalidSpacing));
}

#[test]
fn out_of_range_particles_are_errors() {
    let mut cloth = mesh(2, 2);
    assert_eq!(
        cloth.pin_particle(9, Vec2::zero()),
        Err(ClothError::ParticleOutOfBounds { index: 9, count: 9 })
    );
    assert!(cloth.unpin_particle(8).is_ok());
}
