//! Integration tests for guillotine-d3.

use guillotine_d3::{
    Boundary3D, Cuboid, FreeCuboidChoice, Guillotine3D, ShelfChoice, ShelfPacker, SplitHeuristic,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_items(rng: &mut StdRng, count: usize, max_extent: u32) -> Vec<Cuboid> {
    (0..count)
        .map(|_| {
            Cuboid::new(
                rng.gen_range(1..=max_extent) as f64,
                rng.gen_range(1..=max_extent) as f64,
                rng.gen_range(1..=max_extent) as f64,
            )
        })
        .collect()
}

fn assert_valid_layout(used: &[Cuboid], boundary: &Boundary3D) {
    let bin = boundary.aabb();
    for (i, a) in used.iter().enumerate() {
        assert!(a.is_placed());
        assert!(bin.contains(&a.aabb()), "{a:?} escapes the bin");
        for b in &used[i + 1..] {
            assert!(!a.aabb().overlaps(&b.aabb()), "{a:?} overlaps {b:?}");
        }
    }
}

mod guillotine_tests {
    use super::*;

    const CHOICES: [FreeCuboidChoice; 3] = [
        FreeCuboidChoice::BestAreaFit,
        FreeCuboidChoice::BestShortSideFit,
        FreeCuboidChoice::MinHeight,
    ];

    #[test]
    fn test_exact_cube_fills_bin() {
        let mut packer = Guillotine3D::new(Boundary3D::new(10.0, 10.0, 10.0)).unwrap();
        let choice = FreeCuboidChoice::BestAreaFit;
        let split = SplitHeuristic::ShorterLeftoverAxis;

        assert!(packer
            .insert(&Cuboid::new(10.0, 10.0, 10.0), choice, split)
            .unwrap()
            .is_placed());
        for item in [Cuboid::new(1.0, 1.0, 1.0), Cuboid::new(0.5, 0.5, 0.5)] {
            assert!(!packer.fits(&item, choice).unwrap());
            assert!(!packer.insert(&item, choice, split).unwrap().is_placed());
        }
    }

    #[test]
    fn test_random_fixed_bin_layouts_are_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let boundary = Boundary3D::new(60.0, 50.0, 40.0);

        for choice in CHOICES {
            let items = random_items(&mut rng, 40, 25);
            let mut packer = Guillotine3D::new(boundary).unwrap();
            packer
                .insert_batch(&items, choice, SplitHeuristic::ShorterLeftoverAxis)
                .unwrap();
            assert_valid_layout(packer.used_cuboids(), &boundary);

            for free in packer.free_cuboids() {
                assert!(boundary.aabb().contains(&free.aabb()));
                for used in packer.used_cuboids() {
                    assert!(!free.aabb().overlaps(&used.aabb()));
                }
            }
        }
    }

    #[test]
    fn test_random_unbounded_layouts_place_everything() {
        let mut rng = StdRng::seed_from_u64(9);
        let boundary = Boundary3D::unbounded(50.0, 50.0);

        for split in [SplitHeuristic::MinimizeArea, SplitHeuristic::LongerAxis] {
            let items = random_items(&mut rng, 50, 30);
            let mut packer = Guillotine3D::new(boundary).unwrap();
            let placed = packer
                .insert_batch(&items, FreeCuboidChoice::MinHeight, split)
                .unwrap();

            assert_eq!(placed.len(), items.len());
            assert_valid_layout(packer.used_cuboids(), &boundary);
            let height = packer.filled_bin_height().unwrap();
            assert!(packer.used_volume() <= boundary.footprint_area() * height + 1e-6);
        }
    }

    #[test]
    fn test_lookahead_not_worse_than_naive() {
        let boundary = Boundary3D::unbounded(20.0, 20.0);
        let items = [
            Cuboid::new(20.0, 3.0, 12.0),
            Cuboid::new(8.0, 9.0, 20.0),
            Cuboid::new(12.0, 6.0, 20.0),
            Cuboid::new(20.0, 4.0, 8.0),
        ];

        let mut naive = Guillotine3D::new(boundary).unwrap();
        naive
            .insert_batch(&items, FreeCuboidChoice::MinHeight, SplitHeuristic::ShorterLeftoverAxis)
            .unwrap();
        let naive_height = naive.filled_bin_height().unwrap();

        let mut lookahead = Guillotine3D::new(boundary).unwrap();
        let outcome = lookahead
            .pack_best_global(&items, SplitHeuristic::ShorterLeftoverAxis)
            .unwrap();

        assert_eq!(outcome.placed_count(), items.len());
        assert!(outcome.filled_height.unwrap() <= naive_height + 1e-9);
        assert_valid_layout(lookahead.used_cuboids(), &boundary);
    }

    #[test]
    fn test_determinism() {
        let mut rng = StdRng::seed_from_u64(77);
        let items = random_items(&mut rng, 30, 20);
        let boundary = Boundary3D::unbounded(40.0, 40.0);

        let run = || {
            let mut packer = Guillotine3D::new(boundary).unwrap();
            packer
                .insert_batch(&items, FreeCuboidChoice::BestShortSideFit, SplitHeuristic::MaximizeArea)
                .unwrap()
        };
        assert_eq!(run(), run());
    }
}

mod shelf_tests {
    use super::*;

    #[test]
    fn test_random_shelf_layouts_are_valid() {
        let mut rng = StdRng::seed_from_u64(1);
        let boundary = Boundary3D::unbounded(80.0, 60.0);

        for choice in [ShelfChoice::NextFit, ShelfChoice::FirstFit, ShelfChoice::BestHeightFit] {
            let items = random_items(&mut rng, 60, 40);
            let mut packer = ShelfPacker::new(boundary).unwrap();
            let placed = packer.insert_batch(&items, choice).unwrap();

            assert_eq!(placed.len(), items.len());
            assert_valid_layout(packer.used_cuboids(), &boundary);

            for cuboid in packer.used_cuboids() {
                let shelf = &packer.shelves()[packer.shelf_at(cuboid.y).unwrap()];
                assert!(cuboid.top() <= shelf.top() + 1e-9);
            }
            let top = packer.shelves().last().unwrap().top();
            assert!(packer.filled_bin_height().unwrap() <= top + 1e-9);
        }
    }

    #[test]
    fn test_fixed_height_shelves_stay_inside() {
        let mut rng = StdRng::seed_from_u64(2);
        let boundary = Boundary3D::new(50.0, 60.0, 50.0);
        let items = random_items(&mut rng, 80, 30);

        let mut packer = ShelfPacker::new(boundary).unwrap();
        let placed = packer.insert_batch(&items, ShelfChoice::FirstFit).unwrap();

        assert!(placed.len() < items.len());
        assert_valid_layout(packer.used_cuboids(), &boundary);
        assert!(packer.shelves().iter().all(|shelf| shelf.top() <= 60.0 + 1e-9));
    }
}
