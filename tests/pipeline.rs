#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use approx::assert_relative_eq;
use tracing_subscriber::EnvFilter;

use voxloft::geometry::{CrossSection, InterpolationMode, VaseDefinition};
use voxloft::grid::{BoolVolume, ChunkSpec, GridCoordinates};
use voxloft::math::Point2;
use voxloft::operations::hull::PhysicalScale;
use voxloft::operations::mask::{BuildMask, VoxelMask};
use voxloft::operations::tube::{DiscoveryParams, TubeSelection};
use voxloft::{build_hull, build_mask, discover_tubes, select_tube, to_vase};

const CENTRE: f64 = 12.0;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn disk_radius(t: usize) -> f64 {
    4.0 + 2.0 * t as f64
}

/// A disk growing over four steps, plus a two-voxel speck in one corner.
fn growing_disk() -> BoolVolume {
    BoolVolume::from_fn([4, 25, 25], |t, y, x| {
        let (dy, dx) = (y as f64 - CENTRE, x as f64 - CENTRE);
        let in_disk = dx * dx + dy * dy <= disk_radius(t).powi(2);
        let speck = t == 0 && y == 0 && x <= 1;
        in_disk || speck
    })
}

/// Every voxel of the volume accepted by `in_tube` must be classified inside.
fn assert_tube_voxels_inside(
    volume: &BoolVolume,
    mask: &VoxelMask,
    in_tube: impl Fn(usize, usize, usize) -> bool,
) {
    let [nt, ny, nx] = volume.shape();
    for t in 0..nt {
        for y in 0..ny {
            for x in 0..nx {
                if volume.get(t, y, x) && in_tube(t, y, x) {
                    assert!(mask.get(t, y, x), "voxel ({t}, {y}, {x}) not re-classified");
                }
            }
        }
    }
}

#[test]
fn discover_select_and_remask() {
    init_tracing();
    let volume = growing_disk();
    let coords = GridCoordinates::index_space(volume.shape()).unwrap();

    let tubes = discover_tubes(&volume).unwrap();
    assert_eq!(tubes.len(), 2);
    // The speck is met first in scan order.
    assert_eq!(tubes[0].voxel_count, 2);

    let tube = select_tube(&tubes, TubeSelection::Largest).unwrap();
    assert_eq!(tube.time_indices, vec![0, 1, 2, 3]);
    assert_eq!(
        select_tube(&tubes, TubeSelection::Longest).unwrap().id,
        tube.id
    );

    let vase = to_vase(tube, &volume, &coords, DiscoveryParams::default()).unwrap();
    assert_eq!(vase.len(), 4);
    assert_eq!(vase.mode(), InterpolationMode::Linear);
    for control in vase.controls() {
        let c = control.profile.centroid();
        assert_relative_eq!(c.x, CENTRE, epsilon = 1e-9);
        assert_relative_eq!(c.y, CENTRE, epsilon = 1e-9);
    }

    let mask = build_mask(&coords, &vase).unwrap();
    assert_eq!(mask.shape(), volume.shape());
    assert_eq!(mask.name(), "vase_mask");
    for t in 0..4 {
        assert!(mask.get(t, 12, 12));
        assert!(!mask.get(t, 0, 24));
    }
    // The speck is not part of the selected tube.
    assert!(!mask.get(0, 0, 0));

    assert_tube_voxels_inside(&volume, &mask, |t, y, x| {
        !(t == 0 && y == 0 && x <= 1)
    });

    // Nothing spills past the disk by more than a pixel.
    for t in 0..4 {
        for y in 0..25 {
            for x in 0..25 {
                if mask.get(t, y, x) {
                    let (dy, dx) = (y as f64 - CENTRE, x as f64 - CENTRE);
                    assert!((dx * dx + dy * dy).sqrt() <= disk_radius(t) + 1.0);
                }
            }
        }
    }
}

#[test]
fn chunked_mask_matches_default() {
    init_tracing();
    let volume = growing_disk();
    let coords = GridCoordinates::index_space(volume.shape()).unwrap();
    let tubes = discover_tubes(&volume).unwrap();
    let tube = select_tube(&tubes, TubeSelection::Largest).unwrap();
    let vase = to_vase(
        tube,
        &volume,
        &coords,
        DiscoveryParams::default().with_n_theta(32),
    )
    .unwrap();

    let whole = build_mask(&coords, &vase).unwrap();
    let chunked = BuildMask::new(&vase)
        .with_chunks(ChunkSpec::new(3, 7, 5))
        .execute(&coords)
        .unwrap();
    assert_eq!(whole.volume(), chunked.volume());
}

#[test]
fn hull_from_traced_tube() {
    init_tracing();
    let volume = growing_disk();
    let coords = GridCoordinates::index_space(volume.shape()).unwrap();
    let tubes = discover_tubes(&volume).unwrap();
    let tube = select_tube(&tubes, TubeSelection::Largest).unwrap();
    let vase = to_vase(tube, &volume, &coords, DiscoveryParams::default()).unwrap();

    let scale = PhysicalScale::new(2.0, 1.0).unwrap();
    let hull = build_hull(&vase, scale).unwrap();
    let m = hull.metrics();
    let n = vase.n_theta();

    assert_eq!(hull.mesh().vertex_count(), 4 * n + 2);
    assert_eq!(hull.mesh().triangle_count(), 3 * 2 * n + 2 * n);
    assert_relative_eq!(m.duration, 3.0);

    let first = vase.controls()[0].profile.area() * 4.0;
    let last = vase.controls()[3].profile.area() * 4.0;
    assert!(m.volume > first * 3.0 && m.volume < last * 3.0);
    assert!(m.surface > 0.0);

    let bb = hull.bounding_box().unwrap();
    assert_relative_eq!(bb.min.z, 0.0);
    assert_relative_eq!(bb.max.z, 3.0);
    assert!(bb.min.x >= 2.0 * (CENTRE - disk_radius(3) - 1.0));
    assert!(bb.max.x <= 2.0 * (CENTRE + disk_radius(3) + 1.0));
}

#[test]
fn lofted_sections_mask_a_cone() {
    init_tracing();
    let square = |t: f64, h: f64| {
        CrossSection::new(
            t,
            vec![
                Point2::new(-h, -h),
                Point2::new(h, -h),
                Point2::new(h, h),
                Point2::new(-h, h),
            ],
        )
    };
    let vase = VaseDefinition::from_cross_sections(
        &[square(0.0, 1.0), square(2.0, 3.0)],
        64,
        InterpolationMode::Linear,
    )
    .unwrap();

    let axis: Vec<f64> = (-4..=4).map(f64::from).collect();
    let coords = GridCoordinates::new(vec![0.0, 1.0, 2.0], axis.clone(), axis).unwrap();
    let mask = build_mask(&coords, &vase).unwrap();

    // Index 4 is the origin; half-widths are 1, 2 and 3 at t = 0, 1, 2.
    assert!(mask.get(0, 4, 5));
    assert!(!mask.get(0, 4, 6));
    assert!(mask.get(1, 4, 6));
    assert!(!mask.get(1, 4, 7));
    assert!(mask.get(2, 6, 6));
    assert!(!mask.get(2, 8, 4));
}

#[test]
fn non_convex_slice_round_trips() {
    init_tracing();
    // A 6x6 block with a 2x2 notch cut from one corner, on two time steps.
    let volume = BoolVolume::from_fn([2, 8, 8], |_, y, x| {
        (1..=6).contains(&y) && (1..=6).contains(&x) && !(x >= 5 && y <= 2)
    });
    let coords = GridCoordinates::index_space(volume.shape()).unwrap();
    let tubes = discover_tubes(&volume).unwrap();
    assert_eq!(tubes.len(), 1);
    assert_eq!(tubes[0].voxel_count, 64);

    let vase = to_vase(&tubes[0], &volume, &coords, DiscoveryParams::default()).unwrap();
    let c = vase.controls()[0].profile.centroid();
    assert_relative_eq!(c.x, 3.25, epsilon = 1e-9);
    assert_relative_eq!(c.y, 3.75, epsilon = 1e-9);

    let mask = build_mask(&coords, &vase).unwrap();
    assert_tube_voxels_inside(&volume, &mask, |_, _, _| true);
    assert!(!mask.get(0, 0, 0));
    assert!(!mask.get(1, 7, 7));
}
