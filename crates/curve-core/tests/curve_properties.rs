// File: crates/curve-core/tests/curve_properties.rs
// Purpose: Range mapping bounds and handle placement properties over generated series.

use curve_core::{map_range, ChartError, CurveBuilder, Point, VerticalMapper};
use curve_core::scale::TOP_PADDING;

/// Deterministic pseudo-random steps in (0, 50].
fn steps(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 500 + 1) as f64 / 10.0
        })
        .collect()
}

fn increasing(seed: u64, n: usize) -> Vec<f64> {
    steps(seed, n)
        .into_iter()
        .scan(0.0, |acc, s| {
            *acc += s;
            Some(*acc)
        })
        .collect()
}

#[test]
fn map_range_hits_endpoints_and_clamps() {
    assert_eq!(map_range(0.0, (0.0, 40.0), (300.0, 4.0), false).unwrap(), 300.0);
    assert_eq!(map_range(40.0, (0.0, 40.0), (300.0, 4.0), false).unwrap(), 4.0);
    assert_eq!(map_range(20.0, (0.0, 40.0), (300.0, 4.0), false).unwrap(), 152.0);

    for v in [-1000.0, -1.0, 0.0, 12.5, 39.9, 40.0, 41.0, 1e9] {
        let y = map_range(v, (0.0, 40.0), (300.0, 4.0), true).unwrap();
        assert!((4.0..=300.0).contains(&y), "{v} -> {y}");
        let y = map_range(v, (0.0, 40.0), (4.0, 300.0), true).unwrap();
        assert!((4.0..=300.0).contains(&y), "{v} -> {y}");
    }

    assert!(matches!(map_range(1.0, (5.0, 5.0), (0.0, 1.0), false), Err(ChartError::InvalidRange { .. })));
}

#[test]
fn vertical_mapper_is_monotone_and_bounded() {
    let mapper = VerticalMapper::new(123.0, 480.0).unwrap();
    let mut last = f64::INFINITY;
    for i in 0..=123 {
        let y = mapper.convert(i as f64).unwrap();
        assert!(y < last, "pixel y must fall as the value grows");
        assert!((TOP_PADDING..=480.0).contains(&y));
        last = y;
    }
    assert_eq!(mapper.convert(123.0).unwrap(), TOP_PADDING);
    assert_eq!(mapper.convert(0.0).unwrap(), 480.0);
    assert!(VerticalMapper::new(0.0, 480.0).is_err());
}

#[test]
fn monotonic_runs_keep_handles_between_neighbours() {
    let builder = CurveBuilder::new(100.0).unwrap();
    for seed in 0..20 {
        let mut values = increasing(seed, 12);
        if seed % 2 == 1 {
            values.reverse();
        }
        let up = values[1] > values[0];
        let path = builder.build(&values).unwrap();

        for (i, node) in path.nodes.iter().enumerate() {
            let y = node.point.y;
            if let Some(h) = node.handle_in {
                let prev = values[i - 1];
                let (lo, hi) = if prev < y { (prev, y) } else { (y, prev) };
                assert!(lo <= h.y && h.y <= hi, "seed {seed} node {i}: in-handle {} outside [{lo}, {hi}]", h.y);
            }
            if let Some(h) = node.handle_out {
                let next = values[i + 1];
                let (lo, hi) = if next < y { (next, y) } else { (y, next) };
                assert!(lo <= h.y && h.y <= hi, "seed {seed} node {i}: out-handle {} outside [{lo}, {hi}]", h.y);
            }
        }

        let ins: Vec<f64> = path.nodes.iter().filter_map(|n| n.handle_in.map(|p| p.y)).collect();
        let outs: Vec<f64> = path.nodes.iter().filter_map(|n| n.handle_out.map(|p| p.y)).collect();
        for seq in [ins, outs] {
            for pair in seq.windows(2) {
                if up {
                    assert!(pair[0] <= pair[1], "seed {seed}: {pair:?}");
                } else {
                    assert!(pair[0] >= pair[1], "seed {seed}: {pair:?}");
                }
            }
        }
    }
}

#[test]
fn local_extrema_get_flat_handles() {
    let builder = CurveBuilder::new(80.0).unwrap();
    let values = [200.0, 40.0, 260.0, 10.0, 10.0, 150.0, 90.0];
    let path = builder.build(&values).unwrap();
    for i in [1, 2, 3, 4, 5] {
        let node = path.nodes[i];
        assert_eq!(node.handle_in.unwrap().y, values[i], "node {i}");
        assert_eq!(node.handle_out.unwrap().y, values[i], "node {i}");
        assert_eq!(node.handle_in.unwrap().x, node.point.x - 40.0);
        assert_eq!(node.handle_out.unwrap().x, node.point.x + 40.0);
    }
}

#[test]
fn boundary_handles_aim_halfway_to_the_neighbour() {
    let builder = CurveBuilder::new(60.0).unwrap();
    let path = builder.build(&[100.0, 20.0, 60.0]).unwrap();
    let first = path.nodes[0];
    let last = path.nodes[2];
    assert!(first.handle_in.is_none());
    assert_eq!(first.handle_out.unwrap(), Point::new(30.0, 60.0));
    assert!(last.handle_out.is_none());
    assert_eq!(last.handle_in.unwrap(), Point::new(90.0, 40.0));
    assert_eq!(path.content_width(), 120.0);
}

#[test]
fn build_rejects_short_or_non_finite_input() {
    let builder = CurveBuilder::default();
    assert!(matches!(builder.build(&[]), Err(ChartError::InsufficientData { len: 0, .. })));
    assert!(matches!(builder.build(&[3.0]), Err(ChartError::InsufficientData { len: 1, .. })));
    assert!(matches!(builder.build(&[3.0, f64::NAN]), Err(ChartError::InvalidInput(_))));
    assert!(CurveBuilder::new(0.0).is_err());
}
