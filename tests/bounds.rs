use float_cmp::ApproxEqUlps;
use meshlet::*;

fn adapter(positions: &[[f32; 3]]) -> VertexDataAdapter<'_> {
    VertexDataAdapter::new(typed_to_bytes(positions), 12, 0).unwrap()
}

fn length(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

fn assert_sane(bounds: &Bounds) {
    assert!(bounds.radius >= 0f32);
    assert!((-1f32..=1f32).contains(&bounds.cone_cutoff));
    let axis_length = length(bounds.cone_axis);
    assert!(axis_length == 0f32 || axis_length.approx_eq_ulps(&1f32, 4));
    for (&axis, &axis_s8) in bounds.cone_axis.iter().zip(&bounds.cone_axis_s8) {
        assert_eq!(quantize_snorm(axis, 8) as i8, axis_s8);
    }
    assert_eq!(quantize_snorm(bounds.cone_cutoff, 8) as i8, bounds.cone_cutoff_s8);
}

#[test]
fn flat_patch_has_tight_cone() {
    let positions = vec![
        [0f32, 0f32, 0f32],
        [1f32, 0f32, 0f32],
        [1f32, 1f32, 0f32],
        [0f32, 1f32, 0f32],
    ];
    let indices = [0u32, 1, 2, 0, 2, 3];
    let bounds = compute_cluster_bounds(&indices, &adapter(&positions)).unwrap();

    assert_sane(&bounds);
    assert!(bounds.cone_axis[2].approx_eq_ulps(&1f32, 4));
    assert!(bounds.cone_cutoff.approx_eq_ulps(&1f32, 4));
    assert_eq!(bounds.cone_cutoff_s8, 127);

    // every vertex inside the sphere
    for p in &positions {
        let d = length([
            p[0] - bounds.center[0],
            p[1] - bounds.center[1],
            p[2] - bounds.center[2],
        ]);
        assert!(d <= bounds.radius + 1e-4);
    }

    // apex sits behind the patch along the negative axis
    assert!(bounds.cone_apex[2] < bounds.center[2]);
    assert!(bounds.cone_apex[0].approx_eq_ulps(&bounds.center[0], 4));
}

#[test]
fn bent_patch_widens_cone() {
    // two triangles meeting at 90 degrees along the y axis
    let positions = vec![
        [0f32, 0f32, 0f32],
        [0f32, 1f32, 0f32],
        [-1f32, 0f32, 0f32],
        [0f32, 0f32, -1f32],
    ];
    let indices = [0u32, 1, 2, 0, 3, 1];
    let bounds = compute_cluster_bounds(&indices, &adapter(&positions)).unwrap();

    assert_sane(&bounds);
    // normals are (0,0,1) and (1,0,0); the axis splits the angle and each
    // normal deviates by 45 degrees
    let expected = (0.5f32).sqrt();
    assert!((bounds.cone_cutoff - expected).abs() < 1e-4);
}

#[test]
fn closed_surface_cannot_cull() {
    // cube face normals cancel out; no direction sees only back faces
    let positions = vec![
        [-1f32, -1f32, -1f32],
        [1f32, -1f32, -1f32],
        [1f32, 1f32, -1f32],
        [-1f32, 1f32, -1f32],
        [-1f32, -1f32, 1f32],
        [1f32, -1f32, 1f32],
        [1f32, 1f32, 1f32],
        [-1f32, 1f32, 1f32],
    ];
    let indices = [
        0u32, 2, 1, 0, 3, 2, 4, 5, 6, 4, 6, 7, 0, 4, 7, 0, 7, 3, 1, 2, 6, 1, 6, 5, 0, 1, 5, 0, 5,
        4, 3, 7, 6, 3, 6, 2,
    ];
    let bounds = compute_cluster_bounds(&indices, &adapter(&positions)).unwrap();

    assert_sane(&bounds);
    assert_eq!(bounds.cone_cutoff, -1f32);
    assert!(bounds.radius >= (3f32).sqrt() - 1e-4);
}

#[test]
fn degenerate_cluster_cannot_cull() {
    let positions = vec![[0f32, 0f32, 0f32], [1f32, 1f32, 1f32]];
    // zero-area triangles only
    let indices = [0u32, 0, 1, 1, 1, 0];
    let bounds = compute_cluster_bounds(&indices, &adapter(&positions)).unwrap();

    assert_eq!(bounds.cone_cutoff, -1f32);
    assert_eq!(bounds.radius, 0f32);

    let bounds = compute_cluster_bounds(&[], &adapter(&positions)).unwrap();
    assert_eq!(bounds.cone_cutoff, -1f32);
}

#[test]
fn meshlet_bounds_contain_their_triangles() {
    let mut positions = Vec::new();
    let n = 12u32;
    for y in 0..=n {
        for x in 0..=n {
            // gentle height field so normals vary
            positions.push([x as f32, y as f32, ((x + y) as f32 * 0.4).sin()]);
        }
    }
    let mut indices = Vec::new();
    for y in 0..n {
        for x in 0..n {
            let v = y * (n + 1) + x;
            indices.extend_from_slice(&[v, v + 1, v + n + 2]);
            indices.extend_from_slice(&[v, v + n + 2, v + n + 1]);
        }
    }
    let vertices = adapter(&positions);

    let meshlets = build_meshlets(&indices, &vertices, 32, 24, 0.5).unwrap();
    assert!(!meshlets.is_empty());

    for meshlet in meshlets.iter() {
        let bounds = compute_meshlet_bounds(meshlet, &vertices).unwrap();
        assert_sane(&bounds);
        assert!(bounds.cone_cutoff > -1f32);

        for tri in meshlet.triangles.chunks_exact(3) {
            let mut centroid = [0f32; 3];
            for &local in tri {
                let p = positions[meshlet.vertices[local as usize] as usize];
                for k in 0..3 {
                    centroid[k] += p[k] / 3f32;
                }
            }
            let d = length([
                centroid[0] - bounds.center[0],
                centroid[1] - bounds.center[1],
                centroid[2] - bounds.center[2],
            ]);
            assert!(d <= bounds.radius + 1e-4);
        }
    }
}

#[test]
fn decoder_variant_matches_adapter() {
    let positions = vec![
        [0f32, 0f32, 0f32],
        [2f32, 0f32, 1f32],
        [1f32, 2f32, 0f32],
        [0f32, 1f32, 3f32],
    ];
    let indices = [0u32, 1, 2, 1, 3, 2];

    let from_adapter = compute_cluster_bounds(&indices, &adapter(&positions)).unwrap();
    let from_decoder = compute_cluster_bounds_decoder(&indices, &positions).unwrap();
    assert_eq!(from_adapter, from_decoder);
}

#[test]
fn bounds_reject_bad_parameters() {
    let positions = vec![[0f32; 3]; 4];
    let vertices = adapter(&positions);

    assert!(compute_cluster_bounds(&[0, 1], &vertices).is_err());
    assert!(compute_cluster_bounds(&[0, 1, 9], &vertices).is_err());
    let oversized: Vec<u32> = (0..(MESHLET_MAX_TRIANGLES as u32 + 1) * 3).map(|i| i % 3).collect();
    assert!(compute_cluster_bounds(&oversized, &vertices).is_err());
}
