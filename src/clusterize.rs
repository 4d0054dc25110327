use crate::validate;
use crate::{quantize_snorm, rcp_safe, DecodePosition, Error, Result, VertexDataAdapter};

/// Hard limit on vertices per meshlet; 255 keeps local triangle indices
/// representable in a byte with one value to spare for builder bookkeeping.
pub const MESHLET_MAX_VERTICES: usize = 255;

/// Hard limit on triangles per meshlet.
pub const MESHLET_MAX_TRIANGLES: usize = 512;

/// A cluster of triangles described as ranges into the shared vertex and
/// triangle arrays of [`Meshlets`]. `triangle_offset` is in bytes, three
/// bytes per triangle.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Meshlet {
    pub vertex_offset: u32,
    pub triangle_offset: u32,
    pub vertex_count: u32,
    pub triangle_count: u32,
}

/// Borrowed view of one meshlet: `vertices` holds original vertex indices,
/// `triangles` holds per-corner indices into `vertices`.
#[derive(Copy, Clone)]
pub struct MeshletRef<'data> {
    pub vertices: &'data [u32],
    pub triangles: &'data [u8],
}

pub struct Meshlets {
    pub meshlets: Vec<Meshlet>,
    pub vertices: Vec<u32>,
    pub triangles: Vec<u8>,
}

impl Meshlets {
    #[inline]
    pub fn len(&self) -> usize {
        self.meshlets.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.meshlets.is_empty()
    }

    fn meshlet_view(&self, meshlet: &Meshlet) -> MeshletRef<'_> {
        MeshletRef {
            vertices: &self.vertices[meshlet.vertex_offset as usize
                ..meshlet.vertex_offset as usize + meshlet.vertex_count as usize],
            triangles: &self.triangles[meshlet.triangle_offset as usize
                ..meshlet.triangle_offset as usize + meshlet.triangle_count as usize * 3],
        }
    }

    #[inline]
    pub fn get(&self, idx: usize) -> MeshletRef<'_> {
        self.meshlet_view(&self.meshlets[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = MeshletRef<'_>> {
        self.meshlets
            .iter()
            .map(|meshlet| self.meshlet_view(meshlet))
    }
}

/// Culling data for one cluster.
///
/// `cone_axis` is the normalized average of the cluster's triangle normals
/// and `cone_cutoff` is the cosine of the largest angle between the axis and
/// any individual normal. A cluster is back-facing for a view direction
/// `view` (unit vector from camera towards the cluster, for example
/// `normalize(cone_apex - camera_position)`) when:
///
///   `dot(view, cone_axis) > sqrt(1 - cone_cutoff * cone_cutoff)` with `cone_cutoff > 0`
///
/// `cone_cutoff == -1` marks a cone that covers every direction and can
/// never be used to reject the cluster. The `_s8` fields are the axis and
/// cutoff quantized to signed 8-bit fixed point for compact GPU storage.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds {
    pub center: [f32; 3],
    pub radius: f32,
    pub cone_apex: [f32; 3],
    pub cone_axis: [f32; 3],
    pub cone_cutoff: f32,
    pub cone_axis_s8: [i8; 3],
    pub cone_cutoff_s8: i8,
}

/// Computes a worst-case meshlet count for the given limits, suitable for
/// pre-sizing destination arrays before running either builder.
///
/// Worst case every triangle introduces 3 previously unseen vertices, so a
/// cluster can hold at most `max_vertices / 3` triangles even when
/// `max_triangles` allows more. Both builders close a cluster only when the
/// next triangle does not fit, so they never produce more meshlets than
/// this bound for the same parameters.
pub fn build_meshlets_bound(
    index_count: usize,
    max_vertices: usize,
    max_triangles: usize,
) -> Result<usize> {
    validate::index_count(index_count)?;
    validate::cluster_limits(max_vertices, max_triangles)?;

    let triangle_count = index_count / 3;
    let limit = max_triangles.min(max_vertices / 3);
    Ok((triangle_count + limit - 1) / limit)
}

#[inline]
fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn length(a: [f32; 3]) -> f32 {
    dot(a, a).sqrt()
}

#[inline]
fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    length(sub(a, b))
}

#[inline]
fn normalize(a: [f32; 3]) -> [f32; 3] {
    let s = rcp_safe(length(a));
    [a[0] * s, a[1] * s, a[2] * s]
}

/// Unit normal and area; degenerate triangles yield a zero normal and zero
/// area.
fn triangle_normal_area(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> ([f32; 3], f32) {
    let normal = cross(sub(p1, p0), sub(p2, p0));
    let twice_area = length(normal);
    if twice_area == 0f32 {
        ([0f32; 3], 0f32)
    } else {
        let s = 1f32 / twice_area;
        (
            [normal[0] * s, normal[1] * s, normal[2] * s],
            twice_area * 0.5,
        )
    }
}

#[inline]
fn triangle_centroid(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3]) -> [f32; 3] {
    [
        (p0[0] + p1[0] + p2[0]) / 3f32,
        (p0[1] + p1[1] + p2[1]) / 3f32,
        (p0[2] + p1[2] + p2[2]) / 3f32,
    ]
}

#[inline]
fn triangle(indices: &[u32], t: usize) -> [u32; 3] {
    [indices[t * 3], indices[t * 3 + 1], indices[t * 3 + 2]]
}

/// Per-vertex lists of incident triangles, laid out as one flat array with
/// per-vertex offsets.
struct TriangleAdjacency {
    offsets: Vec<u32>,
    data: Vec<u32>,
}

impl TriangleAdjacency {
    fn new(indices: &[u32], vertex_count: usize) -> Self {
        let mut offsets = vec![0u32; vertex_count + 1];
        for &index in indices {
            offsets[index as usize + 1] += 1;
        }
        for v in 0..vertex_count {
            offsets[v + 1] += offsets[v];
        }

        let mut data = vec![0u32; indices.len()];
        let mut cursor: Vec<u32> = offsets[..vertex_count].to_vec();
        for (t, tri) in indices.chunks_exact(3).enumerate() {
            for &corner in tri {
                data[cursor[corner as usize] as usize] = t as u32;
                cursor[corner as usize] += 1;
            }
        }

        TriangleAdjacency { offsets, data }
    }

    #[inline]
    fn triangles(&self, vertex: u32) -> &[u32] {
        let begin = self.offsets[vertex as usize] as usize;
        let end = self.offsets[vertex as usize + 1] as usize;
        &self.data[begin..end]
    }

    /// Incident-triangle count per vertex; the builder decrements these as
    /// triangles are visited to track how "live" each vertex still is.
    fn live_counts(&self) -> Vec<u32> {
        self.offsets.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum TriangleState {
    Unvisited,
    Visited,
}

/// Writes clusters into pre-sized flat output arrays, tracking the open
/// cluster's local vertex slots. `used` maps original vertex index to its
/// slot in the open cluster; slots are assigned in first-encounter order.
struct ClusterWriter {
    output: Meshlets,
    current: Meshlet,
    used: Vec<Option<u8>>,
    max_vertices: u32,
    max_triangles: u32,
    meshlet_capacity: usize,
}

impl ClusterWriter {
    fn new(
        meshlet_capacity: usize,
        max_vertices: usize,
        max_triangles: usize,
        vertex_count: usize,
    ) -> Self {
        ClusterWriter {
            output: Meshlets {
                meshlets: Vec::with_capacity(meshlet_capacity),
                vertices: vec![0u32; meshlet_capacity * max_vertices],
                triangles: vec![0u8; meshlet_capacity * max_triangles * 3],
            },
            current: Meshlet::default(),
            used: vec![None; vertex_count],
            max_vertices: max_vertices as u32,
            max_triangles: max_triangles as u32,
            meshlet_capacity,
        }
    }

    /// Number of corners that do not have a local slot yet; repeated corners
    /// of a degenerate triangle are counted once.
    #[inline]
    fn extra_vertices(&self, tri: [u32; 3]) -> u32 {
        let mut extra = 0;
        for (i, &corner) in tri.iter().enumerate() {
            if self.used[corner as usize].is_none() && !tri[..i].contains(&corner) {
                extra += 1;
            }
        }
        extra
    }

    #[inline]
    fn fits(&self, extra: u32) -> bool {
        self.current.vertex_count + extra <= self.max_vertices
            && self.current.triangle_count < self.max_triangles
    }

    fn push_triangle(&mut self, tri: [u32; 3]) {
        debug_assert!(self.fits(self.extra_vertices(tri)));

        let triangle_base =
            self.current.triangle_offset as usize + self.current.triangle_count as usize * 3;
        for (i, &corner) in tri.iter().enumerate() {
            let slot = match self.used[corner as usize] {
                Some(slot) => slot,
                None => {
                    let slot = self.current.vertex_count as u8;
                    self.used[corner as usize] = Some(slot);
                    self.output.vertices[self.current.vertex_offset as usize
                        + self.current.vertex_count as usize] = corner;
                    self.current.vertex_count += 1;
                    slot
                }
            };
            self.output.triangles[triangle_base + i] = slot;
        }
        self.current.triangle_count += 1;
    }

    /// Finalizes the open cluster, if any, and clears its local slots.
    fn flush(&mut self) -> Result<()> {
        if self.current.triangle_count == 0 {
            return Ok(());
        }
        if self.output.meshlets.len() == self.meshlet_capacity {
            return Err(Error::capacity(
                "meshlet destination arrays are full; bound was under-sized for the input",
            ));
        }

        let begin = self.current.vertex_offset as usize;
        let end = begin + self.current.vertex_count as usize;
        for &vertex in &self.output.vertices[begin..end] {
            self.used[vertex as usize] = None;
        }

        let next = Meshlet {
            vertex_offset: self.current.vertex_offset + self.current.vertex_count,
            triangle_offset: self.current.triangle_offset + self.current.triangle_count * 3,
            vertex_count: 0,
            triangle_count: 0,
        };
        self.output.meshlets.push(self.current);
        self.current = next;
        Ok(())
    }

    fn finish(mut self) -> Result<Meshlets> {
        self.flush()?;
        match self.output.meshlets.last() {
            Some(last) => {
                let vertex_end = last.vertex_offset as usize + last.vertex_count as usize;
                let triangle_end =
                    last.triangle_offset as usize + last.triangle_count as usize * 3;
                self.output.vertices.truncate(vertex_end);
                self.output.triangles.truncate(triangle_end);
            }
            None => {
                self.output.vertices.clear();
                self.output.triangles.clear();
            }
        }
        Ok(self.output)
    }

    /// Original vertex indices of the open cluster; empty when none is open.
    #[inline]
    fn open_vertices(&self) -> &[u32] {
        let begin = self.current.vertex_offset as usize;
        &self.output.vertices[begin..begin + self.current.vertex_count as usize]
    }

    /// Vertices of the open cluster, or of the last finalized one when
    /// nothing is open; keeps seed selection local to recent growth.
    fn recent_vertices(&self) -> &[u32] {
        if self.current.triangle_count > 0 {
            self.open_vertices()
        } else if let Some(last) = self.output.meshlets.last() {
            let begin = last.vertex_offset as usize;
            &self.output.vertices[begin..begin + last.vertex_count as usize]
        } else {
            &[]
        }
    }
}

/// Running spatial summary of the open cluster, used to score candidate
/// growth: the accumulated normal direction and an approximate bounding
/// sphere over triangle centroids.
#[derive(Default)]
struct ClusterMetrics {
    normal_sum: [f32; 3],
    centroid_sum: [f32; 3],
    center: [f32; 3],
    radius: f32,
    triangle_count: u32,
}

impl ClusterMetrics {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn admit(&mut self, centroid: [f32; 3], normal: [f32; 3]) {
        for k in 0..3 {
            self.normal_sum[k] += normal[k];
            self.centroid_sum[k] += centroid[k];
        }
        self.triangle_count += 1;
        let scale = 1f32 / self.triangle_count as f32;
        for k in 0..3 {
            self.center[k] = self.centroid_sum[k] * scale;
        }
        let d = distance(centroid, self.center);
        if d > self.radius {
            self.radius = d;
        }
    }

    /// How much admitting a triangle would widen the cluster: angular spread
    /// added to the running normal cone plus bounding growth relative to the
    /// overall mesh extent.
    fn expansion_cost(&self, centroid: [f32; 3], normal: [f32; 3], inv_mesh_scale: f32) -> f32 {
        if self.triangle_count == 0 {
            return 0f32;
        }
        let axis = normalize(self.normal_sum);
        let spread = 1f32 - dot(normal, axis);
        let growth = (distance(centroid, self.center) - self.radius).max(0f32);
        spread + growth * inv_mesh_scale
    }
}

/// Next seed triangle: prefer unvisited triangles touching the most recent
/// cluster, scored by the remaining incident-triangle counts of their
/// corners (low first, so clusters finish off sparse neighborhoods before
/// wandering). Ties and the fallback both resolve to the lowest original
/// triangle index.
fn pick_seed(
    recent: &[u32],
    adjacency: &TriangleAdjacency,
    state: &[TriangleState],
    live_triangles: &[u32],
    indices: &[u32],
    cursor: &mut usize,
) -> usize {
    let mut best: Option<usize> = None;
    let mut best_score = u32::MAX;
    for &vertex in recent {
        for &t in adjacency.triangles(vertex) {
            let t = t as usize;
            if state[t] == TriangleState::Visited {
                continue;
            }
            let tri = triangle(indices, t);
            let score = tri
                .iter()
                .map(|&corner| live_triangles[corner as usize])
                .sum();
            if score < best_score || (score == best_score && best.map_or(true, |b| t < b)) {
                best = Some(t);
                best_score = score;
            }
        }
    }
    if let Some(t) = best {
        return t;
    }

    while state[*cursor] == TriangleState::Visited {
        *cursor += 1;
    }
    *cursor
}

/// Splits the mesh into a set of meshlets where each meshlet has a micro
/// index buffer indexing into meshlet vertices that refer to the original
/// vertex buffer.
///
/// The resulting data can be used to render meshes using mesh shading
/// pipelines or in other cluster-based renderers. Clusters are grown
/// greedily over the triangle adjacency, preferring candidates that reuse
/// vertices already in the cluster; `cone_weight` between 0 and 1 adds a
/// bias towards tight normal cones and small bounding spheres at the cost
/// of looser vertex reuse (0 ignores spatial compactness entirely).
///
/// Growth is deterministic: cost ties resolve to the lowest original
/// triangle index. Every input triangle lands in exactly one meshlet and
/// the meshlet count never exceeds [`build_meshlets_bound`] for the same
/// parameters.
pub fn build_meshlets(
    indices: &[u32],
    vertices: &VertexDataAdapter<'_>,
    max_vertices: usize,
    max_triangles: usize,
    cone_weight: f32,
) -> Result<Meshlets> {
    validate::index_count(indices.len())?;
    validate::vertex_count(vertices.vertex_count)?;
    validate::cluster_limits(max_vertices, max_triangles)?;
    validate::cone_weight(cone_weight)?;
    validate::vertex_indices(indices, vertices.vertex_count)?;

    let triangle_count = indices.len() / 3;
    let meshlet_bound = build_meshlets_bound(indices.len(), max_vertices, max_triangles)?;

    let mut normals = vec![[0f32; 3]; triangle_count];
    let mut centroids = vec![[0f32; 3]; triangle_count];
    let mut mesh_min = [f32::MAX; 3];
    let mut mesh_max = [f32::MIN; 3];
    for (t, tri) in indices.chunks_exact(3).enumerate() {
        let p0 = vertices.position(tri[0] as usize);
        let p1 = vertices.position(tri[1] as usize);
        let p2 = vertices.position(tri[2] as usize);
        (normals[t], _) = triangle_normal_area(p0, p1, p2);
        centroids[t] = triangle_centroid(p0, p1, p2);
        for p in [p0, p1, p2] {
            for k in 0..3 {
                mesh_min[k] = mesh_min[k].min(p[k]);
                mesh_max[k] = mesh_max[k].max(p[k]);
            }
        }
    }
    let inv_mesh_scale = rcp_safe(distance(mesh_max, mesh_min) * 0.5);

    let adjacency = TriangleAdjacency::new(indices, vertices.vertex_count);
    let mut live_triangles = adjacency.live_counts();
    let mut state = vec![TriangleState::Unvisited; triangle_count];

    let mut writer = ClusterWriter::new(
        meshlet_bound,
        max_vertices,
        max_triangles,
        vertices.vertex_count,
    );
    let mut metrics = ClusterMetrics::default();
    let mut seed_cursor = 0usize;

    for _ in 0..triangle_count {
        // best admissible unvisited triangle touching the open cluster
        let candidate = {
            let mut best: Option<usize> = None;
            let mut best_cost = f32::INFINITY;
            for &vertex in writer.open_vertices() {
                for &t in adjacency.triangles(vertex) {
                    let t = t as usize;
                    if state[t] == TriangleState::Visited {
                        continue;
                    }
                    let tri = triangle(indices, t);
                    let extra = writer.extra_vertices(tri);
                    if !writer.fits(extra) {
                        continue;
                    }
                    let mut cost = extra as f32;
                    if cone_weight > 0f32 {
                        cost += cone_weight
                            * metrics.expansion_cost(centroids[t], normals[t], inv_mesh_scale);
                    }
                    if cost < best_cost || (cost == best_cost && best.map_or(true, |b| t < b)) {
                        best = Some(t);
                        best_cost = cost;
                    }
                }
            }
            best
        };

        // no admissible neighbor: reseed, closing the cluster only when the
        // seed itself does not fit
        let next = match candidate {
            Some(t) => t,
            None => {
                let seed = pick_seed(
                    writer.recent_vertices(),
                    &adjacency,
                    &state,
                    &live_triangles,
                    indices,
                    &mut seed_cursor,
                );
                if !writer.fits(writer.extra_vertices(triangle(indices, seed))) {
                    writer.flush()?;
                    metrics.reset();
                }
                seed
            }
        };

        let tri = triangle(indices, next);
        writer.push_triangle(tri);
        state[next] = TriangleState::Visited;
        for &corner in &tri {
            live_triangles[corner as usize] -= 1;
        }
        metrics.admit(centroids[next], normals[next]);
    }

    writer.finish()
}

/// Meshlet builder that scans triangles in input order, without positions
/// or cone weighting. Intended for index buffers already ordered for
/// locality by an upstream vertex cache optimizer; one pass, O(n), lower
/// cluster quality than [`build_meshlets`].
pub fn build_meshlets_scan(
    indices: &[u32],
    vertex_count: usize,
    max_vertices: usize,
    max_triangles: usize,
) -> Result<Meshlets> {
    validate::index_count(indices.len())?;
    validate::vertex_count(vertex_count)?;
    validate::cluster_limits(max_vertices, max_triangles)?;
    validate::vertex_indices(indices, vertex_count)?;

    let meshlet_bound = build_meshlets_bound(indices.len(), max_vertices, max_triangles)?;
    let mut writer = ClusterWriter::new(meshlet_bound, max_vertices, max_triangles, vertex_count);

    for tri in indices.chunks_exact(3) {
        let tri = [tri[0], tri[1], tri[2]];
        if !writer.fits(writer.extra_vertices(tri)) {
            writer.flush()?;
        }
        writer.push_triangle(tri);
    }

    writer.finish()
}

/// Approximate minimal enclosing sphere: the most distant pair among the
/// per-axis extremum points seeds the sphere, which then grows to enclose
/// stragglers.
fn bounding_sphere(points: &[[f32; 3]]) -> ([f32; 3], f32) {
    debug_assert!(!points.is_empty());

    let mut pmin = [0usize; 3];
    let mut pmax = [0usize; 3];
    for (i, p) in points.iter().enumerate() {
        for k in 0..3 {
            if p[k] < points[pmin[k]][k] {
                pmin[k] = i;
            }
            if p[k] > points[pmax[k]][k] {
                pmax[k] = i;
            }
        }
    }

    let mut axis = 0;
    let mut extent = 0f32;
    for k in 0..3 {
        let d = distance(points[pmax[k]], points[pmin[k]]);
        if d > extent {
            extent = d;
            axis = k;
        }
    }

    let p0 = points[pmin[axis]];
    let p1 = points[pmax[axis]];
    let mut center = [
        (p0[0] + p1[0]) * 0.5,
        (p0[1] + p1[1]) * 0.5,
        (p0[2] + p1[2]) * 0.5,
    ];
    let mut radius = extent * 0.5;

    for p in points {
        let d = distance(*p, center);
        if d > radius {
            let k = 0.5 + (radius / d) * 0.5;
            for j in 0..3 {
                center[j] = center[j] * k + p[j] * (1f32 - k);
            }
            radius = (radius + d) * 0.5;
        }
    }

    (center, radius)
}

fn cluster_bounds<F: Fn(usize) -> [f32; 3]>(indices: &[u32], position: F) -> Bounds {
    let mut corners: Vec<[f32; 3]> = Vec::with_capacity(indices.len());
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(indices.len() / 3);
    let mut axis_sum = [0f32; 3];

    for tri in indices.chunks_exact(3) {
        let p0 = position(tri[0] as usize);
        let p1 = position(tri[1] as usize);
        let p2 = position(tri[2] as usize);
        let (normal, area) = triangle_normal_area(p0, p1, p2);
        // degenerate triangles would poison the normal average
        if area <= 0f32 {
            continue;
        }
        corners.extend_from_slice(&[p0, p1, p2]);
        normals.push(normal);
        for k in 0..3 {
            axis_sum[k] += normal[k] * area;
        }
    }

    if normals.is_empty() {
        // no facing information at all; report a cone that never rejects
        return Bounds {
            cone_cutoff: -1f32,
            cone_cutoff_s8: quantize_snorm(-1f32, 8) as i8,
            ..Default::default()
        };
    }

    let (center, radius) = bounding_sphere(&corners);

    let axis = normalize(axis_sum);
    if length(axis) == 0f32 {
        // normals cancel out (e.g. a closed surface); the cone covers every
        // direction
        return Bounds {
            center,
            radius,
            cone_apex: center,
            cone_cutoff: -1f32,
            cone_cutoff_s8: quantize_snorm(-1f32, 8) as i8,
            ..Default::default()
        };
    }

    let mut min_dot = 1f32;
    for normal in &normals {
        let d = dot(*normal, axis);
        if d < min_dot {
            min_dot = d;
        }
    }
    let cutoff = min_dot.clamp(-1f32, 1f32);

    // place the apex behind the sphere along the negative axis so the whole
    // sphere sits inside the cone of half-angle acos(cutoff): d = r / sin
    let sin = (1f32 - cutoff * cutoff).max(0f32).sqrt();
    let apex_distance = if cutoff > 0f32 {
        radius / sin.max(1e-2)
    } else {
        0f32
    };
    let cone_apex = [
        center[0] - axis[0] * apex_distance,
        center[1] - axis[1] * apex_distance,
        center[2] - axis[2] * apex_distance,
    ];

    Bounds {
        center,
        radius,
        cone_apex,
        cone_axis: axis,
        cone_cutoff: cutoff,
        cone_axis_s8: [
            quantize_snorm(axis[0], 8) as i8,
            quantize_snorm(axis[1], 8) as i8,
            quantize_snorm(axis[2], 8) as i8,
        ],
        cone_cutoff_s8: quantize_snorm(cutoff, 8) as i8,
    }
}

/// Creates bounding volumes for a cluster of triangles that can be used for
/// frustum, backface and occlusion culling; see [`Bounds`] for the culling
/// formula.
///
/// `indices.len() / 3` must be at most 512 (the function assumes clusters
/// of limited size). Clusters made entirely of degenerate triangles yield a
/// cone with `cone_cutoff == -1` that never rejects.
pub fn compute_cluster_bounds(
    indices: &[u32],
    vertices: &VertexDataAdapter<'_>,
) -> Result<Bounds> {
    validate::index_multiple_of_three(indices.len())?;
    validate::cluster_size(indices.len() / 3)?;
    validate::vertex_indices(indices, vertices.vertex_count)?;

    Ok(cluster_bounds(indices, |i| vertices.position(i)))
}

/// [`compute_cluster_bounds`] over vertices that implement
/// [`DecodePosition`] instead of a strided byte buffer.
pub fn compute_cluster_bounds_decoder<T: DecodePosition>(
    indices: &[u32],
    vertices: &[T],
) -> Result<Bounds> {
    validate::index_multiple_of_three(indices.len())?;
    validate::cluster_size(indices.len() / 3)?;
    validate::vertex_indices(indices, vertices.len())?;

    Ok(cluster_bounds(indices, |i| vertices[i].decode_position()))
}

/// Expands a meshlet's two-level indexing (local triangle corner ->
/// meshlet vertex slot -> original vertex) into a flat index list.
fn meshlet_global_indices(meshlet: MeshletRef<'_>) -> Result<Vec<u32>> {
    let mut indices = Vec::with_capacity(meshlet.triangles.len());
    for &local in meshlet.triangles {
        let local = local as usize;
        if local >= meshlet.vertices.len() {
            return Err(Error::invalid_parameter(
                "meshlet triangle index must be less than the meshlet vertex count",
            ));
        }
        indices.push(meshlet.vertices[local]);
    }
    Ok(indices)
}

/// Creates bounding volumes for one meshlet; see [`compute_cluster_bounds`].
pub fn compute_meshlet_bounds(
    meshlet: MeshletRef<'_>,
    vertices: &VertexDataAdapter<'_>,
) -> Result<Bounds> {
    let indices = meshlet_global_indices(meshlet)?;
    compute_cluster_bounds(&indices, vertices)
}

/// [`compute_meshlet_bounds`] over vertices that implement
/// [`DecodePosition`].
pub fn compute_meshlet_bounds_decoder<T: DecodePosition>(
    meshlet: MeshletRef<'_>,
    vertices: &[T],
) -> Result<Bounds> {
    let indices = meshlet_global_indices(meshlet)?;
    compute_cluster_bounds_decoder(&indices, vertices)
}
