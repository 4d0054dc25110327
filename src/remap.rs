use crate::validate;
use crate::{any_as_u8_slice, Error, Result};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Remap table entry for vertices that are never referenced by the index
/// buffer; such vertices have no canonical slot and are dropped by
/// [`remap_vertex_buffer`].
pub const UNUSED_VERTEX: u32 = u32::MAX;

/// Generates a remap table that collapses byte-identical vertex records to
/// a single canonical index, for compacting vertex streams before indexed
/// rendering or further processing.
///
/// Equality is exact byte comparison over the whole record, not just
/// positions, so `T` should be a `#[repr(C)]` type without padding.
/// Canonical indices are dense in `[0, unique_count)` and are assigned in
/// the order vertices are first referenced while scanning `indices`, which
/// preserves traversal locality of a reasonably ordered index buffer.
/// Vertices the index buffer never touches map to [`UNUSED_VERTEX`].
///
/// Passing `indices: None` treats the vertex buffer as an unindexed
/// triangle stream and scans it in storage order.
///
/// Returns the unique vertex count and the remap table, which can be used
/// with [`remap_vertex_buffer`] and [`remap_index_buffer`].
pub fn generate_vertex_remap<T>(
    vertices: &[T],
    indices: Option<&[u32]>,
) -> Result<(usize, Vec<u32>)> {
    validate::vertex_count(vertices.len())?;
    if let Some(indices) = indices {
        validate::index_multiple_of_three(indices.len())?;
        validate::vertex_indices(indices, vertices.len())?;
    }

    let mut remap = vec![UNUSED_VERTEX; vertices.len()];
    let mut table: HashMap<&[u8], u32> = HashMap::with_capacity(vertices.len());
    let mut unique = 0u32;

    let index_count = indices.map_or(vertices.len(), <[u32]>::len);
    for i in 0..index_count {
        let index = indices.map_or(i, |indices| indices[i] as usize);
        if remap[index] != UNUSED_VERTEX {
            continue;
        }
        remap[index] = match table.entry(any_as_u8_slice(&vertices[index])) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let canonical = unique;
                unique += 1;
                *entry.insert(canonical)
            }
        };
    }

    Ok((unique as usize, remap))
}

/// Rewrites the vertex buffer into `unique_vertex_count` canonical slots
/// according to `remap`, dropping unreferenced vertices. When several
/// originals collapse to one slot their contents are byte-identical by the
/// [`generate_vertex_remap`] contract, so the result does not depend on
/// which one survives; the write order is ascending original index either
/// way, keeping the operation reproducible.
pub fn remap_vertex_buffer<T: Clone + Default>(
    vertices: &[T],
    unique_vertex_count: usize,
    remap: &[u32],
) -> Result<Vec<T>> {
    if remap.len() != vertices.len() {
        return Err(Error::invalid_parameter_dynamic(format!(
            "remap length ({}) must equal vertex count ({})",
            remap.len(),
            vertices.len()
        )));
    }

    let mut result = vec![T::default(); unique_vertex_count];
    for (vertex, &canonical) in vertices.iter().zip(remap) {
        if canonical == UNUSED_VERTEX {
            continue;
        }
        if canonical as usize >= unique_vertex_count {
            return Err(Error::invalid_parameter_dynamic(format!(
                "remap entry ({}) must be less than unique_vertex_count ({})",
                canonical, unique_vertex_count
            )));
        }
        result[canonical as usize] = vertex.clone();
    }
    Ok(result)
}

/// Rewrites an index buffer through `remap`, preserving triangle order and
/// winding. Passing `indices: None` remaps the identity index stream
/// `0..vertex_count`. Every referenced entry must have a canonical slot
/// (not [`UNUSED_VERTEX`]), which always holds for a remap generated from
/// the same index buffer.
pub fn remap_index_buffer(
    indices: Option<&[u32]>,
    vertex_count: usize,
    remap: &[u32],
) -> Result<Vec<u32>> {
    if let Some(indices) = indices {
        validate::index_multiple_of_three(indices.len())?;
        validate::vertex_indices(indices, remap.len())?;
    } else if vertex_count > remap.len() {
        return Err(Error::invalid_parameter_dynamic(format!(
            "vertex_count ({}) must not exceed remap length ({})",
            vertex_count,
            remap.len()
        )));
    }

    let index_count = indices.map_or(vertex_count, <[u32]>::len);
    let mut result = Vec::with_capacity(index_count);
    for i in 0..index_count {
        let index = indices.map_or(i, |indices| indices[i] as usize);
        let canonical = remap[index];
        if canonical == UNUSED_VERTEX {
            return Err(Error::invalid_parameter(
                "index references a vertex without a canonical slot in the remap table",
            ));
        }
        result.push(canonical);
    }
    Ok(result)
}
