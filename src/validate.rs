//! Shared precondition checks, run by every entry point before any buffer
//! access. A failed check never leaves partial output behind.

use crate::{Error, Result, MESHLET_MAX_TRIANGLES, MESHLET_MAX_VERTICES};

pub(crate) fn index_count(index_count: usize) -> Result<()> {
    if index_count == 0 || index_count % 3 != 0 {
        return Err(Error::invalid_parameter_dynamic(format!(
            "index_count ({}) must be a positive multiple of 3",
            index_count
        )));
    }
    Ok(())
}

/// Like [`index_count`] but tolerates an empty cluster, which the bounds
/// calculator resolves to a degenerate cone instead of an error.
pub(crate) fn index_multiple_of_three(index_count: usize) -> Result<()> {
    if index_count % 3 != 0 {
        return Err(Error::invalid_parameter_dynamic(format!(
            "index_count ({}) must be a multiple of 3",
            index_count
        )));
    }
    Ok(())
}

pub(crate) fn vertex_count(vertex_count: usize) -> Result<()> {
    if vertex_count == 0 {
        return Err(Error::invalid_parameter(
            "vertex_count must be greater than zero",
        ));
    }
    Ok(())
}

/// Every index must address a vertex inside the buffer.
pub(crate) fn vertex_indices(indices: &[u32], vertex_count: usize) -> Result<()> {
    for &index in indices {
        if index as usize >= vertex_count {
            return Err(Error::invalid_parameter_dynamic(format!(
                "index value ({}) must be less than vertex_count ({})",
                index, vertex_count
            )));
        }
    }
    Ok(())
}

pub(crate) fn cluster_limits(max_vertices: usize, max_triangles: usize) -> Result<()> {
    if !(3..=MESHLET_MAX_VERTICES).contains(&max_vertices) {
        return Err(Error::invalid_parameter_dynamic(format!(
            "max_vertices ({}) must be between 3 and {}",
            max_vertices, MESHLET_MAX_VERTICES
        )));
    }
    if !(1..=MESHLET_MAX_TRIANGLES).contains(&max_triangles) {
        return Err(Error::invalid_parameter_dynamic(format!(
            "max_triangles ({}) must be between 1 and {}",
            max_triangles, MESHLET_MAX_TRIANGLES
        )));
    }
    Ok(())
}

pub(crate) fn cone_weight(cone_weight: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&cone_weight) {
        return Err(Error::invalid_parameter_dynamic(format!(
            "cone_weight ({}) must be between 0 and 1",
            cone_weight
        )));
    }
    Ok(())
}

/// Cluster bounds assume clusters of limited size.
pub(crate) fn cluster_size(triangle_count: usize) -> Result<()> {
    if triangle_count > MESHLET_MAX_TRIANGLES {
        return Err(Error::invalid_parameter_dynamic(format!(
            "triangle count ({}) must be at most {} for cluster bounds",
            triangle_count, MESHLET_MAX_TRIANGLES
        )));
    }
    Ok(())
}
