use crate::{Error, Result};

#[inline(always)]
pub fn any_as_u8_slice<T: Sized>(p: &T) -> &[u8] {
    typed_to_bytes(std::slice::from_ref(p))
}

#[inline(always)]
pub fn typed_to_bytes<T: Sized>(typed: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(typed.as_ptr().cast(), std::mem::size_of_val(typed)) }
}

/// Quantize a float in [-1..1] range into an N-bit fixed point snorm value.
///
/// Assumes reconstruction function (q / (2^(N-1)-1)), which is the case for
/// fixed-function normalized fixed point conversion (except early OpenGL versions).
///
/// Maximum reconstruction error: 1/2^N.
#[inline(always)]
pub fn quantize_snorm(v: f32, n: u32) -> i32 {
    let scale = ((1 << (n - 1)) - 1) as f32;
    let round = if v >= 0f32 { 0.5f32 } else { -0.5f32 };
    let v = if v >= -1f32 { v } else { -1f32 };
    let v = if v <= 1f32 { v } else { 1f32 };
    (v * scale + round) as i32
}

/// Reciprocal that maps zero to zero instead of infinity.
#[inline(always)]
pub fn rcp_safe(v: f32) -> f32 {
    if v == 0f32 {
        0f32
    } else {
        1f32 / v
    }
}

/// Vertices that can decode a position for algorithms that only need
/// float3 positions instead of a full strided vertex layout.
pub trait DecodePosition {
    fn decode_position(&self) -> [f32; 3];
}

impl DecodePosition for [f32; 3] {
    fn decode_position(&self) -> [f32; 3] {
        *self
    }
}

/// Read-only view over an interleaved vertex buffer that exposes the packed
/// float3 position stored at `position_offset` within each record.
pub struct VertexDataAdapter<'a> {
    pub data: &'a [u8],
    pub vertex_count: usize,
    pub vertex_stride: usize,
    pub position_offset: usize,
}

impl<'a> VertexDataAdapter<'a> {
    pub fn new(
        data: &'a [u8],
        vertex_stride: usize,
        position_offset: usize,
    ) -> Result<VertexDataAdapter<'a>> {
        if vertex_stride == 0 || vertex_stride % 4 != 0 {
            return Err(Error::invalid_parameter_dynamic(format!(
                "vertex_stride ({}) must be a positive multiple of 4",
                vertex_stride
            )));
        }
        if data.len() % vertex_stride != 0 {
            return Err(Error::invalid_parameter_dynamic(format!(
                "vertex data length ({}) must be evenly divisible by vertex_stride ({})",
                data.len(),
                vertex_stride
            )));
        }
        if position_offset % 4 != 0 || position_offset + 12 > vertex_stride {
            return Err(Error::invalid_parameter_dynamic(format!(
                "position_offset ({}) must be 4-byte aligned and leave 12 bytes of position data within vertex_stride ({})",
                position_offset, vertex_stride
            )));
        }
        Ok(VertexDataAdapter {
            data,
            vertex_count: data.len() / vertex_stride,
            vertex_stride,
            position_offset,
        })
    }

    /// Decodes the position of the given vertex. The index must be less
    /// than `vertex_count`.
    #[inline]
    pub fn position(&self, index: usize) -> [f32; 3] {
        debug_assert!(index < self.vertex_count);
        let offset = index * self.vertex_stride + self.position_offset;
        let mut position = [0f32; 3];
        for (i, v) in position.iter_mut().enumerate() {
            let at = offset + i * 4;
            *v = f32::from_ne_bytes([
                self.data[at],
                self.data[at + 1],
                self.data[at + 2],
                self.data[at + 3],
            ]);
        }
        position
    }
}
