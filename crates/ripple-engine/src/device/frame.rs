/// A single acquired surface frame.
///
/// Short-lived: submit it promptly. Holding the surface texture blocks
/// acquisition of the next one.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,

    /// Drawable size of `view` in physical pixels.
    pub size: (u32, u32),
}
