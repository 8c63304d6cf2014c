//! The host's Direct3D 11 device.

use std::ffi::c_void;

use servo_unity_common::{Size, WindowError};
use servo_unity_webview::{D3d11Device, SharedTexture};
use tracing::warn;
use windows::core::Interface;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::Graphics::Direct3D11::{
    ID3D11Device, ID3D11DeviceContext, ID3D11Resource, ID3D11Texture2D, D3D11_TEXTURE2D_DESC,
};

/// Device handed over by the host's graphics interface.
pub struct HostD3d11 {
    device: ID3D11Device,
}

// SAFETY: ID3D11Device methods are free-threaded. The immediate context is
// only used from `copy_resource`, which runs on the host render thread.
unsafe impl Send for HostD3d11 {}
unsafe impl Sync for HostD3d11 {}

impl HostD3d11 {
    /// Take a reference on a raw `ID3D11Device*`. `None` for null.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a live `ID3D11Device` pointer.
    pub unsafe fn from_raw(raw: *mut c_void) -> Option<Self> {
        ID3D11Device::from_raw_borrowed(&raw)
            .cloned()
            .map(|device| Self { device })
    }
}

fn describe(texture: &ID3D11Texture2D) -> D3D11_TEXTURE2D_DESC {
    let mut desc = D3D11_TEXTURE2D_DESC::default();
    unsafe { texture.GetDesc(&mut desc) };
    desc
}

impl D3d11Device for HostD3d11 {
    fn open_shared_texture(&self, handle: usize) -> Result<Box<dyn SharedTexture>, WindowError> {
        let mut texture: Option<ID3D11Texture2D> = None;
        unsafe {
            self.device
                .OpenSharedResource(HANDLE(handle as *mut c_void), &mut texture)
        }
        .map_err(|e| WindowError::ResourceUnavailable(format!("cannot open shared texture: {e}")))?;
        let texture = texture.ok_or_else(|| {
            WindowError::ResourceUnavailable("shared texture handle resolved to nothing".into())
        })?;

        let desc = describe(&texture);
        Ok(Box::new(EngineTexture {
            size: Size::new(desc.Width, desc.Height),
            format: desc.Format.0 as u32,
            texture,
        }))
    }

    fn texture_size(&self, texture: usize) -> Option<Size> {
        let raw = texture as *mut c_void;
        let texture = unsafe { ID3D11Texture2D::from_raw_borrowed(&raw) }?;
        let desc = describe(texture);
        Some(Size::new(desc.Width, desc.Height))
    }

    fn copy_resource(&self, dst: usize, src: &dyn SharedTexture) {
        let dst_raw = dst as *mut c_void;
        let src_raw = src.as_raw() as *mut c_void;
        let (Some(dst), Some(src)) = (unsafe { ID3D11Resource::from_raw_borrowed(&dst_raw) }, unsafe {
            ID3D11Resource::from_raw_borrowed(&src_raw)
        }) else {
            warn!("texture copy skipped: null resource");
            return;
        };

        let mut context: Option<ID3D11DeviceContext> = None;
        unsafe { self.device.GetImmediateContext(&mut context) };
        match context {
            Some(context) => unsafe { context.CopyResource(dst, src) },
            None => warn!("texture copy skipped: no immediate context"),
        }
    }
}

struct EngineTexture {
    texture: ID3D11Texture2D,
    size: Size,
    format: u32,
}

// SAFETY: the texture is only read through the device on the render thread.
unsafe impl Send for EngineTexture {}
unsafe impl Sync for EngineTexture {}

impl SharedTexture for EngineTexture {
    fn size(&self) -> Size {
        self.size
    }

    fn dxgi_format(&self) -> u32 {
        self.format
    }

    fn as_raw(&self) -> usize {
        self.texture.as_raw() as usize
    }
}
