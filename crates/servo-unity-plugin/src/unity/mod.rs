//! Unity native plugin interface: load/unload, graphics device events and
//! the render-event function.

#![allow(non_snake_case)]

pub mod interfaces;

use std::ffi::c_int;
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::Arc;

use servo_unity_common::{DeviceEvent, Renderer};
use servo_unity_webview::{D3d11Device, DeviceProvider, GlContext};
use tracing::{debug, error, warn};

use crate::gl_context::NativeGl;
use crate::plugin::plugin;

pub use interfaces::{
    IUnityGraphics, IUnityGraphicsD3D11, IUnityInterfaces, UnityInterface, UnityRenderingEvent,
};

static INTERFACES: AtomicPtr<IUnityInterfaces> = AtomicPtr::new(std::ptr::null_mut());
static GRAPHICS: AtomicPtr<IUnityGraphics> = AtomicPtr::new(std::ptr::null_mut());

/// Device handles as reported by the host's graphics interfaces.
pub struct UnityDevices;

impl DeviceProvider for UnityDevices {
    fn renderer(&self) -> Renderer {
        let graphics = GRAPHICS.load(Ordering::Acquire);
        match unsafe { graphics.as_ref() }.and_then(|g| g.get_renderer) {
            Some(get_renderer) => Renderer::from_raw(unsafe { get_renderer() }),
            None => Renderer::Null,
        }
    }

    fn gl_context(&self) -> Option<Arc<dyn GlContext>> {
        Some(Arc::new(NativeGl))
    }

    #[cfg(windows)]
    fn d3d11_device(&self) -> Option<Arc<dyn D3d11Device>> {
        let interfaces = unsafe { INTERFACES.load(Ordering::Acquire).as_ref() }?;
        let d3d11 = unsafe { interfaces.get::<IUnityGraphicsD3D11>().as_ref() }?;
        let get_device = d3d11.get_device?;
        let device = unsafe { crate::d3d11::HostD3d11::from_raw(get_device()) }?;
        Some(Arc::new(device))
    }

    #[cfg(not(windows))]
    fn d3d11_device(&self) -> Option<Arc<dyn D3d11Device>> {
        None
    }
}

unsafe extern "system" fn on_graphics_device_event(event_type: c_int) {
    match DeviceEvent::from_raw(event_type) {
        Some(event) => plugin().on_device_event(event, &UnityDevices),
        None => warn!(event_type, "unknown graphics device event"),
    }
}

unsafe extern "system" fn on_render_event(event_id: c_int) {
    plugin().render_event(event_id);
}

/// # Safety
///
/// `interfaces` must be the host's interface table, valid until unload.
#[no_mangle]
pub unsafe extern "system" fn UnityPluginLoad(interfaces: *mut IUnityInterfaces) {
    let plugin = plugin();
    let Some(table) = interfaces.as_ref() else {
        error!("plugin loaded without an interface table");
        return;
    };
    INTERFACES.store(interfaces, Ordering::Release);

    let graphics = table.get::<IUnityGraphics>();
    GRAPHICS.store(graphics, Ordering::Release);
    match graphics.as_ref().and_then(|g| g.register_device_event_callback) {
        Some(register) => register(Some(on_graphics_device_event)),
        None => warn!("host graphics interface unavailable"),
    }

    // The device may already exist; the callback only fires for later events.
    plugin.on_device_event(DeviceEvent::Initialize, &UnityDevices);
    debug!("unity plugin interface loaded");
}

/// # Safety
///
/// Called by the host once, after every other plugin call has returned.
#[no_mangle]
pub unsafe extern "system" fn UnityPluginUnload() {
    let graphics = GRAPHICS.swap(std::ptr::null_mut(), Ordering::AcqRel);
    if let Some(unregister) = graphics.as_ref().and_then(|g| g.unregister_device_event_callback) {
        unregister(Some(on_graphics_device_event));
    }
    INTERFACES.store(std::ptr::null_mut(), Ordering::Release);
    debug!("unity plugin interface unloaded");
}

#[no_mangle]
pub extern "system" fn GetRenderEventFunc() -> UnityRenderingEvent {
    on_render_event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renderer_without_graphics_interface_is_null() {
        assert_eq!(UnityDevices.renderer(), Renderer::Null);
    }
}
