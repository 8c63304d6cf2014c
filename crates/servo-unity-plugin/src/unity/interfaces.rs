//! `#[repr(C)]` mirrors of the Unity native plugin interface headers
//! (`IUnityInterface.h`, `IUnityGraphics.h`, `IUnityGraphicsD3D11.h`).

use std::ffi::{c_int, c_void};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnityInterfaceGuid {
    pub high: u64,
    pub low: u64,
}

/// A Unity interface table reachable through [`IUnityInterfaces`].
pub trait UnityInterface {
    const GUID: UnityInterfaceGuid;
}

pub type DeviceEventCallback = Option<unsafe extern "system" fn(event_type: c_int)>;

/// Unity render-thread event callback, as returned by `GetRenderEventFunc`.
pub type UnityRenderingEvent = unsafe extern "system" fn(event_id: c_int);

#[repr(C)]
pub struct IUnityInterfaces {
    pub get_interface: Option<unsafe extern "system" fn(guid: UnityInterfaceGuid) -> *mut c_void>,
    pub register_interface:
        Option<unsafe extern "system" fn(guid: UnityInterfaceGuid, ptr: *mut c_void)>,
    pub get_interface_split:
        Option<unsafe extern "system" fn(guid_high: u64, guid_low: u64) -> *mut c_void>,
    pub register_interface_split:
        Option<unsafe extern "system" fn(guid_high: u64, guid_low: u64, ptr: *mut c_void)>,
}

impl IUnityInterfaces {
    /// Look up interface `T`. Null when the host does not provide it.
    ///
    /// # Safety
    ///
    /// `self` must be the table handed to `UnityPluginLoad`.
    pub unsafe fn get<T: UnityInterface>(&self) -> *mut T {
        match self.get_interface_split {
            Some(get) => get(T::GUID.high, T::GUID.low).cast(),
            None => match self.get_interface {
                Some(get) => get(T::GUID).cast(),
                None => std::ptr::null_mut(),
            },
        }
    }
}

#[repr(C)]
pub struct IUnityGraphics {
    pub get_renderer: Option<unsafe extern "system" fn() -> c_int>,
    pub register_device_event_callback: Option<unsafe extern "system" fn(DeviceEventCallback)>,
    pub unregister_device_event_callback: Option<unsafe extern "system" fn(DeviceEventCallback)>,
    pub reserve_event_id_range: Option<unsafe extern "system" fn(count: c_int) -> c_int>,
}

impl UnityInterface for IUnityGraphics {
    const GUID: UnityInterfaceGuid = UnityInterfaceGuid {
        high: 0x7CBA_0A9C_A4DD_B544,
        low: 0x8C5A_D492_6EB1_7B11,
    };
}

#[repr(C)]
pub struct IUnityGraphicsD3D11 {
    pub get_device: Option<unsafe extern "system" fn() -> *mut c_void>,
    pub texture_from_render_buffer: Option<unsafe extern "system" fn(buffer: *mut c_void) -> *mut c_void>,
}

impl UnityInterface for IUnityGraphicsD3D11 {
    const GUID: UnityInterfaceGuid = UnityInterfaceGuid {
        high: 0xAAB3_7EF8_7A87_D748,
        low: 0xBF76_967F_07EF_B177,
    };
}
