//! C string helpers for the host boundary.

use std::borrow::Cow;
use std::ffi::{c_char, c_int, CStr, CString};

/// Borrow a nul-terminated host string. `None` for a null pointer.
///
/// Invalid UTF-8 is replaced rather than rejected.
///
/// # Safety
///
/// `ptr` must be null or point to a nul-terminated string that outlives
/// the returned value.
pub unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<Cow<'a, str>> {
    if ptr.is_null() {
        return None;
    }
    Some(CStr::from_ptr(ptr).to_string_lossy())
}

/// Copy as much of `src` as fits into `dst`, always leaving a terminating
/// nul. Never splits a UTF-8 sequence. Returns `false` when `dst` is empty.
pub fn copy_truncated(src: &str, dst: &mut [u8]) -> bool {
    let Some(room) = dst.len().checked_sub(1) else {
        return false;
    };
    let mut n = src.len().min(room);
    while !src.is_char_boundary(n) {
        n -= 1;
    }
    dst[..n].copy_from_slice(&src.as_bytes()[..n]);
    dst[n] = 0;
    true
}

/// [`copy_truncated`] into a host buffer of `len` bytes.
///
/// # Safety
///
/// `buf` must be null or valid for writes of `len` bytes.
pub unsafe fn write_truncated(src: &str, buf: *mut c_char, len: c_int) -> bool {
    let Ok(len) = usize::try_from(len) else {
        return false;
    };
    if buf.is_null() || len == 0 {
        return false;
    }
    let dst = std::slice::from_raw_parts_mut(buf.cast::<u8>(), len);
    copy_truncated(src, dst)
}

/// A C string for handing to the host. Interior nuls become spaces.
pub fn to_c_string(text: &str) -> CString {
    CString::new(text.replace('\0', " ")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(buf: &[u8]) -> &str {
        let end = buf.iter().position(|&b| b == 0).unwrap();
        std::str::from_utf8(&buf[..end]).unwrap()
    }

    #[test]
    fn fits_with_room_to_spare() {
        let mut buf = [0xffu8; 8];
        assert!(copy_truncated("abc", &mut buf));
        assert_eq!(written(&buf), "abc");
    }

    #[test]
    fn truncates_and_terminates() {
        let mut buf = [0xffu8; 4];
        assert!(copy_truncated("Mozilla", &mut buf));
        assert_eq!(written(&buf), "Moz");
        assert_eq!(buf[3], 0);
    }

    #[test]
    fn one_byte_buffer_holds_only_nul() {
        let mut buf = [0xffu8; 1];
        assert!(copy_truncated("title", &mut buf));
        assert_eq!(buf, [0]);
        assert!(!copy_truncated("title", &mut []));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let mut buf = [0xffu8; 5];
        // Four bytes of room would end inside the second 'é'.
        assert!(copy_truncated("aéé", &mut buf));
        assert_eq!(written(&buf), "aé");
    }

    #[test]
    fn raw_buffer_rejects_null_and_nonpositive_len() {
        let mut buf = vec![0xffu8; 6];
        unsafe {
            assert!(!write_truncated("x", std::ptr::null_mut(), 6));
            assert!(!write_truncated("x", buf.as_mut_ptr().cast(), 0));
            assert!(!write_truncated("x", buf.as_mut_ptr().cast(), -1));
            assert!(write_truncated("servo-unity", buf.as_mut_ptr().cast(), 6));
        }
        assert_eq!(written(&buf), "servo");
    }

    #[test]
    fn borrow_handles_null_and_text() {
        let owned = to_c_string("https://example.org/");
        unsafe {
            assert!(borrow_str(std::ptr::null()).is_none());
            assert_eq!(borrow_str(owned.as_ptr()).unwrap(), "https://example.org/");
        }
        assert_eq!(to_c_string("a\0b").as_bytes(), b"a b");
    }
}
