// ── Finder alias resolution ───────────────────────────────────────────────────
//
// A Finder alias is a regular file whose contents are bookmark data pointing
// at another file.  The old FSRef alias API is gone from modern SDKs; the
// bookmark functions below are its CoreFoundation replacement:
//   1. `CFURLCreateBookmarkDataFromFile` reads the alias record.
//   2. `CFURLCreateByResolvingBookmarkData` turns it into the target URL.
//
// These are declared here rather than taken from core-foundation-sys so that
// the exact signatures used are visible next to the SAFETY comments.

#![allow(unsafe_code)]

use std::{
    ffi::c_void,
    path::{Path, PathBuf},
    ptr,
};

use core_foundation::{base::TCFType, data::CFData, error::CFError, url::CFURL};
use core_foundation_sys::{
    array::CFArrayRef,
    base::{kCFAllocatorDefault, Boolean, CFAllocatorRef, CFOptionFlags, CFRelease, CFTypeRef},
    data::CFDataRef,
    error::CFErrorRef,
    number::kCFBooleanTrue,
    string::CFStringRef,
    url::CFURLRef,
};

use crate::error::{Result, ShimError};

/// Never show UI (e.g. "locate this item") while resolving.
const BOOKMARK_RESOLUTION_WITHOUT_UI: CFOptionFlags = 1 << 8;
/// Never mount a volume to reach the target.
const BOOKMARK_RESOLUTION_WITHOUT_MOUNTING: CFOptionFlags = 1 << 9;

#[link(name = "CoreFoundation", kind = "framework")]
extern "C" {
    static kCFURLIsAliasFileKey: CFStringRef;

    fn CFURLCopyResourcePropertyForKey(
        url: CFURLRef,
        key: CFStringRef,
        property_value_type_ref_ptr: *mut c_void,
        error: *mut CFErrorRef,
    ) -> Boolean;

    fn CFURLCreateBookmarkDataFromFile(
        allocator: CFAllocatorRef,
        file_url: CFURLRef,
        error_ref: *mut CFErrorRef,
    ) -> CFDataRef;

    fn CFURLCreateByResolvingBookmarkData(
        allocator: CFAllocatorRef,
        bookmark: CFDataRef,
        options: CFOptionFlags,
        relative_to_url: CFURLRef,
        resource_properties_to_include: CFArrayRef,
        is_stale: *mut Boolean,
        error: *mut CFErrorRef,
    ) -> CFURLRef;
}

/// Resolve `path` if it is a Finder alias.
///
/// Returns `Ok(None)` for anything that is not an alias (including missing
/// files), `Ok(Some(target))` for a resolved alias, and an error when the
/// alias exists but its target cannot be reached.
pub fn resolve_alias(path: &Path) -> Result<Option<PathBuf>> {
    let Some(url) = CFURL::from_path(path, false) else {
        return Ok(None);
    };
    if !is_alias_file(&url) {
        return Ok(None);
    }

    let mut error: CFErrorRef = ptr::null_mut();

    // SAFETY: `url` is a valid CFURL for the lifetime of this call; `error`
    // is a valid out-pointer.  A non-null result follows the Create rule and
    // is wrapped immediately so it is released exactly once.
    let data = unsafe {
        CFURLCreateBookmarkDataFromFile(kCFAllocatorDefault, url.as_concrete_TypeRef(), &mut error)
    };
    if data.is_null() {
        return Err(take_error("CFURLCreateBookmarkDataFromFile", error));
    }
    // SAFETY: `data` is non-null and owned by us (Create rule).
    let data = unsafe { CFData::wrap_under_create_rule(data) };

    let mut stale: Boolean = 0;
    // SAFETY: `data` holds bookmark bytes produced by CoreFoundation; the
    // relative URL and property array are allowed to be NULL; both
    // out-pointers are valid.  Result follows the Create rule.
    let resolved = unsafe {
        CFURLCreateByResolvingBookmarkData(
            kCFAllocatorDefault,
            data.as_concrete_TypeRef(),
            BOOKMARK_RESOLUTION_WITHOUT_UI | BOOKMARK_RESOLUTION_WITHOUT_MOUNTING,
            ptr::null(),
            ptr::null(),
            &mut stale,
            &mut error,
        )
    };
    if resolved.is_null() {
        return Err(take_error("CFURLCreateByResolvingBookmarkData", error));
    }
    // SAFETY: `resolved` is non-null and owned by us (Create rule).
    let resolved = unsafe { CFURL::wrap_under_create_rule(resolved) };

    resolved
        .to_path()
        .map(Some)
        .ok_or_else(|| ShimError::InvalidPath(path.to_path_buf()))
}

/// Ask the file system whether `url` names an alias file.
fn is_alias_file(url: &CFURL) -> bool {
    let mut value: CFTypeRef = ptr::null();

    // SAFETY: `url` is valid; `kCFURLIsAliasFileKey` is an immutable
    // framework constant; `value` receives a +1 CFBoolean on success, which we
    // release below.  Passing NULL for the error out-pointer is permitted.
    unsafe {
        let ok = CFURLCopyResourcePropertyForKey(
            url.as_concrete_TypeRef(),
            kCFURLIsAliasFileKey,
            (&mut value as *mut CFTypeRef).cast(),
            ptr::null_mut(),
        );
        if ok == 0 || value.is_null() {
            return false;
        }
        let is_alias = value == kCFBooleanTrue as CFTypeRef;
        CFRelease(value);
        is_alias
    }
}

/// Turn a CoreFoundation error out-parameter into a `ShimError`.
fn take_error(function: &'static str, error: CFErrorRef) -> ShimError {
    if error.is_null() {
        return ShimError::Os { function, code: 0 };
    }
    // SAFETY: a non-null error returned through an out-parameter follows the
    // Create rule; wrapping it transfers that ownership.
    let error = unsafe { CFError::wrap_under_create_rule(error) };
    ShimError::Os {
        function,
        code: error.code() as i32,
    }
}
