use std::{
    ffi::{CStr, CString, NulError},
    os::raw::c_char,
};

/// Build a vector of pointers to c-style strings from a slice of rust strings.
///
/// The pointers are only valid while the returned cstrings are alive.
pub fn to_os_ptrs(
    strings: &[String],
) -> Result<(Vec<CString>, Vec<*const c_char>), NulError> {
    let cstrings = strings
        .iter()
        .cloned()
        .map(CString::new)
        .collect::<Result<Vec<CString>, NulError>>()?;
    let ptrs = cstrings
        .iter()
        .map(|cstr| cstr.as_ptr())
        .collect::<Vec<*const c_char>>();
    Ok((cstrings, ptrs))
}

/// Read a nul-terminated name out of a fixed-size Vulkan string array.
pub fn name_from_array(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Convert a static Vulkan extension name into an owned string.
pub fn owned_name(name: &CStr) -> String {
    name.to_string_lossy().into_owned()
}
