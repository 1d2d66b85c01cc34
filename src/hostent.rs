//! Host alias lists from the C library's `hostent` lookups.
//!
//! `getaddrinfo`/`getnameinfo` drop the alias list that `gethostbyname` and
//! `gethostbyaddr` report (CNAME chains, extra names in `/etc/hosts`). This
//! module recovers it with the reentrant variants.

use std::net::Ipv4Addr;

/// Aliases recorded for `name`, empty if none or if the lookup fails.
#[must_use]
pub fn aliases_for_name(name: &str) -> Vec<String> {
    sys::aliases_for_name(name)
}

/// Aliases recorded for `addr`, empty if none or if the lookup fails.
#[must_use]
pub fn aliases_for_addr(addr: Ipv4Addr) -> Vec<String> {
    sys::aliases_for_addr(addr)
}

#[cfg(target_os = "linux")]
mod sys {
    use std::ffi::{CStr, CString, c_char, c_int, c_void};
    use std::net::Ipv4Addr;

    /// First scratch buffer size; doubled on `ERANGE`.
    const INITIAL_BUF_LEN: usize = 1024;

    /// Give up growing the scratch buffer past this.
    const MAX_BUF_LEN: usize = 64 * 1024;

    // Not exported by the `libc` crate.
    unsafe extern "C" {
        fn gethostbyname_r(
            name: *const c_char,
            ret: *mut libc::hostent,
            buf: *mut c_char,
            buflen: libc::size_t,
            result: *mut *mut libc::hostent,
            h_errnop: *mut c_int,
        ) -> c_int;

        fn gethostbyaddr_r(
            addr: *const c_void,
            len: libc::socklen_t,
            kind: c_int,
            ret: *mut libc::hostent,
            buf: *mut c_char,
            buflen: libc::size_t,
            result: *mut *mut libc::hostent,
            h_errnop: *mut c_int,
        ) -> c_int;
    }

    pub fn aliases_for_name(name: &str) -> Vec<String> {
        let Ok(c_name) = CString::new(name) else {
            return Vec::new();
        };
        with_hostent(|ret, buf, len, result, h_errno| {
            // SAFETY: every pointer is valid for the duration of the call.
            unsafe { gethostbyname_r(c_name.as_ptr(), ret, buf, len, result, h_errno) }
        })
    }

    pub fn aliases_for_addr(addr: Ipv4Addr) -> Vec<String> {
        let in_addr = libc::in_addr {
            s_addr: u32::from_ne_bytes(addr.octets()),
        };
        #[allow(clippy::cast_possible_truncation)]
        let addr_len = std::mem::size_of::<libc::in_addr>() as libc::socklen_t;
        with_hostent(|ret, buf, len, result, h_errno| {
            // SAFETY: `in_addr` outlives the call; other pointers as above.
            unsafe {
                gethostbyaddr_r(
                    std::ptr::from_ref(&in_addr).cast::<c_void>(),
                    addr_len,
                    libc::AF_INET,
                    ret,
                    buf,
                    len,
                    result,
                    h_errno,
                )
            }
        })
    }

    /// Runs a `*_r` lookup, growing the scratch buffer on `ERANGE`, and
    /// collects `h_aliases`.
    fn with_hostent<F>(mut lookup: F) -> Vec<String>
    where
        F: FnMut(
            *mut libc::hostent,
            *mut c_char,
            libc::size_t,
            *mut *mut libc::hostent,
            *mut c_int,
        ) -> c_int,
    {
        let mut buf_len = INITIAL_BUF_LEN;
        loop {
            // SAFETY: all-zero is a valid `hostent`.
            let mut ret: libc::hostent = unsafe { std::mem::zeroed() };
            let mut buf: Vec<c_char> = vec![0; buf_len];
            let mut result: *mut libc::hostent = std::ptr::null_mut();
            let mut h_errno: c_int = 0;

            let rc = lookup(
                &raw mut ret,
                buf.as_mut_ptr(),
                buf.len(),
                &raw mut result,
                &raw mut h_errno,
            );
            if rc == libc::ERANGE && buf_len < MAX_BUF_LEN {
                buf_len *= 2;
                continue;
            }
            if rc != 0 || result.is_null() {
                tracing::debug!(rc, h_errno, "hostent lookup found nothing");
                return Vec::new();
            }

            // SAFETY: on success `ret` points into `buf`, which is still alive.
            return unsafe { collect_aliases(ret.h_aliases) };
        }
    }

    /// Copies a NULL-terminated array of C strings.
    ///
    /// # Safety
    ///
    /// `list` must be null or a valid NULL-terminated `char **`.
    unsafe fn collect_aliases(list: *mut *mut c_char) -> Vec<String> {
        let mut aliases = Vec::new();
        if list.is_null() {
            return aliases;
        }
        let mut p = list;
        // SAFETY: guaranteed by the caller.
        unsafe {
            while !(*p).is_null() {
                aliases.push(CStr::from_ptr(*p).to_string_lossy().into_owned());
                p = p.add(1);
            }
        }
        aliases
    }
}

#[cfg(not(target_os = "linux"))]
mod sys {
    use std::net::Ipv4Addr;

    pub const fn aliases_for_name(_name: &str) -> Vec<String> {
        Vec::new()
    }

    pub const fn aliases_for_addr(_addr: Ipv4Addr) -> Vec<String> {
        Vec::new()
    }
}
