//! Virtual network-share path translation.
//!
//! Scheduler items can point at media through `nfs://` or `smb://`
//! virtual paths. Native tools on Windows-like hosts cannot open those
//! schemes directly, but they can open the equivalent `//host/share/...`
//! UNC path, so the prefix is rewritten before anything touches the
//! filesystem. On other hosts the path passes through untouched and the
//! platform's own share mounting is expected to handle it.

use std::borrow::Cow;

/// Virtual schemes that map onto UNC paths.
const UNC_SCHEMES: [&str; 2] = ["nfs://", "smb://"];

/// Rewrite a virtual share path into a form native tools can open.
///
/// Pure and total: no I/O, no failure mode. Paths without a virtual
/// scheme, and all paths on non-Windows-like hosts, are returned
/// unchanged.
pub fn translate(path: &str, windows_like: bool) -> Cow<'_, str> {
    if windows_like {
        for scheme in UNC_SCHEMES {
            if let Some(rest) = path.strip_prefix(scheme) {
                return Cow::Owned(format!("//{rest}"));
            }
        }
    }
    Cow::Borrowed(path)
}
