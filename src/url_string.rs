//! Splicing helpers over raw URL strings.
//!
//! These operate textually around the `?`, `#`, `;` and `/` delimiters and
//! never fail: malformed input degrades to a best-effort result. Query and
//! fragment arguments are taken as already-encoded text; use
//! [`QueryParams::serialize`](crate::QueryParams::serialize) to build one.

use crate::compat::{String, ToString};
use crate::query::{QueryOptions, QueryParams};
use crate::url_parts::{UrlParts, split_at_byte};

/// The query portion of a URL, between `?` and `#`, without the `?`.
pub fn query(url: &str) -> Option<&str> {
    let (rest, _fragment) = split_at_byte(url, b'#');
    split_at_byte(rest, b'?').1
}

/// Remove the query, keeping any fragment.
pub fn delete_query(url: &str) -> String {
    replace_query(url, "")
}

/// Replace the query with `new_query` (empty removes it), keeping the
/// fragment.
pub fn replace_query(url: &str, new_query: &str) -> String {
    let (rest, fragment) = split_at_byte(url, b'#');
    let (base, _old) = split_at_byte(rest, b'?');
    let mut out = base.to_string();
    if !new_query.is_empty() {
        out.push('?');
        out.push_str(new_query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Append `extra` to the existing query, joining with `&`.
pub fn append_query(url: &str, extra: &str) -> String {
    if extra.is_empty() {
        return url.to_string();
    }
    match query(url) {
        Some(existing) if !existing.is_empty() => {
            let mut joined = existing.to_string();
            joined.push('&');
            joined.push_str(extra);
            replace_query(url, &joined)
        }
        _ => replace_query(url, extra),
    }
}

/// Merge `extra` into the existing query under the given options.
///
/// Both query strings are parsed together (the existing one first, so
/// duplicate-key resolution sees `extra`'s values as later occurrences) and
/// the merged mapping is reserialized with the same options.
pub fn merge_query(url: &str, extra: &str, options: QueryOptions) -> String {
    let existing = query(url).unwrap_or("");
    let mut combined = existing.to_string();
    if !combined.is_empty() && !extra.is_empty() {
        combined.push('&');
    }
    combined.push_str(extra);
    let merged = QueryParams::parse(&combined, options);
    replace_query(url, &merged.serialize(options))
}

/// The fragment of a URL, after `#`.
pub fn fragment(url: &str) -> Option<&str> {
    split_at_byte(url, b'#').1
}

/// Remove the fragment, `#` included.
pub fn delete_fragment(url: &str) -> String {
    split_at_byte(url, b'#').0.to_string()
}

/// Append fragment text, adding the `#` separator if not already present.
pub fn append_fragment(url: &str, extra: &str) -> String {
    let mut out = url.to_string();
    if fragment(url).is_none() {
        out.push('#');
    }
    out.push_str(extra);
    out
}

/// The extension of the last path component, without the dot.
/// Dotfiles and bare trailing dots yield `None`.
pub fn path_extension(url: &str) -> Option<String> {
    let path = UrlParts::split(url)?.path?;
    let file = path.rsplit('/').next()?;
    let (stem, ext) = file.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_string())
}

/// Append `.extension` to the path, leaving parameter string, query and
/// fragment in place. URLs without a path pass through unchanged.
pub fn append_path_extension(url: &str, extension: &str) -> String {
    if extension.is_empty() {
        return url.to_string();
    }
    let Some(mut parts) = UrlParts::split(url) else {
        return url.to_string();
    };
    let Some(mut path) = parts.path.take() else {
        return url.to_string();
    };
    path.push('.');
    path.push_str(extension);
    parts.path = Some(path);
    parts.assemble()
}

/// Remove the last path component's extension, if it has one.
pub fn delete_path_extension(url: &str) -> String {
    let Some(ext) = path_extension(url) else {
        return url.to_string();
    };
    let Some(mut parts) = UrlParts::split(url) else {
        return url.to_string();
    };
    if let Some(path) = parts.path.take() {
        let truncated = path.len() - ext.len() - 1;
        parts.path = Some(path[..truncated].to_string());
    }
    parts.assemble()
}

/// The last component of the path. A path of only slashes yields `"/"`.
pub fn last_path_component(url: &str) -> Option<String> {
    let path = UrlParts::split(url)?.path?;
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return Some("/".to_string());
    }
    trimmed.rsplit('/').next().map(ToString::to_string)
}

/// Append a path component, ensuring exactly one `/` at the joint.
pub fn append_path_component(url: &str, component: &str) -> String {
    let component = component.trim_start_matches('/');
    if component.is_empty() {
        return url.to_string();
    }
    let Some(mut parts) = UrlParts::split(url) else {
        return component.to_string();
    };
    let mut path = parts.path.take().unwrap_or_default();
    if path.is_empty() {
        if parts.host.is_some() {
            path.push('/');
        }
    } else if !path.ends_with('/') {
        path.push('/');
    }
    path.push_str(component);
    parts.path = Some(path);
    parts.assemble()
}

/// Remove the last path component. `/a/b` becomes `/a`, `/a` becomes `/`,
/// a single relative component becomes the empty path.
pub fn delete_last_path_component(url: &str) -> String {
    let Some(mut parts) = UrlParts::split(url) else {
        return url.to_string();
    };
    let Some(path) = parts.path.take() else {
        return parts.assemble();
    };
    let trimmed = path.trim_end_matches('/');
    parts.path = match trimmed.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(pos) => Some(trimmed[..pos].to_string()),
        None => None,
    };
    parts.assemble()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Return `url` with its scheme replaced (empty removes it).
/// `None` when `url` itself cannot be decomposed.
pub fn with_scheme(url: &str, scheme: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.scheme = non_empty(scheme);
    Some(parts.assemble())
}

/// Return `url` with its user replaced (empty removes it).
pub fn with_user(url: &str, user: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.user = non_empty(user);
    Some(parts.assemble())
}

/// Return `url` with its password replaced (empty removes it).
pub fn with_password(url: &str, password: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.password = non_empty(password);
    Some(parts.assemble())
}

/// Return `url` with its host replaced (empty removes it).
pub fn with_host(url: &str, host: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.host = non_empty(host);
    Some(parts.assemble())
}

/// Return `url` with its port replaced (empty removes it).
/// `None` when the port is not a valid number.
pub fn with_port(url: &str, port: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.port = if port.is_empty() {
        None
    } else {
        Some(port.parse::<u16>().ok()?)
    };
    Some(parts.assemble())
}

/// Return `url` with its path replaced (empty removes it).
pub fn with_path(url: &str, path: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.path = non_empty(path);
    Some(parts.assemble())
}

/// Return `url` with its parameter string replaced (empty removes it).
pub fn with_parameter_string(url: &str, parameter_string: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.parameter_string = non_empty(parameter_string);
    Some(parts.assemble())
}

/// Return `url` with its query replaced (empty removes it).
pub fn with_query(url: &str, query: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.query = non_empty(query);
    Some(parts.assemble())
}

/// Return `url` with its fragment replaced (empty removes it).
pub fn with_fragment(url: &str, fragment: &str) -> Option<String> {
    let mut parts = UrlParts::split(url)?;
    parts.fragment = non_empty(fragment);
    Some(parts.assemble())
}
