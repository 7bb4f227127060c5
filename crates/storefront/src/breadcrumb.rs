//! Breadcrumb trail computed from the request path.
//!
//! Home-rooted cumulative links: `/category/3` becomes
//! Home / Category / 3, where each crumb links to the path prefix up to
//! that segment.

/// One segment of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    /// Link target: the cumulative path up to this segment.
    pub href: String,
    /// Display label: the segment with its first letter capitalized.
    pub label: String,
}

/// Build the breadcrumb trail for a request path. The leading Home crumb
/// is rendered by the template, so the root path yields no crumbs.
#[must_use]
pub fn trail(path: &str) -> Vec<Crumb> {
    let mut href = String::new();
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            href.push('/');
            href.push_str(segment);
            Crumb {
                href: href.clone(),
                label: capitalize(segment),
            }
        })
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}
