//! IAM REST route grammar.

use crate::iam_api::types::IamError;
use once_cell::sync::Lazy;
use std::fmt;

/// HTTP verb used by the IAM API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use Verb::{Delete, Get, Post, Put};

/// Every route the client may call, with the verbs each accepts
const ROUTE_TABLE: &[(&str, &[Verb])] = &[
    ("auth/v1/profile", &[Post]),
    ("auth/v1/profile/{id}", &[Get, Put, Delete]),
    ("auth/v1/resource", &[Post]),
    ("auth/v1/resource/{key}", &[Get, Put, Delete]),
    ("auth/v1/resources", &[Get]),
    ("auth/v1/rule", &[Post]),
    ("auth/v1/rule/{resource_key}/{principal}", &[Get, Put, Delete]),
    ("auth/v1/rules/principal", &[Get]),
    ("auth/v1/rules/resource/{resource_key}", &[Get]),
    ("auth/v1/group", &[Post]),
    ("auth/v1/group/{id}", &[Get, Put, Delete]),
    ("auth/v1/group/{id}/{profile_id}", &[Post, Delete]),
    ("auth/v1/access", &[Post]),
    ("auth/v1/eml", &[Post]),
    ("auth/v1/authorized", &[Get]),
    ("auth/v1/key", &[Post]),
    ("auth/v1/token/{sub}", &[Post, Put, Delete]),
    ("auth/v1/refresh", &[Post]),
];

/// Placeholders holding a resource key, which may span several segments
const KEY_PLACEHOLDERS: &[&str] = &["{key}", "{resource_key}"];

enum Segment {
    Literal(&'static str),
    /// Exactly one non-empty segment
    Placeholder,
    /// One or more segments, e.g. `https://pasta.lternet.edu/package/eml/edi/1/1`
    Key,
}

struct RouteTemplate {
    template: &'static str,
    segments: Vec<Segment>,
    verbs: &'static [Verb],
}

impl RouteTemplate {
    fn parse(template: &'static str, verbs: &'static [Verb]) -> Self {
        let segments = template
            .split('/')
            .map(|segment| {
                if KEY_PLACEHOLDERS.contains(&segment) {
                    Segment::Key
                } else if segment.starts_with('{') && segment.ends_with('}') {
                    Segment::Placeholder
                } else {
                    Segment::Literal(segment)
                }
            })
            .collect();

        Self {
            template,
            segments,
            verbs,
        }
    }

    fn matches(&self, route_segments: &[&str]) -> bool {
        let key_at = self
            .segments
            .iter()
            .position(|segment| matches!(segment, Segment::Key));

        let Some(key_at) = key_at else {
            return self.segments.len() == route_segments.len()
                && single_segments_match(&self.segments, route_segments);
        };

        // Segments after the key are anchored to the end of the route
        let trailing = self.segments.len() - key_at - 1;
        if route_segments.len() < self.segments.len() {
            return false;
        }
        let key_end = route_segments.len() - trailing;
        let key = &route_segments[key_at..key_end];

        single_segments_match(&self.segments[..key_at], &route_segments[..key_at])
            && single_segments_match(&self.segments[key_at + 1..], &route_segments[key_end..])
            && key.first().is_some_and(|value| !value.is_empty())
            && !key.iter().any(|value| value.contains(['?', '#']))
    }
}

fn single_segments_match(segments: &[Segment], route_segments: &[&str]) -> bool {
    segments
        .iter()
        .zip(route_segments)
        .all(|(segment, value)| match segment {
            Segment::Literal(literal) => literal == value,
            Segment::Placeholder | Segment::Key => {
                !value.is_empty() && !value.contains(['?', '#'])
            }
        })
}

static ROUTES: Lazy<Vec<RouteTemplate>> = Lazy::new(|| {
    ROUTE_TABLE
        .iter()
        .map(|(template, verbs)| RouteTemplate::parse(template, verbs))
        .collect()
});

/// Check a concrete route and verb against the route grammar
///
/// Returns the matching template. Routes are relative (`auth/v1/...`);
/// path segments are compared as given, without percent-decoding, so a URL
/// resource key occupies several segments.
pub fn validate_route(route: &str, verb: Verb) -> Result<&'static str, IamError> {
    let route_segments: Vec<&str> = route.split('/').collect();
    let mut matched = ROUTES
        .iter()
        .filter(|template| template.matches(&route_segments))
        .peekable();

    if matched.peek().is_none() {
        return Err(IamError::InvalidRoute(format!("'{}'", route)));
    }

    let mut allowed: Vec<&str> = Vec::new();
    for template in matched {
        if template.verbs.contains(&verb) {
            return Ok(template.template);
        }
        allowed.extend(template.verbs.iter().map(|v| v.as_str()));
    }

    Err(IamError::InvalidVerb(format!(
        "{} is not supported for '{}' (allowed: {})",
        verb,
        route,
        allowed.join(", ")
    )))
}
